//! QuizView: maps quiz and screen state into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::question::{option_label, prompt, shows_region};
use crate::core::{flag_emoji, Catalog, QuizSnapshot, BADGES};
use crate::fb::{text_width, CellStyle, FrameBuffer, Rgb};
use crate::screen::{AppState, MenuItem, Screen, SettingsItem};
use crate::types::{
    AnswerKind, Country, ProgressionData, QuizMode, Region, SessionRating, SessionSummary, Settings,
};

const TEXT: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220));
const MUTED: CellStyle = CellStyle::fg(Rgb::new(130, 130, 140));
const TITLE: CellStyle = CellStyle::fg(Rgb::new(120, 200, 255)).bold();
const ACCENT: CellStyle = CellStyle::fg(Rgb::new(255, 200, 80));
const GOOD: CellStyle = CellStyle::fg(Rgb::new(100, 220, 120));
const BAD: CellStyle = CellStyle::fg(Rgb::new(230, 90, 90));
const BORDER: CellStyle = CellStyle::fg(Rgb::new(90, 90, 110));
const SELECTED: CellStyle = CellStyle::fg(Rgb::new(20, 20, 30)).on(Rgb::new(120, 200, 255));
const HINTED: CellStyle = CellStyle::fg(Rgb::new(20, 20, 30)).on(Rgb::new(255, 200, 80));

/// Widest the content panel gets.
const PANEL_MAX_W: u16 = 76;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything outside [`AppState`] a frame reads.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub catalog: &'a Catalog,
    pub snapshot: &'a QuizSnapshot,
    pub progress: &'a ProgressionData,
    pub settings: &'a Settings,
}

/// Content rectangle inside the border.
#[derive(Debug, Clone, Copy)]
struct Area {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl Area {
    fn bottom(&self) -> u16 {
        self.y + self.h
    }
}

#[derive(Debug, Default)]
pub struct QuizView;

impl QuizView {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, app: &AppState, ctx: &ViewContext, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(&mut fb, app, ctx, viewport);
        fb
    }

    /// Render into a reused framebuffer, resizing it to `viewport`.
    pub fn render_into(
        &self,
        fb: &mut FrameBuffer,
        app: &AppState,
        ctx: &ViewContext,
        viewport: Viewport,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Default::default());

        let panel_w = viewport.width.min(PANEL_MAX_W);
        if panel_w < 24 || viewport.height < 12 {
            fb.put_str(0, 0, "Terminal too small", BAD);
            return;
        }
        let panel_x = (viewport.width - panel_w) / 2;
        fb.draw_border(panel_x, 0, panel_w, viewport.height, BORDER);

        let area = Area {
            x: panel_x + 2,
            y: 1,
            w: panel_w - 4,
            h: viewport.height - 2,
        };
        self.draw_header(fb, area, ctx);
        let body = Area {
            y: area.y + 2,
            h: area.h.saturating_sub(4),
            ..area
        };

        let footer = match app.screen {
            Screen::Menu => self.draw_menu(fb, body, app, ctx),
            Screen::Play => self.draw_play(fb, body, ctx),
            Screen::Summary(summary) => self.draw_summary(fb, body, &summary),
            Screen::Badges => self.draw_badges(fb, body, app, ctx),
            Screen::Learn => self.draw_learn(fb, body, app, ctx),
            Screen::Settings => self.draw_settings(fb, body, app, ctx),
        };
        fb.put_str(area.x, area.bottom() - 1, footer, MUTED);

        self.draw_toasts(fb, area, app);
    }

    fn draw_header(&self, fb: &mut FrameBuffer, area: Area, ctx: &ViewContext) {
        fb.put_str(area.x, area.y, "🌍 GEO QUIZ", TITLE);

        let p = ctx.progress;
        let label = format!("Lv {}  {}/{} XP ", p.level, p.xp, p.xp_to_next);
        let gauge_w = 12u16;
        let label_w = text_width(&label);
        if area.w > label_w + gauge_w + 14 {
            let x = area.x + area.w - label_w - gauge_w;
            fb.put_str(x, area.y, &label, ACCENT);
            fb.put_gauge(x + label_w, area.y, gauge_w, ctx.snapshot.xp_percent(), ACCENT, MUTED);
        }
        fb.fill_rect(area.x, area.y + 1, area.w, 1, '─', BORDER);
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, area: Area, app: &AppState, ctx: &ViewContext) -> &'static str {
        let mut y = area.y + 1;
        fb.put_centered(area.x, y, area.w, "Test your knowledge of the world's countries", MUTED);
        y += 2;

        for (i, item) in MenuItem::ALL.iter().enumerate() {
            let text = match item {
                MenuItem::Play => "Start game".to_string(),
                MenuItem::Difficulty => format!("Difficulty  ◀ {} ▶", title_case(app.menu.difficulty.as_str())),
                MenuItem::Mode => format!("Mode        ◀ {} ▶", title_case(app.menu.mode.as_str())),
                MenuItem::Badges => "Badges".to_string(),
                MenuItem::Learn => "Learn countries".to_string(),
                MenuItem::Settings => "Settings".to_string(),
                MenuItem::Quit => "Quit".to_string(),
            };
            let selected = i == app.menu.cursor;
            let line = format!("{} {}", if selected { "▸" } else { " " }, text);
            let x = area.x + area.w.saturating_sub(30) / 2;
            fb.put_str(x, y, &line, if selected { SELECTED } else { TEXT });
            y += 1;
        }

        y += 1;
        let p = ctx.progress;
        let unlocked = BADGES.iter().filter(|b| p.has_badge(b.id)).count();
        let stats = format!(
            "High score {}   Games {}   Correct {}   Badges {}/{}",
            p.high_score,
            p.games_played,
            p.total_correct,
            unlocked,
            BADGES.len()
        );
        if y < area.bottom() {
            fb.put_centered(area.x, y, area.w, &stats, MUTED);
        }

        "↑↓ move  ←→ change  Enter select  q quit"
    }

    fn draw_play(&self, fb: &mut FrameBuffer, area: Area, ctx: &ViewContext) -> &'static str {
        let s = ctx.snapshot;
        let Some(question) = s.question else {
            fb.put_centered(area.x, area.y + 2, area.w, "No question available", BAD);
            return "Esc menu";
        };
        let target = &ctx.catalog[question.target];

        // Status line.
        let mut x = area.x;
        for i in 0..s.max_lives {
            let (ch, style) = if i < s.lives { ('♥', BAD) } else { ('♡', MUTED) };
            fb.put_char(x, area.y, ch, style);
            x += 1;
        }
        let mut status = format!("   Score {}   Streak {}", s.score, s.streak);
        if s.streak >= 3 {
            status.push_str(" 🔥");
        }
        fb.put_str(x, area.y, &status, TEXT);
        let mode = format!("{} · {}", title_case(s.difficulty.as_str()), title_case(s.mode.as_str()));
        fb.put_str(area.x + area.w.saturating_sub(text_width(&mode)), area.y, &mode, MUTED);

        let powerups = format!(
            "[h] Hint ×{}   [s] Skip ×{}   [f] 50:50 ×{}",
            s.hints, s.skips, s.fifties
        );
        fb.put_str(area.x, area.y + 1, &powerups, if s.answered { MUTED } else { ACCENT });

        let mut y = area.y + 2;
        if let Some(percent) = s.timer_percent {
            let style = if percent <= 25 { BAD } else { GOOD };
            fb.put_str(area.x, y, "⏱", style);
            fb.put_gauge(area.x + 3, y, area.w.saturating_sub(3), percent, style, MUTED);
        }
        y += 2;

        // Prompt.
        match s.mode {
            QuizMode::Flag | QuizMode::Capital => {
                let flag = format!("{}  {}", flag_emoji(&target.code), target.code.to_uppercase());
                fb.put_centered(area.x, y, area.w, &flag, TITLE);
                y += 2;
            }
            QuizMode::Description => {
                for line in wrap(&target.description, area.w.saturating_sub(4) as usize).iter().take(3) {
                    fb.put_centered(area.x, y, area.w, line, TEXT);
                    y += 1;
                }
                let clue = format!("Initial: {}", target.initial);
                fb.put_centered(area.x, y, area.w, &clue, ACCENT);
                y += 2;
            }
        }
        fb.put_centered(area.x, y, area.w, &prompt(s.mode, target), TEXT.bold());
        y += 1;
        if shows_region(s.mode) {
            let tag = format!("[{}]", target.region);
            fb.put_centered(area.x, y, area.w, &tag, MUTED);
        }
        y += 2;

        // Options.
        let outcome = s.last_outcome;
        for (i, &id) in question.options.iter().enumerate() {
            if y >= area.bottom() {
                break;
            }
            let country = &ctx.catalog[id];
            let label = option_label(s.mode, country);
            let key = (b'1' + i as u8) as char;

            let (mark, style) = if question.eliminated[i] {
                ("  ", MUTED.dim())
            } else if let Some(o) = outcome {
                if id == o.correct {
                    ("✓ ", GOOD.bold())
                } else if Some(id) == o.selected {
                    ("✗ ", BAD.bold())
                } else {
                    ("  ", MUTED)
                }
            } else if s.hint_target == Some(id) {
                ("→ ", HINTED)
            } else {
                ("  ", TEXT)
            };

            let line = if question.eliminated[i] {
                format!("{mark}{key}) {}", strike(label))
            } else {
                format!("{mark}{key}) {label}")
            };
            fb.put_str(area.x + 4, y, &line, style);
            y += 1;
        }
        y += 1;

        let Some(o) = outcome else {
            return "1-4 answer  h hint  s skip  f 50:50  Esc menu";
        };
        let correct = &ctx.catalog[o.correct];
        let verdict = match o.kind {
            AnswerKind::Correct => {
                let stars = o.tier.map_or(0, |t| t.stars()) as usize;
                format!("Correct! +{} XP {}", o.xp_awarded, "★".repeat(stars))
            }
            AnswerKind::Wrong => format!("Wrong! The answer was {}", option_label(s.mode, correct)),
            AnswerKind::Timeout => format!("Time's up! The answer was {}", option_label(s.mode, correct)),
        };
        if y < area.bottom() {
            let style = if o.is_correct() { GOOD.bold() } else { BAD.bold() };
            if o.is_correct() && ctx.settings.particles {
                let sparkle = format!("✦ ✧ {verdict} ✧ ✦");
                fb.put_centered(area.x, y, area.w, &sparkle, style);
            } else {
                fb.put_centered(area.x, y, area.w, &verdict, style);
            }
            y += 1;
        }
        for line in wrap(&format!("Fun fact: {}", correct.fun_fact), area.w as usize)
            .iter()
            .take(2)
        {
            if y >= area.bottom() {
                break;
            }
            fb.put_centered(area.x, y, area.w, line, MUTED);
            y += 1;
        }

        if o.session_over {
            "Game over, Enter for results"
        } else {
            "Enter next question  Esc menu"
        }
    }

    fn draw_summary(&self, fb: &mut FrameBuffer, area: Area, summary: &SessionSummary) -> &'static str {
        let mut y = area.y + 1;
        let title_style = match summary.rating {
            SessionRating::Excellent => GOOD.bold(),
            SessionRating::Good => ACCENT.bold(),
            SessionRating::GameOver => BAD.bold(),
        };
        fb.put_centered(area.x, y, area.w, summary.rating.title(), title_style);
        y += 2;
        if summary.new_record {
            fb.put_centered(area.x, y, area.w, "🏆 New high score!", ACCENT);
            y += 2;
        }

        let rows = [
            ("Score", summary.score.to_string()),
            ("Answered", summary.total.to_string()),
            ("Accuracy", format!("{}%", summary.accuracy_percent)),
            ("Best streak", summary.best_streak.to_string()),
            ("High score", summary.high_score.to_string()),
            (
                "Played",
                format!(
                    "{} · {}",
                    title_case(summary.difficulty.as_str()),
                    title_case(summary.mode.as_str())
                ),
            ),
        ];
        let x = area.x + area.w.saturating_sub(30) / 2;
        for (label, value) in rows {
            if y >= area.bottom() {
                break;
            }
            fb.put_str(x, y, label, MUTED);
            fb.put_str(x + 14, y, &value, TEXT.bold());
            y += 1;
        }

        "Enter play again  Esc menu"
    }

    fn draw_badges(&self, fb: &mut FrameBuffer, area: Area, app: &AppState, ctx: &ViewContext) -> &'static str {
        let unlocked = BADGES.iter().filter(|b| ctx.progress.has_badge(b.id)).count();
        let title = format!("Badges {}/{}", unlocked, BADGES.len());
        fb.put_str(area.x, area.y, &title, TITLE);

        let rows = area.h.saturating_sub(2) as usize / 2;
        let scroll = app.badge_scroll.min(BADGES.len().saturating_sub(rows.max(1)));
        let mut y = area.y + 2;
        for badge in BADGES.iter().skip(scroll).take(rows) {
            let owned = ctx.progress.has_badge(badge.id);
            let icon = if owned { badge.icon } else { "🔒" };
            let style = if owned { TEXT.bold() } else { MUTED };
            let end = fb.put_str(area.x, y, icon, style);
            fb.put_str(end + 1, y, badge.name, style);
            fb.put_str(area.x + 3, y + 1, badge.description, MUTED);
            y += 2;
        }

        "↑↓ scroll  Esc menu"
    }

    fn draw_learn(&self, fb: &mut FrameBuffer, area: Area, app: &AppState, ctx: &ViewContext) -> &'static str {
        let learn = &app.learn;
        if let Some(id) = learn.detail {
            self.draw_country_detail(fb, area, &ctx.catalog[id]);
            return "Esc back";
        }

        // Region tabs.
        let mut x = area.x;
        let tabs = std::iter::once(None).chain(Region::ALL.iter().copied().map(Some));
        for tab in tabs {
            let name = tab.map_or("All", |r: Region| r.label());
            let style = if tab == learn.region { SELECTED } else { MUTED };
            x = fb.put_str(x, area.y, &format!(" {name} "), style) + 1;
        }

        let search = format!("Search: {}_", learn.query);
        fb.put_str(area.x, area.y + 1, &search, TEXT);

        let results = learn.results(ctx.catalog);
        let count = format!("{} countries", results.len());
        fb.put_str(area.x + area.w.saturating_sub(text_width(&count)), area.y + 1, &count, MUTED);

        let rows = area.h.saturating_sub(3) as usize;
        let first = learn.cursor.saturating_sub(rows.saturating_sub(1));
        let mut y = area.y + 3;
        for (i, &id) in results.iter().enumerate().skip(first).take(rows) {
            let c = &ctx.catalog[id];
            let style = if i == learn.cursor { SELECTED } else { TEXT };
            let line = format!("{} {:<22} {:<18} {}", flag_emoji(&c.code), c.name, c.capital, c.region);
            fb.put_str(area.x, y, &line, style);
            y += 1;
        }
        if results.is_empty() {
            fb.put_str(area.x, y, "No matching countries", MUTED);
        }

        "Tab region  type to search  ↑↓ move  Enter details  Esc menu"
    }

    fn draw_country_detail(&self, fb: &mut FrameBuffer, area: Area, c: &Country) {
        let mut y = area.y;
        let title = format!("{}  {}", flag_emoji(&c.code), c.name);
        fb.put_str(area.x, y, &title, TITLE);
        y += 2;

        let na = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());
        let facts = [
            ("Region", c.region.label().to_string()),
            ("Capital", c.capital.clone()),
            ("Initial", c.initial.clone()),
            ("Population", na(&c.population)),
            ("Language", na(&c.language)),
            ("Currency", na(&c.currency)),
        ];
        for (label, value) in facts {
            fb.put_str(area.x, y, label, MUTED);
            fb.put_str(area.x + 12, y, &value, TEXT);
            y += 1;
        }
        y += 1;

        let long = |v: &Option<String>| v.clone().unwrap_or_else(|| "Not available yet.".to_string());
        let sections = [
            ("About", c.description.clone()),
            ("Fun fact", c.fun_fact.clone()),
            ("History", long(&c.history)),
            ("Geography", long(&c.geography)),
            ("Culture", long(&c.culture)),
        ];
        for (label, text) in sections {
            if y >= area.bottom() {
                break;
            }
            fb.put_str(area.x, y, label, ACCENT);
            y += 1;
            for line in wrap(&text, area.w as usize) {
                if y >= area.bottom() {
                    break;
                }
                fb.put_str(area.x, y, &line, TEXT);
                y += 1;
            }
        }
    }

    fn draw_settings(&self, fb: &mut FrameBuffer, area: Area, app: &AppState, ctx: &ViewContext) -> &'static str {
        fb.put_str(area.x, area.y, "Settings", TITLE);
        let s = ctx.settings;
        let on_off = |b: bool| if b { "On" } else { "Off" };

        let mut y = area.y + 2;
        for (i, item) in SettingsItem::ALL.iter().enumerate() {
            let selected = i == app.settings.cursor;
            let marker = if selected { "▸ " } else { "  " };
            let style = if selected { SELECTED } else { TEXT };
            let (label, volume, value) = match item {
                SettingsItem::Music => ("Music volume", Some(s.music_volume), String::new()),
                SettingsItem::Sfx => ("Effects volume", Some(s.sfx_volume), String::new()),
                SettingsItem::Timer => ("Timer on easy", None, on_off(s.timer).to_string()),
                SettingsItem::Particles => ("Particles", None, on_off(s.particles).to_string()),
            };
            fb.put_str(area.x, y, &format!("{marker}{label}"), style);
            let vx = area.x + 20;
            match volume {
                Some(v) => {
                    let percent = (v * 100.0).round().clamp(0.0, 100.0) as u8;
                    fb.put_gauge(vx, y, 20, percent, ACCENT, MUTED);
                    fb.put_str(vx + 21, y, &format!("{percent}%"), TEXT);
                }
                None => {
                    fb.put_str(vx, y, &value, TEXT);
                }
            }
            y += 2;
        }

        "↑↓ move  ←→ adjust  Enter toggle  Esc menu"
    }

    fn draw_toasts(&self, fb: &mut FrameBuffer, area: Area, app: &AppState) {
        let mut y = area.y + 2;
        for toast in app.toasts.iter() {
            let text = format!(" {} ", toast.text);
            let w = text_width(&text);
            let x = area.x + area.w.saturating_sub(w);
            fb.put_str(x, y, &text, HINTED);
            y += 1;
        }
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn strike(s: &str) -> String {
    "─".repeat(s.chars().count())
}

/// Greedy word wrap to `width` columns.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QuizSession;
    use crate::fb::CONTINUATION;
    use crate::types::{Difficulty, QuizEvent};
    use std::sync::Arc;

    const CATALOG: &str = r#"[
        {"name": "Japan", "region": "asia", "capital": "Tokyo", "code": "jp", "initial": "JP",
         "description": "Island nation.", "fun_fact": "Many islands.", "population": "125 million"},
        {"name": "France", "region": "europe", "capital": "Paris", "code": "fr", "initial": "FR",
         "description": "Western Europe.", "fun_fact": "Most visited."},
        {"name": "Kenya", "region": "africa", "capital": "Nairobi", "code": "ke", "initial": "KE",
         "description": "East Africa.", "fun_fact": "Runners."},
        {"name": "Peru", "region": "americas", "capital": "Lima", "code": "pe", "initial": "PE",
         "description": "Andean country.", "fun_fact": "Potatoes."},
        {"name": "Fiji", "region": "oceania", "capital": "Suva", "code": "fj", "initial": "FJ",
         "description": "Islands.", "fun_fact": "Date line."}
    ]"#;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::from_json(CATALOG).unwrap())
    }

    fn text(fb: &FrameBuffer) -> String {
        let mut out = String::new();
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                let cell = fb.get(x, y).unwrap();
                if cell.ch != CONTINUATION {
                    out.push(cell.ch);
                }
            }
            out.push('\n');
        }
        out
    }

    fn render(app: &AppState, session: &QuizSession, progress: &ProgressionData) -> String {
        let snapshot = session.snapshot(progress);
        let settings = Settings::default();
        let ctx = ViewContext {
            catalog: session.catalog(),
            snapshot: &snapshot,
            progress,
            settings: &settings,
        };
        text(&QuizView::new().render(app, &ctx, Viewport::new(80, 30)))
    }

    #[test]
    fn test_menu_shows_choices() {
        let session = QuizSession::new(catalog(), 1);
        let app = AppState::new(Difficulty::Hard, QuizMode::Capital);
        let out = render(&app, &session, &ProgressionData::default());
        assert!(out.contains("Start game"));
        assert!(out.contains("◀ Hard ▶"));
        assert!(out.contains("◀ Capital ▶"));
        assert!(out.contains("Badges 0/17"));
    }

    #[test]
    fn test_play_shows_options_and_outcome() {
        let mut session = QuizSession::new(catalog(), 3);
        let mut progress = ProgressionData::default();
        session.start(Difficulty::Easy, QuizMode::Capital, false);
        let mut app = AppState::new(Difficulty::Easy, QuizMode::Capital);
        app.screen = Screen::Play;

        let before = render(&app, &session, &progress);
        let target = session.current_country().unwrap();
        let name = &session.catalog()[target].name;
        assert!(before.contains(&format!("What is the capital of {name}?")));
        assert!(before.contains("Hint ×5"));

        session.submit(target, &mut progress);
        let after = render(&app, &session, &progress);
        assert!(after.contains("Correct! +10 XP ★"));
        assert!(after.contains("✓ "));
    }

    #[test]
    fn test_fifty_strikes_out_options() {
        let mut session = QuizSession::new(catalog(), 5);
        session.start(Difficulty::Easy, QuizMode::Flag, false);
        session.use_fifty();
        let mut app = AppState::new(Difficulty::Easy, QuizMode::Flag);
        app.screen = Screen::Play;

        let out = render(&app, &session, &ProgressionData::default());
        let struck = out.lines().filter(|l| l.contains(") ─")).count();
        assert_eq!(struck, 2);
    }

    #[test]
    fn test_summary_screen() {
        let mut session = QuizSession::new(catalog(), 9);
        let mut progress = ProgressionData::default();
        session.start(Difficulty::Hard, QuizMode::Flag, true);
        session.tick(8000, &mut progress);
        session.advance();
        session.tick(8000, &mut progress);

        let summary = session
            .take_events()
            .into_iter()
            .find_map(|e| match e {
                QuizEvent::SessionEnded(s) => Some(s),
                _ => None,
            })
            .unwrap();
        let mut app = AppState::new(Difficulty::Hard, QuizMode::Flag);
        app.screen = Screen::Summary(summary);

        let out = render(&app, &session, &progress);
        assert!(out.contains("Game Over!"));
        assert!(out.contains("Accuracy"));
        assert!(out.contains("0%"));
    }

    #[test]
    fn test_learn_list_and_detail() {
        let session = QuizSession::new(catalog(), 1);
        let mut app = AppState::new(Difficulty::Easy, QuizMode::Flag);
        app.screen = Screen::Learn;
        app.learn.push_char('a');
        app.learn.push_char('n');

        let out = render(&app, &session, &ProgressionData::default());
        assert!(out.contains("Japan"));
        assert!(out.contains("France"));
        assert!(!out.contains("Kenya"));
        assert!(out.contains("2 countries"));

        app.learn.open(session.catalog());
        let detail = render(&app, &session, &ProgressionData::default());
        assert!(detail.contains("125 million"));
        assert!(detail.contains("N/A"));
        assert!(detail.contains("Not available yet."));
    }

    #[test]
    fn test_badges_and_settings_render() {
        let session = QuizSession::new(catalog(), 1);
        let progress = ProgressionData {
            badges: vec!["first_answer".into()],
            ..ProgressionData::default()
        };
        let mut app = AppState::new(Difficulty::Easy, QuizMode::Flag);

        app.screen = Screen::Badges;
        let out = render(&app, &session, &progress);
        assert!(out.contains("Badges 1/17"));
        assert!(out.contains("First Step"));

        app.screen = Screen::Settings;
        let out = render(&app, &session, &progress);
        assert!(out.contains("60%"));
        assert!(out.contains("Timer on easy"));
    }

    #[test]
    fn test_tiny_terminal() {
        let session = QuizSession::new(catalog(), 1);
        let progress = ProgressionData::default();
        let snapshot = session.snapshot(&progress);
        let settings = Settings::default();
        let ctx = ViewContext {
            catalog: session.catalog(),
            snapshot: &snapshot,
            progress: &progress,
            settings: &settings,
        };
        let app = AppState::new(Difficulty::Easy, QuizMode::Flag);
        let fb = QuizView::new().render(&app, &ctx, Viewport::new(20, 5));
        assert!(text(&fb).contains("Terminal too small"));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("", 5), Vec::<String>::new());
        assert_eq!(wrap("toolongword x", 4), vec!["toolongword", "x"]);
    }
}
