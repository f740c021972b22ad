//! Screen state for the terminal front end.
//!
//! Plain data plus the small bits of navigation logic the view needs. No I/O.

use std::collections::VecDeque;

use crate::core::badges;
use crate::core::Catalog;
use crate::types::{
    CountryId, Difficulty, PowerupKind, QuizCommand, QuizEvent, QuizMode, Region, SessionSummary,
    Settings,
};

/// How long a toast stays on screen.
pub const TOAST_MS: u32 = 2500;

/// Maximum number of toasts shown at once.
pub const MAX_TOASTS: usize = 4;

/// Volume change per key press, in percent.
pub const VOLUME_STEP: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Play,
    Summary(SessionSummary),
    Badges,
    Learn,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Difficulty,
    Mode,
    Badges,
    Learn,
    Settings,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 7] = [
        MenuItem::Play,
        MenuItem::Difficulty,
        MenuItem::Mode,
        MenuItem::Badges,
        MenuItem::Learn,
        MenuItem::Settings,
        MenuItem::Quit,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub cursor: usize,
    pub difficulty: Difficulty,
    pub mode: QuizMode,
}

impl MenuState {
    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.cursor % MenuItem::ALL.len()]
    }

    pub fn move_cursor(&mut self, down: bool) {
        self.cursor = step(self.cursor, MenuItem::ALL.len(), down);
    }

    pub fn cycle_difficulty(&mut self, forward: bool) {
        let i = Difficulty::ALL
            .iter()
            .position(|&d| d == self.difficulty)
            .unwrap_or(0);
        self.difficulty = Difficulty::ALL[step(i, Difficulty::ALL.len(), forward)];
    }

    pub fn cycle_mode(&mut self, forward: bool) {
        let i = QuizMode::ALL.iter().position(|&m| m == self.mode).unwrap_or(0);
        self.mode = QuizMode::ALL[step(i, QuizMode::ALL.len(), forward)];
    }

    pub fn start_command(&self) -> QuizCommand {
        QuizCommand::StartSession {
            difficulty: self.difficulty,
            mode: self.mode,
        }
    }
}

/// Catalog browser: region tab, search text, list cursor and open detail.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LearnState {
    /// `None` shows every region
    pub region: Option<Region>,
    pub query: String,
    pub cursor: usize,
    pub detail: Option<CountryId>,
}

impl LearnState {
    pub fn results(&self, catalog: &Catalog) -> Vec<CountryId> {
        catalog
            .filter(self.region, &self.query)
            .map(|(id, _)| id)
            .collect()
    }

    /// Cycle `All -> Asia -> ... -> Oceania -> All`.
    pub fn cycle_region(&mut self, forward: bool) {
        let tabs = Region::ALL.len() + 1;
        let i = self
            .region
            .and_then(|r| Region::ALL.iter().position(|&x| x == r))
            .map_or(0, |p| p + 1);
        let next = step(i, tabs, forward);
        self.region = if next == 0 {
            None
        } else {
            Some(Region::ALL[next - 1])
        };
        self.cursor = 0;
    }

    pub fn push_char(&mut self, ch: char) {
        self.query.push(ch);
        self.cursor = 0;
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.cursor = 0;
    }

    pub fn move_cursor(&mut self, down: bool, len: usize) {
        self.cursor = if len == 0 { 0 } else { step(self.cursor.min(len - 1), len, down) };
    }

    pub fn open(&mut self, catalog: &Catalog) {
        self.detail = self.results(catalog).get(self.cursor).copied();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Music,
    Sfx,
    Timer,
    Particles,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 4] = [
        SettingsItem::Music,
        SettingsItem::Sfx,
        SettingsItem::Timer,
        SettingsItem::Particles,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsState {
    pub cursor: usize,
}

impl SettingsState {
    pub fn selected(&self) -> SettingsItem {
        SettingsItem::ALL[self.cursor % SettingsItem::ALL.len()]
    }

    pub fn move_cursor(&mut self, down: bool) {
        self.cursor = step(self.cursor, SettingsItem::ALL.len(), down);
    }

    /// Command for left/right (`increase`) or select on the current row.
    pub fn adjust(&self, settings: &Settings, increase: bool) -> QuizCommand {
        let nudge = |volume: f32| {
            let percent = (volume * 100.0).round() as i32;
            let delta = if increase { VOLUME_STEP as i32 } else { -(VOLUME_STEP as i32) };
            (percent + delta).clamp(0, 100) as u8
        };
        match self.selected() {
            SettingsItem::Music => QuizCommand::SetMusicVolume(nudge(settings.music_volume)),
            SettingsItem::Sfx => QuizCommand::SetSfxVolume(nudge(settings.sfx_volume)),
            SettingsItem::Timer => QuizCommand::ToggleTimer,
            SettingsItem::Particles => QuizCommand::ToggleParticles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub remaining_ms: u32,
}

/// Short-lived notifications stacked in a corner.
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    items: VecDeque<Toast>,
}

impl Toasts {
    pub fn push(&mut self, text: impl Into<String>) {
        if self.items.len() == MAX_TOASTS {
            self.items.pop_front();
        }
        self.items.push_back(Toast {
            text: text.into(),
            remaining_ms: TOAST_MS,
        });
    }

    /// Age all toasts; returns whether any expired.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let before = self.items.len();
        for toast in self.items.iter_mut() {
            toast.remaining_ms = toast.remaining_ms.saturating_sub(elapsed_ms);
        }
        self.items.retain(|t| t.remaining_ms > 0);
        self.items.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Toast text for events worth calling out.
pub fn toast_for(event: &QuizEvent) -> Option<String> {
    match *event {
        QuizEvent::LevelUp { level } => Some(format!("⭐ Level up! You reached level {level}")),
        QuizEvent::BadgeUnlocked { id } => badges::find(id)
            .map(|b| format!("{} Badge unlocked: {}", b.icon, b.name)),
        QuizEvent::PowerupUsed { kind, remaining } => {
            let name = match kind {
                PowerupKind::Hint => "Hint",
                PowerupKind::Skip => "Skip",
                PowerupKind::Fifty => "50:50",
            };
            Some(format!("{name} used, {remaining} left"))
        }
        _ => None,
    }
}

/// Whole front-end state besides the quiz itself.
#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub menu: MenuState,
    pub learn: LearnState,
    pub settings: SettingsState,
    pub badge_scroll: usize,
    pub toasts: Toasts,
}

impl AppState {
    pub fn new(difficulty: Difficulty, mode: QuizMode) -> Self {
        Self {
            screen: Screen::Menu,
            menu: MenuState {
                cursor: 0,
                difficulty,
                mode,
            },
            learn: LearnState::default(),
            settings: SettingsState::default(),
            badge_scroll: 0,
            toasts: Toasts::default(),
        }
    }
}

fn step(i: usize, len: usize, forward: bool) -> usize {
    if forward {
        (i + 1) % len
    } else {
        (i + len - 1) % len
    }
}
