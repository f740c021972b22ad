//! Session module - the quiz state machine
//!
//! [`QuizSession`] owns everything scoped to one play-through: the no-repeat
//! deck, the current question, lives, powerups, streaks and the countdown.
//! Cumulative stats live in [`ProgressionData`], which callers pass into the
//! transitions that change it.
//!
//! Every transition is synchronous and either applies fully or is a silent
//! no-op (reported as `false`/`None`). Notifications for the renderer queue up
//! in order and are collected with [`QuizSession::take_events`].

use std::sync::Arc;

use crate::badges::{self, SessionStats};
use crate::catalog::Catalog;
use crate::progression::{add_xp, record_correct, record_game_over};
use crate::question::Question;
use crate::rng::{CountryDeck, SimpleRng};
use crate::scoring::{accuracy_percent, xp_for_correct};
use crate::snapshot::QuizSnapshot;
use crate::timer::{Countdown, CountdownStatus};
use crate::types::*;

/// Offset mixed into the seed for option shuffling, so it does not mirror the deck.
const OPTION_RNG_SALT: u32 = 0x9E37_79B9;

/// One quiz play-through.
#[derive(Debug, Clone)]
pub struct QuizSession {
    catalog: Arc<Catalog>,
    deck: CountryDeck,
    rng: SimpleRng,
    difficulty: Difficulty,
    mode: QuizMode,
    budget: ResourceBudget,
    /// Monotonic session id (increments on every start).
    session_id: u32,
    /// Monotonic id of the asked question (increments on every new question).
    question_id: u32,
    question: Option<Question>,
    last_outcome: Option<AnswerOutcome>,
    score: u32,
    total: u32,
    streak: u32,
    best_streak: u32,
    perfect_run: u32,
    lives: u8,
    hints: u8,
    skips: u8,
    fifties: u8,
    timer_enabled: bool,
    timer: Option<Countdown>,
    hint_reveal_ms: u32,
    active: bool,
    answered: bool,
    events: Vec<QuizEvent>,
}

impl QuizSession {
    /// Create an idle session over `catalog`; nothing happens until [`start`](Self::start).
    pub fn new(catalog: Arc<Catalog>, seed: u32) -> Self {
        let deck = CountryDeck::new(catalog.len() as u16, seed);
        let budget = Difficulty::default().budget();

        Self {
            catalog,
            deck,
            rng: SimpleRng::new(seed ^ OPTION_RNG_SALT),
            difficulty: Difficulty::default(),
            mode: QuizMode::default(),
            budget,
            session_id: 0,
            question_id: 0,
            question: None,
            last_outcome: None,
            score: 0,
            total: 0,
            streak: 0,
            best_streak: 0,
            perfect_run: 0,
            lives: budget.max_lives,
            hints: budget.hints,
            skips: budget.skips,
            fifties: budget.fifties,
            timer_enabled: false,
            timer: None,
            hint_reveal_ms: 0,
            active: false,
            answered: false,
            events: Vec::new(),
        }
    }

    /// Begin a fresh session and ask the first question.
    ///
    /// Restarting abandons whatever was running; its countdown is dropped.
    pub fn start(&mut self, difficulty: Difficulty, mode: QuizMode, timer_enabled: bool) {
        self.cancel_timer();

        let budget = difficulty.budget();
        self.difficulty = difficulty;
        self.mode = mode;
        self.budget = budget;
        self.session_id = self.session_id.wrapping_add(1);
        self.score = 0;
        self.total = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.perfect_run = 0;
        self.lives = budget.max_lives;
        self.hints = budget.hints;
        self.skips = budget.skips;
        self.fifties = budget.fifties;
        self.timer_enabled = timer_enabled;
        self.question = None;
        self.last_outcome = None;
        self.deck.reshuffle();
        self.active = true;

        self.next_question();
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn question_id(&self) -> u32 {
        self.question_id
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn current_country(&self) -> Option<CountryId> {
        self.question.map(|q| q.target)
    }

    pub fn last_outcome(&self) -> Option<AnswerOutcome> {
        self.last_outcome
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn answered(&self) -> bool {
        self.answered
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn perfect_run(&self) -> u32 {
        self.perfect_run
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn max_lives(&self) -> u8 {
        self.budget.max_lives
    }

    pub fn hints(&self) -> u8 {
        self.hints
    }

    pub fn skips(&self) -> u8 {
        self.skips
    }

    pub fn fifties(&self) -> u8 {
        self.fifties
    }

    pub fn deck(&self) -> &CountryDeck {
        &self.deck
    }

    /// Remaining countdown in percent, `None` when no countdown runs.
    pub fn timer_percent(&self) -> Option<u8> {
        self.timer.map(|t| t.remaining_percent())
    }

    /// The option currently highlighted by a hint.
    pub fn hint_target(&self) -> Option<CountryId> {
        if self.hint_reveal_ms > 0 {
            self.current_country()
        } else {
            None
        }
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            score: self.score,
            best_streak: self.best_streak,
            perfect_run: self.perfect_run,
        }
    }

    /// Whether a question is open for answers or powerups.
    fn accepting(&self) -> bool {
        self.active && !self.answered && self.question.is_some()
    }

    fn cancel_timer(&mut self) {
        self.timer = None;
    }

    /// Draw and present the next question.
    fn next_question(&mut self) -> bool {
        self.cancel_timer();
        self.hint_reveal_ms = 0;
        self.answered = false;
        self.last_outcome = None;

        let Some(target) = self.deck.draw() else {
            self.question = None;
            return false;
        };
        let Some(question) =
            Question::generate(&self.catalog, target, self.difficulty, &mut self.rng)
        else {
            self.question = None;
            return false;
        };

        self.question = Some(question);
        self.question_id = self.question_id.wrapping_add(1);
        self.events.push(QuizEvent::QuestionReady {
            target,
            options: question.options,
        });

        if self.timer_enabled {
            let countdown = Countdown::new(self.difficulty.timer_ms());
            self.events.push(QuizEvent::TimerTick {
                remaining_percent: countdown.remaining_percent(),
            });
            self.timer = Some(countdown);
        }
        true
    }

    /// Answer the current question.
    ///
    /// Ignored (returns `None`) unless a question is open and `selected` is
    /// one of its still-selectable options. Only the first of a submission
    /// and a countdown expiry is honoured.
    pub fn submit(
        &mut self,
        selected: CountryId,
        progress: &mut ProgressionData,
    ) -> Option<AnswerOutcome> {
        if !self.accepting() {
            return None;
        }
        let question = self.question?;
        if !question.is_selectable(selected) {
            return None;
        }

        let kind = if selected == question.target {
            AnswerKind::Correct
        } else {
            AnswerKind::Wrong
        };
        Some(self.resolve(kind, Some(selected), progress))
    }

    /// Apply the result of a question and queue its notifications.
    fn resolve(
        &mut self,
        kind: AnswerKind,
        selected: Option<CountryId>,
        progress: &mut ProgressionData,
    ) -> AnswerOutcome {
        self.answered = true;
        self.cancel_timer();
        self.hint_reveal_ms = 0;
        self.total = self.total.saturating_add(1);

        // Only called while a question is open.
        let target = self.current_country().unwrap_or(CountryId(0));
        let mut xp_awarded = 0;
        let mut levels_gained = 0;
        let mut tier = None;

        if kind == AnswerKind::Correct {
            self.score = self.score.saturating_add(1);
            self.streak = self.streak.saturating_add(1);
            self.perfect_run = self.perfect_run.saturating_add(1);
            self.best_streak = self.best_streak.max(self.streak);
            if let Some(country) = self.catalog.get(target) {
                record_correct(progress, country.region);
            }

            xp_awarded = xp_for_correct(self.streak, self.difficulty);
            levels_gained = add_xp(progress, xp_awarded);
            tier = Some(StreakTier::from_streak(self.streak));
        } else {
            self.streak = 0;
            self.perfect_run = 0;
            self.lives = self.lives.saturating_sub(1);
        }

        let session_over = self.lives == 0;
        let outcome = AnswerOutcome {
            kind,
            selected,
            correct: target,
            xp_awarded,
            streak: self.streak,
            tier,
            lives: self.lives,
            session_over,
        };
        self.last_outcome = Some(outcome);
        self.events.push(QuizEvent::AnswerResolved(outcome));

        for below in (0..levels_gained).rev() {
            self.events.push(QuizEvent::LevelUp {
                level: progress.level.saturating_sub(below),
            });
        }

        for badge in badges::evaluate(progress, &self.stats()) {
            self.events.push(QuizEvent::BadgeUnlocked { id: badge.id });
        }

        if session_over {
            self.active = false;
            let summary = self.finish(progress);
            self.events.push(QuizEvent::SessionEnded(summary));
        }

        outcome
    }

    /// Close out a session that ran out of lives.
    fn finish(&mut self, progress: &mut ProgressionData) -> SessionSummary {
        let new_record = record_game_over(progress, self.score);
        SessionSummary {
            difficulty: self.difficulty,
            mode: self.mode,
            score: self.score,
            total: self.total,
            best_streak: self.best_streak,
            accuracy_percent: accuracy_percent(self.score, self.total),
            high_score: progress.high_score,
            new_record,
            rating: SessionRating::from_score(self.score),
        }
    }

    /// Advance time: runs the countdown and fades the hint highlight.
    ///
    /// An expired countdown resolves the question as a timeout. Returns
    /// whether anything visible changed.
    pub fn tick(&mut self, elapsed_ms: u32, progress: &mut ProgressionData) -> bool {
        let mut changed = false;

        if self.hint_reveal_ms > 0 {
            self.hint_reveal_ms = self.hint_reveal_ms.saturating_sub(elapsed_ms);
            changed = true;
        }

        if !self.accepting() {
            return changed;
        }

        let Some(timer) = self.timer.as_mut() else {
            return changed;
        };
        match timer.tick(elapsed_ms) {
            CountdownStatus::Running {
                remaining_percent,
                changed: true,
            } => {
                self.events.push(QuizEvent::TimerTick { remaining_percent });
                true
            }
            CountdownStatus::Running { .. } => changed,
            CountdownStatus::Expired => {
                self.events.push(QuizEvent::TimerTick {
                    remaining_percent: 0,
                });
                self.resolve(AnswerKind::Timeout, None, progress);
                true
            }
        }
    }

    /// Highlight the correct option for a short while.
    pub fn use_hint(&mut self) -> bool {
        if !self.accepting() || self.hints == 0 {
            return false;
        }
        self.hints -= 1;
        self.hint_reveal_ms = HINT_REVEAL_MS;
        self.events.push(QuizEvent::PowerupUsed {
            kind: PowerupKind::Hint,
            remaining: self.hints,
        });
        true
    }

    /// Drop the current question without penalty and ask a new one.
    ///
    /// Score, total and streak are untouched.
    pub fn use_skip(&mut self) -> bool {
        if !self.accepting() || self.skips == 0 {
            return false;
        }
        self.skips -= 1;
        self.cancel_timer();
        self.events.push(QuizEvent::PowerupUsed {
            kind: PowerupKind::Skip,
            remaining: self.skips,
        });
        self.next_question();
        true
    }

    /// Remove two wrong options, leaving the answer and one distractor.
    ///
    /// Refused when the current question already had its elimination.
    pub fn use_fifty(&mut self) -> bool {
        if !self.accepting() || self.fifties == 0 {
            return false;
        }
        let Some(question) = self.question.as_mut() else {
            return false;
        };
        if question.eliminate_two().is_empty() {
            return false;
        }
        self.fifties -= 1;
        self.events.push(QuizEvent::PowerupUsed {
            kind: PowerupKind::Fifty,
            remaining: self.fifties,
        });
        true
    }

    /// Move on from a resolved question.
    pub fn advance(&mut self) -> bool {
        if !self.active || !self.answered {
            return false;
        }
        self.next_question()
    }

    /// Leave the running session. Stats for the game are not recorded.
    pub fn abandon(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.cancel_timer();
        self.hint_reveal_ms = 0;
        self.active = false;
        true
    }

    /// Take all queued notifications in emission order.
    pub fn take_events(&mut self) -> Vec<QuizEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, progress: &ProgressionData, out: &mut QuizSnapshot) {
        out.session_id = self.session_id;
        out.question_id = self.question_id;
        out.difficulty = self.difficulty;
        out.mode = self.mode;
        out.active = self.active;
        out.answered = self.answered;
        out.score = self.score;
        out.total = self.total;
        out.streak = self.streak;
        out.best_streak = self.best_streak;
        out.perfect_run = self.perfect_run;
        out.lives = self.lives;
        out.max_lives = self.budget.max_lives;
        out.hints = self.hints;
        out.skips = self.skips;
        out.fifties = self.fifties;
        out.xp = progress.xp;
        out.level = progress.level;
        out.xp_to_next = progress.xp_to_next;
        out.timer_percent = self.timer_percent();
        out.question = self.question;
        out.hint_target = self.hint_target();
        out.last_outcome = self.last_outcome;
    }

    pub fn snapshot(&self, progress: &ProgressionData) -> QuizSnapshot {
        let mut s = QuizSnapshot::default();
        self.snapshot_into(progress, &mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample_catalog;
    use crate::progression::normalize;

    fn session(seed: u32) -> QuizSession {
        QuizSession::new(Arc::new(sample_catalog()), seed)
    }

    fn wrong_option(s: &QuizSession) -> CountryId {
        let q = s.question().unwrap();
        q.selectable().find(|&id| id != q.target).unwrap()
    }

    #[test]
    fn test_new_session_is_idle() {
        let s = session(1);
        assert!(!s.active());
        assert!(s.question().is_none());
        assert_eq!(s.session_id(), 0);
    }

    #[test]
    fn test_start_applies_budget_and_asks() {
        let mut s = session(1);
        s.start(Difficulty::Medium, QuizMode::Flag, false);

        assert!(s.active());
        assert!(!s.answered());
        assert_eq!((s.lives(), s.hints(), s.skips(), s.fifties()), (3, 3, 2, 2));
        assert!(s.question().is_some());
        assert_eq!(s.session_id(), 1);

        let events = s.take_events();
        assert!(matches!(events[0], QuizEvent::QuestionReady { .. }));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_start_with_timer_emits_full_tick() {
        let mut s = session(1);
        s.start(Difficulty::Hard, QuizMode::Flag, true);
        assert_eq!(s.timer_percent(), Some(100));
        assert_eq!(
            s.take_events()[1],
            QuizEvent::TimerTick {
                remaining_percent: 100
            }
        );
    }

    #[test]
    fn test_submit_before_start_is_ignored() {
        let mut s = session(1);
        let mut p = ProgressionData::default();
        assert!(s.submit(CountryId(0), &mut p).is_none());
        assert_eq!(s.total(), 0);
    }

    #[test]
    fn test_correct_answer() {
        let mut s = session(2);
        let mut p = ProgressionData::default();
        s.start(Difficulty::Easy, QuizMode::Flag, false);
        s.take_events();

        let target = s.current_country().unwrap();
        let outcome = s.submit(target, &mut p).unwrap();

        assert_eq!(outcome.kind, AnswerKind::Correct);
        assert_eq!(outcome.xp_awarded, 10);
        assert_eq!(outcome.tier, Some(StreakTier::One));
        assert_eq!((s.score(), s.total(), s.streak()), (1, 1, 1));
        assert_eq!(s.lives(), 5);
        assert_eq!(p.xp, 10);
        assert_eq!(p.total_correct, 1);
        let region = s.catalog()[target].region;
        assert_eq!(p.region_correct(region), 1);

        let events = s.take_events();
        assert_eq!(events[0], QuizEvent::AnswerResolved(outcome));
        assert!(events.contains(&QuizEvent::BadgeUnlocked { id: "first_answer" }));
    }

    #[test]
    fn test_wrong_answer_costs_life_and_streak() {
        let mut s = session(3);
        let mut p = ProgressionData::default();
        s.start(Difficulty::Easy, QuizMode::Flag, false);

        let target = s.current_country().unwrap();
        s.submit(target, &mut p);
        s.advance();

        let wrong = wrong_option(&s);
        let outcome = s.submit(wrong, &mut p).unwrap();
        assert_eq!(outcome.kind, AnswerKind::Wrong);
        assert_eq!(outcome.selected, Some(wrong));
        assert_eq!(outcome.correct, s.current_country().unwrap());
        assert_eq!(outcome.tier, None);
        assert_eq!((s.streak(), s.perfect_run(), s.lives()), (0, 0, 4));
        assert_eq!(s.best_streak(), 1);
        assert_eq!(s.total(), 2);
    }

    #[test]
    fn test_second_submit_is_ignored() {
        let mut s = session(4);
        let mut p = ProgressionData::default();
        s.start(Difficulty::Easy, QuizMode::Flag, false);

        let target = s.current_country().unwrap();
        assert!(s.submit(target, &mut p).is_some());
        let before = s.snapshot(&p);
        assert!(s.submit(target, &mut p).is_none());
        assert_eq!(s.snapshot(&p), before);
    }

    #[test]
    fn test_foreign_option_is_ignored() {
        let mut s = session(4);
        let mut p = ProgressionData::default();
        s.start(Difficulty::Easy, QuizMode::Flag, false);

        let q = *s.question().unwrap();
        let outsider = s.catalog().ids().find(|id| !q.options.contains(id)).unwrap();
        assert!(s.submit(outsider, &mut p).is_none());
        assert!(!s.answered());
    }

    #[test]
    fn test_timeout_counts_as_wrong() {
        let mut s = session(5);
        let mut p = ProgressionData::default();
        s.start(Difficulty::Hard, QuizMode::Flag, true);
        s.take_events();

        assert!(s.tick(TIMER_HARD_MS, &mut p));
        assert!(s.answered());
        assert_eq!((s.lives(), s.streak(), s.total()), (1, 0, 1));
        assert_eq!(s.timer_percent(), None);

        let events = s.take_events();
        assert_eq!(
            events[0],
            QuizEvent::TimerTick {
                remaining_percent: 0
            }
        );
        match events[1] {
            QuizEvent::AnswerResolved(o) => {
                assert_eq!(o.kind, AnswerKind::Timeout);
                assert_eq!(o.selected, None);
            }
            ref other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_submit_cancels_timer() {
        let mut s = session(6);
        let mut p = ProgressionData::default();
        s.start(Difficulty::Hard, QuizMode::Flag, true);

        let target = s.current_country().unwrap();
        s.submit(target, &mut p);
        let total = s.total();

        // A late expiry must not resolve the question again.
        assert!(!s.tick(TIMER_HARD_MS * 2, &mut p));
        assert_eq!(s.total(), total);
        assert_eq!(s.lives(), 2);
    }

    #[test]
    fn test_no_timer_without_enable() {
        let mut s = session(6);
        let mut p = ProgressionData::default();
        s.start(Difficulty::Easy, QuizMode::Flag, false);
        assert_eq!(s.timer_percent(), None);
        assert!(!s.tick(60_000, &mut p));
        assert!(!s.answered());
    }

    #[test]
    fn test_session_ends_at_zero_lives() {
        let mut s = session(7);
        let mut p = ProgressionData::default();
        s.start(Difficulty::Hard, QuizMode::Flag, false);

        let wrong = wrong_option(&s);
        s.submit(wrong, &mut p);
        assert!(s.active());
        s.advance();
        s.take_events();

        let wrong = wrong_option(&s);
        let outcome = s.submit(wrong, &mut p).unwrap();
        assert!(outcome.session_over);
        assert!(!s.active());
        assert_eq!(s.lives(), 0);
        assert_eq!(p.games_played, 1);

        let events = s.take_events();
        match events.last() {
            Some(QuizEvent::SessionEnded(summary)) => {
                assert_eq!(summary.total, 2);
                assert_eq!(summary.score, 0);
                assert_eq!(summary.accuracy_percent, 0);
                assert_eq!(summary.rating, SessionRating::GameOver);
                assert!(!summary.new_record);
            }
            other => panic!("unexpected {:?}", other),
        }

        // Nothing more is accepted.
        assert!(!s.advance());
        assert!(!s.use_hint());
        assert!(s.submit(wrong, &mut p).is_none());
    }

    #[test]
    fn test_hint_highlight_fades() {
        let mut s = session(8);
        let mut p = ProgressionData::default();
        s.start(Difficulty::Easy, QuizMode::Flag, false);

        assert!(s.use_hint());
        assert_eq!(s.hints(), 4);
        assert_eq!(s.hint_target(), s.current_country());
        assert_eq!((s.score(), s.lives()), (0, 5));

        s.tick(HINT_REVEAL_MS - 1, &mut p);
        assert!(s.hint_target().is_some());
        s.tick(1, &mut p);
        assert!(s.hint_target().is_none());
    }

    #[test]
    fn test_skip_asks_new_question_without_penalty() {
        let mut s = session(9);
        s.start(Difficulty::Medium, QuizMode::Flag, true);
        let first_id = s.question_id();
        s.take_events();

        assert!(s.use_skip());
        assert_eq!(s.skips(), 1);
        assert_eq!(s.question_id(), first_id + 1);
        assert_eq!((s.total(), s.score(), s.streak(), s.lives()), (0, 0, 0, 3));
        assert_eq!(s.timer_percent(), Some(100));

        let events = s.take_events();
        assert_eq!(
            events[0],
            QuizEvent::PowerupUsed {
                kind: PowerupKind::Skip,
                remaining: 1
            }
        );
        assert!(matches!(events[1], QuizEvent::QuestionReady { .. }));
    }

    #[test]
    fn test_powerups_run_out() {
        let mut s = session(10);
        s.start(Difficulty::Hard, QuizMode::Flag, false);

        assert!(s.use_hint());
        assert!(!s.use_hint());
        assert!(s.use_skip());
        assert!(!s.use_skip());
        assert!(s.use_fifty());
        assert!(!s.use_fifty());
        assert_eq!((s.hints(), s.skips(), s.fifties()), (0, 0, 0));
    }

    #[test]
    fn test_powerups_refused_after_answer() {
        let mut s = session(11);
        let mut p = ProgressionData::default();
        s.start(Difficulty::Easy, QuizMode::Flag, false);
        let target = s.current_country().unwrap();
        s.submit(target, &mut p);

        assert!(!s.use_hint());
        assert!(!s.use_skip());
        assert!(!s.use_fifty());
        assert_eq!((s.hints(), s.skips(), s.fifties()), (5, 3, 3));
    }

    #[test]
    fn test_fifty_blocks_eliminated_options() {
        let mut s = session(12);
        let mut p = ProgressionData::default();
        s.start(Difficulty::Easy, QuizMode::Flag, false);

        assert!(s.use_fifty());
        let q = *s.question().unwrap();
        assert_eq!(q.selectable().count(), 2);

        let gone = q
            .options
            .iter()
            .zip(q.eliminated)
            .find(|(_, e)| *e)
            .map(|(&id, _)| id)
            .unwrap();
        assert!(s.submit(gone, &mut p).is_none());
        assert!(!s.answered());

        // A second fifty on the same question is refused and keeps the count.
        assert!(!s.use_fifty());
        assert_eq!(s.fifties(), 2);
    }

    #[test]
    fn test_advance_requires_answer() {
        let mut s = session(13);
        let mut p = ProgressionData::default();
        s.start(Difficulty::Easy, QuizMode::Flag, false);
        assert!(!s.advance());

        let target = s.current_country().unwrap();
        s.submit(target, &mut p);
        assert!(s.advance());
        assert!(!s.answered());
        assert!(s.last_outcome().is_none());
    }

    #[test]
    fn test_abandon_stops_everything() {
        let mut s = session(14);
        let mut p = ProgressionData::default();
        s.start(Difficulty::Medium, QuizMode::Flag, true);

        assert!(s.abandon());
        assert!(!s.active());
        assert_eq!(s.timer_percent(), None);
        assert!(!s.tick(60_000, &mut p));
        assert_eq!(p.games_played, 0);
        assert!(!s.abandon());
    }

    #[test]
    fn test_restart_resets_session_but_not_progress() {
        let mut s = session(15);
        let mut p = ProgressionData::default();
        s.start(Difficulty::Easy, QuizMode::Flag, false);
        let target = s.current_country().unwrap();
        s.submit(target, &mut p);
        s.use_hint();

        s.start(Difficulty::Easy, QuizMode::Capital, false);
        assert_eq!((s.score(), s.total(), s.best_streak()), (0, 0, 0));
        assert_eq!(s.hints(), 5);
        assert_eq!(s.mode(), QuizMode::Capital);
        assert_eq!(p.xp, 10);
        assert_eq!(s.session_id(), 2);
    }

    #[test]
    fn test_level_up_events_follow_answer() {
        let mut s = session(16);
        let mut p = ProgressionData {
            xp: 95,
            ..ProgressionData::default()
        };
        s.start(Difficulty::Easy, QuizMode::Flag, false);
        s.take_events();

        let target = s.current_country().unwrap();
        s.submit(target, &mut p);
        let events = s.take_events();
        assert!(matches!(events[0], QuizEvent::AnswerResolved(_)));
        assert_eq!(events[1], QuizEvent::LevelUp { level: 2 });
        assert_eq!((p.level, p.xp, p.xp_to_next), (2, 5, 150));
    }

    #[test]
    fn test_one_award_can_cross_two_levels() {
        let mut s = session(17);
        let mut p = ProgressionData {
            xp: 3,
            xp_to_next: 4,
            ..ProgressionData::default()
        };
        s.start(Difficulty::Medium, QuizMode::Flag, false);
        s.take_events();

        let target = s.current_country().unwrap();
        let outcome = s.submit(target, &mut p).unwrap();
        assert_eq!(outcome.xp_awarded, 15);

        let events = s.take_events();
        assert!(matches!(events[0], QuizEvent::AnswerResolved(_)));
        assert_eq!(events[1], QuizEvent::LevelUp { level: 2 });
        assert_eq!(events[2], QuizEvent::LevelUp { level: 3 });
        assert_eq!(events[3], QuizEvent::BadgeUnlocked { id: "first_answer" });
        assert_eq!((p.level, p.xp, p.xp_to_next), (3, 8, 9));
    }

    #[test]
    fn test_answers_at_max_level_do_not_overflow() {
        let mut p = ProgressionData {
            level: u32::MAX,
            ..ProgressionData::default()
        };
        normalize(&mut p);

        let mut s = session(18);
        s.start(Difficulty::Easy, QuizMode::Flag, false);
        s.take_events();
        let wrong = wrong_option(&s);
        assert!(s.submit(wrong, &mut p).is_some());
        assert!(s.advance());

        let target = s.current_country().unwrap();
        assert!(s.submit(target, &mut p).unwrap().is_correct());
        assert_eq!(p.level, u32::MAX);
        assert!(!s
            .take_events()
            .iter()
            .any(|e| matches!(e, QuizEvent::LevelUp { .. })));
    }
}
