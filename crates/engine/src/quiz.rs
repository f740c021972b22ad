//! Command/event driver around [`QuizSession`].
//!
//! [`Quiz`] owns the session together with the player's progression and
//! settings. Renderers send [`QuizCommand`]s and receive [`QuizEvent`]s through
//! a [`Notifier`]; persistence is flushed here after every resolved question,
//! at the end of a session and on every settings change.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::core::badges::{Badge, BADGES};
use crate::core::catalog::Catalog;
use crate::core::progression::normalize;
use crate::core::{QuizSession, QuizSnapshot};
use crate::notify::Notifier;
use crate::store::Store;
use crate::types::{ProgressionData, QuizCommand, QuizEvent, Settings};

pub struct Quiz<S: Store, N: Notifier> {
    session: QuizSession,
    progress: ProgressionData,
    settings: Settings,
    store: S,
    notifier: N,
}

impl<S: Store, N: Notifier> Quiz<S, N> {
    /// Create a quiz, reading progression and settings from `store` once.
    ///
    /// Missing or unreadable blobs fall back to defaults.
    pub fn new(catalog: Arc<Catalog>, store: S, notifier: N, seed: u32) -> Self {
        let mut progress = match store.load_progress() {
            Ok(data) => data.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "discarding stored progression");
                ProgressionData::default()
            }
        };
        normalize(&mut progress);

        let mut settings = match store.load_settings() {
            Ok(data) => data.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "discarding stored settings");
                Settings::default()
            }
        };
        settings.music_volume = clamp_volume(settings.music_volume);
        settings.sfx_volume = clamp_volume(settings.sfx_volume);

        debug!(
            level = progress.level,
            xp = progress.xp,
            badges = progress.badges.len(),
            "loaded player data"
        );

        Self {
            session: QuizSession::new(catalog, seed),
            progress,
            settings,
            store,
            notifier,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn catalog(&self) -> &Catalog {
        self.session.catalog()
    }

    pub fn progress(&self) -> &ProgressionData {
        &self.progress
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        self.session.snapshot(&self.progress)
    }

    pub fn snapshot_into(&self, out: &mut QuizSnapshot) {
        self.session.snapshot_into(&self.progress, out);
    }

    /// Every badge with its unlocked flag, in catalog order.
    pub fn badge_status(&self) -> impl Iterator<Item = (&'static Badge, bool)> + '_ {
        BADGES
            .iter()
            .map(move |badge| (badge, self.progress.has_badge(badge.id)))
    }

    /// Apply a renderer command. Returns whether state changed.
    pub fn handle(&mut self, command: QuizCommand) -> bool {
        debug!(?command, "command");

        let changed = match command {
            QuizCommand::StartSession { difficulty, mode } => {
                let timer = self.settings.timer_active(difficulty);
                self.session.start(difficulty, mode, timer);
                info!(
                    session = self.session.session_id(),
                    difficulty = difficulty.as_str(),
                    mode = mode.as_str(),
                    timer,
                    "session started"
                );
                true
            }
            QuizCommand::SubmitAnswer(id) => self.session.submit(id, &mut self.progress).is_some(),
            QuizCommand::UseHint => self.session.use_hint(),
            QuizCommand::UseSkip => self.session.use_skip(),
            QuizCommand::UseFifty => self.session.use_fifty(),
            QuizCommand::Next => self.session.advance(),
            QuizCommand::Abandon => {
                let left = self.session.abandon();
                if left {
                    info!(
                        session = self.session.session_id(),
                        score = self.session.score(),
                        "session abandoned"
                    );
                    self.save_progress();
                    self.save_settings();
                }
                left
            }
            QuizCommand::SetMusicVolume(percent) => {
                self.settings.music_volume = percent_to_volume(percent);
                self.save_settings();
                true
            }
            QuizCommand::SetSfxVolume(percent) => {
                self.settings.sfx_volume = percent_to_volume(percent);
                self.save_settings();
                true
            }
            QuizCommand::ToggleTimer => {
                self.settings.timer = !self.settings.timer;
                self.save_settings();
                true
            }
            QuizCommand::ToggleParticles => {
                self.settings.particles = !self.settings.particles;
                self.save_settings();
                true
            }
        };

        self.dispatch();
        changed
    }

    /// Advance time by `elapsed_ms`. Returns whether anything visible changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let changed = self.session.tick(elapsed_ms, &mut self.progress);
        self.dispatch();
        changed
    }

    /// Forward queued session events and flush what they imply.
    fn dispatch(&mut self) {
        let events = self.session.take_events();
        let mut resolved = false;
        let mut ended = false;

        for event in &events {
            match event {
                QuizEvent::AnswerResolved(outcome) => {
                    resolved = true;
                    debug!(
                        kind = ?outcome.kind,
                        xp = outcome.xp_awarded,
                        streak = outcome.streak,
                        lives = outcome.lives,
                        "answer resolved"
                    );
                }
                QuizEvent::LevelUp { level } => info!(level, "level up"),
                QuizEvent::BadgeUnlocked { id } => info!(badge = id, "badge unlocked"),
                QuizEvent::SessionEnded(summary) => {
                    ended = true;
                    info!(
                        score = summary.score,
                        total = summary.total,
                        accuracy = summary.accuracy_percent,
                        new_record = summary.new_record,
                        "session ended"
                    );
                }
                _ => {}
            }
            self.notifier.notify(event);
        }

        if resolved || ended {
            self.save_progress();
        }
        if ended {
            self.save_settings();
        }
    }

    fn save_progress(&mut self) {
        if let Err(e) = self.store.save_progress(&self.progress) {
            warn!(error = %e, "failed to save progression");
        }
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.store.save_settings(&self.settings) {
            warn!(error = %e, "failed to save settings");
        }
    }
}

fn percent_to_volume(percent: u8) -> f32 {
    percent.min(100) as f32 / 100.0
}

fn clamp_volume(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::bundled_catalog;
    use crate::store::{MemoryStore, StoreError};
    use crate::types::{AnswerKind, Difficulty, QuizMode};

    fn quiz(store: MemoryStore) -> Quiz<MemoryStore, Vec<QuizEvent>> {
        let catalog = Arc::new(bundled_catalog().unwrap());
        Quiz::new(catalog, store, Vec::new(), 42)
    }

    fn start(q: &mut Quiz<MemoryStore, Vec<QuizEvent>>, difficulty: Difficulty) {
        q.handle(QuizCommand::StartSession {
            difficulty,
            mode: QuizMode::Flag,
        });
    }

    #[test]
    fn test_loads_defaults_from_empty_store() {
        let q = quiz(MemoryStore::default());
        assert_eq!(q.progress(), &ProgressionData::default());
        assert_eq!(q.settings(), &Settings::default());
    }

    #[test]
    fn test_loads_and_repairs_stored_data() {
        let store = MemoryStore {
            progress: Some(ProgressionData {
                level: 0,
                high_score: 9,
                ..ProgressionData::default()
            }),
            settings: Some(Settings {
                music_volume: 3.0,
                ..Settings::default()
            }),
            ..MemoryStore::default()
        };
        let q = quiz(store);
        assert_eq!(q.progress().level, 1);
        assert_eq!(q.progress().high_score, 9);
        assert_eq!(q.settings().music_volume, 1.0);
    }

    #[test]
    fn test_answer_flushes_progress() {
        let mut q = quiz(MemoryStore::default());
        start(&mut q, Difficulty::Easy);
        assert_eq!(q.store().progress_writes, 0);

        let target = q.session().current_country().unwrap();
        assert!(q.handle(QuizCommand::SubmitAnswer(target)));
        assert_eq!(q.store().progress_writes, 1);
        assert_eq!(q.store().progress.as_ref().unwrap().xp, 10);
        assert!(q.store().progress.as_ref().unwrap().has_badge("first_answer"));
    }

    #[test]
    fn test_events_reach_notifier_in_order() {
        let mut q = quiz(MemoryStore::default());
        start(&mut q, Difficulty::Easy);
        let target = q.session().current_country().unwrap();
        q.handle(QuizCommand::SubmitAnswer(target));

        let events = q.notifier();
        assert!(matches!(events[0], QuizEvent::QuestionReady { .. }));
        assert!(matches!(events[1], QuizEvent::AnswerResolved(_)));
        assert_eq!(events[2], QuizEvent::BadgeUnlocked { id: "first_answer" });
    }

    #[test]
    fn test_easy_has_no_timer_unless_enabled() {
        let mut q = quiz(MemoryStore::default());
        start(&mut q, Difficulty::Easy);
        assert_eq!(q.session().timer_percent(), None);

        q.handle(QuizCommand::ToggleTimer);
        start(&mut q, Difficulty::Easy);
        assert_eq!(q.session().timer_percent(), Some(100));
    }

    #[test]
    fn test_timeout_via_tick_flushes() {
        let mut q = quiz(MemoryStore::default());
        start(&mut q, Difficulty::Hard);

        assert!(q.tick(8000));
        let outcome = q.session().last_outcome().unwrap();
        assert_eq!(outcome.kind, AnswerKind::Timeout);
        assert_eq!(q.session().lives(), 1);
        assert_eq!(q.store().progress_writes, 1);
    }

    #[test]
    fn test_game_over_flushes_both_blobs() {
        let mut q = quiz(MemoryStore::default());
        start(&mut q, Difficulty::Hard);

        q.tick(8000);
        q.handle(QuizCommand::Next);
        q.tick(8000);

        assert!(!q.session().active());
        assert_eq!(q.progress().games_played, 1);
        assert_eq!(q.store().progress.as_ref().unwrap().games_played, 1);
        assert_eq!(q.store().settings_writes, 1);
        assert!(matches!(
            q.notifier().last(),
            Some(QuizEvent::SessionEnded(_))
        ));
    }

    #[test]
    fn test_abandon_flushes_without_counting_game() {
        let mut q = quiz(MemoryStore::default());
        start(&mut q, Difficulty::Medium);

        assert!(q.handle(QuizCommand::Abandon));
        assert_eq!(q.progress().games_played, 0);
        assert_eq!(q.store().progress_writes, 1);
        assert!(!q.handle(QuizCommand::Abandon));
    }

    #[test]
    fn test_settings_commands_persist() {
        let mut q = quiz(MemoryStore::default());
        assert!(q.handle(QuizCommand::SetMusicVolume(250)));
        assert!(q.handle(QuizCommand::SetSfxVolume(25)));
        assert!(q.handle(QuizCommand::ToggleParticles));

        let saved = q.store().settings.clone().unwrap();
        assert_eq!(saved.music_volume, 1.0);
        assert_eq!(saved.sfx_volume, 0.25);
        assert!(!saved.particles);
        assert_eq!(q.store().settings_writes, 3);
    }

    #[test]
    fn test_rejected_commands_do_not_flush() {
        let mut q = quiz(MemoryStore::default());
        assert!(!q.handle(QuizCommand::UseHint));
        assert!(!q.handle(QuizCommand::Next));
        assert_eq!(q.store().progress_writes, 0);
        assert!(q.notifier().is_empty());
    }

    #[test]
    fn test_badge_status_lists_all() {
        let mut q = quiz(MemoryStore::default());
        start(&mut q, Difficulty::Easy);
        let target = q.session().current_country().unwrap();
        q.handle(QuizCommand::SubmitAnswer(target));

        let status: Vec<_> = q.badge_status().collect();
        assert_eq!(status.len(), BADGES.len());
        assert!(status[0].1);
        assert!(!status[1].1);
    }

    struct FailingStore;

    impl Store for FailingStore {
        fn load_progress(&self) -> Result<Option<ProgressionData>, StoreError> {
            Err(StoreError::Io {
                path: "progress.json".into(),
                source: std::io::Error::other("unreadable"),
            })
        }
        fn save_progress(&mut self, _: &ProgressionData) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: "progress.json".into(),
                source: std::io::Error::other("read-only"),
            })
        }
        fn load_settings(&self) -> Result<Option<Settings>, StoreError> {
            Ok(None)
        }
        fn save_settings(&mut self, _: &Settings) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn test_store_failures_are_not_fatal() {
        let catalog = Arc::new(bundled_catalog().unwrap());
        let mut q = Quiz::new(catalog, FailingStore, (), 7);
        q.handle(QuizCommand::StartSession {
            difficulty: Difficulty::Easy,
            mode: QuizMode::Capital,
        });
        let target = q.session().current_country().unwrap();
        assert!(q.handle(QuizCommand::SubmitAnswer(target)));
        assert_eq!(q.progress().xp, 10);
    }
}
