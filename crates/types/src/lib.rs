//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behaviour beyond parsing and lookup tables,
//! making them usable in any context (quiz core, engine driver, terminal view).
//!
//! # Difficulty Budgets
//!
//! Resources are fixed at session start and never replenished mid-session:
//!
//! | Difficulty | Lives | Hints | Skips | Fifty-fifty |
//! |------------|-------|-------|-------|-------------|
//! | easy       | 5     | 5     | 3     | 3           |
//! | medium     | 3     | 3     | 2     | 2           |
//! | hard       | 2     | 1     | 1     | 1           |
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval of the terminal loop |
//! | `TIMER_DEFAULT_MS` | 15000 | Answer window on easy/medium |
//! | `TIMER_HARD_MS` | 8000 | Answer window on hard |
//! | `TIMER_STEPS` | 100 | Countdown resolution (timer value 100 → 0) |
//! | `HINT_REVEAL_MS` | 2000 | How long a hint highlights the answer |
//!
//! # Examples
//!
//! ```
//! use tui_geoquiz_types::{Difficulty, QuizMode, Region};
//!
//! let diff = Difficulty::from_str("HARD").unwrap();
//! assert_eq!(diff.budget().max_lives, 2);
//! assert!(diff.timer_forced());
//!
//! assert_eq!(Region::from_str("eropa"), Some(Region::Europe));
//! assert_eq!(QuizMode::from_str("desc"), Some(QuizMode::Description));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of answer options presented per question.
pub const OPTION_COUNT: usize = 4;

/// Number of wrong options drawn per question.
pub const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

/// Smallest catalog that can fill a question.
pub const MIN_CATALOG_SIZE: usize = OPTION_COUNT;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Countdown resolution: the timer value runs from 100 down to 0.
pub const TIMER_STEPS: u32 = 100;

/// Answer window on hard difficulty.
pub const TIMER_HARD_MS: u32 = 8_000;

/// Answer window on easy and medium difficulty.
pub const TIMER_DEFAULT_MS: u32 = 15_000;

/// Duration of the hint highlight.
pub const HINT_REVEAL_MS: u32 = 2_000;

/// XP awarded for any correct answer before bonuses.
pub const BASE_XP: u32 = 10;

/// Streak length at which the streak bonus starts.
pub const STREAK_BONUS_THRESHOLD: u32 = 3;

/// Bonus XP per streak step once the bonus is active.
pub const STREAK_BONUS_PER_STEP: u32 = 2;

/// XP needed to leave level 1.
pub const INITIAL_XP_TO_NEXT: u32 = 100;

/// Threshold growth numerator (3/2 = 1.5x per level, floored).
pub const XP_GROWTH_NUMERATOR: u32 = 3;

/// Threshold growth denominator.
pub const XP_GROWTH_DENOMINATOR: u32 = 2;

/// Session score needed for the "excellent" rating.
pub const RATING_EXCELLENT_SCORE: u32 = 20;

/// Session score needed for the "good" rating.
pub const RATING_GOOD_SCORE: u32 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_budgets_match_table() {
        let easy = Difficulty::Easy.budget();
        assert_eq!((easy.max_lives, easy.hints, easy.skips, easy.fifties), (5, 5, 3, 3));

        let medium = Difficulty::Medium.budget();
        assert_eq!(
            (medium.max_lives, medium.hints, medium.skips, medium.fifties),
            (3, 3, 2, 2)
        );

        let hard = Difficulty::Hard.budget();
        assert_eq!((hard.max_lives, hard.hints, hard.skips, hard.fifties), (2, 1, 1, 1));
    }

    #[test]
    fn timer_windows() {
        assert_eq!(Difficulty::Easy.timer_ms(), TIMER_DEFAULT_MS);
        assert_eq!(Difficulty::Medium.timer_ms(), TIMER_DEFAULT_MS);
        assert_eq!(Difficulty::Hard.timer_ms(), TIMER_HARD_MS);
        assert!(!Difficulty::Easy.timer_forced());
        assert!(Difficulty::Medium.timer_forced());
    }

    #[test]
    fn region_parses_both_spellings() {
        assert_eq!(Region::from_str("Asia"), Some(Region::Asia));
        assert_eq!(Region::from_str("Amerika"), Some(Region::Americas));
        assert_eq!(Region::from_str("americas"), Some(Region::Americas));
        assert_eq!(Region::from_str("Afrika"), Some(Region::Africa));
        assert_eq!(Region::from_str("oseania"), Some(Region::Oceania));
        assert_eq!(Region::from_str("antarctica"), None);
    }

    #[test]
    fn region_serializes_as_map_key() {
        let mut map = BTreeMap::new();
        map.insert(Region::Europe, 3u32);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"europe":3}"#);

        let back: BTreeMap<Region, u32> = serde_json::from_str(r#"{"eropa":3}"#).unwrap();
        assert_eq!(back.get(&Region::Europe), Some(&3));
    }

    #[test]
    fn progression_defaults_fill_missing_keys() {
        let data: ProgressionData = serde_json::from_str(r#"{"high_score":7}"#).unwrap();
        assert_eq!(data.high_score, 7);
        assert_eq!(data.level, 1);
        assert_eq!(data.xp_to_next, INITIAL_XP_TO_NEXT);
        assert!(data.badges.is_empty());
    }

    #[test]
    fn streak_tiers() {
        assert_eq!(StreakTier::from_streak(1), StreakTier::One);
        assert_eq!(StreakTier::from_streak(3), StreakTier::Two);
        assert_eq!(StreakTier::from_streak(4), StreakTier::Two);
        assert_eq!(StreakTier::from_streak(5), StreakTier::Three);
        assert_eq!(StreakTier::Three.stars(), 3);
    }
}

/// Continent-level grouping used for distractor biasing and region badges.
///
/// Persisted as a lowercase English key. Parsing also accepts the Indonesian
/// spellings (`eropa`, `amerika`, `afrika`, `oseania`) used by older catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Asia,
    Europe,
    Americas,
    Africa,
    Oceania,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Asia,
        Region::Europe,
        Region::Americas,
        Region::Africa,
        Region::Oceania,
    ];

    /// Parse region from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asia" => Some(Region::Asia),
            "europe" | "eropa" => Some(Region::Europe),
            "americas" | "america" | "amerika" => Some(Region::Americas),
            "africa" | "afrika" => Some(Region::Africa),
            "oceania" | "oseania" => Some(Region::Oceania),
            _ => None,
        }
    }

    /// Persisted key
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Asia => "asia",
            Region::Europe => "europe",
            Region::Americas => "americas",
            Region::Africa => "africa",
            Region::Oceania => "oceania",
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Americas => "Americas",
            Region::Africa => "Africa",
            Region::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Region {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;
        impl<'de> serde::de::Visitor<'de> for V {
            type Value = Region;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a region name")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Region::from_str(v).ok_or_else(|| E::custom(format!("unknown region: {v}")))
            }
        }

        deserializer.deserialize_str(V)
    }
}

/// Per-session resource allowance, fixed at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceBudget {
    pub max_lives: u8,
    pub hints: u8,
    pub skips: u8,
    pub fifties: u8,
}

/// Difficulty tier selected when a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Lives and powerup counts for a fresh session.
    pub fn budget(&self) -> ResourceBudget {
        match self {
            Difficulty::Easy => ResourceBudget {
                max_lives: 5,
                hints: 5,
                skips: 3,
                fifties: 3,
            },
            Difficulty::Medium => ResourceBudget {
                max_lives: 3,
                hints: 3,
                skips: 2,
                fifties: 2,
            },
            Difficulty::Hard => ResourceBudget {
                max_lives: 2,
                hints: 1,
                skips: 1,
                fifties: 1,
            },
        }
    }

    /// Answer window when the countdown is active.
    pub fn timer_ms(&self) -> u32 {
        match self {
            Difficulty::Hard => TIMER_HARD_MS,
            _ => TIMER_DEFAULT_MS,
        }
    }

    /// Whether the countdown runs regardless of the timer setting.
    pub fn timer_forced(&self) -> bool {
        !matches!(self, Difficulty::Easy)
    }

    /// XP multiplier as a (numerator, denominator) pair, applied before flooring.
    pub fn xp_multiplier(&self) -> (u32, u32) {
        match self {
            Difficulty::Easy => (1, 1),
            Difficulty::Medium => (3, 2),
            Difficulty::Hard => (2, 1),
        }
    }

    /// Whether distractors prefer the target's own region.
    pub fn regional_distractors(&self) -> bool {
        matches!(self, Difficulty::Hard)
    }
}

/// What the question shows and what the options are labelled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuizMode {
    /// Flag shown, options are country names
    #[default]
    Flag,
    /// Description and initial code shown, options are country names
    Description,
    /// Country named with its flag, options are capitals
    Capital,
}

impl QuizMode {
    pub const ALL: [QuizMode; 3] = [QuizMode::Flag, QuizMode::Description, QuizMode::Capital];

    /// Parse mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "flag" => Some(QuizMode::Flag),
            "desc" | "description" => Some(QuizMode::Description),
            "capital" => Some(QuizMode::Capital),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuizMode::Flag => "flag",
            QuizMode::Description => "description",
            QuizMode::Capital => "capital",
        }
    }
}

/// Index of a country inside its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CountryId(pub u16);

impl CountryId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Static reference record for one country.
///
/// `name` is the catalog key and must be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub region: Region,
    pub capital: String,
    /// Two-letter flag code (ISO 3166-1 alpha-2, lowercase)
    pub code: String,
    /// Short initial code shown as a clue in description mode
    pub initial: String,
    #[serde(alias = "desc")]
    pub description: String,
    #[serde(alias = "funFact")]
    pub fun_fact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geography: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,
}

impl Country {
    /// Whether any long-form text is available for the detail view.
    pub fn has_extended_info(&self) -> bool {
        self.history.is_some() || self.geography.is_some() || self.culture.is_some()
    }
}

/// The three consumable powerups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerupKind {
    Hint,
    Skip,
    Fifty,
}

impl PowerupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::Hint => "hint",
            PowerupKind::Skip => "skip",
            PowerupKind::Fifty => "fifty",
        }
    }
}

/// Commands a renderer can send to the quiz.
///
/// Every command may be rejected silently; the driver reports whether state
/// changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCommand {
    /// Begin a fresh session (restarts any running one)
    StartSession { difficulty: Difficulty, mode: QuizMode },
    /// Answer the current question with the chosen country
    SubmitAnswer(CountryId),
    UseHint,
    UseSkip,
    UseFifty,
    /// Move on after a resolved question
    Next,
    /// Leave the running session without finishing it
    Abandon,
    /// Music volume in percent (clamped to 100)
    SetMusicVolume(u8),
    /// Effects volume in percent (clamped to 100)
    SetSfxVolume(u8),
    ToggleTimer,
    ToggleParticles,
}

/// How a question was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerKind {
    Correct,
    Wrong,
    Timeout,
}

/// Reward intensity for a correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StreakTier {
    One,
    Two,
    Three,
}

impl StreakTier {
    /// `>= 5` → three, `>= 3` → two, otherwise one.
    pub fn from_streak(streak: u32) -> Self {
        if streak >= 5 {
            StreakTier::Three
        } else if streak >= 3 {
            StreakTier::Two
        } else {
            StreakTier::One
        }
    }

    pub fn stars(&self) -> u8 {
        match self {
            StreakTier::One => 1,
            StreakTier::Two => 2,
            StreakTier::Three => 3,
        }
    }
}

/// Result of resolving one question, handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub kind: AnswerKind,
    /// The option the player picked (`None` on timeout)
    pub selected: Option<CountryId>,
    /// The country that was being asked about
    pub correct: CountryId,
    pub xp_awarded: u32,
    /// Streak after this answer
    pub streak: u32,
    /// Set only for correct answers
    pub tier: Option<StreakTier>,
    pub lives: u8,
    pub session_over: bool,
}

impl AnswerOutcome {
    pub fn is_correct(&self) -> bool {
        self.kind == AnswerKind::Correct
    }
}

/// End-of-session rating shown on the summary screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionRating {
    Excellent,
    Good,
    GameOver,
}

impl SessionRating {
    pub fn from_score(score: u32) -> Self {
        if score >= RATING_EXCELLENT_SCORE {
            SessionRating::Excellent
        } else if score >= RATING_GOOD_SCORE {
            SessionRating::Good
        } else {
            SessionRating::GameOver
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SessionRating::Excellent => "Outstanding!",
            SessionRating::Good => "Well done!",
            SessionRating::GameOver => "Game Over!",
        }
    }
}

/// Final numbers of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub difficulty: Difficulty,
    pub mode: QuizMode,
    pub score: u32,
    pub total: u32,
    pub best_streak: u32,
    /// round(score / total * 100), 0 when nothing was answered
    pub accuracy_percent: u8,
    pub high_score: u32,
    pub new_record: bool,
    pub rating: SessionRating,
}

/// Notifications from the quiz to the renderer, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    QuestionReady {
        target: CountryId,
        options: [CountryId; OPTION_COUNT],
    },
    AnswerResolved(AnswerOutcome),
    PowerupUsed { kind: PowerupKind, remaining: u8 },
    LevelUp { level: u32 },
    BadgeUnlocked { id: &'static str },
    TimerTick { remaining_percent: u8 },
    SessionEnded(SessionSummary),
}

/// Player progression persisted across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionData {
    pub high_score: u32,
    pub games_played: u32,
    pub total_correct: u32,
    /// Unlocked badge ids in unlock order, no duplicates
    pub badges: Vec<String>,
    pub region_correct: BTreeMap<Region, u32>,
    pub xp: u32,
    pub level: u32,
    pub xp_to_next: u32,
}

impl Default for ProgressionData {
    fn default() -> Self {
        Self {
            high_score: 0,
            games_played: 0,
            total_correct: 0,
            badges: Vec::new(),
            region_correct: BTreeMap::new(),
            xp: 0,
            level: 1,
            xp_to_next: INITIAL_XP_TO_NEXT,
        }
    }
}

impl ProgressionData {
    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b == id)
    }

    pub fn region_correct(&self, region: Region) -> u32 {
        self.region_correct.get(&region).copied().unwrap_or(0)
    }
}

/// Player preferences persisted across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 0.0 ..= 1.0
    pub music_volume: f32,
    /// 0.0 ..= 1.0
    pub sfx_volume: f32,
    /// Run the countdown on easy difficulty too
    pub timer: bool,
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 0.6,
            sfx_volume: 0.8,
            timer: false,
            particles: true,
        }
    }
}

impl Settings {
    /// Whether a session on `difficulty` runs the countdown.
    pub fn timer_active(&self, difficulty: Difficulty) -> bool {
        difficulty.timer_forced() || self.timer
    }
}
