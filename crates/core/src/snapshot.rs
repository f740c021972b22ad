use crate::question::Question;
use crate::types::{AnswerOutcome, CountryId, Difficulty, QuizMode};

/// Flat copy of everything the play screen draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizSnapshot {
    pub session_id: u32,
    pub question_id: u32,
    pub difficulty: Difficulty,
    pub mode: QuizMode,
    pub active: bool,
    pub answered: bool,
    pub score: u32,
    pub total: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub perfect_run: u32,
    pub lives: u8,
    pub max_lives: u8,
    pub hints: u8,
    pub skips: u8,
    pub fifties: u8,
    pub xp: u32,
    pub level: u32,
    pub xp_to_next: u32,
    pub timer_percent: Option<u8>,
    pub question: Option<Question>,
    pub hint_target: Option<CountryId>,
    pub last_outcome: Option<AnswerOutcome>,
}

impl QuizSnapshot {
    /// Whether the player can still answer the shown question.
    pub fn playable(&self) -> bool {
        self.active && !self.answered && self.question.is_some()
    }

    /// Progress through the current level in percent.
    pub fn xp_percent(&self) -> u8 {
        if self.xp_to_next == 0 {
            return 0;
        }
        ((self.xp as u64 * 100) / self.xp_to_next as u64).min(100) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_playable() {
        let s = QuizSnapshot::default();
        assert!(!s.playable());
        assert_eq!(s.xp_percent(), 0);
    }

    #[test]
    fn test_xp_percent() {
        let s = QuizSnapshot {
            xp: 75,
            xp_to_next: 150,
            ..QuizSnapshot::default()
        };
        assert_eq!(s.xp_percent(), 50);
    }
}
