//! Badges module - static achievement catalog and unlock evaluation
//!
//! Badges are checked in catalog order after every resolved question. An
//! unlocked badge is never evaluated again and never revoked.

use crate::progression::unlock_badge;
use crate::types::{ProgressionData, Region};

/// Statistic a badge threshold is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeRule {
    /// Lifetime correct answers
    TotalCorrect,
    /// Best streak of the running session
    BestStreak,
    /// Score of the running session
    SessionScore,
    /// Current uninterrupted run of correct answers
    PerfectRun,
    /// Player level
    Level,
    /// Lifetime correct answers about one region
    RegionCorrect(Region),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub rule: BadgeRule,
    pub threshold: u32,
}

/// Session-scoped numbers the badge rules read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub score: u32,
    pub best_streak: u32,
    pub perfect_run: u32,
}

impl Badge {
    pub fn is_satisfied(&self, progress: &ProgressionData, session: &SessionStats) -> bool {
        let value = match self.rule {
            BadgeRule::TotalCorrect => progress.total_correct,
            BadgeRule::BestStreak => session.best_streak,
            BadgeRule::SessionScore => session.score,
            BadgeRule::PerfectRun => session.perfect_run,
            BadgeRule::Level => progress.level,
            BadgeRule::RegionCorrect(region) => progress.region_correct(region),
        };
        value >= self.threshold
    }
}

macro_rules! badge {
    ($id:literal, $icon:literal, $name:literal, $desc:literal, $rule:expr, $threshold:literal) => {
        Badge {
            id: $id,
            name: $name,
            icon: $icon,
            description: $desc,
            rule: $rule,
            threshold: $threshold,
        }
    };
}

/// Every badge, in evaluation order.
pub const BADGES: [Badge; 17] = [
    badge!("first_answer", "🌱", "First Step", "Answer your first question correctly", BadgeRule::TotalCorrect, 1),
    badge!("explorer", "🧭", "Explorer", "Answer 50 questions correctly", BadgeRule::TotalCorrect, 50),
    badge!("globetrotter", "🌍", "Globetrotter", "Answer 200 questions correctly", BadgeRule::TotalCorrect, 200),
    badge!("streak_3", "✨", "Warming Up", "Reach a streak of 3", BadgeRule::BestStreak, 3),
    badge!("hot_streak", "🔥", "Hot Streak", "Reach a streak of 5", BadgeRule::BestStreak, 5),
    badge!("unstoppable", "⚡", "Unstoppable", "Reach a streak of 15", BadgeRule::BestStreak, 15),
    badge!("score_10", "⭐", "Rising Star", "Score 10 in one game", BadgeRule::SessionScore, 10),
    badge!("score_25", "🏆", "Champion", "Score 25 in one game", BadgeRule::SessionScore, 25),
    badge!("perfect_10", "💎", "Flawless", "Answer 10 in a row without a mistake", BadgeRule::PerfectRun, 10),
    badge!("perfect_20", "🌟", "Perfectionist", "Answer 20 in a row without a mistake", BadgeRule::PerfectRun, 20),
    badge!("level_5", "🎓", "Scholar", "Reach level 5", BadgeRule::Level, 5),
    badge!("level_10", "👑", "Geography Master", "Reach level 10", BadgeRule::Level, 10),
    badge!("asia_10", "🏯", "Asia Expert", "Answer 10 questions about Asia", BadgeRule::RegionCorrect(Region::Asia), 10),
    badge!("europe_10", "🏰", "Europe Expert", "Answer 10 questions about Europe", BadgeRule::RegionCorrect(Region::Europe), 10),
    badge!("americas_10", "🗽", "Americas Expert", "Answer 10 questions about the Americas", BadgeRule::RegionCorrect(Region::Americas), 10),
    badge!("africa_10", "🦁", "Africa Expert", "Answer 10 questions about Africa", BadgeRule::RegionCorrect(Region::Africa), 10),
    badge!("oceania_5", "🐨", "Oceania Expert", "Answer 5 questions about Oceania", BadgeRule::RegionCorrect(Region::Oceania), 5),
];

pub fn find(id: &str) -> Option<&'static Badge> {
    BADGES.iter().find(|b| b.id == id)
}

/// Unlock every badge whose rule is now met.
///
/// Returns newly unlocked badges in catalog order; already-held badges are
/// skipped without evaluation.
pub fn evaluate(progress: &mut ProgressionData, session: &SessionStats) -> Vec<&'static Badge> {
    let mut unlocked = Vec::new();
    for badge in BADGES.iter() {
        if progress.has_badge(badge.id) {
            continue;
        }
        if badge.is_satisfied(progress, session) && unlock_badge(progress, badge.id) {
            unlocked.push(badge);
        }
    }
    unlocked
}
