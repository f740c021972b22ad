//! Scoring module - XP awards and session statistics
//!
//! XP for a correct answer is `BASE_XP`, plus `streak * 2` once the streak
//! reaches three, then scaled by the difficulty multiplier and floored.
//! The streak bonus is added before the multiplier.

use crate::types::{
    Difficulty, BASE_XP, STREAK_BONUS_PER_STEP, STREAK_BONUS_THRESHOLD, XP_GROWTH_DENOMINATOR,
    XP_GROWTH_NUMERATOR,
};

/// XP awarded for a correct answer that brought the streak to `streak`.
pub fn xp_for_correct(streak: u32, difficulty: Difficulty) -> u32 {
    let mut xp = BASE_XP;
    if streak >= STREAK_BONUS_THRESHOLD {
        xp = xp.saturating_add(streak.saturating_mul(STREAK_BONUS_PER_STEP));
    }
    let (num, den) = difficulty.xp_multiplier();
    xp.saturating_mul(num) / den
}

/// Threshold for the level after one with threshold `xp_to_next` (1.5x, floored).
pub fn next_threshold(xp_to_next: u32) -> u32 {
    let grown = (xp_to_next as u64 * XP_GROWTH_NUMERATOR as u64) / XP_GROWTH_DENOMINATOR as u64;
    grown.min(u32::MAX as u64).max(1) as u32
}

/// Percentage of correct answers, rounded half up; 0 when nothing was answered.
pub fn accuracy_percent(score: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let score = score.min(total) as u64;
    let total = total as u64;
    ((score * 200 + total) / (2 * total)) as u8
}
