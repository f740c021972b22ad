//! Progression module - cumulative player stats across sessions
//!
//! Transition functions over [`ProgressionData`]. The data itself is plain
//! and persisted by the engine; everything that changes it lives here.

use std::collections::HashSet;

use crate::scoring::next_threshold;
use crate::types::{ProgressionData, Region, INITIAL_XP_TO_NEXT};

/// Add XP and settle level-ups.
///
/// Returns how many levels were gained. A single award can cross several
/// thresholds; afterwards `xp < xp_to_next` always holds.
pub fn add_xp(data: &mut ProgressionData, amount: u32) -> u32 {
    data.xp = data.xp.saturating_add(amount);
    let mut gained = 0;
    while data.xp >= data.xp_to_next {
        data.xp -= data.xp_to_next;
        data.level = data.level.saturating_add(1);
        data.xp_to_next = next_threshold(data.xp_to_next);
        gained += 1;
    }
    gained
}

/// Count one correct answer towards the lifetime and per-region totals.
pub fn record_correct(data: &mut ProgressionData, region: Region) {
    data.total_correct = data.total_correct.saturating_add(1);
    *data.region_correct.entry(region).or_insert(0) += 1;
}

/// Close out a finished session. Returns whether `score` set a new record.
pub fn record_game_over(data: &mut ProgressionData, score: u32) -> bool {
    let new_record = score > data.high_score;
    if new_record {
        data.high_score = score;
    }
    data.games_played = data.games_played.saturating_add(1);
    new_record
}

/// Record a badge unlock. Returns `false` if it was already unlocked.
pub fn unlock_badge(data: &mut ProgressionData, id: &str) -> bool {
    if data.has_badge(id) {
        return false;
    }
    data.badges.push(id.to_string());
    true
}

/// Repair data read from storage so the invariants hold again.
///
/// Fixes a zero level or threshold, settles XP left above the threshold and
/// drops duplicate badge ids (keeping first occurrence).
pub fn normalize(data: &mut ProgressionData) {
    if data.level == 0 {
        data.level = 1;
    }
    if data.xp_to_next == 0 {
        data.xp_to_next = INITIAL_XP_TO_NEXT;
    }
    add_xp(data, 0);

    let mut seen = HashSet::new();
    data.badges.retain(|id| seen.insert(id.clone()));
}
