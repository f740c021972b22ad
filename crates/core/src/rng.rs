//! RNG module - no-repeat country draws
//!
//! Implements a draw-without-replacement deck over the whole catalog: every
//! country is asked once per pass, then a fresh permutation is dealt.
//! A repeat is only possible across the pass boundary.
//!
//! Also provides a simple LCG so sessions are reproducible from a seed.

use tui_geoquiz_types::CountryId;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits (multiply-shift); the low bits of an LCG cycle with
    /// a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Shuffled pool of catalog ids, drawn without replacement.
#[derive(Debug, Clone)]
pub struct CountryDeck {
    size: u16,
    /// Undrawn ids of the current pass; draws pop from the back.
    remaining: Vec<CountryId>,
    /// Ids drawn during the current pass, in draw order.
    drawn: Vec<CountryId>,
    rng: SimpleRng,
}

impl CountryDeck {
    /// Create a deck over ids `0..size` and deal the first pass.
    pub fn new(size: u16, seed: u32) -> Self {
        let mut deck = Self {
            size,
            remaining: Vec::with_capacity(size as usize),
            drawn: Vec::with_capacity(size as usize),
            rng: SimpleRng::new(seed),
        };
        deck.reshuffle();
        deck
    }

    /// Deal a fresh uniform permutation of the full catalog.
    pub fn reshuffle(&mut self) {
        self.remaining.clear();
        self.remaining.extend((0..self.size).map(CountryId));
        self.rng.shuffle(&mut self.remaining);
        self.drawn.clear();
    }

    /// Draw the next country, reshuffling first when the pass is exhausted.
    ///
    /// Returns `None` only for an empty deck.
    pub fn draw(&mut self) -> Option<CountryId> {
        if self.remaining.is_empty() {
            self.reshuffle();
        }
        let id = self.remaining.pop()?;
        self.drawn.push(id);
        Some(id)
    }

    /// Countries left before the next reshuffle.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Countries already drawn in this pass.
    pub fn drawn(&self) -> &[CountryId] {
        &self.drawn
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    /// Get the current RNG state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}
