//! Question module - option sets and their presentation
//!
//! A question is one target country plus three distractors in a shuffled
//! presentation order. On hard difficulty distractors come from the target's
//! own region whenever that region has at least three other countries.

use arrayvec::ArrayVec;

use crate::catalog::Catalog;
use crate::rng::SimpleRng;
use crate::types::{Country, CountryId, Difficulty, QuizMode, DISTRACTOR_COUNT, OPTION_COUNT};

/// An asked question: the target and its four options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Question {
    pub target: CountryId,
    /// Presentation order
    pub options: [CountryId; OPTION_COUNT],
    /// Options removed by fifty-fifty, parallel to `options`
    pub eliminated: [bool; OPTION_COUNT],
}

impl Question {
    /// Build the option set for `target`.
    ///
    /// Returns `None` only if the catalog cannot supply three distractors,
    /// which a validated [`Catalog`] rules out.
    pub fn generate(
        catalog: &Catalog,
        target: CountryId,
        difficulty: Difficulty,
        rng: &mut SimpleRng,
    ) -> Option<Self> {
        let target_region = catalog.get(target)?.region;

        let mut pool: Vec<CountryId> = catalog.ids().filter(|&id| id != target).collect();
        if difficulty.regional_distractors() {
            let same_region: Vec<CountryId> = pool
                .iter()
                .copied()
                .filter(|&id| catalog[id].region == target_region)
                .collect();
            if same_region.len() >= DISTRACTOR_COUNT {
                pool = same_region;
            }
        }
        rng.shuffle(&mut pool);

        let mut options: ArrayVec<CountryId, OPTION_COUNT> = ArrayVec::new();
        options.push(target);
        options.extend(pool.into_iter().take(DISTRACTOR_COUNT));
        let mut options = options.into_inner().ok()?;
        rng.shuffle(&mut options);

        Some(Self {
            target,
            options,
            eliminated: [false; OPTION_COUNT],
        })
    }

    /// Presentation slot of `id`, if it is one of the options.
    pub fn position(&self, id: CountryId) -> Option<usize> {
        self.options.iter().position(|&o| o == id)
    }

    /// Whether `id` is an option that can still be picked.
    pub fn is_selectable(&self, id: CountryId) -> bool {
        self.position(id).is_some_and(|i| !self.eliminated[i])
    }

    pub fn selectable(&self) -> impl Iterator<Item = CountryId> + '_ {
        self.options
            .iter()
            .zip(self.eliminated.iter())
            .filter(|(_, gone)| !**gone)
            .map(|(&id, _)| id)
    }

    pub fn has_eliminations(&self) -> bool {
        self.eliminated.iter().any(|&e| e)
    }

    /// Remove the first two wrong options in presentation order.
    ///
    /// Returns the eliminated ids; empty when an elimination already happened.
    pub fn eliminate_two(&mut self) -> ArrayVec<CountryId, 2> {
        let mut removed = ArrayVec::new();
        if self.has_eliminations() {
            return removed;
        }
        for (i, &id) in self.options.iter().enumerate() {
            if removed.is_full() {
                break;
            }
            if id != self.target {
                self.eliminated[i] = true;
                removed.push(id);
            }
        }
        removed
    }
}

/// Question text for the current mode.
pub fn prompt(mode: QuizMode, country: &Country) -> String {
    match mode {
        QuizMode::Flag => "Which country does this flag belong to?".to_string(),
        QuizMode::Description => "Which country is being described?".to_string(),
        QuizMode::Capital => format!("What is the capital of {}?", country.name),
    }
}

/// Text shown on an option button.
pub fn option_label(mode: QuizMode, country: &Country) -> &str {
    match mode {
        QuizMode::Capital => &country.capital,
        QuizMode::Flag | QuizMode::Description => &country.name,
    }
}

/// Whether the region tag is shown next to the question.
pub fn shows_region(mode: QuizMode) -> bool {
    !matches!(mode, QuizMode::Capital)
}
