//! Catalog module - the read-only country reference set
//!
//! Countries are addressed by [`CountryId`], their position in the catalog.
//! Names are the unique key; construction rejects duplicates and catalogs too
//! small to fill a question.

use std::collections::HashSet;
use std::ops::Index;

use thiserror::Error;

use crate::types::{Country, CountryId, Region, MIN_CATALOG_SIZE};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog needs at least {MIN_CATALOG_SIZE} countries, found {0}")]
    TooSmall(usize),
    #[error("catalog holds {0} countries, more than can be addressed")]
    TooLarge(usize),
    #[error("duplicate country name: {0}")]
    DuplicateName(String),
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable collection of countries, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    countries: Vec<Country>,
}

impl Catalog {
    pub fn new(countries: Vec<Country>) -> Result<Self, CatalogError> {
        if countries.len() < MIN_CATALOG_SIZE {
            return Err(CatalogError::TooSmall(countries.len()));
        }
        if countries.len() > u16::MAX as usize {
            return Err(CatalogError::TooLarge(countries.len()));
        }

        let mut names = HashSet::with_capacity(countries.len());
        for country in &countries {
            if !names.insert(country.name.to_lowercase()) {
                return Err(CatalogError::DuplicateName(country.name.clone()));
            }
        }

        Ok(Self { countries })
    }

    /// Parse a JSON array of countries.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let countries: Vec<Country> = serde_json::from_str(json)?;
        Self::new(countries)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn get(&self, id: CountryId) -> Option<&Country> {
        self.countries.get(id.index())
    }

    pub fn ids(&self) -> impl Iterator<Item = CountryId> + '_ {
        (0..self.countries.len() as u16).map(CountryId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CountryId, &Country)> + '_ {
        self.countries
            .iter()
            .enumerate()
            .map(|(i, c)| (CountryId(i as u16), c))
    }

    /// Look a country up by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<CountryId> {
        self.iter()
            .find(|(_, c)| c.name.eq_ignore_ascii_case(name))
            .map(|(id, _)| id)
    }

    pub fn count_in_region(&self, region: Region) -> usize {
        self.countries.iter().filter(|c| c.region == region).count()
    }

    /// Countries matching an optional region and a name substring.
    ///
    /// An empty `search` matches everything; matching is case-insensitive.
    pub fn filter<'a>(
        &'a self,
        region: Option<Region>,
        search: &'a str,
    ) -> impl Iterator<Item = (CountryId, &'a Country)> + 'a {
        let needle = search.trim().to_lowercase();
        self.iter().filter(move |(_, c)| {
            region.map_or(true, |r| c.region == r)
                && (needle.is_empty() || c.name.to_lowercase().contains(&needle))
        })
    }
}

impl Index<CountryId> for Catalog {
    type Output = Country;

    fn index(&self, id: CountryId) -> &Country {
        &self.countries[id.index()]
    }
}

/// Terminal stand-in for a flag image: the two regional indicator symbols
/// for an alpha-2 code. Codes that are not two ASCII letters come back
/// upper-cased as-is.
pub fn flag_emoji(code: &str) -> String {
    let code = code.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return code.to_uppercase();
    }
    code.chars()
        .filter_map(|c| {
            let offset = c.to_ascii_uppercase() as u32 - 'A' as u32;
            char::from_u32(0x1F1E6 + offset)
        })
        .collect()
}
