//! Catalog sources.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::catalog::{Catalog, CatalogError};

const BUNDLED_CATALOG: &str = include_str!("../data/countries.json");

/// The catalog compiled into the binary.
pub fn bundled_catalog() -> Result<Catalog, CatalogError> {
    Catalog::from_json(BUNDLED_CATALOG)
}

/// Load `path` if given, otherwise the bundled catalog.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return bundled_catalog().context("bundled catalog is invalid");
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    let catalog = Catalog::from_json(&text)
        .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
    tracing::info!(path = %path.display(), countries = catalog.len(), "loaded catalog");
    Ok(catalog)
}
