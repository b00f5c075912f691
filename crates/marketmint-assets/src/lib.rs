//! Asset identifier normalization for marketmint.
//!
//! Tickers arrive from the CLI or config as free-form strings. This crate
//! turns them into canonical CoinGecko coin ids, resolving a small table of
//! human aliases.
//!
//! # Example
//!
//! ```
//! use marketmint_assets::AssetRegistry;
//!
//! let registry = AssetRegistry::global();
//! assert_eq!(registry.resolve("XAU-USD").as_str(), "pax-gold");
//! assert_eq!(registry.resolve(" Bitcoin ").as_str(), "bitcoin");
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/marketmint/marketmint/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// The alias table embedded at compile time, canonical id -> aliases.
const ALIASES_JSON: &str = include_str!("../data/aliases.json");

/// Default asset when neither CLI nor config names one.
pub const DEFAULT_ASSET: &str = "pax-gold";

/// Global registry instance.
static REGISTRY: OnceLock<AssetRegistry> = OnceLock::new();

/// A normalized, lowercase CoinGecko coin id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AssetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Alias table mapping human terms to canonical ids.
#[derive(Debug)]
pub struct AssetRegistry {
    aliases: HashMap<String, String>,
}

impl AssetRegistry {
    /// Returns the global registry.
    ///
    /// The registry is initialized lazily on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(|| {
            Self::from_json(ALIASES_JSON).expect("embedded aliases.json is valid")
        })
    }

    /// Builds a registry from a JSON object of `canonical -> [aliases]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let table: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        let aliases = table
            .into_iter()
            .flat_map(|(canonical, aliases)| {
                aliases
                    .into_iter()
                    .map(move |alias| (alias.to_lowercase(), canonical.to_lowercase()))
            })
            .collect();
        Ok(Self { aliases })
    }

    /// Normalizes a ticker: trims, lowercases and resolves aliases.
    #[must_use]
    pub fn resolve(&self, ticker: &str) -> AssetId {
        let normalized = ticker.trim().to_lowercase();
        match self.aliases.get(&normalized) {
            Some(canonical) => AssetId(canonical.clone()),
            None => AssetId(normalized),
        }
    }

    /// Splits a comma-separated list and resolves each non-empty entry.
    #[must_use]
    pub fn resolve_list(&self, tickers: &str) -> Vec<AssetId> {
        tickers
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| self.resolve(t))
            .collect()
    }

    /// Returns true if `ticker` is a known alias.
    #[must_use]
    pub fn is_alias(&self, ticker: &str) -> bool {
        self.aliases.contains_key(&ticker.trim().to_lowercase())
    }

    /// Returns the number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Returns true if the registry has no aliases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
