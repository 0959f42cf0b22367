//! Currency precision
//!
//! Minor-unit precision is a property of the currency, fixed for the life of
//! the process: looked up in a table supplied as configuration, never derived
//! from a price's decimal representation.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::{Findable, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

/// The decimal scale limit; precisions past this are not representable.
const MAX_PRECISION: u32 = 28;

/// A currency code was not resolvable in the precision table.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown currency code: {0}")]
pub struct UnknownCurrencyError(pub String);

/// Errors loading a precision table from configuration.
#[derive(Debug, Error)]
pub enum CurrencyConfigError {
    /// IO error reading the configuration file.
    #[error("failed to read currency configuration: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("failed to parse currency configuration: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A configured precision exceeds the decimal scale limit.
    #[error("precision {digits} for {code} exceeds the {MAX_PRECISION}-digit limit")]
    PrecisionOutOfRange {
        /// Currency code the entry was declared for.
        code: String,
        /// The out-of-range digit count.
        digits: u32,
    },
}

/// On-disk shape of a precision table.
#[derive(Debug, Deserialize)]
struct CurrencyTableConfig {
    /// Explicit currency code → minor-unit digits entries.
    #[serde(default)]
    currencies: FxHashMap<String, u32>,

    /// Consult the ISO 4217 registry for codes without an explicit entry.
    #[serde(default)]
    iso_fallback: bool,

    /// Flat digit count for codes resolved by neither entries nor ISO.
    #[serde(default)]
    default_precision: Option<u32>,
}

/// Mapping from currency code to number of minor-unit decimal digits.
///
/// Lookup order: explicit entries, then (when opted in) the ISO 4217
/// registry, then (when opted in) a flat default. A code resolved by none of
/// these is an [`UnknownCurrencyError`] — defaulting always requires caller
/// opt-in.
#[derive(Debug, Clone, Default)]
pub struct CurrencyTable {
    precisions: FxHashMap<String, u32>,
    iso_fallback: bool,
    default_precision: Option<u32>,
}

impl CurrencyTable {
    /// Create an empty table with no fallbacks: only explicit entries resolve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table backed by the ISO 4217 registry.
    pub fn iso() -> Self {
        CurrencyTable {
            precisions: FxHashMap::default(),
            iso_fallback: true,
            default_precision: None,
        }
    }

    /// Add an explicit entry. Precisions beyond the decimal scale limit are
    /// clamped to it.
    pub fn insert(&mut self, code: impl Into<String>, digits: u32) {
        self.precisions
            .insert(code.into(), digits.min(MAX_PRECISION));
    }

    /// Builder form of [`CurrencyTable::insert`].
    #[must_use]
    pub fn with_precision(mut self, code: impl Into<String>, digits: u32) -> Self {
        self.insert(code, digits);
        self
    }

    /// Opt in to a flat default for codes resolved by neither explicit
    /// entries nor the ISO registry.
    #[must_use]
    pub fn with_default(mut self, digits: u32) -> Self {
        self.default_precision = Some(digits.min(MAX_PRECISION));
        self
    }

    /// Load a table from YAML configuration text.
    ///
    /// # Errors
    ///
    /// - [`CurrencyConfigError::Yaml`]: the text was not valid configuration.
    /// - [`CurrencyConfigError::PrecisionOutOfRange`]: an entry exceeds the
    ///   decimal scale limit.
    pub fn from_yaml(contents: &str) -> Result<Self, CurrencyConfigError> {
        let config: CurrencyTableConfig = serde_norway::from_str(contents)?;

        for (code, digits) in &config.currencies {
            if *digits > MAX_PRECISION {
                return Err(CurrencyConfigError::PrecisionOutOfRange {
                    code: code.clone(),
                    digits: *digits,
                });
            }
        }

        if let Some(digits) = config.default_precision
            && digits > MAX_PRECISION
        {
            return Err(CurrencyConfigError::PrecisionOutOfRange {
                code: "default".to_string(),
                digits,
            });
        }

        Ok(CurrencyTable {
            precisions: config.currencies,
            iso_fallback: config.iso_fallback,
            default_precision: config.default_precision,
        })
    }

    /// Load a table from a YAML configuration file.
    ///
    /// # Errors
    ///
    /// - [`CurrencyConfigError::Io`]: the file could not be read.
    /// - [`CurrencyConfigError::Yaml`]: the file was not valid configuration.
    /// - [`CurrencyConfigError::PrecisionOutOfRange`]: an entry exceeds the
    ///   decimal scale limit.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CurrencyConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Resolve the minor-unit digit count for a currency code.
    ///
    /// # Errors
    ///
    /// Returns an [`UnknownCurrencyError`] if the code is covered by neither
    /// explicit entries nor an opted-in fallback.
    pub fn precision(&self, code: &str) -> Result<u32, UnknownCurrencyError> {
        if let Some(digits) = self.precisions.get(code) {
            return Ok(*digits);
        }

        if self.iso_fallback
            && let Some(currency) = Currency::find(code)
        {
            return Ok(currency.exponent);
        }

        self.default_precision
            .ok_or_else(|| UnknownCurrencyError(code.to_string()))
    }
}
