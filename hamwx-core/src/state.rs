//! Offline US postal code → state lookup.
//!
//! Reads a GeoNames postal dump (`US.txt`): tab-separated columns
//! `country, postal code, place, state name, state code, ...`.

use std::{collections::HashMap, fmt::Debug, fs, path::Path};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsState {
    pub code: String,
    pub name: String,
}

pub trait StateResolver: Send + Sync + Debug {
    /// `None` when the postal code is unknown or its row carries no state.
    fn resolve(&self, postal_code: &str) -> Option<UsState>;
}

#[derive(Debug, Clone, Default)]
pub struct GeoNamesStates {
    by_postal_code: HashMap<String, UsState>,
}

impl GeoNamesStates {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let states = Self::parse(&contents);
        tracing::debug!(path = %path.display(), entries = states.len(), "loaded postal dataset");
        Ok(states)
    }

    /// Load the dataset, or fall back to an empty table with a warning.
    pub fn from_file_or_empty(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(states) => states,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "postal dataset unavailable, state names will not be shown"
                );
                Self::empty()
            }
        }
    }

    pub fn parse(contents: &str) -> Self {
        let by_postal_code = contents
            .lines()
            .filter_map(|line| {
                let mut cols = line.split('\t').map(str::trim);
                let _country = cols.next()?;
                let postal = cols.next()?;
                let _place = cols.next()?;
                let name = cols.next().unwrap_or_default();
                let code = cols.next().unwrap_or_default();

                if postal.is_empty() || (name.is_empty() && code.is_empty()) {
                    return None;
                }
                Some((postal.to_string(), UsState { code: code.to_string(), name: name.to_string() }))
            })
            .collect();

        Self { by_postal_code }
    }

    pub fn len(&self) -> usize {
        self.by_postal_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_postal_code.is_empty()
    }
}

impl StateResolver for GeoNamesStates {
    fn resolve(&self, postal_code: &str) -> Option<UsState> {
        self.by_postal_code.get(postal_code.trim()).cloned()
    }
}
