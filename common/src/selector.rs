use crate::error::{StoreError, StoreResult};
use crate::naming::with_extension;
use crate::types::BackupEntry;
use std::fmt;
use std::str::FromStr;

/// How a user refers to a backup: by name, by 1-indexed position in the oldest-first listing, or
/// as "the newest one".
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    Latest,
    Position(usize),
    Name(String),
}

impl FromStr for Selector {
    type Err = StoreError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();

        if input.is_empty() || input.eq_ignore_ascii_case("latest") {
            return Ok(Selector::Latest);
        }

        match input.parse::<i64>() {
            Ok(n) if n >= 1 => Ok(Selector::Position(n as usize)),
            Ok(_) => Err(StoreError::InvalidSelector(input.to_string())),
            Err(_) => Ok(Selector::Name(input.to_string())),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Latest => write!(f, "latest"),
            Selector::Position(n) => write!(f, "{}", n),
            Selector::Name(name) => write!(f, "{}", name),
        }
    }
}

impl Selector {
    /// Works out which element of `snapshot` this selector means, returning its 0-based index.
    /// The snapshot must be in listing order, and is never re-read, so positions can't drift.
    ///
    pub fn resolve(&self, snapshot: &[BackupEntry], extension: &str) -> StoreResult<usize> {
        let not_found = || StoreError::EntryNotFound(self.to_string());

        match self {
            Selector::Latest => snapshot.len().checked_sub(1).ok_or_else(not_found),
            Selector::Position(n) if *n >= 1 && *n <= snapshot.len() => Ok(n - 1),
            Selector::Position(_) => Err(not_found()),
            Selector::Name(name) => {
                let name = with_extension(name, extension);
                snapshot
                    .iter()
                    .position(|entry| entry.name == name)
                    .ok_or_else(not_found)
            }
        }
    }
}

/// Parses a comma-separated list like `1, 3,5`. Empty items are ignored. Anything which won't
/// parse is handed back separately so the caller can warn about it and carry on with the rest.
///
pub fn parse_selector_list(input: &str) -> (Vec<Selector>, Vec<StoreError>) {
    let mut selectors = Vec::new();
    let mut errors = Vec::new();

    for item in input.split(',').map(str::trim).filter(|i| !i.is_empty()) {
        match item.parse::<Selector>() {
            Ok(selector) => selectors.push(selector),
            Err(e) => errors.push(e),
        }
    }

    (selectors, errors)
}
