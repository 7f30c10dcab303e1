use crate::constants::{AUTO_PREFIX, AUTO_STAMP_FORMAT};
use crate::error::{StoreError, StoreResult};
use time::{OffsetDateTime, format_description};

/// Local time if we can get it, UTC if we can't. `now_local()` refuses to work in some
/// multi-threaded contexts.
///
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

pub fn has_extension(name: &str, extension: &str) -> bool {
    extension.is_empty() || name.ends_with(&format!(".{}", extension))
}

/// Appends the backup extension to a user-supplied name, unless it's already there.
///
pub fn with_extension(name: &str, extension: &str) -> String {
    if has_extension(name, extension) {
        name.to_string()
    } else {
        format!("{}.{}", name, extension)
    }
}

fn format_time(timestamp: OffsetDateTime, format_str: &str) -> Result<String, String> {
    let format = format_description::parse(format_str)
        .map_err(|_| "Invalid format description".to_string())?;
    timestamp
        .format(&format)
        .map_err(|_| "Error formatting timestamp".to_string())
}

/// The minute-resolution name given to backups the user didn't name, e.g.
/// `auto_2024-10-27_09:45.sav`.
///
pub fn auto_name(timestamp: OffsetDateTime, extension: &str) -> StoreResult<String> {
    let stamp = format_time(timestamp, AUTO_STAMP_FORMAT).map_err(StoreError::ConfigError)?;
    Ok(with_extension(&format!("{}{}", AUTO_PREFIX, stamp), extension))
}

/// Two automatic backups in the same minute would share a name. Rather than let the second
/// clobber the first, count up from `_2` until we find a free name.
///
pub fn disambiguate<F>(name: &str, extension: &str, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !taken(name) {
        return name.to_string();
    }

    let stem = if extension.is_empty() {
        name
    } else {
        name.strip_suffix(&format!(".{}", extension)).unwrap_or(name)
    };

    (2..)
        .map(|n| with_extension(&format!("{}_{}", stem, n), extension))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| name.to_string())
}
