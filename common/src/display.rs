use crate::types::BackupEntry;
use colored::Colorize;
use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};
use time::{OffsetDateTime, UtcOffset, format_description};

pub fn basic_line(position: usize, entry: &BackupEntry) -> String {
    format!(
        "{:>3}. {:<40} {:<26} {}",
        position,
        entry.name,
        format_timestamp(entry.mtime),
        entry.size
    )
}

/// The newest backup is what Enter restores in the menu, so make it stand out.
///
fn decorated_line(is_latest: bool, basic_line: String) -> String {
    if is_latest {
        basic_line.green().bold().to_string()
    } else {
        basic_line
    }
}

/// Writes the listing 1-indexed, oldest first, which is the numbering every selection prompt
/// expects.
///
pub fn write_backups<W: Write>(out: &mut W, backups: &[BackupEntry]) -> io::Result<()> {
    let last = backups.len();

    for (index, entry) in backups.iter().enumerate() {
        let line = basic_line(index + 1, entry);
        writeln!(out, "{}", decorated_line(index + 1 == last, line))?;
    }

    Ok(())
}

/// Whole seconds either side of the epoch, saturating rather than overflowing.
///
fn unix_seconds(mtime: SystemTime) -> i64 {
    match mtime.duration_since(UNIX_EPOCH) {
        Ok(since) => i64::try_from(since.as_secs()).unwrap_or(i64::MAX),
        Err(e) => i64::try_from(e.duration().as_secs()).map_or(i64::MIN, |s| -s),
    }
}

// Filesystems happily store times `time` can't represent. Those show as the epoch.
pub fn format_timestamp(mtime: SystemTime) -> String {
    let datetime =
        OffsetDateTime::from_unix_timestamp(unix_seconds(mtime)).unwrap_or(OffsetDateTime::UNIX_EPOCH);
    let local_offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let local_datetime = datetime.checked_to_offset(local_offset).unwrap_or(datetime);
    let format = match format_description::parse(
        "[year]-[month]-[day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]",
    ) {
        Ok(format) => format,
        Err(_) => return String::from("Invalid date"),
    };

    local_datetime
        .format(&format)
        .unwrap_or_else(|_| String::from("Invalid date"))
}
