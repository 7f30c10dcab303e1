//! Where the game keeps its saves, relative to the platform's local data directory. All of these
//! can be overridden on the command line or through the environment.

pub const GAME_SAVE_SUBPATH: &[&str] = &["HalfSwordUE5", "Saved", "SaveGames"];
pub const SAVE_FILE: &str = "SG Gauntlet Progress.sav";
pub const BACKUP_DIR_NAME: &str = "GauntletSaves";
pub const EXTENSION: &str = "sav";
pub const AUTO_PREFIX: &str = "auto_";
pub const AUTO_STAMP_FORMAT: &str = "[year]-[month]-[day]_[hour]:[minute]";
pub const STAGING_SUFFIX: &str = ".restoring";
