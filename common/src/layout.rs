use crate::constants::{BACKUP_DIR_NAME, EXTENSION, GAME_SAVE_SUBPATH, SAVE_FILE, STAGING_SUFFIX};
use crate::error::{StoreError, StoreResult};
use camino::Utf8PathBuf;
use clap::Args;
use directories::BaseDirs;

/// Where the live save is, and where its backups go.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub save_dir: Utf8PathBuf,
    pub save_file: String,
    pub backup_subdir: String,
    pub extension: String,
}

impl Layout {
    pub fn new(save_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
            save_file: SAVE_FILE.to_string(),
            backup_subdir: BACKUP_DIR_NAME.to_string(),
            extension: EXTENSION.to_string(),
        }
    }

    pub fn live_save(&self) -> Utf8PathBuf {
        self.save_dir.join(&self.save_file)
    }

    pub fn backup_dir(&self) -> Utf8PathBuf {
        self.save_dir.join(&self.backup_subdir)
    }

    /// Name of the file the live save is staged into during a restore. It sits next to the live
    /// save so the final rename never crosses a filesystem.
    ///
    pub fn staging_file(&self) -> Utf8PathBuf {
        self.save_dir
            .join(format!(".{}{}", self.save_file, STAGING_SUFFIX))
    }

    pub fn check_save_dir(&self) -> StoreResult<()> {
        if self.save_dir.is_dir() {
            Ok(())
        } else {
            Err(StoreError::SaveDirMissing(self.save_dir.clone()))
        }
    }
}

/// The game's save directory under the platform's local data directory. That is
/// `%LOCALAPPDATA%` on Windows and `~/.local/share` on Linux.
///
pub fn default_save_dir() -> StoreResult<Utf8PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| StoreError::ConfigError("cannot find home directory".to_string()))?;

    let mut dir = Utf8PathBuf::from_path_buf(base_dirs.data_local_dir().to_path_buf())
        .map_err(|p| {
            StoreError::ConfigError(format!("{} is not a UTF-8 path", p.display()))
        })?;

    for part in GAME_SAVE_SUBPATH {
        dir.push(part);
    }

    Ok(dir)
}

/// Path options shared by every tool.
///
#[derive(Args, Clone, Debug)]
pub struct LayoutArgs {
    /// Folder holding the game's save file [default: the game's SaveGames folder]
    #[clap(long, env = "SAVEKEEP_SAVE_DIR")]
    pub save_dir: Option<Utf8PathBuf>,
    /// Name of the live save file
    #[clap(long, env = "SAVEKEEP_SAVE_FILE", default_value = SAVE_FILE)]
    pub save_file: String,
    /// Name of the backup folder, created inside the save folder
    #[clap(long, env = "SAVEKEEP_BACKUP_DIR_NAME", default_value = BACKUP_DIR_NAME)]
    pub backup_dir_name: String,
    /// Extension which marks a file as a backup
    #[clap(long, env = "SAVEKEEP_EXTENSION", default_value = EXTENSION)]
    pub extension: String,
}

impl LayoutArgs {
    pub fn resolve(&self) -> StoreResult<Layout> {
        let save_dir = match &self.save_dir {
            Some(dir) => dir.clone(),
            None => default_save_dir()?,
        };

        if self.save_file.is_empty() || self.backup_dir_name.is_empty() {
            return Err(StoreError::ConfigError(
                "save file and backup folder names must not be empty".to_string(),
            ));
        }

        Ok(Layout {
            save_dir,
            save_file: self.save_file.clone(),
            backup_subdir: self.backup_dir_name.clone(),
            extension: self.extension.trim_start_matches('.').to_string(),
        })
    }
}
