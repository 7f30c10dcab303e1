use camino::Utf8PathBuf;
use std::time::SystemTime;

#[derive(Clone, Copy, Debug, Default)]
pub struct Opts {
    pub verbose: bool,
    pub noop: bool,
    pub noclobber: bool,
}

/// One stored copy of the live save. The modification time comes from the filesystem and is
/// what orders the store.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackupEntry {
    pub name: String,
    pub path: Utf8PathBuf,
    pub mtime: SystemTime,
    pub size: u64,
}

pub type BackupList = Vec<BackupEntry>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileStat {
    pub mtime: SystemTime,
    pub size: u64,
}
