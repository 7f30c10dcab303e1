use crate::filesystem::{LocalFs, SaveFs};
use crate::layout::Layout;
use crate::types::FileStat;
use camino::{Utf8Path, Utf8PathBuf};
use filetime::{FileTime, set_file_mtime};
use std::{fs, io};

pub fn pin_mtime(path: &Utf8Path, unix_secs: i64) {
    set_file_mtime(path, FileTime::from_unix_time(unix_secs, 0)).unwrap();
}

/// Drops a file straight into the backup directory with a known modification time.
///
pub fn write_backup(layout: &Layout, name: &str, content: &str, unix_secs: i64) -> Utf8PathBuf {
    let dir = layout.backup_dir();
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    pin_mtime(&path, unix_secs);
    path
}

/// The real filesystem, except that removing the given paths, copying onto them or renaming
/// onto them fails as if we didn't have permission.
///
#[derive(Default)]
pub struct FailingFs {
    fail_remove: Vec<Utf8PathBuf>,
    fail_copy_to: Vec<Utf8PathBuf>,
    fail_rename_to: Vec<Utf8PathBuf>,
}

fn denied() -> io::Error {
    io::Error::new(io::ErrorKind::PermissionDenied, "permission denied")
}

impl FailingFs {
    pub fn removing(paths: &[Utf8PathBuf]) -> Self {
        Self {
            fail_remove: paths.to_vec(),
            ..Default::default()
        }
    }

    pub fn copying_to(paths: &[Utf8PathBuf]) -> Self {
        Self {
            fail_copy_to: paths.to_vec(),
            ..Default::default()
        }
    }

    pub fn renaming_to(paths: &[Utf8PathBuf]) -> Self {
        Self {
            fail_rename_to: paths.to_vec(),
            ..Default::default()
        }
    }
}

impl SaveFs for FailingFs {
    fn exists(&self, path: &Utf8Path) -> bool {
        LocalFs.exists(path)
    }

    fn create_dir_all(&self, path: &Utf8Path) -> io::Result<()> {
        LocalFs.create_dir_all(path)
    }

    fn list_files(&self, dir: &Utf8Path) -> io::Result<Vec<Utf8PathBuf>> {
        LocalFs.list_files(dir)
    }

    fn stat(&self, path: &Utf8Path) -> io::Result<FileStat> {
        LocalFs.stat(path)
    }

    fn copy(&self, src: &Utf8Path, dest: &Utf8Path) -> io::Result<u64> {
        if self.fail_copy_to.iter().any(|p| p == dest) {
            // Leave a partial file behind, as an interrupted copy would.
            fs::write(dest, b"partial")?;
            Err(denied())
        } else {
            LocalFs.copy(src, dest)
        }
    }

    fn remove_file(&self, path: &Utf8Path) -> io::Result<()> {
        if self.fail_remove.iter().any(|p| p == path) {
            Err(denied())
        } else {
            LocalFs.remove_file(path)
        }
    }

    fn rename(&self, src: &Utf8Path, dest: &Utf8Path) -> io::Result<()> {
        if self.fail_rename_to.iter().any(|p| p == dest) {
            Err(denied())
        } else {
            LocalFs.rename(src, dest)
        }
    }
}
