use crate::types::FileStat;
use camino::{Utf8Path, Utf8PathBuf};
use filetime::{FileTime, set_file_times};
use std::fs;
use std::io;

/// The filesystem operations the backup store needs. `LocalFs` is the real thing; tests swap in
/// doubles which fail on demand.
///
pub trait SaveFs {
    fn exists(&self, path: &Utf8Path) -> bool;
    fn create_dir_all(&self, path: &Utf8Path) -> io::Result<()>;
    /// Regular files directly inside `dir`. Anything whose name is not UTF-8 is left out.
    fn list_files(&self, dir: &Utf8Path) -> io::Result<Vec<Utf8PathBuf>>;
    fn stat(&self, path: &Utf8Path) -> io::Result<FileStat>;
    /// Copies content byte-for-byte and carries the source's timestamps across.
    fn copy(&self, src: &Utf8Path, dest: &Utf8Path) -> io::Result<u64>;
    fn remove_file(&self, path: &Utf8Path) -> io::Result<()>;
    fn rename(&self, src: &Utf8Path, dest: &Utf8Path) -> io::Result<()>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalFs;

impl SaveFs for LocalFs {
    fn exists(&self, path: &Utf8Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Utf8Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn list_files(&self, dir: &Utf8Path) -> io::Result<Vec<Utf8PathBuf>> {
        let mut ret = Vec::new();

        for f in fs::read_dir(dir)? {
            let path = f?.path();

            if !path.is_file() {
                continue;
            }

            if let Ok(utf8_path) = Utf8PathBuf::from_path_buf(path) {
                ret.push(utf8_path);
            }
        }

        Ok(ret)
    }

    fn stat(&self, path: &Utf8Path) -> io::Result<FileStat> {
        let metadata = fs::metadata(path)?;

        Ok(FileStat {
            mtime: metadata.modified()?,
            size: metadata.len(),
        })
    }

    fn copy(&self, src: &Utf8Path, dest: &Utf8Path) -> io::Result<u64> {
        let bytes = fs::copy(src, dest)?;
        let metadata = fs::metadata(src)?;

        set_file_times(
            dest,
            FileTime::from_last_access_time(&metadata),
            FileTime::from_last_modification_time(&metadata),
        )?;

        Ok(bytes)
    }

    fn remove_file(&self, path: &Utf8Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn rename(&self, src: &Utf8Path, dest: &Utf8Path) -> io::Result<()> {
        fs::rename(src, dest)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use camino_tempfile::tempdir;
    use filetime::set_file_mtime;

    #[test]
    fn test_copy_preserves_content_and_mtime() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src.sav");
        let dest = tmp.path().join("dest.sav");

        fs::write(&src, b"\x00\x01binary\xffsave").unwrap();
        set_file_mtime(&src, FileTime::from_unix_time(1_700_000_000, 0)).unwrap();

        assert_eq!(13, LocalFs.copy(&src, &dest).unwrap());
        assert_eq!(fs::read(&src).unwrap(), fs::read(&dest).unwrap());
        assert_eq!(
            LocalFs.stat(&src).unwrap().mtime,
            LocalFs.stat(&dest).unwrap().mtime
        );
    }

    #[test]
    fn test_copy_overwrites_existing_target() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src.sav");
        let dest = tmp.path().join("dest.sav");

        fs::write(&src, "it's clobbering time").unwrap();
        fs::write(&dest, "blah blah blah").unwrap();

        assert!(LocalFs.copy(&src, &dest).is_ok());
        assert_eq!("it's clobbering time", fs::read_to_string(&dest).unwrap());
    }

    #[test]
    fn test_copy_missing_source() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("nothing.sav");
        let dest = tmp.path().join("dest.sav");

        assert!(LocalFs.copy(&src, &dest).is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn test_list_files_skips_directories() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("a.sav"), "a").unwrap();
        fs::write(tmp.path().join("notes.txt"), "b").unwrap();
        fs::create_dir(tmp.path().join("dir.sav")).unwrap();

        let mut actual = LocalFs.list_files(tmp.path()).unwrap();
        actual.sort();

        assert_eq!(
            vec![tmp.path().join("a.sav"), tmp.path().join("notes.txt")],
            actual
        );
    }

    #[test]
    fn test_stat() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("a.sav");
        fs::write(&file, "12345").unwrap();

        assert_eq!(5, LocalFs.stat(&file).unwrap().size);
        assert!(LocalFs.stat(&tmp.path().join("missing")).is_err());
    }
}
