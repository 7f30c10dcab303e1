//! The backup store: a directory of copies of the live save, ordered oldest first by
//! modification time. The directory listing is the only index there is.
//!
use crate::error::{StoreError, StoreResult};
use crate::filesystem::{LocalFs, SaveFs};
use crate::layout::{Layout, LayoutArgs};
use crate::naming::{self, auto_name, disambiguate, has_extension, with_extension};
use crate::selector::Selector;
use crate::types::{BackupEntry, BackupList, Opts};
use crate::{narrate, verbose};
use camino::{Utf8Path, Utf8PathBuf};
use time::OffsetDateTime;

/// Backups picked out for deletion, resolved against one listing and held highest position first.
/// Anything which could not be resolved is in `skipped`.
///
#[derive(Debug, Default)]
pub struct DeletePlan {
    pub targets: Vec<(usize, BackupEntry)>,
    pub skipped: Vec<StoreError>,
}

impl DeletePlan {
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.targets.iter().map(|(_, e)| e.name.clone()).collect()
    }
}

#[derive(Debug, Default)]
pub struct DeleteReport {
    pub deleted: Vec<String>,
    pub skipped: Vec<StoreError>,
    pub failed: Vec<StoreError>,
}

impl DeleteReport {
    pub fn count(&self) -> usize {
        self.deleted.len()
    }
}

pub struct BackupStore<F: SaveFs = LocalFs> {
    layout: Layout,
    opts: Opts,
    fs: F,
}

impl BackupStore<LocalFs> {
    pub fn new(layout: Layout, opts: Opts) -> Self {
        Self::with_fs(layout, opts, LocalFs)
    }

    /// Works out the paths from the command line and environment, and checks the game's save
    /// folder is really there.
    ///
    pub fn open(args: &LayoutArgs, opts: Opts) -> StoreResult<Self> {
        let layout = args.resolve()?;
        layout.check_save_dir()?;
        Ok(Self::new(layout, opts))
    }
}

impl<F: SaveFs> BackupStore<F> {
    pub fn with_fs(layout: Layout, opts: Opts, fs: F) -> Self {
        Self { layout, opts, fs }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn opts(&self) -> &Opts {
        &self.opts
    }

    pub fn live_save_exists(&self) -> bool {
        self.fs.exists(&self.layout.live_save())
    }

    /// Creates the backup directory if it isn't there. Safe to call any number of times.
    ///
    fn ensure_backup_dir(&self) -> StoreResult<Utf8PathBuf> {
        let dir = self.layout.backup_dir();

        if !self.fs.exists(&dir) {
            narrate!(self.opts, "Creating save backup folder {}", dir);

            if !self.opts.noop {
                self.fs
                    .create_dir_all(&dir)
                    .map_err(|e| StoreError::write_failure("create", &dir, e))?;
            }
        }

        Ok(dir)
    }

    /// Every backup in the store, oldest first. Equal modification times are ordered by name.
    /// Files we can't stat are left out.
    ///
    pub fn list_backups(&self) -> StoreResult<BackupList> {
        let dir = self.ensure_backup_dir()?;

        // Only possible in noop mode.
        if !self.fs.exists(&dir) {
            return Ok(Vec::new());
        }

        let files = self
            .fs
            .list_files(&dir)
            .map_err(|e| StoreError::write_failure("list", &dir, e))?;

        let mut ret: BackupList = files
            .into_iter()
            .filter_map(|path| {
                let name = path.file_name()?.to_string();

                if !has_extension(&name, &self.layout.extension) {
                    return None;
                }

                match self.fs.stat(&path) {
                    Ok(stat) => Some(BackupEntry {
                        name,
                        path,
                        mtime: stat.mtime,
                        size: stat.size,
                    }),
                    Err(e) => {
                        verbose!(self.opts, "Skipping {}: {}", path, e);
                        None
                    }
                }
            })
            .collect();

        ret.sort_by(|a, b| a.mtime.cmp(&b.mtime).then_with(|| a.name.cmp(&b.name)));
        Ok(ret)
    }

    /// Copies the live save into the store. Returns the name the backup was given.
    ///
    pub fn create_backup(&self, custom_name: Option<&str>) -> StoreResult<String> {
        self.create_backup_at(custom_name, naming::now())
    }

    /// As `create_backup()`, but automatic names are built from the given time.
    ///
    pub fn create_backup_at(
        &self,
        custom_name: Option<&str>,
        timestamp: OffsetDateTime,
    ) -> StoreResult<String> {
        let source = self.layout.live_save();

        if !self.fs.exists(&source) {
            return Err(StoreError::SourceMissing(source));
        }

        let dir = self.ensure_backup_dir()?;
        let extension = &self.layout.extension;

        let name = match custom_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(custom) => {
                let name = with_extension(custom, extension);
                check_plain_name(&name)?;

                if self.opts.noclobber && self.fs.exists(&dir.join(&name)) {
                    return Err(StoreError::AlreadyExists(name));
                }

                name
            }
            None => disambiguate(&auto_name(timestamp, extension)?, extension, |n| {
                self.fs.exists(&dir.join(n))
            }),
        };

        let dest = dir.join(&name);
        narrate!(self.opts, "{} -> {}", source, dest);

        if !self.opts.noop {
            self.fs
                .copy(&source, &dest)
                .map_err(|e| StoreError::write_failure("copy", &dest, e))?;
        }

        Ok(name)
    }

    /// Puts the selected backup in place of the live save. The backup is staged next to the live
    /// save first, so if anything goes wrong before the final rename the live save is untouched.
    ///
    pub fn restore_backup(&self, selector: &Selector) -> StoreResult<BackupEntry> {
        let snapshot = self.list_backups()?;
        let index = selector.resolve(&snapshot, &self.layout.extension)?;
        let entry = snapshot[index].clone();

        if !self.fs.exists(&entry.path) {
            return Err(StoreError::EntryNotFound(entry.name));
        }

        let live = self.layout.live_save();
        let staging = self.layout.staging_file();
        narrate!(self.opts, "{} -> {}", entry.path, live);

        if self.opts.noop {
            return Ok(entry);
        }

        if let Err(e) = self.fs.copy(&entry.path, &staging) {
            self.discard(&staging);
            return Err(StoreError::write_failure("stage", &staging, e));
        }

        if self.fs.exists(&live) {
            verbose!(self.opts, "Removing current save {}", live);

            if let Err(e) = self.fs.remove_file(&live) {
                self.discard(&staging);
                return Err(StoreError::write_failure("remove", &live, e));
            }
        } else {
            verbose!(self.opts, "Current save {} not found. Continuing", live);
        }

        // A failed rename leaves the staged copy in place for recovery.
        self.fs
            .rename(&staging, &live)
            .map_err(|e| StoreError::write_failure("move into place", &staging, e))?;

        Ok(entry)
    }

    /// Resolves every selector against a single listing. Positions refer to that listing, however
    /// many of the entries are later removed.
    ///
    pub fn plan_deletion(&self, selectors: &[Selector]) -> StoreResult<DeletePlan> {
        let snapshot = self.list_backups()?;
        let mut plan = DeletePlan::default();
        let mut positions: Vec<usize> = Vec::new();

        for selector in selectors {
            match selector.resolve(&snapshot, &self.layout.extension) {
                Ok(index) => positions.push(index),
                Err(_) => plan
                    .skipped
                    .push(StoreError::InvalidSelector(selector.to_string())),
            }
        }

        positions.sort_unstable_by(|a, b| b.cmp(a));
        positions.dedup();

        plan.targets = positions
            .into_iter()
            .map(|i| (i + 1, snapshot[i].clone()))
            .collect();

        Ok(plan)
    }

    /// Removes everything in the plan. One failure doesn't stop the rest.
    ///
    pub fn execute_deletion(&self, plan: DeletePlan) -> DeleteReport {
        let mut report = DeleteReport {
            skipped: plan.skipped,
            ..Default::default()
        };

        for (_, entry) in plan.targets {
            narrate!(self.opts, "Removing {}", entry.path);

            if self.opts.noop {
                continue;
            }

            match self.fs.remove_file(&entry.path) {
                Ok(()) => report.deleted.push(entry.name),
                Err(e) => report
                    .failed
                    .push(StoreError::write_failure("remove", &entry.path, e)),
            }
        }

        report
    }

    pub fn delete_backups(&self, selectors: &[Selector]) -> StoreResult<DeleteReport> {
        let plan = self.plan_deletion(selectors)?;
        Ok(self.execute_deletion(plan))
    }

    fn discard(&self, staging: &Utf8Path) {
        if self.fs.exists(staging) {
            if let Err(e) = self.fs.remove_file(staging) {
                eprintln!("Could not remove staged file {}: {}", staging, e);
            }
        }
    }
}

/// Custom names become file names inside the store, so they can't be allowed to point anywhere
/// else.
///
fn check_plain_name(name: &str) -> StoreResult<()> {
    let path = Utf8Path::new(name);

    if name.contains(['/', '\\']) || path.file_name() != Some(name) {
        Err(StoreError::InvalidSelector(name.to_string()))
    } else {
        Ok(())
    }
}
