//! The conversations the tools have with the user. The store never prompts; everything that
//! asks, re-asks, confirms or reports lives here. Failed operations are reported and the shell
//! carries on: only a broken terminal stops it.
//!
use crate::backup_store::BackupStore;
use crate::display::write_backups;
use crate::error::StoreError;
use crate::filesystem::SaveFs;
use crate::selector::{Selector, parse_selector_list};
use crate::types::BackupEntry;
use crate::user_interaction::{Prompter, is_cancel};
use std::fmt::Display;
use std::io::{self, BufRead, Write};

pub struct Shell<'a, F: SaveFs, R, W> {
    store: &'a BackupStore<F>,
    prompter: Prompter<R, W>,
}

impl<'a, F: SaveFs, R: BufRead, W: Write> Shell<'a, F, R, W> {
    pub fn new(store: &'a BackupStore<F>, prompter: Prompter<R, W>) -> Self {
        Self { store, prompter }
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    fn say<D: Display>(&mut self, msg: D) -> io::Result<()> {
        writeln!(self.prompter.output(), "{}", msg)
    }

    fn folder(&self) -> String {
        self.store.layout().backup_subdir.clone()
    }

    /// Fetches the listing, reporting rather than returning any error.
    ///
    fn backups(&mut self) -> io::Result<Option<Vec<BackupEntry>>> {
        match self.store.list_backups() {
            Ok(list) => Ok(Some(list)),
            Err(e) => {
                self.say(format!("ERROR: could not list saves: {}", e))?;
                Ok(None)
            }
        }
    }

    fn show(&mut self, backups: &[BackupEntry]) -> io::Result<()> {
        let folder = self.folder();

        if backups.is_empty() {
            self.say(format!("No additional saves found in '{}' folder.", folder))
        } else {
            self.say(format!("\nAvailable saves in '{}':", folder))?;
            write_backups(self.prompter.output(), backups)
        }
    }

    /// Prints the listing. Returns false if it couldn't be read.
    ///
    pub fn list(&mut self) -> io::Result<bool> {
        match self.backups()? {
            Some(backups) => {
                self.show(&backups)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn create(&mut self, name: Option<&str>) -> io::Result<bool> {
        match self.store.create_backup(name) {
            Ok(name) => {
                let folder = self.folder();
                self.say(format!(
                    "New save '{}' successfully created in '{}' folder.",
                    name, folder
                ))?;
                Ok(true)
            }
            Err(e @ StoreError::SourceMissing(_)) => {
                self.say(format!("ERROR: {}", e))?;
                self.say(
                    "Please ensure the game has saved at least once and the path is configured \
                     correctly.",
                )?;
                Ok(false)
            }
            Err(e) => {
                self.say(format!("ERROR: could not create save: {}", e))?;
                Ok(false)
            }
        }
    }

    /// Restores a backup over the live save. With no selector, the user picks from the listing.
    /// With `keep`, the live save is backed up first.
    ///
    pub fn load(&mut self, selector: Option<Selector>, keep: bool) -> io::Result<bool> {
        let backups = match self.backups()? {
            Some(list) => list,
            None => return Ok(false),
        };

        if backups.is_empty() {
            self.say("No saves to load.")?;
            return Ok(false);
        }

        let selector = match selector {
            Some(selector) => selector,
            None => {
                self.show(&backups)?;
                match self.choose_one(&backups)? {
                    Some(selector) => selector,
                    None => {
                        self.say("Save loading cancelled.")?;
                        return Ok(true);
                    }
                }
            }
        };

        // Pin the choice to a name now: keeping the live save adds a newer backup, which would
        // otherwise become "latest".
        let target = match selector.resolve(&backups, &self.store.layout().extension) {
            Ok(index) => backups[index].name.clone(),
            Err(e) => {
                self.say(format!("ERROR: {}", e))?;
                return Ok(false);
            }
        };

        if selector == Selector::Latest {
            self.say(format!("Auto-load: selected the latest save '{}'.", target))?;
        }

        if keep && self.store.live_save_exists() {
            match self.store.create_backup(None) {
                Ok(kept) => self.say(format!("Kept current save as '{}'.", kept))?,
                Err(e) => {
                    self.say(format!("ERROR: could not keep current save: {}", e))?;
                    return Ok(false);
                }
            }
        }

        match self.store.restore_backup(&Selector::Name(target)) {
            Ok(entry) => {
                let live = self.store.layout().save_file.clone();
                self.say(format!(
                    "Save '{}' successfully loaded (replaced '{}').",
                    entry.name, live
                ))?;
                self.say("You can now launch the game. It will load the last save.")?;
                Ok(true)
            }
            Err(e) => {
                self.say(format!("ERROR: could not load save: {}", e))?;
                Ok(false)
            }
        }
    }

    /// Removes backups. With no selectors, the user picks from the listing. Unless
    /// `assume_yes`, the user must confirm.
    ///
    pub fn delete(&mut self, selectors: Option<Vec<Selector>>, assume_yes: bool) -> io::Result<bool> {
        let backups = match self.backups()? {
            Some(list) => list,
            None => return Ok(false),
        };

        if backups.is_empty() {
            self.say("No saves to delete.")?;
            return Ok(true);
        }

        let selectors = match selectors {
            Some(selectors) => selectors,
            None => {
                self.show(&backups)?;
                match self.choose_many(&backups)? {
                    Some(selectors) => selectors,
                    None => {
                        self.say("Deletion cancelled.")?;
                        return Ok(true);
                    }
                }
            }
        };

        let plan = match self.store.plan_deletion(&selectors) {
            Ok(plan) => plan,
            Err(e) => {
                self.say(format!("ERROR: {}", e))?;
                return Ok(false);
            }
        };

        for skipped in &plan.skipped {
            self.say(format!("Warning: {}, skipping.", skipped))?;
        }

        if plan.is_empty() {
            self.say("No saves were deleted.")?;
            return Ok(plan.skipped.is_empty());
        }

        let all_ok = plan.skipped.is_empty();

        if !assume_yes {
            let question = format!(
                "Are you sure you want to delete these saves: {}?",
                plan.names().join(", ")
            );

            if !self.prompter.confirm(&question)? {
                self.say("Deletion cancelled.")?;
                return Ok(true);
            }
        }

        let report = self.store.execute_deletion(plan);

        for name in &report.deleted {
            self.say(format!("Deleted save '{}'.", name))?;
        }

        for failure in &report.failed {
            self.say(format!("ERROR: {}", failure))?;
        }

        if report.count() > 0 {
            self.say(format!("Total {} save(s) deleted.", report.count()))?;
        } else {
            self.say("No saves were deleted.")?;
        }

        Ok(all_ok && report.failed.is_empty())
    }

    /// Asks for a single backup until it gets a valid one. `None` means the user gave up.
    ///
    fn choose_one(&mut self, backups: &[BackupEntry]) -> io::Result<Option<Selector>> {
        let extension = self.store.layout().extension.clone();

        loop {
            let answer =
                match self.prompter.ask("Enter the number of the save you want to load (or 'q' to cancel):")? {
                    Some(a) if !is_cancel(&a) => a,
                    _ => return Ok(None),
                };

            if !answer.is_empty() {
                if let Ok(selector) = answer.parse::<Selector>() {
                    if selector.resolve(backups, &extension).is_ok() {
                        return Ok(Some(selector));
                    }
                }
            }

            self.say("Invalid number. Please try again.")?;
        }
    }

    /// Asks for a comma-separated list of backups. Anything invalid is warned about and dropped;
    /// if nothing valid is left, it asks again.
    ///
    fn choose_many(&mut self, backups: &[BackupEntry]) -> io::Result<Option<Vec<Selector>>> {
        let extension = self.store.layout().extension.clone();

        loop {
            let answer = match self.prompter.ask(
                "Enter the numbers of the saves you want to delete, separated by commas \
                 (e.g. '1,3,5') or 'q' to cancel:",
            )? {
                Some(a) if !is_cancel(&a) => a,
                _ => return Ok(None),
            };

            let (parsed, errors) = parse_selector_list(&answer);

            for e in errors {
                self.say(format!("Warning: {}, skipping.", e))?;
            }

            let mut valid = Vec::new();

            for selector in parsed {
                if selector.resolve(backups, &extension).is_ok() {
                    valid.push(selector);
                } else {
                    self.say(format!(
                        "Warning: save number {} is invalid and will be skipped.",
                        selector
                    ))?;
                }
            }

            if !valid.is_empty() {
                return Ok(Some(valid));
            }

            self.say("No valid save numbers entered. Please try again.")?;
        }
    }

    /// The interactive menu. Runs until the user exits or the input runs out.
    ///
    pub fn menu(&mut self) -> io::Result<()> {
        loop {
            self.say(
                "\n--- Game Save Manager ---\n\
                 1. Create new save\n\
                 2. Load existing save\n\
                 3. Show list of saves\n\
                 4. Delete saves\n\
                 5. Exit",
            )?;

            let choice = match self
                .prompter
                .ask("Select an action (or just press Enter to load the latest save):")?
            {
                Some(choice) => choice,
                None => return Ok(()),
            };

            match choice.as_str() {
                "1" => {
                    let name = match self
                        .prompter
                        .ask("Enter a name for the new save (leave blank for automatic name):")?
                    {
                        Some(name) => name,
                        None => return Ok(()),
                    };
                    let name = Some(name.as_str()).filter(|n| !n.is_empty());
                    self.create(name)?;
                }
                "2" => {
                    self.load(None, false)?;
                }
                "3" => {
                    self.list()?;
                }
                "4" => {
                    self.delete(None, false)?;
                }
                "5" => {
                    self.say("Thank you for using the Save Manager!")?;
                    return Ok(());
                }
                "" => {
                    self.say("No selection made. Auto-loading the latest save...")?;
                    self.load(Some(Selector::Latest), false)?;
                }
                _ => self.say("Invalid choice. Please try again.")?,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::filesystem::LocalFs;
    use crate::layout::Layout;
    use crate::test_helper::write_backup;
    use crate::types::Opts;
    use camino_tempfile::{Utf8TempDir, tempdir};
    use std::fs;
    use std::io::Cursor;

    fn setup() -> (Utf8TempDir, BackupStore<LocalFs>) {
        colored::control::set_override(false);
        let tmp = tempdir().unwrap();
        let layout = Layout::new(tmp.path());
        fs::write(layout.live_save(), "live").unwrap();
        write_backup(&layout, "a.sav", "a", 100);
        write_backup(&layout, "b.sav", "b", 200);
        write_backup(&layout, "c.sav", "c", 300);
        (tmp, BackupStore::new(layout, Opts::default()))
    }

    fn run_menu<I: AsRef<[u8]>>(store: &BackupStore, input: I) -> String {
        let prompter = Prompter::new(Cursor::new(input), Vec::new());
        let mut shell = Shell::new(store, prompter);
        shell.menu().unwrap();
        String::from_utf8(shell.into_prompter().output().clone()).unwrap()
    }

    fn live(store: &BackupStore) -> String {
        fs::read_to_string(store.layout().live_save()).unwrap()
    }

    fn on_disk(store: &BackupStore) -> Vec<String> {
        store
            .list_backups()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect()
    }

    #[test]
    fn test_menu_enter_loads_latest() {
        let (_tmp, store) = setup();
        let output = run_menu(&store, "\n5\n");

        assert!(output.contains("Auto-load: selected the latest save 'c.sav'."));
        assert!(output.contains("Thank you for using the Save Manager!"));
        assert_eq!("c", live(&store));
    }

    #[test]
    fn test_menu_create_named_save() {
        let (_tmp, store) = setup();
        let output = run_menu(&store, "1\nbefore boss\n5\n");

        assert!(output.contains("New save 'before boss.sav' successfully created"));
        assert_eq!(
            "live",
            fs::read_to_string(store.layout().backup_dir().join("before boss.sav")).unwrap()
        );
    }

    #[test]
    fn test_menu_create_without_live_save() {
        let (_tmp, store) = setup();
        fs::remove_file(store.layout().live_save()).unwrap();

        let output = run_menu(&store, "1\n\n5\n");

        assert!(output.contains("not found"));
        assert!(output.contains("Thank you"));
        assert_eq!(3, on_disk(&store).len());
    }

    #[test]
    fn test_menu_load_asks_until_valid() {
        let (_tmp, store) = setup();
        let output = run_menu(&store, "2\nx\n9\n0\n1\n5\n");

        assert_eq!(3, output.matches("Invalid number. Please try again.").count());
        assert_eq!("a", live(&store));
    }

    #[test]
    fn test_menu_load_cancelled() {
        let (_tmp, store) = setup();
        let output = run_menu(&store, "2\nq\n5\n");

        assert!(output.contains("Save loading cancelled."));
        assert_eq!("live", live(&store));
    }

    #[test]
    fn test_menu_list() {
        let (_tmp, store) = setup();
        let output = run_menu(&store, "3\n5\n");

        assert!(output.contains("Available saves in 'GauntletSaves':"));
        assert!(output.contains("  1. a.sav"));
        assert!(output.contains("  3. c.sav"));
    }

    #[test]
    fn test_menu_delete_with_confirmation() {
        let (_tmp, store) = setup();
        let output = run_menu(&store, "4\n1,7\nyes\n5\n");

        assert!(output.contains("Warning: save number 7 is invalid and will be skipped."));
        assert!(output.contains("Are you sure you want to delete these saves: a.sav?"));
        assert!(output.contains("Total 1 save(s) deleted."));
        assert_eq!(vec!["b.sav", "c.sav"], on_disk(&store));
    }

    #[test]
    fn test_menu_delete_declined() {
        let (_tmp, store) = setup();
        let output = run_menu(&store, "4\n1,3\nno\n5\n");

        assert!(output.contains("Deletion cancelled."));
        assert_eq!(3, on_disk(&store).len());
    }

    #[test]
    fn test_menu_delete_needs_something_valid() {
        let (_tmp, store) = setup();
        let output = run_menu(&store, "4\n8,9\n2\ny\n5\n");

        assert!(output.contains("No valid save numbers entered. Please try again."));
        assert_eq!(vec!["a.sav", "c.sav"], on_disk(&store));
    }

    #[test]
    fn test_menu_invalid_choice_and_end_of_input() {
        let (_tmp, store) = setup();
        let output = run_menu(&store, "7\n");

        assert!(output.contains("Invalid choice. Please try again."));
        assert!(!output.contains("Thank you"));
    }

    #[test]
    fn test_menu_survives_non_utf8_input() {
        let (_tmp, store) = setup();
        let output = run_menu(&store, b"\xff\xfe\n3\n5\n");

        assert!(output.contains("Invalid choice. Please try again."));
        assert!(output.contains("Available saves in 'GauntletSaves':"));
        assert!(output.contains("Thank you for using the Save Manager!"));
    }

    #[test]
    fn test_load_with_keep() {
        let (_tmp, store) = setup();
        let prompter = Prompter::new(Cursor::new(String::new()), Vec::new());
        let mut shell = Shell::new(&store, prompter);

        assert!(shell.load(Some(Selector::Latest), true).unwrap());
        assert_eq!("c", live(&store));

        let names = on_disk(&store);
        assert_eq!(4, names.len());
        assert!(names.iter().any(|n| n.starts_with("auto_")));
    }

    #[test]
    fn test_load_unknown_name() {
        let (_tmp, store) = setup();
        let prompter = Prompter::new(Cursor::new(String::new()), Vec::new());
        let mut shell = Shell::new(&store, prompter);

        assert!(!shell.load(Some(Selector::Name("nope".to_string())), false).unwrap());
        assert_eq!("live", live(&store));
    }

    #[test]
    fn test_delete_given_selectors() {
        let (_tmp, store) = setup();
        let prompter = Prompter::new(Cursor::new(String::new()), Vec::new());
        let mut shell = Shell::new(&store, prompter);

        let ok = shell
            .delete(Some(vec![Selector::Position(3), Selector::Position(5)]), true)
            .unwrap();

        assert!(!ok);
        assert_eq!(vec!["a.sav", "b.sav"], on_disk(&store));
    }
}
