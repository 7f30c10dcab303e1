use clap::Parser;
use common::user_interaction::Prompter;
use common::{BackupStore, LayoutArgs, Opts, Shell, StoreError};
use std::process::exit;

#[derive(Parser)]
#[clap(
    version,
    about = "Interactive save manager: create, load, list and delete backups of the live game save",
    long_about = None
)]
struct Cli {
    /// Be verbose
    #[clap(short, long)]
    verbose: bool,
    /// By default, a backup with the same name is overwritten. With this option, it is not
    #[clap(short = 'N', long)]
    noclobber: bool,
    #[clap(flatten)]
    layout: LayoutArgs,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let opts = Opts {
        verbose: cli.verbose,
        noop: false,
        noclobber: cli.noclobber,
    };

    let store = BackupStore::open(&cli.layout, opts)?;
    Shell::new(&store, Prompter::stdio()).menu()?;

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("ERROR: {:#}", e);

        if let Some(hint) = hint_for(&e) {
            eprintln!("{}", hint);
        }

        exit(1);
    }
}

fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<StoreError>() {
        Some(StoreError::SaveDirMissing(_)) => {
            Some("Create the save folder, or point --save-dir at the right one.")
        }
        _ => None,
    }
}
