use clap::{ArgAction, Parser};
use common::user_interaction::Prompter;
use common::{BackupStore, LayoutArgs, Opts, Shell};
use std::process::exit;

#[derive(Parser)]
#[clap(version, about = "Backs up the live game save", long_about = None)]
struct Cli {
    /// Print what would happen, without doing it
    #[clap(short, long)]
    noop: bool,
    /// Be verbose
    #[clap(short, long)]
    verbose: bool,
    /// By default, a backup with the same name is overwritten. With this option, it is not
    #[clap(short = 'N', long, action=ArgAction::SetTrue)]
    noclobber: bool,
    #[clap(flatten)]
    layout: LayoutArgs,
    /// Name for the backup. If none is given, the backup is named after the current time, e.g.
    /// auto_2024-10-27_09:45.sav
    #[clap()]
    name: Option<String>,
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let opts = Opts {
        verbose: cli.verbose,
        noop: cli.noop,
        noclobber: cli.noclobber,
    };

    let store = BackupStore::open(&cli.layout, opts)?;
    let mut shell = Shell::new(&store, Prompter::stdio());

    Ok(shell.create(cli.name.as_deref())?)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => exit(0),
        Ok(false) => exit(1),
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            exit(2);
        }
    }
}
