use clap::Parser;
use common::user_interaction::Prompter;
use common::{BackupStore, LayoutArgs, Opts, Selector, Shell};
use std::process::exit;

#[derive(Parser)]
#[clap(version, about = "Restores the live game save from a backup")]
struct Cli {
    /// Print what would happen, without doing it
    #[clap(short, long)]
    noop: bool,
    /// Be verbose
    #[clap(short, long)]
    verbose: bool,
    /// Automatically restore the newest backup
    #[clap(short, long, conflicts_with = "backup")]
    auto: bool,
    /// Back up the current live save before replacing it
    #[clap(short, long)]
    keep: bool,
    #[clap(flatten)]
    layout: LayoutArgs,
    /// Backup to restore: its number in the listing, its name, or 'latest'. If omitted, you
    /// choose from a list
    #[clap()]
    backup: Option<String>,
}

fn selector(cli: &Cli) -> anyhow::Result<Option<Selector>> {
    if cli.auto {
        return Ok(Some(Selector::Latest));
    }

    match &cli.backup {
        Some(arg) => Ok(Some(arg.parse()?)),
        None => Ok(None),
    }
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let opts = Opts {
        verbose: cli.verbose,
        noop: cli.noop,
        noclobber: false,
    };

    let selector = selector(cli)?;
    let store = BackupStore::open(&cli.layout, opts)?;
    let mut shell = Shell::new(&store, Prompter::stdio());

    Ok(shell.load(selector, cli.keep)?)
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
