use clap::Parser;
use common::user_interaction::Prompter;
use common::{BackupStore, LayoutArgs, Opts, Shell};
use std::io::{self, Write};
use std::process::exit;

#[derive(Parser)]
#[clap(version, about = "Lists game save backups, oldest first", long_about = None)]
struct Cli {
    /// Be verbose
    #[clap(short, long)]
    verbose: bool,
    /// Print only backup names, one per line
    #[clap(short, long)]
    names: bool,
    /// Print only the path of the newest backup
    #[clap(short, long, conflicts_with = "names")]
    latest: bool,
    #[clap(flatten)]
    layout: LayoutArgs,
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<bool> {
    let opts = Opts {
        verbose: cli.verbose,
        ..Default::default()
    };

    let store = BackupStore::open(&cli.layout, opts)?;

    if cli.latest {
        return match store.list_backups()?.last() {
            Some(entry) => {
                writeln!(out, "{}", entry.path)?;
                Ok(true)
            }
            None => Ok(false),
        };
    }

    if cli.names {
        for entry in store.list_backups()? {
            writeln!(out, "{}", entry.name)?;
        }
        return Ok(true);
    }

    let mut shell = Shell::new(&store, Prompter::new(io::empty(), out));
    Ok(shell.list()?)
}

fn main() {
    let cli = Cli::parse();
    let mut stdout = io::stdout();

    match run(&cli, &mut stdout) {
        Ok(true) => exit(0),
        Ok(false) => exit(1),
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            exit(2);
        }
    }
}
