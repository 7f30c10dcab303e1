use clap::Parser;
use common::selector::parse_selector_list;
use common::user_interaction::Prompter;
use common::{BackupStore, LayoutArgs, Opts, Selector, Shell};
use std::process::exit;

#[derive(Parser)]
#[clap(version, about = "Removes game save backups", long_about = None)]
struct Cli {
    /// Print what would happen, without doing it
    #[clap(short, long)]
    noop: bool,
    /// Be verbose
    #[clap(short, long)]
    verbose: bool,
    /// Don't ask for confirmation
    #[clap(short, long)]
    yes: bool,
    #[clap(flatten)]
    layout: LayoutArgs,
    /// Backups to remove, by number in the listing or by name. Numbers may be comma-separated,
    /// e.g. 1,3,5. If none are given, you choose from a list
    #[clap()]
    backups: Vec<String>,
}

// Unparseable items are reported and dropped, like out-of-range ones are later on.
fn selectors(args: &[String]) -> Option<Vec<Selector>> {
    if args.is_empty() {
        return None;
    }

    let mut ret = Vec::new();

    for arg in args {
        let (selectors, errors) = parse_selector_list(arg);

        for e in errors {
            eprintln!("Warning: {}, skipping.", e);
        }

        ret.extend(selectors);
    }

    Some(ret)
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let opts = Opts {
        verbose: cli.verbose,
        noop: cli.noop,
        noclobber: false,
    };

    let selectors = selectors(&cli.backups);
    let given_but_unusable = matches!(&selectors, Some(list) if list.is_empty());

    let store = BackupStore::open(&cli.layout, opts)?;
    let mut shell = Shell::new(&store, Prompter::stdio());
    let ok = shell.delete(selectors, cli.yes)?;

    Ok(ok && !given_but_unusable)
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
