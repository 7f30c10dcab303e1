/// Prints only when the user asked for verbose output.
#[macro_export]
macro_rules! verbose {
    ($opts:expr, $($arg:tt)*) => {
        if $opts.verbose {
            println!($($arg)*);
        }
    };
}

/// Prints when verbose, and always in noop mode, where the narration is the whole point.
#[macro_export]
macro_rules! narrate {
    ($opts:expr, $($arg:tt)*) => {
        if $opts.verbose || $opts.noop {
            println!($($arg)*);
        }
    };
}
