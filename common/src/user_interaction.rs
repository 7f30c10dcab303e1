use std::io::{self, BufRead, Stdout, StdinLock, Write};

/// Asks questions on one stream and reads answers from another. The tools use stdin and stdout;
/// tests use byte buffers.
///
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Prints the question and returns the trimmed answer. `None` means the input is finished.
    /// Bytes which aren't UTF-8 come back as replacement characters, so they read as a bad answer.
    ///
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;

        let mut buffer = Vec::new();

        if self.input.read_until(b'\n', &mut buffer)? == 0 {
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(&buffer).trim().to_string()))
    }

    /// Keeps asking until it gets a yes or a no. Running out of input counts as no.
    ///
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        loop {
            match self.ask(&format!("{} (yes/no):", question))? {
                None => return Ok(false),
                Some(answer) => match parse_confirmation(&answer) {
                    Some(decision) => return Ok(decision),
                    None => writeln!(self.output, "Invalid confirmation. Please type 'yes' or 'no'.")?,
                },
            }
        }
    }
}

pub fn parse_confirmation(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

pub fn is_cancel(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("q")
}
