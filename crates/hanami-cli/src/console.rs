use std::io::{self, BufRead, IsTerminal, Write};

/// Line-oriented user I/O. Results go to `output`; logs and the loading
/// line stay on stderr.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn line(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", text.as_ref())
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()
    }

    /// Next input line without its line ending, or `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask a yes/no question. Anything but "y" or "yes" is a no.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        self.prompt(&format!("{question} [y/N] "))?;
        Ok(self
            .read_line()?
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Loading line on stderr for the lifetime of the guard.
///
/// Cleared on drop, so both the success and the error path remove it.
/// Nothing is drawn when stderr is not a terminal.
pub struct Loading {
    shown: bool,
}

impl Loading {
    pub fn start(message: &str) -> Self {
        let mut stderr = io::stderr();
        let shown = stderr.is_terminal() && write!(stderr, "{message}...").is_ok();
        let _ = stderr.flush();
        Self { shown }
    }
}

impl Drop for Loading {
    fn drop(&mut self) {
        if self.shown {
            let mut stderr = io::stderr();
            let _ = write!(stderr, "\r\x1b[2K");
            let _ = stderr.flush();
        }
    }
}
