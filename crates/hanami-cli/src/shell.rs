use std::io::{BufRead, Write};

use clap::Parser;
use hanami_api::Catalog;
use hanami_core::error::HanamiError;

use crate::args::ShellLine;
use crate::commands::App;
use crate::console::Console;

const PROMPT: &str = "hanami> ";

/// Read commands until `exit`, `quit` or end of input.
///
/// The session state (last listing, handoff slot) lives as long as the
/// shell, so `filter` and `show` can build on earlier commands.
pub async fn run<C, R, W>(app: &mut App<C>, console: &mut Console<R, W>) -> Result<(), HanamiError>
where
    C: Catalog,
    R: BufRead,
    W: Write,
{
    console.line("hanami interactive shell. Type `help` for commands, `exit` to leave.")?;

    loop {
        console.prompt(PROMPT)?;
        let Some(line) = console.read_line()? else {
            console.blank()?;
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        match ShellLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => {
                if let Err(e) = app.dispatch(parsed.command, console).await {
                    tracing::error!(error = %e, "Command failed");
                    console.line(format!("error: {e}"))?;
                }
            }
            Err(e) => console.line(e.render().to_string().trim_end())?,
        }
    }
    Ok(())
}
