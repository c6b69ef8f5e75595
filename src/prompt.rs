use crate::error::{Result, UfwCliError};
use std::io::{BufRead, Write};

const PORTS_PROMPT: &str = "Enter additional ports to open (comma-separated, e.g., 8080,3306):";

/// Prints the port prompt and blocks for one line of input.
///
/// End of input yields an empty list rather than an error.
pub fn read_port_list<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    writeln!(out, "{}", PORTS_PROMPT)?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(UfwCliError::Prompt)?;
    Ok(line.trim().to_string())
}
