use anyhow::{Result, bail};
use std::io::{self, BufRead, IsTerminal, Write};

/// Ask for a yes/no answer on the terminal. `force` answers yes without asking.
pub fn confirm(message: &str, force: bool) -> Result<bool> {
  if force {
    return Ok(true);
  }

  if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
    bail!("Cannot prompt for confirmation in non-interactive mode. Use --force to proceed.");
  }

  ask(&mut io::stdin().lock(), &mut io::stderr(), message)
}

fn ask(input: &mut impl BufRead, output: &mut impl Write, message: &str) -> Result<bool> {
  write!(output, "{} [y/N] ", message)?;
  output.flush()?;

  let mut answer = String::new();
  input.read_line(&mut answer)?;

  Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
