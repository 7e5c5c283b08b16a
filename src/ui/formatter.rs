//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Styling goes through `console`, which drops colors when the stream is not a terminal.

use std::io::{self, Write};

use console::style;

use crate::boundary::BoundaryWarning;
use crate::git::GitCommand;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the tag that was found and the version that will be released.
///
/// # Arguments
/// * `last_tag` - The most recent tag, or the baseline version when none exists
/// * `new_version` - The computed release version
pub fn display_release_plan(last_tag: &str, new_version: &str) {
    println!("Last tag: {}", style(last_tag).cyan());
    println!("New release version: {}", style(new_version).green().bold());
}

/// Display a failed git command together with everything it printed.
///
/// # Arguments
/// * `command` - The command line as it was run
/// * `stdout` - Captured standard output
/// * `stderr` - Captured standard error
pub fn display_command_failure(command: &str, stdout: &str, stderr: &str) {
    // Nothing else to report to when stderr itself is gone
    write_command_failure(&mut io::stderr().lock(), command, stdout, stderr).ok();
}

/// Write a failed git command and its non-empty output streams to `out`.
pub fn write_command_failure<W: Write>(
    out: &mut W,
    command: &str,
    stdout: &str,
    stderr: &str,
) -> io::Result<()> {
    writeln!(
        out,
        "{} Error running command: {}",
        style("ERROR:").for_stderr().red(),
        command
    )?;
    if !stdout.trim().is_empty() {
        writeln!(out, "{}\n{}", style("stdout:").for_stderr().dim(), stdout.trim_end())?;
    }
    if !stderr.trim().is_empty() {
        writeln!(out, "{}\n{}", style("stderr:").for_stderr().dim(), stderr.trim_end())?;
    }
    Ok(())
}

/// Show a command that a dry run skipped.
pub fn display_dry_run(command: &GitCommand) {
    println!("{} Would run: {}", style("[dry-run]").magenta(), style(command).cyan());
}
