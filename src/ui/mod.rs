//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling
//!
//! Prompts go through the [Prompt] trait so the release workflow can be driven
//! by scripted input in tests instead of a terminal.

use std::io::{self, BufRead, Write};

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_command_failure, display_dry_run, display_error,
    display_release_plan, display_status, display_success,
};

/// Blocking source of operator answers.
pub trait Prompt {
    /// Show `question` and block until one line of input is available.
    ///
    /// End of input yields an empty answer.
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Line-oriented prompt over any reader/writer pair.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LinePrompt { input, output }
    }

    /// Everything written to the operator so far
    pub fn output(&self) -> &W {
        &self.output
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's stdin/stdout.
    pub fn stdio() -> Self {
        LinePrompt::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }
}

/// Whether an answer confirms the question.
///
/// Accepts "y" or "yes" in any case, ignoring surrounding whitespace.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

/// Prompts user to confirm an action with a yes/no prompt.
///
/// # Arguments
/// * `prompt` - Where the question is asked
/// * `question` - The full question, including any "(y/n)" hint
///
/// # Returns
/// * `Ok(true)` - If user entered "y" or "yes"
/// * `Ok(false)` - Otherwise (including an empty line or end of input)
/// * `Err` - If input error occurs
pub fn confirm(prompt: &mut dyn Prompt, question: &str) -> Result<bool> {
    let answer = prompt.ask(question)?;
    Ok(is_affirmative(&answer))
}
