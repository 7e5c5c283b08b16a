use crate::error::Result;
use crate::git::{CommandOutput, CommandRunner, GitCommand};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

/// Mock runner for testing without spawning git
///
/// Responses are keyed by the rendered command text (e.g.
/// `"git status --porcelain"`). Commands without a scripted response
/// succeed with empty output.
pub struct MockRunner {
    responses: RefCell<HashMap<String, CommandOutput>>,
    calls: RefCell<Vec<String>>,
}

impl MockRunner {
    /// Create a mock where every command succeeds silently
    pub fn new() -> Self {
        MockRunner {
            responses: RefCell::new(HashMap::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Script a successful response
    pub fn respond(&self, command: &str, stdout: &str) {
        self.set(command, CommandOutput::ok(stdout));
    }

    /// Script a failing response (exit code 1)
    pub fn fail(&self, command: &str, stderr: &str) {
        self.set(command, CommandOutput::failed(1, stderr));
    }

    /// Script an arbitrary output
    pub fn set(&self, command: &str, output: CommandOutput) {
        self.responses
            .borrow_mut()
            .insert(command.to_string(), output);
    }

    /// Every command run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn was_called(&self, command: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == command)
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &GitCommand, _cwd: &Path) -> Result<CommandOutput> {
        let rendered = command.to_string();
        self.calls.borrow_mut().push(rendered.clone());

        Ok(self
            .responses
            .borrow()
            .get(&rendered)
            .cloned()
            .unwrap_or_else(|| CommandOutput::ok("")))
    }
}
