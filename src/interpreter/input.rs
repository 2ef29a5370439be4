use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Answers `input()` calls made by the running program.
///
/// A call blocks the program until the provider returns. An empty string
/// stands for a dismissed prompt.
pub trait InputProvider {
    fn read_input(&mut self, prompt: Option<&str>) -> String;
}

/// Pre-recorded answers, handed out in order.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    prompts: Vec<Option<String>>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts seen so far, in call order.
    pub fn prompts(&self) -> &[Option<String>] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl InputProvider for ScriptedInput {
    fn read_input(&mut self, prompt: Option<&str>) -> String {
        self.prompts.push(prompt.map(str::to_string));
        let answer = self.answers.pop_front().unwrap_or_default();
        debug!(?prompt, %answer, "scripted input");
        answer
    }
}

/// Asks on the controlling terminal: prompt to stderr, answer from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalInput;

impl InputProvider for TerminalInput {
    fn read_input(&mut self, prompt: Option<&str>) -> String {
        eprint!("{}", prompt.unwrap_or("> "));
        let _ = io::stderr().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => line.trim_end_matches(['\r', '\n']).to_string(),
            Err(_) => String::new(),
        }
    }
}
