//! Terminal input and output behind a trait, so the wizard can be scripted

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::crypto::SecureString;
use crate::error::{FormError, FormResult};

/// Line-oriented conversation with the user
pub trait Prompter {
    /// Show `prompt` and read one line; `None` at end of input
    fn prompt(&mut self, prompt: &str) -> FormResult<Option<String>>;

    /// Like `prompt`, without echoing what is typed
    fn prompt_secret(&mut self, prompt: &str) -> FormResult<Option<SecureString>>;

    /// Show text without waiting for input
    fn say(&mut self, text: &str) -> FormResult<()>;
}

/// Prompter bound to stdin and stdout
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }

    fn read_line(&self) -> FormResult<Option<String>> {
        let mut input = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut input)
            .map_err(|e| FormError::Io(e.to_string()))?;

        if read == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl Prompter for TerminalPrompter {
    fn prompt(&mut self, prompt: &str) -> FormResult<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush().map_err(|e| FormError::Io(e.to_string()))?;
        self.read_line()
    }

    fn prompt_secret(&mut self, prompt: &str) -> FormResult<Option<SecureString>> {
        // Piped input has no terminal to hide
        if !io::stdin().is_terminal() {
            return Ok(self.prompt(prompt)?.map(SecureString::from));
        }

        match rpassword::prompt_password(prompt) {
            Ok(secret) => Ok(Some(SecureString::from(secret))),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(FormError::Io(format!("Failed to read password: {}", e))),
        }
    }

    fn say(&mut self, text: &str) -> FormResult<()> {
        println!("{}", text);
        Ok(())
    }
}

/// Prompter fed from a fixed list of answers, recording everything shown
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Prompts and messages in the order they were shown
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn output(&self) -> String {
        self.transcript.join("\n")
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, prompt: &str) -> FormResult<Option<String>> {
        self.transcript.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }

    fn prompt_secret(&mut self, prompt: &str) -> FormResult<Option<SecureString>> {
        Ok(self.prompt(prompt)?.map(SecureString::from))
    }

    fn say(&mut self, text: &str) -> FormResult<()> {
        self.transcript.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_then_eof() {
        let mut prompter = ScriptedPrompter::new(["one", "two"]);

        assert_eq!(prompter.prompt("a: ").unwrap().as_deref(), Some("one"));
        let secret = prompter.prompt_secret("b: ").unwrap().unwrap();
        assert_eq!(secret.as_str(), "two");
        assert_eq!(prompter.prompt("c: ").unwrap(), None);

        prompter.say("done").unwrap();
        assert_eq!(prompter.transcript(), ["a: ", "b: ", "c: ", "done"]);
        assert_eq!(prompter.remaining(), 0);
    }
}
