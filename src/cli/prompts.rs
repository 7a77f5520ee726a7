//! User prompt functions for interactive CLI input.
//!
//! Every question runs the same small state machine: prompt, validate the
//! answer, and either accept it or go back to prompting.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use crate::theme::{paint, Tone};

/// Where a single question currently is
#[derive(Debug, Clone, PartialEq, Eq)]
enum PromptState<T> {
    Prompting,
    Validating { answer: String, at_eof: bool },
    Accepted(T),
}

/// Line-based question/answer session over any reader and writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
    assume_defaults: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            assume_defaults: false,
        }
    }

    /// Accept every default without reading input (`--yes`)
    pub fn assume_defaults(mut self, yes: bool) -> Self {
        self.assume_defaults = yes;
        self
    }

    /// Write one line of output
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    /// Ask until `parse` accepts the answer.
    ///
    /// An empty answer is replaced by `default` before validation. Running out
    /// of input also selects the default; if even that is rejected the
    /// question fails with `UnexpectedEof` instead of looping.
    pub fn ask<T>(
        &mut self,
        question: &str,
        default: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> io::Result<T> {
        let mut state = if self.assume_defaults {
            PromptState::Validating {
                answer: default.to_string(),
                at_eof: true,
            }
        } else {
            PromptState::Prompting
        };

        loop {
            state = match state {
                PromptState::Prompting => {
                    if default.is_empty() {
                        write!(self.output, "{}: ", question)?;
                    } else {
                        write!(self.output, "{} ({}): ", question, default)?;
                    }
                    self.output.flush()?;

                    let mut line = String::new();
                    let read = self.input.read_line(&mut line)?;
                    if read == 0 {
                        writeln!(self.output)?;
                    }
                    let answer = match line.trim() {
                        "" => default.to_string(),
                        answer => answer.to_string(),
                    };
                    PromptState::Validating {
                        answer,
                        at_eof: read == 0,
                    }
                }
                PromptState::Validating { answer, at_eof } => match parse(&answer) {
                    Ok(value) => PromptState::Accepted(value),
                    Err(reason) if at_eof => {
                        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, reason));
                    }
                    Err(reason) => {
                        writeln!(self.output, "{}", paint(&reason, Tone::Warning))?;
                        PromptState::Prompting
                    }
                },
                PromptState::Accepted(value) => return Ok(value),
            };
        }
    }

    /// Ask a text question
    pub fn ask_text(&mut self, question: &str, default: &str) -> io::Result<String> {
        self.ask(question, default, |answer| Ok(answer.to_string()))
    }

    /// Ask for a whole number of at least 1
    pub fn ask_number(&mut self, question: &str, default: u32) -> io::Result<u32> {
        self.ask(question, &default.to_string(), |answer| match answer.parse::<u32>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err("Invalid number. Enter a whole number of at least 1.".to_string()),
        })
    }

    /// Ask a yes/no question
    pub fn ask_yes_no(&mut self, question: &str, default_yes: bool) -> io::Result<bool> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        self.ask(&format!("{} ({})", question, hint), "", |answer| {
            match answer.to_lowercase().as_str() {
                "" => Ok(default_yes),
                "y" | "yes" => Ok(true),
                "n" | "no" => Ok(false),
                _ => Err("Invalid choice. Answer y or n.".to_string()),
            }
        })
    }
}
