//! CLI argument parsing, user prompts and command drivers for ralph-prd.

mod args;
mod commands;
mod prompts;

pub use args::{CheckArgs, Cli, Command, ConvertArgs, ConvertConfig, CreateArgs, CreateConfig};
pub use commands::{collect_answers, run_check, run_convert, run_create};
pub use prompts::Prompter;
