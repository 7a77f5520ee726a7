//! CLI argument parsing and configuration.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

const DEFAULT_OUTPUT: &str = "prd.json";

#[derive(Parser, Debug)]
#[command(name = "ralph-prd")]
#[command(about = "Convert Spec Kit specifications into Ralph prd.json files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a Spec Kit folder (spec.md + optional tasks.md) into prd.json
    Convert(ConvertArgs),

    /// Build prd.json interactively
    Create(CreateArgs),

    /// Validate an existing prd.json against the Ralph schema
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Spec Kit feature folder, e.g. specs/001-restaurant-chatbot
    pub spec_folder: PathBuf,

    /// Where to write the PRD
    #[arg(short, long, env = "RALPH_PRD_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Specification file name inside the folder
    #[arg(long, default_value = "spec.md")]
    pub spec_file: String,

    /// Task file name inside the folder
    #[arg(long, default_value = "tasks.md")]
    pub tasks_file: String,

    /// Quality check command to use instead of the detected one
    #[arg(long, env = "RALPH_QUALITY_CHECK")]
    pub quality_check: Option<String>,

    /// Print the PRD JSON to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Where to write the PRD
    #[arg(short, long, env = "RALPH_PRD_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Accept every default without prompting
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// PRD file to check
    #[arg(default_value = DEFAULT_OUTPUT)]
    pub path: PathBuf,
}

/// Resolved configuration for `convert`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    pub spec_path: PathBuf,
    pub tasks_path: PathBuf,
    /// Folder name used for the branch; `None` falls back to the spec title
    pub source_id: Option<String>,
    /// `None` prints to stdout
    pub output: Option<PathBuf>,
    pub quality_check: Option<String>,
}

impl ConvertArgs {
    pub fn resolve(self) -> ConvertConfig {
        ConvertConfig {
            spec_path: self.spec_folder.join(&self.spec_file),
            tasks_path: self.spec_folder.join(&self.tasks_file),
            source_id: folder_name(&self.spec_folder),
            output: (!self.stdout).then_some(self.output),
            quality_check: self.quality_check,
        }
    }
}

/// Resolved configuration for `create`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateConfig {
    pub output: PathBuf,
    pub skip_prompts: bool,
}

impl CreateArgs {
    pub fn resolve(self) -> CreateConfig {
        CreateConfig {
            output: self.output,
            skip_prompts: self.yes,
        }
    }
}

/// Last path component of the folder, resolving `.` and `..` when possible
fn folder_name(folder: &Path) -> Option<String> {
    let name = |path: &Path| path.file_name().map(|n| n.to_string_lossy().into_owned());
    name(folder).or_else(|| std::fs::canonicalize(folder).ok().as_deref().and_then(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convert_defaults() {
        let Command::Convert(args) = parse(&["ralph-prd", "convert", "specs/001-restaurant-chatbot"]).command else {
            panic!("expected convert");
        };
        let config = args.resolve();
        assert_eq!(config.spec_path, PathBuf::from("specs/001-restaurant-chatbot/spec.md"));
        assert_eq!(config.tasks_path, PathBuf::from("specs/001-restaurant-chatbot/tasks.md"));
        assert_eq!(config.source_id.as_deref(), Some("001-restaurant-chatbot"));
        assert_eq!(config.output, Some(PathBuf::from("prd.json")));
        assert_eq!(config.quality_check, None);
    }

    #[test]
    fn test_convert_options() {
        let cli = parse(&[
            "ralph-prd",
            "-v",
            "convert",
            "specs/002-todo/",
            "--spec-file",
            "feature.md",
            "--quality-check",
            "make test",
            "--stdout",
        ]);
        assert!(cli.verbose);
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        let config = args.resolve();
        assert_eq!(config.spec_path, PathBuf::from("specs/002-todo/feature.md"));
        assert_eq!(config.source_id.as_deref(), Some("002-todo"));
        assert_eq!(config.output, None);
        assert_eq!(config.quality_check.as_deref(), Some("make test"));
    }

    #[test]
    fn test_convert_requires_folder() {
        assert!(Cli::try_parse_from(["ralph-prd", "convert"]).is_err());
    }

    #[test]
    fn test_create_and_check() {
        let Command::Create(args) = parse(&["ralph-prd", "create", "-y", "-o", "out/prd.json"]).command else {
            panic!("expected create");
        };
        assert_eq!(
            args.resolve(),
            CreateConfig {
                output: PathBuf::from("out/prd.json"),
                skip_prompts: true,
            }
        );

        let Command::Check(args) = parse(&["ralph-prd", "check"]).command else {
            panic!("expected check");
        };
        assert_eq!(args.path, PathBuf::from("prd.json"));
    }

    #[test]
    fn test_folder_name_of_current_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("003-exports");
        std::fs::create_dir(&nested).unwrap();
        assert_eq!(folder_name(&nested.join(".")).as_deref(), Some("003-exports"));
    }
}
