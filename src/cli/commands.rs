//! `convert`, `create` and `check` drivers.
//!
//! These own all file I/O and operator output; the extraction engine and the
//! manual builder stay pure.

use std::io::{self, BufRead, Write};
use std::path::Path;

use super::args::{ConvertConfig, CreateConfig};
use super::prompts::Prompter;
use crate::error::{PrdError, PrdResult};
use crate::extract::PrdAssembler;
use crate::manual::{
    build_prd, default_branch, default_description, ManualAnswers, DEFAULT_FEATURE_NAME,
    DEFAULT_QUALITY_CHECK, DEFAULT_STORY_COUNT, MAX_GENERATED_STORIES,
};
use crate::models::Prd;
use crate::theme::{banner, check_line, paint, section, Tone};

/// Run the extraction path: read the spec folder, assemble, write prd.json.
pub async fn run_convert<W: Write>(config: &ConvertConfig, out: &mut W) -> PrdResult<Prd> {
    if config.output.is_some() {
        writeln!(out, "{}", banner(&["Spec Kit → Ralph PRD Converter", "     (Simple Regex Parser)"]))?;
        writeln!(out)?;
        writeln!(out, "{}", paint(&format!("Reading: {}", config.spec_path.display()), Tone::Warning))?;
    }

    let (spec, tasks) = tokio::join!(
        tokio::fs::read_to_string(&config.spec_path),
        tokio::fs::read_to_string(&config.tasks_path),
    );

    let spec = spec.map_err(|source| PrdError::MissingInput {
        path: config.spec_path.clone(),
        source,
    })?;

    let tasks = match tasks {
        Ok(content) => {
            if config.output.is_some() {
                writeln!(out, "{}", paint(&format!("Reading: {}", config.tasks_path.display()), Tone::Warning))?;
            }
            Some(content)
        }
        Err(e) => {
            let notice = if e.kind() == io::ErrorKind::NotFound {
                tracing::debug!(path = %config.tasks_path.display(), "no task document");
                format!("{} not found (optional)", config.tasks_path.display())
            } else {
                tracing::warn!(path = %config.tasks_path.display(), error = %e, "task document unreadable, ignoring it");
                format!("{} could not be read, continuing without tasks: {}", config.tasks_path.display(), e)
            };
            if config.output.is_some() {
                writeln!(out, "{}", paint(&notice, Tone::Warning))?;
            }
            None
        }
    };

    let mut assembler = PrdAssembler::new();
    if let Some(source_id) = &config.source_id {
        assembler = assembler.with_source_id(source_id);
    }
    if let Some(command) = &config.quality_check {
        assembler = assembler.with_quality_check(command);
    }

    let prd = assembler.assemble(&spec, tasks.as_deref())?;
    let json = prd.to_json()?;

    let Some(output) = &config.output else {
        writeln!(out, "{}", json)?;
        return Ok(prd);
    };

    write_prd(output, &json).await?;

    writeln!(out)?;
    writeln!(out, "{}", paint(&format!("✓ Generated: {}", output.display()), Tone::Success))?;
    writeln!(out)?;
    for line in [
        format!("Project: {}", prd.name),
        format!("Branch: {}", prd.branch_name),
        format!("User Stories: {}", prd.user_stories.len()),
        format!("Quality Check: {}", prd.quality_check),
    ] {
        writeln!(out, "{}", paint(&line, Tone::Info))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", paint("Ready to run Ralph!", Tone::Warning))?;

    Ok(prd)
}

async fn write_prd(path: &Path, json: &str) -> PrdResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| PrdError::WriteOutput {
                path: path.to_path_buf(),
                source,
            })?;
    }
    tokio::fs::write(path, json)
        .await
        .map_err(|source| PrdError::WriteOutput {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %path.display(), bytes = json.len(), "wrote PRD");
    Ok(())
}

/// Walk the question/answer session
pub fn collect_answers<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> io::Result<ManualAnswers> {
    prompter.say(section("1. Feature Description"))?;
    let feature_name = prompter.ask_text("What feature do you want to build?", DEFAULT_FEATURE_NAME)?;
    let project_name = prompter.ask_text("Project name", &feature_name)?;
    let description = prompter.ask_text("Brief description (optional)", &default_description(&feature_name))?;

    prompter.say(section("2. User Stories"))?;
    let story_count = prompter.ask_number("How many user stories to generate?", DEFAULT_STORY_COUNT)?;
    if story_count > MAX_GENERATED_STORIES {
        prompter.say(paint(
            &format!("Generating the maximum of {} stories.", MAX_GENERATED_STORIES),
            Tone::Warning,
        ))?;
    }

    prompter.say(section("3. Quality Gates"))?;
    prompter.say(paint("What commands must pass before considering a story complete?", Tone::Muted))?;
    let quality_check = prompter.ask_text("Quality check command (e.g., npm test)", DEFAULT_QUALITY_CHECK)?;

    prompter.say(section("4. Git Branch"))?;
    let branch_name = prompter.ask_text("Git branch name", &default_branch(&feature_name))?;

    Ok(ManualAnswers {
        feature_name,
        project_name,
        description,
        story_count,
        quality_check,
        branch_name,
    })
}

/// Run the manual path.
///
/// Returns `None` when the user declines to write the file.
pub fn run_create<R: BufRead, W: Write>(config: &CreateConfig, input: R, out: &mut W) -> PrdResult<Option<Prd>> {
    let mut prompter = Prompter::new(input, &mut *out).assume_defaults(config.skip_prompts);

    prompter.say(banner(&["Ralph PRD Creator"]))?;
    prompter.say(paint("Create a Product Requirements Document for your project.", Tone::Info))?;
    prompter.say(paint("Press Ctrl+C at any time to cancel.", Tone::Muted))?;

    let answers = collect_answers(&mut prompter)?;
    let prd = build_prd(&answers)?;

    prompter.say(section("Generating PRD"))?;
    prompter.say(paint(&format!("Project: {}", prd.name), Tone::Info))?;
    prompter.say(paint(&format!("Branch: {}", prd.branch_name), Tone::Info))?;
    prompter.say(paint(&format!("Stories: {}", prd.user_stories.len()), Tone::Info))?;
    for story in &prd.user_stories {
        prompter.say(format!("  {}: {}", story.id, story.title))?;
    }

    let file_name = config.output.display().to_string();
    if !prompter.ask_yes_no(&format!("Generate {}?", file_name), true)? {
        prompter.say(paint("Cancelled.", Tone::Muted))?;
        return Ok(None);
    }

    let json = prd.to_json()?;
    std::fs::write(&config.output, json).map_err(|source| PrdError::WriteOutput {
        path: config.output.clone(),
        source,
    })?;
    tracing::info!(path = %file_name, "wrote PRD");

    prompter.say(paint(&format!("✓ PRD created: {}", file_name), Tone::Success))?;
    prompter.say("Next steps:")?;
    prompter.say(format!("  1. Review {} and edit if needed", file_name))?;
    prompter.say("  2. Run: ralph-tui <task-directory>")?;

    Ok(Some(prd))
}

/// Validate a prd.json and print a summary
pub fn run_check<W: Write>(path: &Path, out: &mut W) -> PrdResult<Prd> {
    writeln!(out, "{}", paint(&format!("Validating {}...", path.display()), Tone::Info))?;

    let prd = match Prd::load(path) {
        Ok(prd) => prd,
        Err(PrdError::InvalidSchema { problems }) => {
            for problem in &problems {
                writeln!(out, "{}", check_line(false, problem))?;
            }
            return Err(PrdError::InvalidSchema { problems });
        }
        Err(e) => return Err(e),
    };

    writeln!(out, "{}", check_line(true, &format!("Has \"name\": {}", prd.name)))?;
    writeln!(out, "{}", check_line(true, &format!("Has \"branchName\": {}", prd.branch_name)))?;
    writeln!(out, "{}", check_line(true, &format!("Has \"qualityCheck\": {}", prd.quality_check)))?;
    writeln!(out, "{}", check_line(true, "No \"prd\" wrapper or \"tasks\" array"))?;
    writeln!(out)?;
    writeln!(out, "{}", paint(&format!("Total stories: {}", prd.user_stories.len()), Tone::Info))?;
    for (priority, count) in prd.priority_counts() {
        writeln!(out, "  P{} stories: {}", priority, count)?;
    }
    writeln!(out, "  Total acceptance criteria: {}", prd.total_criteria())?;
    writeln!(out, "  Completed: {}/{}", prd.completed_count(), prd.user_stories.len())?;
    if let Some(story) = prd.current_story() {
        writeln!(out, "  Next story: {} - {}", story.id, story.title)?;
    } else if prd.all_stories_pass() {
        writeln!(out, "{}", paint("All stories pass.", Tone::Success))?;
    }

    Ok(prd)
}
