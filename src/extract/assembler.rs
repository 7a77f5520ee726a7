//! Builds a [`Prd`] from a spec document and an optional task document.

use std::sync::LazyLock;

use regex::Regex;

use super::quality::detect_quality_check;
use super::stories::extract_stories;
use super::tasks::extract_tasks;
use crate::error::{PrdError, PrdResult};
use crate::models::Prd;
use crate::utils::slugify;

/// Prefix for every generated branch name.
pub const BRANCH_PREFIX: &str = "ralph/";

/// Project name used when the spec has no `# Title` line.
pub const DEFAULT_PROJECT_NAME: &str = "Project";

static TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").unwrap());
static OVERVIEW: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"## Overview\s+").unwrap());

/// Assembles PRDs for the extraction path.
///
/// Holds only caller configuration, so one assembler can convert any number
/// of documents.
#[derive(Debug, Clone, Default)]
pub struct PrdAssembler {
    source_id: Option<String>,
    quality_check: Option<String>,
}

impl PrdAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier for the branch name, usually the spec folder name.
    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    /// Use this command instead of the detected quality gate.
    pub fn with_quality_check(mut self, command: impl Into<String>) -> Self {
        self.quality_check = Some(command.into());
        self
    }

    /// Extract, merge and validate.
    ///
    /// Fails with [`PrdError::NoStoriesFound`] when the spec has no story
    /// headings; nothing is returned in that case.
    pub fn assemble(&self, spec: &str, tasks: Option<&str>) -> PrdResult<Prd> {
        let name = extract_title(spec).unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());
        let description = extract_overview(spec);

        let mut user_stories = extract_stories(spec);
        if user_stories.is_empty() {
            return Err(PrdError::NoStoriesFound);
        }

        if let Some(tasks) = tasks {
            let tasks_by_story = extract_tasks(tasks);
            for story in &mut user_stories {
                if let Some(story_tasks) = tasks_by_story.get(&story.id.0) {
                    story.acceptance_criteria.extend(story_tasks.iter().cloned());
                }
            }
        }

        let quality_check = match self.quality_check.as_deref().map(str::trim) {
            Some(command) if !command.is_empty() => command.to_string(),
            _ => detect_quality_check(spec).to_string(),
        };

        let identifier = self
            .source_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| title_slug(&name));

        tracing::info!(
            name = %name,
            stories = user_stories.len(),
            "assembled PRD"
        );

        Ok(Prd {
            name,
            description,
            branch_name: branch_name(&identifier),
            quality_check,
            user_stories,
        })
    }
}

/// `ralph/<identifier>`
pub fn branch_name(identifier: &str) -> String {
    format!("{}{}", BRANCH_PREFIX, identifier)
}

fn title_slug(title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        slugify(DEFAULT_PROJECT_NAME)
    } else {
        slug
    }
}

/// Text of the first `# Title` line
pub fn extract_title(spec: &str) -> Option<String> {
    TITLE
        .captures(spec)
        .map(|caps| caps[1].trim().to_string())
        .filter(|title| !title.is_empty())
}

/// First line of the `## Overview` section, or an empty string
pub fn extract_overview(spec: &str) -> String {
    let Some(heading) = OVERVIEW.find(spec) else {
        return String::new();
    };
    let rest = &spec[heading.end()..];
    let section = rest.find("##").map_or(rest, |end| &rest[..end]);
    section
        .trim()
        .lines()
        .next()
        .unwrap_or_default()
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserStory;

    const SPEC: &str = r#"# Restaurant Chatbot System

## Overview

A conversational chatbot that helps customers make restaurant reservations.
It also answers menu questions.

## User Scenarios & Testing

### User Story 1 - Make Reservation (Priority: P1)

**Acceptance Scenarios**:

1. **Given** a user starts a chat **When** they request a reservation **Then** it is confirmed

### User Story 2 - View Menu (Priority: P2)

Browse dishes. The web client is written in React.

## Quality Gates

- Type checks pass
"#;

    const TASKS: &str = "[T001] [P1] [US1] Set up conversation flow state machine\n[T002] [P2] [US2] Create menu database schema\n[T003] [P1] [US9] Orphan task\n";

    #[test]
    fn test_assemble_full_document() {
        let prd = PrdAssembler::new()
            .with_source_id("001-restaurant-chatbot")
            .assemble(SPEC, Some(TASKS))
            .unwrap();

        assert_eq!(prd.name, "Restaurant Chatbot System");
        assert_eq!(
            prd.description,
            "A conversational chatbot that helps customers make restaurant reservations."
        );
        assert_eq!(prd.branch_name, "ralph/001-restaurant-chatbot");
        assert_eq!(
            prd.quality_check,
            "npm run typecheck && npm test && npm run build && npm run lint"
        );
        assert_eq!(
            prd.user_stories,
            vec![
                UserStory::new(
                    1,
                    "Make Reservation",
                    1,
                    vec![
                        "Given a user starts a chat, When they request a reservation, Then it is confirmed".to_string(),
                        "Task: Set up conversation flow state machine".to_string(),
                    ],
                ),
                UserStory::new(2, "View Menu", 2, vec!["Task: Create menu database schema".to_string()]),
            ]
        );
    }

    #[test]
    fn test_scenarios_precede_tasks() {
        let spec = "### User Story 1 - A (Priority: P1)\n**Acceptance Scenarios**:\n1. **Given** a **When** b **Then** c\n2. **Given** d **When** e **Then** f\n";
        let tasks = "[T001] [P1] [US1] first\n[T002] [P1] [US1] second\n";
        let prd = PrdAssembler::new().assemble(spec, Some(tasks)).unwrap();
        assert_eq!(
            prd.user_stories[0].acceptance_criteria,
            vec![
                "Given a, When b, Then c",
                "Given d, When e, Then f",
                "Task: first",
                "Task: second",
            ]
        );
    }

    #[test]
    fn test_no_stories_found() {
        let result = PrdAssembler::new().assemble("", Some(TASKS));
        assert!(matches!(result, Err(PrdError::NoStoriesFound)));

        let result = PrdAssembler::new().assemble("# Title\n\n## Overview\n\nText\n", None);
        assert!(matches!(result, Err(PrdError::NoStoriesFound)));
    }

    #[test]
    fn test_story_without_scenarios_keeps_empty_criteria() {
        let prd = PrdAssembler::new()
            .assemble("### User Story 1 - Bare (Priority: P3)\n\nJust prose.\n", None)
            .unwrap();
        assert!(prd.user_stories[0].acceptance_criteria.is_empty());
        assert_eq!(prd.user_stories[0].priority, 3);
    }

    #[test]
    fn test_duplicate_ids_both_receive_tasks() {
        let spec = "### User Story 1 - Alpha (Priority: P1)\n### User Story 1 - Beta (Priority: P2)\n";
        let prd = PrdAssembler::new()
            .assemble(spec, Some("[T001] [P1] [US1] Shared\n"))
            .unwrap();
        assert_eq!(prd.user_stories[0].acceptance_criteria, vec!["Task: Shared"]);
        assert_eq!(prd.user_stories[1].acceptance_criteria, vec!["Task: Shared"]);
    }

    #[test]
    fn test_defaults_without_title_or_overview() {
        let prd = PrdAssembler::new()
            .assemble("### User Story 1 - A (Priority: P1)\n", None)
            .unwrap();
        assert_eq!(prd.name, DEFAULT_PROJECT_NAME);
        assert_eq!(prd.description, "");
        assert_eq!(prd.branch_name, "ralph/project");
        assert_eq!(prd.quality_check, "npm test");
    }

    #[test]
    fn test_branch_falls_back_to_title_slug() {
        let spec = "# Todo App: v2\n### User Story 1 - A (Priority: P1)\n";
        let prd = PrdAssembler::new().with_source_id("  ").assemble(spec, None).unwrap();
        assert_eq!(prd.branch_name, "ralph/todo-app-v2");
    }

    #[test]
    fn test_quality_check_override() {
        let spec = "### User Story 1 - A (Priority: P1)\nBuilt with python.\n";
        let prd = PrdAssembler::new()
            .with_quality_check("make verify")
            .assemble(spec, None)
            .unwrap();
        assert_eq!(prd.quality_check, "make verify");

        let prd = PrdAssembler::new().with_quality_check(" ").assemble(spec, None).unwrap();
        assert_eq!(prd.quality_check, "python -m pytest && python -m mypy .");
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let assembler = PrdAssembler::new().with_source_id("001-restaurant-chatbot");
        let first = assembler.assemble(SPEC, Some(TASKS)).unwrap().to_json().unwrap();
        let second = assembler.assemble(SPEC, Some(TASKS)).unwrap().to_json().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_title_first_top_level_heading() {
        assert_eq!(
            extract_title("intro\n## Not this\n# Feature Specification: Todo\n# Later\n"),
            Some("Feature Specification: Todo".to_string())
        );
        assert_eq!(extract_title("## Only second level\n"), None);
    }

    #[test]
    fn test_extract_overview() {
        assert_eq!(extract_overview("## Overview\n\n  First line.  \nSecond line.\n## Next"), "First line.");
        assert_eq!(extract_overview("## Overview\n\n## Empty"), "");
        assert_eq!(extract_overview("# No overview here"), "");
    }
}
