//! Manual PRD construction from question/answer input.
//!
//! The stories are templated filler; the answers only supply metadata.

use crate::error::{PrdError, PrdResult};
use crate::extract::branch_name;
use crate::models::{Prd, UserStory};
use crate::utils::slugify;

pub const DEFAULT_FEATURE_NAME: &str = "My Feature";
pub const DEFAULT_STORY_COUNT: u32 = 5;
pub const DEFAULT_QUALITY_CHECK: &str = "echo \"No tests configured\"";

/// Generated stories are capped at this count.
pub const MAX_GENERATED_STORIES: u32 = 10;

struct StoryTemplate {
    title: &'static str,
    criteria: [&'static str; 3],
}

const STORY_TEMPLATES: [StoryTemplate; 4] = [
    StoryTemplate {
        title: "Set up project structure",
        criteria: ["Project files created", "Dependencies configured", "Basic structure in place"],
    },
    StoryTemplate {
        title: "Implement core functionality",
        criteria: ["Main feature working", "Code is tested", "Documentation updated"],
    },
    StoryTemplate {
        title: "Add user interface",
        criteria: ["UI components created", "Responsive design", "Accessible markup"],
    },
    StoryTemplate {
        title: "Polish and finalize",
        criteria: ["Code review passed", "All tests passing", "Ready for deployment"],
    },
];

/// Answers collected by the `create` session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualAnswers {
    pub feature_name: String,
    pub project_name: String,
    pub description: String,
    pub story_count: u32,
    pub quality_check: String,
    pub branch_name: String,
}

pub fn default_description(feature_name: &str) -> String {
    format!("Building {}", feature_name)
}

pub fn default_branch(feature_name: &str) -> String {
    branch_name(&slugify(feature_name))
}

/// Templated stories, cycling through the four templates
pub fn generate_user_stories(story_count: u32) -> Vec<UserStory> {
    let count = story_count.min(MAX_GENERATED_STORIES);
    (0..count)
        .zip(STORY_TEMPLATES.iter().cycle())
        .map(|(i, template)| {
            let title = if i == 0 {
                template.title.to_string()
            } else {
                format!("{} ({})", template.title, i + 1)
            };
            let criteria = template.criteria.iter().map(|c| c.to_string()).collect();
            UserStory::new(i + 1, title, i + 1, criteria)
        })
        .collect()
}

/// Build the PRD for a finished session
pub fn build_prd(answers: &ManualAnswers) -> PrdResult<Prd> {
    let user_stories = generate_user_stories(answers.story_count);
    if user_stories.is_empty() {
        return Err(PrdError::NoStoriesFound);
    }

    Ok(Prd {
        name: answers.project_name.clone(),
        description: answers.description.clone(),
        branch_name: answers.branch_name.clone(),
        quality_check: answers.quality_check.clone(),
        user_stories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StoryId;

    fn default_answers() -> ManualAnswers {
        let feature_name = DEFAULT_FEATURE_NAME.to_string();
        ManualAnswers {
            project_name: feature_name.clone(),
            description: default_description(&feature_name),
            story_count: DEFAULT_STORY_COUNT,
            quality_check: DEFAULT_QUALITY_CHECK.to_string(),
            branch_name: default_branch(&feature_name),
            feature_name,
        }
    }

    #[test]
    fn test_default_answer_helpers() {
        assert_eq!(default_description("My Feature"), "Building My Feature");
        assert_eq!(default_branch("My Feature"), "ralph/my-feature");
    }

    #[test]
    fn test_generate_titles_and_priorities() {
        let stories = generate_user_stories(6);
        let titles: Vec<&str> = stories.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Set up project structure",
                "Implement core functionality (2)",
                "Add user interface (3)",
                "Polish and finalize (4)",
                "Set up project structure (5)",
                "Implement core functionality (6)",
            ]
        );
        assert_eq!(stories[5].id, StoryId(6));
        assert_eq!(stories[5].priority, 6);
        assert_eq!(
            stories[4].acceptance_criteria,
            vec!["Project files created", "Dependencies configured", "Basic structure in place"]
        );
        assert!(stories.iter().all(|s| !s.passes));
    }

    #[test]
    fn test_generate_caps_story_count() {
        assert_eq!(generate_user_stories(25).len(), 10);
        assert!(generate_user_stories(0).is_empty());
    }

    #[test]
    fn test_build_prd() {
        let prd = build_prd(&default_answers()).unwrap();
        assert_eq!(prd.name, "My Feature");
        assert_eq!(prd.quality_check, "echo \"No tests configured\"");
        assert_eq!(prd.user_stories.len(), 5);
    }

    #[test]
    fn test_build_prd_rejects_zero_stories() {
        let answers = ManualAnswers {
            story_count: 0,
            ..default_answers()
        };
        assert!(matches!(build_prd(&answers), Err(PrdError::NoStoriesFound)));
    }
}
