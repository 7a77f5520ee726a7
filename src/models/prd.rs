//! PRD (Product Requirements Document) data structures
//!
//! This module contains the `prd.json` schema consumed by the Ralph loop:
//! a flat object (no `prd` wrapper, no top-level `tasks`) whose field order
//! is fixed by the struct declarations below.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PrdError, PrdResult};

/// Numeric story id.
///
/// Older hand-written PRDs used `"US-001"` style string ids; those are read
/// back as their trailing number so they can still be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StoryId(pub u32);

// Custom deserializer to handle both numeric and "US-001" string ids
impl<'de> Deserialize<'de> for StoryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct StoryIdVisitor;

        impl Visitor<'_> for StoryIdVisitor {
            type Value = StoryId;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a positive integer or a string like \"US-001\"")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u32::try_from(value)
                    .map(StoryId)
                    .map_err(|_| E::custom(format!("story id {} is out of range", value)))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u32::try_from(value)
                    .map(StoryId)
                    .map_err(|_| E::custom(format!("story id {} is out of range", value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let digits = value.rsplit(|c: char| !c.is_ascii_digit()).next().unwrap_or("");
                digits
                    .parse()
                    .map(StoryId)
                    .map_err(|_| E::custom(format!("story id \"{}\" has no trailing number", value)))
            }
        }

        deserializer.deserialize_any(StoryIdVisitor)
    }
}

impl std::fmt::Display for StoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// PRD user story
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserStory {
    pub id: StoryId,
    pub title: String,
    pub priority: u32,
    pub acceptance_criteria: Vec<String>,
    /// Owned by the Ralph loop once written; always `false` here.
    pub passes: bool,
}

impl UserStory {
    /// New story that has not passed yet
    pub fn new(id: u32, title: impl Into<String>, priority: u32, acceptance_criteria: Vec<String>) -> Self {
        Self {
            id: StoryId(id),
            title: title.into(),
            priority,
            acceptance_criteria,
            passes: false,
        }
    }
}

/// PRD document structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prd {
    /// Project name (`projectName` in files written by older creators)
    #[serde(alias = "projectName")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub branch_name: String,
    pub quality_check: String,
    pub user_stories: Vec<UserStory>,
}

impl Prd {
    /// Render as the 2-space indented JSON written to prd.json
    pub fn to_json(&self) -> PrdResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load PRD from a JSON file, rejecting files that break the Ralph schema
    pub fn load(path: &Path) -> PrdResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| PrdError::MissingInput {
            path: path.to_path_buf(),
            source,
        })?;
        let json: serde_json::Value = serde_json::from_str(&content)?;

        let problems = check_schema(&json);
        if !problems.is_empty() {
            return Err(PrdError::InvalidSchema { problems });
        }

        Ok(serde_json::from_value(json)?)
    }

    /// Count completed stories
    pub fn completed_count(&self) -> usize {
        self.user_stories.iter().filter(|s| s.passes).count()
    }

    /// Check if all stories pass (project complete)
    pub fn all_stories_pass(&self) -> bool {
        !self.user_stories.is_empty() && self.user_stories.iter().all(|s| s.passes)
    }

    /// Get current story (first with passes: false, sorted by priority)
    pub fn current_story(&self) -> Option<&UserStory> {
        self.user_stories
            .iter()
            .filter(|s| !s.passes)
            .min_by_key(|s| s.priority)
    }

    /// Number of stories per priority level, lowest P first
    pub fn priority_counts(&self) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for story in &self.user_stories {
            *counts.entry(story.priority).or_insert(0) += 1;
        }
        counts
    }

    /// Acceptance criteria across all stories
    pub fn total_criteria(&self) -> usize {
        self.user_stories
            .iter()
            .map(|s| s.acceptance_criteria.len())
            .sum()
    }
}

const STORY_FIELDS: [&str; 5] = ["id", "title", "priority", "acceptanceCriteria", "passes"];

/// Check a parsed prd.json against the shape the Ralph loop expects.
///
/// Returns one message per problem; an empty list means the document is valid.
pub fn check_schema(json: &serde_json::Value) -> Vec<String> {
    let mut problems = Vec::new();

    let Some(obj) = json.as_object() else {
        problems.push("prd.json is not a JSON object".to_string());
        return problems;
    };

    if obj.get("prd").is_some_and(|v| v.is_object()) {
        problems.push("PRD is wrapped in a \"prd\" object".to_string());
    }
    if obj.get("tasks").is_some_and(|v| v.is_array()) {
        problems.push("top-level \"tasks\" array is not allowed".to_string());
    }

    let name = obj.get("name").or_else(|| obj.get("projectName"));
    if !name.and_then(|v| v.as_str()).is_some_and(|s| !s.trim().is_empty()) {
        problems.push("missing \"name\"".to_string());
    }
    for key in ["branchName", "qualityCheck"] {
        if !obj.get(key).and_then(|v| v.as_str()).is_some_and(|s| !s.trim().is_empty()) {
            problems.push(format!("missing \"{}\"", key));
        }
    }

    match obj.get("userStories").and_then(|v| v.as_array()) {
        None => problems.push("missing \"userStories\" array".to_string()),
        Some(stories) if stories.is_empty() => problems.push("empty \"userStories\"".to_string()),
        Some(stories) => {
            for (index, story) in stories.iter().enumerate() {
                let missing: Vec<&str> = STORY_FIELDS
                    .iter()
                    .copied()
                    .filter(|field| story.get(field).is_none())
                    .collect();
                if !missing.is_empty() {
                    problems.push(format!(
                        "story #{} is missing {}",
                        index + 1,
                        missing.join(", ")
                    ));
                }
            }
        }
    }

    problems
}
