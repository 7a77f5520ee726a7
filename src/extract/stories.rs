//! User story block segmentation for Spec Kit `spec.md` files.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::scenarios::extract_scenarios;
use crate::models::UserStory;

static STORY_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"### User Story (\d+) - (.+?) \(Priority: P(\d+)\)").unwrap()
});

/// Any story heading ends the previous block, even one too malformed to extract.
static STORY_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"### User Story \d+").unwrap());

const QUALITY_GATES_HEADING: &str = "## Quality Gates";

/// Extract every `### User Story <N> - <Title> (Priority: P<K>)` block.
///
/// Stories come back in heading order; ids are neither sorted nor
/// deduplicated.
pub fn extract_stories(spec: &str) -> Vec<UserStory> {
    let mut stories = Vec::new();
    let mut seen_ids = HashSet::new();

    for caps in STORY_HEADING.captures_iter(spec) {
        let Some(heading) = caps.get(0) else {
            continue;
        };
        let body = &spec[heading.end()..block_end(spec, heading.end())];

        let (Ok(id), Ok(priority)) = (caps[1].parse::<u32>(), caps[3].parse::<u32>()) else {
            tracing::warn!(heading = heading.as_str(), "skipping story with out-of-range number");
            continue;
        };

        let title = caps[2].trim();
        if title.is_empty() {
            tracing::warn!(heading = heading.as_str(), "skipping story with blank title");
            continue;
        }

        if !seen_ids.insert(id) {
            tracing::warn!(id, "duplicate user story id; both stories are kept");
        }

        let acceptance_criteria = extract_scenarios(body);
        tracing::debug!(id, priority, criteria = acceptance_criteria.len(), "extracted user story");

        stories.push(UserStory::new(id, title, priority, acceptance_criteria));
    }

    stories
}

/// End of the block whose body starts at `from`: the next story heading,
/// the quality gates section, or the end of the document.
fn block_end(spec: &str, from: usize) -> usize {
    let rest = &spec[from..];
    let next_story = STORY_BOUNDARY.find(rest).map(|m| m.start());
    let quality_gates = rest.find(QUALITY_GATES_HEADING);

    let offset = match (next_story, quality_gates) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) | (None, Some(a)) => a,
        (None, None) => rest.len(),
    };
    from + offset
}
