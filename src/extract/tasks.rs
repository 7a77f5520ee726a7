//! Task-to-story association for Spec Kit `tasks.md` files.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Tasks keyed by the `US<n>` story number, in document order per story.
pub type TasksByStory = BTreeMap<u32, Vec<String>>;

static TASK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[T\d+\][ \t]+\[P\d+\][ \t]+\[US(\d+)\][ \t]+(.+)").unwrap()
});

/// Group `[T001] [P1] [US1] description` lines by story number.
///
/// Each description becomes a `"Task: <description>"` criterion. Lines that
/// do not carry all three tags are ignored.
pub fn extract_tasks(tasks: &str) -> TasksByStory {
    let mut by_story = TasksByStory::new();

    for caps in TASK_LINE.captures_iter(tasks) {
        let Ok(story_id) = caps[1].parse::<u32>() else {
            tracing::warn!(line = &caps[0], "skipping task with out-of-range story number");
            continue;
        };
        by_story
            .entry(story_id)
            .or_default()
            .push(format!("Task: {}", caps[2].trim()));
    }

    tracing::debug!(
        stories = by_story.len(),
        tasks = by_story.values().map(Vec::len).sum::<usize>(),
        "extracted tasks"
    );
    by_story
}
