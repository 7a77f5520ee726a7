//! Given/When/Then acceptance scenario extraction for one story block.

use std::sync::LazyLock;

use regex::Regex;

/// Marker that opens the scenario list inside a story block.
const SCENARIOS_MARKER: &str = "**Acceptance Scenarios**:";

static ENTRY_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\.\s").unwrap());

static GIVEN_WHEN_THEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*\d+\.\s+\*\*Given\*\*(.*?)\*\*When\*\*(.*?)\*\*Then\*\*(.*)$").unwrap()
});

/// Extract acceptance criteria from the body of a single user story.
///
/// Only numbered entries under `**Acceptance Scenarios**:` are considered,
/// and only those carrying all three bold keywords. The section ends at the
/// next `##` heading marker or the end of the body.
pub fn extract_scenarios(body: &str) -> Vec<String> {
    let Some(start) = body.find(SCENARIOS_MARKER) else {
        tracing::debug!("story block has no acceptance scenarios section");
        return Vec::new();
    };

    let section = &body[start + SCENARIOS_MARKER.len()..];
    let section = section.find("##").map_or(section, |end| &section[..end]);

    numbered_entries(section)
        .iter()
        .filter_map(|entry| {
            let scenario = parse_scenario(entry);
            if scenario.is_none() {
                tracing::debug!(entry = %entry.trim(), "skipping scenario without Given/When/Then");
            }
            scenario
        })
        .collect()
}

/// Split a scenario section into numbered entries.
///
/// An entry starts on a `<n>. ` line and absorbs the following lines until a
/// blank line or the next numbered line.
fn numbered_entries(section: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current: Option<String> = None;

    for line in section.lines() {
        if ENTRY_START.is_match(line) {
            entries.extend(current.take());
            current = Some(line.to_string());
        } else if line.trim().is_empty() {
            entries.extend(current.take());
        } else if let Some(entry) = current.as_mut() {
            entry.push('\n');
            entry.push_str(line);
        }
    }
    entries.extend(current);

    entries
}

fn parse_scenario(entry: &str) -> Option<String> {
    let caps = GIVEN_WHEN_THEN.captures(entry)?;
    Some(format!(
        "Given {}, When {}, Then {}",
        caps[1].trim(),
        caps[2].trim(),
        caps[3].trim()
    ))
}
