//! Quality gate detection from the technologies a spec mentions.

/// Technology family a spec is written for, as far as keywords can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechStack {
    TypeScript,
    Python,
    Rust,
    Go,
    Unknown,
}

/// Checked in order; the first rule with any keyword present wins.
const DETECTION_RULES: [(TechStack, &[&str]); 4] = [
    (TechStack::TypeScript, &["typescript", "react", "next"]),
    (TechStack::Python, &["python"]),
    (TechStack::Rust, &["rust"]),
    (TechStack::Go, &["go"]),
];

impl TechStack {
    /// Detect the stack by case-insensitive substring search.
    ///
    /// Rules overlap (a React spec that mentions Go is still TypeScript), so
    /// the order of `DETECTION_RULES` is part of the contract.
    pub fn detect(text: &str) -> Self {
        let lower = text.to_lowercase();
        DETECTION_RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map_or(TechStack::Unknown, |(stack, _)| *stack)
    }

    /// Preset quality check command for this stack
    pub fn quality_check(&self) -> &'static str {
        match self {
            TechStack::TypeScript => "npm run typecheck && npm test && npm run build && npm run lint",
            TechStack::Python => "python -m pytest && python -m mypy .",
            TechStack::Rust => "cargo test && cargo clippy",
            TechStack::Go => "go test ./... && go vet ./...",
            TechStack::Unknown => "npm test",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TechStack::TypeScript => "TypeScript/React",
            TechStack::Python => "Python",
            TechStack::Rust => "Rust",
            TechStack::Go => "Go",
            TechStack::Unknown => "unknown",
        }
    }
}

/// Quality check command for a spec document
pub fn detect_quality_check(text: &str) -> &'static str {
    let stack = TechStack::detect(text);
    tracing::debug!(stack = stack.label(), "detected tech stack");
    stack.quality_check()
}
