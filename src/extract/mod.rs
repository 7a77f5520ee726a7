//! Spec Kit markdown extraction
//!
//! Pattern-driven conversion of `spec.md` / `tasks.md` text into PRD records:
//! - `stories` segments the spec into `### User Story` blocks
//! - `scenarios` turns a block's Given/When/Then list into criteria
//! - `tasks` maps `[T..] [P..] [US..]` lines onto story numbers
//! - `quality` picks a quality gate command from technology keywords
//! - `assembler` merges everything into a validated `Prd`
//!
//! Everything here is a pure function of its input text.

pub mod assembler;
pub mod quality;
pub mod scenarios;
pub mod stories;
pub mod tasks;

pub use assembler::{branch_name, extract_overview, extract_title, PrdAssembler, BRANCH_PREFIX};
pub use quality::{detect_quality_check, TechStack};
pub use scenarios::extract_scenarios;
pub use stories::extract_stories;
pub use tasks::{extract_tasks, TasksByStory};
