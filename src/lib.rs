//! Spec Kit to Ralph PRD conversion.
//!
//! The extraction engine lives in [`extract`]; [`manual`] builds templated
//! PRDs from interactive answers; [`cli`] wraps both for the `ralph-prd`
//! binary.

pub mod cli;
pub mod error;
pub mod extract;
pub mod manual;
pub mod models;
pub mod theme;
pub mod utils;

pub use error::{PrdError, PrdResult};
pub use extract::PrdAssembler;
pub use models::{Prd, UserStory};
