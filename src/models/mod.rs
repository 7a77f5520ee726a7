//! Data models for ralph-prd
//!
//! This module contains the prd.json schema types shared by the
//! extraction and manual construction paths.

pub mod prd;

// Re-exports for convenient access
pub use prd::{check_schema, Prd, StoryId, UserStory};
