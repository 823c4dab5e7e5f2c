//! Core trait abstractions for external collaborators.

pub mod ai;
pub mod source;
