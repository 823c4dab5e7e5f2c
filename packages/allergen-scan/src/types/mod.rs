//! Core data types for allergen scanning.

pub mod allergen;
pub mod config;
pub mod result;
pub mod source;
pub mod table;
