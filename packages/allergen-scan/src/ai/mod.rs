//! AI implementations.
//!
//! Reference implementations of the AI trait.

pub mod openai;

pub use openai::OpenAI;
