//! Testing utilities including mock implementations.
//!
//! These let applications exercise the scanner without real AI calls or
//! document discovery.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{Result, ScanError};
use crate::pipeline::prompts::{FULL_SECTION_MARKER, SUB_SECTION_MARKER};
use crate::traits::{ai::AI, source::SourceLocator};
use crate::types::source::AllergenSource;

/// A mock AI implementation for testing.
///
/// Replies are chosen by the first registered key that appears in the
/// prompt. Unmatched prompts get [`MockAI::empty_response`]. Clones share
/// their rules and call log.
#[derive(Clone, Default)]
pub struct MockAI {
    /// Replies keyed by a prompt substring, checked in insertion order
    rules: Arc<RwLock<Vec<(String, MockReply)>>>,

    /// Reply when no rule matches
    fallback: Arc<RwLock<Option<MockReply>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockAICall>>>,
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Fail,
}

/// Record of a call made to the mock AI.
#[derive(Debug, Clone)]
pub struct MockAICall {
    pub system: String,
    pub prompt: String,
}

impl MockAI {
    /// Create a new mock AI with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `response` whenever the prompt contains `key`.
    pub fn with_response_for(self, key: impl Into<String>, response: impl Into<String>) -> Self {
        self.rules
            .write()
            .unwrap()
            .push((key.into(), MockReply::Text(response.into())));
        self
    }

    /// Fail whenever the prompt contains `key`.
    pub fn with_failure_for(self, key: impl Into<String>) -> Self {
        self.rules
            .write()
            .unwrap()
            .push((key.into(), MockReply::Fail));
        self
    }

    /// Reply with `response` when no rule matches.
    pub fn with_default_response(self, response: impl Into<String>) -> Self {
        *self.fallback.write().unwrap() = Some(MockReply::Text(response.into()));
        self
    }

    /// Fail every call that no rule matches.
    pub fn failing() -> Self {
        let ai = Self::new();
        *ai.fallback.write().unwrap() = Some(MockReply::Fail);
        ai
    }

    /// A well-formed response listing no items.
    pub fn empty_response() -> String {
        format!(
            "{}\nNone found.\n\n{}\nNone found.",
            FULL_SECTION_MARKER, SUB_SECTION_MARKER
        )
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockAICall> {
        self.calls.read().unwrap().clone()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

#[async_trait]
impl AI for MockAI {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        self.calls.write().unwrap().push(MockAICall {
            system: system.to_string(),
            prompt: prompt.to_string(),
        });

        let reply = self
            .rules
            .read()
            .unwrap()
            .iter()
            .find(|(key, _)| prompt.contains(key.as_str()))
            .map(|(_, reply)| reply.clone())
            .or_else(|| self.fallback.read().unwrap().clone());

        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Fail) => Err(ScanError::AI("mock AI failure".into())),
            None => Ok(Self::empty_response()),
        }
    }
}

/// A mock source locator for testing.
#[derive(Clone, Default)]
pub struct MockSourceLocator {
    /// Predefined sources by restaurant name
    sources: Arc<RwLock<HashMap<String, AllergenSource>>>,

    /// Restaurants whose lookup should fail
    failing: Arc<RwLock<HashSet<String>>>,

    /// Restaurant names asked for
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockSourceLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predefined source.
    pub fn with_source(self, restaurant: impl Into<String>, source: AllergenSource) -> Self {
        self.sources
            .write()
            .unwrap()
            .insert(restaurant.into(), source);
        self
    }

    /// Mark a restaurant lookup as failing.
    pub fn fail_for(self, restaurant: impl Into<String>) -> Self {
        self.failing.write().unwrap().insert(restaurant.into());
        self
    }

    /// Get all restaurant names looked up.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl SourceLocator for MockSourceLocator {
    async fn locate(&self, restaurant: &str) -> Result<Option<AllergenSource>> {
        self.calls.write().unwrap().push(restaurant.to_string());

        if self.failing.read().unwrap().contains(restaurant) {
            return Err(ScanError::Source(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "Mock connection refused",
            ))));
        }

        Ok(self.sources.read().unwrap().get(restaurant).cloned())
    }
}
