//! Pattern detector set
//!
//! Deterministic detectors for emails, phone numbers, postal addresses, ages
//! and dates. Each detector maps text to the literal substrings it matches;
//! the set concatenates their outputs in library order. Detection cannot fail.

pub mod patterns;
pub mod regex;

pub use self::patterns::{CompiledPattern, PatternRegistry};
pub use self::regex::RegexDetector;

use crate::domain::Entity;

/// Trait for deterministic entity detectors
pub trait Detector: Send + Sync {
    /// Detect entities in free text, in detector order then source order
    fn detect(&self, text: &str) -> Vec<Entity>;

    /// Labels this detector can emit, in output order
    fn labels(&self) -> Vec<&str>;
}
