//! Attribute sources
//!
//! The generator never invents identity data itself. It asks an
//! [`AttributeSource`] for the next value of a given [`AttributeKind`] and
//! treats the answer as opaque text.

pub mod catalog;

pub use catalog::{CatalogSource, DEFAULT_SKILLS};

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of random attribute values the generator draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Display name of a user
    Name,
    /// Employer of a position
    Company,
    /// Job title of a position
    Title,
    University,
    /// Academic degree (e.g. "Master")
    Degree,
    Major,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 6] = [
        AttributeKind::Name,
        AttributeKind::Company,
        AttributeKind::Title,
        AttributeKind::University,
        AttributeKind::Degree,
        AttributeKind::Major,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Name => "name",
            AttributeKind::Company => "company",
            AttributeKind::Title => "title",
            AttributeKind::University => "university",
            AttributeKind::Degree => "degree",
            AttributeKind::Major => "major",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Supplier of random attribute values
///
/// Implementations must draw all randomness from the supplied generator so
/// that a seeded run is reproducible.
pub trait AttributeSource: Send + Sync {
    /// Produce the next value of `kind`
    fn next_value(&self, kind: AttributeKind, rng: &mut StdRng) -> String;
}
