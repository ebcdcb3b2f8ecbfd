//! Lineage Core - Family graph engine
//!
//! This crate provides the core data types and algorithms for the lineage
//! family-relationship service: person records, in-memory family graphs with
//! generation numbering, kin classification and shortest kin-distance search.

pub mod classify;
pub mod distance;
pub mod error;
pub mod graph;
pub mod person;
pub mod relationship;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{Error, Result};
pub use graph::{FamilyGraph, Person};
pub use person::{Gender, NewPerson, PersonId, PersonRecord};
pub use relationship::{RelatedPerson, Relationship, RelationshipEntry};
