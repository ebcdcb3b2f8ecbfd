//! Error types for Lineage Core

use thiserror::Error;

/// Result type alias using Lineage's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Lineage error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("person with id {0} not found")]
    PersonNotFound(String),

    #[error("persons do not belong to each other's graph")]
    PersonNotFoundInGraph,

    #[error("name must have more than 1 character")]
    InvalidPersonName,

    #[error("gender has to be male or female")]
    InvalidPersonGender,

    #[error("person cannot have more than two parents")]
    TooManyParents,

    #[error("invalid person id: {0}")]
    InvalidPersonId(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}
