//! Person identity and persistent record types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ulid::Ulid;

/// Unique identifier for a person
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonId(pub Ulid);

impl PersonId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn from_string(s: &str) -> Result<Self> {
        Ulid::from_string(s)
            .map(Self)
            .map_err(|_| Error::InvalidPersonId(s.to_string()))
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Person gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(Error::InvalidPersonGender),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person as persisted: one document per person, with id-valued edge
/// arrays kept with set semantics. Parent/child and spouse edges are
/// symmetric across records; the store maintains that at commit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(rename = "_id")]
    pub id: PersonId,

    pub name: String,

    pub gender: Gender,

    /// Parent references, at most two
    #[serde(default)]
    pub parents: Vec<PersonId>,

    /// Child references
    #[serde(default)]
    pub children: Vec<PersonId>,

    /// Spouse references, derived from shared children
    #[serde(default)]
    pub spouses: Vec<PersonId>,
}

impl PersonRecord {
    /// Create a new record with a freshly minted id and no edges
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            gender,
            parents: Vec::new(),
            children: Vec::new(),
            spouses: Vec::new(),
        }
    }

    /// Add a parent edge; duplicates and self-loops are ignored
    pub fn add_parent(&mut self, id: PersonId) {
        if id != self.id && !self.parents.contains(&id) {
            self.parents.push(id);
        }
    }

    /// Add a child edge; duplicates and self-loops are ignored
    pub fn add_child(&mut self, id: PersonId) {
        if id != self.id && !self.children.contains(&id) {
            self.children.push(id);
        }
    }

    /// Add a spouse edge; duplicates and self-loops are ignored
    pub fn add_spouse(&mut self, id: PersonId) {
        if id != self.id && !self.spouses.contains(&id) {
            self.spouses.push(id);
        }
    }
}

/// Data for creating a new person
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPerson {
    pub name: String,
    pub gender: Gender,
    #[serde(default)]
    pub parents: Vec<PersonId>,
    #[serde(default)]
    pub children: Vec<PersonId>,
}

impl NewPerson {
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            gender,
            parents: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_parent(mut self, id: PersonId) -> Self {
        if !self.parents.contains(&id) {
            self.parents.push(id);
        }
        self
    }

    pub fn with_child(mut self, id: PersonId) -> Self {
        if !self.children.contains(&id) {
            self.children.push(id);
        }
        self
    }

    /// Validate the incoming person against the stored records of its
    /// listed children. A child that already has two parents cannot
    /// receive a third.
    pub fn validate(&self, existing_children: &[PersonRecord]) -> Result<()> {
        if self.name.len() < 2 {
            return Err(Error::InvalidPersonName);
        }

        if self.parents.len() > 2 {
            return Err(Error::TooManyParents);
        }

        for child in existing_children {
            if child.parents.len() >= 2 {
                return Err(Error::TooManyParents);
            }
        }

        Ok(())
    }
}
