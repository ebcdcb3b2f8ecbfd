//! Kin relationship labels

use crate::graph::Person;
use crate::person::{Gender, PersonId};
use serde::{Deserialize, Serialize};

/// The closed set of kin labels this system models.
///
/// Each label describes what the related person is to the subject of the
/// entry: `Parent` means "that person is my parent".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relationship {
    #[serde(rename = "parent")]
    Parent,
    #[serde(rename = "child")]
    Child,
    #[serde(rename = "sibling")]
    Sibling,
    #[serde(rename = "spouse")]
    Spouse,
    #[serde(rename = "aunt/uncle")]
    AuntUncle,
    #[serde(rename = "nephew")]
    Nephew,
    #[serde(rename = "cousin")]
    Cousin,
}

impl Relationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Parent => "parent",
            Relationship::Child => "child",
            Relationship::Sibling => "sibling",
            Relationship::Spouse => "spouse",
            Relationship::AuntUncle => "aunt/uncle",
            Relationship::Nephew => "nephew",
            Relationship::Cousin => "cousin",
        }
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifying slice of a person carried inside a relationship entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedPerson {
    pub id: PersonId,
    pub name: String,
    pub gender: Gender,
}

impl From<&Person> for RelatedPerson {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id.clone(),
            name: person.name.clone(),
            gender: person.gender,
        }
    }
}

/// A classified relationship toward another member of the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipEntry {
    pub person: RelatedPerson,
    pub relationship: Relationship,
}

impl RelationshipEntry {
    pub fn new(person: &Person, relationship: Relationship) -> Self {
        Self {
            person: RelatedPerson::from(person),
            relationship,
        }
    }
}
