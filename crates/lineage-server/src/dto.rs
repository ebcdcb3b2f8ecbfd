//! Request and response shapes for the HTTP surface

use lineage_core::{
    FamilyGraph, Gender, NewPerson, PersonId, PersonRecord, RelatedPerson, RelationshipEntry,
    Result,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of `POST /person`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePersonRequest {
    pub name: String,
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_id: Option<String>,
    #[serde(default)]
    pub children_ids: Vec<String>,
}

impl StorePersonRequest {
    /// Decode the request into a validated-typed new person. Gender and
    /// id parsing failures surface as domain errors so the envelope
    /// mapping stays in one place.
    pub fn into_new_person(self) -> Result<NewPerson> {
        let gender: Gender = self.gender.parse()?;
        let mut person = NewPerson::new(self.name, gender);

        if let Some(father_id) = &self.father_id {
            person = person.with_parent(PersonId::from_string(father_id)?);
        }
        if let Some(mother_id) = &self.mother_id {
            person = person.with_parent(PersonId::from_string(mother_id)?);
        }
        for child_id in &self.children_ids {
            person = person.with_child(PersonId::from_string(child_id)?);
        }

        Ok(person)
    }
}

/// `POST /person` success body: the stored person with each referenced
/// relative reduced to id, name and gender
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonResponse {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub parents: Vec<RelatedPerson>,
    pub children: Vec<RelatedPerson>,
    pub spouses: Vec<RelatedPerson>,
}

impl PersonResponse {
    pub fn from_parts(
        record: &PersonRecord,
        related: &HashMap<PersonId, PersonRecord>,
    ) -> Self {
        let summaries = |ids: &[PersonId]| -> Vec<RelatedPerson> {
            ids.iter()
                .filter_map(|id| related.get(id))
                .map(|r| RelatedPerson {
                    id: r.id.clone(),
                    name: r.name.clone(),
                    gender: r.gender,
                })
                .collect()
        };

        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            gender: record.gender,
            parents: summaries(&record.parents),
            children: summaries(&record.children),
            spouses: summaries(&record.spouses),
        }
    }
}

/// One member of a family tree response, with its classified labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonWithRelationship {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub relationships: Vec<RelationshipEntry>,
}

/// `GET /person/{id}/tree` success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonTreeResponse {
    pub members: HashMap<String, PersonWithRelationship>,
}

impl PersonTreeResponse {
    pub fn from_graph(graph: &FamilyGraph) -> Self {
        let members = graph
            .members
            .values()
            .map(|person| {
                (
                    person.id.to_string(),
                    PersonWithRelationship {
                        id: person.id.to_string(),
                        name: person.name.clone(),
                        gender: person.gender,
                        relationships: person.relationships.clone(),
                    },
                )
            })
            .collect();

        Self { members }
    }
}

impl PersonWithRelationship {
    pub fn from_relation(person: &RelatedPerson, entry: RelationshipEntry) -> Self {
        Self {
            id: person.id.to_string(),
            name: person.name.clone(),
            gender: person.gender,
            relationships: vec![entry],
        }
    }
}

/// `GET /person/{id}/baconNumber/{id2}` success body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaconsNumberResponse {
    pub bacons_number: u32,
}
