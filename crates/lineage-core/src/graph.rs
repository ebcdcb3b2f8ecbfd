//! In-memory family graph construction with generation numbering

use crate::person::{Gender, PersonId, PersonRecord};
use crate::relationship::RelationshipEntry;
use std::collections::HashMap;

/// A member of a [`FamilyGraph`].
///
/// Edge vectors hold ids of other members of the same graph; the graph's
/// member map is the single owner of nodes, so back-references
/// (parent/child, spouse/spouse) never form owning cycles.
#[derive(Debug, Clone)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub gender: Gender,
    pub parents: Vec<PersonId>,
    pub children: Vec<PersonId>,
    pub spouses: Vec<PersonId>,

    /// Ancestry depth relative to the subject: 0 at the subject, +1 per
    /// step up, -1 per step down. Assigned once, on first visit.
    pub generation: i32,

    /// Classified labels toward other members, filled by the classifier
    pub relationships: Vec<RelationshipEntry>,
}

/// A bounded family subgraph built around one subject
#[derive(Debug, Clone)]
pub struct FamilyGraph {
    pub subject: PersonId,
    pub members: HashMap<PersonId, Person>,
}

impl FamilyGraph {
    /// Build the graph from a de-duplicated record set, starting at the
    /// subject with generation 0. Ids not present in the record set lie
    /// outside the fetched neighborhood and are skipped. Returns `None`
    /// when the subject itself is not in the set.
    pub fn from_records(
        subject: &PersonId,
        records: &HashMap<PersonId, PersonRecord>,
    ) -> Option<Self> {
        if !records.contains_key(subject) {
            return None;
        }

        let mut members = HashMap::with_capacity(records.len());
        visit(subject, 0, records, &mut members);

        tracing::debug!(
            subject = %subject,
            members = members.len(),
            "built family graph"
        );

        Some(Self {
            subject: subject.clone(),
            members,
        })
    }

    pub fn subject(&self) -> &Person {
        // The builder always materializes the subject node.
        &self.members[&self.subject]
    }

    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.members.get(id)
    }
}

/// Recursive descent over the record set. The first generation assignment
/// wins; revisits terminate on the member map check. While descending into
/// a child both of whose parents are already materialized, those parents
/// are linked as spouses, which covers couples whose spouse edge was never
/// persisted.
fn visit(
    id: &PersonId,
    generation: i32,
    records: &HashMap<PersonId, PersonRecord>,
    members: &mut HashMap<PersonId, Person>,
) {
    if members.contains_key(id) {
        return;
    }

    let record = &records[id];
    let in_set = |edge: &[PersonId]| -> Vec<PersonId> {
        edge.iter()
            .filter(|other| *other != id && records.contains_key(*other))
            .cloned()
            .collect()
    };

    members.insert(
        id.clone(),
        Person {
            id: record.id.clone(),
            name: record.name.clone(),
            gender: record.gender,
            parents: in_set(&record.parents),
            children: in_set(&record.children),
            spouses: in_set(&record.spouses),
            generation,
            relationships: Vec::new(),
        },
    );

    for parent_id in &record.parents {
        if records.contains_key(parent_id) {
            visit(parent_id, generation + 1, records, members);
        }
    }

    for child_id in &record.children {
        let Some(child_record) = records.get(child_id) else {
            continue;
        };

        if child_record.parents.len() == 2 {
            link_spouses(&child_record.parents[0], &child_record.parents[1], members);
        }

        visit(child_id, generation - 1, records, members);
    }

    for spouse_id in &record.spouses {
        if records.contains_key(spouse_id) {
            visit(spouse_id, generation, records, members);
        }
    }
}

/// Record a symmetric spouse edge between two already-visited members
fn link_spouses(a: &PersonId, b: &PersonId, members: &mut HashMap<PersonId, Person>) {
    if a == b || !members.contains_key(a) || !members.contains_key(b) {
        return;
    }

    if let Some(first) = members.get_mut(a) {
        if !first.spouses.contains(b) {
            first.spouses.push(b.clone());
        }
    }
    if let Some(second) = members.get_mut(b) {
        if !second.spouses.contains(a) {
            second.spouses.push(a.clone());
        }
    }
}
