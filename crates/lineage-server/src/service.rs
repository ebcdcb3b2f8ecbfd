//! Person use cases: insertion with edge reconciliation and the three
//! graph queries

use lineage_core::{
    Error, FamilyGraph, NewPerson, PersonId, PersonRecord, RelatedPerson, RelationshipEntry,
    Result,
};
use lineage_storage::PersonStore;
use std::collections::HashMap;
use std::sync::Arc;

/// Application orchestrator wiring validation, spouse derivation and the
/// bounded-subgraph queries over a storage backend. Stateless across
/// requests; every query works on a freshly fetched record set.
pub struct PersonService<S> {
    store: Arc<S>,
}

impl<S: PersonStore> PersonService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate and persist a new person together with its derived edges.
    ///
    /// Children listed on the request are matched against stored records;
    /// a child that already has two parents rejects the insert. For each
    /// child with exactly one known parent, that co-parent becomes a
    /// spouse of the incoming person. Returns the stored record plus the
    /// records of every directly referenced relative, for response
    /// assembly.
    pub async fn store(
        &self,
        new_person: NewPerson,
    ) -> Result<(PersonRecord, HashMap<PersonId, PersonRecord>)> {
        let child_records = if new_person.children.is_empty() {
            Vec::new()
        } else {
            self.store.fetch_by_ids(&new_person.children).await?
        };

        new_person.validate(&child_records)?;

        let mut spouses: Vec<PersonId> = Vec::new();
        if !child_records.is_empty() {
            let co_parents = self.store.fetch_by_child_ids(&new_person.children).await?;
            for child in &child_records {
                if let [sole_parent] = child.parents.as_slice() {
                    if co_parents.iter().any(|p| p.id == *sole_parent)
                        && !spouses.contains(sole_parent)
                    {
                        spouses.push(sole_parent.clone());
                    }
                }
            }
        }

        let mut record = PersonRecord::new(new_person.name.clone(), new_person.gender);
        for parent in &new_person.parents {
            record.add_parent(parent.clone());
        }
        // Only children that exist in the store are linked.
        for child in &child_records {
            record.add_child(child.id.clone());
        }
        for spouse in &spouses {
            record.add_spouse(spouse.clone());
        }

        let parent_spouses: Vec<(PersonId, PersonId)> = match record.parents.as_slice() {
            [father, mother] => vec![(father.clone(), mother.clone())],
            _ => Vec::new(),
        };

        self.store.store_person(&record, &parent_spouses).await?;

        tracing::info!(id = %record.id, name = %record.name, "person stored");

        let related_ids: Vec<PersonId> = record
            .parents
            .iter()
            .chain(record.children.iter())
            .chain(record.spouses.iter())
            .cloned()
            .collect();
        let related = self
            .store
            .fetch_by_ids(&related_ids)
            .await?
            .into_iter()
            .map(|r| (r.id.clone(), r))
            .collect();

        Ok((record, related))
    }

    /// The subject's family graph with every member pair classified
    pub async fn family_graph(&self, id: &PersonId) -> Result<FamilyGraph> {
        let mut graph = self.subject_graph(id).await?;
        graph.classify();
        Ok(graph)
    }

    /// Fewest kin edges between two persons. Each subject only fetches a
    /// bounded neighborhood, so a miss in the first subgraph retries from
    /// the second id before giving up.
    pub async fn bacon_number(&self, a: &PersonId, b: &PersonId) -> Result<u32> {
        match self.bacon_in_graph(a, b).await {
            Err(Error::PersonNotFoundInGraph) => self.bacon_in_graph(b, a).await,
            other => other,
        }
    }

    /// The direct kin label between two persons, with the same
    /// two-subgraph retry as [`Self::bacon_number`]. The returned subject
    /// is the person whose graph answered the query.
    pub async fn relationship(
        &self,
        a: &PersonId,
        b: &PersonId,
    ) -> Result<(RelatedPerson, RelationshipEntry)> {
        match self.relation_in_graph(a, b).await {
            Err(Error::PersonNotFoundInGraph) => self.relation_in_graph(b, a).await,
            other => other,
        }
    }

    async fn subject_graph(&self, id: &PersonId) -> Result<FamilyGraph> {
        let records = self
            .store
            .fetch_family_records(id)
            .await?
            .ok_or_else(|| Error::PersonNotFound(id.to_string()))?;

        FamilyGraph::from_records(id, &records)
            .ok_or_else(|| Error::PersonNotFound(id.to_string()))
    }

    async fn bacon_in_graph(&self, subject: &PersonId, target: &PersonId) -> Result<u32> {
        let graph = self.subject_graph(subject).await?;
        graph
            .kin_distance(subject, target)
            .ok_or(Error::PersonNotFoundInGraph)
    }

    async fn relation_in_graph(
        &self,
        subject: &PersonId,
        target: &PersonId,
    ) -> Result<(RelatedPerson, RelationshipEntry)> {
        let graph = self.subject_graph(subject).await?;
        let entry = graph
            .relation_between(subject, target)
            .ok_or(Error::PersonNotFoundInGraph)?;

        let person = graph
            .get(subject)
            .map(RelatedPerson::from)
            .ok_or(Error::PersonNotFoundInGraph)?;

        Ok((person, entry))
    }
}
