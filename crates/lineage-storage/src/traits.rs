//! Storage backend trait definition

use crate::error::StorageResult;
use async_trait::async_trait;
use lineage_core::{PersonId, PersonRecord};
use std::collections::HashMap;

/// Which id-valued edge array a closure walk follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeField {
    Parents,
    Children,
}

impl EdgeField {
    pub fn of<'a>(&self, record: &'a PersonRecord) -> &'a [PersonId] {
        match self {
            EdgeField::Parents => &record.parents,
            EdgeField::Children => &record.children,
        }
    }
}

/// A record reached by a closure walk, with its traversal depth
/// (0 = reached in one step from the seed)
#[derive(Debug, Clone)]
pub struct RelativeRecord {
    pub record: PersonRecord,
    pub depth: u32,
}

/// A seed record together with everything reachable from it along one
/// edge field
#[derive(Debug, Clone)]
pub struct RecordClosure {
    pub root: PersonRecord,
    pub relatives: Vec<RelativeRecord>,
}

/// Trait for person storage backends
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Initialize the storage (create tables, etc.)
    async fn initialize(&self) -> StorageResult<()>;

    /// Health check
    async fn health_check(&self) -> StorageResult<bool>;

    /// For each seed id present in the store, return its record plus the
    /// transitive closure reachable by repeatedly following `via`. Each
    /// related record carries its depth; `max_depth` bounds the walk
    /// inclusively, `None` walks to the ends of the graph. Seeds absent
    /// from the store are skipped.
    async fn fetch_closure(
        &self,
        ids: &[PersonId],
        via: EdgeField,
        max_depth: Option<u32>,
    ) -> StorageResult<Vec<RecordClosure>>;

    /// Bare records for a set of ids; missing ids are skipped
    async fn fetch_by_ids(&self, ids: &[PersonId]) -> StorageResult<Vec<PersonRecord>>;

    /// Records whose `children` array intersects the given ids
    async fn fetch_by_child_ids(&self, child_ids: &[PersonId])
        -> StorageResult<Vec<PersonRecord>>;

    /// Persist a new person and reconcile every affected record in one
    /// atomic unit: the new document is written; each listed parent gains
    /// the new id as a child; each `parent_spouses` pair is linked
    /// symmetrically; each listed child gains the new id as a parent; each
    /// listed spouse gains the new id as a spouse. All set insertions are
    /// idempotent. On any sub-step failure nothing is persisted.
    async fn store_person(
        &self,
        record: &PersonRecord,
        parent_spouses: &[(PersonId, PersonId)],
    ) -> StorageResult<()>;

    /// Materialize the analyzable neighborhood of one subject as a record
    /// set keyed by id, or `None` when the subject is unknown.
    ///
    /// Three walks feed the set: the full ancestry closure of the subject;
    /// a one-step children walk from every ancestor at depth <= 1, so that
    /// siblings, aunts and uncles, cousins and nephews appear (when the
    /// subject has no ancestors the children walk starts at the subject
    /// itself); and a direct fetch of anyone co-parenting a child of the
    /// subject, which surfaces spouses with no persisted spouse edge. The
    /// first record fetched for an id wins.
    async fn fetch_family_records(
        &self,
        subject: &PersonId,
    ) -> StorageResult<Option<HashMap<PersonId, PersonRecord>>> {
        let mut closures = self
            .fetch_closure(std::slice::from_ref(subject), EdgeField::Parents, None)
            .await?;
        if closures.is_empty() {
            return Ok(None);
        }
        let ancestry = closures.remove(0);

        let mut records: HashMap<PersonId, PersonRecord> = HashMap::new();
        records.insert(ancestry.root.id.clone(), ancestry.root.clone());
        for relative in &ancestry.relatives {
            records
                .entry(relative.record.id.clone())
                .or_insert_with(|| relative.record.clone());
        }

        let near_ancestors: Vec<PersonId> = ancestry
            .relatives
            .iter()
            .filter(|r| r.depth <= 1)
            .map(|r| r.record.id.clone())
            .collect();

        let descent = if near_ancestors.is_empty() {
            // No known ancestors: walk one step down from the subject so
            // its own descendants still appear.
            self.fetch_closure(std::slice::from_ref(subject), EdgeField::Children, Some(0))
                .await?
        } else {
            self.fetch_closure(&near_ancestors, EdgeField::Children, Some(1))
                .await?
        };

        for closure in descent {
            for relative in closure.relatives {
                records
                    .entry(relative.record.id.clone())
                    .or_insert(relative.record);
            }
        }

        if !ancestry.root.children.is_empty() {
            for co_parent in self.fetch_by_child_ids(&ancestry.root.children).await? {
                if co_parent.id != *subject {
                    records.entry(co_parent.id.clone()).or_insert(co_parent);
                }
            }
        }

        tracing::debug!(subject = %subject, records = records.len(), "fetched family records");

        Ok(Some(records))
    }
}
