//! In-memory storage backend for testing

use crate::error::{StorageError, StorageResult};
use crate::traits::{EdgeField, PersonStore, RecordClosure, RelativeRecord};
use async_trait::async_trait;
use lineage_core::{PersonId, PersonRecord};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// In-memory storage backend
///
/// Useful for tests. A single write guard covers the whole of
/// `store_person`, so writes are atomic with respect to readers.
pub struct MemoryStore {
    records: RwLock<HashMap<PersonId, PersonRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_err<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Database(format!("lock error: {e}"))
}

#[async_trait]
impl PersonStore for MemoryStore {
    async fn initialize(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<bool> {
        Ok(true)
    }

    async fn fetch_closure(
        &self,
        ids: &[PersonId],
        via: EdgeField,
        max_depth: Option<u32>,
    ) -> StorageResult<Vec<RecordClosure>> {
        let records = self.records.read().map_err(lock_err)?;

        let mut closures = Vec::new();
        for seed in ids {
            let Some(root) = records.get(seed).cloned() else {
                continue;
            };

            let mut relatives: Vec<RelativeRecord> = Vec::new();
            let mut seen: HashSet<PersonId> = HashSet::from([root.id.clone()]);
            let mut frontier: Vec<PersonId> = via.of(&root).to_vec();
            let mut depth = 0u32;

            while !frontier.is_empty() {
                if max_depth.is_some_and(|bound| depth > bound) {
                    break;
                }

                frontier.retain(|id| seen.insert(id.clone()));
                let mut next: Vec<PersonId> = Vec::new();
                for id in &frontier {
                    let Some(record) = records.get(id).cloned() else {
                        continue;
                    };
                    next.extend(
                        via.of(&record)
                            .iter()
                            .filter(|other| !seen.contains(*other))
                            .cloned(),
                    );
                    relatives.push(RelativeRecord { record, depth });
                }

                frontier = next;
                depth += 1;
            }

            closures.push(RecordClosure { root, relatives });
        }

        Ok(closures)
    }

    async fn fetch_by_ids(&self, ids: &[PersonId]) -> StorageResult<Vec<PersonRecord>> {
        let records = self.records.read().map_err(lock_err)?;
        Ok(ids.iter().filter_map(|id| records.get(id).cloned()).collect())
    }

    async fn fetch_by_child_ids(
        &self,
        child_ids: &[PersonId],
    ) -> StorageResult<Vec<PersonRecord>> {
        let records = self.records.read().map_err(lock_err)?;
        Ok(records
            .values()
            .filter(|r| r.children.iter().any(|c| child_ids.contains(c)))
            .cloned()
            .collect())
    }

    async fn store_person(
        &self,
        record: &PersonRecord,
        parent_spouses: &[(PersonId, PersonId)],
    ) -> StorageResult<()> {
        let mut records = self.records.write().map_err(lock_err)?;

        if records.contains_key(&record.id) {
            return Err(StorageError::DuplicatePerson(record.id.to_string()));
        }
        records.insert(record.id.clone(), record.clone());

        for parent_id in &record.parents {
            if let Some(parent) = records.get_mut(parent_id) {
                parent.add_child(record.id.clone());
            }
        }

        for (a, b) in parent_spouses {
            if let Some(person) = records.get_mut(a) {
                person.add_spouse(b.clone());
            }
            if let Some(person) = records.get_mut(b) {
                person.add_spouse(a.clone());
            }
        }

        for child_id in &record.children {
            if let Some(child) = records.get_mut(child_id) {
                child.add_parent(record.id.clone());
            }
        }

        for spouse_id in &record.spouses {
            if let Some(spouse) = records.get_mut(spouse_id) {
                spouse.add_spouse(record.id.clone());
            }
        }

        Ok(())
    }
}
