//! SQLite storage backend
//!
//! One row per person: the full document lives in a JSON `data` column and
//! the id is the only indexed key. Closure walks run as batched frontier
//! queries over the embedded edge arrays.

use crate::error::{StorageError, StorageResult};
use crate::traits::{EdgeField, PersonStore, RecordClosure, RelativeRecord};
use async_trait::async_trait;
use lineage_core::{PersonId, PersonRecord};
use rusqlite::{params, params_from_iter, Connection};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite storage backend
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let conn =
            Connection::open(path).map_err(|e| StorageError::Connection(e.to_string()))?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_tables()?;

        Ok(store)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> StorageResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| StorageError::Connection(e.to_string()))?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_tables()?;

        Ok(store)
    }

    fn init_tables(&self) -> StorageResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS persons (
                id TEXT PRIMARY KEY,
                data TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Database(format!("lock error: {e}")))
    }
}

fn load_records(conn: &Connection, ids: &[PersonId]) -> StorageResult<Vec<PersonRecord>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let mut stmt = conn.prepare(&format!(
        "SELECT data FROM persons WHERE id IN ({placeholders})"
    ))?;

    let rows = stmt.query_map(
        params_from_iter(ids.iter().map(|id| id.to_string())),
        |row| row.get::<_, String>(0),
    )?;

    let mut records = Vec::new();
    for row in rows {
        let record: PersonRecord = serde_json::from_str(&row?)?;
        records.push(record);
    }

    Ok(records)
}

fn write_record(conn: &Connection, record: &PersonRecord) -> StorageResult<()> {
    let data = serde_json::to_string(record)?;
    conn.execute(
        "UPDATE persons SET data = ?2 WHERE id = ?1",
        params![record.id.to_string(), data],
    )?;
    Ok(())
}

/// Apply a set mutation to each listed record. Ids with no stored record
/// are skipped, matching update-by-id semantics.
fn modify_records(
    conn: &Connection,
    ids: &[PersonId],
    mutate: impl Fn(&mut PersonRecord),
) -> StorageResult<()> {
    for record in &mut load_records(conn, ids)? {
        mutate(record);
        write_record(conn, record)?;
    }
    Ok(())
}

#[async_trait]
impl PersonStore for SqliteStore {
    async fn initialize(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<bool> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(true)
    }

    async fn fetch_closure(
        &self,
        ids: &[PersonId],
        via: EdgeField,
        max_depth: Option<u32>,
    ) -> StorageResult<Vec<RecordClosure>> {
        let conn = self.lock()?;

        let mut closures = Vec::new();
        for root in load_records(&conn, ids)? {
            let mut relatives: Vec<RelativeRecord> = Vec::new();
            let mut seen: HashSet<PersonId> = HashSet::from([root.id.clone()]);
            let mut frontier: Vec<PersonId> = via
                .of(&root)
                .iter()
                .filter(|id| !seen.contains(*id))
                .cloned()
                .collect();
            let mut depth = 0u32;

            while !frontier.is_empty() {
                if max_depth.is_some_and(|bound| depth > bound) {
                    break;
                }

                frontier.retain(|id| seen.insert(id.clone()));
                let mut next: Vec<PersonId> = Vec::new();
                for record in load_records(&conn, &frontier)? {
                    next.extend(
                        via.of(&record)
                            .iter()
                            .filter(|id| !seen.contains(*id))
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
        let conn = self.lock()?;
        load_records(&conn, ids)
    }

    async fn fetch_by_child_ids(
        &self,
        child_ids: &[PersonId],
    ) -> StorageResult<Vec<PersonRecord>> {
        if child_ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.lock()?;
        let placeholders = vec!["?"; child_ids.len()].join(", ");
        let mut stmt = conn.prepare(&format!(
            "SELECT DISTINCT p.data FROM persons p, json_each(p.data, '$.children') je \
             WHERE je.value IN ({placeholders})"
        ))?;

        let rows = stmt.query_map(
            params_from_iter(child_ids.iter().map(|id| id.to_string())),
            |row| row.get::<_, String>(0),
        )?;

        let mut records = Vec::new();
        for row in rows {
            let record: PersonRecord = serde_json::from_str(&row?)?;
            records.push(record);
        }

        Ok(records)
    }

    async fn store_person(
        &self,
        record: &PersonRecord,
        parent_spouses: &[(PersonId, PersonId)],
    ) -> StorageResult<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let data = serde_json::to_string(record)?;
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO persons (id, data) VALUES (?1, ?2)",
            params![record.id.to_string(), data],
        )?;
        if inserted == 0 {
            return Err(StorageError::DuplicatePerson(record.id.to_string()));
        }

        let new_id = record.id.clone();
        modify_records(&tx, &record.parents, |parent| {
            parent.add_child(new_id.clone())
        })?;

        for (a, b) in parent_spouses {
            modify_records(&tx, std::slice::from_ref(a), |person| {
                person.add_spouse(b.clone())
            })?;
            modify_records(&tx, std::slice::from_ref(b), |person| {
                person.add_spouse(a.clone())
            })?;
        }

        modify_records(&tx, &record.children, |child| {
            child.add_parent(new_id.clone())
        })?;

        modify_records(&tx, &record.spouses, |spouse| {
            spouse.add_spouse(new_id.clone())
        })?;

        tx.commit()?;

        tracing::debug!(id = %record.id, name = %record.name, "stored person");

        Ok(())
    }
}
