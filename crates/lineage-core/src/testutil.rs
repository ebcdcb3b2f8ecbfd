//! Shared test fixture: the nine-person family used across modules.
//!
//! Tunico is father of Luis and Claudia; Luis and Dayse are parents of
//! Caio and Vivian; Claudia is mother of Livia; Vivian and Caio Regis are
//! parents of Cauã. Spouse arrays are left unset so graph construction has
//! to derive the couples from shared children.

use crate::person::{Gender, PersonId, PersonRecord};
use std::collections::HashMap;

pub struct Family {
    pub records: HashMap<PersonId, PersonRecord>,
    ids: HashMap<&'static str, PersonId>,
}

impl Family {
    pub fn id(&self, name: &'static str) -> &PersonId {
        &self.ids[name]
    }

    pub fn record(&self, name: &'static str) -> &PersonRecord {
        &self.records[self.id(name)]
    }
}

pub fn family_fixture() -> Family {
    let mut ids: HashMap<&'static str, PersonId> = HashMap::new();
    let mut records: HashMap<PersonId, PersonRecord> = HashMap::new();

    let people: [(&'static str, &str, Gender); 9] = [
        ("Tunico", "Tunico", Gender::Male),
        ("Luis", "Luis", Gender::Male),
        ("Dayse", "Dayse", Gender::Female),
        ("Claudia", "Claudia", Gender::Female),
        ("Caio", "Caio", Gender::Male),
        ("Vivian", "Vivian", Gender::Female),
        ("Livia", "Livia", Gender::Female),
        ("Caio Regis", "Caio Regis", Gender::Male),
        ("Caua", "Cauã", Gender::Male),
    ];

    for (key, name, gender) in people {
        let record = PersonRecord::new(name, gender);
        ids.insert(key, record.id.clone());
        records.insert(record.id.clone(), record);
    }

    let parent_child: [(&'static str, &'static str); 7] = [
        ("Tunico", "Luis"),
        ("Tunico", "Claudia"),
        ("Luis", "Caio"),
        ("Dayse", "Caio"),
        ("Luis", "Vivian"),
        ("Dayse", "Vivian"),
        ("Claudia", "Livia"),
    ];

    for (parent, child) in parent_child {
        link(&mut records, &ids, parent, child);
    }
    link(&mut records, &ids, "Vivian", "Caua");
    link(&mut records, &ids, "Caio Regis", "Caua");

    Family { records, ids }
}

fn link(
    records: &mut HashMap<PersonId, PersonRecord>,
    ids: &HashMap<&'static str, PersonId>,
    parent: &'static str,
    child: &'static str,
) {
    let parent_id = ids[parent].clone();
    let child_id = ids[child].clone();

    records
        .get_mut(&parent_id)
        .unwrap()
        .add_child(child_id.clone());
    records.get_mut(&child_id).unwrap().add_parent(parent_id);
}
