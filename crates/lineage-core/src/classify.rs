//! Relationship classification over a family graph
//!
//! Labels are decided by the generation delta between two members plus
//! structural tests on shared parents, children and grandparents. Pairs
//! more than one generation apart are not modeled and stay unlabeled.

use crate::graph::{FamilyGraph, Person};
use crate::person::PersonId;
use crate::relationship::{Relationship, RelationshipEntry};
use std::collections::{HashMap, HashSet, VecDeque};

impl FamilyGraph {
    /// Classify every member pair within one generation of each other.
    ///
    /// Members are walked breadth-first from the subject, neighbors
    /// enqueued parents first, then spouses, then children. When a member
    /// is dequeued, every earlier-visited member one generation away or
    /// level with it receives its label toward the newcomer. The subject,
    /// visited first, therefore ends up with a label for every related
    /// member of its graph.
    pub fn classify(&mut self) {
        let mut queue: VecDeque<PersonId> = VecDeque::new();
        let mut seen: HashSet<PersonId> = HashSet::new();
        let mut by_generation: HashMap<i32, Vec<PersonId>> = HashMap::new();

        queue.push_back(self.subject.clone());
        seen.insert(self.subject.clone());

        while let Some(current_id) = queue.pop_front() {
            let current = self.members[&current_id].clone();

            for neighbor in current
                .parents
                .iter()
                .chain(current.spouses.iter())
                .chain(current.children.iter())
            {
                if seen.insert(neighbor.clone()) {
                    queue.push_back(neighbor.clone());
                }
            }

            let mut labeled: Vec<(PersonId, Relationship)> = Vec::new();
            for delta in [1i32, 0, -1] {
                let Some(bucket) = by_generation.get(&(current.generation - delta)) else {
                    continue;
                };
                for earlier_id in bucket {
                    let earlier = &self.members[earlier_id];
                    if let Some(label) = relation_for_delta(delta, earlier, &current, self) {
                        labeled.push((earlier_id.clone(), label));
                    }
                }
            }

            for (earlier_id, label) in labeled {
                let entry = RelationshipEntry::new(&current, label);
                self.members
                    .get_mut(&earlier_id)
                    .expect("bucket ids are members")
                    .relationships
                    .push(entry);
            }

            by_generation
                .entry(current.generation)
                .or_default()
                .push(current_id);
        }
    }

    /// The direct kin label of `from` toward `to`, when both are members
    /// of this graph and at most one generation apart.
    pub fn relation_between(&self, from: &PersonId, to: &PersonId) -> Option<RelationshipEntry> {
        let x = self.members.get(from)?;
        let y = self.members.get(to)?;

        let delta = y.generation - x.generation;
        let label = relation_for_delta(delta, x, y, self)?;
        Some(RelationshipEntry::new(y, label))
    }
}

/// One row of the classification table. `delta` is `y.generation -
/// x.generation`; the returned label is x's label toward y. First match
/// wins within a row; anything outside the three rows yields nothing.
fn relation_for_delta(
    delta: i32,
    x: &Person,
    y: &Person,
    graph: &FamilyGraph,
) -> Option<Relationship> {
    match delta {
        1 => {
            if is_parent(x, y) {
                Some(Relationship::Parent)
            } else if is_aunt_uncle(x, y, graph) {
                Some(Relationship::AuntUncle)
            } else {
                None
            }
        }
        0 => {
            if x.id == y.id {
                None
            } else if shares_parent(x, y) {
                Some(Relationship::Sibling)
            } else if shares_child(x, y) {
                Some(Relationship::Spouse)
            } else if is_cousin(x, y, graph) {
                Some(Relationship::Cousin)
            } else {
                None
            }
        }
        -1 => {
            if is_child(x, y) {
                Some(Relationship::Child)
            } else if is_nephew(x, y, graph) {
                Some(Relationship::Nephew)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// y is a parent of x
fn is_parent(x: &Person, y: &Person) -> bool {
    x.parents.contains(&y.id)
}

/// y is a child of x
fn is_child(x: &Person, y: &Person) -> bool {
    x.children.contains(&y.id)
}

fn shares_parent(a: &Person, b: &Person) -> bool {
    a.parents.iter().any(|p| b.parents.contains(p))
}

fn shares_child(a: &Person, b: &Person) -> bool {
    a.children.iter().any(|c| b.children.contains(c))
}

/// y is a sibling of one of x's parents
fn is_aunt_uncle(x: &Person, y: &Person, graph: &FamilyGraph) -> bool {
    x.parents
        .iter()
        .filter_map(|p| graph.get(p))
        .any(|parent| shares_parent(parent, y))
}

/// x's parents and y's parents are siblings (a shared grandparent)
fn is_cousin(x: &Person, y: &Person, graph: &FamilyGraph) -> bool {
    x.parents
        .iter()
        .filter_map(|p| graph.get(p))
        .any(|xp| {
            y.parents
                .iter()
                .filter_map(|p| graph.get(p))
                .any(|yp| shares_parent(xp, yp))
        })
}

/// y is a child of one of x's siblings
fn is_nephew(x: &Person, y: &Person, graph: &FamilyGraph) -> bool {
    y.parents
        .iter()
        .filter_map(|p| graph.get(p))
        .any(|yp| shares_parent(yp, x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{family_fixture, Family};
    use Relationship::*;

    fn classified(family: &Family, subject: &'static str) -> FamilyGraph {
        let mut graph = FamilyGraph::from_records(family.id(subject), &family.records).unwrap();
        graph.classify();
        graph
    }

    fn labels_of(graph: &FamilyGraph, family: &Family, name: &'static str) -> Vec<(String, Relationship)> {
        let mut labels: Vec<(String, Relationship)> = graph
            .get(family.id(name))
            .unwrap()
            .relationships
            .iter()
            .map(|entry| (entry.person.name.clone(), entry.relationship))
            .collect();
        labels.sort_by(|a, b| a.0.cmp(&b.0));
        labels
    }

    #[test]
    fn test_subject_sees_whole_close_family() {
        let family = family_fixture();
        let graph = classified(&family, "Vivian");

        assert_eq!(
            labels_of(&graph, &family, "Vivian"),
            vec![
                ("Caio".to_string(), Sibling),
                ("Caio Regis".to_string(), Spouse),
                ("Cauã".to_string(), Child),
                ("Claudia".to_string(), AuntUncle),
                ("Dayse".to_string(), Parent),
                ("Livia".to_string(), Cousin),
                ("Luis".to_string(), Parent),
            ]
        );
    }

    #[test]
    fn test_non_subject_members_labeled_against_later_visits() {
        let family = family_fixture();
        let graph = classified(&family, "Vivian");

        assert_eq!(
            labels_of(&graph, &family, "Luis"),
            vec![
                ("Caio".to_string(), Child),
                ("Claudia".to_string(), Sibling),
                ("Dayse".to_string(), Spouse),
                ("Livia".to_string(), Nephew),
                ("Tunico".to_string(), Parent),
            ]
        );
        assert_eq!(
            labels_of(&graph, &family, "Dayse"),
            vec![("Caio".to_string(), Child)]
        );
        assert_eq!(
            labels_of(&graph, &family, "Tunico"),
            vec![("Claudia".to_string(), Child)]
        );
        assert_eq!(
            labels_of(&graph, &family, "Caio"),
            vec![
                ("Claudia".to_string(), AuntUncle),
                ("Livia".to_string(), Cousin),
            ]
        );
        assert_eq!(
            labels_of(&graph, &family, "Caio Regis"),
            vec![("Cauã".to_string(), Child)]
        );
        assert_eq!(
            labels_of(&graph, &family, "Caua"),
            vec![("Caio".to_string(), AuntUncle)]
        );
        assert_eq!(
            labels_of(&graph, &family, "Claudia"),
            vec![("Livia".to_string(), Child)]
        );
        assert!(labels_of(&graph, &family, "Livia").is_empty());
    }

    #[test]
    fn test_lone_subject_has_no_labels() {
        let family = family_fixture();
        let mut records = std::collections::HashMap::new();
        records.insert(
            family.id("Tunico").clone(),
            family.record("Tunico").clone(),
        );

        // Children records absent from the set: nothing to classify.
        let mut graph = FamilyGraph::from_records(family.id("Tunico"), &records).unwrap();
        graph.classify();
        assert!(graph.subject().relationships.is_empty());
    }

    #[test]
    fn test_directed_relation() {
        let family = family_fixture();
        let graph = classified(&family, "Caio");

        let cousin = graph
            .relation_between(family.id("Caio"), family.id("Livia"))
            .unwrap();
        assert_eq!(cousin.relationship, Cousin);
        assert_eq!(cousin.person.name, "Livia");

        let nephew = graph
            .relation_between(family.id("Caio"), family.id("Caua"))
            .unwrap();
        assert_eq!(nephew.relationship, Nephew);
    }

    #[test]
    fn test_directed_relation_tie_breaks() {
        let family = family_fixture();
        let graph = classified(&family, "Vivian");

        // Row order: parent beats aunt/uncle, sibling beats cousin.
        assert_eq!(
            graph
                .relation_between(family.id("Vivian"), family.id("Luis"))
                .unwrap()
                .relationship,
            Parent
        );
        assert_eq!(
            graph
                .relation_between(family.id("Vivian"), family.id("Caio"))
                .unwrap()
                .relationship,
            Sibling
        );
        assert_eq!(
            graph
                .relation_between(family.id("Vivian"), family.id("Claudia"))
                .unwrap()
                .relationship,
            AuntUncle
        );
        assert_eq!(
            graph
                .relation_between(family.id("Dayse"), family.id("Luis"))
                .unwrap()
                .relationship,
            Spouse
        );
    }

    #[test]
    fn test_directed_relation_outside_modeled_range() {
        let family = family_fixture();
        let graph = classified(&family, "Vivian");

        // Two generations apart: not modeled.
        assert!(graph
            .relation_between(family.id("Tunico"), family.id("Vivian"))
            .is_none());
        assert!(graph
            .relation_between(family.id("Caua"), family.id("Tunico"))
            .is_none());
        // Unknown member.
        assert!(graph
            .relation_between(family.id("Vivian"), &PersonId::new())
            .is_none());
        // Self.
        assert!(graph
            .relation_between(family.id("Vivian"), family.id("Vivian"))
            .is_none());
    }

    #[test]
    fn test_labels_stable_under_record_reordering() {
        // HashMap iteration order varies run to run; the classifier must
        // not depend on it. Build the same graph twice and compare label
        // sets for every member.
        let family = family_fixture();
        let first = classified(&family, "Vivian");
        let second = classified(&family, "Vivian");

        for (id, person) in &first.members {
            let mut a: Vec<_> = person
                .relationships
                .iter()
                .map(|e| (e.person.id.clone(), e.relationship))
                .collect();
            let mut b: Vec<_> = second.members[id]
                .relationships
                .iter()
                .map(|e| (e.person.id.clone(), e.relationship))
                .collect();
            a.sort_by(|l, r| l.0 .0.cmp(&r.0 .0));
            b.sort_by(|l, r| l.0 .0.cmp(&r.0 .0));
            assert_eq!(a, b);
        }
    }
}
