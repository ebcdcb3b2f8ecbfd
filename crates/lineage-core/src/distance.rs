//! Shortest kin-distance search
//!
//! Breadth-first search across parent, child and spouse edges, all treated
//! as undirected unit-weight edges within one family graph.

use crate::graph::FamilyGraph;
use crate::person::PersonId;
use std::collections::{HashSet, VecDeque};

impl FamilyGraph {
    /// Fewest kin edges between two members of this graph. Returns `None`
    /// when either id is not a member or no path connects them.
    pub fn kin_distance(&self, from: &PersonId, to: &PersonId) -> Option<u32> {
        if !self.members.contains_key(from) || !self.members.contains_key(to) {
            return None;
        }

        let mut queue: VecDeque<(PersonId, u32)> = VecDeque::new();
        let mut seen: HashSet<PersonId> = HashSet::new();

        queue.push_back((from.clone(), 0));
        seen.insert(from.clone());

        while let Some((current_id, distance)) = queue.pop_front() {
            if current_id == *to {
                tracing::debug!(from = %from, to = %to, distance, "kin distance found");
                return Some(distance);
            }

            let current = &self.members[&current_id];
            for neighbor in current
                .parents
                .iter()
                .chain(current.children.iter())
                .chain(current.spouses.iter())
            {
                if seen.insert(neighbor.clone()) {
                    queue.push_back((neighbor.clone(), distance + 1));
                }
            }
        }

        None
    }
}
