//! Family subgraph builder.
//!
//! Materializes the connected subgraph around a root record by walking both
//! directions at once: parent pointers upward and child records downward.
//! The walk is an explicit stack worklist with an owned visited set, so a
//! circular parent chain can waste at most one visit per record and can
//! never loop.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::components::{FowlId, FowlSnapshot};
use crate::error::{GenealogyError, Result};
use crate::registry::FowlSource;

/// Default traversal budget, hops from the root in either direction.
pub const DEFAULT_MAX_DEPTH: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParentKind {
    Paternal,
    Maternal,
}

/// Directed parent -> child relationship, derived from the child's lineage
/// pointers. `verified` mirrors the child's lineage-verified flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentEdge {
    pub parent: FowlId,
    pub child: FowlId,
    pub kind: ParentKind,
    pub verified: bool,
}

/// Flat result of a subgraph load. Node order is visitation order and is not
/// contractually meaningful to callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FamilySubgraph {
    pub nodes: Vec<FowlSnapshot>,
    pub edges: Vec<ParentEdge>,
}

impl FamilySubgraph {
    pub fn contains(&self, id: FowlId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }
}

/// Load every record reachable from `root` within `max_depth` hops via
/// parent-or-child edges. Fails with [`GenealogyError::RootNotFound`] when
/// the root is absent from the source.
pub fn load_family_subgraph(
    source: &impl FowlSource,
    root: FowlId,
    max_depth: u32,
) -> Result<FamilySubgraph> {
    let root_record = source
        .fowl_by_id(root)
        .ok_or(GenealogyError::RootNotFound(root))?;

    let mut visited: HashSet<FowlId> = HashSet::new();
    let mut nodes: Vec<FowlSnapshot> = Vec::new();
    // (record, remaining hop budget)
    let mut worklist: Vec<(FowlSnapshot, u32)> = vec![(root_record, max_depth)];

    while let Some((record, budget)) = worklist.pop() {
        if !visited.insert(record.id) {
            continue;
        }
        let id = record.id;
        let lineage = record.lineage();
        nodes.push(record);

        if budget == 0 {
            continue;
        }
        for parent_id in lineage.parents() {
            if !visited.contains(&parent_id) {
                if let Some(parent) = source.fowl_by_id(parent_id) {
                    worklist.push((parent, budget - 1));
                }
            }
        }
        for child in source.children_of(id) {
            if !visited.contains(&child.id) {
                worklist.push((child, budget - 1));
            }
        }
    }

    let edges = derive_edges(&nodes, &visited);
    debug!(
        root = root.0,
        nodes = nodes.len(),
        edges = edges.len(),
        "family subgraph loaded"
    );
    Ok(FamilySubgraph { nodes, edges })
}

/// One edge per parent pointer whose endpoint landed inside the subgraph.
pub(crate) fn derive_edges(nodes: &[FowlSnapshot], members: &HashSet<FowlId>) -> Vec<ParentEdge> {
    let mut edges = Vec::new();
    for child in nodes {
        if let Some(father) = child.father {
            if members.contains(&father) {
                edges.push(ParentEdge {
                    parent: father,
                    child: child.id,
                    kind: ParentKind::Paternal,
                    verified: child.lineage_verified,
                });
            }
        }
        if let Some(mother) = child.mother {
            if members.contains(&mother) {
                edges.push(ParentEdge {
                    parent: mother,
                    child: child.id,
                    kind: ParentKind::Maternal,
                    verified: child.lineage_verified,
                });
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genealogy::test_pool::{fowl, PoolSource};

    fn ids(graph: &FamilySubgraph) -> Vec<u64> {
        let mut out: Vec<u64> = graph.nodes.iter().map(|n| n.id.0).collect();
        out.sort_unstable();
        out
    }

    #[test]
    fn test_three_generation_pedigree() {
        // A (no parents), B (father=A), C (father=B)
        let source = PoolSource::new(vec![
            fowl(1, None, None),
            fowl(2, Some(1), None),
            fowl(3, Some(2), None),
        ]);

        let graph = load_family_subgraph(&source, FowlId(3), DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(ids(&graph), vec![1, 2, 3]);

        // Two paternal edges: A->B, B->C
        assert_eq!(graph.edges.len(), 2);
        assert!(graph
            .edges
            .iter()
            .all(|e| e.kind == ParentKind::Paternal));
    }

    #[test]
    fn test_root_not_found() {
        let source = PoolSource::new(vec![fowl(1, None, None)]);
        let err = load_family_subgraph(&source, FowlId(404), DEFAULT_MAX_DEPTH).unwrap_err();
        assert_eq!(err, GenealogyError::RootNotFound(FowlId(404)));
    }

    #[test]
    fn test_depth_budget_bounds_the_walk() {
        // Chain 1 <- 2 <- 3 <- 4 <- 5, rooted at 1 walking downward
        let source = PoolSource::new(vec![
            fowl(1, None, None),
            fowl(2, Some(1), None),
            fowl(3, Some(2), None),
            fowl(4, Some(3), None),
            fowl(5, Some(4), None),
        ]);

        let graph = load_family_subgraph(&source, FowlId(1), 2).unwrap();
        assert_eq!(ids(&graph), vec![1, 2, 3]);

        // Budget zero returns just the root
        let graph = load_family_subgraph(&source, FowlId(3), 0).unwrap();
        assert_eq!(ids(&graph), vec![3]);
    }

    #[test]
    fn test_walks_both_directions() {
        // Root 2 has a parent (1) and a child (3); sibling 4 shares parent 1
        let source = PoolSource::new(vec![
            fowl(1, None, None),
            fowl(2, Some(1), None),
            fowl(3, None, Some(2)),
            fowl(4, Some(1), None),
        ]);

        let graph = load_family_subgraph(&source, FowlId(2), DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(ids(&graph), vec![1, 2, 3, 4]);

        let maternal: Vec<_> = graph
            .edges
            .iter()
            .filter(|e| e.kind == ParentKind::Maternal)
            .collect();
        assert_eq!(maternal.len(), 1);
        assert_eq!(maternal[0].child, FowlId(3));
    }

    #[test]
    fn test_idempotent_reload() {
        let source = PoolSource::new(vec![
            fowl(1, None, None),
            fowl(2, Some(1), None),
            fowl(3, Some(2), Some(1)),
        ]);

        let a = load_family_subgraph(&source, FowlId(3), DEFAULT_MAX_DEPTH).unwrap();
        let b = load_family_subgraph(&source, FowlId(3), DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(ids(&a), ids(&b));
        assert_eq!(a.edges.len(), b.edges.len());
    }

    #[test]
    fn test_cyclic_parent_chain_terminates() {
        // X.father = Y, Y.father = X
        let source = PoolSource::new(vec![fowl(1, Some(2), None), fowl(2, Some(1), None)]);

        let graph = load_family_subgraph(&source, FowlId(1), DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(ids(&graph), vec![1, 2]);
        // Both pointers become edges; the cycle is bounded, not rejected
        assert_eq!(graph.edges.len(), 2);
    }

    #[test]
    fn test_self_referential_parent() {
        let source = PoolSource::new(vec![fowl(1, Some(1), None)]);
        let graph = load_family_subgraph(&source, FowlId(1), DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(ids(&graph), vec![1]);
    }
}
