//! Generation numbers.
//!
//! A record's generation is its *self-ancestor depth*: the number of parent
//! hops from the record to its earliest resolvable ancestor, walking the
//! father pointer when both parents resolve. Founders (no resolvable parent
//! in the pool) are generation 0. The same definition is used everywhere a
//! generation number appears: node placement, statistics, and the generation
//! filter.
//!
//! Circular parent chains are bounded by a visited set plus a hard step cap;
//! generation numbers for records inside a cycle are unstable by design and
//! callers must not rely on them.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use crate::components::{FowlId, FowlSnapshot};

/// Hard cap on the upward walk, applied regardless of the visited set.
pub const MAX_ANCESTOR_WALK: u32 = 10;

/// Parent hops from `subject` to its earliest resolvable ancestor in `pool`.
/// Returns 0 when the subject is absent or has no resolvable parent.
pub fn ancestor_depth(subject: FowlId, pool: &[FowlSnapshot]) -> u32 {
    let Some(mut current) = pool.iter().find(|r| r.id == subject) else {
        return 0;
    };
    let mut visited: HashSet<FowlId> = HashSet::new();
    visited.insert(subject);

    let mut steps = 0u32;
    while steps < MAX_ANCESTOR_WALK {
        let parent = current
            .lineage()
            .parents()
            .find_map(|pid| pool.iter().find(|r| r.id == pid));
        match parent {
            Some(parent) if visited.insert(parent.id) => {
                steps += 1;
                current = parent;
            }
            _ => break,
        }
    }
    steps
}

/// Generation number for every record in the pool. The walks are independent,
/// so they run in parallel for the 100+ node trees the renderer targets.
pub fn assign_generations(pool: &[FowlSnapshot]) -> HashMap<FowlId, u32> {
    pool.par_iter()
        .map(|record| (record.id, ancestor_depth(record.id, pool)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genealogy::test_pool::fowl;

    #[test]
    fn test_founder_is_generation_zero() {
        let pool = vec![fowl(1, None, None)];
        assert_eq!(ancestor_depth(FowlId(1), &pool), 0);
    }

    #[test]
    fn test_unresolvable_parent_is_generation_zero() {
        // Father recorded but absent from the pool
        let pool = vec![fowl(1, Some(99), None)];
        assert_eq!(ancestor_depth(FowlId(1), &pool), 0);
    }

    #[test]
    fn test_three_generation_pedigree() {
        let pool = vec![
            fowl(1, None, None),
            fowl(2, Some(1), None),
            fowl(3, Some(2), None),
        ];
        assert_eq!(ancestor_depth(FowlId(3), &pool), 2);
        assert_eq!(ancestor_depth(FowlId(2), &pool), 1);
        assert_eq!(ancestor_depth(FowlId(1), &pool), 0);
    }

    #[test]
    fn test_father_preferred_over_mother() {
        // Father chain is short, mother chain is long; the walk follows the
        // father and reports his depth.
        let pool = vec![
            fowl(1, None, None),          // father, founder
            fowl(2, None, None),          // grandmother
            fowl(3, Some(2), None),       // mother, depth 1
            fowl(4, Some(1), Some(3)),    // subject
        ];
        assert_eq!(ancestor_depth(FowlId(4), &pool), 1);
    }

    #[test]
    fn test_two_cycle_terminates_under_cap() {
        let pool = vec![fowl(1, Some(2), None), fowl(2, Some(1), None)];
        let depth = ancestor_depth(FowlId(1), &pool);
        assert!(depth <= MAX_ANCESTOR_WALK);
    }

    #[test]
    fn test_long_chain_hits_step_cap() {
        // 15-deep chain; the walk stops at the hard cap
        let mut pool = vec![fowl(0, None, None)];
        for i in 1..=15u64 {
            pool.push(fowl(i, Some(i - 1), None));
        }
        assert_eq!(ancestor_depth(FowlId(15), &pool), MAX_ANCESTOR_WALK);
    }

    #[test]
    fn test_assign_generations_covers_pool() {
        let pool = vec![
            fowl(1, None, None),
            fowl(2, Some(1), None),
            fowl(3, Some(2), Some(1)),
        ];
        let generations = assign_generations(&pool);
        assert_eq!(generations.len(), 3);
        assert_eq!(generations[&FowlId(1)], 0);
        assert_eq!(generations[&FowlId(2)], 1);
        assert_eq!(generations[&FowlId(3)], 2);
    }
}
