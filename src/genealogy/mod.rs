//! Genealogy core: subgraph construction, generation numbers, statistics.

pub mod builder;
pub mod generation;
pub mod stats;

pub use builder::{load_family_subgraph, FamilySubgraph, ParentEdge, ParentKind, DEFAULT_MAX_DEPTH};
pub use generation::{ancestor_depth, assign_generations, MAX_ANCESTOR_WALK};
pub use stats::{compute_statistics, Clock, FixedClock, SystemClock, TreeStatistics};

#[cfg(test)]
pub(crate) mod test_pool {
    use crate::components::*;
    use crate::registry::FowlSource;
    use chrono::NaiveDate;

    /// In-memory [`FowlSource`] over a plain snapshot list, for pools the
    /// registry cannot produce (cycles, dangling pointers).
    pub struct PoolSource(Vec<FowlSnapshot>);

    impl PoolSource {
        pub fn new(pool: Vec<FowlSnapshot>) -> Self {
            Self(pool)
        }
    }

    impl FowlSource for PoolSource {
        fn fowl_by_id(&self, id: FowlId) -> Option<FowlSnapshot> {
            self.0.iter().find(|r| r.id == id).cloned()
        }

        fn children_of(&self, id: FowlId) -> Vec<FowlSnapshot> {
            self.0
                .iter()
                .filter(|r| r.father == Some(id) || r.mother == Some(id))
                .cloned()
                .collect()
        }
    }

    /// Bare snapshot with the given parent pointers; everything else default.
    pub fn fowl(id: u64, father: Option<u64>, mother: Option<u64>) -> FowlSnapshot {
        FowlSnapshot {
            id: FowlId(id),
            name: format!("fowl-{id}"),
            breed: "Aseel".to_string(),
            sex: Sex::Male,
            hatch_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            father: father.map(FowlId),
            mother: mother.map(FowlId),
            lineage_verified: false,
            owner: OwnerId(1),
            status: LifecycleStatus::Active,
            traits: PhysicalTraits::default(),
        }
    }
}
