//! ECS components for fowl records.
//!
//! A registered bird is an entity carrying the components below. The
//! genealogy algorithms never touch entities directly; they work on
//! [`FowlSnapshot`] projections copied out of the world.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// Identity Components
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FowlId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub u64);

// ============================================================================
// Fowl Components
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fowl {
    pub id: FowlId,
    pub name: String,
    pub breed: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// Hatch date; age is computed from it on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HatchDate(pub NaiveDate);

impl HatchDate {
    /// Whole months elapsed between the hatch date and `today`.
    /// A bird hatched after `today` counts as 0 months old.
    pub fn age_months(&self, today: NaiveDate) -> u32 {
        let hatch = self.0;
        if today < hatch {
            return 0;
        }
        let mut months =
            (today.year() - hatch.year()) * 12 + (today.month() as i32 - hatch.month() as i32);
        if today.day() < hatch.day() {
            months -= 1;
        }
        months.max(0) as u32
    }
}

/// Parent pointers. Either side may be unknown (founder stock, unrecorded
/// matings, imported birds).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineage {
    pub father: Option<FowlId>,
    pub mother: Option<FowlId>,
}

impl Lineage {
    /// Parents in resolution order (father first).
    pub fn parents(&self) -> impl Iterator<Item = FowlId> {
        [self.father, self.mother].into_iter().flatten()
    }
}

/// Marker: both parent pointers have been verified by a transfer/registration
/// check upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineageVerified;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicalTraits {
    pub color: String,
    pub weight_grams: u32,
}

/// Records are never hard-deleted; transfers and deaths only move the status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleStatus {
    #[default]
    Active,
    Transferred,
    Deceased,
}

// ============================================================================
// Snapshot projection
// ============================================================================

/// Flat copy of one record, detached from the ECS. This is what the graph
/// builder, generation calculator, layout engine and persistence layer all
/// consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FowlSnapshot {
    pub id: FowlId,
    pub name: String,
    pub breed: String,
    pub sex: Sex,
    pub hatch_date: NaiveDate,
    // No serde skips here: the snapshot also travels through bincode, which
    // cannot tolerate data-dependent field omission.
    pub father: Option<FowlId>,
    pub mother: Option<FowlId>,
    pub lineage_verified: bool,
    pub owner: OwnerId,
    pub status: LifecycleStatus,
    pub traits: PhysicalTraits,
}

impl FowlSnapshot {
    pub fn lineage(&self) -> Lineage {
        Lineage {
            father: self.father,
            mother: self.mother,
        }
    }
}
