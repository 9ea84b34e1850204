//! Fowl registry - the in-memory record pool.
//!
//! Wraps a `hecs::World` with a `FowlId -> Entity` index so the genealogy
//! layer can resolve records by id. In the application this pool is filled
//! from the local cache; here it is also seedable with synthetic pedigrees
//! for benchmarks and tests.

use chrono::{Duration, NaiveDate};
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::collections::HashMap;
use tracing::debug;

use crate::breeds;
use crate::components::*;

/// Record lookup capability consumed by the graph builder. Backed by the
/// registry here; the application backs it with its cache layer.
pub trait FowlSource {
    fn fowl_by_id(&self, id: FowlId) -> Option<FowlSnapshot>;

    /// All records whose father or mother pointer equals `id`, ordered by id.
    fn children_of(&self, id: FowlId) -> Vec<FowlSnapshot>;
}

/// Fields supplied at registration time. The registry assigns the id.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub breed: String,
    pub sex: Sex,
    pub hatch_date: NaiveDate,
    pub lineage: Lineage,
    pub lineage_verified: bool,
    pub owner: OwnerId,
    pub traits: PhysicalTraits,
}

pub struct FowlRegistry {
    pub world: World,
    pub(crate) index: HashMap<FowlId, Entity>,
    pub next_fowl_id: u64,
}

impl FowlRegistry {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            index: HashMap::new(),
            next_fowl_id: 1,
        }
    }

    /// Register a new bird and return its assigned id.
    pub fn register(&mut self, reg: Registration) -> FowlId {
        let id = FowlId(self.next_fowl_id);
        self.next_fowl_id += 1;

        let entity = self.world.spawn((
            Fowl {
                id,
                name: reg.name,
                breed: reg.breed,
            },
            reg.sex,
            HatchDate(reg.hatch_date),
            reg.lineage,
            reg.owner,
            reg.traits,
            LifecycleStatus::Active,
        ));
        if reg.lineage_verified {
            let _ = self.world.insert_one(entity, LineageVerified);
        }

        self.index.insert(id, entity);
        id
    }

    /// Number of registered records, all lifecycle statuses included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Move a record to a new owner. Records are never despawned; transfers
    /// and deaths only touch the status and owner components.
    pub fn mark_transferred(&mut self, id: FowlId, new_owner: OwnerId) -> bool {
        let Some(&entity) = self.index.get(&id) else {
            return false;
        };
        if let Ok(mut status) = self.world.get::<&mut LifecycleStatus>(entity) {
            *status = LifecycleStatus::Transferred;
        }
        if let Ok(mut owner) = self.world.get::<&mut OwnerId>(entity) {
            *owner = new_owner;
        }
        true
    }

    pub fn mark_deceased(&mut self, id: FowlId) -> bool {
        let Some(&entity) = self.index.get(&id) else {
            return false;
        };
        match self.world.get::<&mut LifecycleStatus>(entity) {
            Ok(mut status) => {
                *status = LifecycleStatus::Deceased;
                true
            }
            Err(_) => false,
        }
    }

    /// Flip the lineage-verified marker on an existing record.
    pub fn set_lineage_verified(&mut self, id: FowlId, verified: bool) -> bool {
        let Some(&entity) = self.index.get(&id) else {
            return false;
        };
        if verified {
            self.world.insert_one(entity, LineageVerified).is_ok()
        } else {
            // Removing a marker that is not present is not a failure.
            let _ = self.world.remove_one::<LineageVerified>(entity);
            true
        }
    }

    fn snapshot(&self, entity: Entity) -> Option<FowlSnapshot> {
        let fowl = self.world.get::<&Fowl>(entity).ok()?;
        let sex = self.world.get::<&Sex>(entity).ok()?;
        let hatch = self.world.get::<&HatchDate>(entity).ok()?;
        let lineage = self.world.get::<&Lineage>(entity).ok()?;
        let owner = self.world.get::<&OwnerId>(entity).ok()?;
        let traits = self.world.get::<&PhysicalTraits>(entity).ok()?;
        let status = self.world.get::<&LifecycleStatus>(entity).ok()?;
        let verified = self.world.get::<&LineageVerified>(entity).is_ok();

        Some(FowlSnapshot {
            id: fowl.id,
            name: fowl.name.clone(),
            breed: fowl.breed.clone(),
            sex: *sex,
            hatch_date: hatch.0,
            father: lineage.father,
            mother: lineage.mother,
            lineage_verified: verified,
            owner: *owner,
            status: *status,
            traits: (*traits).clone(),
        })
    }

    /// Snapshot every record, ordered by id.
    pub fn all(&self) -> Vec<FowlSnapshot> {
        let mut out: Vec<FowlSnapshot> = self
            .world
            .query::<&Fowl>()
            .iter()
            .filter_map(|(entity, _)| self.snapshot(entity))
            .collect();
        out.sort_by_key(|s| s.id.0);
        out
    }

    // ========================================================================
    // Synthetic flock seeding
    // ========================================================================

    /// Seed `founders` unrelated birds plus `generations` rounds of offspring
    /// bred from random sire/dam pairs of earlier rounds. Ages are drawn from
    /// a normal distribution around typical breeding stock.
    pub fn seed_flock(&mut self, founders: usize, generations: usize, today: NaiveDate) {
        let mut rng = rand::thread_rng();
        // Founder age in months: mean 36, sd 12, clamped to a sane band.
        // Constant parameters, construction cannot fail.
        let age_dist = Normal::new(36.0f64, 12.0).unwrap();

        let mut males: Vec<FowlId> = Vec::new();
        let mut females: Vec<FowlId> = Vec::new();

        for i in 0..founders {
            // Guarantee at least one breeding pair among the founders
            let sex = match i {
                0 => Sex::Male,
                1 => Sex::Female,
                _ => {
                    if rng.gen::<bool>() {
                        Sex::Male
                    } else {
                        Sex::Female
                    }
                }
            };
            let age_months = (age_dist.sample(&mut rng) as i64).clamp(12, 72);
            let breed = breeds::random_breed();
            let std = breeds::breed_standard(breed);

            let id = self.register(Registration {
                name: breeds::random_name(sex == Sex::Male).to_string(),
                breed: breed.to_string(),
                sex,
                hatch_date: today - Duration::days(age_months * 30),
                lineage: Lineage::default(),
                lineage_verified: false,
                owner: OwnerId(rng.gen_range(1..=10)),
                traits: PhysicalTraits {
                    color: String::new(),
                    weight_grams: rng.gen_range(std.adult_weight_min..=std.adult_weight_max),
                },
            });
            match sex {
                Sex::Male => males.push(id),
                Sex::Female => females.push(id),
            }
        }

        for round in 0..generations {
            if males.is_empty() || females.is_empty() {
                break;
            }
            // Offspring hatch progressively closer to today
            let hatch_age_months = ((generations - round) as i64 * 10).clamp(2, 70);
            let mut new_males = Vec::new();
            let mut new_females = Vec::new();

            for _ in 0..founders {
                let father = *males.choose(&mut rng).unwrap();
                let mother = *females.choose(&mut rng).unwrap();
                let sex = if rng.gen::<bool>() { Sex::Male } else { Sex::Female };

                // Offspring inherit the sire's breed line
                let breed = self
                    .fowl_by_id(father)
                    .map(|f| f.breed)
                    .unwrap_or_else(|| breeds::random_breed().to_string());
                let std = breeds::breed_standard(&breed);

                let id = self.register(Registration {
                    name: breeds::random_name(sex == Sex::Male).to_string(),
                    breed,
                    sex,
                    hatch_date: today - Duration::days(hatch_age_months * 30),
                    lineage: Lineage {
                        father: Some(father),
                        mother: Some(mother),
                    },
                    lineage_verified: rng.gen_bool(0.6),
                    owner: OwnerId(rng.gen_range(1..=10)),
                    traits: PhysicalTraits {
                        color: String::new(),
                        weight_grams: rng.gen_range(std.adult_weight_min..=std.adult_weight_max),
                    },
                });
                match sex {
                    Sex::Male => new_males.push(id),
                    Sex::Female => new_females.push(id),
                }
            }
            males.extend(new_males);
            females.extend(new_females);
        }

        debug!(records = self.len(), "flock seeded");
    }
}

impl Default for FowlRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FowlSource for FowlRegistry {
    fn fowl_by_id(&self, id: FowlId) -> Option<FowlSnapshot> {
        let entity = *self.index.get(&id)?;
        self.snapshot(entity)
    }

    fn children_of(&self, id: FowlId) -> Vec<FowlSnapshot> {
        let mut children: Vec<FowlSnapshot> = self
            .world
            .query::<&Lineage>()
            .iter()
            .filter(|(_, lineage)| lineage.father == Some(id) || lineage.mother == Some(id))
            .filter_map(|(entity, _)| self.snapshot(entity))
            .collect();
        children.sort_by_key(|s| s.id.0);
        children
    }
}


#[cfg(test)]
mod tests {
    use super::test_util::*;
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = FowlRegistry::new();
        let id = add_fowl(&mut registry, Sex::Male, None, None);

        let snap = registry.fowl_by_id(id).unwrap();
        assert_eq!(snap.id, id);
        assert_eq!(snap.status, LifecycleStatus::Active);
        assert!(!snap.lineage_verified);

        assert!(registry.fowl_by_id(FowlId(9999)).is_none());
    }

    #[test]
    fn test_children_of_matches_either_parent() {
        let mut registry = FowlRegistry::new();
        let sire = add_fowl(&mut registry, Sex::Male, None, None);
        let dam = add_fowl(&mut registry, Sex::Female, None, None);
        let by_sire = add_fowl(&mut registry, Sex::Male, Some(sire), None);
        let by_dam = add_fowl(&mut registry, Sex::Female, None, Some(dam));
        let by_both = add_fowl(&mut registry, Sex::Female, Some(sire), Some(dam));

        let sire_kids: Vec<_> = registry.children_of(sire).iter().map(|c| c.id).collect();
        assert_eq!(sire_kids, vec![by_sire, by_both]);

        let dam_kids: Vec<_> = registry.children_of(dam).iter().map(|c| c.id).collect();
        assert_eq!(dam_kids, vec![by_dam, by_both]);
    }

    #[test]
    fn test_transfer_keeps_record() {
        let mut registry = FowlRegistry::new();
        let id = add_fowl(&mut registry, Sex::Female, None, None);

        assert!(registry.mark_transferred(id, OwnerId(42)));
        let snap = registry.fowl_by_id(id).unwrap();
        assert_eq!(snap.status, LifecycleStatus::Transferred);
        assert_eq!(snap.owner, OwnerId(42));

        assert!(registry.mark_deceased(id));
        assert_eq!(
            registry.fowl_by_id(id).unwrap().status,
            LifecycleStatus::Deceased
        );
        // Still present and still queryable as a parent
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_seed_flock_builds_pedigree() {
        let mut registry = FowlRegistry::new();
        registry.seed_flock(10, 3, date(2026, 1, 1));

        assert!(registry.len() >= 10);
        // At least one seeded bird has recorded parents
        assert!(registry.all().iter().any(|s| s.father.is_some()));
    }
}
