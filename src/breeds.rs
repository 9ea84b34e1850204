//! Breed catalogue and display-name generation.
//!
//! Used by flock seeding; registration flows supply their own names.

use once_cell::sync::Lazy;
use rand::Rng;
use std::collections::HashMap;

/// Breeds commonly registered on the platform.
pub const BREEDS: &[&str] = &[
    "Aseel",
    "Kadaknath",
    "Brahma",
    "Cochin",
    "Leghorn",
    "Rhode Island Red",
    "Sussex",
    "Australorp",
    "Giriraja",
    "Vanaraja",
    "Silkie",
    "Plymouth Rock",
];

/// Call names for roosters
const MALE_NAMES: &[&str] = &[
    "Raja", "Veer", "Shera", "Bahadur", "Tiger", "Kesari", "Sultan", "Jwala",
    "Rocky", "Bijli", "Arjun", "Chetak", "Garuda", "Vikram", "Samrat", "Rustam",
];

/// Call names for hens
const FEMALE_NAMES: &[&str] = &[
    "Rani", "Moti", "Chandni", "Laali", "Sona", "Ganga", "Heera", "Kali",
    "Munni", "Gauri", "Radha", "Meena", "Chameli", "Basanti", "Juhi", "Tara",
];

/// Expected adult weight band per breed, grams. Seeding draws weights from it.
#[derive(Debug, Clone, Copy)]
pub struct BreedStandard {
    pub adult_weight_min: u32,
    pub adult_weight_max: u32,
}

static BREED_STANDARDS: Lazy<HashMap<&'static str, BreedStandard>> = Lazy::new(|| {
    let mut m = HashMap::new();
    let mut add = |breed, min, max| {
        m.insert(
            breed,
            BreedStandard {
                adult_weight_min: min,
                adult_weight_max: max,
            },
        );
    };
    add("Aseel", 3000, 4500);
    add("Kadaknath", 1500, 2500);
    add("Brahma", 4000, 5500);
    add("Cochin", 3500, 5000);
    add("Leghorn", 1800, 2700);
    add("Rhode Island Red", 2500, 3900);
    add("Sussex", 3200, 4100);
    add("Australorp", 2900, 3900);
    add("Giriraja", 2500, 4000);
    add("Vanaraja", 2200, 3500);
    add("Silkie", 900, 1800);
    add("Plymouth Rock", 2900, 4300);
    m
});

/// Standard for a breed; falls back to a generic dual-purpose band for
/// breeds missing from the table.
pub fn breed_standard(breed: &str) -> BreedStandard {
    BREED_STANDARDS.get(breed).copied().unwrap_or(BreedStandard {
        adult_weight_min: 2000,
        adult_weight_max: 3500,
    })
}

/// Pick a random breed from the catalogue.
pub fn random_breed() -> &'static str {
    let mut rng = rand::thread_rng();
    BREEDS[rng.gen_range(0..BREEDS.len())]
}

/// Generate a random call name based on sex.
pub fn random_name(is_male: bool) -> &'static str {
    let mut rng = rand::thread_rng();
    if is_male {
        MALE_NAMES[rng.gen_range(0..MALE_NAMES.len())]
    } else {
        FEMALE_NAMES[rng.gen_range(0..FEMALE_NAMES.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_generation() {
        let name = random_name(true);
        assert!(MALE_NAMES.contains(&name));

        let name = random_name(false);
        assert!(FEMALE_NAMES.contains(&name));

        assert!(BREEDS.contains(&random_breed()));
    }

    #[test]
    fn test_every_breed_has_a_standard() {
        for breed in BREEDS {
            let std = breed_standard(breed);
            assert!(std.adult_weight_min < std.adult_weight_max);
        }
        // Unknown breeds fall back rather than panic
        let fallback = breed_standard("Unknown Cross");
        assert!(fallback.adult_weight_min > 0);
    }
}
