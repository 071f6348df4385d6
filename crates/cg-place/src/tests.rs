//! Unit tests for cg-place.

use cg_core::{DestinationConfig, PlaceId};

use crate::{DestinationRegistry, Place, PlaceCategory, PlaceSettings, PlaceStore};

fn settings(decrement: f64, clean: bool) -> PlaceSettings {
    PlaceSettings { fractional_decrement: decrement, clean_every_step: clean }
}

// ── Place ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod place {
    use super::*;

    #[test]
    fn starts_clean() {
        let p = Place::new(PlaceId(0), PlaceCategory::Home, PlaceSettings::default());
        assert_eq!(p.contamination(), 0.0);
        assert_eq!(p.settings().fractional_decrement, 0.1);
    }

    #[test]
    fn negative_increments_clamp_to_zero() {
        let p = Place::new(PlaceId(0), PlaceCategory::Work, PlaceSettings::default());
        p.add_contamination(0.5);
        p.add_contamination(-2.0);
        assert_eq!(p.contamination(), 0.0);
        p.add_contamination(0.25);
        assert_eq!(p.contamination(), 0.25);
    }

    #[test]
    fn exponential_decay() {
        let mut p = Place::new(PlaceId(0), PlaceCategory::Work, settings(0.3, false));
        p.add_contamination(2.0);
        p.update(1.0);
        assert!((p.contamination() - 2.0 * (-0.3f64).exp()).abs() < 1e-12);
        p.update(2.5);
        assert!((p.contamination() - 2.0 * (-0.3f64 * 3.5).exp()).abs() < 1e-12);
    }

    #[test]
    fn zero_decrement_keeps_level() {
        let mut p = Place::new(PlaceId(0), PlaceCategory::Shared, settings(0.0, false));
        p.add_contamination(1.5);
        p.update(24.0);
        assert_eq!(p.contamination(), 1.5);
    }

    #[test]
    fn clean_every_step_resets() {
        let mut p = Place::new(PlaceId(0), PlaceCategory::Vehicle, settings(0.0, true));
        p.add_contamination(7.0);
        p.update(1.0);
        assert_eq!(p.contamination(), 0.0);
    }

    #[test]
    fn concurrent_accumulation_is_exact() {
        let p = Place::new(PlaceId(0), PlaceCategory::Shared, PlaceSettings::default());
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        p.add_contamination(0.5);
                    }
                });
            }
        });
        assert_eq!(p.contamination(), 4000.0);
    }
}

// ── PlaceStore ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn handles_are_sequential() {
        let mut store = PlaceStore::new();
        let homes = store.add_many(3, PlaceCategory::Home, PlaceSettings::default()).unwrap();
        let work = store.add(PlaceCategory::Work, PlaceSettings::default()).unwrap();
        assert_eq!(homes, vec![PlaceId(0), PlaceId(1), PlaceId(2)]);
        assert_eq!(work, PlaceId(3));
        assert_eq!(store.len(), 4);
        assert_eq!(store.count_category(PlaceCategory::Home), 3);
        assert!(store.get(PlaceId(4)).is_none());
        assert!(store.try_get(PlaceId::INVALID).is_err());
    }

    #[test]
    fn total_contamination_sums() {
        let mut store = PlaceStore::new();
        let ids = store.add_many(2, PlaceCategory::Work, PlaceSettings::default()).unwrap();
        store.get(ids[0]).unwrap().add_contamination(1.0);
        store.get(ids[1]).unwrap().add_contamination(0.5);
        assert_eq!(store.total_contamination(), 1.5);
    }
}

// ── DestinationRegistry ───────────────────────────────────────────────────────

#[cfg(test)]
mod destination {
    use super::*;

    fn configs() -> Vec<DestinationConfig> {
        vec![
            DestinationConfig { name: "harbour".into(), domain: "east".into() },
            DestinationConfig { name: "summit".into(), domain: "west".into() },
        ]
    }

    #[test]
    fn same_handles_on_every_domain() {
        let mut east_places = PlaceStore::new();
        let mut west_places = PlaceStore::new();
        let east = DestinationRegistry::build(&configs(), "east", &mut east_places, PlaceSettings::default()).unwrap();
        let west = DestinationRegistry::build(&configs(), "west", &mut west_places, PlaceSettings::default()).unwrap();

        for (a, b) in east.iter().zip(west.iter()) {
            assert_eq!(a.vehicle, b.vehicle);
            assert_eq!(a.lodging, b.lodging);
            assert_ne!(a.remote, b.remote);
        }
        assert_eq!(east_places.len(), 4);
        assert_eq!(east_places.count_category(PlaceCategory::Lodging), 2);
    }

    #[test]
    fn lookup_by_name_and_host() {
        let mut places = PlaceStore::new();
        let reg = DestinationRegistry::build(&configs(), "west", &mut places, PlaceSettings::default()).unwrap();
        assert!(reg.find("harbour").unwrap().remote);
        assert!(!reg.find("summit").unwrap().remote);
        assert_eq!(reg.hosted().unwrap().name, "summit");
        assert!(reg.find("moon").is_err());
    }
}
