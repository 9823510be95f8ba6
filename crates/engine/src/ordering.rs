//! Canonical sibling ordering.
//!
//! All entities sharing a containing system are flattened into one fixed
//! priority sequence: the anchor first, then planets each followed by their
//! moons (and the moons' installations), the planets' own installations,
//! asteroid belts with theirs, and finally the deep-space groups split by
//! parent kind. Entities of the same type and parent keep input order.
//!
//! Every input entity must land in exactly one bucket. A count mismatch
//! means an unresolvable or mis-typed parent link and aborts the import.

use std::collections::HashMap;

use hexmapr_domain::{DomainError, Entity, EntityId, EntityKind};

// Installations beneath a moon, in render order.
const MOON_CHILD_KINDS: [EntityKind; 4] = [
    EntityKind::MoonBase,
    EntityKind::ResearchBase,
    EntityKind::RefuelingStation,
    EntityKind::OrbitalRuin,
];

// Installations orbiting a planet directly, in render order.
const PLANET_CHILD_KINDS: [EntityKind; 5] = [
    EntityKind::ResearchBase,
    EntityKind::GasGiantMine,
    EntityKind::RefuelingStation,
    EntityKind::SpaceStation,
    EntityKind::OrbitalRuin,
];

// Installations inside an asteroid belt, in render order.
const BELT_CHILD_KINDS: [EntityKind; 5] = [
    EntityKind::AsteroidBase,
    EntityKind::RefuelingStation,
    EntityKind::SpaceStation,
    EntityKind::ResearchBase,
    EntityKind::OrbitalRuin,
];

// Deep-space kinds attached straight to a system or black hole.
const DEEP_SPACE_KINDS: [EntityKind; 4] = [
    EntityKind::RefuelingStation,
    EntityKind::ResearchBase,
    EntityKind::DeepSpaceStation,
    EntityKind::OrbitalRuin,
];

/// Order one system's entity group (the system or black hole itself plus
/// everything it contains) into the canonical render sequence.
pub fn order_system_group(entities: &[&Entity]) -> Result<Vec<EntityId>, DomainError> {
    let mut ordered: Vec<EntityId> = Vec::with_capacity(entities.len());

    let with_parent_kind = |kind: EntityKind, parent_kind: EntityKind| {
        entities
            .iter()
            .filter(move |e| e.kind() == kind && e.parent_kind() == Some(parent_kind))
    };
    let with_parent_id = |kind: EntityKind, parent: &EntityId| {
        entities
            .iter()
            .filter(move |e| e.kind() == kind && e.parent_id() == Some(parent))
            .map(|e| e.id().clone())
            .collect::<Vec<_>>()
    };

    for system in with_parent_kind(EntityKind::System, EntityKind::Sector) {
        ordered.push(system.id().clone());
    }
    for black_hole in with_parent_kind(EntityKind::BlackHole, EntityKind::Sector) {
        ordered.push(black_hole.id().clone());
    }

    for planet in with_parent_kind(EntityKind::Planet, EntityKind::System) {
        ordered.push(planet.id().clone());
        for moon in with_parent_id(EntityKind::Moon, planet.id()) {
            ordered.push(moon.clone());
            for kind in MOON_CHILD_KINDS {
                ordered.extend(with_parent_id(kind, &moon));
            }
        }
        for kind in PLANET_CHILD_KINDS {
            ordered.extend(with_parent_id(kind, planet.id()));
        }
    }

    for belt in with_parent_kind(EntityKind::AsteroidBelt, EntityKind::System) {
        ordered.push(belt.id().clone());
        for kind in BELT_CHILD_KINDS {
            ordered.extend(with_parent_id(kind, belt.id()));
        }
    }

    for kind in DEEP_SPACE_KINDS {
        for anchor in [EntityKind::System, EntityKind::BlackHole] {
            for entity in with_parent_kind(kind, anchor) {
                ordered.push(entity.id().clone());
            }
        }
    }

    if ordered.len() != entities.len() {
        return Err(DomainError::unlinked(mismatched(entities, &ordered)));
    }

    Ok(ordered)
}

// Entities that were never placed, or placed more than once (a parent link
// whose kind tag contradicts the actual parent entity).
fn mismatched(entities: &[&Entity], ordered: &[EntityId]) -> Vec<EntityId> {
    let mut seen: HashMap<&EntityId, usize> = HashMap::new();
    for id in ordered {
        *seen.entry(id).or_default() += 1;
    }
    entities
        .iter()
        .map(|e| e.id())
        .filter(|id| seen.get(id).copied().unwrap_or(0) != 1)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexmapr_domain::ParentLink;

    fn entity(id: &str, kind: EntityKind, parent: &str, parent_kind: EntityKind) -> Entity {
        Entity::new(id, kind, id).with_parent(ParentLink::new(parent, parent_kind))
    }

    #[test]
    fn test_full_priority_sequence() {
        let system = entity("sys", EntityKind::System, "sector", EntityKind::Sector);
        let deep_station = entity(
            "deep",
            EntityKind::DeepSpaceStation,
            "sys",
            EntityKind::System,
        );
        let belt = entity("belt", EntityKind::AsteroidBelt, "sys", EntityKind::System);
        let belt_base = entity(
            "belt-base",
            EntityKind::AsteroidBase,
            "belt",
            EntityKind::AsteroidBelt,
        );
        let planet = entity("planet", EntityKind::Planet, "sys", EntityKind::System);
        let moon = entity("moon", EntityKind::Moon, "planet", EntityKind::Planet);
        let moon_base = entity("moon-base", EntityKind::MoonBase, "moon", EntityKind::Moon);
        let mine = entity(
            "mine",
            EntityKind::GasGiantMine,
            "planet",
            EntityKind::Planet,
        );

        let group: Vec<&Entity> = vec![
            &deep_station,
            &belt_base,
            &moon_base,
            &mine,
            &belt,
            &moon,
            &planet,
            &system,
        ];
        let ordered = order_system_group(&group).expect("group is fully linkable");
        let ids: Vec<&str> = ordered.iter().map(EntityId::as_str).collect();
        assert_eq!(
            ids,
            vec!["sys", "planet", "moon", "moon-base", "mine", "belt", "belt-base", "deep"]
        );
    }

    #[test]
    fn test_same_bucket_preserves_input_order() {
        let system = entity("sys", EntityKind::System, "sector", EntityKind::Sector);
        let first = entity("planet-b", EntityKind::Planet, "sys", EntityKind::System);
        let second = entity("planet-a", EntityKind::Planet, "sys", EntityKind::System);

        let ordered = order_system_group(&[&system, &first, &second]).expect("orderable");
        let ids: Vec<&str> = ordered.iter().map(EntityId::as_str).collect();
        assert_eq!(ids, vec!["sys", "planet-b", "planet-a"]);
    }

    #[test]
    fn test_belt_research_bases_and_ruins_are_belt_children() {
        let system = entity("sys", EntityKind::System, "sector", EntityKind::Sector);
        let belt = entity("belt", EntityKind::AsteroidBelt, "sys", EntityKind::System);
        let lab = entity(
            "lab",
            EntityKind::ResearchBase,
            "belt",
            EntityKind::AsteroidBelt,
        );
        let ruin = entity(
            "ruin",
            EntityKind::OrbitalRuin,
            "belt",
            EntityKind::AsteroidBelt,
        );

        let ordered = order_system_group(&[&ruin, &lab, &belt, &system]).expect("orderable");
        let ids: Vec<&str> = ordered.iter().map(EntityId::as_str).collect();
        assert_eq!(ids, vec!["sys", "belt", "lab", "ruin"]);
    }

    #[test]
    fn test_system_groups_precede_black_hole_groups() {
        let hole = entity("hole", EntityKind::BlackHole, "sector", EntityKind::Sector);
        let station_bh = entity(
            "fuel-bh",
            EntityKind::RefuelingStation,
            "hole",
            EntityKind::BlackHole,
        );
        let ordered = order_system_group(&[&station_bh, &hole]).expect("orderable");
        let ids: Vec<&str> = ordered.iter().map(EntityId::as_str).collect();
        assert_eq!(ids, vec!["hole", "fuel-bh"]);
    }

    #[test]
    fn test_unmatched_entity_aborts_with_its_id() {
        let system = entity("sys", EntityKind::System, "sector", EntityKind::Sector);
        // A moon attached straight to a system matches no bucket.
        let stray = entity("stray-moon", EntityKind::Moon, "sys", EntityKind::System);

        let err = order_system_group(&[&system, &stray]).unwrap_err();
        match err {
            DomainError::UnlinkedEntities { ids } => {
                assert_eq!(ids, vec![EntityId::from("stray-moon")]);
            }
            other => panic!("expected UnlinkedEntities, got {other:?}"),
        }
    }

    #[test]
    fn test_contradictory_parent_kind_is_detected() {
        let system = entity("sys", EntityKind::System, "sector", EntityKind::Sector);
        let belt = entity("belt", EntityKind::AsteroidBelt, "sys", EntityKind::System);
        // Claims a system parent kind while pointing at the belt: double
        // placement.
        let fuel = entity(
            "fuel",
            EntityKind::RefuelingStation,
            "belt",
            EntityKind::System,
        );

        let err = order_system_group(&[&system, &belt, &fuel]).unwrap_err();
        assert!(matches!(err, DomainError::UnlinkedEntities { .. }));
    }
}
