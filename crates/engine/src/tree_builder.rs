//! Sector tree construction.
//!
//! Builds one node per parsed entity, links parents and children, resolves
//! the unique sector root, and imposes the canonical child order at every
//! node. Integrity is checked across the whole tree: an entity whose parent
//! chain cannot be resolved aborts the build, it is never silently dropped.

use indexmap::IndexMap;
use std::collections::HashMap;

use hexmapr_domain::{DomainError, Entity, EntityId, EntityKind, SectorTree, TreeNode};

use crate::ordering::order_system_group;

/// Build the sector tree from the flat entity map. Node creation order does
/// not affect the result; the child order at every node is canonical.
pub fn build_tree(entities: IndexMap<EntityId, Entity>) -> Result<SectorTree, DomainError> {
    let root = resolve_root(&entities)?;

    let mut nodes: IndexMap<EntityId, TreeNode> = entities
        .into_values()
        .map(|entity| (entity.id().clone(), TreeNode::new(entity)))
        .collect();

    link_nodes(&mut nodes);

    let mut tree = SectorTree::new(nodes, root);
    order_children(&mut tree)?;

    tracing::debug!(nodes = tree.len(), "sector tree built");
    Ok(tree)
}

fn resolve_root(entities: &IndexMap<EntityId, Entity>) -> Result<EntityId, DomainError> {
    let mut roots = entities
        .values()
        .filter(|entity| entity.kind() == EntityKind::Sector);

    let root = roots.next().ok_or(DomainError::RootNotFound)?;
    if let Some(extra) = roots.next() {
        return Err(DomainError::validation(format!(
            "The sector data contains more than one sector entity: {}, {}",
            root.id(),
            extra.id()
        )));
    }
    if root.parent().is_some() {
        return Err(DomainError::validation(format!(
            "The sector entity {} must not have a parent",
            root.id()
        )));
    }
    Ok(root.id().clone())
}

// Attach every node with a resolvable parent id. Unresolvable parents leave
// the node unlinked here; the integrity sweep below turns that into an
// error.
fn link_nodes(nodes: &mut IndexMap<EntityId, TreeNode>) {
    let links: Vec<(EntityId, EntityId)> = nodes
        .values()
        .filter_map(|node| {
            node.entity()
                .parent_id()
                .map(|parent| (node.id().clone(), parent.clone()))
        })
        .collect();

    for (child, parent) in links {
        if child == parent || !nodes.contains_key(&parent) {
            continue;
        }
        if let Some(parent_node) = nodes.get_mut(&parent) {
            parent_node.push_child(child.clone());
        }
        if let Some(child_node) = nodes.get_mut(&child) {
            child_node.set_parent(parent);
        }
    }
}

fn order_children(tree: &mut SectorTree) -> Result<(), DomainError> {
    let unlinked: Vec<EntityId> = tree
        .nodes()
        .filter(|node| node.id() != tree.root_id() && node.parent().is_none())
        .map(|node| node.id().clone())
        .collect();
    if !unlinked.is_empty() {
        return Err(DomainError::unlinked(unlinked));
    }

    let groups = system_groups(tree)?;

    // Flatten every group's canonical sequence into one global rank.
    let mut rank: HashMap<EntityId, usize> = HashMap::new();
    for members in groups.values() {
        let group: Vec<&Entity> = members
            .iter()
            .filter_map(|id| tree.node(id))
            .map(TreeNode::entity)
            .collect();
        let ordered = order_system_group(&group)?;
        for id in ordered {
            let next = rank.len();
            rank.insert(id, next);
        }
    }

    apply_order(tree, &rank);
    Ok(())
}

// Group every non-note entity under its containing system; the group seeds
// with the system itself. The walk is iterative and cycle-guarded.
fn system_groups(tree: &SectorTree) -> Result<IndexMap<EntityId, Vec<EntityId>>, DomainError> {
    let mut groups: IndexMap<EntityId, Vec<EntityId>> = IndexMap::new();

    for child in tree.root().children() {
        if let Some(node) = tree.node(child) {
            if node.kind().is_positioned() {
                groups.insert(child.clone(), vec![child.clone()]);
            }
        }
    }

    for node in tree.nodes() {
        let kind = node.kind();
        if kind == EntityKind::Sector || kind.is_note() || kind.is_positioned() {
            continue;
        }
        let system = tree.containing_system(node.id())?;
        groups
            .entry(system.id().clone())
            .or_default()
            .push(node.id().clone());
    }

    Ok(groups)
}

// Reorder every node's child list: ranked entities first in rank order,
// then notes in input order. The root keeps systems before black holes
// before notes.
fn apply_order(tree: &mut SectorTree, rank: &HashMap<EntityId, usize>) {
    let ids: Vec<EntityId> = tree.ids().cloned().collect();
    let root = tree.root_id().clone();

    for id in ids {
        let Some(node) = tree.node(&id) else { continue };
        let mut children = node.children().to_vec();
        if children.len() < 2 {
            continue;
        }

        if id == root {
            children = sort_root_children(tree, children);
        } else {
            children.sort_by_key(|child| {
                let is_note = tree
                    .node(child)
                    .map(|n| n.kind().is_note())
                    .unwrap_or(false);
                (is_note, rank.get(child).copied().unwrap_or(usize::MAX))
            });
        }

        if let Some(node) = tree.node_mut(&id) {
            node.set_children(children);
        }
    }
}

fn sort_root_children(tree: &SectorTree, mut children: Vec<EntityId>) -> Vec<EntityId> {
    children.sort_by_key(|child| match tree.node(child).map(TreeNode::kind) {
        Some(EntityKind::System) => 0,
        Some(EntityKind::BlackHole) => 1,
        _ => 2,
    });
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sector_value;
    use crate::test_fixtures::{populated_sector, sector_with};
    use serde_json::json;

    fn build(value: serde_json::Value) -> Result<SectorTree, DomainError> {
        let entities = parse_sector_value(value).expect("fixture should parse");
        build_tree(entities)
    }

    #[test]
    fn test_every_entity_lands_in_exactly_one_node() {
        let value = populated_sector();
        let entities = parse_sector_value(value).expect("fixture should parse");
        let expected = entities.len();
        let tree = build_tree(entities).expect("fixture should build");

        assert_eq!(tree.len(), expected);
        for node in tree.nodes() {
            let from_children: usize = tree
                .nodes()
                .map(|parent| {
                    parent
                        .children()
                        .iter()
                        .filter(|child| *child == node.id())
                        .count()
                })
                .sum();
            let expected_links = usize::from(node.id() != tree.root_id());
            assert_eq!(from_children, expected_links, "node {}", node.id());
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let first = build(populated_sector()).expect("build");
        let second = build(populated_sector()).expect("build");

        let order = |tree: &SectorTree| -> Vec<String> {
            tree.preorder(tree.root_id())
                .iter()
                .map(|node| node.id().to_string())
                .collect()
        };
        assert_eq!(order(&first), order(&second));
    }

    #[test]
    fn test_children_follow_priority_order() {
        let tree = build(populated_sector()).expect("build");
        let system = tree
            .node(&EntityId::from("sys-1"))
            .expect("system node exists");
        let kinds: Vec<EntityKind> = system
            .children()
            .iter()
            .filter_map(|id| tree.node(id))
            .map(TreeNode::kind)
            .collect();

        let planet_at = kinds
            .iter()
            .position(|k| *k == EntityKind::Planet)
            .expect("planet child");
        let belt_at = kinds
            .iter()
            .position(|k| *k == EntityKind::AsteroidBelt)
            .expect("belt child");
        let deep_at = kinds
            .iter()
            .position(|k| *k == EntityKind::DeepSpaceStation)
            .expect("deep-space child");
        assert!(planet_at < belt_at);
        assert!(belt_at < deep_at);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let mut value = populated_sector();
        value
            .as_object_mut()
            .expect("fixture is an object")
            .insert("sector".to_string(), json!({}));
        let err = build(value).unwrap_err();
        assert_eq!(err, DomainError::RootNotFound);
    }

    #[test]
    fn test_orphaned_entity_raises_unlinked_error() {
        let value = sector_with(|file| {
            file.system(
                "sys-1",
                json!({
                    "name": "Asellus",
                    "parent": "sector-1",
                    "parentEntity": "sector",
                    "x": 1,
                    "y": 1
                }),
            );
            file.entity(
                "planet",
                "pl-orphan",
                json!({ "name": "Adrift", "parent": "missing-id", "parentEntity": "system" }),
            );
        });

        let err = build(value).unwrap_err();
        match err {
            DomainError::UnlinkedEntities { ids } => {
                assert_eq!(ids, vec![EntityId::from("pl-orphan")]);
            }
            other => panic!("expected UnlinkedEntities, got {other:?}"),
        }
    }

    #[test]
    fn test_parent_cycle_is_detected_not_overflowed() {
        let value = sector_with(|file| {
            file.system(
                "sys-1",
                json!({
                    "name": "Asellus",
                    "parent": "sector-1",
                    "parentEntity": "sector",
                    "x": 1,
                    "y": 1
                }),
            );
            file.entity(
                "planet",
                "pl-1",
                json!({ "name": "A", "parent": "moon-1", "parentEntity": "moon" }),
            );
            file.entity(
                "moon",
                "moon-1",
                json!({ "name": "B", "parent": "pl-1", "parentEntity": "planet" }),
            );
        });

        let err = build(value).unwrap_err();
        assert!(matches!(err, DomainError::ParentCycle { .. }));
    }

    #[test]
    fn test_notes_sort_after_ordered_siblings() {
        let value = sector_with(|file| {
            file.system(
                "sys-1",
                json!({
                    "name": "Asellus",
                    "parent": "sector-1",
                    "parentEntity": "sector",
                    "x": 1,
                    "y": 1
                }),
            );
            file.entity(
                "note",
                "note-1",
                json!({
                    "name": "GM note",
                    "parent": "sys-1",
                    "parentEntity": "system",
                    "attributes": { "content": "Keep an eye on this one." }
                }),
            );
            file.entity(
                "planet",
                "pl-1",
                json!({ "name": "Topaz", "parent": "sys-1", "parentEntity": "system" }),
            );
        });

        let tree = build(value).expect("build");
        let system = tree.node(&EntityId::from("sys-1")).expect("system");
        let ids: Vec<&str> = system.children().iter().map(EntityId::as_str).collect();
        assert_eq!(ids, vec!["pl-1", "note-1"]);
    }

    #[test]
    fn test_root_children_keep_systems_before_black_holes() {
        let value = sector_with(|file| {
            file.entity(
                "blackHole",
                "bh-1",
                json!({
                    "name": "Maw",
                    "parent": "sector-1",
                    "parentEntity": "sector",
                    "x": 2,
                    "y": 1
                }),
            );
            file.system(
                "sys-1",
                json!({
                    "name": "Asellus",
                    "parent": "sector-1",
                    "parentEntity": "sector",
                    "x": 1,
                    "y": 1
                }),
            );
        });

        let tree = build(value).expect("build");
        let ids: Vec<&str> = tree
            .root()
            .children()
            .iter()
            .map(EntityId::as_str)
            .collect();
        assert_eq!(ids, vec!["sys-1", "bh-1"]);
    }
}
