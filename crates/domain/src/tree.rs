//! The sector tree aggregate.
//!
//! A `SectorTree` owns every entity of one import run, wrapped in tree nodes
//! that carry parent/child links, the computed hex label, and slots for the
//! host documents attached later by the import pipeline. The tree is always
//! passed explicitly; there are no module-level registries.
//!
//! Parent-chain walks are iterative with a visited-set guard so that a cycle
//! in malformed input surfaces as an integrity error instead of unbounded
//! recursion.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::attributes::Tag;
use crate::entity::{Entity, EntityKind};
use crate::error::DomainError;
use crate::ids::{DocumentId, EntityId, FolderId};

/// Handle of a document created by the host store: the assigned id plus the
/// host's cross-link text for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentHandle {
    pub id: DocumentId,
    pub link: String,
}

impl DocumentHandle {
    pub fn new(id: impl Into<DocumentId>, link: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            link: link.into(),
        }
    }
}

/// An entity wrapped with tree-structural fields and host-artifact slots.
#[derive(Debug, Clone)]
pub struct TreeNode {
    entity: Entity,
    coordinates: Option<String>,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    folder: Option<FolderId>,
    journal: Option<DocumentHandle>,
}

impl TreeNode {
    pub fn new(entity: Entity) -> Self {
        let coordinates = entity.position().map(|position| position.label());
        Self {
            entity,
            coordinates,
            parent: None,
            children: Vec::new(),
            folder: None,
            journal: None,
        }
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn id(&self) -> &EntityId {
        self.entity.id()
    }

    pub fn kind(&self) -> EntityKind {
        self.entity.kind()
    }

    pub fn name(&self) -> &str {
        self.entity.name()
    }

    /// Hex label, present only for systems and black holes.
    pub fn coordinates(&self) -> Option<&str> {
        self.coordinates.as_deref()
    }

    pub fn parent(&self) -> Option<&EntityId> {
        self.parent.as_ref()
    }

    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    pub fn folder(&self) -> Option<&FolderId> {
        self.folder.as_ref()
    }

    pub fn journal(&self) -> Option<&DocumentHandle> {
        self.journal.as_ref()
    }

    pub fn set_parent(&mut self, parent: EntityId) {
        self.parent = Some(parent);
    }

    /// Append a child link, ignoring duplicates.
    pub fn push_child(&mut self, child: EntityId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    /// Replace the child list with a reordered permutation of itself.
    pub fn set_children(&mut self, children: Vec<EntityId>) {
        debug_assert_eq!(children.len(), self.children.len());
        self.children = children;
    }

    pub fn attach_folder(&mut self, folder: FolderId) {
        self.folder = Some(folder);
    }

    pub fn attach_journal(&mut self, journal: DocumentHandle) {
        self.journal = Some(journal);
    }
}

/// A registered narrative tag and its eventual host journal.
#[derive(Debug, Clone)]
pub struct TreeTag {
    tag: Tag,
    journal: Option<DocumentHandle>,
}

impl TreeTag {
    pub fn new(tag: Tag) -> Self {
        Self { tag, journal: None }
    }

    pub fn name(&self) -> &str {
        &self.tag.name
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn journal(&self) -> Option<&DocumentHandle> {
        self.journal.as_ref()
    }

    pub fn attach_journal(&mut self, journal: DocumentHandle) {
        self.journal = Some(journal);
    }
}

/// The whole structure built from one sector file: all nodes, the sector
/// root, and the tag registry. Node and tag iteration follow file order.
#[derive(Debug, Clone)]
pub struct SectorTree {
    nodes: IndexMap<EntityId, TreeNode>,
    root: EntityId,
    tags: IndexMap<String, TreeTag>,
}

impl SectorTree {
    pub fn new(nodes: IndexMap<EntityId, TreeNode>, root: EntityId) -> Self {
        Self {
            nodes,
            root,
            tags: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root_id(&self) -> &EntityId {
        &self.root
    }

    /// The sector node.
    pub fn root(&self) -> &TreeNode {
        &self.nodes[&self.root]
    }

    pub fn node(&self, id: &EntityId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &EntityId) -> Option<&mut TreeNode> {
        self.nodes.get_mut(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &EntityId> {
        self.nodes.keys()
    }

    pub fn tags(&self) -> impl Iterator<Item = &TreeTag> {
        self.tags.values()
    }

    pub fn tag(&self, name: &str) -> Option<&TreeTag> {
        self.tags.get(name)
    }

    pub fn tag_mut(&mut self, name: &str) -> Option<&mut TreeTag> {
        self.tags.get_mut(name)
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Register a tag if its name is not taken yet. First occurrence wins;
    /// later registrations of the same name are ignored.
    pub fn register_tag(&mut self, tag: Tag) {
        self.tags
            .entry(tag.name.clone())
            .or_insert_with(|| TreeTag::new(tag));
    }

    /// Preorder traversal of the subtree rooted at `id`, child order as
    /// stored.
    pub fn preorder(&self, id: &EntityId) -> Vec<&TreeNode> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(current) {
                result.push(node);
                for child in node.children().iter().rev() {
                    stack.push(child);
                }
            }
        }
        result
    }

    /// Parent-hops from `ancestor` down to `descendant`, or `None` if
    /// `ancestor` is not on the descendant's parent chain.
    pub fn distance(&self, ancestor: &EntityId, descendant: &EntityId) -> Option<usize> {
        let mut hops = 0;
        let mut current = descendant;
        let mut visited = HashSet::new();
        loop {
            if current == ancestor {
                return Some(hops);
            }
            if !visited.insert(current.clone()) {
                return None;
            }
            current = self.nodes.get(current)?.parent()?;
            hops += 1;
        }
    }

    /// Whether `id` is the last entry of its parent's child list. The root
    /// has no parent and counts as last.
    pub fn is_last_child(&self, id: &EntityId) -> bool {
        let Some(parent_id) = self.nodes.get(id).and_then(TreeNode::parent) else {
            return true;
        };
        self.nodes[parent_id].children().last() == Some(id)
    }

    /// Nearest node on the parent chain (inclusive) that anchors a hex
    /// cell. Fails when the chain runs out without one or loops.
    pub fn containing_system(&self, id: &EntityId) -> Result<&TreeNode, DomainError> {
        let mut current = id;
        let mut visited = HashSet::new();
        loop {
            let node = self
                .nodes
                .get(current)
                .ok_or_else(|| DomainError::no_containing_system(id.clone()))?;
            if node.kind().is_positioned() {
                return Ok(node);
            }
            if !visited.insert(current.clone()) {
                return Err(DomainError::parent_cycle(id.clone()));
            }
            match node.parent() {
                Some(parent) => current = parent,
                None => return Err(DomainError::no_containing_system(id.clone())),
            }
        }
    }
}
