//! Journal render payloads.
//!
//! Walks the finished sector tree and builds, per node, the data map the
//! external template renderer consumes: the subtree diagram, the attribute
//! list, note bodies, the location phrase, and parent/system cross-links.
//! Rendering itself is a port; nothing here produces markup.

use convert_case::{Case, Casing};
use serde::Serialize;

use hexmapr_domain::{DomainError, EntityKind, SectorTree, TreeNode, TreeTag};

use crate::infrastructure::ports::LexiconPort;
use crate::options::ImportOptions;

/// Render payload of one entity journal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayEntity {
    pub name: String,
    pub diagram: Vec<DiagramEntry>,
    pub attributes: Vec<AttributeEntry>,
    pub description: Option<String>,
    pub notes: Vec<AttributeEntry>,
    pub image: Option<String>,
    pub tags: Option<Vec<DisplayTag>>,
    pub show_type: bool,
    #[serde(rename = "type")]
    pub type_name: String,
    pub location: Option<String>,
    pub parent_link: Option<String>,
    pub parent_type: Option<String>,
    pub parent_tags: Option<Vec<DisplayTag>>,
    pub system_link: Option<String>,
    pub system_type: Option<String>,
    pub system_tags: Option<Vec<DisplayTag>>,
    pub children: Vec<DisplayChild>,
    pub coordinates: Option<String>,
}

/// One line of the subtree diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramEntry {
    /// Box-drawing glyphs, one per depth level.
    pub indentation: Vec<char>,
    pub image: String,
    pub link: Option<String>,
    #[serde(rename = "type")]
    pub kind_tag: Option<String>,
    pub tags: Vec<DisplayTag>,
}

/// A generic name/text pair (attributes and note bodies).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeEntry {
    pub name: String,
    pub description: String,
}

/// Summary of one direct child.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayChild {
    pub link: Option<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    pub coordinates: Option<String>,
    pub tags: Vec<DisplayTag>,
}

/// Render payload of one tag journal, also embedded as cross-link data in
/// entity payloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayTag {
    pub name: String,
    pub description: String,
    pub lists: Vec<DisplayList>,
    pub link: Option<String>,
}

/// One categorized string list of a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayList {
    pub name: String,
    pub values: Vec<String>,
}

/// Localization key of an attribute or tag-list key (`techLevel` ->
/// `TECH-LEVEL`).
pub fn attribute_label_key(key: &str) -> String {
    key.to_case(Case::Cobol)
}

/// Location phrase of a node within its direct parent, from the two kind
/// tags alone.
pub fn location_phrase(parent: EntityKind, child: EntityKind) -> &'static str {
    match parent {
        EntityKind::AsteroidBelt => "in an asteroid of",
        EntityKind::Sector => "in",
        EntityKind::System | EntityKind::BlackHole => "in orbit around",
        EntityKind::Moon | EntityKind::Planet => {
            if matches!(child, EntityKind::MoonBase | EntityKind::ResearchBase) {
                "on the surface of"
            } else {
                "in orbit around"
            }
        }
        _ => "in",
    }
}

/// Builds render payloads against one finished tree.
pub struct ContentAssembler<'a> {
    tree: &'a SectorTree,
    lexicon: &'a dyn LexiconPort,
    options: &'a ImportOptions,
}

impl<'a> ContentAssembler<'a> {
    pub fn new(
        tree: &'a SectorTree,
        lexicon: &'a dyn LexiconPort,
        options: &'a ImportOptions,
    ) -> Self {
        Self {
            tree,
            lexicon,
            options,
        }
    }

    /// The full render payload for one entity journal.
    pub fn display_entity(&self, node: &TreeNode) -> Result<DisplayEntity, DomainError> {
        let system = if node.kind() == EntityKind::Sector {
            None
        } else {
            Some(self.tree.containing_system(node.id())?)
        };

        let children = self.child_summaries(node);
        let notes = self.note_bodies(node);

        let mut attributes = Vec::new();
        let mut description = None;
        let mut tags = None;
        for (key, value) in node.entity().attributes().entries() {
            attributes.push(AttributeEntry {
                name: self.lexicon.label(&attribute_label_key(key)),
                description: hexmapr_domain::value_text(value),
            });
        }
        if let Some(text) = node.entity().attributes().description() {
            description = Some(text.to_string());
        }
        if node.entity().attributes().get("tags").is_some() {
            tags = Some(self.display_tags_for(node));
        }

        let parent = node.parent().and_then(|id| self.tree.node(id));
        let include_system_link = system.is_some_and(|system| {
            system.id() != node.id() && Some(system.id()) != parent.map(TreeNode::id)
        });
        let system_linked = system.filter(|_| include_system_link);

        Ok(DisplayEntity {
            name: node.name().to_string(),
            diagram: self.diagram(node),
            attributes,
            description,
            notes,
            image: node.entity().image().map(str::to_string),
            tags,
            show_type: !self.options.add_type_to_entity_journal,
            type_name: self.type_name(node.kind()),
            location: parent.map(|p| location_phrase(p.kind(), node.kind()).to_string()),
            parent_link: parent.and_then(|p| p.journal()).map(|j| j.link.clone()),
            parent_type: parent.map(|p| self.type_name(p.kind())),
            parent_tags: parent.map(|p| self.display_tags_for(p)),
            system_link: system_linked
                .and_then(|s| s.journal())
                .map(|j| j.link.clone()),
            system_type: system_linked.map(|s| self.type_name(s.kind())),
            system_tags: system_linked.map(|s| self.display_tags_for(s)),
            children,
            coordinates: system.and_then(|s| s.coordinates().map(str::to_string)),
        })
    }

    /// The render payload for one tag journal, with the current cross-link
    /// state.
    pub fn display_tag(&self, tag: &TreeTag) -> DisplayTag {
        DisplayTag {
            name: tag.name().to_string(),
            description: tag.tag().description.clone(),
            lists: tag
                .tag()
                .list_categories()
                .into_iter()
                .map(|(key, values)| DisplayList {
                    name: self.lexicon.label(&attribute_label_key(&key)),
                    values,
                })
                .collect(),
            link: tag.journal().map(|journal| journal.link.clone()),
        }
    }

    /// Cross-link data for every tag the node references.
    pub fn display_tags_for(&self, node: &TreeNode) -> Vec<DisplayTag> {
        node.entity()
            .attributes()
            .tags()
            .iter()
            .filter_map(|tag| self.tree.tag(&tag.name))
            .map(|tag| self.display_tag(tag))
            .collect()
    }

    // Indented subtree rendering. Single-node subtrees draw nothing.
    fn diagram(&self, root: &TreeNode) -> Vec<DiagramEntry> {
        let entities: Vec<&TreeNode> = self
            .tree
            .preorder(root.id())
            .into_iter()
            .filter(|node| !node.kind().is_note())
            .collect();

        if entities.len() < 2 {
            return Vec::new();
        }

        entities
            .into_iter()
            .map(|node| {
                let distance = self.tree.distance(root.id(), node.id()).unwrap_or(0);
                let mut indentation = Vec::with_capacity(distance);
                for depth in 0..distance {
                    if depth == distance - 1 {
                        if self.tree.is_last_child(node.id()) {
                            indentation.push('└');
                        } else {
                            indentation.push('├');
                        }
                    } else {
                        indentation.push('│');
                    }
                }
                DiagramEntry {
                    indentation,
                    image: self.options.icon_path(node.kind()),
                    link: if node.id() != root.id() {
                        node.journal().map(|journal| journal.link.clone())
                    } else {
                        None
                    },
                    kind_tag: if !self.options.add_type_to_entity_journal {
                        Some(node.kind().as_tag().to_string())
                    } else {
                        None
                    },
                    tags: self.display_tags_for(node),
                }
            })
            .collect()
    }

    fn child_summaries(&self, node: &TreeNode) -> Vec<DisplayChild> {
        node.children()
            .iter()
            .filter_map(|id| self.tree.node(id))
            .filter(|child| !child.kind().is_note())
            .map(|child| DisplayChild {
                link: child.journal().map(|journal| journal.link.clone()),
                type_name: self.type_name(child.kind()),
                coordinates: child.coordinates().map(str::to_string),
                tags: self.display_tags_for(child),
            })
            .collect()
    }

    fn note_bodies(&self, node: &TreeNode) -> Vec<AttributeEntry> {
        node.children()
            .iter()
            .filter_map(|id| self.tree.node(id))
            .filter(|child| child.kind().is_note())
            .map(|child| AttributeEntry {
                name: child.name().to_string(),
                description: child
                    .entity()
                    .attributes()
                    .content()
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect()
    }

    fn type_name(&self, kind: EntityKind) -> String {
        self.lexicon.label(kind.label_key())
    }
}
