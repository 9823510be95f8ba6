//! Folder naming and resolution.

use hexmapr_domain::{EntityKind, FolderId, SectorTree, TreeNode};

use crate::infrastructure::ports::{FolderSpec, LexiconPort, ObjectFlags};
use crate::options::ImportOptions;

/// Creation data for the top-level sector folder.
pub fn sector_folder_spec(root: &TreeNode, lexicon: &dyn LexiconPort) -> FolderSpec {
    FolderSpec {
        name: lexicon.format("SECTOR-FOLDER-NAME", &[("name", root.name())]),
        parent: None,
        flags: ObjectFlags::entity(root.id(), root.kind()),
    }
}

/// Creation data for one system/black-hole folder under the sector folder.
pub fn system_folder_spec(
    node: &TreeNode,
    options: &ImportOptions,
    parent: FolderId,
) -> FolderSpec {
    let name = match (node.kind(), node.coordinates()) {
        (EntityKind::System | EntityKind::BlackHole, Some(coordinates))
            if options.prefix_system_folders_with_coordinates =>
        {
            format!("[{coordinates}] {}", node.name())
        }
        _ => node.name().to_string(),
    };

    FolderSpec {
        name,
        parent: Some(parent),
        flags: ObjectFlags::entity(node.id(), node.kind()),
    }
}

/// Creation data for the tag folder under the sector folder, flagged with
/// the root entity.
pub fn tag_folder_spec(
    root: &TreeNode,
    lexicon: &dyn LexiconPort,
    parent: FolderId,
) -> FolderSpec {
    FolderSpec {
        name: lexicon.label("TAG-FOLDER-NAME"),
        parent: Some(parent),
        flags: ObjectFlags::entity(root.id(), root.kind()),
    }
}

/// The folder an entity's journal belongs into: the node's own folder or
/// the nearest ancestor's.
pub fn containing_folder(tree: &SectorTree, node: &TreeNode) -> Option<FolderId> {
    let mut current = node;
    loop {
        if let Some(folder) = current.folder() {
            return Some(folder.clone());
        }
        current = tree.node(current.parent()?)?;
    }
}
