//! Journal naming and creation data.

use hexmapr_domain::{FolderId, SectorTree, TreeNode};

use crate::import::folders;
use crate::infrastructure::ports::{JournalSpec, LexiconPort, ObjectFlags};
use crate::options::ImportOptions;

/// Journal title for an entity, optionally prefixed with its localized
/// type.
pub fn journal_name(node: &TreeNode, lexicon: &dyn LexiconPort, options: &ImportOptions) -> String {
    if options.add_type_to_entity_journal {
        format!(
            "[{}] {}",
            lexicon.label(node.kind().label_key()),
            node.name()
        )
    } else {
        node.name().to_string()
    }
}

/// Creation data for an entity's empty journal placeholder.
pub fn placeholder_spec(
    tree: &SectorTree,
    node: &TreeNode,
    lexicon: &dyn LexiconPort,
    options: &ImportOptions,
) -> JournalSpec {
    JournalSpec {
        name: journal_name(node, lexicon, options),
        folder: folders::containing_folder(tree, node),
        flags: ObjectFlags::entity(node.id(), node.kind()),
        hidden: options.only_gm_journals || node.entity().hidden(),
        image: node.entity().image().map(str::to_string),
        content: None,
    }
}

/// Creation data for a tag journal. Tag journals are always hidden and are
/// created with their rendered content in place.
pub fn tag_journal_spec(name: &str, folder: FolderId, content: String) -> JournalSpec {
    JournalSpec {
        name: name.to_string(),
        folder: Some(folder),
        flags: ObjectFlags::tag(name),
        hidden: true,
        image: None,
        content: Some(content),
    }
}
