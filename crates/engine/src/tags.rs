//! Tag registry construction.
//!
//! Scans every node's attribute bag and registers each distinct tag name
//! once, sector-wide. The first occurrence supplies the tag's content;
//! later references to the same name only gain the cross-link.

use hexmapr_domain::{SectorTree, Tag};

/// Collect all distinct tags referenced across the tree into its registry,
/// in node/file order.
pub fn index_tags(tree: &mut SectorTree) {
    let referenced: Vec<Tag> = tree
        .nodes()
        .flat_map(|node| node.entity().attributes().tags())
        .collect();

    for tag in referenced {
        tree.register_tag(tag);
    }

    tracing::debug!(tags = tree.tag_count(), "tag registry built");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sector_value;
    use crate::test_fixtures::sector_with;
    use crate::tree_builder::build_tree;
    use serde_json::json;

    #[test]
    fn test_duplicate_tag_names_keep_first_description() {
        let value = sector_with(|file| {
            file.system(
                "sys-1",
                json!({
                    "name": "Asellus",
                    "parent": "sector-1",
                    "parentEntity": "sector",
                    "x": 1,
                    "y": 1,
                    "attributes": {
                        "tags": [{ "name": "Old Rival", "description": "First sighting." }]
                    }
                }),
            );
            file.entity(
                "planet",
                "pl-1",
                json!({
                    "name": "Topaz",
                    "parent": "sys-1",
                    "parentEntity": "system",
                    "attributes": {
                        "tags": [{ "name": "Old Rival", "description": "Contradictory lore." }]
                    }
                }),
            );
        });

        let entities = parse_sector_value(value).expect("fixture should parse");
        let mut tree = build_tree(entities).expect("fixture should build");
        index_tags(&mut tree);

        assert_eq!(tree.tag_count(), 1);
        let tag = tree.tag("Old Rival").expect("registered tag");
        assert_eq!(tag.tag().description, "First sighting.");
    }

    #[test]
    fn test_distinct_tags_register_in_file_order() {
        let value = sector_with(|file| {
            file.system(
                "sys-1",
                json!({
                    "name": "Asellus",
                    "parent": "sector-1",
                    "parentEntity": "sector",
                    "x": 1,
                    "y": 1,
                    "attributes": {
                        "tags": [{ "name": "Mandarinate" }, { "name": "Pirates" }]
                    }
                }),
            );
        });

        let entities = parse_sector_value(value).expect("fixture should parse");
        let mut tree = build_tree(entities).expect("fixture should build");
        index_tags(&mut tree);

        let names: Vec<&str> = tree.tags().map(|tag| tag.name()).collect();
        assert_eq!(names, vec!["Mandarinate", "Pirates"]);
    }
}
