//! Import options.

use hexmapr_domain::EntityKind;

/// Knobs of one import run, defaults matching the shipped module
/// configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    /// Draw a coordinate label on every grid cell.
    pub generate_sector_coordinates: bool,
    /// Place markers for the whole subtree of a system instead of the
    /// system and its direct children.
    pub generate_notes_for_all_entities: bool,
    /// Force every entity journal hidden regardless of the entity's own
    /// visibility flag.
    pub only_gm_journals: bool,
    /// Prefix journal names with the localized type (`[Planet] Topaz`).
    pub add_type_to_entity_journal: bool,
    /// Draw each system's name above its hex.
    pub generate_hex_names: bool,
    /// Prefix system folders with the hex label (`[0204] Asellus`).
    pub prefix_system_folders_with_coordinates: bool,
    /// Base path of the marker icon set.
    pub image_base_path: String,
    /// Scene background image.
    pub background_image: Option<String>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        let image_base_path = "modules/hexmapr/images".to_string();
        let background_image = Some(format!("{image_base_path}/starField.png"));
        Self {
            generate_sector_coordinates: true,
            generate_notes_for_all_entities: false,
            only_gm_journals: true,
            add_type_to_entity_journal: true,
            generate_hex_names: true,
            prefix_system_folders_with_coordinates: true,
            image_base_path,
            background_image,
        }
    }
}

impl ImportOptions {
    /// Marker icon for an entity kind.
    pub fn icon_path(&self, kind: EntityKind) -> String {
        format!("{}/{}.png", self.image_base_path, kind.as_tag())
    }
}
