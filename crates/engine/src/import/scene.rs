//! Scene assembly: markers and labels positioned on the hex grid.

use hexmapr_domain::{
    DomainError, GridPosition, HexLayout, SectorTree, TreeNode,
};

use crate::infrastructure::ports::{
    GridKind, GridSpec, LabelSpec, LexiconPort, MarkerSpec, ObjectFlags, SceneSpec,
};
use crate::options::ImportOptions;

/// Scene background color.
pub const BACKGROUND_COLOR: &str = "#01162c";
/// Scene grid color.
pub const GRID_COLOR: &str = "#99caff";

const GRID_ALPHA: f64 = 0.3;
const ICON_TINT: &str = "#ffffff";
const ICON_SIZE: u32 = 32;
const MARKER_FONT_SIZE: u32 = 32;
const LABEL_FONT_SIZE: u32 = 16;
// Labels sit most of a vertical radius above/below their hex center.
const LABEL_SHIFT: f64 = 0.9;

/// Build the full creation data for the sector scene.
pub fn scene_spec(
    tree: &SectorTree,
    layout: &HexLayout,
    options: &ImportOptions,
    lexicon: &dyn LexiconPort,
) -> Result<SceneSpec, DomainError> {
    let root = tree.root();
    let extent = root.entity().extent().ok_or_else(|| {
        DomainError::validation(format!("Sector {} carries no column/row extent", root.id()))
    })?;

    Ok(SceneSpec {
        name: lexicon.format("SCENE-NAME", &[("name", root.name())]),
        width: layout.scene_width(extent.columns),
        height: layout.scene_height(extent.rows),
        background_color: BACKGROUND_COLOR.to_string(),
        background_image: options.background_image.clone(),
        grid: GridSpec {
            size: layout.width() as i64,
            kind: GridKind::HexOddColumn,
            color: GRID_COLOR.to_string(),
            alpha: GRID_ALPHA,
            distance: 1,
            units: lexicon.label("HEX-UNIT-NAME"),
        },
        journal: root.journal().map(|journal| journal.id.clone()),
        markers: sector_markers(tree, layout, options),
        labels: sector_labels(tree, layout, options),
        flags: ObjectFlags::entity(root.id(), root.kind()),
    })
}

// One marker batch per positioned root child: the anchor at its hex center,
// everything else orbiting it.
fn sector_markers(tree: &SectorTree, layout: &HexLayout, options: &ImportOptions) -> Vec<MarkerSpec> {
    let mut markers = Vec::new();

    for child in tree.root().children() {
        let Some(system) = tree.node(child) else {
            continue;
        };
        let Some(position) = system.entity().position() else {
            continue;
        };

        let group: Vec<&TreeNode> = if options.generate_notes_for_all_entities {
            tree.preorder(system.id())
        } else {
            std::iter::once(system)
                .chain(system.children().iter().filter_map(|id| tree.node(id)))
                .collect()
        };

        let center = layout.hex_center(position.column, position.row);
        let count = group.len();
        for (index, node) in group.into_iter().enumerate() {
            let offset = layout.orbit_offset(count, index);
            markers.push(MarkerSpec {
                journal: node.journal().map(|journal| journal.id.clone()),
                position: center.offset_by(offset.dx, offset.dy),
                icon: options.icon_path(node.kind()),
                icon_size: ICON_SIZE,
                tint: ICON_TINT.to_string(),
                text: node.name().to_string(),
                font_size: MARKER_FONT_SIZE,
                anchor: offset.anchor,
            });
        }
    }

    markers
}

fn sector_labels(tree: &SectorTree, layout: &HexLayout, options: &ImportOptions) -> Vec<LabelSpec> {
    let mut labels = Vec::new();
    let shift = LABEL_SHIFT * layout.vertical_radius();

    if options.generate_sector_coordinates {
        if let Some(extent) = tree.root().entity().extent() {
            for row in 0..extent.rows {
                for column in 0..extent.columns {
                    let center = layout.hex_center(column, row);
                    labels.push(LabelSpec {
                        position: center.offset_by(0.0, shift),
                        text: GridPosition::new(column, row).label(),
                        font_size: LABEL_FONT_SIZE,
                        width: None,
                    });
                }
            }
        }
    }

    if options.generate_hex_names {
        for child in tree.root().children() {
            let Some(node) = tree.node(child) else {
                continue;
            };
            let Some(position) = node.entity().position() else {
                continue;
            };
            let center = layout.hex_center(position.column, position.row);
            let mut anchored = center.offset_by(0.0, -shift);
            anchored.x -= (layout.height() / 2.0).floor() as i64;
            labels.push(LabelSpec {
                position: anchored,
                text: node.name().to_string(),
                font_size: LABEL_FONT_SIZE,
                width: Some(layout.height().floor() as i64),
            });
        }
    }

    labels
}
