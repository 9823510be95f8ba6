//! Document store port - the host's persistent object boundary.
//!
//! The engine drives folder, journal, and scene creation through this trait
//! and never talks to a concrete store. Every created object carries the
//! flags of its source entity or tag so later phases (and the host) can
//! match objects back to tree nodes by identity rather than by completion
//! order.

use async_trait::async_trait;
use serde::Serialize;

use hexmapr_domain::{
    DocumentHandle, DocumentId, EntityId, EntityKind, FolderId, MarkerAnchor, PixelPoint, SceneId,
};

use super::error::StoreError;

/// Identity flags stamped on every created host object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectFlags {
    pub id: String,
    pub kind: String,
}

impl ObjectFlags {
    pub fn entity(id: &EntityId, kind: EntityKind) -> Self {
        Self {
            id: id.to_string(),
            kind: kind.as_tag().to_string(),
        }
    }

    pub fn tag(name: &str) -> Self {
        Self {
            id: name.to_string(),
            kind: "tag".to_string(),
        }
    }
}

/// Creation data of a journal folder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderSpec {
    pub name: String,
    pub parent: Option<FolderId>,
    pub flags: ObjectFlags,
}

/// Creation data of a journal document. Placeholders carry no content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSpec {
    pub name: String,
    pub folder: Option<FolderId>,
    pub flags: ObjectFlags,
    pub hidden: bool,
    pub image: Option<String>,
    pub content: Option<String>,
}

/// Grid style of the sector scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    pub size: i64,
    pub kind: GridKind,
    pub color: String,
    pub alpha: f64,
    pub distance: u32,
    pub units: String,
}

/// Hex grid orientation supported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GridKind {
    /// Flat-top hexes, odd columns raised.
    HexOddColumn,
    /// Flat-top hexes, even columns raised.
    HexEvenColumn,
}

/// One map marker, anchored to a journal when the node has one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSpec {
    pub journal: Option<DocumentId>,
    pub position: PixelPoint,
    pub icon: String,
    pub icon_size: u32,
    pub tint: String,
    pub text: String,
    pub font_size: u32,
    pub anchor: MarkerAnchor,
}

/// One drawing label on the scene canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSpec {
    pub position: PixelPoint,
    pub text: String,
    pub font_size: u32,
    pub width: Option<i64>,
}

/// Creation data of the sector scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSpec {
    pub name: String,
    pub width: i64,
    pub height: i64,
    pub background_color: String,
    pub background_image: Option<String>,
    pub grid: GridSpec,
    pub journal: Option<DocumentId>,
    pub markers: Vec<MarkerSpec>,
    pub labels: Vec<LabelSpec>,
    pub flags: ObjectFlags,
}

/// The host document store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStorePort: Send + Sync {
    /// Create a folder, returning its assigned id.
    async fn create_folder(&self, spec: FolderSpec) -> Result<FolderId, StoreError>;

    /// Create a journal document, returning its handle (id + cross-link).
    async fn create_document(&self, spec: JournalSpec) -> Result<DocumentHandle, StoreError>;

    /// Replace a document's rendered content.
    async fn update_document_content(
        &self,
        id: &DocumentId,
        content: String,
    ) -> Result<(), StoreError>;

    /// Create the sector scene with its markers and labels.
    async fn create_scene(&self, spec: SceneSpec) -> Result<SceneId, StoreError>;

    /// Flags round-trip: which entity or tag a document was created for.
    async fn lookup_flags(&self, id: &DocumentId) -> Result<Option<ObjectFlags>, StoreError>;
}
