//! Hexmapr Domain - sector entities, the sector tree aggregate, and hex-grid
//! math.
//!
//! Everything in this crate is pure data and deterministic computation. The
//! engine crate layers parsing, ordering, and host-store orchestration on
//! top; nothing here touches a port or performs IO.

pub mod attributes;
pub mod entity;
pub mod error;
pub mod hex;
pub mod ids;
pub mod tree;

pub use attributes::{value_text, Attributes, Tag};
pub use entity::{Entity, EntityKind, GridPosition, MapExtent, ParentLink, Placement};
pub use error::DomainError;
pub use hex::{HexLayout, MarkerAnchor, PixelPoint, RadialOffset};
pub use ids::{DocumentId, EntityId, FolderId, SceneId};
pub use tree::{DocumentHandle, SectorTree, TreeNode, TreeTag};
