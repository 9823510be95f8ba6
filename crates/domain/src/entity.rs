//! Sector entities.
//!
//! An entity is one object of the campaign map: the sector itself, a star
//! system or black hole anchoring a hex cell, or any of the orbiting bodies
//! and installations beneath them. Spatial placement is discriminated by the
//! kind tag (`Placement` sum type), never by probing for coordinate fields.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attributes::Attributes;
use crate::error::DomainError;
use crate::ids::EntityId;

/// Closed set of entity kinds appearing in a sector file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Sector,
    System,
    BlackHole,
    Planet,
    Moon,
    AsteroidBelt,
    AsteroidBase,
    MoonBase,
    ResearchBase,
    RefuelingStation,
    SpaceStation,
    DeepSpaceStation,
    OrbitalRuin,
    GasGiantMine,
    Note,
}

impl EntityKind {
    pub const ALL: [EntityKind; 15] = [
        EntityKind::Sector,
        EntityKind::System,
        EntityKind::BlackHole,
        EntityKind::Planet,
        EntityKind::Moon,
        EntityKind::AsteroidBelt,
        EntityKind::AsteroidBase,
        EntityKind::MoonBase,
        EntityKind::ResearchBase,
        EntityKind::RefuelingStation,
        EntityKind::SpaceStation,
        EntityKind::DeepSpaceStation,
        EntityKind::OrbitalRuin,
        EntityKind::GasGiantMine,
        EntityKind::Note,
    ];

    /// Systems and black holes anchor a hex cell; everything else inherits
    /// placement from its containing system.
    pub fn is_positioned(self) -> bool {
        matches!(self, Self::System | Self::BlackHole)
    }

    pub fn is_note(self) -> bool {
        matches!(self, Self::Note)
    }

    /// The camelCase tag used by the sector file format.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Sector => "sector",
            Self::System => "system",
            Self::BlackHole => "blackHole",
            Self::Planet => "planet",
            Self::Moon => "moon",
            Self::AsteroidBelt => "asteroidBelt",
            Self::AsteroidBase => "asteroidBase",
            Self::MoonBase => "moonBase",
            Self::ResearchBase => "researchBase",
            Self::RefuelingStation => "refuelingStation",
            Self::SpaceStation => "spaceStation",
            Self::DeepSpaceStation => "deepSpaceStation",
            Self::OrbitalRuin => "orbitalRuin",
            Self::GasGiantMine => "gasGiantMine",
            Self::Note => "note",
        }
    }

    /// Localization key for the kind's display name.
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Sector => "SECTOR",
            Self::System => "SYSTEM",
            Self::BlackHole => "BLACK-HOLE",
            Self::Planet => "PLANET",
            Self::Moon => "MOON",
            Self::AsteroidBelt => "ASTEROID-BELT",
            Self::AsteroidBase => "ASTEROID-BASE",
            Self::MoonBase => "MOON-BASE",
            Self::ResearchBase => "RESEARCH-BASE",
            Self::RefuelingStation => "REFUELING-STATION",
            Self::SpaceStation => "SPACE-STATION",
            Self::DeepSpaceStation => "DEEP-SPACE-STATION",
            Self::OrbitalRuin => "ORBITAL-RUIN",
            Self::GasGiantMine => "GAS-GIANT-MINE",
            Self::Note => "NOTE",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for EntityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_tag() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown entity kind: {s}")))
    }
}

/// Parent reference carried by every non-sector entity: the owning entity's
/// id plus its kind tag, which tells a direct system/black-hole parent apart
/// from a deeper chain that must be walked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentLink {
    pub id: EntityId,
    pub kind: EntityKind,
}

impl ParentLink {
    pub fn new(id: impl Into<EntityId>, kind: EntityKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

/// Zero-based hex cell occupied by a positioned entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub column: u32,
    pub row: u32,
}

impl GridPosition {
    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Convert the sector file's 1-based coordinates.
    pub fn from_file(x: u32, y: u32) -> Result<Self, DomainError> {
        if x == 0 || y == 0 {
            return Err(DomainError::validation(format!(
                "Grid coordinates start at 1, got ({x}, {y})"
            )));
        }
        Ok(Self {
            column: x - 1,
            row: y - 1,
        })
    }

    /// Canonical human-readable hex label: two zero-padded decimal pairs,
    /// column first (column 3, row 11 -> "0311").
    pub fn label(&self) -> String {
        format!("{:02}{:02}", self.column, self.row)
    }
}

/// Spatial placement, discriminated by the kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    Positioned(GridPosition),
    Unpositioned,
}

impl Placement {
    pub fn position(&self) -> Option<GridPosition> {
        match self {
            Self::Positioned(position) => Some(*position),
            Self::Unpositioned => None,
        }
    }
}

/// Hex-cell extent of the whole sector map, carried by the sector entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapExtent {
    pub columns: u32,
    pub rows: u32,
}

/// One sector object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    name: String,
    created: Option<DateTime<Utc>>,
    updated: Option<DateTime<Utc>>,
    creator: Option<String>,
    hidden: bool,
    parent: Option<ParentLink>,
    placement: Placement,
    extent: Option<MapExtent>,
    attributes: Attributes,
    image: Option<String>,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>, kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            created: None,
            updated: None,
            creator: None,
            hidden: false,
            parent: None,
            placement: Placement::Unpositioned,
            extent: None,
            attributes: Attributes::new(),
            image: None,
        }
    }

    // Builder-style methods

    pub fn with_parent(mut self, parent: ParentLink) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_position(mut self, position: GridPosition) -> Self {
        self.placement = Placement::Positioned(position);
        self
    }

    pub fn with_extent(mut self, extent: MapExtent) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn with_timestamps(
        mut self,
        created: Option<DateTime<Utc>>,
        updated: Option<DateTime<Utc>>,
    ) -> Self {
        self.created = created;
        self.updated = updated;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    // Read-only accessors

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated
    }

    pub fn creator(&self) -> Option<&str> {
        self.creator.as_deref()
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn parent(&self) -> Option<&ParentLink> {
        self.parent.as_ref()
    }

    pub fn parent_id(&self) -> Option<&EntityId> {
        self.parent.as_ref().map(|link| &link.id)
    }

    pub fn parent_kind(&self) -> Option<EntityKind> {
        self.parent.as_ref().map(|link| link.kind)
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn position(&self) -> Option<GridPosition> {
        self.placement.position()
    }

    pub fn extent(&self) -> Option<MapExtent> {
        self.extent
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}
