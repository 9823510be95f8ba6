//! Sector file parsing.
//!
//! The input is a single JSON object with one sub-table per entity kind,
//! each keyed by entity id. Parsing stamps every record with its own id and
//! the kind tag of the table it came from and produces a flat id -> entity
//! map. Only structural shape is validated here; referential validation is
//! the tree builder's job.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use hexmapr_domain::{
    Attributes, DomainError, Entity, EntityId, EntityKind, GridPosition, MapExtent, ParentLink,
};

use crate::error::ImportError;

type Table = IndexMap<String, RawRecord>;

/// The raw sector file: one sub-table per entity kind. A missing sub-table
/// is a fatal format error; `note` may be null in older exports.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorFile {
    sector: Table,
    system: Table,
    black_hole: Table,
    planet: Table,
    moon: Table,
    asteroid_belt: Table,
    asteroid_base: Table,
    moon_base: Table,
    research_base: Table,
    refueling_station: Table,
    space_station: Table,
    deep_space_station: Table,
    orbital_ruin: Table,
    gas_giant_mine: Table,
    #[serde(default, deserialize_with = "nullable_table")]
    note: Table,
}

impl SectorFile {
    fn tables(&self) -> [(EntityKind, &Table); 15] {
        [
            (EntityKind::Sector, &self.sector),
            (EntityKind::System, &self.system),
            (EntityKind::BlackHole, &self.black_hole),
            (EntityKind::Planet, &self.planet),
            (EntityKind::Moon, &self.moon),
            (EntityKind::AsteroidBelt, &self.asteroid_belt),
            (EntityKind::AsteroidBase, &self.asteroid_base),
            (EntityKind::MoonBase, &self.moon_base),
            (EntityKind::ResearchBase, &self.research_base),
            (EntityKind::RefuelingStation, &self.refueling_station),
            (EntityKind::SpaceStation, &self.space_station),
            (EntityKind::DeepSpaceStation, &self.deep_space_station),
            (EntityKind::OrbitalRuin, &self.orbital_ruin),
            (EntityKind::GasGiantMine, &self.gas_giant_mine),
            (EntityKind::Note, &self.note),
        ]
    }
}

fn nullable_table<'de, D>(deserializer: D) -> Result<Table, D::Error>
where
    D: Deserializer<'de>,
{
    let table = Option::<Table>::deserialize(deserializer)?;
    Ok(table.unwrap_or_default())
}

/// One raw entity record, before kind-specific validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    name: String,
    #[serde(default)]
    created: Option<String>,
    #[serde(default)]
    updated: Option<String>,
    #[serde(default)]
    creator: Option<String>,
    #[serde(default)]
    is_hidden: bool,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    parent_entity: Option<String>,
    #[serde(default)]
    x: Option<u32>,
    #[serde(default)]
    y: Option<u32>,
    #[serde(default)]
    columns: Option<u32>,
    #[serde(default)]
    rows: Option<u32>,
    #[serde(default)]
    attributes: Attributes,
    #[serde(default)]
    image: Option<String>,
}

/// Parse a serialized sector file into the flat entity map, in fixed table
/// order (file order within each table).
pub fn parse_sector_file(raw: &str) -> Result<IndexMap<EntityId, Entity>, ImportError> {
    let file: SectorFile = serde_json::from_str(raw)?;
    entities_from_file(file)
}

/// Parse an already-deserialized JSON value.
pub fn parse_sector_value(value: Value) -> Result<IndexMap<EntityId, Entity>, ImportError> {
    let file: SectorFile = serde_json::from_value(value)?;
    entities_from_file(file)
}

fn entities_from_file(file: SectorFile) -> Result<IndexMap<EntityId, Entity>, ImportError> {
    let mut entities = IndexMap::new();
    for (kind, table) in file.tables() {
        for (id, record) in table {
            let entity = convert_record(EntityId::from(id.as_str()), kind, record)?;
            entities.insert(entity.id().clone(), entity);
        }
    }
    Ok(entities)
}

fn convert_record(
    id: EntityId,
    kind: EntityKind,
    record: &RawRecord,
) -> Result<Entity, DomainError> {
    let mut entity = Entity::new(id.clone(), kind, record.name.clone())
        .with_hidden(record.is_hidden)
        .with_attributes(record.attributes.clone())
        .with_timestamps(
            parse_timestamp(record.created.as_deref()),
            parse_timestamp(record.updated.as_deref()),
        );

    if let Some(creator) = &record.creator {
        entity = entity.with_creator(creator.clone());
    }
    if let Some(image) = &record.image {
        entity = entity.with_image(image.clone());
    }

    entity = match (&record.parent, &record.parent_entity) {
        (Some(parent), Some(parent_kind)) => {
            let parent_kind: EntityKind = parent_kind.parse()?;
            entity.with_parent(ParentLink::new(parent.as_str(), parent_kind))
        }
        (Some(parent), None) => {
            return Err(DomainError::validation(format!(
                "Entity {id} references parent {parent} without a parent kind"
            )));
        }
        _ => entity,
    };

    if kind.is_positioned() {
        let (Some(x), Some(y)) = (record.x, record.y) else {
            return Err(DomainError::validation(format!(
                "Entity {id} is a {kind} but carries no grid coordinates"
            )));
        };
        entity = entity.with_position(GridPosition::from_file(x, y)?);
    }

    if kind == EntityKind::Sector {
        let (Some(columns), Some(rows)) = (record.columns, record.rows) else {
            return Err(DomainError::validation(format!(
                "Sector {id} carries no column/row extent"
            )));
        };
        entity = entity.with_extent(MapExtent { columns, rows });
    }

    Ok(entity)
}

// Timestamps are display-only metadata; malformed ones are carried as None
// rather than failing the import.
fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|text| {
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc))
    })
}
