//! Shared sector-file fixtures for tests.

use serde_json::{json, Value};

use hexmapr_domain::EntityKind;

/// A sector file under construction. Starts from the minimal valid file
/// (every sub-table present, one sector entity named Hydri).
pub struct SectorFixture {
    value: Value,
}

impl SectorFixture {
    fn new() -> Self {
        let mut value = json!({});
        let tables = value.as_object_mut().expect("fixture root is an object");
        for kind in EntityKind::ALL {
            tables.insert(kind.as_tag().to_string(), json!({}));
        }
        tables.insert(
            "sector".to_string(),
            json!({
                "sector-1": { "name": "Hydri", "columns": 8, "rows": 10 }
            }),
        );
        Self { value }
    }

    /// Insert one record into a sub-table.
    pub fn entity(&mut self, table: &str, id: &str, record: Value) {
        self.value
            .get_mut(table)
            .and_then(Value::as_object_mut)
            .expect("known sub-table")
            .insert(id.to_string(), record);
    }

    pub fn system(&mut self, id: &str, record: Value) {
        self.entity("system", id, record);
    }

    /// Resize the sector map.
    pub fn set_extent(&mut self, columns: u32, rows: u32) {
        let sector = self
            .value
            .get_mut("sector")
            .and_then(|t| t.get_mut("sector-1"))
            .and_then(Value::as_object_mut)
            .expect("sector entity present");
        sector.insert("columns".to_string(), json!(columns));
        sector.insert("rows".to_string(), json!(rows));
    }
}

/// The minimal valid sector file: just the sector entity.
pub fn minimal_sector() -> Value {
    SectorFixture::new().value
}

/// The minimal file plus whatever the builder closure adds.
pub fn sector_with(build: impl FnOnce(&mut SectorFixture)) -> Value {
    let mut fixture = SectorFixture::new();
    build(&mut fixture);
    fixture.value
}

/// A sector exercising every structural feature: a system with a planet
/// (moon, moon base, GM note), an asteroid belt with a base, a deep-space
/// station, and a tag referenced twice with diverging content.
pub fn populated_sector() -> Value {
    sector_with(|file| {
        file.system(
            "sys-1",
            json!({
                "name": "Asellus",
                "parent": "sector-1",
                "parentEntity": "sector",
                "x": 1,
                "y": 1
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
                    "description": "A dry world.",
                    "atmosphere": "Thin",
                    "techLevel": "TL4",
                    "tags": [{
                        "name": "Old Rival",
                        "description": "First sighting.",
                        "enemies": ["Corrupt examiner"]
                    }]
                }
            }),
        );
        file.entity(
            "moon",
            "moon-1",
            json!({ "name": "Shade", "parent": "pl-1", "parentEntity": "planet" }),
        );
        file.entity(
            "moonBase",
            "mb-1",
            json!({
                "name": "Shade Station",
                "parent": "moon-1",
                "parentEntity": "moon",
                "attributes": {
                    "tags": [{ "name": "Old Rival", "description": "Contradictory lore." }]
                }
            }),
        );
        file.entity(
            "note",
            "note-1",
            json!({
                "name": "GM note",
                "parent": "pl-1",
                "parentEntity": "planet",
                "attributes": { "content": "Keep an eye on this one." }
            }),
        );
        file.entity(
            "asteroidBelt",
            "belt-1",
            json!({ "name": "Shattered Ring", "parent": "sys-1", "parentEntity": "system" }),
        );
        file.entity(
            "asteroidBase",
            "ab-1",
            json!({
                "name": "Ring Hold",
                "parent": "belt-1",
                "parentEntity": "asteroidBelt"
            }),
        );
        file.entity(
            "deepSpaceStation",
            "dss-1",
            json!({
                "name": "Farwatch",
                "parent": "sys-1",
                "parentEntity": "system",
                "isHidden": true
            }),
        );
    })
}
