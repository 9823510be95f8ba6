//! Default English lexicon adapter.

use super::ports::LexiconPort;

/// Built-in English display strings. Hosts with a translation layer supply
/// their own `LexiconPort` instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLexicon;

impl LexiconPort for EnglishLexicon {
    fn label(&self, key: &str) -> String {
        let text = match key {
            // Entity kinds
            "SECTOR" => "Sector",
            "SYSTEM" => "System",
            "BLACK-HOLE" => "Black Hole",
            "PLANET" => "Planet",
            "MOON" => "Moon",
            "ASTEROID-BELT" => "Asteroid Belt",
            "ASTEROID-BASE" => "Asteroid Base",
            "MOON-BASE" => "Moon Base",
            "RESEARCH-BASE" => "Research Base",
            "REFUELING-STATION" => "Refueling Station",
            "SPACE-STATION" => "Space Station",
            "DEEP-SPACE-STATION" => "Deep Space Station",
            "ORBITAL-RUIN" => "Orbital Ruin",
            "GAS-GIANT-MINE" => "Gas Giant Mine",
            "NOTE" => "Note",
            // Attributes
            "OCCUPATION" => "Occupation",
            "SITUATION" => "Situation",
            "ATMOSPHERE" => "Atmosphere",
            "BIOSPHERE" => "Biosphere",
            "POPULATION" => "Population",
            "TECH-LEVEL" => "Tech Level",
            "TEMPERATURE" => "Temperature",
            "CONTENT" => "Content",
            // Tag list categories
            "COMPLICATIONS" => "Complications",
            "ENEMIES" => "Enemies",
            "FRIENDS" => "Friends",
            "PLACES" => "Places",
            "THINGS" => "Things",
            // Names and formats
            "SECTOR-FOLDER-NAME" => "{name} Sector",
            "TAG-FOLDER-NAME" => "Tags",
            "SCENE-NAME" => "{name} Sector Map",
            "HEX-UNIT-NAME" => "hex",
            // Unknown keys fall back to themselves
            other => other,
        };
        text.to_string()
    }
}
