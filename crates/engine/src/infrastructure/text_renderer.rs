//! Plain-text renderer adapter.
//!
//! A deterministic, markup-free rendering of the journal payloads. Hosts
//! with a template engine implement `TemplateRendererPort` against their own
//! templates; this adapter keeps tests and dry runs readable.

use async_trait::async_trait;

use crate::content::{DisplayEntity, DisplayTag};

use super::ports::{EntityTemplate, StoreError, TemplateRendererPort};

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

#[async_trait]
impl TemplateRendererPort for PlainTextRenderer {
    async fn render_entity(
        &self,
        _template: EntityTemplate,
        data: &DisplayEntity,
    ) -> Result<String, StoreError> {
        let mut lines = Vec::new();

        if data.show_type {
            lines.push(format!("{} ({})", data.name, data.type_name));
        } else {
            lines.push(data.name.clone());
        }

        if let (Some(location), Some(parent_type)) = (&data.location, &data.parent_type) {
            lines.push(format!("Located {location} a {parent_type}"));
        }
        if let Some(coordinates) = &data.coordinates {
            lines.push(format!("Hex {coordinates}"));
        }
        if let Some(description) = &data.description {
            lines.push(description.clone());
        }

        for attribute in &data.attributes {
            lines.push(format!("{}: {}", attribute.name, attribute.description));
        }
        if let Some(tags) = &data.tags {
            for tag in tags {
                lines.push(format!("Tag: {}", tag.name));
            }
        }
        for note in &data.notes {
            lines.push(format!("{}: {}", note.name, note.description));
        }
        for child in &data.children {
            match &child.coordinates {
                Some(coordinates) => {
                    lines.push(format!("Contains {} [{coordinates}]", child.type_name));
                }
                None => lines.push(format!("Contains {}", child.type_name)),
            }
        }
        for entry in &data.diagram {
            let indent: String = entry.indentation.iter().collect();
            let label = entry
                .link
                .clone()
                .or_else(|| entry.kind_tag.clone())
                .unwrap_or_default();
            lines.push(format!("{indent}{label}"));
        }

        Ok(lines.join("\n"))
    }

    async fn render_tag(&self, data: &DisplayTag) -> Result<String, StoreError> {
        let mut lines = vec![data.name.clone()];
        if !data.description.is_empty() {
            lines.push(data.description.clone());
        }
        for list in &data.lists {
            lines.push(format!("{}: {}", list.name, list.values.join(", ")));
        }
        Ok(lines.join("\n"))
    }
}
