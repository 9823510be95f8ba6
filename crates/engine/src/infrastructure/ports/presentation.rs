//! Presentation ports - template rendering and display-string lookup.
//!
//! The engine only supplies data maps; markup generation and translation
//! live with the host.

use async_trait::async_trait;

use hexmapr_domain::EntityKind;

use crate::content::{DisplayEntity, DisplayTag};

use super::error::StoreError;

/// Which journal template a node renders through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityTemplate {
    Sector,
    /// Systems and black holes share the star template.
    Star,
    Entity,
}

impl EntityTemplate {
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Sector => Self::Sector,
            EntityKind::System | EntityKind::BlackHole => Self::Star,
            _ => Self::Entity,
        }
    }
}

/// External template renderer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateRendererPort: Send + Sync {
    /// Render one entity journal's content.
    async fn render_entity(
        &self,
        template: EntityTemplate,
        data: &DisplayEntity,
    ) -> Result<String, StoreError>;

    /// Render one tag journal's content.
    async fn render_tag(&self, data: &DisplayTag) -> Result<String, StoreError>;
}

/// Display-string lookup by UPPER-KEBAB key. Unknown keys fall back to the
/// key itself, so a missing translation never breaks an import.
pub trait LexiconPort: Send + Sync {
    fn label(&self, key: &str) -> String;

    /// Resolve a label and substitute `{placeholder}` arguments.
    fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.label(key);
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }
}
