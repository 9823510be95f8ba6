//! The import pipeline.
//!
//! Drives the host document store through a strict phase sequence: sector
//! folder, system folders, entity journal placeholders, tag journals,
//! journal content, and finally the scene. Each phase fans its store calls
//! out concurrently but completes as a whole before the next phase starts,
//! because later phases resolve cross-links through the documents already
//! attached to the tree. A failure anywhere aborts the run; nothing is
//! retried or rolled back.

mod folders;
mod journals;
mod scene;

pub use scene::{BACKGROUND_COLOR, GRID_COLOR};

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::try_join_all;

use hexmapr_domain::{
    DocumentHandle, DocumentId, EntityId, FolderId, HexLayout, SceneId, SectorTree,
};

use crate::content::{ContentAssembler, DisplayEntity};
use crate::error::ImportError;
use crate::infrastructure::ports::{
    DocumentStorePort, EntityTemplate, LexiconPort, StoreError, TemplateRendererPort,
};
use crate::options::ImportOptions;
use crate::parser;
use crate::tags;
use crate::tree_builder;

/// Outcome of a completed import run, including the finished tree with all
/// host handles attached.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub sector_name: String,
    pub journals_created: usize,
    pub tags_created: usize,
    pub scene: SceneId,
    pub elapsed: Duration,
    pub tree: SectorTree,
}

/// One-shot sector importer bound to the host's ports.
pub struct SectorImporter {
    store: Arc<dyn DocumentStorePort>,
    renderer: Arc<dyn TemplateRendererPort>,
    lexicon: Arc<dyn LexiconPort>,
    options: ImportOptions,
    layout: HexLayout,
}

impl SectorImporter {
    pub fn new(
        store: Arc<dyn DocumentStorePort>,
        renderer: Arc<dyn TemplateRendererPort>,
        lexicon: Arc<dyn LexiconPort>,
        options: ImportOptions,
    ) -> Self {
        Self {
            store,
            renderer,
            lexicon,
            options,
            layout: HexLayout::default(),
        }
    }

    /// Import a serialized sector file.
    pub async fn import_str(&self, raw: &str) -> Result<ImportReport, ImportError> {
        let entities = parser::parse_sector_file(raw)?;
        self.import_entities(entities).await
    }

    /// Import an already-deserialized sector file.
    pub async fn import_value(
        &self,
        value: serde_json::Value,
    ) -> Result<ImportReport, ImportError> {
        let entities = parser::parse_sector_value(value)?;
        self.import_entities(entities).await
    }

    async fn import_entities(
        &self,
        entities: indexmap::IndexMap<EntityId, hexmapr_domain::Entity>,
    ) -> Result<ImportReport, ImportError> {
        let started = Instant::now();

        let mut tree = tree_builder::build_tree(entities)?;
        tags::index_tags(&mut tree);

        tracing::info!(
            sector = tree.root().name(),
            nodes = tree.len(),
            tags = tree.tag_count(),
            "importing sector"
        );

        let scene = self.run_phases(&mut tree).await?;

        let report = ImportReport {
            sector_name: tree.root().name().to_string(),
            journals_created: tree.nodes().filter(|node| node.journal().is_some()).count(),
            tags_created: tree.tag_count(),
            scene,
            elapsed: started.elapsed(),
            tree,
        };
        tracing::info!(
            journals = report.journals_created,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "sector import finished"
        );
        Ok(report)
    }

    async fn run_phases(&self, tree: &mut SectorTree) -> Result<SceneId, ImportError> {
        let sector_folder = self.create_sector_folder(tree).await?;
        self.create_system_folders(tree, &sector_folder).await?;
        self.create_entity_journals(tree).await?;
        self.create_tag_journals(tree, &sector_folder).await?;
        self.update_journal_contents(tree).await?;
        self.create_scene(tree).await
    }

    async fn create_sector_folder(&self, tree: &mut SectorTree) -> Result<FolderId, ImportError> {
        let spec = folders::sector_folder_spec(tree.root(), self.lexicon.as_ref());
        let folder = self.store.create_folder(spec).await?;

        let root = tree.root_id().clone();
        if let Some(node) = tree.node_mut(&root) {
            node.attach_folder(folder.clone());
        }
        tracing::debug!(%folder, "sector folder created");
        Ok(folder)
    }

    async fn create_system_folders(
        &self,
        tree: &mut SectorTree,
        sector_folder: &FolderId,
    ) -> Result<(), ImportError> {
        let specs: Vec<_> = tree
            .root()
            .children()
            .iter()
            .filter_map(|id| tree.node(id))
            .filter(|node| !node.kind().is_note())
            .map(|node| {
                (
                    node.id().clone(),
                    folders::system_folder_spec(node, &self.options, sector_folder.clone()),
                )
            })
            .collect();

        let creations = specs.into_iter().map(|(id, spec)| {
            let store = Arc::clone(&self.store);
            async move { store.create_folder(spec).await.map(|folder| (id, folder)) }
        });

        let created = try_join_all(creations).await?;
        let count = created.len();
        for (id, folder) in created {
            if let Some(node) = tree.node_mut(&id) {
                node.attach_folder(folder);
            }
        }
        tracing::debug!(count, "system folders created");
        Ok(())
    }

    async fn create_entity_journals(&self, tree: &mut SectorTree) -> Result<(), ImportError> {
        let specs: Vec<(EntityId, _)> = tree
            .nodes()
            .filter(|node| !node.kind().is_note())
            .map(|node| {
                (
                    node.id().clone(),
                    journals::placeholder_spec(tree, node, self.lexicon.as_ref(), &self.options),
                )
            })
            .collect();

        let creations = specs.into_iter().map(|(id, spec)| {
            let store = Arc::clone(&self.store);
            async move { store.create_document(spec).await.map(|handle| (id, handle)) }
        });

        let created: Vec<(EntityId, DocumentHandle)> = try_join_all(creations).await?;
        let count = created.len();
        for (id, handle) in created {
            if let Some(node) = tree.node_mut(&id) {
                node.attach_journal(handle);
            }
        }
        tracing::debug!(count, "entity journal placeholders created");
        Ok(())
    }

    async fn create_tag_journals(
        &self,
        tree: &mut SectorTree,
        sector_folder: &FolderId,
    ) -> Result<(), ImportError> {
        let tag_folder = self
            .store
            .create_folder(folders::tag_folder_spec(
                tree.root(),
                self.lexicon.as_ref(),
                sector_folder.clone(),
            ))
            .await?;

        let payloads: Vec<(String, _)> = {
            let assembler = ContentAssembler::new(tree, self.lexicon.as_ref(), &self.options);
            tree.tags()
                .map(|tag| (tag.name().to_string(), assembler.display_tag(tag)))
                .collect()
        };

        let creations = payloads.into_iter().map(|(name, display)| {
            let store = Arc::clone(&self.store);
            let renderer = Arc::clone(&self.renderer);
            let folder = tag_folder.clone();
            async move {
                let content = renderer.render_tag(&display).await?;
                let handle = store
                    .create_document(journals::tag_journal_spec(&name, folder, content))
                    .await?;
                Ok::<_, StoreError>((name, handle))
            }
        });

        let created = try_join_all(creations).await?;
        let count = created.len();
        for (name, handle) in created {
            if let Some(tag) = tree.tag_mut(&name) {
                tag.attach_journal(handle);
            }
        }
        tracing::debug!(count, "tag journals created");
        Ok(())
    }

    async fn update_journal_contents(&self, tree: &mut SectorTree) -> Result<(), ImportError> {
        let assembler = ContentAssembler::new(tree, self.lexicon.as_ref(), &self.options);
        let mut payloads: Vec<(DocumentId, EntityTemplate, DisplayEntity)> = Vec::new();
        for node in tree.nodes().filter(|node| !node.kind().is_note()) {
            let journal = node.journal().ok_or_else(|| ImportError::MissingJournal {
                id: node.id().clone(),
            })?;
            payloads.push((
                journal.id.clone(),
                EntityTemplate::for_kind(node.kind()),
                assembler.display_entity(node)?,
            ));
        }

        let updates = payloads.into_iter().map(|(id, template, display)| {
            let store = Arc::clone(&self.store);
            let renderer = Arc::clone(&self.renderer);
            async move {
                let content = renderer.render_entity(template, &display).await?;
                store.update_document_content(&id, content).await
            }
        });

        let updated = try_join_all(updates).await?;
        tracing::debug!(count = updated.len(), "journal contents updated");
        Ok(())
    }

    async fn create_scene(&self, tree: &SectorTree) -> Result<SceneId, ImportError> {
        let spec = scene::scene_spec(tree, &self.layout, &self.options, self.lexicon.as_ref())?;
        let scene = self.store.create_scene(spec).await?;
        tracing::debug!(%scene, "sector scene created");
        Ok(scene)
    }
}
