use std::sync::Arc;

use tracing::{info, warn};

use crate::gltf_io::load_gltf_model;
use crate::model::Model;

/// One placeable entry in the model library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub id: String,
    pub name: String,
    pub icon: String,
    /// Where the loader finds the model (path, URL, builtin tag).
    pub uri: String,
}

/// The model-source collaborator: lists descriptors, loads renderables.
pub trait ModelSource {
    fn list(&self) -> Vec<ModelDescriptor>;
    fn load(&self, descriptor: &ModelDescriptor) -> Result<Model, String>;
}

/// Loads glTF/GLB files from disk; `uri` is the path.
pub struct FileModelSource {
    entries: Vec<ModelDescriptor>,
}

impl FileModelSource {
    pub fn new(entries: Vec<ModelDescriptor>) -> Self {
        Self { entries }
    }
}

impl ModelSource for FileModelSource {
    fn list(&self) -> Vec<ModelDescriptor> {
        self.entries.clone()
    }

    fn load(&self, descriptor: &ModelDescriptor) -> Result<Model, String> {
        load_gltf_model(&descriptor.uri)
    }
}

/// Ordered catalog plus the active model used for new placements. Loading
/// runs in the event path, never the render path; a failed switch keeps the
/// previous model active.
pub struct ModelCatalog {
    source: Box<dyn ModelSource>,
    entries: Vec<ModelDescriptor>,
    active_index: usize,
    active_model: Option<Arc<Model>>,
}

impl ModelCatalog {
    pub fn new(source: Box<dyn ModelSource>) -> Self {
        let entries = source.list();
        Self {
            source,
            entries,
            active_index: 0,
            active_model: None,
        }
    }

    pub fn entries(&self) -> &[ModelDescriptor] {
        &self.entries
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_model(&self) -> Option<Arc<Model>> {
        self.active_model.clone()
    }

    pub fn set_active(&mut self, index: usize) -> Result<(), String> {
        let Some(descriptor) = self.entries.get(index) else {
            return Err(format!("no model at index {index}"));
        };
        match self.source.load(descriptor) {
            Ok(model) => {
                info!(id = %descriptor.id, "active model switched");
                self.active_index = index;
                self.active_model = Some(Arc::new(model));
                Ok(())
            }
            Err(err) => {
                warn!(id = %descriptor.id, error = %err, "model load failed, keeping previous");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_primitives::make_box;

    struct StubSource;

    impl ModelSource for StubSource {
        fn list(&self) -> Vec<ModelDescriptor> {
            let entry = |id: &str| ModelDescriptor {
                id: id.to_string(),
                name: id.to_string(),
                icon: String::new(),
                uri: id.to_string(),
            };
            vec![entry("cube"), entry("broken")]
        }

        fn load(&self, descriptor: &ModelDescriptor) -> Result<Model, String> {
            match descriptor.id.as_str() {
                "cube" => Ok(Model::from_mesh("cube", make_box([1.0, 1.0, 1.0]))),
                other => Err(format!("no such model: {other}")),
            }
        }
    }

    #[test]
    fn switch_loads_and_tracks_index() {
        let mut catalog = ModelCatalog::new(Box::new(StubSource));
        assert!(catalog.active_model().is_none());
        catalog.set_active(0).expect("load");
        assert_eq!(catalog.active_index(), 0);
        assert!(catalog.active_model().is_some());
    }

    #[test]
    fn failed_switch_keeps_previous_model() {
        let mut catalog = ModelCatalog::new(Box::new(StubSource));
        catalog.set_active(0).expect("load");
        let before = catalog.active_model().expect("active");

        assert!(catalog.set_active(1).is_err());
        assert_eq!(catalog.active_index(), 0);
        let after = catalog.active_model().expect("still active");
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let mut catalog = ModelCatalog::new(Box::new(StubSource));
        assert!(catalog.set_active(7).is_err());
    }
}
