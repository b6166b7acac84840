use std::sync::Arc;

use anchora_scene::SceneMesh;
use glam::Mat4;

use crate::mesh::{Aabb, Mesh};
use crate::snapshot::scene_mesh_from_mesh;

/// One mesh leaf of a model, with its transform inside the model.
#[derive(Debug, Clone)]
pub struct ModelPart {
    pub name: String,
    pub mesh: Arc<Mesh>,
    pub scene_mesh: Arc<SceneMesh>,
    pub transform: Mat4,
}

/// A renderable model as the catalog hands it out: a flat list of mesh
/// leaves. Placed objects share the mesh data and differ only in transform.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub parts: Vec<ModelPart>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        let mut model = Self::new();
        model.push_part(name, mesh, Mat4::IDENTITY);
        model
    }

    pub fn push_part(&mut self, name: impl Into<String>, mesh: Mesh, transform: Mat4) {
        let scene_mesh = Arc::new(scene_mesh_from_mesh(&mesh));
        self.parts.push(ModelPart {
            name: name.into(),
            mesh: Arc::new(mesh),
            scene_mesh,
            transform,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.parts
            .iter()
            .map(|part| part.mesh.triangle_count())
            .sum()
    }

    /// Model-space bounds: union of each part's bounds under its transform.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut bounds: Option<Aabb> = None;
        for part in &self.parts {
            let Some(part_bounds) = part.mesh.bounds() else {
                continue;
            };
            let part_bounds = part_bounds.transformed(part.transform);
            bounds = Some(match bounds {
                Some(current) => current.union(&part_bounds),
                None => part_bounds,
            });
        }
        bounds
    }
}
