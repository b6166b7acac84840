use std::sync::Arc;

/// Triangle geometry in the shape the render target consumes.
#[derive(Debug, Clone)]
pub struct SceneMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

/// Line segments, used for the selection highlight box.
#[derive(Debug, Clone)]
pub struct SceneLines {
    pub points: Vec<[f32; 3]>,
    pub segments: Vec<[u32; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneNodeKind {
    Placed { id: u64 },
    Reticle,
    Highlight,
}

#[derive(Debug, Clone)]
pub enum SceneDrawable {
    Mesh(Arc<SceneMesh>),
    Lines(SceneLines),
}

/// One drawable with its world transform, tagged with what it represents.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub kind: SceneNodeKind,
    pub transform: glam::Mat4,
    pub drawable: SceneDrawable,
}

/// Everything the engine wants drawn for one frame.
#[derive(Debug, Clone, Default)]
pub struct SceneSnapshot {
    pub nodes: Vec<SceneNode>,
}

impl SceneSnapshot {
    pub fn placed_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node.kind, SceneNodeKind::Placed { .. }))
            .count()
    }

    pub fn has_reticle(&self) -> bool {
        self.nodes
            .iter()
            .any(|node| node.kind == SceneNodeKind::Reticle)
    }

    pub fn highlight(&self) -> Option<&SceneNode> {
        self.nodes
            .iter()
            .find(|node| node.kind == SceneNodeKind::Highlight)
    }
}
