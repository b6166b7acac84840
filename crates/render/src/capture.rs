use anchora_scene::{SceneDrawable, SceneSnapshot};

use crate::camera::{RenderView, Viewport};
use crate::RenderTarget;

/// One recorded render call.
#[derive(Debug, Clone)]
pub struct CapturePass {
    pub frame: usize,
    pub viewport: Viewport,
    pub node_count: usize,
    pub triangle_count: usize,
}

/// Render target that records draw calls instead of drawing. Backs the
/// headless driver and the scheduler tests.
#[derive(Debug, Default)]
pub struct CaptureTarget {
    frames: usize,
    viewport: Viewport,
    passes: Vec<CapturePass>,
}

impl CaptureTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn passes(&self) -> &[CapturePass] {
        &self.passes
    }

    pub fn last_pass(&self) -> Option<&CapturePass> {
        self.passes.last()
    }
}

impl RenderTarget for CaptureTarget {
    fn begin_frame(&mut self) {
        self.frames += 1;
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn render(&mut self, snapshot: &SceneSnapshot, _view: &RenderView) {
        let triangle_count = snapshot
            .nodes
            .iter()
            .map(|node| match &node.drawable {
                SceneDrawable::Mesh(mesh) => mesh.indices.len() / 3,
                SceneDrawable::Lines(_) => 0,
            })
            .sum();
        self.passes.push(CapturePass {
            frame: self.frames,
            viewport: self.viewport,
            node_count: snapshot.nodes.len(),
            triangle_count,
        });
    }
}
