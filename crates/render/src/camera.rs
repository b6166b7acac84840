use glam::Mat4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

/// One eye's camera for a frame: the camera's world transform (not a view
/// matrix), its projection, and the viewport it maps to. Mono sessions carry
/// one of these per frame, stereo two.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    pub transform: Mat4,
    pub projection: Mat4,
    pub viewport: Viewport,
}

impl RenderView {
    pub fn view_matrix(&self) -> Mat4 {
        self.transform.inverse()
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}
