mod camera;
mod capture;

pub use camera::{RenderView, Viewport};
pub use capture::{CapturePass, CaptureTarget};

use anchora_scene::SceneSnapshot;

/// The per-frame drawing surface the engine issues calls against. Swap-chain
/// and session setup belong to whoever implements this.
pub trait RenderTarget {
    /// Bind the frame's output buffer. Called once per frame before any view.
    fn begin_frame(&mut self);

    fn set_viewport(&mut self, viewport: Viewport);

    /// Draw one view of the scene into the current viewport.
    fn render(&mut self, snapshot: &SceneSnapshot, view: &RenderView);
}
