use glam::Vec2;
use render::{RenderTarget, RenderView};

use crate::engine::Engine;
use crate::pose::Pose;

/// Everything one frame of input to the engine: the frame clock, tracking,
/// this frame's hit-test results, and the input events delivered since the
/// previous frame. Input shares the frame loop's cooperative scheduling
/// domain, so events are drained before the frame update runs.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub time_ms: f64,
    pub viewer_pose: Option<ViewerPose>,
    pub hit_test: Vec<Pose>,
    pub events: Vec<InputEvent>,
}

/// Tracked viewer pose: one view for mono rendering, two for stereo.
#[derive(Debug, Clone)]
pub struct ViewerPose {
    pub views: Vec<RenderView>,
}

impl ViewerPose {
    pub fn primary(&self) -> Option<&RenderView> {
        self.views.first()
    }
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Discrete select/activate carrying the input ray pose.
    Activate { ray: Pose },
    TouchStart { touches: Vec<Vec2>, on_ui: bool },
    TouchMove { touches: Vec<Vec2>, on_ui: bool },
    TouchEnd,
    Joystick { vector: Vec2 },
    VerticalStart { up: bool },
    VerticalEnd,
    SelectModel { index: usize },
    Delete,
    Deselect,
    EnterFpv,
    ExitFpv,
    Reset,
}

/// The AR session collaborator. `next_frame` is the recurring frame
/// callback: each call re-arms the next one, and `None` means the session
/// has ended (user- or system-initiated).
pub trait ArSession {
    fn next_frame(&mut self) -> Option<FrameInput>;
    fn end(&mut self);
}

/// Pump the session to completion: drain each frame's events into the
/// engine, run the frame update, and perform the mandatory end-of-session
/// cleanup once frames stop coming. Returns the number of frames driven.
pub fn run_session<S, R>(engine: &mut Engine, session: &mut S, target: &mut R) -> usize
where
    S: ArSession,
    R: RenderTarget,
{
    let mut frames = 0;
    while let Some(frame) = session.next_frame() {
        engine.dispatch_events(&frame);
        engine.on_frame(&frame, target);
        frames += 1;
    }
    engine.end_session();
    frames
}
