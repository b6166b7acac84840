use std::path::Path;

use anchora_core::{EngineSettings, FrameInput, InputEvent, ModelDescriptor, Pose, ViewerPose};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use render::{RenderView, Viewport};
use serde::Deserialize;

const FRAME_STEP_MS: f64 = 1000.0 / 60.0;

/// A scripted AR session: model library, engine settings, and the frame
/// sequence to replay through the engine.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SessionPlan {
    pub settings: EngineSettings,
    pub models: Vec<PlanModel>,
    pub active_model: usize,
    /// Optional glTF path for the reticle; the generated ring otherwise.
    pub reticle: Option<String>,
    pub frames: Vec<PlanFrame>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PlanModel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub uri: String,
}

impl PlanModel {
    pub fn to_descriptor(&self) -> ModelDescriptor {
        ModelDescriptor {
            id: self.id.clone(),
            name: self.name.clone(),
            icon: self.icon.clone(),
            uri: self.uri.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PlanFrame {
    /// Absolute frame clock; continues at 60 fps from the previous frame
    /// when omitted.
    pub time_ms: Option<f64>,
    /// False simulates lost tracking for this frame.
    pub tracked: Option<bool>,
    pub hits: Vec<[f32; 3]>,
    pub events: Vec<PlanEvent>,
    /// Replays this frame N times; events fire on the first repeat only.
    pub repeat: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PlanEvent {
    Activate {
        origin: [f32; 3],
        #[serde(default)]
        yaw_deg: f32,
        #[serde(default)]
        pitch_deg: f32,
    },
    TouchStart {
        touches: Vec<[f32; 2]>,
        #[serde(default)]
        on_ui: bool,
    },
    TouchMove {
        touches: Vec<[f32; 2]>,
        #[serde(default)]
        on_ui: bool,
    },
    TouchEnd,
    Joystick {
        x: f32,
        z: f32,
    },
    VerticalStart {
        up: bool,
    },
    VerticalEnd,
    SelectModel {
        index: usize,
    },
    Delete,
    Deselect,
    EnterFpv,
    ExitFpv,
    Reset,
}

impl PlanEvent {
    fn to_input(&self) -> InputEvent {
        match self {
            PlanEvent::Activate {
                origin,
                yaw_deg,
                pitch_deg,
            } => InputEvent::Activate {
                ray: Pose::new(
                    Vec3::from(*origin),
                    Quat::from_euler(
                        EulerRot::YXZ,
                        yaw_deg.to_radians(),
                        pitch_deg.to_radians(),
                        0.0,
                    ),
                ),
            },
            PlanEvent::TouchStart { touches, on_ui } => InputEvent::TouchStart {
                touches: touches.iter().map(|t| Vec2::from(*t)).collect(),
                on_ui: *on_ui,
            },
            PlanEvent::TouchMove { touches, on_ui } => InputEvent::TouchMove {
                touches: touches.iter().map(|t| Vec2::from(*t)).collect(),
                on_ui: *on_ui,
            },
            PlanEvent::TouchEnd => InputEvent::TouchEnd,
            PlanEvent::Joystick { x, z } => InputEvent::Joystick {
                vector: Vec2::new(*x, *z),
            },
            PlanEvent::VerticalStart { up } => InputEvent::VerticalStart { up: *up },
            PlanEvent::VerticalEnd => InputEvent::VerticalEnd,
            PlanEvent::SelectModel { index } => InputEvent::SelectModel { index: *index },
            PlanEvent::Delete => InputEvent::Delete,
            PlanEvent::Deselect => InputEvent::Deselect,
            PlanEvent::EnterFpv => InputEvent::EnterFpv,
            PlanEvent::ExitFpv => InputEvent::ExitFpv,
            PlanEvent::Reset => InputEvent::Reset,
        }
    }
}

impl SessionPlan {
    pub fn to_frames(&self) -> Vec<FrameInput> {
        let mut frames = Vec::new();
        let mut clock = 0.0;
        for plan_frame in &self.frames {
            if let Some(time) = plan_frame.time_ms {
                clock = time;
            }
            let repeat = plan_frame.repeat.unwrap_or(1).max(1);
            for iteration in 0..repeat {
                let events = if iteration == 0 {
                    plan_frame.events.iter().map(PlanEvent::to_input).collect()
                } else {
                    Vec::new()
                };
                frames.push(FrameInput {
                    time_ms: clock,
                    viewer_pose: plan_frame.tracked.unwrap_or(true).then(viewer_pose),
                    hit_test: plan_frame
                        .hits
                        .iter()
                        .map(|hit| Pose::from_position(Vec3::from(*hit)))
                        .collect(),
                    events,
                });
                clock += FRAME_STEP_MS;
            }
        }
        frames
    }
}

/// Standing phone camera, portrait mono view.
fn viewer_pose() -> ViewerPose {
    ViewerPose {
        views: vec![RenderView {
            transform: Mat4::from_translation(Vec3::new(0.0, 1.6, 0.0)),
            projection: Mat4::perspective_rh(60.0_f32.to_radians(), 1080.0 / 1920.0, 0.01, 100.0),
            viewport: Viewport::new(1080, 1920),
        }],
    }
}

pub(crate) fn load_plan(path: &Path) -> Result<SessionPlan, String> {
    let data = std::fs::read(path).map_err(|err| err.to_string())?;
    serde_json::from_slice(&data).map_err(|err| err.to_string())
}

/// Built-in demo script: place a cube, rotate and pinch it, then place a
/// shelter, walk around inside it and come back out.
pub(crate) fn default_plan() -> SessionPlan {
    let floor_a = [0.0, 0.0, -2.0];
    let floor_b = [1.5, 0.0, -2.5];
    let far_tap = PlanEvent::Activate {
        origin: [50.0, 50.0, 50.0],
        yaw_deg: 0.0,
        pitch_deg: 0.0,
    };

    let frame = |hits: Vec<[f32; 3]>, events: Vec<PlanEvent>, repeat: Option<u32>| PlanFrame {
        time_ms: None,
        tracked: None,
        hits,
        events,
        repeat,
    };

    SessionPlan {
        settings: EngineSettings::default(),
        models: vec![
            PlanModel {
                id: "cube".to_string(),
                name: "Cube".to_string(),
                icon: "#".to_string(),
                uri: "builtin:cube".to_string(),
            },
            PlanModel {
                id: "shelter".to_string(),
                name: "Shelter".to_string(),
                icon: "^".to_string(),
                uri: "builtin:shelter".to_string(),
            },
        ],
        active_model: 0,
        reticle: None,
        frames: vec![
            // Scan until the floor shows up.
            frame(vec![], vec![], Some(3)),
            frame(vec![floor_a], vec![], Some(2)),
            // Place the cube and play with it.
            frame(vec![floor_a], vec![far_tap.clone()], None),
            frame(
                vec![floor_a],
                vec![PlanEvent::TouchStart {
                    touches: vec![[120.0, 400.0]],
                    on_ui: false,
                }],
                None,
            ),
            frame(
                vec![floor_a],
                vec![PlanEvent::TouchMove {
                    touches: vec![[220.0, 400.0]],
                    on_ui: false,
                }],
                None,
            ),
            frame(vec![floor_a], vec![PlanEvent::TouchEnd], None),
            frame(
                vec![floor_a],
                vec![PlanEvent::TouchStart {
                    touches: vec![[100.0, 100.0], [200.0, 100.0]],
                    on_ui: false,
                }],
                None,
            ),
            frame(
                vec![floor_a],
                vec![PlanEvent::TouchMove {
                    touches: vec![[100.0, 100.0], [300.0, 100.0]],
                    on_ui: false,
                }],
                None,
            ),
            frame(vec![floor_a], vec![PlanEvent::TouchEnd], None),
            frame(vec![floor_a], vec![PlanEvent::Deselect], None),
            // Switch to the shelter and place it further out.
            frame(
                vec![floor_a],
                vec![PlanEvent::SelectModel { index: 1 }],
                None,
            ),
            // Enough frames for the pinch's drag-release window to lapse
            // before the next placement tap.
            frame(vec![floor_b], vec![], Some(8)),
            frame(vec![floor_b], vec![far_tap], None),
            // Walk around inside it.
            frame(vec![], vec![PlanEvent::EnterFpv], None),
            frame(
                vec![],
                vec![PlanEvent::Joystick { x: 0.0, z: 1.0 }],
                Some(45),
            ),
            frame(
                vec![],
                vec![
                    PlanEvent::Joystick { x: 0.0, z: 0.0 },
                    PlanEvent::VerticalStart { up: true },
                ],
                Some(5),
            ),
            frame(
                vec![],
                vec![PlanEvent::VerticalEnd, PlanEvent::ExitFpv],
                None,
            ),
            frame(vec![floor_b], vec![PlanEvent::Deselect], None),
        ],
    }
}
