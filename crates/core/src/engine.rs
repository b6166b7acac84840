use anchora_scene::SceneSnapshot;
use glam::Vec2;
use render::RenderTarget;
use tracing::{debug, info};

use crate::catalog::ModelCatalog;
use crate::config::EngineSettings;
use crate::fpv::FpvState;
use crate::gesture::{GestureInterpreter, GestureUpdate, TouchPoint};
use crate::picking::raycast_placed;
use crate::placed::{ObjectId, PlacedSet};
use crate::pose::Pose;
use crate::raycast::Ray;
use crate::reticle::Reticle;
use crate::selection::{HighlightVolume, SelectionState};
use crate::session::{FrameInput, InputEvent, ViewerPose};
use crate::snapshot::build_snapshot;

/// All mutable engine state, owned by whoever drives the frame loop. The
/// original ran in a cooperative event loop; here `&mut Engine` is the
/// single-writer discipline, and a multi-threaded embedder must put the
/// engine behind one lock or actor.
pub struct Engine {
    settings: EngineSettings,
    catalog: ModelCatalog,
    reticle: Reticle,
    placed: PlacedSet,
    selection: SelectionState,
    highlight: HighlightVolume,
    gesture: GestureInterpreter,
    fpv: Option<FpvState>,
    last_ui_ms: Option<f64>,
    session_active: bool,
}

impl Engine {
    pub fn new(settings: EngineSettings, catalog: ModelCatalog, reticle: Reticle) -> Self {
        Self {
            settings,
            catalog,
            reticle,
            placed: PlacedSet::new(),
            selection: SelectionState::default(),
            highlight: HighlightVolume::default(),
            gesture: GestureInterpreter::default(),
            fpv: None,
            last_ui_ms: None,
            session_active: true,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn reticle(&self) -> &Reticle {
        &self.reticle
    }

    pub fn placed(&self) -> &PlacedSet {
        &self.placed
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn highlight(&self) -> &HighlightVolume {
        &self.highlight
    }

    pub fn fpv_active(&self) -> bool {
        self.fpv.is_some()
    }

    pub fn session_active(&self) -> bool {
        self.session_active
    }

    // --- frame scheduler ---

    /// One frame: bind the target, branch into placement-mode or FPV-mode
    /// update, then issue one render pass per view. No pose means tracking
    /// is lost; the frame is skipped and rendering resumes on its own.
    pub fn on_frame(&mut self, frame: &FrameInput, target: &mut dyn RenderTarget) {
        if !self.session_active {
            return;
        }
        target.begin_frame();
        let Some(viewer) = &frame.viewer_pose else {
            return;
        };

        if self.fpv.is_some() {
            self.update_fpv(viewer);
        } else {
            self.reticle.update(&frame.hit_test);
        }

        let snapshot = self.snapshot();
        for view in &viewer.views {
            target.set_viewport(view.viewport);
            target.render(&snapshot, view);
        }
    }

    pub fn dispatch_events(&mut self, frame: &FrameInput) {
        for event in &frame.events {
            match event {
                InputEvent::Activate { ray } => self.on_activate(*ray, frame.time_ms),
                InputEvent::TouchStart { touches, on_ui } => {
                    self.on_touch_start(touches, *on_ui, frame.time_ms)
                }
                InputEvent::TouchMove { touches, on_ui } => {
                    self.on_touch_move(touches, *on_ui, frame.time_ms)
                }
                InputEvent::TouchEnd => self.on_touch_end(frame.time_ms),
                InputEvent::Joystick { vector } => self.set_joystick(*vector),
                InputEvent::VerticalStart { up } => self.start_vertical(*up),
                InputEvent::VerticalEnd => self.stop_vertical(),
                InputEvent::SelectModel { index } => {
                    let _ = self.set_active_model(*index);
                }
                InputEvent::Delete => self.delete_selected(),
                InputEvent::Deselect => self.deselect_object(),
                InputEvent::EnterFpv => self.enter_fpv(),
                InputEvent::ExitFpv => self.exit_fpv(),
                InputEvent::Reset => self.reset_all(),
            }
        }
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        build_snapshot(&self.placed, &self.reticle, &self.highlight)
    }

    fn update_fpv(&mut self, viewer: &ViewerPose) {
        let Some(view) = viewer.primary() else {
            return;
        };
        let Some(fpv) = self.fpv else {
            return;
        };
        if let Some(object) = self.placed.get_mut(fpv.object()) {
            fpv.update(object, view.transform, &self.settings.fpv);
        }
    }

    // --- picking & selection ---

    /// Single dispatch point for the discrete activate event: exactly one of
    /// select, place, or deselect happens, and none of them while a drag is
    /// still in flight (or just released), FPV is active, or a UI touch is
    /// cooling down.
    pub fn on_activate(&mut self, ray_pose: Pose, now_ms: f64) {
        if !self.session_active {
            return;
        }
        if self.fpv.is_some() || self.ui_cooldown_active(now_ms) || self.gesture.drag_active(now_ms)
        {
            debug!("activate ignored");
            return;
        }

        let ray = Ray::new(ray_pose.position, ray_pose.forward());
        if let Some((id, _)) = raycast_placed(&self.placed, ray) {
            self.select_object(id);
            return;
        }

        if self.reticle.visible
            && self.catalog.active_model().is_some()
            && self.selection.selected().is_none()
        {
            self.place_at(self.reticle.pose);
        } else if self.selection.selected().is_some() {
            self.deselect_object();
        }
    }

    pub fn select_object(&mut self, id: ObjectId) {
        let Some(object) = self.placed.get(id) else {
            return;
        };
        self.selection.select(id);
        self.highlight.update_from(object);
        debug!(id = id.0, "selected object");
    }

    pub fn deselect_object(&mut self) {
        if self.selection.clear() {
            debug!("deselected");
        }
        self.highlight.hide();
    }

    // --- placement ---

    /// Clone the active model at the given pose's position, recentered and
    /// freshly selected. Placement is disabled while something is selected;
    /// the user deselects first.
    pub fn place_at(&mut self, pose: Pose) {
        if self.selection.selected().is_some() || !self.reticle.visible {
            debug!("placement ignored");
            return;
        }
        let Some(model) = self.catalog.active_model() else {
            return;
        };
        let id = self.placed.place(model, pose.position);
        info!(id = id.0, "placed object");
        self.select_object(id);
    }

    pub fn delete_selected(&mut self) {
        if self.fpv.is_some() {
            return;
        }
        let Some(id) = self.selection.selected() else {
            return;
        };
        self.placed.remove(id);
        self.deselect_object();
        info!(id = id.0, "deleted object");
    }

    pub fn reset_all(&mut self) {
        if self.fpv.is_some() {
            self.exit_fpv();
        }
        self.placed.clear();
        self.deselect_object();
        info!("scene reset");
    }

    /// Switch the active placement model. A failed load keeps the previous
    /// model; a successful one drops the current selection, matching the
    /// library workflow.
    pub fn set_active_model(&mut self, index: usize) -> Result<(), String> {
        self.catalog.set_active(index)?;
        self.deselect_object();
        Ok(())
    }

    // --- gestures ---

    pub fn note_ui_interaction(&mut self, now_ms: f64) {
        self.last_ui_ms = Some(now_ms);
    }

    fn ui_cooldown_active(&self, now_ms: f64) -> bool {
        self.last_ui_ms
            .is_some_and(|last| now_ms - last < self.settings.gesture.ui_cooldown_ms)
    }

    fn gesture_target(&self, now_ms: f64) -> Option<ObjectId> {
        if self.fpv.is_some() || self.ui_cooldown_active(now_ms) {
            return None;
        }
        self.selection.selected()
    }

    pub fn on_touch_start(&mut self, touches: &[TouchPoint], on_ui: bool, now_ms: f64) {
        if on_ui {
            self.note_ui_interaction(now_ms);
            return;
        }
        let Some(id) = self.gesture_target(now_ms) else {
            return;
        };
        let Some(object) = self.placed.get(id) else {
            return;
        };
        let transform = object.transform;
        self.gesture.begin(touches, transform.yaw, transform.scale);
    }

    pub fn on_touch_move(&mut self, touches: &[TouchPoint], on_ui: bool, now_ms: f64) {
        if on_ui {
            self.note_ui_interaction(now_ms);
            return;
        }
        let Some(id) = self.gesture_target(now_ms) else {
            return;
        };
        let Some(update) = self.gesture.update(touches, &self.settings.gesture) else {
            return;
        };
        let Some(object) = self.placed.get_mut(id) else {
            return;
        };
        match update {
            GestureUpdate::Yaw(yaw) => object.transform.yaw = yaw,
            GestureUpdate::Scale(scale) => object.transform.scale = scale,
        }
        self.highlight.update_from(object);
    }

    pub fn on_touch_end(&mut self, now_ms: f64) {
        self.gesture.finish(now_ms, &self.settings.gesture);
    }

    // --- first-person mode ---

    pub fn enter_fpv(&mut self) {
        if self.fpv.is_some() {
            return;
        }
        let Some(id) = self.selection.selected() else {
            debug!("enter fpv ignored, nothing selected");
            return;
        };
        let Some(object) = self.placed.get_mut(id) else {
            return;
        };
        let state = FpvState::enter(object, &self.settings.fpv);
        self.fpv = Some(state);
        self.reticle.hide();
        self.highlight.hide();
        info!(id = id.0, "entered first-person mode");
    }

    /// Safe to call at any point, including mid-frame: the snapshot restore
    /// is a single transform write, never torn.
    pub fn exit_fpv(&mut self) {
        let Some(fpv) = self.fpv.take() else {
            return;
        };
        if let Some(object) = self.placed.get_mut(fpv.object()) {
            fpv.exit(object);
            if self.selection.is_selected(fpv.object()) {
                self.highlight.update_from(object);
            }
        }
        info!("left first-person mode");
    }

    pub fn set_joystick(&mut self, vector: Vec2) {
        if let Some(fpv) = &mut self.fpv {
            fpv.move_vector = vector;
        }
    }

    pub fn start_vertical(&mut self, up: bool) {
        let speed = self.settings.fpv.vertical_speed;
        if let Some(fpv) = &mut self.fpv {
            fpv.vertical_speed = if up { speed } else { -speed };
        }
    }

    pub fn stop_vertical(&mut self) {
        if let Some(fpv) = &mut self.fpv {
            fpv.vertical_speed = 0.0;
        }
    }

    // --- lifecycle ---

    /// Mandatory end-of-session cleanup. Idempotent; frames arriving after
    /// this are ignored.
    pub fn end_session(&mut self) {
        if !self.session_active {
            return;
        }
        self.session_active = false;
        if self.fpv.is_some() {
            self.exit_fpv();
        }
        self.gesture.reset();
        self.reticle.hide();
        info!("session ended");
    }
}
