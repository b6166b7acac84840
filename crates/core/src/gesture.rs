use glam::Vec2;

use crate::config::GestureSettings;

/// Touch position in pixels.
pub type TouchPoint = Vec2;

/// What a recognized gesture wants applied to the selected object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureUpdate {
    Yaw(f32),
    Scale(f32),
}

#[derive(Debug, Clone, Copy)]
enum GestureKind {
    /// One finger down: candidate rotate, still a potential tap.
    Rotate { start_x: f32, start_yaw: f32 },
    /// Two fingers down: candidate pinch-scale.
    Pinch { start_distance: f32, start_scale: f32 },
}

/// Per-touch-sequence state machine. The caller gates events (FPV active,
/// no selection, UI cooldown) before they reach this; the interpreter only
/// disambiguates tap from drag and computes transform deltas.
#[derive(Debug, Default)]
pub struct GestureInterpreter {
    session: Option<GestureKind>,
    dragging: bool,
    drag_release_at: Option<f64>,
}

impl GestureInterpreter {
    /// Start a touch sequence, recording the selected object's current yaw
    /// and scale as the baseline. A new touch-start replaces the baseline.
    pub fn begin(&mut self, touches: &[TouchPoint], current_yaw: f32, current_scale: f32) {
        self.dragging = false;
        self.session = match touches {
            [a, b, ..] => Some(GestureKind::Pinch {
                start_distance: a.distance(*b),
                start_scale: current_scale,
            }),
            [a] => Some(GestureKind::Rotate {
                start_x: a.x,
                start_yaw: current_yaw,
            }),
            [] => None,
        };
    }

    pub fn update(
        &mut self,
        touches: &[TouchPoint],
        settings: &GestureSettings,
    ) -> Option<GestureUpdate> {
        match (self.session, touches) {
            (Some(GestureKind::Pinch { start_distance, start_scale }), [a, b, ..]) => {
                if start_distance <= 0.0 {
                    return None;
                }
                self.dragging = true;
                let factor = a.distance(*b) / start_distance;
                let scale = (start_scale * factor).clamp(settings.scale_min, settings.scale_max);
                Some(GestureUpdate::Scale(scale))
            }
            (Some(GestureKind::Rotate { start_x, start_yaw }), [a]) => {
                let dx = a.x - start_x;
                if dx.abs() <= settings.drag_threshold_px {
                    return None;
                }
                self.dragging = true;
                Some(GestureUpdate::Yaw(start_yaw + dx * settings.rotate_sensitivity))
            }
            _ => None,
        }
    }

    /// End the sequence. A drag keeps suppressing taps for a short window so
    /// the finger-lift is not re-read as a selection or placement tap.
    pub fn finish(&mut self, now_ms: f64, settings: &GestureSettings) {
        if self.dragging {
            self.drag_release_at = Some(now_ms + settings.drag_release_ms);
            self.dragging = false;
        }
        self.session = None;
    }

    pub fn drag_active(&self, now_ms: f64) -> bool {
        self.dragging || self.drag_release_at.is_some_and(|until| now_ms < until)
    }

    /// Discard all transient state (session end).
    pub fn reset(&mut self) {
        self.session = None;
        self.dragging = false;
        self.drag_release_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GestureSettings {
        GestureSettings::default()
    }

    #[test]
    fn hundred_pixels_rotate_one_radian() {
        let mut gesture = GestureInterpreter::default();
        gesture.begin(&[Vec2::new(50.0, 200.0)], 0.0, 1.0);
        let update = gesture
            .update(&[Vec2::new(150.0, 200.0)], &settings())
            .expect("drag");
        let GestureUpdate::Yaw(yaw) = update else {
            panic!("expected yaw update");
        };
        assert!((yaw - 1.0).abs() < 1.0e-5);
        assert!(gesture.drag_active(0.0));
    }

    #[test]
    fn below_threshold_stays_a_tap() {
        let mut gesture = GestureInterpreter::default();
        gesture.begin(&[Vec2::new(50.0, 200.0)], 0.3, 1.0);
        assert!(gesture.update(&[Vec2::new(58.0, 200.0)], &settings()).is_none());
        assert!(!gesture.drag_active(0.0));
        gesture.finish(1000.0, &settings());
        assert!(!gesture.drag_active(1000.0));
    }

    #[test]
    fn pinch_scales_by_distance_ratio_clamped() {
        let mut gesture = GestureInterpreter::default();
        let start = [Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0)];
        gesture.begin(&start, 0.0, 1.0);

        let update = gesture
            .update(&[Vec2::new(100.0, 100.0), Vec2::new(300.0, 100.0)], &settings())
            .expect("pinch");
        assert_eq!(update, GestureUpdate::Scale(2.0));

        // Ratio of 60 would blow past the clamp.
        let update = gesture
            .update(&[Vec2::new(100.0, 100.0), Vec2::new(6100.0, 100.0)], &settings())
            .expect("pinch");
        assert_eq!(update, GestureUpdate::Scale(5.0));

        let update = gesture
            .update(&[Vec2::new(100.0, 100.0), Vec2::new(101.0, 100.0)], &settings())
            .expect("pinch");
        assert_eq!(update, GestureUpdate::Scale(0.1));
    }

    #[test]
    fn drag_release_window_keeps_suppressing_taps() {
        let mut gesture = GestureInterpreter::default();
        gesture.begin(&[Vec2::new(0.0, 0.0)], 0.0, 1.0);
        gesture.update(&[Vec2::new(40.0, 0.0)], &settings());
        assert!(gesture.drag_active(500.0));

        gesture.finish(500.0, &settings());
        assert!(gesture.drag_active(550.0));
        assert!(!gesture.drag_active(650.0));
    }

    #[test]
    fn new_sequence_rebases_rotation() {
        let mut gesture = GestureInterpreter::default();
        gesture.begin(&[Vec2::new(0.0, 0.0)], 0.0, 1.0);
        let Some(GestureUpdate::Yaw(yaw)) = gesture.update(&[Vec2::new(50.0, 0.0)], &settings())
        else {
            panic!("expected yaw update");
        };
        assert!((yaw - 0.5).abs() < 1.0e-5);

        // Second sequence starts from the yaw the first one produced.
        gesture.begin(&[Vec2::new(80.0, 0.0)], yaw, 1.0);
        let Some(GestureUpdate::Yaw(yaw)) = gesture.update(&[Vec2::new(100.0, 0.0)], &settings())
        else {
            panic!("expected yaw update");
        };
        assert!((yaw - 0.7).abs() < 1.0e-5);
    }
}
