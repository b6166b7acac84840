use std::sync::Arc;

use crate::mesh_primitives::make_ring;
use crate::model::Model;
use crate::pose::Pose;

/// Placement-candidate indicator. Tracks the latest frame's hit-test result
/// directly, no smoothing; visible only while a surface is under the cursor.
pub struct Reticle {
    model: Arc<Model>,
    pub pose: Pose,
    pub visible: bool,
}

impl Reticle {
    pub fn new(model: Model) -> Self {
        Self {
            model: Arc::new(model),
            pose: Pose::IDENTITY,
            visible: false,
        }
    }

    /// Generated flat ring, used when the reticle asset fails to load.
    pub fn fallback() -> Self {
        Self::new(Model::from_mesh("reticle_ring", make_ring(0.3, 0.4, 32)))
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// Mirror this frame's hit-test result.
    pub fn update(&mut self, hits: &[Pose]) {
        match hits.first() {
            Some(hit) => {
                self.pose = *hit;
                self.visible = true;
            }
            None => self.visible = false,
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn tracks_latest_hit_and_hides_on_miss() {
        let mut reticle = Reticle::fallback();
        assert!(!reticle.visible);

        let hit = Pose::from_position(Vec3::new(0.5, 0.0, -1.0));
        reticle.update(&[hit]);
        assert!(reticle.visible);
        assert_eq!(reticle.pose, hit);

        // No smoothing: the next frame's result replaces the pose outright.
        let other = Pose::from_position(Vec3::new(-2.0, 0.1, 0.0));
        reticle.update(&[other, hit]);
        assert_eq!(reticle.pose, other);

        reticle.update(&[]);
        assert!(!reticle.visible);
        assert_eq!(reticle.pose, other);
    }
}
