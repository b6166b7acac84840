use glam::{Mat4, Vec2, Vec3};

use crate::collision::solve_displacement;
use crate::config::FpvSettings;
use crate::placed::{ObjectId, PlacedObject, RootTransform};

/// First-person mode: the entered object's pre-entry transform (restored
/// verbatim on exit) plus the live movement inputs. Exists only while the
/// mode is active.
#[derive(Debug, Clone, Copy)]
pub struct FpvState {
    object: ObjectId,
    original: RootTransform,
    /// Joystick vector: x strafes, y is the forward axis.
    pub move_vector: Vec2,
    pub vertical_speed: f32,
}

impl FpvState {
    /// Scale the object up around the viewer and drop it so the eye sits at
    /// player height above the object's origin plane.
    pub fn enter(object: &mut PlacedObject, settings: &FpvSettings) -> Self {
        let original = object.transform;
        object.transform.scale = original.scale * settings.scale_factor;
        object.transform.position = Vec3::new(0.0, -settings.player_height, 0.0);
        Self {
            object: object.id,
            original,
            move_vector: Vec2::ZERO,
            vertical_speed: 0.0,
        }
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    /// Put the object back exactly where it was before entry.
    pub fn exit(self, object: &mut PlacedObject) {
        object.transform = self.original;
    }

    /// Displacement the current inputs ask for, before collision. The object
    /// moves opposite to the player's travel.
    pub fn desired_displacement(&self, camera: Mat4, settings: &FpvSettings) -> Vec3 {
        let speed = settings.base_speed * settings.speed_multiplier;
        let forward = flatten(camera.transform_vector3(Vec3::NEG_Z));
        let right = flatten(camera.transform_vector3(Vec3::X));

        let mut desired = Vec3::ZERO;
        if self.move_vector.y.abs() > settings.dead_zone {
            desired -= forward * (self.move_vector.y * speed);
        }
        if self.move_vector.x.abs() > settings.dead_zone {
            desired -= right * (self.move_vector.x * speed);
        }
        if self.vertical_speed != 0.0 {
            desired.y -= self.vertical_speed;
        }
        desired
    }

    /// One frame of movement: solve the desired displacement against the
    /// object's own geometry, then shift the object.
    pub fn update(&self, object: &mut PlacedObject, camera: Mat4, settings: &FpvSettings) {
        let desired = self.desired_displacement(camera, settings);
        if desired.length_squared() == 0.0 {
            return;
        }
        let world = object.world_transform();
        let model = object.model.clone();
        let adjusted = solve_displacement(desired, &model, world, settings);
        object.transform.position += adjusted;
    }
}

fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_primitives::make_box;
    use crate::model::Model;
    use crate::placed::PlacedSet;
    use std::sync::Arc;

    fn settings() -> FpvSettings {
        FpvSettings::default()
    }

    fn placed_box() -> (PlacedSet, ObjectId) {
        let mut placed = PlacedSet::new();
        let model = Arc::new(Model::from_mesh("box", make_box([1.0, 1.0, 1.0])));
        let id = placed.place(model, Vec3::new(1.2, 3.4, -0.7));
        (placed, id)
    }

    #[test]
    fn enter_scales_and_repositions() {
        let (mut placed, id) = placed_box();
        {
            let object = placed.get_mut(id).unwrap();
            object.transform.yaw = 0.35;
            object.transform.scale = 1.7;
        }
        let object = placed.get_mut(id).unwrap();
        let fpv = FpvState::enter(object, &settings());
        assert_eq!(fpv.object(), id);
        assert_eq!(object.transform.scale, 1.7 * 20.0);
        assert_eq!(object.transform.position, Vec3::new(0.0, -1.8, 0.0));
        assert_eq!(object.transform.yaw, 0.35);
    }

    #[test]
    fn enter_exit_round_trips_exactly() {
        let (mut placed, id) = placed_box();
        {
            let object = placed.get_mut(id).unwrap();
            object.transform.yaw = 0.35;
            object.transform.scale = 1.7;
        }
        let before = placed.get(id).unwrap().transform;
        let object = placed.get_mut(id).unwrap();
        let fpv = FpvState::enter(object, &settings());
        fpv.exit(object);
        assert_eq!(object.transform, before);
    }

    #[test]
    fn forward_input_moves_object_back() {
        let (mut placed, id) = placed_box();
        let mut fpv = FpvState::enter(placed.get_mut(id).unwrap(), &settings());
        fpv.move_vector = Vec2::new(0.0, 1.0);
        let desired = fpv.desired_displacement(Mat4::IDENTITY, &settings());
        assert!((desired - Vec3::new(0.0, 0.0, 0.1)).length() < 1.0e-6);
    }

    #[test]
    fn movement_follows_camera_yaw() {
        let (mut placed, id) = placed_box();
        let mut fpv = FpvState::enter(placed.get_mut(id).unwrap(), &settings());
        fpv.move_vector = Vec2::new(0.0, 1.0);
        let camera = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let desired = fpv.desired_displacement(camera, &settings());
        // Camera faces -X, so the object slides +X.
        assert!((desired - Vec3::new(0.1, 0.0, 0.0)).length() < 1.0e-6);
    }

    #[test]
    fn dead_zone_swallows_small_input() {
        let (mut placed, id) = placed_box();
        let mut fpv = FpvState::enter(placed.get_mut(id).unwrap(), &settings());
        fpv.move_vector = Vec2::new(0.05, 0.1);
        let desired = fpv.desired_displacement(Mat4::IDENTITY, &settings());
        assert_eq!(desired, Vec3::ZERO);
    }

    #[test]
    fn vertical_hold_moves_object_down() {
        let (mut placed, id) = placed_box();
        let mut fpv = FpvState::enter(placed.get_mut(id).unwrap(), &settings());
        fpv.vertical_speed = 0.05;
        let desired = fpv.desired_displacement(Mat4::IDENTITY, &settings());
        assert_eq!(desired, Vec3::new(0.0, -0.05, 0.0));
    }

    #[test]
    fn update_applies_displacement_in_open_space() {
        let (mut placed, id) = placed_box();
        let mut fpv = FpvState::enter(placed.get_mut(id).unwrap(), &settings());
        fpv.move_vector = Vec2::new(0.0, 1.0);
        let before = placed.get(id).unwrap().transform.position;
        fpv.update(placed.get_mut(id).unwrap(), Mat4::IDENTITY, &settings());
        let after = placed.get(id).unwrap().transform.position;
        assert!((after - before - Vec3::new(0.0, 0.0, 0.1)).length() < 1.0e-5);
    }
}
