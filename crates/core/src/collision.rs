use glam::{Mat4, Quat, Vec3};

use crate::config::FpvSettings;
use crate::model::Model;
use crate::raycast::{raycast_model, Ray};

/// Clamp a desired first-person displacement so the player — a cylinder of
/// the configured radius and height, fixed at the world origin — never ends
/// up inside the model. The model moves around the stationary viewer, so
/// probes are cast along the inverse of the displacement: the direction the
/// player travels relative to the model.
///
/// Re-evaluated from scratch every frame from the instantaneous input; there
/// is no persistent velocity and no restitution.
pub fn solve_displacement(
    desired: Vec3,
    model: &Model,
    world: Mat4,
    settings: &FpvSettings,
) -> Vec3 {
    if desired.length_squared() == 0.0 || model.is_empty() {
        return desired;
    }

    let mut adjusted = desired;
    let inverted = -desired;
    let player = Vec3::ZERO;

    let horizontal = Vec3::new(inverted.x, 0.0, inverted.z);
    if horizontal.length_squared() > 0.0 {
        let distance = horizontal.length();
        let direction = horizontal / distance;
        let range = settings.player_radius + distance;
        // Probe straight ahead and 45 degrees to each side; the first
        // blocking result wins.
        let probes = [
            direction,
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_4) * direction,
            Quat::from_rotation_y(-std::f32::consts::FRAC_PI_4) * direction,
        ];
        for probe in probes {
            let Some(hit) = raycast_model(model, world, Ray::new(player, probe), range) else {
                continue;
            };
            if hit.distance < settings.player_radius {
                // Already touching the surface: stop horizontal travel.
                adjusted.x = 0.0;
                adjusted.z = 0.0;
            } else {
                // Would land inside this frame: slide along the surface.
                let mut normal = hit.normal;
                normal.y = 0.0;
                let slide = if normal.length_squared() > 1.0e-8 {
                    let normal = normal.normalize();
                    horizontal - normal * horizontal.dot(normal)
                } else {
                    Vec3::ZERO
                };
                if slide.length_squared() > 0.0 {
                    adjusted.x = -slide.x;
                    adjusted.z = -slide.z;
                } else {
                    adjusted.x = 0.0;
                    adjusted.z = 0.0;
                }
            }
            break;
        }
    }

    let vertical = inverted.y;
    if vertical != 0.0 {
        let offset = settings.player_height * 0.5 - settings.player_radius * 0.5;
        let (origin, direction) = if vertical > 0.0 {
            (Vec3::new(0.0, offset, 0.0), Vec3::Y)
        } else {
            (Vec3::new(0.0, -offset, 0.0), Vec3::NEG_Y)
        };
        let range = vertical.abs() + settings.player_radius;
        if raycast_model(model, world, Ray::new(origin, direction), range).is_some() {
            adjusted.y = 0.0;
        }
    }

    adjusted
}
