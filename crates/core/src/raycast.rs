use glam::{Mat4, Vec3};

use crate::mesh::{Aabb, Mesh};
use crate::model::Model;

const EPSILON: f32 = 1.0e-6;

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec3,
    /// World-space surface normal, oriented to face the ray origin.
    pub normal: Vec3,
}

/// Möller–Trumbore, two-sided. Returns the distance along the ray.
pub fn ray_triangle(ray: Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = edge2.dot(q) * inv_det;
    (t > EPSILON).then_some(t)
}

/// Slab test; rays starting inside the box report distance zero.
fn ray_aabb(ray: Ray, aabb: &Aabb) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;
    let origin = ray.origin.to_array();
    let direction = ray.direction.to_array();
    for i in 0..3 {
        if direction[i].abs() < EPSILON {
            if origin[i] < aabb.min[i] || origin[i] > aabb.max[i] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / direction[i];
        let mut t0 = (aabb.min[i] - origin[i]) * inv;
        let mut t1 = (aabb.max[i] - origin[i]) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}

/// Nearest intersection with a mesh under `transform`, within `max_distance`.
pub fn raycast_mesh(mesh: &Mesh, transform: Mat4, ray: Ray, max_distance: f32) -> Option<RayHit> {
    let bounds = mesh.bounds()?.transformed(transform);
    match ray_aabb(ray, &bounds) {
        Some(entry) if entry <= max_distance => {}
        _ => return None,
    }

    let mut nearest: Option<RayHit> = None;
    for tri in mesh.indices.chunks_exact(3) {
        let a = transform.transform_point3(Vec3::from(mesh.positions[tri[0] as usize]));
        let b = transform.transform_point3(Vec3::from(mesh.positions[tri[1] as usize]));
        let c = transform.transform_point3(Vec3::from(mesh.positions[tri[2] as usize]));
        let Some(t) = ray_triangle(ray, a, b, c) else {
            continue;
        };
        if t > max_distance {
            continue;
        }
        if nearest.map_or(true, |hit| t < hit.distance) {
            let mut normal = (b - a).cross(c - a).normalize_or_zero();
            if normal.dot(ray.direction) > 0.0 {
                normal = -normal;
            }
            nearest = Some(RayHit {
                distance: t,
                point: ray.at(t),
                normal,
            });
        }
    }
    nearest
}

/// Nearest intersection across all parts of a model placed at `world`.
pub fn raycast_model(model: &Model, world: Mat4, ray: Ray, max_distance: f32) -> Option<RayHit> {
    let mut nearest: Option<RayHit> = None;
    for part in &model.parts {
        let transform = world * part.transform;
        let Some(hit) = raycast_mesh(&part.mesh, transform, ray, max_distance) else {
            continue;
        };
        if nearest.map_or(true, |best| hit.distance < best.distance) {
            nearest = Some(hit);
        }
    }
    nearest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_primitives::make_box;
    use crate::model::Model;

    #[test]
    fn hits_front_face_of_box() {
        let mesh = make_box([2.0, 2.0, 2.0]);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let hit = raycast_mesh(&mesh, Mat4::IDENTITY, ray, f32::INFINITY).expect("hit");
        assert!((hit.distance - 4.0).abs() < 1.0e-4);
        assert!((hit.normal - Vec3::Z).length() < 1.0e-4);
    }

    #[test]
    fn hits_from_inside_report_inward_normal() {
        let mesh = make_box([4.0, 4.0, 4.0]);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let hit = raycast_mesh(&mesh, Mat4::IDENTITY, ray, f32::INFINITY).expect("hit");
        assert!((hit.distance - 2.0).abs() < 1.0e-4);
        assert!((hit.normal - Vec3::NEG_X).length() < 1.0e-4);
    }

    #[test]
    fn respects_max_distance() {
        let mesh = make_box([2.0, 2.0, 2.0]);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(raycast_mesh(&mesh, Mat4::IDENTITY, ray, 3.0).is_none());
    }

    #[test]
    fn model_returns_nearest_part() {
        let mut model = Model::new();
        model.push_part(
            "far",
            make_box([1.0, 1.0, 1.0]),
            Mat4::from_translation(Vec3::new(0.0, 0.0, -6.0)),
        );
        model.push_part(
            "near",
            make_box([1.0, 1.0, 1.0]),
            Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0)),
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = raycast_model(&model, Mat4::IDENTITY, ray, f32::INFINITY).expect("hit");
        assert!((hit.distance - 2.5).abs() < 1.0e-4);
    }

    #[test]
    fn misses_return_none() {
        let mesh = make_box([1.0, 1.0, 1.0]);
        let ray = Ray::new(Vec3::new(5.0, 0.0, 5.0), Vec3::Z);
        assert!(raycast_mesh(&mesh, Mat4::IDENTITY, ray, f32::INFINITY).is_none());
    }
}
