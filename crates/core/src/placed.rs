use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};

use crate::mesh::Aabb;
use crate::model::Model;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u64);

/// Root transform of one placed instance. Rotation is yaw-only and scale is
/// uniform, which is all the gestures can express.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootTransform {
    pub position: Vec3,
    pub yaw: f32,
    pub scale: f32,
}

impl RootTransform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            scale: 1.0,
        }
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.yaw),
            self.position,
        )
    }
}

/// One user-placed instance: a root transform owning a recentered copy of the
/// source model. The recenter offset puts the model's horizontal footprint
/// center and base at the root origin, so yaw and scale pivot there.
pub struct PlacedObject {
    pub id: ObjectId,
    pub transform: RootTransform,
    pub model: Arc<Model>,
    recenter: Vec3,
}

impl PlacedObject {
    pub fn world_transform(&self) -> Mat4 {
        self.transform.to_mat4() * Mat4::from_translation(self.recenter)
    }

    pub fn world_bounds(&self) -> Option<Aabb> {
        let world = self.world_transform();
        let mut bounds: Option<Aabb> = None;
        for part in &self.model.parts {
            let Some(part_bounds) = part.mesh.bounds() else {
                continue;
            };
            let part_bounds = part_bounds.transformed(world * part.transform);
            bounds = Some(match bounds {
                Some(current) => current.union(&part_bounds),
                None => part_bounds,
            });
        }
        bounds
    }
}

/// The set of placed objects. Unordered as far as rendering cares,
/// insertion-ordered so deletion lookup stays stable.
#[derive(Default)]
pub struct PlacedSet {
    objects: Vec<PlacedObject>,
    next_id: u64,
}

impl PlacedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.iter()
    }

    pub fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.objects.iter().find(|object| object.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut PlacedObject> {
        self.objects.iter_mut().find(|object| object.id == id)
    }

    /// Instantiate `model` at `position` with identity yaw and scale,
    /// recentered so the footprint center and base land on the root origin.
    pub fn place(&mut self, model: Arc<Model>, position: Vec3) -> ObjectId {
        let recenter = match model.bounds() {
            Some(bounds) => {
                let center = bounds.center();
                Vec3::new(-center.x, -bounds.min[1], -center.z)
            }
            None => Vec3::ZERO,
        };
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(PlacedObject {
            id,
            transform: RootTransform::at(position),
            model,
            recenter,
        });
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> bool {
        let before = self.objects.len();
        self.objects.retain(|object| object.id != id);
        self.objects.len() != before
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }
}
