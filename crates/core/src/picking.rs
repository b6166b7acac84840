use crate::placed::{ObjectId, PlacedSet};
use crate::raycast::{raycast_model, Ray, RayHit};

/// Cast `ray` against the full geometry of every placed object and return the
/// owner of the nearest hit. Geometry hits land on mesh leaves; each leaf was
/// registered under its placed root at placement time, so the owning root is
/// a direct lookup rather than an upward parent walk.
pub fn raycast_placed(placed: &PlacedSet, ray: Ray) -> Option<(ObjectId, RayHit)> {
    let mut nearest: Option<(ObjectId, RayHit)> = None;
    for object in placed.iter() {
        let Some(hit) = raycast_model(&object.model, object.world_transform(), ray, f32::INFINITY)
        else {
            continue;
        };
        if nearest
            .as_ref()
            .map_or(true, |(_, best)| hit.distance < best.distance)
        {
            nearest = Some((object.id, hit));
        }
    }
    nearest
}
