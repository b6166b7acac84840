use glam::Vec3;

use crate::placed::{ObjectId, PlacedObject};

/// At most one placed object is selected at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<ObjectId>,
}

impl SelectionState {
    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selected == Some(id)
    }

    /// Returns false when `id` was already selected.
    pub fn select(&mut self, id: ObjectId) -> bool {
        if self.selected == Some(id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    /// Returns false when nothing was selected.
    pub fn clear(&mut self) -> bool {
        self.selected.take().is_some()
    }
}

/// Axis-aligned box drawn around the selected object. Recomputed from the
/// object's world-space geometry whenever selection or transform changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighlightVolume {
    pub center: Vec3,
    pub extents: Vec3,
    pub visible: bool,
}

impl HighlightVolume {
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn update_from(&mut self, object: &PlacedObject) {
        match object.world_bounds() {
            Some(bounds) => {
                self.center = bounds.center();
                self.extents = bounds.extents();
                self.visible = true;
            }
            None => self.hide(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_primitives::make_box;
    use crate::model::Model;
    use crate::placed::PlacedSet;
    use std::sync::Arc;

    #[test]
    fn select_and_clear_are_idempotent() {
        let mut selection = SelectionState::default();
        assert!(selection.select(ObjectId(1)));
        assert!(!selection.select(ObjectId(1)));
        assert_eq!(selection.selected(), Some(ObjectId(1)));
        assert!(selection.clear());
        assert!(!selection.clear());
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn highlight_tracks_object_bounds() {
        let mut placed = PlacedSet::new();
        let model = Arc::new(Model::from_mesh("box", make_box([2.0, 4.0, 2.0])));
        let id = placed.place(model, Vec3::new(0.0, 1.0, 0.0));

        let mut highlight = HighlightVolume::default();
        highlight.update_from(placed.get(id).unwrap());
        assert!(highlight.visible);
        assert!((highlight.center - Vec3::new(0.0, 3.0, 0.0)).length() < 1.0e-5);
        assert!((highlight.extents - Vec3::new(1.0, 2.0, 1.0)).length() < 1.0e-5);

        placed.get_mut(id).unwrap().transform.scale = 0.5;
        highlight.update_from(placed.get(id).unwrap());
        assert!((highlight.extents - Vec3::new(0.5, 1.0, 0.5)).length() < 1.0e-5);
    }
}
