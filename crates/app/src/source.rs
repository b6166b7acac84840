use anchora_core::{load_gltf_model, make_box, Model, ModelDescriptor, ModelSource};
use glam::{Mat4, Vec3};

/// Demo model source: `builtin:` URIs resolve to generated primitives, any
/// other URI is loaded as a glTF path.
pub(crate) struct DemoModelSource {
    entries: Vec<ModelDescriptor>,
}

impl DemoModelSource {
    pub fn new(entries: Vec<ModelDescriptor>) -> Self {
        Self { entries }
    }
}

impl ModelSource for DemoModelSource {
    fn list(&self) -> Vec<ModelDescriptor> {
        self.entries.clone()
    }

    fn load(&self, descriptor: &ModelDescriptor) -> Result<Model, String> {
        match descriptor.uri.strip_prefix("builtin:") {
            Some("cube") => Ok(Model::from_mesh("cube", make_box([1.0, 1.0, 1.0]))),
            Some("shelter") => Ok(shelter()),
            Some(other) => Err(format!("unknown builtin model {other}")),
            None => load_gltf_model(&descriptor.uri),
        }
    }
}

/// Three-walled room with a thin floor, open at the front. Big enough to
/// walk around in once first-person mode scales it up.
fn shelter() -> Model {
    let mut model = Model::new();
    model.push_part(
        "floor",
        make_box([6.0, 0.05, 6.0]),
        Mat4::from_translation(Vec3::new(0.0, 0.025, 0.0)),
    );
    model.push_part(
        "wall_back",
        make_box([6.0, 3.0, 0.2]),
        Mat4::from_translation(Vec3::new(0.0, 1.55, -2.9)),
    );
    model.push_part(
        "wall_left",
        make_box([0.2, 3.0, 6.0]),
        Mat4::from_translation(Vec3::new(-2.9, 1.55, 0.0)),
    );
    model.push_part(
        "wall_right",
        make_box([0.2, 3.0, 6.0]),
        Mat4::from_translation(Vec3::new(2.9, 1.55, 0.0)),
    );
    model
}
