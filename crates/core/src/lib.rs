mod catalog;
mod collision;
mod config;
mod engine;
mod fpv;
mod gesture;
mod gltf_io;
mod mesh;
mod mesh_primitives;
mod model;
mod picking;
mod placed;
mod pose;
mod raycast;
mod reticle;
mod selection;
mod session;
mod snapshot;

pub use catalog::{FileModelSource, ModelCatalog, ModelDescriptor, ModelSource};
pub use collision::solve_displacement;
pub use config::{EngineSettings, FpvSettings, GestureSettings};
pub use engine::Engine;
pub use fpv::FpvState;
pub use gesture::{GestureInterpreter, GestureUpdate, TouchPoint};
pub use gltf_io::{load_gltf_model, load_gltf_model_bytes};
pub use mesh::{Aabb, Mesh};
pub use mesh_primitives::{make_box, make_grid, make_ring};
pub use model::{Model, ModelPart};
pub use picking::raycast_placed;
pub use placed::{ObjectId, PlacedObject, PlacedSet, RootTransform};
pub use pose::Pose;
pub use raycast::{Ray, RayHit};
pub use reticle::Reticle;
pub use selection::{HighlightVolume, SelectionState};
pub use session::{run_session, ArSession, FrameInput, InputEvent, ViewerPose};
pub use snapshot::scene_mesh_from_mesh;
