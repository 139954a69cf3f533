//! Geometry assets: procedural shapes, tangent space, OBJ/MTL models.
//! Meshes are plain CPU arrays ready to be handed to a GPU API.

pub mod mesh;
pub mod model;
pub mod mtl;
pub mod obj;
pub mod shape;
pub mod tangent;
mod text;
pub mod texture;

pub use mesh::{Mesh, Topology};
pub use model::{Group, Material, MaterialLibrary, Model};
pub use mtl::{parse_mtl_from_path, parse_mtl_from_str};
pub use obj::{
    FaceEncoding, ObjConfig, ObjLoader, load_model_from_path, load_obj_from_path,
    load_obj_from_reader, load_obj_from_str,
};
pub use shape::Shape;
pub use tangent::compute_tangents;
pub use texture::TextureData;
