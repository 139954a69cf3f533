//! Core shared types and errors (renderer-agnostic).
//! Math comes from glam; everything here is plain data.

pub use glam::{Vec2, Vec3, Vec4, vec2, vec3, vec4};

pub mod error;

pub use error::{GlusError, GlusResult};
