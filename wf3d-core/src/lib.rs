//! WF3D Core Library - column-major matrix/vector algebra and primitives
//!
//! This library provides the stateless core for 3D wireframe rendering:
//! a column-major 4x4 matrix type with pure transform builders, a
//! homogeneous 3-component vector, a camera producing view and projection
//! matrices, and a set of renderable primitives (cube, tetrahedron,
//! cylinder, sphere, axes) that draw themselves onto any [`Surface`].

pub mod axes;
pub mod camera;
pub mod error;
pub mod matrix;
pub mod shape;
pub mod vector;

// Re-export commonly used types
pub use axes::Axes;
pub use camera::Camera;
pub use error::GeometryError;
pub use matrix::Matrix;
pub use shape::{Placement, Renderable, Shape, Surface};
pub use vector::Vector;
