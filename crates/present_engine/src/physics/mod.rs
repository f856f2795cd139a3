//! Collision geometry
//!
//! Boxes are stored in model space on the mesh and transformed to world space
//! only when tested.

pub mod aabb;

pub use aabb::Aabb;
