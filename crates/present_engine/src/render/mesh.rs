//! Mesh data as seen by the engine core
//!
//! Vertex data lives on the GPU behind the backend; the core keeps the
//! element count for draw calls and the untransformed bounding box for
//! collision.

use crate::foundation::math::Vec3;

/// Vertex layout shared with the shaders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Object-space position
    pub position: [f32; 3],
    /// RGBA8 color
    pub color: [u8; 4],
    /// Texture coordinates
    pub tex_coord: [f32; 2],
    /// Object-space normal
    pub normal: [f32; 3],
}

impl Vertex {
    /// Create a white vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            color: [255, 255, 255, 255],
            tex_coord,
            normal,
        }
    }
}

/// Mesh metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    bounding_min: Vec3,
    bounding_max: Vec3,
    element_count: u32,
}

impl Mesh {
    /// Build from vertex and element data, computing the bounding box
    pub fn new(vertices: &[Vertex], elements: &[u32]) -> Self {
        let (bounding_min, bounding_max) = if vertices.is_empty() {
            (Vec3::zeros(), Vec3::zeros())
        } else {
            vertices.iter().fold(
                (Vec3::repeat(f32::MAX), Vec3::repeat(f32::MIN)),
                |(min, max), v| {
                    let p = Vec3::from(v.position);
                    (min.inf(&p), max.sup(&p))
                },
            )
        };
        Self {
            bounding_min,
            bounding_max,
            element_count: u32::try_from(elements.len()).unwrap_or(u32::MAX),
        }
    }

    /// Build from a known bounding box
    pub fn with_bounds(bounding_min: Vec3, bounding_max: Vec3, element_count: u32) -> Self {
        Self {
            bounding_min,
            bounding_max,
            element_count,
        }
    }

    /// Untransformed minimum corner
    pub fn bounding_box_min(&self) -> Vec3 {
        self.bounding_min
    }

    /// Untransformed maximum corner
    pub fn bounding_box_max(&self) -> Vec3 {
        self.bounding_max
    }

    /// Replace the bounding box
    pub fn set_bounding_box(&mut self, min: Vec3, max: Vec3) {
        self.bounding_min = min;
        self.bounding_max = max;
    }

    /// Number of indices issued per draw
    pub fn element_count(&self) -> u32 {
        self.element_count
    }
}
