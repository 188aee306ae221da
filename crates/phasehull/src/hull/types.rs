//! Core hull types: points, facets, and the internal error taxonomy.

use std::fmt;

use nalgebra::{Vector3, Vector4};
use serde::Serialize;

use super::util::{centroid, hyperplane_normal4, triangle_normal};

/// Composition/energy point in 3D: `(x, y)` composition coordinates, `z` energy.
pub type Point3D = Vector3<f64>;
/// Composition/energy point in 4D: `(x, y, z)` composition coordinates, `w` energy.
pub type Point4D = Vector4<f64>;

/// Triangular facet of a 3D hull.
///
/// Invariants:
/// - `normal` is unit length and follows the right-hand rule on `vertices`.
/// - For facets produced by quickhull the normal points away from the hull.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ConvexHullTriangle {
    pub vertices: [Point3D; 3],
    pub normal: Point3D,
    pub centroid: Point3D,
}

impl ConvexHullTriangle {
    /// Build from ordered vertices; `None` if the vertices are collinear.
    pub fn new(vertices: [Point3D; 3]) -> Option<Self> {
        let normal = triangle_normal(&vertices[0], &vertices[1], &vertices[2])?;
        Some(Self {
            vertices,
            normal,
            centroid: centroid(&vertices),
        })
    }

    /// Signed distance of `p` from the facet plane (positive on the normal side).
    #[inline]
    pub fn signed_distance(&self, p: &Point3D) -> f64 {
        self.normal.dot(&(p - self.vertices[0]))
    }
}

/// Tetrahedral facet of a 4D hull.
///
/// Invariants: same as [`ConvexHullTriangle`]; the normal's sign follows the
/// orientation of the vertex order (swapping two vertices flips it).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ConvexHullTetrahedron {
    pub vertices: [Point4D; 4],
    pub normal: Point4D,
    pub centroid: Point4D,
}

impl ConvexHullTetrahedron {
    /// Build from ordered vertices; `None` if the vertices span less than 3D.
    pub fn new(vertices: [Point4D; 4]) -> Option<Self> {
        let normal = hyperplane_normal4(&vertices)?;
        Some(Self {
            vertices,
            normal,
            centroid: centroid(&vertices),
        })
    }

    #[inline]
    pub fn signed_distance(&self, p: &Point4D) -> f64 {
        self.normal.dot(&(p - self.vertices[0]))
    }
}

/// Why a hull could not be built.
///
/// Public facet functions turn every variant into an empty result; the enum
/// exists so the fallible core can say which case occurred.
#[derive(Clone, Debug, PartialEq)]
pub enum HullError {
    /// Fewer unique points than the dimension needs for a full simplex.
    InsufficientData { unique: usize, needed: usize },
    /// Points are coplanar/collinear (zero-volume initial simplex).
    Degenerate,
    /// The main loop did not converge (numerical cycling).
    NoConvergence { iterations: usize },
}

impl fmt::Display for HullError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HullError::InsufficientData { unique, needed } => write!(
                f,
                "need at least {needed} unique points for a hull, got {unique}"
            ),
            HullError::Degenerate => {
                write!(f, "points are degenerate (no full-dimensional simplex)")
            }
            HullError::NoConvergence { iterations } => {
                write!(f, "quickhull did not converge after {iterations} iterations")
            }
        }
    }
}

impl std::error::Error for HullError {}
