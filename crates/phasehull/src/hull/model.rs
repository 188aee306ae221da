//! Closed-form height functions over lower-hull facets.
//!
//! Each retained facet becomes a plane solved for the energy coordinate plus
//! the facet's projection onto composition space (a triangle in 3D, a
//! tetrahedron in 4D) with a precomputed inverse basis for barycentric
//! containment tests.
//!
//! Sentinel policy
//! - Point queries (`e_hull_at_xy`, `e_hull_at_xyz`) return `None` outside the
//!   hull's composition span.
//! - Batch distances (`compute_e_above_hull_*`) report 0 for points that hit
//!   no facet and for an empty model list, so downstream arrays never hold
//!   gaps.

use nalgebra::{Matrix2, Matrix3, Vector2, Vector3};

use super::cfg::HullCfg;
use super::types::{ConvexHullTetrahedron, ConvexHullTriangle, Point3D, Point4D};

/// Plane `a x + b y + c z + d = 0` over a projected triangle.
#[derive(Clone, Copy, Debug)]
pub struct HullModel {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    /// Projected vertices `(x, y)`.
    pub vertices: [Vector2<f64>; 3],
    inv: Matrix2<f64>,
    contain_eps: f64,
}

impl HullModel {
    /// `None` for near-vertical facets (|c| below `cfg.vertical_eps`).
    pub fn from_facet(facet: &ConvexHullTriangle, cfg: &HullCfg) -> Option<Self> {
        let n = facet.normal;
        if n.z.abs() < cfg.vertical_eps {
            return None;
        }
        let vertices = facet.vertices.map(|v| Vector2::new(v.x, v.y));
        let basis = Matrix2::from_columns(&[vertices[1] - vertices[0], vertices[2] - vertices[0]]);
        let inv = basis.try_inverse()?;
        Some(Self {
            a: n.x,
            b: n.y,
            c: n.z,
            d: -n.dot(&facet.vertices[0]),
            vertices,
            inv,
            contain_eps: cfg.contain_eps,
        })
    }

    /// Barycentric coordinates of `(x, y)` in the projected triangle.
    pub fn barycentric(&self, x: f64, y: f64) -> [f64; 3] {
        let l = self.inv * (Vector2::new(x, y) - self.vertices[0]);
        [1.0 - l.x - l.y, l.x, l.y]
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let l = self.barycentric(x, y);
        l.iter().all(|&w| w >= -self.contain_eps)
            && (l.iter().sum::<f64>() - 1.0).abs() <= self.contain_eps
    }

    /// Plane height at `(x, y)`, whether or not the point is contained.
    #[inline]
    pub fn height(&self, x: f64, y: f64) -> f64 {
        -(self.a * x + self.b * y + self.d) / self.c
    }
}

/// Hyperplane `a x + b y + c z + d w + e = 0` over a projected tetrahedron.
#[derive(Clone, Copy, Debug)]
pub struct HullModel4 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    /// Projected vertices `(x, y, z)`.
    pub vertices: [Vector3<f64>; 4],
    inv: Matrix3<f64>,
    contain_eps: f64,
}

impl HullModel4 {
    pub fn from_facet(facet: &ConvexHullTetrahedron, cfg: &HullCfg) -> Option<Self> {
        let n = facet.normal;
        if n.w.abs() < cfg.vertical_eps {
            return None;
        }
        let vertices = facet.vertices.map(|v| Vector3::new(v.x, v.y, v.z));
        let basis = Matrix3::from_columns(&[
            vertices[1] - vertices[0],
            vertices[2] - vertices[0],
            vertices[3] - vertices[0],
        ]);
        let inv = basis.try_inverse()?;
        Some(Self {
            a: n.x,
            b: n.y,
            c: n.z,
            d: n.w,
            e: -n.dot(&facet.vertices[0]),
            vertices,
            inv,
            contain_eps: cfg.contain_eps,
        })
    }

    pub fn barycentric(&self, x: f64, y: f64, z: f64) -> [f64; 4] {
        let l = self.inv * (Vector3::new(x, y, z) - self.vertices[0]);
        [1.0 - l.x - l.y - l.z, l.x, l.y, l.z]
    }

    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        let l = self.barycentric(x, y, z);
        l.iter().all(|&w| w >= -self.contain_eps)
            && (l.iter().sum::<f64>() - 1.0).abs() <= self.contain_eps
    }

    #[inline]
    pub fn height(&self, x: f64, y: f64, z: f64) -> f64 {
        -(self.a * x + self.b * y + self.c * z + self.e) / self.d
    }
}

pub fn build_lower_hull_model(facets: &[ConvexHullTriangle]) -> Vec<HullModel> {
    build_lower_hull_model_with_cfg(facets, &HullCfg::default())
}

pub fn build_lower_hull_model_with_cfg(
    facets: &[ConvexHullTriangle],
    cfg: &HullCfg,
) -> Vec<HullModel> {
    let models: Vec<HullModel> = facets
        .iter()
        .filter_map(|f| HullModel::from_facet(f, cfg))
        .collect();
    if models.len() < facets.len() {
        tracing::debug!(
            skipped = facets.len() - models.len(),
            "skipped vertical facets"
        );
    }
    models
}

pub fn build_lower_hull_model_4d(facets: &[ConvexHullTetrahedron]) -> Vec<HullModel4> {
    build_lower_hull_model_4d_with_cfg(facets, &HullCfg::default())
}

pub fn build_lower_hull_model_4d_with_cfg(
    facets: &[ConvexHullTetrahedron],
    cfg: &HullCfg,
) -> Vec<HullModel4> {
    let models: Vec<HullModel4> = facets
        .iter()
        .filter_map(|f| HullModel4::from_facet(f, cfg))
        .collect();
    if models.len() < facets.len() {
        tracing::debug!(
            skipped = facets.len() - models.len(),
            "skipped vertical facets"
        );
    }
    models
}

/// Lower-hull energy at composition `(x, y)`; `None` outside every facet.
///
/// Facets sharing an edge may both contain a boundary point; the lower hull is
/// the pointwise maximum of its supporting planes, so the largest value wins.
pub fn e_hull_at_xy(models: &[HullModel], x: f64, y: f64) -> Option<f64> {
    models
        .iter()
        .filter(|m| m.contains(x, y))
        .map(|m| m.height(x, y))
        .fold(None, |acc: Option<f64>, h| Some(acc.map_or(h, |a| a.max(h))))
}

/// Lower-hull energy at composition `(x, y, z)`; `None` outside every facet.
pub fn e_hull_at_xyz(models: &[HullModel4], x: f64, y: f64, z: f64) -> Option<f64> {
    models
        .iter()
        .filter(|m| m.contains(x, y, z))
        .map(|m| m.height(x, y, z))
        .fold(None, |acc: Option<f64>, h| Some(acc.map_or(h, |a| a.max(h))))
}

#[inline]
pub(crate) fn distance_above(energy: f64, hull: Option<f64>, on_hull_tol: f64) -> f64 {
    match hull {
        Some(h) => {
            let d = energy - h;
            if d < on_hull_tol {
                0.0
            } else {
                d
            }
        }
        None => 0.0,
    }
}

/// Vertical distance of each point above the lower hull (parallel to `points`).
pub fn compute_e_above_hull_for_points(points: &[Point3D], models: &[HullModel]) -> Vec<f64> {
    compute_e_above_hull_for_points_with_cfg(points, models, &HullCfg::default())
}

pub fn compute_e_above_hull_for_points_with_cfg(
    points: &[Point3D],
    models: &[HullModel],
    cfg: &HullCfg,
) -> Vec<f64> {
    if models.is_empty() {
        return vec![0.0; points.len()];
    }
    points
        .iter()
        .map(|p| distance_above(p.z, e_hull_at_xy(models, p.x, p.y), cfg.on_hull_tol))
        .collect()
}

/// 4D analogue of [`compute_e_above_hull_for_points`].
pub fn compute_e_above_hull_4d(points: &[Point4D], models: &[HullModel4]) -> Vec<f64> {
    compute_e_above_hull_4d_with_cfg(points, models, &HullCfg::default())
}

pub fn compute_e_above_hull_4d_with_cfg(
    points: &[Point4D],
    models: &[HullModel4],
    cfg: &HullCfg,
) -> Vec<f64> {
    if models.is_empty() {
        return vec![0.0; points.len()];
    }
    points
        .iter()
        .map(|p| {
            distance_above(
                p.w,
                e_hull_at_xyz(models, p.x, p.y, p.z),
                cfg.on_hull_tol,
            )
        })
        .collect()
}
