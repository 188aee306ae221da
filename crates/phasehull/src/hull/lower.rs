//! Lower envelope along the energy (last) axis.
//!
//! A facet belongs to the lower hull iff its outward normal has a strictly
//! negative energy component. Vertical walls (component ≈ 0) and the upper
//! envelope are dropped.

use nalgebra::Vector2;

use super::cfg::HullCfg;
use super::quickhull::{quickhull_3d_with_cfg, quickhull_4d_with_cfg};
use super::types::{ConvexHullTetrahedron, ConvexHullTriangle, Point3D, Point4D};

/// Keep triangles whose normal points down in `z`.
pub fn lower_hull_3d(facets: &[ConvexHullTriangle]) -> Vec<ConvexHullTriangle> {
    lower_hull_3d_with_cfg(facets, &HullCfg::default())
}

pub fn lower_hull_3d_with_cfg(
    facets: &[ConvexHullTriangle],
    cfg: &HullCfg,
) -> Vec<ConvexHullTriangle> {
    facets
        .iter()
        .filter(|f| f.normal.z < -cfg.normal_eps)
        .copied()
        .collect()
}

/// Keep tetrahedra whose normal points down in `w`.
pub fn lower_hull_4d(facets: &[ConvexHullTetrahedron]) -> Vec<ConvexHullTetrahedron> {
    lower_hull_4d_with_cfg(facets, &HullCfg::default())
}

pub fn lower_hull_4d_with_cfg(
    facets: &[ConvexHullTetrahedron],
    cfg: &HullCfg,
) -> Vec<ConvexHullTetrahedron> {
    facets
        .iter()
        .filter(|f| f.normal.w < -cfg.normal_eps)
        .copied()
        .collect()
}

/// Quickhull followed by the lower-hull filter.
pub fn compute_lower_hull_3d(points: &[Point3D], cfg: &HullCfg) -> Vec<ConvexHullTriangle> {
    lower_hull_3d_with_cfg(&quickhull_3d_with_cfg(points, cfg), cfg)
}

pub fn compute_lower_hull_4d(points: &[Point4D], cfg: &HullCfg) -> Vec<ConvexHullTetrahedron> {
    lower_hull_4d_with_cfg(&quickhull_4d_with_cfg(points, cfg), cfg)
}

/// Lower chain of a 2D cloud `(composition, energy)`, sorted by `x`.
///
/// Andrew's monotone chain restricted to the lower half. Points with the same
/// `x` keep only the lowest energy. Fewer than two distinct `x` values give
/// the single lowest point (or nothing for an empty input).
pub fn lower_hull_2d(points: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    let mut pts: Vec<Vector2<f64>> = points
        .iter()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .copied()
        .collect();
    pts.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
    });
    // after sorting, the first point of each x-run is its minimum
    pts.dedup_by(|a, b| (a.x - b.x).abs() < 1e-12);

    let mut chain: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in pts {
        while chain.len() >= 2 && cross(chain[chain.len() - 2], chain[chain.len() - 1], p) <= 0.0 {
            chain.pop();
        }
        chain.push(p);
    }
    chain
}

/// Height of a lower chain at `x` (linear interpolation); `None` outside its span.
pub fn e_hull_at_x(chain: &[Vector2<f64>], x: f64) -> Option<f64> {
    let first = chain.first()?;
    let last = chain.last()?;
    if x < first.x - 1e-12 || x > last.x + 1e-12 {
        return None;
    }
    if chain.len() == 1 {
        return Some(first.y);
    }
    let seg = chain
        .windows(2)
        .find(|w| x <= w[1].x + 1e-12)
        .unwrap_or(&chain[chain.len() - 2..]);
    let (a, b) = (seg[0], seg[1]);
    let t = ((x - a.x) / (b.x - a.x)).clamp(0.0, 1.0);
    Some(a.y + t * (b.y - a.y))
}

#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}
