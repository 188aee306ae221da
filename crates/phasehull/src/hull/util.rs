//! Small vector helpers: normals, centroids, extents, and geometric dedup.

use nalgebra::{DMatrix, SVector, Vector3, Vector4};

/// Unit normal of the hyperplane through `D` points in R^D.
///
/// Component `k` is the signed cofactor `(-1)^k det(E_k)`, where `E_k` is the
/// `(D-1)x(D-1)` edge matrix `[p_i - p_0]` with column `k` removed. In 3D this
/// is exactly `(p1 - p0) × (p2 - p0)`; swapping two points flips the sign.
pub(crate) fn hyperplane_normal<const D: usize>(
    pts: &[SVector<f64, D>; D],
) -> Option<SVector<f64, D>> {
    let mut n = SVector::<f64, D>::zeros();
    for k in 0..D {
        let minor = DMatrix::from_fn(D - 1, D - 1, |r, c| {
            let col = if c < k { c } else { c + 1 };
            pts[r + 1][col] - pts[0][col]
        });
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        n[k] = sign * minor.determinant();
    }
    let norm = n.norm();
    if norm <= 0.0 || !norm.is_finite() {
        return None;
    }
    Some(n / norm)
}

/// Right-hand-rule unit normal of triangle `(a, b, c)`.
#[inline]
pub fn triangle_normal(
    a: &Vector3<f64>,
    b: &Vector3<f64>,
    c: &Vector3<f64>,
) -> Option<Vector3<f64>> {
    let n = (b - a).cross(&(c - a));
    let norm = n.norm();
    if norm <= 0.0 || !norm.is_finite() {
        return None;
    }
    Some(n / norm)
}

/// Unit normal of the hyperplane through four points in R^4.
#[inline]
pub fn hyperplane_normal4(pts: &[Vector4<f64>; 4]) -> Option<Vector4<f64>> {
    hyperplane_normal(pts)
}

/// Arithmetic mean of the points (zero vector for an empty slice).
pub fn centroid<const D: usize>(points: &[SVector<f64, D>]) -> SVector<f64, D> {
    let mut acc = SVector::<f64, D>::zeros();
    if points.is_empty() {
        return acc;
    }
    for p in points {
        acc += p;
    }
    acc / (points.len() as f64)
}

/// Largest coordinate span of the cloud; sets the scale of all epsilons.
pub(crate) fn point_extent<const D: usize>(points: &[SVector<f64, D>]) -> f64 {
    let mut extent: f64 = 0.0;
    for k in 0..D {
        let (lo, hi) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p[k]), hi.max(p[k]))
            });
        if hi >= lo {
            extent = extent.max(hi - lo);
        }
    }
    extent
}

/// Sort lexicographically and collapse neighbours closer than `tol`.
pub(crate) fn dedup_points<const D: usize>(
    points: &[SVector<f64, D>],
    tol: f64,
) -> Vec<SVector<f64, D>> {
    let mut out: Vec<SVector<f64, D>> = points
        .iter()
        .filter(|p| p.iter().all(|x| x.is_finite()))
        .copied()
        .collect();
    out.sort_by(|a, b| {
        (0..D)
            .map(|k| a[k].partial_cmp(&b[k]).unwrap_or(std::cmp::Ordering::Equal))
            .find(|o| o.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    out.dedup_by(|a, b| (*a - *b).norm() < tol);
    out
}
