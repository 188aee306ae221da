//! Quickhull in R^D (used with D = 3 for ternary and D = 4 for quaternary systems).
//!
//! Algorithm
//! - Dedup the cloud, then pick an extremal full-dimensional simplex: the most
//!   distant pair among per-axis extreme points, then greedily the point
//!   furthest from the current affine span. A span distance below the
//!   outside epsilon means the input is degenerate.
//! - Every other point goes to the outside set of the facet it lies furthest
//!   beyond (distance > eps). Points inside every facet are dropped.
//! - Loop: take the first facet with a non-empty outside set, its furthest
//!   point is the apex. All live facets that see the apex are removed; their
//!   boundary ridges (shared by exactly one visible facet) form the horizon,
//!   which is coned to the apex. Orphaned points are re-assigned.
//! - Facets are oriented against the centroid of the initial simplex, which
//!   stays interior for the whole run.
//!
//! Based on Barber, Dobkin, Huhdanpaa, "The Quickhull algorithm for convex
//! hulls", ACM TOMS 22(4), 1996.

use std::collections::HashMap;

use nalgebra::SVector;

use super::cfg::HullCfg;
use super::types::{ConvexHullTetrahedron, ConvexHullTriangle, HullError, Point3D, Point4D};
use super::util::{centroid, dedup_points, hyperplane_normal, point_extent};

/// Facets of a hull over an indexed point set.
///
/// Invariants:
/// - `facets[i]` indexes `points`; the cofactor normal of the ordered vertices
///   points away from the hull interior.
/// - `points` is the deduplicated input (hull vertices and interior points).
#[derive(Clone, Debug)]
pub struct RawHull<const D: usize> {
    pub points: Vec<SVector<f64, D>>,
    pub facets: Vec<[usize; D]>,
}

#[derive(Clone, Debug)]
struct Facet<const D: usize> {
    verts: [usize; D],
    normal: SVector<f64, D>,
    offset: f64,
    outside: Vec<usize>,
    alive: bool,
}

impl<const D: usize> Facet<D> {
    /// Oriented facet through `verts`, with its normal pointing away from `interior`.
    fn oriented(
        mut verts: [usize; D],
        points: &[SVector<f64, D>],
        interior: &SVector<f64, D>,
    ) -> Option<Self> {
        let pts = verts.map(|i| points[i]);
        let mut normal = hyperplane_normal(&pts)?;
        if normal.dot(&(interior - pts[0])) > 0.0 {
            // swapping two vertices flips the cofactor normal
            verts.swap(0, 1);
            normal = -normal;
        }
        Some(Self {
            verts,
            offset: normal.dot(&pts[0]),
            normal,
            outside: Vec::new(),
            alive: true,
        })
    }

    #[inline]
    fn distance(&self, p: &SVector<f64, D>) -> f64 {
        self.normal.dot(p) - self.offset
    }

    fn furthest_outside(&self, points: &[SVector<f64, D>]) -> Option<usize> {
        self.outside
            .iter()
            .copied()
            .map(|i| (i, self.distance(&points[i])))
            .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                Some((_, bd)) if bd >= d => best,
                _ => Some((i, d)),
            })
            .map(|(i, _)| i)
    }

    /// Ridges (facet minus one vertex), sorted so shared ridges compare equal.
    fn ridges(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        (0..D).map(move |skip| {
            let mut r: Vec<usize> = (0..D).filter(|&k| k != skip).map(|k| self.verts[k]).collect();
            r.sort_unstable();
            r
        })
    }
}

/// Put `idx` in the outside set of the live facet it lies furthest beyond.
fn assign_point<const D: usize>(
    facets: &mut [Facet<D>],
    points: &[SVector<f64, D>],
    idx: usize,
    eps: f64,
) {
    let mut best: Option<(usize, f64)> = None;
    for (fi, f) in facets.iter().enumerate() {
        if !f.alive {
            continue;
        }
        let d = f.distance(&points[idx]);
        if d > eps && best.map_or(true, |(_, bd)| d > bd) {
            best = Some((fi, d));
        }
    }
    if let Some((fi, _)) = best {
        facets[fi].outside.push(idx);
    }
}

/// Extremal, full-dimensional initial simplex (`D + 1` point indices).
fn initial_simplex<const D: usize>(
    points: &[SVector<f64, D>],
    eps: f64,
) -> Result<Vec<usize>, HullError> {
    // Per-axis extremes give the seed pair.
    let mut extremes = Vec::with_capacity(2 * D);
    for k in 0..D {
        let mut lo = 0;
        let mut hi = 0;
        for (i, p) in points.iter().enumerate() {
            if p[k] < points[lo][k] {
                lo = i;
            }
            if p[k] > points[hi][k] {
                hi = i;
            }
        }
        extremes.push(lo);
        extremes.push(hi);
    }
    let mut seed = (0, 0, 0.0);
    for (a, &i) in extremes.iter().enumerate() {
        for &j in &extremes[a + 1..] {
            let d = (points[i] - points[j]).norm();
            if d > seed.2 {
                seed = (i, j, d);
            }
        }
    }
    if seed.2 <= eps {
        return Err(HullError::Degenerate);
    }

    let origin = points[seed.0];
    let mut simplex = vec![seed.0, seed.1];
    let mut basis: Vec<SVector<f64, D>> = vec![(points[seed.1] - origin) / seed.2];
    while simplex.len() < D + 1 {
        let mut best: Option<(usize, f64, SVector<f64, D>)> = None;
        for (i, p) in points.iter().enumerate() {
            let mut r = p - origin;
            for b in &basis {
                r -= b * b.dot(&r);
            }
            let d = r.norm();
            if best.as_ref().map_or(true, |(_, bd, _)| d > *bd) {
                best = Some((i, d, r));
            }
        }
        match best {
            Some((i, d, r)) if d > eps => {
                simplex.push(i);
                basis.push(r / d);
            }
            _ => return Err(HullError::Degenerate),
        }
    }
    Ok(simplex)
}

/// Fallible quickhull core. Every facet is a supporting hyperplane of `points`.
pub fn try_quickhull<const D: usize>(
    points: &[SVector<f64, D>],
    cfg: &HullCfg,
) -> Result<RawHull<D>, HullError> {
    let extent = point_extent(points);
    let pts = dedup_points(points, cfg.dedup_eps(extent));
    if pts.len() < D + 1 {
        return Err(HullError::InsufficientData {
            unique: pts.len(),
            needed: D + 1,
        });
    }
    let eps = cfg.outside_eps(extent);
    let simplex = initial_simplex(&pts, eps)?;
    let simplex_pts: Vec<SVector<f64, D>> = simplex.iter().map(|&i| pts[i]).collect();
    let interior = centroid(&simplex_pts);

    let mut facets: Vec<Facet<D>> = Vec::new();
    for skip in 0..=D {
        let others: Vec<usize> = simplex
            .iter()
            .enumerate()
            .filter(|&(k, _)| k != skip)
            .map(|(_, &i)| i)
            .collect();
        let verts: [usize; D] = std::array::from_fn(|k| others[k]);
        facets.push(Facet::oriented(verts, &pts, &interior).ok_or(HullError::Degenerate)?);
    }
    for idx in 0..pts.len() {
        if !simplex.contains(&idx) {
            assign_point(&mut facets, &pts, idx, eps);
        }
    }

    let max_iterations = pts.len() + 1;
    let mut iterations = 0;
    loop {
        let Some(fi) = facets.iter().position(|f| f.alive && !f.outside.is_empty()) else {
            break;
        };
        iterations += 1;
        if iterations > max_iterations {
            return Err(HullError::NoConvergence { iterations });
        }
        let Some(apex) = facets[fi].furthest_outside(&pts) else {
            break;
        };
        let apex_pt = pts[apex];

        let visible: Vec<usize> = facets
            .iter()
            .enumerate()
            .filter(|(_, f)| f.alive && f.distance(&apex_pt) > eps)
            .map(|(i, _)| i)
            .collect();

        // Horizon: ridges owned by exactly one visible facet.
        let mut ridge_count: HashMap<Vec<usize>, usize> = HashMap::new();
        for &vi in &visible {
            for r in facets[vi].ridges() {
                *ridge_count.entry(r).or_insert(0) += 1;
            }
        }
        let mut horizon: Vec<Vec<usize>> = Vec::new();
        for &vi in &visible {
            for r in facets[vi].ridges() {
                if ridge_count.get(&r) == Some(&1) {
                    horizon.push(r);
                }
            }
        }

        let mut orphans: Vec<usize> = Vec::new();
        for &vi in &visible {
            let f = &mut facets[vi];
            f.alive = false;
            orphans.extend(f.outside.drain(..).filter(|&p| p != apex));
        }

        for ridge in horizon {
            let verts: [usize; D] =
                std::array::from_fn(|k| if k < D - 1 { ridge[k] } else { apex });
            match Facet::oriented(verts, &pts, &interior) {
                Some(f) => facets.push(f),
                None => tracing::debug!(?verts, "skipping flat cone facet"),
            }
        }
        if facets.iter().filter(|f| !f.alive).count() > facets.len() / 2 {
            facets.retain(|f| f.alive);
        }
        for idx in orphans {
            assign_point(&mut facets, &pts, idx, eps);
        }
    }

    let facets = facets
        .into_iter()
        .filter(|f| f.alive)
        .map(|f| f.verts)
        .collect();
    Ok(RawHull {
        points: pts,
        facets,
    })
}

/// Full 3D convex hull of `points` as oriented triangles.
///
/// Returns an empty vector for fewer than 4 unique points or coplanar input.
pub fn quickhull_3d(points: &[Point3D]) -> Vec<ConvexHullTriangle> {
    quickhull_3d_with_cfg(points, &HullCfg::default())
}

pub fn quickhull_3d_with_cfg(points: &[Point3D], cfg: &HullCfg) -> Vec<ConvexHullTriangle> {
    match try_quickhull::<3>(points, cfg) {
        Ok(hull) => hull
            .facets
            .iter()
            .filter_map(|f| ConvexHullTriangle::new(f.map(|i| hull.points[i])))
            .collect(),
        Err(err) => {
            tracing::debug!(%err, n = points.len(), "no 3D hull");
            Vec::new()
        }
    }
}

/// Full 4D convex hull of `points` as oriented tetrahedra.
///
/// Returns an empty vector for fewer than 5 unique points or input contained
/// in a 3D hyperplane.
pub fn quickhull_4d(points: &[Point4D]) -> Vec<ConvexHullTetrahedron> {
    quickhull_4d_with_cfg(points, &HullCfg::default())
}

pub fn quickhull_4d_with_cfg(points: &[Point4D], cfg: &HullCfg) -> Vec<ConvexHullTetrahedron> {
    match try_quickhull::<4>(points, cfg) {
        Ok(hull) => hull
            .facets
            .iter()
            .filter_map(|f| ConvexHullTetrahedron::new(f.map(|i| hull.points[i])))
            .collect(),
        Err(err) => {
            tracing::debug!(%err, n = points.len(), "no 4D hull");
            Vec::new()
        }
    }
}
