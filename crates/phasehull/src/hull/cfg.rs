//! Tolerance defaults for hull construction and evaluation.
//!
//! Policy
//! - Defaults are fixed constants; `HullCfg` bundles them so callers can tune
//!   a single build without touching call sites. `HullCfg::default()` is what
//!   every convenience function uses.
//! - Outside tests scale with the point cloud: the effective epsilon is
//!   `max(eps_rel * extent, eps_abs_min)` where `extent` is the largest
//!   coordinate span of the input.

use serde::Deserialize;

/// Relative outside-test epsilon (multiplied by the point-cloud extent).
pub(crate) const OUTSIDE_EPS_REL: f64 = 1e-10;
/// Floor for the outside-test epsilon (tiny or collapsed clouds).
pub(crate) const OUTSIDE_EPS_MIN: f64 = 1e-12;
/// A facet is "lower" when its normal's energy component is below `-NORMAL_EPS`.
pub(crate) const NORMAL_EPS: f64 = 1e-12;
/// Facets whose energy-axis coefficient is below this are treated as vertical.
pub(crate) const VERTICAL_EPS: f64 = 1e-10;
/// Slack on barycentric coordinates during containment tests.
pub(crate) const CONTAIN_EPS: f64 = 1e-9;
/// Distances below this are reported as exactly on the hull.
pub const ON_HULL_TOL: f64 = 1e-9;
/// Relative radius used to collapse duplicate points.
pub(crate) const DEDUP_REL: f64 = 1e-12;

/// Hull configuration (tolerances).
///
/// Missing keys in a deserialised config fall back to the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HullCfg {
    pub eps_rel: f64,
    pub eps_abs_min: f64,
    pub normal_eps: f64,
    pub vertical_eps: f64,
    pub contain_eps: f64,
    pub on_hull_tol: f64,
    pub dedup_rel: f64,
}

impl Default for HullCfg {
    fn default() -> Self {
        Self {
            eps_rel: OUTSIDE_EPS_REL,
            eps_abs_min: OUTSIDE_EPS_MIN,
            normal_eps: NORMAL_EPS,
            vertical_eps: VERTICAL_EPS,
            contain_eps: CONTAIN_EPS,
            on_hull_tol: ON_HULL_TOL,
            dedup_rel: DEDUP_REL,
        }
    }
}

impl HullCfg {
    /// Outside-test epsilon for a cloud whose largest coordinate span is `extent`.
    #[inline]
    pub fn outside_eps(&self, extent: f64) -> f64 {
        (self.eps_rel * extent).max(self.eps_abs_min)
    }

    /// Radius below which two points count as duplicates.
    #[inline]
    pub fn dedup_eps(&self, extent: f64) -> f64 {
        (self.dedup_rel * extent).max(self.eps_abs_min)
    }
}
