//! Convex hulls over composition/energy point clouds (3D and 4D).
//!
//! Purpose
//! - Build full hulls with quickhull, keep the lower envelope along the
//!   energy axis, and turn it into height functions that answer
//!   "how far above the hull is this composition?".
//!
//! Assumptions and conventions
//! - The last coordinate is always energy (formation energy per atom); the
//!   leading coordinates are composition coordinates.
//! - Facet normals are unit length and outward. In 3D they follow the
//!   right-hand rule on the vertex order.
//! - Degenerate input never raises: too few points or flat clouds give empty
//!   facet lists (see `HullError` for the internal taxonomy).
//! - Tolerances live in `HullCfg`; outside tests scale with cloud extent.
//!
//! Layout
//! - `quickhull`: generic R^D engine plus 3D/4D facet builders.
//! - `lower`: lower-envelope filters (and the binary 2D chain).
//! - `model`: plane models and energy-above-hull evaluation.

mod cfg;
mod lower;
mod model;
mod quickhull;
mod types;
mod util;

pub use cfg::{HullCfg, ON_HULL_TOL};
pub use lower::{
    compute_lower_hull_3d, compute_lower_hull_4d, e_hull_at_x, lower_hull_2d, lower_hull_3d,
    lower_hull_3d_with_cfg, lower_hull_4d, lower_hull_4d_with_cfg,
};
pub use model::{
    build_lower_hull_model, build_lower_hull_model_4d, build_lower_hull_model_4d_with_cfg,
    build_lower_hull_model_with_cfg, compute_e_above_hull_4d, compute_e_above_hull_4d_with_cfg,
    compute_e_above_hull_for_points, compute_e_above_hull_for_points_with_cfg, e_hull_at_xy,
    e_hull_at_xyz, HullModel, HullModel4,
};
pub(crate) use model::distance_above;
pub use quickhull::{
    quickhull_3d, quickhull_3d_with_cfg, quickhull_4d, quickhull_4d_with_cfg, try_quickhull,
    RawHull,
};
pub use types::{ConvexHullTetrahedron, ConvexHullTriangle, HullError, Point3D, Point4D};
pub use util::{centroid, hyperplane_normal4, triangle_normal};
