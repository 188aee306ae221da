//! Lower convex hulls for formation-energy phase diagrams.
//!
//! Layout
//! - `hull`: quickhull in 3D/4D, lower-envelope filters, and plane models
//!   that report the energy above the hull.
//! - `phase`: phase entries, composition cleanup, elemental references,
//!   formation energies, and the end-to-end `build_phase_diagram`.
//!
//! API Policy
//! - Free functions over plain data. Nothing here touches the filesystem;
//!   the CLI crate owns IO.
//! - Degenerate geometry yields empty results instead of errors; see the
//!   module docs for the sentinel conventions.

pub mod api;
pub mod hull;
pub mod phase;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use hull::HullCfg;
pub use nalgebra::{Vector3 as Vec3, Vector4 as Vec4};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::hull::{
        compute_e_above_hull_for_points, compute_lower_hull_3d, e_hull_at_xy, HullCfg, HullModel,
        Point3D, Point4D,
    };
    pub use crate::phase::{
        build_phase_diagram, process_pd_entries, Composition, HullFacets, PhaseDiagram, PhaseEntry,
    };
}
