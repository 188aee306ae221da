//! Curated surface for callers (UNSTABLE).
//!
//! Important
//! - Convenience re-exports grouped by pipeline stage. Breaking changes are
//!   allowed; prefer these paths over reaching into submodules.

// Hull construction
pub use crate::hull::{
    quickhull_3d, quickhull_3d_with_cfg, quickhull_4d, quickhull_4d_with_cfg, try_quickhull,
    ConvexHullTetrahedron, ConvexHullTriangle, HullCfg, HullError, Point3D, Point4D, RawHull,
};
// Lower envelope
pub use crate::hull::{
    compute_lower_hull_3d, compute_lower_hull_4d, e_hull_at_x, lower_hull_2d, lower_hull_3d,
    lower_hull_4d,
};
// Height models
pub use crate::hull::{
    build_lower_hull_model, build_lower_hull_model_4d, compute_e_above_hull_4d,
    compute_e_above_hull_for_points, e_hull_at_xy, e_hull_at_xyz, HullModel, HullModel4,
    ON_HULL_TOL,
};
// Entries and diagrams
pub use crate::phase::{
    build_phase_diagram, compute_e_form_per_atom, find_lowest_energy_unary_refs, get_pd_stats,
    normalize_composition_keys, process_pd_entries, ElementalRefs, HullFacets, PhaseDiagram,
    PhaseDiagramStats, PhaseEntry, ProcessedEntries, STABLE_TOL,
};
