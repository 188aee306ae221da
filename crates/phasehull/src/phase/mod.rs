//! Phase entries: composition cleanup, formation energies, and stability.
//!
//! Purpose
//! - Turn raw computed phases (composition + total energy) into formation
//!   energies per atom relative to elemental references, place them on a
//!   composition simplex, and measure each against the lower hull.
//!
//! Why this design
//! - Entries are plain serde structs so callers can feed JSON straight in.
//! - Every step is a free function over slices; `build_phase_diagram` is just
//!   their composition and keeps no state between calls.
//!
//! Assumptions and conventions
//! - Energies are in eV (any consistent unit works); `energy` is per formula
//!   unit as given by the composition amounts, not per atom.
//! - Derived values that cannot be computed are `None`, never NaN.
//! - An entry counts as stable when flagged so or within `STABLE_TOL` of the
//!   hull.

mod composition;
mod diagram;
mod elements;
mod energy;
mod process;
mod types;

pub use composition::{
    arity, barycentric_to_tetrahedral_xyz, barycentric_to_ternary_xy, composition_to_barycentric,
    fractional_composition, normalize_composition_keys, strip_oxidation_state, total_atoms,
};
/// Name used by phase-diagram callers for the same cleanup.
pub use composition::normalize_composition_keys as normalize_pd_composition_keys;
pub use diagram::{build_phase_diagram, HullFacets, PhaseDiagram};
pub use elements::{is_element_symbol, ELEMENT_SYMBOLS};
pub use energy::{
    compute_e_form_per_atom, corrected_energy_per_atom, find_lowest_energy_unary_refs,
};
pub use process::{get_pd_stats, is_entry_stable, process_pd_entries, STABLE_TOL};
pub use types::{Composition, ElementalRefs, PhaseDiagramStats, PhaseEntry, ProcessedEntries};
