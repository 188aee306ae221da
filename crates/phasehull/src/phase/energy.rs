//! Per-atom energies, elemental references, and formation energies.

use super::composition::{arity, total_atoms};
use super::types::{ElementalRefs, PhaseEntry};

/// Energy per atom including the entry's correction.
///
/// An explicit `energy_per_atom` wins (it already includes the correction);
/// otherwise `(energy + correction) / total_atoms`. `None` when neither is
/// available, the composition is empty, or the result is not finite (a NaN
/// correction, say).
pub fn corrected_energy_per_atom(entry: &PhaseEntry) -> Option<f64> {
    if let Some(epa) = entry.energy_per_atom.filter(|e| e.is_finite()) {
        return Some(epa);
    }
    let energy = entry.energy.filter(|e| e.is_finite())?;
    let atoms = total_atoms(&entry.composition);
    if atoms <= 0.0 {
        return None;
    }
    let epa = (energy + entry.correction.unwrap_or(0.0)) / atoms;
    epa.is_finite().then_some(epa)
}

/// Lowest corrected-energy-per-atom single-element entry for each element.
///
/// Ties keep the first entry seen.
pub fn find_lowest_energy_unary_refs(entries: &[PhaseEntry]) -> ElementalRefs {
    let mut refs = ElementalRefs::new();
    let mut best: std::collections::BTreeMap<String, f64> = Default::default();
    for entry in entries {
        if arity(&entry.composition) != 1 {
            continue;
        }
        let Some(el) = entry.elements().next() else {
            continue;
        };
        let Some(epa) = corrected_energy_per_atom(entry) else {
            continue;
        };
        if best.get(el).map_or(true, |&cur| epa < cur) {
            best.insert(el.to_string(), epa);
            refs.insert(el.to_string(), entry.clone());
        }
    }
    refs
}

/// Formation energy per atom relative to the elemental references.
///
/// `E_f = e(entry) - Σ_el x_el · e(ref_el)` with `e` the corrected energy per
/// atom and `x_el` the atomic fraction. `None` when an element has no
/// reference or the composition is empty. Scaling the composition and energy
/// by the same factor leaves the result unchanged.
pub fn compute_e_form_per_atom(entry: &PhaseEntry, refs: &ElementalRefs) -> Option<f64> {
    let atoms = total_atoms(&entry.composition);
    if atoms <= 0.0 {
        return None;
    }
    let epa = corrected_energy_per_atom(entry)?;
    let mut ref_energy = 0.0;
    for (el, &amount) in &entry.composition {
        if !amount.is_finite() || amount <= 0.0 {
            continue;
        }
        let ref_epa = refs.get(el).and_then(corrected_energy_per_atom)?;
        ref_energy += amount / atoms * ref_epa;
    }
    Some(epa - ref_energy).filter(|ef| ef.is_finite())
}
