//! Split entries into stable/unstable sets and summarise them.

use std::collections::BTreeSet;

use super::composition::arity;
use super::energy::find_lowest_energy_unary_refs;
use super::types::{PhaseDiagramStats, PhaseEntry, ProcessedEntries};

/// Entries this close to the hull (or flagged) count as stable.
pub const STABLE_TOL: f64 = 1e-6;

#[inline]
pub fn is_entry_stable(entry: &PhaseEntry) -> bool {
    entry.is_stable == Some(true) || entry.e_above_hull.is_some_and(|e| e < STABLE_TOL)
}

/// Categorise entries, collect the sorted element set, and pick references.
///
/// Empty input yields empty outputs.
pub fn process_pd_entries(entries: &[PhaseEntry]) -> ProcessedEntries {
    let (stable_entries, unstable_entries): (Vec<PhaseEntry>, Vec<PhaseEntry>) =
        entries.iter().cloned().partition(is_entry_stable);
    let elements: BTreeSet<String> = entries
        .iter()
        .flat_map(|e| e.elements().map(str::to_string))
        .collect();
    ProcessedEntries {
        entries: entries.to_vec(),
        stable_entries,
        unstable_entries,
        elements: elements.into_iter().collect(),
        el_refs: find_lowest_energy_unary_refs(entries),
    }
}

/// Counts by arity and stability plus the formation-energy range.
pub fn get_pd_stats(processed: &ProcessedEntries) -> PhaseDiagramStats {
    let mut stats = PhaseDiagramStats {
        total: processed.entries.len(),
        stable: processed.stable_entries.len(),
        unstable: processed.unstable_entries.len(),
        elements: processed.elements.clone(),
        ..PhaseDiagramStats::default()
    };
    for entry in &processed.entries {
        match arity(&entry.composition) {
            0 => {}
            1 => stats.unary += 1,
            2 => stats.binary += 1,
            3 => stats.ternary += 1,
            4 => stats.quaternary += 1,
            _ => stats.higher_order += 1,
        }
        if let Some(ef) = entry.e_form_per_atom.filter(|e| e.is_finite()) {
            stats.e_form_range = Some(match stats.e_form_range {
                Some((lo, hi)) => (lo.min(ef), hi.max(ef)),
                None => (ef, ef),
            });
        }
    }
    stats
}
