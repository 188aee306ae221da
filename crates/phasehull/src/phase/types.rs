//! Phase entries and the collections derived from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Element → amount. `BTreeMap` keeps iteration (and therefore sums) ordered.
pub type Composition = BTreeMap<String, f64>;

/// Per-element reference entries (lowest corrected energy per atom).
pub type ElementalRefs = BTreeMap<String, PhaseEntry>;

/// One computed phase as supplied by callers.
///
/// Invariants:
/// - `energy` is the total energy of `composition` (not per atom).
/// - `energy_per_atom`, when present, already includes `correction`.
/// - Derived fields (`e_form_per_atom`, `e_above_hull`, `is_stable`) may be
///   missing on input and are `None` on output when they cannot be computed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseEntry {
    #[serde(default)]
    pub composition: Composition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_per_atom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e_form_per_atom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e_above_hull: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_stable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
}

impl PhaseEntry {
    pub fn new(composition: Composition, energy: f64) -> Self {
        Self {
            composition,
            energy: Some(energy),
            ..Self::default()
        }
    }

    pub fn with_correction(mut self, correction: f64) -> Self {
        self.correction = Some(correction);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.entry_id = Some(id.into());
        self
    }

    /// Elements with a positive amount, in sorted order.
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.composition
            .iter()
            .filter(|&(_, &amt)| amt > 0.0)
            .map(|(el, _)| el.as_str())
    }

    /// Reduced formula-like label, e.g. `Li2O` (amounts as given, sorted).
    pub fn formula(&self) -> String {
        let mut out = String::new();
        for (el, &amt) in &self.composition {
            if amt <= 0.0 {
                continue;
            }
            out.push_str(el);
            if (amt - 1.0).abs() > 1e-9 {
                if (amt - amt.round()).abs() < 1e-9 {
                    out.push_str(&format!("{}", amt.round() as i64));
                } else {
                    out.push_str(&format!("{amt}"));
                }
            }
        }
        out
    }
}

/// Output of `process_pd_entries`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProcessedEntries {
    pub entries: Vec<PhaseEntry>,
    pub stable_entries: Vec<PhaseEntry>,
    pub unstable_entries: Vec<PhaseEntry>,
    pub elements: Vec<String>,
    pub el_refs: ElementalRefs,
}

/// Summary counts for a processed entry set.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PhaseDiagramStats {
    pub total: usize,
    pub unary: usize,
    pub binary: usize,
    pub ternary: usize,
    pub quaternary: usize,
    /// Entries with five or more elements.
    pub higher_order: usize,
    pub stable: usize,
    pub unstable: usize,
    /// `(min, max)` of the known formation energies per atom.
    pub e_form_range: Option<(f64, f64)>,
    pub elements: Vec<String>,
}
