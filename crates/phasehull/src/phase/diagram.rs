//! End-to-end phase diagram construction.
//!
//! Flow: normalise composition keys → elemental references → formation
//! energies → simplex coordinates → lower hull → height model →
//! energy above hull → stability flags.
//!
//! Coordinates
//! - Elements are sorted; barycentric vectors follow that order.
//! - Binary systems use the fraction of the second element as `x`.
//! - Ternary and quaternary systems map onto the unit triangle and
//!   tetrahedron (see `composition`), with formation energy as the last axis.

use nalgebra::Vector2;
use serde::Serialize;

use super::composition::{
    barycentric_to_tetrahedral_xyz, barycentric_to_ternary_xy, composition_to_barycentric,
    normalize_composition_keys,
};
use super::energy::{compute_e_form_per_atom, find_lowest_energy_unary_refs};
use super::process::{process_pd_entries, STABLE_TOL};
use super::types::{ElementalRefs, PhaseEntry, ProcessedEntries};
use crate::hull::{
    build_lower_hull_model_4d_with_cfg, build_lower_hull_model_with_cfg,
    compute_e_above_hull_4d_with_cfg, compute_e_above_hull_for_points_with_cfg,
    compute_lower_hull_3d, compute_lower_hull_4d, distance_above, e_hull_at_x, lower_hull_2d,
    ConvexHullTetrahedron, ConvexHullTriangle, HullCfg, Point3D, Point4D,
};

/// Lower-hull geometry of a chemical system.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub enum HullFacets {
    /// Unary systems, more than four elements, or no usable entries.
    #[default]
    Empty,
    /// Lower chain `(x_second_element, e_form)` sorted by `x`.
    Binary(Vec<Vector2<f64>>),
    Ternary(Vec<ConvexHullTriangle>),
    Quaternary(Vec<ConvexHullTetrahedron>),
}

impl HullFacets {
    pub fn len(&self) -> usize {
        match self {
            HullFacets::Empty => 0,
            HullFacets::Binary(chain) => chain.len().saturating_sub(1),
            HullFacets::Ternary(f) => f.len(),
            HullFacets::Quaternary(f) => f.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Entries with derived fields filled in, plus the hull they were measured against.
///
/// `elements` lists the elements that have a reference entry, sorted.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PhaseDiagram {
    pub elements: Vec<String>,
    pub entries: Vec<PhaseEntry>,
    pub el_refs: ElementalRefs,
    pub hull: HullFacets,
}

impl PhaseDiagram {
    pub fn processed(&self) -> ProcessedEntries {
        process_pd_entries(&self.entries)
    }

    pub fn stable_entries(&self) -> impl Iterator<Item = &PhaseEntry> {
        self.entries.iter().filter(|e| e.is_stable == Some(true))
    }
}

/// Build a phase diagram from raw entries.
///
/// Derived fields present on input are recomputed. Entries whose formation
/// energy cannot be computed (no energy, empty composition, missing
/// reference) keep `None` for every derived field. Systems with more than
/// four elements get formation energies but no hull.
pub fn build_phase_diagram(entries: &[PhaseEntry], cfg: &HullCfg) -> PhaseDiagram {
    let mut entries: Vec<PhaseEntry> = entries
        .iter()
        .map(|e| PhaseEntry {
            composition: normalize_composition_keys(&e.composition),
            e_form_per_atom: None,
            e_above_hull: None,
            is_stable: None,
            ..e.clone()
        })
        .collect();
    let el_refs = find_lowest_energy_unary_refs(&entries);
    // only referenced elements can carry a formation energy
    let elements: Vec<String> = el_refs.keys().cloned().collect();

    // (entry index, barycentric coordinates, formation energy)
    let mut located: Vec<(usize, Vec<f64>, f64)> = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter_mut().enumerate() {
        let Some(ef) = compute_e_form_per_atom(entry, &el_refs) else {
            tracing::debug!(entry = %entry.formula(), "no formation energy");
            continue;
        };
        entry.e_form_per_atom = Some(ef);
        if let Some(bary) = composition_to_barycentric(&entry.composition, &elements) {
            located.push((i, bary, ef));
        }
    }

    let (hull, distances) = match elements.len() {
        1 => (
            HullFacets::Empty,
            located
                .iter()
                .map(|(_, _, ef)| distance_above(*ef, Some(0.0), cfg.on_hull_tol))
                .collect(),
        ),
        2 => binary_hull(&located, cfg),
        3 => ternary_hull(&located, cfg),
        4 => quaternary_hull(&located, cfg),
        n => {
            if n > 4 {
                tracing::warn!(elements = n, "no hull for systems above four elements");
            }
            (HullFacets::Empty, Vec::new())
        }
    };

    for ((i, _, _), e) in located.iter().zip(distances) {
        entries[*i].e_above_hull = Some(e);
        entries[*i].is_stable = Some(e < STABLE_TOL);
    }

    PhaseDiagram {
        elements,
        entries,
        el_refs,
        hull,
    }
}

fn binary_hull(located: &[(usize, Vec<f64>, f64)], cfg: &HullCfg) -> (HullFacets, Vec<f64>) {
    let points: Vec<Vector2<f64>> = located
        .iter()
        .map(|(_, b, ef)| Vector2::new(b[1], *ef))
        .collect();
    let chain = lower_hull_2d(&points);
    let distances = points
        .iter()
        .map(|p| distance_above(p.y, e_hull_at_x(&chain, p.x), cfg.on_hull_tol))
        .collect();
    (HullFacets::Binary(chain), distances)
}

fn ternary_hull(located: &[(usize, Vec<f64>, f64)], cfg: &HullCfg) -> (HullFacets, Vec<f64>) {
    let points: Vec<Point3D> = located
        .iter()
        .map(|(_, b, ef)| {
            let xy = barycentric_to_ternary_xy([b[0], b[1], b[2]]);
            Point3D::new(xy.x, xy.y, *ef)
        })
        .collect();
    let facets = compute_lower_hull_3d(&points, cfg);
    let models = build_lower_hull_model_with_cfg(&facets, cfg);
    let distances = compute_e_above_hull_for_points_with_cfg(&points, &models, cfg);
    (HullFacets::Ternary(facets), distances)
}

fn quaternary_hull(located: &[(usize, Vec<f64>, f64)], cfg: &HullCfg) -> (HullFacets, Vec<f64>) {
    let points: Vec<Point4D> = located
        .iter()
        .map(|(_, b, ef)| {
            let xyz = barycentric_to_tetrahedral_xyz([b[0], b[1], b[2], b[3]]);
            Point4D::new(xyz.x, xyz.y, xyz.z, *ef)
        })
        .collect();
    let facets = compute_lower_hull_4d(&points, cfg);
    let models = build_lower_hull_model_4d_with_cfg(&facets, cfg);
    let distances = compute_e_above_hull_4d_with_cfg(&points, &models, cfg);
    (HullFacets::Quaternary(facets), distances)
}
