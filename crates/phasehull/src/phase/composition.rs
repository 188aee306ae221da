//! Composition maps: key normalisation, fractions, and simplex coordinates.
//!
//! Conventions
//! - Keys are element symbols (`Fe`, `O`); oxidation-state suffixes such as
//!   `Fe3+`, `O2-` or `Fe+3` are stripped before lookup.
//! - Barycentric vectors follow the order of the element list passed in.
//! - Ternary coordinates use the equilateral triangle (0,0), (1,0), (½, √3/2);
//!   quaternary coordinates add the apex (½, √3/6, √(2/3)) of a regular
//!   tetrahedron. Every edge has unit length.

use std::collections::BTreeSet;

use nalgebra::{Vector2, Vector3};

use super::elements::is_element_symbol;
use super::types::Composition;

/// Strip a trailing oxidation-state suffix (`Fe3+` → `Fe`, `Cl-` → `Cl`).
///
/// Only suffixes carrying a sign are stripped; `Fe2` is returned unchanged.
pub fn strip_oxidation_state(key: &str) -> &str {
    let trimmed = key.trim();
    let base = trimmed.trim_end_matches(|c: char| c.is_ascii_digit() || c == '+' || c == '-');
    let suffix = &trimmed[base.len()..];
    if suffix.contains(|c: char| c == '+' || c == '-') {
        base
    } else {
        trimmed
    }
}

/// Clean a raw composition map.
///
/// Strips oxidation states, merges amounts that collapse onto the same
/// element, and drops non-positive or non-finite amounts. Keys that are not
/// an element symbol after stripping are dropped with one warning per
/// distinct key, whatever their amount.
pub fn normalize_composition_keys(raw: &Composition) -> Composition {
    let (out, unknown) = split_unknown_keys(raw);
    for key in unknown {
        tracing::warn!(key, "dropping unknown element symbol");
    }
    out
}

/// Normalised composition plus the distinct raw keys rejected as unknown symbols.
fn split_unknown_keys(raw: &Composition) -> (Composition, BTreeSet<&str>) {
    let mut out = Composition::new();
    let mut unknown = BTreeSet::new();
    for (key, &amount) in raw {
        let el = strip_oxidation_state(key);
        if !is_element_symbol(el) {
            unknown.insert(key.as_str());
            continue;
        }
        if !amount.is_finite() || amount <= 0.0 {
            tracing::debug!(key = key.as_str(), amount, "dropping non-positive amount");
            continue;
        }
        *out.entry(el.to_string()).or_insert(0.0) += amount;
    }
    (out, unknown)
}

/// Sum of positive, finite amounts.
pub fn total_atoms(comp: &Composition) -> f64 {
    comp.values()
        .filter(|a| a.is_finite() && **a > 0.0)
        .sum()
}

/// Number of elements with a positive amount.
pub fn arity(comp: &Composition) -> usize {
    comp.values().filter(|a| **a > 0.0).count()
}

/// Amounts normalised to sum to one; `None` for an empty composition.
pub fn fractional_composition(comp: &Composition) -> Option<Composition> {
    let total = total_atoms(comp);
    if total <= 0.0 {
        return None;
    }
    Some(
        comp.iter()
            .filter(|(_, a)| a.is_finite() && **a > 0.0)
            .map(|(el, a)| (el.clone(), a / total))
            .collect(),
    )
}

/// Fractions of `comp` over `elements` (same order).
///
/// `None` when the composition is empty or contains an element outside the
/// list (it does not live in this chemical system).
pub fn composition_to_barycentric(comp: &Composition, elements: &[String]) -> Option<Vec<f64>> {
    let frac = fractional_composition(comp)?;
    if frac.keys().any(|el| !elements.contains(el)) {
        return None;
    }
    Some(
        elements
            .iter()
            .map(|el| frac.get(el).copied().unwrap_or(0.0))
            .collect(),
    )
}

const SQRT3_2: f64 = 0.866_025_403_784_438_6;

/// Barycentric `(a, b, c)` → point in the unit equilateral triangle.
pub fn barycentric_to_ternary_xy(bary: [f64; 3]) -> Vector2<f64> {
    let [_, b, c] = bary;
    Vector2::new(b + 0.5 * c, SQRT3_2 * c)
}

/// Barycentric `(a, b, c, d)` → point in the unit regular tetrahedron.
pub fn barycentric_to_tetrahedral_xyz(bary: [f64; 4]) -> Vector3<f64> {
    let [_, b, c, d] = bary;
    let corner_c = Vector3::new(0.5, SQRT3_2, 0.0);
    let corner_d = Vector3::new(0.5, SQRT3_2 / 3.0, (2.0f64 / 3.0).sqrt());
    Vector3::new(b, 0.0, 0.0) + corner_c * c + corner_d * d
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    fn comp(pairs: &[(&str, f64)]) -> Composition {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn oxidation_states_are_stripped() {
        assert_eq!(strip_oxidation_state("Fe3+"), "Fe");
        assert_eq!(strip_oxidation_state("O2-"), "O");
        assert_eq!(strip_oxidation_state("Fe+3"), "Fe");
        assert_eq!(strip_oxidation_state("Cl-"), "Cl");
        assert_eq!(strip_oxidation_state(" Li+ "), "Li");
        assert_eq!(strip_oxidation_state("Fe"), "Fe");
        assert_eq!(strip_oxidation_state("Fe2"), "Fe2");
    }

    #[test]
    fn normalize_strips_and_merges() {
        let out = normalize_composition_keys(&comp(&[("Fe3+", 2.0), ("O2-", 3.0)]));
        assert_eq!(out, comp(&[("Fe", 2.0), ("O", 3.0)]));

        let merged = normalize_composition_keys(&comp(&[("V4+", 1.0), ("V5+", 2.0)]));
        assert_eq!(merged, comp(&[("V", 3.0)]));
    }

    #[test]
    fn normalize_drops_bad_amounts_and_symbols() {
        let raw = comp(&[
            ("Li", 1.0),
            ("O", 0.0),
            ("Fe", -1.0),
            ("Mn", f64::NAN),
            ("Co", f64::INFINITY),
            ("Xx", 2.0),
            ("Xx3+", 2.0),
        ]);
        assert_eq!(normalize_composition_keys(&raw), comp(&[("Li", 1.0)]));
        assert!(normalize_composition_keys(&Composition::new()).is_empty());
    }

    #[test]
    fn unknown_keys_are_reported_once_whatever_their_amount() {
        let raw = comp(&[
            ("Li", 1.0),
            ("Xx", 2.0),
            ("Xx3+", 1.0),
            ("Qq", 0.0),
            ("Zz", -1.0),
            ("Fe", -1.0),
        ]);
        let (out, unknown) = split_unknown_keys(&raw);
        assert_eq!(out, comp(&[("Li", 1.0)]));
        assert_eq!(unknown.into_iter().collect::<Vec<_>>(), vec!["Qq", "Xx", "Xx3+", "Zz"]);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn one_warning_per_unknown_key() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let raw = comp(&[("Li", 1.0), ("Xx", 2.0), ("Xx3+", 1.0), ("Qq", 0.0)]);
        tracing::subscriber::with_default(subscriber, || normalize_composition_keys(&raw));

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let warnings: Vec<&str> = logs
            .lines()
            .filter(|l| l.contains("dropping unknown element symbol"))
            .collect();
        assert_eq!(warnings.len(), 3, "{logs}");
        // string fields are written quoted, so `"Xx"` does not match `"Xx3+"`
        for key in ["Qq", "Xx", "Xx3+"] {
            let field = format!("key={key:?}");
            let hits = warnings.iter().filter(|l| l.contains(&field)).count();
            assert_eq!(hits, 1, "{field} in {logs}");
        }
    }

    #[test]
    fn fractions_and_barycentric() {
        let c = comp(&[("Li", 2.0), ("O", 1.0)]);
        assert_eq!(total_atoms(&c), 3.0);
        assert_eq!(arity(&c), 2);
        let f = fractional_composition(&c).unwrap();
        assert!((f["Li"] - 2.0 / 3.0).abs() < 1e-12);

        let els = vec!["Li".to_string(), "Fe".to_string(), "O".to_string()];
        let b = composition_to_barycentric(&c, &els).unwrap();
        assert!((b[0] - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(b[1], 0.0);
        assert!((b[2] - 1.0 / 3.0).abs() < 1e-12);

        let foreign = comp(&[("Li", 1.0), ("Co", 1.0)]);
        assert!(composition_to_barycentric(&foreign, &els).is_none());
        assert!(composition_to_barycentric(&Composition::new(), &els).is_none());
    }

    #[test]
    fn simplex_coordinates_have_unit_edges() {
        let a = barycentric_to_ternary_xy([1.0, 0.0, 0.0]);
        let b = barycentric_to_ternary_xy([0.0, 1.0, 0.0]);
        let c = barycentric_to_ternary_xy([0.0, 0.0, 1.0]);
        for (p, q) in [(a, b), (b, c), (c, a)] {
            assert!(((p - q).norm() - 1.0).abs() < 1e-12);
        }
        let corners: Vec<Vector3<f64>> = (0..4)
            .map(|k| {
                let mut bary = [0.0; 4];
                bary[k] = 1.0;
                barycentric_to_tetrahedral_xyz(bary)
            })
            .collect();
        for i in 0..4 {
            for j in i + 1..4 {
                assert!(((corners[i] - corners[j]).norm() - 1.0).abs() < 1e-12);
            }
        }
        let center = barycentric_to_tetrahedral_xyz([0.25; 4]);
        let mean = corners.iter().sum::<Vector3<f64>>() / 4.0;
        assert!((center - mean).norm() < 1e-12);
    }
}
