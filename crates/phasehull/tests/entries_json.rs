//! Entries arrive as JSON from callers; check parsing and a full build.

use phasehull::phase::{build_phase_diagram, get_pd_stats, HullFacets, PhaseEntry};
use phasehull::HullCfg;

const LI_FE_O: &str = r#"[
    {"entry_id": "Li", "composition": {"Li": 1}, "energy": -1.9},
    {"entry_id": "Fe", "composition": {"Fe": 2}, "energy": -16.6},
    {"entry_id": "O2", "composition": {"O": 2}, "energy": -9.8},
    {"entry_id": "Li2O", "composition": {"Li": 2, "O": 1}, "energy": -14.0},
    {"entry_id": "Fe2O3", "composition": {"Fe3+": 2, "O2-": 3}, "energy": -38.0, "correction": -1.0},
    {"entry_id": "LiFeO2", "composition": {"Li": 1, "Fe": 1, "O": 2}, "energy": -26.0},
    {"entry_id": "junk", "composition": {"Xx": 1}, "energy": -1.0}
]"#;

#[test]
fn parse_entries_with_optional_fields() {
    let entries: Vec<PhaseEntry> = serde_json::from_str(LI_FE_O).unwrap();
    assert_eq!(entries.len(), 7);
    assert_eq!(entries[4].correction, Some(-1.0));
    assert_eq!(entries[0].e_form_per_atom, None);
    assert_eq!(entries[0].formula(), "Li");
    assert_eq!(entries[3].formula(), "Li2O");

    let json = serde_json::to_value(&entries[0]).unwrap();
    // absent derived fields are not written back
    assert!(json.get("e_above_hull").is_none());
    assert_eq!(json["energy"], -1.9);
}

#[test]
fn build_from_json() {
    let entries: Vec<PhaseEntry> = serde_json::from_str(LI_FE_O).unwrap();
    let pd = build_phase_diagram(&entries, &HullCfg::default());
    assert_eq!(pd.elements, vec!["Fe", "Li", "O"]);
    assert!(matches!(pd.hull, HullFacets::Ternary(ref f) if !f.is_empty()));

    let by_id = |id: &str| {
        pd.entries
            .iter()
            .find(|e| e.entry_id.as_deref() == Some(id))
            .unwrap()
    };
    assert_eq!(by_id("Fe2O3").composition.keys().collect::<Vec<_>>(), vec!["Fe", "O"]);
    // the unknown symbol is dropped, leaving nothing to measure
    assert!(by_id("junk").composition.is_empty());
    assert_eq!(by_id("junk").e_form_per_atom, None);
    for id in ["Li", "Fe", "O2"] {
        assert_eq!(by_id(id).e_above_hull, Some(0.0));
    }
    for e in pd.entries.iter().filter_map(|e| e.e_above_hull) {
        assert!(e >= 0.0);
    }

    let stats = get_pd_stats(&pd.processed());
    assert_eq!(stats.total, 7);
    assert_eq!(stats.unary, 3);
    assert_eq!(stats.binary, 2);
    assert_eq!(stats.ternary, 1);
    assert!(stats.stable >= 3);
    let out = serde_json::to_string(&stats).unwrap();
    assert!(out.contains("\"ternary\":1"));
}
