use nalgebra::{Vector3, Vector4};
use phasehull::hull::{
    build_lower_hull_model, build_lower_hull_model_4d, compute_e_above_hull_4d,
    compute_e_above_hull_for_points, compute_lower_hull_3d, compute_lower_hull_4d, e_hull_at_xy,
    HullCfg,
};
use phasehull::phase::{
    compute_e_form_per_atom, find_lowest_energy_unary_refs, Composition, PhaseEntry,
};
use proptest::prelude::*;

fn cloud3() -> impl Strategy<Value = Vec<Vector3<f64>>> {
    prop::collection::vec(
        (0.0f64..1.0, 0.0f64..1.0, -1.0f64..1.0).prop_map(|(x, y, z)| Vector3::new(x, y, z)),
        5..40,
    )
}

fn cloud4() -> impl Strategy<Value = Vec<Vector4<f64>>> {
    prop::collection::vec(
        (0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0, -1.0f64..1.0)
            .prop_map(|(x, y, z, w)| Vector4::new(x, y, z, w)),
        6..30,
    )
}

fn comp(pairs: &[(&str, f64)]) -> Composition {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn lower_facets_point_down_3d(points in cloud3()) {
        let cfg = HullCfg::default();
        let lower = compute_lower_hull_3d(&points, &cfg);
        for f in &lower {
            prop_assert!(f.normal.z < 0.0);
            prop_assert!((f.normal.norm() - 1.0).abs() < 1e-9);
        }
        let models = build_lower_hull_model(&lower);
        let e = compute_e_above_hull_for_points(&points, &models);
        prop_assert_eq!(e.len(), points.len());
        prop_assert!(e.iter().all(|&d| d >= 0.0));
    }

    #[test]
    fn lower_facets_support_the_cloud_3d(points in cloud3()) {
        let cfg = HullCfg::default();
        for f in compute_lower_hull_3d(&points, &cfg) {
            for p in &points {
                // nothing sits below a lower facet's plane
                prop_assert!(f.signed_distance(p) <= 1e-9);
            }
        }
    }

    #[test]
    fn lower_vertices_are_on_the_hull_3d(points in cloud3()) {
        let lower = compute_lower_hull_3d(&points, &HullCfg::default());
        let models = build_lower_hull_model(&lower);
        for f in &lower {
            if f.normal.z.abs() < 1e-3 {
                continue;
            }
            for v in &f.vertices {
                let h = e_hull_at_xy(&models, v.x, v.y);
                prop_assert!(h.is_some());
                prop_assert!((h.unwrap() - v.z).abs() < 1e-7);
            }
        }
    }

    #[test]
    fn lower_facets_point_down_4d(points in cloud4()) {
        let lower = compute_lower_hull_4d(&points, &HullCfg::default());
        prop_assert!(lower.iter().all(|f| f.normal.w < 0.0));
        let models = build_lower_hull_model_4d(&lower);
        let e = compute_e_above_hull_4d(&points, &models);
        prop_assert!(e.iter().all(|&d| d >= 0.0));
    }

    #[test]
    fn formation_energy_is_scale_invariant(
        li in 0.5f64..4.0,
        o in 0.5f64..4.0,
        epa in -6.0f64..0.0,
        k in 0.1f64..10.0,
    ) {
        let refs = find_lowest_energy_unary_refs(&[
            PhaseEntry::new(comp(&[("Li", 1.0)]), -1.9),
            PhaseEntry::new(comp(&[("O", 2.0)]), -9.8),
        ]);
        let base = PhaseEntry::new(comp(&[("Li", li), ("O", o)]), epa * (li + o));
        let scaled = PhaseEntry::new(comp(&[("Li", k * li), ("O", k * o)]), k * epa * (li + o));
        let a = compute_e_form_per_atom(&base, &refs).unwrap();
        let b = compute_e_form_per_atom(&scaled, &refs).unwrap();
        prop_assert!((a - b).abs() < 1e-9);
    }
}
