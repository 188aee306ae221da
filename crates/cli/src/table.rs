//! Hull results as a polars table.

use anyhow::{Context, Result};
use phasehull::phase::PhaseEntry;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

/// One row per entry: `entry_id, formula, e_form_per_atom, e_above_hull, is_stable`.
pub fn entries_frame(entries: &[PhaseEntry]) -> PolarsResult<DataFrame> {
    let ids: Vec<Option<String>> = entries.iter().map(|e| e.entry_id.clone()).collect();
    let formulas: Vec<String> = entries.iter().map(PhaseEntry::formula).collect();
    let e_form: Vec<Option<f64>> = entries.iter().map(|e| e.e_form_per_atom).collect();
    let e_hull: Vec<Option<f64>> = entries.iter().map(|e| e.e_above_hull).collect();
    let stable: Vec<Option<bool>> = entries.iter().map(|e| e.is_stable).collect();
    df!(
        "entry_id" => ids,
        "formula" => formulas,
        "e_form_per_atom" => e_form,
        "e_above_hull" => e_hull,
        "is_stable" => stable,
    )
}

/// Write CSV, or Parquet when the extension is `.parquet`.
pub fn write_table(df: &mut DataFrame, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    let parquet = out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));
    if parquet {
        ParquetWriter::new(file).finish(df)?;
    } else {
        CsvWriter::new(file).include_header(true).finish(df)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use phasehull::phase::Composition;
    use tempfile::tempdir;

    fn sample() -> Vec<PhaseEntry> {
        let li: Composition = [("Li".to_string(), 2.0), ("O".to_string(), 1.0)].into();
        let mut a = PhaseEntry::new(li, -14.0).with_id("Li2O");
        a.e_form_per_atom = Some(-1.5);
        a.e_above_hull = Some(0.0);
        a.is_stable = Some(true);
        let b = PhaseEntry::default();
        vec![a, b]
    }

    #[test]
    fn frame_has_one_row_per_entry() {
        let df = entries_frame(&sample()).unwrap();
        assert_eq!(df.shape(), (2, 5));
        assert_eq!(df.column("e_above_hull").unwrap().null_count(), 1);
    }

    #[test]
    fn csv_header_and_rows() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("hull.csv");
        let mut df = entries_frame(&sample()).unwrap();
        write_table(&mut df, &out).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("entry_id,formula,e_form_per_atom,e_above_hull,is_stable")
        );
        assert!(lines.next().unwrap().starts_with("Li2O,Li2O,"));
    }

    #[test]
    fn parquet_by_extension() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("sub").join("hull.parquet");
        let mut df = entries_frame(&sample()).unwrap();
        write_table(&mut df, &out).unwrap();
        let bytes = fs::read(&out).unwrap();
        assert_eq!(&bytes[..4], b"PAR1");
    }
}
