use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use phasehull::phase::{build_phase_diagram, get_pd_stats, PhaseEntry};
use phasehull::HullCfg;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod table;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Phase diagram hull runner")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build the lower hull and write per-entry results as CSV or Parquet
    Hull {
        /// JSON array of phase entries
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Optional TOML file overriding hull tolerances
        #[arg(long)]
        cfg: Option<PathBuf>,
    },
    /// Print entry counts and formation-energy range as JSON
    Stats {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Hull { input, out, cfg } => hull(&input, &out, cfg.as_deref()),
        Action::Stats { input } => stats(&input),
        Action::Report => report(),
    }
}

fn read_entries(path: &Path) -> Result<Vec<PhaseEntry>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing entries in {}", path.display()))
}

fn load_cfg(path: Option<&Path>) -> Result<HullCfg> {
    let Some(path) = path else {
        return Ok(HullCfg::default());
    };
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing hull config {}", path.display()))
}

fn hull(input: &Path, out: &Path, cfg_path: Option<&Path>) -> Result<()> {
    let cfg = load_cfg(cfg_path)?;
    let entries = read_entries(input)?;
    tracing::info!(input = %input.display(), entries = entries.len(), "hull");

    let pd = build_phase_diagram(&entries, &cfg);
    let stable = pd.stable_entries().count();
    tracing::info!(
        elements = ?pd.elements,
        facets = pd.hull.len(),
        stable,
        "built phase diagram"
    );

    let mut df = table::entries_frame(&pd.entries)?;
    table::write_table(&mut df, out)?;

    let params = json!({
        "input": input.to_string_lossy(),
        "cfg": cfg_path.map(|p| p.to_string_lossy()),
        "entries": entries.len(),
    });
    let summary = provenance::HullSummary::from_diagram(&pd);
    let prov = provenance::write_sidecar(out, params, &summary)?;
    tracing::info!(out = %out.display(), provenance = %prov.display(), "wrote table");
    Ok(())
}

fn stats(input: &Path) -> Result<()> {
    let entries = read_entries(input)?;
    let pd = build_phase_diagram(&entries, &HullCfg::default());
    let stats = get_pd_stats(&pd.processed());
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": phasehull::VERSION,
        "cfg": {
            "defaults": format!("{:?}", HullCfg::default()),
        },
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const ENTRIES: &str = r#"[
        {"entry_id": "Li", "composition": {"Li": 1}, "energy": -1.9},
        {"entry_id": "O2", "composition": {"O": 2}, "energy": -9.8},
        {"entry_id": "Li2O", "composition": {"Li": 2, "O": 1}, "energy": -14.0}
    ]"#;

    #[test]
    fn hull_writes_table_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("entries.json");
        std::fs::write(&input, ENTRIES).unwrap();
        let out = dir.path().join("out").join("li_o.csv");
        hull(&input, &out, None).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 4);
        let prov = dir.path().join("out").join("li_o.provenance.json");
        let sidecar: serde_json::Value =
            serde_json::from_slice(&std::fs::read(prov).unwrap()).unwrap();
        assert_eq!(sidecar["hull"]["kind"], "binary");
        assert_eq!(sidecar["hull"]["stable_entries"], json!(["Li", "O2", "Li2O"]));
    }

    #[test]
    fn partial_cfg_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tol.toml");
        std::fs::write(&path, "contain_eps = 1e-6\n").unwrap();
        let cfg = load_cfg(Some(&path)).unwrap();
        assert_eq!(cfg.contain_eps, 1e-6);
        assert_eq!(cfg.on_hull_tol, HullCfg::default().on_hull_tol);
    }

    #[test]
    fn bad_input_reports_path() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broken.json");
        std::fs::write(&input, "{not json").unwrap();
        let err = read_entries(&input).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }
}
