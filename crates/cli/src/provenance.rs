//! Sidecar JSON describing how a hull table was produced and what it found.
//!
//! Layout of `<stem>.provenance.json`:
//! - `code_rev`, `version`, `callsite`: which build wrote the table.
//! - `params`: the command's inputs as given.
//! - `hull`: chemical system, hull kind, facet count, stable entry ids.
//! - `outputs`: the table path.

use anyhow::{Context, Result};
use phasehull::phase::{HullFacets, PhaseDiagram};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Hull results worth keeping next to the table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HullSummary {
    /// Sorted element symbols of the chemical system.
    pub elements: Vec<String>,
    pub kind: &'static str,
    pub facets: usize,
    /// `entry_id` of each stable entry (formula when the id is missing), input order.
    pub stable: Vec<String>,
}

impl HullSummary {
    pub fn from_diagram(pd: &PhaseDiagram) -> Self {
        let kind = match pd.hull {
            HullFacets::Empty => "empty",
            HullFacets::Binary(_) => "binary",
            HullFacets::Ternary(_) => "ternary",
            HullFacets::Quaternary(_) => "quaternary",
        };
        Self {
            elements: pd.elements.clone(),
            kind,
            facets: pd.hull.len(),
            stable: pd
                .stable_entries()
                .map(|e| e.entry_id.clone().unwrap_or_else(|| e.formula()))
                .collect(),
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "elements": self.elements,
            "kind": self.kind,
            "facets": self.facets,
            "stable_entries": self.stable,
        })
    }
}

/// Write the sidecar for `artifact`; returns its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(
    artifact: P,
    params: Value,
    summary: &HullSummary,
) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let caller = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "version": phasehull::VERSION,
        "callsite": { "file": caller.file(), "line": caller.line() },
        "params": params,
        "hull": summary.to_json(),
        "outputs": [artifact.to_string_lossy()],
    });

    let path = provenance_path(artifact);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating provenance dir {}", dir.display()))?;
    }
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("table"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// `GIT_COMMIT` (build time, then runtime), else `git rev-parse HEAD`, else `unknown`.
pub fn current_git_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .filter(|rev| !rev.is_empty())
        .or_else(|| std::env::var("GIT_COMMIT").ok().filter(|rev| !rev.is_empty()))
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?;
    Some(rev.trim().to_string())
}
