//! Identity consistency checks.
//!
//! `graphdoc check` reports two recurring editing accidents without touching
//! any file: scripts that share a uuid (usually a copied file), and files
//! whose recorded name drifted from their file name on disk.

use std::collections::BTreeMap;
use std::path::PathBuf;

use graphdoc_core::file::{GraphFile, Package};

/// Findings of a consistency check.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Uuids shared by more than one script, with the offending paths.
    pub duplicate_uuids: Vec<(String, Vec<PathBuf>)>,
    /// Files whose model name differs from the file stem, with the
    /// recorded name.
    pub name_mismatches: Vec<(PathBuf, String)>,
}

impl CheckReport {
    /// True when nothing was found.
    pub fn is_clean(&self) -> bool {
        self.duplicate_uuids.is_empty() && self.name_mismatches.is_empty()
    }
}

fn stem_of(graph: &GraphFile) -> &str {
    graph
        .path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("")
}

/// Checks scripts and package members for identity inconsistencies.
pub fn check(scripts: &[GraphFile], packages: &[Package]) -> CheckReport {
    let mut report = CheckReport::default();

    let mut by_uuid: BTreeMap<&str, Vec<PathBuf>> = BTreeMap::new();
    for script in scripts {
        by_uuid
            .entry(script.uuid.as_str())
            .or_default()
            .push(script.path.clone());
    }
    for (uuid, paths) in by_uuid {
        if paths.len() > 1 {
            report.duplicate_uuids.push((uuid.to_string(), paths));
        }
    }

    let members = packages.iter().flat_map(|package| &package.members);
    for graph in scripts.iter().chain(members.map(|member| &member.graph)) {
        if graph.name != stem_of(graph) {
            report
                .name_mismatches
                .push((graph.path.clone(), graph.name.clone()));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    use graphdoc_core::file::GraphInfo;

    fn script(path: &str, uuid: &str, name: &str) -> GraphFile {
        GraphFile {
            path: PathBuf::from(path),
            uuid: uuid.to_string(),
            name: name.to_string(),
            description: String::new(),
            info: GraphInfo::default(),
            nodes: Vec::new(),
            groups: Vec::new(),
            annotations: Vec::new(),
            dependencies: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    #[test]
    fn shared_uuids_are_reported_once_per_uuid() {
        let scripts = vec![
            script("/s/a.dyn", "u-1", "a"),
            script("/s/b.dyn", "u-1", "b"),
            script("/s/c.dyn", "u-2", "c"),
        ];
        let report = check(&scripts, &[]);
        assert_eq!(report.duplicate_uuids.len(), 1);
        assert_eq!(report.duplicate_uuids[0].0, "u-1");
        assert_eq!(report.duplicate_uuids[0].1.len(), 2);
    }

    #[test]
    fn name_drift_is_reported() {
        let scripts = vec![script("/s/export rails.dyn", "u-1", "old name")];
        let report = check(&scripts, &[]);
        assert_eq!(report.name_mismatches.len(), 1);
        assert_eq!(report.name_mismatches[0].1, "old name");
    }

    #[test]
    fn clean_trees_stay_clean() {
        let scripts = vec![script("/s/a.dyn", "u-1", "a")];
        assert!(check(&scripts, &[]).is_clean());
    }
}
