//! Path helpers for document links and script ordering.

use std::path::Path;

/// Renders `path` relative to the directory of `from` using forward slashes.
///
/// Both paths are expected to live under the same documentation root. The
/// result always starts with `./`, climbing with `..` segments where the
/// target is not beneath the starting directory.
pub fn relative_to(path: &Path, from: &Path) -> String {
    let from_dir = if from.extension().is_some() {
        from.parent().unwrap_or_else(|| Path::new(""))
    } else {
        from
    };
    let target: Vec<String> = components_of(path);
    let start: Vec<String> = components_of(from_dir);
    let common = target
        .iter()
        .zip(start.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let mut parts: Vec<String> = vec!["..".to_string(); start.len() - common];
    parts.extend(target[common..].iter().cloned());
    format!("./{}", parts.join("/"))
}

fn components_of(path: &Path) -> Vec<String> {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect()
}

/// Parses the ordering number a script file name starts with.
///
/// Numbered scripts (`10_export rails.dyn`) form a navigable sequence; the
/// number ends at the first underscore or space. A missing or malformed
/// number yields `None`.
pub fn start_number(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    for separator in ['_', ' '] {
        let Some(index) = stem.find(separator) else {
            continue;
        };
        if index < 1 {
            continue;
        }
        if let Ok(number) = stem[..index].parse::<u32>() {
            return Some(number);
        }
    }
    None
}

const DEV_MARKERS: &[&str] = &["_dev_", " dev ", "-dev-"];

/// True for work-in-progress file names that must not be documented.
pub fn is_dev(path: &Path) -> bool {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("")
        .to_lowercase();
    DEV_MARKERS.iter().any(|marker| stem.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    #[test]
    fn relative_path_within_the_same_directory() {
        let target = PathBuf::from("/docs/Scripts/a.org");
        let from = PathBuf::from("/docs/Scripts/b.org");
        assert_eq!(relative_to(&target, &from), "./a.org");
    }

    #[test]
    fn relative_path_descends_into_subdirectories() {
        let target = PathBuf::from("/docs/Packages/tools/1.0/area.org");
        let from = PathBuf::from("/docs/Packages/index.org");
        assert_eq!(relative_to(&target, &from), "./tools/1.0/area.org");
    }

    #[test]
    fn relative_path_climbs_to_siblings() {
        let target = PathBuf::from("/docs/Packages/tools/tools-1.0.org");
        let from = PathBuf::from("/docs/Scripts/sub/a.org");
        assert_eq!(
            relative_to(&target, &from),
            "./../../Packages/tools/tools-1.0.org"
        );
    }

    #[test]
    fn start_numbers_are_parsed_up_to_the_first_separator() {
        assert_eq!(start_number(Path::new("10_export.dyn")), Some(10));
        assert_eq!(start_number(Path::new("2 load model.dyn")), Some(2));
        assert_eq!(start_number(Path::new("export.dyn")), None);
        assert_eq!(start_number(Path::new("v2_export.dyn")), None);
    }

    #[test]
    fn dev_markers_are_recognized_case_insensitively() {
        assert!(is_dev(Path::new("10_DEV_export.dyn")));
        assert!(is_dev(Path::new("model-dev-check.dyn")));
        assert!(!is_dev(Path::new("developed.dyn")));
    }
}
