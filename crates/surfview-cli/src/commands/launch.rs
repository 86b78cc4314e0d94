//! Viewer launcher.
//!
//! Locates a reconstructed session directory under the subjects directory
//! and execs the external viewer on its volumes and surfaces. The viewer
//! is a black box; only the command line is composed here.

use crate::error::{CliError, CliResult, EXIT_ERROR};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub fn run(session_label: &str, subjects_dir: Option<PathBuf>, viewer: &str) -> CliResult<i32> {
    let subjects_dir = subjects_dir.unwrap_or_else(std::env::temp_dir);
    let session_dir = locate_session(&subjects_dir, session_label)?;
    let args = viewer_args(&session_dir);

    tracing::info!(
        session = %session_dir.display(),
        viewer,
        "launching viewer"
    );

    let status = Command::new(viewer)
        .args(&args)
        .status()
        .map_err(|e| CliError::Launch(format!("failed to run '{viewer}': {e}")))?;

    Ok(status.code().unwrap_or(EXIT_ERROR))
}

/// Find the session directory whose name contains the label.
///
/// Multiple matches are legal (suffixed re-runs); the lexicographically
/// first one wins, matching the glob behaviour of the original tooling.
fn locate_session(subjects_dir: &Path, session_label: &str) -> CliResult<PathBuf> {
    let mut matches: Vec<PathBuf> = Vec::new();

    for entry in fs::read_dir(subjects_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if entry.file_name().to_string_lossy().contains(session_label) {
            matches.push(entry.path());
        }
    }

    matches.sort();

    if matches.len() > 1 {
        tracing::warn!(
            count = matches.len(),
            "multiple directories match session '{session_label}', using the first"
        );
    }

    matches.into_iter().next().ok_or_else(|| {
        CliError::NotFound(format!(
            "no directory matching session '{session_label}' under {}",
            subjects_dir.display()
        ))
    })
}

// freeview argument layout: volumes first, then surfaces.
fn viewer_args(session_dir: &Path) -> Vec<String> {
    let mri = |name: &str| session_dir.join("mri").join(name).display().to_string();
    let surf = |name: &str| session_dir.join("surf").join(name).display().to_string();

    vec![
        "-v".to_string(),
        mri("T1.mgz"),
        format!("{}:colormap=lut:opacity=0.4", mri("aparc+aseg.mgz")),
        "-f".to_string(),
        format!("{}:edgecolor=blue", surf("lh.white")),
        format!("{}:edgecolor=blue", surf("rh.white")),
        format!("{}:edgecolor=red", surf("lh.pial")),
        format!("{}:edgecolor=red", surf("rh.pial")),
    ]
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn locates_directory_containing_label() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("proj-x_FS_001_recon")).unwrap();
        fs::create_dir(root.path().join("unrelated")).unwrap();

        let found = locate_session(root.path(), "FS_001").unwrap();
        assert!(found.ends_with("proj-x_FS_001_recon"));
    }

    #[test]
    fn first_sorted_match_wins() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("b_FS_001")).unwrap();
        fs::create_dir(root.path().join("a_FS_001")).unwrap();

        let found = locate_session(root.path(), "FS_001").unwrap();
        assert!(found.ends_with("a_FS_001"));
    }

    #[test]
    fn files_are_not_session_matches() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("FS_001.log"), b"").unwrap();

        let err = locate_session(root.path(), "FS_001").unwrap_err();
        assert!(err.to_string().contains("FS_001"));
    }

    #[test]
    fn missing_session_reports_label() {
        let root = tempfile::tempdir().unwrap();

        let err = locate_session(root.path(), "FS_404").unwrap_err();
        assert!(matches!(err, CliError::NotFound(_)));
        assert!(err.to_string().contains("FS_404"));
    }

    #[test]
    fn viewer_args_cover_volumes_and_surfaces() {
        let args = viewer_args(Path::new("/tmp/FS_001"));

        assert_eq!(args[0], "-v");
        assert!(args[1].ends_with("mri/T1.mgz"));
        assert!(args[2].contains("aparc+aseg.mgz"));
        assert!(args.contains(&"-f".to_string()));
        assert!(args.iter().any(|a| a.contains("lh.white")));
        assert!(args.iter().any(|a| a.contains("rh.pial")));
    }
}
