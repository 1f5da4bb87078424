// crates/malpack-cli/src/generate.rs
// ============================================================================
// Module: Malpack Manifest Generation
// Description: Filename-derived manifest generation from a sample tree.
// Purpose: Rebuild the manifest shape from archived sample directories.
// Dependencies: malpack-core, thiserror, tracing
// ============================================================================

//! ## Overview
//! Sample archives are laid out as
//! `<root>/{compromised_lib,malicious_intent}/<package>/<version>/`, with
//! `/` encoded as `@` in directory names. Generation is a pure directory
//! listing pass: compromised-library packages collect their version
//! directories, malicious-intent packages map to `null`, and the result
//! uses the same ordering rules as a store synchronization.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use malpack_core::Manifest;
use malpack_core::VersionOrder;
use malpack_core::decode_package_fragment;
use malpack_core::decode_path_fragment;
use malpack_core::sort_versions;
use thiserror::Error;
use tracing::warn;

// ============================================================================
// SECTION: Sample Kinds
// ============================================================================

/// Top-level sample classification directories.
#[derive(Debug, Clone, Copy)]
enum SampleKind {
    /// Compromised legitimate libraries, one directory per version.
    CompromisedLib,
    /// Purpose-built malicious packages.
    MaliciousIntent,
}

impl SampleKind {
    /// Returns the directory name for the classification.
    const fn directory(self) -> &'static str {
        match self {
            Self::CompromisedLib => "compromised_lib",
            Self::MaliciousIntent => "malicious_intent",
        }
    }
}

// ============================================================================
// SECTION: Generation
// ============================================================================

/// Generates a manifest from an on-disk sample tree.
///
/// Both classification directories must exist under `root`.
///
/// # Errors
///
/// Returns [`GenerateError`] when a directory cannot be listed.
pub(crate) fn generate_manifest(root: &Path) -> Result<Manifest, GenerateError> {
    let mut manifest = Manifest::new();

    for kind in [SampleKind::CompromisedLib, SampleKind::MaliciousIntent] {
        let kind_dir = root.join(kind.directory());
        for package_dir in subdirectories(&kind_dir)? {
            let package_name = decode_package_fragment(&directory_name(&package_dir));
            match kind {
                SampleKind::MaliciousIntent => {
                    manifest.insert(package_name, None);
                }
                SampleKind::CompromisedLib => {
                    let mut versions: Vec<String> = subdirectories(&package_dir)?
                        .iter()
                        .map(|version_dir| decode_path_fragment(&directory_name(version_dir)))
                        .collect();
                    if sort_versions(&mut versions) == VersionOrder::Lexicographic {
                        warn!(
                            package = %package_name,
                            "failed to semantically sort sample versions; using lexicographic order"
                        );
                    }
                    manifest.insert(package_name, Some(versions));
                }
            }
        }
    }

    Ok(manifest)
}

/// Lists the immediate subdirectories of a directory.
fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    let io_error = |err: std::io::Error| GenerateError::Io {
        path: dir.display().to_string(),
        source: err,
    };
    let mut directories = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        if entry.file_type().map_err(io_error)?.is_dir() {
            directories.push(entry.path());
        }
    }
    directories.sort();
    Ok(directories)
}

/// Returns the final path component as a string.
fn directory_name(path: &Path) -> String {
    path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised during manifest generation.
#[derive(Debug, Error)]
pub(crate) enum GenerateError {
    /// A sample directory could not be listed.
    #[error("io error: {path}: {source}")]
    Io {
        /// The directory being listed.
        path: String,
        /// Original I/O error.
        source: std::io::Error,
    },
}
