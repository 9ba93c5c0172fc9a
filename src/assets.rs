//! Discovery of level-of-detail mesh files
//!
//! Meshes are named `<prefix>_<triangles>T.obj`, for example
//! `neuron_1280T.obj` or `cylinder_172T.obj`. The triangle count orders the
//! meshes from most to least detailed.

use crate::error::Result;
use crate::topology::{ModelRef, TopologyObject};
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Returns the mesh files of `object` in `dir`, greatest level of detail first.
///
/// Files not following the naming scheme are ignored.
///
/// # Errors
///
/// Returns an I/O error if `dir` cannot be read.
pub fn lod_mesh_filenames(dir: impl AsRef<Path>, object: TopologyObject) -> Result<Vec<ModelRef>> {
    let dir = dir.as_ref();
    let prefix = object.mesh_prefix();
    let pattern = Regex::new(&format!(r"^{}_(?P<triangles>[0-9]+)T\.obj$", regex::escape(prefix)))?;

    let mut triangle_counts: Vec<(u64, String)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(captures) = pattern.captures(name) {
            // oversized counts fail to parse and are skipped
            if let Ok(triangles) = captures["triangles"].parse::<u64>() {
                triangle_counts.push((triangles, name.to_string()));
            }
        }
    }

    triangle_counts.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    debug!(
        dir = %dir.display(),
        prefix,
        meshes = triangle_counts.len(),
        "Discovered LOD meshes"
    );

    Ok(triangle_counts
        .into_iter()
        .map(|(_, name)| ModelRef::new(dir.join(name)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_orders_by_triangle_count() {
        let dir = tempdir().unwrap();
        for name in [
            "neuron_320T.obj",
            "neuron_1280T.obj",
            "neuron_80T.obj",
            "cylinder_172T.obj",
            "neuron_notes.txt",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let neurons = lod_mesh_filenames(dir.path(), TopologyObject::Neuron).unwrap();
        let names: Vec<_> = neurons
            .iter()
            .map(|m| m.0.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["neuron_1280T.obj", "neuron_320T.obj", "neuron_80T.obj"]);

        let edges = lod_mesh_filenames(dir.path(), TopologyObject::Edge).unwrap();
        assert_eq!(edges, vec![ModelRef::new(dir.path().join("cylinder_172T.obj"))]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(lod_mesh_filenames(missing, TopologyObject::Neuron).is_err());
    }
}
