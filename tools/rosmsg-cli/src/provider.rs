//! Definition lookup in a directory of packages.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rosmsg::DefinitionProvider;

/// Finds `pkg/Type` (or `pkg/msg/Type`) as `<root>/pkg/**/Type.msg`.
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DefinitionProvider for DirectoryProvider {
    type Error = io::Error;

    fn definition_text(&mut self, full_type_name: &str) -> io::Result<Option<String>> {
        let (Some(package), Some(name)) = (
            full_type_name.split('/').next(),
            full_type_name.rsplit('/').next(),
        ) else {
            return Ok(None);
        };
        let package_dir = self.root.join(package);
        if !package_dir.is_dir() {
            return Ok(None);
        }
        match find_file(&package_dir, &format!("{name}.msg"))? {
            Some(path) => {
                tracing::debug!(path = %path.display(), "read definition");
                fs::read_to_string(path).map(Some)
            }
            None => Ok(None),
        }
    }
}

/// Depth-first search for `file_name` under `dir`, entries in name order.
fn find_file(dir: &Path, file_name: &str) -> io::Result<Option<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            if let Some(found) = find_file(&path, file_name)? {
                return Ok(Some(found));
            }
        } else if path.file_name().is_some_and(|n| n == file_name) {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use rosmsg::{Dialect, bundle_definitions};

    use super::*;

    fn write(root: &Path, relative: &str, text: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn finds_nested_definitions() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "geometry_msgs/msg/Point.msg", "float64 x\n");
        write(dir.path(), "nav_msgs/deep/msg/Path.msg", "geometry_msgs/Point[] points\n");

        let mut provider = DirectoryProvider::new(dir.path());
        assert_eq!(
            provider.definition_text("geometry_msgs/Point").unwrap(),
            Some("float64 x\n".to_string())
        );
        assert!(provider.definition_text("nav_msgs/msg/Path").unwrap().is_some());
        assert_eq!(provider.definition_text("geometry_msgs/Pose").unwrap(), None);
        assert_eq!(provider.definition_text("missing_msgs/Point").unwrap(), None);
    }

    #[test]
    fn bundles_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "geometry_msgs/msg/Point.msg", "float64 x");
        write(dir.path(), "geometry_msgs/msg/Pose.msg", "Point position");

        let mut provider = DirectoryProvider::new(dir.path());
        let bundle = bundle_definitions(
            "geometry_msgs/Pose pose",
            "nav_msgs",
            Dialect::Ros1Msg,
            &mut provider,
        )
        .unwrap();
        assert!(bundle.contains("MSG: geometry_msgs/Pose\nPoint position\n"));
        assert!(bundle.contains("MSG: geometry_msgs/Point\nfloat64 x\n"));
    }
}
