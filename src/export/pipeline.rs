use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use super::error::ExportError;
use super::writer::{writer_for, ModelVariant};
use crate::scene::SceneSnapshot;

/// Export configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Destination file; created or overwritten.
    pub destination_path: PathBuf,
    /// Export a dynamic model with skinned vertices and a bone structure.
    pub include_bones: bool,
}

impl ExportConfig {
    /// Configuration for a static export to `destination_path`.
    pub fn new(destination_path: impl Into<PathBuf>) -> Self {
        Self {
            destination_path: destination_path.into(),
            include_bones: false,
        }
    }

    pub fn with_bones(mut self, include_bones: bool) -> Self {
        self.include_bones = include_bones;
        self
    }
}

/// Information about a completed export.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Path of the written file.
    pub path: PathBuf,
    /// Variant that was emitted.
    pub variant: ModelVariant,
    /// Total bytes written.
    pub bytes_written: u64,
    /// Export duration.
    pub duration_ms: u64,
}

/// Exporter turning scene snapshots into `.z3d` files.
///
/// One call to [`Exporter::export`] runs synchronously to completion and
/// touches exactly one file. Concurrent exports to the same path are not
/// coordinated here; callers must serialize such calls themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exporter;

impl Exporter {
    pub fn new() -> Self {
        Self
    }

    /// Export a snapshot according to `config`.
    ///
    /// The snapshot is serialized fully in memory before the destination
    /// is opened, so writer failures leave no file behind. An I/O failure
    /// during the write itself may leave a partial file; no cleanup is
    /// attempted.
    pub fn export(
        &self,
        snapshot: &SceneSnapshot,
        config: &ExportConfig,
    ) -> Result<ExportSummary, ExportError> {
        let start_time = Instant::now();

        validate_destination(&config.destination_path)?;

        let writer = writer_for(config.include_bones);
        info!(
            "Exporting {} objects as {:?} model to: {}",
            snapshot.objects.len(),
            writer.variant(),
            config.destination_path.display()
        );

        let bytes = writer.serialize(snapshot)?;

        // File and BufWriter close on drop on every exit path.
        let file = File::create(&config.destination_path)
            .map_err(|e| create_error(&config.destination_path, e))?;
        let mut out = BufWriter::new(file);
        out.write_all(&bytes)?;
        out.flush()?;

        let duration = start_time.elapsed();
        info!(
            "Export finished: {} bytes in {}ms",
            bytes.len(),
            duration.as_millis()
        );

        Ok(ExportSummary {
            path: config.destination_path.clone(),
            variant: writer.variant(),
            bytes_written: bytes.len() as u64,
            duration_ms: duration.as_millis() as u64,
        })
    }
}

/// An unwritable destination is a path problem, not a mid-write failure.
fn create_error(path: &Path, e: std::io::Error) -> ExportError {
    if e.kind() == std::io::ErrorKind::PermissionDenied {
        ExportError::InvalidPath(path.to_path_buf())
    } else {
        ExportError::Write(e)
    }
}

fn validate_destination(path: &Path) -> Result<(), ExportError> {
    if path.as_os_str().is_empty() {
        return Err(ExportError::InvalidPath(path.to_path_buf()));
    }
    // The exporter never creates directories; the parent must exist.
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(ExportError::InvalidPath(path.to_path_buf()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::writer::{FORMAT_VERSION, MAGIC};
    use crate::scene::{MeshData, MeshRange, ObjectRef, Vertex};
    use tempfile::TempDir;

    fn quad_object(name: &str) -> ObjectRef {
        let corners = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        ObjectRef {
            name: name.to_string(),
            mesh: MeshData {
                vertices: corners
                    .iter()
                    .map(|&[x, y]| Vertex {
                        position: [x, y, 0.0],
                        normal: [0.0, 0.0, 1.0],
                        uv: [x, y],
                        weights: None,
                    })
                    .collect(),
                faces: vec![[0, 1, 2], [0, 2, 3]],
                ranges: vec![MeshRange {
                    offset: 0,
                    count: 6,
                    texture: "floor.png".to_string(),
                }],
            },
            skeleton: None,
        }
    }

    #[test]
    fn empty_destination_is_rejected() {
        let snapshot = SceneSnapshot::new(vec![quad_object("floor")]);
        let config = ExportConfig::new("");

        let err = Exporter::new().export(&snapshot, &config).unwrap_err();
        assert!(matches!(err, ExportError::InvalidPath(_)));
    }

    #[test]
    fn missing_parent_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no_such_dir").join("out.z3d");
        let snapshot = SceneSnapshot::new(vec![quad_object("floor")]);
        let config = ExportConfig::new(&path);

        let err = Exporter::new().export(&snapshot, &config).unwrap_err();
        assert!(matches!(err, ExportError::InvalidPath(_)));
        assert!(!path.exists());
    }

    #[test]
    fn denied_destination_is_an_invalid_path() {
        let path = Path::new("/protected/out.z3d");
        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        assert!(matches!(
            create_error(path, denied),
            ExportError::InvalidPath(_)
        ));

        let other = std::io::Error::from(std::io::ErrorKind::Other);
        assert!(matches!(create_error(path, other), ExportError::Write(_)));
    }

    #[test]
    fn static_export_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.z3d");
        let snapshot = SceneSnapshot::new(vec![quad_object("floor")]);
        let config = ExportConfig::new(&path);

        let summary = Exporter::new()
            .export(&snapshot, &config)
            .expect("static export");

        assert_eq!(summary.variant, ModelVariant::Static);
        let bytes = std::fs::read(&path).expect("read exported file");
        assert_eq!(bytes.len() as u64, summary.bytes_written);
        assert_eq!(&bytes[..4], &MAGIC);
        assert_eq!(bytes[4], FORMAT_VERSION);
        assert_eq!(bytes[5], ModelVariant::Static.tag_byte());
    }

    #[test]
    fn boned_export_without_skeleton_writes_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.z3d");
        let snapshot = SceneSnapshot::new(vec![quad_object("floor")]);
        let config = ExportConfig::new(&path).with_bones(true);

        let err = Exporter::new().export(&snapshot, &config).unwrap_err();
        assert!(matches!(err, ExportError::MissingSkeletonData { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn repeated_exports_are_byte_identical() {
        let temp_dir = TempDir::new().unwrap();
        let first_path = temp_dir.path().join("first.z3d");
        let second_path = temp_dir.path().join("second.z3d");
        let snapshot = SceneSnapshot::new(vec![quad_object("floor"), quad_object("wall")]);

        let exporter = Exporter::new();
        exporter
            .export(&snapshot, &ExportConfig::new(&first_path))
            .expect("first export");
        exporter
            .export(&snapshot, &ExportConfig::new(&second_path))
            .expect("second export");

        let first = std::fs::read(&first_path).unwrap();
        let second = std::fs::read(&second_path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn export_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.z3d");
        std::fs::write(&path, b"stale contents that are longer than the header").unwrap();

        let snapshot = SceneSnapshot::new(vec![]);
        let summary = Exporter::new()
            .export(&snapshot, &ExportConfig::new(&path))
            .expect("export over existing file");

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len() as u64, summary.bytes_written);
        assert_eq!(&bytes[..4], &MAGIC);
    }
}
