//! # z3d-export
//!
//! Scene export core for the zero-graphics `.z3d` model format.
//!
//! This crate turns an already-collected [`SceneSnapshot`] into a `.z3d`
//! file. The host integration layer (for example a Blender export
//! operator) gathers the snapshot and the configuration; the only
//! contract it depends on is [`Exporter::export`].
//!
//! - **Writer variants**: static models carry pre-transformed geometry,
//!   dynamic models add skinned vertices and a bone hierarchy. The
//!   variant is selected by [`ExportConfig::include_bones`] and encoded
//!   in the file header.
//! - **Determinism**: writers are pure functions of the snapshot, so
//!   identical input produces byte-identical files.
//! - **Error reporting**: every failure surfaces as an [`ExportError`]
//!   for the caller to present; the exporter never terminates the host.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use z3d_export::{ExportConfig, Exporter, MeshData, ObjectRef, SceneSnapshot};
//!
//! let snapshot = SceneSnapshot::new(vec![ObjectRef {
//!     name: "cube".to_string(),
//!     mesh: MeshData::default(),
//!     skeleton: None,
//! }]);
//!
//! let config = ExportConfig::new("cube.z3d");
//! let summary = Exporter::new().export(&snapshot, &config)?;
//!
//! println!("wrote {} bytes", summary.bytes_written);
//! # Ok::<(), z3d_export::ExportError>(())
//! ```

pub mod export;
pub mod scene;

// Re-export commonly used types
pub use export::{
    BonedWriter, ExportConfig, ExportError, ExportSummary, Exporter, ModelVariant, ModelWriter,
    PlainWriter, FORMAT_VERSION, MAGIC,
};
pub use scene::{
    Bone, MeshData, MeshRange, ObjectRef, SceneSnapshot, SkeletonData, Vertex, VertexWeights,
};

use anyhow::Result;
use tracing::info;

/// Version information for the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library with structured logging.
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("z3d_export=info")
        .with_target(false)
        .try_init();

    info!("Initializing z3d-export v{}", VERSION);

    Ok(())
}
