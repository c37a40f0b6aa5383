//! Export pipeline for writing scene snapshots to `.z3d` model files
//!
//! This module validates the export configuration, selects the writer
//! variant (static or dynamic) and writes the serialized snapshot to the
//! destination file.

mod error;
mod pipeline;
mod writer;

pub use error::ExportError;
pub use pipeline::{ExportConfig, ExportSummary, Exporter};
pub use writer::{
    writer_for, BonedWriter, ModelVariant, ModelWriter, PlainWriter, FORMAT_VERSION, MAGIC,
};
