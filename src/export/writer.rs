use byteorder::{LittleEndian, WriteBytesExt};
use serde::{Deserialize, Serialize};

use super::error::ExportError;
use crate::scene::{ObjectRef, SceneSnapshot, SkeletonData};

/// Magic bytes opening every `.z3d` file.
pub const MAGIC: [u8; 4] = *b"Z3D\0";

/// Current on-disk format version.
pub const FORMAT_VERSION: u8 = 1;

/// Model variant encoded in the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ModelVariant {
    /// Skinned vertices plus a bone hierarchy.
    Dynamic = 0,
    /// Pre-transformed geometry without skinning.
    Static = 1,
}

impl ModelVariant {
    /// Variant byte as stored in the header, directly after the version.
    pub fn tag_byte(self) -> u8 {
        self as u8
    }
}

/// Capability to serialize a scene snapshot to `.z3d` bytes.
///
/// Implementations must be pure functions of their input: no hidden
/// state, and identical snapshots produce byte-identical output.
pub trait ModelWriter {
    /// The variant this writer emits.
    fn variant(&self) -> ModelVariant;

    /// Serialize the snapshot to a complete file image.
    fn serialize(&self, snapshot: &SceneSnapshot) -> Result<Vec<u8>, ExportError>;
}

/// Select the writer variant for a configuration.
///
/// `include_bones` maps to exactly one variant; the two are never mixed
/// within a single export.
pub fn writer_for(include_bones: bool) -> &'static dyn ModelWriter {
    if include_bones {
        &BonedWriter
    } else {
        &PlainWriter
    }
}

/// Writer for static models: geometry only.
///
/// Skeletons and vertex weights present in the snapshot are excluded
/// from the output entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainWriter;

impl ModelWriter for PlainWriter {
    fn variant(&self) -> ModelVariant {
        ModelVariant::Static
    }

    fn serialize(&self, snapshot: &SceneSnapshot) -> Result<Vec<u8>, ExportError> {
        let mut out = Vec::new();
        write_tag(&mut out, self.variant());
        out.write_u32::<LittleEndian>(snapshot.objects.len() as u32)?;
        for object in &snapshot.objects {
            write_object_header(&mut out, object)?;
            write_geometry(&mut out, object, false)?;
        }
        Ok(out)
    }
}

/// Writer for dynamic models: geometry, skinning, and bone hierarchy.
#[derive(Debug, Clone, Copy, Default)]
pub struct BonedWriter;

impl ModelWriter for BonedWriter {
    fn variant(&self) -> ModelVariant {
        ModelVariant::Dynamic
    }

    fn serialize(&self, snapshot: &SceneSnapshot) -> Result<Vec<u8>, ExportError> {
        let mut out = Vec::new();
        write_tag(&mut out, self.variant());
        out.write_u32::<LittleEndian>(snapshot.objects.len() as u32)?;
        for object in &snapshot.objects {
            let skeleton = object.skeleton.as_ref().ok_or_else(|| {
                ExportError::MissingSkeletonData {
                    object: object.name.clone(),
                }
            })?;
            write_object_header(&mut out, object)?;
            write_geometry(&mut out, object, true)?;
            write_skeleton(&mut out, &object.name, skeleton)?;
        }
        Ok(out)
    }
}

fn write_tag(out: &mut Vec<u8>, variant: ModelVariant) {
    out.extend_from_slice(&MAGIC);
    out.push(FORMAT_VERSION);
    out.push(variant.tag_byte());
}

fn write_string(out: &mut Vec<u8>, s: &str) -> Result<(), ExportError> {
    out.write_u32::<LittleEndian>(s.len() as u32)?;
    out.extend_from_slice(s.as_bytes());
    Ok(())
}

fn write_object_header(out: &mut Vec<u8>, object: &ObjectRef) -> Result<(), ExportError> {
    write_string(out, &object.name)?;
    out.write_u32::<LittleEndian>(object.mesh.vertices.len() as u32)?;
    out.write_u32::<LittleEndian>(object.mesh.faces.len() as u32 * 3)?;
    out.write_u32::<LittleEndian>(object.mesh.ranges.len() as u32)?;
    Ok(())
}

fn write_geometry(out: &mut Vec<u8>, object: &ObjectRef, skinned: bool) -> Result<(), ExportError> {
    for vertex in &object.mesh.vertices {
        for c in vertex.position {
            out.write_f32::<LittleEndian>(c)?;
        }
        for c in vertex.normal {
            out.write_f32::<LittleEndian>(c)?;
        }
        for c in vertex.uv {
            out.write_f32::<LittleEndian>(c)?;
        }
        if skinned {
            let skin = vertex.weights.as_ref().ok_or_else(|| {
                ExportError::MissingSkeletonData {
                    object: object.name.clone(),
                }
            })?;
            out.extend_from_slice(&skin.bones);
            for w in skin.weights {
                out.write_f32::<LittleEndian>(w)?;
            }
        }
    }
    for face in &object.mesh.faces {
        for index in face {
            out.write_u16::<LittleEndian>(*index)?;
        }
    }
    for range in &object.mesh.ranges {
        out.write_u32::<LittleEndian>(range.offset)?;
        out.write_u32::<LittleEndian>(range.count)?;
        write_string(out, &range.texture)?;
    }
    Ok(())
}

fn write_skeleton(out: &mut Vec<u8>, object: &str, skeleton: &SkeletonData) -> Result<(), ExportError> {
    // The count byte and the per-vertex bone indices are both u8-wide.
    let count = u8::try_from(skeleton.bones.len()).map_err(|_| ExportError::OversizedSkeleton {
        object: object.to_string(),
        bones: skeleton.bones.len(),
    })?;
    out.write_u8(count)?;
    for bone in &skeleton.bones {
        write_string(out, &bone.name)?;
        let parent = bone.parent.map(|p| p as i16).unwrap_or(-1);
        out.write_i16::<LittleEndian>(parent)?;
        for c in bone.rest_transform {
            out.write_f32::<LittleEndian>(c)?;
        }
    }
    Ok(())
}
