use serde::{Deserialize, Serialize};

/// Immutable description of the objects to export.
///
/// A snapshot is collected by the host integration layer (for example a
/// Blender export operator) before the exporter is invoked. The exporter
/// only ever borrows it read-only for the duration of one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Objects in export order.
    pub objects: Vec<ObjectRef>,
    /// Whether the snapshot was collected from the host's selection only.
    pub selected_only: bool,
}

impl SceneSnapshot {
    /// Snapshot over all exportable objects of a scene.
    pub fn new(objects: Vec<ObjectRef>) -> Self {
        Self {
            objects,
            selected_only: false,
        }
    }

    /// Snapshot collected from the host's current selection.
    pub fn from_selection(objects: Vec<ObjectRef>) -> Self {
        Self {
            objects,
            selected_only: true,
        }
    }
}

/// One exportable object: a name, its mesh, and an optional skeleton.
///
/// The skeleton is only present when the host collected bone data; it is
/// ignored entirely by the static writer variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub name: String,
    pub mesh: MeshData,
    pub skeleton: Option<SkeletonData>,
}

/// Triangulated mesh geometry for a single object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    /// Triangle indices into `vertices`.
    pub faces: Vec<[u16; 3]>,
    /// Contiguous index ranges sharing one texture.
    pub ranges: Vec<MeshRange>,
}

/// Vertex data for mesh geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    /// Skinning data, required only for dynamic (boned) export.
    pub weights: Option<VertexWeights>,
}

/// Per-vertex skinning: up to four bone influences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexWeights {
    /// Indices into the owning object's bone list.
    pub bones: [u8; 4],
    pub weights: [f32; 4],
}

/// A run of triangle indices rendered with one texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshRange {
    /// First index of the range.
    pub offset: u32,
    /// Number of indices in the range.
    pub count: u32,
    /// Texture name resolved by the engine at load time.
    pub texture: String,
}

/// Bone hierarchy for a skinned object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonData {
    pub bones: Vec<Bone>,
}

/// A single bone in rest pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,
    /// Index of the parent bone, `None` for the root.
    pub parent: Option<u8>,
    /// Column-major 4x4 rest-pose transform.
    pub rest_transform: [f32; 16],
}
