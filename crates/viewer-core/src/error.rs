use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to read asset {path}: {reason}")]
    AssetIo { path: String, reason: String },

    #[error("failed to parse mesh: {0}")]
    MeshParse(String),

    #[error("mesh has no triangles")]
    EmptyMesh,

    #[error("duplicate hotspot name: {0}")]
    DuplicateHotspot(String),

    #[error("hotspot name is reserved for scene geometry: {0}")]
    ReservedHotspotName(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
