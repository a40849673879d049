//! Mesh import and the pending/ready/failed slot the scene keeps it in.

use crate::error::{Result, ViewerError};
use crate::geometry::Bounds;
use glam::Vec3;
use std::io::BufReader;

/// Load state of an asset that arrives asynchronously.
#[derive(Clone, Debug, Default)]
pub enum AssetStatus<T> {
    #[default]
    Pending,
    Ready(T),
    Failed(String),
}

/// Holds one asset plus a revision counter that changes on every resolve,
/// so renderers can tell when to (re)upload.
#[derive(Clone, Debug, Default)]
pub struct AssetSlot<T> {
    status: AssetStatus<T>,
    revision: u32,
}

impl<T> AssetSlot<T> {
    pub fn pending() -> Self {
        Self {
            status: AssetStatus::Pending,
            revision: 0,
        }
    }

    /// Record the outcome of a load. Failures are logged and otherwise
    /// leave the scene without the asset.
    pub fn resolve(&mut self, name: &str, outcome: Result<T>) {
        self.status = match outcome {
            Ok(value) => {
                log::info!("[asset] {} ready", name);
                AssetStatus::Ready(value)
            }
            Err(e) => {
                log::error!("[asset] {} failed: {}", name, e);
                AssetStatus::Failed(e.to_string())
            }
        };
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn status(&self) -> &AssetStatus<T> {
        &self.status
    }

    pub fn ready(&self) -> Option<&T> {
        match &self.status {
            AssetStatus::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, AssetStatus::Pending)
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }
}

/// Uniform scale then translation applied to imported vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshPlacement {
    pub scale: f32,
    pub translation: Vec3,
}

impl MeshPlacement {
    #[inline]
    pub fn apply(&self, p: Vec3) -> Vec3 {
        p * self.scale + self.translation
    }
}

/// Triangle mesh in world space, ready for upload.
#[derive(Clone, Debug)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub bounds: Bounds,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Parse Wavefront OBJ bytes into world-space geometry with smooth normals.
pub fn parse_obj(bytes: &[u8], placement: MeshPlacement) -> Result<MeshData> {
    let model: obj::Obj<obj::Position, u32> = obj::load_obj(BufReader::new(bytes))
        .map_err(|e| ViewerError::MeshParse(e.to_string()))?;

    let positions: Vec<[f32; 3]> = model
        .vertices
        .iter()
        .map(|v| placement.apply(Vec3::from(v.position)).to_array())
        .collect();
    let indices = model.indices;
    if indices.len() < 3 || positions.is_empty() {
        return Err(ViewerError::EmptyMesh);
    }
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
        return Err(ViewerError::MeshParse(format!(
            "index {} out of range ({} vertices)",
            bad,
            positions.len()
        )));
    }

    let normals = smooth_normals(&positions, &indices);
    let bounds = aabb_of(&positions);
    Ok(MeshData {
        positions,
        normals,
        indices,
        bounds,
    })
}

fn smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let pa = Vec3::from(positions[a]);
        let pb = Vec3::from(positions[b]);
        let pc = Vec3::from(positions[c]);
        // area-weighted face normal
        let n = (pb - pa).cross(pc - pa);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

fn aabb_of(positions: &[[f32; 3]]) -> Bounds {
    let (min, max) = positions.iter().fold(
        (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
        |(min, max), p| {
            let p = Vec3::from(*p);
            (min.min(p), max.max(p))
        },
    );
    Bounds::Aabb { min, max }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3\nf 1 3 4\n";

    #[test]
    fn quad_is_placed_in_world_space() {
        let placement = MeshPlacement {
            scale: 0.1,
            translation: Vec3::new(0.0, 0.13, 0.0),
        };
        let mesh = parse_obj(QUAD.as_bytes(), placement).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        match mesh.bounds {
            Bounds::Aabb { min, max } => {
                assert!(min.abs_diff_eq(Vec3::new(0.0, 0.13, 0.0), 1e-6));
                assert!(max.abs_diff_eq(Vec3::new(0.1, 0.23, 0.0), 1e-6));
            }
            other => panic!("unexpected bounds {:?}", other),
        }
        for n in &mesh.normals {
            assert!(Vec3::from(*n).abs_diff_eq(Vec3::Z, 1e-5));
        }
    }

    #[test]
    fn empty_input_is_an_error() {
        let placement = MeshPlacement {
            scale: 1.0,
            translation: Vec3::ZERO,
        };
        assert!(matches!(
            parse_obj(b"# nothing here\n", placement),
            Err(ViewerError::EmptyMesh)
        ));
    }

    #[test]
    fn slot_revision_advances_on_resolve() {
        let mut slot: AssetSlot<u8> = AssetSlot::pending();
        assert!(slot.is_pending());
        slot.resolve("test", Err(ViewerError::EmptyMesh));
        assert!(matches!(slot.status(), AssetStatus::Failed(_)));
        assert_eq!(slot.revision(), 1);
        slot.resolve("test", Ok(7));
        assert_eq!(slot.ready(), Some(&7));
        assert_eq!(slot.revision(), 2);
    }
}
