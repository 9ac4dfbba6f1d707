use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Closed set of block kinds. Collision treats every block the same; the
/// kind only matters to generation rules and to the renderer/effects side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockKind {
    Grass,
    Dirt,
    Stone,
    Wood,
    Leaves,
    Sand,
    Glass,
    /// Fallback kind for blocks without a dedicated material.
    #[default]
    Default,
}

impl BlockKind {
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Grass => "grass",
            BlockKind::Dirt => "dirt",
            BlockKind::Stone => "stone",
            BlockKind::Wood => "wood",
            BlockKind::Leaves => "leaves",
            BlockKind::Sand => "sand",
            BlockKind::Glass => "glass",
            BlockKind::Default => "default",
        }
    }

    /// Renderer hint: kinds drawn with partial opacity.
    pub fn is_transparent(self) -> bool {
        matches!(self, BlockKind::Leaves | BlockKind::Glass)
    }
}

/// A single voxel. At most one block exists per cell; it has no identity
/// beyond its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub position: IVec3,
}

impl Block {
    pub fn new(kind: BlockKind, position: IVec3) -> Self {
        Self { kind, position }
    }
}
