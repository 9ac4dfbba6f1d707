use std::collections::HashMap;

use glam::{IVec3, Vec3};
use log::debug;

use crate::world::block::{Block, BlockKind};

/// Floor each axis to the integer cell a continuous position falls within.
pub fn quantize(position: Vec3) -> IVec3 {
    IVec3::new(
        position.x.floor() as i32,
        position.y.floor() as i32,
        position.z.floor() as i32,
    )
}

/// Sparse block store keyed by integer cell coordinates.
///
/// Every lookup by continuous coordinates quantizes per axis before the map
/// access, so a block answers for the whole cell it sits in.
#[derive(Debug, Default)]
pub struct VoxelWorld {
    blocks: HashMap<IVec3, Block>,
}

impl VoxelWorld {
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
        }
    }

    /// Insert a block, overwriting whatever occupied the cell. Last write
    /// wins; there is no failure mode.
    pub fn add_block(&mut self, kind: BlockKind, cell: IVec3) -> Block {
        let block = Block::new(kind, cell);
        self.blocks.insert(cell, block);
        block
    }

    /// Remove and return the block at `cell`, if any. Removing an empty
    /// cell is not an error.
    pub fn remove_block(&mut self, cell: IVec3) -> Option<Block> {
        let removed = self.blocks.remove(&cell);
        if let Some(block) = removed {
            debug!("removed {} block at {}", block.kind.name(), cell);
        }
        removed
    }

    /// Look up the block whose cell contains a continuous position.
    pub fn block_at(&self, position: Vec3) -> Option<&Block> {
        self.block_at_cell(quantize(position))
    }

    pub fn block_at_cell(&self, cell: IVec3) -> Option<&Block> {
        self.blocks.get(&cell)
    }

    pub fn has_block(&self, position: Vec3) -> bool {
        self.block_at(position).is_some()
    }

    pub fn has_block_at_cell(&self, cell: IVec3) -> bool {
        self.blocks.contains_key(&cell)
    }

    /// Enumerable view of every block, for renderer polling and targeting.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
