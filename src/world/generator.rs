use std::ops::Range;

use glam::IVec3;
use log::info;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

use crate::config::WorldGenConfig;
use crate::world::block::BlockKind;
use crate::world::store::VoxelWorld;

// Feature tuning. Probabilities are per column or per block as noted.
const DIRT_LAYERS: i32 = 3;
const SAND_PATCH_CHANCE: f64 = 0.05;
const SAND_SPREAD_CHANCE: f64 = 0.5;
const LEAF_CHANCE_CENTER: f64 = 0.9;
const LEAF_CHANCE_EDGE: f64 = 0.7;
const LEAF_CHANCE_CORNER: f64 = 0.3;
const LEAF_TOP_LAYER_FACTOR: f64 = 0.5;
const TREE_EDGE_MARGIN: i32 = 2;
const CANOPY_RADIUS: i32 = 2;

/// Flat-terrain builder: layered ground with sand patches, then trees and
/// glass structures. The shape is deterministic for a given config; the
/// content follows the seeded RNG, so one seed reproduces one world.
pub struct TerrainGenerator {
    config: WorldGenConfig,
    rng: ChaCha12Rng,
}

impl TerrainGenerator {
    pub fn new(config: WorldGenConfig) -> Self {
        let config = config.clamped();
        let rng = ChaCha12Rng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    pub fn generate(&mut self, world: &mut VoxelWorld) {
        self.generate_ground(world);
        self.generate_trees(world);
        self.generate_glass(world);
        info!(
            "generated {}x{}x{} world, {} blocks (seed {})",
            self.config.width,
            self.config.depth,
            self.config.height,
            world.len(),
            self.config.seed,
        );
    }

    fn x_range(&self) -> Range<i32> {
        let width = self.config.width as i32;
        -width / 2..width - width / 2
    }

    fn z_range(&self) -> Range<i32> {
        let depth = self.config.depth as i32;
        -depth / 2..depth - depth / 2
    }

    fn in_bounds(&self, x: i32, z: i32) -> bool {
        self.x_range().contains(&x) && self.z_range().contains(&z)
    }

    /// Grass at y = 0, three dirt layers below, stone down to the floor of
    /// the box; a few columns get a sand patch instead of grass.
    fn generate_ground(&mut self, world: &mut VoxelWorld) {
        let height = self.config.height as i32;

        for x in self.x_range() {
            for z in self.z_range() {
                world.add_block(BlockKind::Grass, IVec3::new(x, 0, z));
                for y in -DIRT_LAYERS..0 {
                    world.add_block(BlockKind::Dirt, IVec3::new(x, y, z));
                }
                for y in -(height - 1)..-DIRT_LAYERS {
                    world.add_block(BlockKind::Stone, IVec3::new(x, y, z));
                }

                if self.rng.gen_bool(SAND_PATCH_CHANCE) {
                    self.place_sand_patch(world, x, z);
                }
            }
        }
    }

    fn place_sand_patch(&mut self, world: &mut VoxelWorld, x: i32, z: i32) {
        world.add_block(BlockKind::Sand, IVec3::new(x, 0, z));

        if !self.rng.gen_bool(SAND_SPREAD_CHANCE) {
            return;
        }

        let mut directions = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        directions.shuffle(&mut self.rng);
        let spread = self.rng.gen_range(1..=3);

        for (dx, dz) in directions.into_iter().take(spread) {
            let (nx, nz) = (x + dx, z + dz);
            if self.in_bounds(nx, nz) {
                world.add_block(BlockKind::Sand, IVec3::new(nx, 0, nz));
            }
        }
    }

    /// 3-5 trees: a wood trunk 3-5 tall from y = 1, a probabilistic leaf
    /// canopy over the top three trunk layers. Trunk cells keep their wood.
    fn generate_trees(&mut self, world: &mut VoxelWorld) {
        let x_range = shrink(self.x_range(), TREE_EDGE_MARGIN);
        let z_range = shrink(self.z_range(), TREE_EDGE_MARGIN);
        if x_range.is_empty() || z_range.is_empty() {
            return;
        }

        let count = self.rng.gen_range(3..=5);
        for _ in 0..count {
            let x = self.rng.gen_range(x_range.clone());
            let z = self.rng.gen_range(z_range.clone());
            let trunk_height = self.rng.gen_range(3..=5);

            for y in 1..=trunk_height {
                world.add_block(BlockKind::Wood, IVec3::new(x, y, z));
            }

            for y in trunk_height - 1..=trunk_height + 1 {
                for lx in x - CANOPY_RADIUS..=x + CANOPY_RADIUS {
                    for lz in z - CANOPY_RADIUS..=z + CANOPY_RADIUS {
                        if y <= trunk_height && lx == x && lz == z {
                            continue;
                        }

                        let corner =
                            (lx - x).abs() == CANOPY_RADIUS && (lz - z).abs() == CANOPY_RADIUS;
                        let edge =
                            (lx - x).abs() == CANOPY_RADIUS || (lz - z).abs() == CANOPY_RADIUS;
                        let mut chance = if corner {
                            LEAF_CHANCE_CORNER
                        } else if edge {
                            LEAF_CHANCE_EDGE
                        } else {
                            LEAF_CHANCE_CENTER
                        };
                        if y == trunk_height + 1 {
                            chance *= LEAF_TOP_LAYER_FACTOR;
                        }

                        if self.rng.gen_bool(chance) {
                            world.add_block(BlockKind::Leaves, IVec3::new(lx, y, lz));
                        }
                    }
                }
            }
        }
    }

    /// 2-4 decorative glass structures with a 2x2 footprint at y = 1 and 2,
    /// clipped to the world bounds.
    fn generate_glass(&mut self, world: &mut VoxelWorld) {
        let count = self.rng.gen_range(2..=4);
        for _ in 0..count {
            let x = self.rng.gen_range(self.x_range());
            let z = self.rng.gen_range(self.z_range());

            for gx in x..x + 2 {
                for gz in z..z + 2 {
                    if self.in_bounds(gx, gz) {
                        world.add_block(BlockKind::Glass, IVec3::new(gx, 1, gz));
                        world.add_block(BlockKind::Glass, IVec3::new(gx, 2, gz));
                    }
                }
            }
        }
    }
}

fn shrink(range: Range<i32>, margin: i32) -> Range<i32> {
    range.start + margin..range.end - margin
}
