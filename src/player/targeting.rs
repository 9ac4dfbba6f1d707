use glam::{IVec3, Vec3};

use crate::physics::collision::{Aabb, Ray};
use crate::player::physics::PlayerBody;
use crate::world::block::{Block, BlockKind};
use crate::world::store::VoxelWorld;

const FACE_EPSILON: f32 = 1e-3;

/// Result of a targeting raycast: the struck cell, the face that was hit
/// and the distance along the ray.
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    pub position: IVec3,
    pub kind: BlockKind,
    /// Outward unit normal of the struck face; exactly one component is
    /// nonzero.
    pub normal: IVec3,
    pub distance: f32,
}

/// Find the nearest block the ray strikes.
///
/// The candidate scan is linear over every block in the world, with the
/// straight-line distance to the block centre as the only pruning. Fine at
/// sandbox scale; a DDA grid walk would replace the scan for larger worlds
/// without changing the nearest-hit/face-normal contract.
pub fn cast(
    world: &VoxelWorld,
    origin: Vec3,
    direction: Vec3,
    max_reach: f32,
) -> Option<RaycastHit> {
    let ray = Ray::new(origin, direction);
    let mut nearest: Option<RaycastHit> = None;

    for block in world.blocks() {
        if origin.distance(block.position.as_vec3()) > max_reach {
            continue;
        }

        let cube = Aabb::unit_cube(block.position);
        let Some(distance) = ray.intersect_aabb(&cube) else {
            continue;
        };
        if nearest.map_or(false, |hit| hit.distance <= distance) {
            continue;
        }

        nearest = Some(RaycastHit {
            position: block.position,
            kind: block.kind,
            normal: face_normal(ray.point_at(distance), &cube),
            distance,
        });
    }

    nearest
}

/// Pick the face containing `point` by boundary proximity, checked in a
/// fixed axis order. The top face is the fallback when rounding leaves no
/// boundary within epsilon.
fn face_normal(point: Vec3, cube: &Aabb) -> IVec3 {
    if (point.x - cube.min.x).abs() < FACE_EPSILON {
        IVec3::NEG_X
    } else if (point.x - cube.max.x).abs() < FACE_EPSILON {
        IVec3::X
    } else if (point.y - cube.min.y).abs() < FACE_EPSILON {
        IVec3::NEG_Y
    } else if (point.y - cube.max.y).abs() < FACE_EPSILON {
        IVec3::Y
    } else if (point.z - cube.min.z).abs() < FACE_EPSILON {
        IVec3::NEG_Z
    } else if (point.z - cube.max.z).abs() < FACE_EPSILON {
        IVec3::Z
    } else {
        IVec3::Y
    }
}

/// Place a block of `kind` against the face the player is aiming at.
/// Returns false without mutating when nothing is targeted or when the new
/// block would overlap the player's own box.
pub fn place_block(
    world: &mut VoxelWorld,
    player: &PlayerBody,
    kind: BlockKind,
    max_reach: f32,
) -> bool {
    let Some(hit) = cast(
        world,
        player.eye_position(),
        player.look_direction(),
        max_reach,
    ) else {
        return false;
    };

    let cell = hit.position + hit.normal;
    if Aabb::unit_cube(cell).intersects(&player.aabb()) {
        return false;
    }

    world.add_block(kind, cell);
    true
}

/// Break the block the player is aiming at, returning it so the caller can
/// raise the removal notification.
pub fn remove_block(
    world: &mut VoxelWorld,
    player: &PlayerBody,
    max_reach: f32,
) -> Option<Block> {
    let hit = cast(
        world,
        player.eye_position(),
        player.look_direction(),
        max_reach,
    )?;
    world.remove_block(hit.position)
}
