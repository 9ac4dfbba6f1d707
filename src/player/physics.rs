use glam::{IVec3, Vec3};

use crate::config::GameplayConfig;
use crate::events::GameEvent;
use crate::physics::collision::Aabb;
use crate::player::input::{ControlState, LookDelta};
use crate::world::block::BlockKind;
use crate::world::store::{quantize, VoxelWorld};

pub const PLAYER_HEIGHT: f32 = 1.8;
pub const PLAYER_WIDTH: f32 = 0.6;
pub const EYE_LEVEL: f32 = 1.6;

const STOP_THRESHOLD: f32 = 0.001;
const BLEND_FACTOR: f32 = 0.2;
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.1;
const GROUND_PROBE_OFFSET: f32 = 0.3;
const GROUND_PROBE_DEPTH: f32 = 0.01;
const WATER_LEVEL: f32 = -0.5;
const FOOTSTEP_INTERVAL: u32 = 20;
const FOOTSTEP_RUN_FACTOR: f32 = 0.7;
const BOBBING_AMOUNT: f32 = 0.05;
const BOBBING_SPEED: f32 = 0.014;

/// The player's collision body: continuous position and velocity integrated
/// against the voxel grid once per frame. Two contact modes, grounded and
/// airborne, tracked by `on_ground`.
#[derive(Debug)]
pub struct PlayerBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
    pub is_moving: bool,
    pub is_running: bool,

    // Movement parameters, fixed at construction
    walk_speed: f32,
    run_speed: f32,
    jump_force: f32,
    gravity: f32,
    friction: f32,

    // Body dimensions
    height: f32,
    width: f32,
    eye_level: f32,

    // Presentation-only state
    bob_cycle: f32,
    footstep_timer: u32,
}

impl PlayerBody {
    pub fn new(position: Vec3, config: &GameplayConfig) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            on_ground: false,
            is_moving: false,
            is_running: false,
            walk_speed: config.walk_speed,
            run_speed: config.run_speed,
            jump_force: config.jump_force,
            gravity: config.gravity,
            friction: config.friction,
            height: PLAYER_HEIGHT,
            width: PLAYER_WIDTH,
            eye_level: EYE_LEVEL,
            bob_cycle: 0.0,
            footstep_timer: 0,
        }
    }

    /// Integrate look deltas; pitch is clamped so the view never flips.
    pub fn apply_look(&mut self, delta: LookDelta) {
        self.yaw -= delta.yaw;
        self.pitch = (self.pitch - delta.pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Advance one simulation tick. X/Z are integrated and resolved before
    /// Y, so a diagonal step onto a ledge cannot tunnel through the ground.
    /// Fire-and-forget notifications for the effects boundary are appended
    /// to `events`.
    pub fn step(
        &mut self,
        controls: &ControlState,
        world: &VoxelWorld,
        events: &mut Vec<GameEvent>,
    ) {
        let prev = self.position;

        if !self.on_ground {
            self.velocity.y -= self.gravity;
        } else if self.velocity.y < 0.0 {
            self.velocity.y = 0.0;
        }

        if controls.jump && self.on_ground {
            self.velocity.y = self.jump_force;
            self.on_ground = false;
        }

        self.is_running = controls.run;
        self.apply_horizontal_intent(controls);
        self.is_moving =
            self.velocity.x.abs() > STOP_THRESHOLD || self.velocity.z.abs() > STOP_THRESHOLD;

        self.position.x += self.velocity.x;
        self.position.z += self.velocity.z;
        self.resolve_horizontal(prev, world);

        self.position.y += self.velocity.y;
        self.resolve_ground_and_vertical(prev, world);

        self.advance_bobbing();

        if prev.y > WATER_LEVEL && self.position.y <= WATER_LEVEL {
            events.push(GameEvent::EnteredWater {
                position: Vec3::new(self.position.x, WATER_LEVEL, self.position.z),
            });
        }

        self.emit_footsteps(world, events);
    }

    /// Blend velocity toward the yaw-rotated intent, or decay it with
    /// friction when there is none.
    fn apply_horizontal_intent(&mut self, controls: &ControlState) {
        let move_x = controls.right as i32 - controls.left as i32;
        let move_z = controls.backward as i32 - controls.forward as i32;

        if move_x == 0 && move_z == 0 {
            self.velocity.x *= self.friction;
            self.velocity.z *= self.friction;
            if self.velocity.x.abs() < STOP_THRESHOLD {
                self.velocity.x = 0.0;
            }
            if self.velocity.z.abs() < STOP_THRESHOLD {
                self.velocity.z = 0.0;
            }
            return;
        }

        let speed = if self.is_running {
            self.run_speed
        } else {
            self.walk_speed
        };
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let mut target_x = 0.0;
        let mut target_z = 0.0;

        if move_z != 0 {
            target_x += -sin_yaw * move_z as f32 * speed;
            target_z += -cos_yaw * move_z as f32 * speed;
        }
        if move_x != 0 {
            target_x += cos_yaw * move_x as f32 * speed;
            target_z += -sin_yaw * move_x as f32 * speed;
        }

        self.velocity.x = self.velocity.x * (1.0 - BLEND_FACTOR) + target_x * BLEND_FACTOR;
        self.velocity.z = self.velocity.z * (1.0 - BLEND_FACTOR) + target_z * BLEND_FACTOR;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(
            self.position,
            Vec3::new(self.width / 2.0, self.height / 2.0, self.width / 2.0),
        )
    }

    fn scan_radius(&self) -> i32 {
        (self.width + 1.0).ceil() as i32
    }

    /// Push the body out of any overlapping cell on X, then Z, using the
    /// previous position to pick the side to resolve toward.
    fn resolve_horizontal(&mut self, prev: Vec3, world: &VoxelWorld) {
        let mut player_box = self.aabb();
        let radius = self.scan_radius();
        let center = quantize(self.position);

        for x in center.x - radius..=center.x + radius {
            for y in center.y - radius..=center.y + radius {
                for z in center.z - radius..=center.z + radius {
                    let cell = IVec3::new(x, y, z);
                    if !world.has_block_at_cell(cell) {
                        continue;
                    }
                    let block_box = Aabb::unit_cube(cell);
                    if !player_box.intersects(&block_box) {
                        continue;
                    }

                    if prev.x < block_box.min.x {
                        self.position.x = block_box.min.x - self.width / 2.0;
                        self.velocity.x = 0.0;
                    } else if prev.x > block_box.max.x {
                        self.position.x = block_box.max.x + self.width / 2.0;
                        self.velocity.x = 0.0;
                    }
                    player_box = self.aabb();

                    if player_box.intersects(&block_box) {
                        if prev.z < block_box.min.z {
                            self.position.z = block_box.min.z - self.width / 2.0;
                            self.velocity.z = 0.0;
                        } else if prev.z > block_box.max.z {
                            self.position.z = block_box.max.z + self.width / 2.0;
                            self.velocity.z = 0.0;
                        }
                        player_box = self.aabb();
                    }
                }
            }
        }
    }

    /// Ground detection and vertical resolution: a cheap four-point probe
    /// beneath the feet first, then the full neighbourhood sweep, then the
    /// hard floor so nothing falls out of the world.
    fn resolve_ground_and_vertical(&mut self, prev: Vec3, world: &VoxelWorld) {
        self.on_ground = false;

        let probe_y = self.position.y - self.height / 2.0 - GROUND_PROBE_DEPTH;
        for offset_x in [-GROUND_PROBE_OFFSET, GROUND_PROBE_OFFSET] {
            for offset_z in [-GROUND_PROBE_OFFSET, GROUND_PROBE_OFFSET] {
                let probe = Vec3::new(
                    self.position.x + offset_x,
                    probe_y,
                    self.position.z + offset_z,
                );
                if world.has_block(probe) {
                    // Snap onto the top of the probed cell
                    self.position.y = probe.y.floor() + 0.5 + self.height / 2.0;
                    self.velocity.y = 0.0;
                    self.on_ground = true;
                    return;
                }
            }
        }

        self.resolve_vertical_sweep(prev, world);

        if self.position.y < self.height / 2.0 {
            self.position.y = self.height / 2.0;
            self.velocity.y = 0.0;
            self.on_ground = true;
        }
    }

    /// Full neighbourhood sweep: resolve Y first (landing grounds the body,
    /// a ceiling hit only kills the vertical velocity), then re-resolve X
    /// and Z against the updated box.
    fn resolve_vertical_sweep(&mut self, prev: Vec3, world: &VoxelWorld) {
        let mut player_box = self.aabb();
        let radius = self.scan_radius();
        let center = quantize(self.position);

        for x in center.x - radius..=center.x + radius {
            for y in center.y - radius..=center.y + radius {
                for z in center.z - radius..=center.z + radius {
                    let cell = IVec3::new(x, y, z);
                    if !world.has_block_at_cell(cell) {
                        continue;
                    }
                    let block_box = Aabb::unit_cube(cell);
                    if !player_box.intersects(&block_box) {
                        continue;
                    }

                    if prev.y >= block_box.max.y && self.velocity.y < 0.0 {
                        // Landing
                        self.position.y = block_box.max.y + self.height / 2.0;
                        self.velocity.y = 0.0;
                        self.on_ground = true;
                    } else if prev.y <= block_box.min.y && self.velocity.y > 0.0 {
                        // Ceiling
                        self.position.y = block_box.min.y - self.height / 2.0;
                        self.velocity.y = 0.0;
                    }
                    player_box = self.aabb();

                    if player_box.intersects(&block_box) {
                        if prev.x < block_box.min.x {
                            self.position.x = block_box.min.x - self.width / 2.0;
                        } else if prev.x > block_box.max.x {
                            self.position.x = block_box.max.x + self.width / 2.0;
                        }
                        self.velocity.x = 0.0;
                        player_box = self.aabb();
                    }

                    if player_box.intersects(&block_box) {
                        if prev.z < block_box.min.z {
                            self.position.z = block_box.min.z - self.width / 2.0;
                        } else if prev.z > block_box.max.z {
                            self.position.z = block_box.max.z + self.width / 2.0;
                        }
                        self.velocity.z = 0.0;
                        player_box = self.aabb();
                    }
                }
            }
        }
    }

    fn advance_bobbing(&mut self) {
        if !self.is_moving || !self.on_ground {
            self.bob_cycle = 0.0;
            return;
        }
        let speed = if self.is_running {
            BOBBING_SPEED * 1.5
        } else {
            BOBBING_SPEED
        };
        self.bob_cycle += speed;
    }

    fn emit_footsteps(&mut self, world: &VoxelWorld, events: &mut Vec<GameEvent>) {
        if !self.is_moving || !self.on_ground {
            return;
        }

        self.footstep_timer += 1;
        let interval = if self.is_running {
            (FOOTSTEP_INTERVAL as f32 * FOOTSTEP_RUN_FACTOR) as u32
        } else {
            FOOTSTEP_INTERVAL
        };
        if self.footstep_timer < interval {
            return;
        }
        self.footstep_timer = 0;

        let under_feet = Vec3::new(
            self.position.x,
            self.position.y - self.height / 2.0 - 0.1,
            self.position.z,
        );
        let ground = world
            .block_at(under_feet)
            .map(|b| b.kind)
            .unwrap_or(BlockKind::Dirt);
        events.push(GameEvent::Footstep {
            position: Vec3::new(
                self.position.x,
                self.position.y - self.height / 2.0 + 0.1,
                self.position.z,
            ),
            ground,
        });
    }

    /// Camera anchor for the renderer: eye level plus the head-bob offsets.
    /// Derived output only; nothing here feeds back into the physics.
    pub fn eye_position(&self) -> Vec3 {
        let (bob_x, bob_y) = if self.is_moving && self.on_ground {
            (
                self.bob_cycle.sin() * BOBBING_AMOUNT * 0.3,
                (self.bob_cycle * 2.0).sin() * BOBBING_AMOUNT,
            )
        } else {
            (0.0, 0.0)
        };
        Vec3::new(
            self.position.x + bob_x,
            self.position.y + (self.eye_level - self.height / 2.0) + bob_y,
            self.position.z,
        )
    }

    /// Unit view vector derived from yaw and pitch.
    pub fn look_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_body() -> PlayerBody {
        PlayerBody::new(Vec3::new(0.0, 3.0, 0.0), &GameplayConfig::default())
    }

    fn step_idle(body: &mut PlayerBody, world: &VoxelWorld, ticks: usize) {
        let controls = ControlState::default();
        let mut events = Vec::new();
        for _ in 0..ticks {
            body.step(&controls, world, &mut events);
        }
    }

    /// Run idle ticks until the body reports ground contact.
    fn settle(body: &mut PlayerBody, world: &VoxelWorld) {
        let controls = ControlState::default();
        let mut events = Vec::new();
        for _ in 0..500 {
            body.step(&controls, world, &mut events);
            if body.on_ground {
                return;
            }
        }
        panic!("body never grounded");
    }

    #[test]
    fn test_body_settles_on_single_block() {
        let mut world = VoxelWorld::new();
        world.add_block(BlockKind::Stone, IVec3::ZERO);
        let mut body = test_body();

        settle(&mut body, &world);
        // Standing on a block is stable tick over tick.
        step_idle(&mut body, &world, 10);

        assert!(body.on_ground);
        assert_eq!(body.velocity.y, 0.0);
        assert_relative_eq!(body.position.y, 0.5 + PLAYER_HEIGHT / 2.0);
    }

    #[test]
    fn test_body_settles_on_hard_floor_without_blocks() {
        let world = VoxelWorld::new();
        let mut body = test_body();

        settle(&mut body, &world);

        assert!(body.on_ground);
        assert_relative_eq!(body.position.y, PLAYER_HEIGHT / 2.0);
    }

    #[test]
    fn test_jump_goes_airborne_from_hard_floor() {
        let world = VoxelWorld::new();
        let mut body = test_body();
        settle(&mut body, &world);

        let controls = ControlState {
            jump: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        body.step(&controls, &world, &mut events);

        assert!(!body.on_ground);
        assert!(body.velocity.y > 0.0);
        assert!(body.position.y > PLAYER_HEIGHT / 2.0);
    }

    #[test]
    fn test_walking_blends_velocity_toward_target() {
        let world = VoxelWorld::new();
        let mut body = test_body();
        settle(&mut body, &world);

        let controls = ControlState {
            forward: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        body.step(&controls, &world, &mut events);

        assert!(body.is_moving);
        // First blended step covers a fifth of the walk speed.
        assert_relative_eq!(body.velocity.z, 0.1 * 0.2, epsilon = 1e-6);
        assert_relative_eq!(body.velocity.x, 0.0);
    }

    #[test]
    fn test_friction_decays_velocity_to_exact_zero() {
        let world = VoxelWorld::new();
        let mut body = test_body();
        settle(&mut body, &world);

        body.velocity.x = 0.1;
        body.velocity.z = -0.05;
        step_idle(&mut body, &world, 100);

        assert_eq!(body.velocity.x, 0.0);
        assert_eq!(body.velocity.z, 0.0);
        assert!(!body.is_moving);
    }

    #[test]
    fn test_wall_stops_horizontal_motion_flush() {
        // Wall column beside the hard floor, no block floor underneath so
        // the approach itself is unobstructed.
        let mut world = VoxelWorld::new();
        world.add_block(BlockKind::Stone, IVec3::new(2, 0, 0));
        world.add_block(BlockKind::Stone, IVec3::new(2, 1, 0));
        world.add_block(BlockKind::Stone, IVec3::new(2, 2, 0));

        let mut body = test_body();
        settle(&mut body, &world);

        // Yaw 0 with a `right` intent pushes along +X into the wall.
        let controls = ControlState {
            right: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        for _ in 0..100 {
            body.step(&controls, &world, &mut events);
        }

        assert_relative_eq!(body.position.x, 1.5 - PLAYER_WIDTH / 2.0);
        assert_eq!(body.velocity.x, 0.0);
        assert_relative_eq!(body.position.z, 0.0);
    }

    #[test]
    fn test_ceiling_hit_zeroes_vertical_velocity_without_grounding() {
        let mut world = VoxelWorld::new();
        world.add_block(BlockKind::Stone, IVec3::new(0, 3, 0));

        let mut body = test_body();
        body.position.y = PLAYER_HEIGHT / 2.0;
        body.on_ground = true;

        let jump = ControlState {
            jump: true,
            ..Default::default()
        };
        let idle = ControlState::default();
        let mut events = Vec::new();
        body.step(&jump, &world, &mut events);

        let mut max_y = body.position.y;
        let mut bumped = false;
        for _ in 0..200 {
            body.step(&idle, &world, &mut events);
            max_y = max_y.max(body.position.y);
            if body.position.y == 2.5 - PLAYER_HEIGHT / 2.0 && body.velocity.y == 0.0 {
                bumped = !body.on_ground;
            }
        }

        assert!(bumped, "body never clamped against the ceiling");
        assert!(max_y <= 2.5 - PLAYER_HEIGHT / 2.0 + 1e-4, "max_y was {max_y}");
        // Falls back to the floor afterwards.
        assert_relative_eq!(body.position.y, PLAYER_HEIGHT / 2.0);
    }

    #[test]
    fn test_walking_emits_footsteps_with_ground_kind() {
        let mut world = VoxelWorld::new();
        for z in -1..=12 {
            world.add_block(BlockKind::Grass, IVec3::new(0, 0, z));
        }
        let mut body = test_body();
        settle(&mut body, &world);

        // Yaw 0 with a `forward` intent drifts along +Z, staying on the strip.
        let controls = ControlState {
            forward: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        for _ in 0..(FOOTSTEP_INTERVAL as usize + 10) {
            body.step(&controls, &world, &mut events);
        }

        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::Footstep { ground, .. } if *ground == BlockKind::Grass)));
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut body = test_body();
        body.apply_look(LookDelta::new(0.0, 10.0));
        assert_relative_eq!(body.pitch, -PITCH_LIMIT);
        body.apply_look(LookDelta::new(0.0, -20.0));
        assert_relative_eq!(body.pitch, PITCH_LIMIT);
    }

    #[test]
    fn test_look_direction_matches_yaw_pitch() {
        let mut body = test_body();
        let forward = body.look_direction();
        assert_relative_eq!(forward.x, 0.0);
        assert_relative_eq!(forward.y, 0.0);
        assert_relative_eq!(forward.z, -1.0);

        body.pitch = -PITCH_LIMIT;
        assert!(body.look_direction().y < -0.9);
    }
}
