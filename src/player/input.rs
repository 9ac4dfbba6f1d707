/// Boolean movement intents for one tick, written by the external input
/// source and read-only to the simulation.
#[derive(Debug, Default, Clone, Copy)]
pub struct ControlState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub run: bool,
}

/// Per-frame yaw/pitch deltas, in radians, already scaled by the input
/// source's sensitivity.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LookDelta {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookDelta {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }
}

const LOOK_SMOOTHING_FACTOR: f32 = 0.2;

/// Low-pass filter for look input: raw deltas accumulate in a buffer and
/// drain through exponential smoothing once per frame. Purely cosmetic; a
/// caller that wants raw look can apply deltas directly.
#[derive(Debug, Default)]
pub struct LookFilter {
    buffer: LookDelta,
    smoothed: LookDelta,
}

impl LookFilter {
    pub fn push(&mut self, delta: LookDelta) {
        self.buffer.yaw += delta.yaw;
        self.buffer.pitch += delta.pitch;
    }

    /// Drain the buffer, returning the smoothed delta to apply this frame.
    pub fn drain(&mut self) -> LookDelta {
        self.smoothed.yaw = self.smoothed.yaw * (1.0 - LOOK_SMOOTHING_FACTOR)
            + self.buffer.yaw * LOOK_SMOOTHING_FACTOR;
        self.smoothed.pitch = self.smoothed.pitch * (1.0 - LOOK_SMOOTHING_FACTOR)
            + self.buffer.pitch * LOOK_SMOOTHING_FACTOR;
        self.buffer = LookDelta::default();
        self.smoothed
    }
}
