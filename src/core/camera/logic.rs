use bevy::math::{Vec2, Vec3};

pub const MIN_DISTANCE: f32 = 4.0;
pub const MAX_DISTANCE: f32 = 15.0;
pub const START_DISTANCE: f32 = 8.0;

const ROTATE_SENSITIVITY: f32 = 0.005;
const ZOOM_STEP: f32 = 0.5;
const MAX_PITCH: f32 = 1.45;
const DAMPING: f32 = 6.0;

pub struct OrbitInput {
    pub dragging: bool,
    pub drag_delta: Vec2,
    pub wheel_delta: f32,
}

/// Current and target angles/distance of a camera orbiting the origin.
/// The current values chase the targets for smooth motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,
    pub target_distance: f32,
}

impl Default for OrbitState {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: START_DISTANCE,
            target_yaw: 0.0,
            target_pitch: 0.0,
            target_distance: START_DISTANCE,
        }
    }
}

/// Apply input to the targets, then move the current values toward them
pub fn calculate_orbit(state: OrbitState, input: &OrbitInput, delta_time: f32) -> OrbitState {
    let mut next = state;

    if input.dragging && input.drag_delta.length_squared() > 0.0 {
        // Rotate slower when close so the surface moves at a similar speed
        let sensitivity = ROTATE_SENSITIVITY * (state.distance / START_DISTANCE);
        next.target_yaw -= input.drag_delta.x * sensitivity;
        next.target_pitch =
            (next.target_pitch + input.drag_delta.y * sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
    }

    if input.wheel_delta.abs() > 0.0 {
        next.target_distance =
            (next.target_distance - input.wheel_delta * ZOOM_STEP).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    let t = 1.0 - (-DAMPING * delta_time).exp();
    next.yaw += (next.target_yaw - next.yaw) * t;
    next.pitch += (next.target_pitch - next.pitch) * t;
    next.distance += (next.target_distance - next.distance) * t;
    next
}

/// Camera position for an orbit state; yaw 0 and pitch 0 sit on +Z
pub fn orbit_translation(state: &OrbitState) -> Vec3 {
    let (sin_yaw, cos_yaw) = state.yaw.sin_cos();
    let (sin_pitch, cos_pitch) = state.pitch.sin_cos();
    Vec3::new(
        state.distance * cos_pitch * sin_yaw,
        state.distance * sin_pitch,
        state.distance * cos_pitch * cos_yaw,
    )
}
