use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Per-frame motion constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationParams {
    /// Texture offset units per second
    pub scroll_speed: f32,
    /// Easing factor toward the pointer's x, applied to the yaw
    pub yaw_ease: f32,
    /// Easing factor toward the pointer's y, applied to the pitch
    pub pitch_ease: f32,
    /// Pitch target = -pointer.y * pitch_scale
    pub pitch_scale: f32,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            scroll_speed: 0.1,
            yaw_ease: 0.1,
            pitch_ease: 0.05,
            pitch_scale: 0.5,
        }
    }
}

/// Result of one animation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdate {
    /// Euler angles in radians: `x` = pitch, `y` = yaw
    pub rotation: Vec2,
    pub front_offset: f32,
    pub back_offset: f32,
}

pub fn lerp(start: f32, end: f32, amount: f32) -> f32 {
    (1.0 - amount) * start + amount * end
}

/// One frame of motion.
///
/// `pointer` is in normalized device coordinates (`[-1, 1]`, +y up). The
/// rotation eases exponentially toward the pointer target and the two
/// textures scroll in opposite directions at a constant rate.
pub fn step(elapsed: f32, pointer: Vec2, previous: Vec2, params: &AnimationParams) -> FrameUpdate {
    let offset = elapsed * params.scroll_speed;
    let rotation = Vec2::new(
        lerp(previous.x, -pointer.y * params.pitch_scale, params.pitch_ease),
        lerp(previous.y, pointer.x, params.yaw_ease),
    );

    FrameUpdate {
        rotation,
        front_offset: offset,
        back_offset: -offset,
    }
}

/// Animation state carried between frames
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationState {
    pub elapsed: f32,
    pub rotation: Vec2,
}

impl AnimationState {
    pub fn advance(
        &mut self,
        elapsed: f32,
        pointer: Vec2,
        params: &AnimationParams,
    ) -> FrameUpdate {
        let update = step(elapsed, pointer, self.rotation, params);
        self.elapsed = elapsed;
        self.rotation = update.rotation;
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert!((lerp(2.0, 4.0, 0.25) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_state_tracks_rotation() {
        let mut state = AnimationState::default();
        let params = AnimationParams::default();
        let first = state.advance(0.5, Vec2::new(1.0, 0.0), &params);
        assert_eq!(state.rotation, first.rotation);
        assert_eq!(state.elapsed, 0.5);

        let second = state.advance(0.6, Vec2::new(1.0, 0.0), &params);
        assert!(second.rotation.y > first.rotation.y);
    }
}
