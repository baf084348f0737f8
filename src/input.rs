pub use crate::camera::Movement;

/// Edge detector for keys that should act once per press, not once per frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyLatch {
    held: bool,
}

impl KeyLatch {
    pub fn fire(&mut self, down: bool) -> bool {
        let fired = down && !self.held;
        self.held = down;
        fired
    }
}

/// Everything the frame step needs from the window, sampled once.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameInput {
    /// WASD, drives the player token.
    pub wasd: Movement,
    /// Arrow keys, drive the free camera.
    pub arrows: Movement,
    pub cursor: Option<(f32, f32)>,
    pub scroll_y: f32,
    pub toggle_camera: bool,
    pub screenshot: bool,
    pub quit: bool,
}
