use minifb::{Key, MouseMode, Window, WindowOptions};
use std::path::PathBuf;
use std::time::Instant;

use crate::camera::{Camera, CameraMode};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::input::{FrameInput, KeyLatch, Movement};
use crate::renderer::Renderer;
use crate::scene::{Player, Scene};
use crate::texture::Texture;

/// Longest step a single frame may integrate, in seconds.
const MAX_FRAME_TIME: f32 = 0.1;

/// Routes one frame of input to the camera and the player token.
pub fn apply_input(camera: &mut Camera, player: &mut Player, input: &FrameInput, delta_time: f32) {
    if input.toggle_camera {
        camera.toggle_mode();
        log::info!("camera switched to {} mode", camera.mode().name());
    }

    match camera.mode() {
        CameraMode::Isometric => player.update(delta_time, input.wasd),
        CameraMode::Free => camera.update_free(delta_time, input.arrows),
    }

    if let Some((x, y)) = input.cursor {
        camera.handle_mouse_move(x, y);
    }
    if input.scroll_y != 0.0 {
        camera.handle_zoom(input.scroll_y);
    }
}

pub struct App {
    config: AppConfig,
    window: Window,
    camera: Camera,
    scene: Scene,
    renderer: Renderer,
    display: Vec<u32>,
    toggle_latch: KeyLatch,
    screenshot_latch: KeyLatch,
    screenshots: usize,
    status: String,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let (width, height) = (config.window.width, config.window.height);
        let mut window = Window::new(&config.window.title, width, height, WindowOptions::default())?;
        window.set_target_fps(config.window.target_fps);
        window.set_cursor_visibility(false);

        let camera = Camera::new(config.camera.speed, config.camera.sensitivity)
            .with_zoom(config.camera.zoom);
        let texture = Texture::load_or_checkerboard(&config.scene.texture);
        let scene = Scene::new(&config.scene, texture);

        let ssaa = config.render.ssaa;
        let renderer = Renderer::new(
            width * ssaa,
            height * ssaa,
            Default::default(),
            config.render.shader,
        )
        .with_clear_color(config.clear_color());

        log::info!(
            "window {}x{} (ssaa x{}), shader {:?}",
            width,
            height,
            ssaa,
            config.render.shader
        );

        Ok(Self {
            display: vec![0; width * height],
            config,
            window,
            camera,
            scene,
            renderer,
            toggle_latch: KeyLatch::default(),
            screenshot_latch: KeyLatch::default(),
            screenshots: 0,
            status: String::new(),
        })
    }

    fn poll_input(&mut self) -> FrameInput {
        let window = &self.window;
        let movement = |forward, backward, left, right| Movement {
            forward: window.is_key_down(forward),
            backward: window.is_key_down(backward),
            left: window.is_key_down(left),
            right: window.is_key_down(right),
        };

        FrameInput {
            wasd: movement(Key::W, Key::S, Key::A, Key::D),
            arrows: movement(Key::Up, Key::Down, Key::Left, Key::Right),
            cursor: window.get_mouse_pos(MouseMode::Pass),
            scroll_y: window.get_scroll_wheel().map_or(0.0, |(_, y)| y),
            toggle_camera: self.toggle_latch.fire(window.is_key_down(Key::C)),
            screenshot: self.screenshot_latch.fire(window.is_key_down(Key::F12)),
            quit: window.is_key_down(Key::Escape),
        }
    }

    /// Window title carrying the camera mode and its main parameter.
    fn status_line(&self) -> String {
        let title = &self.config.window.title;
        match self.camera.mode() {
            CameraMode::Isometric => format!("{title} [isometric, zoom {:.1}]", self.camera.zoom()),
            CameraMode::Free => format!(
                "{title} [free, yaw {:.0}, pitch {:.0}]",
                self.camera.yaw().0,
                self.camera.pitch().0
            ),
        }
    }

    fn save_screenshot(&mut self) {
        let path = PathBuf::from(format!("screenshot_{:03}.png", self.screenshots));
        let frame = self.renderer.framebuffer().ssaa(self.config.render.ssaa);
        match frame.save_to_image(&path) {
            Ok(()) => {
                self.screenshots += 1;
                log::info!("saved {}", path.display());
            }
            Err(err) => log::error!("{err}"),
        }
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        let (width, height) = (self.config.window.width, self.config.window.height);
        let mut last_frame = Instant::now();
        let mut frames = 0u64;

        while self.window.is_open() {
            let now = Instant::now();
            let delta_time = now.duration_since(last_frame).as_secs_f32().min(MAX_FRAME_TIME);
            last_frame = now;

            let input = self.poll_input();
            if input.quit {
                break;
            }
            apply_input(&mut self.camera, &mut self.scene.player, &input, delta_time);

            self.scene.draw(&mut self.renderer, &self.camera);
            self.renderer
                .framebuffer()
                .downsample_into(self.config.render.ssaa, &mut self.display);

            let status = self.status_line();
            if status != self.status {
                self.window.set_title(&status);
                self.status = status;
            }

            if input.screenshot {
                self.save_screenshot();
            }

            self.window.update_with_buffer(&self.display, width, height)?;
            frames += 1;
        }

        log::info!("closing after {frames} frames");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Grid;

    fn setup() -> (Camera, Player) {
        (Camera::default(), Player::new(&Grid::new(10), 0.3, 1.0))
    }

    #[test]
    fn wasd_moves_player_only_in_isometric_mode() {
        let (mut camera, mut player) = setup();
        let start = player.position;
        let input = FrameInput {
            wasd: Movement {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        apply_input(&mut camera, &mut player, &input, 1.0);
        assert_eq!(player.position.x, start.x + 1.0);

        camera.toggle_mode();
        let moved = player.position;
        apply_input(&mut camera, &mut player, &input, 1.0);
        assert_eq!(player.position, moved);
    }

    #[test]
    fn arrows_move_camera_only_in_free_mode() {
        let (mut camera, mut player) = setup();
        let input = FrameInput {
            arrows: Movement {
                forward: true,
                ..Default::default()
            },
            ..Default::default()
        };
        apply_input(&mut camera, &mut player, &input, 1.0);
        assert_eq!(camera.free_position(), cgmath::Point3::new(2.0, 2.0, 2.0));

        let toggle = FrameInput {
            toggle_camera: true,
            ..input
        };
        apply_input(&mut camera, &mut player, &toggle, 1.0);
        assert_eq!(camera.mode(), CameraMode::Free);
        assert!(camera.free_position().z < 2.0);
    }

    #[test]
    fn scroll_zooms_and_cursor_looks() {
        let (mut camera, mut player) = setup();
        let mut input = FrameInput {
            scroll_y: 5.0,
            toggle_camera: true,
            cursor: Some((400.0, 300.0)),
            ..Default::default()
        };
        apply_input(&mut camera, &mut player, &input, 0.016);
        assert!((camera.zoom() - 9.5).abs() < 1e-5);

        input.toggle_camera = false;
        input.scroll_y = 0.0;
        input.cursor = Some((410.0, 300.0));
        let yaw = camera.yaw();
        apply_input(&mut camera, &mut player, &input, 0.016);
        assert!((camera.yaw().0 - yaw.0 - 1.0).abs() < 1e-5);
    }
}
