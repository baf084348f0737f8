use cgmath::{Deg, EuclideanSpace, InnerSpace, Matrix4 as Mat4, Point3, Vector2 as Vec2, Vector3 as Vec3};

pub const DEFAULT_EYE: [f32; 3] = [2.0, 2.0, 2.0];
pub const DEFAULT_ZOOM: f32 = 10.0;
pub const MIN_ZOOM: f32 = 0.1;
pub const ZOOM_STEP: f32 = 0.1;
pub const PITCH_LIMIT: f32 = 89.0;
/// Free-fly speed in world units per second (0.05 per frame at 60 Hz).
pub const DEFAULT_SPEED: f32 = 3.0;
/// Degrees of rotation per pixel of cursor travel.
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
/// Center of the default 800x600 window.
pub const DEFAULT_CURSOR: [f32; 2] = [400.0, 300.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Isometric,
    Free,
}

impl CameraMode {
    pub fn name(self) -> &'static str {
        match self {
            CameraMode::Isometric => "isometric",
            CameraMode::Free => "free",
        }
    }
}

/// Directions held down this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Projection the renderer should pair with the current view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Orthographic {
        half_width: f32,
        half_height: f32,
        near: f32,
        far: f32,
    },
    Perspective {
        fovy: Deg<f32>,
        aspect: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    pub const ORTHO_NEAR: f32 = -10.0;
    pub const ORTHO_FAR: f32 = 10.0;
    pub const PERSPECTIVE_FOVY: Deg<f32> = Deg(45.0);
    pub const PERSPECTIVE_NEAR: f32 = 0.1;
    pub const PERSPECTIVE_FAR: f32 = 100.0;

    pub fn matrix(&self) -> Mat4<f32> {
        match *self {
            Projection::Orthographic {
                half_width,
                half_height,
                near,
                far,
            } => cgmath::ortho(-half_width, half_width, -half_height, half_height, near, far),
            Projection::Perspective {
                fovy,
                aspect,
                near,
                far,
            } => cgmath::perspective(fovy, aspect, near, far),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    mode: CameraMode,
    iso_position: Point3<f32>,
    free_position: Point3<f32>,
    front: Vec3<f32>,
    up: Vec3<f32>,
    yaw: Deg<f32>,
    pitch: Deg<f32>,
    zoom: f32,
    last_cursor: Vec2<f32>,
    cursor_initialized: bool,
    speed: f32,
    sensitivity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED, DEFAULT_SENSITIVITY)
    }
}

impl Camera {
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        let yaw = Deg(-90.0);
        let pitch = Deg(0.0);
        Self {
            mode: CameraMode::Isometric,
            iso_position: Point3::from(DEFAULT_EYE),
            free_position: Point3::from(DEFAULT_EYE),
            front: front_from_angles(yaw, pitch),
            up: Vec3::unit_y(),
            yaw,
            pitch,
            zoom: DEFAULT_ZOOM,
            last_cursor: Vec2::from(DEFAULT_CURSOR),
            cursor_initialized: false,
            speed,
            sensitivity,
        }
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom.max(MIN_ZOOM);
        self
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn iso_position(&self) -> Point3<f32> {
        self.iso_position
    }

    pub fn free_position(&self) -> Point3<f32> {
        self.free_position
    }

    pub fn front(&self) -> Vec3<f32> {
        self.front
    }

    pub fn yaw(&self) -> Deg<f32> {
        self.yaw
    }

    pub fn pitch(&self) -> Deg<f32> {
        self.pitch
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Eye position of whichever mode is active.
    pub fn eye_position(&self) -> Point3<f32> {
        match self.mode {
            CameraMode::Isometric => self.iso_position,
            CameraMode::Free => self.free_position,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            CameraMode::Isometric => CameraMode::Free,
            CameraMode::Free => CameraMode::Isometric,
        };
        // re-anchor the cursor so the next look doesn't jump
        self.cursor_initialized = false;
        log::debug!("camera mode -> {}", self.mode.name());
    }

    pub fn update_free(&mut self, delta_time: f32, movement: Movement) {
        if self.mode != CameraMode::Free {
            return;
        }
        let step = self.speed * delta_time;
        let right = self.front.cross(self.up).normalize();

        if movement.forward {
            self.free_position += self.front * step;
        }
        if movement.backward {
            self.free_position -= self.front * step;
        }
        if movement.left {
            self.free_position -= right * step;
        }
        if movement.right {
            self.free_position += right * step;
        }
    }

    pub fn handle_mouse_move(&mut self, cursor_x: f32, cursor_y: f32) {
        if self.mode != CameraMode::Free {
            return;
        }
        if !self.cursor_initialized {
            self.last_cursor = Vec2::new(cursor_x, cursor_y);
            self.cursor_initialized = true;
            return;
        }

        // screen y grows downward, pitch grows upward
        let dx = (cursor_x - self.last_cursor.x) * self.sensitivity;
        let dy = (self.last_cursor.y - cursor_y) * self.sensitivity;
        self.last_cursor = Vec2::new(cursor_x, cursor_y);

        self.yaw += Deg(dx);
        self.pitch = Deg((self.pitch.0 + dy).clamp(-PITCH_LIMIT, PITCH_LIMIT));
        self.front = front_from_angles(self.yaw, self.pitch);
    }

    pub fn handle_zoom(&mut self, scroll_delta_y: f32) {
        self.zoom = (self.zoom - scroll_delta_y * ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn view_matrix(&self) -> Mat4<f32> {
        match self.mode {
            CameraMode::Isometric => Mat4::look_at_rh(self.iso_position, Point3::origin(), self.up),
            CameraMode::Free => Mat4::look_at_rh(
                self.free_position,
                self.free_position + self.front,
                self.up,
            ),
        }
    }

    pub fn projection(&self, aspect: f32) -> Projection {
        match self.mode {
            CameraMode::Isometric => Projection::Orthographic {
                half_width: self.zoom * aspect,
                half_height: self.zoom,
                near: Projection::ORTHO_NEAR,
                far: Projection::ORTHO_FAR,
            },
            CameraMode::Free => Projection::Perspective {
                fovy: Projection::PERSPECTIVE_FOVY,
                aspect,
                near: Projection::PERSPECTIVE_NEAR,
                far: Projection::PERSPECTIVE_FAR,
            },
        }
    }

    pub fn view_proj_matrix(&self, aspect: f32) -> Mat4<f32> {
        self.projection(aspect).matrix() * self.view_matrix()
    }
}

fn front_from_angles(yaw: Deg<f32>, pitch: Deg<f32>) -> Vec3<f32> {
    let (sin_yaw, cos_yaw) = yaw.0.to_radians().sin_cos();
    let (sin_pitch, cos_pitch) = pitch.0.to_radians().sin_cos();
    Vec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::SquareMatrix;

    const EPS: f32 = 1e-5;

    fn free_camera() -> Camera {
        let mut camera = Camera::default();
        camera.toggle_mode();
        camera
    }

    fn assert_mat_eq(a: Mat4<f32>, b: Mat4<f32>) {
        let a: &[f32; 16] = a.as_ref();
        let b: &[f32; 16] = b.as_ref();
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < EPS, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn default_view_looks_from_iso_eye_at_origin() {
        let camera = Camera::default();
        assert_eq!(camera.mode(), CameraMode::Isometric);
        assert_eq!(camera.zoom(), DEFAULT_ZOOM);
        let expected = Mat4::look_at_rh(
            Point3::new(2.0, 2.0, 2.0),
            Point3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert_mat_eq(camera.view_matrix(), expected);
    }

    #[test]
    fn first_mouse_move_only_anchors() {
        let mut camera = free_camera();
        let (yaw, pitch, front) = (camera.yaw(), camera.pitch(), camera.front());
        camera.handle_mouse_move(400.0, 300.0);
        assert_eq!(camera.yaw(), yaw);
        assert_eq!(camera.pitch(), pitch);
        assert_eq!(camera.front(), front);

        // anchoring ignores how far the cursor is from the last position
        let mut camera = free_camera();
        camera.handle_mouse_move(10.0, 590.0);
        assert_eq!(camera.yaw(), yaw);
        assert_eq!(camera.pitch(), pitch);
    }

    #[test]
    fn horizontal_mouse_move_adds_scaled_yaw() {
        let mut camera = free_camera();
        camera.handle_mouse_move(400.0, 300.0);
        let before = camera.yaw();
        camera.handle_mouse_move(410.0, 300.0);
        assert!((camera.yaw().0 - (before.0 + 1.0)).abs() < EPS);
        assert_eq!(camera.pitch(), Deg(0.0));
    }

    #[test]
    fn cursor_moving_up_raises_pitch() {
        let mut camera = free_camera();
        camera.handle_mouse_move(400.0, 300.0);
        camera.handle_mouse_move(400.0, 250.0);
        assert!((camera.pitch().0 - 5.0).abs() < EPS);
        assert!(camera.front().y > 0.0);
    }

    #[test]
    fn mouse_is_ignored_in_isometric_mode() {
        let mut camera = Camera::default();
        camera.handle_mouse_move(400.0, 300.0);
        camera.handle_mouse_move(900.0, -400.0);
        assert_eq!(camera.yaw(), Deg(-90.0));
        assert_eq!(camera.pitch(), Deg(0.0));
    }

    #[test]
    fn pitch_stays_clamped_and_front_unit_length() {
        let mut camera = free_camera();
        camera.handle_mouse_move(0.0, 0.0);
        let path = [
            (0.0, -5000.0),
            (120.0, 4000.0),
            (-3000.0, 12000.0),
            (77.0, -20000.0),
            (5.0, 3.0),
            (1e6, -1e6),
        ];
        for (x, y) in path {
            camera.handle_mouse_move(x, y);
            assert!(camera.pitch().0 >= -PITCH_LIMIT && camera.pitch().0 <= PITCH_LIMIT);
            assert!((camera.front().magnitude() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn view_matrix_stays_invertible_at_pitch_limits() {
        let mut camera = free_camera();
        camera.handle_mouse_move(0.0, 0.0);
        camera.handle_mouse_move(0.0, -10_000.0);
        assert_eq!(camera.pitch(), Deg(PITCH_LIMIT));
        assert!(camera.view_matrix().invert().is_some());

        camera.handle_mouse_move(0.0, 10_000.0);
        assert_eq!(camera.pitch(), Deg(-PITCH_LIMIT));
        assert!(camera.view_matrix().invert().is_some());

        camera.toggle_mode();
        assert!(camera.view_matrix().invert().is_some());
    }

    #[test]
    fn double_toggle_restores_mode_and_positions() {
        let mut camera = free_camera();
        camera.update_free(
            1.0,
            Movement {
                forward: true,
                ..Default::default()
            },
        );
        let (mode, iso, free) = (camera.mode(), camera.iso_position(), camera.free_position());
        camera.toggle_mode();
        assert_ne!(camera.mode(), mode);
        camera.toggle_mode();
        assert_eq!(camera.mode(), mode);
        assert_eq!(camera.iso_position(), iso);
        assert_eq!(camera.free_position(), free);
    }

    #[test]
    fn toggle_rearms_cursor_anchor() {
        let mut camera = free_camera();
        camera.handle_mouse_move(400.0, 300.0);
        camera.toggle_mode();
        camera.toggle_mode();
        let yaw = camera.yaw();
        camera.handle_mouse_move(800.0, 300.0);
        assert_eq!(camera.yaw(), yaw);
    }

    #[test]
    fn zoom_step_and_floor() {
        let mut camera = Camera::default();
        camera.handle_zoom(5.0);
        assert!((camera.zoom() - 9.5).abs() < EPS);

        for delta in [50.0, 1000.0, -3.0, 200.0, f32::MAX] {
            camera.handle_zoom(delta);
            assert!(camera.zoom() >= MIN_ZOOM);
        }
        camera.handle_zoom(1e9);
        assert_eq!(camera.zoom(), MIN_ZOOM);

        camera.handle_zoom(-10.0);
        assert!((camera.zoom() - (MIN_ZOOM + 1.0)).abs() < EPS);
    }

    #[test]
    fn movement_is_noop_in_isometric_mode() {
        let mut camera = Camera::default();
        let all = Movement {
            forward: true,
            backward: false,
            left: true,
            right: false,
        };
        camera.update_free(1.0, all);
        assert_eq!(camera.free_position(), Point3::from(DEFAULT_EYE));
        assert_eq!(camera.iso_position(), Point3::from(DEFAULT_EYE));
    }

    #[test]
    fn free_movement_scales_with_delta_time() {
        let mut camera = free_camera();
        let start = camera.free_position();
        let forward = Movement {
            forward: true,
            ..Default::default()
        };
        camera.update_free(0.5, forward);
        let moved = camera.free_position() - start;
        let expected = camera.front() * DEFAULT_SPEED * 0.5;
        assert!((moved - expected).magnitude() < EPS);

        // strafing right along front x up, which is +x when looking down -z
        let mut camera = free_camera();
        camera.update_free(
            1.0,
            Movement {
                right: true,
                ..Default::default()
            },
        );
        let moved = camera.free_position() - start;
        assert!((moved.x - DEFAULT_SPEED).abs() < 1e-4);
        assert!(moved.z.abs() < 1e-4);

        // opposite keys cancel out
        let mut camera = free_camera();
        camera.update_free(
            1.0,
            Movement {
                forward: true,
                backward: true,
                left: true,
                right: true,
            },
        );
        assert!((camera.free_position() - start).magnitude() < EPS);
    }

    #[test]
    fn free_view_looks_along_front() {
        let camera = free_camera();
        let view = camera.view_matrix();
        let ahead = camera.free_position() + camera.front() * 3.0;
        let in_eye = view * ahead.to_homogeneous();
        // right-handed eye space looks down -z
        assert!(in_eye.x.abs() < 1e-4);
        assert!(in_eye.y.abs() < 1e-4);
        assert!((in_eye.z + 3.0).abs() < 1e-4);
    }

    #[test]
    fn projection_follows_mode() {
        let mut camera = Camera::default();
        match camera.projection(2.0) {
            Projection::Orthographic {
                half_width,
                half_height,
                ..
            } => {
                assert_eq!(half_height, DEFAULT_ZOOM);
                assert_eq!(half_width, DEFAULT_ZOOM * 2.0);
            }
            other => panic!("expected orthographic, got {other:?}"),
        }
        camera.toggle_mode();
        assert!(matches!(camera.projection(1.0), Projection::Perspective { .. }));
        assert!(camera.view_proj_matrix(4.0 / 3.0).invert().is_some());
    }
}
