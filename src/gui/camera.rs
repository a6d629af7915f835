use std::f32::consts::PI;

use kiss3d::camera::Camera;
use kiss3d::event::WindowEvent;
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{
    Isometry3, Matrix4, Perspective3, Point3, Translation3, Unit, UnitQuaternion, Vector3,
};

/// One discrete nudge to the camera, expressed in the camera's own frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraAction {
    Translate(Vector3<f32>),
    Rotate {
        axis: Unit<Vector3<f32>>,
        angle: f32,
    },
}

// The camera is a free-floating rigid body. Its pose maps camera space to
// world space, so the view matrix is the pose's inverse. Unlike the orbiting
// cameras kiss3d ships with, nothing is clamped or re-aimed: each action is
// composed onto the right of the pose and stays there.
pub struct SolarCamera {
    pose: Isometry3<f32>,
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    znear: f32,
    zfar: f32,
}

impl SolarCamera {
    pub fn new(pose: Isometry3<f32>) -> Self {
        SolarCamera {
            pose,
            width: 800,
            height: 600,
            fovy: PI / 4.0,
            znear: 0.1,
            zfar: 500.0,
        }
    }

    /// Above the orbital plane, tilted down towards the sun.
    pub fn overlooking() -> Self {
        let tilt = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -0.35);
        Self::new(Isometry3::from_parts(Translation3::new(0.0, 25.0, 65.0), tilt))
    }

    pub fn pose(&self) -> &Isometry3<f32> {
        &self.pose
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        // Minimized windows report zero
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn apply(&mut self, action: CameraAction) {
        match action {
            CameraAction::Translate(delta) => self.pose *= Translation3::from(delta),
            CameraAction::Rotate { axis, angle } => {
                self.pose *= UnitQuaternion::from_axis_angle(&axis, angle)
            }
        }
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(
            self.width as f32 / self.height as f32,
            self.fovy,
            self.znear,
            self.zfar,
        )
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }
}

impl Camera for SolarCamera {
    fn handle_event(&mut self, _canvas: &Canvas, event: &WindowEvent) {
        // Keys and scrolling go through the controller instead
        if let WindowEvent::FramebufferSize(w, h) = *event {
            self.set_viewport(w, h);
        }
    }

    fn eye(&self) -> Point3<f32> {
        Point3::from(self.pose.translation.vector)
    }

    fn view_transform(&self) -> Isometry3<f32> {
        self.pose.inverse()
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}
