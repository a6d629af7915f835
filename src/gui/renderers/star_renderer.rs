use std::convert::TryFrom;
use kiss3d::camera::Camera;
use kiss3d::context::Context;
use kiss3d::renderer::Renderer;
use kiss3d::resource::{AllocationType, BufferType, GPUVec, ShaderAttribute};
use nalgebra::{Matrix4, Point3};

use super::program::{MatrixUniforms, ShaderProgram};
use crate::error::RenderError;
use crate::model::{normal_matrix, BodyTransform, StarField};

pub struct StarRenderer {
    // OpenGL stuff
    program: ShaderProgram,
    pos: ShaderAttribute<Point3<f32>>,
    uniforms: MatrixUniforms,
    // Data storage
    stars: GPUVec<Point3<f32>>,
    num_stars: i32,
}

impl StarRenderer {
    pub fn new(stars: StarField) -> Result<Self, RenderError> {
        let mut program = ShaderProgram::new("star", VERTEX_SRC, FRAGMENT_SRC);
        // Counts past i32::MAX are turned away when the config is resolved
        let num_stars = i32::try_from(stars.len()).unwrap_or(i32::MAX);

        Ok(StarRenderer {
            pos: program.attribute::<Point3<f32>>("position")?,
            uniforms: MatrixUniforms::locate(&mut program)?,
            program,
            stars: GPUVec::new(
                stars.into_positions(),
                BufferType::Array,
                AllocationType::StaticDraw,
            ),
            num_stars,
        })
    }

    pub fn upload_view(&mut self, view: &Matrix4<f32>) {
        self.program.use_program();
        self.uniforms.upload_view(view);
    }
}

impl Renderer for StarRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        if self.num_stars == 0 {
            return;
        }

        self.program.use_program();
        self.pos.enable();

        // Stars live in world space, so their model matrix is the identity
        let model = Matrix4::identity();
        let camera_pose = camera.view_transform().inverse();
        self.uniforms.upload_camera(pass, camera);
        self.uniforms.upload_transform(&BodyTransform {
            model,
            normal: normal_matrix(&camera_pose, &model),
        });

        self.pos.bind(&mut self.stars);

        Context::get().draw_arrays(Context::POINTS, 0, self.num_stars);

        self.pos.disable();
    }
}

/// Vertex shader used for the star field. Stars dim as the camera turns away
/// from the orbital plane's +z face.
static VERTEX_SRC: &str = "#version 100
    attribute vec3 position;
    varying   float vBrightness;
    uniform   mat4 model;
    uniform   mat4 normal;
    uniform   mat4 view;
    uniform   mat4 proj;
    void main() {
        gl_Position = proj * view * model * vec4(position, 1.0);
        gl_PointSize = 2.0;
        vec3 facing = normalize((normal * vec4(0.0, 0.0, 1.0, 0.0)).xyz);
        vBrightness = 0.6 + 0.4 * abs(facing.z);
    }";

static FRAGMENT_SRC: &str = "#version 100
#ifdef GL_FRAGMENT_PRECISION_HIGH
   precision highp float;
#else
   precision mediump float;
#endif

    varying float vBrightness;
    void main() {
        gl_FragColor = vec4(vec3(vBrightness), 1.0);
    }";
