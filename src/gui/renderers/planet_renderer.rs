use kiss3d::camera::Camera;
use kiss3d::context::Context;
use kiss3d::renderer::Renderer;
use kiss3d::resource::{AllocationType, BufferType, GPUVec, ShaderAttribute};
use nalgebra::{Isometry3, Matrix4, Point3};

use super::program::{MatrixUniforms, ShaderProgram};
use crate::error::RenderError;
use crate::math::mesh::MeshSource;
use crate::model::{BodyID, FramePlan, SolarSystem, TransformEvaluator};

struct BodyBuffers {
    // Stored as (position, normal, position, normal, ...)
    vertices: GPUVec<Point3<f32>>,
    faces: GPUVec<Point3<u16>>,
    num_elements: i32,
}

/// GPU buffers for every body, indexed by `BodyID`. Each body gets its own
/// copy of the mesh.
pub struct MeshStore {
    buffers: Vec<BodyBuffers>,
}

impl MeshStore {
    pub fn upload(system: &SolarSystem, source: &dyn MeshSource) -> Result<Self, RenderError> {
        let mut buffers = Vec::with_capacity(system.len());
        for body in system.bodies() {
            let mesh_error = |err| RenderError::Mesh {
                body: body.info.name.clone(),
                source: err,
            };
            let mesh = source.load().map_err(mesh_error)?;
            let faces = mesh.indices_u16().map_err(mesh_error)?;

            log::debug!(
                "uploading {} ({} vertices, {} triangles) for {}",
                source.describe(),
                mesh.num_vertices(),
                faces.len(),
                body.info.name
            );

            buffers.push(BodyBuffers {
                vertices: GPUVec::new(
                    mesh.interleaved(),
                    BufferType::Array,
                    AllocationType::StaticDraw,
                ),
                num_elements: mesh.num_elements() as i32,
                faces: GPUVec::new(faces, BufferType::ElementArray, AllocationType::StaticDraw),
            });
        }
        Ok(MeshStore { buffers })
    }

    fn get_mut(&mut self, id: BodyID) -> Option<&mut BodyBuffers> {
        self.buffers.get_mut(id.0)
    }
}

pub struct PlanetRenderer {
    // OpenGL stuff
    program: ShaderProgram,
    pos: ShaderAttribute<Point3<f32>>,
    normal: ShaderAttribute<Point3<f32>>,
    uniforms: MatrixUniforms,
    // Data storage
    meshes: MeshStore,
    plan: FramePlan,
}

impl PlanetRenderer {
    pub fn new(system: &SolarSystem, source: &dyn MeshSource) -> Result<Self, RenderError> {
        let mut program = ShaderProgram::new("planet", VERTEX_SRC, FRAGMENT_SRC);

        Ok(PlanetRenderer {
            pos: program.attribute::<Point3<f32>>("position")?,
            normal: program.attribute::<Point3<f32>>("normal_in")?,
            uniforms: MatrixUniforms::locate(&mut program)?,
            meshes: MeshStore::upload(system, source)?,
            program,
            plan: FramePlan::new(),
        })
    }

    /// Queues this frame's draws. They're issued, and forgotten, on the next
    /// render.
    pub fn queue_frame(
        &mut self,
        evaluator: &TransformEvaluator,
        system: &SolarSystem,
        time: f32,
        camera_pose: &Isometry3<f32>,
    ) {
        self.plan.fill(evaluator, system, time, camera_pose);
    }

    pub fn upload_view(&mut self, view: &Matrix4<f32>) {
        self.program.use_program();
        self.uniforms.upload_view(view);
    }
}

impl Renderer for PlanetRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        if self.plan.is_empty() {
            return;
        }

        self.program.use_program();
        self.pos.enable();
        self.normal.enable();

        self.uniforms.upload_camera(pass, camera);

        let ctxt = Context::get();
        for command in self.plan.drain() {
            let buffers = match self.meshes.get_mut(command.body) {
                Some(buffers) => buffers,
                None => {
                    log::warn!("no mesh uploaded for {:?}", command.body);
                    continue;
                }
            };

            self.uniforms.upload_transform(&command.transform);

            self.pos.bind_sub_buffer(&mut buffers.vertices, 1, 0);
            self.normal.bind_sub_buffer(&mut buffers.vertices, 1, 1);
            buffers.faces.bind();

            ctxt.draw_elements(
                Context::TRIANGLES,
                buffers.num_elements,
                Context::UNSIGNED_SHORT,
                0,
            );
        }

        self.pos.disable();
        self.normal.disable();
    }
}

/// Vertex shader used for the bodies.
static VERTEX_SRC: &str = "#version 100
    attribute vec3 position;
    attribute vec3 normal_in;
    varying   vec3 vNormal;
    uniform   mat4 model;
    uniform   mat4 normal;
    uniform   mat4 view;
    uniform   mat4 proj;
    void main() {
        gl_Position = proj * view * model * vec4(position, 1.0);
        vNormal = (normal * vec4(normal_in, 0.0)).xyz;
    }";

/// Fragment shader used for the bodies; colors each fragment by its
/// camera-space normal.
static FRAGMENT_SRC: &str = "#version 100
#ifdef GL_FRAGMENT_PRECISION_HIGH
   precision highp float;
#else
   precision mediump float;
#endif

    varying vec3 vNormal;
    void main() {
        gl_FragColor = vec4(abs(normalize(vNormal)), 1.0);
    }";
