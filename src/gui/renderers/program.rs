use kiss3d::camera::Camera;
use kiss3d::resource::{Effect, GLPrimitive, ShaderAttribute, ShaderUniform};
use nalgebra::Matrix4;

use crate::error::RenderError;
use crate::model::BodyTransform;

/// A compiled shader program that knows its own name, so that a missing
/// uniform or attribute can be reported as a startup error.
pub struct ShaderProgram {
    name: &'static str,
    effect: Effect,
}

impl ShaderProgram {
    pub fn new(name: &'static str, vertex_src: &str, fragment_src: &str) -> Self {
        let mut effect = Effect::new_from_str(vertex_src, fragment_src);
        effect.use_program();
        log::debug!("compiled shader program {:?}", name);
        ShaderProgram { name, effect }
    }

    pub fn use_program(&mut self) {
        self.effect.use_program();
    }

    pub fn uniform<T: GLPrimitive>(
        &mut self,
        name: &'static str,
    ) -> Result<ShaderUniform<T>, RenderError> {
        self.effect
            .get_uniform::<T>(name)
            .ok_or(RenderError::MissingUniform {
                program: self.name,
                name,
            })
    }

    pub fn attribute<T: GLPrimitive>(
        &mut self,
        name: &'static str,
    ) -> Result<ShaderAttribute<T>, RenderError> {
        self.effect
            .get_attrib::<T>(name)
            .ok_or(RenderError::MissingAttribute {
                program: self.name,
                name,
            })
    }
}

/// The four matrix slots every program in this crate exposes.
pub struct MatrixUniforms {
    model: ShaderUniform<Matrix4<f32>>,
    normal: ShaderUniform<Matrix4<f32>>,
    view: ShaderUniform<Matrix4<f32>>,
    proj: ShaderUniform<Matrix4<f32>>,
}

impl MatrixUniforms {
    pub fn locate(program: &mut ShaderProgram) -> Result<Self, RenderError> {
        Ok(MatrixUniforms {
            model: program.uniform("model")?,
            normal: program.uniform("normal")?,
            view: program.uniform("view")?,
            proj: program.uniform("proj")?,
        })
    }

    /// The program these belong to must be in use.
    pub fn upload_camera(&mut self, pass: usize, camera: &dyn Camera) {
        camera.upload(pass, &mut self.proj, &mut self.view);
    }

    pub fn upload_view(&mut self, view: &Matrix4<f32>) {
        self.view.upload(view);
    }

    pub fn upload_transform(&mut self, transform: &BodyTransform) {
        self.model.upload(&transform.model);
        self.normal.upload(&transform.normal);
    }
}
