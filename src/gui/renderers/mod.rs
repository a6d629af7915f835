use kiss3d::camera::Camera;
use kiss3d::renderer::Renderer;
use nalgebra::{Isometry3, Matrix4};

use self::planet_renderer::PlanetRenderer;
use self::star_renderer::StarRenderer;
use crate::error::RenderError;
use crate::math::mesh::MeshSource;
use crate::model::{SolarSystem, StarField, TransformEvaluator};

mod planet_renderer;
mod program;
mod star_renderer;

/// Bodies first, then the star field.
pub struct CompoundRenderer {
    planet_renderer: PlanetRenderer,
    star_renderer: StarRenderer,
}

impl CompoundRenderer {
    pub fn new(
        system: &SolarSystem,
        mesh_source: &dyn MeshSource,
        stars: StarField,
    ) -> Result<Self, RenderError> {
        let num_stars = stars.len();
        let renderer = CompoundRenderer {
            planet_renderer: PlanetRenderer::new(system, mesh_source)?,
            star_renderer: StarRenderer::new(stars)?,
        };
        log::info!(
            "uploaded {} bodies ({}) and {} stars",
            system.len(),
            mesh_source.describe(),
            num_stars
        );
        Ok(renderer)
    }

    pub fn queue_frame(
        &mut self,
        evaluator: &TransformEvaluator,
        system: &SolarSystem,
        time: f32,
        camera_pose: &Isometry3<f32>,
    ) {
        self.planet_renderer
            .queue_frame(evaluator, system, time, camera_pose);
    }

    /// Pushes a new view matrix into every program right away, rather than
    /// waiting for the next render pass.
    pub fn upload_view(&mut self, view: &Matrix4<f32>) {
        self.planet_renderer.upload_view(view);
        self.star_renderer.upload_view(view);
    }
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.planet_renderer.render(pass, camera);
        self.star_renderer.render(pass, camera);
    }
}
