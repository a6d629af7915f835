use std::time::Instant;

use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::controller::Controller;
use self::renderers::CompoundRenderer;
use crate::config::Config;
use crate::error::RenderError;
use crate::model::{SolarSystem, TransformEvaluator};

mod camera;
mod controller;
mod renderers;

pub use camera::{CameraAction, SolarCamera};
pub use controller::camera_action;

pub struct Simulation {
    system: SolarSystem,
    evaluator: TransformEvaluator,
    camera: SolarCamera,
    controller: Controller,
    renderer: CompoundRenderer,
    start: Instant,
}

impl Simulation {
    pub fn new(config: Config, window: &mut Window) -> Result<Self, RenderError> {
        let Config {
            system,
            transform,
            stars,
            sphere,
        } = config;

        let mut camera = SolarCamera::overlooking();
        camera.set_viewport(window.width(), window.height());

        let mut renderer = CompoundRenderer::new(&system, &sphere, stars)?;
        renderer.upload_view(&camera.view_matrix());

        log::info!(
            "satellites: {:?}, spin {}",
            transform.satellite_params,
            if transform.satellite_spin { "on" } else { "off" }
        );

        Ok(Simulation {
            system,
            evaluator: TransformEvaluator::new(transform),
            camera,
            controller: Controller::new(),
            renderer,
            start: Instant::now(),
        })
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        for event in events.iter() {
            if self.controller.process_event(event, &mut self.camera) {
                self.renderer.upload_view(&self.camera.view_matrix());
            }
        }
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, Some(&mut self.renderer), None)
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());

        let time = self.start.elapsed().as_secs_f32();
        self.renderer
            .queue_frame(&self.evaluator, &self.system, time, self.camera.pose());
        self.controller.increment_frame_counter();
    }
}
