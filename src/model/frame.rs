use nalgebra::Isometry3;

use super::{BodyID, BodyTransform, SolarSystem, TransformEvaluator};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub body: BodyID,
    pub transform: BodyTransform,
}

/// Draws queued for the current frame. Filled once per frame, and emptied by
/// whoever issues the draws, so nothing from one frame leaks into the next.
#[derive(Debug, Default)]
pub struct FramePlan {
    commands: Vec<DrawCommand>,
}

impl FramePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Queues one draw per body, in arena order.
    pub fn fill(
        &mut self,
        evaluator: &TransformEvaluator,
        system: &SolarSystem,
        time: f32,
        camera_pose: &Isometry3<f32>,
    ) {
        if !self.commands.is_empty() {
            log::warn!("dropping {} stale draw commands", self.commands.len());
            self.commands.clear();
        }

        let transforms = evaluator.evaluate(system, time, camera_pose);
        self.commands.extend(
            system
                .bodies()
                .zip(transforms)
                .map(|(body, transform)| DrawCommand {
                    body: body.id,
                    transform,
                }),
        );
    }

    pub fn drain(&mut self) -> impl Iterator<Item = DrawCommand> + '_ {
        self.commands.drain(..)
    }
}
