use nalgebra::{Isometry3, Matrix4, Vector3};

use super::{Body, BodyID, Role, SolarSystem};

/// Bodies that circle the origin sit slightly behind the orbital plane.
pub const ORBIT_DEPTH_OFFSET: f32 = -1.0;

/// Where a satellite gets its orbital distance and phase from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatelliteParams {
    Independent,
    CopiedFromParent,
}

impl Default for SatelliteParams {
    fn default() -> Self {
        SatelliteParams::Independent
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TransformSettings {
    pub satellite_params: SatelliteParams,
    /// Spin satellites about their own vertical axis.
    pub satellite_spin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTransform {
    pub model: Matrix4<f32>,
    pub normal: Matrix4<f32>,
}

/// Rotation about the vertical axis, followed by a push out along x.
pub fn orbit_frame(angle: f32, distance: f32, depth: f32) -> Matrix4<f32> {
    Matrix4::from_axis_angle(&Vector3::y_axis(), angle)
        * Matrix4::new_translation(&Vector3::new(distance, 0.0, depth))
}

/// Computes inverse-transpose(inverse(pose) * model), which keeps normals
/// perpendicular to surfaces once they're in camera space.
pub fn normal_matrix(camera_pose: &Isometry3<f32>, model: &Matrix4<f32>) -> Matrix4<f32> {
    let model_view = camera_pose.inverse().to_homogeneous() * model;
    model_view
        .try_inverse()
        .map(|m| m.transpose())
        .unwrap_or_else(Matrix4::identity)
}

#[derive(Debug, Clone, Default)]
pub struct TransformEvaluator {
    settings: TransformSettings,
}

impl TransformEvaluator {
    pub fn new(settings: TransformSettings) -> Self {
        TransformEvaluator { settings }
    }

    /// Unscaled frame of every body at `time`, indexed by `BodyID`.
    ///
    /// Runs in two passes: first everything that only depends on the origin,
    /// then satellites, each looking up its parent's frame from this same call.
    pub fn orbit_frames(&self, system: &SolarSystem, time: f32) -> Vec<Matrix4<f32>> {
        let mut frames: Vec<Option<Matrix4<f32>>> = system
            .bodies()
            .map(|body| match body.role {
                Role::Anchor => Some(Matrix4::identity()),
                Role::Orbiting(_) => Some(orbit_frame(
                    time + body.info.speed,
                    body.info.distance,
                    ORBIT_DEPTH_OFFSET,
                )),
                Role::Satellite(_) => None,
            })
            .collect();

        // Parents precede their children in the arena, so one ordered sweep
        // resolves chains of satellites too.
        for body in system.bodies() {
            if let Role::Satellite(parent_id) = body.role {
                let parent_frame = frames[parent_id.0].unwrap_or_else(|| {
                    log::warn!("{} was evaluated before its parent", body.info.name);
                    Matrix4::identity()
                });
                let (phase, distance) = self.satellite_params(system, body, parent_id);
                frames[body.id.0] = Some(parent_frame * orbit_frame(time + phase, distance, 0.0));
            }
        }

        frames
            .into_iter()
            .map(|f| f.unwrap_or_else(Matrix4::identity))
            .collect()
    }

    fn satellite_params(&self, system: &SolarSystem, body: &Body, parent: BodyID) -> (f32, f32) {
        match self.settings.satellite_params {
            SatelliteParams::Independent => (body.info.speed, body.info.distance),
            SatelliteParams::CopiedFromParent => {
                let parent = &system.get_body(parent).info;
                (parent.speed, parent.distance)
            }
        }
    }

    /// Model matrix of every body at `time`, indexed by `BodyID`.
    pub fn model_matrices(&self, system: &SolarSystem, time: f32) -> Vec<Matrix4<f32>> {
        let frames = self.orbit_frames(system, time);
        system
            .bodies()
            .zip(frames)
            .map(|(body, frame)| {
                let spin = match body.role {
                    Role::Satellite(_) if self.settings.satellite_spin => {
                        Matrix4::from_axis_angle(&Vector3::y_axis(), time)
                    }
                    _ => Matrix4::identity(),
                };
                frame * spin * Matrix4::new_scaling(body.info.scale)
            })
            .collect()
    }

    pub fn evaluate(
        &self,
        system: &SolarSystem,
        time: f32,
        camera_pose: &Isometry3<f32>,
    ) -> Vec<BodyTransform> {
        self.model_matrices(system, time)
            .into_iter()
            .map(|model| BodyTransform {
                normal: normal_matrix(camera_pose, &model),
                model,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BodyInfo;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::{Point3, Translation3, UnitQuaternion};

    fn info(name: &str, distance: f32, speed: f32, scale: f32) -> BodyInfo {
        BodyInfo {
            name: name.to_owned(),
            distance,
            speed,
            scale,
        }
    }

    fn small_system() -> (SolarSystem, BodyID, BodyID, BodyID) {
        let mut system = SolarSystem::new();
        let sun = system.add_anchor(info("Sun", 0.0, 0.0, 1.5)).unwrap();
        let earth = system.add_orbiting(info("Earth", 9.0, 2.0, 0.5), sun).unwrap();
        let moon = system.add_satellite(info("Moon", 1.5, 0.7, 0.3), earth).unwrap();
        (system, sun, earth, moon)
    }

    fn translation(m: &Matrix4<f32>) -> Vector3<f32> {
        m.fixed_slice::<3, 1>(0, 3).into_owned()
    }

    #[test]
    fn test_anchor_stays_at_origin() {
        let (system, sun, _, _) = small_system();
        let evaluator = TransformEvaluator::default();

        for &t in &[0.0, 0.5, 13.0, 1234.5] {
            let models = evaluator.model_matrices(&system, t);
            assert_abs_diff_eq!(translation(&models[sun.0]), Vector3::zeros());
            assert_relative_eq!(models[sun.0], Matrix4::new_scaling(1.5));
        }
    }

    #[test]
    fn test_orbiting_decomposition() {
        let (system, _, earth, _) = small_system();
        let evaluator = TransformEvaluator::default();
        let t = 3.25;

        let models = evaluator.model_matrices(&system, t);
        let expected = Matrix4::from_axis_angle(&Vector3::y_axis(), t + 2.0)
            * Matrix4::new_translation(&Vector3::new(9.0, 0.0, ORBIT_DEPTH_OFFSET))
            * Matrix4::new_scaling(0.5);
        assert_relative_eq!(models[earth.0], expected, epsilon = 1e-4);

        // The center moves counterclockwise (seen from +y) as time goes on
        let center = |t: f32| {
            let m = evaluator.model_matrices(&system, t)[earth.0];
            m.transform_point(&Point3::origin())
        };
        let (a, b) = (center(1.0), center(1.1));
        assert_relative_eq!(a.coords.norm(), b.coords.norm(), epsilon = 1e-4);
        assert!(a.coords.cross(&b.coords).y > 0.0);
    }

    #[test]
    fn test_satellite_follows_parent_in_same_pass() {
        let (system, _, earth, moon) = small_system();
        let evaluator = TransformEvaluator::default();

        for &t in &[0.0, 1.0, 7.5] {
            let frames = evaluator.orbit_frames(&system, t);
            let models = evaluator.model_matrices(&system, t);
            let expected = frames[earth.0]
                * orbit_frame(t + 0.7, 1.5, 0.0)
                * Matrix4::new_scaling(0.3);
            assert_relative_eq!(models[moon.0], expected, epsilon = 1e-4);

            // Distance from the parent's center is the satellite's own distance
            let earth_center = frames[earth.0].transform_point(&Point3::origin());
            let moon_center = models[moon.0].transform_point(&Point3::origin());
            assert_relative_eq!((moon_center - earth_center).norm(), 1.5, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_satellite_chain_resolves() {
        let (mut system, _, _, moon) = small_system();
        let probe = system.add_satellite(info("Probe", 0.5, 0.0, 0.1), moon).unwrap();
        let evaluator = TransformEvaluator::default();

        let t = 2.0;
        let frames = evaluator.orbit_frames(&system, t);
        assert_relative_eq!(
            frames[probe.0],
            frames[moon.0] * orbit_frame(t, 0.5, 0.0),
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_satellite_presets() {
        let (system, _, earth, moon) = small_system();
        let t = 0.4;

        let copied = TransformEvaluator::new(TransformSettings {
            satellite_params: SatelliteParams::CopiedFromParent,
            satellite_spin: false,
        });
        let frames = copied.orbit_frames(&system, t);
        assert_relative_eq!(
            frames[moon.0],
            frames[earth.0] * orbit_frame(t + 2.0, 9.0, 0.0),
            epsilon = 1e-4
        );

        let spinning = TransformEvaluator::new(TransformSettings {
            satellite_params: SatelliteParams::Independent,
            satellite_spin: true,
        });
        let frames = spinning.orbit_frames(&system, t);
        let models = spinning.model_matrices(&system, t);
        assert_relative_eq!(
            models[moon.0],
            frames[moon.0]
                * Matrix4::from_axis_angle(&Vector3::y_axis(), t)
                * Matrix4::new_scaling(0.3),
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_normal_matrix_known_pair() {
        // Camera sits at z = 5 looking down -z; the model scales by 2 and
        // moves along x by 3.
        let pose = Isometry3::from_parts(
            Translation3::new(0.0, 0.0, 5.0),
            UnitQuaternion::identity(),
        );
        let model =
            Matrix4::new_translation(&Vector3::new(3.0, 0.0, 0.0)) * Matrix4::new_scaling(2.0);

        // inverse(pose) * model = [[2,0,0,3],[0,2,0,0],[0,0,2,-5],[0,0,0,1]]
        // Its inverse is [[.5,0,0,-1.5],[0,.5,0,0],[0,0,.5,2.5],[0,0,0,1]], transposed:
        #[rustfmt::skip]
        let expected = Matrix4::new(
            0.5,  0.0, 0.0, 0.0,
            0.0,  0.5, 0.0, 0.0,
            0.0,  0.0, 0.5, 0.0,
            -1.5, 0.0, 2.5, 1.0,
        );
        assert_relative_eq!(normal_matrix(&pose, &model), expected, epsilon = 1e-5);
    }

    #[test]
    fn test_evaluate_is_repeatable() {
        let (system, _, _, _) = small_system();
        let evaluator = TransformEvaluator::default();
        let pose = Isometry3::translation(0.0, 1.0, 20.0);

        let first = evaluator.evaluate(&system, 5.0, &pose);
        let second = evaluator.evaluate(&system, 5.0, &pose);
        assert_eq!(first, second);
        assert_eq!(first.len(), system.len());
    }
}
