use std::time::Instant;

use kiss3d::event::{Action, Event, Key, WindowEvent};
use nalgebra::Vector3;

use super::camera::{CameraAction, SolarCamera};

// Key config, all in one place
const KEY_FORWARD: Key = Key::W;
const KEY_BACKWARD: Key = Key::S;
const KEY_LEFT: Key = Key::L;
const KEY_RIGHT: Key = Key::H;
const KEY_DOWN: Key = Key::K;
const KEY_UP: Key = Key::J;
const KEY_PITCH_UP: Key = Key::Down;
const KEY_PITCH_DOWN: Key = Key::Up;
const KEY_YAW_LEFT: Key = Key::Left;
const KEY_YAW_RIGHT: Key = Key::Right;

const DEPTH_STEP: f32 = 1.0;
const PAN_STEP: f32 = 0.1;
const ANGLE_STEP: f32 = 0.1;

/// Maps one input event to the camera nudge it asks for, if any. Only presses
/// count; holding a key does whatever repeats the windowing layer delivers.
pub fn camera_action(event: &WindowEvent) -> Option<CameraAction> {
    let translate = |x, y, z| Some(CameraAction::Translate(Vector3::new(x, y, z)));
    let pitch = |angle| {
        Some(CameraAction::Rotate {
            axis: Vector3::x_axis(),
            angle,
        })
    };
    let yaw = |angle| {
        Some(CameraAction::Rotate {
            axis: Vector3::y_axis(),
            angle,
        })
    };

    match *event {
        WindowEvent::Key(KEY_FORWARD, Action::Press, _) => translate(0.0, 0.0, -DEPTH_STEP),
        WindowEvent::Key(KEY_BACKWARD, Action::Press, _) => translate(0.0, 0.0, DEPTH_STEP),
        WindowEvent::Key(KEY_LEFT, Action::Press, _) => translate(-PAN_STEP, 0.0, 0.0),
        WindowEvent::Key(KEY_RIGHT, Action::Press, _) => translate(PAN_STEP, 0.0, 0.0),
        WindowEvent::Key(KEY_DOWN, Action::Press, _) => translate(0.0, -PAN_STEP, 0.0),
        WindowEvent::Key(KEY_UP, Action::Press, _) => translate(0.0, PAN_STEP, 0.0),
        WindowEvent::Key(KEY_PITCH_UP, Action::Press, _) => pitch(ANGLE_STEP),
        WindowEvent::Key(KEY_PITCH_DOWN, Action::Press, _) => pitch(-ANGLE_STEP),
        WindowEvent::Key(KEY_YAW_LEFT, Action::Press, _) => yaw(ANGLE_STEP),
        WindowEvent::Key(KEY_YAW_RIGHT, Action::Press, _) => yaw(-ANGLE_STEP),
        WindowEvent::Scroll(_, dy, _) if dy != 0.0 => translate(0.0, 0.0, dy as f32),
        _ => None,
    }
}

pub struct Controller {
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    /// Returns true when a window just closed and `value` has a new reading.
    pub fn increment(&mut self) -> bool {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
            true
        } else {
            false
        }
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            fps_counter: FpsCounter::new(1000),
        }
    }

    /// Applies the event to the camera. Returns whether the camera moved.
    pub fn process_event(&mut self, event: Event, camera: &mut SolarCamera) -> bool {
        match camera_action(&event.value) {
            Some(action) => {
                log::debug!("camera {:?}", action);
                camera.apply(action);
                true
            }
            None => false,
        }
    }

    pub fn increment_frame_counter(&mut self) {
        if self.fps_counter.increment() {
            log::debug!("{:.1} fps", self.fps_counter.value());
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiss3d::event::Modifiers;

    fn press(key: Key) -> WindowEvent {
        WindowEvent::Key(key, Action::Press, Modifiers::empty())
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            camera_action(&press(Key::W)),
            Some(CameraAction::Translate(Vector3::new(0.0, 0.0, -1.0)))
        );
        assert_eq!(
            camera_action(&press(Key::H)),
            Some(CameraAction::Translate(Vector3::new(0.1, 0.0, 0.0)))
        );
        assert_eq!(
            camera_action(&press(Key::Up)),
            Some(CameraAction::Rotate {
                axis: Vector3::x_axis(),
                angle: -0.1
            })
        );
        assert_eq!(
            camera_action(&press(Key::Right)),
            Some(CameraAction::Rotate {
                axis: Vector3::y_axis(),
                angle: -0.1
            })
        );

        let bound = [
            Key::W,
            Key::S,
            Key::H,
            Key::J,
            Key::K,
            Key::L,
            Key::Up,
            Key::Down,
            Key::Left,
            Key::Right,
        ];
        for &key in bound.iter() {
            assert!(camera_action(&press(key)).is_some(), "{:?} unbound", key);
        }
    }

    #[test]
    fn test_ignored_events() {
        let release = WindowEvent::Key(Key::W, Action::Release, Modifiers::empty());
        assert_eq!(camera_action(&release), None);
        assert_eq!(camera_action(&press(Key::Q)), None);
        assert_eq!(
            camera_action(&WindowEvent::Scroll(0.0, 0.0, Modifiers::empty())),
            None
        );
    }

    #[test]
    fn test_scroll_moves_along_depth() {
        let scroll = WindowEvent::Scroll(0.0, -2.0, Modifiers::empty());
        assert_eq!(
            camera_action(&scroll),
            Some(CameraAction::Translate(Vector3::new(0.0, 0.0, -2.0)))
        );
    }

    #[test]
    fn test_two_presses_double_the_step() {
        let mut twice = SolarCamera::overlooking();
        let mut once = SolarCamera::overlooking();

        for _ in 0..2 {
            if let Some(action) = camera_action(&press(Key::W)) {
                twice.apply(action);
            }
        }
        once.apply(CameraAction::Translate(Vector3::new(0.0, 0.0, -2.0 * DEPTH_STEP)));

        approx::assert_relative_eq!(twice.view_matrix(), once.view_matrix(), epsilon = 1e-4);
    }
}
