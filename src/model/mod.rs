use std::collections::HashMap;

use crate::error::ConfigError;

mod body;
mod frame;
mod stars;
mod transform;

pub use body::{Body, BodyID, BodyInfo, Role};
pub use frame::{DrawCommand, FramePlan};
pub use stars::StarField;
pub use transform::{
    normal_matrix, orbit_frame, BodyTransform, SatelliteParams, TransformEvaluator,
    TransformSettings, ORBIT_DEPTH_OFFSET,
};

/// Arena of bodies. A body's parent is always added before the body itself, so
/// walking the arena in order visits parents before children.
#[derive(Debug, Clone, Default)]
pub struct SolarSystem {
    bodies: Vec<Body>,
    name_to_id: HashMap<String, BodyID>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter()
    }

    pub fn get_body(&self, id: BodyID) -> &Body {
        &self.bodies[id.0]
    }

    pub fn find(&self, name: &str) -> Option<BodyID> {
        self.name_to_id.get(name).copied()
    }

    pub fn anchors(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter().filter(|b| b.role == Role::Anchor)
    }

    pub fn add_anchor(&mut self, info: BodyInfo) -> Result<BodyID, ConfigError> {
        self.insert_new_body(info, Role::Anchor)
    }

    pub fn add_orbiting(&mut self, info: BodyInfo, parent: BodyID) -> Result<BodyID, ConfigError> {
        self.check_parent(&info, parent)?;
        let parent_body = self.get_body(parent);
        if parent_body.role != Role::Anchor {
            return Err(ConfigError::InvalidParameter {
                message: format!("orbits {}, which is not an anchor", parent_body.info.name),
                name: info.name,
            });
        }
        self.insert_new_body(info, Role::Orbiting(parent))
    }

    pub fn add_satellite(
        &mut self,
        info: BodyInfo,
        parent: BodyID,
    ) -> Result<BodyID, ConfigError> {
        self.check_parent(&info, parent)?;
        self.insert_new_body(info, Role::Satellite(parent))
    }

    /// Adds a body under `parent`, picking its role from the parent's: children
    /// of an anchor orbit the origin, anything else becomes a satellite.
    pub fn add_child(&mut self, info: BodyInfo, parent: BodyID) -> Result<BodyID, ConfigError> {
        self.check_parent(&info, parent)?;
        match self.get_body(parent).role {
            Role::Anchor => self.add_orbiting(info, parent),
            _ => self.add_satellite(info, parent),
        }
    }

    fn check_parent(&self, info: &BodyInfo, parent: BodyID) -> Result<(), ConfigError> {
        if parent.0 < self.bodies.len() {
            Ok(())
        } else {
            Err(ConfigError::MissingParentID {
                child: info.name.clone(),
                parent,
            })
        }
    }

    fn insert_new_body(&mut self, info: BodyInfo, role: Role) -> Result<BodyID, ConfigError> {
        validate_info(&info)?;
        if self.name_to_id.contains_key(&info.name) {
            return Err(ConfigError::DuplicateName(info.name));
        }

        let id = BodyID(self.bodies.len());
        self.name_to_id.insert(info.name.clone(), id);
        self.bodies.push(Body { id, info, role });
        Ok(id)
    }
}

fn validate_info(info: &BodyInfo) -> Result<(), ConfigError> {
    let invalid = |message: &str| ConfigError::InvalidParameter {
        name: info.name.clone(),
        message: message.to_owned(),
    };

    if info.name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if !(info.distance.is_finite() && info.speed.is_finite() && info.scale.is_finite()) {
        return Err(invalid("parameters must be finite"));
    }
    // A zero scale would leave the normal matrix without an inverse.
    if info.scale <= 0.0 {
        return Err(invalid("scale must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, distance: f32, speed: f32, scale: f32) -> BodyInfo {
        BodyInfo {
            name: name.to_owned(),
            distance,
            speed,
            scale,
        }
    }

    #[test]
    fn test_roles_from_parent() {
        let mut system = SolarSystem::new();
        let sun = system.add_anchor(info("Sun", 0.0, 0.0, 1.5)).unwrap();
        let earth = system.add_child(info("Earth", 9.0, 2.0, 0.5), sun).unwrap();
        let moon = system.add_child(info("Moon", 1.5, 0.0, 0.3), earth).unwrap();

        assert_eq!(system.get_body(sun).role, Role::Anchor);
        assert_eq!(system.get_body(earth).role, Role::Orbiting(sun));
        assert_eq!(system.get_body(moon).role, Role::Satellite(earth));
        assert_eq!(system.find("Moon"), Some(moon));
        assert_eq!(system.anchors().count(), 1);
    }

    #[test]
    fn test_rejects_bad_bodies() {
        let mut system = SolarSystem::new();
        let sun = system.add_anchor(info("Sun", 0.0, 0.0, 1.5)).unwrap();

        assert!(matches!(
            system.add_anchor(info("Sun", 0.0, 0.0, 1.0)),
            Err(ConfigError::DuplicateName(_))
        ));
        assert!(matches!(
            system.add_orbiting(info("Flat", 1.0, 0.0, 0.0), sun),
            Err(ConfigError::InvalidParameter { .. })
        ));
        assert!(matches!(
            system.add_satellite(info("Lost", 1.0, 0.0, 1.0), BodyID(7)),
            Err(ConfigError::MissingParentID { .. })
        ));

        // Only anchors can be orbited directly; everything else takes satellites
        let earth = system.add_orbiting(info("Earth", 9.0, 2.0, 0.5), sun).unwrap();
        assert!(matches!(
            system.add_orbiting(info("Moon", 1.5, 0.0, 0.3), earth),
            Err(ConfigError::InvalidParameter { .. })
        ));
        assert_eq!(system.len(), 2);
    }
}
