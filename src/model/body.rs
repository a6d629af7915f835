#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

/// How a body's transform is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Sits still at the origin.
    Anchor,
    /// Circles the origin at its own distance. The parent is always an anchor.
    Orbiting(BodyID),
    /// Circles its parent, starting from the parent's orbit frame.
    Satellite(BodyID),
}

impl Role {
    pub fn parent(&self) -> Option<BodyID> {
        match *self {
            Role::Anchor => None,
            Role::Orbiting(id) | Role::Satellite(id) => Some(id),
        }
    }
}

// All the immutable info about a body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInfo {
    pub name: String,
    pub distance: f32,
    // Not really a speed; it's the phase added to elapsed time.
    pub speed: f32,
    pub scale: f32,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub info: BodyInfo,
    pub role: Role,
}
