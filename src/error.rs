use thiserror::Error;

use crate::model::BodyID;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read bodies file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("body {child:?} refers to unknown parent {parent:?}")]
    UnknownParent { child: String, parent: String },

    #[error("parent {parent:?} of body {child:?} is not in this system")]
    MissingParentID { child: String, parent: BodyID },

    #[error("body {0:?} is defined twice")]
    DuplicateName(String),

    #[error("body {name:?}: {message}")]
    InvalidParameter { name: String, message: String },

    #[error("system has no anchor body")]
    NoAnchor,

    #[error("--{flag}: {message}")]
    InvalidArgument {
        flag: &'static str,
        message: String,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MeshError {
    #[error("mesh has no triangles")]
    Empty,

    #[error("mesh has {0} vertices, more than a 16-bit index can address")]
    TooManyVertices(usize),

    #[error("index {index} is out of range for {num_vertices} vertices")]
    IndexOutOfRange { index: usize, num_vertices: usize },

    #[error("mesh has {positions} positions but {normals} normals")]
    AttributeMismatch { positions: usize, normals: usize },
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("shader program {program:?} has no uniform {name:?}")]
    MissingUniform {
        program: &'static str,
        name: &'static str,
    },

    #[error("shader program {program:?} has no attribute {name:?}")]
    MissingAttribute {
        program: &'static str,
        name: &'static str,
    },

    #[error("could not build mesh for {body:?}: {source}")]
    Mesh {
        body: String,
        #[source]
        source: MeshError,
    },
}
