pub mod mesh;
pub mod parametric;
