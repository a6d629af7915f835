use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Background stars, scattered uniformly through a cube centered on the origin.
#[derive(Debug, Clone)]
pub struct StarField {
    positions: Vec<Point3<f32>>,
}

impl StarField {
    pub fn generate(count: usize, extent: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let extent = extent.abs();

        let positions = (0..count)
            .map(|_| {
                if extent == 0.0 {
                    return Point3::origin();
                }
                Point3::new(
                    rng.gen_range(-extent..=extent),
                    rng.gen_range(-extent..=extent),
                    rng.gen_range(-extent..=extent),
                )
            })
            .collect();

        StarField { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    pub fn into_positions(self) -> Vec<Point3<f32>> {
        self.positions
    }
}
