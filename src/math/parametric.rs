/// Evenly spaced samples from `t_start` to `t_end`, both ends included.
pub fn subdivide<S>(t_start: S, t_end: S, num_segments: usize) -> impl Iterator<Item = S>
where
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    assert!(
        num_segments >= 1,
        "Must have at least one segment, num_segments was {}",
        num_segments
    );
    let convert = nalgebra::convert::<usize, S>;
    (0..=num_segments)
        .map(move |i| convert(i) / convert(num_segments))
        // u ranges from 0 to 1 (inclusive)
        .map(move |u| t_start + u * (t_end - t_start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdivide() {
        let samples: Vec<f32> = subdivide(0.0, 2.0, 4).collect();
        assert_eq!(samples.len(), 5);
        for (actual, expected) in samples.iter().zip(&[0.0, 0.5, 1.0, 1.5, 2.0]) {
            approx::assert_relative_eq!(actual, expected);
        }

        let samples: Vec<f64> = subdivide(1.0, -1.0, 1).collect();
        assert_eq!(samples, vec![1.0, -1.0]);
    }
}
