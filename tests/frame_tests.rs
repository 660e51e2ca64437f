use rand::{rngs::StdRng, Rng, SeedableRng};
use ribbon_sketch::math::{CatmullRomCurve, CurveType, FrameSet};
use ribbon_sketch::ribbon::{control_points, FixedPerturbations};

fn frames_for(offsets: Vec<f32>, samples: usize) -> FrameSet {
    let count = offsets.len();
    let points = control_points(count, &mut FixedPerturbations::new(offsets)).unwrap();
    let curve = CatmullRomCurve::closed(points, CurveType::CatmullRom { tension: 0.7 }).unwrap();
    let table = curve.arc_length_table(200);
    FrameSet::along_curve(&curve, &table, samples)
}

fn random_offsets(seed: u64, count: usize) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| 0.5 * (rng.gen::<f32>() - 0.5)).collect()
}

#[cfg(test)]
mod frame_tests {
    use super::*;

    #[test]
    fn test_frames_are_orthonormal() {
        let frames = frames_for(random_offsets(1, 7), 500);
        assert_eq!(frames.len(), 501);

        for frame in frames.iter() {
            assert!((frame.tangent.length() - 1.0).abs() < 1e-4);
            assert!((frame.normal.length() - 1.0).abs() < 1e-4);
            assert!((frame.binormal.length() - 1.0).abs() < 1e-4);
            assert!(frame.tangent.dot(frame.normal).abs() < 1e-4);
            assert!(frame.tangent.dot(frame.binormal).abs() < 1e-4);
            assert!(frame.normal.dot(frame.binormal).abs() < 1e-4);
        }
    }

    #[test]
    fn test_frames_are_right_handed() {
        let frames = frames_for(random_offsets(2, 7), 200);
        for frame in frames.iter() {
            let b = frame.tangent.cross(frame.normal);
            assert!((b - frame.binormal).length() < 1e-4);
        }
    }

    #[test]
    fn test_frames_vary_continuously() {
        let frames = frames_for(random_offsets(3, 7), 1000);
        for pair in frames.frames().windows(2) {
            assert!(pair[0].normal.dot(pair[1].normal) > 0.99);
            assert!(pair[0].binormal.dot(pair[1].binormal) > 0.99);
        }
    }

    #[test]
    fn test_frames_close_at_seam() {
        for seed in 0..5 {
            let frames = frames_for(random_offsets(seed, 7), 400);
            let first = frames.frames()[0];
            let last = frames.frames()[frames.len() - 1];

            assert!((first.position - last.position).length() < 1e-6);
            assert!((first.normal - last.normal).length() < 1e-3, "seed {seed}");
            assert!((first.binormal - last.binormal).length() < 1e-3, "seed {seed}");
        }
    }

    #[test]
    fn test_planar_loop_has_no_twist() {
        let frames = frames_for(vec![0.0; 6], 120);
        assert!(frames.closure_twist().abs() < 1e-3);
        for frame in frames.iter() {
            assert!(frame.normal.y.abs() < 1e-4);
            assert!((frame.binormal.y - 1.0).abs() < 1e-4);
        }
    }
}
