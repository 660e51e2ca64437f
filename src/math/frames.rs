use glam::{Quat, Vec3};

use super::catmull_rom::{ArcLengthTable, CatmullRomCurve};

const EPSILON: f32 = 1e-10;

/// Tangent components closer than this count as equal when picking the seed axis
const AXIS_TIE: f32 = 1e-6;

/// Orthonormal frame at one curve sample; `binormal = tangent × normal`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub position: Vec3,
    pub tangent: Vec3,
    pub normal: Vec3,
    pub binormal: Vec3,
}

/// Rotation-minimizing frames along a closed, sampled curve.
///
/// Normals are carried from sample to sample with the double reflection
/// method (Wang et al. 2008). Whatever rotation is left between the first
/// and last normal once the loop is walked gets spread evenly over the
/// samples, so the frames meet again at the seam without a flip.
#[derive(Debug, Clone)]
pub struct FrameSet {
    frames: Vec<Frame>,
    closure_twist: f32,
}

impl FrameSet {
    /// Frames at `samples + 1` points evenly spaced in arc length; the last
    /// sample coincides with the first.
    pub fn along_curve(curve: &CatmullRomCurve, table: &ArcLengthTable, samples: usize) -> Self {
        let parameters = table.spaced_parameters(samples);
        let positions: Vec<Vec3> = parameters.iter().map(|&t| curve.point(t)).collect();
        let tangents: Vec<Vec3> = parameters.iter().map(|&t| curve.tangent(t)).collect();

        Self::closed(&positions, &tangents)
    }

    /// Build frames from explicit positions and unit tangents
    pub fn closed(positions: &[Vec3], tangents: &[Vec3]) -> Self {
        debug_assert_eq!(positions.len(), tangents.len());
        let n = positions.len();
        if n == 0 {
            return Self {
                frames: Vec::new(),
                closure_twist: 0.0,
            };
        }

        let mut normals = Vec::with_capacity(n);
        normals.push(initial_normal(tangents[0]));

        for i in 0..n - 1 {
            let next = double_reflection(
                positions[i],
                positions[i + 1],
                tangents[i],
                tangents[i + 1],
                normals[i],
            );
            normals.push(next);
        }

        let last = n - 1;
        let mut closure_twist = 0.0;
        if last > 0 {
            closure_twist = normals[0].dot(normals[last]).clamp(-1.0, 1.0).acos();
            if tangents[0].dot(normals[0].cross(normals[last])) > 0.0 {
                closure_twist = -closure_twist;
            }

            let step = closure_twist / last as f32;
            for (i, normal) in normals.iter_mut().enumerate().skip(1) {
                let rotation = Quat::from_axis_angle(tangents[i], step * i as f32);
                *normal = (rotation * *normal).normalize();
            }
        }

        let frames = positions
            .iter()
            .zip(tangents)
            .zip(normals)
            .map(|((&position, &tangent), normal)| Frame {
                position,
                tangent,
                normal,
                binormal: tangent.cross(normal).normalize(),
            })
            .collect();

        Self {
            frames,
            closure_twist,
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Signed angle removed at the seam, in radians
    pub fn closure_twist(&self) -> f32 {
        self.closure_twist
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }
}

/// First normal: `tangent × (tangent × axis)` for the world axis least
/// aligned with the tangent. Ties go to the later axis, so a tangent along X
/// in the XZ plane seeds from Z.
///
/// For a loop hugging the unit sphere this keeps the first normal close to
/// the surface normal, which leaves the binormal (the ribbon's width
/// direction) tangent to the sphere.
fn initial_normal(tangent: Vec3) -> Vec3 {
    let abs = tangent.abs();
    let mut axis = Vec3::X;
    let mut min = abs.x;
    if abs.y <= min + AXIS_TIE {
        min = abs.y;
        axis = Vec3::Y;
    }
    if abs.z <= min + AXIS_TIE {
        axis = Vec3::Z;
    }

    let side = tangent.cross(axis).normalize();
    tangent.cross(side)
}

fn double_reflection(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3, r0: Vec3) -> Vec3 {
    let v1 = x1 - x0;
    let c1 = v1.dot(v1);
    if c1 < EPSILON {
        return reorthogonalize(r0, t1);
    }

    let r_l = r0 - v1 * (2.0 / c1 * v1.dot(r0));
    let t_l = t0 - v1 * (2.0 / c1 * v1.dot(t0));

    let v2 = t1 - t_l;
    let c2 = v2.dot(v2);
    let r1 = if c2 < EPSILON {
        r_l
    } else {
        r_l - v2 * (2.0 / c2 * v2.dot(r_l))
    };

    reorthogonalize(r1, t1)
}

/// Gram-Schmidt `r` against unit `t`
fn reorthogonalize(r: Vec3, t: Vec3) -> Vec3 {
    (r - t * r.dot(t))
        .try_normalize()
        .unwrap_or_else(|| initial_normal(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_normal_seeds_from_least_aligned_axis() {
        assert!((initial_normal(Vec3::X) - Vec3::NEG_Z).length() < 1e-6);

        // Float noise in z must not flip the seed to Y
        let n = initial_normal(Vec3::new(1.0, 0.0, 1e-8).normalize());
        assert!((n - Vec3::NEG_Z).length() < 1e-6);

        // Smallest component is y
        let t = Vec3::new(1.0, 0.05, 0.3).normalize();
        let n = initial_normal(t);
        assert!(n.y.abs() > 0.9);
    }

    #[test]
    fn test_initial_normal_on_tilted_equator_tangent() {
        // A tangent close to +X with a small vertical component, as at the
        // first sample of a jittered equatorial loop, still seeds near -Z
        let t = Vec3::new(0.97, 0.2, 0.02).normalize();
        let n = initial_normal(t);
        assert!(n.z < -0.95);
        assert!(t.cross(n).y > 0.95);
    }

    #[test]
    fn test_initial_normal_is_perpendicular() {
        let t = Vec3::new(1.0, 0.2, 0.0).normalize();
        let n = initial_normal(t);
        assert!(n.dot(t).abs() < 1e-6);
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_double_reflection_straight_line_keeps_normal() {
        let r = double_reflection(Vec3::ZERO, Vec3::X, Vec3::X, Vec3::X, Vec3::Y);
        assert!((r - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_double_reflection_planar_turn_stays_in_plane() {
        let t0 = Vec3::X;
        let t1 = Vec3::new(1.0, 0.0, -1.0).normalize();
        let r = double_reflection(Vec3::ZERO, Vec3::new(1.0, 0.0, -0.5), t0, t1, Vec3::NEG_Z);
        assert!(r.y.abs() < 1e-6);
        assert!(r.dot(t1).abs() < 1e-6);
    }

    #[test]
    fn test_empty_frame_set() {
        let set = FrameSet::closed(&[], &[]);
        assert!(set.is_empty());
        assert_eq!(set.closure_twist(), 0.0);
    }
}
