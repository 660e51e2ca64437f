use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Parameterization of the Catmull-Rom segments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurveType {
    /// Uniform knots, tangents scaled by `tension`
    CatmullRom { tension: f32 },
    /// Knot spacing = distance^0.5
    Centripetal,
    /// Knot spacing = distance
    Chordal,
}

/// Cubic `c0 + c1 w + c2 w^2 + c3 w^3` in Hermite form
#[derive(Debug, Clone, Copy)]
struct Cubic {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl Cubic {
    fn hermite(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    fn uniform(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, tension: f32) -> Self {
        Self::hermite(p1, p2, tension * (p2 - p0), tension * (p3 - p1))
    }

    fn non_uniform(
        p0: Vec3,
        p1: Vec3,
        p2: Vec3,
        p3: Vec3,
        dt0: f32,
        dt1: f32,
        dt2: f32,
    ) -> Self {
        let t1 = (p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1;
        let t2 = (p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2;
        Self::hermite(p1, p2, t1 * dt1, t2 * dt1)
    }

    fn eval(&self, w: f32) -> Vec3 {
        self.c0 + w * (self.c1 + w * (self.c2 + w * self.c3))
    }

    fn derivative(&self, w: f32) -> Vec3 {
        self.c1 + w * (2.0 * self.c2 + 3.0 * w * self.c3)
    }
}

/// Closed Catmull-Rom spline through a ring of control points.
///
/// The global parameter `t` runs over `[0, 1]`, each segment taking an equal
/// share. `t = 0` and `t = 1` evaluate the same segment at the same weight, so
/// the loop closes exactly.
#[derive(Debug, Clone)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    curve_type: CurveType,
    segments: Vec<Cubic>,
}

impl CatmullRomCurve {
    /// Returns `None` when fewer than two control points are given
    pub fn closed(points: Vec<Vec3>, curve_type: CurveType) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }

        let l = points.len();
        let segments = (0..l)
            .map(|i| {
                let p0 = points[(i + l - 1) % l];
                let p1 = points[i];
                let p2 = points[(i + 1) % l];
                let p3 = points[(i + 2) % l];
                Self::segment(p0, p1, p2, p3, curve_type)
            })
            .collect();

        Some(Self {
            points,
            curve_type,
            segments,
        })
    }

    fn segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, curve_type: CurveType) -> Cubic {
        let exponent = match curve_type {
            CurveType::CatmullRom { tension } => return Cubic::uniform(p0, p1, p2, p3, tension),
            CurveType::Centripetal => 0.25,
            CurveType::Chordal => 0.5,
        };

        // Knot intervals from squared distances; coincident points fall back
        // to the middle interval.
        let mut dt0 = p0.distance_squared(p1).powf(exponent);
        let mut dt1 = p1.distance_squared(p2).powf(exponent);
        let mut dt2 = p2.distance_squared(p3).powf(exponent);
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }
        Cubic::non_uniform(p0, p1, p2, p3, dt0, dt1, dt2)
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn curve_type(&self) -> CurveType {
        self.curve_type
    }

    /// Segment index and local weight for global parameter `t`
    fn locate(&self, t: f32) -> (usize, f32) {
        let l = self.segments.len();
        let p = l as f32 * t;
        let whole = p.floor();
        let weight = p - whole;
        let index = (whole as i64).rem_euclid(l as i64) as usize;
        (index, weight)
    }

    pub fn point(&self, t: f32) -> Vec3 {
        let (i, w) = self.locate(t);
        self.segments[i].eval(w)
    }

    /// dP/dt
    pub fn derivative(&self, t: f32) -> Vec3 {
        let (i, w) = self.locate(t);
        self.segments[i].derivative(w) * self.segments.len() as f32
    }

    /// Unit tangent at `t`. Falls back to a central difference where the
    /// analytic derivative vanishes.
    pub fn tangent(&self, t: f32) -> Vec3 {
        if let Some(tangent) = self.derivative(t).try_normalize() {
            return tangent;
        }
        let delta = 1e-4;
        (self.point(t + delta) - self.point(t - delta))
            .try_normalize()
            .unwrap_or(Vec3::X)
    }

    pub fn arc_length_table(&self, divisions: usize) -> ArcLengthTable {
        ArcLengthTable::new(self, divisions)
    }
}

/// Cumulative chord lengths of a curve sampled at `divisions + 1` uniform
/// parameter values, used to map normalized arc length back to `t`.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    lengths: Vec<f32>,
}

impl ArcLengthTable {
    pub fn new(curve: &CatmullRomCurve, divisions: usize) -> Self {
        let divisions = divisions.max(1);
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = curve.point(0.0);
        let mut sum = 0.0;
        lengths.push(sum);

        for p in 1..=divisions {
            let current = curve.point(p as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }

        Self { lengths }
    }

    pub fn total_length(&self) -> f32 {
        self.lengths[self.lengths.len() - 1]
    }

    pub fn divisions(&self) -> usize {
        self.lengths.len() - 1
    }

    /// Curve parameter at which the travelled length is `u * total_length`
    pub fn u_to_t(&self, u: f32) -> f32 {
        let n = self.lengths.len();
        let target = u.clamp(0.0, 1.0) * self.total_length();

        // Last entry not greater than the target
        let i = self
            .lengths
            .partition_point(|&length| length <= target)
            .saturating_sub(1)
            .min(n - 1);

        if self.lengths[i] == target || i == n - 1 {
            return i as f32 / (n - 1) as f32;
        }

        let before = self.lengths[i];
        let segment = self.lengths[i + 1] - before;
        let fraction = if segment > 0.0 {
            (target - before) / segment
        } else {
            0.0
        };

        (i as f32 + fraction) / (n - 1) as f32
    }

    /// Parameters for `samples + 1` points evenly spaced in arc length
    pub fn spaced_parameters(&self, samples: usize) -> Vec<f32> {
        (0..=samples)
            .map(|i| self.u_to_t(i as f32 / samples as f32))
            .collect()
    }
}
