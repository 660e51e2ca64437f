//! Ribbon geometry: a closed band wrapped around the unit sphere.
//!
//! Construction runs once per scene:
//!
//! 1. control points on the unit sphere, polar angle jittered around the equator
//! 2. closed Catmull-Rom spline through them
//! 3. `samples + 1` points spaced evenly by arc length, each with a
//!    rotation-minimizing frame
//! 4. two edge bands offset by `∓half_width` along the binormal, pushed back
//!    onto the unit sphere
//! 5. seam closed by copying the last vertex of each band over the first
//!
//! The index buffer follows a `samples × 1` plane grid and is emitted twice,
//! once per winding, so each face of the band gets its own material.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};
use thiserror::Error;

use crate::math::{from_spherical, CatmullRomCurve, CurveType, FrameSet};

pub const DEFAULT_CONTROL_POINTS: usize = 7;
pub const DEFAULT_SAMPLES: usize = 1000;
pub const DEFAULT_HALF_WIDTH: f32 = 0.2;
pub const DEFAULT_POLAR_JITTER: f32 = 0.5;
pub const DEFAULT_ARC_LENGTH_DIVISIONS: usize = 200;

#[derive(Debug, Error, PartialEq)]
pub enum RibbonError {
    #[error("a closed ribbon needs at least 3 control points, got {0}")]
    TooFewControlPoints(usize),
    #[error("a ribbon needs at least 1 sample, got {0}")]
    TooFewSamples(usize),
    #[error("half width must be finite and non-negative, got {0}")]
    InvalidHalfWidth(f32),
    #[error("perturbation source ran out after {0} values")]
    PerturbationsExhausted(usize),
}

/// Supplies the polar-angle offset (radians) for each control point
pub trait PerturbationSource {
    fn next_offset(&mut self) -> Option<f32>;
}

/// Offsets drawn uniformly from `[-jitter / 2, jitter / 2)`
#[derive(Debug, Clone)]
pub struct RandomPerturbations<R: Rng> {
    rng: R,
    jitter: f32,
}

impl<R: Rng> RandomPerturbations<R> {
    pub fn new(rng: R, jitter: f32) -> Self {
        Self { rng, jitter }
    }
}

impl<R: Rng> PerturbationSource for RandomPerturbations<R> {
    fn next_offset(&mut self) -> Option<f32> {
        Some(self.jitter * (self.rng.gen::<f32>() - 0.5))
    }
}

/// Pre-sampled offsets, consumed in order
#[derive(Debug, Clone, Default)]
pub struct FixedPerturbations {
    offsets: Vec<f32>,
    cursor: usize,
}

impl FixedPerturbations {
    pub fn new(offsets: Vec<f32>) -> Self {
        Self { offsets, cursor: 0 }
    }

    /// Every control point exactly on the equator
    pub fn zero(count: usize) -> Self {
        Self::new(vec![0.0; count])
    }
}

impl PerturbationSource for FixedPerturbations {
    fn next_offset(&mut self) -> Option<f32> {
        let offset = self.offsets.get(self.cursor).copied();
        if offset.is_some() {
            self.cursor += 1;
        }
        offset
    }
}

/// Shape parameters for [`build_ribbon`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonParams {
    pub control_points: usize,
    pub samples: usize,
    pub half_width: f32,
    pub curve_type: CurveType,
    pub arc_length_divisions: usize,
}

impl Default for RibbonParams {
    fn default() -> Self {
        Self {
            control_points: DEFAULT_CONTROL_POINTS,
            samples: DEFAULT_SAMPLES,
            half_width: DEFAULT_HALF_WIDTH,
            curve_type: CurveType::Centripetal,
            arc_length_divisions: DEFAULT_ARC_LENGTH_DIVISIONS,
        }
    }
}

impl RibbonParams {
    pub fn validate(&self) -> Result<(), RibbonError> {
        if self.control_points < 3 {
            return Err(RibbonError::TooFewControlPoints(self.control_points));
        }
        if self.samples < 1 {
            return Err(RibbonError::TooFewSamples(self.samples));
        }
        if !self.half_width.is_finite() || self.half_width < 0.0 {
            return Err(RibbonError::InvalidHalfWidth(self.half_width));
        }
        Ok(())
    }
}

/// Which material a triangle group is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialSlot {
    Front = 0,
    Back = 1,
}

/// Contiguous range of the index buffer drawn with one material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialGroup {
    pub start: u32,
    pub count: u32,
    pub slot: MaterialSlot,
}

impl MaterialGroup {
    pub fn range(&self) -> std::ops::Range<u32> {
        self.start..self.start + self.count
    }
}

/// CPU-side ribbon buffers, ready for upload
#[derive(Debug, Clone)]
pub struct RibbonMesh {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
    pub groups: [MaterialGroup; 2],
    samples: usize,
}

impl RibbonMesh {
    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Everything produced while building the ribbon
#[derive(Debug, Clone)]
pub struct Ribbon {
    pub curve: CatmullRomCurve,
    pub frames: FrameSet,
    pub mesh: RibbonMesh,
}

/// `count` points on the unit sphere, azimuth evenly spaced over a full turn,
/// polar angle `π/2` plus one offset from `source` per point
pub fn control_points<S>(count: usize, source: &mut S) -> Result<Vec<Vec3>, RibbonError>
where
    S: PerturbationSource + ?Sized,
{
    (0..count)
        .map(|i| {
            let offset = source
                .next_offset()
                .ok_or(RibbonError::PerturbationsExhausted(i))?;
            let theta = i as f32 / count as f32 * TAU;
            Ok(from_spherical(1.0, FRAC_PI_2 + offset, theta))
        })
        .collect()
}

/// Build the full ribbon, drawing control point perturbations from `source`
pub fn build_ribbon<S>(params: &RibbonParams, source: &mut S) -> Result<Ribbon, RibbonError>
where
    S: PerturbationSource + ?Sized,
{
    params.validate()?;
    let points = control_points(params.control_points, source)?;
    ribbon_through(points, params)
}

/// Build the ribbon through explicit control points
pub fn ribbon_through(points: Vec<Vec3>, params: &RibbonParams) -> Result<Ribbon, RibbonError> {
    params.validate()?;
    let count = points.len();
    if count < 3 {
        return Err(RibbonError::TooFewControlPoints(count));
    }

    let curve = CatmullRomCurve::closed(points, params.curve_type)
        .ok_or(RibbonError::TooFewControlPoints(count))?;
    let table = curve.arc_length_table(params.arc_length_divisions);
    let frames = FrameSet::along_curve(&curve, &table, params.samples);

    let positions = edge_vertices(&frames, params.half_width);
    let uvs = grid_uvs(params.samples);
    let (indices, groups) = grid_indices(params.samples);

    log::debug!(
        "ribbon: {} control points, {} samples, length {:.3}, seam twist {:.4} rad",
        curve.control_points().len(),
        params.samples,
        table.total_length(),
        frames.closure_twist()
    );

    Ok(Ribbon {
        curve,
        frames,
        mesh: RibbonMesh {
            positions,
            uvs,
            indices,
            groups,
            samples: params.samples,
        },
    })
}

/// Offset every frame position by `-half_width` then `+half_width` along its
/// binormal, normalize onto the unit sphere, and alias the seam.
pub fn edge_vertices(frames: &FrameSet, half_width: f32) -> Vec<Vec3> {
    let count = frames.len();
    let mut vertices = Vec::with_capacity(count * 2);

    for offset in [-half_width, half_width] {
        vertices.extend(
            frames
                .iter()
                .map(|frame| (frame.position + frame.binormal * offset).normalize()),
        );
    }

    if count > 1 {
        let m = count - 1;
        vertices[0] = vertices[m];
        vertices[m + 1] = vertices[2 * m + 1];
    }

    vertices
}

/// Plane-grid texture coordinates: `u` runs along the band, `v` is 1 on the
/// first band and 0 on the second
pub fn grid_uvs(samples: usize) -> Vec<Vec2> {
    [1.0, 0.0]
        .into_iter()
        .flat_map(|v| (0..=samples).map(move |i| Vec2::new(i as f32 / samples as f32, v)))
        .collect()
}

/// Triangles of the `samples × 1` grid, back-to-back in both windings.
///
/// Group 0 (front material) is the reversed winding and covers `[0, 6M)`;
/// group 1 (back material) is the grid's own winding and covers `[6M, 12M)`.
pub fn grid_indices(samples: usize) -> (Vec<u32>, [MaterialGroup; 2]) {
    let row = samples as u32 + 1;
    let quads = (0..samples as u32).map(move |ix| {
        let a = ix;
        let b = ix + row;
        let c = ix + 1 + row;
        let d = ix + 1;
        (a, b, c, d)
    });

    let per_side = samples * 6;
    let mut indices = Vec::with_capacity(per_side * 2);
    for (a, b, c, d) in quads.clone() {
        indices.extend_from_slice(&[a, d, b, b, d, c]);
    }
    for (a, b, c, d) in quads {
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    let per_side = per_side as u32;
    let groups = [
        MaterialGroup {
            start: 0,
            count: per_side,
            slot: MaterialSlot::Front,
        },
        MaterialGroup {
            start: per_side,
            count: per_side,
            slot: MaterialSlot::Back,
        },
    ];

    (indices, groups)
}
