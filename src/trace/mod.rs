//! Bitmap tracing: binary bitmap → closed paths of corner/cubic segments.
//!
//! The rest of the crate only sees [`TraceResult`] and the
//! [`BitmapTracer`] trait, so any conforming tracer can be swapped in.
//! [`OutlineTracer`] is the built-in implementation:
//!
//! 1. Boundary decomposition on the pixel-corner grid (XOR fill for holes)
//! 2. Polygon approximation (collinear collapse + closed RDP)
//! 3. Alpha-based corner/curve classification

mod decompose;
mod polygon;
mod segments;

use kurbo::{CubicBez, Point};
use rayon::prelude::*;

use crate::bitmap::Bitmap;
use crate::config::TraceParams;

/// One traced segment. The start point is not stored: it is the end of
/// the previous segment (or the path start for the first one).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Two straight edges meeting at `corner`.
    Corner { corner: Point, end: Point },
    /// A cubic Bezier with inner control points `c1`, `c2`.
    Cubic { c1: Point, c2: Point, end: Point },
}

impl Segment {
    /// Raw end point, in the same space as the control points.
    pub fn end(&self) -> Point {
        match *self {
            Segment::Corner { end, .. } | Segment::Cubic { end, .. } => end,
        }
    }

    pub fn is_corner(&self) -> bool {
        matches!(self, Segment::Corner { .. })
    }

    /// Canonical 4-point form. A corner becomes the degenerate cubic
    /// `(start, start, corner, end)`.
    pub fn to_cubic(&self, start: Point) -> CubicBez {
        match *self {
            Segment::Corner { corner, end } => CubicBez::new(start, start, corner, end),
            Segment::Cubic { c1, c2, end } => CubicBez::new(start, c1, c2, end),
        }
    }
}

/// A closed traced outline. `segments.last().end() == start`.
#[derive(Debug, Clone, PartialEq)]
pub struct TracedPath {
    pub start: Point,
    pub segments: Vec<Segment>,
}

impl TracedPath {
    /// Every point of the path: start, then each segment's control points
    /// and end.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        std::iter::once(self.start).chain(self.segments.iter().flat_map(|seg| {
            let pts: Vec<Point> = match *seg {
                Segment::Corner { corner, end } => vec![corner, end],
                Segment::Cubic { c1, c2, end } => vec![c1, c2, end],
            };
            pts
        }))
    }
}

/// Ordered paths in pixel space (y down), produced once per image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceResult {
    pub paths: Vec<TracedPath>,
}

impl TraceResult {
    pub fn segment_count(&self) -> usize {
        self.paths.iter().map(|p| p.segments.len()).sum()
    }

    /// (corners, curves) counts.
    pub fn count_kinds(&self) -> (usize, usize) {
        let corners = self
            .paths
            .iter()
            .flat_map(|p| p.segments.iter())
            .filter(|s| s.is_corner())
            .count();
        (corners, self.segment_count() - corners)
    }
}

/// Anything that turns a bitmap into traced paths.
pub trait BitmapTracer: Sync {
    fn trace(&self, bitmap: &Bitmap) -> TraceResult;
}

/// Built-in potrace-style outline tracer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineTracer {
    pub params: TraceParams,
}

impl OutlineTracer {
    pub fn new(params: TraceParams) -> Self {
        Self { params }
    }
}

impl BitmapTracer for OutlineTracer {
    fn trace(&self, bitmap: &Bitmap) -> TraceResult {
        // Stage 1: outlines on the pixel-corner grid, y down.
        let outlines = decompose::decompose(bitmap, self.params.turd_size);
        let holes = outlines.iter().filter(|o| o.sign < 0).count();
        log::debug!("Decompose   {} outlines ({} holes)", outlines.len(), holes);

        // Stages 2-3 are independent per outline.
        let paths: Vec<TracedPath> = outlines
            .par_iter()
            .filter_map(|outline| {
                let vertices = polygon::approximate(&outline.points, self.params.polygon_epsilon);
                segments::classify(&vertices, self.params.alphamax)
            })
            .collect();

        TraceResult { paths }
    }
}
