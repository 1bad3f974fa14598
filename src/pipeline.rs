//! Orchestration: traced paths → equation strings + preview curves.

use std::path::Path;
use std::time::Instant;

use kurbo::{CubicBez, Point};

use crate::bitmap::{self, Bitmap};
use crate::config::PipelineConfig;
use crate::expression::CurveExpression;
use crate::normalize::Normalizer;
use crate::preview::PreviewCurve;
use crate::trace::{BitmapTracer, OutlineTracer, Segment, TraceResult};

/// The two parallel outputs of one image: entry `i` of each describes
/// the same curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveSet {
    pub expressions: Vec<CurveExpression>,
    pub previews: Vec<PreviewCurve>,
}

impl CurveSet {
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    /// True for blank images, fully filtered traces and undecodable input.
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Both outputs or neither.
    fn push(&mut self, curve: CubicBez, config: &PipelineConfig) {
        self.expressions
            .push(CurveExpression::from_cubic(&curve, config.number_format));
        self.previews.push(PreviewCurve(curve));
    }
}

/// Current start point while walking a path, in raw pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cursor(Point);

impl Cursor {
    /// Canonical control points of `seg` starting here.
    fn materialize(&self, seg: &Segment) -> CubicBez {
        seg.to_cubic(self.0)
    }

    /// Move to the segment's raw end. Runs for every segment, admitted or
    /// not, so the next segment starts where this one ended.
    fn advance(&mut self, seg: &Segment) {
        self.0 = seg.end();
    }
}

/// Normalize, filter and emit every segment of `trace`.
pub fn build_curves(trace: &TraceResult, width: u32, height: u32, config: &PipelineConfig) -> CurveSet {
    let normalizer = Normalizer::for_trace(trace, width, height, config.scale);
    let mut out = CurveSet::default();
    let mut rejected = 0usize;

    for path in &trace.paths {
        let mut cursor = Cursor(path.start);
        for seg in &path.segments {
            let curve = normalizer.apply_cubic(cursor.materialize(seg));
            if config.filter.admits(&curve) {
                out.push(curve, config);
            } else {
                rejected += 1;
            }
            cursor.advance(seg);
        }
    }

    log::debug!(
        "Filter      {} admitted, {} rejected (scale {:.4})",
        out.len(),
        rejected,
        normalizer.scale(),
    );
    out
}

/// Trace a bitmap with `tracer` and build its curves.
pub fn process_bitmap(bitmap: &Bitmap, tracer: &dyn BitmapTracer, config: &PipelineConfig) -> CurveSet {
    let trace = tracer.trace(bitmap);
    let (corners, curves) = trace.count_kinds();
    log::debug!(
        "Trace       {} paths \u{2192} {} corners + {} curves",
        trace.paths.len(),
        corners,
        curves,
    );
    build_curves(&trace, bitmap.width(), bitmap.height(), config)
}

/// Full pipeline for one image file with the built-in tracer.
///
/// An image that cannot be decoded yields an empty [`CurveSet`]; callers
/// check [`CurveSet::is_empty`] rather than handling an error.
pub fn process_image(image_path: &Path, config: &PipelineConfig) -> CurveSet {
    let t_start = Instant::now();

    let gray = match bitmap::load_gray(image_path) {
        Ok(gray) => gray,
        Err(e) => {
            log::warn!("{}", e);
            return CurveSet::default();
        }
    };
    let bm = bitmap::threshold(&gray, config.threshold, config.invert);
    log::debug!(
        "Load        {}x{} px, {} foreground",
        bm.width(),
        bm.height(),
        bm.count()
    );

    let tracer = OutlineTracer::new(config.trace);
    let curves = process_bitmap(&bm, &tracer, config);

    log::info!(
        "{}: {} curves ({}ms)",
        image_path.display(),
        curves.len(),
        t_start.elapsed().as_millis(),
    );
    curves
}
