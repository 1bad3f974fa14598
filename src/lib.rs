//! img2eq: bitmap image → parametric cubic bezier equations.
//!
//! Traces a thresholded image into closed outlines, moves them into a
//! centered Cartesian frame, drops segments outside the chord-length
//! bounds, and emits each surviving cubic twice: as an `(x(t), y(t))`
//! equation string for an expression plotter, and as control points for
//! preview rendering.
//!
//! # Example
//!
//! ```no_run
//! use img2eq::{process_image, PipelineConfig};
//! use std::path::Path;
//!
//! let config = PipelineConfig::default();
//! let curves = process_image(Path::new("drawing.png"), &config);
//! for expr in &curves.expressions {
//!     println!("{}", expr);
//! }
//! let png = img2eq::render::render_png(&curves.previews, &Default::default())?;
//! # Ok::<(), img2eq::TraceError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod filter;

pub mod batch;
pub mod bitmap;
pub mod error;
pub mod export;
pub mod expression;
pub mod normalize;
pub mod pipeline;
pub mod preview;
pub mod render;
pub mod trace;

// Re-export kurbo so downstream users get the same version
// used by the traced paths and preview curves.
pub use kurbo;

pub use config::{FilterCriteria, NumberFormat, PipelineConfig, ScaleMode, ThresholdMethod, TraceParams};
pub use error::TraceError;
pub use expression::CurveExpression;
pub use filter::chord_length;
pub use pipeline::{build_curves, process_bitmap, process_image, CurveSet};
pub use preview::{PreviewCurve, SAMPLE_COUNT};
pub use trace::{BitmapTracer, OutlineTracer, Segment, TraceResult, TracedPath};
