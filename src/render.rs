//! Raster preview of sampled curves.
//!
//! Strokes each curve's polyline with tiny-skia onto a white canvas,
//! fitted with equal x/y scale, and encodes the result as PNG.

use kurbo::{Point, Rect};

use crate::error::TraceError;
use crate::preview::{PreviewCurve, SAMPLE_COUNT};

/// Ten-colour category palette, cycled per curve.
const PALETTE: [(u8, u8, u8); 10] = [
    (0x1f, 0x77, 0xb4),
    (0xff, 0x7f, 0x0e),
    (0x2c, 0xa0, 0x2c),
    (0xd6, 0x27, 0x28),
    (0x94, 0x67, 0xbd),
    (0x8c, 0x56, 0x4b),
    (0xe3, 0x77, 0xc2),
    (0x7f, 0x7f, 0x7f),
    (0xbc, 0xbd, 0x22),
    (0x17, 0xbe, 0xcf),
];

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    /// Blank border in pixels.
    pub margin: f64,
    pub stroke_width: f32,
    /// Samples per curve.
    pub samples: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            margin: 8.0,
            stroke_width: 1.0,
            samples: SAMPLE_COUNT,
        }
    }
}

/// Render previews to PNG bytes. No curves → a blank canvas.
pub fn render_png(previews: &[PreviewCurve], options: &RenderOptions) -> Result<Vec<u8>, TraceError> {
    let mut pixmap = tiny_skia::Pixmap::new(options.width, options.height).ok_or_else(|| {
        TraceError::Render(format!("invalid canvas size {}x{}", options.width, options.height))
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let polylines: Vec<Vec<Point>> = previews
        .iter()
        .map(|c| c.samples(options.samples).points().collect())
        .collect();

    if let Some(bounds) = bounds(&polylines) {
        let to_canvas = fit(bounds, options);
        let stroke = tiny_skia::Stroke {
            width: options.stroke_width,
            ..tiny_skia::Stroke::default()
        };
        for (i, line) in polylines.iter().enumerate() {
            let Some(path) = polyline_path(line, &to_canvas) else {
                continue;
            };
            let (r, g, b) = PALETTE[i % PALETTE.len()];
            let mut paint = tiny_skia::Paint::default();
            paint.set_color_rgba8(r, g, b, 255);
            paint.anti_alias = true;
            pixmap.stroke_path(&path, &paint, &stroke, tiny_skia::Transform::identity(), None);
        }
    }

    encode_png(&pixmap)
}

/// Bounding box of every sample, `None` when there are none.
fn bounds(polylines: &[Vec<Point>]) -> Option<Rect> {
    let mut points = polylines.iter().flatten();
    let first = *points.next()?;
    Some(points.fold(Rect::from_points(first, first), |r, &p| r.union_pt(p)))
}

/// Map normalized space (y up) onto the canvas (y down), centered, with
/// one scale for both axes.
fn fit(bounds: Rect, options: &RenderOptions) -> impl Fn(Point) -> (f32, f32) {
    let avail_w = (options.width as f64 - 2.0 * options.margin).max(1.0);
    let avail_h = (options.height as f64 - 2.0 * options.margin).max(1.0);
    let scale = match (bounds.width() > 0.0, bounds.height() > 0.0) {
        (true, true) => (avail_w / bounds.width()).min(avail_h / bounds.height()),
        (true, false) => avail_w / bounds.width(),
        (false, true) => avail_h / bounds.height(),
        (false, false) => 1.0,
    };
    let ox = (options.width as f64 - bounds.width() * scale) / 2.0;
    let oy = (options.height as f64 - bounds.height() * scale) / 2.0;
    move |p: Point| {
        (
            (ox + (p.x - bounds.x0) * scale) as f32,
            (oy + (bounds.y1 - p.y) * scale) as f32,
        )
    }
}

fn polyline_path(line: &[Point], to_canvas: &impl Fn(Point) -> (f32, f32)) -> Option<tiny_skia::Path> {
    let (first, rest) = line.split_first()?;
    let mut pb = tiny_skia::PathBuilder::new();
    let (x, y) = to_canvas(*first);
    pb.move_to(x, y);
    for p in rest {
        let (x, y) = to_canvas(*p);
        pb.line_to(x, y);
    }
    pb.finish()
}

fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, TraceError> {
    let mut buf = Vec::new();
    let mut encoder = png::Encoder::new(&mut buf, pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| TraceError::Render(e.to_string()))?;
    writer
        .write_image_data(pixmap.data())
        .map_err(|e| TraceError::Render(e.to_string()))?;
    writer.finish().map_err(|e| TraceError::Render(e.to_string()))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::CubicBez;

    fn decode(bytes: &[u8]) -> image::RgbaImage {
        image::load_from_memory(bytes).unwrap().into_rgba8()
    }

    fn diamond() -> Vec<PreviewCurve> {
        let pts = [
            Point::new(0.0, 20.0),
            Point::new(20.0, 0.0),
            Point::new(0.0, -20.0),
            Point::new(-20.0, 0.0),
        ];
        (0..4)
            .map(|i| {
                let a = pts[i];
                let b = pts[(i + 1) % 4];
                PreviewCurve(CubicBez::new(a, a, a.midpoint(b), b))
            })
            .collect()
    }

    #[test]
    fn empty_preview_is_blank() {
        let img = decode(&render_png(&[], &RenderOptions::default()).unwrap());
        assert_eq!(img.dimensions(), (400, 400));
        assert!(img.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn curves_are_drawn_in_color() {
        let img = decode(&render_png(&diamond(), &RenderOptions::default()).unwrap());
        let inked = img.pixels().filter(|p| p.0 != [255, 255, 255, 255]).count();
        assert!(inked > 100);
        // The diamond's top vertex lands at the top margin, horizontally centered.
        let top = img.get_pixel(200, 8);
        assert_ne!(top.0, [255, 255, 255, 255]);
        // Its center stays blank.
        assert_eq!(img.get_pixel(200, 200).0, [255, 255, 255, 255]);
    }

    #[test]
    fn fit_keeps_aspect_and_flips_y() {
        let bounds = Rect::new(-10.0, -5.0, 10.0, 5.0);
        let to_canvas = fit(bounds, &RenderOptions { margin: 0.0, ..RenderOptions::default() });
        assert_eq!(to_canvas(Point::new(-10.0, 5.0)), (0.0, 100.0));
        assert_eq!(to_canvas(Point::new(10.0, -5.0)), (400.0, 300.0));
    }

    #[test]
    fn zero_size_canvas_is_an_error() {
        let options = RenderOptions { width: 0, ..RenderOptions::default() };
        assert!(matches!(render_png(&[], &options), Err(TraceError::Render(_))));
    }
}
