//! Outline extraction on the pixel-corner grid.
//!
//! Outlines run between pixels rather than through pixel centers, so a
//! straight run of N pixels is N unit steps along one line. Scanning
//! top-down and XOR-filling each outline's interior makes holes show up
//! as foreground in the working copy, so they are traced as their own
//! outlines.

use crate::bitmap::Bitmap;

/// A closed outline of unit steps on the pixel-corner grid.
#[derive(Debug, Clone)]
pub struct Outline {
    /// Corner points in image coordinates (y down).
    pub points: Vec<(i32, i32)>,
    /// +1 for an outer boundary, -1 for a hole.
    pub sign: i8,
}

/// Y-up view of a working bitmap: grid pixel (x, y) covers
/// `[x, x+1] × [y, y+1]`, and grid row 0 is the bitmap's last row.
struct Grid {
    bits: Bitmap,
}

impl Grid {
    fn width(&self) -> i32 {
        self.bits.width() as i32
    }

    fn height(&self) -> i32 {
        self.bits.height() as i32
    }

    fn get(&self, x: i32, y: i32) -> bool {
        self.bits.get(x as i64, (self.height() - 1 - y) as i64)
    }

    /// Flip every pixel of grid row `y` at or right of column `x`.
    fn toggle_tail(&mut self, x: i32, y: i32) {
        if !(0..self.height()).contains(&y) {
            return;
        }
        let row = (self.height() - 1 - y) as u32;
        for col in x.max(0) as u32..self.bits.width() {
            let on = self.bits.get(col as i64, row as i64);
            self.bits.set(col, row, !on);
        }
    }
}

/// Extract every closed outline of a bitmap.
///
/// Outlines enclosing `turd_size` pixels or fewer are dropped (their
/// interiors are still XOR-filled so nesting stays correct).
pub fn decompose(bitmap: &Bitmap, turd_size: usize) -> Vec<Outline> {
    let mut work = Grid { bits: bitmap.clone() };
    let mut outlines = Vec::new();

    // Top row first: everything above the scan line is already clear.
    for y in (0..work.height()).rev() {
        for x in 0..work.width() {
            if !work.get(x, y) {
                continue;
            }
            // Set in the input means an outer edge; set only in the
            // working copy means the inside of an earlier outline.
            let row = (work.height() - 1 - y) as i64;
            let sign: i8 = if bitmap.get(x as i64, row) { 1 } else { -1 };

            // Start at the pixel's top-left corner heading down.
            let points = find_path(&work, x, y + 1);
            xor_fill(&mut work, &points);

            if path_area(&points).unsigned_abs() as usize > turd_size {
                let height = work.height();
                let points = points.into_iter().map(|(px, py)| (px, height - py)).collect();
                outlines.push(Outline { points, sign });
            }
        }
    }

    outlines
}

/// Walk one outline with the foreground on the left.
///
/// At each corner the two pixels ahead decide the next step: ahead-right
/// set means turn right (diagonal contacts are joined), ahead-left clear
/// means turn left, otherwise go straight.
fn find_path(grid: &Grid, x0: i32, y0: i32) -> Vec<(i32, i32)> {
    let mut points = Vec::new();
    let (mut x, mut y) = (x0, y0);
    let (mut dx, mut dy) = (0i32, -1i32);

    loop {
        points.push((x, y));
        x += dx;
        y += dy;
        if x == x0 && y == y0 {
            break;
        }

        //   heading │ ahead-right   ahead-left
        //   ────────┼──────────────────────────
        //   down    │ (x-1, y-1)    (x,   y-1)
        //   up      │ (x,   y)      (x-1, y)
        //   right   │ (x,   y-1)    (x,   y)
        //   left    │ (x-1, y)      (x-1, y-1)
        //
        // The numerators below are always 0 or -2, so `/ 2` is exact.
        let right = grid.get(x + (dx + dy - 1) / 2, y + (dy - dx - 1) / 2);
        let left = grid.get(x + (dx - dy - 1) / 2, y + (dy + dx - 1) / 2);

        if right {
            (dx, dy) = (dy, -dx);
        } else if !left {
            (dx, dy) = (-dy, dx);
        }
    }

    points
}

/// Invert everything the outline encloses.
///
/// Each vertical edge flips its row from the edge to the right border.
/// Rows left of the outline see no flips, rows right of it see an even
/// number, so only the enclosed pixels change.
fn xor_fill(grid: &mut Grid, points: &[(i32, i32)]) {
    for (a, b) in closed_edges(points) {
        if a.1 != b.1 {
            grid.toggle_tail(a.0, a.1.min(b.1));
        }
    }
}

/// Signed area in whole pixels; positive for counter-clockwise in y-up.
fn path_area(points: &[(i32, i32)]) -> i64 {
    let cross: i64 = closed_edges(points)
        .map(|(a, b)| a.0 as i64 * b.1 as i64 - b.0 as i64 * a.1 as i64)
        .sum();
    cross / 2
}

/// Consecutive point pairs, including the edge back to the first point.
fn closed_edges(points: &[(i32, i32)]) -> impl Iterator<Item = ((i32, i32), (i32, i32))> + '_ {
    points
        .iter()
        .copied()
        .zip(points.iter().copied().cycle().skip(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap_from_rows(rows: &[&str]) -> Bitmap {
        let mut bm = Bitmap::new(rows[0].len() as u32, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                bm.set(x as u32, y as u32, ch == '#');
            }
        }
        bm
    }

    #[test]
    fn single_pixel_is_unit_square() {
        let bm = bitmap_from_rows(&["...", ".#.", "..."]);
        let outlines = decompose(&bm, 0);
        assert_eq!(outlines.len(), 1);
        let mut pts = outlines[0].points.clone();
        pts.sort_unstable();
        assert_eq!(pts, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn adjacent_pixels_share_one_outline() {
        let bm = bitmap_from_rows(&["....", ".##.", "...."]);
        let outlines = decompose(&bm, 0);
        assert_eq!(outlines.len(), 1);
        assert_eq!(outlines[0].points.len(), 6);
        assert_eq!(path_area(&outlines[0].points).abs(), 2);
    }

    #[test]
    fn ring_yields_outer_and_hole() {
        let bm = bitmap_from_rows(&[
            ".......",
            ".#####.",
            ".#...#.",
            ".#...#.",
            ".#...#.",
            ".#####.",
            ".......",
        ]);
        let outlines = decompose(&bm, 0);
        assert_eq!(outlines.len(), 2);
        assert_eq!(outlines[0].sign, 1);
        assert_eq!(outlines[1].sign, -1);
        assert_eq!(path_area(&outlines[0].points).abs(), 25);
        assert_eq!(path_area(&outlines[1].points).abs(), 9);
    }

    #[test]
    fn speckles_are_dropped() {
        let bm = bitmap_from_rows(&["#.....", "......", "...###", "...###"]);
        let outlines = decompose(&bm, 2);
        assert_eq!(outlines.len(), 1);
        assert_eq!(path_area(&outlines[0].points).abs(), 6);
    }

    #[test]
    fn diagonal_contact_is_joined() {
        let bm = bitmap_from_rows(&["....", ".#..", "..#.", "...."]);
        let outlines = decompose(&bm, 0);
        assert_eq!(outlines.len(), 1);
        assert_eq!(path_area(&outlines[0].points).abs(), 2);
    }
}
