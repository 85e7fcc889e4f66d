//! Procedural icon rendering
//!
//! Each icon is a fixed composition of ellipses, arcs, lines and polygons laid out
//! relative to a single `size` scalar. Primitives are first rasterized into a
//! coverage mask, then every covered pixel of the target raster is overwritten
//! with the icon color, alpha included.

use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::{drawing::draw_polygon_mut, point::Point};
use serde::{Deserialize, Serialize};
use std::{f64::consts::PI, fmt};

/// The closed set of icons a thumbnail can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum IconKind {
    Brain,
    Heartbeat,
    Head,
    Bolt,
    Sync,
    Spine,
    Star,
    Leaf,
    Book,
}

impl IconKind {
    pub const ALL: [IconKind; 9] = [
        IconKind::Brain,
        IconKind::Heartbeat,
        IconKind::Head,
        IconKind::Bolt,
        IconKind::Sync,
        IconKind::Spine,
        IconKind::Star,
        IconKind::Leaf,
        IconKind::Book,
    ];

    /// Resolve an icon by name. Unknown names fall back to the brain icon.
    pub fn from_name(name: &str) -> Self {
        match name {
            "heartbeat" => IconKind::Heartbeat,
            "head" => IconKind::Head,
            "bolt" => IconKind::Bolt,
            "sync" => IconKind::Sync,
            "spine" => IconKind::Spine,
            "star" => IconKind::Star,
            "leaf" => IconKind::Leaf,
            "book" => IconKind::Book,
            _ => IconKind::Brain,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IconKind::Brain => "brain",
            IconKind::Heartbeat => "heartbeat",
            IconKind::Head => "head",
            IconKind::Bolt => "bolt",
            IconKind::Sync => "sync",
            IconKind::Spine => "spine",
            IconKind::Star => "star",
            IconKind::Leaf => "leaf",
            IconKind::Book => "book",
        }
    }
}

impl From<String> for IconKind {
    fn from(name: String) -> Self {
        IconKind::from_name(&name)
    }
}

impl fmt::Display for IconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Draw `kind` centered at (`center_x`, `center_y`) onto `raster`.
///
/// `size` controls the overall extent of the icon; every offset and stroke width
/// is a fraction of it. Only pixels within roughly `size` of the center change.
pub fn draw_icon(
    raster: &mut RgbaImage,
    kind: IconKind,
    center_x: f64,
    center_y: f64,
    size: f64,
    color: Rgba<u8>,
) {
    let (width, height) = raster.dimensions();
    let mut painter = Painter::new(width, height);
    let at = Placement {
        cx: center_x,
        cy: center_y,
        size,
    };

    match kind {
        IconKind::Brain => draw_brain(&mut painter, at),
        IconKind::Heartbeat => draw_heartbeat(&mut painter, at),
        IconKind::Head => draw_head(&mut painter, at),
        IconKind::Bolt => draw_bolt(&mut painter, at),
        IconKind::Sync => draw_sync(&mut painter, at),
        IconKind::Spine => draw_spine(&mut painter, at),
        IconKind::Star => draw_star(&mut painter, at),
        IconKind::Leaf => draw_leaf(&mut painter, at),
        IconKind::Book => draw_book(&mut painter, at),
    }

    painter.composite(raster, color);
}

fn draw_brain(p: &mut Painter, at: Placement) {
    let outline = at.stroke(0.12);
    let fold = at.stroke(0.08);

    // Hemispheres
    p.ellipse_outline(at.bounds(-0.9, -0.65, -0.05, 0.65), outline);
    p.ellipse_outline(at.bounds(0.05, -0.65, 0.9, 0.65), outline);

    // Folds
    p.arc(at.bounds(-0.75, -0.45, -0.2, 0.1), 0.0, 180.0, fold);
    p.arc(at.bounds(-0.7, -0.15, -0.25, 0.35), 0.0, 180.0, fold);
    p.arc(at.bounds(0.2, -0.45, 0.75, 0.1), 0.0, 180.0, fold);
    p.arc(at.bounds(0.25, -0.15, 0.7, 0.35), 0.0, 180.0, fold);

    // Stem
    p.line(at.point(0.0, 0.5), at.point(0.0, 0.85), outline);
}

fn draw_heartbeat(p: &mut Painter, at: Placement) {
    let stroke = at.stroke(0.1);
    let heart = 0.5;

    p.arc(
        at.bounds(-heart, -heart * 0.8, 0.0, heart * 0.2),
        0.0,
        180.0,
        stroke,
    );
    p.arc(
        at.bounds(0.0, -heart * 0.8, heart, heart * 0.2),
        0.0,
        180.0,
        stroke,
    );
    p.line(at.point(-heart * 0.9, 0.0), at.point(0.0, heart), stroke);
    p.line(at.point(heart * 0.9, 0.0), at.point(0.0, heart), stroke);

    let pulse = 0.3;
    p.polyline(
        &[
            at.point(-1.0, pulse),
            at.point(-0.5, pulse),
            at.point(-0.3, pulse - 0.4),
            at.point(0.0, pulse + 0.3),
            at.point(0.2, pulse - 0.5),
            at.point(0.4, pulse),
            at.point(1.0, pulse),
        ],
        stroke,
    );
}

fn draw_head(p: &mut Painter, at: Placement) {
    p.ellipse_outline(at.bounds(-0.6, -0.7, 0.5, 0.5), at.stroke(0.1));

    let stroke = at.stroke(0.06);
    let arm = 0.12;
    for (dx, dy) in [(0.6, -0.5), (0.75, -0.2), (0.7, 0.1)] {
        p.line(at.point(dx - arm, dy), at.point(dx + arm, dy), stroke);
        p.line(at.point(dx, dy - arm), at.point(dx, dy + arm), stroke);
    }
}

fn draw_bolt(p: &mut Painter, at: Placement) {
    p.polygon(&[
        at.point(0.1, -0.8),
        at.point(-0.3, -0.05),
        at.point(0.05, -0.05),
        at.point(-0.15, 0.8),
        at.point(0.35, 0.05),
        at.point(0.05, 0.05),
    ]);
}

fn draw_sync(p: &mut Painter, at: Placement) {
    p.arc(at.bounds(-0.6, -0.6, 0.6, 0.6), 45.0, 315.0, at.stroke(0.12));

    // Arrow heads at both open ends
    p.polygon(&[
        at.point(0.35, -0.55),
        at.point(0.6, -0.35),
        at.point(0.55, -0.6),
    ]);
    p.polygon(&[
        at.point(-0.35, 0.55),
        at.point(-0.6, 0.35),
        at.point(-0.55, 0.6),
    ]);
}

fn draw_spine(p: &mut Painter, at: Placement) {
    let stroke = at.stroke(0.08);
    let half_height = 0.12;

    for i in 0..5 {
        let offset = (i as f64 - 2.0) * 0.35;
        let taper = 1.0 - (i as f64 - 2.0).abs() * 0.15;
        let half_width = 0.35 * taper;
        p.ellipse_outline(
            at.bounds(
                -half_width,
                offset - half_height,
                half_width,
                offset + half_height,
            ),
            stroke,
        );
    }
}

fn draw_star(p: &mut Painter, at: Placement) {
    let points: Vec<(f64, f64)> = (0..10)
        .map(|i| {
            let angle = i as f64 * PI / 5.0 - PI / 2.0;
            let radius = if i % 2 == 0 { 0.8 } else { 0.35 };
            at.point(radius * angle.cos(), radius * angle.sin())
        })
        .collect();
    p.polygon(&points);
}

fn draw_leaf(p: &mut Painter, at: Placement) {
    let stroke = at.stroke(0.1);
    p.ellipse_outline(at.bounds(-0.25, -0.8, 0.6, 0.3), stroke);
    p.arc(at.bounds(-0.5, -0.2, 0.2, 0.9), 180.0, 270.0, stroke);
    p.line(at.point(0.15, -0.5), at.point(0.0, 0.4), at.stroke(0.06));
}

fn draw_book(p: &mut Painter, at: Placement) {
    let stroke = at.stroke(0.08);

    // Covers and spine
    p.rectangle_outline(at.bounds(-0.8, -0.5, -0.05, 0.6), stroke);
    p.rectangle_outline(at.bounds(0.05, -0.5, 0.8, 0.6), stroke);
    p.line(at.point(0.0, -0.5), at.point(0.0, 0.6), stroke);

    // Pages
    let page = at.stroke(0.05);
    for i in 0..3 {
        let y = -0.25 + i as f64 * 0.25;
        p.line(at.point(-0.65, y), at.point(-0.2, y), page);
        p.line(at.point(0.2, y), at.point(0.65, y), page);
    }
}

/// Where an icon sits on the raster and how large it is.
#[derive(Debug, Clone, Copy)]
struct Placement {
    cx: f64,
    cy: f64,
    size: f64,
}

impl Placement {
    fn point(self, dx: f64, dy: f64) -> (f64, f64) {
        (self.cx + self.size * dx, self.cy + self.size * dy)
    }

    fn bounds(self, left: f64, top: f64, right: f64, bottom: f64) -> Bounds {
        let (left, top) = self.point(left, top);
        let (right, bottom) = self.point(right, bottom);
        Bounds {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Stroke width as a whole number of pixels. Zero at small sizes, which
    /// draws nothing.
    fn stroke(self, ratio: f64) -> f64 {
        (self.size * ratio).trunc()
    }
}

/// Axis-aligned box with inclusive edges.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Bounds {
    fn around(points: &[(f64, f64)], margin: f64) -> Self {
        let mut bounds = Bounds {
            left: f64::INFINITY,
            top: f64::INFINITY,
            right: f64::NEG_INFINITY,
            bottom: f64::NEG_INFINITY,
        };
        for &(x, y) in points {
            bounds.left = bounds.left.min(x - margin);
            bounds.top = bounds.top.min(y - margin);
            bounds.right = bounds.right.max(x + margin);
            bounds.bottom = bounds.bottom.max(y + margin);
        }
        bounds
    }

    fn inset(self, by: f64) -> Self {
        Bounds {
            left: self.left + by,
            top: self.top + by,
            right: self.right - by,
            bottom: self.bottom - by,
        }
    }

    fn center(self) -> (f64, f64) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    fn radii(self) -> (f64, f64) {
        (
            (self.right - self.left) / 2.0,
            (self.bottom - self.top) / 2.0,
        )
    }

    fn contains(self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

fn inside_ellipse(dx: f64, dy: f64, rx: f64, ry: f64) -> bool {
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let (nx, ny) = (dx / rx, dy / ry);
    nx * nx + ny * ny <= 1.0
}

const COVERED: Luma<u8> = Luma([255]);

/// Coverage mask the size of the target raster.
struct Painter {
    mask: GrayImage,
}

impl Painter {
    fn new(width: u32, height: u32) -> Self {
        Self {
            mask: GrayImage::new(width, height),
        }
    }

    /// Mark every pixel within `bounds` for which `inside` holds.
    fn cover(&mut self, bounds: Bounds, inside: impl Fn(f64, f64) -> bool) {
        let (width, height) = self.mask.dimensions();
        let Some((x0, x1)) = pixel_span(bounds.left, bounds.right, width) else {
            return;
        };
        let Some((y0, y1)) = pixel_span(bounds.top, bounds.bottom, height) else {
            return;
        };

        for y in y0..=y1 {
            for x in x0..=x1 {
                if inside(x as f64, y as f64) {
                    self.mask.put_pixel(x, y, COVERED);
                }
            }
        }
    }

    /// Ellipse outline drawn inward from `bounds`.
    fn ellipse_outline(&mut self, bounds: Bounds, width: f64) {
        let (cx, cy) = bounds.center();
        let (rx, ry) = bounds.radii();
        self.cover(bounds, |x, y| {
            let (dx, dy) = (x - cx, y - cy);
            inside_ellipse(dx, dy, rx, ry) && !inside_ellipse(dx, dy, rx - width, ry - width)
        });
    }

    /// Part of an ellipse outline between `start` and `end` degrees, measured
    /// clockwise from three o'clock.
    fn arc(&mut self, bounds: Bounds, start: f64, end: f64, width: f64) {
        let (cx, cy) = bounds.center();
        let (rx, ry) = bounds.radii();
        self.cover(bounds, |x, y| {
            let (dx, dy) = (x - cx, y - cy);
            if !inside_ellipse(dx, dy, rx, ry) || inside_ellipse(dx, dy, rx - width, ry - width) {
                return false;
            }
            let angle = (dy / ry).atan2(dx / rx).to_degrees().rem_euclid(360.0);
            angle >= start && angle <= end
        });
    }

    /// Straight segment with flat ends.
    fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length_sq = dx * dx + dy * dy;
        if length_sq == 0.0 || width <= 0.0 {
            return;
        }
        let half = width / 2.0;

        self.cover(Bounds::around(&[from, to], half), |x, y| {
            let (px, py) = (x - from.0, y - from.1);
            let along = (px * dx + py * dy) / length_sq;
            if !(0.0..=1.0).contains(&along) {
                return false;
            }
            // Cross product is distance * length
            let cross = px * dy - py * dx;
            cross * cross <= half * half * length_sq
        });
    }

    /// Connected segments, each with flat ends and no join filling.
    fn polyline(&mut self, points: &[(f64, f64)], width: f64) {
        for segment in points.windows(2) {
            self.line(segment[0], segment[1], width);
        }
    }

    /// Rectangle outline drawn inward from `bounds`.
    fn rectangle_outline(&mut self, bounds: Bounds, width: f64) {
        let inner = bounds.inset(width);
        self.cover(bounds, |x, y| {
            bounds.contains(x, y) && !inner.contains(x, y)
        });
    }

    fn polygon(&mut self, points: &[(f64, f64)]) {
        let mut poly: Vec<Point<i32>> = Vec::with_capacity(points.len());
        for &(x, y) in points {
            let point = Point::new(x.round() as i32, y.round() as i32);
            if poly.last() != Some(&point) {
                poly.push(point);
            }
        }
        // imageproc rejects polygons that repeat their first point at the end
        while poly.len() > 1 && poly.first() == poly.last() {
            poly.pop();
        }
        if poly.len() < 3 {
            return;
        }

        draw_polygon_mut(&mut self.mask, &poly, COVERED);
    }

    /// Write `color` into every covered pixel of `raster`, replacing it.
    fn composite(self, raster: &mut RgbaImage, color: Rgba<u8>) {
        for (pixel, coverage) in raster.pixels_mut().zip(self.mask.pixels()) {
            if coverage[0] > 0 {
                *pixel = color;
            }
        }
    }
}

/// Integer pixel range covering `[start, end]`, clipped to `0..limit`.
fn pixel_span(start: f64, end: f64, limit: u32) -> Option<(u32, u32)> {
    let first = start.floor().max(0.0);
    let last = end.ceil().min(limit as f64 - 1.0);
    (first <= last).then(|| (first as u32, last as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKGROUND: Rgba<u8> = Rgba([26, 54, 93, 255]);
    const PAINT: Rgba<u8> = Rgba([255, 255, 255, 77]);

    fn canvas(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, BACKGROUND)
    }

    fn render(kind: IconKind) -> RgbaImage {
        let mut img = canvas(400, 400);
        draw_icon(&mut img, kind, 200.0, 200.0, 100.0, PAINT);
        img
    }

    fn painted(img: &RgbaImage, x: u32, y: u32) -> bool {
        *img.get_pixel(x, y) != BACKGROUND
    }

    #[test]
    fn test_unknown_name_falls_back_to_brain() {
        assert_eq!(IconKind::from_name("unicorn"), IconKind::Brain);
        assert_eq!(IconKind::from_name(""), IconKind::Brain);
        assert_eq!(IconKind::from_name("Star"), IconKind::Brain);

        let fallback = render(IconKind::from_name("unicorn"));
        let brain = render(IconKind::Brain);
        assert_eq!(fallback.as_raw(), brain.as_raw());
    }

    #[test]
    fn test_names_round_trip() {
        for kind in IconKind::ALL {
            assert_eq!(IconKind::from_name(kind.name()), kind);
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&IconKind::Heartbeat).unwrap();
        assert_eq!(json, "\"heartbeat\"");

        let kind: IconKind = serde_json::from_str("\"spine\"").unwrap();
        assert_eq!(kind, IconKind::Spine);

        let kind: IconKind = serde_json::from_str("\"dragon\"").unwrap();
        assert_eq!(kind, IconKind::Brain);
    }

    #[test]
    fn test_every_icon_paints_something() {
        for kind in IconKind::ALL {
            let img = render(kind);
            let count = img.pixels().filter(|p| **p != BACKGROUND).count();
            assert!(count > 100, "{kind} painted only {count} pixels");
        }
    }

    #[test]
    fn test_icons_stay_within_bounds() {
        let (cx, cy, size) = (200u32, 200u32, 50.0);
        let reach = (size * 1.2) as u32;

        for kind in IconKind::ALL {
            let mut img = canvas(400, 400);
            draw_icon(&mut img, kind, cx as f64, cy as f64, size, PAINT);

            for (x, y, pixel) in img.enumerate_pixels() {
                let far = x.abs_diff(cx) > reach || y.abs_diff(cy) > reach;
                if far {
                    assert_eq!(*pixel, BACKGROUND, "{kind} touched ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_paint_replaces_pixels() {
        let img = render(IconKind::Star);
        assert_eq!(*img.get_pixel(200, 200), PAINT);
    }

    #[test]
    fn test_every_painted_pixel_carries_icon_color() {
        // Heartbeat lines cross the arcs and the book spine meets both covers
        for kind in IconKind::ALL {
            let img = render(kind);
            for pixel in img.pixels().filter(|p| **p != BACKGROUND) {
                assert_eq!(*pixel, PAINT, "{kind} left a mixed pixel");
            }
        }
    }

    #[test]
    fn test_strokes_vanish_when_width_truncates_to_zero() {
        // At size 5 every stroke ratio (0.05 - 0.12) truncates to 0px
        for kind in [IconKind::Brain, IconKind::Head, IconKind::Book, IconKind::Sync] {
            let mut img = canvas(40, 40);
            draw_icon(&mut img, kind, 20.0, 20.0, 5.0, PAINT);
            if kind == IconKind::Sync {
                // Arrow heads are filled polygons, only the arc disappears
                assert!(!painted(&img, 20 - 3, 20));
            } else {
                let count = img.pixels().filter(|p| **p != BACKGROUND).count();
                assert_eq!(count, 0, "{kind} drew a zero-width stroke");
            }
        }
    }

    #[test]
    fn test_polyline_joints_are_not_filled() {
        let mut painter = Painter::new(60, 40);
        painter.polyline(&[(10.0, 30.0), (30.0, 10.0), (50.0, 30.0)], 8.0);

        assert_eq!(painter.mask.get_pixel(20, 20)[0], 255);
        assert_eq!(painter.mask.get_pixel(40, 20)[0], 255);
        // Just above the apex, past both flat segment ends
        assert_eq!(painter.mask.get_pixel(30, 7)[0], 0);
    }

    #[test]
    fn test_star_is_filled() {
        let img = render(IconKind::Star);
        assert!(painted(&img, 200, 200));
        // Top point
        assert!(painted(&img, 200, 125));
        // Between the two upper arms, outside the inner radius
        assert!(!painted(&img, 200 + 40, 200 - 55));
    }

    #[test]
    fn test_sync_arc_leaves_right_side_open() {
        let img = render(IconKind::Sync);
        assert!(painted(&img, 200 - 58, 200));
        assert!(!painted(&img, 200 + 58, 200));
        assert!(!painted(&img, 200, 200));
    }

    #[test]
    fn test_brain_hemispheres_are_separated() {
        let img = render(IconKind::Brain);
        assert!(!painted(&img, 200, 200));
        // Stem below the center
        assert!(painted(&img, 200, 270));
        // Outer edge of the left hemisphere
        assert!(painted(&img, 200 - 88, 200));
    }

    #[test]
    fn test_spine_vertebrae_are_hollow() {
        let img = render(IconKind::Spine);
        assert!(!painted(&img, 200, 200));
        assert!(painted(&img, 200, 210));
        assert!(painted(&img, 200, 200 - 35 - 10));
    }

    #[test]
    fn test_book_spine_runs_through_center() {
        let img = render(IconKind::Book);
        assert!(painted(&img, 200, 200));
        assert!(painted(&img, 200, 150));
        // Inside the left cover, between page lines
        assert!(!painted(&img, 200 - 40, 200 - 12));
    }

    #[test]
    fn test_bolt_fills_upper_wedge() {
        let img = render(IconKind::Bolt);
        assert!(painted(&img, 195, 170));
        assert!(!painted(&img, 150, 260));
    }

    #[test]
    fn test_icon_clipped_at_raster_edge() {
        let mut img = canvas(60, 60);
        draw_icon(&mut img, IconKind::Heartbeat, 5.0, 5.0, 100.0, PAINT);
        assert!(img.pixels().any(|p| *p != BACKGROUND));
    }

    #[test]
    fn test_pixel_span_clips() {
        assert_eq!(pixel_span(-5.0, 3.2, 10), Some((0, 4)));
        assert_eq!(pixel_span(7.5, 20.0, 10), Some((7, 9)));
        assert_eq!(pixel_span(12.0, 20.0, 10), None);
        assert_eq!(pixel_span(-8.0, -2.0, 10), None);
    }
}
