//! Decorative blob animation.
//!
//! Each blob is a closed outline around a point placed relative to the
//! viewport. Its radius wobbles with a sine of the animation time, so every
//! frame only needs `tick` followed by `outline`.

use ratatui::style::Color;
use ratatui::widgets::canvas::{Painter, Shape};
use std::f64::consts::TAU;

/// Time added per frame
pub const TIME_STEP: f64 = 0.01;
/// Angle between outline points
pub const ANGLE_STEP: f64 = 0.1;
/// Maximum radius deviation
pub const WOBBLE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Blend over `background`, dropping the alpha channel
    pub fn over(&self, background: (u8, u8, u8)) -> Color {
        let mix = |fg: u8, bg: u8| {
            (f64::from(fg) * self.a + f64::from(bg) * (1.0 - self.a)).round() as u8
        };
        Color::Rgb(
            mix(self.r, background.0),
            mix(self.g, background.1),
            mix(self.b, background.2),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob {
    /// Horizontal centre as a fraction of the viewport width
    pub x: f64,
    /// Vertical centre as a fraction of the viewport height
    pub y: f64,
    pub size: f64,
    pub speed: f64,
    pub color: Rgba,
}

impl Blob {
    pub const fn new(x: f64, y: f64, size: f64, speed: f64, color: Rgba) -> Self {
        Self {
            x,
            y,
            size,
            speed,
            color,
        }
    }

    pub fn radius(&self, time: f64, angle: f64) -> f64 {
        self.size + (time * self.speed + angle * 3.0).sin() * WOBBLE
    }

    /// Outline points for `time` in a `width` x `height` viewport
    pub fn outline(&self, time: f64, width: f64, height: f64) -> Vec<(f64, f64)> {
        let cx = self.x * width;
        let cy = self.y * height;
        angles()
            .map(|angle| {
                let r = self.radius(time, angle);
                (cx + angle.cos() * r, cy + angle.sin() * r)
            })
            .collect()
    }
}

fn angles() -> impl Iterator<Item = f64> {
    (0..)
        .map(|k| f64::from(k) * ANGLE_STEP)
        .take_while(|angle| *angle < TAU)
}

pub const DEFAULT_BLOBS: [Blob; 3] = [
    Blob::new(0.2, 0.3, 120.0, 0.0008, Rgba::new(187, 134, 252, 0.1)),
    Blob::new(0.7, 0.6, 80.0, 0.001, Rgba::new(3, 218, 198, 0.08)),
    Blob::new(0.4, 0.8, 150.0, 0.0006, Rgba::new(187, 134, 252, 0.05)),
];

/// Animated set of blobs over a resizable viewport
#[derive(Debug, Clone)]
pub struct BlobField {
    blobs: Vec<Blob>,
    time: f64,
    width: f64,
    height: f64,
}

impl BlobField {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            blobs: DEFAULT_BLOBS.to_vec(),
            time: 0.0,
            width,
            height,
        }
    }

    pub fn with_blobs(mut self, blobs: Vec<Blob>) -> Self {
        self.blobs = blobs;
        self
    }

    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        self.time += TIME_STEP;
    }

    /// Outlines of every blob at the current time
    pub fn outlines(&self) -> Vec<Vec<(f64, f64)>> {
        self.blobs
            .iter()
            .map(|b| b.outline(self.time, self.width, self.height))
            .collect()
    }

    /// Canvas shape for the current frame, blended over `background`
    pub fn shape(&self, background: (u8, u8, u8)) -> BlobShape<'_> {
        BlobShape {
            field: self,
            background,
        }
    }
}

/// Draws the closed blob outlines on a ratatui canvas.
///
/// Canvas y grows upwards, so points are flipped against the field height.
pub struct BlobShape<'a> {
    field: &'a BlobField,
    background: (u8, u8, u8),
}

impl Shape for BlobShape<'_> {
    fn draw(&self, painter: &mut Painter) {
        let height = self.field.height;
        for (blob, outline) in self.field.blobs.iter().zip(self.field.outlines()) {
            // outlines are drawn opaque
            let color = Rgba { a: 1.0, ..blob.color }.over(self.background);
            let closing = outline.first().copied();
            let points = outline.iter().copied().chain(closing);
            let mut previous: Option<(f64, f64)> = None;
            for (x, y) in points {
                if let Some((px, py)) = previous {
                    draw_line(painter, (px, height - py), (x, height - y), color);
                }
                previous = Some((x, y));
            }
        }
    }
}

fn draw_line(painter: &mut Painter, from: (f64, f64), to: (f64, f64), color: Color) {
    let steps = ((to.0 - from.0).abs().max((to.1 - from.1).abs())).ceil().max(1.0) as u32;
    for step in 0..=steps {
        let t = f64::from(step) / f64::from(steps);
        let x = from.0 + (to.0 - from.0) * t;
        let y = from.1 + (to.1 - from.1) * t;
        if let Some((px, py)) = painter.get_point(x, y) {
            painter.paint(px, py, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_advances_time() {
        let mut field = BlobField::new(800.0, 600.0);
        field.tick();
        field.tick();
        assert!((field.time() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_outline_at_time_zero() {
        let blob = DEFAULT_BLOBS[0];
        let points = blob.outline(0.0, 1000.0, 1000.0);
        assert_eq!(points.len(), 63);
        // angle 0: radius is exactly the size
        let (x, y) = points[0];
        assert!((x - (200.0 + 120.0)).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_radius_stays_within_wobble() {
        for blob in DEFAULT_BLOBS {
            for k in 0..200 {
                let t = f64::from(k) * 37.0;
                let r = blob.radius(t, 1.3);
                assert!(r >= blob.size - WOBBLE && r <= blob.size + WOBBLE);
            }
        }
    }

    #[test]
    fn test_resize_moves_centres() {
        let mut field = BlobField::new(100.0, 100.0);
        let before = field.outlines()[1][0];
        field.resize(200.0, 100.0);
        let after = field.outlines()[1][0];
        assert!((after.0 - before.0 - 70.0).abs() < 1e-9);
        assert!((after.1 - before.1).abs() < 1e-9);
    }

    #[test]
    fn test_custom_blobs_replace_defaults() {
        let field = BlobField::new(400.0, 400.0).with_blobs(vec![DEFAULT_BLOBS[2]]);
        assert_eq!(field.blobs().len(), 1);
        assert_eq!(field.outlines().len(), 1);
    }

    #[test]
    fn test_color_blend() {
        let color = Rgba::new(187, 134, 252, 0.1).over((0, 0, 0));
        assert_eq!(color, Color::Rgb(19, 13, 25));
    }
}
