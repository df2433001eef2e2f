//! CPU raster target for the sky scene.
//!
//! Straight-alpha RGBA8 pixels, row-major, top-left origin. All primitives
//! are anti-aliased by pixel-center coverage and clip to the surface, so
//! callers may pass shapes that lie partly or fully off-screen.

use glam::Vec2;
use skyscatter_core::ColorRGB;
use std::ops::Range;

/// One pixel. Layout matches `Rgba8UnormSrgb` texture rows.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn opaque(color: ColorRGB) -> Self {
        Self {
            r: color.r,
            g: color.g,
            b: color.b,
            a: 255,
        }
    }

    pub fn rgb(self) -> ColorRGB {
        ColorRGB::new(self.r, self.g, self.b)
    }
}

/// Owned pixel buffer sized in device pixels.
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba8::default(); (width as usize) * (height as usize)],
        }
    }

    /// Reallocate to a new size. Contents are cleared. No-op if unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize((width as usize) * (height as usize), Rgba8::default());
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when there is nothing to draw into.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Raw bytes for texture upload (4 bytes per pixel, rows tightly packed).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Opaque vertical gradient: `top` at y = 0, `bottom` at y = height.
    /// Sampled at pixel centers.
    pub fn fill_vertical_gradient(&mut self, top: ColorRGB, bottom: ColorRGB) {
        let w = self.width as usize;
        let h = self.height as f32;
        for (y, row) in self.pixels.chunks_exact_mut(w.max(1)).enumerate() {
            let t = (y as f32 + 0.5) / h;
            row.fill(Rgba8::opaque(top.lerp(bottom, t)));
        }
    }

    /// Filled anti-aliased disc.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: ColorRGB, alpha: f32) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        let reach = radius + 1.0;
        for y in self.span(center.y - reach, center.y + reach, self.height) {
            for x in self.span(center.x - reach, center.x + reach, self.width) {
                let d = pixel_center(x, y).distance(center);
                let coverage = (radius - d + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, alpha * coverage);
                }
            }
        }
    }

    /// Anti-aliased ring of `stroke_width` centered on `radius`.
    pub fn stroke_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        stroke_width: f32,
        color: ColorRGB,
        alpha: f32,
    ) {
        if stroke_width <= 0.0 || alpha <= 0.0 {
            return;
        }
        let half = stroke_width * 0.5;
        let reach = radius + half + 1.0;
        for y in self.span(center.y - reach, center.y + reach, self.height) {
            for x in self.span(center.x - reach, center.x + reach, self.width) {
                let d = pixel_center(x, y).distance(center);
                let coverage = (half - (d - radius).abs() + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, alpha * coverage);
                }
            }
        }
    }

    /// Radial glow: full `alpha` inside `inner`, fading linearly to zero at `outer`.
    pub fn fill_radial_glow(
        &mut self,
        center: Vec2,
        inner: f32,
        outer: f32,
        color: ColorRGB,
        alpha: f32,
    ) {
        if outer <= 0.0 || alpha <= 0.0 {
            return;
        }
        let band = (outer - inner).max(f32::EPSILON);
        for y in self.span(center.y - outer, center.y + outer, self.height) {
            for x in self.span(center.x - outer, center.x + outer, self.width) {
                let d = pixel_center(x, y).distance(center);
                if d >= outer {
                    continue;
                }
                let s = ((d - inner) / band).clamp(0.0, 1.0);
                self.blend(x, y, color, alpha * (1.0 - s));
            }
        }
    }

    /// Anti-aliased line segment with butt caps.
    ///
    /// Walks the major axis and only visits pixels near the centerline, so a
    /// long diagonal costs O(length) rather than O(bounding box).
    pub fn stroke_segment(
        &mut self,
        from: Vec2,
        to: Vec2,
        stroke_width: f32,
        color: ColorRGB,
        alpha: f32,
    ) {
        let delta = to - from;
        let len = delta.length();
        if len <= f32::EPSILON || stroke_width <= 0.0 || alpha <= 0.0 || self.is_empty() {
            return;
        }
        let dir = delta / len;
        let half = stroke_width * 0.5;
        let x_major = delta.x.abs() >= delta.y.abs();

        let (major_from, major_delta, minor_from, minor_delta) = if x_major {
            (from.x, delta.x, from.y, delta.y)
        } else {
            (from.y, delta.y, from.x, delta.x)
        };
        // Half-thickness measured along the minor axis, plus one AA pixel
        let spread = half * len / major_delta.abs() + 1.0;
        let (major_limit, minor_limit) = if x_major {
            (self.width, self.height)
        } else {
            (self.height, self.width)
        };
        let major_lo = major_from.min(major_from + major_delta) - half;
        let major_hi = major_from.max(major_from + major_delta) + half;

        for m in self.span(major_lo, major_hi, major_limit) {
            let mc = m as f32 + 0.5;
            let t = ((mc - major_from) / major_delta).clamp(0.0, 1.0);
            let center_minor = minor_from + minor_delta * t;
            for n in self.span(center_minor - spread, center_minor + spread, minor_limit) {
                let (x, y) = if x_major { (m, n) } else { (n, m) };
                let rel = pixel_center(x, y) - from;
                let along = rel.dot(dir);
                let across = rel.perp_dot(dir).abs();
                let coverage = (half - across + 0.5).clamp(0.0, 1.0)
                    * (along + 0.5).clamp(0.0, 1.0)
                    * (len - along + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, alpha * coverage);
                }
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }

    /// Integer pixel range covering [lo, hi], clipped to [0, limit).
    fn span(&self, lo: f32, hi: f32, limit: u32) -> Range<u32> {
        if !(lo.is_finite() && hi.is_finite()) || hi < 0.0 {
            return 0..0;
        }
        let start = lo.floor().max(0.0) as u32;
        let end = (hi.ceil().max(0.0) as u32).min(limit);
        start.min(end)..end
    }

    /// Source-over blend of a straight-alpha color.
    fn blend(&mut self, x: u32, y: u32, color: ColorRGB, alpha: f32) {
        let a = alpha.clamp(0.0, 1.0);
        let idx = self.index(x, y);
        let dst = &mut self.pixels[idx];
        dst.r = mix(dst.r, color.r, a);
        dst.g = mix(dst.g, color.g, a);
        dst.b = mix(dst.b, color.b, a);
        dst.a = (a * 255.0 + dst.a as f32 * (1.0 - a)).round() as u8;
    }
}

fn pixel_center(x: u32, y: u32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}

fn mix(dst: u8, src: u8, a: f32) -> u8 {
    let d = dst as f32;
    (d + (src as f32 - d) * a).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: ColorRGB = ColorRGB::new(255, 0, 0);
    const BLUE: ColorRGB = ColorRGB::new(0, 0, 255);

    fn filled(w: u32, h: u32, color: ColorRGB) -> FrameBuffer {
        let mut fb = FrameBuffer::new(w, h);
        fb.fill_vertical_gradient(color, color);
        fb
    }

    #[test]
    fn test_byte_layout() {
        let fb = FrameBuffer::new(8, 4);
        assert_eq!(fb.as_bytes().len(), 8 * 4 * 4);
        assert_eq!(std::mem::size_of::<Rgba8>(), 4);
    }

    #[test]
    fn test_resize_reallocates() {
        let mut fb = FrameBuffer::new(300, 150);
        fb.resize(800, 600);
        assert_eq!((fb.width(), fb.height()), (800, 600));
        assert_eq!(fb.pixels().len(), 800 * 600);
        fb.resize(0, 600);
        assert!(fb.is_empty());
        assert!(fb.pixels().is_empty());
    }

    #[test]
    fn test_gradient_endpoints() {
        let mut fb = FrameBuffer::new(4, 100);
        fb.fill_vertical_gradient(RED, BLUE);
        let top = fb.pixel(0, 0).unwrap();
        let bottom = fb.pixel(3, 99).unwrap();
        assert_eq!(top.a, 255);
        assert!(top.r >= 250 && top.b <= 5, "top {top:?}");
        assert!(bottom.b >= 250 && bottom.r <= 5, "bottom {bottom:?}");
        // Rows are uniform
        assert_eq!(fb.pixel(0, 50), fb.pixel(3, 50));
    }

    #[test]
    fn test_gradient_on_empty_buffer() {
        let mut fb = FrameBuffer::new(0, 0);
        fb.fill_vertical_gradient(RED, BLUE);
        assert!(fb.pixels().is_empty());
    }

    #[test]
    fn test_fill_circle_center_and_outside() {
        let mut fb = filled(50, 50, ColorRGB::BLACK);
        fb.fill_circle(Vec2::new(25.0, 25.0), 5.0, RED, 1.0);
        assert_eq!(fb.pixel(25, 25).unwrap().rgb(), RED);
        assert_eq!(fb.pixel(40, 40).unwrap().rgb(), ColorRGB::BLACK);
    }

    #[test]
    fn test_fill_circle_partial_alpha() {
        let mut fb = filled(20, 20, ColorRGB::BLACK);
        fb.fill_circle(Vec2::new(10.0, 10.0), 4.0, ColorRGB::WHITE, 0.5);
        let p = fb.pixel(10, 10).unwrap();
        assert_eq!(p.r, 128);
    }

    #[test]
    fn test_offscreen_shapes_clip() {
        let mut fb = filled(10, 10, ColorRGB::BLACK);
        fb.fill_circle(Vec2::new(-100.0, -100.0), 5.0, RED, 1.0);
        fb.fill_radial_glow(Vec2::new(500.0, 5.0), 10.0, 120.0, RED, 0.4);
        fb.stroke_circle(Vec2::new(5.0, 1000.0), 25.0, 2.0, RED, 0.5);
        fb.stroke_segment(Vec2::new(-50.0, -50.0), Vec2::new(-10.0, -80.0), 2.0, RED, 1.0);
        assert!(fb.pixels().iter().all(|p| p.rgb() == ColorRGB::BLACK));
    }

    #[test]
    fn test_glow_falls_off() {
        let mut fb = filled(300, 300, ColorRGB::BLACK);
        fb.fill_radial_glow(Vec2::new(150.0, 150.0), 10.0, 120.0, ColorRGB::WHITE, 1.0);
        let inner = fb.pixel(150, 150).unwrap().r;
        let mid = fb.pixel(215, 150).unwrap().r;
        let outside = fb.pixel(290, 150).unwrap().r;
        assert_eq!(inner, 255);
        assert!(mid > 0 && mid < inner, "mid {mid}");
        assert_eq!(outside, 0);
    }

    #[test]
    fn test_stroke_circle_ring_only() {
        let mut fb = filled(100, 100, ColorRGB::BLACK);
        fb.stroke_circle(Vec2::new(50.0, 50.0), 25.0, 2.0, ColorRGB::WHITE, 1.0);
        assert_eq!(fb.pixel(50, 50).unwrap().rgb(), ColorRGB::BLACK);
        assert!(fb.pixel(75, 50).unwrap().r > 200);
    }

    #[test]
    fn test_horizontal_segment() {
        let mut fb = filled(40, 10, ColorRGB::BLACK);
        fb.stroke_segment(Vec2::new(5.0, 5.0), Vec2::new(35.0, 5.0), 2.0, RED, 1.0);
        assert_eq!(fb.pixel(20, 4).unwrap().rgb(), RED);
        assert_eq!(fb.pixel(20, 5).unwrap().rgb(), RED);
        assert_eq!(fb.pixel(20, 8).unwrap().rgb(), ColorRGB::BLACK);
        // Butt caps: nothing past the endpoints
        assert_eq!(fb.pixel(38, 5).unwrap().rgb(), ColorRGB::BLACK);
        assert_eq!(fb.pixel(2, 5).unwrap().rgb(), ColorRGB::BLACK);
    }

    #[test]
    fn test_steep_segment() {
        let mut fb = filled(20, 60, ColorRGB::BLACK);
        fb.stroke_segment(Vec2::new(10.0, 5.0), Vec2::new(12.0, 55.0), 2.0, BLUE, 1.0);
        let hit = (0..20).any(|x| fb.pixel(x, 30).unwrap().rgb() == BLUE);
        assert!(hit, "no pixel on row 30 was covered");
    }

    #[test]
    fn test_degenerate_segment_ignored() {
        let mut fb = filled(10, 10, ColorRGB::BLACK);
        fb.stroke_segment(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), 2.0, RED, 1.0);
        assert!(fb.pixels().iter().all(|p| p.rgb() == ColorRGB::BLACK));
    }
}
