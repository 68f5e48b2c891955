use egui::Color32;
use serde::{Deserialize, Serialize};

/// A straight (non-premultiplied) alpha RGBA8 colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba([0, 0, 0, 0]);
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub fn alpha(&self) -> u8 {
        self.0[3]
    }

    pub fn is_transparent(&self) -> bool {
        self.0[3] == 0
    }

    /// Source-over compositing of `self` on top of `dst`.
    pub fn over(self, dst: Rgba) -> Rgba {
        match self.alpha() {
            255 => return self,
            0 => return dst,
            _ => {}
        }

        let sa = self.alpha() as f32 / 255.0;
        let da = dst.alpha() as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Rgba::TRANSPARENT;
        }

        let mut out = [0u8; 4];
        for channel in 0..3 {
            let sc = self.0[channel] as f32;
            let dc = dst.0[channel] as f32;
            let c = (sc * sa + dc * da * (1.0 - sa)) / out_a;
            out[channel] = c.round().clamp(0.0, 255.0) as u8;
        }
        out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgba(out)
    }
}

impl From<Color32> for Rgba {
    fn from(color: Color32) -> Self {
        Rgba(color.to_srgba_unmultiplied())
    }
}

impl From<Rgba> for Color32 {
    fn from(color: Rgba) -> Self {
        let [r, g, b, a] = color.0;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

/// Upper bound on the chords of one ellipse outline
const MAX_ELLIPSE_STEPS: usize = 8192;

/// A fixed-size RGBA pixel buffer with immediate-mode drawing primitives.
///
/// Every primitive replaces pixels rather than blending them, and writes
/// outside the buffer are clipped.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &"<pixels>")
            .finish()
    }
}

impl Surface {
    /// Creates a fully transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn put(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Number of pixels that are not fully transparent
    pub fn painted_count(&self) -> usize {
        self.pixels.iter().filter(|p| !p.is_transparent()).count()
    }

    /// Flattens the buffer into `[r, g, b, a, r, g, b, a, ...]`
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.0).collect()
    }

    /// One-pixel Bresenham line, both endpoints inclusive.
    ///
    /// The segment is clipped to the surface before the walk.
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgba) {
        let Some(((x0, y0), (x1, y1))) = self.clip_segment(from, to) else {
            return;
        };
        let (mut x, mut y) = (x0 as i64, y0 as i64);
        let (x1, y1) = (x1 as i64, y1 as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x as i32, y as i32, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Liang-Barsky clip of a segment against the pixel grid. Segments that
    /// already lie inside come back unchanged.
    fn clip_segment(&self, from: (i32, i32), to: (i32, i32)) -> Option<((i32, i32), (i32, i32))> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        if self.index(from.0, from.1).is_some() && self.index(to.0, to.1).is_some() {
            return Some((from, to));
        }

        let (x0, y0) = (from.0 as f64, from.1 as f64);
        let (dx, dy) = (to.0 as f64 - x0, to.1 as f64 - y0);
        let x_max = (self.width - 1) as f64;
        let y_max = (self.height - 1) as f64;
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

        for (p, q) in [(-dx, x0), (dx, x_max - x0), (-dy, y0), (dy, y_max - y0)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        let at = |t: f64| {
            (
                (x0 + t * dx).round().clamp(0.0, x_max) as i32,
                (y0 + t * dy).round().clamp(0.0, y_max) as i32,
            )
        };
        Some((at(t0), at(t1)))
    }

    /// Line of the given width: every pixel whose centre lies within
    /// `width / 2` of the segment, on top of the Bresenham spine so thin
    /// diagonals stay connected.
    pub fn draw_thick_line(&mut self, from: (i32, i32), to: (i32, i32), width: u32, color: Rgba) {
        self.draw_line(from, to, color);
        if width <= 1 {
            return;
        }

        let half = width as f64 / 2.0;
        let reach = half.ceil() as i32;
        let min_x = from.0.min(to.0).saturating_sub(reach).max(0);
        let max_x = from.0.max(to.0).saturating_add(reach).min(self.width as i32 - 1);
        let min_y = from.1.min(to.1).saturating_sub(reach).max(0);
        let max_y = from.1.max(to.1).saturating_add(reach).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if distance_to_segment((x, y), from, to) <= half {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// Filled disc: every pixel with `dx² + dy² <= radius²`.
    pub fn fill_circle(&mut self, center: (i32, i32), radius: u32, color: Rgba) {
        let (cx, cy) = (center.0 as i64, center.1 as i64);
        let r = radius as i64;
        let r2 = r * r;
        // Only the part of the bounding box that overlaps the surface
        let (min_x, max_x) = ((cx - r).max(0), (cx + r).min(self.width as i64 - 1));
        let (min_y, max_y) = ((cy - r).max(0), (cy + r).min(self.height as i64 - 1));
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy <= r2 {
                    self.put(x as i32, y as i32, color);
                }
            }
        }
    }

    /// Axis-aligned rectangle outline spanning two opposite corners.
    pub fn stroke_rect(&mut self, a: (i32, i32), b: (i32, i32), width: u32, color: Rgba) {
        let corners = [a, (b.0, a.1), b, (a.0, b.1)];
        for i in 0..4 {
            self.draw_thick_line(corners[i], corners[(i + 1) % 4], width, color);
        }
    }

    /// Ellipse outline inscribed in the box spanned by two opposite corners.
    pub fn stroke_ellipse(&mut self, a: (i32, i32), b: (i32, i32), width: u32, color: Rgba) {
        let (ax, ay) = (a.0 as f32, a.1 as f32);
        let (bx, by) = (b.0 as f32, b.1 as f32);
        let (cx, cy) = ((ax + bx) / 2.0, (ay + by) / 2.0);
        let rx = (bx - ax).abs() / 2.0;
        let ry = (by - ay).abs() / 2.0;

        if rx < 1.0 || ry < 1.0 {
            self.draw_thick_line(a, b, width, color);
            return;
        }

        let steps = ((std::f32::consts::TAU * rx.max(ry)).ceil() as usize)
            .clamp(16, MAX_ELLIPSE_STEPS);
        let at = |i: usize| {
            let t = std::f32::consts::TAU * i as f32 / steps as f32;
            (
                (cx + rx * t.cos()).round() as i32,
                (cy + ry * t.sin()).round() as i32,
            )
        };

        let mut prev = at(0);
        for i in 1..=steps {
            let next = at(i);
            self.draw_thick_line(prev, next, width, color);
            prev = next;
        }
    }
}

fn distance_to_segment(p: (i32, i32), a: (i32, i32), b: (i32, i32)) -> f64 {
    let (px, py) = (p.0 as f64, p.1 as f64);
    let (ax, ay) = (a.0 as f64, a.1 as f64);
    let (bx, by) = (b.0 as f64, b.1 as f64);
    let (vx, vy) = (bx - ax, by - ay);
    let len2 = vx * vx + vy * vy;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (((px - ax) * vx + (py - ay) * vy) / len2).clamp(0.0, 1.0)
    };
    let (qx, qy) = (ax + t * vx, ay + t * vy);
    ((px - qx).powi(2) + (py - qy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::new(255, 0, 0, 255);

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = Surface::new(16, 8);
        assert_eq!(surface.pixels().len(), 128);
        assert_eq!(surface.painted_count(), 0);
    }

    #[test]
    fn test_put_outside_bounds_is_clipped() {
        let mut surface = Surface::new(4, 4);
        surface.put(-1, 0, RED);
        surface.put(4, 0, RED);
        surface.put(0, 100, RED);
        assert_eq!(surface.painted_count(), 0);
        assert_eq!(surface.get(-1, 0), None);
    }

    #[test]
    fn test_line_covers_both_endpoints() {
        let mut surface = Surface::new(20, 20);
        surface.draw_line((2, 3), (15, 11), RED);
        assert_eq!(surface.get(2, 3), Some(RED));
        assert_eq!(surface.get(15, 11), Some(RED));
        // A Bresenham line has exactly max(dx, dy) + 1 pixels
        assert_eq!(surface.painted_count(), 14);
    }

    #[test]
    fn test_thick_line_is_wider_than_spine() {
        let mut thin = Surface::new(40, 40);
        thin.draw_thick_line((5, 20), (35, 20), 1, RED);
        let mut thick = Surface::new(40, 40);
        thick.draw_thick_line((5, 20), (35, 20), 4, RED);

        assert_eq!(thin.painted_count(), 31);
        assert!(thick.painted_count() > thin.painted_count() * 3);
        assert_eq!(thick.get(20, 22), Some(RED));
        assert_eq!(thick.get(20, 23), None);
    }

    #[test]
    fn test_line_partially_off_canvas() {
        let mut surface = Surface::new(10, 10);
        surface.draw_thick_line((-20, 5), (30, 5), 3, RED);
        assert_eq!(surface.get(0, 5), Some(RED));
        assert_eq!(surface.get(9, 5), Some(RED));
    }

    #[test]
    fn test_far_away_line_only_walks_the_visible_part() {
        let mut surface = Surface::new(64, 64);
        surface.draw_line((10, 10), (200_000_000, 10), RED);
        // x = 10..=63 on row 10 and nothing else
        assert_eq!(surface.painted_count(), 54);
        assert_eq!(surface.get(63, 10), Some(RED));
        assert_eq!(surface.get(9, 10), None);
    }

    #[test]
    fn test_line_between_extreme_coordinates_does_not_overflow() {
        let mut surface = Surface::new(16, 16);
        surface.draw_thick_line((i32::MIN, 8), (i32::MAX, 8), 3, RED);
        assert_eq!(surface.get(0, 8), Some(RED));
        assert_eq!(surface.get(15, 8), Some(RED));
        assert_eq!(surface.get(8, 5), None);

        let mut missed = Surface::new(16, 16);
        missed.draw_line((i32::MIN, -5), (i32::MAX, -5), RED);
        assert_eq!(missed.painted_count(), 0);
    }

    #[test]
    fn test_circle_far_off_canvas_paints_nothing() {
        let mut surface = Surface::new(16, 16);
        surface.fill_circle((i32::MAX, 4), 50, RED);
        surface.fill_circle((i32::MIN, i32::MIN), 50, RED);
        assert_eq!(surface.painted_count(), 0);
    }

    #[test]
    fn test_fill_circle_radius_zero_is_single_pixel() {
        let mut surface = Surface::new(10, 10);
        surface.fill_circle((4, 4), 0, RED);
        assert_eq!(surface.painted_count(), 1);
        assert_eq!(surface.get(4, 4), Some(RED));
    }

    #[test]
    fn test_rect_outline_leaves_interior_empty() {
        let mut surface = Surface::new(30, 30);
        surface.stroke_rect((5, 5), (20, 15), 1, RED);
        assert_eq!(surface.get(5, 5), Some(RED));
        assert_eq!(surface.get(20, 15), Some(RED));
        assert_eq!(surface.get(12, 10), None);
    }

    #[test]
    fn test_ellipse_outline_touches_box_edges() {
        let mut surface = Surface::new(50, 50);
        surface.stroke_ellipse((10, 10), (40, 30), 1, RED);
        assert_eq!(surface.get(40, 20), Some(RED));
        assert_eq!(surface.get(25, 10), Some(RED));
        assert_eq!(surface.get(25, 20), None);
    }

    #[test]
    fn test_over_opaque_and_transparent_sources() {
        let blue = Rgba::new(0, 0, 255, 255);
        assert_eq!(RED.over(blue), RED);
        assert_eq!(Rgba::TRANSPARENT.over(blue), blue);
    }

    #[test]
    fn test_over_half_alpha_on_white() {
        let half_black = Rgba::new(0, 0, 0, 128);
        let out = half_black.over(Rgba::WHITE);
        assert_eq!(out.alpha(), 255);
        assert!((126..=128).contains(&out.0[0]));
        assert_eq!(out.0[0], out.0[1]);
    }

    #[test]
    fn test_color32_conversion_keeps_straight_alpha() {
        let color = Rgba::new(200, 100, 50, 255);
        let back: Rgba = Color32::from(color).into();
        assert_eq!(back, color);
    }
}
