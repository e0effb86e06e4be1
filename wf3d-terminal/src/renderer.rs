//! ASCII rasterizer implementing the core drawing surface
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wf3d_core::Surface;

/// Character luminosity ramp for fills (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Character used for wireframe edges and axis lines
const LINE_CHAR: char = '#';

/// Depth bias pulling lines in front of the coplanar fill they outline
const LINE_BIAS: f32 = 1e-3;

/// A character-cell drawing surface with a depth buffer.
///
/// Implements the core [`Surface`] seam: it receives homogeneous
/// clip-space coordinates, performs the perspective divide, maps to the
/// character grid and depth-tests every cell it touches.
#[derive(Debug)]
pub struct AsciiSurface {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiSurface {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        for i in 0..self.depth_buffer.len() {
            self.depth_buffer[i] = f32::INFINITY;
            self.char_buffer[i] = ' ';
            self.color_buffer[i] = Color::Reset;
        }
    }

    /// Character at cell `(x, y)`. Mostly useful for inspecting output.
    pub fn char_at(&self, x: usize, y: usize) -> char {
        self.char_buffer[y * self.width + x]
    }

    /// Perspective-divides a clip-space position and maps it to screen
    /// space. Returns `None` when the point is behind the camera or
    /// outside the normalized device box.
    fn project(&self, clip: [f32; 4]) -> Option<(f32, f32, f32)> {
        let w = clip[3];
        if w.abs() < 1e-6 {
            return None;
        }

        let ndc_x = clip[0] / w;
        let ndc_y = clip[1] / w;

        if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) {
            return None;
        }

        Some(self.to_screen(clip))
    }

    /// Perspective divide and viewport mapping without any visibility
    /// check. The caller must have clipped `clip` already so w is
    /// positive and x, y lie within it.
    fn to_screen(&self, clip: [f32; 4]) -> (f32, f32, f32) {
        let w = clip[3];
        let screen_x = (clip[0] / w + 1.0) * 0.5 * self.width as f32;
        let screen_y = (1.0 - clip[1] / w) * 0.5 * self.height as f32;
        (screen_x, screen_y, clip[2] / w)
    }

    fn plot(&mut self, x: i32, y: i32, depth: f32, c: char, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = c;
            self.color_buffer[idx] = color;
        }
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], c: char, color: Color) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box, clipped to the screen.
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        self.plot(x, y, depth, c, color);
                    }
                }
            }
        }
    }

    /// Writes the character grid out, one queued styled cell at a time.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for AsciiSurface {
    fn fill_triangle(&mut self, tri: [[f32; 4]; 3], color: [f32; 4]) {
        let mut coords = [(0.0, 0.0, 0.0); 3];
        for (slot, &clip) in coords.iter_mut().zip(tri.iter()) {
            match self.project(clip) {
                Some(p) => *slot = p,
                None => return, // triangle is clipped
            }
        }

        let c = luminance_char(color);
        self.rasterize_triangle(&coords, c, ansi_color(color));
    }

    fn stroke_line(&mut self, a: [f32; 4], b: [f32; 4], color: [f32; 4]) {
        // Unlike triangles, lines are clipped per segment so an edge with
        // one endpoint off screen still draws its visible part.
        let Some((a, b)) = clip_segment(a, b) else {
            return;
        };
        let a = self.to_screen(a);
        let b = self.to_screen(b);

        let color = ansi_color(color);
        let (x0, y0) = (a.0 as i32, a.1 as i32);
        let (x1, y1) = (b.0 as i32, b.1 as i32);
        let steps = (x1 - x0).abs().max((y1 - y0).abs());
        if steps == 0 {
            self.plot(x0, y0, a.2 - LINE_BIAS, LINE_CHAR, color);
            return;
        }
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = x0 as f32 + (x1 - x0) as f32 * t;
            let y = y0 as f32 + (y1 - y0) as f32 * t;
            let depth = a.2 + (b.2 - a.2) * t;
            self.plot(x.round() as i32, y.round() as i32, depth - LINE_BIAS, LINE_CHAR, color);
        }
    }
}

/// Picks a ramp character from the color's perceived brightness.
fn luminance_char(color: [f32; 4]) -> char {
    let luminance = 0.299 * color[0] + 0.587 * color[1] + 0.114 * color[2];
    let index = (luminance * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

/// Quantizes an RGB color to the nearest of the 8 basic terminal colors.
fn ansi_color(color: [f32; 4]) -> Color {
    let bits = ((color[0] > 0.5) as u8) | (((color[1] > 0.5) as u8) << 1) | (((color[2] > 0.5) as u8) << 2);
    match bits {
        0 => Color::DarkGrey,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::White,
    }
}

/// Calculates barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

/// Smallest w a clipped endpoint may carry, so the divide stays finite.
const W_CLIP: f32 = 1e-6;

/// Clips the segment `a`..`b` against the homogeneous view volume
/// (|x| <= w, |y| <= w, w > 0) before the perspective divide, so partially
/// visible segments keep their on-screen portion. Returns `None` when
/// nothing of the segment is visible.
fn clip_segment(a: [f32; 4], b: [f32; 4]) -> Option<([f32; 4], [f32; 4])> {
    // Liang-Barsky: each plane is f(p) = cx*x + cy*y + cw*w - offset >= 0,
    // linear along the segment, shrinking the visible parameter range.
    let planes = [
        ([1.0, 0.0, 1.0], 0.0),  // x >= -w
        ([-1.0, 0.0, 1.0], 0.0), // x <= w
        ([0.0, 1.0, 1.0], 0.0),  // y >= -w
        ([0.0, -1.0, 1.0], 0.0), // y <= w
        ([0.0, 0.0, 1.0], W_CLIP),
    ];

    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    for ([cx, cy, cw], offset) in planes {
        let fa = cx * a[0] + cy * a[1] + cw * a[3] - offset;
        let fb = cx * b[0] + cy * b[1] + cw * b[3] - offset;
        if fa < 0.0 && fb < 0.0 {
            return None;
        }
        let crossing = fa / (fa - fb);
        if fa < 0.0 {
            t0 = t0.max(crossing);
        } else if fb < 0.0 {
            t1 = t1.min(crossing);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((lerp4(a, b, t0), lerp4(a, b, t1)))
}

fn lerp4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let mut out = [0.0; 4];
    for ((slot, &from), &to) in out.iter_mut().zip(&a).zip(&b) {
        *slot = from + (to - from) * t;
    }
    out
}
