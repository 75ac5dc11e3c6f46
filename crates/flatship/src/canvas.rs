//! Drawing surfaces.
//!
//! `Canvas` is the only thing the renderer needs from a display: a line
//! primitive on integer pixels plus optional clear/text/flush hooks. Two
//! headless implementations live here:
//! - `Framebuffer`: 1-bit pixel grid with Bresenham lines and PBM export.
//! - `Recorder`: keeps every call, for tests and JSON traces.

use std::fmt::Write as _;

/// Typeface request for `Canvas::draw_text`. Surfaces without fonts ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    /// Large face used for the surface name on the menu.
    Title,
    /// Small face used for instructions and the in-game banner.
    Body,
}

/// Drawing-surface capability consumed by the renderer.
pub trait Canvas {
    /// Draw a line between two pixel coordinates. Always succeeds; pixels off
    /// the surface are dropped.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);

    fn clear(&mut self) {}

    fn draw_text(&mut self, _x: i32, _y: i32, _text: &str, _font: Font) {}

    /// Push the finished frame to the display.
    fn flush(&mut self) {}
}

/// 1-bit framebuffer; `true` is an ink pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
    captions: Vec<String>,
    flushed: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width * height],
            captions: Vec::new(),
            flushed: 0,
        }
    }

    /// Framebuffer covering `[0, W] × [0, H]` inclusive, so lines drawn on
    /// the right or bottom edge stay visible.
    pub fn for_screen(screen: &crate::geom::Screen) -> Self {
        Self::new(
            screen.width.max(0.0) as usize + 1,
            screen.height.max(0.0) as usize + 1,
        )
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[y * self.width + x]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = true;
        }
    }

    pub fn ink_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    /// Text drawn since the last clear, in call order.
    pub fn captions(&self) -> &[String] {
        &self.captions
    }

    /// Number of completed frames.
    pub fn frames(&self) -> usize {
        self.flushed
    }

    /// Plain PBM (P1) image of the current contents.
    pub fn to_pbm(&self) -> String {
        let mut out = String::with_capacity(self.width * self.height * 2 + 32);
        let _ = writeln!(out, "P1");
        let _ = writeln!(out, "{} {}", self.width, self.height);
        for row in self.pixels.chunks(self.width.max(1)) {
            let line: Vec<&str> = row.iter().map(|p| if *p { "1" } else { "0" }).collect();
            let _ = writeln!(out, "{}", line.join(" "));
        }
        out
    }

    /// ASCII rendering, `#` for ink, `.` for background.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.pixels.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|p| if *p { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

impl Canvas for Framebuffer {
    /// Bresenham's line algorithm.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            if x >= 0 && y >= 0 {
                self.set_pixel(x as usize, y as usize);
            }

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

    fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|p| *p = false);
        self.captions.clear();
    }

    fn draw_text(&mut self, _x: i32, _y: i32, text: &str, _font: Font) {
        self.captions.push(text.to_string());
    }

    fn flush(&mut self) {
        self.flushed += 1;
    }
}

/// One recorded canvas call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Clear,
    Line([i32; 4]),
    Text {
        x: i32,
        y: i32,
        text: String,
        font: Font,
    },
    Flush,
}

/// Canvas that records calls instead of drawing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Recorder {
    pub ops: Vec<Op>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = [i32; 4]> + '_ {
        self.ops.iter().filter_map(|op| match op {
            Op::Line(l) => Some(*l),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            Op::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for Recorder {
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.ops.push(Op::Line([x1, y1, x2, y2]));
    }

    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: Font) {
        self.ops.push(Op::Text {
            x,
            y,
            text: text.to_string(),
            font,
        });
    }

    fn flush(&mut self) {
        self.ops.push(Op::Flush);
    }
}
