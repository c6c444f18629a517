use crate::config::CanvasConfig;
use crate::grid::Grid;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// A dense monochrome pixel buffer the size of the canvas.
///
/// The rasterizer fills it from a grid snapshot; the terminal front end packs
/// it into braille characters at 2x4 pixels per character cell.
pub struct Frame {
    /// Row-major pixel states, `px[y * w + x]`
    px: Vec<bool>,

    /// Width of the canvas in pixels
    w: usize,

    /// Height of the canvas in pixels
    h: usize,
}

impl Frame {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            px: vec![false; w * h],
            w,
            h,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        x < self.w && y < self.h && self.px[y * self.w + x]
    }

    /// Turns on a single pixel. Out-of-canvas pixels are clipped.
    pub fn set_pixel(&mut self, x: usize, y: usize) {
        if x < self.w && y < self.h {
            self.px[y * self.w + x] = true;
        }
    }

    /// Turns on a `w x h` rectangle of pixels with its top-left at `(x, y)`,
    /// clipped to the canvas.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize) {
        for dy in 0..h {
            for dx in 0..w {
                self.set_pixel(x + dx, y + dy);
            }
        }
    }

    /// Pack the pixel buffer into lines of braille characters, one braille
    /// dot per pixel, 2x4 pixels per character. Ends with a newline.
    pub fn to_braille(&self) -> String {
        let (bw, bh) = (self.w.div_ceil(2), self.h.div_ceil(4));
        let mut cp = vec![BRAILLE_EMPTY; bw * bh];

        for (n, &px) in self.px.iter().enumerate() {
            let (x, y) = (n % self.w, n / self.w);

            if px {
                cp[(y / 4) * bw + (x / 2)] += Self::get_hex_value(x, y);
            }
        }

        // Each braille character is 3 bytes, and newlines one byte. Since we
        // need `bh` newlines, this gives a buffer of length `3 * (bw * bh) + bh`.
        let mut fb = String::with_capacity(3 * (bw * bh) + bh);

        for (i, &c) in cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                fb.push('\n');
            }

            fb.push(::std::char::from_u32(c).unwrap());
        }
        fb.push('\n');

        fb
    }

    /// Render the pixel buffer as `#`/`.` rows joined by newlines, without a
    /// trailing newline. Debugging and test surface.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.w + 1) * self.h);

        for y in 0..self.h {
            if y > 0 {
                out.push('\n');
            }

            for x in 0..self.w {
                out.push(if self.px[y * self.w + x] { '#' } else { '.' });
            }
        }

        out
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

/// Rasterize a grid snapshot onto a canvas-sized frame.
///
/// Every live cell becomes a filled `cell_size x cell_size` square; the
/// gridline overlay, when the configuration calls for it, draws single-pixel
/// cell boundary lines over the grid area.
pub fn rasterize(grid: &Grid, config: &CanvasConfig) -> Frame {
    let mut frame = Frame::new(
        config.canvas_width_px() as usize,
        config.canvas_height_px() as usize,
    );

    let s = config.cell_size_px() as usize;

    for (y, x) in grid.live_cells() {
        frame.fill_rect(x * s, y * s, s, s);
    }

    if config.gridlines_drawn() {
        draw_gridlines(&mut frame, grid, s);
    }

    frame
}

fn draw_gridlines(frame: &mut Frame, grid: &Grid, s: usize) {
    let right = grid.width() * s;
    let bottom = grid.height() * s;

    // horizontal boundary lines
    for row in 0..=grid.height() {
        let y = (row * s).min(bottom.saturating_sub(1));
        for x in 0..right {
            frame.set_pixel(x, y);
        }
    }

    // vertical boundary lines
    for col in 0..=grid.width() {
        let x = (col * s).min(right.saturating_sub(1));
        for y in 0..bottom {
            frame.set_pixel(x, y);
        }
    }
}
