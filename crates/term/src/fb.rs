//! Framebuffer and style types for terminal rendering.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }
}

impl CellStyle {
    pub const fn fg(fg: Rgb) -> Self {
        Self {
            fg,
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }

    pub const fn on(self, bg: Rgb) -> Self {
        Self { bg, ..self }
    }
}

/// Marks the right half of a two-column glyph; never printed.
pub const CONTINUATION: char = '\0';

/// A single terminal cell.
///
/// `tail` is printed right after `ch` and is used for glyphs made of two
/// code points, such as regional-indicator flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub tail: Option<char>,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            tail: None,
            style: CellStyle::default(),
        }
    }
}

impl Cell {
    pub fn is_continuation(&self) -> bool {
        self.ch == CONTINUATION
    }
}

/// Whether `ch` occupies two terminal columns.
///
/// Covers the emoji this program draws; not a general width table.
pub fn is_wide(ch: char) -> bool {
    matches!(ch as u32, 0x1F000..=0x1FAFF) || matches!(ch, '✨' | '⭐' | '⚡' | '⏱' | '⌛')
}

fn is_regional_indicator(ch: char) -> bool {
    matches!(ch as u32, 0x1F1E6..=0x1F1FF)
}

/// Columns `s` takes when drawn with [`FrameBuffer::put_str`].
pub fn text_width(s: &str) -> u16 {
    let mut width = 0u16;
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{FE0F}' {
            continue;
        }
        if is_regional_indicator(ch) {
            if chars.peek().copied().is_some_and(is_regional_indicator) {
                chars.next();
            }
            width = width.saturating_add(2);
        } else if is_wide(ch) {
            width = width.saturating_add(2);
        } else {
            width = width.saturating_add(1);
        }
    }
    width
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(
            x,
            y,
            Cell {
                ch,
                tail: None,
                style,
            },
        );
    }

    /// Put a two-column glyph. Dropped when it would not fit on the row.
    pub fn put_wide(&mut self, x: u16, y: u16, ch: char, tail: Option<char>, style: CellStyle) {
        if x.saturating_add(1) >= self.width {
            return;
        }
        self.set(x, y, Cell { ch, tail, style });
        self.set(
            x + 1,
            y,
            Cell {
                ch: CONTINUATION,
                tail: None,
                style,
            },
        );
    }

    /// Draw `s` starting at `x`, clipped to the row. Returns the column after the text.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        let mut cx = x;
        let mut chars = s.chars().peekable();
        while let Some(ch) = chars.next() {
            if cx >= self.width {
                break;
            }
            if ch == '\u{FE0F}' {
                continue;
            }
            if is_regional_indicator(ch) {
                let tail = chars.next_if(|&c| is_regional_indicator(c));
                self.put_wide(cx, y, ch, tail, style);
                cx = cx.saturating_add(2);
            } else if is_wide(ch) {
                self.put_wide(cx, y, ch, None, style);
                cx = cx.saturating_add(2);
            } else {
                self.put_char(cx, y, ch, style);
                cx += 1;
            }
        }
        cx
    }

    /// Draw `s` horizontally centred in `[x, x + w)`.
    pub fn put_centered(&mut self, x: u16, y: u16, w: u16, s: &str, style: CellStyle) {
        let offset = w.saturating_sub(text_width(s)) / 2;
        self.put_str(x.saturating_add(offset), y, s, style);
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    pub fn draw_border(&mut self, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        self.put_char(x, y, '┌', style);
        self.put_char(x + w - 1, y, '┐', style);
        self.put_char(x, y + h - 1, '└', style);
        self.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            self.put_char(x + dx, y, '─', style);
            self.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            self.put_char(x, y + dy, '│', style);
            self.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Horizontal gauge of `percent` filled cells out of `w`.
    pub fn put_gauge(&mut self, x: u16, y: u16, w: u16, percent: u8, fill: CellStyle, empty: CellStyle) {
        let filled = (w as u32 * percent.min(100) as u32 / 100) as u16;
        self.fill_rect(x, y, filled, 1, '█', fill);
        self.fill_rect(x + filled, y, w - filled, 1, '░', empty);
    }
}
