//! GameView: maps a [`SessionSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Tile sizes shrink until the board fits the viewport, so an 8x8 board still
//! renders in a small terminal (one row per tile at the smallest size).

use crate::core::SessionSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, Tile};

const BACKGROUND: Rgb = Rgb::new(10, 10, 15);
const BOARD: Rgb = Rgb::new(22, 22, 29);
const EMPTY_TILE: Rgb = Rgb::new(26, 26, 46);
const BORDER: Rgb = Rgb::new(42, 42, 62);
const TEXT: Rgb = Rgb::new(255, 255, 255);
const TEXT_MUTED: Rgb = Rgb::new(150, 150, 160);
const DARK_TEXT: Rgb = Rgb::new(10, 10, 15);
const ACCENT: Rgb = Rgb::new(0, 217, 255);
const SUCCESS: Rgb = Rgb::new(0, 255, 136);
const DANGER: Rgb = Rgb::new(255, 0, 110);

/// Tile sizes tried in order, largest first: (columns, rows) per cell,
/// including the one-column and one-row gutter between tiles.
const CELL_SIZES: [(u16, u16); 4] = [(8, 4), (7, 3), (6, 2), (6, 1)];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Display toggles that live in the user settings, not in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Dots on empty cells.
    pub show_grid: bool,
    /// Glow colour on tiles merged by the last move.
    pub highlight_merges: bool,
    pub sound_enabled: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_grid: true,
            highlight_merges: true,
            sound_enabled: true,
        }
    }
}

/// Base and glow colour of a tile value.
pub fn tile_colors(value: Tile) -> (Rgb, Rgb) {
    match value {
        2 => (Rgb::new(0x00, 0xD9, 0xFF), Rgb::new(0x00, 0xFF, 0xFF)),
        4 => (Rgb::new(0x00, 0x99, 0xFF), Rgb::new(0x66, 0xCC, 0xFF)),
        8 => (Rgb::new(0x7B, 0x2F, 0xFF), Rgb::new(0xAA, 0x66, 0xFF)),
        16 => (Rgb::new(0xB0, 0x26, 0xFF), Rgb::new(0xD9, 0x66, 0xFF)),
        32 => (Rgb::new(0xFF, 0x00, 0x6E), Rgb::new(0xFF, 0x66, 0xB2)),
        64 => (Rgb::new(0xFF, 0x4D, 0x00), Rgb::new(0xFF, 0x8C, 0x42)),
        128 => (Rgb::new(0xFF, 0x8C, 0x00), Rgb::new(0xFF, 0xB3, 0x47)),
        256 => (Rgb::new(0xFF, 0xD7, 0x00), Rgb::new(0xFF, 0xED, 0x4E)),
        512 => (Rgb::new(0xFF, 0xED, 0x4E), Rgb::new(0xFF, 0xF9, 0xA6)),
        1024 => (Rgb::new(0xFF, 0xF9, 0xA6), Rgb::new(0xFF, 0xFF, 0xCC)),
        2048 => (Rgb::new(0xFF, 0xFF, 0xFF), Rgb::new(0xFF, 0xFF, 0xFF)),
        4096 => (Rgb::new(0xFF, 0xB3, 0xFF), Rgb::new(0xFF, 0xE6, 0xFF)),
        8192 => (Rgb::new(0xB3, 0xFF, 0xFF), Rgb::new(0xE6, 0xFF, 0xFF)),
        16384 => (Rgb::new(0xFF, 0xB3, 0xB3), Rgb::new(0xFF, 0xE6, 0xE6)),
        32768 => (Rgb::new(0xB3, 0xFF, 0xB3), Rgb::new(0xE6, 0xFF, 0xE6)),
        65536 => (Rgb::new(0xFF, 0xB3, 0xE6), Rgb::new(0xFF, 0xE6, 0xF9)),
        _ => (EMPTY_TILE, EMPTY_TILE),
    }
}

/// Dark text on the bright tiles, white elsewhere.
pub fn tile_text_color(value: Tile) -> Rgb {
    if value == 2 || value >= 256 {
        DARK_TEXT
    } else {
        TEXT
    }
}

/// Where the board lands in a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Top-left corner of the border.
    pub x: u16,
    pub y: u16,
    /// Border size.
    pub frame_w: u16,
    pub frame_h: u16,
    pub cell_w: u16,
    pub cell_h: u16,
}

impl BoardLayout {
    /// Top-left terminal cell of tile (row, col).
    pub fn tile_origin(&self, row: usize, col: usize) -> (u16, u16) {
        let top_gap = u16::from(self.cell_h > 1);
        (
            self.x + 2 + (col as u16) * self.cell_w,
            self.y + 1 + top_gap + (row as u16) * self.cell_h,
        )
    }

    /// Tile size without the gutter.
    pub fn tile_size(&self) -> (u16, u16) {
        let h = if self.cell_h > 1 { self.cell_h - 1 } else { 1 };
        (self.cell_w - 1, h)
    }
}

/// A lightweight terminal renderer for the board and its side panel.
#[derive(Debug, Clone, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Pick the largest tile size whose frame fits the viewport.
    pub fn layout(&self, side: usize, viewport: Viewport) -> BoardLayout {
        let side = side as u16;
        let frame = |(cw, ch): (u16, u16)| {
            let top_gap = u16::from(ch > 1);
            (side * cw + 1 + 2, side * ch + top_gap + 2)
        };

        let (cell_w, cell_h) = CELL_SIZES
            .iter()
            .copied()
            .find(|&size| {
                let (w, h) = frame(size);
                w <= viewport.width && h <= viewport.height
            })
            .unwrap_or(CELL_SIZES[CELL_SIZES.len() - 1]);
        let (frame_w, frame_h) = frame((cell_w, cell_h));

        // Leave room for the side panel when the viewport is wide enough.
        let panel = if viewport.width >= frame_w + PANEL_WIDTH + 2 {
            PANEL_WIDTH + 2
        } else {
            0
        };
        BoardLayout {
            x: viewport.width.saturating_sub(frame_w + panel) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
            cell_w,
            cell_h,
        }
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it only reallocates
    /// when the viewport grows.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        viewport: Viewport,
        opts: ViewOptions,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::plain(TEXT, BACKGROUND).into_cell(' '));

        let layout = self.layout(snap.grid.side(), viewport);
        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            CellStyle::plain(TEXT, BOARD),
        );
        fb.draw_box(
            layout.x,
            layout.y,
            layout.frame_w,
            layout.frame_h,
            CellStyle::plain(BORDER, BACKGROUND),
        );

        for (row, values) in snap.grid.rows().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                let highlight = opts.highlight_merges && snap.merged_at(row, col);
                self.draw_tile(fb, &layout, row, col, value, highlight, opts.show_grid);
            }
        }

        self.draw_side_panel(fb, snap, opts, viewport, &layout);

        match snap.status {
            GameStatus::Won => self.draw_overlay(fb, &layout, "YOU WIN!", "c continue  n new game", SUCCESS),
            GameStatus::Lost => self.draw_overlay(fb, &layout, "GAME OVER", "u undo  n new game", DANGER),
            GameStatus::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport, opts: ViewOptions) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, opts, &mut fb);
        fb
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        row: usize,
        col: usize,
        value: Tile,
        highlight: bool,
        show_grid: bool,
    ) {
        let (x, y) = layout.tile_origin(row, col);
        let (w, h) = layout.tile_size();
        let text_y = y + (h - 1) / 2;

        if value == 0 {
            let style = CellStyle::plain(TEXT_MUTED, EMPTY_TILE).dim();
            fb.fill_rect(x, y, w, h, ' ', style);
            if show_grid {
                fb.put_str_centered(x, text_y, w, "·", style);
            }
            return;
        }

        let (base, glow) = tile_colors(value);
        let bg = if highlight { glow } else { base };
        let style = CellStyle::plain(tile_text_color(value), bg).bold();
        fb.fill_rect(x, y, w, h, ' ', style);
        if highlight && h > 1 {
            fb.put_char(x, y, '*', style);
        }

        let mut digits = [0u8; 10];
        let text = crate::fb::format_u32(value, &mut digits);
        fb.put_str_centered(x, text_y, w, text, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        opts: ViewOptions,
        viewport: Viewport,
        layout: &BoardLayout,
    ) {
        let panel_x = layout.x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x.saturating_add(PANEL_WIDTH) > viewport.width {
            return;
        }

        let label = CellStyle::plain(ACCENT, BACKGROUND).bold();
        let value = CellStyle::plain(TEXT, BACKGROUND);
        let muted = CellStyle::plain(TEXT_MUTED, BACKGROUND);

        let mut y = layout.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("BEST", snap.best_score),
            ("MOVES", snap.moves),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x + 7, y, n, value);
            y = y.saturating_add(1);
        }

        fb.put_str(panel_x, y, "SIZE", label);
        let side = snap.size.get() as u32;
        fb.put_u32(panel_x + 7, y, side, value);
        fb.put_char(panel_x + 8, y, 'x', value);
        fb.put_u32(panel_x + 9, y, side, value);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "UNDO", label);
        fb.put_u32(panel_x + 7, y, snap.undo_depth as u32, value);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "SOUND", label);
        fb.put_str(panel_x + 7, y, if opts.sound_enabled { "on" } else { "off" }, value);
        y = y.saturating_add(2);

        for line in HELP_LINES {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, muted);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: &BoardLayout, title: &str, hint: &str, color: Rgb) {
        let mid_y = layout.y.saturating_add(layout.frame_h / 2);
        let inner_x = layout.x + 1;
        let inner_w = layout.frame_w - 2;

        let banner = CellStyle::plain(color, BACKGROUND).bold();
        fb.fill_rect(inner_x, mid_y.saturating_sub(1), inner_w, 3, ' ', banner);
        fb.put_str_centered(inner_x, mid_y.saturating_sub(1), inner_w, title, banner);
        fb.put_str_centered(inner_x, mid_y, inner_w, hint, CellStyle::plain(TEXT, BACKGROUND));
    }
}

const PANEL_WIDTH: u16 = 20;

const HELP_LINES: [&str; 7] = [
    "arrows/wasd  move",
    "u  undo",
    "n  new game",
    "3-8  board size",
    "g  grid  p  glow",
    "m  sound",
    "q  quit",
];
