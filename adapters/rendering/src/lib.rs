#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Twenty48 adapters.
//!
//! Scenes are built from read-only board views and consumed by backends. The
//! layout is character based: every cell occupies `cell_width` columns
//! framed by `|` separators, and every row of cells is preceded and followed
//! by a placeholder line of `-` characters.

use anyhow::Result as AnyResult;
use std::fmt::Write as _;
use thiserror::Error;
use twenty48_core::{BoardView, Direction, MoveState};

/// Width of a cell when the adapter does not request another one.
pub const DEFAULT_CELL_WIDTH: u16 = 6;

/// Message shown once a move was attempted on a full board.
pub const LOSS_MESSAGE: &str = "You've lost.";

/// Message reported when no empty cell could be found for a new tile.
pub const NO_PLACEMENT_MESSAGE: &str = "Could not place any new tile. You've lost";

const CELL_SEPARATOR: char = '|';
const PLACEHOLDER: char = '-';

/// Opaque RGB color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel intensity.
    pub red: u8,
    /// Green channel intensity.
    pub green: u8,
    /// Blue channel intensity.
    pub blue: u8,
}

impl Color {
    /// Terminal black.
    pub const BLACK: Color = Color::from_rgb_u8(0x00, 0x00, 0x00);
    /// Terminal red.
    pub const RED: Color = Color::from_rgb_u8(0xcd, 0x00, 0x00);
    /// Terminal green.
    pub const GREEN: Color = Color::from_rgb_u8(0x00, 0xcd, 0x00);
    /// Terminal yellow.
    pub const YELLOW: Color = Color::from_rgb_u8(0xcd, 0xcd, 0x00);
    /// Terminal blue.
    pub const BLUE: Color = Color::from_rgb_u8(0x00, 0x00, 0xee);
    /// Terminal magenta.
    pub const MAGENTA: Color = Color::from_rgb_u8(0xcd, 0x00, 0xcd);
    /// Terminal cyan.
    pub const CYAN: Color = Color::from_rgb_u8(0x00, 0xcd, 0xcd);
    /// Terminal white.
    pub const WHITE: Color = Color::from_rgb_u8(0xe5, 0xe5, 0xe5);

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses `#rrggbb` notation.
    pub fn from_hex(value: &str) -> Result<Self, RenderingError> {
        let invalid = || RenderingError::InvalidColor {
            value: value.to_owned(),
        };
        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self::from_rgb_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Background colors assigned to tiles by magnitude.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    empty: Color,
    tiles: Vec<Color>,
}

impl Palette {
    /// Creates a palette; tile colors cycle by `log2(value)`.
    pub fn new(empty: Color, tiles: Vec<Color>) -> Result<Self, RenderingError> {
        if tiles.is_empty() {
            return Err(RenderingError::EmptyPalette);
        }
        Ok(Self { empty, tiles })
    }

    /// Background of an empty cell.
    #[must_use]
    pub const fn empty(&self) -> Color {
        self.empty
    }

    /// Background used for a cell holding `value`.
    #[must_use]
    pub fn color_for(&self, value: u32) -> Color {
        if value == 0 {
            return self.empty;
        }
        let exponent = value.ilog2() as usize;
        self.tiles[exponent % self.tiles.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            empty: Color::BLACK,
            tiles: vec![
                Color::RED,
                Color::GREEN,
                Color::YELLOW,
                Color::BLUE,
                Color::MAGENTA,
                Color::CYAN,
                Color::WHITE,
            ],
        }
    }
}

/// Single cell prepared for drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPresentation {
    /// Value displayed in the cell; zero for an empty cell.
    pub value: u32,
    /// Background color of the cell.
    pub background: Color,
}

/// Grid of cells prepared for drawing, listed top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridPresentation {
    /// Number of characters reserved for each cell's number.
    pub cell_width: u16,
    /// Rows of cells from top to bottom.
    pub rows: Vec<Vec<CellPresentation>>,
}

impl GridPresentation {
    /// Captures the board using the palette for cell backgrounds.
    pub fn new(
        board: BoardView<'_>,
        palette: &Palette,
        cell_width: u16,
    ) -> Result<Self, RenderingError> {
        if cell_width == 0 {
            return Err(RenderingError::InvalidCellWidth { cell_width });
        }

        let mut grid = Self {
            cell_width,
            rows: Vec::new(),
        };
        grid.update(board, palette);
        Ok(grid)
    }

    /// Replaces the cell contents with the current board, keeping the layout.
    pub fn update(&mut self, board: BoardView<'_>, palette: &Palette) {
        self.rows = board
            .rows()
            .map(|row| {
                row.iter()
                    .map(|&value| CellPresentation {
                        value,
                        background: palette.color_for(value),
                    })
                    .collect()
            })
            .collect();
    }

    /// Number of cell columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Number of cell rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Placeholder line drawn above, between and below rows of cells.
    #[must_use]
    pub fn separator_line(&self) -> String {
        let placeholder: String =
            std::iter::repeat(PLACEHOLDER).take(usize::from(self.cell_width)).collect();
        let mut line = String::new();
        for _ in 0..self.columns() {
            line.push(CELL_SEPARATOR);
            line.push_str(&placeholder);
        }
        line.push(CELL_SEPARATOR);
        line
    }

    /// Right-aligns `value` within the cell width.
    #[must_use]
    pub fn format_cell(&self, value: u32) -> String {
        format!("{value:>width$}", width = usize::from(self.cell_width))
    }

    /// Screen row, relative to the top of the frame, at which the loss message is drawn.
    #[must_use]
    pub fn loss_message_row(&self) -> usize {
        self.row_count() * 2 + 3
    }
}

/// Scene description combining the grid and the state of the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Grid prepared for drawing.
    pub grid: GridPresentation,
    /// Whether the game still accepts moves.
    pub state: MoveState,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub const fn new(grid: GridPresentation, state: MoveState) -> Self {
        Self { grid, state }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    /// Title shown above the grid.
    pub title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            scene,
        }
    }
}

/// Input gathered by a backend from a single terminal event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Direction requested by the player, if any.
    pub direction: Option<Direction>,
    /// Whether the player asked to leave the game.
    pub quit: bool,
}

/// Decision returned by the scene update callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Redraw and wait for the next event.
    Continue,
    /// Redraw once more and stop the backend.
    Exit,
}

/// Rendering backend capable of presenting Twenty48 scenes.
pub trait RenderingBackend {
    /// Runs the backend until the update callback requests an exit.
    ///
    /// The callback receives the input decoded from each event and may
    /// replace the scene before it is drawn again.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> FrameControl;
}

/// Lays the scene out as plain text, one line per screen row.
#[must_use]
pub fn render_plain(scene: &Scene) -> String {
    let grid = &scene.grid;
    let separator = grid.separator_line();
    let mut out = String::new();

    for row in &grid.rows {
        out.push_str(&separator);
        out.push('\n');
        for cell in row {
            out.push(CELL_SEPARATOR);
            out.push_str(&grid.format_cell(cell.value));
        }
        out.push(CELL_SEPARATOR);
        out.push('\n');
    }
    out.push_str(&separator);
    out.push('\n');

    if scene.state == MoveState::Lost {
        let _ = writeln!(out, "{LOSS_MESSAGE}");
    }
    out
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderingError {
    /// Cells must be at least one character wide.
    #[error("cell_width must be positive (received {cell_width})")]
    InvalidCellWidth {
        /// Provided width that failed validation.
        cell_width: u16,
    },
    /// Palettes need at least one tile color.
    #[error("palette must list at least one tile color")]
    EmptyPalette,
    /// A color string was not in `#rrggbb` notation.
    #[error("invalid color {value:?}, expected #rrggbb")]
    InvalidColor {
        /// Offending text.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use twenty48_core::GridSize;

    fn scene(cells: &[u32], width: u32, height: u32, state: MoveState) -> Scene {
        let size = GridSize::new(width, height).expect("valid size");
        let grid = GridPresentation::new(BoardView::new(cells, size), &Palette::default(), 6)
            .expect("positive cell width");
        Scene::new(grid, state)
    }

    #[test]
    fn palette_cycles_through_seven_colors() {
        let palette = Palette::default();

        assert_eq!(palette.color_for(0), Color::BLACK);
        assert_eq!(palette.color_for(2), Color::GREEN);
        assert_eq!(palette.color_for(4), Color::YELLOW);
        assert_eq!(palette.color_for(128), Color::RED);
        assert_eq!(palette.color_for(256), Color::GREEN);
    }

    #[test]
    fn palette_rejects_empty_tile_list() {
        assert_eq!(
            Palette::new(Color::BLACK, Vec::new()),
            Err(RenderingError::EmptyPalette)
        );
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(
            Color::from_hex("#ff8000"),
            Ok(Color::from_rgb_u8(0xff, 0x80, 0x00))
        );
        assert!(Color::from_hex("ff8000").is_err());
        assert!(Color::from_hex("#ff80").is_err());
        assert!(Color::from_hex("#gg8000").is_err());
    }

    #[test]
    fn grid_rejects_zero_cell_width() {
        let size = GridSize::new(1, 1).expect("valid size");
        let error = GridPresentation::new(BoardView::new(&[0], size), &Palette::default(), 0)
            .expect_err("zero width must be rejected");

        assert_eq!(error, RenderingError::InvalidCellWidth { cell_width: 0 });
    }

    #[test]
    fn plain_layout_matches_bordered_grid() {
        let rendered = render_plain(&scene(&[2, 0, 16, 2048], 2, 2, MoveState::Ready));

        assert_eq!(
            rendered,
            "|------|------|\n\
             |     2|     0|\n\
             |------|------|\n\
             |    16|  2048|\n\
             |------|------|\n"
        );
    }

    #[test]
    fn plain_layout_appends_loss_message() {
        let rendered = render_plain(&scene(&[2, 4], 2, 1, MoveState::Lost));

        assert!(rendered.ends_with("You've lost.\n"));
    }

    #[test]
    fn update_keeps_cell_width_and_recolors() {
        let mut scene = scene(&[0, 2], 2, 1, MoveState::Ready);
        let size = GridSize::new(2, 1).expect("valid size");

        scene
            .grid
            .update(BoardView::new(&[4, 0], size), &Palette::default());

        assert_eq!(scene.grid.cell_width, 6);
        assert_eq!(scene.grid.rows[0][0].value, 4);
        assert_eq!(scene.grid.rows[0][0].background, Color::YELLOW);
        assert_eq!(scene.grid.rows[0][1].background, Color::BLACK);
    }

    #[test]
    fn loss_message_sits_below_the_grid() {
        let scene = scene(&[0; 16], 4, 4, MoveState::Ready);

        assert_eq!(scene.grid.loss_message_row(), 11);
        assert_eq!(scene.grid.columns(), 4);
    }
}
