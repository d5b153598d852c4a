#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Crossterm-backed rendering adapter for Twenty48.
//!
//! The backend switches the terminal into raw mode on the alternate screen,
//! blocks on one terminal event at a time, hands the decoded input to the
//! adapter and redraws the whole grid afterwards. The terminal is restored
//! when the backend returns, including on error paths.

mod palette;

pub use self::palette::load_palette;

use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{
        self, Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;
use twenty48_core::{Direction, MoveState};
use twenty48_rendering::{
    Color, FrameControl, FrameInput, GridPresentation, Presentation, RenderingBackend, Scene,
    LOSS_MESSAGE,
};

const FRAME_COLOR: style::Color = style::Color::Magenta;
const NUMBER_COLOR: style::Color = style::Color::White;
const FRAME_BACKGROUND: style::Color = style::Color::Black;
const ORIGIN_COLUMN: u16 = 1;
const ORIGIN_ROW: u16 = 1;

/// Rendering backend that draws into the controlling terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalBackend;

impl TerminalBackend {
    fn draw(&self, out: &mut impl Write, title: &str, scene: &Scene) -> Result<()> {
        queue!(out, ResetColor, Clear(ClearType::All))?;
        queue!(out, cursor::MoveTo(ORIGIN_COLUMN, 0), Print(title))?;

        let grid = &scene.grid;
        let separator = grid.separator_line();
        let mut row = ORIGIN_ROW;
        for cells in &grid.rows {
            draw_text(out, ORIGIN_COLUMN, row, FRAME_COLOR, FRAME_BACKGROUND, &separator)?;
            row = row.saturating_add(1);

            let mut column = ORIGIN_COLUMN;
            for cell in cells {
                draw_text(out, column, row, FRAME_COLOR, FRAME_BACKGROUND, "|")?;
                draw_text(
                    out,
                    column.saturating_add(1),
                    row,
                    NUMBER_COLOR,
                    to_terminal_color(cell.background),
                    &grid.format_cell(cell.value),
                )?;
                column = column.saturating_add(1).saturating_add(grid.cell_width);
            }
            draw_text(out, column, row, FRAME_COLOR, FRAME_BACKGROUND, "|")?;
            row = row.saturating_add(1);
        }
        draw_text(out, ORIGIN_COLUMN, row, FRAME_COLOR, FRAME_BACKGROUND, &separator)?;

        if scene.state == MoveState::Lost {
            draw_text(
                out,
                0,
                loss_row(grid),
                NUMBER_COLOR,
                FRAME_BACKGROUND,
                LOSS_MESSAGE,
            )?;
        }

        queue!(out, ResetColor)?;
        out.flush().context("failed to flush terminal frame")?;
        Ok(())
    }
}

impl RenderingBackend for TerminalBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> FrameControl,
    {
        let Presentation { title, mut scene } = presentation;

        let mut stdout = io::stdout();
        let _guard = TerminalGuard::enter(&mut stdout)?;
        self.draw(&mut stdout, &title, &scene)?;

        loop {
            let event = event::read().context("failed to read terminal event")?;
            let Some(input) = frame_input(&event) else {
                continue;
            };
            debug!("decoded {input:?} from {event:?}");

            let control = update_scene(input, &mut scene);
            self.draw(&mut stdout, &title, &scene)?;
            if control == FrameControl::Exit {
                return Ok(());
            }
        }
    }
}

/// Translates a terminal event into frame input.
///
/// Arrow keys, `w`/`a`/`s`/`d` and `h`/`j`/`k`/`l` select a direction; `Esc`,
/// `q` and `Ctrl+C` quit. Resize and mouse events produce empty input so the
/// frame is redrawn. Everything else is ignored.
#[must_use]
pub fn frame_input(event: &Event) -> Option<FrameInput> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => key_input(key),
        Event::Resize(..) | Event::Mouse(..) => Some(FrameInput::default()),
        _ => None,
    }
}

fn key_input(key: &KeyEvent) -> Option<FrameInput> {
    let direction = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(quit_input())
        }
        KeyCode::Esc | KeyCode::Char('q') => return Some(quit_input()),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Direction::Up,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Direction::Down,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Direction::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Direction::Right,
        _ => return None,
    };

    Some(FrameInput {
        direction: Some(direction),
        quit: false,
    })
}

const fn quit_input() -> FrameInput {
    FrameInput {
        direction: None,
        quit: true,
    }
}

fn loss_row(grid: &GridPresentation) -> u16 {
    u16::try_from(grid.loss_message_row()).unwrap_or(u16::MAX)
}

fn to_terminal_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.red,
        g: color.green,
        b: color.blue,
    }
}

fn draw_text(
    out: &mut impl Write,
    column: u16,
    row: u16,
    foreground: style::Color,
    background: style::Color,
    text: &str,
) -> Result<()> {
    queue!(
        out,
        cursor::MoveTo(column, row),
        SetForegroundColor(foreground),
        SetBackgroundColor(background),
        SetAttribute(Attribute::Bold),
        Print(text),
        SetAttribute(Attribute::Reset)
    )?;
    Ok(())
}

/// Keeps the terminal in raw mode on the alternate screen while alive.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(stdout: &mut Stdout) -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable terminal raw mode")?;
        if let Err(error) = execute!(stdout, EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(error).context("failed to enter the alternate screen");
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
