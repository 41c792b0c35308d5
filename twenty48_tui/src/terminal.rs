use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
    widgets::*,
};
use tracing::trace;
use twenty48::{Direction as Turn, Screen, Sprite, TileKind, BOARD_HEIGHT, BOARD_WIDTH};

const CELL_WIDTH: u16 = 8;
const CELL_HEIGHT: u16 = 4;
const BOARD_PIXEL_WIDTH: u16 = CELL_WIDTH * BOARD_WIDTH as u16;
const BOARD_PIXEL_HEIGHT: u16 = CELL_HEIGHT * BOARD_HEIGHT as u16;

const BACKGROUND: (u8, u8, u8) = (187, 173, 160);
const EMPTY_CELL: (u8, u8, u8) = (205, 193, 180);
const DARK_TEXT: (u8, u8, u8) = (119, 110, 101);
const LIGHT_TEXT: (u8, u8, u8) = (249, 246, 242);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Message {
    Win,
    Lose,
}

/// A [`Screen`] on the terminal.
///
/// Terminals only report key presses, so a key counts as held down between
/// the `poll_events()` call that received its press and the next one.
pub struct TerminalScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    start: Instant,
    sprites: Vec<Sprite>,
    message: Option<Message>,
    held: Vec<Turn>,
    closed: bool,
}

impl TerminalScreen {
    /// Switches the terminal to raw mode and the alternate screen.
    pub fn new() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self {
            terminal,
            start: Instant::now(),
            sprites: Vec::new(),
            message: None,
            held: Vec::new(),
            closed: false,
        })
    }

    /// Puts the terminal back into its normal state.
    pub fn restore(&mut self) -> anyhow::Result<()> {
        disable_raw_mode()?;
        stdout().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let turn = match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(Turn::Up),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(Turn::Right),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(Turn::Down),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(Turn::Left),
            KeyCode::Char('q') | KeyCode::Esc => {
                self.closed = true;
                None
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.closed = true;
                None
            }
            _ => None,
        };
        if let Some(turn) = turn {
            trace!(?turn, "Key pressed");
            if !self.held.contains(&turn) {
                self.held.push(turn);
            }
        }
    }
}

impl Screen for TerminalScreen {
    fn is_key_down(&self, direction: Turn) -> bool {
        self.held.contains(&direction)
    }

    fn draw_tile(&mut self, row: f32, col: f32, kind: TileKind, opacity: f32) {
        self.sprites.push(Sprite {
            row,
            col,
            kind,
            opacity,
        });
    }

    fn draw_win_message(&mut self) {
        self.message = Some(Message::Win);
    }

    fn draw_lose_message(&mut self) {
        self.message = Some(Message::Lose);
    }

    fn present(&mut self) -> anyhow::Result<()> {
        let sprites = std::mem::take(&mut self.sprites);
        let message = self.message.take();
        self.terminal.draw(|frame| ui(frame, &sprites, message))?;
        Ok(())
    }

    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn poll_events(&mut self) -> anyhow::Result<()> {
        self.held.clear();
        let mut timeout = Duration::from_millis(16);
        while event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
            timeout = Duration::ZERO;
        }
        Ok(())
    }

    fn closed(&self) -> bool {
        self.closed
    }
}

fn ui(frame: &mut Frame, sprites: &[Sprite], message: Option<Message>) {
    let main_layout = Layout::new(
        Direction::Vertical,
        [
            Constraint::Min(0),
            Constraint::Length(BOARD_PIXEL_HEIGHT + 2),
            Constraint::Length(2),
            Constraint::Min(0),
        ],
    )
    .split(frame.size());
    let board_area = centered(main_layout[1], BOARD_PIXEL_WIDTH + 2);
    let message_area = centered(main_layout[2], BOARD_PIXEL_WIDTH + 2);

    frame.render_widget(BoardWidget { sprites }, board_area);

    let text = match message {
        Some(Message::Win) => "You win! Press q to quit.",
        Some(Message::Lose) => "Game over. Press q to quit.",
        None => "Arrows, WASD or hjkl to move, q to quit",
    };
    let style = match message {
        Some(_) => Style::new().bold(),
        None => Style::new().dim(),
    };
    frame.render_widget(
        Paragraph::new(text).style(style).alignment(Alignment::Center),
        message_area,
    );
}

fn centered(area: Rect, width: u16) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(area)[1]
}

struct BoardWidget<'a> {
    sprites: &'a [Sprite],
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame_block = Block::new()
            .border_type(BorderType::Rounded)
            .borders(Borders::all())
            .style(Style::new().bg(rgb(BACKGROUND)));
        let inner = frame_block.inner(area);
        frame_block.render(area, buf);

        for i in 0..BOARD_HEIGHT {
            for j in 0..BOARD_WIDTH {
                if let Some(rect) = cell_rect(inner, i as f32, j as f32) {
                    Block::new()
                        .style(Style::new().bg(rgb(EMPTY_CELL)))
                        .render(rect, buf);
                }
            }
        }

        for sprite in self.sprites {
            if sprite.opacity <= 0.0 {
                continue;
            }
            let Some(rect) = cell_rect(inner, sprite.row, sprite.col) else {
                continue;
            };
            let (bg, fg) = tile_colors(sprite.kind);
            let bg = blend(EMPTY_CELL, bg, sprite.opacity);
            let fg = blend(EMPTY_CELL, fg, sprite.opacity);
            let tile = Block::new()
                .border_type(BorderType::Rounded)
                .borders(Borders::all())
                .style(Style::new().bg(bg).fg(fg));
            let label_area = tile.inner(rect);
            tile.render(rect, buf);
            let label = Paragraph::new(sprite.kind.label())
                .style(Style::new().bold())
                .alignment(Alignment::Center);
            let centered_row = Rect {
                y: label_area.y + label_area.height.saturating_sub(1) / 2,
                height: label_area.height.min(1),
                ..label_area
            };
            label.render(centered_row, buf);
        }
    }
}

// The terminal area of the cell at a fractional position, clipped to the board
fn cell_rect(inner: Rect, row: f32, col: f32) -> Option<Rect> {
    let x = inner.x as f32 + col * CELL_WIDTH as f32;
    let y = inner.y as f32 + row * CELL_HEIGHT as f32;
    let rect = Rect {
        x: x.round().max(0.0) as u16,
        y: y.round().max(0.0) as u16,
        width: CELL_WIDTH,
        height: CELL_HEIGHT,
    }
    .intersection(inner);
    (!rect.is_empty()).then_some(rect)
}

fn tile_colors(kind: TileKind) -> (Color, Color) {
    let (bg, fg) = match kind {
        TileKind::Two => ((238, 228, 218), DARK_TEXT),
        TileKind::Four => ((237, 224, 200), DARK_TEXT),
        TileKind::Eight => ((242, 177, 121), LIGHT_TEXT),
        TileKind::Sixteen => ((245, 149, 99), LIGHT_TEXT),
        TileKind::ThirtyTwo => ((246, 124, 95), LIGHT_TEXT),
        TileKind::SixtyFour => ((246, 94, 59), LIGHT_TEXT),
        TileKind::OneHundredTwentyEight => ((237, 207, 114), LIGHT_TEXT),
        TileKind::TwoHundredFiftySix => ((237, 204, 97), LIGHT_TEXT),
        TileKind::FiveHundredTwelve => ((237, 200, 80), LIGHT_TEXT),
        TileKind::OneThousandTwentyFour => ((237, 197, 63), LIGHT_TEXT),
        TileKind::TwoThousandFortyEight => ((237, 194, 46), LIGHT_TEXT),
    };
    (rgb(bg), rgb(fg))
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

// Mixes `color` into `base`; opacity 0 gives `base`, 1 gives `color`.
fn blend(base: (u8, u8, u8), color: Color, opacity: f32) -> Color {
    let Color::Rgb(r, g, b) = color else {
        return color;
    };
    let opacity = opacity.clamp(0.0, 1.0);
    let mix = |from: u8, to: u8| (from as f32 + (to as f32 - from as f32) * opacity).round() as u8;
    Color::Rgb(mix(base.0, r), mix(base.1, g), mix(base.2, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blending() {
        let color = Color::Rgb(100, 200, 0);
        assert_eq!(blend((0, 0, 0), color, 1.0), color);
        assert_eq!(blend((0, 0, 0), color, 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(blend((0, 0, 100), color, 0.5), Color::Rgb(50, 100, 50));
        assert_eq!(blend((0, 0, 0), color, 7.0), color);
    }

    #[test]
    fn cells_are_clipped_to_the_board() {
        let inner = Rect::new(1, 1, BOARD_PIXEL_WIDTH, BOARD_PIXEL_HEIGHT);
        assert_eq!(
            cell_rect(inner, 0.0, 0.0),
            Some(Rect::new(1, 1, CELL_WIDTH, CELL_HEIGHT))
        );
        assert_eq!(
            cell_rect(inner, 1.5, 3.0),
            Some(Rect::new(1 + 3 * CELL_WIDTH, 1 + 6, CELL_WIDTH, CELL_HEIGHT))
        );
        let small = Rect::new(1, 1, 10, 3);
        assert_eq!(cell_rect(small, 0.0, 1.0), Some(Rect::new(9, 1, 2, 3)));
        assert_eq!(cell_rect(small, 2.0, 2.0), None);
    }
}
