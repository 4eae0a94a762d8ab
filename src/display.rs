use crate::screen::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use std::io;
use tui::backend::{Backend, CrosstermBackend};
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

/// Display is used by the host to put the frame buffer on a screen. It
/// should abstract the implementation details, so a variety of kinds of
/// screen would work.
pub trait Display {
    /// draw the current frame
    fn draw(&mut self, frame: &FrameBuffer) -> Result<(), io::Error>;
}

// store useful metadata about the canvas
struct Resolution(usize, usize);

impl Resolution {
    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.0 - 1) as f64]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.1 - 1) as f64, 0.0]
    }

    /// canvas coordinates of every pixel in one state; y grows downwards on
    /// the CHIP-8 but upwards on the canvas
    fn bitplane(&self, frame: &FrameBuffer, lit: bool) -> Vec<(f64, f64)> {
        frame
            .coords(lit)
            .map(|(x, y)| (x as f64, -1.0 * y as f64))
            .collect()
    }
}

/// monochrome display in a terminal, rendered using TUI and Crossterm
pub struct MonoTermDisplay<B: Backend = CrosstermBackend<io::Stdout>> {
    terminal: Terminal<B>,
    resolution: Resolution,
    clipped: bool,
}

impl MonoTermDisplay {
    pub fn new() -> Result<MonoTermDisplay, io::Error> {
        Self::with_backend(CrosstermBackend::new(io::stdout()))
    }
}

impl<B: Backend> MonoTermDisplay<B> {
    pub fn with_backend(backend: B) -> Result<MonoTermDisplay<B>, io::Error> {
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        terminal.hide_cursor()?;
        Ok(MonoTermDisplay {
            terminal,
            resolution: Resolution(SCREEN_WIDTH, SCREEN_HEIGHT),
            clipped: false,
        })
    }

    /// the terminal was too small for the whole screen on the last draw
    pub fn clipped(&self) -> bool {
        self.clipped
    }
}

impl<B: Backend> Drop for MonoTermDisplay<B> {
    fn drop(&mut self) {
        if let Err(e) = self.terminal.show_cursor() {
            log::warn!("couldn't restore cursor: {}", e);
        }
    }
}

impl<B: Backend> Display for MonoTermDisplay<B> {
    fn draw(&mut self, frame: &FrameBuffer) -> Result<(), io::Error> {
        let dark = self.resolution.bitplane(frame, false);
        let lit = self.resolution.bitplane(frame, true);
        let x_bounds = self.resolution.x_bounds();
        let y_bounds = self.resolution.y_bounds();
        // one terminal cell per CHIP-8 pixel, plus the border
        let wanted = Rect::new(
            0,
            0,
            2 + self.resolution.0 as u16,
            2 + self.resolution.1 as u16,
        );
        let mut clipped = false;

        self.terminal.draw(|f| {
            // tui panics on cells outside the terminal, so never ask for them
            let size = wanted.intersection(f.size());
            clipped = size != wanted;
            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("CHIP-8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(x_bounds)
                .y_bounds(y_bounds)
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &dark,
                        color: Color::Black,
                    });
                    ctx.draw(&Points {
                        coords: &lit,
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;

        if clipped && !self.clipped {
            log::warn!(
                "terminal is smaller than {}x{}; the screen is cut off",
                wanted.width,
                wanted.height
            );
        }
        self.clipped = clipped;
        Ok(())
    }
}

/// useful for testing non-display routines; remembers the last frame
pub struct DummyDisplay {
    pub frames_drawn: usize,
    pub last_frame: Option<FrameBuffer>,
}

impl DummyDisplay {
    pub fn new() -> Self {
        DummyDisplay {
            frames_drawn: 0,
            last_frame: None,
        }
    }
}

impl Default for DummyDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DummyDisplay {
    fn draw(&mut self, frame: &FrameBuffer) -> Result<(), io::Error> {
        self.frames_drawn += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
