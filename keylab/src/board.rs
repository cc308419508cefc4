//! The bench proper: keypad, repeat gate, keyboard, and surface wired
//! into one [`Component`].

use std::time::Instant;

use crossbeam_channel::Sender;
use padkey_core::{Button, GridKeyboard, KeyGrid, RepeatGate};
use ratatui::{
    Frame,
    crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use tracing::{debug, info};

use crate::{
    Component, GlobalEvent,
    helpers::{SCHEME, centered_rect, now_ms},
    keypad::Keypad,
    surface::Surface,
};

pub struct Board {
    started: Instant,
    keypad: Keypad,
    gate: RepeatGate,
    keyboard: GridKeyboard<'static>,
    surface: Surface,
    entered: String,
    repaint_full: bool,
    tx: Sender<GlobalEvent>,
}

impl Board {
    pub fn init(grid: KeyGrid<'static>, tx: Sender<GlobalEvent>) -> Self {
        Self {
            started: Instant::now(),
            keypad: Keypad::new(),
            gate: RepeatGate::new(),
            keyboard: GridKeyboard::new(grid),
            surface: Surface::new(&grid),
            entered: String::new(),
            repaint_full: false,
            tx,
        }
    }
}

impl Component for Board {
    fn update(&mut self, events: Vec<Event>) {
        let now = now_ms(self.started);

        for event in events {
            match event {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press | KeyEventKind::Repeat,
                    ..
                }) => match code {
                    KeyCode::Esc | KeyCode::Char('q') => {
                        let _ = self.tx.send(GlobalEvent::Quit);
                    }
                    code => {
                        if let Some(button) = Keypad::button_for(code) {
                            self.keypad.press(button, now);
                        }
                    }
                },
                // The terminal may have scrambled or dropped cells.
                Event::Resize(_, _) => self.repaint_full = true,
                _ => {}
            }
        }

        let held = self.keypad.held(now);
        self.keyboard.advance(&mut self.gate, held, now);

        if self
            .gate
            .classify(Button::A, held.contains(Button::A.flag()), now)
        {
            let glyph = self.keyboard.current_char();
            self.entered.push(glyph);
            info!("typed {glyph:?}");
        }
        if self
            .gate
            .classify(Button::B, held.contains(Button::B.flag()), now)
            && self.entered.pop().is_some()
        {
            debug!("erased one glyph");
        }

        for op in self.keyboard.render(self.repaint_full) {
            self.surface.apply(&op);
        }
        self.repaint_full = false;
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_set(border::ROUNDED)
            .title("─ PadKey Lab ")
            .title_style(SCHEME.style(Color::Rgb(36, 36, 36)).italic().bold());
        block.render(area, frame.buffer_mut());

        let inner = centered_rect(80, 80, area);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Length(self.surface.height() as u16 + 1),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .split(inner);

        let mut lines: Vec<Line> = Vec::with_capacity(self.surface.height() as usize);
        for y in 0..self.surface.height() {
            let mut spans = Vec::with_capacity(self.surface.width() as usize);
            for x in 0..self.surface.width() {
                let cell = self.surface.cell(x, y);
                let span = Span::from(format!(" {} ", cell.glyph));
                spans.push(if cell.selected {
                    span.fg(SCHEME.black[0]).bg(SCHEME.orange[2]).bold()
                } else {
                    span.fg(SCHEME.white[1])
                });
            }
            lines.push(Line::from(spans));
        }
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(layout[0], frame.buffer_mut());

        let entered = Line::from(vec![
            Span::from("» ").fg(SCHEME.gray[1]),
            Span::from(self.entered.clone()).fg(SCHEME.green[2]),
            Span::from("_")
                .fg(SCHEME.orange[2])
                .add_modifier(Modifier::SLOW_BLINK),
        ]);
        Paragraph::new(entered)
            .alignment(Alignment::Center)
            .render(layout[1], frame.buffer_mut());

        let hints = Line::from("arrows move | enter/space types | backspace erases | q quits")
            .fg(SCHEME.gray[2])
            .italic();
        Paragraph::new(hints)
            .alignment(Alignment::Center)
            .render(layout[2], frame.buffer_mut());
    }
}
