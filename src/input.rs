//! Terminal input for the Simon board.
//!
//! Maps crossterm key and mouse events onto game input. Pads are addressed
//! by color hotkey, by position (1-4), or by clicking them.

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;
use simon::presentation::{InputEvent, InputSource};
use simon::simon::{ButtonLayout, Symbol};
use std::time::Duration;

/// Reads pending crossterm events without blocking.
pub struct CrosstermInput {
    layout: ButtonLayout,
    /// Screen area of each pad position, as drawn last frame.
    pad_areas: [Rect; 4],
}

impl CrosstermInput {
    pub fn new(layout: ButtonLayout) -> Self {
        Self {
            layout,
            pad_areas: [Rect::default(); 4],
        }
    }

    pub fn set_pad_areas(&mut self, areas: [Rect; 4]) {
        self.pad_areas = areas;
    }
}

impl InputSource for CrosstermInput {
    fn poll_event(&mut self) -> Option<InputEvent> {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => {
                    log::error!("terminal input failed: {}", e);
                    return Some(InputEvent::Quit);
                }
            }
            let mapped = match event::read() {
                Ok(Event::Key(key)) => map_key(key, &self.layout),
                Ok(Event::Mouse(mouse)) => map_mouse(mouse, &self.pad_areas, &self.layout),
                Ok(_) => None,
                Err(e) => {
                    log::error!("terminal input failed: {}", e);
                    return Some(InputEvent::Quit);
                }
            };
            if mapped.is_some() {
                return mapped;
            }
        }
    }
}

/// Translate a key press. Releases and repeats are ignored.
pub fn map_key(key: KeyEvent, layout: &ButtonLayout) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Esc => Some(InputEvent::EscapePressed),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputEvent::Quit),
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputEvent::Confirm),
        KeyCode::Char(c @ '1'..='4') => {
            let position = c as usize - '1' as usize;
            layout.symbol_at(position).map(InputEvent::SymbolClicked)
        }
        KeyCode::Char(c) => {
            let c = c.to_ascii_lowercase();
            Symbol::ALL
                .into_iter()
                .find(|s| s.hotkey() == c)
                .map(InputEvent::SymbolClicked)
        }
        _ => None,
    }
}

/// Translate a mouse event. A left click on a pad selects it; anywhere
/// else it confirms.
pub fn map_mouse(
    mouse: MouseEvent,
    pad_areas: &[Rect; 4],
    layout: &ButtonLayout,
) -> Option<InputEvent> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    let hit = pad_areas
        .iter()
        .position(|area| contains(*area, mouse.column, mouse.row));
    match hit {
        Some(position) => layout.symbol_at(position).map(InputEvent::SymbolClicked),
        None => Some(InputEvent::Confirm),
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
