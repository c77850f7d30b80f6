//! Simon board rendering.

use super::game_common::{
    create_game_layout, render_info_panel_frame, render_modal, render_status_bar,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use simon::core::constants::{MAX_LEVELS, MAX_SEQUENCE_LENGTH};
use simon::presentation::{BoardView, MessageStyle, TimerBand};
use simon::simon::{SimonGame, SimonPhase, Symbol};

const CONTROLS: &[(&str, &str)] = &[
    ("[R/G/B/Y]", "Color"),
    ("[1-4]", "Pad"),
    ("[Click]", "Press"),
    ("[Esc]", "Quit"),
];

/// Render the whole Simon screen. Returns the screen area of each pad
/// position so mouse clicks can be mapped back onto pads.
pub fn render_simon(frame: &mut Frame, area: Rect, game: &SimonGame, board: &BoardView) -> [Rect; 4] {
    let layout = create_game_layout(frame, area, " Simon ", Color::Cyan, 24);

    let pads = render_pads(frame, layout.content, game, board);
    render_status(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game, board);

    if let Some((text, style)) = &board.message {
        render_modal(frame, layout.content, message_color(*style), text, &[]);
    } else if game.phase == SimonPhase::AwaitingStart {
        render_modal(
            frame,
            layout.content,
            Color::Cyan,
            "Welcome to Simon!",
            &[
                "Watch the pads light up, then repeat",
                "the sequence. Each level adds a step.",
                "",
                "Click or press Enter to start",
            ],
        );
    } else if game.phase == SimonPhase::GameWon {
        render_modal(
            frame,
            layout.content,
            Color::Green,
            "VICTORY!",
            &["All levels complete.", "", "[Esc] Quit"],
        );
    }

    pads
}

fn pad_colors(symbol: Symbol) -> (Color, Color) {
    match symbol {
        Symbol::Red => (Color::Red, Color::LightRed),
        Symbol::Green => (Color::Green, Color::LightGreen),
        Symbol::Blue => (Color::Blue, Color::LightBlue),
        Symbol::Yellow => (Color::Yellow, Color::LightYellow),
    }
}

fn message_color(style: MessageStyle) -> Color {
    match style {
        MessageStyle::Info => Color::Cyan,
        MessageStyle::Success => Color::Green,
        MessageStyle::Failure => Color::Red,
        MessageStyle::Victory => Color::Yellow,
        MessageStyle::Prompt => Color::White,
    }
}

fn timer_color(band: TimerBand) -> Color {
    match band {
        TimerBand::Green => Color::Green,
        TimerBand::Yellow => Color::Yellow,
        TimerBand::Red => Color::Red,
    }
}

/// Draw the 2x2 pad grid in layout order.
fn render_pads(frame: &mut Frame, area: Rect, game: &SimonGame, board: &BoardView) -> [Rect; 4] {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut areas = [Rect::default(); 4];
    for (row, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row_area);
        for (col, cell) in cols.iter().enumerate() {
            areas[row * 2 + col] = Rect {
                x: cell.x + 1,
                y: cell.y,
                width: cell.width.saturating_sub(2),
                height: cell.height,
            };
        }
    }

    for (position, &symbol) in game.layout.pads.iter().enumerate() {
        let pad_area = areas[position];
        let (dim, bright) = pad_colors(symbol);
        let lit = board.is_lit(symbol);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if lit { bright } else { dim }));
        if lit {
            block = block.style(Style::default().bg(bright));
        }
        let inner = block.inner(pad_area);
        frame.render_widget(block, pad_area);

        let label_style = if lit {
            Style::default().fg(Color::Black).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(dim)
        };
        let label = format!(
            "{} [{}] [{}]",
            symbol.name(),
            symbol.hotkey().to_ascii_uppercase(),
            position + 1
        );
        let y = inner.y + inner.height.saturating_sub(1) / 2;
        frame.render_widget(
            Paragraph::new(Span::styled(label, label_style)).alignment(Alignment::Center),
            Rect::new(inner.x, y, inner.width, inner.height.min(1)),
        );
    }

    areas
}

fn render_status(frame: &mut Frame, area: Rect, game: &SimonGame) {
    let (text, color) = match game.phase {
        SimonPhase::AwaitingStart => ("Press Enter to begin".to_string(), Color::Cyan),
        SimonPhase::ReplayingSequence => ("Watch...".to_string(), Color::Yellow),
        SimonPhase::AwaitingPlayerInput => (
            format!(
                "Your turn: {} of {}",
                game.input_index + 1,
                game.sequence.len()
            ),
            Color::Green,
        ),
        SimonPhase::GameWon => ("You win!".to_string(), Color::Green),
        SimonPhase::GameOver => ("Goodbye".to_string(), Color::DarkGray),
    };
    render_status_bar(frame, area, &text, color, CONTROLS);
}

fn info_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &SimonGame, board: &BoardView) {
    let inner = render_info_panel_frame(frame, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(3)])
        .split(inner);

    let lines = vec![
        Line::from(Span::styled(
            "Simon",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        info_line(
            "Level",
            format!("{}/{}", board.level.max(1), MAX_LEVELS),
            Color::White,
        ),
        info_line(
            "Sequence",
            format!("{}/{}", board.progress.length, MAX_SEQUENCE_LENGTH),
            Color::White,
        ),
        info_line(
            "Entered",
            format!("{}/{}", board.progress.entered, board.progress.length),
            Color::Green,
        ),
        info_line("Best", format!("{}", game.best_level), Color::Yellow),
        info_line("Failures", format!("{}", game.failures), Color::Red),
    ];
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let secs = board.remaining_ms.div_ceil(1000);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Time"))
        .gauge_style(
            Style::default()
                .fg(timer_color(board.timer_band()))
                .add_modifier(Modifier::BOLD),
        )
        .label(format!("{}s", secs))
        .ratio(board.timer_ratio());
    frame.render_widget(gauge, chunks[1]);
}
