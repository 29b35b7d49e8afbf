//! Stateless UI rendering for the terminal game.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictac_core::{Board, Mark, Position, Square};

use super::app::{App, Screen};

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Board or starter menu
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Tic-Tac-Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    match app.screen() {
        Screen::Starter => draw_starter(frame, chunks[1], app),
        Screen::Playing => draw_board(frame, chunks[1], app.game().board(), Some(app.cursor())),
        Screen::GameOver => draw_board(frame, chunks[1], app.game().board(), None),
    }

    let status = Paragraph::new(app.status())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, chunks[2]);

    let help = match app.screen() {
        Screen::Starter => "U: You first | C: Computer first | D: Difficulty | Q: Quit",
        Screen::Playing => "Arrows + Enter or 1-9 to move | R: Restart | Q: Quit",
        Screen::GameOver => "Any key: New game | Q: Quit",
    };
    let help = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);
}

fn draw_starter(frame: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from("Who should make the first move?"),
        Line::from(""),
        Line::from(vec![
            Span::styled("[U]", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
            Span::raw(" You     "),
            Span::styled("[C]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" Computer"),
        ]),
        Line::from(""),
        Line::from(format!("Difficulty: {}", app.game().difficulty())),
    ];
    let menu = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(menu, center_rect(area, 40, 5));
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: Option<Position>) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, positions) in Position::ALL.chunks(3).enumerate() {
        draw_row(frame, rows[row * 2], board, cursor, positions);
        if row < 2 {
            let sep = Paragraph::new("────────────┼────────────┼────────────")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(sep, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Option<Position>,
    positions: &[Position],
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for (col, &pos) in positions.iter().enumerate() {
        draw_cell(frame, cols[col * 2], board, cursor, pos);
        if col < 2 {
            let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(sep, cols[col * 2 + 1]);
        }
    }
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Option<Position>,
    pos: Position,
) {
    let (symbol, style) = match board.get(pos) {
        Square::Empty => (format!("{}", pos.to_index() + 1), Style::default().fg(Color::DarkGray)),
        Square::Occupied(Mark::X) => (
            "X".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Mark::O) => (
            "O".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };
    let style = if cursor == Some(pos) {
        style.bg(Color::DarkGray).add_modifier(Modifier::REVERSED)
    } else {
        style
    };

    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(symbol, style))])
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
