//! Stateless rendering of [`App`].

use super::app::{App, Screen};
use crate::session::SessionReport;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strictly_board::{Board, DisplayGrid, Move, Square, Symbol};

const CELL_WIDTH: u16 = 7;
const CELL_HEIGHT: u16 = 3;
const BOARD_WIDTH: u16 = CELL_WIDTH * 3 + 2;
const BOARD_HEIGHT: u16 = CELL_HEIGHT * 3 + 2;

/// Renders the current screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(BOARD_HEIGHT),
            Constraint::Length(3), // Prompt
        ])
        .split(area);

    let title = Paragraph::new("Strictly Duel - Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    match app.screen() {
        Screen::Connecting => draw_message(frame, chunks[1], app.status(), Color::White),
        Screen::Fatal => draw_message(frame, chunks[1], app.status(), Color::Red),
        Screen::Username => draw_username(frame, chunks[1], app),
        Screen::Board => draw_game(frame, chunks[1], app),
        Screen::Statistics => match app.report() {
            Some(report) => draw_statistics(frame, chunks[1], report),
            None => draw_message(frame, chunks[1], app.status(), Color::White),
        },
    }

    let prompt = Paragraph::new(app.prompt())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(prompt, chunks[2]);
}

fn draw_message(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let area = center_rect(area, area.width, 3);
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_username(frame: &mut Frame, area: Rect, app: &App) {
    let area = center_rect(area, 40, 5);
    let mut lines = vec![
        Line::from(format!("> {}_", app.input())),
        Line::from(""),
    ];
    if let Some(error) = app.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Username").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_game(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(BOARD_HEIGHT)])
        .split(area);

    let banner_color = if app.outcome_banner().is_some() {
        Color::Green
    } else {
        Color::White
    };
    let banner = Paragraph::new(vec![
        Line::from(Span::styled(
            app.status().to_string(),
            Style::default().fg(banner_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Game {}", app.game()),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let cursor = app.selectable().then(|| app.cursor());
    draw_board(frame, chunks[1], app.board(), cursor);
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: Option<Move>) {
    let board_area = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);
    let grid = DisplayGrid::new(board_area.x, board_area.y, CELL_WIDTH + 1, CELL_HEIGHT + 1);

    for row in 1..3 {
        let y = board_area.y + row * (CELL_HEIGHT + 1) - 1;
        draw_separator(frame, Rect::new(board_area.x, y, BOARD_WIDTH, 1), "─");
    }
    for col in 1..3 {
        let x = board_area.x + col * (CELL_WIDTH + 1) - 1;
        for y in board_area.y..board_area.y + BOARD_HEIGHT {
            draw_separator(frame, Rect::new(x, y, 1, 1), "│");
        }
    }

    for mv in Move::ALL {
        let (x, y) = grid.coordinate(mv);
        let cell = Rect::new(x, y, CELL_WIDTH, CELL_HEIGHT).intersection(area);
        draw_cell(frame, cell, board.get(mv), mv, cursor == Some(mv));
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, square: Square, mv: Move, highlighted: bool) {
    let (text, base_style) = match square {
        Square::Empty => (mv.index().to_string(), Style::default().fg(Color::DarkGray)),
        Square::Occupied(Symbol::X) => (
            "X".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Symbol::O) => (
            "O".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if highlighted {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {text}  "), style)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect, glyph: &str) {
    let sep = Paragraph::new(glyph.repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area.intersection(frame.area()));
}

fn draw_statistics(frame: &mut Frame, area: Rect, report: &SessionReport) {
    let name = |name: Option<&crate::username::Username>| {
        name.map_or_else(|| "?".to_string(), ToString::to_string)
    };
    let stats = report.statistics();
    let lines = vec![
        Line::from(format!("Host:   {}", name(report.host_name()))),
        Line::from(format!("Guest:  {}", name(report.guest_name()))),
        Line::from(""),
        Line::from(format!("Games:  {}", stats.games_played())),
        Line::from(format!("Wins:   {}", stats.wins())),
        Line::from(format!("Losses: {}", stats.losses())),
        Line::from(format!("Ties:   {}", stats.ties())),
    ];
    let area = center_rect(area, 30, lines.len() as u16 + 2);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("Game Statistics")
            .borders(Borders::ALL),
    );
    frame.render_widget(paragraph, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
