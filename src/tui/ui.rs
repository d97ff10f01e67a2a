//! UI rendering using ratatui
//!
//! Screens:
//! - Setup: player count, hole count, start
//! - Scorecard: leaderboard, score grid, entry line
//! - ConfirmReset: scorecard with a confirmation dialog on top

use crate::app::{App, Screen, SetupField};
use crate::round::{ranking, GameSession, HoleCount, RoundConfig, MAX_PLAYERS, MIN_PLAYERS};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, TableState},
};

/// Render the screen the app is on
pub fn render(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Setup { focus } => render_setup(frame, app.session().config(), focus),
        Screen::Scorecard => render_scorecard(frame, app),
        Screen::ConfirmReset => {
            render_scorecard(frame, app);
            render_confirm_reset(frame);
        }
    }
}

/// Render the round setup screen
fn render_setup(frame: &mut Frame, config: RoundConfig, focus: SetupField) {
    let area = centered_rect(48, 18, frame.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Subtitle
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Players
            Constraint::Length(3), // Holes
            Constraint::Length(3), // Start
            Constraint::Min(0),
            Constraint::Length(1), // Footer
        ])
        .margin(1)
        .split(inner);

    let title = Paragraph::new("Golf Scorecard")
        .style(Style::default().fg(Color::Green).bold())
        .alignment(Alignment::Center);
    frame.render_widget(title, layout[0]);

    let subtitle = Paragraph::new("Track your round with ease")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(subtitle, layout[1]);

    // Player counter, arrows dimmed at the limits
    let players = config.num_players();
    let arrow = |enabled: bool, s: &'static str| {
        let color = if enabled { Color::White } else { Color::DarkGray };
        Span::styled(s, Style::default().fg(color))
    };
    let counter = Line::from(vec![
        arrow(players > MIN_PLAYERS, "◀  "),
        Span::styled(players.to_string(), Style::default().bold()),
        arrow(players < MAX_PLAYERS, "  ▶"),
    ]);
    render_setup_field(frame, layout[3], SetupField::Players, focus, counter);

    let option = |holes: HoleCount| {
        let label = format!(" {} Holes ", holes.count());
        if config.holes == holes {
            Span::styled(label, Style::default().fg(Color::Black).bg(Color::Green).bold())
        } else {
            Span::styled(label, Style::default().fg(Color::Gray))
        }
    };
    let holes = Line::from(vec![option(HoleCount::Nine), Span::raw("   "), option(HoleCount::Eighteen)]);
    render_setup_field(frame, layout[4], SetupField::Holes, focus, holes);

    let start_style = if focus == SetupField::Start {
        Style::default().fg(Color::Black).bg(Color::Green).bold()
    } else {
        Style::default().fg(Color::Green)
    };
    let start = Paragraph::new(format!("[ {} ]", SetupField::Start.label()))
        .style(start_style)
        .alignment(Alignment::Center);
    frame.render_widget(start, layout[5]);

    let footer = Paragraph::new("↑↓ Select  ←→ Change  Enter Start  q Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[7]);
}

fn render_setup_field(
    frame: &mut Frame,
    area: Rect,
    field: SetupField,
    focus: SetupField,
    value: Line<'static>,
) {
    let border = if field == focus { Color::Yellow } else { Color::DarkGray };
    let widget = Paragraph::new(value).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(field.label()),
    );
    frame.render_widget(widget, area);
}

/// Render the in-round screen
fn render_scorecard(frame: &mut Frame, app: &App) {
    let session = app.session();
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                   // Header
            Constraint::Length(session.players().len() as u16 + 2), // Leaderboard
            Constraint::Min(6),                                      // Score grid
            Constraint::Length(1),                                   // Entry / feedback
            Constraint::Length(1),                                   // Footer
        ])
        .split(area);

    render_header(frame, layout[0], session);
    render_leaderboard(frame, layout[1], session);
    render_grid(frame, layout[2], app);
    render_entry_line(frame, layout[3], app);

    let footer = Paragraph::new("↑↓ Hole  ←→ Player  0-9 Strokes  Enter Save  Del Clear  u Undo  r Reset  q Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[4]);
}

/// Title, round description, undo availability
fn render_header(frame: &mut Frame, area: Rect, session: &GameSession) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16), // Title
            Constraint::Min(10),    // Round description
            Constraint::Length(14), // Undo
        ])
        .split(inner);

    let title = Paragraph::new("Golf Scorecard").style(Style::default().fg(Color::Green).bold());
    frame.render_widget(title, header_layout[0]);

    let subtitle = Paragraph::new(round_subtitle(session.config()))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(subtitle, header_layout[1]);

    let undo_text = match session.undo_record() {
        Some(record) => format!("↶ Undo H{}", record.hole),
        None => "↶ Undo".to_string(),
    };
    let undo_style = if session.can_undo() {
        Style::default().fg(Color::White).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let undo = Paragraph::new(undo_text)
        .style(undo_style)
        .alignment(Alignment::Right);
    frame.render_widget(undo, header_layout[2]);
}

/// Players in rank order with progress and totals
fn render_leaderboard(frame: &mut Frame, area: Rect, session: &GameSession) {
    let items: Vec<ListItem> = session
        .leaderboard()
        .iter()
        .enumerate()
        .map(|(i, standing)| {
            let style = if ranking::is_leader(i, standing) {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!(
                " {}  {:<12} {:<14} {:>4}",
                i + 1,
                standing.name,
                through_label(standing.through),
                standing.total
            ))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Leaderboard"),
    );
    frame.render_widget(list, area);
}

/// One row per hole, one column per player
fn render_grid(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let current = session.current_hole();
    let selected_col = app.selected_player();

    let header = Row::new(
        std::iter::once(Cell::from("Hole")).chain(
            session
                .players()
                .iter()
                .map(|p| Cell::from(p.name.clone())),
        ),
    )
    .style(Style::default().fg(Color::Green).bold());

    let rows: Vec<Row> = (1..=session.config().num_holes())
        .map(|hole| {
            let cells = session.players().iter().enumerate().map(|(col, p)| {
                let is_cursor = hole == current && col == selected_col;
                if is_cursor {
                    let text = if app.input.is_empty() {
                        stroke_cell(session.scores().get(p.id, hole))
                    } else {
                        format!("{}_", app.input)
                    };
                    Cell::from(text).style(Style::default().fg(Color::Black).bg(Color::Yellow))
                } else {
                    Cell::from(stroke_cell(session.scores().get(p.id, hole)))
                }
            });
            Row::new(std::iter::once(Cell::from(hole.to_string())).chain(cells))
        })
        .collect();

    let totals = Row::new(
        std::iter::once(Cell::from("Total")).chain(
            session
                .players()
                .iter()
                .map(|p| Cell::from(session.total_for(p.id).to_string())),
        ),
    )
    .style(Style::default().bold());

    let widths = std::iter::once(Constraint::Length(6))
        .chain(session.players().iter().map(|_| Constraint::Length(10)));

    let table = Table::new(rows, widths)
        .header(header)
        .footer(totals)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title("Scores"),
        );

    let mut state = TableState::default().with_selected(Some(current.saturating_sub(1) as usize));
    frame.render_stateful_widget(table, area, &mut state);
}

/// What is being typed, or the result of the last action
fn render_entry_line(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let player = session
        .players()
        .get(app.selected_player())
        .map(|p| p.name.as_str())
        .unwrap_or("");

    let (text, color) = if !app.input.is_empty() {
        (
            format!(" {} · Hole {} > {}_", player, session.current_hole(), app.input),
            Color::White,
        )
    } else if !app.feedback.is_empty() {
        let color = if app.feedback.contains("negative") {
            Color::Red
        } else {
            Color::Green
        };
        (format!(" {}", app.feedback), color)
    } else if session.scores().is_empty() {
        (
            format!(
                " {} · Hole {} · type strokes, Enter to record",
                player,
                session.current_hole()
            ),
            Color::DarkGray,
        )
    } else {
        (
            format!(" {} · Hole {}", player, session.current_hole()),
            Color::DarkGray,
        )
    };

    frame.render_widget(Paragraph::new(text).style(Style::default().fg(color)), area);
}

/// Reset confirmation dialog
fn render_confirm_reset(frame: &mut Frame) {
    let area = centered_rect(44, 7, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from("Reset entire game? This cannot be undone.").bold(),
        Line::from(""),
        Line::from("y Reset   n Cancel").fg(Color::DarkGray),
    ];
    let dialog = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title("Reset"),
    );
    frame.render_widget(dialog, area);
}

/// `"{holes} Holes • {players} Player(s)"`
fn round_subtitle(config: RoundConfig) -> String {
    let players = config.num_players();
    let plural = if players > 1 { "s" } else { "" };
    format!("{} Holes • {} Player{}", config.num_holes(), players, plural)
}

/// Leaderboard progress label
fn through_label(through: u32) -> String {
    if through > 0 {
        format!("Through {}", through)
    } else {
        "Not started".to_string()
    }
}

/// Grid cell text. Zero shows blank, same as an empty cell.
fn stroke_cell(strokes: Option<u32>) -> String {
    match strokes {
        Some(s) if s > 0 => s.to_string(),
        _ => String::new(),
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
