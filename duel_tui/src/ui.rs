//! UI rendering

mod battle_view;
mod help_view;
mod select_view;

use crate::app::{App, Screen};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Keybindings footer
        ])
        .split(f.area());

    draw_title(f, app, chunks[0]);

    if app.show_help {
        help_view::draw(f, app, chunks[1]);
    } else {
        match app.screen {
            Screen::Select => select_view::draw(f, app, chunks[1]),
            Screen::Battle => battle_view::draw(f, app, chunks[1]),
        }
    }

    draw_keybindings(f, app, chunks[2]);
}

fn draw_title(f: &mut Frame, app: &App, area: Rect) {
    let status = match app.screen {
        Screen::Select => "Choose your fighters".to_string(),
        Screen::Battle => match app.snapshot() {
            Some(snapshot) => format!("Round {}", snapshot.round),
            None => "Battle".to_string(),
        },
    };

    let line = Line::from(vec![
        Span::styled(
            "Duel Arena",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  │  ", Style::default().fg(Color::DarkGray)),
        Span::styled(status, Style::default().fg(Color::White)),
        Span::styled("  │  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} live", app.manager.active_battles()),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let common_keys = vec![("?", "Help"), ("q", "Quit")];

    let screen_keys: Vec<(&str, &str)> = if app.show_help {
        vec![]
    } else {
        match app.screen {
            Screen::Select => vec![
                ("↑/↓", "Pick"),
                ("Tab", "Switch player"),
                ("Enter", "Fight"),
                ("r", "Rematch"),
                ("s", "Simulate"),
            ],
            Screen::Battle => vec![
                ("a/d/e", "P1 attack/defend/evade"),
                ("j/k/l", "P2 attack/defend/evade"),
                ("↑/↓", "Scroll log"),
            ],
        }
    };

    let mut spans: Vec<Span> = Vec::new();

    for (i, (key, desc)) in screen_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    if !screen_keys.is_empty() {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    }

    for (i, (key, desc)) in common_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(paragraph, area);
}

/// Text HP bar, colored by remaining fraction
pub fn hp_bar(hp: u32, max_hp: u32, width: usize) -> Span<'static> {
    let fraction = if max_hp > 0 {
        hp as f64 / max_hp as f64
    } else {
        0.0
    };
    let filled = ((fraction * width as f64) as usize).min(width);
    let empty = width - filled;

    let color = if fraction > 0.5 {
        Color::Green
    } else if fraction > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    };

    Span::styled(
        format!("{}{}", "█".repeat(filled), "░".repeat(empty)),
        Style::default().fg(color),
    )
}

pub fn stat_line(name: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:10}", name), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}
