//! Fighter selection view

use super::{hp_bar, stat_line};
use crate::app::{App, Seat};
use duel_core::{CharacterStats, Outcome};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30), // Player 1 list
            Constraint::Percentage(30), // Player 2 list
            Constraint::Percentage(40), // Results
        ])
        .split(area);

    draw_roster(f, app, Seat::One, chunks[0]);
    draw_roster(f, app, Seat::Two, chunks[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Last result
            Constraint::Min(0),    // Simulation
        ])
        .split(chunks[2]);

    draw_last_result(f, app, right[0]);
    draw_simulation(f, app, right[1]);
}

fn draw_roster(f: &mut Frame, app: &App, seat: Seat, area: Rect) {
    let picked = match seat {
        Seat::One => app.picks[0],
        Seat::Two => app.picks[1],
    };
    let active = app.picking == seat;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(8)])
        .split(area);

    let items: Vec<ListItem> = app
        .characters
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let style = if i == picked {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if i == picked { "▶ " } else { "  " };
            ListItem::new(Line::from(Span::styled(format!("{}{}", marker, c.name), style)))
        })
        .collect();

    let border_style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", seat.label())),
    );
    f.render_widget(list, chunks[0]);

    if let Some(stats) = app.characters.get(picked) {
        draw_stats(f, stats, chunks[1]);
    }
}

fn draw_stats(f: &mut Frame, stats: &CharacterStats, area: Rect) {
    let lines = vec![
        stat_line("HP", stats.max_hp.to_string()),
        stat_line("ATK", stats.atk.to_string()),
        stat_line("DEF", stats.def.to_string()),
        stat_line("AGI", stats.agi.to_string()),
        stat_line("SPD", stats.speed.to_string()),
        stat_line("Crit", format!("{:.0}%", stats.crit * 100.0)),
    ];
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn draw_last_result(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    match &app.last_result {
        Some(report) => {
            let headline = match &report.outcome {
                Outcome::Decided(winner) => {
                    let name = report
                        .hp
                        .iter()
                        .find(|h| &h.id == winner)
                        .map(|h| h.name.as_str())
                        .unwrap_or(winner.as_str());
                    format!("{} wins!", name)
                }
                Outcome::Draw => "Draw".to_string(),
                Outcome::InProgress => "Unfinished".to_string(),
            };
            lines.push(Line::from(Span::styled(
                headline,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!("After {} rounds", report.round)));
            lines.push(Line::from(""));
            for hp in &report.hp {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:8}", hp.name), Style::default().fg(Color::Gray)),
                    hp_bar(hp.hp, hp.max_hp, 16),
                    Span::raw(format!(" {}/{}", hp.hp, hp.max_hp)),
                ]));
            }
        }
        None => {
            // Errors from a rejected start land in the log while still selecting
            match app.log.last() {
                Some(line) => lines.push(Line::from(Span::styled(
                    line.clone(),
                    Style::default().fg(Color::Red),
                ))),
                None => lines.push(Line::from(Span::styled(
                    "No duel fought yet",
                    Style::default().fg(Color::DarkGray),
                ))),
            }
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Last Duel "));
    f.render_widget(paragraph, area);
}

fn draw_simulation(f: &mut Frame, app: &App, area: Rect) {
    let lines = match (&app.simulation, app.fighter(Seat::One), app.fighter(Seat::Two)) {
        (Some(sim), Some(a), Some(b)) => vec![
            Line::from(format!("{} duels, random actions", sim.duels)),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("{:10}", a.name), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{:5.1}%", sim.win_rate_a()),
                    Style::default().fg(Color::Green),
                ),
            ]),
            Line::from(vec![
                Span::styled(format!("{:10}", b.name), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{:5.1}%", sim.win_rate_b()),
                    Style::default().fg(Color::Green),
                ),
            ]),
            stat_line("Draws", sim.draws.to_string()),
            stat_line("Cut off", sim.unfinished.to_string()),
            stat_line("Avg rounds", format!("{:.1}", sim.avg_rounds())),
        ],
        _ => vec![Line::from(Span::styled(
            "Press s to simulate this pairing",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Simulation "));
    f.render_widget(paragraph, area);
}
