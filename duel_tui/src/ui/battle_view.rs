//! Battle view

use super::hp_bar;
use crate::app::{App, Seat};
use duel_core::BattleSnapshot;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Fighters
            Constraint::Min(0),    // Log
        ])
        .split(area);

    match app.snapshot() {
        Some(snapshot) => {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[0]);
            draw_fighter(f, app, &snapshot, Seat::One, halves[0]);
            draw_fighter(f, app, &snapshot, Seat::Two, halves[1]);
        }
        None => {
            let paragraph = Paragraph::new("No battle in progress")
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(paragraph, chunks[0]);
        }
    }

    draw_log(f, app, chunks[1]);
}

fn draw_fighter(f: &mut Frame, app: &App, snapshot: &BattleSnapshot, seat: Seat, area: Rect) {
    let Some(id) = app.fighter(seat).map(|c| c.id.as_str()) else {
        return;
    };
    let Some(fighter) = snapshot.combatant(id) else {
        return;
    };
    let slot = snapshot
        .combatants
        .iter()
        .position(|c| c.id == fighter.id)
        .unwrap_or(0);

    let declared = if snapshot.declared[slot] {
        Span::styled("ready", Style::default().fg(Color::Green))
    } else {
        Span::styled("choosing...", Style::default().fg(Color::DarkGray))
    };
    let first = snapshot.turn_order[0] == fighter.id;
    let order = if first { "acts first" } else { "acts second" };

    let bar_width = area.width.saturating_sub(4) as usize;
    let lines = vec![
        Line::from(vec![
            Span::styled(
                fighter.name.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}/{} HP", fighter.hp, fighter.max_hp),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(hp_bar(fighter.hp, fighter.max_hp, bar_width)),
        Line::from(vec![
            Span::styled(format!("{}  │  ", order), Style::default().fg(Color::Gray)),
            declared,
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", seat.label())),
    );
    f.render_widget(paragraph, area);
}

fn draw_log(f: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let end = app.log.len().saturating_sub(app.log_scroll);
    let start = end.saturating_sub(visible);

    let items: Vec<ListItem> = app.log[start..end]
        .iter()
        .map(|line| {
            let style = if line.starts_with("! ") {
                Style::default().fg(Color::Red)
            } else if line.starts_with("Round") {
                Style::default().fg(Color::Cyan)
            } else if line.ends_with("wins!") || line.contains("draw") {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(line.clone(), style)))
        })
        .collect();

    let title = if app.log_scroll > 0 {
        format!(" Battle Log (scrolled {}) ", app.log_scroll)
    } else {
        " Battle Log ".to_string()
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}
