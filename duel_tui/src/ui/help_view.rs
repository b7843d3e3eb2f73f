//! Help overlay

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let c = &app.manager.config().combat;
    let header = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
    };

    let lines = vec![
        header("═══ Controls ═══"),
        key_line("↑/↓", "Pick a fighter / scroll the log"),
        key_line("Tab", "Switch which player is picking"),
        key_line("Enter", "Start the duel"),
        key_line("r", "Rematch the last pairing"),
        key_line("s", "Auto-play the pairing and show win rates"),
        key_line("a / d / e", "Player 1: attack / defend / evade"),
        key_line("j / k / l", "Player 2: attack / defend / evade"),
        key_line("?", "Toggle help"),
        key_line("q / Ctrl+C", "Quit"),
        Line::from(""),
        header("═══ Rounds ═══"),
        Line::from("  Both players declare in secret. Once both are in, the round"),
        Line::from("  resolves: the faster fighter acts first, ties are a coin flip."),
        Line::from("  A fighter knocked out mid-round doesn't get to act."),
        Line::from(""),
        header("═══ Combat Math ═══"),
        Line::from(Span::styled("Hit chance:", Style::default().fg(Color::Yellow))),
        Line::from(format!(
            "  {:.0}% + (attacker AGI - defender AGI) × {:.1}%, kept within {:.0}%..{:.0}%",
            c.hit.base * 100.0,
            c.hit.agility_factor * 100.0,
            c.hit.min * 100.0,
            c.hit.max * 100.0,
        )),
        Line::from(Span::styled("Evade:", Style::default().fg(Color::Yellow))),
        Line::from(format!(
            "  Evading fighter's AGI / {:.0}, kept within {:.0}%..{:.0}%",
            c.evade.divisor,
            c.evade.min * 100.0,
            c.evade.max * 100.0,
        )),
        Line::from(Span::styled("Defend:", Style::default().fg(Color::Yellow))),
        Line::from(format!(
            "  Defending fighter's DEF / {:.0}, kept within {:.0}%..{:.0}%",
            c.defend.divisor,
            c.defend.min * 100.0,
            c.defend.max * 100.0,
        )),
        Line::from("  A successful defend subtracts DEF from the hit. Crits can't be defended."),
        Line::from(Span::styled("Critical hit:", Style::default().fg(Color::Yellow))),
        Line::from(format!(
            "  ATK × {:.1}, rolled against the attacker's crit chance",
            c.crit.multiplier
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:14}", key), Style::default().fg(Color::Yellow)),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
