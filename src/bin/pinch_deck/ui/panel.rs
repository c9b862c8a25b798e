//! Readouts - per-control results and what the mixing engine has received

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use pinch_deck::{ControlResult, Handedness};

use super::super::app::App;

fn control_line(name: &str, result: &ControlResult) -> Line<'static> {
    let (marker, color) = if result.is_active {
        ("●", Color::Green)
    } else {
        ("○", Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(format!(" {marker} "), Style::default().fg(color)),
        Span::styled(format!("{name:<11}"), Style::default().fg(Color::White)),
        Span::styled(
            format!("value {:>7.3}  ", result.value),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Δ {:>+7.3}", result.delta),
            Style::default().fg(Color::Magenta),
        ),
    ])
}

pub fn render_panel(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Controls
            Constraint::Length(3), // Left deck volume
            Constraint::Length(3), // Right deck volume
            Constraint::Min(4),    // Engine stats
        ])
        .split(area);

    let lines: Vec<Line> = app
        .snapshot
        .iter()
        .map(|(name, result)| control_line(name.as_str(), &result))
        .collect();
    let controls = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" Controls · frame {} ", app.bank.frame()))
            .borders(Borders::ALL),
    );
    frame.render_widget(controls, chunks[0]);

    for (side, chunk) in Handedness::BOTH.into_iter().zip([chunks[1], chunks[2]]) {
        let deck = app.engine.decks[side];
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(format!(" Deck {} · tempo {:.2}x ", side.as_str(), deck.tempo))
                    .borders(Borders::ALL),
            )
            .gauge_style(Style::default().fg(Color::Yellow))
            .ratio(deck.volume.clamp(0.0, 1.0) as f64)
            .label(format!("vol {:.0}%", deck.volume * 100.0));
        frame.render_widget(gauge, chunk);
    }

    let stats = vec![
        Line::from(vec![
            Span::styled(" policy ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{:?}", app.bank.policy())),
        ]),
        Line::from(vec![
            Span::styled(" messages ", Style::default().fg(Color::DarkGray)),
            Span::raw(app.engine.received.to_string()),
            Span::styled("  dropped ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                app.mapper().dropped().to_string(),
                Style::default()
                    .fg(if app.mapper().dropped() > 0 { Color::Red } else { Color::Green })
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" sensitivity ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!(
                "wheel {:.1}  knob {:.1}",
                app.settings.controls.rotation_sensitivity, app.settings.controls.linear_sensitivity
            )),
        ]),
    ];
    let engine = Paragraph::new(stats).block(Block::default().title(" Engine ").borders(Borders::ALL));
    frame.render_widget(engine, chunks[3]);
}
