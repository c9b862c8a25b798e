//! Zone map - control rectangles, wheel markers and the two hand cursors

use ratatui::{
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Line, Points, Rectangle},
        Block, Borders,
    },
    Frame,
};

use pinch_deck::{ControlName, Handedness, Zone};

use super::super::app::App;

/// Canvas y grows upward, frame space grows downward.
fn flip(y: f32) -> f64 {
    1.0 - y as f64
}

fn zone_rect(zone: &Zone, color: Color) -> Rectangle {
    Rectangle {
        x: zone.left as f64,
        y: flip(zone.bottom),
        width: zone.width() as f64,
        height: zone.height() as f64,
        color,
    }
}

pub fn render_zones(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = &app.snapshot;

    let canvas = Canvas::default()
        .block(Block::default().title(" Frame ").borders(Borders::ALL))
        .marker(Marker::Braille)
        .x_bounds([0.0, 1.0])
        .y_bounds([0.0, 1.0])
        .paint(|ctx| {
            for side in Handedness::BOTH {
                let deck = app.bank.deck(side);
                let knob = app.bank.knob(side);
                let deck_active = snapshot[ControlName::deck(side)].is_active;
                let knob_active = snapshot[ControlName::knob(side)].is_active;

                ctx.draw(&zone_rect(
                    deck.zone(),
                    if deck_active { Color::Green } else { Color::Gray },
                ));
                ctx.draw(&zone_rect(
                    knob.zone(),
                    if knob_active { Color::Yellow } else { Color::DarkGray },
                ));

                // Wheel: ring plus a marker at the accumulated rotation
                let c = deck.center();
                let radius = (deck.zone().width().min(deck.zone().height()) * 0.4) as f64;
                ctx.draw(&Circle {
                    x: c.x as f64,
                    y: flip(c.y),
                    radius,
                    color: Color::DarkGray,
                });
                let (sin, cos) = deck.cumulative_rotation().sin_cos();
                ctx.draw(&Line {
                    x1: c.x as f64,
                    y1: flip(c.y),
                    x2: c.x as f64 + radius * cos as f64,
                    y2: flip(c.y) - radius * sin as f64,
                    color: Color::Cyan,
                });

                // Knob fill level along the zone's left edge
                let z = knob.zone();
                let top = z.bottom - z.height() * knob.value();
                ctx.draw(&Line {
                    x1: z.left as f64,
                    y1: flip(z.bottom),
                    x2: z.left as f64,
                    y2: flip(top),
                    color: Color::LightYellow,
                });
            }

            ctx.layer();

            for (_, hand) in app.hands.iter() {
                if !hand.visible {
                    continue;
                }
                let color = match (hand.side, hand.pinching) {
                    (_, true) => Color::LightGreen,
                    (Handedness::Left, false) => Color::LightBlue,
                    (Handedness::Right, false) => Color::LightMagenta,
                };
                ctx.draw(&Points {
                    coords: &[(hand.position.x as f64, flip(hand.position.y))],
                    color,
                });
                ctx.print(
                    hand.position.x as f64 + 0.01,
                    flip(hand.position.y),
                    if hand.side == Handedness::Left { "L" } else { "R" },
                );
            }
        });

    frame.render_widget(canvas, area);
}
