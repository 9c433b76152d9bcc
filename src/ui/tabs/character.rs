// Character-tab rendering.
// - Summarizes the pawn being styled: name, body type, hair, and channel colors.
// - Read-only; all editing happens on the race features tab.
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{app::App, color};

use super::super::truncate_to_width;

const LABEL_COL_WIDTH: usize = 12;
const VALUE_MAX_WIDTH: usize = 48;

pub fn render_character_tab(frame: &mut Frame, app: &App, area: Rect) {
    let pawn = app.pawn();
    let mut lines = vec![
        character_row("Name", pawn.name.clone()),
        character_row("Race", app.race().name.clone()),
        character_row("Body type", pawn.body_type.clone()),
        Line::from(""),
        character_section("HAIR"),
        Line::from(""),
        swatch_row("Hair", pawn.hair_color),
    ];
    if let Some(desired) = pawn.desired_hair_color {
        lines.push(swatch_row("Desired", desired));
    }
    lines.push(character_row(
        "Restyles",
        pawn.style.style_changes.to_string(),
    ));

    lines.push(Line::from(""));
    lines.push(character_section("COLOR CHANNELS"));
    lines.push(Line::from(""));
    if pawn.channels.is_empty() {
        lines.push(Line::styled(
            "No color channels.",
            Style::default().fg(Color::DarkGray),
        ));
    }
    for (name, colors) in &pawn.channels {
        lines.push(channel_row(name, colors.first, colors.second));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title_top(Line::from("Character").left_aligned())
        .title_top(Line::styled("(2) race features", Style::default().fg(Color::DarkGray)).right_aligned());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn character_section(title: &str) -> Line<'static> {
    Line::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn label_span(label: &str) -> Span<'static> {
    Span::styled(
        format!("{label:<LABEL_COL_WIDTH$}"),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn character_row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        label_span(label),
        Span::raw("  "),
        Span::raw(truncate_to_width(&value, VALUE_MAX_WIDTH)),
    ])
}

fn swatch_row(label: &str, value: color::Color) -> Line<'static> {
    Line::from(vec![
        label_span(label),
        Span::raw("  "),
        swatch(value),
        Span::raw(format!(" {}", value.into_hex6())),
    ])
}

fn channel_row(name: &str, first: color::Color, second: color::Color) -> Line<'static> {
    Line::from(vec![
        label_span(&truncate_to_width(name, LABEL_COL_WIDTH)),
        Span::raw("  "),
        swatch(first),
        Span::raw(format!(" {}  ", first.into_hex6())),
        swatch(second),
        Span::raw(format!(" {}", second.into_hex6())),
    ])
}

pub(in crate::ui) fn swatch(value: color::Color) -> Span<'static> {
    Span::styled("██", Style::default().fg(value.into()))
}
