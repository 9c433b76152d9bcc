// Body-addons tab rendering.
// - Left pane: every addon the race offers, with linked-chain connectors and
//   the colors each addon currently displays.
// - Right pane: the selected addon's color palette grid and variant grid.
// - Grid column counts are written back to the session so keyboard navigation
//   follows the layout that was actually drawn.
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{App, MIN_VARIANT_COLUMNS},
    color,
    model::{ColorSlot, Focus},
    pawn::VariantStore,
    race::BodyAddon,
};

use super::{
    super::{fit_to_width, pane_border_style, truncate_to_width},
    character::swatch,
};

const SWATCH_CELL_WIDTH: usize = 4;
const MAX_VARIANT_CELL_WIDTH: usize = 24;

pub fn render_body_addons_tab(frame: &mut Frame, app: &App, area: Rect) {
    let [list_area, detail_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Min(0)]).areas(area);

    render_addon_list(frame, app, list_area);
    match app.selected_addon() {
        Some((index, addon)) => render_addon_detail(frame, app, index, addon, detail_area),
        None => render_empty_detail(frame, detail_area),
    }
}

/// Variant grid columns: at least four, more while cells would be too wide.
pub fn variant_columns_for_width(width: usize) -> usize {
    let mut columns = MIN_VARIANT_COLUMNS;
    while width / columns > MAX_VARIANT_CELL_WIDTH {
        columns += 1;
    }
    columns
}

fn render_addon_list(frame: &mut Frame, app: &App, area: Rect) {
    // Borders, highlight symbol, marker, connector, two swatches.
    let name_width = (area.width as usize).saturating_sub(4 + 2 + 2 + 7);
    let selected = app.session().selected();
    let linked = app.race().linked_flags();

    let items = app
        .race()
        .addons()
        .enumerate()
        .map(|(index, addon)| {
            let (first, second) = app.displayed_colors(addon);
            let in_group = app.in_selected_group(&linked, index);
            let marker = if selected == Some(index) {
                "* "
            } else if in_group {
                "~ "
            } else {
                "  "
            };
            let connector = if addon.linked_to_previous() { "└ " } else { "  " };
            let style = if selected == Some(index) {
                Style::default().fg(Color::LightGreen)
            } else if in_group {
                Style::default().fg(Color::LightMagenta)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(connector, Style::default().fg(Color::DarkGray)),
                Span::styled(fit_to_width(&addon.name, name_width), style),
                Span::raw(" "),
                swatch(first),
                Span::raw(" "),
                swatch(second),
            ]))
        })
        .collect::<Vec<_>>();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border_style(
            app.focus() == Focus::AddonList,
            Color::LightBlue,
        ))
        .title_top(Line::from(format!("Addons: {}", app.race().name)).left_aligned())
        .title_top(Line::styled("(esc)", Style::default().fg(Color::DarkGray)).right_aligned());
    let visible_rows = block.inner(area).height as usize;

    let mut list_state = ListState::default();
    let count = app.addon_count();
    if count > 0 {
        let cursor = app.session().list_cursor().min(count - 1);
        let centered_offset = if visible_rows == 0 {
            0
        } else {
            let max_offset = count.saturating_sub(visible_rows);
            cursor.saturating_sub(visible_rows / 2).min(max_offset)
        };
        list_state = list_state
            .with_offset(centered_offset)
            .with_selected(Some(cursor));
    }

    let list = List::new(items)
        .block(block)
        .highlight_symbol("> ")
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_empty_detail(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title("Addon");
    let hint = Paragraph::new(Line::styled(
        "Select an addon from the list (Enter).",
        Style::default().fg(Color::DarkGray),
    ))
    .block(block);
    frame.render_widget(hint, area);
}

fn render_addon_detail(frame: &mut Frame, app: &App, index: usize, addon: &BodyAddon, area: Rect) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!("Addon: {}", addon.name));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let current = app.pawn().variant(index);
    let header = vec![
        Line::from(vec![
            Span::styled("Channel  ", Style::default().fg(Color::Cyan)),
            Span::raw(addon.color_channel().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Texture  ", Style::default().fg(Color::Cyan)),
            Span::raw(truncate_to_width(
                &addon.image_path(app.pawn(), current),
                (inner.width as usize).saturating_sub(9),
            )),
        ]),
    ];

    if app.has_any_palette() {
        let [header_area, colors_area, variants_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Percentage(50),
            Constraint::Min(0),
        ])
        .areas(inner);
        frame.render_widget(Paragraph::new(header), header_area);
        render_colors_pane(frame, app, addon, colors_area);
        render_variants_pane(frame, app, index, addon, variants_area);
    } else {
        let [header_area, variants_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);
        frame.render_widget(Paragraph::new(header), header_area);
        render_variants_pane(frame, app, index, addon, variants_area);
    }
}

fn render_colors_pane(frame: &mut Frame, app: &App, addon: &BodyAddon, area: Rect) {
    let focused = app.focus() == Focus::Colors;
    let editing = app.session().editing();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border_style(focused, Color::LightBlue))
        .title_top(Line::from(format!("Colors: {}", editing.label())).left_aligned())
        .title_top(Line::styled("(f/s)", Style::default().fg(Color::DarkGray)).right_aligned());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [slots_area, grid_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

    let (shown_first, shown_second) = app.displayed_colors(addon);
    let slots = Line::from(
        [
            (ColorSlot::First, "f", shown_first),
            (ColorSlot::Second, "s", shown_second),
        ]
        .into_iter()
        .flat_map(|(slot, key, shown)| slot_header_spans(app, slot, key, shown, editing))
        .collect::<Vec<_>>(),
    );
    frame.render_widget(Paragraph::new(slots), slots_area);

    let columns = (grid_area.width as usize / SWATCH_CELL_WIDTH).max(1);
    app.session().set_palette_columns(columns);

    let palette = app.editing_palette();
    let current = app.displayed_slot_color(addon, editing);
    let cursor = app.session().color_cursor();
    let lines = palette
        .chunks(columns)
        .enumerate()
        .map(|(row, chunk)| {
            Line::from(
                chunk
                    .iter()
                    .enumerate()
                    .flat_map(|(column, swatch_color)| {
                        let position = row * columns + column;
                        swatch_cell(
                            *swatch_color,
                            position == cursor,
                            focused,
                            swatch_color.indistinguishable_from(current),
                        )
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect::<Vec<_>>();

    let visible_rows = (grid_area.height as usize).max(1);
    let scroll_top = (cursor / columns).saturating_sub(visible_rows - 1);
    let grid = Paragraph::new(lines).scroll((scroll_top.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(grid, grid_area);
}

fn slot_header_spans(
    app: &App,
    slot: ColorSlot,
    key: &'static str,
    shown: color::Color,
    editing: ColorSlot,
) -> Vec<Span<'static>> {
    let available = !app.slot_palette(slot).is_empty();
    let label_style = if slot == editing {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else if available {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![
        Span::styled(format!("[{key}] {}", slot.label()), label_style),
        Span::raw(" "),
        swatch(shown),
    ];
    if !available {
        spans.push(Span::styled(" (none)", Style::default().fg(Color::DarkGray)));
    }
    spans.push(Span::raw("   "));
    spans
}

fn swatch_cell(
    value: color::Color,
    is_cursor: bool,
    focused: bool,
    is_current: bool,
) -> [Span<'static>; 3] {
    let (open, close, style) = match (is_cursor, is_current) {
        (true, true) => ("[", "]", Style::default().fg(Color::LightGreen)),
        (true, false) if focused => (
            "[",
            "]",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        (true, false) => ("[", "]", Style::default().fg(Color::Gray)),
        (false, true) => ("(", ")", Style::default().fg(Color::White)),
        (false, false) => (" ", " ", Style::default()),
    };
    [
        Span::styled(open, style),
        swatch(value),
        Span::styled(close, style),
    ]
}

fn render_variants_pane(
    frame: &mut Frame,
    app: &App,
    index: usize,
    addon: &BodyAddon,
    area: Rect,
) {
    let focused = app.focus() == Focus::Variants;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border_style(focused, Color::LightBlue))
        .title_top(Line::from(format!("Variants: {}", addon.variant_count())).left_aligned());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let columns = variant_columns_for_width(width);
    app.session().set_variant_columns(columns);
    let cell_width = (width / columns).max(1);

    let current = app.pawn().variant(index);
    let cursor = app.session().variant_cursor();
    let variants = (0..addon.variant_count()).collect::<Vec<_>>();
    let lines = variants
        .chunks(columns)
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|variant| {
                        let marker = if *variant == current { "*" } else { " " };
                        let label = format!("{marker}{variant} {}", addon.image_path(app.pawn(), *variant));
                        let style = if *variant == cursor && focused {
                            Style::default().add_modifier(Modifier::REVERSED)
                        } else if *variant == cursor {
                            Style::default().add_modifier(Modifier::BOLD)
                        } else if *variant == current {
                            Style::default().fg(Color::LightGreen)
                        } else {
                            Style::default()
                        };
                        Span::styled(fit_to_width(&label, cell_width.saturating_sub(1)) + " ", style)
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect::<Vec<_>>();

    let visible_rows = (inner.height as usize).max(1);
    let scroll_top = (cursor / columns).saturating_sub(visible_rows - 1);
    let grid = Paragraph::new(lines).scroll((scroll_top.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(grid, inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_columns_start_at_four_and_grow_for_wide_panes() {
        assert_eq!(variant_columns_for_width(0), 4);
        assert_eq!(variant_columns_for_width(80), 4);
        assert_eq!(variant_columns_for_width(96), 4);
        assert_eq!(variant_columns_for_width(100), 5);
        assert_eq!(variant_columns_for_width(200), 9);
    }

    #[test]
    fn cursor_and_current_markers_differ() {
        let plain = swatch_cell(color::Color::BLACK, false, true, false);
        let current = swatch_cell(color::Color::BLACK, false, true, true);
        let cursor = swatch_cell(color::Color::BLACK, true, true, false);

        assert_eq!(plain[0].content, " ");
        assert_eq!(current[0].content, "(");
        assert_eq!(cursor[0].content, "[");
    }
}
