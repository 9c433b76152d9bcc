// Root UI composition and shared visual components.
// - Builds the global layout (main tab strip + tab content + status + footer).
// - Renders shared chrome: tab bars, status line, and the keybinds popup.
// - Delegates tab-specific rendering to ui::tabs submodules.
mod tabs;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    app::App,
    model::{MainTab, RaceTab},
};

pub fn render(frame: &mut Frame, app: &App) {
    let [tabs_area, content, status, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_main_tabs(frame, app, tabs_area);

    match app.main_tab() {
        MainTab::Character => tabs::character::render_character_tab(frame, app, content),
        MainTab::Race => render_race_tabs(frame, app, content),
    }

    render_status_line(frame, app, status);
    render_footer_hint(frame, footer);
    if app.show_keybinds {
        render_keybinds_popup(frame, app);
    }
}

fn render_main_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let selected = MainTab::ALL
        .iter()
        .position(|tab| *tab == app.main_tab())
        .unwrap_or(0);
    let labels = MainTab::ALL
        .iter()
        .map(|tab| Line::from(format!(" {} {} ", tab.number(), tab.label())))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(labels)
        .select(selected)
        .divider(Span::styled("|", Style::default().fg(Color::DarkGray)))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title_top(Line::from(format!("Styling: {}", app.pawn().name)).left_aligned())
                .title_top(
                    Line::styled("(ctrl+n)", Style::default().fg(Color::DarkGray)).right_aligned(),
                )
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(tabs, area);
}

fn render_race_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let [strip, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let selected = RaceTab::ALL
        .iter()
        .position(|tab| *tab == app.race_tab())
        .unwrap_or(0);
    let labels = RaceTab::ALL
        .iter()
        .map(|tab| Line::from(format!(" {} ", tab.label())))
        .collect::<Vec<_>>();
    let tabs = Tabs::new(labels)
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, strip);

    match app.race_tab() {
        RaceTab::BodyAddons => tabs::body_addons::render_body_addons_tab(frame, app, content),
    }
}

fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let text = truncate_to_width(&app.status_message, area.width as usize);
    let status = Paragraph::new(Line::styled(text, Style::default().fg(Color::LightGreen)))
        .alignment(Alignment::Left);
    frame.render_widget(status, area);
}

fn render_keybinds_popup(frame: &mut Frame, app: &App) {
    let outer = frame.area();
    let [vertical] = Layout::vertical([Constraint::Percentage(70)])
        .flex(ratatui::layout::Flex::Center)
        .areas(outer);
    let [popup] = Layout::horizontal([Constraint::Percentage(70)])
        .flex(ratatui::layout::Flex::Center)
        .areas(vertical);

    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("Press ? or Esc to close this window."),
        Line::from(""),
        keybind_section("GLOBAL"),
        keybind_row("?", "toggle keybinds popup"),
        keybind_row("q / Ctrl+c", "quit"),
        keybind_row("Ctrl+n / Ctrl+p", "next / previous main tab"),
        keybind_row("1 / 2", "character / race features"),
        keybind_row("w", "write pawn file"),
        keybind_row("Ctrl+r", "reopen dialog (reload race, reset session)"),
        Line::from(""),
        keybind_section("RACE FEATURES"),
        keybind_row("Tab / Shift+Tab", "cycle addons, colors, variants"),
        keybind_row("Esc", "focus addon list"),
        Line::from(""),
        keybind_section("ADDON LIST"),
        keybind_row("j/k or Up/Down", "move cursor"),
        keybind_row("Enter / Space", "select addon"),
        Line::from(""),
        keybind_section("COLORS"),
        keybind_row("h/j/k/l or arrows", "move over swatches"),
        keybind_row("Enter / Space", "apply swatch"),
        keybind_row("f / s", "edit first / second color"),
        Line::from(""),
        keybind_section("VARIANTS"),
        keybind_row("h/j/k/l or arrows", "move over variants"),
        keybind_row("Enter / Space", "apply variant (and linked addons)"),
    ];

    let block = Block::default().borders(Borders::ALL).title("Keybinds");
    let inner = block.inner(popup);
    let visible_line_count = inner.height.max(1) as usize;
    let max_scroll_top = lines.len().saturating_sub(visible_line_count);
    let scroll_top = app.clamp_keybinds_scroll(max_scroll_top);
    let popup_widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .scroll((scroll_top.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(popup_widget, popup);
}

fn keybind_section(title: &str) -> Line<'static> {
    Line::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn keybind_row(keys: &str, action: &str) -> Line<'static> {
    const KEY_COL_WIDTH: usize = 20;
    let keys_padded = format!("{keys:<KEY_COL_WIDTH$}");
    Line::from(vec![
        Span::styled(
            keys_padded,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(action.to_string()),
    ])
}

fn render_footer_hint(frame: &mut Frame, area: Rect) {
    let hint = Paragraph::new(Line::styled(
        "Press ? to see keyboard shortcuts",
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Left);
    frame.render_widget(hint, area);
}

pub(super) fn pane_border_style(is_focused: bool, focused_color: Color) -> Style {
    if is_focused {
        Style::default()
            .fg(focused_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub(super) fn display_width(value: &str) -> usize {
    UnicodeWidthStr::width(value)
}

pub(super) fn truncate_to_width(value: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut width = 0;
    for ch in value.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if ch_width > 0 && width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Truncates to `width` columns and pads with spaces up to it.
pub(super) fn fit_to_width(value: &str, width: usize) -> String {
    let truncated = truncate_to_width(value, width);
    let pad = width.saturating_sub(display_width(&truncated));
    format!("{truncated}{}", " ".repeat(pad))
}
