mod cards;
mod categories;
mod details;
mod favourites;
mod help;
mod home;
mod notification;
mod settings;

use crate::app::{App, InputMode, Route};
use crate::pages::Page;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

pub use cards::truncate_str;

const SIDEBAR_WIDTH: u16 = 22;
const SEARCH_LABEL: &str = " Search wallpapers: ";

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: search(3) + body(min) + status(1)
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(rows[1]);

    render_search_bar(app, frame, rows[0]);
    render_sidebar(app, frame, body[0]);
    render_content(app, frame, body[1]);
    render_status(app, frame, rows[2]);

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

fn render_search_bar(app: &App, frame: &mut Frame, area: Rect) {
    let style = match app.input_mode {
        InputMode::Searching => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let hint = if app.input_mode == InputMode::Searching {
        " Enter to search, Esc to cancel "
    } else {
        " / to search "
    };
    let bar = Paragraph::new(format!("{}{}", SEARCH_LABEL, app.shell.buffer()))
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(" Wallpaper Explorer ")
                .title_bottom(Line::from(hint).alignment(Alignment::Right)),
        );
    frame.render_widget(bar, area);

    if app.input_mode == InputMode::Searching {
        frame.set_cursor_position((search_cursor_x(area, app.shell.buffer()), area.y + 1));
    }
}

/// Column just past the typed text, kept inside the bar's border.
fn search_cursor_x(area: Rect, input: &str) -> u16 {
    let column = usize::from(area.x) + 1 + SEARCH_LABEL.width() + input.width();
    let last = area.right().saturating_sub(2);
    u16::try_from(column).map_or(last, |x| x.min(last))
}

fn render_sidebar(app: &App, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = Route::MENU
        .iter()
        .enumerate()
        .map(|(i, route)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(route.label()),
            ]))
        })
        .collect();

    let current = Route::MENU.iter().position(|r| *r == app.route);
    let favourites = format!(" ♥ {} ", app.favourites.len());
    let menu = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Menu ")
                .title_bottom(Line::from(favourites).style(Style::default().fg(Color::Red))),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸");

    let mut state = ListState::default();
    state.select(current);
    frame.render_stateful_widget(menu, area, &mut state);
}

fn render_content(app: &App, frame: &mut Frame, area: Rect) {
    // A failed fetch gets one line above the content; the page still renders.
    let area = match app.page.failure() {
        Some(failure) if !app.page.is_loading() => {
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(3)])
                .split(area);
            frame.render_widget(Paragraph::new(cards::notice_line(failure)), split[0]);
            split[1]
        }
        _ => area,
    };

    match &app.page {
        Page::Home(page) => home::render(app, page, frame, area),
        Page::Categories(page) => categories::render(app, page, frame, area),
        Page::Favourites(page) => favourites::render(app, page, frame, area),
        Page::Notification(_) => notification::render(frame, area),
        Page::Settings(page) => settings::render(app, page, frame, area),
        Page::Details(page) => details::render(app, page, frame, area),
    }
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = vec![
        Span::styled(" ↑↓", key),
        Span::raw(" Navigate  "),
        Span::styled("Enter", key),
        Span::raw(" Open  "),
        Span::styled("f", key),
        Span::raw(" Favourite  "),
        Span::styled("d", key),
        Span::raw(" Download  "),
    ];
    if app.can_go_back() {
        spans.push(Span::styled("Esc", key));
        spans.push(Span::raw(" Back  "));
    }
    spans.push(Span::styled("?", key));
    spans.push(Span::raw(" Help  "));
    spans.push(Span::styled("q", key));
    spans.push(Span::raw(" Quit  "));
    spans.push(Span::styled(
        app.status_msg.as_str(),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Tab strip shared by the categories and settings pages.
fn render_tabs(frame: &mut Frame, area: Rect, labels: Vec<String>, selected: Option<usize>, hint: &str) {
    let titles: Vec<Line> = labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            let style = if Some(i) == selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(label, style))
        })
        .collect();

    let mut tabs = ratatui::widgets::Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", hint)),
        )
        .highlight_style(Style::default().fg(Color::Cyan));
    if let Some(index) = selected {
        tabs = tabs.select(index);
    }
    frame.render_widget(tabs, area);
}

/// Split off a fixed-height strip at the top of `area`.
fn split_top(area: Rect, height: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(height), Constraint::Min(3)])
        .split(area);
    (chunks[0], chunks[1])
}
