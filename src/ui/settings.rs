use super::{cards, render_tabs, split_top};
use crate::app::App;
use crate::pages::profile::SECURITY_ROWS;
use crate::pages::settings::{SettingsPage, SettingsTab, wallpaper_author, wallpaper_description};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render(app: &App, page: &SettingsPage, frame: &mut Frame, area: Rect) {
    let (strip, rest) = split_top(area, 3);
    let labels = SettingsTab::ALL.iter().map(|t| t.label().to_string()).collect();
    let selected = SettingsTab::ALL.iter().position(|t| *t == page.tab());
    render_tabs(frame, strip, labels, selected, "Tab/h/l switch");

    match page.tab() {
        SettingsTab::General => render_general(app, page, frame, rest),
        SettingsTab::Profile => render_profile(page, frame, rest),
        tab => {
            let text = tab.placeholder().unwrap_or_default();
            cards::render_message(frame, rest, tab.label(), tab.label(), text);
        }
    }
}

fn render_general(app: &App, page: &SettingsPage, frame: &mut Frame, area: Rect) {
    if page.is_loading() {
        cards::render_loading(frame, area, "Current Wallpaper");
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = match page.wallpaper() {
        Some(photo) => {
            let heart = if app.favourites.contains(&photo.id) { "  ♥" } else { "" };
            vec![
                Line::from(vec![
                    Span::styled(
                        format!(" {}", wallpaper_description(photo)),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(heart, Style::default().fg(Color::Red)),
                ]),
                Line::from(vec![
                    Span::styled(" By: ", label),
                    Span::raw(wallpaper_author(photo)),
                ]),
                Line::from(vec![
                    Span::styled(" Size: ", label),
                    Span::raw(photo.dimensions()),
                    Span::styled("   Downloads: ", label),
                    Span::styled(
                        photo.downloads.unwrap_or(0).to_string(),
                        Style::default().fg(Color::Yellow),
                    ),
                ]),
            ]
        }
        None => vec![Line::from(Span::styled(" No wallpaper loaded", label))],
    };

    let toggle = if page.auto_change() { "[x]" } else { "[ ]" };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!(" {} ", toggle), Style::default().fg(Color::Cyan)),
        Span::raw("Automatically change wallpapers"),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " r: change wallpaper   a: toggle automatic change   d: download   f: favourite",
        label,
    )));

    let card = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Current Wallpaper "),
    );
    frame.render_widget(card, area);
}

fn render_profile(page: &SettingsPage, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(5)])
        .split(area);
    let label = Style::default().fg(Color::DarkGray);
    let profile = page.profile();

    let fields: Vec<Line> = profile
        .fields()
        .into_iter()
        .map(|(name, value)| {
            Line::from(vec![
                Span::styled(format!(" {:<10}", name), label),
                Span::styled(value, Style::default().fg(Color::White)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(fields).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Profile Information "),
        ),
        chunks[0],
    );

    let mut security = Vec::new();
    for row in SECURITY_ROWS {
        let mut title = vec![Span::styled(
            format!(" {}", row.title),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )];
        if row.toggles_two_factor {
            let state = if profile.two_factor { "  [on]" } else { "  [off]" };
            title.push(Span::styled(state, Style::default().fg(Color::Cyan)));
        }
        security.push(Line::from(title));
        security.push(Line::from(Span::styled(format!("   {}", row.detail), label)));
    }
    security.push(Line::from(""));
    security.push(Line::from(Span::styled(" t: toggle two-factor authentication", label)));

    frame.render_widget(
        Paragraph::new(security).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Security "),
        ),
        chunks[1],
    );
}
