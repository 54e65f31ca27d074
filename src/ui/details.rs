use super::cards;
use crate::app::App;
use crate::pages::details::{DetailsPage, NOT_FOUND};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render(app: &App, page: &DetailsPage, frame: &mut Frame, area: Rect) {
    if page.is_loading() {
        cards::render_loading(frame, area, "Photo");
        return;
    }
    if page.not_found() {
        cards::render_message(frame, area, "Photo", NOT_FOUND, "Press Esc to go back");
        return;
    }
    let Some(photo) = page.photo() else {
        return;
    };

    // Layout: metadata(6) + description(min 4) + cards(min)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(4),
            Constraint::Min(8),
        ])
        .split(area);

    let label = Style::default().fg(Color::DarkGray);
    let favourite = if app.favourites.contains(&photo.id) { "  ♥" } else { "" };
    let created = photo
        .created_at
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let tags = page
        .tags()
        .iter()
        .map(|t| format!("#{}", t.title))
        .collect::<Vec<_>>()
        .join(" ");

    let meta_lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {}", photo.title()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(favourite, Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::styled(" By: ", label),
            Span::styled(&photo.user.name, Style::default().fg(Color::White)),
            Span::styled(format!(" @{}", photo.user.username), Style::default().fg(Color::Cyan)),
            Span::styled("   Likes: ", label),
            Span::styled(photo.likes.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled(" Size: ", label),
            Span::raw(photo.dimensions()),
            Span::styled("   Taken: ", label),
            Span::raw(created),
        ]),
        Line::from(vec![
            Span::styled(" Tags: ", label),
            Span::styled(tags, Style::default().fg(Color::Blue)),
        ]),
    ];
    let meta = Paragraph::new(meta_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", page.id())),
    );
    frame.render_widget(meta, chunks[0]);

    let caption = photo.caption();
    let description = Paragraph::new(tui_markdown::from_str(&caption))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Description "),
        );
    frame.render_widget(description, chunks[1]);

    let sections = page.sections();
    cards::render_sections(frame, chunks[2], "Wallpapers", &sections, app.selected, &app.favourites);
}
