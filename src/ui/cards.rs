use crate::api::FailureKind;
use crate::pages::Section;
use crate::pages::favourites::FavouriteSet;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Render titled sections of photo cards as one list. `selected` indexes
/// the cards across all sections; headers are not selectable.
pub fn render_sections(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    sections: &[Section<'_>],
    selected: usize,
    favourites: &FavouriteSet,
) {
    let label_width = (area.width as usize).saturating_sub(36).max(12);
    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_row = None;
    let mut card = 0;

    for section in sections {
        items.push(ListItem::new(Line::from(Span::styled(
            format!(" {} ({})", section.title, section.entries.len()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))));
        if section.entries.is_empty() {
            items.push(ListItem::new(Line::from(Span::styled(
                "    Nothing here yet",
                Style::default().fg(Color::DarkGray),
            ))));
        }
        for entry in &section.entries {
            if card == selected {
                selected_row = Some(items.len());
            }
            card += 1;

            let heart = if favourites.contains(&entry.photo.id) { "♥ " } else { "  " };
            items.push(ListItem::new(Line::from(vec![
                Span::styled(format!("  {}", heart), Style::default().fg(Color::Red)),
                Span::raw(truncate_str(entry.label, label_width)),
                Span::styled(
                    format!("  {}", truncate_str(&entry.photo.user.name, 20)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("  {} likes", entry.photo.likes),
                    Style::default().fg(Color::Yellow),
                ),
            ])));
        }
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", title))
                .title_bottom(
                    Line::from(format!(" {} cards ", card)).alignment(Alignment::Right),
                ),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(selected_row);
    frame.render_stateful_widget(list, area, &mut state);
}

/// Placeholder shown instead of content while a page is loading.
pub fn render_loading(frame: &mut Frame, area: Rect, title: &str) {
    let placeholder = Paragraph::new(Line::from(Span::styled(
        " Loading...",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", title)),
    );
    frame.render_widget(placeholder, area);
}

/// Centered two-line message for empty states.
pub fn render_message(frame: &mut Frame, area: Rect, title: &str, headline: &str, hint: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            headline,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];
    let message = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", title)),
        );
    frame.render_widget(message, area);
}

/// One-line notice for a failed fetch.
pub fn notice_line(failure: FailureKind) -> Line<'static> {
    Line::from(vec![
        Span::styled(" ! ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::styled(failure.notice(), Style::default().fg(Color::Red)),
    ])
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        result.push(c);
        used += w;
    }
    result.push('…');
    result
}
