use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

type Bindings = &'static [(&'static str, &'static str)];

const KEYBINDINGS: &[(&str, Bindings)] = &[
    (
        "Global",
        &[
            ("?", "Toggle this help"),
            ("q", "Quit application"),
            ("/", "Search wallpapers"),
            ("1-5", "Home, Categories, Favourites, Notification, Settings"),
            ("Esc", "Back to the previous page"),
        ],
    ),
    (
        "Cards",
        &[
            ("↑/k ↓/j", "Move selection"),
            ("Enter", "Open photo details"),
            ("f", "Add to or remove from favourites"),
            ("d", "Download (registers with Unsplash, opens the file)"),
            ("x", "Remove from favourites (Favourites page)"),
        ],
    ),
    (
        "Tabs",
        &[
            ("Tab/l", "Next category or settings tab"),
            ("S-Tab/h", "Previous category or settings tab"),
        ],
    ),
    (
        "Settings",
        &[
            ("r", "Change wallpaper"),
            ("a", "Toggle automatic wallpaper change"),
            ("t", "Toggle two-factor authentication (Profile)"),
        ],
    ),
];

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut help_text = vec![Line::from("")];
    for (title, bindings) in KEYBINDINGS {
        help_text.push(Line::from(Span::styled(format!("  {}", title), heading)));
        for (keys, action) in *bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("    {:<10}", keys), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ]));
        }
        help_text.push(Line::from(""));
    }

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help: Keybindings ")
                .title_bottom(Line::from(" Press ? or Esc to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}

/// Create a centered rectangle using percentage of parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
