use super::{cards, split_top};
use crate::app::App;
use crate::pages::home::HomePage;
use crate::pages::search::SearchResults;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

pub fn render(app: &App, page: &HomePage, frame: &mut Frame, area: Rect) {
    if page.is_loading() {
        cards::render_loading(frame, area, "Home");
        return;
    }

    let area = match search_headline(page.search()) {
        Some(headline) => {
            let (header, rest) = split_top(area, 1);
            frame.render_widget(Paragraph::new(headline), header);
            rest
        }
        None => area,
    };

    let sections = page.sections();
    cards::render_sections(frame, area, "Home", &sections, app.selected, &app.favourites);
}

/// One line above the cards describing the last search, if any.
fn search_headline(search: &SearchResults) -> Option<Line<'static>> {
    let query = search.query()?;
    let line = match search.failure() {
        Some(failure) => Line::from(Span::styled(
            format!(" Search for \"{}\" failed: {}", query, failure.notice()),
            Style::default().fg(Color::Red),
        )),
        None if search.found_nothing() => Line::from(Span::styled(
            format!(" No wallpapers found for \"{}\"", query),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(Span::styled(
            format!(" {} results for \"{}\"", search.photos().len(), query),
            Style::default().fg(Color::Yellow),
        )),
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, Payload};
    use crate::fetch::MountId;
    use crate::model::fixtures;

    fn text(line: Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_headline_absent_without_search() {
        assert!(search_headline(&SearchResults::default()).is_none());
    }

    #[test]
    fn test_headline_counts_results() {
        let mut search = SearchResults::default();
        let request = search.submit(MountId(1), "owl").unwrap();
        search.apply(request.ticket.generation, Ok(Payload::Photos(fixtures::photos(&["o1", "o2"]))));
        assert_eq!(text(search_headline(&search).unwrap()), " 2 results for \"owl\"");
    }

    #[test]
    fn test_headline_distinguishes_failure_from_no_matches() {
        let mut search = SearchResults::default();
        let request = search.submit(MountId(1), "owl").unwrap();
        search.apply(request.ticket.generation, Ok(Payload::Photos(vec![])));
        assert_eq!(text(search_headline(&search).unwrap()), " No wallpapers found for \"owl\"");

        let request = search.submit(MountId(1), "owl").unwrap();
        search.apply(
            request.ticket.generation,
            Err(ApiError::Status {
                status: 401,
                message: "OAuth error".into(),
            }),
        );
        let headline = text(search_headline(&search).unwrap());
        assert!(headline.contains("failed"));
        assert!(!headline.contains("0 results"));
    }
}
