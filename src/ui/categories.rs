use super::{cards, render_tabs, split_top};
use crate::app::App;
use crate::pages::categories::CategoriesPage;
use ratatui::{Frame, layout::Rect};

pub fn render(app: &App, page: &CategoriesPage, frame: &mut Frame, area: Rect) {
    // Nothing fetched is drawn until topics and the active topic's photos have both settled
    if page.is_loading() {
        cards::render_loading(frame, area, "Categories");
        return;
    }

    let tabs = page.tabs();
    if tabs.is_empty() {
        cards::render_message(
            frame,
            area,
            "Categories",
            "No categories available",
            "Unsplash returned no topics",
        );
        return;
    }

    let (strip, rest) = split_top(area, 3);
    let labels = tabs.iter().map(|t| t.title.clone()).collect();
    render_tabs(frame, strip, labels, page.active_index(), "Tab/h/l switch category");

    let sections = page.sections();
    cards::render_sections(frame, rest, "Wallpapers", &sections, app.selected, &app.favourites);
}

#[cfg(test)]
mod tests {
    use crate::api::Payload;
    use crate::app::{App, Route};
    use crate::fetch::{FetchMessage, Slot};
    use crate::model::fixtures;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| crate::ui::render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn respond(app: &mut App, slot: Slot, payload: Payload) {
        let request = app
            .take_requests()
            .into_iter()
            .find(|r| r.ticket.slot == slot)
            .unwrap();
        app.handle_message(FetchMessage {
            ticket: request.ticket,
            result: Ok(payload),
        });
    }

    #[test]
    fn test_topic_tabs_hidden_until_wallpapers_arrive() {
        let mut app = App::new(Route::Categories);
        respond(
            &mut app,
            Slot::Topics,
            Payload::Topics(vec![fixtures::topic("nature", None), fixtures::topic("city", None)]),
        );
        assert!(app.page.is_loading());
        let drawn = screen(&app);
        assert!(drawn.contains("Loading"));
        assert!(!drawn.contains("Topic nature"));
        assert!(!drawn.contains("Topic city"));

        respond(&mut app, Slot::TopicPhotos, Payload::Photos(fixtures::photos(&["w1"])));
        assert!(!app.page.is_loading());
        assert!(screen(&app).contains("Topic nature"));
    }
}
