use super::{cards, split_top};
use crate::app::App;
use crate::pages::favourites::{EMPTY_HINT, EMPTY_TITLE, FavouritesPage};
use ratatui::{Frame, layout::Rect};

pub fn render(app: &App, page: &FavouritesPage, frame: &mut Frame, area: Rect) {
    if page.is_loading() {
        cards::render_loading(frame, area, "Favourites");
        return;
    }

    let area = if app.favourites.is_empty() {
        let (message, rest) = split_top(area, 5);
        cards::render_message(frame, message, "Favourites", EMPTY_TITLE, EMPTY_HINT);
        rest
    } else {
        area
    };

    let sections = page.sections(&app.favourites);
    cards::render_sections(frame, area, "Favourites", &sections, app.selected, &app.favourites);
}
