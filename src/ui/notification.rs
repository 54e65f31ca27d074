use super::cards;
use crate::pages::notification::{EMPTY_HINT, EMPTY_TITLE};
use ratatui::{Frame, layout::Rect};

pub fn render(frame: &mut Frame, area: Rect) {
    cards::render_message(frame, area, "Notifications", EMPTY_TITLE, EMPTY_HINT);
}
