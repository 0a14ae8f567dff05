use iced::widget::text_input;
use iced::{Element, Fill};

use crate::app::{Message, Navigation};
use crate::ui::theme;

/// The city input ID for focus management
pub const CITY_INPUT_ID: &str = "cityfill-city-input";

/// Build the city text input
pub fn view(value: &str) -> Element<'_, Message> {
    text_input("Start typing a city...", value)
        .on_input(Message::InputChanged)
        .on_submit(Message::Navigate(Navigation::Enter))
        .id(CITY_INPUT_ID)
        .padding(12)
        .size(18)
        .width(Fill)
        .style(theme::search_input)
        .into()
}
