use iced::widget::{column, container, mouse_area, scrollable, text, Column};
use iced::{Element, Fill, Padding, Task};

use crate::api::City;
use crate::app::Message;
use crate::ui::theme;

/// The suggestion list ID for scroll operations
pub const SUGGESTION_LIST_ID: &str = "cityfill-suggestion-list";

/// Text of every row, in display order
pub fn row_labels(cities: &[City]) -> Vec<String> {
    cities.iter().map(City::label).collect()
}

/// Vertical scroll position (0.0 = top, 1.0 = bottom) that brings the
/// selected row into view.
pub fn scroll_fraction(len: usize, selected: Option<usize>) -> Option<f32> {
    let i = selected?;
    if len <= 1 {
        return Some(0.0);
    }
    Some(i.min(len - 1) as f32 / (len - 1) as f32)
}

/// Scroll the list so the selected row is visible.
pub fn scroll_to_selected<T>(len: usize, selected: Option<usize>) -> Task<T> {
    match scroll_fraction(len, selected) {
        Some(y) => iced::widget::operation::snap_to(
            SUGGESTION_LIST_ID,
            scrollable::RelativeOffset { x: 0.0, y },
        ),
        None => Task::none(),
    }
}

/// Build the suggestion list: one clickable row per city.
pub fn view(cities: &[City], selected: Option<usize>) -> Element<'_, Message> {
    if cities.is_empty() {
        return column![].into();
    }

    let mut rows = Column::new().spacing(2);
    for (i, label) in row_labels(cities).into_iter().enumerate() {
        let style = if selected == Some(i) {
            theme::suggestion_row_selected as fn(&iced::Theme) -> container::Style
        } else {
            theme::suggestion_row
        };

        let row = container(text(label).size(16).color(theme::TEXT_PRIMARY))
            .padding(Padding::from([6, 12]))
            .width(Fill)
            .style(style);

        rows = rows.push(mouse_area(row).on_press(Message::Select(i)));
    }

    scrollable(rows).id(SUGGESTION_LIST_ID).height(Fill).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_city_gets_a_row() {
        let cities: Vec<City> = (0..10)
            .map(|i| City::new(i.to_string(), format!("City {i}"), "Nowhere"))
            .collect();
        let labels = row_labels(&cities);
        assert_eq!(labels.len(), 10);
        assert_eq!(labels[9], "City 9, Nowhere");
    }

    #[test]
    fn no_scroll_without_selection() {
        assert_eq!(scroll_fraction(10, None), None);
    }

    #[test]
    fn scroll_tracks_selection() {
        assert_eq!(scroll_fraction(10, Some(0)), Some(0.0));
        assert_eq!(scroll_fraction(10, Some(9)), Some(1.0));
        assert_eq!(scroll_fraction(1, Some(0)), Some(0.0));
        assert_eq!(scroll_fraction(3, Some(7)), Some(1.0));
    }
}
