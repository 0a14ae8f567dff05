use std::future::Future;
use std::sync::Arc;

use iced::widget::{column, container};
use iced::{event, keyboard, Element, Fill, Padding, Subscription, Task, Theme};

use crate::api::{City, CityLookup, GeoDbClient, LookupOutcome};
use crate::config::Config;
use crate::store::{FetchPlan, SuggestionStore};
use crate::ui::{search_input, suggestion_list, theme};

/// The autocomplete form: one input, one suggestion list.
pub struct App {
    store: SuggestionStore,
    /// Raw text in the input field
    input: String,
    /// Selection cursor into `store.cities()`
    selected: Option<usize>,
    /// Last city the user confirmed
    confirmed: Option<City>,
}

/// Keyboard intents the list reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Down,
    Up,
    Enter,
    Escape,
}

#[derive(Debug, Clone)]
pub enum Message {
    InputChanged(String),
    SuggestionsLoaded {
        seq: u64,
        query: String,
        outcome: LookupOutcome,
    },
    Navigate(Navigation),
    Select(usize),
}

impl App {
    pub fn new(config: Config, lookup: Arc<dyn CityLookup>) -> Self {
        let store = SuggestionStore::new(lookup, &config.suggestions);
        Self {
            store,
            input: String::new(),
            selected: None,
            confirmed: None,
        }
    }

    /// Mount the widget against the real GeoDB client.
    pub fn boot(config: Config) -> (Self, Task<Message>) {
        let client = GeoDbClient::new(&config.api);
        tracing::info!("City lookups go to {}", client.endpoint());
        let app = Self::new(config, Arc::new(client));
        (app, iced::widget::operation::focus(search_input::CITY_INPUT_ID))
    }

    pub fn title(&self) -> String {
        String::from("City")
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn confirmed(&self) -> Option<&City> {
        self.confirmed.as_ref()
    }

    pub fn store(&self) -> &SuggestionStore {
        &self.store
    }

    /// Row labels as drawn by the suggestion list
    pub fn suggestion_labels(&self) -> Vec<String> {
        suggestion_list::row_labels(self.store.cities())
    }

    /// Take a new input value. When it needs a network lookup, returns the
    /// future resolving to the matching [`Message::SuggestionsLoaded`].
    pub fn input_changed(
        &mut self,
        value: String,
    ) -> Option<impl Future<Output = Message> + Send + 'static> {
        self.selected = None;
        let plan = self.store.begin(&value);
        self.input = value;
        match plan {
            FetchPlan::Request { seq, query } => {
                let lookup = self.store.lookup(query.clone());
                Some(async move {
                    let outcome = lookup.await;
                    Message::SuggestionsLoaded {
                        seq,
                        query,
                        outcome,
                    }
                })
            }
            FetchPlan::Cleared | FetchPlan::Cached => None,
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::InputChanged(value) => match self.input_changed(value) {
                Some(load) => Task::perform(load, |message| message),
                None => Task::none(),
            },
            Message::SuggestionsLoaded {
                seq,
                query,
                outcome,
            } => {
                if self.store.complete(seq, query, outcome) {
                    self.selected = None;
                }
                Task::none()
            }
            Message::Navigate(Navigation::Down) => {
                let len = self.store.cities().len();
                if len > 0 {
                    self.selected = Some(match self.selected {
                        None => 0,
                        Some(i) => (i + 1).min(len - 1),
                    });
                }
                suggestion_list::scroll_to_selected(len, self.selected)
            }
            Message::Navigate(Navigation::Up) => {
                if let Some(i) = self.selected {
                    self.selected = Some(i.saturating_sub(1));
                }
                suggestion_list::scroll_to_selected(self.store.cities().len(), self.selected)
            }
            Message::Navigate(Navigation::Enter) => {
                if let Some(i) = self.selected {
                    self.confirm(i);
                }
                Task::none()
            }
            Message::Navigate(Navigation::Escape) => {
                self.selected = None;
                self.store.clear();
                Task::none()
            }
            Message::Select(index) => {
                self.confirm(index);
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let input = search_input::view(&self.input);
        let suggestions = suggestion_list::view(self.store.cities(), self.selected);

        let content = column![input, suggestions]
            .spacing(8)
            .padding(Padding::new(12.0));

        container(content)
            .width(Fill)
            .height(Fill)
            .style(theme::main_container)
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, status, _window| match event {
            iced::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(named),
                ..
            }) => {
                let nav = match named {
                    keyboard::key::Named::ArrowDown => Navigation::Down,
                    keyboard::key::Named::ArrowUp => Navigation::Up,
                    keyboard::key::Named::Enter => Navigation::Enter,
                    keyboard::key::Named::Escape => Navigation::Escape,
                    _ => return None,
                };
                // Enter on the focused input already arrives via on_submit
                if matches!(status, event::Status::Ignored) || nav == Navigation::Escape {
                    Some(Message::Navigate(nav))
                } else {
                    None
                }
            }
            _ => None,
        })
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    // Write the label of suggestion `index` into the input and close the list.
    fn confirm(&mut self, index: usize) {
        let Some(city) = self.store.cities().get(index).cloned() else {
            return;
        };
        tracing::info!("Selected {} (id {})", city.label(), city.id);
        self.input = city.label();
        self.selected = None;
        self.store.clear();
        self.confirmed = Some(city);
    }
}
