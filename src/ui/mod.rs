pub mod search_input;
pub mod suggestion_list;
pub mod theme;
