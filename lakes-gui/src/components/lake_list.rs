use iced::{
    Element,
    Length::Fill,
    widget::{Column, button, column, row, scrollable, text, text_input},
};
use lakes_lib::search::filter_names;

use crate::icons::icon;

#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    Selected(String),
}

pub enum Action {
    None,
    Select(String),
}

/// The browse list: every lake name, narrowed by the search field as the user types.
#[derive(Debug, Default)]
pub struct LakeList {
    names: Vec<String>,
    query: String,
    selected: Option<String>,
}

impl LakeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Replace the listing. A selection that no longer exists is dropped.
    pub fn set_names(&mut self, names: Vec<String>) {
        if self
            .selected
            .as_ref()
            .is_some_and(|selected| !names.contains(selected))
        {
            self.selected = None;
        }
        self.names = names;
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
    }

    pub fn select(&mut self, name: String) {
        self.selected = Some(name);
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::QueryChanged(query) => {
                self.query = query;
                Action::None
            }
            Message::Selected(name) => {
                self.selected = Some(name.clone());
                Action::Select(name)
            }
        }
    }

    /// Names matching the current search text
    pub fn visible(&self) -> Vec<&str> {
        filter_names(&self.names, &self.query)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let entries = self.visible().into_iter().map(|name| {
            let style = if self.selected() == Some(name) {
                button::primary
            } else {
                button::subtle
            };

            button(text(name))
                .width(Fill)
                .style(style)
                .on_press(Message::Selected(name.to_string()))
                .into()
        });

        column![
            row![
                icon("search"),
                text_input("Поиск...", &self.query).on_input(Message::QueryChanged),
            ]
            .spacing(4),
            scrollable(Column::with_children(entries).spacing(2)).height(Fill),
        ]
        .spacing(6)
        .into()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn list() -> LakeList {
        let mut list = LakeList::new();
        list.set_names(
            ["Байкал", "Ладожское", "Онежское"]
                .map(String::from)
                .to_vec(),
        );
        list
    }

    #[test]
    fn test_query_narrows_listing() {
        let mut list = list();

        list.update(Message::QueryChanged("жск".into()));

        assert_eq!(list.visible(), vec!["Ладожское", "Онежское"]);
    }

    #[test]
    fn test_select_reports_name() {
        let mut list = list();

        let action = list.update(Message::Selected("Байкал".into()));

        assert!(matches!(action, Action::Select(ref name) if name == "Байкал"));
        assert_eq!(list.selected(), Some("Байкал"));
    }

    #[test]
    fn test_refresh_drops_missing_selection() {
        let mut list = list();
        list.select("Байкал".into());

        list.set_names(vec!["Онежское".into()]);

        assert_eq!(list.selected(), None);
    }

    #[test]
    fn test_refresh_keeps_existing_selection() {
        let mut list = list();
        list.select("Онежское".into());

        list.set_names(vec!["Онежское".into()]);

        assert_eq!(list.selected(), Some("Онежское"));
    }
}
