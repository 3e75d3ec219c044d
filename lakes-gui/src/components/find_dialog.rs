use iced::{
    Element,
    widget::{button, column, container, row, space, text, text_input},
};

#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    FindPressed,
    CancelPressed,
}

pub enum Action {
    None,
    /// Copy the text into the browse list's search field
    Find(String),
    Cancel,
}

#[derive(Debug, Default)]
pub struct FindDialog {
    query: String,
}

impl FindDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::QueryChanged(query) => {
                self.query = query;
                Action::None
            }
            Message::FindPressed => Action::Find(self.query.clone()),
            Message::CancelPressed => Action::Cancel,
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        container(
            column![
                text("Поиск озера").size(20),
                text_input("Часть названия", &self.query)
                    .on_input(Message::QueryChanged)
                    .on_submit(Message::FindPressed),
                space::vertical(),
                row![
                    space::horizontal(),
                    button("Отмена").on_press(Message::CancelPressed),
                    button("Найти").on_press(Message::FindPressed),
                ]
                .spacing(6),
            ]
            .spacing(10),
        )
        .padding(20)
        .width(400)
        .height(160)
        .style(container::rounded_box)
        .into()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_find_returns_query() {
        let mut dialog = FindDialog::new();
        dialog.open("");
        dialog.update(Message::QueryChanged("бай".into()));

        assert!(matches!(
            dialog.update(Message::FindPressed),
            Action::Find(ref q) if q == "бай"
        ));
    }
}
