use iced::{
    Element, Task,
    widget::{button, column, container, row, space, text, text_input},
};
use lakes_lib::Error;

use crate::alert;

#[derive(Debug, Clone)]
pub enum Message {
    NameChanged(String),
    DeletePressed,
    CancelPressed,
}

pub enum Action {
    None,
    Run(Task<Message>),
    Delete(String),
    Cancel,
}

#[derive(Debug, Default)]
pub struct DeleteDialog {
    name: String,
    /// Names in the listing at the time the dialog was opened
    known: Vec<String>,
    /// A delete is running
    deleting: bool,
}

impl DeleteDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, names: &[String], prefill: Option<&str>) {
        self.known = names.to_vec();
        self.name = prefill.unwrap_or_default().to_string();
        self.deleting = false;
    }

    /// Accept deletes again once the running one has completed.
    pub fn finish_delete(&mut self) {
        self.deleting = false;
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::NameChanged(name) => {
                self.name = name;
                Action::None
            }
            Message::DeletePressed if self.deleting => Action::None,
            Message::DeletePressed => match self.validate() {
                Ok(name) => {
                    self.deleting = true;
                    Action::Delete(name)
                }
                Err(e) => Action::Run(alert::error(alert::store_error_text(&e))),
            },
            Message::CancelPressed => Action::Cancel,
        }
    }

    /// The trimmed name, which must be non-empty and present in the listing.
    fn validate(&self) -> lakes_lib::Result<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if !self.known.iter().any(|known| known == name) {
            return Err(Error::NotFound(name.into()));
        }

        Ok(name.into())
    }

    pub fn view(&self) -> Element<'_, Message> {
        container(
            column![
                text("Удаление озера").size(20),
                row![
                    text("Название:"),
                    text_input("Название озера", &self.name)
                        .on_input(Message::NameChanged)
                        .on_submit_maybe((!self.deleting).then_some(Message::DeletePressed)),
                ]
                .spacing(6),
                space::vertical(),
                row![
                    space::horizontal(),
                    button("Отмена").on_press(Message::CancelPressed),
                    button("Удалить")
                        .style(button::danger)
                        .on_press_maybe((!self.deleting).then_some(Message::DeletePressed)),
                ]
                .spacing(6),
            ]
            .spacing(10),
        )
        .padding(20)
        .width(420)
        .height(180)
        .style(container::rounded_box)
        .into()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn dialog() -> DeleteDialog {
        let mut dialog = DeleteDialog::new();
        dialog.open(&["Байкал".into(), "Онежское".into()], None);
        dialog
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut dialog = dialog();
        dialog.update(Message::NameChanged("  ".into()));

        assert!(matches!(dialog.validate(), Err(Error::EmptyName)));
        assert!(matches!(
            dialog.update(Message::DeletePressed),
            Action::Run(_)
        ));
    }

    #[test]
    fn test_unknown_name_rejected() {
        let mut dialog = dialog();
        dialog.update(Message::NameChanged("Каспий".into()));

        assert!(matches!(dialog.validate(), Err(Error::NotFound(ref n)) if n == "Каспий"));
    }

    #[test]
    fn test_known_name_deleted() {
        let mut dialog = dialog();
        dialog.update(Message::NameChanged(" Байкал ".into()));

        assert!(matches!(
            dialog.update(Message::DeletePressed),
            Action::Delete(ref n) if n == "Байкал"
        ));
    }

    #[test]
    fn test_open_prefills_selection() {
        let mut dialog = DeleteDialog::new();

        dialog.open(&["Байкал".into()], Some("Байкал"));

        assert!(matches!(dialog.validate(), Ok(ref n) if n == "Байкал"));
    }

    #[test]
    fn test_second_delete_ignored_while_running() {
        let mut dialog = dialog();
        dialog.update(Message::NameChanged("Байкал".into()));

        assert!(matches!(dialog.update(Message::DeletePressed), Action::Delete(_)));
        assert!(matches!(dialog.update(Message::DeletePressed), Action::None));

        dialog.finish_delete();

        assert!(matches!(dialog.update(Message::DeletePressed), Action::Delete(_)));
    }
}
