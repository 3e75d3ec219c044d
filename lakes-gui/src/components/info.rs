//! The help and about pages.

use iced::{
    Element,
    widget::{button, column, container, row, scrollable, space, text},
};
use strum::IntoEnumIterator;

use crate::menu::MenuAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Help,
    About,
}

impl Page {
    fn title(self) -> &'static str {
        match self {
            Page::Help => "Содержание",
            Page::About => "О программе",
        }
    }

    fn body(self) -> String {
        match self {
            Page::Help => {
                let keys: Vec<String> = MenuAction::iter()
                    .map(|action| format!("{:?}: {}", action.key(), action.label()))
                    .collect();

                format!(
                    "Каталог известных озер России.\n\n\
                     Выберите озеро в списке слева, чтобы увидеть его изображение и \
                     описание. Поле поиска над списком оставляет только озера, в \
                     названии которых есть введенный текст.\n\n\
                     Описание можно заполнить автоматически кнопкой \"Взять информацию \
                     об озере из википедии\" в окне добавления или изменения.\n\n\
                     Клавиши:\n{}",
                    keys.join("\n")
                )
            }
            Page::About => format!(
                "Известные озера России\nВерсия {}\n\n\
                 Справочник по озерам с изображениями и описаниями, \
                 хранящимися в локальной базе данных.",
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}

pub fn view<'a, Message>(page: Page, on_close: Message) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    container(
        column![
            text(page.title()).size(20),
            scrollable(text(page.body())),
            space::vertical(),
            row![space::horizontal(), button("Закрыть").on_press(on_close)],
        ]
        .spacing(10),
    )
    .padding(20)
    .width(480)
    .height(420)
    .style(container::rounded_box)
    .into()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_help_lists_keys() {
        let body = Page::Help.body();

        assert!(body.contains("F5: Найти..."));
        assert!(body.contains("F10: Выйти"));
    }
}
