//! Modal message boxes and the user facing wording of every failure.

use iced::Task;
use lakes_lib::{Error, FetchError};
use rfd::{AsyncMessageDialog, MessageButtons, MessageDialog, MessageLevel};

const ERROR_TITLE: &str = "Ошибка";

/// Show an error box. The returned task completes once the box is dismissed.
pub fn error<M>(description: impl Into<String>) -> Task<M>
where
    M: Send + 'static,
{
    show(MessageLevel::Error, ERROR_TITLE, description.into())
}

/// Show an informational box. The returned task completes once the box is dismissed.
pub fn info<M>(title: &'static str, description: impl Into<String>) -> Task<M>
where
    M: Send + 'static,
{
    show(MessageLevel::Info, title, description.into())
}

/// Show an error box and block until it is dismissed. Only for use before the
/// application window exists.
pub fn blocking_error(description: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(ERROR_TITLE)
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show();
}

fn show<M>(level: MessageLevel, title: &'static str, description: String) -> Task<M>
where
    M: Send + 'static,
{
    Task::future(async move {
        AsyncMessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(description)
            .set_buttons(MessageButtons::Ok)
            .show()
            .await;
    })
    .discard()
}

/// Wording for a failed catalog operation.
pub fn store_error_text(err: &Error) -> String {
    match err {
        Error::Store(_) => "Нет подключения к базе данных".into(),
        Error::DuplicateName(name) => {
            format!("Озеро с названием {name} уже существует в базе данных")
        }
        Error::NotFound(name) => format!("Озера с названием {name} не существует в базе"),
        Error::EmptyName => "Обязательное поле: название озера".into(),
        Error::Io { path, .. } => format!("Не удалось прочитать файл {}", path.display()),
        Error::Task(_) => "Операция с базой данных прервана".into(),
        other => other.to_string(),
    }
}

/// Wording for a failed description fetch.
pub fn fetch_error_text(err: &FetchError) -> String {
    match err {
        FetchError::EmptyName => "Поле с названием озера не должно быть пустым!".into(),
        FetchError::NotFound { .. } => "Информации о данном озере нет в википедии".into(),
        FetchError::NoNetwork(_) => "Нет сетевого подключения!".into(),
        FetchError::MissingContent(_) => "Не удалось извлечь текст статьи".into(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_duplicate_names_the_lake() {
        let text = store_error_text(&Error::DuplicateName("Байкал".into()));

        assert_eq!(text, "Озеро с названием Байкал уже существует в базе данных");
    }

    #[test]
    fn test_missing_lake_names_the_lake() {
        let text = store_error_text(&Error::NotFound("Каспий".into()));

        assert_eq!(text, "Озера с названием Каспий не существует в базе");
    }

    #[test]
    fn test_fetch_empty_name() {
        assert_eq!(
            fetch_error_text(&FetchError::EmptyName),
            "Поле с названием озера не должно быть пустым!"
        );
    }
}
