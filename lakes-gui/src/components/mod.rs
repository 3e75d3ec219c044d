use std::sync::Arc;

use iced::{
    Color, Element, Length,
    widget::{center, container, mouse_area, opaque, stack},
};
use lakes_lib::Error;
use tokio::task::spawn_blocking;

pub mod delete_dialog;
pub mod find_dialog;
pub mod info;
pub mod lake_details;
pub mod lake_form;
pub mod lake_list;

/// Result of a catalog call, shareable inside a [`Clone`] message
pub type Outcome<T> = Result<T, Arc<Error>>;

/// Run a catalog call on the blocking thread pool.
pub async fn blocking<T, F>(f: F) -> Outcome<T>
where
    T: Send + 'static,
    F: FnOnce() -> lakes_lib::Result<T> + Send + 'static,
{
    spawn_blocking(f)
        .await
        .map_err(Error::from)
        .and_then(|result| result)
        .map_err(Arc::new)
}

/// Draw `content` centred above a dimmed `base`.
pub fn modal<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_click_outside: Option<Message>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let backdrop = mouse_area(center(opaque(content)).style(|_theme| container::Style {
        background: Some(
            Color {
                a: 0.8,
                ..Color::BLACK
            }
            .into(),
        ),
        ..container::Style::default()
    }));

    stack![
        base.into(),
        opaque(match on_click_outside {
            Some(msg) => backdrop.on_press(msg),
            None => backdrop,
        })
    ]
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_blocking_returns_value() {
        let outcome = blocking(|| Ok(7)).await;

        assert!(matches!(outcome, Ok(7)));
    }

    #[tokio::test]
    async fn test_blocking_panic_becomes_error() {
        let outcome: Outcome<()> = blocking(|| panic!("catalog call failed")).await;

        assert!(matches!(outcome, Err(ref e) if matches!(**e, Error::Task(_))));
    }
}
