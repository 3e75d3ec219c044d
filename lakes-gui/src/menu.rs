//! The top menu bar and its function key bindings.

use iced::{
    Element,
    keyboard::key::Named,
    widget::{button, row, space, text},
};
use strum::{EnumIter, IntoEnumIterator};

use crate::icons::icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum MenuAction {
    Find,
    Add,
    Delete,
    Edit,
    Quit,
    Help,
    About,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuGroup {
    /// "Фонд", operations on the catalog
    Catalog,
    /// "Справка"
    Reference,
}

impl MenuAction {
    pub fn key(self) -> Named {
        match self {
            MenuAction::Help => Named::F1,
            MenuAction::Add => Named::F2,
            MenuAction::Delete => Named::F3,
            MenuAction::Edit => Named::F4,
            MenuAction::Find => Named::F5,
            MenuAction::About => Named::F9,
            MenuAction::Quit => Named::F10,
        }
    }

    pub fn from_key(key: Named) -> Option<Self> {
        MenuAction::iter().find(|action| action.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Find => "Найти...",
            MenuAction::Add => "Добавить",
            MenuAction::Delete => "Удалить",
            MenuAction::Edit => "Изменить",
            MenuAction::Quit => "Выйти",
            MenuAction::Help => "Содержание",
            MenuAction::About => "О программе",
        }
    }

    pub fn group(self) -> MenuGroup {
        match self {
            MenuAction::Help | MenuAction::About => MenuGroup::Reference,
            _ => MenuGroup::Catalog,
        }
    }

    fn icon_name(self) -> &'static str {
        match self {
            MenuAction::Find => "search",
            MenuAction::Add => "plus",
            MenuAction::Delete => "delete",
            MenuAction::Edit => "edit",
            MenuAction::Quit => "exit",
            MenuAction::Help => "help",
            MenuAction::About => "info",
        }
    }
}

/// Render the menu bar. Every entry shows its function key.
pub fn view<'a>() -> Element<'a, MenuAction> {
    let entries = |group: MenuGroup| {
        MenuAction::iter()
            .filter(move |action| action.group() == group)
            .map(entry)
    };

    row![text("Фонд:")]
        .extend(entries(MenuGroup::Catalog))
        .push(space::horizontal())
        .push(text("Справка:"))
        .extend(entries(MenuGroup::Reference))
        .spacing(6)
        .padding(4)
        .into()
}

fn entry<'a>(action: MenuAction) -> Element<'a, MenuAction> {
    button(row![
        icon(action.icon_name()),
        text(format!("{} ({:?})", action.label(), action.key()))
    ]
    .spacing(4))
    .style(button::subtle)
    .on_press(action)
    .into()
}
