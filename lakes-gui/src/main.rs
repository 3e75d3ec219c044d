use std::{path::PathBuf, process};

use clap::Parser;
use iced::{
    Element, Event,
    Length::{Fill, FillPortion},
    Size, Subscription, Task, Theme, application, event,
    keyboard::{self, Key},
    widget::{column, container, row},
};
use lakes_lib::{
    CoreConfig, Fetcher, Lake, LakeDraft, Repository,
    repository::{CONFIG_ENV, ThemeChoice},
};
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::{
    components::{
        Outcome, blocking,
        delete_dialog::{self, DeleteDialog},
        find_dialog::{self, FindDialog},
        info::{self as info_page, Page},
        lake_details::LakeDetails,
        lake_form::{self, LakeForm, Mode},
        lake_list::{self, LakeList},
        modal,
    },
    menu::MenuAction,
};

pub mod alert;
pub mod components;
pub mod icons;
pub mod menu;

const TITLE: &str = "Известные озера России";

/// Desktop catalog of Russia's well known lakes
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Configuration file to use instead of the default location
    #[arg(long, env = CONFIG_ENV)]
    config: Option<PathBuf>,
}

fn main() -> iced::Result {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    // Logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let args = Args::parse();

    let (repo, fetcher) = match startup(&args) {
        Ok(parts) => parts,
        Err(text) => {
            alert::blocking_error(&text);
            process::exit(1);
        }
    };
    let window = repo.cfg().read().window.clone();

    application(
        move || App::new(repo.clone(), fetcher.clone()),
        App::update,
        App::view,
    )
    .title(App::title)
    .theme(App::theme)
    .subscription(App::subscription)
    .window_size(Size::new(f32::from(window.width), f32::from(window.height)))
    .centered()
    .run()
}

/// Load the configuration and open the catalog. Failures come back as alert text.
fn startup(args: &Args) -> Result<(Repository, Fetcher), String> {
    let cfg = match &args.config {
        Some(path) => CoreConfig::load_from(path),
        None => CoreConfig::load(),
    }
    .map_err(|e| {
        error!("{e}");
        e.to_string()
    })?;

    let fetcher = Fetcher::new(&cfg.fetcher).map_err(|e| {
        error!("{e}");
        e.to_string()
    })?;

    let repo = Repository::from_config(cfg).map_err(|e| {
        error!("{e}");
        alert::store_error_text(&e)
    })?;

    Ok((repo, fetcher))
}

#[derive(Debug, Clone)]
enum Message {
    Menu(MenuAction),
    NamesLoaded(Outcome<Vec<String>>),
    LakeLoaded(Outcome<Lake>),
    FormTargetLoaded(Outcome<Lake>),
    Saved {
        mode: Mode,
        target: Option<String>,
        result: Outcome<String>,
    },
    Deleted(Outcome<String>),
    CloseDialog,
    Exit,
    // Components
    LakeList(lake_list::Message),
    LakeForm(lake_form::Message),
    DeleteDialog(delete_dialog::Message),
    FindDialog(find_dialog::Message),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialog {
    Form,
    Delete,
    Find,
    Info(Page),
}

struct App {
    repo: Repository,
    theme: Theme,
    dialog: Option<Dialog>,
    // Components
    lake_list: LakeList,
    details: LakeDetails,
    lake_form: LakeForm,
    delete_dialog: DeleteDialog,
    find_dialog: FindDialog,
}

impl App {
    fn new(repo: Repository, fetcher: Fetcher) -> (Self, Task<Message>) {
        let theme = match repo.cfg().read().window.theme {
            ThemeChoice::Light => Theme::Light,
            ThemeChoice::Dark => Theme::Dark,
        };

        let app = Self {
            repo,
            theme,
            dialog: None,
            lake_list: LakeList::new(),
            details: LakeDetails::new(),
            lake_form: LakeForm::new(fetcher),
            delete_dialog: DeleteDialog::new(),
            find_dialog: FindDialog::new(),
        };
        let task = app.refresh();

        (app, task)
    }

    fn refresh(&self) -> Task<Message> {
        let repo = self.repo.clone();
        Task::perform(blocking(move || repo.list_names()), Message::NamesLoaded)
    }

    fn load_lake(&self, name: String, on_loaded: fn(Outcome<Lake>) -> Message) -> Task<Message> {
        let repo = self.repo.clone();
        Task::perform(blocking(move || repo.get(&name)), on_loaded)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Menu(action) => self.menu(action),
            Message::NamesLoaded(Ok(names)) => {
                self.lake_list.set_names(names);

                // Keep the detail panes in step with the listing
                match self.lake_list.selected() {
                    Some(name) => self.load_lake(name.to_string(), Message::LakeLoaded),
                    None => {
                        self.details.clear();
                        Task::none()
                    }
                }
            }
            Message::NamesLoaded(Err(e)) => {
                error!("Listing failed: {e}");
                alert::error(alert::store_error_text(&e)).chain(Task::done(Message::Exit))
            }
            Message::LakeLoaded(Ok(lake)) => {
                if self.lake_list.selected() == Some(lake.name().as_str()) {
                    self.details.show(lake);
                }
                Task::none()
            }
            Message::FormTargetLoaded(Ok(lake)) => {
                self.lake_form.load(&lake);
                Task::none()
            }
            Message::LakeLoaded(Err(e)) | Message::FormTargetLoaded(Err(e)) => {
                alert::error(alert::store_error_text(&e))
            }
            Message::Saved {
                mode,
                target,
                result,
            } => {
                self.lake_form.finish_save();
                match result {
                    Ok(name) => {
                        info!("Saved {name}");
                        if target.is_some() && target.as_deref() == self.lake_list.selected() {
                            self.lake_list.select(name);
                        }
                        self.dialog = None;

                        let text = match mode {
                            Mode::Add => "Озеро успешно добавлено в базу",
                            Mode::Edit => "Изменения успешно применены",
                        };
                        Task::batch([alert::info("Готово", text), self.refresh()])
                    }
                    Err(e) => alert::error(alert::store_error_text(&e)),
                }
            }
            Message::Deleted(result) => {
                self.delete_dialog.finish_delete();
                match result {
                    Ok(name) => {
                        info!("Deleted {name}");
                        self.dialog = None;
                        if self.details.name() == Some(name.as_str()) {
                            self.details.clear();
                        }
                        Task::batch([
                            alert::info("Готово", format!("\"{name}\" успешно удалено!")),
                            self.refresh(),
                        ])
                    }
                    Err(e) => alert::error(alert::store_error_text(&e)),
                }
            }
            Message::CloseDialog => {
                self.dialog = None;
                Task::none()
            }
            Message::Exit => iced::exit(),
            Message::LakeList(message) => match self.lake_list.update(message) {
                lake_list::Action::None => Task::none(),
                lake_list::Action::Select(name) => self.load_lake(name, Message::LakeLoaded),
            },
            Message::LakeForm(message) => {
                let action = self.lake_form.update(message);
                self.form_action(action)
            }
            Message::DeleteDialog(message) => match self.delete_dialog.update(message) {
                delete_dialog::Action::None => Task::none(),
                delete_dialog::Action::Run(task) => task.map(Message::DeleteDialog),
                delete_dialog::Action::Delete(name) => {
                    let repo = self.repo.clone();
                    Task::perform(
                        blocking(move || repo.delete(&name).map(|()| name)),
                        Message::Deleted,
                    )
                }
                delete_dialog::Action::Cancel => Task::done(Message::CloseDialog),
            },
            Message::FindDialog(message) => match self.find_dialog.update(message) {
                find_dialog::Action::None => Task::none(),
                find_dialog::Action::Find(query) => {
                    self.lake_list.set_query(query);
                    self.dialog = None;
                    Task::none()
                }
                find_dialog::Action::Cancel => Task::done(Message::CloseDialog),
            },
        }
    }

    fn menu(&mut self, action: MenuAction) -> Task<Message> {
        match action {
            MenuAction::Find => {
                self.find_dialog.open("");
                self.dialog = Some(Dialog::Find);
                Task::none()
            }
            MenuAction::Add | MenuAction::Edit => {
                let mode = if action == MenuAction::Add {
                    Mode::Add
                } else {
                    Mode::Edit
                };
                self.dialog = Some(Dialog::Form);

                let opened = self.lake_form.open(
                    mode,
                    self.lake_list.names(),
                    self.lake_list.selected(),
                );
                self.form_action(opened)
            }
            MenuAction::Delete => {
                self.delete_dialog
                    .open(self.lake_list.names(), self.lake_list.selected());
                self.dialog = Some(Dialog::Delete);
                Task::none()
            }
            MenuAction::Quit => iced::exit(),
            MenuAction::Help => {
                self.dialog = Some(Dialog::Info(Page::Help));
                Task::none()
            }
            MenuAction::About => {
                self.dialog = Some(Dialog::Info(Page::About));
                Task::none()
            }
        }
    }

    fn form_action(&mut self, action: lake_form::Action) -> Task<Message> {
        match action {
            lake_form::Action::None => Task::none(),
            lake_form::Action::Run(task) => task.map(Message::LakeForm),
            lake_form::Action::LoadTarget(name) => self.load_lake(name, Message::FormTargetLoaded),
            lake_form::Action::Save { target, draft } => self.save(target, draft),
            lake_form::Action::Cancel => Task::done(Message::CloseDialog),
        }
    }

    fn save(&self, target: Option<String>, draft: LakeDraft) -> Task<Message> {
        let repo = self.repo.clone();
        let mode = self.lake_form.mode();
        let old_name = target.clone();

        Task::perform(
            blocking(move || match &old_name {
                Some(old_name) => repo.edit_lake(old_name, &draft),
                None => repo.add_lake(&draft),
            }),
            move |result| Message::Saved {
                mode,
                target,
                result,
            },
        )
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Keyboard(keyboard::Event::KeyPressed {
                key: Key::Named(named),
                ..
            }) => MenuAction::from_key(named).map(Message::Menu),
            _ => None,
        })
    }

    // Render the application and pass along messages from components to update()
    fn view(&self) -> Element<'_, Message> {
        let content = column![
            // Top bar
            menu::view().map(Message::Menu),
            // Browse list, picture and description
            row![
                container(self.lake_list.view().map(Message::LakeList))
                    .width(FillPortion(20))
                    .height(Fill),
                container(self.details.picture_view())
                    .width(FillPortion(55))
                    .height(Fill),
                container(self.details.description_view())
                    .width(FillPortion(25))
                    .height(Fill),
            ]
            .spacing(8)
            .padding(8)
            .height(Fill),
        ]
        .height(Fill);

        match self.dialog {
            None => content.into(),
            Some(Dialog::Form) => modal(
                content,
                self.lake_form.view().map(Message::LakeForm),
                None,
            ),
            Some(Dialog::Delete) => modal(
                content,
                self.delete_dialog.view().map(Message::DeleteDialog),
                Some(Message::CloseDialog),
            ),
            Some(Dialog::Find) => modal(
                content,
                self.find_dialog.view().map(Message::FindDialog),
                Some(Message::CloseDialog),
            ),
            Some(Dialog::Info(page)) => modal(
                content,
                info_page::view(page, Message::CloseDialog),
                Some(Message::CloseDialog),
            ),
        }
    }

    fn title(&self) -> String {
        TITLE.into()
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }
}
