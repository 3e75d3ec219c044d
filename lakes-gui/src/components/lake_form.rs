//! The add and edit forms.
//!
//! Both modes share one form. In edit mode a selector over the current names picks the
//! record to change; choosing one loads its description and keeps its stored picture
//! until the user picks another image or clears it.

use std::{path::PathBuf, sync::Arc};

use iced::{
    Element, Task,
    widget::{button, column, combo_box, container, row, space, text, text_editor, text_input},
};
use lakes_lib::{FetchError, Fetcher, Lake, LakeDraft, PictureChoice};
use rfd::AsyncFileDialog;
use tracing::debug;

use crate::{alert, icons::icon};

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Add,
    Edit,
}

#[derive(Debug, Clone)]
pub enum Message {
    TargetSelected(String),
    NameChanged(String),
    ClearName,
    PickPicture,
    PicturePicked(Option<PathBuf>),
    ClearPicture,
    DescriptionEdited(text_editor::Action),
    ClearDescription,
    FetchPressed,
    Fetched(Result<String, Arc<FetchError>>),
    SavePressed,
    CancelPressed,
}

pub enum Action {
    None,
    Run(Task<Message>),
    /// Load the record to edit and hand it back through [`LakeForm::load`]
    LoadTarget(String),
    Save {
        target: Option<String>,
        draft: LakeDraft,
    },
    Cancel,
}

pub struct LakeForm {
    fetcher: Fetcher,
    mode: Mode,
    targets: combo_box::State<String>,
    target: Option<String>,
    name: String,
    picture: PictureChoice,
    description: text_editor::Content,
    /// Whether the description holds text the user entered, fetched or loaded
    description_touched: bool,
    fetching: bool,
    /// A save is running; further presses are ignored until [`LakeForm::finish_save`]
    saving: bool,
}

impl LakeForm {
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            mode: Mode::Add,
            targets: combo_box::State::new(Vec::new()),
            target: None,
            name: String::new(),
            picture: PictureChoice::Keep,
            description: text_editor::Content::new(),
            description_touched: false,
            fetching: false,
            saving: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Reset the form for `mode`. In edit mode `names` populate the record selector and
    /// `preselect` is chosen when it is among them.
    pub fn open(&mut self, mode: Mode, names: &[String], preselect: Option<&str>) -> Action {
        self.mode = mode;
        self.targets = combo_box::State::new(names.to_vec());
        self.target = None;
        self.clear_fields();
        self.fetching = false;
        self.saving = false;

        match (mode, preselect) {
            (Mode::Edit, Some(name)) if names.iter().any(|n| n == name) => {
                self.update(Message::TargetSelected(name.to_string()))
            }
            _ => Action::None,
        }
    }

    /// Fill the form from the record chosen in the selector.
    pub fn load(&mut self, lake: &Lake) {
        if self.target.as_deref() != Some(lake.name().as_str()) {
            debug!("Ignoring stale record {}", lake.name());
            return;
        }

        self.name = lake.name().clone();
        self.picture = PictureChoice::Keep;
        self.description = text_editor::Content::with_text(lake.description());
        self.description_touched = true;
    }

    /// Accept saves again once the running one has completed.
    pub fn finish_save(&mut self) {
        self.saving = false;
    }

    fn clear_fields(&mut self) {
        self.name.clear();
        self.picture = PictureChoice::Keep;
        self.description = text_editor::Content::new();
        self.description_touched = false;
    }

    /// The form content as an unvalidated draft.
    pub fn draft(&self) -> LakeDraft {
        LakeDraft {
            name: self.name.clone(),
            picture: self.picture.clone(),
            description: self
                .description_touched
                .then(|| self.description.text()),
        }
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::TargetSelected(name) => {
                self.target = Some(name.clone());
                Action::LoadTarget(name)
            }
            Message::NameChanged(name) => {
                self.name = name;
                Action::None
            }
            Message::ClearName => {
                self.name.clear();
                Action::None
            }
            Message::PickPicture => Action::Run(Task::perform(
                async {
                    AsyncFileDialog::new()
                        .add_filter("Изображения", &IMAGE_EXTENSIONS)
                        .pick_file()
                        .await
                        .map(|handle| handle.path().to_path_buf())
                },
                Message::PicturePicked,
            )),
            Message::PicturePicked(path) => {
                if let Some(path) = path {
                    self.picture = PictureChoice::File(path);
                }
                Action::None
            }
            Message::ClearPicture => {
                self.picture = PictureChoice::Placeholder;
                Action::None
            }
            Message::DescriptionEdited(action) => {
                if action.is_edit() {
                    self.description_touched = true;
                }
                self.description.perform(action);
                Action::None
            }
            Message::ClearDescription => {
                self.description = text_editor::Content::new();
                self.description_touched = false;
                Action::None
            }
            Message::FetchPressed => {
                if self.fetching {
                    return Action::None;
                }
                self.fetching = true;

                let fetcher = self.fetcher.clone();
                let name = self.name.clone();
                Action::Run(Task::perform(
                    async move { fetcher.fetch(&name).await.map_err(Arc::new) },
                    Message::Fetched,
                ))
            }
            Message::Fetched(result) => {
                self.fetching = false;
                match result {
                    Ok(article) => {
                        self.insert_fetched(&article);
                        Action::None
                    }
                    Err(e) => Action::Run(alert::error(alert::fetch_error_text(&e))),
                }
            }
            Message::SavePressed => match (self.saving, self.mode, &self.target) {
                (true, _, _) | (_, Mode::Edit, None) => Action::None,
                (false, _, target) => {
                    let target = target.clone();
                    self.saving = true;

                    Action::Save {
                        target,
                        draft: self.draft(),
                    }
                }
            },
            Message::CancelPressed => Action::Cancel,
        }
    }

    /// Untouched descriptions are replaced by the fetched text, anything else is
    /// appended to.
    fn insert_fetched(&mut self, article: &str) {
        let text = if self.description_touched {
            let mut current = self.description.text();
            if !current.ends_with('\n') {
                current.push('\n');
            }
            current.push_str(article);
            current
        } else {
            article.to_string()
        };

        self.description = text_editor::Content::with_text(&text);
        self.description_touched = true;
    }

    fn picture_label(&self) -> String {
        match (&self.picture, self.mode) {
            (PictureChoice::File(path), _) => path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into()),
            (PictureChoice::Keep, Mode::Edit) if self.target.is_some() => {
                "Текущее изображение".into()
            }
            _ => "Изображение по умолчанию".into(),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let title = match self.mode {
            Mode::Add => "Добавление озера",
            Mode::Edit => "Изменение озера",
        };

        let mut content = column![text(title).size(20)].spacing(10);

        if self.mode == Mode::Edit {
            content = content.push(row![
                text("Озеро:").width(110),
                combo_box(
                    &self.targets,
                    "Выберите озеро...",
                    self.target.as_ref(),
                    Message::TargetSelected
                ),
            ]);
        }

        let content = content
            .push(row![
                text("Название:").width(110),
                text_input("Название озера", &self.name).on_input(Message::NameChanged),
                button(icon("close")).on_press(Message::ClearName),
            ])
            .push(row![
                text("Изображение:").width(110),
                button(row![icon("image"), text(self.picture_label())].spacing(4))
                    .on_press(Message::PickPicture),
                space::horizontal(),
                button(icon("close")).on_press(Message::ClearPicture),
            ])
            .push(row![
                text("Описание:"),
                space::horizontal(),
                button(icon("close")).on_press(Message::ClearDescription),
            ])
            .push(
                text_editor(&self.description)
                    .placeholder("Описание озера")
                    .on_action(Message::DescriptionEdited)
                    .height(220),
            )
            .push(
                button(
                    row![
                        icon("download"),
                        text("Взять информацию об озере из википедии")
                    ]
                    .spacing(4),
                )
                .on_press_maybe((!self.fetching).then_some(Message::FetchPressed)),
            )
            .push(space::vertical())
            .push(row![
                space::horizontal(),
                button("Отмена").on_press(Message::CancelPressed),
                button("Сохранить")
                    .on_press_maybe((!self.saving).then_some(Message::SavePressed)),
            ]
            .spacing(6));

        container(content)
            .padding(20)
            .width(560)
            .height(560)
            .style(container::rounded_box)
            .into()
    }
}
