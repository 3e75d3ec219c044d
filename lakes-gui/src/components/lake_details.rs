use iced::{
    ContentFit, Element,
    Length::Fill,
    widget::{center, container, image, scrollable, text},
};
use lakes_lib::Lake;

/// Picture and description of the selected lake.
#[derive(Debug, Default)]
pub struct LakeDetails {
    name: Option<String>,
    picture: Option<image::Handle>,
    description: String,
}

impl LakeDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn show(&mut self, lake: Lake) {
        let (name, picture, description) = lake.into_parts();

        self.name = Some(name);
        self.picture = Some(image::Handle::from_bytes(picture));
        self.description = description;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn picture_view<'a, M: 'a>(&'a self) -> Element<'a, M> {
        match &self.picture {
            Some(handle) => center(image(handle.clone()).content_fit(ContentFit::Contain)).into(),
            None => center(text("Выберите озеро из списка")).into(),
        }
    }

    /// Read-only description pane
    pub fn description_view<'a, M: 'a>(&'a self) -> Element<'a, M> {
        container(scrollable(text(&self.description).width(Fill)))
            .padding(4)
            .style(container::bordered_box)
            .width(Fill)
            .height(Fill)
            .into()
    }
}
