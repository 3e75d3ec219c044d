use iced::widget::{Svg, svg};
use include_dir::{Dir, include_dir};
use tracing::warn;

static ICONS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets/icons");

const ICON_SIZE: u32 = 16;

/// An embedded SVG icon by file stem, e.g. `icon("close")`.
pub fn icon(name: &str) -> Svg<'static> {
    let handle = match ICONS.get_file(format!("{name}.svg")) {
        Some(file) => svg::Handle::from_memory(file.contents()),
        None => {
            warn!("Missing icon: {name}");
            svg::Handle::from_memory(&[][..])
        }
    };

    svg(handle).width(ICON_SIZE).height(ICON_SIZE)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_icons_embedded() {
        for name in [
            "close", "image", "download", "search", "plus", "edit", "delete", "exit", "help",
            "info",
        ] {
            assert!(
                ICONS.get_file(format!("{name}.svg")).is_some(),
                "missing {name}.svg"
            );
        }
    }
}
