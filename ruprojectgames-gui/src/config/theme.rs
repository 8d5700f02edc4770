use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Themes offered in the header, a subset of the ones iced ships with.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Dracula,
    Nord,
    #[strum(to_string = "Tokyo Night")]
    TokyoNight,
}

impl From<&Theme> for iced::Theme {
    fn from(theme: &Theme) -> Self {
        match theme {
            Theme::Dark => iced::Theme::Dark,
            Theme::Light => iced::Theme::Light,
            Theme::Dracula => iced::Theme::Dracula,
            Theme::Nord => iced::Theme::Nord,
            Theme::TokyoNight => iced::Theme::TokyoNight,
        }
    }
}
