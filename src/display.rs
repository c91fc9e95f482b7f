//! Hush/speak display mode.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Speak,
    Hush,
}

impl DisplayMode {
    pub fn from_hushed(hushed: bool) -> Self {
        if hushed { Self::Hush } else { Self::Speak }
    }

    pub fn is_hushed(self) -> bool {
        self == Self::Hush
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Speak => Self::Hush,
            Self::Hush => Self::Speak,
        }
    }

    /// Label of the toggle control: the action a click performs next.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Speak => "hush",
            Self::Hush => "speak",
        }
    }
}
