use crate::link::is_valid_video_link;

/// Live state of the link field, recomputed on every edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStatus {
    /// Nothing typed yet; neither indicator is shown.
    #[default]
    Empty,
    Valid,
    Invalid,
}

impl LinkStatus {
    pub fn of(input: &str) -> Self {
        let link = input.trim();
        if link.is_empty() {
            LinkStatus::Empty
        } else if is_valid_video_link(link) {
            LinkStatus::Valid
        } else {
            LinkStatus::Invalid
        }
    }
}

/// Which control receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Submit,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Input => Focus::Submit,
            Focus::Submit => Focus::Input,
        }
    }
}
