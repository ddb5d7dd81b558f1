use std::time::Instant;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Normal,
    EditSearch,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FocusedPanel {
    Candidates,
    Tasks,
    Installed,
}

/// Where the left pane's list came from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CandidateSource {
    Recommended,
    Search(String),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Popup {
    ConfirmUninstall { pkg: String },
    Error { title: String, message: String },
    Info { pkg: String, scroll: usize },
    Log { pkg: String, scroll: usize },
    Help { scroll: usize },
}

impl Popup {
    pub fn scroll_mut(&mut self) -> Option<&mut usize> {
        match self {
            Self::Info { scroll, .. } | Self::Log { scroll, .. } | Self::Help { scroll } => {
                Some(scroll)
            }
            Self::ConfirmUninstall { .. } | Self::Error { .. } => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub created_at: Instant,
}
