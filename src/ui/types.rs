//! Types shared by frontends

use crate::api::ResultItem;

/// How a frontend session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontendOutcome {
    /// The user picked an item
    Selected(ResultItem),
    /// The user left without picking anything
    Aborted,
}

impl FrontendOutcome {
    /// The picked item, if any
    #[must_use]
    pub const fn selected(&self) -> Option<&ResultItem> {
        match self {
            Self::Selected(item) => Some(item),
            Self::Aborted => None,
        }
    }

    /// Whether the session was aborted
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}
