#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
}

impl LoadStatus {
    /// Text for the status bar; `None` when it should be hidden.
    pub fn message(&self) -> Option<String> {
        match self {
            LoadStatus::Idle => None,
            LoadStatus::Loading => Some("🔄 Loading space photos…".to_string()),
            LoadStatus::Error(reason) if reason.is_empty() => {
                Some("⚠️ Something went wrong.".to_string())
            }
            LoadStatus::Error(reason) => Some(format!("⚠️ {reason}")),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }
}
