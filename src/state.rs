use crate::render;

/// Message shown for every failed submission.
pub const GENERIC_FAILURE: &str = "Error calculating prediction";

/// Which boundary a failed submission broke at. Logged, never rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Server,
    Decode,
}

/// The single state of the result panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success {
        value: f64,
    },
    Failure {
        message: String,
        kind: FailureKind,
    },
}

impl UiState {
    pub fn failure(kind: FailureKind) -> Self {
        UiState::Failure {
            message: GENERIC_FAILURE.to_string(),
            kind,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }
}

/// Region of the page that receives result markup.
///
/// Every update replaces both the state and its markup, so nothing from a
/// previous state survives into the next one.
#[derive(Debug, Default)]
pub struct ResultPanel {
    state: UiState,
    markup: String,
}

impl ResultPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, state: UiState) {
        self.markup = render::render(&state);
        self.state = state;
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_previous_markup() {
        let mut panel = ResultPanel::new();
        assert_eq!(panel.markup(), "");

        panel.set(UiState::Success { value: 12.0 });
        assert!(panel.markup().contains("$12"));

        panel.set(UiState::failure(FailureKind::Server));
        assert!(!panel.markup().contains("$12"));
        assert!(!panel.markup().contains("ESTIMATED PROPERTY VALUE"));
        assert!(panel.markup().contains(GENERIC_FAILURE));
    }
}
