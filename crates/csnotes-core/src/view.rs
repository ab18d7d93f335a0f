//! Panel visibility.
//!
//! [`ViewStateController`] is the only code that toggles panels. Each
//! [`ViewStateController::show`] starts a new panel session and returns a
//! [`PanelTicket`]; async work started from that session checks its ticket on
//! completion and drops its result if the user has moved on.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::surface::PanelSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewState {
    List,
    Viewer,
    Editor,
}

impl ViewState {
    pub const ALL: [Self; 3] = [Self::List, Self::Viewer, Self::Editor];
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Viewer => "viewer",
            Self::Editor => "editor",
        })
    }
}

/// Identifies one panel session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelTicket {
    state: ViewState,
    epoch: u64,
}

impl PanelTicket {
    #[must_use]
    pub const fn state(&self) -> ViewState {
        self.state
    }
}

pub struct ViewStateController<S> {
    surface: Arc<S>,
    current: Mutex<PanelTicket>,
}

impl<S: PanelSurface> ViewStateController<S> {
    /// Starts on the list panel.
    pub fn new(surface: Arc<S>) -> Self {
        let controller = Self {
            surface,
            current: Mutex::new(PanelTicket {
                state: ViewState::List,
                epoch: 0,
            }),
        };
        controller.apply(ViewState::List);
        controller
    }

    /// Show `state`, hide the other two panels, and start a new session.
    pub fn show(&self, state: ViewState) -> PanelTicket {
        let ticket = {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            *current = PanelTicket {
                state,
                epoch: current.epoch.wrapping_add(1),
            };
            *current
        };
        self.apply(state);
        ticket
    }

    pub fn current(&self) -> ViewState {
        self.ticket().state
    }

    pub fn ticket(&self) -> PanelTicket {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_current(&self, ticket: &PanelTicket) -> bool {
        self.ticket() == *ticket
    }

    fn apply(&self, state: ViewState) {
        for panel in ViewState::ALL {
            if panel != state {
                self.surface.set_visible(panel, false);
            }
        }
        self.surface.set_visible(state, true);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::RecordingSurface;

    #[test]
    fn starts_on_list() {
        let surface = Arc::new(RecordingSurface::default());
        let view = ViewStateController::new(Arc::clone(&surface));
        assert_eq!(view.current(), ViewState::List);
        assert_eq!(surface.visible_panels(), vec![ViewState::List]);
    }

    #[test]
    fn exactly_one_panel_visible_after_every_show() {
        let surface = Arc::new(RecordingSurface::default());
        let view = ViewStateController::new(Arc::clone(&surface));

        for state in [
            ViewState::Viewer,
            ViewState::Editor,
            ViewState::Editor,
            ViewState::List,
            ViewState::Viewer,
            ViewState::List,
        ] {
            view.show(state);
            assert_eq!(surface.visible_panels(), vec![state]);
            assert_eq!(view.current(), state);
        }
    }

    #[test]
    fn reshowing_a_panel_invalidates_previous_ticket() {
        let surface = Arc::new(RecordingSurface::default());
        let view = ViewStateController::new(surface);

        let first = view.show(ViewState::Viewer);
        assert!(view.is_current(&first));
        let second = view.show(ViewState::Viewer);

        assert!(!view.is_current(&first));
        assert!(view.is_current(&second));
        assert_eq!(second.state(), ViewState::Viewer);
    }
}
