//! Visible-layout state machine.
//!
//! Tracks whether the notes panel is shown and whether the window is in its
//! normal or presentation footprint, and computes the target geometry for
//! every transition. The machine never touches a real window; it hands the
//! target out through [`LayoutChange`] values and the host applies them.

use crate::model::config::AppConfig;

/// Vertical space the notes panel occupies; reclaimed when collapsing.
pub const NOTES_ALLOWANCE: i32 = 85;

/// Fixed compact footprint for presentation mode.
pub const PRESENTATION_WIDTH: i32 = 300;
pub const PRESENTATION_HEIGHT: i32 = 80;

/// Window bounds in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// The three visible-layout states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Notes panel visible, full height
    Expanded,
    /// Notes panel hidden, height reduced by [`NOTES_ALLOWANCE`]
    Collapsed,
    /// Compact footprint for screen sharing
    Presentation,
}

/// A computed layout transition for the host to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutChange {
    pub mode: LayoutMode,
    pub geometry: Geometry,
    /// True for startup state applied from persisted configuration, so the
    /// host can skip animation and event side effects.
    pub silent: bool,
}

/// Layout state machine. Created from the persisted configuration at
/// startup; presentation mode is never restored automatically even if it
/// was the last-used mode.
#[derive(Debug, Clone)]
pub struct LayoutState {
    mode: LayoutMode,
    /// Last known full height while Expanded; read on session close
    baseline_height: i32,
    /// Geometry snapshot captured on entering Presentation
    saved_bounds: Option<Geometry>,
    /// Which of Expanded/Collapsed was active before entering Presentation
    mode_before_presentation: LayoutMode,
    /// Current target geometry
    geometry: Geometry,
}

impl LayoutState {
    /// Build the startup state from persisted configuration. When
    /// `notes_collapsed` is set, the returned [`LayoutChange`] is marked
    /// silent: the collapse delta is applied immediately without
    /// synthesizing an interactive toggle.
    pub fn from_config(config: &AppConfig) -> (Self, Option<LayoutChange>) {
        let baseline = config.window_height;
        let mut state = LayoutState {
            mode: LayoutMode::Expanded,
            baseline_height: baseline,
            saved_bounds: None,
            mode_before_presentation: LayoutMode::Expanded,
            geometry: Geometry {
                x: config.window_x,
                y: config.window_y,
                width: config.window_width,
                height: baseline,
            },
        };
        if config.notes_collapsed {
            state.mode = LayoutMode::Collapsed;
            state.geometry.height = baseline - NOTES_ALLOWANCE;
            let change = LayoutChange {
                mode: state.mode,
                geometry: state.geometry,
                silent: true,
            };
            (state, Some(change))
        } else {
            (state, None)
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn baseline_height(&self) -> i32 {
        self.baseline_height
    }

    /// Swap between Expanded and Collapsed. Ignored in Presentation.
    pub fn toggle_notes(&mut self) -> Option<LayoutChange> {
        match self.mode {
            LayoutMode::Expanded => {
                self.mode = LayoutMode::Collapsed;
                self.geometry.height = self.baseline_height - NOTES_ALLOWANCE;
            }
            LayoutMode::Collapsed => {
                self.mode = LayoutMode::Expanded;
                self.geometry.height = self.baseline_height;
            }
            LayoutMode::Presentation => return None,
        }
        Some(LayoutChange {
            mode: self.mode,
            geometry: self.geometry,
            silent: false,
        })
    }

    /// Capture the current bounds and shrink to the fixed presentation
    /// footprint, keeping the window's position. Ignored if already
    /// presenting.
    pub fn enter_presentation(&mut self) -> Option<LayoutChange> {
        if self.mode == LayoutMode::Presentation {
            return None;
        }
        self.saved_bounds = Some(self.geometry);
        self.mode_before_presentation = self.mode;
        self.mode = LayoutMode::Presentation;
        self.geometry = Geometry {
            x: self.geometry.x,
            y: self.geometry.y,
            width: PRESENTATION_WIDTH,
            height: PRESENTATION_HEIGHT,
        };
        Some(LayoutChange {
            mode: self.mode,
            geometry: self.geometry,
            silent: false,
        })
    }

    /// Restore the exact bounds captured on entry and return to whichever
    /// of Expanded/Collapsed was active before. Ignored if not presenting.
    pub fn exit_presentation(&mut self) -> Option<LayoutChange> {
        if self.mode != LayoutMode::Presentation {
            return None;
        }
        let bounds = self.saved_bounds.take()?;
        self.geometry = bounds;
        self.mode = self.mode_before_presentation;
        Some(LayoutChange {
            mode: self.mode,
            geometry: self.geometry,
            silent: false,
        })
    }

    /// Record a host-side resize/move. The baseline height only follows
    /// resizes observed while Expanded.
    pub fn window_resized(&mut self, geometry: Geometry) {
        self.geometry = geometry;
        if self.mode == LayoutMode::Expanded {
            self.baseline_height = geometry.height;
        }
    }

    /// Fold the layout back into the configuration on session close: the
    /// persisted height is the baseline (full height with notes expanded),
    /// not whatever the window happens to measure right now. While
    /// presenting, the notes preference comes from the mode that was active
    /// before entry, so closing mid-presentation doesn't discard it.
    pub fn write_config(&self, config: &mut AppConfig) {
        config.window_width = self.geometry.width;
        config.window_height = self.baseline_height;
        config.window_x = self.geometry.x;
        config.window_y = self.geometry.y;
        let notes_mode = if self.mode == LayoutMode::Presentation {
            self.mode_before_presentation
        } else {
            self.mode
        };
        config.notes_collapsed = notes_mode == LayoutMode::Collapsed;
        config.presentation_mode = self.mode == LayoutMode::Presentation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn expanded() -> LayoutState {
        let (state, change) = LayoutState::from_config(&AppConfig::default());
        assert!(change.is_none());
        state
    }

    #[test]
    fn test_startup_expanded() {
        let state = expanded();
        assert_eq!(state.mode(), LayoutMode::Expanded);
        assert_eq!(state.geometry().height, 550);
        assert_eq!(state.baseline_height(), 550);
    }

    #[test]
    fn test_startup_collapsed_is_silent() {
        let config = AppConfig {
            notes_collapsed: true,
            ..AppConfig::default()
        };
        let (state, change) = LayoutState::from_config(&config);
        let change = change.unwrap();
        assert!(change.silent);
        assert_eq!(change.mode, LayoutMode::Collapsed);
        assert_eq!(state.geometry().height, 550 - NOTES_ALLOWANCE);
        // Baseline still records the full height
        assert_eq!(state.baseline_height(), 550);
    }

    #[test]
    fn test_presentation_mode_never_restored() {
        let config = AppConfig {
            presentation_mode: true,
            ..AppConfig::default()
        };
        let (state, _) = LayoutState::from_config(&config);
        assert_eq!(state.mode(), LayoutMode::Expanded);
    }

    #[test]
    fn test_toggle_round_trip_restores_height() {
        let mut state = expanded();
        let h = state.geometry().height;

        let down = state.toggle_notes().unwrap();
        assert_eq!(down.mode, LayoutMode::Collapsed);
        assert_eq!(down.geometry.height, h - NOTES_ALLOWANCE);
        assert!(!down.silent);

        let up = state.toggle_notes().unwrap();
        assert_eq!(up.mode, LayoutMode::Expanded);
        assert_eq!(up.geometry.height, h);
    }

    #[test]
    fn test_toggle_ignored_while_presenting() {
        let mut state = expanded();
        state.enter_presentation().unwrap();
        assert!(state.toggle_notes().is_none());
        assert_eq!(state.mode(), LayoutMode::Presentation);
    }

    #[test]
    fn test_presentation_round_trip_restores_exact_bounds() {
        let mut state = expanded();
        state.window_resized(Geometry {
            x: 40,
            y: 60,
            width: 480,
            height: 600,
        });

        let enter = state.enter_presentation().unwrap();
        assert_eq!(enter.geometry.width, PRESENTATION_WIDTH);
        assert_eq!(enter.geometry.height, PRESENTATION_HEIGHT);
        // Position is kept on entry
        assert_eq!((enter.geometry.x, enter.geometry.y), (40, 60));

        let exit = state.exit_presentation().unwrap();
        assert_eq!(
            exit.geometry,
            Geometry {
                x: 40,
                y: 60,
                width: 480,
                height: 600
            }
        );
        assert_eq!(exit.mode, LayoutMode::Expanded);
    }

    #[test]
    fn test_presentation_remembers_collapsed() {
        let mut state = expanded();
        state.toggle_notes().unwrap();
        state.enter_presentation().unwrap();
        let exit = state.exit_presentation().unwrap();
        assert_eq!(exit.mode, LayoutMode::Collapsed);
    }

    #[test]
    fn test_exit_without_enter_is_noop() {
        let mut state = expanded();
        assert!(state.exit_presentation().is_none());
        assert_eq!(state.mode(), LayoutMode::Expanded);
    }

    #[test]
    fn test_enter_twice_is_noop() {
        let mut state = expanded();
        assert!(state.enter_presentation().is_some());
        assert!(state.enter_presentation().is_none());
    }

    #[test]
    fn test_baseline_follows_expanded_resizes_only() {
        let mut state = expanded();
        state.window_resized(Geometry {
            x: 0,
            y: 0,
            width: 520,
            height: 700,
        });
        assert_eq!(state.baseline_height(), 700);

        state.toggle_notes().unwrap();
        state.window_resized(Geometry {
            x: 0,
            y: 0,
            width: 520,
            height: 300,
        });
        // Collapsed resize leaves the baseline alone
        assert_eq!(state.baseline_height(), 700);
        let up = state.toggle_notes().unwrap();
        assert_eq!(up.geometry.height, 700);
    }

    #[test]
    fn test_write_config_in_presentation_keeps_notes_preference() {
        let mut state = expanded();
        state.toggle_notes().unwrap();
        state.enter_presentation().unwrap();

        let mut config = AppConfig::default();
        state.write_config(&mut config);
        // The pre-presentation collapsed state is what persists
        assert!(config.notes_collapsed);
        assert!(config.presentation_mode);
        assert_eq!(config.window_height, 550);
    }

    #[test]
    fn test_write_config_persists_baseline_height() {
        let mut state = expanded();
        state.window_resized(Geometry {
            x: 5,
            y: 6,
            width: 530,
            height: 640,
        });
        state.toggle_notes().unwrap();

        let mut config = AppConfig::default();
        state.write_config(&mut config);
        assert_eq!(config.window_height, 640);
        assert_eq!(config.window_width, 530);
        assert!(config.notes_collapsed);
        assert!(!config.presentation_mode);
    }
}
