//! App: routes input actions to the session and the user settings.
//!
//! The session knows nothing about display toggles or sound; the app keeps
//! the [`Settings`] next to it, persists them when they change, and decides
//! which session events deserve the bell.

use crate::core::{GameSession, RandomSource, SessionSnapshot, Settings};
use crate::term::ViewOptions;
use crate::types::{GameAction, GameEvent};

pub struct App<R: RandomSource> {
    session: GameSession<R>,
    settings: Settings,
}

impl<R: RandomSource> App<R> {
    pub fn new(session: GameSession<R>, settings: Settings) -> Self {
        Self { session, settings }
    }

    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.session.snapshot_into(out);
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            show_grid: self.settings.show_grid,
            highlight_merges: self.settings.show_particles,
            sound_enabled: self.settings.audio_enabled,
        }
    }

    /// Apply one action and return the session events it produced.
    pub fn dispatch(&mut self, action: GameAction) -> Vec<GameEvent> {
        match action {
            GameAction::Move(direction) => {
                self.session.apply(direction);
            }
            GameAction::Undo => {
                self.session.undo();
            }
            GameAction::NewGame => self.session.new_game(),
            GameAction::ContinueAfterWin => {
                self.session.continue_after_win();
            }
            GameAction::SetBoardSize(size) => {
                self.session.set_board_size(size);
                self.settings.set_board_size(size);
                self.save_settings();
            }
            GameAction::ToggleGrid => {
                self.settings.toggle_grid();
                self.save_settings();
            }
            GameAction::ToggleSound => {
                self.settings.toggle_audio();
                self.save_settings();
            }
            GameAction::ToggleHighlight => {
                self.settings.toggle_particles();
                self.save_settings();
            }
        }
        self.session.take_events()
    }

    /// Should these events ring the bell?
    pub fn wants_bell(&self, events: &[GameEvent]) -> bool {
        self.settings.audio_enabled
            && self.settings.volume() > 0.0
            && events
                .iter()
                .any(|e| matches!(e, GameEvent::Won { .. } | GameEvent::Lost))
    }

    fn save_settings(&mut self) {
        self.session.persistence_mut().save_settings(&self.settings);
    }
}
