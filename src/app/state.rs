//! Application state management
//!
//! `App` owns the session and drives every transition, saving after each one.

use crate::round::{GameSession, RoundConfig, ScoreEdit};
use crate::storage::SessionStore;

use super::screen::{Screen, SetupField};
use super::wake::WakeLock;

/// Longest score entry accepted into the input buffer
const MAX_INPUT_LEN: usize = 4;

/// Main application state
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,
    /// Current screen
    pub screen: Screen,
    /// Pending score text for the selected cell
    pub input: String,
    /// Feedback message from the last action
    pub feedback: String,
    /// Column of the selected player in the score grid
    selected_player: usize,
    session: GameSession,
    store: Box<dyn SessionStore>,
    wake: WakeLock,
}

impl App {
    /// Build the app, resuming any saved round.
    ///
    /// `defaults` seeds the setup screen when nothing usable was saved.
    pub fn new(store: Box<dyn SessionStore>, wake: WakeLock, defaults: RoundConfig) -> Self {
        let session = match store.load() {
            Some(session) => session,
            None => GameSession::new(defaults),
        };

        let mut app = App {
            should_quit: false,
            screen: Screen::setup(),
            input: String::new(),
            feedback: String::new(),
            selected_player: 0,
            session,
            store,
            wake,
        };

        if app.session.is_started() {
            app.screen = Screen::Scorecard;
            app.wake.acquire();
        }
        app
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn selected_player(&self) -> usize {
        self.selected_player
    }

    /// Id of the player whose column is selected.
    pub fn selected_player_id(&self) -> Option<u32> {
        self.session.players().get(self.selected_player).map(|p| p.id)
    }

    /// Signal the application to quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // === Setup screen ===

    pub fn setup_up(&mut self) {
        if let Screen::Setup { focus } = &mut self.screen {
            *focus = focus.prev();
        }
    }

    pub fn setup_down(&mut self) {
        if let Screen::Setup { focus } = &mut self.screen {
            *focus = focus.next();
        }
    }

    /// Decrease players, or flip the hole count
    pub fn setup_left(&mut self) {
        self.adjust_setup(-1);
    }

    /// Increase players, or flip the hole count
    pub fn setup_right(&mut self) {
        self.adjust_setup(1);
    }

    fn adjust_setup(&mut self, delta: i32) {
        let Screen::Setup { focus } = self.screen else {
            return;
        };
        let config = self.session.config();
        let updated = match focus {
            SetupField::Players => {
                config.with_players(config.num_players().saturating_add_signed(delta))
            }
            SetupField::Holes => RoundConfig::new(config.num_players(), config.holes.toggled()),
            SetupField::Start => return,
        };
        self.session.set_config(updated);
    }

    /// Enter on the setup screen: start when the Start row is focused,
    /// otherwise move focus down.
    pub fn setup_select(&mut self) {
        match self.screen {
            Screen::Setup { focus: SetupField::Start } => self.start_round(),
            Screen::Setup { .. } => self.setup_down(),
            _ => {}
        }
    }

    /// Start a round with the current setup choices
    pub fn start_round(&mut self) {
        let config = self.session.config();
        self.session.start_round(config);
        self.selected_player = 0;
        self.input.clear();
        self.feedback.clear();
        self.screen = Screen::Scorecard;
        self.wake.acquire();
        tracing::info!(
            players = config.num_players(),
            holes = config.num_holes(),
            "round started"
        );
        self.persist();
    }

    // === Scorecard navigation ===

    pub fn hole_up(&mut self) {
        self.move_hole(-1);
    }

    pub fn hole_down(&mut self) {
        self.move_hole(1);
    }

    fn move_hole(&mut self, delta: i32) {
        if self.screen != Screen::Scorecard {
            return;
        }
        let target = self.session.current_hole().saturating_add_signed(delta);
        if self.session.set_current_hole(target) {
            self.input.clear();
            self.persist();
        }
    }

    pub fn player_left(&mut self) {
        if self.screen == Screen::Scorecard && self.selected_player > 0 {
            self.selected_player -= 1;
            self.input.clear();
        }
    }

    pub fn player_right(&mut self) {
        let last = self.session.players().len().saturating_sub(1);
        if self.screen == Screen::Scorecard && self.selected_player < last {
            self.selected_player += 1;
            self.input.clear();
        }
    }

    // === Score entry ===

    /// Handle a typed character. Only digits and a minus sign are kept.
    pub fn on_char(&mut self, c: char) {
        if self.screen != Screen::Scorecard {
            return;
        }
        if (c.is_ascii_digit() || c == '-') && self.input.len() < MAX_INPUT_LEN {
            self.input.push(c);
            self.feedback.clear();
        }
    }

    pub fn on_backspace(&mut self) {
        if self.screen == Screen::Scorecard {
            self.input.pop();
        }
    }

    /// Submit the input buffer for the selected cell.
    ///
    /// An accepted score advances to the next player, then the next hole.
    pub fn on_submit(&mut self) {
        if self.screen != Screen::Scorecard || self.input.is_empty() {
            return;
        }
        let raw = std::mem::take(&mut self.input);
        if self.enter_score(&raw) {
            self.advance_cursor();
            self.persist();
        }
    }

    /// Blank the selected cell. Stored as 0, which displays as empty.
    pub fn on_clear_cell(&mut self) {
        if self.screen != Screen::Scorecard {
            return;
        }
        self.input.clear();
        if self.enter_score("") {
            self.persist();
        }
    }

    fn enter_score(&mut self, raw: &str) -> bool {
        let Some(player_id) = self.selected_player_id() else {
            return false;
        };
        let hole = self.session.current_hole();

        match self.session.set_score(player_id, hole, raw) {
            ScoreEdit::Applied { value, previous } => {
                tracing::debug!(player_id, hole, value, ?previous, "score set");
                self.feedback = format!("{} · Hole {}: {}", self.player_name(player_id), hole, value);
                true
            }
            ScoreEdit::Rejected => {
                tracing::debug!(player_id, hole, raw, "negative score rejected");
                self.feedback = "Scores can't be negative".to_string();
                false
            }
            ScoreEdit::Ignored => false,
        }
    }

    fn advance_cursor(&mut self) {
        let count = self.session.players().len();
        if self.selected_player + 1 < count {
            self.selected_player += 1;
        } else if self.session.current_hole() < self.session.config().num_holes() {
            self.selected_player = 0;
            self.session.set_current_hole(self.session.current_hole() + 1);
        }
    }

    /// Roll back the last score edit
    pub fn undo(&mut self) {
        if self.screen != Screen::Scorecard {
            return;
        }
        match self.session.undo() {
            Some(record) => {
                tracing::info!(player_id = record.player_id, hole = record.hole, "undo");
                self.feedback = format!(
                    "Undid {} · Hole {}",
                    self.player_name(record.player_id),
                    record.hole
                );
                self.input.clear();
                self.persist();
            }
            None => {
                self.feedback = "Nothing to undo".to_string();
            }
        }
    }

    // === Reset ===

    /// Ask before wiping the round
    pub fn request_reset(&mut self) {
        if self.screen == Screen::Scorecard {
            self.screen = Screen::ConfirmReset;
        }
    }

    pub fn cancel_reset(&mut self) {
        if self.screen == Screen::ConfirmReset {
            self.screen = Screen::Scorecard;
        }
    }

    /// Wipe the round and the saved copy, back to setup
    pub fn confirm_reset(&mut self) {
        if self.screen != Screen::ConfirmReset {
            return;
        }
        self.session.reset();
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear saved round");
        }
        self.wake.release();
        self.selected_player = 0;
        self.input.clear();
        self.feedback.clear();
        self.screen = Screen::setup();
        tracing::info!("round reset");
    }

    // Private helper methods

    fn player_name(&self, player_id: u32) -> String {
        self.session
            .players()
            .iter()
            .find(|p| p.id == player_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("Player {}", player_id))
    }

    /// Save after a transition. Failures are logged, never surfaced.
    fn persist(&self) {
        if !self.session.is_started() {
            return;
        }
        if let Err(e) = self.store.save(&self.session) {
            tracing::warn!(error = %e, "failed to save round");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::HoleCount;
    use crate::app::wake::tests::Recording;
    use crate::storage::{snapshot, Storage, StorageError};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory store that can be inspected after the app takes ownership.
    #[derive(Clone, Default)]
    struct SharedStore {
        saved: Rc<RefCell<Option<GameSession>>>,
        saves: Rc<RefCell<u32>>,
    }

    impl SessionStore for SharedStore {
        fn load(&self) -> Option<GameSession> {
            self.saved.borrow().clone()
        }

        fn save(&self, session: &GameSession) -> Result<(), StorageError> {
            // Go through the snapshot format so the undo buffer is dropped like a real save
            *self.saved.borrow_mut() = snapshot::decode(&snapshot::encode(session)).ok();
            *self.saves.borrow_mut() += 1;
            Ok(())
        }

        fn clear(&self) -> Result<(), StorageError> {
            *self.saved.borrow_mut() = None;
            Ok(())
        }
    }

    struct FailingStore;

    impl SessionStore for FailingStore {
        fn load(&self) -> Option<GameSession> {
            None
        }

        fn save(&self, _session: &GameSession) -> Result<(), StorageError> {
            Err(StorageError::NoDataDirectory)
        }

        fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::NoDataDirectory)
        }
    }

    fn new_app(store: &SharedStore) -> App {
        App::new(Box::new(store.clone()), WakeLock::disabled(), RoundConfig::default())
    }

    fn started_app(store: &SharedStore, players: u32, holes: HoleCount) -> App {
        let mut app = new_app(store);
        app.session.set_config(RoundConfig::new(players, holes));
        app.start_round();
        app
    }

    fn type_score(app: &mut App, text: &str) {
        for c in text.chars() {
            app.on_char(c);
        }
        app.on_submit();
    }

    #[test]
    fn test_fresh_app_starts_at_setup() {
        let store = SharedStore::default();
        let app = new_app(&store);
        assert_eq!(app.screen, Screen::setup());
        assert!(!app.session().is_started());
        assert_eq!(app.session().config(), RoundConfig::default());
    }

    #[test]
    fn test_setup_counters_clamp() {
        let store = SharedStore::default();
        let mut app = new_app(&store);
        for _ in 0..10 {
            app.setup_right();
        }
        assert_eq!(app.session().config().num_players(), 4);
        for _ in 0..10 {
            app.setup_left();
        }
        assert_eq!(app.session().config().num_players(), 1);
    }

    #[test]
    fn test_setup_toggles_holes() {
        let store = SharedStore::default();
        let mut app = new_app(&store);
        app.setup_down();
        app.setup_right();
        assert_eq!(app.session().config().holes, HoleCount::Nine);
        app.setup_left();
        assert_eq!(app.session().config().holes, HoleCount::Eighteen);
    }

    #[test]
    fn test_nothing_saved_before_start() {
        let store = SharedStore::default();
        let mut app = new_app(&store);
        app.setup_right();
        assert_eq!(*store.saves.borrow(), 0);
        assert!(store.saved.borrow().is_none());
    }

    #[test]
    fn test_setup_select_walks_to_start() {
        let store = SharedStore::default();
        let mut app = new_app(&store);
        app.setup_select();
        app.setup_select();
        assert_eq!(app.screen, Screen::Setup { focus: SetupField::Start });
        app.setup_select();
        assert_eq!(app.screen, Screen::Scorecard);
        assert_eq!(app.session().players().len(), 2);
        assert!(store.saved.borrow().as_ref().unwrap().is_started());
    }

    #[test]
    fn test_enter_score_saves_and_advances() {
        let store = SharedStore::default();
        let mut app = started_app(&store, 2, HoleCount::Nine);

        type_score(&mut app, "4");
        assert_eq!(app.session().scores().get(1, 1), Some(4));
        assert_eq!(app.selected_player(), 1);

        type_score(&mut app, "5");
        assert_eq!(app.session().scores().get(2, 1), Some(5));
        assert_eq!(app.selected_player(), 0);
        assert_eq!(app.session().current_hole(), 2);

        let saved = store.saved.borrow().clone().unwrap();
        assert_eq!(saved.scores().get(2, 1), Some(5));
        assert_eq!(saved.current_hole(), 2);
    }

    #[test]
    fn test_last_cell_stays_put() {
        let store = SharedStore::default();
        let mut app = started_app(&store, 1, HoleCount::Nine);
        for _ in 0..20 {
            app.hole_down();
        }
        assert_eq!(app.session().current_hole(), 9);
        type_score(&mut app, "3");
        assert_eq!(app.session().current_hole(), 9);
        assert_eq!(app.selected_player(), 0);
    }

    #[test]
    fn test_negative_entry_rejected() {
        let store = SharedStore::default();
        let mut app = started_app(&store, 2, HoleCount::Nine);
        let saves = *store.saves.borrow();

        type_score(&mut app, "-3");
        assert!(app.session().scores().is_empty());
        assert!(!app.session().can_undo());
        assert_eq!(app.selected_player(), 0);
        assert_eq!(app.feedback, "Scores can't be negative");
        assert_eq!(*store.saves.borrow(), saves);
    }

    #[test]
    fn test_input_filters_and_limits() {
        let store = SharedStore::default();
        let mut app = started_app(&store, 1, HoleCount::Nine);
        for c in "a1b2c3d45".chars() {
            app.on_char(c);
        }
        assert_eq!(app.input, "1234");
        app.on_backspace();
        assert_eq!(app.input, "123");
    }

    #[test]
    fn test_empty_submit_is_noop() {
        let store = SharedStore::default();
        let mut app = started_app(&store, 1, HoleCount::Nine);
        app.on_submit();
        assert!(app.session().scores().is_empty());
    }

    #[test]
    fn test_clear_cell_stores_zero() {
        let store = SharedStore::default();
        let mut app = started_app(&store, 1, HoleCount::Nine);
        type_score(&mut app, "6");
        app.hole_up();
        app.on_clear_cell();
        assert_eq!(app.session().scores().get(1, 1), Some(0));
        assert_eq!(app.session().through_for(1), 0);
    }

    #[test]
    fn test_undo_restores_and_saves() {
        let store = SharedStore::default();
        let mut app = started_app(&store, 1, HoleCount::Nine);
        type_score(&mut app, "5");
        app.hole_up();
        type_score(&mut app, "7");
        assert_eq!(app.session().scores().get(1, 1), Some(7));

        app.undo();
        assert_eq!(app.session().scores().get(1, 1), Some(5));
        assert_eq!(store.saved.borrow().as_ref().unwrap().scores().get(1, 1), Some(5));

        app.undo();
        assert_eq!(app.session().scores().get(1, 1), Some(5));
        assert_eq!(app.feedback, "Nothing to undo");
    }

    #[test]
    fn test_reset_needs_confirmation() {
        let store = SharedStore::default();
        let mut app = started_app(&store, 2, HoleCount::Nine);
        type_score(&mut app, "4");

        app.request_reset();
        assert_eq!(app.screen, Screen::ConfirmReset);
        app.cancel_reset();
        assert_eq!(app.screen, Screen::Scorecard);
        assert_eq!(app.session().scores().len(), 1);

        app.request_reset();
        app.confirm_reset();
        assert_eq!(app.screen, Screen::setup());
        assert!(!app.session().is_started());
        assert!(store.saved.borrow().is_none());
    }

    #[test]
    fn test_confirm_without_request_does_nothing() {
        let store = SharedStore::default();
        let mut app = started_app(&store, 2, HoleCount::Nine);
        app.confirm_reset();
        assert!(app.session().is_started());
    }

    #[test]
    fn test_resume_saved_round() {
        let store = SharedStore::default();
        {
            let mut app = started_app(&store, 3, HoleCount::Eighteen);
            type_score(&mut app, "4");
            app.hole_down();
        }

        let app = new_app(&store);
        assert_eq!(app.screen, Screen::Scorecard);
        assert_eq!(app.session().players().len(), 3);
        assert_eq!(app.session().scores().get(1, 1), Some(4));
        assert_eq!(app.session().current_hole(), 2);
        assert!(!app.session().can_undo());
    }

    #[test]
    fn test_resume_from_sqlite() {
        let storage = Storage::open_in_memory().unwrap();
        let mut session = GameSession::default();
        session.start_round(RoundConfig::new(2, HoleCount::Nine));
        session.set_score(2, 1, "3");
        storage.save(&session).unwrap();

        let app = App::new(Box::new(storage), WakeLock::disabled(), RoundConfig::default());
        assert_eq!(app.screen, Screen::Scorecard);
        assert_eq!(app.session().total_for(2), 3);
    }

    #[test]
    fn test_save_failures_do_not_disturb_state() {
        let mut app = App::new(Box::new(FailingStore), WakeLock::disabled(), RoundConfig::default());
        app.start_round();
        type_score(&mut app, "4");
        assert_eq!(app.session().scores().get(1, 1), Some(4));
        app.request_reset();
        app.confirm_reset();
        assert!(!app.session().is_started());
    }

    #[test]
    fn test_wake_follows_round() {
        let store = SharedStore::default();
        let (backend, acquired, released) = Recording::new(false);
        let mut app = App::new(
            Box::new(store.clone()),
            WakeLock::new(Box::new(backend)),
            RoundConfig::default(),
        );
        assert!(!app.wake.is_held());

        app.start_round();
        assert!(app.wake.is_held());
        assert_eq!(acquired.get(), 1);

        app.request_reset();
        app.confirm_reset();
        assert!(!app.wake.is_held());
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_wake_failure_is_harmless() {
        let store = SharedStore::default();
        let (backend, _, _) = Recording::new(true);
        let mut app = App::new(
            Box::new(store.clone()),
            WakeLock::new(Box::new(backend)),
            RoundConfig::default(),
        );
        app.start_round();
        assert!(!app.wake.is_held());
        assert_eq!(app.screen, Screen::Scorecard);
    }
}
