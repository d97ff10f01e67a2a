//! Which screen is showing, and setup-screen focus

/// A focusable row on the setup screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    Players,
    Holes,
    Start,
}

impl SetupField {
    /// Get the display label for this field
    pub fn label(&self) -> &'static str {
        match self {
            SetupField::Players => "Number of Players",
            SetupField::Holes => "Number of Holes",
            SetupField::Start => "Start Round",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SetupField::Players => SetupField::Holes,
            SetupField::Holes | SetupField::Start => SetupField::Start,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SetupField::Start => SetupField::Holes,
            SetupField::Holes | SetupField::Players => SetupField::Players,
        }
    }
}

/// The current application screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Choosing players and holes before a round
    Setup { focus: SetupField },
    /// Leaderboard and score grid
    Scorecard,
    /// Scorecard with the reset confirmation on top
    ConfirmReset,
}

impl Screen {
    pub fn setup() -> Self {
        Screen::Setup {
            focus: SetupField::Players,
        }
    }
}
