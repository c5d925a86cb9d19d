use crate::{projector::Projector, view_model::ViewModel};
use cricket_common::match_snapshot::MatchSnapshot;
use log::*;
use serde::{Deserialize, Serialize};

/// Everything the scoring service can tell the scoreboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", content = "data", rename_all = "snake_case")]
pub enum Signal {
    SnapshotReceived(Box<MatchSnapshot>),
    ConnectionChanged(bool),
    Action(ActionKind),
}

/// Outcome of a recorded ball, as reported by the scoring service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionKind {
    #[serde(alias = "ball_added")]
    BallRecorded,
    OverComplete {
        /// A wicket fell on the last ball of the over
        #[serde(default)]
        wicket: bool,
    },
    InningsComplete,
    MatchComplete,
    #[serde(alias = "wicket")]
    WicketTaken,
}

/// Input the control surface has to ask the scorer for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prompt {
    NewBowler,
    NewBatter,
    SecondInningsOpeners,
    MatchResult,
}

impl core::fmt::Display for Prompt {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::NewBowler => write!(f, "Select the new bowler"),
            Self::NewBatter => write!(f, "Select the new batter"),
            Self::SecondInningsOpeners => write!(f, "Select the second innings openers"),
            Self::MatchResult => write!(f, "Match complete"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// The view changed and should be drawn again
    Redraw,
    Prompt(Prompt),
    Ignored,
}

/// Holds the last good view and dispatches every inbound signal
#[derive(Debug)]
pub struct Scoreboard {
    projector: Projector,
    view: ViewModel,
    connected: bool,
    pending_batter: bool,
}

impl Scoreboard {
    pub fn new(projector: Projector) -> Self {
        let view = projector.project_default();
        Self {
            projector,
            view,
            connected: false,
            pending_batter: false,
        }
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn connection_status(&self) -> &'static str {
        if self.connected { "LIVE" } else { "OFFLINE" }
    }

    pub fn handle(&mut self, signal: Signal) -> Reaction {
        match signal {
            Signal::SnapshotReceived(snapshot) => match self.projector.project(&snapshot) {
                Ok(view) => {
                    self.view = view;
                    Reaction::Redraw
                }
                Err(e) => {
                    warn!("Snapshot discarded, keeping the previous view: {e}");
                    Reaction::Ignored
                }
            },
            Signal::ConnectionChanged(connected) => {
                if connected {
                    info!("Connected to the scoring service");
                } else {
                    warn!("Connection to the scoring service lost");
                    self.view = self.projector.project_default();
                    self.pending_batter = false;
                }
                self.connected = connected;
                Reaction::Redraw
            }
            Signal::Action(kind) => {
                debug!("Action received: {kind:?}");
                match kind {
                    ActionKind::BallRecorded => Reaction::Ignored,
                    ActionKind::OverComplete { wicket } => {
                        self.pending_batter = wicket;
                        Reaction::Prompt(Prompt::NewBowler)
                    }
                    ActionKind::WicketTaken => Reaction::Prompt(Prompt::NewBatter),
                    ActionKind::InningsComplete => Reaction::Prompt(Prompt::SecondInningsOpeners),
                    ActionKind::MatchComplete => Reaction::Prompt(Prompt::MatchResult),
                }
            }
        }
    }

    /// Call once the scorer has answered `prompt`. Returns the prompt that has to follow it, if
    /// any.
    pub fn prompt_resolved(&mut self, prompt: Prompt) -> Option<Prompt> {
        if prompt == Prompt::NewBowler && self.pending_batter {
            self.pending_batter = false;
            Some(Prompt::NewBatter)
        } else {
            None
        }
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(Projector::default())
    }
}
