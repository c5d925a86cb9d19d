//! State kept by the scorer's control surface while a ball is being entered, and the player
//! lists it offers.

use cricket_common::{
    match_snapshot::{ExtraType, MatchSnapshot, WicketType},
    side::TeamSide,
};
use log::*;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("Please select the dismissed player")]
    MissingDismissedPlayer,
}

pub type Result<T> = std::result::Result<T, ControlError>;

/// The ball the scorer is currently building
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingBall {
    runs: u32,
    extra_type: Option<ExtraType>,
    extra_runs: Option<u32>,
    is_wicket: bool,
    wicket_type: WicketType,
    dismissed_player: Option<String>,
}

/// Payload sent to the scoring service to record a ball
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BallSubmission {
    pub runs: u32,
    pub is_wicket: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_type: Option<ExtraType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_runs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wicket_type: Option<WicketType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissed_player: Option<String>,
}

impl PendingBall {
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn extra_type(&self) -> Option<ExtraType> {
        self.extra_type
    }

    pub fn is_wicket(&self) -> bool {
        self.is_wicket
    }

    pub fn set_runs(&mut self, runs: u32) {
        self.runs = runs;
    }

    /// Selects `extra`, or clears the selection if `extra` was already selected
    pub fn toggle_extra(&mut self, extra: ExtraType) {
        if self.extra_type == Some(extra) {
            self.extra_type = None;
            self.extra_runs = None;
        } else {
            self.extra_type = Some(extra);
        }
    }

    pub fn set_extra_runs(&mut self, extra_runs: Option<u32>) {
        self.extra_runs = extra_runs;
    }

    pub fn toggle_wicket(&mut self) {
        self.is_wicket = !self.is_wicket;
        if !self.is_wicket {
            self.wicket_type = WicketType::default();
            self.dismissed_player = None;
        }
    }

    pub fn set_wicket_type(&mut self, wicket_type: WicketType) {
        self.wicket_type = wicket_type;
    }

    pub fn set_dismissed_player(&mut self, player: Option<String>) {
        self.dismissed_player = player.filter(|p| !p.trim().is_empty());
    }

    pub fn submission(&self) -> Result<BallSubmission> {
        // An extra is always worth at least one run
        let extra_runs = self
            .extra_type
            .map(|_| self.extra_runs.filter(|runs| *runs > 0).unwrap_or(1));

        let (wicket_type, dismissed_player) = if self.is_wicket {
            let Some(dismissed) = &self.dismissed_player else {
                warn!("Wicket submitted without a dismissed player");
                return Err(ControlError::MissingDismissedPlayer);
            };
            (Some(self.wicket_type), Some(dismissed.clone()))
        } else {
            (None, None)
        };

        Ok(BallSubmission {
            runs: self.runs,
            is_wicket: self.is_wicket,
            extra_type: self.extra_type,
            extra_runs,
            wicket_type,
            dismissed_player,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Players offered by each of the control surface's selectors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerChoices {
    pub openers: Vec<String>,
    pub next_batters: Vec<String>,
    pub bowlers: Vec<String>,
    /// Batters who can be given out on the next ball
    pub dismissable: Vec<String>,
}

pub fn player_choices(snapshot: &MatchSnapshot) -> PlayerChoices {
    let Some(teams) = snapshot.teams().complete() else {
        return PlayerChoices::default();
    };

    let batting_side = snapshot
        .batting_team_name
        .as_deref()
        .and_then(|name| snapshot.side_named(name))
        .unwrap_or(TeamSide::Team2);
    let batting = teams[batting_side];
    let bowling = teams[batting_side.other()];

    let dismissed: HashSet<_> = snapshot
        .fall_of_wickets
        .iter()
        .map(|wicket| wicket.player.as_str())
        .collect();
    let at_crease: Vec<_> = [&snapshot.striker, &snapshot.non_striker]
        .into_iter()
        .flatten()
        .cloned()
        .collect();

    let openers: Vec<String> = batting
        .players
        .iter()
        .filter(|player| !dismissed.contains(player.as_str()))
        .cloned()
        .collect();
    let next_batters = openers
        .iter()
        .filter(|player| !at_crease.contains(*player))
        .cloned()
        .collect();

    PlayerChoices {
        openers,
        next_batters,
        bowlers: bowling.players.clone(),
        dismissable: at_crease,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cricket_common::match_snapshot::{FallOfWicket, Team};

    #[test]
    fn test_plain_ball() {
        let mut ball = PendingBall::default();
        ball.set_runs(4);
        assert_eq!(
            ball.submission(),
            Ok(BallSubmission {
                runs: 4,
                is_wicket: false,
                extra_type: None,
                extra_runs: None,
                wicket_type: None,
                dismissed_player: None,
            })
        );
        assert_eq!(
            serde_json::to_string(&ball.submission().unwrap()).unwrap(),
            r#"{"runs":4,"is_wicket":false}"#
        );
    }

    #[test]
    fn test_toggle_extra() {
        let mut ball = PendingBall::default();
        ball.toggle_extra(ExtraType::Wide);
        assert_eq!(ball.extra_type(), Some(ExtraType::Wide));
        assert_eq!(ball.submission().unwrap().extra_runs, Some(1));

        ball.set_extra_runs(Some(0));
        assert_eq!(ball.submission().unwrap().extra_runs, Some(1));

        ball.set_extra_runs(Some(5));
        assert_eq!(ball.submission().unwrap().extra_runs, Some(5));

        ball.toggle_extra(ExtraType::Bye);
        assert_eq!(ball.extra_type(), Some(ExtraType::Bye));
        assert_eq!(ball.submission().unwrap().extra_runs, Some(5));

        ball.toggle_extra(ExtraType::Bye);
        assert_eq!(ball.extra_type(), None);
        let submission = ball.submission().unwrap();
        assert_eq!(submission.extra_type, None);
        assert_eq!(submission.extra_runs, None);
    }

    #[test]
    fn test_wicket_needs_dismissed_player() {
        let mut ball = PendingBall::default();
        ball.toggle_wicket();
        assert!(ball.is_wicket());
        assert_eq!(
            ball.submission(),
            Err(ControlError::MissingDismissedPlayer)
        );

        ball.set_dismissed_player(Some(String::from("  ")));
        assert_eq!(
            ball.submission(),
            Err(ControlError::MissingDismissedPlayer)
        );

        ball.set_wicket_type(WicketType::Caught);
        ball.set_dismissed_player(Some(String::from("Rohit")));
        let submission = ball.submission().unwrap();
        assert!(submission.is_wicket);
        assert_eq!(submission.wicket_type, Some(WicketType::Caught));
        assert_eq!(submission.dismissed_player.as_deref(), Some("Rohit"));
        assert_eq!(
            serde_json::to_string(&submission).unwrap(),
            r#"{"runs":0,"is_wicket":true,"wicket_type":"caught","dismissed_player":"Rohit"}"#
        );

        ball.toggle_wicket();
        assert!(!ball.is_wicket());
        ball.toggle_wicket();
        assert_eq!(
            ball.submission(),
            Err(ControlError::MissingDismissedPlayer)
        );
    }

    #[test]
    fn test_reset() {
        let mut ball = PendingBall::default();
        ball.set_runs(2);
        ball.toggle_extra(ExtraType::NoBall);
        ball.toggle_wicket();
        ball.reset();
        assert_eq!(ball, PendingBall::default());
        assert_eq!(ball.runs(), 0);
    }

    fn team(name: &str, players: &[&str]) -> Team {
        Team {
            players: players.iter().map(|p| p.to_string()).collect(),
            ..Team::with_name(name)
        }
    }

    #[test]
    fn test_player_choices() {
        let snapshot = MatchSnapshot {
            team1: Some(team("India", &["Rohit", "Gill", "Kohli", "Pant"])),
            team2: Some(team("Australia", &["Starc", "Cummins"])),
            batting_team_name: Some(String::from("India")),
            striker: Some(String::from("Gill")),
            non_striker: Some(String::from("Kohli")),
            fall_of_wickets: vec![FallOfWicket {
                player: String::from("Rohit"),
                runs: 10,
                over: String::from("2.1"),
            }],
            ..Default::default()
        };

        let choices = player_choices(&snapshot);
        assert_eq!(choices.openers, vec!["Gill", "Kohli", "Pant"]);
        assert_eq!(choices.next_batters, vec!["Pant"]);
        assert_eq!(choices.bowlers, vec!["Starc", "Cummins"]);
        assert_eq!(choices.dismissable, vec!["Gill", "Kohli"]);
    }

    #[test]
    fn test_player_choices_fallbacks() {
        assert_eq!(
            player_choices(&MatchSnapshot::default()),
            PlayerChoices::default()
        );

        let snapshot = MatchSnapshot {
            team1: Some(team("India", &["Rohit"])),
            team2: Some(team("Australia", &["Warner"])),
            ..Default::default()
        };
        let choices = player_choices(&snapshot);
        assert_eq!(choices.openers, vec!["Warner"]);
        assert_eq!(choices.bowlers, vec!["Rohit"]);
        assert!(choices.dismissable.is_empty());
    }
}
