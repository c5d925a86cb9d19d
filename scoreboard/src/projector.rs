use crate::{
    format::{
        completed_overs_display, economy, innings_ordinal, overs_display, required_rate,
        run_rate, shortest_number, strike_rate,
    },
    glyph::{ball_strip, legacy_overs},
    scorecard::Scorecard,
    view_model::*,
};
use cricket_common::{
    bundles::TeamBundle,
    config::Config,
    match_snapshot::{MatchSnapshot, PlayerStats, Team},
    side::TeamSide,
};
use log::*;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("Invalid snapshot: {0} is missing")]
    MissingTeam(TeamSide),
    #[error("Invalid snapshot: batting team {0:?} matches neither team")]
    UnknownBattingTeam(String),
    #[error("Invalid snapshot: both teams are named {0:?}")]
    DuplicateTeamName(String),
}

pub type Result<T> = std::result::Result<T, ProjectionError>;

/// Turns match snapshots into view models. Holds nothing but its configuration, so the same
/// snapshot always produces the same view.
#[derive(Debug, Clone, Default)]
pub struct Projector {
    config: Config,
}

/// Projects a snapshot using the default display configuration
pub fn project(snapshot: &MatchSnapshot) -> Result<ViewModel> {
    Projector::default().project(snapshot)
}

/// The view shown when there is no match to display
pub fn project_default() -> ViewModel {
    Projector::default().project_default()
}

impl Projector {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn project_default(&self) -> ViewModel {
        ViewModel::default()
    }

    pub fn project(&self, snapshot: &MatchSnapshot) -> Result<ViewModel> {
        let teams = TeamBundle {
            team1: snapshot
                .team1
                .as_ref()
                .ok_or(ProjectionError::MissingTeam(TeamSide::Team1))?,
            team2: snapshot
                .team2
                .as_ref()
                .ok_or(ProjectionError::MissingTeam(TeamSide::Team2))?,
        };
        if teams.team1.name == teams.team2.name {
            return Err(ProjectionError::DuplicateTeamName(teams.team1.name.clone()));
        }

        let batting_name = snapshot.batting_team_name.as_deref().unwrap_or_default();
        let batting_side = snapshot
            .side_named(batting_name)
            .ok_or_else(|| ProjectionError::UnknownBattingTeam(batting_name.to_string()))?;
        let batting = teams[batting_side];
        let bowling = teams[batting_side.other()];

        let flags = TeamBundle {
            team1: snapshot.team1_flag.clone(),
            team2: snapshot.team2_flag.clone(),
        };

        let batting_runs = batting.runs.unwrap_or(0);
        let batting_wickets = batting.wickets.unwrap_or(0);
        let balls_bowled = snapshot.balls_bowled();
        let current_run_rate = run_rate(batting_runs, balls_bowled);

        let target = self.target_block(snapshot, batting, bowling, balls_bowled);
        let chase = target.chase();

        let mut stats = vec![
            format!("Runs: {batting_runs}"),
            format!("Wickets: {batting_wickets}"),
            format!("Balls: {}", balls_bowled.max(0)),
        ];
        if let Some(chase) = chase {
            stats.push(format!("Need {} runs to win", chase.runs_needed));
        }

        let secondary = SecondaryPanel {
            current_over: completed_overs_display(snapshot.current_over, snapshot.current_ball),
            run_rate: current_run_rate.clone(),
            required_rate: chase.map_or_else(
                || String::from("0.00"),
                |chase| chase.required_rate.clone(),
            ),
            target: chase.map_or_else(|| String::from("N/A"), |chase| chase.target.to_string()),
        };

        let last_wicket = match snapshot.fall_of_wickets.last() {
            Some(wicket) if !wicket.player.is_empty() => format!(
                "Last Wkt: {} ({}/{batting_wickets}, {})",
                wicket.player, wicket.runs, wicket.over
            ),
            _ => String::from(NO_WICKETS),
        };

        let view = ViewModel {
            phase: Some(snapshot.phase()),
            status: format!("{} Innings", innings_ordinal(snapshot.current_innings)),
            batting_team: BattingTeamLine {
                name: batting.name.clone(),
                runs: batting_runs,
                wickets: batting_wickets,
                overs: overs_display(snapshot.current_over, snapshot.current_ball),
                flag: flags[batting_side].clone(),
            },
            bowling_team: BowlingTeamLine {
                name: bowling.name.clone(),
                score: match bowling.runs {
                    Some(runs) => format!("{runs}/{}", bowling.wickets.unwrap_or(0)),
                    None => String::from("Yet to bat"),
                },
                overs: bowling.overs.map(shortest_number),
                flag: flags[batting_side.other()].clone(),
            },
            run_rate: current_run_rate,
            partnership: partnership(snapshot),
            striker: batter_card(
                "STRIKER",
                NO_STRIKER,
                snapshot.player(snapshot.striker.as_deref()),
            ),
            non_striker: batter_card(
                "NON-STRIKER",
                NO_NON_STRIKER,
                snapshot.player(snapshot.non_striker.as_deref()),
            ),
            bowler: bowler_card(snapshot),
            recent_balls: ball_strip(snapshot, &self.config.display),
            legacy_overs: legacy_overs(snapshot, &self.config.display),
            secondary,
            stats,
            last_wicket,
            scorecard: Some(Scorecard::new(snapshot, &teams)),
            result: snapshot.is_finished.then(|| match_result(snapshot, &teams)),
            target,
        };

        debug!(
            "Projected {} snapshot ({}): {} {}/{} ({})",
            view.status,
            snapshot.phase(),
            view.batting_team.name,
            batting_runs,
            batting_wickets,
            view.target.text()
        );

        Ok(view)
    }

    fn target_block(
        &self,
        snapshot: &MatchSnapshot,
        batting: &Team,
        bowling: &Team,
        balls_bowled: i64,
    ) -> TargetBlock {
        if let (2, Some(bowling_runs)) = (snapshot.current_innings, bowling.runs) {
            let target = bowling_runs + 1;
            let runs_needed = i64::from(target) - i64::from(batting.runs.unwrap_or(0));
            let balls_remaining = i64::from(snapshot.total_overs) * 6 - balls_bowled;
            let required_rate = required_rate(runs_needed, balls_remaining);
            // The tier goes by the rate as displayed, so 8.004 reads as an achievable 8.00
            let tier = RateTier::for_rate(
                required_rate.parse().unwrap_or_default(),
                &self.config.rates,
            );

            return TargetBlock::Chase(ChaseView {
                target,
                runs_needed,
                balls_remaining,
                required_rate,
                tier,
                summary: format!("Target: {target} | Need {runs_needed} in {balls_remaining}"),
                need: format!("{runs_needed} in {balls_remaining}"),
            });
        }

        let summary = match (&snapshot.toss_winner, snapshot.toss_decision) {
            (Some(winner), Some(decision)) => {
                format!("{winner} OPT TO {}", decision.to_string().to_uppercase())
            }
            _ => {
                let bowling_name = snapshot
                    .bowling_team_name
                    .as_deref()
                    .unwrap_or(&bowling.name);
                format!("{bowling_name} OPT TO BOWL")
            }
        };
        TargetBlock::Toss(summary)
    }
}

fn partnership(snapshot: &MatchSnapshot) -> Partnership {
    let striker = snapshot.player(snapshot.striker.as_deref());
    let non_striker = snapshot
        .player(snapshot.non_striker.as_deref())
        .filter(|(name, _)| striker.is_none_or(|(striker_name, _)| striker_name != *name));

    [striker, non_striker]
        .into_iter()
        .flatten()
        .fold(Partnership::default(), |total, (_, stats)| Partnership {
            runs: total.runs + stats.runs,
            balls: total.balls + stats.balls_faced,
        })
}

fn batter_card(role: &str, placeholder: &str, player: Option<(&str, &PlayerStats)>) -> BatterCard {
    match player {
        Some((name, stats)) => BatterCard {
            role: role.to_string(),
            name: name.to_string(),
            runs: stats.runs,
            balls: stats.balls_faced,
            fours: stats.fours,
            sixes: stats.sixes,
            strike_rate: strike_rate(stats.runs, stats.balls_faced),
        },
        None => BatterCard {
            role: role.to_string(),
            ..BatterCard::placeholder(placeholder)
        },
    }
}

fn bowler_card(snapshot: &MatchSnapshot) -> BowlerCard {
    let Some((name, stats)) = snapshot.player(snapshot.bowler.as_deref()) else {
        return BowlerCard::placeholder();
    };

    let completed_overs = stats.overs_bowled.floor();
    let current_ball = snapshot.current_ball;
    let overs = if current_ball > 0 {
        format!("{completed_overs}.{current_ball}")
    } else {
        format!("{completed_overs}.0")
    };
    let overs_for_economy = stats.overs_bowled + f64::from(current_ball) / 6.0;

    BowlerCard {
        name: name.to_string(),
        overs,
        figures: format!("{}-{}", stats.wickets_taken, stats.runs_conceded),
        economy: economy(stats.runs_conceded, overs_for_economy),
    }
}

fn match_result(snapshot: &MatchSnapshot, teams: &TeamBundle<&Team>) -> MatchResult {
    let text = match (&snapshot.match_result, &snapshot.winner) {
        (Some(result), _) => result.clone(),
        (None, Some(winner)) => format!("{winner} won"),
        (None, None) => String::from("Match complete"),
    };
    let scores = teams.map(|team| {
        format!(
            "{}: {}/{}",
            team.name,
            team.runs.unwrap_or(0),
            team.wickets.unwrap_or(0)
        )
    });

    MatchResult {
        text,
        team1_score: scores.team1,
        team2_score: scores.team2,
    }
}
