use crate::format::{completed_overs_display, fixed2, shortest_number, strike_rate};
use cricket_common::{
    bundles::TeamBundle,
    match_snapshot::{Extras, MatchSnapshot, PlayerStats, Team, TossDecision},
    side::TeamSide,
};
use serde::Serialize;

/// Full batting and bowling cards for both innings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scorecard {
    pub first: InningsCard,
    pub second: InningsCard,
    /// The second innings card is only shown once that innings has begun
    pub show_second: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InningsCard {
    pub number: u8,
    pub batting_side: TeamSide,
    pub team_name: String,
    /// `"{runs}/{wickets}"` with an optional `" ({overs} ov)"` suffix
    pub score: String,
    pub batting: Vec<BattingRow>,
    pub extras: ExtrasLine,
    pub bowling: Vec<BowlingRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattingRow {
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: String,
    pub dismissal: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtrasLine {
    pub total: u32,
    /// `"{total} (b 1, lb 2, w 3, nb 4)"`, listing only the non-zero kinds
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BowlingRow {
    pub name: String,
    pub overs: String,
    pub maidens: u32,
    pub runs: u32,
    pub wickets: u32,
    pub economy: String,
}

/// Which team batted first, going by the toss. Team 1 bats first when the toss is unknown.
pub fn first_batting_side(snapshot: &MatchSnapshot, team1: &Team) -> TeamSide {
    let (Some(winner), Some(decision)) = (&snapshot.toss_winner, snapshot.toss_decision) else {
        return TeamSide::Team1;
    };

    // Any winner that isn't team 1 is taken to be team 2
    let winner_side = if *winner == team1.name {
        TeamSide::Team1
    } else {
        TeamSide::Team2
    };

    match decision {
        TossDecision::Bat => winner_side,
        TossDecision::Bowl => winner_side.other(),
    }
}

impl Scorecard {
    pub fn new(snapshot: &MatchSnapshot, teams: &TeamBundle<&Team>) -> Self {
        let first_side = first_batting_side(snapshot, teams.team1);
        Self {
            first: InningsCard::new(snapshot, teams, 1, first_side),
            second: InningsCard::new(snapshot, teams, 2, first_side.other()),
            show_second: snapshot.current_innings == 2 || snapshot.is_finished,
        }
    }
}

impl InningsCard {
    fn new(
        snapshot: &MatchSnapshot,
        teams: &TeamBundle<&Team>,
        number: u8,
        batting_side: TeamSide,
    ) -> Self {
        let batting_team = teams[batting_side];
        let bowling_team = teams[batting_side.other()];

        let team_name = if batting_team.name.is_empty() {
            String::from("Team")
        } else {
            batting_team.name.clone()
        };

        Self {
            number,
            batting_side,
            team_name,
            score: innings_score(snapshot, batting_team, number),
            batting: roster(snapshot, batting_team)
                .filter(|(_, stats)| stats.has_batted())
                .map(|(name, stats)| BattingRow::new(name, stats))
                .collect(),
            extras: ExtrasLine::new(&batting_team.extras),
            bowling: roster(snapshot, bowling_team)
                .filter(|(_, stats)| stats.has_bowled())
                .map(|(name, stats)| BowlingRow::new(snapshot, name, stats))
                .collect(),
        }
    }
}

/// The team's players in squad order, skipping names with no stats
fn roster<'a>(
    snapshot: &'a MatchSnapshot,
    team: &'a Team,
) -> impl Iterator<Item = (&'a str, &'a PlayerStats)> {
    team.players
        .iter()
        .filter_map(move |name| snapshot.player(Some(name.as_str())))
}

fn innings_score(snapshot: &MatchSnapshot, team: &Team, number: u8) -> String {
    let score = format!("{}/{}", team.runs.unwrap_or(0), team.wickets.unwrap_or(0));
    if number == snapshot.current_innings && snapshot.current_over != 0 {
        format!(
            "{score} ({} ov)",
            completed_overs_display(snapshot.current_over, snapshot.current_ball)
        )
    } else if let Some(overs) = team.overs {
        format!("{score} ({} ov)", shortest_number(overs))
    } else {
        score
    }
}

impl BattingRow {
    fn new(name: &str, stats: &PlayerStats) -> Self {
        let dismissal = match (stats.is_out, &stats.dismissal_type) {
            (true, Some(how)) => match &stats.bowler_name {
                Some(bowler) => format!("{how} b {bowler}"),
                None => how.clone(),
            },
            _ => String::from("not out"),
        };

        Self {
            name: name.to_string(),
            runs: stats.runs,
            balls: stats.balls_faced,
            fours: stats.fours,
            sixes: stats.sixes,
            strike_rate: strike_rate(stats.runs, stats.balls_faced),
            dismissal,
        }
    }
}

impl ExtrasLine {
    fn new(extras: &Extras) -> Self {
        let breakdown: Vec<_> = [
            ("b", extras.byes),
            ("lb", extras.leg_byes),
            ("w", extras.wides),
            ("nb", extras.no_balls),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(abbreviation, count)| format!("{abbreviation} {count}"))
        .collect();

        let total = extras.total();
        Self {
            total,
            text: format!("{total} ({})", breakdown.join(", ")),
        }
    }
}

impl BowlingRow {
    fn new(snapshot: &MatchSnapshot, name: &str, stats: &PlayerStats) -> Self {
        // `overs_bowled` is in cricket notation: the tenths digit counts balls, not tenths
        let mut overs = stats.overs_bowled;
        if snapshot.bowler.as_deref() == Some(name) && snapshot.current_ball > 0 {
            overs += f64::from(snapshot.current_ball) / 10.0;
        }

        let complete_overs = overs.floor();
        let extra_balls = ((overs - complete_overs) * 10.0).round();
        let total_balls = complete_overs * 6.0 + extra_balls;

        let overs_text = if extra_balls > 0.0 {
            format!("{complete_overs}.{extra_balls}")
        } else {
            format!("{complete_overs}")
        };

        let economy = if total_balls > 0.0 {
            fixed2(f64::from(stats.runs_conceded) / total_balls * 6.0)
        } else {
            String::from("0.00")
        };

        Self {
            name: name.to_string(),
            overs: overs_text,
            maidens: stats.maidens,
            runs: stats.runs_conceded,
            wickets: stats.wickets_taken,
            economy,
        }
    }
}
