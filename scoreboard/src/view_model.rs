use crate::{
    glyph::{BallStrip, LegacyOvers},
    scorecard::Scorecard,
};
use cricket_common::{config::Rates, match_snapshot::MatchPhase};
use derivative::Derivative;
use serde::Serialize;

/// Everything the display shows, already formatted. Rebuilt from scratch for every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    /// `None` until a match snapshot has been projected
    pub phase: Option<MatchPhase>,
    pub status: String,
    pub batting_team: BattingTeamLine,
    pub bowling_team: BowlingTeamLine,
    pub run_rate: String,
    pub partnership: Partnership,
    pub target: TargetBlock,
    pub striker: BatterCard,
    pub non_striker: BatterCard,
    pub bowler: BowlerCard,
    pub recent_balls: Option<BallStrip>,
    pub legacy_overs: LegacyOvers,
    pub secondary: SecondaryPanel,
    pub stats: Vec<String>,
    pub last_wicket: String,
    pub scorecard: Option<Scorecard>,
    pub result: Option<MatchResult>,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            phase: None,
            status: String::from("NO MATCH"),
            batting_team: BattingTeamLine::default(),
            bowling_team: BowlingTeamLine::default(),
            run_rate: String::from("0.00"),
            partnership: Partnership::default(),
            target: TargetBlock::NoTarget,
            striker: BatterCard::placeholder(NO_STRIKER),
            non_striker: BatterCard::placeholder(NO_NON_STRIKER),
            bowler: BowlerCard::placeholder(),
            recent_balls: None,
            legacy_overs: LegacyOvers::default(),
            secondary: SecondaryPanel::default(),
            stats: vec![String::from("No statistics available")],
            last_wicket: String::from(NO_WICKETS),
            scorecard: None,
            result: None,
        }
    }
}

pub(crate) const NO_STRIKER: &str = "NO STRIKER";
pub(crate) const NO_NON_STRIKER: &str = "NO NON-STRIKER";
pub(crate) const NO_BOWLER: &str = "NO BOWLER";
pub(crate) const NO_WICKETS: &str = "No wickets";

#[derive(Derivative, Clone, PartialEq, Eq, Serialize)]
#[derivative(Debug, Default)]
pub struct BattingTeamLine {
    #[derivative(Default(value = "String::from(\"TEAM A\")"))]
    pub name: String,
    pub runs: u32,
    pub wickets: u32,
    #[derivative(Default(value = "String::from(\"0.0\")"))]
    pub overs: String,
    pub flag: Option<String>,
}

#[derive(Derivative, Clone, PartialEq, Eq, Serialize)]
#[derivative(Debug, Default)]
pub struct BowlingTeamLine {
    #[derivative(Default(value = "String::from(\"TEAM B\")"))]
    pub name: String,
    /// `"{runs}/{wickets}"`, or `"Yet to bat"`
    #[derivative(Default(value = "String::from(\"0\")"))]
    pub score: String,
    pub overs: Option<String>,
    pub flag: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Partnership {
    pub runs: u32,
    pub balls: u32,
}

impl core::fmt::Display for Partnership {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{} ({})", self.runs, self.balls)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RateTier {
    Achievable,
    Challenging,
    VeryDifficult,
}

impl RateTier {
    pub fn for_rate(rate: f64, thresholds: &Rates) -> Self {
        if rate > thresholds.very_difficult {
            Self::VeryDifficult
        } else if rate > thresholds.challenging {
            Self::Challenging
        } else {
            Self::Achievable
        }
    }
}

impl core::fmt::Display for RateTier {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::Achievable => write!(f, "achievable"),
            Self::Challenging => write!(f, "challenging"),
            Self::VeryDifficult => write!(f, "very-difficult"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChaseView {
    pub target: u32,
    pub runs_needed: i64,
    pub balls_remaining: i64,
    pub required_rate: String,
    pub tier: RateTier,
    /// `"Target: {target} | Need {runs} in {balls}"`
    pub summary: String,
    /// `"{runs} in {balls}"`
    pub need: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TargetBlock {
    NoTarget,
    Toss(String),
    Chase(ChaseView),
}

impl TargetBlock {
    pub fn text(&self) -> &str {
        match self {
            Self::NoTarget => "NO TARGET",
            Self::Toss(summary) => summary,
            Self::Chase(chase) => &chase.summary,
        }
    }

    pub fn chase(&self) -> Option<&ChaseView> {
        match self {
            Self::Chase(chase) => Some(chase),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatterCard {
    pub role: String,
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: String,
}

impl BatterCard {
    /// Card for a batter who isn't at the crease. Before any match the role also shows the
    /// placeholder name.
    pub fn placeholder(name: &str) -> Self {
        Self {
            role: name.to_string(),
            name: name.to_string(),
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            strike_rate: String::from("0.00"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BowlerCard {
    pub name: String,
    pub overs: String,
    /// `"{wickets}-{runs}"`
    pub figures: String,
    pub economy: String,
}

impl BowlerCard {
    pub fn placeholder() -> Self {
        Self {
            name: NO_BOWLER.to_string(),
            overs: String::from("0.0"),
            figures: String::from("0-0"),
            economy: String::from("0.00"),
        }
    }
}

#[derive(Derivative, Clone, PartialEq, Eq, Serialize)]
#[derivative(Debug, Default)]
pub struct SecondaryPanel {
    #[derivative(Default(value = "String::from(\"0.0\")"))]
    pub current_over: String,
    #[derivative(Default(value = "String::from(\"0.00\")"))]
    pub run_rate: String,
    #[derivative(Default(value = "String::from(\"0.00\")"))]
    pub required_rate: String,
    #[derivative(Default(value = "String::from(\"N/A\")"))]
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub text: String,
    pub team1_score: String,
    pub team2_score: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_view() {
        let view = ViewModel::default();
        assert_eq!(view.phase, None);
        assert_eq!(view.status, "NO MATCH");
        assert_eq!(view.batting_team.name, "TEAM A");
        assert_eq!(view.batting_team.overs, "0.0");
        assert_eq!(view.bowling_team.name, "TEAM B");
        assert_eq!(view.bowling_team.score, "0");
        assert_eq!(view.partnership.to_string(), "0 (0)");
        assert_eq!(view.target.text(), "NO TARGET");
        assert_eq!(view.striker.role, "NO STRIKER");
        assert_eq!(view.non_striker.name, "NO NON-STRIKER");
        assert_eq!(view.bowler.name, "NO BOWLER");
        assert_eq!(view.bowler.figures, "0-0");
        assert_eq!(view.secondary.target, "N/A");
        assert_eq!(view.stats, vec!["No statistics available"]);
        assert_eq!(view.last_wicket, "No wickets");
    }

    #[test]
    fn test_rate_tier() {
        let rates = Rates::default();
        assert_eq!(RateTier::for_rate(0.0, &rates), RateTier::Achievable);
        assert_eq!(RateTier::for_rate(8.0, &rates), RateTier::Achievable);
        assert_eq!(RateTier::for_rate(8.01, &rates), RateTier::Challenging);
        assert_eq!(RateTier::for_rate(12.0, &rates), RateTier::Challenging);
        assert_eq!(RateTier::for_rate(12.01, &rates), RateTier::VeryDifficult);
        assert_eq!(RateTier::VeryDifficult.to_string(), "very-difficult");
        assert_eq!(
            serde_json::to_string(&RateTier::VeryDifficult).unwrap(),
            r#""very-difficult""#
        );
    }

    #[test]
    fn test_target_block_serialization() {
        assert_eq!(
            serde_json::to_string(&TargetBlock::Toss(String::from("India OPT TO BAT"))).unwrap(),
            r#"{"kind":"toss","value":"India OPT TO BAT"}"#
        );
        assert_eq!(
            serde_json::to_string(&TargetBlock::NoTarget).unwrap(),
            r#"{"kind":"no_target"}"#
        );
    }
}
