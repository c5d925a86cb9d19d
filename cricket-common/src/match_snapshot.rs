use crate::{bundles::TeamBundle, side::TeamSide};
use derivative::Derivative;
use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{IntoDeserializer, value::StringDeserializer},
};

/// Full state of a match as pushed by the scoring service. Every push replaces the previous
/// snapshot completely.
#[derive(Derivative, Serialize, Deserialize)]
#[derivative(Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct MatchSnapshot {
    pub team1: Option<Team>,
    pub team2: Option<Team>,
    #[serde(deserialize_with = "deser_blank_as_none")]
    pub team1_flag: Option<String>,
    #[serde(deserialize_with = "deser_blank_as_none")]
    pub team2_flag: Option<String>,
    #[serde(rename = "batting_team", deserialize_with = "deser_blank_as_none")]
    pub batting_team_name: Option<String>,
    #[serde(rename = "bowling_team", deserialize_with = "deser_blank_as_none")]
    pub bowling_team_name: Option<String>,
    #[derivative(Default(value = "1"))]
    #[serde(deserialize_with = "deser_with_null_to_default")]
    pub current_innings: u8,
    #[serde(deserialize_with = "deser_with_null_to_default")]
    pub current_over: u32,
    #[serde(deserialize_with = "deser_with_null_to_default")]
    pub current_ball: u32,
    #[serde(deserialize_with = "deser_with_null_to_default")]
    pub total_overs: u32,
    #[serde(deserialize_with = "deser_blank_as_none")]
    pub striker: Option<String>,
    #[serde(deserialize_with = "deser_blank_as_none")]
    pub non_striker: Option<String>,
    #[serde(deserialize_with = "deser_blank_as_none")]
    pub bowler: Option<String>,
    pub players: IndexMap<String, PlayerStats>,
    pub overs: Vec<Over>,
    pub fall_of_wickets: Vec<FallOfWicket>,
    #[serde(deserialize_with = "deser_blank_as_none")]
    pub toss_winner: Option<String>,
    #[serde(deserialize_with = "deser_variant_or_none")]
    pub toss_decision: Option<TossDecision>,
    pub is_started: bool,
    pub is_finished: bool,
    #[serde(deserialize_with = "deser_blank_as_none")]
    pub winner: Option<String>,
    #[serde(deserialize_with = "deser_blank_as_none")]
    pub match_result: Option<String>,
}

impl MatchSnapshot {
    pub fn teams(&self) -> TeamBundle<Option<&Team>> {
        TeamBundle {
            team1: self.team1.as_ref(),
            team2: self.team2.as_ref(),
        }
    }

    /// Which side carries the given team name, if any
    pub fn side_named(&self, name: &str) -> Option<TeamSide> {
        self.teams()
            .iter()
            .find(|(_, team)| team.is_some_and(|t| t.name == name))
            .map(|(side, _)| side)
    }

    /// Looks up a player's stats by an optional name reference
    pub fn player(&self, name: Option<&str>) -> Option<(&str, &PlayerStats)> {
        self.players
            .get_key_value(name?)
            .map(|(name, stats)| (name.as_str(), stats))
    }

    /// Legal deliveries bowled so far in the current innings. Negative when the over counter
    /// hasn't been started yet.
    pub fn balls_bowled(&self) -> i64 {
        (i64::from(self.current_over) - 1) * 6 + i64::from(self.current_ball)
    }

    /// Every ball in the snapshot in the order it was bowled, tagged with its over number. An
    /// over numbered 0 counts as the first over.
    pub fn balls(&self) -> impl Iterator<Item = (u32, &Ball)> {
        self.overs.iter().flat_map(|over| {
            let over_number = over.over_number.max(1);
            over.balls.iter().map(move |ball| (over_number, ball))
        })
    }

    pub fn phase(&self) -> MatchPhase {
        if self.is_finished {
            MatchPhase::Finished
        } else if !self.is_started {
            MatchPhase::NotStarted
        } else if self.current_innings >= 2 {
            if self.striker.is_none() && self.non_striker.is_none() && self.bowler.is_none() {
                MatchPhase::InningsBreak
            } else {
                MatchPhase::SecondInnings
            }
        } else {
            MatchPhase::FirstInnings
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub runs: Option<u32>,
    #[serde(default)]
    pub wickets: Option<u32>,
    #[serde(default)]
    pub overs: Option<f64>,
    #[serde(default, deserialize_with = "deser_extras")]
    pub extras: Extras,
}

impl Team {
    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            players: Vec::new(),
            runs: None,
            wickets: None,
            overs: None,
            extras: Extras::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extras {
    pub byes: u32,
    pub leg_byes: u32,
    pub wides: u32,
    pub no_balls: u32,
}

impl Extras {
    pub fn total(&self) -> u32 {
        self.byes + self.leg_byes + self.wides + self.no_balls
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    #[serde(deserialize_with = "deser_with_null_to_default")]
    pub runs: u32,
    #[serde(deserialize_with = "deser_with_null_to_default")]
    pub balls_faced: u32,
    #[serde(deserialize_with = "deser_with_null_to_default")]
    pub fours: u32,
    #[serde(deserialize_with = "deser_with_null_to_default")]
    pub sixes: u32,
    #[serde(deserialize_with = "deser_with_null_to_default")]
    pub runs_conceded: u32,
    #[serde(deserialize_with = "deser_with_null_to_default")]
    pub wickets_taken: u32,
    #[serde(deserialize_with = "deser_with_null_to_default")]
    pub overs_bowled: f64,
    #[serde(deserialize_with = "deser_with_null_to_default")]
    pub maidens: u32,
    pub is_out: bool,
    #[serde(deserialize_with = "deser_blank_as_none")]
    pub dismissal_type: Option<String>,
    #[serde(deserialize_with = "deser_blank_as_none")]
    pub bowler_name: Option<String>,
}

impl PlayerStats {
    pub fn has_batted(&self) -> bool {
        self.runs > 0 || self.balls_faced > 0 || self.is_out
    }

    pub fn has_bowled(&self) -> bool {
        self.overs_bowled > 0.0
            || self.runs_conceded > 0
            || self.wickets_taken > 0
            || self.maidens > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Over {
    #[serde(default = "first_over")]
    pub over_number: u32,
    #[serde(default)]
    pub balls: Vec<Ball>,
}

fn first_over() -> u32 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ball {
    pub runs: u32,
    pub is_wicket: bool,
    #[serde(deserialize_with = "deser_variant_or_none")]
    pub extra_type: Option<ExtraType>,
    pub extra_runs: u32,
}

impl Ball {
    pub fn total_runs(&self) -> u32 {
        self.runs + self.extra_runs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraType {
    Wide,
    NoBall,
    Bye,
    LegBye,
}

impl core::fmt::Display for ExtraType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::Wide => write!(f, "wide"),
            Self::NoBall => write!(f, "no_ball"),
            Self::Bye => write!(f, "bye"),
            Self::LegBye => write!(f, "leg_bye"),
        }
    }
}

#[derive(Derivative, Serialize, Deserialize)]
#[derivative(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum WicketType {
    #[derivative(Default)]
    Bowled,
    Caught,
    Lbw,
    RunOut,
    Stumped,
    HitWicket,
}

impl core::fmt::Display for WicketType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::Bowled => write!(f, "bowled"),
            Self::Caught => write!(f, "caught"),
            Self::Lbw => write!(f, "lbw"),
            Self::RunOut => write!(f, "run_out"),
            Self::Stumped => write!(f, "stumped"),
            Self::HitWicket => write!(f, "hit_wicket"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TossDecision {
    Bat,
    Bowl,
}

impl core::fmt::Display for TossDecision {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::Bat => write!(f, "bat"),
            Self::Bowl => write!(f, "bowl"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallOfWicket {
    pub player: String,
    #[serde(default)]
    pub runs: u32,
    #[serde(default, deserialize_with = "deser_string_or_number")]
    pub over: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum MatchPhase {
    NotStarted,
    FirstInnings,
    InningsBreak,
    SecondInnings,
    Finished,
}

impl core::fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::NotStarted => write!(f, "Not Started"),
            Self::FirstInnings => write!(f, "First Innings"),
            Self::InningsBreak => write!(f, "Innings Break"),
            Self::SecondInnings => write!(f, "Second Innings"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

// Deserialize normally, but use the value's default if `null` is found
fn deser_with_null_to_default<'de, D, T: Deserialize<'de> + Default>(
    deserializer: D,
) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(|val| val.unwrap_or_default())
}

// Blank strings are sent for names that haven't been chosen yet
fn deser_blank_as_none<'de, D, T: Deserialize<'de>>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
{
    deser_optional_string(deserializer, false)
}

fn deser_variant_or_none<'de, D, T: Deserialize<'de>>(
    deserializer: D,
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
{
    deser_optional_string(deserializer, true)
}

fn deser_optional_string<'de, D, T: Deserialize<'de>>(
    deserializer: D,
    none_literal: bool,
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() || (none_literal && trimmed.eq_ignore_ascii_case("none")) {
        return Ok(None);
    }
    let value = if none_literal { trimmed.to_string() } else { raw };
    let de: StringDeserializer<D::Error> = value.into_deserializer();
    T::deserialize(de).map(Some)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

fn deser_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<StringOrNumber>::deserialize(deserializer)? {
            Some(StringOrNumber::String(s)) => s,
            Some(StringOrNumber::Number(n)) => n.to_string(),
            None => String::new(),
        },
    )
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExtrasRepr {
    Breakdown(Extras),
    Total(#[allow(dead_code)] serde_json::Number),
}

// The scoring service may send a bare total, which has no breakdown to show
fn deser_extras<'de, D>(deserializer: D) -> Result<Extras, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ExtrasRepr>::deserialize(deserializer)? {
        Some(ExtrasRepr::Breakdown(extras)) => extras,
        Some(ExtrasRepr::Total(_)) | None => Extras::default(),
    })
}
