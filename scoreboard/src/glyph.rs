use cricket_common::{
    config::Display as DisplayConfig,
    match_snapshot::{Ball, ExtraType, MatchSnapshot},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Highlight {
    Four,
    Six,
    Wicket,
    Extra,
}

impl Highlight {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Four => "four",
            Self::Six => "six",
            Self::Wicket => "wicket",
            Self::Extra => "extra",
        }
    }
}

impl core::fmt::Display for Highlight {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.class_name())
    }
}

fn extra_abbreviation(extra: ExtraType) -> &'static str {
    match extra {
        ExtraType::Wide => "wd",
        ExtraType::NoBall => "nb",
        ExtraType::Bye => "b",
        ExtraType::LegBye => "lb",
    }
}

/// A single ball as it appears in the ball history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallGlyph {
    pub text: String,
    pub highlight: Option<Highlight>,
}

impl BallGlyph {
    pub fn for_ball(ball: &Ball) -> Self {
        if ball.is_wicket {
            return Self {
                text: String::from("W"),
                highlight: Some(Highlight::Wicket),
            };
        }

        if let Some(extra) = ball.extra_type {
            let total = ball.total_runs();
            // A wide or no ball is worth one run on its own, byes and leg byes nothing
            let show_total = match extra {
                ExtraType::Wide | ExtraType::NoBall => total > 1,
                ExtraType::Bye | ExtraType::LegBye => total > 0,
            };
            let abbreviation = extra_abbreviation(extra);
            let text = if show_total {
                format!("{total}{abbreviation}")
            } else {
                abbreviation.to_string()
            };
            return Self {
                text,
                highlight: Some(Highlight::Extra),
            };
        }

        let highlight = match ball.runs {
            4 => Some(Highlight::Four),
            6 => Some(Highlight::Six),
            _ => None,
        };
        Self {
            text: ball.runs.to_string(),
            highlight,
        }
    }
}

/// The most recent balls of the match, regardless of which over they belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallStrip {
    pub label: String,
    pub glyphs: Vec<BallGlyph>,
    pub total_runs: u32,
}

/// Over-shaped views of the recent balls, each rendered as space separated glyph texts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyOvers {
    pub this_over: String,
    pub current: String,
    pub previous: String,
}

fn recent_balls<'a>(snapshot: &'a MatchSnapshot, config: &DisplayConfig) -> Vec<(u32, &'a Ball)> {
    let all: Vec<_> = snapshot.balls().collect();
    let start = all.len().saturating_sub(config.recent_balls);
    all[start..].to_vec()
}

fn join_texts<'a>(balls: impl Iterator<Item = &'a Ball>) -> String {
    balls
        .map(|ball| BallGlyph::for_ball(ball).text)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn ball_strip(snapshot: &MatchSnapshot, config: &DisplayConfig) -> Option<BallStrip> {
    let recent = recent_balls(snapshot, config);
    if recent.is_empty() {
        return None;
    }

    Some(BallStrip {
        label: format!("LAST {} BALLS:", recent.len()),
        glyphs: recent
            .iter()
            .map(|(_, ball)| BallGlyph::for_ball(ball))
            .collect(),
        total_runs: recent.iter().map(|(_, ball)| ball.total_runs()).sum(),
    })
}

pub fn legacy_overs(snapshot: &MatchSnapshot, config: &DisplayConfig) -> LegacyOvers {
    let recent = recent_balls(snapshot, config);
    let current_over = snapshot.current_over.max(1);
    let over_len = config.over_len;

    let this_over = join_texts(
        recent
            .iter()
            .filter(|(over, _)| *over == current_over)
            .map(|(_, ball)| *ball),
    );

    let current_start = recent.len().saturating_sub(over_len);
    let current = join_texts(recent[current_start..].iter().map(|(_, ball)| *ball));

    let previous = if recent.len() > over_len {
        let previous_start = recent.len().saturating_sub(over_len * 2);
        join_texts(
            recent[previous_start..current_start]
                .iter()
                .map(|(_, ball)| *ball),
        )
    } else {
        String::new()
    };

    LegacyOvers {
        this_over,
        current,
        previous,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cricket_common::match_snapshot::Over;

    fn ball(runs: u32, extra_type: Option<ExtraType>, extra_runs: u32) -> Ball {
        Ball {
            runs,
            is_wicket: false,
            extra_type,
            extra_runs,
        }
    }

    fn text(ball: &Ball) -> String {
        BallGlyph::for_ball(ball).text
    }

    #[test]
    fn test_plain_runs() {
        assert_eq!(BallGlyph::for_ball(&ball(0, None, 0)).text, "0");
        assert_eq!(BallGlyph::for_ball(&ball(0, None, 0)).highlight, None);
        assert_eq!(
            BallGlyph::for_ball(&ball(4, None, 0)).highlight,
            Some(Highlight::Four)
        );
        assert_eq!(
            BallGlyph::for_ball(&ball(6, None, 0)).highlight,
            Some(Highlight::Six)
        );
        assert_eq!(text(&ball(3, None, 0)), "3");
    }

    #[test]
    fn test_wicket() {
        let wicket = Ball {
            runs: 4,
            is_wicket: true,
            extra_type: Some(ExtraType::NoBall),
            extra_runs: 1,
        };
        assert_eq!(
            BallGlyph::for_ball(&wicket),
            BallGlyph {
                text: String::from("W"),
                highlight: Some(Highlight::Wicket),
            }
        );
    }

    #[test]
    fn test_extras() {
        assert_eq!(text(&ball(2, Some(ExtraType::Wide), 0)), "2wd");
        assert_eq!(text(&ball(0, Some(ExtraType::Wide), 1)), "wd");
        assert_eq!(text(&ball(0, Some(ExtraType::Wide), 0)), "wd");
        assert_eq!(text(&ball(0, Some(ExtraType::NoBall), 1)), "nb");
        assert_eq!(text(&ball(4, Some(ExtraType::NoBall), 1)), "5nb");
        assert_eq!(text(&ball(0, Some(ExtraType::Bye), 0)), "b");
        assert_eq!(text(&ball(0, Some(ExtraType::Bye), 1)), "1b");
        assert_eq!(text(&ball(0, Some(ExtraType::LegBye), 4)), "4lb");
        assert_eq!(text(&ball(0, Some(ExtraType::LegBye), 0)), "lb");
        assert_eq!(
            BallGlyph::for_ball(&ball(4, Some(ExtraType::Bye), 0)).highlight,
            Some(Highlight::Extra)
        );
    }

    #[test]
    fn test_highlight_names() {
        assert_eq!(Highlight::Four.to_string(), "four");
        assert_eq!(Highlight::Six.class_name(), "six");
        assert_eq!(Highlight::Wicket.class_name(), "wicket");
        assert_eq!(
            serde_json::to_string(&Highlight::Extra).unwrap(),
            r#""extra""#
        );
    }

    fn snapshot_with_overs(overs: &[(u32, u32)], current_over: u32) -> MatchSnapshot {
        MatchSnapshot {
            overs: overs
                .iter()
                .map(|&(over_number, count)| Over {
                    over_number,
                    balls: (0..count).map(|r| ball(r % 7, None, 0)).collect(),
                })
                .collect(),
            current_over,
            ..Default::default()
        }
    }

    #[test]
    fn test_ball_strip_empty() {
        let snapshot = MatchSnapshot::default();
        assert_eq!(ball_strip(&snapshot, &DisplayConfig::default()), None);
        assert_eq!(
            legacy_overs(&snapshot, &DisplayConfig::default()),
            LegacyOvers::default()
        );
    }

    #[test]
    fn test_ball_strip_spans_overs() {
        let snapshot = snapshot_with_overs(&[(1, 6), (2, 6), (3, 2)], 3);
        let strip = ball_strip(&snapshot, &DisplayConfig::default()).unwrap();
        assert_eq!(strip.label, "LAST 12 BALLS:");
        assert_eq!(strip.glyphs.len(), 12);
        // Last 12 of 14 balls: over 1 balls 2..6, over 2, over 3
        let texts: Vec<_> = strip.glyphs.iter().map(|g| g.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["2", "3", "4", "5", "0", "1", "2", "3", "4", "5", "0", "1"]
        );
        assert_eq!(strip.total_runs, 30);
    }

    #[test]
    fn test_ball_strip_short() {
        let snapshot = MatchSnapshot {
            overs: vec![Over {
                over_number: 1,
                balls: vec![ball(1, None, 0), ball(0, Some(ExtraType::Wide), 1)],
            }],
            current_over: 1,
            ..Default::default()
        };
        let strip = ball_strip(&snapshot, &DisplayConfig::default()).unwrap();
        assert_eq!(strip.label, "LAST 2 BALLS:");
        assert_eq!(strip.total_runs, 2);
    }

    #[test]
    fn test_legacy_overs() {
        let snapshot = snapshot_with_overs(&[(1, 6), (2, 6), (3, 2)], 3);
        let legacy = legacy_overs(&snapshot, &DisplayConfig::default());
        assert_eq!(legacy.this_over, "0 1");
        assert_eq!(legacy.current, "2 3 4 5 0 1");
        assert_eq!(legacy.previous, "2 3 4 5 0 1");

        let snapshot = snapshot_with_overs(&[(1, 6), (2, 3)], 2);
        let legacy = legacy_overs(&snapshot, &DisplayConfig::default());
        assert_eq!(legacy.this_over, "0 1 2");
        assert_eq!(legacy.current, "3 4 5 0 1 2");
        assert_eq!(legacy.previous, "0 1 2");

        let snapshot = snapshot_with_overs(&[(1, 4)], 0);
        let legacy = legacy_overs(&snapshot, &DisplayConfig::default());
        assert_eq!(legacy.this_over, "0 1 2 3");
        assert_eq!(legacy.current, "0 1 2 3");
        assert_eq!(legacy.previous, "");    }

    #[test]
    fn test_legacy_this_over_unnumbered() {
        for current_over in [0, 1] {
            let snapshot = snapshot_with_overs(&[(0, 3)], current_over);
            let legacy = legacy_overs(&snapshot, &DisplayConfig::default());
            assert_eq!(legacy.this_over, "0 1 2");
        }

        let snapshot = snapshot_with_overs(&[(0, 3)], 2);
        assert_eq!(
            legacy_overs(&snapshot, &DisplayConfig::default()).this_over,
            ""
        );
    }
}
