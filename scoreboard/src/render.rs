use scoreboard::{
    ViewModel,
    scorecard::{InningsCard, Scorecard},
};
use std::fmt::Write;

pub fn render_json(view: &ViewModel) -> serde_json::Result<String> {
    serde_json::to_string(view)
}

/// Plain text rendition of the display, one widget per line
pub fn render_text(view: &ViewModel, connection: &str, with_scorecard: bool) -> String {
    let mut text = String::new();
    write_view(&mut text, view, connection, with_scorecard)
        .expect("Writing to a String cannot fail");
    text
}

fn write_view(
    out: &mut String,
    view: &ViewModel,
    connection: &str,
    with_scorecard: bool,
) -> std::fmt::Result {
    let batting = &view.batting_team;
    let bowling = &view.bowling_team;

    writeln!(out, "[{connection}] {}", view.status)?;
    write!(
        out,
        "{}{} {}/{} ({})  vs  {}{} {}",
        flag(&batting.flag),
        batting.name,
        batting.runs,
        batting.wickets,
        batting.overs,
        flag(&bowling.flag),
        bowling.name,
        bowling.score
    )?;
    if let Some(overs) = &bowling.overs {
        write!(out, " ({overs})")?;
    }
    writeln!(out)?;

    write!(
        out,
        "CRR {} | P'ship {} | {}",
        view.run_rate,
        view.partnership,
        view.target.text()
    )?;
    if let Some(chase) = view.target.chase() {
        write!(out, " | RRR {} ({})", chase.required_rate, chase.tier)?;
    }
    writeln!(out)?;

    for card in [&view.striker, &view.non_striker] {
        writeln!(
            out,
            "{:<12} {} {} ({}) 4s {} 6s {} SR {}",
            card.role, card.name, card.runs, card.balls, card.fours, card.sixes, card.strike_rate
        )?;
    }
    writeln!(
        out,
        "{:<12} {} {} {} Econ {}",
        "BOWLER", view.bowler.name, view.bowler.overs, view.bowler.figures, view.bowler.economy
    )?;

    if let Some(strip) = &view.recent_balls {
        let balls: Vec<_> = strip.glyphs.iter().map(|g| g.text.as_str()).collect();
        writeln!(out, "{} {} ={}", strip.label, balls.join(" "), strip.total_runs)?;
    }
    if !view.legacy_overs.this_over.is_empty() {
        writeln!(out, "This over: {}", view.legacy_overs.this_over)?;
    }

    writeln!(out, "{}", view.stats.join(" | "))?;
    writeln!(out, "{}", view.last_wicket)?;

    if let Some(result) = &view.result {
        writeln!(out, "*** {} ***", result.text)?;
        writeln!(out, "{}", result.team1_score)?;
        writeln!(out, "{}", result.team2_score)?;
    }

    if with_scorecard {
        if let Some(scorecard) = &view.scorecard {
            write_scorecard(out, scorecard)?;
        }
    }
    Ok(())
}

fn flag(flag: &Option<String>) -> &'static str {
    if flag.is_some() { "[flag] " } else { "" }
}

fn write_scorecard(out: &mut String, scorecard: &Scorecard) -> std::fmt::Result {
    write_innings(out, &scorecard.first)?;
    if scorecard.show_second {
        write_innings(out, &scorecard.second)?;
    }
    Ok(())
}

fn write_innings(out: &mut String, card: &InningsCard) -> std::fmt::Result {
    writeln!(out, "-- Innings {}: {} {}", card.number, card.team_name, card.score)?;
    for row in &card.batting {
        writeln!(
            out,
            "  {:<20} {:>4} {:>4} {:>3} {:>3} {:>7}  {}",
            row.name, row.runs, row.balls, row.fours, row.sixes, row.strike_rate, row.dismissal
        )?;
    }
    writeln!(out, "  Extras {}", card.extras.text)?;
    for row in &card.bowling {
        writeln!(
            out,
            "  {:<20} {:>5} {:>3} {:>4} {:>3} {:>6}",
            row.name, row.overs, row.maidens, row.runs, row.wickets, row.economy
        )?;
    }
    Ok(())
}
