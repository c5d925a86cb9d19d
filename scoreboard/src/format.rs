//! Number and overs formatting shared by every widget.

/// Formats `value` with exactly two decimals.
///
/// Values exactly half way between two hundredths round away from zero, so `1.125` becomes
/// `"1.13"`. Everything else rounds to the nearest hundredth of the exact binary value.
pub fn fixed2(value: f64) -> String {
    if !value.is_finite() {
        return String::from("0.00");
    }

    let magnitude = value.abs();
    let halves = (magnitude * 200.0).round();
    let is_tie = halves % 2.0 == 1.0 && magnitude.mul_add(200.0, -halves) == 0.0;

    let body = if is_tie {
        let cents = (halves as u64).div_ceil(2);
        format!("{}.{:02}", cents / 100, cents % 100)
    } else {
        format!("{magnitude:.2}")
    };

    if value < 0.0 { format!("-{body}") } else { body }
}

/// Shortest decimal that reads back as `value`: `2` for 2.0, `1.5` for 1.5
pub fn shortest_number(value: f64) -> String {
    if value == 0.0 {
        String::from("0")
    } else {
        format!("{value}")
    }
}

/// Overs shown on the main team line. Reads `"0.0"` whenever either counter is zero.
pub fn overs_display(current_over: u32, current_ball: u32) -> String {
    if current_over == 0 || current_ball == 0 {
        String::from("0.0")
    } else {
        format!("{}.{}", current_over - 1, current_ball)
    }
}

/// Overs shown on the secondary panel and scorecard headers: completed overs and the balls of
/// the over in progress.
pub fn completed_overs_display(current_over: u32, current_ball: u32) -> String {
    format!("{}.{}", current_over.saturating_sub(1), current_ball)
}

pub fn run_rate(runs: u32, balls_bowled: i64) -> String {
    if balls_bowled > 0 {
        let overs = balls_bowled as f64 / 6.0;
        fixed2(f64::from(runs) / overs)
    } else {
        String::from("0.00")
    }
}

pub fn strike_rate(runs: u32, balls_faced: u32) -> String {
    if balls_faced > 0 {
        fixed2((f64::from(runs) / f64::from(balls_faced)) * 100.0)
    } else {
        String::from("0.00")
    }
}

pub fn economy(runs_conceded: u32, overs: f64) -> String {
    if overs > 0.0 {
        fixed2(f64::from(runs_conceded) / overs)
    } else {
        String::from("0.00")
    }
}

pub fn required_rate(runs_needed: i64, balls_remaining: i64) -> String {
    if balls_remaining > 0 {
        fixed2((runs_needed as f64 / balls_remaining as f64) * 6.0)
    } else {
        String::from("0.00")
    }
}

pub fn innings_ordinal(innings: u8) -> &'static str {
    if innings == 1 { "1st" } else { "2nd" }
}
