use cricket_common::match_snapshot::MatchSnapshot;
use crossbeam_channel::Sender;
use log::{error, info, warn};
use scoreboard::Signal;
use serde_json::Value;
use std::{
    fs::File,
    io::{BufRead, BufReader, stdin},
    path::PathBuf,
};

/// Reads one signal per line. A bare JSON object without a `signal` tag is taken to be a match
/// snapshot.
pub fn parse_line(line: &str) -> Option<Signal> {
    let value: Value = serde_json::from_str(line).ok()?;
    if value.get("signal").is_some() {
        serde_json::from_value(value).ok()
    } else if value.is_object() {
        serde_json::from_value::<MatchSnapshot>(value)
            .ok()
            .map(|snapshot| Signal::SnapshotReceived(Box::new(snapshot)))
    } else {
        None
    }
}

/// Feeds signals from `source` (stdin if `None`) to the display. Opening the source counts as
/// connecting, reaching its end as disconnecting.
pub fn reading_thread(tx: Sender<Signal>, source: Option<PathBuf>) {
    let reader: Box<dyn BufRead> = match &source {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                error!("Failed to open input {}: {e}", path.display());
                return;
            }
        },
        None => Box::new(BufReader::new(stdin())),
    };
    info!("Input opened, reading signals");

    if tx.send(Signal::ConnectionChanged(true)).is_err() {
        error!("Display could not receive signal!");
        return;
    }

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read input: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line) {
            Some(signal) => {
                if tx.send(signal).is_err() {
                    error!("Display could not receive signal!");
                    return;
                }
            }
            None => warn!("Corrupted signal discarded!"),
        }
    }

    info!("End of input");
    tx.send(Signal::ConnectionChanged(false))
        .unwrap_or_else(|e| error!("Display could not receive disconnect: {e}"));
}

#[cfg(test)]
mod test {
    use super::*;
    use crossbeam_channel::unbounded;
    use indoc::indoc;
    use scoreboard::ActionKind;
    use std::io::Write;

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line(r#"{"signal": "connection_changed", "data": true}"#),
            Some(Signal::ConnectionChanged(true))
        );
        assert_eq!(
            parse_line(r#"{"signal": "action", "data": {"action": "ball_added"}}"#),
            Some(Signal::Action(ActionKind::BallRecorded))
        );

        let Some(Signal::SnapshotReceived(snapshot)) =
            parse_line(r#"{"team1": {"name": "India"}, "current_over": 4}"#)
        else {
            panic!("expected a snapshot");
        };
        assert_eq!(snapshot.current_over, 4);

        assert_eq!(parse_line(r#"{"signal": "bogus"}"#), None);
        assert_eq!(parse_line("not json"), None);
        assert_eq!(parse_line("[1, 2]"), None);
        assert_eq!(parse_line(r#"{"current_over": "four"}"#), None);
    }

    #[test]
    fn test_reading_thread() {
        let mut path = std::env::temp_dir();
        path.push(format!("scoreboard-input-{}.jsonl", std::process::id()));
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            "{}",
            indoc!(
                r#"
                {"team1": {"name": "India"}, "team2": {"name": "Australia"}, "batting_team": "India"}
                garbage

                {"signal": "action", "data": {"action": "wicket"}}
                "#
            )
        )
        .unwrap();
        drop(file);

        let (tx, rx) = unbounded();
        reading_thread(tx, Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        let signals: Vec<_> = rx.try_iter().collect();
        assert_eq!(signals.len(), 4);
        assert_eq!(signals[0], Signal::ConnectionChanged(true));
        assert!(matches!(signals[1], Signal::SnapshotReceived(_)));
        assert_eq!(signals[2], Signal::Action(ActionKind::WicketTaken));
        assert_eq!(signals[3], Signal::ConnectionChanged(false));
    }

    #[test]
    fn test_missing_input_file() {
        let (tx, rx) = unbounded();
        reading_thread(
            tx,
            Some(PathBuf::from("/definitely/not/a/scoreboard/input.jsonl")),
        );
        assert_eq!(rx.try_iter().count(), 0);
    }
}
