use std::time::Duration;

use itinerary::{DayNumber, PoiKind};
use thiserror::Error;

/// A click or selection coming from the viewer's UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserEvent {
    /// Sidebar list selection; `None` clears it.
    SelectDay(Option<DayNumber>),
    /// Day card click: selects, or deselects when already selected.
    ToggleDay(DayNumber),
    ToggleRoute,
    TogglePoi { day: DayNumber, kind: PoiKind },
    /// Marker click on the active POI layer (0-based); `None` closes the popup.
    SelectPlace(Option<usize>),
}

/// One line of a driver script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Event(UserEvent),
    Wait(Duration),
    /// The map widget finishes loading.
    LoadMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: `{command}` expects {expected}")]
    BadArguments {
        line: usize,
        command: &'static str,
        expected: &'static str,
    },
}

/// Parses a whole script. Blank lines and `#` comments are skipped; line
/// numbers in errors are 1-based.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        if let Some(step) = parse_line(idx + 1, raw)? {
            steps.push(step);
        }
    }
    Ok(steps)
}

pub fn parse_line(line: usize, raw: &str) -> Result<Option<ScriptStep>, ScriptError> {
    let content = raw.split('#').next().unwrap_or_default().trim();
    let mut words = content.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let step = match command {
        "day" => {
            let day = match args.as_slice() {
                ["none"] => None,
                [n] => Some(parse_arg(line, "day", "a day number or `none`", n)?),
                _ => return Err(bad(line, "day", "a day number or `none`")),
            };
            ScriptStep::Event(UserEvent::SelectDay(day))
        }
        "card" => match args.as_slice() {
            [n] => ScriptStep::Event(UserEvent::ToggleDay(parse_arg(line, "card", "a day number", n)?)),
            _ => return Err(bad(line, "card", "a day number")),
        },
        "route" => {
            if !args.is_empty() {
                return Err(bad(line, "route", "no arguments"));
            }
            ScriptStep::Event(UserEvent::ToggleRoute)
        }
        "poi" => match args.as_slice() {
            [n, kind] => {
                const EXPECTED: &str = "a day number and `hotel` or `restaurant`";
                let day = parse_arg(line, "poi", EXPECTED, n)?;
                let kind = parse_arg(line, "poi", EXPECTED, kind)?;
                ScriptStep::Event(UserEvent::TogglePoi { day, kind })
            }
            _ => return Err(bad(line, "poi", "a day number and `hotel` or `restaurant`")),
        },
        "place" => {
            let index = match args.as_slice() {
                ["none"] => None,
                [i] => Some(parse_arg(line, "place", "a marker index or `none`", i)?),
                _ => return Err(bad(line, "place", "a marker index or `none`")),
            };
            ScriptStep::Event(UserEvent::SelectPlace(index))
        }
        "wait" => match args.as_slice() {
            [ms] => ScriptStep::Wait(Duration::from_millis(parse_arg(
                line,
                "wait",
                "a duration in milliseconds",
                ms,
            )?)),
            _ => return Err(bad(line, "wait", "a duration in milliseconds")),
        },
        "load-map" => {
            if !args.is_empty() {
                return Err(bad(line, "load-map", "no arguments"));
            }
            ScriptStep::LoadMap
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            });
        }
    };
    Ok(Some(step))
}

fn parse_arg<T: std::str::FromStr>(
    line: usize,
    command: &'static str,
    expected: &'static str,
    value: &str,
) -> Result<T, ScriptError> {
    value.parse().map_err(|_| bad(line, command, expected))
}

fn bad(line: usize, command: &'static str, expected: &'static str) -> ScriptError {
    ScriptError::BadArguments {
        line,
        command,
        expected,
    }
}
