//! Line-based input scripts replayed by the headless adapter.
//!
//! Every `tick` line closes a frame: the inputs listed since the previous tick
//! are applied first, then time advances once. Inputs left after the last tick
//! form a final frame that advances no time.

use std::time::Duration;

use pantry_maze_core::{Direction, RegionId};
use thiserror::Error;

/// Player input applied before a frame's tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    /// Movement key pressed.
    Move(Direction),
    /// Player started overlapping a region.
    Enter(RegionId),
    /// Player stopped overlapping a region.
    Exit(RegionId),
}

/// Inputs followed by a single tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) inputs: Vec<Input>,
    pub(crate) dt: Duration,
}

/// Problems found while reading a script, with one-based line numbers.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// The first word is not a known action.
    #[error("line {line}: unknown action '{action}'")]
    UnknownAction { line: usize, action: String },
    /// The action needs an argument.
    #[error("line {line}: '{action}' expects an argument")]
    MissingArgument { line: usize, action: &'static str },
    /// The line carries more words than the action accepts.
    #[error("line {line}: unexpected '{extra}'")]
    TrailingInput { line: usize, extra: String },
    /// The tick length is not a finite, non-negative number of seconds.
    #[error("line {line}: invalid tick length '{value}'")]
    InvalidDuration { line: usize, value: String },
    /// The direction is not one of north, east, south or west.
    #[error("line {line}: invalid direction '{value}'")]
    InvalidDirection { line: usize, value: String },
    /// The region is not a number.
    #[error("line {line}: invalid region '{value}'")]
    InvalidRegion { line: usize, value: String },
}

/// Parses a script into frames.
pub(crate) fn parse(source: &str) -> Result<Vec<Frame>, ScriptError> {
    let mut frames = Vec::new();
    let mut current = Frame::default();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.split('#').next().unwrap_or_default().trim();
        let mut words = text.split_whitespace();
        let Some(action) = words.next() else {
            continue;
        };

        match action {
            "tick" => {
                let value = argument(&mut words, line, "tick")?;
                current.dt = parse_duration(value, line)?;
                frames.push(std::mem::take(&mut current));
            }
            "move" => {
                let value = argument(&mut words, line, "move")?;
                current.inputs.push(Input::Move(parse_direction(value, line)?));
            }
            "enter" => {
                let value = argument(&mut words, line, "enter")?;
                current.inputs.push(Input::Enter(parse_region(value, line)?));
            }
            "exit" => {
                let value = argument(&mut words, line, "exit")?;
                current.inputs.push(Input::Exit(parse_region(value, line)?));
            }
            other => {
                return Err(ScriptError::UnknownAction {
                    line,
                    action: other.to_owned(),
                });
            }
        }

        if let Some(extra) = words.next() {
            return Err(ScriptError::TrailingInput {
                line,
                extra: extra.to_owned(),
            });
        }
    }

    if !current.inputs.is_empty() {
        frames.push(current);
    }
    Ok(frames)
}

fn argument<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    line: usize,
    action: &'static str,
) -> Result<&'a str, ScriptError> {
    words
        .next()
        .ok_or(ScriptError::MissingArgument { line, action })
}

fn parse_duration(value: &str, line: usize) -> Result<Duration, ScriptError> {
    value
        .parse::<f32>()
        .ok()
        .and_then(|seconds| Duration::try_from_secs_f32(seconds).ok())
        .ok_or_else(|| ScriptError::InvalidDuration {
            line,
            value: value.to_owned(),
        })
}

fn parse_direction(value: &str, line: usize) -> Result<Direction, ScriptError> {
    match value.to_ascii_lowercase().as_str() {
        "north" | "n" => Ok(Direction::North),
        "east" | "e" => Ok(Direction::East),
        "south" | "s" => Ok(Direction::South),
        "west" | "w" => Ok(Direction::West),
        _ => Err(ScriptError::InvalidDirection {
            line,
            value: value.to_owned(),
        }),
    }
}

fn parse_region(value: &str, line: usize) -> Result<RegionId, ScriptError> {
    value
        .parse::<u32>()
        .map(RegionId::new)
        .map_err(|_| ScriptError::InvalidRegion {
            line,
            value: value.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_close_frames() {
        let frames = parse(
            "# warm up\n\
             move east\n\
             enter 3   # chili\n\
             tick 0.5\n\
             \n\
             tick 1\n\
             exit 3\n",
        )
        .expect("script parses");

        assert_eq!(
            frames,
            vec![
                Frame {
                    inputs: vec![
                        Input::Move(Direction::East),
                        Input::Enter(RegionId::new(3)),
                    ],
                    dt: Duration::from_millis(500),
                },
                Frame {
                    inputs: Vec::new(),
                    dt: Duration::from_secs(1),
                },
                Frame {
                    inputs: vec![Input::Exit(RegionId::new(3))],
                    dt: Duration::ZERO,
                },
            ]
        );
    }

    #[test]
    fn errors_report_the_offending_line() {
        assert_eq!(
            parse("tick 1\njump 2"),
            Err(ScriptError::UnknownAction {
                line: 2,
                action: "jump".to_owned(),
            })
        );
        assert_eq!(
            parse("move"),
            Err(ScriptError::MissingArgument {
                line: 1,
                action: "move",
            })
        );
        assert_eq!(
            parse("tick -1"),
            Err(ScriptError::InvalidDuration {
                line: 1,
                value: "-1".to_owned(),
            })
        );
        assert_eq!(
            parse("move up"),
            Err(ScriptError::InvalidDirection {
                line: 1,
                value: "up".to_owned(),
            })
        );
        assert_eq!(
            parse("enter chili"),
            Err(ScriptError::InvalidRegion {
                line: 1,
                value: "chili".to_owned(),
            })
        );
        assert_eq!(
            parse("exit 1 2"),
            Err(ScriptError::TrailingInput {
                line: 1,
                extra: "2".to_owned(),
            })
        );
    }
}
