//! Text scripts of button presses.
//!
//! One whitespace-separated token per tick. A token names a button (`n`,
//! `e`, `s`, `w`, `c` or the long forms `north`, `east`, `south`, `west`,
//! `center`), several buttons joined with `+` for simultaneous presses, or
//! `.` for an idle tick. A token may carry a `*N` suffix to repeat it `N`
//! times. `#` starts a comment running to the end of the line.

use std::path::Path;

use crate::input::{Button, Presses};

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown input token '{token}'")]
    UnknownToken { line: usize, token: String },

    #[error("line {line}: invalid repeat count in '{token}'")]
    BadRepeat { line: usize, token: String },

    #[error("failed to read script {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parse script text into one `Presses` per tick.
pub fn parse_script(text: &str) -> Result<Vec<Presses>, ScriptError> {
    let mut ticks = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default();
        for token in content.split_whitespace() {
            let (body, count) = split_repeat(token, line)?;
            let presses = parse_token(body).ok_or_else(|| ScriptError::UnknownToken {
                line,
                token: token.to_string(),
            })?;
            ticks.extend(std::iter::repeat(presses).take(count));
        }
    }
    Ok(ticks)
}

/// Read and parse a script file.
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<Presses>, ScriptError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let ticks = parse_script(&text)?;
    tracing::debug!(path = %path.display(), ticks = ticks.len(), "script loaded");
    Ok(ticks)
}

fn split_repeat(token: &str, line: usize) -> Result<(&str, usize), ScriptError> {
    match token.split_once('*') {
        None => Ok((token, 1)),
        Some((body, count)) => count
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .map(|n| (body, n))
            .ok_or_else(|| ScriptError::BadRepeat {
                line,
                token: token.to_string(),
            }),
    }
}

fn parse_token(token: &str) -> Option<Presses> {
    if token == "." {
        return Some(Presses::NONE);
    }
    token
        .split('+')
        .map(parse_button)
        .try_fold(Presses::NONE, |acc, button| Some(acc.with(button?)))
}

fn parse_button(name: &str) -> Option<Button> {
    match name.to_ascii_lowercase().as_str() {
        "n" | "north" | "up" => Some(Button::North),
        "e" | "east" | "right" => Some(Button::East),
        "s" | "south" | "down" => Some(Button::South),
        "w" | "west" | "left" => Some(Button::West),
        "c" | "center" | "centre" | "ok" => Some(Button::Center),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_single_buttons() {
        let ticks = parse_script("n e s w c").unwrap();
        assert_eq!(
            ticks,
            vec![
                Button::North.into(),
                Button::East.into(),
                Button::South.into(),
                Button::West.into(),
                Button::Center.into(),
            ]
        );
    }

    #[test]
    fn test_parse_combined_idle_and_comments() {
        let ticks = parse_script("# opening\nEAST+center . # trailing\n\nnorth").unwrap();
        assert_eq!(ticks.len(), 3);
        assert!(ticks[0].contains(Button::East));
        assert!(ticks[0].contains(Button::Center));
        assert!(ticks[1].is_empty());
        assert_eq!(ticks[2], Presses::single(Button::North));
    }

    #[test]
    fn test_parse_repeat() {
        let ticks = parse_script("e*3 c").unwrap();
        assert_eq!(ticks.len(), 4);
        assert!(ticks[..3].iter().all(|p| *p == Presses::single(Button::East)));
    }

    #[test]
    fn test_unknown_token_reports_line() {
        let err = parse_script("n\nn jump").unwrap_err();
        match err {
            ScriptError::UnknownToken { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "jump");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            parse_script("e+x"),
            Err(ScriptError::UnknownToken { line: 1, .. })
        ));
    }

    #[test]
    fn test_bad_repeat() {
        assert!(matches!(
            parse_script("e*0"),
            Err(ScriptError::BadRepeat { line: 1, .. })
        ));
        assert!(matches!(
            parse_script("e*many"),
            Err(ScriptError::BadRepeat { .. })
        ));
    }

    #[test]
    fn test_load_script_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "s s c # pick up a pawn").unwrap();
        let ticks = load_script(file.path()).unwrap();
        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks[2], Presses::single(Button::Center));
    }

    #[test]
    fn test_load_missing_script() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_script(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, ScriptError::Io { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }
}
