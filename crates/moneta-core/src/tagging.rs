use crate::{CoreError, CoreResult};

/// One whitespace-delimited token of classify input: a session command or a
/// tag to apply, optionally with a split amount (`grocery` or `cash:20.00`).
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyToken {
    Quit,
    Save,
    Tag {
        name: String,
        split_amount: Option<f64>,
    },
}

pub fn parse_token(token: &str) -> CoreResult<ClassifyToken> {
    match token.to_lowercase().as_str() {
        "!quit" | "!exit" => return Ok(ClassifyToken::Quit),
        "!save" | "!store" => return Ok(ClassifyToken::Save),
        _ => {}
    }

    let Some((name, raw_amount)) = token.split_once(':') else {
        return Ok(ClassifyToken::Tag {
            name: token.to_string(),
            split_amount: None,
        });
    };

    if name.is_empty() {
        return Err(CoreError::invalid_argument(&format!(
            "`{token}` has no tag name before the `:`."
        )));
    }

    let amount = raw_amount.parse::<f64>().map_err(|_| {
        CoreError::invalid_argument(&format!(
            "`{raw_amount}` is not a split amount for tag `{name}`."
        ))
    })?;

    Ok(ClassifyToken::Tag {
        name: name.to_string(),
        split_amount: Some(amount),
    })
}

/// Parses a whole input line, in order. The first bad token fails the line
/// so nothing half-applies.
pub fn parse_input_line(line: &str) -> CoreResult<Vec<ClassifyToken>> {
    line.split_whitespace().map(parse_token).collect()
}

#[cfg(test)]
mod tests {
    use super::{ClassifyToken, parse_input_line, parse_token};

    #[test]
    fn command_aliases_parse_case_insensitively() {
        for token in ["!quit", "!exit", "!QUIT"] {
            let parsed = parse_token(token);
            assert!(matches!(parsed, Ok(ClassifyToken::Quit)));
        }
        for token in ["!save", "!store", "!Save"] {
            let parsed = parse_token(token);
            assert!(matches!(parsed, Ok(ClassifyToken::Save)));
        }
    }

    #[test]
    fn plain_token_is_an_unsplit_tag() {
        let parsed = parse_token("grocery");
        assert!(parsed.is_ok());
        if let Ok(ClassifyToken::Tag { name, split_amount }) = parsed {
            assert_eq!(name, "grocery");
            assert!(split_amount.is_none());
        } else {
            panic!("expected a tag token");
        }
    }

    #[test]
    fn colon_token_is_a_split_tag() {
        let parsed = parse_token("cash:20.00");
        assert!(parsed.is_ok());
        if let Ok(ClassifyToken::Tag { name, split_amount }) = parsed {
            assert_eq!(name, "cash");
            assert_eq!(split_amount, Some(20.0));
        } else {
            panic!("expected a tag token");
        }
    }

    #[test]
    fn bad_split_amount_is_a_recoverable_error() {
        let parsed = parse_token("cash:lots");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "invalid_argument");
        }
    }

    #[test]
    fn line_parses_tokens_in_order() {
        let parsed = parse_input_line("grocery cash:20.00 !save");
        assert!(parsed.is_ok());
        if let Ok(tokens) = parsed {
            assert_eq!(tokens.len(), 3);
            assert!(matches!(
                &tokens[0],
                ClassifyToken::Tag { name, split_amount: None } if name == "grocery"
            ));
            assert!(matches!(
                &tokens[1],
                ClassifyToken::Tag { name, split_amount: Some(amount) }
                    if name == "cash" && (*amount - 20.0).abs() < f64::EPSILON
            ));
            assert!(matches!(tokens[2], ClassifyToken::Save));
        }
    }

    #[test]
    fn empty_line_parses_to_no_tokens() {
        let parsed = parse_input_line("   ");
        assert!(parsed.is_ok());
        if let Ok(tokens) = parsed {
            assert!(tokens.is_empty());
        }
    }
}
