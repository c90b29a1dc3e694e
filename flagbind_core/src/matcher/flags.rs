use crate::constant::ASSIGNMENT;
use crate::matcher::model::*;
use crate::parser::ParseError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The outcome of locating a descriptor in the token sequence.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FlagMatch {
    /// The raw values bound to the descriptor, in input order.
    pub values: Vec<String>,
    /// Every token not consumed by this match, in input order.
    pub remainder: Vec<String>,
}

/// Locate `name` in the tokens, either as the whole token or as `name=value`.
/// Returns the index of the first such token along with the assigned value, if any.
fn locate<'t>(tokens: &'t [String], name: &str) -> Option<(usize, Option<&'t str>)> {
    if name.is_empty() {
        return None;
    }

    tokens.iter().enumerate().find_map(|(index, token)| {
        if token == name {
            Some((index, None))
        } else {
            token
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix(ASSIGNMENT))
                .map(|value| (index, Some(value)))
        }
    })
}

/// Match a named descriptor against the tokens.
///
/// The canonical name is always searched for before the short form, regardless of which appears first.
/// Returns `Ok(None)` when neither form is present; enforcing `required` is left to the caller.
pub(crate) fn match_flag(
    tokens: &[String],
    config: &DescriptorConfig,
) -> Result<Option<FlagMatch>, ParseError> {
    let found = locate(tokens, config.name()).or_else(|| match config.short() {
        Some(short) => locate(tokens, short),
        None => None,
    });

    let (index, assigned) = match found {
        Some(found) => found,
        None => return Ok(None),
    };

    #[cfg(feature = "tracing_debug")]
    {
        debug!(
            "Matched '{name}' at token {index} (assigned: {assigned:?}).",
            name = config.name()
        );
    }

    if assigned == Some("") {
        return Err(ParseError::EmptyAssignedValue(config.name().to_string()));
    }

    let following = &tokens[index + 1..];
    let mut values: Vec<String> = assigned.iter().map(|value| value.to_string()).collect();
    let inline = values.len();

    let consumed = match config.arity() {
        // A switch never reads the following tokens; an assigned value is its only value.
        Arity::Presence => 0,
        Arity::Exactly(n) => {
            let needed = n.saturating_sub(inline);

            if following.len() < needed {
                return Err(ParseError::InsufficientArguments {
                    name: config.name().to_string(),
                    expected: n,
                    provided: inline + following.len(),
                });
            }

            needed
        }
        Arity::Unbounded => following.len(),
    };

    values.extend(following[..consumed].iter().cloned());
    let remainder = tokens[..index]
        .iter()
        .chain(following[consumed..].iter())
        .cloned()
        .collect();

    Ok(Some(FlagMatch { values, remainder }))
}

/// Match a positional descriptor given by keyword, as `label=value`.
///
/// Exactly one value is bound this way, whatever the declared arity.
pub(crate) fn match_assignment(
    tokens: &[String],
    config: &DescriptorConfig,
) -> Result<Option<FlagMatch>, ParseError> {
    let (index, value) = match locate(tokens, config.name()) {
        Some((index, Some(value))) => (index, value),
        // A bare label is an ordinary positional token.
        Some((_, None)) | None => return Ok(None),
    };

    if value.is_empty() {
        return Err(ParseError::EmptyAssignedValue(config.name().to_string()));
    }

    #[cfg(feature = "tracing_debug")]
    {
        debug!(
            "Assigned '{name}' by keyword at token {index}.",
            name = config.name()
        );
    }

    Ok(Some(FlagMatch {
        values: vec![value.to_string()],
        remainder: tokens[..index]
            .iter()
            .chain(tokens[index + 1..].iter())
            .cloned()
            .collect(),
    }))
}
