use std::ops::Range;

use crate::matcher::model::*;
use crate::model::Distribution;
use crate::parser::ParseError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The token ranges claimed by each positional descriptor.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Distributed {
    /// One range per descriptor, in the order the descriptors were given.
    pub claims: Vec<Range<usize>>,
    /// The length of the prefix consumed from the available tokens.
    pub consumed: usize,
}

/// Assign the leading `available` tokens to the positional descriptors, in order.
pub(crate) fn distribute(
    available: usize,
    configs: &[&DescriptorConfig],
    distribution: Distribution,
) -> Result<Distributed, ParseError> {
    let mut claims = Vec::with_capacity(configs.len());
    let mut head = 0;
    let mut consumed = 0;

    for config in configs {
        let start = match distribution {
            Distribution::Sequential => head,
            Distribution::Overlapping => 0,
        };
        let remaining = available - start;

        let take = match config.arity() {
            Arity::Unbounded => {
                if config.required() && remaining == 0 {
                    return Err(ParseError::MissingRequiredPositional(
                        config.name().to_string(),
                    ));
                }

                remaining
            }
            arity => {
                let expected = match arity {
                    Arity::Exactly(n) => n,
                    _ => 1,
                };

                if config.required() && remaining < expected {
                    return Err(if remaining == 0 {
                        ParseError::MissingRequiredPositional(config.name().to_string())
                    } else {
                        ParseError::InsufficientPositionalArguments {
                            name: config.name().to_string(),
                            expected,
                            provided: remaining,
                        }
                    });
                }

                std::cmp::min(expected, remaining)
            }
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Positional '{name}' claims tokens {start}..{end}.",
                name = config.name(),
                end = start + take
            );
        }

        claims.push(start..start + take);
        head = start + take;
        consumed = std::cmp::max(consumed, head);
    }

    Ok(Distributed { claims, consumed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn positional(name: &str, required: bool, arity: Arity) -> DescriptorConfig {
        DescriptorConfig::new(name, None, required, arity)
    }

    #[test]
    fn distribute_nothing() {
        let result = distribute(3, &[], Distribution::Sequential).unwrap();
        assert_eq!(
            result,
            Distributed {
                claims: vec![],
                consumed: 0,
            }
        );
    }

    #[rstest]
    #[case(Distribution::Sequential)]
    #[case(Distribution::Overlapping)]
    fn distribute_unbounded(#[case] distribution: Distribution) {
        let rest = positional("rest", false, Arity::Unbounded);

        let result = distribute(3, &[&rest], distribution).unwrap();

        assert_eq!(
            result,
            Distributed {
                claims: vec![0..3],
                consumed: 3,
            }
        );
    }

    #[rstest]
    #[case(Distribution::Sequential, vec![0..1, 1..3, 3..5], 5)]
    #[case(Distribution::Overlapping, vec![0..1, 0..2, 0..5], 5)]
    fn distribute_chain(
        #[case] distribution: Distribution,
        #[case] claims: Vec<Range<usize>>,
        #[case] consumed: usize,
    ) {
        let a = positional("a", false, Arity::Exactly(1));
        let b = positional("b", false, Arity::Exactly(2));
        let c = positional("c", false, Arity::Unbounded);

        let result = distribute(5, &[&a, &b, &c], distribution).unwrap();

        assert_eq!(result, Distributed { claims, consumed });
    }

    #[rstest]
    #[case(Distribution::Sequential, vec![0..1, 1..3], 3)]
    #[case(Distribution::Overlapping, vec![0..1, 0..2], 2)]
    fn distribute_widest_claim(
        #[case] distribution: Distribution,
        #[case] claims: Vec<Range<usize>>,
        #[case] consumed: usize,
    ) {
        let a = positional("a", false, Arity::Exactly(1));
        let b = positional("b", false, Arity::Exactly(2));

        let result = distribute(4, &[&a, &b], distribution).unwrap();

        assert_eq!(result, Distributed { claims, consumed });
    }

    #[test]
    fn distribute_partial_optional() {
        let a = positional("a", false, Arity::Exactly(3));
        let b = positional("b", false, Arity::Exactly(1));

        let result = distribute(2, &[&a, &b], Distribution::Sequential).unwrap();

        assert_eq!(
            result,
            Distributed {
                claims: vec![0..2, 2..2],
                consumed: 2,
            }
        );
    }

    #[rstest]
    #[case(Arity::Exactly(1))]
    #[case(Arity::Exactly(2))]
    #[case(Arity::Unbounded)]
    fn distribute_missing_required(#[case] arity: Arity) {
        let a = positional("a", true, arity);
        let result = distribute(0, &[&a], Distribution::Sequential);
        assert_matches!(result, Err(ParseError::MissingRequiredPositional(name)) if name == "a");
    }

    #[test]
    fn distribute_insufficient_required() {
        let a = positional("a", true, Arity::Exactly(3));

        let result = distribute(2, &[&a], Distribution::Sequential);

        assert_matches!(
            result,
            Err(ParseError::InsufficientPositionalArguments { name, expected: 3, provided: 2 }) if name == "a"
        );
    }

    #[test]
    fn distribute_required_after_exhausted() {
        let a = positional("a", false, Arity::Unbounded);
        let b = positional("b", true, Arity::Exactly(1));

        let result = distribute(2, &[&a, &b], Distribution::Sequential);
        assert_matches!(result, Err(ParseError::MissingRequiredPositional(name)) if name == "b");

        // Overlapping descriptors all read from the head, so b is satisfied.
        let result = distribute(2, &[&a, &b], Distribution::Overlapping).unwrap();
        assert_eq!(result.claims, vec![0..2, 0..1]);
        assert_eq!(result.consumed, 2);
    }
}
