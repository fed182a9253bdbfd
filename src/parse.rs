/*!
The tokenizer/parser: one pass over a caller-supplied argument list,
validated against a [`Registry`], producing the table of coerced values.

The scan runs off an explicit work queue seeded with the original tokens;
combined short flags expand by pushing their trailing letters onto the tail
of the queue, so nothing ever mutates a collection it is iterating.
*/

use std::collections::{BTreeMap, VecDeque};

use crate::errors::{Halt, ParseError};
use crate::registry::{FlagDef, Registry, dashed};
use crate::value::{Kind, Value};

/**
The coerced values produced by a successful parse: the registry's
pre-seeded defaults overlaid with everything the caller actually supplied.

Flags that were neither supplied nor pre-seeded are simply absent;
[`get`][Values::get] returns `None` for them and for names that were never
registered at all.
*/
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values {
    values: BTreeMap<String, Value>,
}

impl Values {
    /// The value recorded for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// All recorded `(name, value)` pairs, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Registry {
    /**
    Parse an argument list (excluding the program name) against this
    registry.

    A literal `--help` token anywhere short-circuits all other parsing and
    halts for the help renderer; so does `--version` when a version string
    is configured. Malformed input halts with one of the
    [`ParseError`] variants. The library never terminates the process:
    the entry point decides what a [`Halt`] means, usually via
    [`Halt::report`].
    */
    pub fn parse<I>(&self, args: I) -> Result<Values, Halt>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut queue: VecDeque<String> = args.into_iter().map(Into::into).collect();

        if queue.iter().any(|token| token == "--help") {
            return Err(Halt::HelpRequested);
        }
        if self.version().is_some() && queue.iter().any(|token| token == "--version") {
            return Err(Halt::VersionRequested);
        }

        let mut parsed: BTreeMap<String, Value> = BTreeMap::new();
        // A non-boolean flag waiting for its value token. Booleans never
        // wait, so the kind here is always a parseable one.
        let mut pending: Option<(String, Kind)> = None;

        while let Some(token) = queue.pop_front() {
            if token.starts_with('-') {
                let token = self.expand_combined(token, &mut queue)?;
                pending = None;

                let stripped = token.trim_start_matches('-');
                let (key, argument) = match split_once(stripped, b'=') {
                    Some((key, argument)) => (key, Some(argument)),
                    None => (stripped, None),
                };

                let Some(flag) = self.flag(key) else {
                    return Err(ParseError::UnknownOption {
                        token: token.clone(),
                    }
                    .into());
                };

                match argument {
                    Some(raw) => {
                        if flag.is_bool() {
                            return Err(ParseError::InvalidValue {
                                token: flag.dashed(),
                            }
                            .into());
                        }
                        let value = flag.kind().coerce(raw).ok_or_else(|| {
                            ParseError::InvalidValue {
                                token: token.clone(),
                            }
                        })?;
                        parsed.insert(key.to_owned(), value);
                    }
                    None if flag.is_bool() => {
                        parsed.insert(key.to_owned(), Value::Bool(true));
                    }
                    None => pending = Some((key.to_owned(), flag.kind())),
                }
            } else {
                match pending.take() {
                    None => return Err(ParseError::UnknownOption { token }.into()),
                    Some((key, kind)) => {
                        let value = kind
                            .coerce(&token)
                            .ok_or(ParseError::InvalidValue { token })?;
                        parsed.insert(key, value);
                    }
                }
            }
        }

        // Required flags must all have been supplied; report the first
        // missing one in registration order.
        for flag in self.ordered() {
            if flag.is_required() && !parsed.contains_key(flag.name()) {
                return Err(ParseError::MissingRequired {
                    flag: flag.dashed(),
                }
                .into());
            }
        }

        // Defensive: everything recorded must belong to a known flag.
        for key in parsed.keys() {
            if self.flag(key).is_none() {
                return Err(ParseError::UnknownOption { token: dashed(key) }.into());
            }
        }

        let mut values = self.seeds().clone();
        values.extend(parsed);
        Ok(Values { values })
    }

    /// A single-dash token of three or more characters is a run of combined
    /// single-letter boolean flags (`-bc` reads as `-b -c`). Every letter
    /// must resolve to a boolean-defaulted flag. The first letter stays in
    /// this token; the rest go onto the queue tail in left-to-right order.
    fn expand_combined(
        &self,
        token: String,
        queue: &mut VecDeque<String>,
    ) -> Result<String, ParseError> {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() < 3 || chars[1] == '-' {
            return Ok(token);
        }

        let letters = &chars[1..];
        for &letter in letters {
            let known_bool = self
                .flag(&String::from(letter))
                .is_some_and(FlagDef::is_bool);
            if !known_bool {
                return Err(ParseError::UnknownOption { token });
            }
        }

        queue.extend(letters[1..].iter().map(|letter| format!("-{letter}")));
        Ok(format!("-{}", letters[0]))
    }
}

/// Split `input` at the first occurrence of `delimiter`, if any.
fn split_once(input: &str, delimiter: u8) -> Option<(&str, &str)> {
    memchr::memchr(delimiter, input.as_bytes()).map(|i| (&input[..i], &input[i + 1..]))
}
