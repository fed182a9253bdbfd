/*!
The error taxonomy, and the [`Halt`] outcome that carries it alongside the
two built-in diversions. The exit-code contract for CLI entry points lives
here as [`Halt::report`].
*/

use std::io::{self, Write};
use std::process::ExitCode;

use thiserror::Error;

use crate::help::print_help;
use crate::registry::Registry;

/// A fatal problem with the supplied arguments. Every variant ends the
/// invocation; no partial value table is ever exposed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The token names no registered flag, or a bare value arrived with no
    /// flag awaiting one.
    #[error("No such option '{token}'")]
    UnknownOption { token: String },

    /// A value failed to coerce to the flag's kind, or a boolean flag was
    /// handed an explicit value.
    #[error("Invalid value for {token}")]
    InvalidValue { token: String },

    /// A flag with no default never appeared on the command line.
    #[error("Required argument '{flag}' not found")]
    MissingRequired { flag: String },
}

/**
Why [`parse`][Registry::parse] produced no value table.

`--help` and `--version` are successful diversions rather than errors, but
they share the property that the invocation is over. `Halt` carries all
three outcomes so an entry point can decide termination in one place; the
library itself never exits the process.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// A literal `--help` appeared somewhere in the arguments.
    HelpRequested,

    /// A literal `--version` appeared and versioning is enabled.
    VersionRequested,

    /// The arguments were malformed.
    Error(ParseError),
}

impl From<ParseError> for Halt {
    fn from(error: ParseError) -> Self {
        Halt::Error(error)
    }
}

impl Halt {
    /**
    Render this outcome the way a CLI entry point is expected to.

    [`HelpRequested`][Halt::HelpRequested] writes the help text to `out`;
    [`VersionRequested`][Halt::VersionRequested] writes the bare version
    string to `out`; a parse error writes the help text to `err`, with the
    error message replacing the banner description. Returns the exit code
    the process should finish with: success for the built-in diversions,
    2 for parse errors.
    */
    pub fn report(
        &self,
        registry: &Registry,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> io::Result<ExitCode> {
        match self {
            Halt::HelpRequested => {
                print_help(out, registry, registry.description())?;
                Ok(ExitCode::SUCCESS)
            }
            Halt::VersionRequested => {
                writeln!(out, "{}", registry.version().unwrap_or_default())?;
                Ok(ExitCode::SUCCESS)
            }
            Halt::Error(error) => {
                let message = error.to_string();
                print_help(err, registry, Some(&message))?;
                Ok(ExitCode::from(2))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        let mut registry = Registry::new()
            .with_version("1.0")
            .with_process_name("app");
        registry.add("debug", "extra output", false);
        registry
    }

    fn report(halt: &Halt) -> (String, String) {
        let registry = registry();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let _code = halt.report(&registry, &mut out, &mut err).expect("report");
        (
            String::from_utf8(out).expect("stdout utf-8"),
            String::from_utf8(err).expect("stderr utf-8"),
        )
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ParseError::UnknownOption { token: "--nope".into() }.to_string(),
            "No such option '--nope'"
        );
        assert_eq!(
            ParseError::InvalidValue { token: "--port=abc".into() }.to_string(),
            "Invalid value for --port=abc"
        );
        assert_eq!(
            ParseError::MissingRequired { flag: "--must".into() }.to_string(),
            "Required argument '--must' not found"
        );
    }

    #[test]
    fn report_help_writes_usage_to_out() {
        let (out, err) = report(&Halt::HelpRequested);
        assert!(out.contains("usage: app"));
        assert!(err.is_empty());
    }

    #[test]
    fn report_version_writes_the_bare_string() {
        let (out, err) = report(&Halt::VersionRequested);
        assert_eq!(out, "1.0\n");
        assert!(err.is_empty());
    }

    #[test]
    fn report_error_writes_usage_to_err() {
        let halt = Halt::from(ParseError::UnknownOption {
            token: "--nope".into(),
        });
        let (out, err) = report(&halt);
        assert!(out.is_empty());
        assert!(err.starts_with("No such option '--nope'\n\n"));
        assert!(err.contains("usage: app"));
    }
}
