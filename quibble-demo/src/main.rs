use std::env;
use std::io::{stderr, stdout};
use std::process::ExitCode;

use quibble::Registry;

fn registry() -> Registry {
    let mut registry = Registry::new()
        .with_version("1.0")
        .with_description("demonstrates the quibble flag parser");

    registry
        .add("debug", "true when given, false when omitted", false)
        .add("host", "an option holding a string value", "localhost")
        .add("port", "an option holding a numeric value", 8080)
        .add_required("must", "no default, so a value is mandatory")
        .add("a", "single-letter options take a single dash", 10)
        .add("b", "single-letter boolean options can be combined", false)
        .add("c", "-bc gives the same result as -b -c", false);

    registry
}

fn main() -> anyhow::Result<ExitCode> {
    let registry = registry();

    match registry.parse(env::args().skip(1)) {
        Ok(values) => {
            println!("* supplied options *");
            for (name, value) in values.iter() {
                println!("  - {name}: {value}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(halt) => Ok(halt.report(&registry, &mut stdout(), &mut stderr())?),
    }
}
