/*!
A small, registry-driven command-line flag parser.

Flags are registered one [`add`][Registry::add] call at a time. A flag's
default value both types it and stands in when the command line omits it; a
flag registered with no default is required. [`parse`][Registry::parse]
runs over a caller-supplied argument list and either produces the table of
coerced [`Value`]s or halts: `--help` and `--version` divert to the
renderers, and malformed input surfaces as one of three fatal errors. The
library never terminates the process; entry points decide exit codes,
usually via [`Halt::report`].

# Example

```
use quibble::{Registry, Value};

let mut registry = Registry::new()
    .with_version("1.0")
    .with_description("an example application")
    .with_process_name("example");

registry
    .add("debug", "enable debug output", false)
    .add("port", "port to listen on", 8080)
    .add_required("host", "host to bind");

let values = registry.parse(["--host", "0.0.0.0", "--debug"]).unwrap();
assert_eq!(values.get("host"), Some(&Value::Str("0.0.0.0".into())));
assert_eq!(values.get("debug"), Some(&Value::Bool(true)));
assert_eq!(values.get("port"), Some(&Value::Int(8080)));
```
*/

pub mod errors;
pub mod help;
pub mod parse;
pub mod registry;
pub mod value;

pub use errors::{Halt, ParseError};
pub use help::print_help;
pub use parse::Values;
pub use registry::{FlagDef, Registry};
pub use value::{Kind, Value};
