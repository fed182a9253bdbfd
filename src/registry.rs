/*!
Flag definitions and the registry that owns them. Registration is the only
mutating phase: once [`parse`][Registry::parse] runs, the registry is read
exclusively.
*/

use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::path::Path;

use crate::value::{Kind, Value};

pub(crate) const HELP: &str = "help";
pub(crate) const VERSION: &str = "version";

/**
A single registered flag.

Names are unique within a registry; a one-character name is a short flag
(`-a`), anything longer is a long flag (`--debug`). The default value, when
present, both types the flag and stands in for it when the command line
omits it; a flag with no default is required.
*/
#[derive(Debug, Clone)]
pub struct FlagDef {
    name: String,
    description: String,
    default: Option<Value>,
}

impl FlagDef {
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// A flag with no default must be supplied on the command line.
    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// The kind raw tokens coerce to for this flag. Required flags keep
    /// their values as strings.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.default.as_ref().map_or(Kind::Str, Value::kind)
    }

    #[inline]
    #[must_use]
    pub fn is_bool(&self) -> bool {
        self.kind() == Kind::Bool
    }

    /// The flag as it appears on the command line: one dash for
    /// single-character names, two otherwise.
    #[must_use]
    pub fn dashed(&self) -> String {
        dashed(&self.name)
    }
}

pub(crate) fn dashed(name: &str) -> String {
    match name.chars().count() {
        1 => format!("-{name}"),
        _ => format!("--{name}"),
    }
}

/**
An ordered collection of flag definitions, plus the two built-ins.

A registry is built once per invocation: construct, apply the builder
setters, register flags with [`add`][Registry::add] and
[`add_required`][Registry::add_required], then hand an argument list to
[`parse`][Registry::parse]. Insertion order is preserved; it decides help
text layout and which missing required flag is reported first.

The `help` built-in is always present. The `version` built-in appears once
a version string is configured with [`with_version`][Registry::with_version].
Both are boolean and never required.
*/
#[derive(Debug, Clone)]
pub struct Registry {
    process_name: String,
    version: Option<String>,
    description: Option<String>,
    builtins: Vec<FlagDef>,
    flags: Vec<FlagDef>,
    seeds: BTreeMap<String, Value>,
    widest: usize,
}

impl Registry {
    /// An empty registry: just the `help` built-in, with the process name
    /// taken from the invoking command.
    #[must_use]
    pub fn new() -> Self {
        Self {
            process_name: process_name_from_env(),
            version: None,
            description: None,
            builtins: vec![FlagDef {
                name: HELP.to_owned(),
                description: "print this help message and exit".to_owned(),
                default: Some(Value::Bool(false)),
            }],
            flags: Vec::new(),
            seeds: BTreeMap::new(),
            widest: "--help".len(),
        }
    }

    /// Configure a version string, enabling the `version` built-in and its
    /// slot in the usage prefix.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());

        if !self.builtins.iter().any(|flag| flag.name == VERSION) {
            self.builtins.push(FlagDef {
                name: VERSION.to_owned(),
                description: "print version and exit".to_owned(),
                default: Some(Value::Bool(false)),
            });
            self.widest = self.widest.max("--version".len());
        }

        self
    }

    /// Configure the top-level description shown above the usage banner.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Override the process name shown in the usage banner. Useful for
    /// tests and for embedders that don't want the name of the real binary.
    #[must_use]
    pub fn with_process_name(mut self, name: impl Into<String>) -> Self {
        self.process_name = name.into();
        self
    }

    /**
    Register an optional flag.

    The default's variant types the flag. Boolean defaults, and non-blank
    values of the other kinds, are pre-seeded into the value table so
    omission on the command line still yields them.

    # Panics

    Panics if `name` is already registered, the built-ins included.
    Registration is programmer-controlled, so a duplicate is a bug in the
    calling code rather than a parse error.
    */
    pub fn add(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        default: impl Into<Value>,
    ) -> &mut Self {
        self.insert(name.into(), description.into(), Some(default.into()))
    }

    /// Register a required flag: no default, its values stay strings, and
    /// omitting it on the command line is a fatal parse error.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered, as [`add`][Registry::add]
    /// does.
    pub fn add_required(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> &mut Self {
        self.insert(name.into(), description.into(), None)
    }

    fn insert(&mut self, name: String, description: String, default: Option<Value>) -> &mut Self {
        assert!(
            self.flag(&name).is_none(),
            "flag {name:?} is already registered"
        );

        if let Some(default) = default.as_ref().filter(|default| default.seeds()) {
            self.seeds.insert(name.clone(), default.clone());
        }

        self.widest = self.widest.max(dashed(&name).len());
        self.flags.push(FlagDef {
            name,
            description,
            default,
        });

        self
    }

    /// Look up a flag by name, built-ins included.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<&FlagDef> {
        self.ordered().find(|flag| flag.name == name)
    }

    /// The default registered for `name`, for type inference and
    /// requiredness checks. `None` both for unknown names and for required
    /// flags, which have no default to return.
    #[must_use]
    pub fn default_of(&self, name: &str) -> Option<&Value> {
        self.flag(name).and_then(FlagDef::default)
    }

    /// All flags in help order: built-ins first, then user flags in
    /// registration order.
    pub fn ordered(&self) -> impl Iterator<Item = &FlagDef> {
        self.builtins.iter().chain(self.flags.iter())
    }

    /// User-registered flags in registration order, built-ins excluded.
    pub(crate) fn registered(&self) -> impl Iterator<Item = &FlagDef> {
        self.flags.iter()
    }

    pub(crate) fn seeds(&self) -> &BTreeMap<String, Value> {
        &self.seeds
    }

    /// Width of the widest dashed flag name, for help-table alignment.
    /// Seeded from the longest built-in.
    pub(crate) fn widest(&self) -> usize {
        self.widest
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    /// The long version banner: process name and version string.
    #[must_use]
    pub fn version_line(&self) -> Option<String> {
        self.version
            .as_deref()
            .map(|version| format!("{} {version}", self.process_name))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn process_name_from_env() -> String {
    process_name_from(env::args_os().next())
}

/// Basename of the invoking command, with a trailing `.exe` stripped.
fn process_name_from(argv0: Option<OsString>) -> String {
    let argv0 = argv0.unwrap_or_default();
    let name = Path::new(&argv0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    match name.strip_suffix(".exe") {
        Some(stem) => stem.to_owned(),
        None => name,
    }
}
