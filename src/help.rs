/*!
Usage banner and flag-table rendering. Everything writes to a caller
supplied [`io::Write`], so the same renderer serves `--help` on standard
output and parse errors on standard error.
*/

use std::io;

use indent_write::io::IndentWriter;
use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::registry::{FlagDef, Registry};

/// Width help lines wrap at, inside the two-space table indent.
const WRAP_WIDTH: usize = 78;

/**
Write the usage banner and per-flag help table for `registry`.

`description` is the line printed above the banner: the registry's own
description when help was requested, or the parse error's message when
usage is shown in response to bad arguments.
*/
pub fn print_help(
    out: &mut impl io::Write,
    registry: &Registry,
    description: Option<&str>,
) -> io::Result<()> {
    if let Some(description) = description {
        writeln!(out, "{description}")?;
        writeln!(out)?;
    }

    write_usage_line(out, registry)?;

    let mut out = IndentWriter::new("  ", out);
    registry
        .ordered()
        .try_for_each(|flag| write_flag_line(&mut out, flag, registry.widest()))
}

/// The banner: the fixed built-in prefix, then bracketed optional flags,
/// then required flags without brackets, in registry order.
fn write_usage_line(out: &mut impl io::Write, registry: &Registry) -> io::Result<()> {
    write!(out, "usage: {} [--help]", registry.process_name())?;
    if registry.version().is_some() {
        write!(out, " [--version]")?;
    }

    let optional: Vec<String> = registry
        .registered()
        .filter(|flag| !flag.is_required())
        .map(optional_synopsis)
        .collect();
    if !optional.is_empty() {
        write!(out, " {}", optional.iter().join_with(' '))?;
    }

    let required: Vec<String> = registry
        .registered()
        .filter(|flag| flag.is_required())
        .map(required_synopsis)
        .collect();
    if !required.is_empty() {
        write!(out, " {}", required.iter().join_with(' '))?;
    }

    writeln!(out)
}

/// `[--name]` for booleans; `[-n VALUE]` / `[--name NAME]` for flags that
/// take a value.
fn optional_synopsis(flag: &FlagDef) -> String {
    let dashed = flag.dashed();
    if flag.is_bool() {
        format!("[{dashed}]")
    } else {
        format!("[{dashed} {}]", placeholder(flag))
    }
}

/// Required flags render unbracketed: `--name NAME` / `-n N`.
fn required_synopsis(flag: &FlagDef) -> String {
    format!("{} {}", flag.dashed(), flag.name().to_uppercase())
}

/// Single-letter flags have nothing worth uppercasing, so they advertise a
/// generic `VALUE`.
fn placeholder(flag: &FlagDef) -> String {
    match flag.name().chars().count() {
        1 => "VALUE".to_owned(),
        _ => flag.name().to_uppercase(),
    }
}

/// One table line: dashed name padded to the registry's tracked width, the
/// description, and the default annotation for non-blank defaults. Long
/// lines wrap under the description column.
fn write_flag_line(out: &mut impl io::Write, flag: &FlagDef, width: usize) -> io::Result<()> {
    let annotation = lazy_format!(match (flag.default().filter(|default| !default.is_blank())) {
        Some(default) => " (default: {default})",
        None => "",
    });
    let entry = format!(
        "{dashed:<width$}  {description}{annotation}",
        dashed = flag.dashed(),
        description = flag.description(),
    );

    let hang = " ".repeat(width + 2);
    let options = textwrap::Options::new(WRAP_WIDTH).subsequent_indent(&hang);
    writeln!(out, "{}", textwrap::fill(&entry, options))
}
