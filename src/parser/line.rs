//! Classification of single [TAP] lines.
//!
//! [`classify()`] maps one raw input line onto a [`Line`] shape, extracting
//! the structured fields a [`Scanner`] needs. It performs no counting and
//! keeps no state: resolving omitted test numbers against the running
//! position is the [`Scanner`]'s job.
//!
//! [`Scanner`]: super::Scanner
//! [TAP]: https://testanything.org

use lazy_regex::regex_captures;

use crate::event::{Directive, DirectiveKind};

/// Shape of a single classified [TAP] line.
///
/// [TAP]: https://testanything.org
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Line {
    /// `N..M` plan line (optionally followed by a `#` comment).
    Plan {
        /// Declared number of tests (the upper bound of the plan).
        count: u64,
    },

    /// `ok` / `not ok` test result line.
    Test(Test),

    /// `Bail out!` line, with its explanation.
    BailOut(String),

    /// `#`-prefixed comment line, with the leading marker stripped.
    Comment(String),

    /// Anything else.
    Unknown,
}

/// Structured fields of a test result [`Line`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Test {
    /// Whether the line starts with `ok` (as opposed to `not ok`).
    pub ok: bool,

    /// Test number, if the line declared one.
    pub number: Option<u64>,

    /// Description following the number (and an optional `-` separator).
    pub description: String,

    /// Trailing `# TODO` / `# SKIP` [`Directive`], if any.
    pub directive: Option<Directive>,
}

/// Classifies the given raw input `line` (trailing newline stripped).
///
/// Line shapes are checked in priority order: plan, test result, bail-out,
/// comment; everything else is [`Line::Unknown`].
#[must_use]
pub fn classify(line: &str) -> Line {
    if let Some((_, _, count)) = regex_captures!(r"^(\d+)\.\.(\d+)\s*(?:#.*)?$", line) {
        // A malformed bound overflowing `u64` falls through to `Unknown`.
        if let Ok(count) = count.parse() {
            return Line::Plan { count };
        }
    }

    if let Some((_, not, number, rest)) =
        regex_captures!(r"^(not\s+)?ok\b\s*(\d*)\s*(.*)$", line)
    {
        return Line::Test(Test {
            ok: not.is_empty(),
            number: number.parse().ok(),
            description: description_of(rest),
            directive: directive_of(rest),
        });
    }

    if let Some(explanation) = line.strip_prefix("Bail out!") {
        return Line::BailOut(explanation.trim().to_owned());
    }

    let trimmed = line.trim_start();
    if let Some(text) = trimmed.strip_prefix('#') {
        return Line::Comment(text.trim().to_owned());
    }

    Line::Unknown
}

/// Extracts the description part of a test result line remainder, dropping
/// the optional leading `-` separator and any trailing `#` part.
fn description_of(rest: &str) -> String {
    let desc = rest.split_once('#').map_or(rest, |(before, _)| before);
    let desc = desc.trim();
    desc.strip_prefix('-').map_or(desc, str::trim_start).to_owned()
}

/// Extracts a trailing `# TODO` / `# SKIP` [`Directive`] from a test result
/// line remainder, if one is present.
///
/// A trailing `#` part not introducing a directive is an in-line comment and
/// yields [`None`].
fn directive_of(rest: &str) -> Option<Directive> {
    let (_, after) = rest.split_once('#')?;
    let (_, keyword, explanation) =
        regex_captures!(r"(?i)^\s*(todo|skip)\b[:\s]*(.*)$", after)?;
    let kind = if keyword.eq_ignore_ascii_case("todo") {
        DirectiveKind::Todo
    } else {
        DirectiveKind::Skip
    };
    Some(Directive {
        kind,
        explanation: explanation.trim_end().to_owned(),
    })
}
