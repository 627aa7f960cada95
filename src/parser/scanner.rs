//! Single-pass [TAP] stream scanner.
//!
//! [TAP]: https://testanything.org

use lazy_regex::regex_is_match;

use crate::event::{DirectiveKind, Event, TapEvent};

use super::{
    line::{self, Line},
    ParseError,
};

/// Counters accumulated over one scanned [TAP] stream.
///
/// [TAP]: https://testanything.org
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Counts {
    /// Total number of tests declared by plan lines.
    pub planned: u64,

    /// Number of `ok` results.
    pub passed: u64,

    /// Number of `not ok` results.
    pub failed: u64,

    /// Number of results carrying a `# SKIP` directive.
    pub skipped: u64,

    /// Number of results carrying a `# TODO` directive.
    pub todo: u64,
}

/// Outcome of scanning one full [TAP] input.
///
/// [TAP]: https://testanything.org
#[derive(Clone, Debug)]
pub struct Scan {
    /// All emitted [`Event`]s, in encounter order.
    pub events: Vec<Event>,

    /// Accumulated [`Counts`].
    pub counts: Counts,

    /// Whether the stream was cut short by a `Bail out!` line.
    pub bailed: bool,

    /// Lines rejected in strict mode, in encounter order.
    ///
    /// Always empty in lenient mode.
    pub errors: Vec<ParseError>,
}

/// Scanner turning a full [TAP] input text into an ordered [`Event`]
/// sequence with accumulated [`Counts`].
///
/// The whole input is consumed before any report is produced; there is no
/// incremental mode.
///
/// [TAP]: https://testanything.org
#[derive(Clone, Copy, Debug)]
pub struct Scanner {
    /// Whether the input is trusted to be pure [TAP], turning every
    /// non-conforming line into a [`ParseError`].
    ///
    /// [TAP]: https://testanything.org
    strict: bool,

    /// Whether a trailing harness summary block should be skipped rather
    /// than fed through classification (lenient mode only).
    hide_summary: bool,
}

impl Scanner {
    /// Creates a new [`Scanner`].
    ///
    /// A trailing harness summary is hidden by default; see
    /// [`Scanner::hide_summary()`].
    #[must_use]
    pub const fn new(strict: bool) -> Self {
        Self {
            strict,
            hide_summary: true,
        }
    }

    /// Sets whether a trailing harness summary block (a prove(1)-style
    /// `Test Summary Report`) should be skipped.
    ///
    /// Has no effect in strict mode, where such a block is a parse error
    /// like any other non-[TAP] text.
    ///
    /// [TAP]: https://testanything.org
    #[must_use]
    pub const fn hide_summary(mut self, hide: bool) -> Self {
        self.hide_summary = hide;
        self
    }

    /// Scans the given `input` to completion.
    ///
    /// Scanning stops early only on a `Bail out!` line; in strict mode
    /// malformed lines are collected into [`Scan::errors`] and scanning
    /// continues, so every bad line of the input is reported at once.
    #[must_use]
    pub fn scan(self, input: &str) -> Scan {
        let mut events = Vec::new();
        let mut counts = Counts::default();
        let mut errors = Vec::new();
        let mut bailed = false;
        let mut last_number = 0;

        // Comment runs are collected so a later extension could attach them
        // to the following test case, but today they are dropped untouched
        // whenever a non-comment line ends the run.
        let mut pending_comments = Vec::<String>::new();

        for (idx, raw) in input.lines().enumerate() {
            if !self.strict && self.hide_summary && is_summary_banner(raw) {
                tracing::debug!(
                    line = idx + 1,
                    "trailing harness summary reached, skipping the rest",
                );
                break;
            }

            match line::classify(raw) {
                Line::Comment(text) => {
                    pending_comments.push(text.clone());
                    events.push(Event {
                        value: TapEvent::Comment(text),
                        raw: raw.to_owned(),
                    });
                }
                Line::Plan { count } => {
                    pending_comments.clear();
                    counts.planned += count;
                    events.push(Event {
                        value: TapEvent::Plan { count },
                        raw: raw.to_owned(),
                    });
                }
                Line::Test(test) => {
                    pending_comments.clear();
                    let number = test.number.unwrap_or(last_number + 1);
                    last_number = number;
                    if test.ok {
                        counts.passed += 1;
                    } else {
                        counts.failed += 1;
                    }
                    match test.directive.as_ref().map(|d| d.kind) {
                        Some(DirectiveKind::Skip) => counts.skipped += 1,
                        Some(DirectiveKind::Todo) => counts.todo += 1,
                        None => {}
                    }
                    events.push(Event {
                        value: TapEvent::Test {
                            number,
                            description: test.description,
                            ok: test.ok,
                            directive: test.directive,
                        },
                        raw: raw.to_owned(),
                    });
                }
                Line::BailOut(explanation) => {
                    pending_comments.clear();
                    tracing::warn!(line = idx + 1, "TAP stream bailed out");
                    events.push(Event {
                        value: TapEvent::BailOut(explanation),
                        raw: raw.to_owned(),
                    });
                    bailed = true;
                    break;
                }
                Line::Unknown => {
                    pending_comments.clear();
                    if raw.trim().is_empty() {
                        continue;
                    }
                    if self.strict {
                        errors.push(ParseError {
                            message: format!(
                                "unable to parse TAP line {}: {raw}",
                                idx + 1,
                            ),
                        });
                    } else {
                        tracing::debug!(line = idx + 1, "ignoring non-TAP line");
                        events.push(Event {
                            value: TapEvent::Unknown(raw.to_owned()),
                            raw: raw.to_owned(),
                        });
                    }
                }
            }
        }

        Scan {
            events,
            counts,
            bailed,
            errors,
        }
    }
}

/// Indicates whether the given line opens a prove(1)-style trailing summary
/// block (`Test Summary Report` banner or the final statistics lines).
///
/// Heuristic on purpose: the summary format is emitted by harnesses, not
/// specified by [TAP] itself.
///
/// [TAP]: https://testanything.org
fn is_summary_banner(line: &str) -> bool {
    regex_is_match!(r"^Test Summary Report$|^Files=\d|^Result: ", line)
}
