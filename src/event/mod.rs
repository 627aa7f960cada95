// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Key occurrences in a [TAP] stream.
//!
//! The top-level enum here is [`TapEvent`], one value per classified input
//! line, produced in encounter order by a [`Scanner`].
//!
//! [`Scanner`]: crate::parser::Scanner
//! [TAP]: https://testanything.org

/// Annotation attached to a test result line, altering its interpretation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Directive {
    /// Kind of this [`Directive`].
    pub kind: DirectiveKind,

    /// Free-form explanation following the keyword (may be empty).
    pub explanation: String,
}

/// Kind of a [`Directive`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DirectiveKind {
    /// `# TODO`: the test is expected to fail and is tallied separately.
    Todo,

    /// `# SKIP`: the test was not run at all.
    Skip,
}

impl DirectiveKind {
    /// Canonical upper-case keyword of this [`DirectiveKind`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::Skip => "SKIP",
        }
    }
}

/// Single structured occurrence in a [TAP] stream.
///
/// [TAP]: https://testanything.org
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TapEvent {
    /// `ok` / `not ok` test result line.
    Test {
        /// 1-based sequence position, as declared by the line itself or
        /// filled in from the running position when the line omits it.
        ///
        /// Not necessarily contiguous: declared numbers are trusted verbatim
        /// and never renumbered.
        number: u64,

        /// Human-readable description of the test (may be empty).
        description: String,

        /// Whether the test passed.
        ok: bool,

        /// Optional `TODO`/`SKIP` [`Directive`].
        directive: Option<Directive>,
    },

    /// `#`-prefixed commentary.
    ///
    /// Collected, but never surfacing in any report.
    Comment(String),

    /// `Bail out!` signal: the run aborted early and no further results
    /// should be expected.
    BailOut(String),

    /// `N..M` plan line declaring the expected total test count.
    Plan {
        /// Declared number of tests.
        count: u64,
    },

    /// Anything else: foreign tool output interleaved with the TAP.
    Unknown(String),
}

/// [`TapEvent`] paired with the verbatim input line it was classified from.
///
/// The raw text is required whenever a failed test result is reported, as
/// the report carries the original line as the failure message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Event {
    /// The classified [`TapEvent`] itself.
    pub value: TapEvent,

    /// Verbatim source line, trailing newline stripped.
    pub raw: String,
}
