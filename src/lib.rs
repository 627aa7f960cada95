// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversion of [TAP] (Test Anything Protocol) test output into
//! [JUnit XML reports][1], as consumed by CI dashboards.
//!
//! The pipeline is three explicit transformations, each unit-testable on its
//! own:
//! 1. [`parser`]: raw text into an ordered [`event::TapEvent`] sequence with
//!    accumulated [`parser::Counts`];
//! 2. [`report`]: events into one or more [`report::Report`] documents;
//! 3. [`writer`]: a document into pretty-printed XML bytes.
//!
//! [`Conversion`] glues the stages together for the `tap2junit` executable,
//! but each of them is usable separately. This is not a general [TAP]
//! library: only as much of the protocol is understood as this one
//! conversion needs.
//!
//! [1]: https://llg.cubic.org/docs/junit
//! [TAP]: https://testanything.org

pub mod cli;
pub mod event;
pub mod parser;
pub mod report;
pub mod sanitize;
pub mod writer;

use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use derive_more::{Display, Error, From};

#[doc(inline)]
pub use self::{parser::Scanner, report::Report, writer::JUnit};

/// Suite name used when none is supplied.
pub const DEFAULT_SUITE_NAME: &str = "make test";

/// Top-level error of a [`Conversion`].
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Reading the TAP input or writing a report sink failed.
    #[display("I/O operation failed: {_0}")]
    Io(io::Error),

    /// Serializing the XML report failed.
    #[display("XML serialization failed: {_0}")]
    Xml(quick_xml::Error),
}

/// Terminal condition of a successful [`Conversion`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// A normal report was emitted.
    Completed,

    /// Strict-mode parse errors: a `TestsNotRun.ParseError` report was
    /// emitted in place of the normal one.
    TestsNotRun,
}

impl Outcome {
    /// Process exit status of this [`Outcome`].
    ///
    /// `86` is the distinguished status CI integrations rely upon to tell
    /// "tests were not run at all" apart from ordinary failures.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Completed => 0,
            Self::TestsNotRun => 86,
        }
    }
}

/// Configured TAP-to-JUnit conversion.
///
/// The whole input is read before any output begins; everything is built in
/// memory and discarded after serialization.
#[derive(Clone, Debug)]
pub struct Conversion {
    /// Display name of the emitted suite(s).
    pub suite_name: String,

    /// Whether the input is trusted to be pure TAP (`--puretap`).
    pub strict: bool,

    /// Whether a trailing harness summary block is skipped (lenient mode
    /// only).
    pub hide_summary: bool,
}

impl Default for Conversion {
    fn default() -> Self {
        Self {
            suite_name: DEFAULT_SUITE_NAME.to_owned(),
            strict: false,
            hide_summary: true,
        }
    }
}

impl Conversion {
    /// Converts the given TAP `input` into a single XML report written to
    /// `out`.
    ///
    /// In strict mode with at least one parse error, the normal report is
    /// suppressed entirely: a synthetic `TestsNotRun.ParseError` report is
    /// written instead and [`Outcome::TestsNotRun`] is returned.
    pub fn convert<Out: io::Write>(
        &self,
        input: &str,
        out: Out,
    ) -> Result<Outcome, Error> {
        let scan = Scanner::new(self.strict)
            .hide_summary(self.hide_summary)
            .scan(input);
        tracing::debug!(
            events = scan.events.len(),
            planned = scan.counts.planned,
            bailed = scan.bailed,
            "TAP input scanned",
        );

        let (report, outcome) = if scan.errors.is_empty() {
            (report::assemble(&scan, &self.suite_name), Outcome::Completed)
        } else {
            tracing::warn!(
                errors = scan.errors.len(),
                "TAP parse errors, reporting tests as not run",
            );
            (report::parse_error_report(&scan.errors), Outcome::TestsNotRun)
        };

        let mut out = JUnit::new(out).write(&report)?;
        out.flush().map_err(Error::Io)?;
        Ok(outcome)
    }

    /// Converts the given TAP `input` into one XML report file per plan,
    /// named `{prefix}{NN}.xml`, returning the written paths.
    ///
    /// Strict mode never applies here: strict TAP guarantees a single plan
    /// per input, so splitting would be meaningless. Intermediate
    /// directories implied by slashes in `prefix` are created.
    pub fn convert_split(
        &self,
        input: &str,
        prefix: &str,
    ) -> Result<Vec<PathBuf>, Error> {
        let scan = Scanner::new(false).hide_summary(self.hide_summary).scan(input);
        let reports = report::assemble_split(&scan, &self.suite_name);

        if let Some(dir) = Path::new(prefix).parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let mut paths = Vec::with_capacity(reports.len());
        for (i, report) in reports.iter().enumerate() {
            let path = PathBuf::from(format!("{prefix}{:02}.xml", i + 1));
            let file = fs::File::create(&path)?;
            let mut out = JUnit::new(io::BufWriter::new(file)).write(report)?;
            out.flush().map_err(Error::Io)?;
            tracing::info!(path = %path.display(), "report file written");
            paths.push(path);
        }
        Ok(paths)
    }
}
