// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! In-memory [JUnit XML report][1] model and its assembly from scanned
//! [TAP] events.
//!
//! [1]: https://llg.cubic.org/docs/junit
//! [TAP]: https://testanything.org

use std::mem;

use crate::{
    event::{Directive, DirectiveKind, TapEvent},
    parser::{ParseError, Scan},
    sanitize::{qualify, sanitize},
};

/// Name of the synthetic [`Suite`] replacing the whole report when strict
/// parsing failed.
pub const PARSE_ERROR_SUITE: &str = "TestsNotRun.ParseError";

/// Status of a [`TestCase`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    /// `ok` result.
    Pass,

    /// `not ok` result, or a synthesized case (bail-out, parse error).
    Fail,
}

impl Status {
    /// Value of this [`Status`] in a `status` XML attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }
}

/// Kind of the XML element a [`Detail`] is rendered as.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DetailKind {
    /// `<failure>`: an assertion that ran and did not pass.
    Failure,

    /// `<error>`: the run itself went wrong (strict-mode parse errors).
    Error,
}

/// Nested detail element of a non-passing [`TestCase`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Detail {
    /// Kind of element this [`Detail`] renders as.
    pub kind: DetailKind,

    /// Value of the `type` attribute (`TAPTestFailed`, `BailOut`,
    /// `TAPParseError`).
    pub ty: String,

    /// Value of the `message` attribute.
    pub message: String,
}

/// Single `<testcase>` of a [`Suite`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestCase {
    /// Display title, as-is (not sanitized).
    pub name: String,

    /// Sanitized hierarchical name.
    pub classname: String,

    /// Pass/fail [`Status`].
    pub status: Status,

    /// Failure/error [`Detail`], present only on non-passing cases.
    pub detail: Option<Detail>,
}

/// Single `<testsuite>` of a [`Report`].
///
/// Elapsed time is never measured, so the `time` attribute is a constant `0`
/// and carries no field here.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Suite {
    /// Display name of this [`Suite`].
    pub name: String,

    /// Number of tests declared by the plan.
    pub tests: u64,

    /// Number of fail-status [`TestCase`]s.
    pub failures: u64,

    /// Number of errored cases.
    ///
    /// Always `0` outside the parse-error report, even when a bail-out is
    /// present: a bail-out is reported as a failure, not an error.
    pub errors: u64,

    /// Number of results carrying a `# SKIP` directive.
    pub skipped: u64,

    /// Number of results carrying a `# TODO` directive.
    pub todo: u64,

    /// Sequential 1-based index of this [`Suite`].
    pub id: u64,

    /// [`TestCase`]s in input encounter order.
    pub cases: Vec<TestCase>,
}

/// Complete report document: the `<testsuites>` tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Report {
    /// Contained [`Suite`]s.
    pub suites: Vec<Suite>,
}

/// Assembles the default single-suite [`Report`] out of a completed
/// [`Scan`].
#[must_use]
pub fn assemble(scan: &Scan, suite_name: &str) -> Report {
    let mut cases = Vec::new();
    for ev in &scan.events {
        match &ev.value {
            TapEvent::Test {
                number,
                description,
                ok,
                directive,
            } => cases.push(test_case(
                *number,
                description,
                *ok,
                directive.as_ref(),
                &ev.raw,
                suite_name,
            )),
            TapEvent::BailOut(explanation) => {
                cases.push(bail_out_case(explanation, suite_name));
            }
            TapEvent::Comment(_) | TapEvent::Plan { .. } | TapEvent::Unknown(_) => {}
        }
    }

    Report {
        suites: vec![suite(
            suite_name,
            scan.counts.planned,
            scan.counts.skipped,
            scan.counts.todo,
            1,
            cases,
        )],
    }
}

/// Assembles one single-suite [`Report`] per plan boundary out of a
/// completed [`Scan`].
///
/// Every plan line opens a new partition; test results fall into the most
/// recently opened one. Suite `id`s count up from 1 across the partitions.
#[must_use]
pub fn assemble_split(scan: &Scan, suite_name: &str) -> Vec<Report> {
    #[derive(Default)]
    struct Part {
        planned: u64,
        has_plan: bool,
        skipped: u64,
        todo: u64,
        cases: Vec<TestCase>,
    }

    impl Part {
        fn is_empty(&self) -> bool {
            !self.has_plan && self.cases.is_empty()
        }
    }

    let mut parts = Vec::new();
    let mut part = Part::default();

    for ev in &scan.events {
        match &ev.value {
            TapEvent::Plan { count } => {
                if !part.is_empty() {
                    parts.push(mem::take(&mut part));
                }
                part.planned = *count;
                part.has_plan = true;
            }
            TapEvent::Test {
                number,
                description,
                ok,
                directive,
            } => {
                match directive.as_ref().map(|d| d.kind) {
                    Some(DirectiveKind::Skip) => part.skipped += 1,
                    Some(DirectiveKind::Todo) => part.todo += 1,
                    None => {}
                }
                part.cases.push(test_case(
                    *number,
                    description,
                    *ok,
                    directive.as_ref(),
                    &ev.raw,
                    suite_name,
                ));
            }
            TapEvent::BailOut(explanation) => {
                part.cases.push(bail_out_case(explanation, suite_name));
            }
            TapEvent::Comment(_) | TapEvent::Unknown(_) => {}
        }
    }
    if !part.is_empty() {
        parts.push(part);
    }

    parts
        .into_iter()
        .enumerate()
        .map(|(i, p)| Report {
            suites: vec![suite(
                suite_name,
                p.planned,
                p.skipped,
                p.todo,
                i as u64 + 1,
                p.cases,
            )],
        })
        .collect()
}

/// Assembles the synthetic [`Report`] replacing normal output when strict
/// parsing failed.
///
/// Every [`ParseError`] becomes one `Error_NN` case rendered as an `<error>`
/// element; the event-derived test cases are discarded entirely.
#[must_use]
pub fn parse_error_report(errors: &[ParseError]) -> Report {
    let cases = errors
        .iter()
        .enumerate()
        .map(|(i, e)| TestCase {
            name: format!("Error_{:02}", i + 1),
            classname: PARSE_ERROR_SUITE.to_owned(),
            status: Status::Fail,
            detail: Some(Detail {
                kind: DetailKind::Error,
                ty: "TAPParseError".to_owned(),
                message: e.message.clone(),
            }),
        })
        .collect::<Vec<_>>();

    Report {
        suites: vec![Suite {
            name: PARSE_ERROR_SUITE.to_owned(),
            tests: cases.len() as u64,
            failures: 0,
            errors: cases.len() as u64,
            skipped: 0,
            todo: 0,
            id: 1,
            cases,
        }],
    }
}

/// Builds a [`Suite`], deriving its `failures` attribute from the
/// fail-status cases.
fn suite(
    name: &str,
    tests: u64,
    skipped: u64,
    todo: u64,
    id: u64,
    cases: Vec<TestCase>,
) -> Suite {
    let failures = cases
        .iter()
        .filter(|c| c.status == Status::Fail)
        .count() as u64;
    Suite {
        name: name.to_owned(),
        tests,
        failures,
        errors: 0,
        skipped,
        todo,
        id,
        cases,
    }
}

/// Builds the [`TestCase`] of a single test result.
fn test_case(
    number: u64,
    description: &str,
    ok: bool,
    directive: Option<&Directive>,
    raw: &str,
    suite_name: &str,
) -> TestCase {
    let title = if description.is_empty() {
        number.to_string()
    } else {
        format!("{number} {description}")
    };
    let classname = match directive {
        Some(d) => format!(
            "{}.{}.{}",
            sanitize(suite_name),
            sanitize(&title),
            sanitize(&format!("{} {}", d.kind.as_str(), d.explanation)),
        ),
        None => qualify(&title, suite_name),
    };
    let (status, detail) = if ok {
        (Status::Pass, None)
    } else {
        (
            Status::Fail,
            Some(Detail {
                kind: DetailKind::Failure,
                ty: "TAPTestFailed".to_owned(),
                message: raw.to_owned(),
            }),
        )
    };
    TestCase {
        name: title,
        classname,
        status,
        detail,
    }
}

/// Builds the single synthetic failing [`TestCase`] representing a
/// `Bail out!` line.
///
/// A bail-out goes through the normal report path as a failure; it is not an
/// error in the report's sense.
fn bail_out_case(explanation: &str, suite_name: &str) -> TestCase {
    TestCase {
        name: "BailOut".to_owned(),
        classname: qualify("BailOut", suite_name),
        status: Status::Fail,
        detail: Some(Detail {
            kind: DetailKind::Failure,
            ty: "BailOut".to_owned(),
            message: explanation.to_owned(),
        }),
    }
}
