// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI (command line interface) of the `tap2junit` executable.

use std::path::PathBuf;

pub use clap::Parser;

use crate::DEFAULT_SUITE_NAME;

/// Converts TAP (Test Anything Protocol) test output into JUnit-style XML
/// reports.
#[derive(Clone, Debug, clap::Parser)]
#[command(name = "tap2junit", version)]
pub struct Opts {
    /// TAP input file (`-` or absent reads standard input).
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// File to write the XML report to (standard output when absent).
    #[arg(
        id = "output",
        long,
        short = 'o',
        value_name = "FILE",
        conflicts_with = "split"
    )]
    pub output: Option<PathBuf>,

    /// Name of the emitted test suite.
    #[arg(
        id = "name",
        long,
        short = 'n',
        value_name = "NAME",
        default_value = DEFAULT_SUITE_NAME
    )]
    pub name: String,

    /// Treat the input as pure TAP: any non-conforming line becomes a parse
    /// error, and the run exits with status 86 instead of a normal report.
    #[arg(long, conflicts_with = "split")]
    pub puretap: bool,

    /// Feed a trailing harness summary ("Test Summary Report") through the
    /// scanner instead of skipping it. Has no effect with `--puretap`.
    #[arg(long = "show-summary")]
    pub show_summary: bool,

    /// Write one XML file per TAP plan as `<PREFIX><NN>.xml` instead of a
    /// single report, creating intermediate directories as needed.
    #[arg(id = "split", long, value_name = "PREFIX")]
    pub split: Option<String>,
}
