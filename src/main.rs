// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `tap2junit` executable: thin I/O plumbing around [`Conversion`].

use std::{
    fs,
    io::{self, Read as _},
    path::Path,
    process,
};

use clap::Parser as _;
use tracing_subscriber::EnvFilter;

use tap2junit::{cli::Opts, Conversion, Error, Outcome};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opts = Opts::parse();
    match run(&opts) {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("tap2junit: {e}");
            process::exit(1);
        }
    }
}

fn run(opts: &Opts) -> Result<Outcome, Error> {
    let input = read_input(opts.input.as_deref())?;
    let conversion = Conversion {
        suite_name: opts.name.clone(),
        strict: opts.puretap,
        hide_summary: !opts.show_summary,
    };

    if let Some(prefix) = &opts.split {
        conversion.convert_split(&input, prefix)?;
        return Ok(Outcome::Completed);
    }
    match &opts.output {
        Some(path) => {
            let file = fs::File::create(path)?;
            conversion.convert(&input, io::BufWriter::new(file))
        }
        None => conversion.convert(&input, io::stdout().lock()),
    }
}

/// Reads the whole TAP input, from the given file or from standard input
/// (`-` or no path at all).
fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => fs::read_to_string(p),
        _ => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
