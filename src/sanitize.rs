// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Mangling of arbitrary text into identifier-safe report names.

use lazy_regex::regex_replace_all;

/// Mangles the given text into an identifier-safe string, usable as a JUnit
/// class name segment.
///
/// Every maximal run of characters outside `[A-Za-z0-9.]` becomes a single
/// `-`, and every remaining run of `.`/`-` separators collapses down to its
/// leading character, so no two consecutive separators survive.
///
/// Idempotent: `sanitize(sanitize(s)) == sanitize(s)` for any input.
#[must_use]
pub fn sanitize(s: &str) -> String {
    let dashed = regex_replace_all!(r"[^A-Za-z0-9.]+", s, "-");
    regex_replace_all!(r"([.-])[.-]+", &dashed, |_, lead: &str| lead.to_owned())
        .into_owned()
}

/// Builds the hierarchical class name of a test case titled `title` inside
/// the suite named `suite`.
#[must_use]
pub fn qualify(title: &str, suite: &str) -> String {
    format!("{}.{}", sanitize(suite), sanitize(title))
}
