// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for parsing [TAP] streams.
//!
//! Parsing is split into two stateless-to-stateful stages: [`line::classify()`]
//! turns one raw line into its [`line::Line`] shape, and a [`Scanner`] drives
//! classification over the whole input, resolving test numbers, accumulating
//! [`Counts`] and cutting the stream short on a bail-out.
//!
//! [TAP]: https://testanything.org

pub mod line;
pub mod scanner;

use derive_more::{Display, Error};

#[doc(inline)]
pub use self::scanner::{Counts, Scan, Scanner};

/// Single line rejected by a strict-mode [`Scanner`].
///
/// Only ever produced in strict mode: lenient scanning ignores whatever it
/// cannot classify.
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
#[display("{message}")]
pub struct ParseError {
    /// Human-readable description, carrying the offending line.
    pub message: String,
}
