// Copyright Materialize, Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository, or online at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! fixedpt is a fixed-point arithmetic library for Rust.
//!
//! # Introduction
//!
//! A fixed-point number is an integer with an implied binary point: a value
//! with `F` fractional bits represents `raw / 2^F`. Every operation in this
//! crate, including the transcendental functions, is carried out with integer
//! arithmetic alone, which makes it suitable for targets without a
//! floating-point unit and for contexts where floating point is unavailable,
//! such as kernels.
//!
//! # Details
//!
//! The main types exposed by this library are as follows:
//!
//!  * [`Fixed32`], a 32-bit fixed-point number with `W` whole bits, computed
//!    with a 64-bit accumulator.
//!
//!  * [`Fixed64`], a 64-bit fixed-point number with `W` whole bits, computed
//!    with a 128-bit accumulator.
//!
//! The format is part of the type, so `Fixed32<16>` and `Fixed32<14>` cannot
//! be mixed by accident. All constant tables are computed at compile time for
//! each format that is used.
//!
//! Both types provide:
//!
//!  * Arithmetic operators that wrap on overflow, and `checked_*` variants.
//!    Multiplication rounds the discarded half bit up; division truncates.
//!
//!  * Decimal formatting and parsing. See [`Precision`].
//!
//!  * Square roots by two algorithms. See [`SqrtAlgorithm`].
//!
//!  * `exp`, `ln`, `log` and `pow`.
//!
//!  * `sin`, `cos`, `tan`, `sincos`, `atan`, `atan2`, `asin` and `acos` by
//!    CORDIC, and polynomial `sin_poly`, `cos_poly`, `atan_poly` and
//!    `atan2_poly`.
//!
//! The plain mathematical functions return sentinel results for bad inputs
//! (for example, the square root of a negative number is `-DELTA`). Each has
//! a `checked_` counterpart that reports a [`MathError`] instead.
//!
//! # Examples
//!
//! ```
//! # use std::error::Error;
//! use fixedpt::{Fixed32, MathError, Precision, SqrtAlgorithm};
//!
//! type Q16 = Fixed32<16>;
//!
//! let x: Q16 = "2".parse()?;
//! assert_eq!(x.sqrt_with(SqrtAlgorithm::DigitByDigit).to_string(), "1.4142");
//! assert_eq!(Q16::PI.to_string_with(Precision::Digits(2)), "3.14");
//! assert_eq!(Q16::from_f64(-1.0).checked_sqrt(), Err(MathError::NegativeInput));
//! # Ok::<_, Box<dyn Error>>(())
//! ```
//!
//! # Optional features
//!
//! With the `serde` feature enabled, values serialize as their raw integer
//! representation. With the `num-traits` feature enabled, the numeric traits
//! from [`num_traits`] are implemented.
//!
//! [`num_traits`]: https://docs.rs/num-traits

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod repr;
#[macro_use]
mod codec;
#[macro_use]
mod conv;
#[macro_use]
mod cordic;
#[macro_use]
mod explog;
#[cfg(feature = "num-traits")]
#[macro_use]
mod num;
#[macro_use]
mod poly;
#[macro_use]
mod sqrt;

mod error;
mod fixed32;
mod fixed64;
mod macros;

pub use codec::Precision;
pub use error::{MathError, ParseFixedError, TryFromFixedError};
pub use fixed32::Fixed32;
pub use fixed64::Fixed64;
pub use sqrt::SqrtAlgorithm;
