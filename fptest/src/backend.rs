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

use std::error::Error;
use std::fmt;
use std::ops::Neg;

use fixedpt::{MathError, Precision};

mod fixed32;
mod fixed64;

pub use fixed32::Fixed32Backend;
pub use fixed64::Fixed64Backend;

pub enum BackendError {
    Unsupported,
    Failure { cause: Box<dyn Error> },
}

impl BackendError {
    pub fn failure<S>(message: S) -> BackendError
    where
        S: Into<String>,
    {
        let message = message.into();
        BackendError::Failure {
            cause: message.into(),
        }
    }
}

impl<E> From<E> for BackendError
where
    E: Error + 'static,
{
    fn from(cause: E) -> BackendError {
        BackendError::Failure {
            cause: cause.into(),
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// The result of a checked operation in a backend.
pub type MathResult<T> = Result<T, MathError>;

/// A fixed-point format under test.
///
/// Operations return the `checked_*` result of the corresponding method, so
/// that test vectors can assert on the error conditions.
pub trait Backend {
    type D: fmt::Display + Copy + PartialEq + Neg<Output = Self::D>;

    fn new() -> Self;

    /// The conventional name of the format, e.g. `q16.16`.
    fn name(&self) -> String;

    /// The value of one unit in the last place.
    fn delta(&self) -> f64;

    /// Parses a decimal operand. Values that do not fit the format are
    /// unsupported, while malformed values are failures.
    fn parse(&self, s: &str) -> BackendResult<Self::D>;
    /// Constructs a value from the big-endian bytes of its raw
    /// representation. Byte strings of the wrong width are unsupported.
    fn from_be_bytes(&self, bytes: &[u8]) -> BackendResult<Self::D>;
    fn constant(&self, name: &str) -> Option<Self::D>;
    fn to_f64(&self, n: Self::D) -> f64;
    fn to_string(&self, n: Self::D) -> String;

    fn set_precision(&mut self, precision: Precision) -> BackendResult<()>;

    fn abs(&mut self, n: Self::D) -> MathResult<Self::D>;
    fn add(&mut self, lhs: Self::D, rhs: Self::D) -> MathResult<Self::D>;
    fn div(&mut self, lhs: Self::D, rhs: Self::D) -> MathResult<Self::D>;
    fn frac_part(&mut self, n: Self::D) -> MathResult<Self::D>;
    fn minus(&mut self, n: Self::D) -> MathResult<Self::D>;
    fn mul(&mut self, lhs: Self::D, rhs: Self::D) -> MathResult<Self::D>;
    fn rem(&mut self, lhs: Self::D, rhs: Self::D) -> MathResult<Self::D>;
    fn sub(&mut self, lhs: Self::D, rhs: Self::D) -> MathResult<Self::D>;
    fn to_int(&mut self, n: Self::D) -> MathResult<Self::D>;

    fn sqrt(&mut self, n: Self::D) -> MathResult<Self::D>;
    fn sqrt_digits(&mut self, n: Self::D) -> MathResult<Self::D>;

    fn exp(&mut self, n: Self::D) -> MathResult<Self::D>;
    fn ln(&mut self, n: Self::D) -> MathResult<Self::D>;
    fn log(&mut self, n: Self::D, base: Self::D) -> MathResult<Self::D>;
    fn pow(&mut self, x: Self::D, y: Self::D) -> MathResult<Self::D>;

    fn acos(&mut self, n: Self::D) -> MathResult<Self::D>;
    fn asin(&mut self, n: Self::D) -> MathResult<Self::D>;
    fn atan(&mut self, n: Self::D) -> MathResult<Self::D>;
    fn atan2(&mut self, y: Self::D, x: Self::D) -> MathResult<Self::D>;
    fn cos(&mut self, n: Self::D) -> MathResult<Self::D>;
    fn sin(&mut self, n: Self::D) -> MathResult<Self::D>;
    fn tan(&mut self, n: Self::D) -> MathResult<Self::D>;

    fn atan_poly(&mut self, n: Self::D) -> MathResult<Self::D>;
    fn atan2_poly(&mut self, y: Self::D, x: Self::D) -> MathResult<Self::D>;
    fn cos_poly(&mut self, n: Self::D) -> MathResult<Self::D>;
    fn sin_poly(&mut self, n: Self::D) -> MathResult<Self::D>;
}

/// Classifies a failed parse: a well-formed number that the format cannot
/// hold is unsupported, anything else is a failure.
fn parse_error(s: &str) -> BackendError {
    if s.parse::<f64>().map_or(false, f64::is_finite) {
        BackendError::Unsupported
    } else {
        BackendError::failure(format!("invalid operand \"{}\"", s))
    }
}
