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

/// An error indicating that a string is not a valid fixed-point number, or
/// that the number it spells does not fit the target format.
#[derive(Debug, Eq, PartialEq)]
pub struct ParseFixedError;

impl fmt::Display for ParseFixedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid fixed-point syntax")
    }
}

impl Error for ParseFixedError {}

/// An error indicating that a value cannot be converted between a fixed-point
/// type and a primitive type without leaving the range of the target.
///
/// Causes for this failure include:
/// - Integers whose magnitude exceeds the whole bits of the format
/// - Floats that are infinite, NaN, or out of range
/// - Fixed-point values with a fractional part, or whose integer part does
///   not fit the primitive
#[derive(Debug, Eq, PartialEq)]
pub struct TryFromFixedError;

impl fmt::Display for TryFromFixedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("value cannot be expressed in target type")
    }
}

impl Error for TryFromFixedError {}

/// The failure modes of the checked mathematical functions.
///
/// The unchecked variants of these functions return a sentinel value instead;
/// see the documentation of each function for the exact bit pattern.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum MathError {
    /// The operand was negative where only non-negative operands are defined,
    /// e.g., the square root or the logarithm of a negative number.
    NegativeInput,
    /// The operand is outside the domain of the function, e.g., the arcsine
    /// of a value greater than one or the logarithm of zero.
    DomainError,
    /// The operation divided by zero.
    DivideByZero,
    /// The result exceeds the range of the format.
    Overflow,
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MathError::NegativeInput => f.write_str("negative input"),
            MathError::DomainError => f.write_str("input outside of function domain"),
            MathError::DivideByZero => f.write_str("division by zero"),
            MathError::Overflow => f.write_str("result out of range"),
        }
    }
}

impl Error for MathError {}
