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

use fixedpt::{Fixed32, MathError, Precision, SqrtAlgorithm};

use crate::backend::{parse_error, Backend, BackendError, BackendResult, MathResult};

/// Runs test vectors against [`Fixed32`] with `W` whole bits.
pub struct Fixed32Backend<const W: u32> {
    precision: Precision,
}

impl<const W: u32> Backend for Fixed32Backend<W> {
    type D = Fixed32<W>;

    fn new() -> Self {
        Fixed32Backend {
            precision: Precision::Default,
        }
    }

    fn name(&self) -> String {
        format!("q{}.{}", W, Fixed32::<W>::FRAC_BITS)
    }

    fn delta(&self) -> f64 {
        Fixed32::<W>::DELTA.to_f64()
    }

    fn parse(&self, s: &str) -> BackendResult<Self::D> {
        s.parse().map_err(|_| parse_error(s))
    }

    fn from_be_bytes(&self, bytes: &[u8]) -> BackendResult<Self::D> {
        let bytes: [u8; 4] = bytes.try_into().map_err(|_| BackendError::Unsupported)?;
        Ok(Fixed32::from_bits(i32::from_be_bytes(bytes)))
    }

    fn constant(&self, name: &str) -> Option<Self::D> {
        match name {
            "min" => Some(Fixed32::MIN),
            "max" => Some(Fixed32::MAX),
            "delta" => Some(Fixed32::DELTA),
            "pi" => Some(Fixed32::PI),
            "e" => Some(Fixed32::E),
            _ => None,
        }
    }

    fn to_f64(&self, n: Self::D) -> f64 {
        n.to_f64()
    }

    fn to_string(&self, n: Self::D) -> String {
        n.to_string_with(self.precision)
    }

    fn set_precision(&mut self, precision: Precision) -> BackendResult<()> {
        self.precision = precision;
        Ok(())
    }

    fn abs(&mut self, n: Self::D) -> MathResult<Self::D> {
        if n.is_negative() {
            n.checked_neg().ok_or(MathError::Overflow)
        } else {
            Ok(n)
        }
    }

    fn add(&mut self, lhs: Self::D, rhs: Self::D) -> MathResult<Self::D> {
        lhs.checked_add(rhs).ok_or(MathError::Overflow)
    }

    fn div(&mut self, lhs: Self::D, rhs: Self::D) -> MathResult<Self::D> {
        if rhs.is_zero() {
            return Err(MathError::DivideByZero);
        }
        lhs.checked_div(rhs).ok_or(MathError::Overflow)
    }

    fn frac_part(&mut self, n: Self::D) -> MathResult<Self::D> {
        Ok(n.frac_part())
    }

    fn minus(&mut self, n: Self::D) -> MathResult<Self::D> {
        n.checked_neg().ok_or(MathError::Overflow)
    }

    fn mul(&mut self, lhs: Self::D, rhs: Self::D) -> MathResult<Self::D> {
        lhs.checked_mul(rhs).ok_or(MathError::Overflow)
    }

    fn rem(&mut self, lhs: Self::D, rhs: Self::D) -> MathResult<Self::D> {
        if rhs.is_zero() {
            return Err(MathError::DivideByZero);
        }
        lhs.checked_rem(rhs).ok_or(MathError::Overflow)
    }

    fn sub(&mut self, lhs: Self::D, rhs: Self::D) -> MathResult<Self::D> {
        lhs.checked_sub(rhs).ok_or(MathError::Overflow)
    }

    fn to_int(&mut self, n: Self::D) -> MathResult<Self::D> {
        Ok(Fixed32::from_int(n.to_int()))
    }

    fn sqrt(&mut self, n: Self::D) -> MathResult<Self::D> {
        n.checked_sqrt()
    }

    fn sqrt_digits(&mut self, n: Self::D) -> MathResult<Self::D> {
        if n.is_negative() {
            return Err(MathError::NegativeInput);
        }
        Ok(n.sqrt_with(SqrtAlgorithm::DigitByDigit))
    }

    fn exp(&mut self, n: Self::D) -> MathResult<Self::D> {
        n.checked_exp()
    }

    fn ln(&mut self, n: Self::D) -> MathResult<Self::D> {
        n.checked_ln()
    }

    fn log(&mut self, n: Self::D, base: Self::D) -> MathResult<Self::D> {
        n.checked_log(base)
    }

    fn pow(&mut self, x: Self::D, y: Self::D) -> MathResult<Self::D> {
        x.checked_pow(y)
    }

    fn acos(&mut self, n: Self::D) -> MathResult<Self::D> {
        n.checked_acos()
    }

    fn asin(&mut self, n: Self::D) -> MathResult<Self::D> {
        n.checked_asin()
    }

    fn atan(&mut self, n: Self::D) -> MathResult<Self::D> {
        Ok(n.atan())
    }

    fn atan2(&mut self, y: Self::D, x: Self::D) -> MathResult<Self::D> {
        Ok(y.atan2(x))
    }

    fn cos(&mut self, n: Self::D) -> MathResult<Self::D> {
        Ok(n.cos())
    }

    fn sin(&mut self, n: Self::D) -> MathResult<Self::D> {
        Ok(n.sin())
    }

    fn tan(&mut self, n: Self::D) -> MathResult<Self::D> {
        n.checked_tan()
    }

    fn atan_poly(&mut self, n: Self::D) -> MathResult<Self::D> {
        Ok(n.atan_poly())
    }

    fn atan2_poly(&mut self, y: Self::D, x: Self::D) -> MathResult<Self::D> {
        Ok(y.atan2_poly(x))
    }

    fn cos_poly(&mut self, n: Self::D) -> MathResult<Self::D> {
        Ok(n.cos_poly())
    }

    fn sin_poly(&mut self, n: Self::D) -> MathResult<Self::D> {
        Ok(n.sin_poly())
    }
}
