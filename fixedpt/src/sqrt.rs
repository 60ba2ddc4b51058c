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

//! Square roots.

/// Selects the algorithm used by `sqrt_with`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum SqrtAlgorithm {
    /// Newton-Raphson iteration. Inputs in `(0, 1)` are replaced by their
    /// reciprocal before iterating and the root is inverted afterwards.
    /// Results are within two units in the last place.
    #[default]
    NewtonRaphson,
    /// The division-free binary digit-by-digit method, rounded to nearest.
    /// Results are within one half unit in the last place.
    DigitByDigit,
}

macro_rules! sqrt_impl {
    ($t:ident, $raw:ty, $wide:ty, $uwide:ty) => {
        impl<const W: u32> $t<W> {
            // Inputs in (0, 1) above this bound have a representable
            // reciprocal. Smaller inputs are iterated on directly.
            const SQRT_INVERT_MIN: $wide = {
                let min = ((1 as $wide) << (2 * Self::FRAC_BITS)) / <$raw>::MAX as $wide;
                if min > 6 {
                    min
                } else {
                    6
                }
            };

            /// Computes the square root with [`SqrtAlgorithm::NewtonRaphson`].
            ///
            /// Returns `-DELTA` (raw `-1`) for negative inputs. Zero and one
            /// are returned unchanged.
            pub fn sqrt(self) -> Self {
                self.sqrt_newton()
            }

            /// Computes the square root with the given algorithm.
            ///
            /// Returns `-DELTA` (raw `-1`) for negative inputs.
            pub fn sqrt_with(self, algorithm: SqrtAlgorithm) -> Self {
                match algorithm {
                    SqrtAlgorithm::NewtonRaphson => self.sqrt_newton(),
                    SqrtAlgorithm::DigitByDigit => self.sqrt_digits(),
                }
            }

            /// Computes the square root, failing with
            /// [`MathError::NegativeInput`] for negative inputs.
            pub fn checked_sqrt(self) -> Result<Self, MathError> {
                if self.raw < 0 {
                    return Err(MathError::NegativeInput);
                }
                Ok(self.sqrt_newton())
            }

            fn sqrt_newton(self) -> Self {
                let one = Self::ONE.raw as $wide;
                let mut a = self.raw as $wide;
                if a < 0 {
                    return Self::from_bits(-1);
                }
                if a == 0 || a == one {
                    return self;
                }

                let invert = a < one && a > Self::SQRT_INVERT_MIN;
                if invert {
                    a = (one << Self::FRAC_BITS) / a;
                }
                // One iteration per two-bit group of the operand.
                let iterations = if a > one {
                    (<$wide>::BITS - a.leading_zeros() + 1) / 2
                } else {
                    Self::FRAC_BITS
                };

                let mut l = (a >> 1) + 1;
                for _ in 0..iterations {
                    l = (l + (a << Self::FRAC_BITS) / l) >> 1;
                }
                if invert {
                    l = (one << Self::FRAC_BITS) / l;
                }
                Self::from_bits(l as $raw)
            }

            fn sqrt_digits(self) -> Self {
                if self.raw < 0 {
                    return Self::from_bits(-1);
                }
                // Shifting the operand up by FRAC_BITS leaves the integer root
                // at the fixed-point scale.
                let mut op = (self.raw as $uwide) << Self::FRAC_BITS;
                let mut res: $uwide = 0;
                let mut bit: $uwide = match op {
                    0 => 0,
                    _ => 1 << ((<$uwide>::BITS - 1 - op.leading_zeros()) & !1),
                };
                while bit != 0 {
                    if op >= res + bit {
                        op -= res + bit;
                        res = (res >> 1) + bit;
                    } else {
                        res >>= 1;
                    }
                    bit >>= 2;
                }
                if op > res {
                    res += 1;
                }
                Self::from_bits(res as $raw)
            }
        }
    };
}
