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

//! Exponentials and logarithms.
//!
//! `exp` reduces its argument to `x = k ln 2 + r` with `|r| <= ln 2 / 2` and
//! evaluates a rational approximation of `e^r`, then scales by `2^k` with a
//! shift. `ln` reduces its argument into `[1, 2]` by halving or doubling and
//! evaluates a minimax polynomial in `s = f / (2 + f)` where `f = x - 1`.

/// Coefficients of the remez approximation of `e^r` on `[-ln 2 / 2, ln 2 / 2]`.
pub(crate) const EXP_P: [f64; 5] = [
    1.66666666666666019037e-01,
    -2.77777777770155933842e-03,
    6.61375632143793436117e-05,
    -1.65339022054652515390e-06,
    4.13813679705723846039e-08,
];

/// Coefficients of the minimax approximation of `ln` in `s^2`.
pub(crate) const LN_LG: [f64; 7] = [
    6.666666666666735130e-01,
    3.999999999940941908e-01,
    2.857142874366239149e-01,
    2.222219843214978396e-01,
    1.818357216161805012e-01,
    1.531383769920937332e-01,
    1.479819860511658591e-01,
];

macro_rules! explog_impl {
    ($t:ident, $bits:literal, $raw:ty, $wide:ty) => {
        impl<const W: u32> $t<W> {
            const EXP_P: [Self; 5] = Self::table(crate::explog::EXP_P);
            const LN_LG: [Self; 7] = Self::table(crate::explog::LN_LG);

            // The reductions work on values up to three, so two must be
            // representable with room to spare.
            const EXPLOG_WHOLE_BITS: () = assert!(
                W >= 3,
                concat!("exp and ln on ", stringify!($t), " require at least 3 whole bits")
            );

            /// The bit pattern returned by [`ln`](Self::ln) for zero: the
            /// 32-bit all-ones word, reinterpreted in the raw integer type.
            pub const LN_ZERO: Self = Self::from_bits(0xFFFF_FFFF_u32 as $raw);

            /// Computes `e^self`.
            ///
            /// Results above [`MAX`](Self::MAX) saturate to `MAX`; results
            /// below the resolution of the format are zero.
            pub fn exp(self) -> Self {
                self.exp_inner().unwrap_or(Self::MAX)
            }

            /// Computes `e^self`, failing with [`MathError::Overflow`] if the
            /// result exceeds [`MAX`](Self::MAX).
            pub fn checked_exp(self) -> Result<Self, MathError> {
                self.exp_inner()
            }

            fn exp_inner(self) -> Result<Self, MathError> {
                let () = Self::EXPLOG_WHOLE_BITS;
                if self.raw == 0 {
                    return Ok(Self::ONE);
                }
                let x = self.raw as $wide;
                // k = round(|x| / ln 2), kept wide so large arguments do not
                // wrap before the range check.
                let k = (Self::mul_wide(x.abs(), Self::LOG2_E.raw as $wide)
                    + Self::ONE_HALF.raw as $wide)
                    >> Self::FRAC_BITS;
                if x > 0 && k >= $bits {
                    return Err(MathError::Overflow);
                }
                if x < 0 && k > Self::FRAC_BITS as $wide {
                    return Ok(Self::ZERO);
                }
                let ln2 = Self::LN_2.raw as $wide;
                let r = if x > 0 { x - k * ln2 } else { x + k * ln2 };
                let r = Self::from_bits(r as $raw);

                let p = Self::EXP_P;
                let z = r * r;
                let big_r =
                    Self::TWO + z * (p[0] + z * (p[1] + z * (p[2] + z * (p[3] + z * p[4]))));
                let xp = Self::ONE + (r * Self::TWO) / (big_r - r);

                if x > 0 {
                    let scaled = (xp.raw as $wide) << k;
                    <$raw>::try_from(scaled)
                        .map(Self::from_bits)
                        .map_err(|_| MathError::Overflow)
                } else {
                    Ok(Self::from_bits(Self::ONE.raw >> k) * xp)
                }
            }

            /// Computes the natural logarithm.
            ///
            /// Negative inputs return zero and zero returns
            /// [`LN_ZERO`](Self::LN_ZERO). Use
            /// [`checked_ln`](Self::checked_ln) to distinguish these cases.
            pub fn ln(self) -> Self {
                match self.raw {
                    0 => Self::LN_ZERO,
                    r if r < 0 => Self::ZERO,
                    _ => self.ln_positive(),
                }
            }

            /// Computes the natural logarithm, failing with
            /// [`MathError::NegativeInput`] for negative inputs and
            /// [`MathError::DomainError`] for zero.
            pub fn checked_ln(self) -> Result<Self, MathError> {
                match self.raw {
                    0 => Err(MathError::DomainError),
                    r if r < 0 => Err(MathError::NegativeInput),
                    _ => Ok(self.ln_positive()),
                }
            }

            fn ln_positive(self) -> Self {
                let () = Self::EXPLOG_WHOLE_BITS;
                let mut log2: $raw = 0;
                let mut xi = self.raw;
                while xi > Self::TWO.raw {
                    xi >>= 1;
                    log2 += 1;
                }
                while xi < Self::ONE.raw {
                    xi <<= 1;
                    log2 -= 1;
                }

                let lg = Self::LN_LG;
                let f = Self::from_bits(xi) - Self::ONE;
                let s = f / (Self::TWO + f);
                let z = s * s;
                let w = z * z;
                let r = w * (lg[1] + w * (lg[3] + w * lg[5]))
                    + z * (lg[0] + w * (lg[2] + w * (lg[4] + w * lg[6])));
                // log2 * LN_2 is exact in the wide type, and the integer
                // log2 may not fit the whole part of the format.
                let scale = Self::from_bits((log2 as $wide * Self::LN_2.raw as $wide) as $raw);
                scale + f - s * (f - r)
            }

            /// Computes the logarithm of `self` in the given base as
            /// `ln(self) / ln(base)`.
            ///
            /// # Panics
            ///
            /// Panics if `base` is one.
            pub fn log(self, base: Self) -> Self {
                self.ln() / base.ln()
            }

            /// Computes the logarithm of `self` in the given base.
            ///
            /// Fails with the error of [`checked_ln`](Self::checked_ln) for
            /// either operand, and with [`MathError::DivideByZero`] if `base`
            /// is one.
            pub fn checked_log(self, base: Self) -> Result<Self, MathError> {
                let num = self.checked_ln()?;
                let den = base.checked_ln()?;
                if den.is_zero() {
                    return Err(MathError::DivideByZero);
                }
                num.checked_div(den).ok_or(MathError::Overflow)
            }

            /// Raises `self` to the power `e` as `exp(ln(self) * e)`.
            ///
            /// Returns one if `e` is zero and zero if `self` is negative.
            pub fn pow(self, e: Self) -> Self {
                if e.is_zero() {
                    return Self::ONE;
                }
                if self.is_negative() {
                    return Self::ZERO;
                }
                (self.ln() * e).exp()
            }

            /// Raises `self` to the power `e`.
            ///
            /// Zero raised to a positive power is zero. Fails with
            /// [`MathError::DomainError`] for a negative base or for zero
            /// raised to a negative power, and with [`MathError::Overflow`]
            /// if the result exceeds [`MAX`](Self::MAX).
            pub fn checked_pow(self, e: Self) -> Result<Self, MathError> {
                if e.is_zero() {
                    return Ok(Self::ONE);
                }
                if self.is_negative() {
                    return Err(MathError::DomainError);
                }
                if self.is_zero() {
                    return if e.is_positive() {
                        Ok(Self::ZERO)
                    } else {
                        Err(MathError::DomainError)
                    };
                }
                self.ln_positive()
                    .checked_mul(e)
                    .ok_or(MathError::Overflow)?
                    .checked_exp()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Fixed32, Fixed64, MathError};

    type Q16 = Fixed32<16>;

    fn q16(v: f64) -> Q16 {
        Q16::from_f64(v)
    }

    #[test]
    fn test_narrowest_format() {
        // Three whole bits leave [-4, 4), which still holds e and 2.
        type Q3 = Fixed32<3>;
        let ulp = Q3::DELTA.to_f64();
        let cases = [
            (Q3::ONE.exp(), std::f64::consts::E),
            (Q3::from_f64(-1.0).exp(), (-1.0f64).exp()),
            (Q3::from_f64(1.25).exp(), 1.25f64.exp()),
            (Q3::from_f64(3.5).ln(), 3.5f64.ln()),
            (Q3::from_f64(0.5).ln(), 0.5f64.ln()),
            (Q3::TWO.pow(Q3::ONE_HALF), std::f64::consts::SQRT_2),
        ];
        for (actual, expected) in cases {
            assert!(
                (actual.to_f64() - expected).abs() <= 8.0 * ulp,
                "{} differs from {}",
                actual,
                expected
            );
        }
        assert_eq!(Q3::E.ln(), Q3::ONE);
        assert_eq!(Q3::from_int(2).checked_exp(), Err(MathError::Overflow));
    }

    #[test]
    fn test_exp() {
        let cases = [
            (1.0, 178144),
            (3.0, 1316320),
            (-1.0, 24110),
            (0.5, 108052),
            (10.0, 1443545088),
            (-10.0, 3),
        ];
        for (x, expected) in cases {
            assert_eq!(q16(x).exp().to_bits(), expected, "exp({})", x);
        }
        assert_eq!(Q16::ZERO.exp(), Q16::ONE);
        assert_eq!(q16(-20.0).exp(), Q16::ZERO);
        assert_eq!(Q16::MIN.exp(), Q16::ZERO);
    }

    #[test]
    fn test_exp_overflow() {
        assert_eq!(q16(11.0).exp(), Q16::MAX);
        assert_eq!(Q16::MAX.exp(), Q16::MAX);
        assert_eq!(q16(11.0).checked_exp(), Err(MathError::Overflow));
        assert_eq!(q16(1.0).checked_exp(), Ok(Q16::from_bits(178144)));
    }

    #[test]
    fn test_exp_wide_formats() {
        assert_eq!(Fixed32::<14>::from_f64(1.0).exp().to_bits(), 712582);
        assert_eq!(Fixed64::<32>::from_f64(1.0).exp().to_bits(), 11674931554);
        assert_eq!(Fixed64::<32>::from_f64(-10.0).exp().to_bits(), 194991);
        assert_eq!(Fixed64::<32>::from_f64(11.0).exp().to_bits(), 257157480382464);
    }

    #[test]
    fn test_ln() {
        let cases = [
            (std::f64::consts::E, 65536),
            (2.0, 45427),
            (10.0, 150902),
            (0.5, -45426),
            (0.001, -452243),
            (100.0, 301804),
        ];
        for (x, expected) in cases {
            assert_eq!(q16(x).ln().to_bits(), expected, "ln({})", x);
        }
        assert_eq!(Q16::ONE.ln(), Q16::ZERO);
        assert_eq!(Fixed64::<32>::from_f64(10.0).ln().to_bits(), 9889527671);
    }

    #[test]
    fn test_ln_sentinels() {
        assert_eq!(Q16::ZERO.ln(), Q16::LN_ZERO);
        assert_eq!(Q16::ZERO.ln().to_bits(), -1);
        assert_eq!(Fixed64::<32>::ZERO.ln().to_bits(), 0xFFFF_FFFF);
        assert_eq!(q16(-2.0).ln(), Q16::ZERO);
        assert_eq!(Q16::ZERO.checked_ln(), Err(MathError::DomainError));
        assert_eq!(q16(-2.0).checked_ln(), Err(MathError::NegativeInput));
    }

    #[test]
    fn test_log() {
        assert_eq!(q16(8.0).log(q16(2.0)).to_bits(), 196605);
        assert_eq!(q16(100.0).log(q16(10.0)), q16(2.0));
        assert_eq!(Fixed64::<32>::from_f64(8.0).log(Fixed64::<32>::TWO).to_bits(), 12884901890);
        assert_eq!(q16(8.0).checked_log(Q16::ONE), Err(MathError::DivideByZero));
        assert_eq!(q16(8.0).checked_log(Q16::ZERO), Err(MathError::DomainError));
        assert_eq!(q16(-8.0).checked_log(q16(2.0)), Err(MathError::NegativeInput));
    }

    #[test]
    fn test_pow() {
        assert_eq!(q16(2.0).pow(q16(10.0)).to_bits(), 67119104);
        assert_eq!(q16(2.0).pow(q16(0.5)).to_bits(), 92684);
        assert_eq!(q16(9.0).pow(q16(0.5)).to_bits(), 196612);
        assert_eq!(q16(-2.0).pow(q16(2.0)), Q16::ZERO);
        assert_eq!(q16(-2.0).pow(Q16::ZERO), Q16::ONE);
        assert_eq!(q16(5.0).pow(Q16::ZERO), Q16::ONE);
    }

    #[test]
    fn test_checked_pow() {
        assert_eq!(q16(2.0).checked_pow(q16(10.0)), Ok(Q16::from_bits(67119104)));
        assert_eq!(q16(-2.0).checked_pow(q16(2.0)), Err(MathError::DomainError));
        assert_eq!(Q16::ZERO.checked_pow(q16(2.0)), Ok(Q16::ZERO));
        assert_eq!(Q16::ZERO.checked_pow(q16(-2.0)), Err(MathError::DomainError));
        assert_eq!(q16(10.0).checked_pow(q16(20.0)), Err(MathError::Overflow));
        assert_eq!(Q16::ZERO.checked_pow(Q16::ZERO), Ok(Q16::ONE));
    }
}
