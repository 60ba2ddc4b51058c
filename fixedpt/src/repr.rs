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

//! The scaled-integer representation shared by every fixed-point width.
//!
//! `fixed_impl!` expands to the type definition, its constants, the raw
//! arithmetic primitives and the operator overloads. The remaining modules
//! layer their functions on top of the primitives defined here.

macro_rules! fixed_impl {
    ($(#[$attr:meta])* $t:ident, $bits:literal, $raw:ty, $wide:ty) => {
        $(#[$attr])*
        #[repr(transparent)]
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $t<const W: u32> {
            pub(crate) raw: $raw,
        }

        impl<const W: u32> $t<W> {
            /// The total number of bits in the representation.
            pub const BITS: u32 = $bits;

            /// The number of bits to the left of the binary point, including
            /// the sign bit.
            pub const WHOLE_BITS: u32 = W;

            /// The number of bits to the right of the binary point.
            pub const FRAC_BITS: u32 = {
                assert!(
                    W >= 2 && W < $bits,
                    concat!("whole bits of ", stringify!($t), " must be in [2, ", $bits, ")")
                );
                $bits - W
            };

            pub(crate) const FRAC_MASK: $raw = (1 << Self::FRAC_BITS) - 1;

            /// The value zero.
            pub const ZERO: Self = Self::from_bits(0);

            /// The smallest positive value, `2^-FRAC_BITS`.
            pub const DELTA: Self = Self::from_bits(1);

            /// The smallest representable value, `-2^(WHOLE_BITS - 1)`.
            pub const MIN: Self = Self::from_bits(<$raw>::MIN);

            /// The largest representable value, `2^(WHOLE_BITS - 1) - DELTA`.
            pub const MAX: Self = Self::from_bits(<$raw>::MAX);

            /// The value one.
            pub const ONE: Self = Self::from_bits(1 << Self::FRAC_BITS);

            /// The value one half.
            pub const ONE_HALF: Self = Self::from_bits(1 << (Self::FRAC_BITS - 1));

            /// The value two.
            pub const TWO: Self = Self::from_f64(2.0);

            /// Archimedes' constant (π).
            pub const PI: Self = Self::from_f64(std::f64::consts::PI);

            /// 2π.
            pub const TWO_PI: Self = Self::from_f64(std::f64::consts::TAU);

            /// π/2.
            pub const FRAC_PI_2: Self = Self::from_f64(std::f64::consts::FRAC_PI_2);

            /// π/3.
            pub const FRAC_PI_3: Self = Self::from_f64(std::f64::consts::FRAC_PI_3);

            /// π/4.
            pub const FRAC_PI_4: Self = Self::from_f64(std::f64::consts::FRAC_PI_4);

            /// 2π/3.
            pub const FRAC_2PI_3: Self = Self::from_f64(2.0 * std::f64::consts::FRAC_PI_3);

            /// 3π/4.
            pub const FRAC_3PI_4: Self = Self::from_f64(3.0 * std::f64::consts::FRAC_PI_4);

            /// Euler's number (e).
            pub const E: Self = Self::from_f64(std::f64::consts::E);

            /// √2.
            pub const SQRT_2: Self = Self::from_f64(std::f64::consts::SQRT_2);

            /// 1/√2.
            pub const FRAC_1_SQRT_2: Self = Self::from_f64(std::f64::consts::FRAC_1_SQRT_2);

            /// √3.
            pub const SQRT_3: Self = Self::from_f64(1.7320508075688772);

            /// 1/√3.
            pub const FRAC_1_SQRT_3: Self = Self::from_f64(0.5773502691896257);

            /// ln(2).
            pub const LN_2: Self = Self::from_f64(std::f64::consts::LN_2);

            /// log2(e), i.e. 1/ln(2).
            pub const LOG2_E: Self = Self::from_f64(std::f64::consts::LOG2_E);

            /// Constructs a value from its raw two's-complement representation.
            pub const fn from_bits(raw: $raw) -> Self {
                Self { raw }
            }

            /// Returns the raw two's-complement representation of the value.
            pub const fn to_bits(self) -> $raw {
                self.raw
            }

            /// Constructs the value nearest to `x`, rounding ties away from
            /// zero.
            ///
            /// This function is usable in constant expressions, where an out of
            /// range or NaN argument is a compile error.
            ///
            /// # Panics
            ///
            /// Panics if `x` is NaN or lies outside the range of the format.
            pub const fn from_f64(x: f64) -> Self {
                match Self::checked_from_f64(x) {
                    Some(v) => v,
                    None => panic!(concat!("literal out of range for ", stringify!($t))),
                }
            }

            /// Constructs the value nearest to `x` as
            /// [`from_f64`](Self::from_f64) does, or returns `None` if `x` is
            /// NaN or lies outside the range of the format.
            pub const fn checked_from_f64(x: f64) -> Option<Self> {
                let scaled = x * ((1 as $wide) << Self::FRAC_BITS) as f64;
                let rounded = if x >= 0.0 { scaled + 0.5 } else { scaled - 0.5 };
                // The cast truncates towards zero, so anything strictly inside
                // one unit of the bounds lands in range.
                if rounded >= <$raw>::MIN as f64 - 1.0 && rounded < <$raw>::MAX as f64 + 1.0 {
                    Some(Self::from_bits(rounded as $raw))
                } else {
                    None
                }
            }

            /// Converts a table of coefficients at compile time.
            pub(crate) const fn table<const N: usize>(values: [f64; N]) -> [Self; N] {
                let mut out = [Self::ZERO; N];
                let mut i = 0;
                while i < N {
                    out[i] = Self::from_f64(values[i]);
                    i += 1;
                }
                out
            }

            /// Constructs a value from an integer, wrapping if the integer
            /// does not fit in the whole bits of the format.
            pub const fn from_int(n: $raw) -> Self {
                Self::from_bits(n.wrapping_shl(Self::FRAC_BITS))
            }

            /// Constructs a value from an integer, or returns `None` if the
            /// integer does not fit in the whole bits of the format.
            pub fn checked_from_int(n: $raw) -> Option<Self> {
                let raw = (n as $wide) << Self::FRAC_BITS;
                <$raw>::try_from(raw).ok().map(Self::from_bits)
            }

            /// Returns the integer part of the value, rounding towards negative
            /// infinity.
            pub const fn to_int(self) -> $raw {
                self.raw >> Self::FRAC_BITS
            }

            /// Returns the fractional bits of the value.
            ///
            /// For negative values this is the distance from the next lower
            /// integer, matching [`to_int`](Self::to_int).
            pub const fn frac_part(self) -> Self {
                Self::from_bits(self.raw & Self::FRAC_MASK)
            }

            /// Reports whether the value is less than zero.
            pub const fn is_negative(self) -> bool {
                self.raw < 0
            }

            /// Reports whether the value is greater than zero.
            pub const fn is_positive(self) -> bool {
                self.raw > 0
            }

            /// Reports whether the value is zero.
            pub const fn is_zero(self) -> bool {
                self.raw == 0
            }

            /// Returns `-1`, `0` or `1` according to the sign of the value.
            pub const fn signum(self) -> Self {
                match self.raw {
                    0 => Self::ZERO,
                    r if r < 0 => Self::from_bits(-(1 << Self::FRAC_BITS)),
                    _ => Self::ONE,
                }
            }

            /// Computes the absolute value, wrapping at [`MIN`](Self::MIN).
            pub const fn abs(self) -> Self {
                Self::from_bits(self.raw.wrapping_abs())
            }

            /// Adds `rhs`, wrapping on overflow.
            pub const fn wrapping_add(self, rhs: Self) -> Self {
                Self::from_bits(self.raw.wrapping_add(rhs.raw))
            }

            /// Subtracts `rhs`, wrapping on overflow.
            pub const fn wrapping_sub(self, rhs: Self) -> Self {
                Self::from_bits(self.raw.wrapping_sub(rhs.raw))
            }

            /// Negates the value, wrapping at [`MIN`](Self::MIN).
            pub const fn wrapping_neg(self) -> Self {
                Self::from_bits(self.raw.wrapping_neg())
            }

            /// Multiplies by `rhs` in the double-width accumulator.
            ///
            /// The product is shifted back to the fixed-point scale and the
            /// most significant discarded bit is added back in, so a discarded
            /// fraction of exactly one half rounds up. The narrowing wraps.
            pub const fn wrapping_mul(self, rhs: Self) -> Self {
                Self::from_bits(Self::mul_wide(self.raw as $wide, rhs.raw as $wide) as $raw)
            }

            /// Divides by `rhs`, truncating towards zero. The narrowing wraps.
            ///
            /// # Panics
            ///
            /// Panics if `rhs` is zero.
            pub const fn wrapping_div(self, rhs: Self) -> Self {
                let wide = ((self.raw as $wide) << Self::FRAC_BITS) / rhs.raw as $wide;
                Self::from_bits(wide as $raw)
            }

            /// Computes the remainder of truncating division by `rhs`. The
            /// remainder has the sign of `self`.
            ///
            /// # Panics
            ///
            /// Panics if `rhs` is zero.
            pub const fn wrapping_rem(self, rhs: Self) -> Self {
                Self::from_bits(self.raw.wrapping_rem(rhs.raw))
            }

            /// Adds `rhs`, or returns `None` on overflow.
            pub fn checked_add(self, rhs: Self) -> Option<Self> {
                self.raw.checked_add(rhs.raw).map(Self::from_bits)
            }

            /// Subtracts `rhs`, or returns `None` on overflow.
            pub fn checked_sub(self, rhs: Self) -> Option<Self> {
                self.raw.checked_sub(rhs.raw).map(Self::from_bits)
            }

            /// Negates the value, or returns `None` for [`MIN`](Self::MIN).
            pub fn checked_neg(self) -> Option<Self> {
                self.raw.checked_neg().map(Self::from_bits)
            }

            /// Multiplies by `rhs` as [`wrapping_mul`](Self::wrapping_mul)
            /// does, or returns `None` if the product does not fit.
            pub fn checked_mul(self, rhs: Self) -> Option<Self> {
                let wide = Self::mul_wide(self.raw as $wide, rhs.raw as $wide);
                <$raw>::try_from(wide).ok().map(Self::from_bits)
            }

            /// Divides by `rhs` as [`wrapping_div`](Self::wrapping_div) does,
            /// or returns `None` if `rhs` is zero or the quotient does not fit.
            pub fn checked_div(self, rhs: Self) -> Option<Self> {
                if rhs.raw == 0 {
                    return None;
                }
                let wide = ((self.raw as $wide) << Self::FRAC_BITS) / rhs.raw as $wide;
                <$raw>::try_from(wide).ok().map(Self::from_bits)
            }

            /// Computes the remainder of truncating division by `rhs`, or
            /// returns `None` if `rhs` is zero.
            pub fn checked_rem(self, rhs: Self) -> Option<Self> {
                self.raw.checked_rem(rhs.raw).map(Self::from_bits)
            }

            /// The rounding multiply on raw operands already widened, at the
            /// fixed-point scale, without narrowing.
            pub(crate) const fn mul_wide(a: $wide, b: $wide) -> $wide {
                let product = a * b;
                (product >> Self::FRAC_BITS) + ((product >> (Self::FRAC_BITS - 1)) & 1)
            }
        }

        impl<const W: u32> Neg for $t<W> {
            type Output = Self;

            fn neg(self) -> Self {
                self.wrapping_neg()
            }
        }

        impl<const W: u32> Add for $t<W> {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }
        }

        impl<const W: u32> AddAssign for $t<W> {
            fn add_assign(&mut self, rhs: Self) {
                *self = self.wrapping_add(rhs);
            }
        }

        impl<const W: u32> Sub for $t<W> {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }
        }

        impl<const W: u32> SubAssign for $t<W> {
            fn sub_assign(&mut self, rhs: Self) {
                *self = self.wrapping_sub(rhs);
            }
        }

        impl<const W: u32> Mul for $t<W> {
            type Output = Self;

            fn mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }
        }

        impl<const W: u32> MulAssign for $t<W> {
            fn mul_assign(&mut self, rhs: Self) {
                *self = self.wrapping_mul(rhs);
            }
        }

        impl<const W: u32> Div for $t<W> {
            type Output = Self;

            fn div(self, rhs: Self) -> Self {
                self.wrapping_div(rhs)
            }
        }

        impl<const W: u32> DivAssign for $t<W> {
            fn div_assign(&mut self, rhs: Self) {
                *self = self.wrapping_div(rhs);
            }
        }

        impl<const W: u32> Rem for $t<W> {
            type Output = Self;

            fn rem(self, rhs: Self) -> Self {
                self.wrapping_rem(rhs)
            }
        }

        impl<const W: u32> RemAssign for $t<W> {
            fn rem_assign(&mut self, rhs: Self) {
                *self = self.wrapping_rem(rhs);
            }
        }

        impl<const W: u32> Sum for $t<W> {
            fn sum<I>(iter: I) -> Self
            where
                I: Iterator<Item = Self>,
            {
                iter.fold(Self::ZERO, |acc, x| acc + x)
            }
        }

        impl<'a, const W: u32> Sum<&'a $t<W>> for $t<W> {
            fn sum<I>(iter: I) -> Self
            where
                I: Iterator<Item = &'a $t<W>>,
            {
                iter.copied().sum()
            }
        }

        impl<const W: u32> Product for $t<W> {
            fn product<I>(iter: I) -> Self
            where
                I: Iterator<Item = Self>,
            {
                iter.fold(Self::ONE, |acc, x| acc * x)
            }
        }

        impl<'a, const W: u32> Product<&'a $t<W>> for $t<W> {
            fn product<I>(iter: I) -> Self
            where
                I: Iterator<Item = &'a $t<W>>,
            {
                iter.copied().product()
            }
        }
    };
}
