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

//! Conversions between fixed-point values and primitive numbers.
//!
//! Floating-point conversions exist for interoperability and display. None
//! of the arithmetic in this crate goes through them.

macro_rules! conv_impl {
    ($t:ident, $raw:ty, $wide:ty) => {
        impl<const W: u32> $t<W> {
            conv_impl!(@float $raw, $wide, f32 f64);
        }

        impl<const W: u32> TryFrom<f64> for $t<W> {
            type Error = TryFromFixedError;

            fn try_from(x: f64) -> Result<Self, TryFromFixedError> {
                Self::checked_from_f64(x).ok_or(TryFromFixedError)
            }
        }

        impl<const W: u32> TryFrom<f32> for $t<W> {
            type Error = TryFromFixedError;

            fn try_from(x: f32) -> Result<Self, TryFromFixedError> {
                Self::checked_from_f32(x).ok_or(TryFromFixedError)
            }
        }

        conv_impl!(@from_int $t, $raw, i8 i16 i32 i64 u8 u16 u32 u64);
        conv_impl!(@to_int $t, $raw, i32 i64);
    };
    (@float $raw:ty, $wide:ty, $($f:ident)*) => {
        paste::paste! {
            $(
                #[doc = concat!("Converts the value to the nearest `", stringify!($f), "`.")]
                pub fn [<to_ $f>](self) -> $f {
                    (self.raw as f64 / ((1 as $wide) << Self::FRAC_BITS) as f64) as $f
                }
            )*
        }

        /// Constructs the value nearest to an `f32`, or returns `None` if it
        /// is NaN or out of range.
        pub fn checked_from_f32(x: f32) -> Option<Self> {
            Self::checked_from_f64(f64::from(x))
        }

        /// Constructs the value nearest to an `f32`.
        ///
        /// # Panics
        ///
        /// Panics if `x` is NaN or out of range.
        pub fn from_f32(x: f32) -> Self {
            Self::from_f64(f64::from(x))
        }
    };
    (@from_int $t:ident, $raw:ty, $($int:ty)*) => {
        $(
            impl<const W: u32> TryFrom<$int> for $t<W> {
                type Error = TryFromFixedError;

                fn try_from(n: $int) -> Result<Self, TryFromFixedError> {
                    let raw = i128::from(n) << Self::FRAC_BITS;
                    <$raw>::try_from(raw)
                        .map(Self::from_bits)
                        .map_err(|_| TryFromFixedError)
                }
            }
        )*
    };
    (@to_int $t:ident, $raw:ty, $($int:ty)*) => {
        $(
            /// Fails if the value has a fractional part or its integer part
            /// does not fit.
            impl<const W: u32> TryFrom<$t<W>> for $int {
                type Error = TryFromFixedError;

                fn try_from(n: $t<W>) -> Result<$int, TryFromFixedError> {
                    if !n.frac_part().is_zero() {
                        return Err(TryFromFixedError);
                    }
                    <$int>::try_from(n.to_int()).map_err(|_| TryFromFixedError)
                }
            }
        )*
    };
}

#[cfg(test)]
mod tests {
    use crate::{Fixed32, Fixed64, TryFromFixedError};

    type Q16 = Fixed32<16>;

    #[test]
    fn test_float_conversions() {
        assert_eq!(Q16::from_bits(98304).to_f64(), 1.5);
        assert_eq!(Q16::from_bits(-32768).to_f32(), -0.5);
        assert_eq!(Q16::from_f32(0.25).to_bits(), 16384);
        assert_eq!(Fixed64::<32>::MIN.to_f64(), -2147483648.0);
        assert_eq!(Q16::checked_from_f32(f32::NAN), None);
        assert_eq!(Q16::checked_from_f32(1e6), None);
        assert_eq!(Q16::try_from(2.5f64), Ok(Q16::from_bits(163840)));
        assert_eq!(Q16::try_from(f64::INFINITY), Err(TryFromFixedError));
        assert_eq!(Q16::try_from(-40000.0f32), Err(TryFromFixedError));
    }

    #[test]
    fn test_from_int() {
        assert_eq!(Q16::try_from(7i8), Ok(Q16::from_int(7)));
        assert_eq!(Q16::try_from(-32768i16), Ok(Q16::MIN));
        assert_eq!(Q16::try_from(32767u16), Ok(Q16::from_int(32767)));
        assert_eq!(Q16::try_from(32768u32), Err(TryFromFixedError));
        assert_eq!(Q16::try_from(-32769i64), Err(TryFromFixedError));
        assert_eq!(Q16::try_from(u64::MAX), Err(TryFromFixedError));
        assert_eq!(Fixed64::<32>::try_from(i32::MIN), Ok(Fixed64::<32>::MIN));
        assert_eq!(Fixed64::<32>::try_from(u32::MAX), Err(TryFromFixedError));
    }

    #[test]
    fn test_to_int() {
        assert_eq!(i32::try_from(Q16::from_int(-12)), Ok(-12));
        assert_eq!(i64::try_from(Q16::MIN), Ok(-32768));
        assert_eq!(i32::try_from(Q16::ONE_HALF), Err(TryFromFixedError));
        let big = Fixed64::<48>::from_int(1 << 40);
        assert_eq!(i32::try_from(big), Err(TryFromFixedError));
        assert_eq!(i64::try_from(big), Ok(1 << 40));
        assert_eq!(Fixed64::<16>::checked_from_int(1 << 40), None);
    }
}
