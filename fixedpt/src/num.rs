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

//! Implementations of the `num-traits` numeric traits.

macro_rules! num_impl {
    ($t:ident, $raw:ty, $wide:ty) => {
        impl<const W: u32> num_traits::Zero for $t<W> {
            fn zero() -> Self {
                Self::ZERO
            }

            fn is_zero(&self) -> bool {
                self.raw == 0
            }
        }

        impl<const W: u32> num_traits::One for $t<W> {
            fn one() -> Self {
                Self::ONE
            }
        }

        impl<const W: u32> num_traits::Bounded for $t<W> {
            fn min_value() -> Self {
                Self::MIN
            }

            fn max_value() -> Self {
                Self::MAX
            }
        }

        impl<const W: u32> num_traits::Num for $t<W> {
            type FromStrRadixErr = ParseFixedError;

            /// Only radix 10 is supported.
            fn from_str_radix(s: &str, radix: u32) -> Result<Self, ParseFixedError> {
                if radix != 10 {
                    return Err(ParseFixedError);
                }
                s.parse()
            }
        }

        impl<const W: u32> num_traits::Signed for $t<W> {
            fn abs(&self) -> Self {
                $t::abs(*self)
            }

            fn abs_sub(&self, other: &Self) -> Self {
                if *self <= *other {
                    Self::ZERO
                } else {
                    *self - *other
                }
            }

            fn signum(&self) -> Self {
                $t::signum(*self)
            }

            fn is_positive(&self) -> bool {
                self.raw > 0
            }

            fn is_negative(&self) -> bool {
                self.raw < 0
            }
        }

        /// Integer conversions truncate towards zero.
        impl<const W: u32> num_traits::ToPrimitive for $t<W> {
            fn to_i64(&self) -> Option<i64> {
                let int = (self.raw as $wide) / ((1 as $wide) << Self::FRAC_BITS);
                i64::try_from(int).ok()
            }

            fn to_u64(&self) -> Option<u64> {
                let int = (self.raw as $wide) / ((1 as $wide) << Self::FRAC_BITS);
                u64::try_from(int).ok()
            }

            fn to_f32(&self) -> Option<f32> {
                Some($t::to_f32(*self))
            }

            fn to_f64(&self) -> Option<f64> {
                Some($t::to_f64(*self))
            }
        }

        impl<const W: u32> num_traits::FromPrimitive for $t<W> {
            fn from_i64(n: i64) -> Option<Self> {
                Self::try_from(n).ok()
            }

            fn from_u64(n: u64) -> Option<Self> {
                Self::try_from(n).ok()
            }

            fn from_f32(n: f32) -> Option<Self> {
                Self::checked_from_f32(n)
            }

            fn from_f64(n: f64) -> Option<Self> {
                Self::checked_from_f64(n)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use num_traits::{Bounded, FromPrimitive, Num, One, Signed, ToPrimitive, Zero};

    use crate::{Fixed32, Fixed64};

    type Q16 = Fixed32<16>;

    fn sum_squares<T: Num + Copy>(values: &[T]) -> T {
        values.iter().fold(T::zero(), |acc, &v| acc + v * v)
    }

    #[test]
    fn test_generic_arithmetic() {
        let values = [Q16::from_f64(1.5), Q16::from_f64(-2.0), Q16::ONE_HALF];
        assert_eq!(sum_squares(&values), Q16::from_f64(6.5));
        assert!(<Q16 as Zero>::zero().is_zero());
        assert_eq!(<Fixed64<32> as One>::one(), Fixed64::<32>::ONE);
        assert_eq!(<Q16 as Bounded>::max_value(), Q16::MAX);
    }

    #[test]
    fn test_from_str_radix() {
        assert_eq!(Q16::from_str_radix("2.5", 10), Ok(Q16::from_f64(2.5)));
        assert!(Q16::from_str_radix("10", 16).is_err());
    }

    #[test]
    fn test_signed() {
        let x = Q16::from_f64(-2.25);
        assert_eq!(Signed::abs(&x), Q16::from_f64(2.25));
        assert_eq!(Signed::signum(&x), -Q16::ONE);
        assert!(Signed::is_negative(&x));
        assert_eq!(x.abs_sub(&Q16::ONE), Q16::ZERO);
        assert_eq!(Q16::ONE.abs_sub(&x), Q16::from_f64(3.25));
    }

    #[test]
    fn test_primitive() {
        assert_eq!(Q16::from_f64(-2.75).to_i64(), Some(-2));
        assert_eq!(Q16::from_f64(2.75).to_u64(), Some(2));
        assert_eq!(Q16::from_f64(-2.75).to_u64(), None);
        assert_eq!(Q16::from_f64(0.5).to_f64(), 0.5);
        assert_eq!(<Q16 as FromPrimitive>::from_i64(40000), None);
        assert_eq!(<Q16 as FromPrimitive>::from_u64(3), Some(Q16::from_int(3)));
        assert_eq!(<Q16 as FromPrimitive>::from_f64(f64::NAN), None);
    }
}
