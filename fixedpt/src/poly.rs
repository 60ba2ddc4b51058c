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

//! Trigonometry by minimax polynomials.
//!
//! These are alternatives to the CORDIC functions that trade a handful of
//! multiplications for the iteration loop. They share the angle reduction of
//! the CORDIC engine.

/// Odd minimax coefficients of `sin(x) / x` in `x^2` on `[-π/2, π/2]`.
pub(crate) const SIN_C: [f64; 7] = [
    1.0,
    -0.16666666641626524,
    0.008333333171954214,
    -0.0001984126963009452,
    2.755731884462877e-6,
    -2.505210838544172e-8,
    1.605904383682161e-10,
];

/// Even minimax coefficients of `cos(x)` in `x^2` on `[-π/2, π/2]`.
pub(crate) const COS_C: [f64; 7] = [
    1.0,
    -0.5,
    0.04166666657946379,
    -0.001388888894063317,
    2.480158728947673e-5,
    -2.755731435139066e-7,
    2.087675440040727e-9,
];

/// Coefficients of `atan(z) / z` in `z^2` on `[0, 1/32]`.
pub(crate) const ATAN_E: [f64; 7] = [
    1.0,
    -0.3333333333,
    0.2,
    -0.1428571429,
    0.1111111089,
    -0.0909075848,
    0.0764169081,
];

/// `atan(k / 32)` for `k` in `0..32`.
pub(crate) const ATAN_BIAS: [f64; 32] = [
    0.0000000000,
    0.0312398334,
    0.0624188100,
    0.0934767812,
    0.1243549945,
    0.1549967419,
    0.1853479500,
    0.2153576997,
    0.2449786631,
    0.2741674511,
    0.3028848684,
    0.3310960767,
    0.3587706703,
    0.3858826694,
    0.4124104416,
    0.4383365599,
    0.4636476090,
    0.4883339511,
    0.5123894603,
    0.5358112380,
    0.5585993153,
    0.5807563536,
    0.6022873461,
    0.6231993299,
    0.6435011088,
    0.6632029927,
    0.6823165549,
    0.7008544079,
    0.7188299996,
    0.7362574290,
    0.7531512810,
    0.7695264804,
];

macro_rules! poly_impl {
    ($t:ident, $raw:ty, $wide:ty) => {
        impl<const W: u32> $t<W> {
            const SIN_C: [Self; 7] = Self::table(crate::poly::SIN_C);
            const COS_C: [Self; 7] = Self::table(crate::poly::COS_C);
            const ATAN_E: [Self; 7] = Self::table(crate::poly::ATAN_E);
            const ATAN_BIAS: [Self; 32] = Self::table(crate::poly::ATAN_BIAS);

            // c[0] + x2 * (c[1] + x2 * (... + x2 * c[6]))
            fn horner(x2: Self, c: &[Self; 7]) -> Self {
                let mut acc = x2 * c[6];
                for ck in c[1..6].iter().rev() {
                    acc = x2 * (*ck + acc);
                }
                c[0] + acc
            }

            /// Computes the sine of an angle in radians with a degree 13
            /// polynomial.
            pub fn sin_poly(self) -> Self {
                let (angle, _) = self.reduce_angle();
                angle * Self::horner(angle * angle, &Self::SIN_C)
            }

            /// Computes the cosine of an angle in radians with a degree 12
            /// polynomial.
            pub fn cos_poly(self) -> Self {
                let (angle, flip) = self.reduce_angle();
                let cos = Self::horner(angle * angle, &Self::COS_C);
                if flip {
                    -cos
                } else {
                    cos
                }
            }

            /// Computes the arctangent in radians with a degree 13 polynomial
            /// after reducing the argument into `[0, 1/32]`.
            pub fn atan_poly(self) -> Self {
                let negative = self.is_negative();
                let mut z = self.abs();
                let inverse = z > Self::ONE;
                if inverse {
                    z = Self::ONE / z;
                }

                // The largest k / 32 not above z; then
                // atan(z) = atan((z - c) / (1 + z c)) + atan(c).
                let mut k = Self::ATAN_BIAS.len() - 1;
                let factor =
                    |k: usize| Self::from_bits((((k as $wide) << Self::FRAC_BITS) >> 5) as $raw);
                while k > 0 && z < factor(k) {
                    k -= 1;
                }
                let c = factor(k);
                let z = (z - c) / (Self::ONE + z * c);

                let mut theta = z * Self::horner(z * z, &Self::ATAN_E) + Self::ATAN_BIAS[k];
                if inverse {
                    theta = Self::FRAC_PI_2 - theta;
                }
                if negative {
                    -theta
                } else {
                    theta
                }
            }

            /// Computes the four quadrant arctangent of `self` (`y`) and `x`
            /// from [`atan_poly`](Self::atan_poly) of `y / x`, corrected by
            /// ±π for negative `x`. Special cases match
            /// [`atan2`](Self::atan2).
            ///
            /// The quotient wraps when `|y / x|` exceeds the range of the
            /// format.
            pub fn atan2_poly(self, x: Self) -> Self {
                if x.is_zero() {
                    return match self.raw.cmp(&0) {
                        Ordering::Greater => Self::FRAC_PI_2,
                        Ordering::Less => -Self::FRAC_PI_2,
                        Ordering::Equal => Self::ZERO,
                    };
                }
                if self.is_zero() {
                    return if x.is_positive() { Self::ZERO } else { Self::PI };
                }

                let theta = (self / x).atan_poly();
                match (x.is_negative(), self.is_negative()) {
                    (false, _) => theta,
                    (true, false) => theta + Self::PI,
                    (true, true) => theta - Self::PI,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::Fixed32;

    type Q16 = Fixed32<16>;

    fn q16(v: f64) -> Q16 {
        Q16::from_f64(v)
    }

    fn ulps<const W: u32>(actual: Fixed32<W>, expected: f64) -> f64 {
        (actual.to_f64() - expected).abs() * (1u64 << (32 - W)) as f64
    }

    #[test]
    fn test_sin_cos_poly_raw() {
        let cases = [
            (0.5, 31420, 57513),
            (1.0, 55146, 35410),
            (2.0, 59590, -27275),
            (3.0, 9248, -64880),
            (-1.0, -55146, 35410),
        ];
        for (angle, sin, cos) in cases {
            assert_eq!(q16(angle).sin_poly().to_bits(), sin, "sin_poly({})", angle);
            assert_eq!(q16(angle).cos_poly().to_bits(), cos, "cos_poly({})", angle);
        }
    }

    #[test]
    fn test_sin_cos_poly_accuracy() {
        fn sweep<const W: u32>(limit: f64) {
            let mut angle = -6.0;
            while angle <= 6.0 {
                let x = Fixed32::<W>::from_f64(angle);
                let exact = x.to_f64();
                assert!(ulps(x.sin_poly(), exact.sin()) <= limit, "sin_poly({})", x);
                assert!(ulps(x.cos_poly(), exact.cos()) <= limit, "cos_poly({})", x);
                assert!(ulps(x.atan_poly(), exact.atan()) <= 3.0, "atan_poly({})", x);
                angle += 0.13;
            }
        }
        sweep::<16>(32.0);
        sweep::<8>(100.0);
        sweep::<4>(100.0);
    }

    #[test]
    fn test_atan_poly() {
        let cases = [
            (0.5, 30386),
            (1.0, 51472),
            (2.0, 72558),
            (-3.0, -81858),
            (0.01, 655),
            (100.0, 102289),
        ];
        for (x, expected) in cases {
            assert_eq!(q16(x).atan_poly().to_bits(), expected, "atan_poly({})", x);
        }
        assert_eq!(Q16::ZERO.atan_poly(), Q16::ZERO);
    }

    #[test]
    fn test_atan2_poly() {
        assert_eq!(Q16::ONE.atan2_poly(Q16::ONE).to_bits(), 51472);
        assert_eq!(Q16::ONE.atan2_poly(-Q16::ONE).to_bits(), 154415);
        assert_eq!((-Q16::ONE).atan2_poly(-Q16::ONE).to_bits(), -154415);
        assert_eq!((-Q16::ONE).atan2_poly(Q16::ONE).to_bits(), -51472);
        assert_eq!(q16(3.0).atan2_poly(q16(-4.0)).to_bits(), 163715);
        assert_eq!(Q16::ONE.atan2_poly(Q16::ZERO), Q16::FRAC_PI_2);
        assert_eq!(Q16::ZERO.atan2_poly(-Q16::ONE), Q16::PI);
        assert_eq!(Q16::ZERO.atan2_poly(Q16::ZERO), Q16::ZERO);
    }
}
