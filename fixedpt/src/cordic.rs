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

//! Trigonometry by CORDIC.
//!
//! Both modes iterate a fixed number of shift-and-add micro-rotations by
//! `atan(2^-i)`. Rotation mode starts from the vector `(K, 0)`, where `K` is
//! the reciprocal of the accumulated gain, and drives the residual angle to
//! zero, leaving `(cos, sin)`. Vectoring mode drives the `y` component of an
//! arbitrary vector to zero while accumulating the angle it turned through.

/// `atan(2^-i)` for `i` in `0..64`.
pub(crate) const ATAN_POW2: [f64; 64] = [
    0.7853981633974483,
    0.4636476090008061,
    0.24497866312686414,
    0.12435499454676144,
    0.06241880999595735,
    0.031239833430268277,
    0.015623728620476831,
    0.007812341060101111,
    0.0039062301319669718,
    0.0019531225164788188,
    0.0009765621895593195,
    0.0004882812111948983,
    0.00024414062014936177,
    0.00012207031189367021,
    6.103515617420877e-05,
    3.0517578115526096e-05,
    1.5258789061315762e-05,
    7.62939453110197e-06,
    3.814697265606496e-06,
    1.907348632810187e-06,
    9.536743164059608e-07,
    4.7683715820308884e-07,
    2.3841857910155797e-07,
    1.1920928955078068e-07,
    5.960464477539055e-08,
    2.9802322387695303e-08,
    1.4901161193847655e-08,
    7.450580596923828e-09,
    3.725290298461914e-09,
    1.862645149230957e-09,
    9.313225746154785e-10,
    4.656612873077393e-10,
    2.3283064365386963e-10,
    1.1641532182693481e-10,
    5.820766091346741e-11,
    2.9103830456733704e-11,
    1.4551915228366852e-11,
    7.275957614183426e-12,
    3.637978807091713e-12,
    1.8189894035458565e-12,
    9.094947017729282e-13,
    4.547473508864641e-13,
    2.2737367544323206e-13,
    1.1368683772161603e-13,
    5.684341886080802e-14,
    2.842170943040401e-14,
    1.4210854715202004e-14,
    7.105427357601002e-15,
    3.552713678800501e-15,
    1.7763568394002505e-15,
    8.881784197001252e-16,
    4.440892098500626e-16,
    2.220446049250313e-16,
    1.1102230246251565e-16,
    5.551115123125783e-17,
    2.7755575615628914e-17,
    1.3877787807814457e-17,
    6.938893903907228e-18,
    3.469446951953614e-18,
    1.734723475976807e-18,
    8.673617379884035e-19,
    4.336808689942018e-19,
    2.168404344971009e-19,
    1.0842021724855044e-19,
];

/// `K(n)`, the reciprocal of the CORDIC gain after `n` iterations, for `n` in
/// `0..=32`. Further iterations do not change the value at `f64` precision.
pub(crate) const GAIN: [f64; 33] = [
    1.0,
    0.7071067811865476,
    0.6324555320336759,
    0.6135719910778964,
    0.6088339125177524,
    0.6076482562561683,
    0.6073517701412959,
    0.607277644093526,
    0.6072591122988927,
    0.6072544793325624,
    0.6072533210898752,
    0.6072530315291343,
    0.6072529591389448,
    0.6072529410413972,
    0.6072529365170103,
    0.6072529353859135,
    0.6072529351031393,
    0.6072529350324458,
    0.6072529350147724,
    0.607252935010354,
    0.6072529350092495,
    0.6072529350089733,
    0.6072529350089043,
    0.607252935008887,
    0.6072529350088827,
    0.6072529350088817,
    0.6072529350088813,
    0.6072529350088813,
    0.6072529350088812,
    0.6072529350088812,
    0.6072529350088812,
    0.6072529350088812,
    0.6072529350088812,
];

pub(crate) const fn gain(iterations: u32) -> f64 {
    if iterations < GAIN.len() as u32 {
        GAIN[iterations as usize]
    } else {
        GAIN[GAIN.len() - 1]
    }
}

macro_rules! cordic_impl {
    ($t:ident, $bits:literal, $raw:ty, $wide:ty) => {
        impl<const W: u32> $t<W> {
            /// The number of CORDIC iterations: two more than the fractional
            /// bits, capped so that every shift stays within the word.
            ///
            /// The trigonometric functions require at least four whole bits
            /// so that 2π is representable.
            pub const CORDIC_ITERATIONS: u32 = {
                assert!(
                    W >= 4,
                    concat!("trigonometry on ", stringify!($t), " requires at least 4 whole bits")
                );
                let n = Self::FRAC_BITS + 2;
                if n < $bits - 2 {
                    n
                } else {
                    $bits - 2
                }
            };

            const CORDIC_ANGLES: [Self; 64] = Self::table(crate::cordic::ATAN_POW2);
            const CORDIC_GAIN: Self = Self::from_f64(crate::cordic::gain(Self::CORDIC_ITERATIONS));

            /// Reduces an angle into `[-π/2, π/2]`. The flag reports whether
            /// the angle was reflected, which flips the sign of its cosine.
            pub(crate) fn reduce_angle(self) -> (Self, bool) {
                let mut angle = self % Self::TWO_PI;
                if angle < -Self::PI {
                    angle += Self::TWO_PI;
                } else if angle > Self::PI {
                    angle -= Self::TWO_PI;
                }

                if angle > Self::FRAC_PI_2 {
                    (Self::PI - angle, true)
                } else if angle < -Self::FRAC_PI_2 {
                    (-Self::PI - angle, true)
                } else {
                    (angle, false)
                }
            }

            /// Simultaneously computes the sine and cosine of an angle in
            /// radians.
            pub fn sincos(self) -> (Self, Self) {
                let (angle, flip) = self.reduce_angle();
                // The first micro-rotation never leaves a zero residual.
                if angle.is_zero() {
                    return (Self::ZERO, if flip { -Self::ONE } else { Self::ONE });
                }
                let mut x = Self::CORDIC_GAIN.raw;
                let mut y: $raw = 0;
                let mut z = angle.raw;
                for i in 0..Self::CORDIC_ITERATIONS {
                    let a = Self::CORDIC_ANGLES[i as usize].raw;
                    let dx = y >> i;
                    let dy = x >> i;
                    if z >= 0 {
                        x -= dx;
                        y += dy;
                        z -= a;
                    } else {
                        x += dx;
                        y -= dy;
                        z += a;
                    }
                }
                let cos = if flip { -x } else { x };
                (Self::from_bits(y), Self::from_bits(cos))
            }

            /// Computes the sine of an angle in radians.
            pub fn sin(self) -> Self {
                self.sincos().0
            }

            /// Computes the cosine of an angle in radians.
            pub fn cos(self) -> Self {
                self.sincos().1
            }

            /// Computes the tangent of an angle in radians as `sin / cos`.
            ///
            /// # Panics
            ///
            /// Panics if the computed cosine is exactly zero.
            pub fn tan(self) -> Self {
                let (sin, cos) = self.sincos();
                sin / cos
            }

            /// Computes the tangent of an angle in radians, failing with
            /// [`MathError::DivideByZero`] if the computed cosine is zero and
            /// [`MathError::Overflow`] if the quotient does not fit.
            pub fn checked_tan(self) -> Result<Self, MathError> {
                let (sin, cos) = self.sincos();
                if cos.is_zero() {
                    return Err(MathError::DivideByZero);
                }
                sin.checked_div(cos).ok_or(MathError::Overflow)
            }

            /// Computes the four quadrant arctangent of `self` (`y`) and `x`
            /// in radians, in `[-π, π]`.
            ///
            /// A zero `x` yields `±π/2` by the sign of `y`, or zero if `y` is
            /// also zero. A zero `y` yields zero for positive `x` and π for
            /// negative `x`.
            pub fn atan2(self, x: Self) -> Self {
                if x.raw == 0 {
                    return match self.raw.cmp(&0) {
                        Ordering::Greater => Self::FRAC_PI_2,
                        Ordering::Less => -Self::FRAC_PI_2,
                        Ordering::Equal => Self::ZERO,
                    };
                }
                if self.raw == 0 {
                    return if x.raw > 0 { Self::ZERO } else { Self::PI };
                }

                let mut x = x.raw as $wide;
                let mut y = self.raw as $wide;
                let mut z: $wide = 0;
                if x < 0 {
                    (x, y, z) = if y > 0 {
                        (y, -x, Self::FRAC_PI_2.raw as $wide)
                    } else {
                        (-y, x, -Self::FRAC_PI_2.raw as $wide)
                    };
                }

                // The angle does not depend on the length of the vector, so
                // give the larger component BITS - 1 significant bits.
                let mag = x.abs().max(y.abs());
                let shift = ($bits - 1) - (<$wide>::BITS - mag.leading_zeros()) as i32;
                if shift >= 0 {
                    x <<= shift;
                    y <<= shift;
                } else {
                    x >>= -shift;
                    y >>= -shift;
                }

                for i in 0..Self::CORDIC_ITERATIONS {
                    let a = Self::CORDIC_ANGLES[i as usize].raw as $wide;
                    let dx = y >> i;
                    let dy = x >> i;
                    if y > 0 {
                        x += dx;
                        y -= dy;
                        z += a;
                    } else {
                        x -= dx;
                        y += dy;
                        z -= a;
                    }
                }
                Self::from_bits(z as $raw)
            }

            /// Computes the arctangent in radians, in `[-π/2, π/2]`.
            pub fn atan(self) -> Self {
                self.atan2(Self::ONE)
            }

            /// Computes the arcsine in radians as `atan2(x, sqrt(1 - x^2))`.
            ///
            /// Inputs outside `[-1, 1]` are returned unchanged; use
            /// [`checked_asin`](Self::checked_asin) to detect them.
            pub fn asin(self) -> Self {
                if self > Self::ONE || self < -Self::ONE {
                    return self;
                }
                if self == Self::ONE {
                    Self::FRAC_PI_2
                } else if self == -Self::ONE {
                    -Self::FRAC_PI_2
                } else {
                    self.atan2((Self::ONE - self * self).sqrt())
                }
            }

            /// Computes the arcsine in radians, failing with
            /// [`MathError::DomainError`] outside `[-1, 1]`.
            pub fn checked_asin(self) -> Result<Self, MathError> {
                if self > Self::ONE || self < -Self::ONE {
                    return Err(MathError::DomainError);
                }
                Ok(self.asin())
            }

            /// Computes the arccosine in radians as `atan2(sqrt(1 - x^2), x)`.
            ///
            /// Inputs outside `[-1, 1]` are returned unchanged; use
            /// [`checked_acos`](Self::checked_acos) to detect them.
            pub fn acos(self) -> Self {
                if self > Self::ONE || self < -Self::ONE {
                    return self;
                }
                if self == Self::ONE {
                    Self::ZERO
                } else if self == -Self::ONE {
                    Self::PI
                } else {
                    (Self::ONE - self * self).sqrt().atan2(self)
                }
            }

            /// Computes the arccosine in radians, failing with
            /// [`MathError::DomainError`] outside `[-1, 1]`.
            pub fn checked_acos(self) -> Result<Self, MathError> {
                if self > Self::ONE || self < -Self::ONE {
                    return Err(MathError::DomainError);
                }
                Ok(self.acos())
            }
        }
    };
}
