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

use std::cmp::Ordering;
use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};
use std::str::FromStr;

use static_assertions::{assert_eq_size, assert_impl_all};

use crate::codec::{parse_scaled, Precision};
use crate::error::{MathError, ParseFixedError, TryFromFixedError};
use crate::sqrt::SqrtAlgorithm;

fixed_impl!(
    /// A 64-bit signed fixed-point number with `W` whole bits and `64 - W`
    /// fractional bits.
    ///
    /// The represented value is the raw `i64` divided by `2^(64 - W)`. `W`
    /// counts the sign bit and must be in `[2, 64)`. The exponential and
    /// logarithm functions additionally require `W >= 3` and the
    /// trigonometric functions `W >= 4`.
    ///
    /// Products and quotients are computed in an `i128` accumulator.
    Fixed64,
    64,
    i64,
    i128
);
codec_impl!(Fixed64, 64, i64, i128, u128, 85);
sqrt_impl!(Fixed64, i64, i128, u128);
explog_impl!(Fixed64, 64, i64, i128);
cordic_impl!(Fixed64, 64, i64, i128);
poly_impl!(Fixed64, i64, i128);
conv_impl!(Fixed64, i64, i128);
#[cfg(feature = "num-traits")]
num_impl!(Fixed64, i64, i128);

assert_eq_size!(Fixed64<32>, i64);
assert_impl_all!(Fixed64<32>: Copy, Send, Sync, Ord, std::hash::Hash, FromStr);
