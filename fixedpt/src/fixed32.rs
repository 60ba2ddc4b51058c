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
    /// A 32-bit signed fixed-point number with `W` whole bits and `32 - W`
    /// fractional bits.
    ///
    /// The represented value is the raw `i32` divided by `2^(32 - W)`. `W`
    /// counts the sign bit and must be in `[2, 32)`. The exponential and
    /// logarithm functions additionally require `W >= 3` and the
    /// trigonometric functions `W >= 4`. Violations are compile errors at the
    /// first use of the offending type or function.
    ///
    /// Products and quotients are computed in an `i64` accumulator.
    Fixed32,
    32,
    i32,
    i64
);
codec_impl!(Fixed32, 32, i32, i64, u64, 44);
sqrt_impl!(Fixed32, i32, i64, u64);
explog_impl!(Fixed32, 32, i32, i64);
cordic_impl!(Fixed32, 32, i32, i64);
poly_impl!(Fixed32, i32, i64);
conv_impl!(Fixed32, i32, i64);
#[cfg(feature = "num-traits")]
num_impl!(Fixed32, i32, i64);

assert_eq_size!(Fixed32<16>, i32);
assert_impl_all!(Fixed32<14>: Copy, Send, Sync, Ord, std::hash::Hash, FromStr);
