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

#[macro_export]
/// A macro to construct a [`Fixed32`] from a numeric literal.
/// The whole-bit count `W` is inferred from context, or may be given before a
/// semicolon. The conversion rounds to nearest and is usable in constant
/// items, where an out-of-range literal fails to compile.
///
/// [`Fixed32`]: crate::Fixed32
///
/// # Examples:
/// ```
/// use fixedpt::{fix32, Fixed32};
///
/// const HALF: Fixed32<16> = fix32!(0.5);
/// assert_eq!(fix32!(16; 1.75).to_string(), "1.75");
/// assert_eq!(HALF + HALF, Fixed32::<16>::ONE);
/// ```
macro_rules! fix32 {
    ($w:expr; $l:expr) => {
        $crate::Fixed32::<{ $w }>::from_f64($l as f64)
    };
    ($l:expr) => {
        $crate::Fixed32::from_f64($l as f64)
    };
}

#[macro_export]
/// A macro to construct a [`Fixed64`] from a numeric literal.
/// The whole-bit count `W` is inferred from context, or may be given before a
/// semicolon.
///
/// [`Fixed64`]: crate::Fixed64
///
/// # Examples:
/// ```
/// use fixedpt::{fix64, Fixed64};
///
/// let x: Fixed64<32> = fix64!(-2.5);
/// assert_eq!(x.to_string(), "-2.5");
/// assert_eq!(fix64!(32; 3).to_int(), 3);
/// ```
macro_rules! fix64 {
    ($w:expr; $l:expr) => {
        $crate::Fixed64::<{ $w }>::from_f64($l as f64)
    };
    ($l:expr) => {
        $crate::Fixed64::from_f64($l as f64)
    };
}
