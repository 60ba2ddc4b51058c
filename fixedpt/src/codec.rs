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

//! Conversion between fixed-point values and decimal strings.

use crate::error::ParseFixedError;

/// The number of fractional digits to produce when formatting a value.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum Precision {
    /// A width-dependent number of digits: 2 for 32-bit formats with more
    /// than 16 whole bits, 4 for the other 32-bit formats and 10 for 64-bit
    /// formats.
    #[default]
    Default,
    /// Every digit the binary fraction expands to, including those beyond
    /// the accuracy of the computation that produced the value.
    Full,
    /// At most the given number of digits. At least one digit is always
    /// produced.
    Digits(usize),
}

impl Precision {
    /// Maps the legacy integer convention for digit counts, where `-1`
    /// selects the default and `-2` selects every digit, onto a
    /// `Precision`. Other negative values produce a single digit.
    pub fn from_legacy(max_decimals: i32) -> Precision {
        match max_decimals {
            -1 => Precision::Default,
            -2 => Precision::Full,
            n => Precision::Digits(usize::try_from(n).unwrap_or(0)),
        }
    }

    pub(crate) fn max_digits(self, default: usize, full: usize) -> usize {
        match self {
            Precision::Default => default,
            Precision::Full => full,
            Precision::Digits(n) => n,
        }
    }
}

/// Parses an optionally signed decimal number with an optional fractional
/// part into its magnitude scaled by `2^frac_bits`, rounded to nearest.
///
/// Only the first 19 fractional digits are significant, which exceeds the
/// resolution of every supported format.
pub(crate) fn parse_scaled(s: &str, frac_bits: u32) -> Result<(bool, u128), ParseFixedError> {
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (int, frac) = s.split_once('.').unwrap_or((s, ""));
    if int.is_empty() && frac.is_empty() {
        return Err(ParseFixedError);
    }
    if !int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(ParseFixedError);
    }

    let mut ip: u128 = 0;
    for b in int.bytes() {
        ip = ip * 10 + u128::from(b - b'0');
        // Beyond every format's range; stop before the shift below overflows.
        if ip > 1 << 64 {
            return Err(ParseFixedError);
        }
    }

    let mut num: u128 = 0;
    let mut den: u128 = 1;
    for b in frac.bytes().take(19) {
        num = num * 10 + u128::from(b - b'0');
        den *= 10;
    }
    let fp = ((num << frac_bits) + den / 2) / den;

    Ok((negative, (ip << frac_bits) + fp))
}

macro_rules! codec_impl {
    ($t:ident, $bits:literal, $raw:ty, $wide:ty, $uwide:ty, $str_len:literal) => {
        impl<const W: u32> $t<W> {
            /// The length of the buffer accepted by
            /// [`to_str_buf`](Self::to_str_buf), which is large enough for
            /// any value at any precision.
            pub const STR_LEN: usize = $str_len;

            const DEFAULT_DIGITS: usize = match $bits {
                32 if W > 16 => 2,
                32 => 4,
                _ => 10,
            };

            /// Writes the decimal representation of the value into `buf` and
            /// returns the written prefix.
            ///
            /// Fractional digits are produced until the remaining fraction is
            /// zero or `precision` digits have been written; digits are
            /// truncated, not rounded. A single trailing zero is dropped
            /// unless it is the only fractional digit.
            pub fn to_str_buf(self, buf: &mut [u8; $str_len], precision: Precision) -> &str {
                let max_digits =
                    precision.max_digits(Self::DEFAULT_DIGITS, Self::FRAC_BITS as usize);
                let mut len = 0;
                if self.raw < 0 {
                    buf[len] = b'-';
                    len += 1;
                }
                let mag = (self.raw as $wide).unsigned_abs();

                let mut ip = mag >> Self::FRAC_BITS;
                let mut int_digits = [0u8; 20];
                let mut n = 0;
                loop {
                    int_digits[n] = b'0' + (ip % 10) as u8;
                    n += 1;
                    ip /= 10;
                    if ip == 0 {
                        break;
                    }
                }
                for d in int_digits[..n].iter().rev() {
                    buf[len] = *d;
                    len += 1;
                }
                buf[len] = b'.';
                len += 1;

                let mask: $uwide = (1 << $bits) - 1;
                let mut fr = (mag & Self::FRAC_MASK as $uwide) << W;
                let mut ndec = 0;
                loop {
                    fr = (fr & mask) * 10;
                    buf[len] = b'0' + ((fr >> $bits) % 10) as u8;
                    len += 1;
                    ndec += 1;
                    if fr == 0 || ndec >= max_digits {
                        break;
                    }
                }
                if ndec > 1 && buf[len - 1] == b'0' {
                    len -= 1;
                }

                // SAFETY: only ASCII digits, '-' and '.' were written.
                unsafe { std::str::from_utf8_unchecked(&buf[..len]) }
            }

            /// Returns the decimal representation of the value at the given
            /// precision. See [`to_str_buf`](Self::to_str_buf).
            pub fn to_string_with(self, precision: Precision) -> String {
                let mut buf = [0; $str_len];
                self.to_str_buf(&mut buf, precision).to_owned()
            }
        }

        /// Formats the value with [`Precision::Default`].
        ///
        /// An explicit precision (`{:.6}`) selects [`Precision::Digits`] and
        /// the alternate flag (`{:#}`) selects [`Precision::Full`].
        impl<const W: u32> fmt::Display for $t<W> {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                let precision = match f.precision() {
                    Some(n) => Precision::Digits(n),
                    None if f.alternate() => Precision::Full,
                    None => Precision::Default,
                };
                let mut buf = [0; $str_len];
                f.write_str(self.to_str_buf(&mut buf, precision))
            }
        }

        impl<const W: u32> fmt::Debug for $t<W> {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                let mut buf = [0; $str_len];
                f.write_str(self.to_str_buf(&mut buf, Precision::Full))
            }
        }

        impl<const W: u32> FromStr for $t<W> {
            type Err = ParseFixedError;

            fn from_str(s: &str) -> Result<Self, ParseFixedError> {
                let (negative, mag) = parse_scaled(s, Self::FRAC_BITS)?;
                let limit: u128 = if negative {
                    1 << ($bits - 1)
                } else {
                    (1 << ($bits - 1)) - 1
                };
                if mag > limit {
                    return Err(ParseFixedError);
                }
                let raw = if negative {
                    (mag as $wide).wrapping_neg()
                } else {
                    mag as $wide
                };
                Ok(Self::from_bits(raw as $raw))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_from_legacy() {
        assert_eq!(Precision::from_legacy(-1), Precision::Default);
        assert_eq!(Precision::from_legacy(-2), Precision::Full);
        assert_eq!(Precision::from_legacy(0), Precision::Digits(0));
        assert_eq!(Precision::from_legacy(7), Precision::Digits(7));
        assert_eq!(Precision::from_legacy(-9), Precision::Digits(0));
    }

    #[test]
    fn test_parse_scaled() {
        assert_eq!(parse_scaled("1", 16), Ok((false, 1 << 16)));
        assert_eq!(parse_scaled("-1.5", 16), Ok((true, 3 << 15)));
        assert_eq!(parse_scaled("+.25", 16), Ok((false, 1 << 14)));
        assert_eq!(parse_scaled("2.", 8), Ok((false, 2 << 8)));
        // 0.1 * 2^16 = 6553.6, rounded to nearest.
        assert_eq!(parse_scaled("0.1", 16), Ok((false, 6554)));
        for bad in ["", "-", ".", "1.2.3", "1e5", " 1", "0x10", "--1"] {
            assert_eq!(parse_scaled(bad, 16), Err(ParseFixedError), "{:?}", bad);
        }
    }
}
