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

use proptest::prelude::*;

use fixedpt::{Fixed32, Fixed64, Precision, SqrtAlgorithm};

type Q16 = Fixed32<16>;
type Q32 = Fixed64<32>;

const Q16_DELTA: f64 = 1.0 / 65536.0;
const Q32_DELTA: f64 = 1.0 / 4294967296.0;

// Addition of values that cannot overflow is exact.
proptest! {
    #[test]
    fn prop_add_matches_f64(a in -(1i32 << 29)..(1i32 << 29), b in -(1i32 << 29)..(1i32 << 29)) {
        let (a, b) = (Q16::from_bits(a), Q16::from_bits(b));
        prop_assert_eq!((a + b).to_f64(), a.to_f64() + b.to_f64());
        prop_assert_eq!((a - b).to_f64(), a.to_f64() - b.to_f64());
        prop_assert_eq!(a + b, b + a);
    }
}

// Multiplication rounds to within half a unit.
proptest! {
    #[test]
    fn prop_mul_matches_f64(a in -150.0f64..150.0, b in -150.0f64..150.0) {
        let (a, b) = (Q16::from_f64(a), Q16::from_f64(b));
        let exact = a.to_f64() * b.to_f64();
        prop_assert!(((a * b).to_f64() - exact).abs() <= Q16_DELTA / 2.0);
    }
}

// div(mul(a, b), b) recovers a.
proptest! {
    #[test]
    fn prop_mul_div_inverse(a in -100.0f64..100.0, b in 1.0f64..100.0, negate in any::<bool>()) {
        let a = Q16::from_f64(a);
        let b = Q16::from_f64(if negate { -b } else { b });
        let back = (a * b) / b;
        prop_assert!(
            (back.to_bits() - a.to_bits()).abs() <= 2,
            "({} * {}) / {} = {}", a, b, b, back
        );
    }
}

// Printing at full precision is exact, so parsing it back is the identity.
proptest! {
    #[test]
    fn prop_string_round_trip(a in any::<i32>(), b in any::<i64>()) {
        let a = Q16::from_bits(a);
        prop_assert_eq!(a.to_string_with(Precision::Full).parse::<Q16>(), Ok(a));
        let b = Q32::from_bits(b);
        prop_assert_eq!(format!("{:#}", b).parse::<Q32>(), Ok(b));
    }
}

// Printing truncates to the requested number of digits.
proptest! {
    #[test]
    fn prop_string_truncates(a in any::<i32>(), digits in 1usize..8) {
        let a = Q16::from_bits(a);
        let printed = a.to_string_with(Precision::Digits(digits));
        let parsed: Q16 = printed.parse().unwrap();
        let step = 10f64.powi(-(digits as i32));
        prop_assert!(
            (parsed.to_f64() - a.to_f64()).abs() <= step + Q16_DELTA,
            "{} printed as {}", a, printed
        );
        prop_assert!(parsed.abs() <= a.abs());
    }
}

proptest! {
    #[test]
    fn prop_sqrt(x in 0i32..i32::MAX) {
        let x = Q16::from_bits(x);
        let exact = x.to_f64().sqrt();
        let newton = x.sqrt();
        let digits = x.sqrt_with(SqrtAlgorithm::DigitByDigit);
        let newton_err = (newton.to_f64() - exact).abs();
        let digits_err = (digits.to_f64() - exact).abs();
        prop_assert!(newton_err <= 2.0 * Q16_DELTA, "sqrt({}) = {}", x, newton);
        prop_assert!(digits_err <= Q16_DELTA / 2.0, "sqrt({}) = {}", x, digits);
        let square = digits.to_f64() * digits.to_f64();
        prop_assert!((square - x.to_f64()).abs() <= (2.0 * exact + 1.0) * Q16_DELTA);
    }
}

proptest! {
    #[test]
    fn prop_sqrt_q32(x in 0i64..i64::MAX) {
        let x = Q32::from_bits(x);
        let exact = x.to_f64().sqrt();
        prop_assert!((x.sqrt().to_f64() - exact).abs() <= 2.0 * Q32_DELTA);
    }
}

proptest! {
    #[test]
    fn prop_sqrt_negative(x in i32::MIN..0) {
        prop_assert_eq!(Q16::from_bits(x).sqrt(), -Q16::DELTA);
    }
}

proptest! {
    #[test]
    fn prop_pythagorean_identity(angle in -100.0f64..100.0) {
        let (s, c) = Q16::from_f64(angle).sincos();
        let norm = s.to_f64() * s.to_f64() + c.to_f64() * c.to_f64();
        prop_assert!((norm - 1.0).abs() <= 64.0 * Q16_DELTA, "sin^2 + cos^2 = {}", norm);

        let (s, c) = Q32::from_f64(angle).sincos();
        let norm = s.to_f64() * s.to_f64() + c.to_f64() * c.to_f64();
        prop_assert!((norm - 1.0).abs() <= 64.0 * Q32_DELTA, "sin^2 + cos^2 = {}", norm);
    }
}

proptest! {
    #[test]
    fn prop_exp_ln_inverse(x in 0.01f64..1000.0) {
        let x = Q16::from_f64(x);
        let back = x.ln().exp().to_f64();
        prop_assert!((back - x.to_f64()).abs() <= 8.0 * Q16_DELTA * x.to_f64().max(1.0));

        let x = Q32::from_f64(x.to_f64());
        let back = x.ln().exp().to_f64();
        prop_assert!((back - x.to_f64()).abs() <= 8.0 * Q32_DELTA * x.to_f64().max(1.0));
    }
}

proptest! {
    #[test]
    fn prop_ln_exp_inverse(x in -2.0f64..10.0) {
        let x = Q16::from_f64(x);
        prop_assert!((x.exp().ln().to_bits() - x.to_bits()).abs() <= 16);
        let x = Q32::from_f64(x.to_f64());
        prop_assert!((x.exp().ln().to_bits() - x.to_bits()).abs() <= 16);
    }
}
