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

use std::error::Error;
use std::f64::consts::{E, PI};

use fixedpt::{fix32, fix64, Fixed32, Fixed64, MathError, Precision, SqrtAlgorithm};

/// Asserts that `actual` is within sixteen units in the last place of
/// `expected`, relative to the magnitude of `expected` once it exceeds one.
/// A floor of `1e-10` covers the polynomial error that dominates in the
/// formats with the most fractional bits.
fn assert_near(what: &str, actual: f64, expected: f64, delta: f64) {
    let scale = expected.abs().max(1.0);
    let tolerance = (16.0 * delta + 1e-10) * scale;
    println!("{}: {} vs {}", what, actual, expected);
    assert!(
        (actual - expected).abs() <= tolerance,
        "{}: {} differs from {} by more than {}",
        what,
        actual,
        expected,
        tolerance
    );
}

macro_rules! format_tests {
    ($name:ident, $t:ty, $pi:literal, $sqrt_1000:literal) => {
        paste::paste! {
            #[test]
            fn [<test_constants_ $name>]() -> Result<(), Box<dyn Error>> {
                type T = $t;
                assert_eq!(T::PI.to_string_with(Precision::Digits(2)), "3.14");
                assert_eq!(T::PI.to_string(), $pi);
                assert_eq!(T::ONE.to_string(), "1.0");
                assert_eq!(T::from_f64(-2.5).to_string(), "-2.5");
                assert_eq!("1000".parse::<T>()?.to_string(), "1000.0");
                assert_eq!(T::E, T::from_f64(E));
                assert_eq!(T::TWO_PI, T::from_f64(2.0 * PI));
                assert_eq!(T::DELTA.to_bits(), 1);
                Ok(())
            }

            #[test]
            fn [<test_scenarios_ $name>]() -> Result<(), Box<dyn Error>> {
                type T = $t;
                assert_eq!(T::ZERO.atan2(T::ONE), T::ZERO);
                assert_eq!(T::ONE.atan2(T::ZERO), T::FRAC_PI_2);
                assert_eq!(T::ONE.asin(), T::FRAC_PI_2);
                assert_eq!(T::ONE.acos(), T::ZERO);

                let root = "1000".parse::<T>()?.sqrt();
                assert!((root.to_f64() - 31.6227766).abs() < 1e-2);
                assert_eq!(root.to_string(), $sqrt_1000);
                Ok(())
            }

            #[test]
            fn [<test_accuracy_ $name>]() -> Result<(), Box<dyn Error>> {
                type T = $t;
                let delta = T::DELTA.to_f64();
                let pi = T::PI;
                let e = T::E;
                let three = T::from_int(3);
                let check = |what: &str, actual: T, exact: f64| {
                    assert_near(what, actual.to_f64(), exact, delta)
                };

                check("sin(pi)", pi.sin(), pi.to_f64().sin());
                check("cos(pi)", pi.cos(), pi.to_f64().cos());
                check("sin(e)", e.sin(), e.to_f64().sin());
                check("cos(e)", e.cos(), e.to_f64().cos());
                check("tan(e)", e.tan(), e.to_f64().tan());

                for (y, x) in [(0.0, 1.0), (0.5, -0.5), (-0.707106781, 0.866025403)] {
                    let (y, x) = (T::from_f64(y), T::from_f64(x));
                    check("atan2", y.atan2(x), y.to_f64().atan2(x.to_f64()));
                }
                for x in [0.0, 0.5, 0.707106781, 1.0] {
                    let x = T::from_f64(x);
                    check("asin", x.asin(), x.to_f64().asin());
                    check("acos", x.acos(), x.to_f64().acos());
                }

                check("pow(pi, 3)", pi.pow(three), pi.to_f64().powi(3));
                check("exp(3)", three.exp(), 3f64.exp());
                check("ln(e)", e.ln(), e.to_f64().ln());
                check("ln(3)", three.ln(), 3f64.ln());
                for x in [0.5, E, 3.0, 1000.0] {
                    let x = T::from_f64(x);
                    check("sqrt", x.sqrt(), x.to_f64().sqrt());
                    check("sqrt", x.sqrt_with(SqrtAlgorithm::DigitByDigit), x.to_f64().sqrt());
                }
                Ok(())
            }

            #[test]
            fn [<test_checked_ $name>]() -> Result<(), Box<dyn Error>> {
                type T = $t;
                let minus_one = -T::ONE;
                assert_eq!(minus_one.sqrt().to_bits(), -1);
                assert_eq!(minus_one.checked_sqrt(), Err(MathError::NegativeInput));
                assert_eq!(T::ZERO.ln(), T::LN_ZERO);
                assert_eq!(T::ZERO.checked_ln(), Err(MathError::DomainError));
                assert_eq!(minus_one.ln(), T::ZERO);
                assert_eq!(T::TWO.asin(), T::TWO);
                assert_eq!(T::TWO.checked_acos(), Err(MathError::DomainError));
                assert_eq!(T::ONE.checked_div(T::ZERO), None);
                assert_eq!(T::MAX.checked_add(T::DELTA), None);
                assert_eq!(T::MAX.wrapping_add(T::DELTA), T::MIN);
                Ok(())
            }
        }
    };
}

format_tests!(q16_16, Fixed32<16>, "3.1415", "31.6227");
format_tests!(q14_18, Fixed32<14>, "3.1415", "31.6227");
format_tests!(q24_8, Fixed32<24>, "3.14", "31.62");
format_tests!(q32_32, Fixed64<32>, "3.1415926537", "31.6227766014");
format_tests!(q16_48, Fixed64<16>, "3.1415926535", "31.6227766016");

#[test]
fn test_literal_macros() -> Result<(), Box<dyn Error>> {
    const HALF: Fixed32<16> = fix32!(16; 0.5);
    assert_eq!(HALF, Fixed32::<16>::ONE_HALF);
    assert_eq!(fix64!(32; -1.25), Fixed64::<32>::from_bits(-5 << 30));
    let x: Fixed32<16> = fix32!(2.5);
    assert_eq!(x.to_string(), "2.5");
    Ok(())
}

#[test]
fn test_mixed_arithmetic() -> Result<(), Box<dyn Error>> {
    type T = Fixed32<16>;
    let a: T = "12.75".parse()?;
    let b: T = "-0.5".parse()?;
    assert_eq!((a + b).to_string(), "12.25");
    assert_eq!((a - b).to_string(), "13.25");
    assert_eq!((a * b).to_string(), "-6.375");
    assert_eq!((a / b).to_string(), "-25.5");
    assert_eq!((a % T::from_int(5)).to_string(), "2.75");
    assert_eq!(a.to_int(), 12);
    assert_eq!(b.to_int(), -1);
    assert_eq!(a.frac_part().to_string(), "0.75");
    assert_eq!(b.abs(), T::ONE_HALF);
    Ok(())
}

#[test]
fn test_buffer_formatting() -> Result<(), Box<dyn Error>> {
    let mut buf = [0u8; Fixed32::<16>::STR_LEN];
    let x = Fixed32::<16>::from_f64(-123.375);
    assert_eq!(x.to_str_buf(&mut buf, Precision::Digits(3)), "-123.375");
    assert_eq!(x.to_str_buf(&mut buf, Precision::from_legacy(1)), "-123.3");
    // Digits are truncated, not rounded.
    let x = Fixed32::<16>::from_f64(-123.456);
    assert_eq!(x.to_str_buf(&mut buf, Precision::Digits(3)), "-123.455");
    let mut buf = [0u8; Fixed64::<32>::STR_LEN];
    let s = Fixed64::<32>::MIN.to_str_buf(&mut buf, Precision::Full);
    assert_eq!(s, "-2147483648.0");
    Ok(())
}

#[test]
fn test_sqrt_algorithms_agree() -> Result<(), Box<dyn Error>> {
    type T = Fixed64<32>;
    for s in ["2", "0.5", "1000000000", "0.0001", "12345.6789"] {
        let x: T = s.parse()?;
        let newton = x.sqrt_with(SqrtAlgorithm::NewtonRaphson);
        let digits = x.sqrt_with(SqrtAlgorithm::DigitByDigit);
        assert!((newton.to_bits() - digits.to_bits()).abs() <= 2, "sqrt({})", s);
    }
    Ok(())
}
