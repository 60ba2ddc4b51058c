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

use tracing::{debug, trace};

use crate::ast;
use crate::backend::{Backend, BackendError, BackendResult, MathResult};

pub enum Outcome {
    Passed,
    Failed { cause: Box<dyn Error> },
    Skipped,
}

pub trait Report {
    fn start_file(&mut self, file: &ast::File);
    fn finish_file(&mut self);
    fn start_test(&mut self, test: &ast::Test);
    fn finish_test(&mut self, outcome: Outcome);
}

/// How far a result may stray from the expected value. The allowance is the
/// larger of the two bounds, scaled by the magnitude of the expected value
/// once it exceeds one. Both bounds start at zero, which demands the
/// expected value rounded to the format.
#[derive(Debug, Clone, Copy, Default)]
struct Tolerance {
    absolute: f64,
    ulps: u32,
}

impl Tolerance {
    fn allowance(&self, delta: f64, expected: f64) -> f64 {
        self.absolute.max(f64::from(self.ulps) * delta) * expected.abs().max(1.0)
    }
}

pub fn run_file<B, R>(reporter: &mut R, file: &ast::File) -> Result<(), Box<dyn Error>>
where
    B: Backend,
    R: Report,
{
    reporter.start_file(file);
    let mut backend = B::new();
    let mut tolerance = Tolerance::default();
    for line in &file.lines {
        match line {
            ast::Line::Directive(directive) => {
                run_directive(&mut backend, &mut tolerance, reporter, directive)?
            }
            ast::Line::Test(test) => run_test(&mut backend, tolerance, reporter, test),
        }
    }
    reporter.finish_file();
    Ok(())
}

fn run_directive<B, R>(
    backend: &mut B,
    tolerance: &mut Tolerance,
    reporter: &mut R,
    directive: &ast::Directive,
) -> Result<(), Box<dyn Error>>
where
    B: Backend,
    R: Report,
{
    trace!(%directive, backend = %backend.name(), "directive");
    let res = match directive {
        ast::Directive::Precision(p) => backend.set_precision(*p),
        ast::Directive::Tolerance(t) => {
            tolerance.absolute = *t;
            Ok(())
        }
        ast::Directive::Ulps(u) => {
            tolerance.ulps = *u;
            Ok(())
        }
        ast::Directive::FpTest(file) => {
            run_file::<B, _>(reporter, file)?;
            Ok(())
        }
        ast::Directive::Version(_) => Ok(()),
    };
    res.map_err(|e| match e {
        BackendError::Failure { cause } => cause,
        BackendError::Unsupported => {
            format!("backend does not support directive \"{}\"", directive).into()
        }
    })
}

fn run_test<B, R>(backend: &mut B, tolerance: Tolerance, reporter: &mut R, test: &ast::Test)
where
    B: Backend,
    R: Report,
{
    reporter.start_test(test);
    let outcome = match run_test_inner(backend, tolerance, test) {
        Ok(()) => Outcome::Passed,
        Err(BackendError::Failure { cause }) => Outcome::Failed { cause },
        Err(BackendError::Unsupported) => Outcome::Skipped,
    };
    reporter.finish_test(outcome);
}

fn run_test_inner<B>(backend: &mut B, tolerance: Tolerance, test: &ast::Test) -> BackendResult<()>
where
    B: Backend,
{
    macro_rules! unary {
        ($method:ident, $n:expr) => {{
            let n = parse_operand(backend, $n)?;
            backend.$method(n)
        }};
    }
    macro_rules! binary {
        ($method:ident, $lhs:expr, $rhs:expr) => {{
            let lhs = parse_operand(backend, $lhs)?;
            let rhs = parse_operand(backend, $rhs)?;
            backend.$method(lhs, rhs)
        }};
    }

    let result = match &test.operation {
        ast::Operation::Abs(n) => unary!(abs, n),
        ast::Operation::Acos(n) => unary!(acos, n),
        ast::Operation::Add(lhs, rhs) => binary!(add, lhs, rhs),
        ast::Operation::Asin(n) => unary!(asin, n),
        ast::Operation::Atan(n) => unary!(atan, n),
        ast::Operation::Atan2(y, x) => binary!(atan2, y, x),
        ast::Operation::Atan2Poly(y, x) => binary!(atan2_poly, y, x),
        ast::Operation::AtanPoly(n) => unary!(atan_poly, n),
        ast::Operation::Cos(n) => unary!(cos, n),
        ast::Operation::CosPoly(n) => unary!(cos_poly, n),
        ast::Operation::Divide(lhs, rhs) => binary!(div, lhs, rhs),
        ast::Operation::Exp(n) => unary!(exp, n),
        ast::Operation::FracPart(n) => unary!(frac_part, n),
        ast::Operation::Ln(n) => unary!(ln, n),
        ast::Operation::Log(n, base) => binary!(log, n, base),
        ast::Operation::Minus(n) => unary!(minus, n),
        ast::Operation::Multiply(lhs, rhs) => binary!(mul, lhs, rhs),
        ast::Operation::Power(x, y) => binary!(pow, x, y),
        ast::Operation::Remainder(lhs, rhs) => binary!(rem, lhs, rhs),
        ast::Operation::Sin(n) => unary!(sin, n),
        ast::Operation::SinPoly(n) => unary!(sin_poly, n),
        ast::Operation::SquareRoot(n) => unary!(sqrt, n),
        ast::Operation::SquareRootDigits(n) => unary!(sqrt_digits, n),
        ast::Operation::Subtract(lhs, rhs) => binary!(sub, lhs, rhs),
        ast::Operation::Tan(n) => unary!(tan, n),
        ast::Operation::ToInt(n) => unary!(to_int, n),
        ast::Operation::ToString(n) => {
            let n = parse_operand(backend, n)?;
            let result = backend.to_string(n);
            debug!(id = %test.id, %result, "computed");
            return check_result_str(&test.result, &result);
        }
    };

    match &result {
        Ok(n) => debug!(id = %test.id, result = %n, "computed"),
        Err(e) => debug!(id = %test.id, condition = %e, "computed"),
    }
    check_result(backend, tolerance, test, result)
}

fn parse_operand<B>(backend: &mut B, operand: &str) -> BackendResult<B::D>
where
    B: Backend,
{
    if operand == "#" {
        Err(BackendError::Unsupported)
    } else if let Some(bytes) = operand.strip_prefix('#') {
        let bytes = hex::decode(bytes)?;
        backend.from_be_bytes(&bytes)
    } else if let Some(n) = backend.constant(&operand.to_lowercase()) {
        Ok(n)
    } else if let Some(n) = operand
        .strip_prefix('-')
        .and_then(|name| backend.constant(&name.to_lowercase()))
    {
        Ok(-n)
    } else {
        backend.parse(operand)
    }
}

fn check_result<B>(
    backend: &mut B,
    tolerance: Tolerance,
    test: &ast::Test,
    actual: MathResult<B::D>,
) -> BackendResult<()>
where
    B: Backend,
{
    let actual = match actual {
        Ok(n) if test.result == "?" => {
            return Err(BackendError::failure(format!(
                "got {:#} but expected {}",
                n,
                describe_conditions(&test.conditions)
            )))
        }
        Ok(n) => n,
        Err(e) => {
            let condition = ast::Condition::from(e);
            if test.result == "?" && test.conditions.contains(&condition) {
                return Ok(());
            }
            return Err(BackendError::failure(format!(
                "raised {} but expected {}",
                condition,
                if test.result == "?" {
                    describe_conditions(&test.conditions)
                } else {
                    test.result.clone()
                }
            )));
        }
    };

    // Raw bit patterns must match exactly.
    if test.result.starts_with('#') {
        let expected = parse_operand(backend, &test.result)?;
        return if actual == expected {
            Ok(())
        } else {
            Err(BackendError::failure(format!(
                "got {:#} but expected {:#}",
                actual, expected
            )))
        };
    }

    let expected = parse_operand(backend, &test.result)?;
    if actual == expected {
        return Ok(());
    }
    let expected = backend.to_f64(expected);
    let exact = test.result.parse::<f64>().unwrap_or(expected);
    let allowance = tolerance.allowance(backend.delta(), exact);
    let error = (backend.to_f64(actual) - exact).abs();
    if error <= allowance {
        Ok(())
    } else {
        Err(BackendError::failure(format!(
            "got {:#} but expected {} (error {:e} exceeds {:e})",
            actual, test.result, error, allowance
        )))
    }
}

fn describe_conditions(conditions: &[ast::Condition]) -> String {
    let conditions: Vec<_> = conditions.iter().map(|c| c.to_string()).collect();
    conditions.join(" or ")
}

fn check_result_str(expected: &str, actual: &str) -> Result<(), BackendError> {
    if expected == actual {
        Ok(())
    } else {
        Err(BackendError::failure(format!(
            "got {} but expected {}",
            actual, expected
        )))
    }
}
