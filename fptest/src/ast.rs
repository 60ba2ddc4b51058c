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

use std::fmt;
use std::path::PathBuf;

use fixedpt::Precision;

#[derive(Debug)]
pub struct File {
    pub path: PathBuf,
    pub lines: Vec<Line>,
}

#[derive(Debug)]
pub enum Line {
    Directive(Directive),
    Test(Test),
}

#[derive(Debug)]
pub enum Directive {
    FpTest(File),
    Precision(Precision),
    Tolerance(f64),
    Ulps(u32),
    Version(String),
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Directive::FpTest(file) => write!(f, "fptest: {}", file.path.display()),
            Directive::Precision(p) => {
                f.write_str("precision: ")?;
                match p {
                    Precision::Default => f.write_str("default"),
                    Precision::Full => f.write_str("full"),
                    Precision::Digits(n) => write!(f, "{}", n),
                }
            }
            Directive::Tolerance(t) => write!(f, "tolerance: {}", t),
            Directive::Ulps(u) => write!(f, "ulps: {}", u),
            Directive::Version(v) => write!(f, "version: {}", v),
        }
    }
}

#[derive(Debug)]
pub struct Test {
    pub id: String,
    pub operation: Operation,
    pub result: String,
    pub conditions: Vec<Condition>,
}

#[derive(Debug)]
pub enum Operation {
    Abs(String),
    Acos(String),
    Add(String, String),
    Asin(String),
    Atan(String),
    Atan2(String, String),
    Atan2Poly(String, String),
    AtanPoly(String),
    Cos(String),
    CosPoly(String),
    Divide(String, String),
    Exp(String),
    FracPart(String),
    Ln(String),
    Log(String, String),
    Minus(String),
    Multiply(String, String),
    Power(String, String),
    Remainder(String, String),
    Sin(String),
    SinPoly(String),
    SquareRoot(String),
    SquareRootDigits(String),
    Subtract(String, String),
    Tan(String),
    ToInt(String),
    ToString(String),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operation::Abs(op) => write!(f, "abs {}", op),
            Operation::Acos(op) => write!(f, "acos {}", op),
            Operation::Add(op1, op2) => write!(f, "add {} {}", op1, op2),
            Operation::Asin(op) => write!(f, "asin {}", op),
            Operation::Atan(op) => write!(f, "atan {}", op),
            Operation::Atan2(op1, op2) => write!(f, "atan2 {} {}", op1, op2),
            Operation::Atan2Poly(op1, op2) => write!(f, "atan2poly {} {}", op1, op2),
            Operation::AtanPoly(op) => write!(f, "atanpoly {}", op),
            Operation::Cos(op) => write!(f, "cos {}", op),
            Operation::CosPoly(op) => write!(f, "cospoly {}", op),
            Operation::Divide(op1, op2) => write!(f, "divide {} {}", op1, op2),
            Operation::Exp(op) => write!(f, "exp {}", op),
            Operation::FracPart(op) => write!(f, "fracpart {}", op),
            Operation::Ln(op) => write!(f, "ln {}", op),
            Operation::Log(op1, op2) => write!(f, "log {} {}", op1, op2),
            Operation::Minus(op) => write!(f, "minus {}", op),
            Operation::Multiply(op1, op2) => write!(f, "multiply {} {}", op1, op2),
            Operation::Power(op1, op2) => write!(f, "power {} {}", op1, op2),
            Operation::Remainder(op1, op2) => write!(f, "remainder {} {}", op1, op2),
            Operation::Sin(op) => write!(f, "sin {}", op),
            Operation::SinPoly(op) => write!(f, "sinpoly {}", op),
            Operation::SquareRoot(op) => write!(f, "squareroot {}", op),
            Operation::SquareRootDigits(op) => write!(f, "squarerootdigits {}", op),
            Operation::Subtract(op1, op2) => write!(f, "subtract {} {}", op1, op2),
            Operation::Tan(op) => write!(f, "tan {}", op),
            Operation::ToInt(op) => write!(f, "toint {}", op),
            Operation::ToString(op) => write!(f, "tostring {}", op),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    DivisionByZero,
    DomainError,
    NegativeInput,
    Overflow,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Condition::DivisionByZero => f.write_str("DivisionByZero"),
            Condition::DomainError => f.write_str("DomainError"),
            Condition::NegativeInput => f.write_str("NegativeInput"),
            Condition::Overflow => f.write_str("Overflow"),
        }
    }
}

impl From<fixedpt::MathError> for Condition {
    fn from(e: fixedpt::MathError) -> Condition {
        match e {
            fixedpt::MathError::DivideByZero => Condition::DivisionByZero,
            fixedpt::MathError::DomainError => Condition::DomainError,
            fixedpt::MathError::NegativeInput => Condition::NegativeInput,
            fixedpt::MathError::Overflow => Condition::Overflow,
        }
    }
}
