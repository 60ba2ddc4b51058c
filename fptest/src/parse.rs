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
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use fixedpt::Precision;

use crate::ast;
use crate::lex::LexBuf;

struct Context<'a> {
    path: &'a Path,
}

pub fn parse_file(path: &Path) -> Result<ast::File, Box<dyn Error>> {
    let f = BufReader::new(File::open(path)?);
    let mut lines = vec![];
    for line in f.lines() {
        lines.push(line?);
    }
    parse_lines(path, lines.iter().map(|l| l.as_str()))
}

/// Parses test vectors that did not come from a file. `path` locates the
/// files named by `fptest:` directives.
pub fn parse_str(path: &Path, s: &str) -> Result<ast::File, Box<dyn Error>> {
    parse_lines(path, s.lines())
}

fn parse_lines<'a, I>(path: &Path, lines: I) -> Result<ast::File, Box<dyn Error>>
where
    I: Iterator<Item = &'a str>,
{
    let cx = &Context { path };
    let mut out = vec![];
    for (i, line) in lines.enumerate() {
        let mut buf = LexBuf::new(line);
        match parse_line(cx, &mut buf) {
            Ok(None) => (),
            Ok(Some(line)) => out.push(line),
            Err(e) => return Err(format!("parsing line {}: {}", i + 1, e).into()),
        }
    }
    Ok(ast::File {
        path: path.to_path_buf(),
        lines: out,
    })
}

fn parse_line(cx: &Context, buf: &mut LexBuf) -> Result<Option<ast::Line>, Box<dyn Error>> {
    let token = match parse_token(buf) {
        None => return Ok(None),
        Some(token) => token,
    };
    if let Some(keyword) = token.strip_suffix(':') {
        let value = require_token(buf, "value")?;
        Ok(Some(ast::Line::Directive(parse_directive(
            cx, keyword, value,
        )?)))
    } else {
        let id = token;
        let operation = parse_operation(buf)?;
        if require_token(buf, "->")? != "->" {
            return Err("missing \"->\" token".into());
        }
        let result = require_token(buf, "result")?;
        let mut conditions = vec![];
        while let Some(condition) = parse_token(buf) {
            conditions.push(condition.parse()?);
        }
        if result == "?" && conditions.is_empty() {
            return Err("result \"?\" requires a condition".into());
        }
        Ok(Some(ast::Line::Test(ast::Test {
            id,
            operation,
            result,
            conditions,
        })))
    }
}

fn require_token(buf: &mut LexBuf, name: &str) -> Result<String, Box<dyn Error>> {
    parse_token(buf).ok_or_else(|| format!("missing \"{}\" token", name).into())
}

fn parse_token(buf: &mut LexBuf) -> Option<String> {
    buf.skip_whitespace();

    if buf.consume("--") {
        while buf.next().is_some() {}
        return None;
    }

    match buf.peek() {
        Some(quote @ '\'') | Some(quote @ '"') => {
            buf.next();
            parse_quoted_token(buf, quote)
        }
        _ => parse_unquoted_token(buf),
    }
}

fn parse_unquoted_token(buf: &mut LexBuf) -> Option<String> {
    let mut token = String::new();
    while let Some(ch) = buf.peek() {
        match ch {
            ' ' | '\t' => break,
            ch => {
                token.push(ch);
                buf.next();
            }
        }
    }
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn parse_quoted_token(buf: &mut LexBuf, quote: char) -> Option<String> {
    let mut token = String::new();
    while let Some(ch) = buf.next() {
        if ch == quote {
            if buf.peek() == Some(quote) {
                token.push(quote);
                buf.next();
            } else {
                break;
            }
        } else {
            token.push(ch);
        }
    }
    Some(token)
}

fn parse_directive(
    cx: &Context,
    keyword: &str,
    value: String,
) -> Result<ast::Directive, Box<dyn Error>> {
    match keyword.to_lowercase().as_str() {
        "fptest" => {
            let path = cx.path.with_file_name(value).with_extension("fptest");
            let file =
                parse_file(&path).map_err(|e| format!("opening {}: {}", path.display(), e))?;
            Ok(ast::Directive::FpTest(file))
        }
        "precision" => Ok(ast::Directive::Precision(parse_precision(&value)?)),
        "tolerance" => {
            let tolerance: f64 = value.parse()?;
            if !(tolerance >= 0.0) {
                return Err(format!("invalid tolerance \"{}\"", value).into());
            }
            Ok(ast::Directive::Tolerance(tolerance))
        }
        "ulps" => Ok(ast::Directive::Ulps(value.parse()?)),
        "version" => Ok(ast::Directive::Version(value)),
        _ => Err(format!("unknown directive \"{}\"", keyword).into()),
    }
}

fn parse_precision(s: &str) -> Result<Precision, Box<dyn Error>> {
    match s {
        "default" => Ok(Precision::Default),
        "full" => Ok(Precision::Full),
        _ => match s.parse::<i32>() {
            Ok(n) if n >= -2 => Ok(Precision::from_legacy(n)),
            _ => Err(format!("invalid precision \"{}\"", s).into()),
        },
    }
}

fn parse_operation(buf: &mut LexBuf) -> Result<ast::Operation, Box<dyn Error>> {
    let operation = require_token(buf, "operation")?;
    let mut op = || require_token(buf, "operand");
    match operation.to_lowercase().as_str() {
        "abs" => Ok(ast::Operation::Abs(op()?)),
        "acos" => Ok(ast::Operation::Acos(op()?)),
        "add" => Ok(ast::Operation::Add(op()?, op()?)),
        "asin" => Ok(ast::Operation::Asin(op()?)),
        "atan" => Ok(ast::Operation::Atan(op()?)),
        "atan2" => Ok(ast::Operation::Atan2(op()?, op()?)),
        "atan2poly" => Ok(ast::Operation::Atan2Poly(op()?, op()?)),
        "atanpoly" => Ok(ast::Operation::AtanPoly(op()?)),
        "cos" => Ok(ast::Operation::Cos(op()?)),
        "cospoly" => Ok(ast::Operation::CosPoly(op()?)),
        "divide" => Ok(ast::Operation::Divide(op()?, op()?)),
        "exp" => Ok(ast::Operation::Exp(op()?)),
        "fracpart" => Ok(ast::Operation::FracPart(op()?)),
        "ln" => Ok(ast::Operation::Ln(op()?)),
        "log" => Ok(ast::Operation::Log(op()?, op()?)),
        "minus" => Ok(ast::Operation::Minus(op()?)),
        "multiply" => Ok(ast::Operation::Multiply(op()?, op()?)),
        "power" => Ok(ast::Operation::Power(op()?, op()?)),
        "remainder" => Ok(ast::Operation::Remainder(op()?, op()?)),
        "sin" => Ok(ast::Operation::Sin(op()?)),
        "sinpoly" => Ok(ast::Operation::SinPoly(op()?)),
        "squareroot" => Ok(ast::Operation::SquareRoot(op()?)),
        "squarerootdigits" => Ok(ast::Operation::SquareRootDigits(op()?)),
        "subtract" => Ok(ast::Operation::Subtract(op()?, op()?)),
        "tan" => Ok(ast::Operation::Tan(op()?)),
        "toint" => Ok(ast::Operation::ToInt(op()?)),
        "tostring" => Ok(ast::Operation::ToString(op()?)),
        _ => Err(format!("unknown operation \"{}\"", operation).into()),
    }
}

impl FromStr for ast::Condition {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<ast::Condition, Box<dyn Error>> {
        match s.to_lowercase().as_str() {
            "division_by_zero" => Ok(ast::Condition::DivisionByZero),
            "domain_error" => Ok(ast::Condition::DomainError),
            "negative_input" => Ok(ast::Condition::NegativeInput),
            "overflow" => Ok(ast::Condition::Overflow),
            _ => Err(format!("unknown condition \"{}\"", s).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use fixedpt::Precision;

    use super::parse_str;
    use crate::ast::{Condition, Directive, Line, Operation};

    #[test]
    fn test_parse() {
        let file = parse_str(
            Path::new("inline.fptest"),
            "-- a comment\n\
             \n\
             precision: 2\n\
             tolerance: 0.001 -- trailing comment\n\
             add001 add 1.5 '-2' -> -0.5\n\
             sqr001 squareroot -1 -> ? negative_input\n\
             str001 tostring 3.14159 -> \"3.14\"\n",
        )
        .unwrap();
        assert_eq!(file.lines.len(), 5);
        match &file.lines[0] {
            Line::Directive(Directive::Precision(p)) => assert_eq!(*p, Precision::Digits(2)),
            line => panic!("unexpected line {:?}", line),
        }
        match &file.lines[1] {
            Line::Directive(Directive::Tolerance(t)) => assert_eq!(*t, 0.001),
            line => panic!("unexpected line {:?}", line),
        }
        match &file.lines[2] {
            Line::Test(test) => {
                assert_eq!(test.id, "add001");
                assert!(matches!(&test.operation, Operation::Add(a, b) if a == "1.5" && b == "-2"));
                assert_eq!(test.result, "-0.5");
            }
            line => panic!("unexpected line {:?}", line),
        }
        match &file.lines[3] {
            Line::Test(test) => {
                assert_eq!(test.result, "?");
                assert_eq!(test.conditions, vec![Condition::NegativeInput]);
            }
            line => panic!("unexpected line {:?}", line),
        }
        match &file.lines[4] {
            Line::Test(test) => assert_eq!(test.result, "3.14"),
            line => panic!("unexpected line {:?}", line),
        }
    }

    #[test]
    fn test_parse_errors() {
        let path = Path::new("inline.fptest");
        for (input, err) in [
            ("add001 add 1", "parsing line 1: missing \"operand\" token"),
            ("add001 add 1 2 => 3", "parsing line 1: missing \"->\" token"),
            ("x001 frob 1 -> 1", "parsing line 1: unknown operation \"frob\""),
            ("sqr001 squareroot -1 -> ?", "parsing line 1: result \"?\" requires a condition"),
            ("sqr001 squareroot -1 -> ? oops", "parsing line 1: unknown condition \"oops\""),
            ("rounding: half_up", "parsing line 1: unknown directive \"rounding\""),
            ("precision: -3", "parsing line 1: invalid precision \"-3\""),
            ("tolerance: -1", "parsing line 1: invalid tolerance \"-1\""),
        ] {
            assert_eq!(parse_str(path, input).unwrap_err().to_string(), err);
        }
    }
}
