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
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use fptest::ast;
use fptest::backend::{Fixed32Backend, Fixed64Backend};
use fptest::parse;
use fptest::run::{self, Outcome, Report};

/// Fixed-point formats, named by whole and fractional bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendSpec {
    #[value(name = "q24.8")]
    Q24_8,
    #[value(name = "q16.16")]
    Q16_16,
    #[value(name = "q14.18")]
    Q14_18,
    #[value(name = "q8.24")]
    Q8_24,
    #[value(name = "q32.32")]
    Q32_32,
    #[value(name = "q16.48")]
    Q16_48,
}

/// Runs .fptest test vectors against a fixed-point format.
#[derive(Parser, Debug)]
#[command(name = "fptest")]
struct Args {
    /// The fixed-point format to test.
    #[arg(short, long, value_enum, default_value = "q16.16")]
    backend: BackendSpec,

    /// Print every test and log computed values.
    #[arg(short, long)]
    verbose: bool,

    /// Test vector files.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut reporter = ConsoleReporter::new(args.verbose);

    for path in &args.files {
        let file = parse::parse_file(path)?;
        info!(path = %path.display(), backend = ?args.backend, "running");
        match args.backend {
            BackendSpec::Q24_8 => run::run_file::<Fixed32Backend<24>, _>(&mut reporter, &file)?,
            BackendSpec::Q16_16 => run::run_file::<Fixed32Backend<16>, _>(&mut reporter, &file)?,
            BackendSpec::Q14_18 => run::run_file::<Fixed32Backend<14>, _>(&mut reporter, &file)?,
            BackendSpec::Q8_24 => run::run_file::<Fixed32Backend<8>, _>(&mut reporter, &file)?,
            BackendSpec::Q32_32 => run::run_file::<Fixed64Backend<32>, _>(&mut reporter, &file)?,
            BackendSpec::Q16_48 => run::run_file::<Fixed64Backend<16>, _>(&mut reporter, &file)?,
        }
    }

    println!("PASS {}", reporter.passes);
    println!("FAIL {}", reporter.failures);
    println!("SKIP {}", reporter.skips);

    if reporter.failures > 0 {
        process::exit(1)
    }
    Ok(())
}

struct ConsoleReporter {
    failures: usize,
    passes: usize,
    skips: usize,
    verbose: bool,
}

impl ConsoleReporter {
    fn new(verbose: bool) -> ConsoleReporter {
        ConsoleReporter {
            failures: 0,
            passes: 0,
            skips: 0,
            verbose,
        }
    }
}

impl Report for ConsoleReporter {
    fn start_file(&mut self, file: &ast::File) {
        println!("==> {}", file.path.display())
    }

    fn finish_file(&mut self) {}

    fn start_test(&mut self, test: &ast::Test) {
        if self.verbose {
            print!("{} {} -> {}", test.id, test.operation, test.result);
            if !test.conditions.is_empty() {
                let conditions: Vec<_> = test.conditions.iter().map(|c| c.to_string()).collect();
                print!(" ({})", conditions.join(", "));
            }
            println!();
        } else {
            print!("{} ", test.id);
        }
    }

    fn finish_test(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Passed => self.passes += 1,
            Outcome::Failed { .. } => self.failures += 1,
            Outcome::Skipped => self.skips += 1,
        }
        match outcome {
            Outcome::Passed => println!("PASS"),
            Outcome::Failed { cause } => println!("FAIL: {}", cause),
            Outcome::Skipped => println!("SKIP"),
        }
        if self.verbose {
            println!()
        }
    }
}
