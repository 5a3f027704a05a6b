//! Interactive collection of the setup parameters on a terminal.

use crate::model::config::SetupConfig;
use anyhow::{bail, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Asks for one value until it parses. An empty answer keeps `default`.
fn ask<T, R, W>(input: &mut R, output: &mut W, question: &str, default: T) -> Result<T>
where
    T: FromStr + std::fmt::Display + Copy,
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{question} [{default}]: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input ended while asking: {question}");
        }
        let answer = line.trim();
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(output, "'{answer}' is not a valid number, try again.")?,
        }
    }
}

/// Prompts for the five setup values: people, initially infected,
/// vulnerability percentage, minimum age, maximum age.
///
/// Values are checked against each other once all have been read; an
/// inconsistent answer restarts the questions with the rejected answers as
/// defaults.
pub fn prompt_setup<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    defaults: &SetupConfig,
) -> Result<SetupConfig> {
    let mut current = defaults.clone();
    loop {
        current.population = ask(input, output, "Number of people", current.population)?;
        current.initial_infected = ask(
            input,
            output,
            "Number of initially infected people",
            current.initial_infected,
        )?;
        current.vulnerable_percent = ask(
            input,
            output,
            "Vulnerability percentage (0-100)",
            current.vulnerable_percent,
        )?;
        current.min_age = ask(input, output, "Minimum age", current.min_age)?;
        current.max_age = ask(input, output, "Maximum age", current.max_age)?;

        match check(&current) {
            None => return Ok(current),
            Some(problem) => writeln!(output, "{problem}, please re-enter.")?,
        }
    }
}

fn check(setup: &SetupConfig) -> Option<String> {
    if setup.initial_infected > setup.population {
        Some(format!(
            "{} infected is more than {} people",
            setup.initial_infected, setup.population
        ))
    } else if setup.vulnerable_percent > 100 {
        Some("Vulnerability percentage must be at most 100".to_string())
    } else if setup.min_age > setup.max_age {
        Some(format!(
            "Minimum age {} is above maximum age {}",
            setup.min_age, setup.max_age
        ))
    } else {
        None
    }
}
