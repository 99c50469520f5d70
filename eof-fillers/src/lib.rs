//! Conformance fixtures for EVM Object Format v1
//!
//! [`FixtureEnumerator`] produces every valid and invalid container for a
//! set of enabled extensions; the `eof-fill` binary prints them as
//! tab-separated lines.

pub mod enumerator;
pub mod fixture;
pub mod logger;
pub mod rules;

pub use enumerator::FixtureEnumerator;
pub use fixture::{Fixture, FixtureError, FixtureSet};

use anyhow::{Context, Result};
use clap::Parser;
use eof_bytecode::{Code, ContainerLayout, Eips};
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable an extension by EIP number (repeatable, defaults to the v1 set)
    #[arg(short = 'e', long = "eip", value_name = "N")]
    pub eips: Vec<u16>,

    /// Print only fixtures that must be accepted
    #[arg(long = "valid-only", conflicts_with = "invalid_only")]
    pub valid_only: bool,

    /// Print only fixtures that must be rejected
    #[arg(long = "invalid-only")]
    pub invalid_only: bool,

    /// Print each fixture wrapped in legacy deployment initcode
    #[arg(short = 'i', long = "initcode")]
    pub initcode: bool,

    /// Only print fixtures whose name contains this text
    #[arg(short = 'f', long = "filter", value_name = "TEXT")]
    pub filter: Option<String>,

    /// Print the section layout of a hex byte string and exit
    #[arg(short = 'd', long = "decode", value_name = "HEX")]
    pub decode: Option<String>,

    /// Print fixture counts per expected outcome instead of the fixtures
    #[arg(short = 's', long = "summary")]
    pub summary: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Enabled extensions, falling back to the v1 set
    pub fn eip_set(&self) -> Result<Eips> {
        if self.eips.is_empty() {
            return Ok(Eips::V1);
        }
        Eips::from_numbers(&self.eips).context("invalid --eip value")
    }

    fn selects(&self, fixture: &Fixture) -> bool {
        let side = match (self.valid_only, self.invalid_only) {
            (true, _) => fixture.is_valid(),
            (_, true) => !fixture.is_valid(),
            _ => true,
        };
        side && self
            .filter
            .as_deref()
            .is_none_or(|text| fixture.name.contains(text))
    }
}

pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    if let Some(hex) = &args.decode {
        return decode(hex, out);
    }

    let enumerator = FixtureEnumerator::new(args.eip_set()?);
    let set = enumerator.generate()?;
    let selected: Vec<&Fixture> = set.fixtures().filter(|f| args.selects(f)).collect();
    tracing::debug!(selected = selected.len(), total = set.len(), "fixtures selected");

    if args.summary {
        return summary(&selected, out);
    }

    for fixture in selected {
        let code = if args.initcode {
            fixture
                .initcode()
                .with_context(|| format!("cannot wrap fixture {}", fixture.name))?
        } else {
            fixture.code.clone()
        };
        writeln!(out, "{}\t{}\t{}", fixture.name, code.to_hex(), fixture.outcome())?;
    }
    Ok(())
}

fn decode<W: Write>(hex: &str, out: &mut W) -> Result<()> {
    let bytes = Code::from_hex(hex)?.to_bytes();
    let layout = ContainerLayout::parse(&bytes)?;
    write!(out, "{layout}")?;
    Ok(())
}

fn summary<W: Write>(fixtures: &[&Fixture], out: &mut W) -> Result<()> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for fixture in fixtures {
        *counts.entry(fixture.outcome()).or_default() += 1;
    }
    for (outcome, count) in &counts {
        writeln!(out, "{outcome}\t{count}")?;
    }
    writeln!(out, "total\t{}", fixtures.len())?;
    Ok(())
}
