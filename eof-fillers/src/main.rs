use anyhow::Result;
use clap::Parser;

use eof_fillers::{Args, logger, run};

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose)?;
    let stdout = std::io::stdout();
    run(&args, &mut stdout.lock())
}
