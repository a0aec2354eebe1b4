use bpcli::commands::timestamp::{update_timestamp, TimestampArgs};
use buildpatch::{env::ProcessEnv, logger};
use clap::Parser;
use colored::Colorize;

fn main() {
    let args = TimestampArgs::parse();
    logger::init(&bpcli::log_level(args.log_level.as_deref(), &ProcessEnv));

    if let Err(e) = update_timestamp(&args) {
        eprintln!("{} {e}", "Error:".red());
        std::process::exit(1);
    }
}
