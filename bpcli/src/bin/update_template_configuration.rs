use bpcli::commands::configuration::{update_configuration, ConfigurationArgs};
use buildpatch::{env::ProcessEnv, logger};
use clap::Parser;
use colored::Colorize;

fn main() {
    let args = ConfigurationArgs::parse();
    logger::init(&bpcli::log_level(args.log_level.as_deref(), &ProcessEnv));

    if let Err(e) = update_configuration(&args) {
        eprintln!("{} {e}", "Error:".red());
        exit();
    }
}

fn exit() -> ! {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| String::from("update-template-configuration"));
    println!("Exiting {program}...");
    std::process::exit(1)
}
