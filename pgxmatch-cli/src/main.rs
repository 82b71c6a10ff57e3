mod matching;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use log::LevelFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "pgxmatch";
    pub const BIN_NAME: &str = "pgxmatch";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Match genotype calls against pharmacogenomic dosing guidelines.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase logging verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(matching::cli::create_match_cli())
}

fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbosity {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        2 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        //
        // MATCH
        //
        Some((matching::cli::MATCH_CMD, matches)) => {
            matching::handlers::run_match(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
