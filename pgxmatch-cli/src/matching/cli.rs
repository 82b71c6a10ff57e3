use clap::{Arg, Command, arg};

pub const MATCH_CMD: &str = "match";

pub fn create_match_cli() -> Command {
    Command::new(MATCH_CMD)
        .about("Match sample diplotype calls against dosing guideline annotation groups.")
        .arg(
            arg!(--calls <CALLS>)
                .required(true)
                .help("Path to the primary gene calls JSON file (.json or .json.gz)"),
        )
        .arg(
            Arg::new("alternate-calls")
                .long("alternate-calls")
                .required(false)
                .help("Path to gene calls from an alternate calling pipeline"),
        )
        .arg(
            arg!(--guidelines <GUIDELINES>)
                .required(true)
                .help("Path to a JSON array of guidelines, or a directory of guideline JSON files"),
        )
        .arg(
            arg!(--phenotypes <PHENOTYPES>)
                .required(true)
                .help("Path to the gene -> diplotype -> phenotype JSON table"),
        )
        .arg(
            arg!(--exceptions <EXCEPTIONS>)
                .required(false)
                .help("Path to gene exceptions to attach to gene reports"),
        )
        .arg(
            arg!(--config <CONFIG>)
                .required(false)
                .help("Path to a reporter TOML config file"),
        )
        .arg(
            Arg::new("combination-mode")
                .long("combination-mode")
                .required(false)
                .value_parser(["pairwise", "cartesian"])
                .help("Override the combination mode from the config file"),
        )
        .arg(
            arg!(--output <OUTPUT>)
                .required(false)
                .help("Output JSON path (default: stdout)"),
        )
}
