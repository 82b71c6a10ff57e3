use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;
use serde::Serialize;

use pgxmatch_core::models::GeneCall;
use pgxmatch_core::utils::{
    read_gene_calls, read_gene_exceptions, read_guideline_packages, read_phenotype_map,
};
use pgxmatch_reporter::{
    CombinationMode, GeneReport, GuidelineReport, MatchDiagnostics, ReportContext, ReporterConfig,
};

#[derive(Serialize)]
struct MatchOutput<'a> {
    config: &'a ReporterConfig,
    diagnostics: MatchDiagnostics,
    guidelines: &'a [GuidelineReport],
    genes: Vec<GeneOutput<'a>>,
}

#[derive(Serialize)]
struct GeneOutput<'a> {
    #[serde(flatten)]
    report: &'a GeneReport,
    called: bool,
    external_call_source: bool,
    calls: Vec<String>,
}

fn build_output(context: &ReportContext) -> MatchOutput<'_> {
    let genes = context
        .gene_reports()
        .iter()
        .map(|report| GeneOutput {
            report,
            called: report.is_called(),
            external_call_source: report.is_external_call_source(),
            calls: context.gene_diplotypes(report.gene()).collect(),
        })
        .collect();

    MatchOutput {
        config: context.config(),
        diagnostics: context.diagnostics(),
        guidelines: context.guideline_reports(),
        genes,
    }
}

fn load_config(matches: &ArgMatches) -> Result<ReporterConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ReporterConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load reporter config: {}", path))?,
        None => ReporterConfig::default(),
    };

    if let Some(mode) = matches.get_one::<String>("combination-mode") {
        config.combination_mode = match CombinationMode::from_str(mode) {
            Ok(mode) => mode,
            Err(err) => anyhow::bail!(err),
        };
    }

    Ok(config)
}

fn build_context(matches: &ArgMatches) -> Result<ReportContext> {
    let calls_path = matches
        .get_one::<String>("calls")
        .expect("--calls is required");
    let guidelines_path = matches
        .get_one::<String>("guidelines")
        .expect("--guidelines is required");
    let phenotypes_path = matches
        .get_one::<String>("phenotypes")
        .expect("--phenotypes is required");

    let config = load_config(matches)?;

    let calls = read_gene_calls(Path::new(calls_path))?;
    let alternate_calls: Vec<GeneCall> = match matches.get_one::<String>("alternate-calls") {
        Some(path) => read_gene_calls(Path::new(path))?,
        None => Vec::new(),
    };
    let guidelines = read_guideline_packages(Path::new(guidelines_path))?;
    let phenotypes = read_phenotype_map(Path::new(phenotypes_path))?;

    info!(
        "Loaded {} call(s), {} alternate call(s), {} guideline(s), {} phenotype translation(s)",
        calls.len(),
        alternate_calls.len(),
        guidelines.len(),
        phenotypes.len()
    );

    let mut context = ReportContext::new(
        &calls,
        &alternate_calls,
        &guidelines,
        &phenotypes,
        config,
    )
    .context("Failed to build report context")?;

    if let Some(path) = matches.get_one::<String>("exceptions") {
        let exceptions = read_gene_exceptions(Path::new(path))?;
        context.apply_exceptions(&exceptions);
    }

    Ok(context)
}

pub fn run_match(matches: &ArgMatches) -> Result<()> {
    let context = build_context(matches)?;
    let output_path = matches.get_one::<String>("output");

    let json = serde_json::to_string_pretty(&build_output(&context))
        .context("Failed to serialize output to JSON")?;

    match output_path {
        Some(p) => {
            let mut file = File::create(Path::new(p))
                .with_context(|| format!("Failed to create output file: {}", p))?;
            file.write_all(json.as_bytes())?;
            info!("Output written to {}", p);
        }
        None => {
            io::stdout().write_all(json.as_bytes())?;
            println!(); // trailing newline
        }
    }

    Ok(())
}
