use std::ops::Add;

use log::{debug, warn};
use serde::Serialize;

use pgxmatch_core::PhenotypeLookup;

use crate::combiner::make_all_called_genotypes;
use crate::config::CombinationMode;
use crate::error::ReportResult;
use crate::gene_report::GeneReportSet;
use crate::guideline_report::GuidelineReport;

///
/// Counts collected while matching. A reportable guideline whose groups never
/// match usually points at group genotypes that don't line up with the
/// guideline's genes or the phenotype table.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchDiagnostics {
    pub guidelines: usize,
    pub reportable: usize,
    pub matched_groups: usize,
    /// Unmatched groups of reportable guidelines.
    pub unmatched_groups: usize,
}

impl Add for MatchDiagnostics {
    type Output = MatchDiagnostics;

    fn add(self, other: MatchDiagnostics) -> MatchDiagnostics {
        MatchDiagnostics {
            guidelines: self.guidelines + other.guidelines,
            reportable: self.reportable + other.reportable,
            matched_groups: self.matched_groups + other.matched_groups,
            unmatched_groups: self.unmatched_groups + other.unmatched_groups,
        }
    }
}

///
/// Evaluate one guideline against the sample's gene reports, replacing any
/// earlier result stored on the guideline.
///
/// Every related gene must have a gene report; a missing one is an error.
///
pub fn evaluate_guideline(
    guideline: &mut GuidelineReport,
    genes: &GeneReportSet,
    phenotypes: &dyn PhenotypeLookup,
    mode: CombinationMode,
) -> ReportResult<MatchDiagnostics> {
    guideline.reset_matches();

    let mut uncalled = Vec::new();
    for symbol in guideline.related_gene_symbols() {
        if !genes.is_called(symbol)? {
            uncalled.push(symbol.clone());
        }
    }
    let reportable = uncalled.len() < guideline.related_gene_symbols().len();

    guideline.set_reportable(reportable);
    for gene in &uncalled {
        guideline.add_uncalled_gene(gene);
    }

    let mut diagnostics = MatchDiagnostics {
        guidelines: 1,
        ..Default::default()
    };

    if !reportable {
        debug!("Guideline {} is not reportable", guideline.id());
        return Ok(diagnostics);
    }
    diagnostics.reportable = 1;

    let called_genotypes = make_all_called_genotypes(guideline, genes, phenotypes, mode)?;

    let bindings: Vec<(String, String)> = guideline
        .groups()
        .iter()
        .flat_map(|group| {
            called_genotypes
                .iter()
                .filter(move |genotype| group.recognizes(genotype))
                .map(move |genotype| (group.id.clone(), genotype.clone()))
        })
        .collect();

    for (group_id, genotype) in &bindings {
        guideline.add_matching_group(group_id);
        guideline.put_matched_diplotype(group_id, genotype);
    }

    diagnostics.matched_groups = guideline.matching_groups().count();
    diagnostics.unmatched_groups = guideline.unmatched_groups().count();

    debug!(
        "Guideline {}: {} called genotype(s), {} matched group(s)",
        guideline.id(),
        called_genotypes.len(),
        diagnostics.matched_groups
    );
    if diagnostics.matched_groups == 0 && !guideline.groups().is_empty() {
        warn!(
            "Reportable guideline {} matched none of its {} group(s); called genotypes: {:?}",
            guideline.id(),
            guideline.groups().len(),
            called_genotypes
        );
    }

    Ok(diagnostics)
}

///
/// Evaluate every guideline. Gene reports must be fully populated first; they
/// are only read here, and each guideline only writes its own state.
///
#[cfg(not(feature = "parallel"))]
pub fn find_matches(
    guidelines: &mut [GuidelineReport],
    genes: &GeneReportSet,
    phenotypes: &dyn PhenotypeLookup,
    mode: CombinationMode,
) -> ReportResult<MatchDiagnostics> {
    guidelines
        .iter_mut()
        .try_fold(
            MatchDiagnostics::default(),
            |acc, guideline| -> ReportResult<MatchDiagnostics> {
                Ok(acc + evaluate_guideline(guideline, genes, phenotypes, mode)?)
            },
        )
}

#[cfg(feature = "parallel")]
pub fn find_matches(
    guidelines: &mut [GuidelineReport],
    genes: &GeneReportSet,
    phenotypes: &dyn PhenotypeLookup,
    mode: CombinationMode,
) -> ReportResult<MatchDiagnostics> {
    use rayon::prelude::*;

    let results = guidelines
        .par_iter_mut()
        .map(|guideline| evaluate_guideline(guideline, genes, phenotypes, mode))
        .collect::<ReportResult<Vec<MatchDiagnostics>>>()?;

    Ok(results
        .into_iter()
        .fold(MatchDiagnostics::default(), |acc, d| acc + d))
}
