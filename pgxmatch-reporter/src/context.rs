use log::info;

use pgxmatch_core::PhenotypeLookup;
use pgxmatch_core::models::{CallSource, GeneCall, GeneException, GuidelinePackage};

use crate::config::ReporterConfig;
use crate::error::ReportResult;
use crate::gene_report::{GeneReport, GeneReportSet};
use crate::guideline_report::GuidelineReport;
use crate::matcher::{MatchDiagnostics, find_matches};

///
/// Everything needed to report on a sample: one gene report per gene used by
/// any guideline, and one guideline report per guideline, matched against the
/// sample's calls.
///
/// Construction is all-or-nothing. Duplicate gene reports, duplicate call data
/// and calls for genes no guideline uses all abort it.
///
#[derive(Debug, Clone)]
pub struct ReportContext {
    gene_reports: GeneReportSet,
    guideline_reports: Vec<GuidelineReport>,
    diagnostics: MatchDiagnostics,
    config: ReporterConfig,
}

impl ReportContext {
    ///
    /// Build the context and run matching.
    ///
    /// # Arguments
    ///
    /// - calls: calls from the primary genotyping pipeline
    /// - alternate_calls: calls from the alternate pipeline (may be empty)
    /// - guidelines: all guidelines to try to apply, in reporting order
    /// - phenotypes: diplotype to phenotype translation table
    /// - config: reporter settings
    ///
    pub fn new(
        calls: &[GeneCall],
        alternate_calls: &[GeneCall],
        guidelines: &[GuidelinePackage],
        phenotypes: &dyn PhenotypeLookup,
        config: ReporterConfig,
    ) -> ReportResult<Self> {
        let guideline_reports: Vec<GuidelineReport> =
            guidelines.iter().map(GuidelineReport::from).collect();

        // the full list of gene reports, based on all the genes used in guidelines
        let mut gene_reports = GeneReportSet::new();
        for symbol in guideline_reports
            .iter()
            .flat_map(|r| r.related_gene_symbols())
        {
            if !gene_reports.contains(symbol) {
                gene_reports.insert(GeneReport::new(symbol))?;
            }
        }

        let mut context = ReportContext {
            gene_reports,
            guideline_reports,
            diagnostics: MatchDiagnostics::default(),
            config,
        };

        context.compile_gene_data(calls, CallSource::Primary, phenotypes)?;
        context.compile_gene_data(alternate_calls, CallSource::Alternate, phenotypes)?;

        context.find_matches(phenotypes)?;

        for guideline in &context.guideline_reports {
            for gene in guideline.related_gene_symbols() {
                context
                    .gene_reports
                    .get_mut(gene)?
                    .add_related_guideline(guideline);
            }
        }

        info!(
            "Matched {} guideline(s) over {} gene(s): {} reportable, {} group(s) matched",
            context.diagnostics.guidelines,
            context.gene_reports.len(),
            context.diagnostics.reportable,
            context.diagnostics.matched_groups
        );

        Ok(context)
    }

    fn compile_gene_data(
        &mut self,
        calls: &[GeneCall],
        source: CallSource,
        phenotypes: &dyn PhenotypeLookup,
    ) -> ReportResult<()> {
        for call in calls {
            let report = self.gene_reports.get_mut(&call.gene)?;
            match source {
                CallSource::Primary => report.set_call_data(call, phenotypes)?,
                CallSource::Alternate => report.set_alternate_call_data(call, phenotypes)?,
            }
        }
        Ok(())
    }

    ///
    /// (Re)run matching for every guideline against the current gene reports.
    /// Running it again on the same inputs gives the same results.
    ///
    pub fn find_matches(&mut self, phenotypes: &dyn PhenotypeLookup) -> ReportResult<MatchDiagnostics> {
        self.diagnostics = find_matches(
            &mut self.guideline_reports,
            &self.gene_reports,
            phenotypes,
            self.config.combination_mode,
        )?;
        Ok(self.diagnostics)
    }

    pub fn apply_exceptions(&mut self, exceptions: &[GeneException]) {
        self.gene_reports
            .iter_mut()
            .for_each(|r| r.apply_exceptions(exceptions));
    }

    /// Guideline reports, in the order the guidelines were supplied.
    pub fn guideline_reports(&self) -> &[GuidelineReport] {
        &self.guideline_reports
    }

    /// Gene reports, in gene symbol order.
    pub fn gene_reports(&self) -> &GeneReportSet {
        &self.gene_reports
    }

    pub fn gene_report(&self, gene: &str) -> ReportResult<&GeneReport> {
        self.gene_reports.get(gene)
    }

    pub fn diagnostics(&self) -> MatchDiagnostics {
        self.diagnostics
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    ///
    /// The calls for a gene as `GENE:diplotype` strings, e.g. `CYP2C19:*1/*2`.
    /// Diplotypes from the alternate pipeline carry the configured tag. Unknown
    /// genes yield nothing.
    ///
    pub fn gene_diplotypes<'a>(&'a self, gene: &'a str) -> impl Iterator<Item = String> + 'a {
        self.gene_reports
            .find(gene)
            .into_iter()
            .flat_map(move |r| r.tagged_diplotypes(&self.config.alternate_source_tag))
            .map(move |d| format!("{}:{}", gene, d))
    }
}
