use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use pgxmatch_core::PhenotypeLookup;
use pgxmatch_core::models::{CallSource, Diplotype, GeneCall, GeneException};

use crate::error::{ReportError, ReportResult};
use crate::guideline_report::GuidelineReport;

///
/// One diplotype called for a gene, with the pipeline that called it and the
/// phenotype it translates to in the shared phenotype table (if any).
///
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct CalledDiplotype {
    pub diplotype: Diplotype,
    pub source: CallSource,
    pub phenotype: Option<String>,
}

///
/// Everything known about one gene of the sample: its called diplotypes, the
/// guidelines that depend on it and any exceptions that apply to it.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneReport {
    gene: String,
    diplotypes: BTreeSet<CalledDiplotype>,
    related_guidelines: BTreeSet<String>,
    related_drugs: BTreeSet<String>,
    exceptions: Vec<GeneException>,
    #[serde(skip)]
    received: BTreeSet<CallSource>,
}

impl GeneReport {
    pub fn new(gene: &str) -> Self {
        GeneReport {
            gene: gene.to_string(),
            diplotypes: BTreeSet::new(),
            related_guidelines: BTreeSet::new(),
            related_drugs: BTreeSet::new(),
            exceptions: Vec::new(),
            received: BTreeSet::new(),
        }
    }

    pub fn gene(&self) -> &str {
        &self.gene
    }

    ///
    /// Apply the primary genotyping call for this gene. Fails if primary call
    /// data was already applied.
    ///
    pub fn set_call_data(
        &mut self,
        call: &GeneCall,
        phenotypes: &dyn PhenotypeLookup,
    ) -> ReportResult<()> {
        self.apply_call(call, CallSource::Primary, phenotypes)
    }

    ///
    /// Apply a call from the alternate calling pipeline. Independent of whether
    /// primary data is present, but may only happen once.
    ///
    pub fn set_alternate_call_data(
        &mut self,
        call: &GeneCall,
        phenotypes: &dyn PhenotypeLookup,
    ) -> ReportResult<()> {
        self.apply_call(call, CallSource::Alternate, phenotypes)
    }

    fn apply_call(
        &mut self,
        call: &GeneCall,
        source: CallSource,
        phenotypes: &dyn PhenotypeLookup,
    ) -> ReportResult<()> {
        if call.gene != self.gene {
            return Err(ReportError::GeneMismatch {
                expected: self.gene.clone(),
                found: call.gene.clone(),
            });
        }
        if self.received.contains(&source) {
            return Err(ReportError::DuplicateCallData {
                gene: self.gene.clone(),
                call_source: source,
            });
        }

        // parse everything before touching state so a bad call leaves the report as it was
        let parsed = call.parse_diplotypes()?;

        self.received.insert(source);
        for diplotype in parsed {
            let phenotype = phenotypes
                .phenotype(&diplotype.lookup_key())
                .map(str::to_string);
            self.diplotypes.insert(CalledDiplotype {
                diplotype,
                source,
                phenotype,
            });
        }

        Ok(())
    }

    pub fn is_called(&self) -> bool {
        !self.diplotypes.is_empty()
    }

    /// True when any diplotype came from the alternate calling pipeline.
    pub fn is_external_call_source(&self) -> bool {
        self.diplotypes
            .iter()
            .any(|d| d.source == CallSource::Alternate)
    }

    pub fn diplotypes(&self) -> impl Iterator<Item = &CalledDiplotype> {
        self.diplotypes.iter()
    }

    ///
    /// Keys for phenotype translation, one per distinct called diplotype.
    ///
    pub fn diplotype_lookup_keys(&self) -> BTreeSet<String> {
        self.diplotypes
            .iter()
            .map(|d| d.diplotype.lookup_key())
            .collect()
    }

    ///
    /// Called diplotype names, with `tag` appended to the ones from the
    /// alternate pipeline, e.g. `*1/*2` and `*1/*2 (alternate)`.
    ///
    pub fn tagged_diplotypes<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = String> + 'a {
        self.diplotypes.iter().map(move |d| match d.source {
            CallSource::Primary => d.diplotype.name(),
            CallSource::Alternate => format!("{} {}", d.diplotype.name(), tag),
        })
    }

    pub fn add_related_guideline(&mut self, guideline: &GuidelineReport) {
        self.related_guidelines.insert(guideline.id().to_string());
        self.related_drugs
            .extend(guideline.drugs().iter().cloned());
    }

    pub fn related_guidelines(&self) -> &BTreeSet<String> {
        &self.related_guidelines
    }

    pub fn related_drugs(&self) -> &BTreeSet<String> {
        &self.related_drugs
    }

    ///
    /// Attach the exceptions that concern this gene. An exception with a
    /// diplotype only applies when that diplotype was called. Applying the
    /// same list twice does not duplicate entries.
    ///
    pub fn apply_exceptions(&mut self, exceptions: &[GeneException]) {
        let called: BTreeSet<String> = self.diplotypes.iter().map(|d| d.diplotype.name()).collect();

        for exception in exceptions.iter().filter(|e| e.gene == self.gene) {
            let applies = match &exception.diplotype {
                None => true,
                Some(text) => match Diplotype::parse(&self.gene, text) {
                    Ok(d) => called.contains(&d.name()),
                    Err(err) => {
                        log::warn!("Skipping exception for {}: {}", self.gene, err);
                        false
                    }
                },
            };
            if applies && !self.exceptions.contains(exception) {
                self.exceptions.push(exception.clone());
            }
        }
    }

    pub fn exceptions(&self) -> &[GeneException] {
        &self.exceptions
    }
}

///
/// The gene reports of a sample keyed by gene symbol. Holds exactly one report
/// per symbol: a second insert for a symbol is rejected.
///
#[derive(Debug, Clone, Default)]
pub struct GeneReportSet {
    reports: BTreeMap<String, GeneReport>,
}

impl GeneReportSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, report: GeneReport) -> ReportResult<()> {
        if self.reports.contains_key(report.gene()) {
            return Err(ReportError::DuplicateGeneReport(report.gene().to_string()));
        }
        self.reports.insert(report.gene().to_string(), report);
        Ok(())
    }

    pub fn get(&self, gene: &str) -> ReportResult<&GeneReport> {
        self.reports
            .get(gene)
            .ok_or_else(|| ReportError::MissingGeneReport(gene.to_string()))
    }

    pub fn get_mut(&mut self, gene: &str) -> ReportResult<&mut GeneReport> {
        self.reports
            .get_mut(gene)
            .ok_or_else(|| ReportError::MissingGeneReport(gene.to_string()))
    }

    pub fn find(&self, gene: &str) -> Option<&GeneReport> {
        self.reports.get(gene)
    }

    pub fn contains(&self, gene: &str) -> bool {
        self.reports.contains_key(gene)
    }

    pub fn is_called(&self, gene: &str) -> ReportResult<bool> {
        self.get(gene).map(GeneReport::is_called)
    }

    /// Reports in gene symbol order.
    pub fn iter(&self) -> impl Iterator<Item = &GeneReport> {
        self.reports.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GeneReport> {
        self.reports.values_mut()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl<'a> IntoIterator for &'a GeneReportSet {
    type Item = &'a GeneReport;
    type IntoIter = std::collections::btree_map::Values<'a, String, GeneReport>;

    fn into_iter(self) -> Self::IntoIter {
        self.reports.values()
    }
}
