use std::collections::{BTreeMap, BTreeSet};

use fxhash::FxHashSet;
use serde::Serialize;

use pgxmatch_core::PhenotypeLookup;
use pgxmatch_core::models::{Group, GuidelinePackage};

///
/// An annotation group of a guideline together with the set of combined
/// genotypes it recognizes.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationGroup {
    pub id: String,
    pub name: String,
    pub gene_phenotypes: BTreeSet<String>,
}

impl AnnotationGroup {
    pub fn recognizes(&self, combined_genotype: &str) -> bool {
        self.gene_phenotypes.contains(combined_genotype)
    }
}

impl From<&Group> for AnnotationGroup {
    fn from(group: &Group) -> Self {
        AnnotationGroup {
            id: group.id.clone(),
            name: group.name.clone(),
            gene_phenotypes: group.gene_phenotypes.iter().cloned().collect(),
        }
    }
}

///
/// The state of one guideline for a sample: which of its genes were called,
/// whether it is reportable, and which annotation groups the sample matched.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuidelineReport {
    id: String,
    name: String,
    drugs: Vec<String>,
    related_gene_symbols: Vec<String>,
    groups: Vec<AnnotationGroup>,
    reportable: bool,
    uncalled_genes: BTreeSet<String>,
    matched_groups: BTreeSet<String>,
    matched_diplotypes: BTreeMap<String, BTreeSet<String>>,
}

impl From<&GuidelinePackage> for GuidelineReport {
    fn from(package: &GuidelinePackage) -> Self {
        // distinct symbols, first occurrence wins
        let mut seen = FxHashSet::default();
        let related_gene_symbols = package
            .gene_symbols()
            .filter(|s| seen.insert(*s))
            .map(str::to_string)
            .collect();

        // group ids key the match state, so a repeated id keeps its first definition
        let mut seen_groups = FxHashSet::default();
        let groups = package
            .groups
            .iter()
            .filter(|g| {
                let fresh = seen_groups.insert(g.id.as_str());
                if !fresh {
                    log::warn!(
                        "Guideline {} repeats group id {}; keeping the first definition",
                        package.id,
                        g.id
                    );
                }
                fresh
            })
            .map(AnnotationGroup::from)
            .collect();

        GuidelineReport {
            id: package.id.clone(),
            name: package.name.clone(),
            drugs: package.drugs.clone(),
            related_gene_symbols,
            groups,
            reportable: false,
            uncalled_genes: BTreeSet::new(),
            matched_groups: BTreeSet::new(),
            matched_diplotypes: BTreeMap::new(),
        }
    }
}

impl GuidelineReport {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn drugs(&self) -> &[String] {
        &self.drugs
    }

    pub fn related_gene_symbols(&self) -> &[String] {
        &self.related_gene_symbols
    }

    pub fn groups(&self) -> &[AnnotationGroup] {
        &self.groups
    }

    ///
    /// Translate a diplotype lookup key into the phenotype used by this
    /// guideline's annotation groups. Keys missing from the table translate to
    /// themselves.
    ///
    pub fn translate_to_phenotype(&self, phenotypes: &dyn PhenotypeLookup, lookup_key: &str) -> String {
        match phenotypes.phenotype(lookup_key) {
            Some(phenotype) => phenotype.to_string(),
            None => {
                log::debug!(
                    "No phenotype for {} in guideline {}, using the lookup key",
                    lookup_key,
                    self.id
                );
                lookup_key.to_string()
            }
        }
    }

    pub fn is_reportable(&self) -> bool {
        self.reportable
    }

    pub fn set_reportable(&mut self, reportable: bool) {
        self.reportable = reportable;
    }

    pub fn uncalled_genes(&self) -> &BTreeSet<String> {
        &self.uncalled_genes
    }

    pub fn add_uncalled_gene(&mut self, gene: &str) {
        self.uncalled_genes.insert(gene.to_string());
    }

    pub fn matched_groups(&self) -> &BTreeSet<String> {
        &self.matched_groups
    }

    pub fn add_matching_group(&mut self, group_id: &str) {
        self.matched_groups.insert(group_id.to_string());
    }

    /// Group id -> combined genotypes that matched it.
    pub fn matched_diplotypes(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.matched_diplotypes
    }

    pub fn put_matched_diplotype(&mut self, group_id: &str, combined_genotype: &str) {
        self.matched_diplotypes
            .entry(group_id.to_string())
            .or_default()
            .insert(combined_genotype.to_string());
    }

    pub fn has_matches(&self) -> bool {
        !self.matched_groups.is_empty()
    }

    /// Matched groups, in guideline order.
    pub fn matching_groups(&self) -> impl Iterator<Item = &AnnotationGroup> {
        self.groups
            .iter()
            .filter(|g| self.matched_groups.contains(&g.id))
    }

    pub fn unmatched_groups(&self) -> impl Iterator<Item = &AnnotationGroup> {
        self.groups
            .iter()
            .filter(|g| !self.matched_groups.contains(&g.id))
    }

    /// Forget the results of a previous evaluation.
    pub fn reset_matches(&mut self) {
        self.reportable = false;
        self.uncalled_genes.clear();
        self.matched_groups.clear();
        self.matched_diplotypes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pgxmatch_core::PhenotypeMap;
    use pgxmatch_core::models::RelatedGene;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn package(genes: &[&str]) -> GuidelinePackage {
        GuidelinePackage {
            id: "PA166104948".to_string(),
            name: "clopidogrel".to_string(),
            drugs: vec!["clopidogrel".to_string()],
            related_genes: genes
                .iter()
                .map(|s| RelatedGene {
                    symbol: s.to_string(),
                })
                .collect(),
            groups: vec![Group {
                id: "g1".to_string(),
                name: "Poor".to_string(),
                gene_phenotypes: vec!["Poor".to_string(), "Poor".to_string()],
            }],
        }
    }

    #[rstest]
    fn test_related_genes_are_distinct_and_ordered() {
        let report = GuidelineReport::from(&package(&["CYP2C19", "CYP2C9", "CYP2C19", "VKORC1"]));
        assert_eq!(
            report.related_gene_symbols(),
            &["CYP2C19".to_string(), "CYP2C9".to_string(), "VKORC1".to_string()]
        );
        assert_eq!(report.groups()[0].gene_phenotypes.len(), 1);
    }

    #[rstest]
    fn test_repeated_group_id_keeps_first() {
        let mut pkg = package(&["CYP2C19"]);
        pkg.groups.push(Group {
            id: "g1".to_string(),
            name: "Duplicate".to_string(),
            gene_phenotypes: vec!["Normal".to_string()],
        });
        let mut report = GuidelineReport::from(&pkg);

        assert_eq!(report.groups().len(), 1);
        assert_eq!(report.groups()[0].name, "Poor");

        report.add_matching_group("g1");
        assert_eq!(report.matching_groups().count(), report.matched_groups().len());
        assert_eq!(report.unmatched_groups().count(), 0);
    }

    #[rstest]
    fn test_no_related_genes() {
        let report = GuidelineReport::from(&package(&[]));
        assert!(report.related_gene_symbols().is_empty());
        assert!(!report.is_reportable());
    }

    #[rstest]
    fn test_translate_to_phenotype() {
        let report = GuidelineReport::from(&package(&["CYP2C19"]));
        let phenotypes = PhenotypeMap::from_iter([("CYP2C19", "*2/*2", "Poor")]);

        assert_eq!(report.translate_to_phenotype(&phenotypes, "CYP2C19:*2/*2"), "Poor");
        assert_eq!(
            report.translate_to_phenotype(&phenotypes, "CYP2C19:*1/*2"),
            "CYP2C19:*1/*2"
        );
    }

    #[rstest]
    fn test_bindings_and_reset() {
        let mut report = GuidelineReport::from(&package(&["CYP2C19"]));
        report.set_reportable(true);
        report.add_uncalled_gene("CYP2C9");
        report.add_matching_group("g1");
        report.put_matched_diplotype("g1", "Poor");
        report.put_matched_diplotype("g1", "Poor");

        assert!(report.has_matches());
        assert_eq!(report.matching_groups().count(), 1);
        assert_eq!(report.unmatched_groups().count(), 0);
        assert_eq!(report.matched_diplotypes()["g1"].len(), 1);

        report.reset_matches();
        assert!(!report.is_reportable());
        assert!(report.uncalled_genes().is_empty());
        assert!(report.matched_diplotypes().is_empty());
        assert_eq!(report.unmatched_groups().count(), 1);
    }
}
