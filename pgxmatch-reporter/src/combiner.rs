//! Combined genotypes.
//!
//! A combined genotype is one phenotype per related gene of a guideline,
//! sorted and joined with [`GENOTYPE_DELIMITER`], e.g. `Normal;Poor`. The set of
//! combined genotypes of a sample is built gene by gene as a Cartesian product
//! of the phenotypes its called diplotypes translate to, deduplicating at every
//! step.

use std::collections::BTreeSet;

use pgxmatch_core::PhenotypeLookup;

use crate::config::CombinationMode;
use crate::consts::GENOTYPE_DELIMITER;
use crate::error::ReportResult;
use crate::gene_report::GeneReportSet;
use crate::guideline_report::GuidelineReport;

///
/// Build every combined genotype of the sample for a guideline, walking its
/// related genes in guideline order.
///
/// # Arguments
///
/// - guideline: the guideline whose related genes are combined
/// - genes: the populated gene reports of the sample
/// - phenotypes: the table diplotype lookup keys are translated with
/// - mode: how phenotypes are folded together
///
pub fn make_all_called_genotypes(
    guideline: &GuidelineReport,
    genes: &GeneReportSet,
    phenotypes: &dyn PhenotypeLookup,
    mode: CombinationMode,
) -> ReportResult<BTreeSet<String>> {
    let per_gene = guideline
        .related_gene_symbols()
        .iter()
        .map(|symbol| {
            let report = genes.get(symbol)?;
            Ok(report
                .diplotype_lookup_keys()
                .iter()
                .map(|key| guideline.translate_to_phenotype(phenotypes, key))
                .collect::<BTreeSet<String>>())
        })
        .collect::<ReportResult<Vec<_>>>()?;

    Ok(combine_phenotypes(per_gene, mode))
}

///
/// Fold per-gene phenotype sets into combined genotypes.
///
pub fn combine_phenotypes<I>(per_gene: I, mode: CombinationMode) -> BTreeSet<String>
where
    I: IntoIterator<Item = BTreeSet<String>>,
{
    let mut results = BTreeSet::new();
    for phenotypes in per_gene {
        results = match mode {
            CombinationMode::Pairwise => combine_pairwise(results, phenotypes),
            CombinationMode::Cartesian => combine_cartesian(results, phenotypes),
        };
    }
    results
}

fn combine_pairwise(results: BTreeSet<String>, phenotypes: BTreeSet<String>) -> BTreeSet<String> {
    if results.is_empty() {
        return phenotypes;
    }

    let mut combined = BTreeSet::new();
    for geno1 in &results {
        for geno2 in &phenotypes {
            combined.insert(join_sorted([geno1.as_str(), geno2.as_str()]));
        }
    }
    combined
}

fn combine_cartesian(results: BTreeSet<String>, phenotypes: BTreeSet<String>) -> BTreeSet<String> {
    if phenotypes.is_empty() {
        return results;
    }
    if results.is_empty() {
        return phenotypes
            .iter()
            .map(|p| join_sorted(p.split(GENOTYPE_DELIMITER)))
            .collect();
    }

    let mut combined = BTreeSet::new();
    for geno1 in &results {
        for geno2 in &phenotypes {
            let tokens = geno1
                .split(GENOTYPE_DELIMITER)
                .chain(geno2.split(GENOTYPE_DELIMITER));
            combined.insert(join_sorted(tokens));
        }
    }
    combined
}

fn join_sorted<'a>(tokens: impl IntoIterator<Item = &'a str>) -> String {
    let tokens: BTreeSet<&str> = tokens.into_iter().collect();
    tokens.into_iter().collect::<Vec<&str>>().join(GENOTYPE_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case(CombinationMode::Pairwise)]
    #[case(CombinationMode::Cartesian)]
    fn test_single_gene(#[case] mode: CombinationMode) {
        let result = combine_phenotypes(vec![set(&["Poor", "Normal", "Poor"])], mode);
        assert_eq!(result, set(&["Normal", "Poor"]));
    }

    #[rstest]
    #[case(CombinationMode::Pairwise)]
    #[case(CombinationMode::Cartesian)]
    fn test_two_genes_commute(#[case] mode: CombinationMode) {
        let a = set(&["Normal", "Intermediate"]);
        let b = set(&["Poor"]);

        let ab = combine_phenotypes(vec![a.clone(), b.clone()], mode);
        let ba = combine_phenotypes(vec![b, a], mode);

        assert_eq!(ab, set(&["Intermediate;Poor", "Normal;Poor"]));
        assert_eq!(ab, ba);
    }

    #[rstest]
    #[case(CombinationMode::Pairwise)]
    #[case(CombinationMode::Cartesian)]
    fn test_identical_tokens_collapse(#[case] mode: CombinationMode) {
        let result = combine_phenotypes(vec![set(&["Normal"]), set(&["Normal"])], mode);
        assert_eq!(result, set(&["Normal"]));
    }

    #[rstest]
    fn test_pairwise_treats_prior_combination_as_one_token() {
        let result = combine_phenotypes(
            vec![set(&["Z"]), set(&["A"]), set(&["M"])],
            CombinationMode::Pairwise,
        );
        assert_eq!(result, set(&["A;Z;M"]));
    }

    #[rstest]
    fn test_cartesian_sorts_every_token() {
        let result = combine_phenotypes(
            vec![set(&["Z"]), set(&["A", "B"]), set(&["M"])],
            CombinationMode::Cartesian,
        );
        assert_eq!(result, set(&["A;M;Z", "B;M;Z"]));
    }

    #[rstest]
    fn test_pairwise_uncalled_gene_empties_then_restarts() {
        let empty = BTreeSet::new();

        let trailing = combine_phenotypes(
            vec![set(&["Normal"]), empty.clone()],
            CombinationMode::Pairwise,
        );
        assert!(trailing.is_empty());

        let middle = combine_phenotypes(
            vec![set(&["Normal"]), empty.clone(), set(&["Poor"])],
            CombinationMode::Pairwise,
        );
        assert_eq!(middle, set(&["Poor"]));

        let leading = combine_phenotypes(
            vec![empty, set(&["Normal"]), set(&["Poor"])],
            CombinationMode::Pairwise,
        );
        assert_eq!(leading, set(&["Normal;Poor"]));
    }

    #[rstest]
    fn test_cartesian_skips_uncalled_gene() {
        let result = combine_phenotypes(
            vec![set(&["Normal"]), BTreeSet::new(), set(&["Poor"])],
            CombinationMode::Cartesian,
        );
        assert_eq!(result, set(&["Normal;Poor"]));
    }

    #[rstest]
    fn test_nothing_to_combine() {
        let result = combine_phenotypes(Vec::<BTreeSet<String>>::new(), CombinationMode::Pairwise);
        assert!(result.is_empty());
    }
}
