use std::ffi::OsStr;
use std::fs::{File, read_dir};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use serde::de::DeserializeOwned;

use crate::models::{GeneCall, GeneException, GuidelinePackage};
use crate::phenotype::PhenotypeMap;

/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Deserialize a JSON (or gzip'd JSON) file.
///
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = get_dynamic_reader(path)?;
    serde_json::from_reader(reader).with_context(|| format!("Failed to parse JSON file: {:?}", path))
}

///
/// Read the gene calls produced by a genotyping pipeline: a JSON array of
/// `{"gene": ..., "diplotypes": [...]}` records.
///
pub fn read_gene_calls(path: &Path) -> Result<Vec<GeneCall>> {
    read_json(path)
}

///
/// Read guideline definitions. `path` is either a JSON array of guidelines, or
/// a directory of single-guideline `*.json` / `*.json.gz` files which are read
/// in file name order.
///
pub fn read_guideline_packages(path: &Path) -> Result<Vec<GuidelinePackage>> {
    if !path.is_dir() {
        return read_json(path);
    }

    let mut files: Vec<PathBuf> = read_dir(path)
        .with_context(|| format!("Failed to list guideline directory: {:?}", path))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| is_json_file(p))
        .collect();
    files.sort();

    files.iter().map(|p| read_json(p)).collect()
}

pub fn read_phenotype_map(path: &Path) -> Result<PhenotypeMap> {
    read_json(path)
}

pub fn read_gene_exceptions(path: &Path) -> Result<Vec<GeneException>> {
    read_json(path)
}

fn is_json_file(path: &Path) -> bool {
    let name = match path.file_name().and_then(OsStr::to_str) {
        Some(name) => name,
        None => return false,
    };
    path.is_file() && (name.ends_with(".json") || name.ends_with(".json.gz"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::write;
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use tempfile::tempdir;

    use crate::phenotype::PhenotypeLookup;

    #[rstest]
    fn test_read_gene_calls() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("calls.json");
        write(
            &path,
            r#"[{"gene": "CYP2C19", "diplotypes": ["*1/*2"]}, {"gene": "TPMT"}]"#,
        )
        .unwrap();

        let calls = read_gene_calls(&path).unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], GeneCall::new("CYP2C19", &["*1/*2"]));
        assert!(calls[1].diplotypes.is_empty());
    }

    #[rstest]
    fn test_read_gzipped_phenotypes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("phenotypes.json.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder
            .write_all(br#"{"TPMT": {"*1/*3A": "Intermediate"}}"#)
            .unwrap();
        encoder.finish().unwrap();

        let map = read_phenotype_map(&path).unwrap();
        assert_eq!(map.phenotype("TPMT:*1/*3A"), Some("Intermediate"));
    }

    #[rstest]
    fn test_read_guideline_directory_in_name_order() {
        let dir = tempdir().unwrap();
        write(
            dir.path().join("b.json"),
            r#"{"id": "B", "related_genes": [{"symbol": "TPMT"}]}"#,
        )
        .unwrap();
        write(
            dir.path().join("a.json"),
            r#"{"id": "A", "related_genes": [{"symbol": "CYP2C19"}]}"#,
        )
        .unwrap();
        write(dir.path().join("notes.txt"), "ignored").unwrap();

        let guidelines = read_guideline_packages(dir.path()).unwrap();
        let ids: Vec<&str> = guidelines.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[rstest]
    fn test_missing_file_is_an_error() {
        let result = read_gene_calls(Path::new("does/not/exist.json"));
        assert!(result.is_err());
    }
}
