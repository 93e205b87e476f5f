use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// One completed copy, as written to the manifest CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyRecord {
    pub key: String,
    pub source: String,
    pub destination: String,
    pub bytes: u64,
}

#[derive(Debug, Default)]
pub struct VerifyReport {
    pub checked: usize,
    pub mismatched: Vec<CopyRecord>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.mismatched.is_empty()
    }
}

pub fn read_manifest(csv_path: &Path) -> Result<Vec<CopyRecord>> {
    let file = File::open(csv_path)
        .with_context(|| format!("Failed to open manifest {}", csv_path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: CopyRecord = result?;
        records.push(record);
    }
    Ok(records)
}

/// Compares every destination against its source byte for byte.
pub fn verify_records(records: &[CopyRecord]) -> Result<VerifyReport> {
    let mut report = VerifyReport::default();

    for record in records {
        let source = std::fs::read(&record.source)
            .with_context(|| format!("Failed to read source {}", record.source))?;
        let destination = std::fs::read(&record.destination)
            .with_context(|| format!("Failed to read destination {}", record.destination))?;

        report.checked += 1;
        if source != destination {
            report.mismatched.push(record.clone());
        }
    }

    Ok(report)
}
