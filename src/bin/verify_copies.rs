use anyhow::{bail, Result};
use camera_index_copy::manifest;
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Manifest path from the first argument, otherwise the default name
    let args: Vec<String> = env::args().collect();
    let manifest_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("copy_manifest.csv")
    };

    println!("Verifying copies listed in {}...", manifest_path.display());
    let records = manifest::read_manifest(&manifest_path)?;
    let report = manifest::verify_records(&records)?;

    for record in &report.mismatched {
        eprintln!("Mismatch: {} differs from {}", record.destination, record.source);
    }
    if !report.is_clean() {
        bail!(
            "{} of {} copies differ from their source",
            report.mismatched.len(),
            report.checked
        );
    }

    println!("All {} copies match their source.", report.checked);
    Ok(())
}
