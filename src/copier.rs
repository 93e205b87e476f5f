use crate::index::Index;
use crate::manifest::CopyRecord;
use anyhow::{bail, Context, Result};
use indicatif::ProgressBar;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct CopyConfig {
    /// Prefix for source files. Joined by concatenation, so it should end with a separator.
    pub source_dir: String,
    /// Prefix for destination files, same rule as `source_dir`.
    pub dest_dir: String,
    pub dry_run: bool,
}

/// Everything one run needs, as given on the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub index: PathBuf,
    pub manifest: Option<PathBuf>,
    pub copy: CopyConfig,
}

#[derive(Debug, Default)]
pub struct CopySummary {
    pub entries_scanned: usize,
    pub matches: usize,
    pub copies: Vec<CopyRecord>,
}

/// Lists the file names directly inside `source_dir`, in filesystem order.
pub fn list_source_entries(source_dir: &str) -> Result<Vec<String>> {
    let metadata = std::fs::metadata(source_dir)
        .with_context(|| format!("Failed to list {}", source_dir))?;
    if !metadata.is_dir() {
        bail!("Failed to list {}: not a directory", source_dir);
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(source_dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("Failed to list {}", source_dir))?;
        // A non UTF-8 name can never equal a JSON string.
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }

    Ok(names)
}

/// Copies every source entry once per index key that names it.
///
/// The first failed copy aborts the run. Files copied before it are left in place.
pub fn copy_matches<W: std::io::Write>(
    config: &CopyConfig,
    index: &Index,
    file_names: &[String],
    mut manifest: Option<&mut csv::Writer<W>>,
    progress: &ProgressBar,
) -> Result<CopySummary> {
    let mut summary = CopySummary::default();

    for file_name in file_names {
        summary.entries_scanned += 1;
        let source = format!("{}{}", config.source_dir, file_name);

        for key in index.matching_keys(file_name) {
            summary.matches += 1;
            progress.suspend(|| println!("found"));

            let destination = format!("{}{}", config.dest_dir, key);
            if config.dry_run {
                progress.suspend(|| println!("would copy {} -> {}", source, destination));
                continue;
            }

            let bytes = std::fs::copy(&source, &destination)
                .with_context(|| format!("Failed to copy {} to {}", source, destination))?;
            progress.suspend(|| println!("copied {}", key));

            let record = CopyRecord {
                key: key.to_string(),
                source: source.clone(),
                destination,
                bytes,
            };
            if let Some(writer) = manifest.as_mut() {
                writer.serialize(&record)?;
            }
            summary.copies.push(record);
        }
        progress.inc(1);
    }

    Ok(summary)
}

/// Loads the index, lists the source directory and copies the matches.
///
/// Nothing is written before the index has loaded. A dry run never opens the manifest.
pub fn run(options: &RunOptions) -> Result<CopySummary> {
    // 1. Load the index before touching either directory
    println!("Loading index {}...", options.index.display());
    let index = Index::load(&options.index)?;
    println!("Loaded {} index entries.", index.len());

    // 2. List source images
    let source_dir = &options.copy.source_dir;
    let file_names = list_source_entries(source_dir)?;
    println!("Found {} entries in {}.", file_names.len(), source_dir);

    // 3. Prepare manifest writer
    let mut manifest = match &options.manifest {
        Some(path) if !options.copy.dry_run => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create manifest {}", path.display()))?;
            Some(csv::Writer::from_writer(BufWriter::new(file)))
        }
        _ => None,
    };

    // 4. Match and copy
    let pb = ProgressBar::new(file_names.len() as u64);
    let result = copy_matches(&options.copy, &index, &file_names, manifest.as_mut(), &pb);
    pb.finish_and_clear();
    let summary = result?;

    if let Some(writer) = manifest.as_mut() {
        writer.flush()?;
    }

    Ok(summary)
}
