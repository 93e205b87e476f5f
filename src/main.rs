use anyhow::Result;
use camera_index_copy::copier::{self, CopyConfig, RunOptions};
use clap::Parser;
use std::path::PathBuf;

/// Copy camera images named by a JSON index into a dataset directory.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON object mapping destination names to `a/b/<file name>` paths
    #[arg(long, default_value = "/disk/no_backup/ju878/CODA/nuscenes_image.json")]
    index: PathBuf,

    /// Directory listed for source images (prefix, keep the trailing slash)
    #[arg(long, default_value = "/disk/ml/datasets/nuScenes/samples/CAM_FRONT/")]
    source_dir: String,

    /// Directory copies are written to (prefix, keep the trailing slash)
    #[arg(long, default_value = "/disk/no_backup/ju878/CODA/image/")]
    dest_dir: String,

    /// Write a CSV row for every completed copy (ignored with --dry-run)
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Report matches without copying
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let options = RunOptions {
        index: args.index,
        manifest: args.manifest,
        copy: CopyConfig {
            source_dir: args.source_dir,
            dest_dir: args.dest_dir,
            dry_run: args.dry_run,
        },
    };

    let summary = copier::run(&options)?;

    println!(
        "Scanned {} entries, {} matches, {} files copied.",
        summary.entries_scanned,
        summary.matches,
        summary.copies.len()
    );
    match &options.manifest {
        Some(path) if !options.copy.dry_run => {
            println!("Manifest saved to {}.", path.display());
            println!("To check the copies, run: cargo run --bin verify_copies {}", path.display());
        }
        Some(_) => println!("Dry run, manifest left untouched."),
        None => {}
    }

    Ok(())
}
