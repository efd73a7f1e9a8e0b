use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};

use dock_forge::archive::builder::{RunLayout, discover_models};
use dock_forge::io::{read_clusters_path, read_scores_path};
use dock_forge::ops::rank_clusters;

/// Shows the cluster ranking of a run directory without converting it.
#[derive(Debug, Args)]
pub struct RankArgs {
    /// Docking run directory.
    pub rundir: PathBuf,
}

pub fn run(args: &RankArgs) -> Result<()> {
    let layout = RunLayout::new(&args.rundir);

    let scores = read_scores_path(&layout.score_list())
        .with_context(|| format!("Failed to read {}", layout.score_list().display()))?;
    let clusters = read_clusters_path(&layout.cluster_listing())
        .with_context(|| format!("Failed to read {}", layout.cluster_listing().display()))?;
    let ranking = rank_clusters(&scores, &clusters).context("Failed to rank clusters")?;
    let discovered =
        discover_models(layout.model_dir()).context("Failed to scan for final model files")?;

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["Rank", "Cluster", "Mean Top-4 Score", "Model Files"]);
    for ranked in &ranking {
        let model_count = discovered
            .get(&ranked.cluster)
            .map(|paths| paths.len())
            .unwrap_or(0);
        table.add_row(row![
            ranked.rank,
            ranked.cluster,
            format!("{:.3}", ranked.mean_score),
            model_count
        ]);
    }
    table.printstd();

    Ok(())
}
