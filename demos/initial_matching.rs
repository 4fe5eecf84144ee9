extern crate pmvs;

use std::fs;
use std::path::{Path, PathBuf};
use color_eyre::eyre::Result;
use serde::Deserialize;

use pmvs::{init_logger, MatchingParameters, PhotoRegistry};
use pmvs::io::{load_dataset, load_features, save_patches, DatasetParameters};
use pmvs::image::features::feature_priority_queue::{select_strongest_per_cell, DEFAULT_GRID_SIZE, DEFAULT_FEATURES_PER_CELL};
use pmvs::mvs::seed::run_initial_matching;

/**
 * Run file: the dataset, a directory with NNNN.yaml feature lists per photo and the output path.
 */
#[derive(Deserialize)]
struct RunConfig {
    dataset: DatasetParameters,
    feature_dir: PathBuf,
    output: PathBuf,
    #[serde(default)]
    matching: MatchingParameters
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logger();

    let run_file = std::env::args().nth(1).unwrap_or_else(|| "initial_matching.yaml".to_string());
    let config: RunConfig = serde_yaml::from_str(&fs::read_to_string(Path::new(&run_file))?)?;
    tracing::info!("matching parameters: {}", config.matching);

    let dataset = load_dataset(&config.dataset)?;
    let mut registry = PhotoRegistry::new(dataset.images, dataset.masks, &dataset.projections, config.matching)?;

    for id in 0..registry.photo_count() {
        let features = load_features(&config.feature_dir.join(format!("{:04}.yaml", id)))?;
        let (width, height) = (registry.photo(id).width(), registry.photo(id).height());
        let selected = select_strongest_per_cell(&features, width, height, DEFAULT_GRID_SIZE, DEFAULT_FEATURES_PER_CELL);
        registry.set_features(id, &selected);
    }

    let accepted = run_initial_matching(&mut registry);
    println!("{} patches", accepted);
    save_patches(&config.output, registry.patches())?;

    Ok(())
}
