//! Index command: regional anomaly index series as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use okeanos_index::index_series;
use okeanos_io::read_field;

use crate::cli::IndexArgs;
use crate::config::OkeanosConfig;
use crate::convert;
use crate::summary::{IndexMemberSummary, IndexSummary, RegionSummary, nullable};

/// Run the standalone index pipeline.
pub fn run(args: IndexArgs) -> Result<()> {
    let _cmd = info_span!("index").entered();
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: OkeanosConfig =
        toml::from_str(&toml_str).context("failed to parse TOML config")?;

    if config.io.sst_files.is_empty() {
        bail!("no ensemble members: set [io].sst_files in config");
    }

    let bounds = convert::build_region_bounds(&config.index)?;
    let reader_cfg = convert::build_reader_config(&config.io)?;

    let mut members = Vec::with_capacity(config.io.sst_files.len());
    for path in &config.io.sst_files {
        info!(path = %path.display(), "reading ensemble member");
        let field = read_field(path, &config.io.sst_var, &reader_cfg)
            .with_context(|| format!("failed to read NetCDF: {}", path.display()))?;
        let series = index_series(&field, &bounds)
            .with_context(|| format!("failed to build index from {}", path.display()))?;
        members.push(IndexMemberSummary {
            file: path.clone(),
            time: field.time().iter().map(|s| s.to_string()).collect(),
            values: nullable(&series),
        });
    }

    let summary = IndexSummary {
        region: RegionSummary {
            lat_min: bounds.lat_min(),
            lat_max: bounds.lat_max(),
            lon_min: bounds.lon_min(),
            lon_max: bounds.lon_max(),
        },
        members,
    };

    let output = args.output.unwrap_or_else(|| PathBuf::from("index.json"));
    let json = serde_json::to_string_pretty(&summary).context("failed to serialize index")?;
    std::fs::write(&output, json)
        .with_context(|| format!("failed to write index: {}", output.display()))?;
    info!(path = %output.display(), "index written");

    Ok(())
}
