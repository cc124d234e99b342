//! Map command: ensemble statistic maps against the regional index.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use okeanos_index::index_series;
use okeanos_io::{read_field, write_map_netcdf};
use okeanos_pointwise::{StatisticMaps, average_members, compute_statistic};

use crate::cli::MapArgs;
use crate::config::OkeanosConfig;
use crate::convert;
use crate::summary::MapSummary;

/// Run the full map pipeline.
pub fn run(args: MapArgs) -> Result<()> {
    let _cmd = info_span!("map").entered();
    // 1. Load project TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: OkeanosConfig =
        toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let io = &config.io;
    if io.sst_files.is_empty() {
        bail!("no ensemble members: set [io].sst_files in config");
    }
    if io.sst_files.len() != io.target_files.len() {
        bail!(
            "member file lists must pair up: {} sst_files vs {} target_files",
            io.sst_files.len(),
            io.target_files.len()
        );
    }

    let statistic = args.statistic.as_deref().unwrap_or(&config.map.statistic);
    let kind = convert::parse_statistic_kind(statistic)?;
    let bounds = convert::build_region_bounds(&config.index)?;
    let reader_cfg = convert::build_reader_config(io)?;

    // 2. Per-member: read both fields, build the index, compute the maps
    let mut members: Vec<StatisticMaps> = Vec::with_capacity(io.sst_files.len());
    let mut axes: Option<(Vec<f64>, Vec<f64>)> = None;
    let mut n_timesteps = 0;
    for (sst_path, target_path) in io.sst_files.iter().zip(io.target_files.iter()) {
        info!(
            sst = %sst_path.display(),
            target = %target_path.display(),
            "reading ensemble member"
        );
        let sst = read_field(sst_path, &io.sst_var, &reader_cfg)
            .with_context(|| format!("failed to read NetCDF: {}", sst_path.display()))?;
        let target = read_field(target_path, &io.target_var, &reader_cfg)
            .with_context(|| format!("failed to read NetCDF: {}", target_path.display()))?;

        if sst.time() != target.time() {
            bail!(
                "time axes differ between {} and {}: align the inputs upstream",
                sst_path.display(),
                target_path.display()
            );
        }
        match &axes {
            None => axes = Some((target.lats().to_vec(), target.lons().to_vec())),
            Some((lats, lons)) => {
                if lats != target.lats() || lons != target.lons() {
                    bail!(
                        "grid axes of {} differ from the first member",
                        target_path.display()
                    );
                }
            }
        }
        n_timesteps = target.n_timesteps();

        let reference = index_series(&sst, &bounds)
            .with_context(|| format!("failed to build index from {}", sst_path.display()))?;
        let maps = compute_statistic(&reference, &target, kind)?;
        members.push(maps);
    }

    // 3. Average members and write the NetCDF map
    let averaged = average_members(&members)?;
    let (lats, lons) = axes.expect("at least one member read above");

    let output = args.output.unwrap_or_else(|| config.map.output.clone());
    let writer_cfg = convert::build_writer_config(&config.map, kind)?;
    write_map_netcdf(
        &output,
        averaged.coefficient(),
        averaged.p_value(),
        &lats,
        &lons,
        &writer_cfg,
    )
    .with_context(|| format!("failed to write map: {}", output.display()))?;
    info!(path = %output.display(), "map written");

    // 4. Write the JSON run summary
    let n_missing_cells = averaged.coefficient().iter().filter(|c| c.is_nan()).count();
    let n_significant_cells = averaged
        .significant_cells(config.map.significance_level)
        .iter()
        .filter(|&&s| s)
        .count();
    let summary = MapSummary {
        statistic: kind.name().to_string(),
        significance_level: config.map.significance_level,
        n_members: members.len(),
        n_timesteps,
        ny: averaged.ny(),
        nx: averaged.nx(),
        n_missing_cells,
        n_significant_cells,
        output: output.clone(),
    };

    let summary_path = config
        .map
        .summary
        .clone()
        .unwrap_or_else(|| output.with_extension("summary.json"));
    let json = serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
    std::fs::write(&summary_path, json)
        .with_context(|| format!("failed to write summary: {}", summary_path.display()))?;
    info!(path = %summary_path.display(), "summary written");

    Ok(())
}
