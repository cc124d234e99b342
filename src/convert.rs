//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use crate::config::{IndexToml, IoToml, MapToml};

use okeanos_index::RegionBounds;
use okeanos_io::{FieldReaderConfig, MapWriterConfig};
use okeanos_pointwise::StatisticKind;

/// Parses a statistic name string into the corresponding enum variant.
pub fn parse_statistic_kind(s: &str) -> Result<StatisticKind> {
    match s.to_lowercase().as_str() {
        "correlation" => Ok(StatisticKind::Correlation),
        "regression" => Ok(StatisticKind::Regression),
        other => bail!("unknown statistic: {other:?} (expected correlation or regression)"),
    }
}

/// Builds a [`FieldReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoToml) -> Result<FieldReaderConfig> {
    let mut cfg = FieldReaderConfig::default().with_time_var(&io.time_var);
    if let Some(ref aliases) = io.lon_aliases {
        cfg = cfg.with_lon_aliases(aliases.clone());
    }
    if let Some(ref aliases) = io.lat_aliases {
        cfg = cfg.with_lat_aliases(aliases.clone());
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Builds [`RegionBounds`] from the TOML index configuration.
///
/// Exactly one of the `region` preset or the four explicit bounds must be
/// given.
pub fn build_region_bounds(index: &IndexToml) -> Result<RegionBounds> {
    let explicit = [index.lat_min, index.lat_max, index.lon_min, index.lon_max];
    let n_explicit = explicit.iter().filter(|b| b.is_some()).count();

    match (&index.region, n_explicit) {
        (Some(name), 0) => match name.to_lowercase().as_str() {
            "nino34" => Ok(RegionBounds::nino34()),
            other => bail!("unknown region preset: {other:?}"),
        },
        (None, 4) => {
            let [lat_min, lat_max, lon_min, lon_max] = explicit.map(|b| b.unwrap_or_default());
            Ok(RegionBounds::new(lat_min, lat_max, lon_min, lon_max)?)
        }
        (None, 0) => bail!("set [index].region or all four explicit bounds"),
        (None, _) => bail!("explicit region bounds require all of lat_min, lat_max, lon_min, lon_max"),
        (Some(_), _) => bail!("[index].region and explicit bounds are mutually exclusive"),
    }
}

/// Builds a [`MapWriterConfig`] from the TOML map configuration.
pub fn build_writer_config(map: &MapToml, kind: StatisticKind) -> Result<MapWriterConfig> {
    let cfg = MapWriterConfig::default()
        .with_statistic_name(kind.name())
        .with_significance_level(map.significance_level);
    cfg.validate()?;
    Ok(cfg)
}
