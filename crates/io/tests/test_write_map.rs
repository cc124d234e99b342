//! Integration tests for NetCDF map output.
//!
//! Writes result maps to a temporary file and reads them back with the
//! netcdf crate directly to validate layout, fill handling, and the
//! significance mask.

use approx::assert_relative_eq;
use tempfile::tempdir;
use okeanos_io::{IoError, MapWriterConfig, write_map_netcdf};

#[test]
fn round_trip_values_and_coords() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("map.nc");
    let lats = vec![-5.0, 0.0, 5.0];
    let lons = vec![180.0, 190.0];
    let coefficient = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
    let p_value = vec![0.5, 0.04, 0.2, 0.01, 0.9, 0.03];

    write_map_netcdf(
        &path,
        &coefficient,
        &p_value,
        &lats,
        &lons,
        &MapWriterConfig::default(),
    )
    .unwrap();

    let file = netcdf::open(&path).unwrap();
    let lat_back = file
        .variable("lat")
        .unwrap()
        .get_values::<f64, _>(..)
        .unwrap();
    let lon_back = file
        .variable("lon")
        .unwrap()
        .get_values::<f64, _>(..)
        .unwrap();
    assert_eq!(lat_back, lats);
    assert_eq!(lon_back, lons);

    let coef_back = file
        .variable("coefficient")
        .unwrap()
        .get_values::<f64, _>(..)
        .unwrap();
    let p_back = file
        .variable("p_value")
        .unwrap()
        .get_values::<f64, _>(..)
        .unwrap();
    for (a, b) in coef_back.iter().zip(&coefficient) {
        assert_relative_eq!(*a, *b);
    }
    for (a, b) in p_back.iter().zip(&p_value) {
        assert_relative_eq!(*a, *b);
    }
}

#[test]
fn significance_mask_thresholds_p_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("map.nc");
    let lats = vec![0.0];
    let lons = vec![10.0, 20.0, 30.0, 40.0];
    let coefficient = vec![1.0; 4];
    // Below, at, above threshold, and missing.
    let p_value = vec![0.04, 0.05, 0.5, f64::NAN];

    let config = MapWriterConfig::default().with_significance_level(0.05);
    write_map_netcdf(&path, &coefficient, &p_value, &lats, &lons, &config).unwrap();

    let file = netcdf::open(&path).unwrap();
    let mask = file
        .variable("significant")
        .unwrap()
        .get_values::<u8, _>(..)
        .unwrap();
    // Strict inequality at the threshold; NaN is never significant.
    assert_eq!(mask, vec![1, 0, 0, 0]);
}

#[test]
fn nan_cells_survive_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("map.nc");
    let lats = vec![0.0, 1.0];
    let lons = vec![0.0];
    let coefficient = vec![f64::NAN, 0.7];
    let p_value = vec![f64::NAN, 0.02];

    write_map_netcdf(
        &path,
        &coefficient,
        &p_value,
        &lats,
        &lons,
        &MapWriterConfig::default(),
    )
    .unwrap();

    let file = netcdf::open(&path).unwrap();
    let coef_back = file
        .variable("coefficient")
        .unwrap()
        .get_values::<f64, _>(..)
        .unwrap();
    assert!(coef_back[0].is_nan());
    assert_relative_eq!(coef_back[1], 0.7);
}

#[test]
fn global_attributes_record_statistic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("map.nc");

    let config = MapWriterConfig::default()
        .with_statistic_name("regression")
        .with_significance_level(0.01);
    write_map_netcdf(&path, &[0.5], &[0.2], &[0.0], &[0.0], &config).unwrap();

    let file = netcdf::open(&path).unwrap();
    let statistic = file.attribute("statistic").unwrap();
    match statistic.value().unwrap() {
        netcdf::AttributeValue::Str(s) => assert_eq!(s, "regression"),
        other => panic!("unexpected attribute type: {other:?}"),
    }
    let level = file.attribute("significance_level").unwrap();
    match level.value().unwrap() {
        netcdf::AttributeValue::Double(v) => assert_relative_eq!(v, 0.01),
        other => panic!("unexpected attribute type: {other:?}"),
    }
}

#[test]
fn shape_mismatch_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("map.nc");
    // 2x2 grid but only 3 coefficient values.
    let err = write_map_netcdf(
        &path,
        &[0.1, 0.2, 0.3],
        &[0.1, 0.2, 0.3],
        &[0.0, 1.0],
        &[0.0, 1.0],
        &MapWriterConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, IoError::DimensionMismatch { .. }));
}
