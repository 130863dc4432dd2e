use soiltemp::run_simulation::*;
use soiltemp::{SoilError, SoilModel, SoilWaterSeries, Weather};
use std::collections::HashMap;

const MODEL: &str = "./tests/paddock/model.json5";
const WEATHER: &str = "./tests/paddock/weather.json";
const SOIL_WATER: &str = "./tests/paddock/soil_water.json";

fn options(n_days: Option<usize>) -> SimOptions {
    SimOptions {
        input_file: MODEL.into(),
        weather_file: WEATHER.into(),
        soil_water_file: Some(SOIL_WATER.into()),
        output: None,
        n_days,
        albedo: 0.13,
    }
}

fn load() -> Result<(SoilModel, Weather, HashMap<String, SoilWaterSeries>), String> {
    let model = SoilModel::from_file(MODEL).map_err(|e| e.to_string())?;
    let weather = Weather::from_file(WEATHER)?;
    let s = std::fs::read_to_string(SOIL_WATER).map_err(|e| e.to_string())?;
    let soil_water: HashMap<String, SoilWaterSeries> =
        serde_json::from_str(&s).map_err(|e| e.to_string())?;
    Ok((model, weather, soil_water))
}

fn simulate(n_days: Option<usize>) -> Result<String, String> {
    let (model, weather, soil_water) = load()?;
    let mut out: Vec<u8> = Vec::new();
    run(&model, &weather, &soil_water, &options(n_days), &mut out).map_err(|e| e.to_string())?;
    String::from_utf8(out).map_err(|e| e.to_string())
}

#[test]
fn paddock() -> Result<(), String> {
    // cargo test --release --test paddock -- --nocapture
    let csv = simulate(None)?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 15);

    let header: Vec<&str> = lines[0].split(',').collect();
    // Date + (3 surface + 4 layers * 3 + conductance) + (3 surface + 3 layers * 3 + conductance)
    assert_eq!(header.len(), 1 + 16 + 13);
    assert_eq!(header[0], "Date");
    assert_eq!(header[1], "bare:surface_minimum_temperature");
    assert_eq!(header[17], "deep:surface_minimum_temperature");
    assert_eq!(header[29], "deep:boundary_layer_conductance");

    for line in &lines[1..] {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), header.len());
        let values: Vec<f64> = fields[1..]
            .iter()
            .map(|v| v.parse::<f64>().map_err(|e| e.to_string()))
            .collect::<Result<_, _>>()?;

        // min <= avg <= max for every reported node (values are rounded)
        for zone_start in [0, 16] {
            let n_nodes = if zone_start == 0 { 5 } else { 4 };
            for node in 0..n_nodes {
                let i = zone_start + 3 * node;
                assert!(values[i] <= values[i + 2] + 1e-3, "{}", line);
                assert!(values[i + 2] <= values[i + 1] + 1e-3, "{}", line);
                assert!(values[i] > -10. && values[i + 1] < 60., "{}", line);
            }
            let conductance = values[zone_start + 3 * n_nodes];
            assert!(conductance > 0.0);
        }
    }
    assert!(lines[1].starts_with("07/01,"));
    assert!(lines[14].starts_with("07/14,"));
    Ok(())
}

#[test]
fn limited_days_and_determinism() -> Result<(), String> {
    let short = simulate(Some(5))?;
    assert_eq!(short.lines().count(), 6);

    // The first days do not depend on how many days follow them
    let long = simulate(None)?;
    for (a, b) in short.lines().zip(long.lines()) {
        assert_eq!(a, b);
    }
    Ok(())
}

#[test]
fn write_to_file() -> Result<(), String> {
    let path = std::env::temp_dir().join("soiltemp_paddock_check.csv");
    let mut opts = options(Some(3));
    opts.output = Some(path.to_string_lossy().to_string());
    run_files(&opts).map_err(|e| e.to_string())?;

    let written = std::fs::read_to_string(&path).map_err(|e| e.to_string())?;
    assert_eq!(written, simulate(Some(3))?);
    Ok(())
}

#[test]
fn constant_soil_water() -> Result<(), String> {
    let (model, weather, _) = load()?;
    let mut out: Vec<u8> = Vec::new();
    run(&model, &weather, &HashMap::new(), &options(Some(2)), &mut out)
        .map_err(|e| e.to_string())?;
    assert_eq!(out.iter().filter(|c| **c == b'\n').count(), 3);
    Ok(())
}

#[test]
fn unknown_zone() -> Result<(), String> {
    let (model, weather, mut soil_water) = load()?;
    let series = soil_water
        .get("bare")
        .cloned()
        .ok_or("no series for 'bare'")?;
    soil_water.insert("pasture".into(), series);
    let r = run(&model, &weather, &soil_water, &options(None), Vec::new());
    assert!(matches!(r, Err(SoilError::Provider { .. })));
    Ok(())
}

#[test]
fn missing_files() {
    let mut opts = options(None);
    opts.weather_file = "./tests/paddock/nothing_here.json".into();
    assert!(matches!(
        run_files(&opts),
        Err(SoilError::Provider { .. })
    ));

    let mut opts = options(None);
    opts.input_file = "./tests/paddock/nothing_here.json5".into();
    assert!(matches!(run_files(&opts), Err(SoilError::Io(_))));
}
