/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::Float;
use calendar::Date;
use clap::Parser;
use communication::{
    ConstantSoilWater, MetaOptions, SimulationModel, SoilWaterSeries, SoilWaterState,
    SoilWaterTrait,
};
use heat::{SoilTemperatureMemory, SoilTemperatureModel, SoilTemperatureState};
use log::{debug, info};
use model::{SoilError, SoilModel, SoilResult, Zone};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use weather::Weather;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The options we can pass to the simulation
#[derive(Parser, Default, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct SimOptions {
    /// The input model file (JSON5)
    #[clap(short = 'i')]
    pub input_file: String,

    /// The weather file (JSON)
    #[clap(short = 'w')]
    pub weather_file: String,

    /// A JSON file with the daily soil water of the zones, keyed by
    /// zone name. Zones that are not in it keep the water content
    /// of their profile.
    #[clap(short = 's')]
    pub soil_water_file: Option<String>,

    /// Specifies the path to which to write the results.
    /// If none is given, STDOUT is used
    #[clap(short = 'o')]
    pub output: Option<String>,

    /// The maximum number of days to simulate. If none is given,
    /// every day in the weather file is simulated
    #[clap(short = 'n')]
    pub n_days: Option<usize>,

    /// The albedo of the zones that are not in the soil water file
    #[clap(short = 'a', default_value_t = 0.13)]
    pub albedo: Float,
}

/// Where a zone gets its daily soil water from
#[derive(Debug, Clone)]
pub enum ZoneSoilWater<'a> {
    /// A series read from a file
    Series(&'a SoilWaterSeries),
    /// The water content of the profile, every day
    Constant(ConstantSoilWater),
}

impl SoilWaterTrait for ZoneSoilWater<'_> {
    fn get_soil_water(&self, date: Date) -> SoilResult<SoilWaterState> {
        match self {
            Self::Series(s) => s.get_soil_water(date),
            Self::Constant(c) => c.get_soil_water(date),
        }
    }
}

/// A soil column being simulated. Each zone owns all of its state.
pub struct ZoneRun<'a> {
    /// The name of the zone
    pub name: String,
    /// The model of the zone
    pub model: SoilTemperatureModel<&'a Weather, ZoneSoilWater<'a>>,
    /// The temperatures and results of the zone
    pub state: SoilTemperatureState,
    memory: SoilTemperatureMemory,
}

impl<'a> ZoneRun<'a> {
    /// Builds the model of a zone
    pub fn new(
        soil_model: &SoilModel,
        zone: &Zone,
        meta_options: &MetaOptions,
        weather: &'a Weather,
        soil_water: ZoneSoilWater<'a>,
    ) -> SoilResult<Self> {
        let model = SoilTemperatureModel::new(
            meta_options,
            soil_model.options.clone(),
            &zone.profile,
            weather,
            soil_water,
        )?;
        let state = model.initial_state();
        let memory = model.allocate_memory()?;
        Ok(Self {
            name: zone.name.clone(),
            model,
            state,
            memory,
        })
    }

    /// Simulates one day
    pub fn march(&mut self, date: Date) -> SoilResult<()> {
        self.model.march(date, &mut self.state, &mut self.memory)
    }

    /// The names of the columns this zone reports
    pub fn header(&self) -> Vec<String> {
        let mut ret = vec![
            format!("{}:surface_minimum_temperature", self.name),
            format!("{}:surface_maximum_temperature", self.name),
            format!("{}:surface_average_temperature", self.name),
        ];
        for i in 0..self.model.mesh().n_layers() {
            for what in ["minimum", "maximum", "average"] {
                ret.push(format!("{}:layer_{}_{}_temperature", self.name, i + 1, what));
            }
        }
        ret.push(format!("{}:boundary_layer_conductance", self.name));
        ret
    }

    /// The values this zone reports, in the same order as the header
    pub fn row(&self) -> Vec<Float> {
        let s = &self.state;
        let mut ret = vec![
            s.surface_minimum_temperature(),
            s.surface_maximum_temperature(),
            s.surface_average_temperature(),
        ];
        for i in 0..s.final_temperature().len() {
            ret.push(s.minimum_temperature()[i]);
            ret.push(s.maximum_temperature()[i]);
            ret.push(s.average_temperature()[i]);
        }
        ret.push(s.average_boundary_layer_conductance());
        ret
    }
}

/// Builds the zones of `soil_model`. Zones found in `soil_water`
/// use that series; the rest keep the water content of their profile
/// and the given `albedo`.
pub fn build_zones<'a>(
    soil_model: &SoilModel,
    weather: &'a Weather,
    soil_water: &'a HashMap<String, SoilWaterSeries>,
    albedo: Float,
) -> SoilResult<Vec<ZoneRun<'a>>> {
    let meta_options = MetaOptions::from(&weather.location);
    soil_model
        .zones
        .iter()
        .map(|zone| {
            let water = match soil_water.get(&zone.name) {
                Some(series) => ZoneSoilWater::Series(series),
                None => ZoneSoilWater::Constant(ConstantSoilWater {
                    state: SoilWaterState::from_profile(&zone.profile, albedo),
                }),
            };
            ZoneRun::new(soil_model, zone, &meta_options, weather, water)
        })
        .collect()
}

fn march_all(zones: &mut [ZoneRun], date: Date) -> SoilResult<()> {
    #[cfg(feature = "parallel")]
    let results: Vec<SoilResult<()>> = zones.par_iter_mut().map(|z| z.march(date)).collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<SoilResult<()>> = zones.iter_mut().map(|z| z.march(date)).collect();

    results.into_iter().collect()
}

/// This function drives the simulation: every zone is marched through
/// the days of the weather, and one CSV row is written per day.
pub fn run<T: Write>(
    soil_model: &SoilModel,
    weather: &Weather,
    soil_water: &HashMap<String, SoilWaterSeries>,
    options: &SimOptions,
    mut out: T,
) -> SoilResult<()> {
    if soil_water.keys().any(|k| !soil_model.zones.iter().any(|z| &z.name == k)) {
        return Err(SoilError::provider(
            "soil water",
            "the soil water file mentions zones that are not in the model",
        ));
    }
    let mut zones = build_zones(soil_model, weather, soil_water, options.albedo)?;

    // Write header
    let header: Vec<String> = zones.iter().flat_map(|z| z.header()).collect();
    writeln!(out, "Date,{}", header.join(","))?;

    let n_days = options.n_days.unwrap_or(weather.data.len());
    let mut last_reported_month: u8 = 99;
    for date in weather.data.iter().map(|w| w.date).take(n_days) {
        if date.month != last_reported_month {
            last_reported_month = date.month;
            info!("Simulating month {}", last_reported_month);
        }
        march_all(&mut zones, date)?;

        let values: Vec<String> = zones
            .iter()
            .flat_map(|z| z.row())
            .map(|v| format!("{:.3}", v))
            .collect();
        writeln!(out, "{},{}", date, values.join(","))?;
    }
    out.flush()?;
    info!("Done simulating {} zones", zones.len());
    Ok(())
}

/// Reads the files in `options` and runs the simulation, writing
/// into the output file (or STDOUT)
pub fn run_files(options: &SimOptions) -> SoilResult<()> {
    let soil_model = SoilModel::from_file(&options.input_file)?;
    let weather =
        Weather::from_file(&options.weather_file).map_err(|e| SoilError::provider("weather", e))?;
    let soil_water: HashMap<String, SoilWaterSeries> = match &options.soil_water_file {
        Some(f) => {
            let s = fs::read_to_string(f)?;
            let mut map: HashMap<String, SoilWaterSeries> = serde_json::from_str(&s)
                .map_err(|e| SoilError::parse(format!("file '{}'", f), e.to_string()))?;
            for series in map.values_mut() {
                series.data.sort_by(|a, b| a.date.cmp(&b.date));
            }
            map
        }
        None => HashMap::new(),
    };
    debug!(
        "Loaded {} zones and {} days of weather",
        soil_model.zones.len(),
        weather.data.len()
    );

    match &options.output {
        Some(v) => {
            let out = std::io::BufWriter::new(fs::File::create(v)?);
            run(&soil_model, &weather, &soil_water, options, out)
        }
        None => run(
            &soil_model,
            &weather,
            &soil_water,
            options,
            std::io::stdout().lock(),
        ),
    }
}

/***********/
/* TESTING */
/***********/

#[cfg(test)]
mod testing {
    use super::*;
    use model::SoilTemperatureOptions;
    use test_models::layered_profile;
    use weather::{DailyWeather, Location};

    fn weather() -> Weather {
        let day = |day: u8| DailyWeather {
            date: Date { month: 1, day },
            max_temperature: 30.,
            min_temperature: 18.,
            solar_radiation: 25.,
            wind_speed: None,
            rain: 0.0,
        };
        Weather {
            location: Location {
                name: "Somewhere".into(),
                latitude: -27.5,
                elevation: None,
                average_temperature: 20.,
                annual_amplitude: 8.,
            },
            data: vec![day(1), day(2)],
        }
    }

    #[test]
    fn zone_columns() -> Result<(), String> {
        let options: SoilTemperatureOptions =
            json5::from_str("{ boundary_layer_conductance_source: 'constant' }")
                .map_err(|e| e.to_string())?;
        let soil_model = SoilModel {
            options,
            zones: vec![Zone {
                name: "paddock".into(),
                profile: layered_profile().map_err(|e| e.to_string())?,
            }],
        };
        let weather = weather();
        let soil_water = HashMap::new();
        let mut zones =
            build_zones(&soil_model, &weather, &soil_water, 0.2).map_err(|e| e.to_string())?;
        assert_eq!(zones.len(), 1);

        let header = zones[0].header();
        assert_eq!(header.len(), 16);
        assert_eq!(header[3], "paddock:layer_1_minimum_temperature");
        assert_eq!(header[15], "paddock:boundary_layer_conductance");

        march_all(&mut zones, Date { month: 1, day: 1 }).map_err(|e| e.to_string())?;
        let row = zones[0].row();
        assert_eq!(row.len(), header.len());
        assert_eq!(row[15], 20.);
        Ok(())
    }

    #[test]
    fn missing_weather_day() -> Result<(), String> {
        let soil_model = SoilModel {
            options: SoilTemperatureOptions::default(),
            zones: vec![Zone {
                name: "paddock".into(),
                profile: layered_profile().map_err(|e| e.to_string())?,
            }],
        };
        let weather = weather();
        let soil_water = HashMap::new();
        let mut zones =
            build_zones(&soil_model, &weather, &soil_water, 0.2).map_err(|e| e.to_string())?;
        let r = march_all(&mut zones, Date { month: 3, day: 1 });
        assert!(matches!(r, Err(SoilError::Provider { .. })));
        Ok(())
    }
}
