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

use crate::boundary_layer::{air_pressure, BoundaryLayer, SurfaceRoughness};
use crate::discretization::Discretization;
use crate::history::TemperatureHistory;
use crate::initial_profile::{initial_profile, InitialConditions};
use crate::net_radiation::NetRadiation;
use crate::solver::{solve_step, HeatBalanceCoefficients, SolverMemory, SurfaceSources};
use crate::thermal_properties::ThermalProperties;
use crate::{Float, LATENT_HEAT, PI};
use calendar::Date;
use communication::{ErrorHandling, MetaOptions, SimulationModel, SoilWaterState, SoilWaterTrait};
use log::{debug, trace};
use model::physical_range::{AIR_TEMPERATURE, ALTITUDE, AVERAGE_TEMPERATURE, WIND_SPEED};
use model::{
    print_warning, BoundaryLayerConductanceSource, NetRadiationSource, SoilError, SoilProfile,
    SoilResult, SoilTemperatureOptions,
};
use std::sync::atomic::{AtomicBool, Ordering};
use weather::{DailyInsolation, DailyWeather, WeatherTrait};

/// Seconds in a day
const SECONDS_PER_DAY: Float = 86400.;

/// Everything that drives the soil temperature during one day
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForcing {
    /// The day
    pub date: Date,

    /// Maximum air temperature (C)
    pub max_temperature: Float,

    /// Minimum air temperature (C)
    pub min_temperature: Float,

    /// Solar radiation (MJ/m2)
    pub radiation: Float,

    /// Wind speed (m/s)
    pub wind_speed: Float,

    /// The state of the soil water balance
    pub soil_water: SoilWaterState,
}

impl DailyForcing {
    /// Puts together the weather and the soil water of a day. If the weather
    /// has no wind speed, `default_wind_speed` is used.
    pub fn new(weather: &DailyWeather, soil_water: SoilWaterState, default_wind_speed: Float) -> Self {
        Self {
            date: weather.date,
            max_temperature: weather.max_temperature,
            min_temperature: weather.min_temperature,
            radiation: weather.solar_radiation,
            wind_speed: weather.wind_speed.unwrap_or(default_wind_speed),
            soil_water,
        }
    }

    /// Checks that the forcing is plausible for a profile with `n_layers`
    pub fn validate(&self, n_layers: usize) -> SoilResult<()> {
        AIR_TEMPERATURE.check(self.max_temperature)?;
        AIR_TEMPERATURE.check(self.min_temperature)?;
        if self.min_temperature > self.max_temperature {
            return Err(SoilError::provider(
                "weather",
                format!(
                    "minimum temperature ({} C) is larger than the maximum ({} C) on {}",
                    self.min_temperature, self.max_temperature, self.date
                ),
            ));
        }
        if !(self.radiation >= 0.0) {
            return Err(SoilError::provider(
                "weather",
                format!(
                    "radiation ({}) on {} cannot be negative",
                    self.radiation, self.date
                ),
            ));
        }
        WIND_SPEED.check(self.wind_speed)?;
        self.soil_water.validate(n_layers)
    }
}

/// The phases a day goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    /// Day-level terms are being calculated, and the daily
    /// statistics are being reset
    DayStart,
    /// The steps of the day are being solved
    SubStepLoop,
    /// The day is done and its results can be read
    DayComplete,
}

/// The part of the [`SoilTemperatureState`] that is carried from one
/// day to the next. Restoring a snapshot and repeating a day with the
/// same forcing gives the same results.
#[derive(Debug, Clone, PartialEq)]
pub struct SoilTemperatureSnapshot {
    /// The temperature of every node (C)
    pub temperatures: Vec<Float>,
    /// Maximum air temperature of the previous day (C)
    pub yesterday_max_temperature: Float,
    /// Minimum air temperature of the previous day (C)
    pub yesterday_min_temperature: Float,
    /// Whether the temperatures have been initialised
    pub initialised: bool,
}

/// The state of a soil column: node temperatures plus
/// the results of the last simulated day.
///
/// Per-layer results start at node 2 and end just above the deep node.
#[derive(Debug, Clone)]
pub struct SoilTemperatureState {
    temperatures: Vec<Float>,
    new_temperatures: Vec<Float>,
    yesterday_max_temperature: Float,
    yesterday_min_temperature: Float,
    initialised: bool,
    phase: DayPhase,
    history: TemperatureHistory,
    morning: Vec<Float>,
    conductivity: Vec<Float>,
    heat_capacity: Vec<Float>,
    heat_storage: Vec<Float>,
}

impl SoilTemperatureState {
    /// Creates an uninitialised state for a mesh of `n_nodes`
    pub fn new(n_nodes: usize) -> Self {
        Self {
            temperatures: vec![0.0; n_nodes],
            new_temperatures: vec![0.0; n_nodes],
            yesterday_max_temperature: 0.0,
            yesterday_min_temperature: 0.0,
            initialised: false,
            phase: DayPhase::DayComplete,
            history: TemperatureHistory::new(n_nodes),
            morning: vec![0.0; n_nodes],
            conductivity: vec![0.0; n_nodes],
            heat_capacity: vec![0.0; n_nodes],
            heat_storage: vec![0.0; n_nodes],
        }
    }

    fn layers(&self) -> std::ops::Range<usize> {
        2..self.temperatures.len() - 1
    }

    fn solved(&self) -> std::ops::Range<usize> {
        1..self.temperatures.len() - 1
    }

    /// The number of nodes
    pub fn n_nodes(&self) -> usize {
        self.temperatures.len()
    }

    /// Whether the temperatures have been initialised
    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    /// The phase of the day
    pub fn phase(&self) -> DayPhase {
        self.phase
    }

    /// The temperature (C) of every node, including the
    /// air (node 0) and the deep node (last)
    pub fn temperatures(&self) -> &[Float] {
        &self.temperatures
    }

    /// The temperature (C) of the soil surface at the end of the day
    pub fn surface_temperature(&self) -> Float {
        self.temperatures[1]
    }

    /// The temperature (C) in the middle of each layer at the end of the day
    pub fn final_temperature(&self) -> &[Float] {
        &self.temperatures[self.layers()]
    }

    /// The minimum temperature (C) of each layer during the last day
    pub fn minimum_temperature(&self) -> &[Float] {
        &self.history.minimum()[self.layers()]
    }

    /// The maximum temperature (C) of each layer during the last day
    pub fn maximum_temperature(&self) -> &[Float] {
        &self.history.maximum()[self.layers()]
    }

    /// The average temperature (C) of each layer during the last day
    pub fn average_temperature(&self) -> &[Float] {
        &self.history.average()[self.layers()]
    }

    /// The minimum temperature (C) of the surface during the last day
    pub fn surface_minimum_temperature(&self) -> Float {
        self.history.minimum()[1]
    }

    /// The maximum temperature (C) of the surface during the last day
    pub fn surface_maximum_temperature(&self) -> Float {
        self.history.maximum()[1]
    }

    /// The average temperature (C) of the surface during the last day
    pub fn surface_average_temperature(&self) -> Float {
        self.history.average()[1]
    }

    /// The temperature (C) of each layer at the morning hour
    pub fn morning_temperature(&self) -> &[Float] {
        &self.morning[self.layers()]
    }

    /// The average conductance (W/m2/K) between the air and the surface
    /// during the last day
    pub fn average_boundary_layer_conductance(&self) -> Float {
        self.history.average_boundary_layer_conductance()
    }

    /// The thermal conductivity (W/m/K) of the surface and the
    /// layer nodes during the last day
    pub fn thermal_conductivity(&self) -> &[Float] {
        &self.conductivity[self.solved()]
    }

    /// The volumetric heat capacity (J/m3/K) of the surface and the
    /// layer nodes during the last day
    pub fn heat_capacity(&self) -> &[Float] {
        &self.heat_capacity[self.solved()]
    }

    /// The heat stored per degree (W/m2/K) by the surface and the
    /// layer nodes on each step of the last day
    pub fn heat_storage(&self) -> &[Float] {
        &self.heat_storage[self.solved()]
    }

    /// The statistics of every node during the last day
    pub fn history(&self) -> &TemperatureHistory {
        &self.history
    }

    /// Takes a copy of what is carried from one day to the next
    pub fn snapshot(&self) -> SoilTemperatureSnapshot {
        SoilTemperatureSnapshot {
            temperatures: self.temperatures.clone(),
            yesterday_max_temperature: self.yesterday_max_temperature,
            yesterday_min_temperature: self.yesterday_min_temperature,
            initialised: self.initialised,
        }
    }

    /// Goes back to a previous [`SoilTemperatureSnapshot`]
    pub fn restore(&mut self, snapshot: &SoilTemperatureSnapshot) -> SoilResult<()> {
        if snapshot.temperatures.len() != self.temperatures.len() {
            return Err(SoilError::LengthMismatch {
                property: "snapshot temperatures",
                expected: self.temperatures.len(),
                found: snapshot.temperatures.len(),
            });
        }
        self.temperatures.copy_from_slice(&snapshot.temperatures);
        self.new_temperatures.copy_from_slice(&snapshot.temperatures);
        self.yesterday_max_temperature = snapshot.yesterday_max_temperature;
        self.yesterday_min_temperature = snapshot.yesterday_min_temperature;
        self.initialised = snapshot.initialised;
        self.phase = DayPhase::DayComplete;
        Ok(())
    }
}

/// The memory reused on every day of the simulation
#[derive(Debug, Clone)]
pub struct SoilTemperatureMemory {
    properties: ThermalProperties,
    coefficients: HeatBalanceCoefficients,
    solver: SolverMemory,
}

/// Solves one step with a certain conductance between the air and the
/// surface, leaving the results in the new temperatures of the state
fn solve_with(
    memory: &mut SoilTemperatureMemory,
    nu: Float,
    conductance: Float,
    sources: SurfaceSources,
    state: &mut SoilTemperatureState,
) -> SoilResult<()> {
    solve_step(
        &memory.coefficients,
        nu,
        conductance,
        sources,
        &state.temperatures,
        &mut state.new_temperatures,
        &mut memory.solver,
    )
}

/// Interpolates the air temperature at a certain hour of the day.
///
/// After the time of the minimum temperature (12 hours before the
/// maximum) the temperature follows a sine wave between today's minimum
/// and maximum. Before it, the temperature moves from the value that
/// yesterday's wave gives at midnight towards today's minimum.
pub fn air_temperature(
    hour: Float,
    max_temperature_hour: Float,
    max_temperature: Float,
    min_temperature: Float,
    yesterday_max_temperature: Float,
    yesterday_min_temperature: Float,
) -> Float {
    let time = hour / 24.;
    let max_time = max_temperature_hour / 24.;
    let min_time = max_time - 0.5;

    if time < min_time {
        let midnight = ((0.25 - max_time) * 2. * PI).sin()
            * (yesterday_max_temperature - yesterday_min_temperature)
            / 2.
            + (yesterday_max_temperature + yesterday_min_temperature) / 2.;
        let fraction = ((min_time - time) / min_time).clamp(0.0, 1.0);
        min_temperature + fraction * (midnight - min_temperature)
    } else {
        ((time + 0.25 - max_time) * 2. * PI).sin() * (max_temperature - min_temperature) / 2.
            + (max_temperature + min_temperature) / 2.
    }
}

/// A one-dimensional heat conduction model of a soil column.
///
/// The model itself does not change during the simulation; the temperatures
/// live in a [`SoilTemperatureState`]. The weather and the soil water balance
/// are read, day by day, from the providers given at construction.
pub struct SoilTemperatureModel<W: WeatherTrait, S: SoilWaterTrait> {
    meta_options: MetaOptions,
    options: SoilTemperatureOptions,
    mesh: Discretization,

    /// hPa
    air_pressure: Float,

    weather: W,
    soil_water: S,

    missing_wind_reported: AtomicBool,
}

impl<W: WeatherTrait, S: SoilWaterTrait> ErrorHandling for SoilTemperatureModel<W, S> {
    fn module_name() -> &'static str {
        "Soil Temperature"
    }
}

impl<W: WeatherTrait, S: SoilWaterTrait> SoilTemperatureModel<W, S> {
    /// Builds a model, checking the options, the profile and the
    /// site information
    pub fn new(
        meta_options: &MetaOptions,
        options: SoilTemperatureOptions,
        profile: &SoilProfile,
        weather: W,
        soil_water: S,
    ) -> SoilResult<Self> {
        options.validate()?;
        AVERAGE_TEMPERATURE.check(meta_options.average_temperature)?;
        let mesh = Discretization::new(profile)?;

        let altitude = match meta_options.elevation {
            Some(v) => v,
            None => {
                print_warning(
                    Self::module_name(),
                    format!(
                        "The site has no elevation... using {} m",
                        options.default_altitude
                    ),
                );
                options.default_altitude
            }
        };
        ALTITUDE.check(altitude)?;
        let air_pressure = air_pressure(altitude)?;

        debug!(
            "Built soil temperature model with {} layers ({} nodes), deep node at {} m",
            mesh.n_layers(),
            mesh.n_nodes(),
            mesh.depth(mesh.deep_node())
        );

        Ok(Self {
            meta_options: *meta_options,
            options,
            mesh,
            air_pressure,
            weather,
            soil_water,
            missing_wind_reported: AtomicBool::new(false),
        })
    }

    /// The mesh of nodes
    pub fn mesh(&self) -> &Discretization {
        &self.mesh
    }

    /// The options of the model
    pub fn options(&self) -> &SoilTemperatureOptions {
        &self.options
    }

    /// The air pressure (hPa) at the site
    pub fn air_pressure(&self) -> Float {
        self.air_pressure
    }

    /// Replaces the soil profile. The mesh is rebuilt, and the `state` and
    /// memory are replaced by new ones; the temperatures will be
    /// initialised again on the next day.
    pub fn rebuild_profile(
        &mut self,
        profile: &SoilProfile,
        state: &mut SoilTemperatureState,
        memory: &mut SoilTemperatureMemory,
    ) -> SoilResult<()> {
        self.mesh = Discretization::new(profile)?;
        *state = self.initial_state();
        *memory = self.allocate_memory()?;
        Ok(())
    }

    /// Gathers the forcing of a day from the weather and
    /// soil water providers
    pub fn daily_forcing(&self, date: Date) -> SoilResult<DailyForcing> {
        let weather = self
            .weather
            .get_weather_data(date)
            .map_err(|e| SoilError::provider("weather", e))?;
        if weather.wind_speed.is_none() && !self.missing_wind_reported.swap(true, Ordering::Relaxed)
        {
            print_warning(
                Self::module_name(),
                format!(
                    "The weather has no wind speed (e.g., on {})... using {} m/s",
                    date, self.options.default_wind_speed
                ),
            );
        }
        let soil_water = self.soil_water.get_soil_water(date)?;
        Ok(DailyForcing::new(
            &weather,
            soil_water,
            self.options.default_wind_speed,
        ))
    }

    fn initialise(&self, forcing: &DailyForcing, state: &mut SoilTemperatureState) {
        let conditions = InitialConditions {
            date: forcing.date,
            latitude: self.meta_options.latitude,
            max_temperature: forcing.max_temperature,
            min_temperature: forcing.min_temperature,
            radiation: forcing.radiation,
            albedo: forcing.soil_water.albedo,
            average_temperature: self.meta_options.average_temperature,
            annual_amplitude: self.meta_options.annual_amplitude,
        };
        let temps = initial_profile(&self.mesh, &forcing.soil_water.water_content, &conditions);
        state.temperatures.copy_from_slice(&temps);
        state.new_temperatures.copy_from_slice(&temps);
        state.yesterday_max_temperature = forcing.max_temperature;
        state.yesterday_min_temperature = forcing.min_temperature;
        state.initialised = true;
        debug!("Initial soil temperatures: {:?}", temps);
    }

    /// The energy fluxes (W/m2) at the surface during step `i` (from 0).
    ///
    /// The net radiation comes from the radiation balance or, if so configured,
    /// from the energy needed to evaporate the potential soil evaporation.
    fn surface_sources(
        &self,
        radiation: &NetRadiation,
        soil_water: &SoilWaterState,
        i: usize,
        air_temperature: Float,
        surface_temperature: Float,
    ) -> SurfaceSources {
        let net_radiation = match self.options.net_radiation_source {
            NetRadiationSource::Calc => {
                radiation.at_step(i, air_temperature, surface_temperature) * 1e6
                    / self.options.dt()
            }
            NetRadiationSource::Eos => {
                soil_water.potential_soil_evaporation * LATENT_HEAT / SECONDS_PER_DAY
            }
        };
        SurfaceSources {
            net_radiation,
            latent_heat: soil_water.soil_evaporation * LATENT_HEAT / SECONDS_PER_DAY,
        }
    }

    /// Simulates one day, driven by `forcing`.
    pub fn simulate_day(
        &self,
        forcing: &DailyForcing,
        state: &mut SoilTemperatureState,
        memory: &mut SoilTemperatureMemory,
    ) -> SoilResult<()> {
        let n_nodes = self.mesh.n_nodes();
        if state.n_nodes() != n_nodes {
            return Self::internal_error(format!(
                "State has {} nodes, but the mesh has {}",
                state.n_nodes(),
                n_nodes
            ));
        }
        forcing.validate(self.mesh.n_layers())?;
        if !state.initialised {
            self.initialise(forcing, state);
        }

        /* DAY START */
        state.phase = DayPhase::DayStart;
        let n_steps = self.options.steps_per_day;
        let dt = self.options.dt();
        let nu = self.options.nu;
        let soil_water = &forcing.soil_water;
        let penetration = soil_water.penetration_factor();

        let insolation =
            DailyInsolation::new(forcing.date.day_of_year(), self.meta_options.latitude, n_steps);
        let radiation = NetRadiation::new(
            &insolation,
            forcing.radiation,
            forcing.min_temperature,
            soil_water.albedo,
            penetration,
            dt,
        );
        memory.properties.update(&self.mesh, &soil_water.water_content)?;
        memory
            .coefficients
            .update(&self.mesh, &memory.properties, dt);

        let boundary_layer = BoundaryLayer {
            wind_speed: forcing.wind_speed,
            penetration,
            air_pressure: self.air_pressure,
            roughness: SurfaceRoughness::new(
                soil_water.canopy_height,
                self.options.bare_soil_height,
                self.options.instrument_height,
            ),
        };

        let deep = self.mesh.deep_node();
        state.temperatures[deep] = self.meta_options.average_temperature;
        state.new_temperatures[deep] = self.meta_options.average_temperature;
        state.history.reset();

        /* SUB-STEP LOOP */
        state.phase = DayPhase::SubStepLoop;
        let morning = self.options.morning_hour * 3600.;
        for step in 1..=n_steps {
            let time = step as Float * dt;
            let air = air_temperature(
                time / 3600.,
                self.options.max_temperature_hour,
                forcing.max_temperature,
                forcing.min_temperature,
                state.yesterday_max_temperature,
                state.yesterday_min_temperature,
            );
            state.new_temperatures[0] = air;

            let sources =
                self.surface_sources(&radiation, soil_water, step - 1, air, state.temperatures[1]);

            let conductance = match self.options.boundary_layer_conductance_source {
                BoundaryLayerConductanceSource::Constant => {
                    let g = self.options.boundary_layer_conductance;
                    solve_with(memory, nu, g, sources, state)?;
                    g
                }
                BoundaryLayerConductanceSource::Calc => {
                    let mut g =
                        boundary_layer.checked_conductance(air, state.new_temperatures[1])?;
                    for _ in 0..self.options.boundary_layer_conductance_iterations {
                        solve_with(memory, nu, g, sources, state)?;
                        g = boundary_layer.checked_conductance(air, state.new_temperatures[1])?;
                    }
                    solve_with(memory, nu, g, sources, state)?;
                    g
                }
            };

            state.temperatures.copy_from_slice(&state.new_temperatures);
            state.history.record(&state.temperatures, conductance);
            if (time - morning).abs() < dt / 2. {
                state.morning.copy_from_slice(&state.temperatures);
            }
            trace!(
                "{} step {}: air = {:.3} C | surface = {:.3} C | conductance = {:.3} W/m2K | net radiation = {:.3} W/m2",
                forcing.date,
                step,
                air,
                state.temperatures[1],
                conductance,
                sources.net_radiation
            );
        }

        /* DAY COMPLETE */
        state.history.complete();
        state.yesterday_max_temperature = forcing.max_temperature;
        state.yesterday_min_temperature = forcing.min_temperature;
        state
            .conductivity
            .copy_from_slice(memory.properties.conductivity());
        state
            .heat_capacity
            .copy_from_slice(memory.properties.heat_capacity());
        state
            .heat_storage
            .copy_from_slice(memory.coefficients.storage());
        state.phase = DayPhase::DayComplete;

        debug!(
            "{}: surface between {:.2} and {:.2} C (average {:.2} C), boundary layer conductance {:.2} W/m2K",
            forcing.date,
            state.surface_minimum_temperature(),
            state.surface_maximum_temperature(),
            state.surface_average_temperature(),
            state.average_boundary_layer_conductance()
        );
        Ok(())
    }
}

impl<W: WeatherTrait, S: SoilWaterTrait> SimulationModel for SoilTemperatureModel<W, S> {
    type StateType = SoilTemperatureState;
    type AllocType = SoilTemperatureMemory;

    fn initial_state(&self) -> Self::StateType {
        SoilTemperatureState::new(self.mesh.n_nodes())
    }

    fn allocate_memory(&self) -> SoilResult<Self::AllocType> {
        Ok(SoilTemperatureMemory {
            properties: ThermalProperties::new(
                &self.mesh,
                self.options.clay_specific_heat,
                self.options.water_specific_heat,
            ),
            coefficients: HeatBalanceCoefficients::new(&self.mesh),
            solver: SolverMemory::new(&self.mesh),
        })
    }

    fn march(
        &self,
        date: Date,
        state: &mut Self::StateType,
        alloc: &mut Self::AllocType,
    ) -> SoilResult<()> {
        let forcing = self.daily_forcing(date)?;
        self.simulate_day(&forcing, state, alloc)
    }
}

/***********/
/* TESTING */
/***********/
