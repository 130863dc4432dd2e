use criterion::{black_box, criterion_group, criterion_main, Criterion};

use calendar::Date;
use communication::SimulationModel;
use heat::SoilTemperatureModel;
use test_models::layered_scenario;

pub fn criterion_benchmark(c: &mut Criterion) {
    let scenario = layered_scenario(20.).unwrap();
    let model = SoilTemperatureModel::new(
        &scenario.meta_options,
        scenario.options,
        &scenario.profile,
        scenario.weather,
        scenario.soil_water,
    )
    .unwrap();
    let mut state = model.initial_state();
    let mut memory = model.allocate_memory().unwrap();
    let date = Date { month: 7, day: 1 };

    c.bench_function("march_day", |b| {
        b.iter(|| {
            model
                .march(black_box(date), &mut state, &mut memory)
                .unwrap()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
