//! End-to-end demo: listings in, forecaster-backed clearing, JSON summary out

use std::sync::Arc;

use domus_forecast::{HouseAppraiser, ModelType, PriceForecaster};
use domus_ports::ClearingOrder;
use domus_sim::{HouseRecord, Simulation, SimulationConfig, build_market, training_set};
use rust_decimal_macros::dec;

fn listing_records() -> Vec<HouseRecord> {
    let listings = [
        (dec!(88000), dec!(880), 2, 1988, 4),
        (dec!(112000), dec!(1050), 2, 1996, 5),
        (dec!(149000), dec!(1400), 3, 2002, 6),
        (dec!(178000), dec!(1600), 3, 2008, 6),
        (dec!(215000), dec!(1850), 3, 2012, 7),
        (dec!(259000), dec!(2100), 4, 2016, 7),
        (dec!(320000), dec!(2500), 4, 2020, 8),
        (dec!(415000), dec!(2900), 5, 2022, 9),
    ];
    listings
        .into_iter()
        .map(|(price, area, bedrooms, year, quality)| HouseRecord {
            sale_price: price,
            living_area: area,
            bedrooms,
            year_built: year,
            overall_quality: Some(quality),
            location: None,
        })
        .collect()
}

fn main() {
    env_logger::init();
    println!("=== domus market simulation ===\n");

    let records = listing_records();

    // Train both forecasting strategies on the listing history
    let (rows, targets) = training_set(&records);
    let mut forecaster = PriceForecaster::new();
    for model_type in ModelType::ALL {
        let report = forecaster
            .train(model_type.label(), &rows, &targets)
            .expect("training on the bundled records cannot fail");
        println!("{}\n", report.report());
    }
    let forecaster = Arc::new(forecaster);

    // The market consults the linear model for fair-value appraisals
    let appraiser = HouseAppraiser::new(forecaster.clone(), ModelType::LinearRegression);
    let market = build_market(&records).with_appraiser(Box::new(appraiser));

    let config = SimulationConfig {
        consumer_count: 40,
        years: 8,
        clearing_order: ClearingOrder::ById,
        seed: Some(42),
        ..SimulationConfig::default()
    };
    let mut simulation = Simulation::new(config, market);
    let results = simulation.run().expect("seeded run over valid records");

    println!("=== Results ===");
    println!(
        "{}",
        serde_json::to_string_pretty(&results).expect("results serialize")
    );

    // Spot-check a hypothetical listing against both strategies
    let probe = vec![dec!(1700), dec!(3), dec!(2010)];
    for model_type in ModelType::ALL {
        let estimate = forecaster
            .predict(model_type.label(), &probe)
            .expect("both strategies were trained above");
        println!("{model_type} estimate for probe listing: {}", estimate.round_dp(0));
    }

    // What could the first unmatched consumer still shop for?
    let market = simulation.market();
    if let Some(consumer) = market.consumers().find(|consumer| !consumer.is_matched()) {
        let options = market
            .houses_meeting_requirements(consumer.max_purchase_price(), consumer.segment(), 2024)
            .unwrap_or_default();
        println!(
            "\nconsumer {} ({}) still shopping: {} listings within budget",
            consumer.id,
            consumer.segment(),
            options.len()
        );
    }
}
