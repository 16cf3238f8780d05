use std::collections::BTreeMap;

use domus_core::{Consumer, ConsumerId, DesiredFeatures, Money, SaleRecord, Segment};
use domus_market::{HousingMarket, MarketResult};
use log::info;
use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;

/// Attempts at drawing an in-range income before falling back to the mean
const MAX_SAMPLE_ATTEMPTS: usize = 1000;

/// One simulation run over a pre-built housing market
///
/// Generates the consumer population, accumulates their savings over the
/// configured horizon, then clears the market under the configured
/// mechanism. Seeded runs are fully reproducible.
pub struct Simulation {
    config: SimulationConfig,
    market: HousingMarket,
    rng: StdRng,
}

/// Serializable summary of a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    pub consumer_count: usize,
    pub house_count: usize,
    pub sales: usize,
    pub ownership_rate: Option<Decimal>,
    pub availability_rate: Option<Decimal>,
    pub segment_demand: BTreeMap<String, usize>,
    /// Mean sale price per segment; segments without sales are omitted
    pub average_sale_price_by_segment: BTreeMap<String, Money>,
}

impl Simulation {
    pub fn new(config: SimulationConfig, market: HousingMarket) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            market,
            rng,
        }
    }

    /// Generate the consumer population and register it with the market
    ///
    /// Each consumer draws a truncated-normal income, a children count, and
    /// a bedroom requirement derived from household size; savings accumulate
    /// over the configured horizon before registration.
    pub fn populate_consumers(&mut self) -> MarketResult<()> {
        let offset = self.market.consumer_count() as u64;
        for i in 0..self.config.consumer_count {
            let income = self.sample_income();
            let children = self.sample_children();

            let mut consumer = Consumer::new(
                ConsumerId(offset + i as u64),
                income,
                children,
                DesiredFeatures::with_min_bedrooms(required_bedrooms(children)),
            )?
            .with_rates(self.config.saving_rate, self.config.interest_rate);
            consumer.accumulate_savings(self.config.years);

            self.market.add_consumer(consumer)?;
        }
        info!("generated {} consumers", self.config.consumer_count);
        Ok(())
    }

    /// Clear the market under the configured mechanism
    pub fn run_clearing(&mut self) -> MarketResult<Vec<SaleRecord>> {
        self.market.clear_market(self.config.clearing_order)
    }

    /// Populate, clear once, and summarize
    pub fn run(&mut self) -> MarketResult<SimulationResults> {
        self.populate_consumers()?;
        let sales = self.run_clearing()?;
        info!("simulation complete: {} sales", sales.len());
        Ok(self.results())
    }

    pub fn market(&self) -> &HousingMarket {
        &self.market
    }

    pub fn into_market(self) -> HousingMarket {
        self.market
    }

    /// Summary of the market as it currently stands
    pub fn results(&self) -> SimulationResults {
        let mut segment_demand = BTreeMap::new();
        let mut averages = BTreeMap::new();
        for segment in Segment::values() {
            segment_demand.insert(segment.label().to_string(), self.market.segment_demand(*segment));
            if let Some(average) = self.market.average_sale_price(*segment) {
                averages.insert(segment.label().to_string(), average.round_dp(2));
            }
        }

        SimulationResults {
            consumer_count: self.market.consumer_count(),
            house_count: self.market.house_count(),
            sales: self.market.matched_count(),
            ownership_rate: self.market.ownership_rate(),
            availability_rate: self.market.availability_rate(),
            segment_demand,
            average_sale_price_by_segment: averages,
        }
    }

    /// Truncated-normal income draw, rounded to cents
    fn sample_income(&mut self) -> Money {
        let income = &self.config.income;
        let floor = income.minimum.min(income.maximum);
        let ceiling = income.minimum.max(income.maximum);

        let mean = income.average.to_f64().unwrap_or(0.0);
        let std_dev = income.std_dev.to_f64().unwrap_or(0.0);
        if let Ok(normal) = Normal::new(mean, std_dev) {
            for _ in 0..MAX_SAMPLE_ATTEMPTS {
                let draw = normal.sample(&mut self.rng);
                if let Some(value) = Decimal::from_f64(draw) {
                    let value = value.round_dp(2);
                    if value >= floor && value <= ceiling {
                        return value;
                    }
                }
            }
        }
        // The distribution cannot produce an in-range draw
        income.average.clamp(floor, ceiling)
    }

    fn sample_children(&mut self) -> u8 {
        let low = self.config.children.minimum.min(self.config.children.maximum);
        let high = self.config.children.minimum.max(self.config.children.maximum);
        self.rng.gen_range(low..=high)
    }
}

/// Bedrooms a household needs: one for the parents, kids two to a room
fn required_bedrooms(children: u8) -> u32 {
    1 + children.div_ceil(2) as u32
}
