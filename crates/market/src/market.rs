use std::collections::BTreeMap;

use domus_core::{
    Consumer, ConsumerId, House, HouseId, Money, QualityScore, SaleRecord, Segment,
};
use domus_ports::{ClearingOrder, PriceEstimator};
use log::{debug, info};
use rand::prelude::*;
use rust_decimal::Decimal;

use crate::error::{MarketError, MarketResult};

/// The housing market
///
/// Owns its consumer and listing collections exclusively; callers only ever
/// see borrowed lookups. `BTreeMap` keys double as the stable ascending-id
/// order the clearing pass and its tie-breaking depend on.
pub struct HousingMarket {
    consumers: BTreeMap<ConsumerId, Consumer>,
    houses: BTreeMap<HouseId, House>,
    sales: Vec<SaleRecord>,
    appraiser: Option<Box<dyn PriceEstimator>>,
}

impl HousingMarket {
    pub fn new() -> Self {
        Self {
            consumers: BTreeMap::new(),
            houses: BTreeMap::new(),
            sales: Vec::new(),
            appraiser: None,
        }
    }

    /// Attach a fair-value appraiser consulted during clearing
    pub fn with_appraiser(mut self, appraiser: Box<dyn PriceEstimator>) -> Self {
        self.appraiser = Some(appraiser);
        self
    }

    /// Register a consumer
    pub fn add_consumer(&mut self, consumer: Consumer) -> MarketResult<()> {
        if self.consumers.contains_key(&consumer.id) {
            return Err(MarketError::DuplicateConsumer(consumer.id));
        }
        self.consumers.insert(consumer.id, consumer);
        Ok(())
    }

    /// Register a listing
    pub fn add_house(&mut self, house: House) -> MarketResult<()> {
        if self.houses.contains_key(&house.id) {
            return Err(MarketError::DuplicateHouse(house.id));
        }
        self.houses.insert(house.id, house);
        Ok(())
    }

    pub fn consumer(&self, id: ConsumerId) -> Option<&Consumer> {
        self.consumers.get(&id)
    }

    pub fn house(&self, id: HouseId) -> Option<&House> {
        self.houses.get(&id)
    }

    /// Borrowing iteration over registered consumers, ascending id
    pub fn consumers(&self) -> impl Iterator<Item = &Consumer> {
        self.consumers.values()
    }

    /// Borrowing iteration over registered listings, ascending id
    pub fn houses(&self) -> impl Iterator<Item = &House> {
        self.houses.values()
    }

    pub fn consumer_count(&self) -> usize {
        self.consumers.len()
    }

    pub fn house_count(&self) -> usize {
        self.houses.len()
    }

    /// Sales settled so far, across all clearing passes this run
    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    pub fn matched_count(&self) -> usize {
        self.sales.len()
    }

    /// Run a clearing pass over all unmatched consumers
    ///
    /// Consumers are processed in the requested order; each gets the first
    /// available unit (ascending house id) that is affordable, feature
    /// compatible and, when an appraiser is attached, affordable at its
    /// appraised fair value too. A pass only considers still-unmatched
    /// consumers and still-available units; prior matches are never
    /// re-evaluated.
    pub fn clear_market(&mut self, order: ClearingOrder) -> MarketResult<Vec<SaleRecord>> {
        let queue = self.clearing_queue(order);
        let mut pass = Vec::new();

        for consumer_id in queue {
            let Some(house_id) = self.first_eligible_house(consumer_id) else {
                continue;
            };
            let sale = self.settle_match(consumer_id, house_id)?;
            debug!(
                "matched consumer {} to house {} at {}",
                sale.consumer_id, sale.house_id, sale.price
            );
            pass.push(sale);
        }

        let unmatched = self
            .consumers
            .values()
            .filter(|consumer| !consumer.is_matched())
            .count();
        info!(
            "clearing pass complete: {} sales, {} consumers unmatched",
            pass.len(),
            unmatched
        );
        Ok(pass)
    }

    /// Number of registered consumers in a segment
    pub fn segment_demand(&self, segment: Segment) -> usize {
        self.consumers
            .values()
            .filter(|consumer| consumer.segment() == segment)
            .count()
    }

    /// Mean sale price across units matched to a segment's consumers
    ///
    /// `None` when the segment has no sales; this is the defined sentinel,
    /// never a division fault.
    pub fn average_sale_price(&self, segment: Segment) -> Option<Money> {
        mean(
            self.sales
                .iter()
                .filter(|sale| sale.segment == segment)
                .map(|sale| sale.price),
        )
    }

    /// Mean asking price across available listings, optionally restricted to
    /// an exact bedroom count
    pub fn average_listing_price(&self, bedrooms: Option<u32>) -> Option<Money> {
        mean(
            self.houses
                .values()
                .filter(|house| house.is_available())
                .filter(|house| bedrooms.is_none_or(|wanted| house.features.bedrooms == wanted))
                .map(|house| house.price),
        )
    }

    /// Available listings a buyer in `segment` with budget `max_price` would
    /// consider
    pub fn houses_meeting_requirements(
        &self,
        max_price: Money,
        segment: Segment,
        current_year: i32,
    ) -> MarketResult<Vec<&House>> {
        if max_price <= Money::ZERO {
            return Err(MarketError::InvalidQuery(
                "maximum price must be positive".to_string(),
            ));
        }

        let market_avg_price = self.average_listing_price(None);
        let market_ppsf = self.average_listing_price_per_square_foot();

        let mut matching = Vec::new();
        for house in self.houses.values() {
            if !house.is_available() || house.price > max_price {
                continue;
            }

            let keep = match segment {
                Segment::Fancy => {
                    house.is_new_construction(current_year).unwrap_or(false)
                        && house.quality_or_derived(current_year) == QualityScore::Excellent
                }
                Segment::Optimizer => match market_ppsf {
                    Some(market_ppsf) => house.price_per_square_foot() < market_ppsf,
                    None => false,
                },
                Segment::Average => match market_avg_price {
                    Some(avg) => house.price <= avg,
                    None => false,
                },
            };
            if keep {
                matching.push(house);
            }
        }
        Ok(matching)
    }

    /// Fraction of consumers holding a matched unit; `None` with no consumers
    pub fn ownership_rate(&self) -> Option<Decimal> {
        if self.consumers.is_empty() {
            return None;
        }
        let owners = self
            .consumers
            .values()
            .filter(|consumer| consumer.is_matched())
            .count();
        Some(Decimal::from(owners as u64) / Decimal::from(self.consumers.len() as u64))
    }

    /// Fraction of listings still available; `None` with no listings
    pub fn availability_rate(&self) -> Option<Decimal> {
        if self.houses.is_empty() {
            return None;
        }
        let available = self
            .houses
            .values()
            .filter(|house| house.is_available())
            .count();
        Some(Decimal::from(available as u64) / Decimal::from(self.houses.len() as u64))
    }

    /// Unmatched consumer ids in the requested processing order
    fn clearing_queue(&self, order: ClearingOrder) -> Vec<ConsumerId> {
        // BTreeMap iteration gives ascending id; the income sorts are stable,
        // so ties keep that order
        let mut queue: Vec<(ConsumerId, Money)> = self
            .consumers
            .values()
            .filter(|consumer| !consumer.is_matched())
            .map(|consumer| (consumer.id, consumer.annual_income))
            .collect();

        match order {
            ClearingOrder::ById => {}
            ClearingOrder::IncomeDescending => {
                queue.sort_by(|a, b| b.1.cmp(&a.1));
            }
            ClearingOrder::IncomeAscending => {
                queue.sort_by(|a, b| a.1.cmp(&b.1));
            }
            ClearingOrder::Random { seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                queue.shuffle(&mut rng);
            }
        }

        queue.into_iter().map(|(id, _)| id).collect()
    }

    /// First available unit this consumer can take, by ascending house id
    fn first_eligible_house(&self, consumer_id: ConsumerId) -> Option<HouseId> {
        let consumer = self.consumers.get(&consumer_id)?;
        self.houses
            .values()
            .filter(|house| house.is_available())
            .filter(|house| consumer.affordable(house.price))
            .filter(|house| Self::feature_compatible(consumer, house))
            .filter(|house| self.appraisal_affordable(consumer, house))
            .map(|house| house.id)
            .next()
    }

    fn feature_compatible(consumer: &Consumer, house: &House) -> bool {
        if house.features.bedrooms < consumer.desired.min_bedrooms {
            return false;
        }
        match &consumer.desired.location {
            Some(wanted) => house.features.location.as_deref() == Some(wanted.as_str()),
            None => true,
        }
    }

    /// With an appraiser attached, the buyer must also afford the unit's
    /// appraised fair value; an appraiser that declines does not veto
    fn appraisal_affordable(&self, consumer: &Consumer, house: &House) -> bool {
        let Some(appraiser) = &self.appraiser else {
            return true;
        };
        match appraiser.appraise(house) {
            Some(fair_value) => consumer.affordable(fair_value),
            None => true,
        }
    }

    fn settle_match(
        &mut self,
        consumer_id: ConsumerId,
        house_id: HouseId,
    ) -> MarketResult<SaleRecord> {
        let house = self
            .houses
            .get_mut(&house_id)
            .ok_or(MarketError::UnknownHouse(house_id))?;
        house.mark_sold()?;
        let price = house.price;

        let consumer = self
            .consumers
            .get_mut(&consumer_id)
            .ok_or(MarketError::UnknownConsumer(consumer_id))?;
        consumer.record_match(house_id, price)?;

        let sale = SaleRecord::new(consumer_id, house_id, price, consumer.segment());
        self.sales.push(sale.clone());
        Ok(sale)
    }

    fn average_listing_price_per_square_foot(&self) -> Option<Money> {
        let available: Vec<&House> = self
            .houses
            .values()
            .filter(|house| house.is_available())
            .collect();
        if available.is_empty() {
            return None;
        }
        let total_price: Money = available.iter().map(|house| house.price).sum();
        let total_area: Money = available.iter().map(|house| house.features.area).sum();
        if total_area <= Money::ZERO {
            return None;
        }
        Some(total_price / total_area)
    }
}

impl Default for HousingMarket {
    fn default() -> Self {
        Self::new()
    }
}

fn mean(values: impl Iterator<Item = Money>) -> Option<Money> {
    let mut sum = Money::ZERO;
    let mut count = 0u64;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / Decimal::from(count))
    }
}
