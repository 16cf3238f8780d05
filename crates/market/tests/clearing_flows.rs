//! Cross-cutting clearing flows: invariants over larger populations

use domus_core::{Consumer, ConsumerId, DesiredFeatures, House, HouseFeatures, HouseId, Segment};
use domus_market::HousingMarket;
use domus_ports::ClearingOrder;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn populated_market() -> HousingMarket {
    let mut market = HousingMarket::new();

    // Incomes span all three segments
    let incomes = [
        dec!(25000),
        dec!(42000),
        dec!(61000),
        dec!(87000),
        dec!(125000),
        dec!(210000),
    ];
    for (i, income) in incomes.into_iter().enumerate() {
        let consumer = Consumer::new(
            ConsumerId(i as u64 + 1),
            income,
            0,
            DesiredFeatures::with_min_bedrooms(1),
        )
        .unwrap();
        market.add_consumer(consumer).unwrap();
    }

    let listings = [
        (dec!(95000), 2, 1995),
        (dec!(150000), 3, 2005),
        (dec!(240000), 3, 2012),
        (dec!(410000), 4, 2020),
        (dec!(800000), 5, 2023),
    ];
    for (i, (price, bedrooms, year)) in listings.into_iter().enumerate() {
        let house = House::new(
            HouseId(i as u64 + 1),
            price,
            HouseFeatures::new(dec!(1400), bedrooms, year),
        )
        .unwrap();
        market.add_house(house).unwrap();
    }

    market
}

#[test]
fn clearing_upholds_matching_invariants() {
    let mut market = populated_market();
    let consumers = market.consumer_count();
    let houses = market.house_count();

    let sales = market.clear_market(ClearingOrder::ById).unwrap();

    // Never more matches than either side of the market
    assert!(sales.len() <= consumers.min(houses));

    // No unit matched twice, every matched unit is off the market, and every
    // buyer could afford what they bought
    let mut seen_houses = std::collections::BTreeSet::new();
    for sale in &sales {
        assert!(seen_houses.insert(sale.house_id));
        assert!(!market.house(sale.house_id).unwrap().is_available());
        assert!(market.consumer(sale.consumer_id).unwrap().affordable(sale.price));
    }
}

#[test]
fn clearing_is_deterministic_across_identical_markets() {
    let run = || {
        let mut market = populated_market();
        market
            .clear_market(ClearingOrder::ById)
            .unwrap()
            .into_iter()
            .map(|sale| (sale.consumer_id, sale.house_id))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn rerun_after_new_listing_serves_leftover_demand() {
    let mut market = populated_market();
    let first = market.clear_market(ClearingOrder::ById).unwrap();
    let matched_before: Vec<ConsumerId> = first.iter().map(|sale| sale.consumer_id).collect();

    // A fresh affordable listing arrives; only still-unmatched consumers
    // compete for it
    market
        .add_house(
            House::new(
                HouseId(99),
                dec!(90000),
                HouseFeatures::new(dec!(1100), 2, 2001),
            )
            .unwrap(),
        )
        .unwrap();

    let second = market.clear_market(ClearingOrder::ById).unwrap();
    for sale in &second {
        assert!(!matched_before.contains(&sale.consumer_id));
        assert_eq!(sale.house_id, HouseId(99));
    }
    assert_eq!(market.matched_count(), first.len() + second.len());
}

#[test]
fn aggregates_stay_stable_between_mutations() {
    let mut market = populated_market();
    market.clear_market(ClearingOrder::ById).unwrap();

    let demand: Vec<usize> = Segment::values()
        .iter()
        .map(|s| market.segment_demand(*s))
        .collect();
    let averages: Vec<Option<Decimal>> = Segment::values()
        .iter()
        .map(|s| market.average_sale_price(*s))
        .collect();

    // Idempotent: repeated reads with no intervening mutation
    for (i, segment) in Segment::values().iter().enumerate() {
        assert_eq!(market.segment_demand(*segment), demand[i]);
        assert_eq!(market.average_sale_price(*segment), averages[i]);
    }
    assert_eq!(demand.iter().sum::<usize>(), market.consumer_count());
}
