use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::segment::Segment;
use crate::error::{EntityError, EntityResult};
use crate::values::{ConsumerId, HouseId, Money};

/// Affordability policy: a consumer can finance up to this multiple of
/// annual income
pub const AFFORDABILITY_INCOME_MULTIPLE: Money = dec!(4);

/// Fraction of annual income put aside each year
pub const SAVING_RATE: Money = dec!(0.3);

/// Annual interest applied to accumulated savings
pub const INTEREST_RATE: Money = dec!(0.05);

/// Required down payment as a fraction of the sale price
pub const DOWN_PAYMENT_RATE: Money = dec!(0.2);

/// Housing attributes a consumer shops for
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesiredFeatures {
    /// Minimum bedroom count a listing must offer
    pub min_bedrooms: u32,
    /// Required location tag, if the consumer pinned one
    pub location: Option<String>,
}

impl DesiredFeatures {
    pub fn with_min_bedrooms(min_bedrooms: u32) -> Self {
        Self {
            min_bedrooms,
            location: None,
        }
    }
}

/// A prospective buyer
///
/// Created once per simulation run from input records. Read-only during the
/// run except for savings settlement and the match flag, which the market
/// sets at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consumer {
    pub id: ConsumerId,
    pub annual_income: Money,
    pub children: u8,
    pub desired: DesiredFeatures,
    pub savings: Money,
    pub saving_rate: Money,
    pub interest_rate: Money,
    /// Assigned at construction from income, immutable afterwards
    segment: Segment,
    matched_house: Option<HouseId>,
}

impl Consumer {
    /// Create a consumer; the segment is derived from income
    pub fn new(
        id: ConsumerId,
        annual_income: Money,
        children: u8,
        desired: DesiredFeatures,
    ) -> EntityResult<Self> {
        if annual_income < Money::ZERO {
            return Err(EntityError::InvalidAttribute(format!(
                "annual income must be non-negative, got {annual_income}"
            )));
        }

        Ok(Self {
            id,
            annual_income,
            children,
            desired,
            savings: Money::ZERO,
            saving_rate: SAVING_RATE,
            interest_rate: INTEREST_RATE,
            segment: Segment::for_income(annual_income),
            matched_house: None,
        })
    }

    /// Override the default saving and interest rates
    pub fn with_rates(mut self, saving_rate: Money, interest_rate: Money) -> Self {
        self.saving_rate = saving_rate;
        self.interest_rate = interest_rate;
        self
    }

    /// Seed accumulated savings (e.g. for fixtures)
    pub fn with_savings(mut self, savings: Money) -> Self {
        self.savings = savings;
        self
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn is_matched(&self) -> bool {
        self.matched_house.is_some()
    }

    pub fn matched_house(&self) -> Option<HouseId> {
        self.matched_house
    }

    /// Affordability test: price within the fixed multiple of annual income
    pub fn affordable(&self, price: Money) -> bool {
        price <= AFFORDABILITY_INCOME_MULTIPLE * self.annual_income
    }

    /// Accumulate savings year by year: contribute a fraction of income,
    /// then apply interest to the running total
    pub fn accumulate_savings(&mut self, years: u32) {
        let annual_contribution = self.annual_income * self.saving_rate;
        for _ in 0..years {
            self.savings += annual_contribution;
            self.savings *= Money::ONE + self.interest_rate;
        }
        self.savings = self.savings.round_dp(2);
    }

    /// Highest price the accumulated savings can cover as a down payment
    pub fn max_purchase_price(&self) -> Money {
        self.savings / DOWN_PAYMENT_RATE
    }

    /// Record a successful match and settle the down payment
    ///
    /// A consumer matches at most one house per run; a second call is a
    /// sequencing error, not a no-op.
    pub fn record_match(&mut self, house_id: HouseId, price: Money) -> EntityResult<()> {
        if let Some(existing) = self.matched_house {
            return Err(EntityError::InvalidState(format!(
                "consumer {} already matched house {existing}",
                self.id
            )));
        }
        self.matched_house = Some(house_id);
        self.savings = (self.savings - price * DOWN_PAYMENT_RATE).round_dp(2);
        Ok(())
    }
}
