mod consumer;
mod house;
mod quality;
mod sale;
mod segment;

pub use consumer::{
    AFFORDABILITY_INCOME_MULTIPLE, Consumer, DOWN_PAYMENT_RATE, DesiredFeatures, INTEREST_RATE,
    SAVING_RATE,
};
pub use house::{EARLIEST_YEAR_BUILT, House, HouseFeatures, NEW_CONSTRUCTION_MAX_AGE};
pub use quality::QualityScore;
pub use sale::{SaleId, SaleRecord};
pub use segment::{FANCY_INCOME_FLOOR, OPTIMIZER_INCOME_FLOOR, Segment};
