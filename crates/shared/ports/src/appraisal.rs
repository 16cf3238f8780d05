use domus_core::{House, Money};

/// Port through which the market obtains fair-value appraisals
///
/// Implementations may decline (return `None`) when they cannot price a
/// unit, e.g. no trained model for the configured strategy; the market then
/// falls back to the asking price alone.
pub trait PriceEstimator {
    /// Estimated fair price for a housing unit
    fn appraise(&self, house: &House) -> Option<Money>;
}
