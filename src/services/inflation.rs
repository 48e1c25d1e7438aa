//! Price & inflation engine
//!
//! Reads the observations of one item in one currency over an inclusive date
//! window and compares the earliest price with the latest one:
//!
//! - `price_difference = last_price - started_price`
//! - `inflation_rate = price_difference / started_price * 100`, rounded to
//!   two fractional digits (midpoint away from zero)
//!
//! Fewer than two observations, or a zero starting price, yield
//! `InflationOutcome::InsufficientData`. That is a normal result, not an error.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{DatabaseConnection, QueryOrder};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::{
    price_observations,
    sea_orm_active_enums::{Currency, Status},
};
use crate::error::ServiceError;
use crate::models::inflation::{InflationCalculationResult, InflationOutcome};
use crate::services::directory;
use crate::services::price_filter::{self, PriceObservationFilter};

/// Fractional digits kept on the percentage rate
pub const RATE_DECIMAL_PLACES: u32 = 2;

/// Minimum number of observations needed to compute a rate
pub const MIN_OBSERVATIONS: usize = 2;

/// A validated currency + inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InflationWindow {
    currency: Currency,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl InflationWindow {
    pub fn new(currency: Currency, start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, String> {
        if start_date > end_date {
            return Err(format!(
                "start_date ({}) must not be after end_date ({})",
                start_date, end_date
            ));
        }
        Ok(Self {
            currency,
            start_date,
            end_date,
        })
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// True when the observation is active, in this currency and inside the window
    pub fn admits(&self, observation: &price_observations::Model) -> bool {
        observation.status == Status::Active
            && observation.currency == self.currency
            && observation.observation_date >= self.start_date
            && observation.observation_date <= self.end_date
    }
}

/// Percentage change from `started` to `last`, or `None` when `started` is zero
pub fn inflation_rate(started: Decimal, last: Decimal) -> Option<Decimal> {
    if started.is_zero() {
        return None;
    }
    let rate = (last - started).checked_div(started)?.checked_mul(Decimal::ONE_HUNDRED)?;
    let mut rate =
        rate.round_dp_with_strategy(RATE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rate.rescale(RATE_DECIMAL_PLACES);
    Some(rate)
}

/// Compute the outcome from a set of candidate observations.
///
/// Candidates outside the window, in another currency or inactive are ignored,
/// so callers may pass an over-fetched set. Same-day observations keep their
/// input order, which the query makes `created_at` ascending.
pub fn calculate(
    item_id: Uuid,
    window: &InflationWindow,
    observations: &[price_observations::Model],
) -> InflationOutcome {
    let mut series: Vec<&price_observations::Model> =
        observations.iter().filter(|o| window.admits(o)).collect();
    series.sort_by_key(|o| o.observation_date);

    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) if series.len() >= MIN_OBSERVATIONS => (*first, *last),
        _ => {
            return InflationOutcome::insufficient(format!(
                "At least {} {} price observations between {} and {} are required, found {}",
                MIN_OBSERVATIONS,
                window.currency,
                window.start_date,
                window.end_date,
                series.len()
            ));
        }
    };

    let Some(rate) = inflation_rate(first.price, last.price) else {
        return InflationOutcome::insufficient(format!(
            "Starting price on {} is zero, the inflation rate is undefined",
            first.observation_date
        ));
    };

    InflationOutcome::Calculated(InflationCalculationResult {
        item_id,
        currency: window.currency,
        start_date: window.start_date,
        end_date: window.end_date,
        first_observation_date: first.observation_date,
        last_observation_date: last.observation_date,
        started_price: first.price,
        last_price: last.price,
        price_difference: last.price - first.price,
        inflation_rate: rate,
        observation_count: series.len(),
    })
}

/// Fetch the item's observations for the window, ascending by observation date
pub async fn observations_in_window(
    db: &DatabaseConnection,
    item_id: Uuid,
    window: &InflationWindow,
) -> Result<Vec<price_observations::Model>, ServiceError> {
    let filter = PriceObservationFilter::for_item(item_id)
        .with_currency(window.currency)
        .between(window.start_date, window.end_date)
        .active_only();

    let observations = price_filter::select_filtered(&filter)
        .order_by_asc(price_observations::Column::ObservationDate)
        .order_by_asc(price_observations::Column::CreatedAt)
        .order_by_asc(price_observations::Column::Id)
        .all(db)
        .await?;
    Ok(observations)
}

/// Compute inflation for an active item over the window
pub async fn compute_inflation(
    db: &DatabaseConnection,
    item_id: Uuid,
    window: &InflationWindow,
) -> Result<InflationOutcome, ServiceError> {
    directory::find_active_item(db, item_id).await?;

    let observations = observations_in_window(db, item_id, window).await?;
    debug!(
        item_id = %item_id,
        currency = %window.currency,
        count = observations.len(),
        "Loaded observations for inflation window"
    );

    let outcome = calculate(item_id, window, &observations);
    match &outcome {
        InflationOutcome::Calculated(result) => info!(
            item_id = %item_id,
            rate = %result.inflation_rate,
            "Inflation calculated"
        ),
        InflationOutcome::InsufficientData { message } => info!(
            item_id = %item_id,
            reason = %message,
            "Insufficient data for inflation"
        ),
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn observation(price: Decimal, currency: Currency, on: NaiveDate) -> price_observations::Model {
        price_observations::Model {
            id: Uuid::new_v4(),
            item_id: Uuid::nil(),
            store_id: Uuid::nil(),
            price,
            currency,
            observation_date: on,
            location: "Main St".to_string(),
            notes: None,
            status: Status::Active,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap().fixed_offset(),
        }
    }

    fn window(currency: Currency) -> InflationWindow {
        InflationWindow::new(currency, date(2024, 1, 1), date(2024, 12, 31)).unwrap()
    }

    #[test]
    fn test_window_rejects_inverted_range() {
        let err = InflationWindow::new(Currency::Eur, date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert!(err.contains("must not be after"));
    }

    #[test]
    fn test_window_single_day_allowed() {
        assert!(InflationWindow::new(Currency::Eur, date(2024, 2, 1), date(2024, 2, 1)).is_ok());
    }

    #[test]
    fn test_three_increasing_prices() {
        let observations = vec![
            observation(dec!(2.00), Currency::Eur, date(2024, 1, 10)),
            observation(dec!(2.50), Currency::Eur, date(2024, 4, 10)),
            observation(dec!(3.00), Currency::Eur, date(2024, 8, 10)),
        ];
        let outcome = calculate(Uuid::nil(), &window(Currency::Eur), &observations);
        let result = outcome.calculated().expect("calculated");
        assert_eq!(result.started_price, dec!(2.00));
        assert_eq!(result.last_price, dec!(3.00));
        assert_eq!(result.price_difference, dec!(1.00));
        assert_eq!(result.inflation_rate, dec!(50.00));
        assert_eq!(result.observation_count, 3);
        assert_eq!(result.first_observation_date, date(2024, 1, 10));
        assert_eq!(result.last_observation_date, date(2024, 8, 10));
    }

    #[test]
    fn test_unordered_input_is_sorted_by_date() {
        let observations = vec![
            observation(dec!(3.00), Currency::Eur, date(2024, 8, 10)),
            observation(dec!(2.00), Currency::Eur, date(2024, 1, 10)),
            observation(dec!(2.50), Currency::Eur, date(2024, 4, 10)),
        ];
        let result = calculate(Uuid::nil(), &window(Currency::Eur), &observations);
        assert_eq!(result.calculated().unwrap().started_price, dec!(2.00));
        assert_eq!(result.calculated().unwrap().last_price, dec!(3.00));
    }

    #[test]
    fn test_price_drop_gives_negative_rate() {
        let observations = vec![
            observation(dec!(4.00), Currency::Usd, date(2024, 1, 1)),
            observation(dec!(3.00), Currency::Usd, date(2024, 12, 31)),
        ];
        let result = calculate(Uuid::nil(), &window(Currency::Usd), &observations);
        let result = result.calculated().unwrap();
        assert_eq!(result.price_difference, dec!(-1.00));
        assert_eq!(result.inflation_rate, dec!(-25.00));
    }

    #[test]
    fn test_rate_is_rounded_to_two_places() {
        let observations = vec![
            observation(dec!(3.00), Currency::Eur, date(2024, 1, 1)),
            observation(dec!(4.00), Currency::Eur, date(2024, 2, 1)),
        ];
        let result = calculate(Uuid::nil(), &window(Currency::Eur), &observations);
        assert_eq!(result.calculated().unwrap().inflation_rate, dec!(33.33));
    }

    #[test]
    fn test_rate_matches_formula_for_many_pairs() {
        let pairs = [
            (dec!(1.00), dec!(1.00)),
            (dec!(0.99), dec!(1.49)),
            (dec!(12.34), dec!(10.01)),
            (dec!(7.00), dec!(21.00)),
            (dec!(0.01), dec!(0.02)),
        ];
        for (start, end) in pairs {
            let observations = vec![
                observation(start, Currency::Eur, date(2024, 1, 1)),
                observation(end, Currency::Eur, date(2024, 6, 1)),
            ];
            let result = calculate(Uuid::nil(), &window(Currency::Eur), &observations);
            let rate = result.calculated().unwrap().inflation_rate;
            let expected = (end - start) / start * dec!(100);
            assert!(
                (rate - expected).abs() <= dec!(0.005),
                "rate {} vs expected {} for {} -> {}",
                rate,
                expected,
                start,
                end
            );
        }
    }

    #[test]
    fn test_no_observations_is_insufficient() {
        let outcome = calculate(Uuid::nil(), &window(Currency::Eur), &[]);
        assert!(outcome.is_insufficient());
    }

    #[test]
    fn test_single_observation_is_insufficient() {
        let observations = vec![observation(dec!(2.00), Currency::Eur, date(2024, 3, 1))];
        let outcome = calculate(Uuid::nil(), &window(Currency::Eur), &observations);
        match outcome {
            InflationOutcome::InsufficientData { message } => assert!(message.contains("found 1")),
            other => panic!("expected insufficient data, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_starting_price_is_insufficient() {
        let observations = vec![
            observation(dec!(0.00), Currency::Eur, date(2024, 1, 1)),
            observation(dec!(2.00), Currency::Eur, date(2024, 2, 1)),
        ];
        let outcome = calculate(Uuid::nil(), &window(Currency::Eur), &observations);
        assert!(outcome.is_insufficient());
    }

    #[test]
    fn test_other_currency_is_ignored() {
        let observations = vec![
            observation(dec!(2.00), Currency::Eur, date(2024, 1, 1)),
            observation(dec!(100.00), Currency::Usd, date(2024, 1, 2)),
            observation(dec!(2.20), Currency::Eur, date(2024, 2, 1)),
            observation(dec!(0.01), Currency::Usd, date(2024, 3, 1)),
        ];
        let result = calculate(Uuid::nil(), &window(Currency::Eur), &observations);
        let result = result.calculated().unwrap();
        assert_eq!(result.last_price, dec!(2.20));
        assert_eq!(result.inflation_rate, dec!(10.00));
        assert_eq!(result.observation_count, 2);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let observations = vec![
            observation(dec!(1.00), Currency::Eur, date(2023, 12, 31)),
            observation(dec!(2.00), Currency::Eur, date(2024, 1, 1)),
            observation(dec!(3.00), Currency::Eur, date(2024, 12, 31)),
            observation(dec!(9.00), Currency::Eur, date(2025, 1, 1)),
        ];
        let result = calculate(Uuid::nil(), &window(Currency::Eur), &observations);
        let result = result.calculated().unwrap();
        assert_eq!(result.started_price, dec!(2.00));
        assert_eq!(result.last_price, dec!(3.00));
    }

    #[test]
    fn test_only_other_currency_is_insufficient() {
        let observations = vec![
            observation(dec!(2.00), Currency::Usd, date(2024, 1, 1)),
            observation(dec!(3.00), Currency::Usd, date(2024, 2, 1)),
        ];
        let outcome = calculate(Uuid::nil(), &window(Currency::Eur), &observations);
        assert!(outcome.is_insufficient());
    }

    #[test]
    fn test_inactive_observations_are_ignored() {
        let mut retracted = observation(dec!(1.00), Currency::Eur, date(2024, 1, 1));
        retracted.status = Status::Inactive;
        let observations = vec![
            retracted,
            observation(dec!(2.00), Currency::Eur, date(2024, 2, 1)),
            observation(dec!(2.50), Currency::Eur, date(2024, 3, 1)),
        ];
        let result = calculate(Uuid::nil(), &window(Currency::Eur), &observations);
        assert_eq!(result.calculated().unwrap().started_price, dec!(2.00));
    }

    #[test]
    fn test_inflation_rate_helper() {
        assert_eq!(inflation_rate(dec!(2), dec!(3)), Some(dec!(50.00)));
        assert_eq!(inflation_rate(dec!(0), dec!(3)), None);
        assert_eq!(inflation_rate(dec!(3), dec!(3)), Some(dec!(0)));
        // always two fractional digits on the wire
        assert_eq!(inflation_rate(dec!(2.00), dec!(3.00)).unwrap().to_string(), "50.00");
    }
}
