use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{
    api::octopus::RateReading,
    quantity::{cost::Pence, rate::PencePerKilowattHour},
};

/// Number of half-hourly metering intervals per day.
pub const INTERVALS_PER_DAY: f64 = 48.0;

/// Tariff data of a single run, indexed for joining with the readings.
#[must_use]
pub struct RateContext {
    standing_charge: Pence,

    /// Unit rates by the end of their validity interval.
    rates: HashMap<DateTime<Utc>, PencePerKilowattHour>,
}

impl RateContext {
    /// Spread the daily standing charge evenly over the metering intervals.
    pub fn new(daily_standing_charge: Pence, rates: impl IntoIterator<Item = RateReading>) -> Self {
        Self {
            standing_charge: daily_standing_charge / INTERVALS_PER_DAY,
            rates: rates.into_iter().map(|rate| (rate.valid_to, rate.value_inc_vat)).collect(),
        }
    }

    /// Context of a run without tariff data.
    pub fn empty() -> Self {
        Self { standing_charge: Pence::ZERO, rates: HashMap::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Standing charge per metering interval.
    pub const fn standing_charge(&self) -> Pence {
        self.standing_charge
    }

    pub fn get(&self, interval_end: &DateTime<Utc>) -> Option<PencePerKilowattHour> {
        self.rates.get(interval_end).copied()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;

    fn rate(valid_to: DateTime<Utc>, value: f64) -> RateReading {
        RateReading {
            value_inc_vat: PencePerKilowattHour(value),
            valid_from: valid_to - TimeDelta::minutes(30),
            valid_to,
        }
    }

    #[test]
    fn test_index_by_valid_to() {
        let first = Utc.with_ymd_and_hms(2023, 1, 1, 0, 30, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2023, 1, 1, 1, 0, 0).unwrap();
        let context = RateContext::new(Pence(48.0), [rate(second, 20.0), rate(first, 12.34)]);
        assert_eq!(context.len(), 2);
        assert_eq!(context.get(&first), Some(PencePerKilowattHour(12.34)));
        assert_eq!(context.get(&second), Some(PencePerKilowattHour(20.0)));
        assert_eq!(context.get(&(second + TimeDelta::minutes(30))), None);
    }

    #[test]
    fn test_standing_charge_per_interval() {
        assert_eq!(RateContext::new(Pence(48.0), []).standing_charge(), Pence(1.0));
        assert_eq!(RateContext::new(Pence(24.0), []).standing_charge(), Pence(0.5));
    }

    #[test]
    fn test_empty() {
        assert!(RateContext::empty().is_empty());
        assert!(RateContext::new(Pence(48.0), []).is_empty());
    }
}
