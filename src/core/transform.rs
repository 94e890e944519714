use chrono_tz::Tz;

use crate::{
    api::octopus::ConsumptionReading,
    core::{point::Point, rates::RateContext},
    error::TransformError,
};

/// Join the readings with the rates into one point per reading, keeping the order.
///
/// The `rate`, `cost` and `total_cost` fields are set on every point when the
/// context has any rates, and on none otherwise.
pub fn transform(
    measurement: &str,
    readings: &[ConsumptionReading],
    rates: &RateContext,
    time_zone: Tz,
) -> Result<Vec<Point>, TransformError> {
    readings
        .iter()
        .map(|reading| -> Result<Point, TransformError> {
            let time_of_day = reading.interval_end.with_timezone(&time_zone).format("%H:%M");
            let point = Point::new(measurement, reading.interval_end)
                .with_tag("time_of_day", time_of_day.to_string())
                .with_field("consumption", reading.consumption);
            if rates.is_empty() {
                return Ok(point);
            }
            let rate = rates
                .get(&reading.interval_end)
                .ok_or(TransformError::MissingRate { interval_end: reading.interval_end })?;
            let cost = reading.consumption * rate;
            Ok(point
                .with_field("rate", rate)
                .with_field("cost", cost)
                .with_field("total_cost", cost + rates.standing_charge()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use chrono_tz::Europe::London;

    use super::*;
    use crate::{
        api::octopus::RateReading,
        prelude::*,
        quantity::{cost::Pence, energy::KilowattHours, rate::PencePerKilowattHour},
    };

    fn reading(interval_end: DateTime<Utc>, consumption: f64) -> ConsumptionReading {
        ConsumptionReading {
            consumption: KilowattHours(consumption),
            interval_start: interval_end - TimeDelta::minutes(30),
            interval_end,
        }
    }

    fn rate(valid_to: DateTime<Utc>, value: f64) -> RateReading {
        RateReading {
            value_inc_vat: PencePerKilowattHour(value),
            valid_from: valid_to - TimeDelta::minutes(30),
            valid_to,
        }
    }

    fn half_past_midnight() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, 1, 0, 30, 0).unwrap()
    }

    #[test]
    fn test_with_rates_ok() -> Result {
        let interval_end = half_past_midnight();
        let rates = RateContext::new(Pence(48.0), [rate(interval_end, 12.34)]);
        let points = transform("electricity", &[reading(interval_end, 0.5)], &rates, Tz::UTC)?;

        assert_eq!(points.len(), 1);
        let point = &points[0];
        assert_eq!(point.measurement, "electricity");
        assert_eq!(point.time, interval_end);
        assert_eq!(point.tags["time_of_day"], "00:30");
        assert_eq!(point.fields.len(), 4);
        assert_abs_diff_eq!(point.fields["consumption"], 0.5);
        assert_abs_diff_eq!(point.fields["rate"], 12.34, epsilon = 1e-9);
        assert_abs_diff_eq!(point.fields["cost"], 6.17, epsilon = 1e-9);
        assert_abs_diff_eq!(point.fields["total_cost"], 7.17, epsilon = 1e-9);

        let cost = point.fields["rate"] * point.fields["consumption"];
        assert_abs_diff_eq!(point.fields["cost"], cost);
        assert_abs_diff_eq!(point.fields["total_cost"], point.fields["cost"] + 1.0);
        Ok(())
    }

    #[test]
    fn test_without_rates_only_consumption() -> Result {
        let readings = [reading(half_past_midnight(), 0.5), reading(half_past_midnight(), 0.25)];
        let points = transform("electricity", &readings, &RateContext::empty(), Tz::UTC)?;
        assert_eq!(points.len(), 2);
        for point in points {
            assert_eq!(point.fields.keys().copied().collect::<Vec<_>>(), ["consumption"]);
        }
        Ok(())
    }

    #[test]
    fn test_order_preserved_without_deduplication() -> Result {
        let start = half_past_midnight();
        let ends = [start + TimeDelta::hours(1), start, start + TimeDelta::hours(1), start];
        let readings = ends.map(|end| reading(end, 0.1));
        let rates = RateContext::new(
            Pence::ZERO,
            [rate(start, 10.0), rate(start + TimeDelta::hours(1), 20.0)],
        );
        let points = transform("electricity", &readings, &rates, Tz::UTC)?;
        assert_eq!(points.iter().map(|point| point.time).collect::<Vec<_>>(), ends);
        assert_eq!(
            points.iter().map(|point| point.fields["rate"]).collect::<Vec<_>>(),
            [20.0, 10.0, 20.0, 10.0],
        );
        Ok(())
    }

    #[test]
    fn test_time_of_day_in_time_zone() -> Result {
        let interval_end = Utc.with_ymd_and_hms(2023, 6, 1, 16, 0, 0).unwrap();
        let points =
            transform("electricity", &[reading(interval_end, 1.0)], &RateContext::empty(), London)?;
        assert_eq!(points[0].tags["time_of_day"], "17:00");
        assert_eq!(points[0].time, interval_end);
        Ok(())
    }

    #[test]
    fn test_missing_rate_err() {
        let interval_end = half_past_midnight();
        let rates = RateContext::new(Pence(48.0), [rate(interval_end, 12.34)]);
        let next_interval_end = interval_end + TimeDelta::minutes(30);
        let readings = [reading(interval_end, 0.5), reading(next_interval_end, 0.5)];
        let result = transform("electricity", &readings, &rates, Tz::UTC);
        assert!(matches!(
            result,
            Err(TransformError::MissingRate { interval_end }) if interval_end == next_interval_end,
        ));
    }

    #[test]
    fn test_empty_readings() -> Result {
        let rates = RateContext::new(Pence(48.0), [rate(half_past_midnight(), 12.34)]);
        assert!(transform("electricity", &[], &rates, Tz::UTC)?.is_empty());
        Ok(())
    }
}
