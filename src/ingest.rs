//! A single ingestion run: fetch, join, store.

use crate::{
    api::{client::Transport, octopus::Api},
    config::Config,
    core::{point::Point, rates::RateContext, transform::transform},
    db::WritePoints,
    period::Period,
    prelude::*,
};

pub const MEASUREMENT: &str = "electricity";

/// Fetch the consumption and the unit rates, and join them into points.
#[instrument(skip_all, fields(period = %period))]
pub fn collect_points<T: Transport>(
    api: &Api<T>,
    config: &Config,
    period: &Period,
) -> Result<Vec<Point>> {
    let electricity = &config.electricity;

    let readings = api
        .get_consumption(
            &config.octopus.base_url,
            &electricity.mpan,
            &electricity.serial_number,
            period,
        )
        .context("failed to fetch the consumption")?;

    let rates = if let Some(agile_rate_url) = &electricity.agile_rate_url {
        let rates =
            api.get_unit_rates(agile_rate_url, period).context("failed to fetch the unit rates")?;
        RateContext::new(electricity.agile_standing_charge, rates)
    } else {
        warn!("no Agile rate URL, the costs will not be calculated");
        RateContext::empty()
    };

    let points = transform(MEASUREMENT, &readings, &rates, electricity.timezone)
        .context("failed to join the consumption with the rates")?;
    info!(n_points = points.len(), n_rates = rates.len(), "joined");
    Ok(points)
}

/// Write the points at once, skipping the write altogether when there is nothing to write.
#[allow(clippy::future_not_send)]
pub async fn store(db: &impl WritePoints, points: &[Point]) -> Result {
    if points.is_empty() {
        info!("nothing to write");
        return Ok(());
    }
    db.write_points(points).await.context("failed to write the points")
}
