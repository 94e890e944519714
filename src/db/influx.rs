//! InfluxDB 1.x writer.

use std::time::Duration;

use influxdb::{Client, Timestamp, WriteQuery};

use crate::{
    config::InfluxDbConfig,
    core::point::Point,
    db::WritePoints,
    error::WriteError,
    prelude::*,
};

pub struct InfluxDb {
    client: Client,
    timeout: Duration,
}

impl InfluxDb {
    pub fn new(config: &InfluxDbConfig) -> Self {
        let client =
            Client::new(format!("http://{}:{}", config.host, config.port), &config.database);
        let client = if config.user.is_empty() {
            client
        } else {
            client.with_auth(&config.user, &config.password)
        };
        Self { client, timeout: config.timeout }
    }
}

impl WritePoints for InfluxDb {
    /// Send all the points in a single request: a run is either written completely or not at all.
    #[instrument(
        skip_all,
        fields(database = self.client.database_name(), n_points = points.len()),
    )]
    async fn write_points(&self, points: &[Point]) -> Result<(), WriteError> {
        if points.is_empty() {
            return Ok(());
        }
        let queries = points.iter().map(to_write_query).collect::<Result<Vec<_>, _>>()?;
        tokio::time::timeout(self.timeout, self.client.query(queries))
            .await
            .map_err(|_| WriteError::Timeout(self.timeout))??;
        info!("written");
        Ok(())
    }
}

fn to_write_query(point: &Point) -> Result<WriteQuery, WriteError> {
    let timestamp =
        u128::try_from(point.time.timestamp()).map_err(|_| WriteError::BeforeEpoch(point.time))?;
    let query = WriteQuery::new(Timestamp::Seconds(timestamp), point.measurement.as_str());
    let query =
        point.tags.iter().fold(query, |query, (key, value)| query.add_tag(*key, value.as_str()));
    Ok(point.fields.iter().fold(query, |query, (key, value)| query.add_field(*key, *value)))
}
