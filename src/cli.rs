use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;

use crate::{
    api::octopus,
    config::Config,
    db::influx::InfluxDb,
    ingest::{collect_points, store},
    period::Period,
    prelude::*,
    tables::build_points_table,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// Configuration file.
    #[clap(
        long,
        env = "OCTOGRAPH_CONFIG_FILE",
        default_value = "octograph.toml",
        value_parser = parse_existing_path,
    )]
    pub config_file: PathBuf,

    /// Start of the period, for example: `yesterday midnight`, `2023-01-01`, or `3days ago`.
    #[clap(long, default_value = "yesterday midnight")]
    pub from_date: String,

    /// End of the period.
    #[clap(long, default_value = "tomorrow midnight")]
    pub to_date: String,

    /// Print the points instead of writing them into the database.
    #[clap(long)]
    pub dry_run: bool,
}

impl Args {
    pub async fn run(self) -> Result {
        let config = Config::load(&self.config_file).with_context(|| {
            format!("invalid configuration in `{}`", self.config_file.display())
        })?;
        let time_zone = config.electricity.timezone;
        let period = Period::resolve(&self.from_date, &self.to_date, time_zone, Utc::now())?;

        let settings = &config.octopus;
        let api = octopus::Api::new(&settings.api_key, settings.timeout, settings.max_pages);
        let points = collect_points(&api, &config, &period)?;

        if self.dry_run {
            println!("{}", build_points_table(&points, time_zone));
            Ok(())
        } else {
            store(&InfluxDb::new(&config.influxdb), &points).await
        }
    }
}

fn parse_existing_path(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);
    if path.exists() { Ok(path) } else { Err(format!("`{}` does not exist", path.display())) }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_verify_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_missing_config_file_err() {
        let result = Args::try_parse_from(["octograph", "--config-file", "does-not-exist.toml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_existing_config_file_ok() -> Result {
        let args = Args::try_parse_from(["octograph", "--config-file", "Cargo.toml", "--dry-run"])?;
        assert_eq!(args.from_date, "yesterday midnight");
        assert_eq!(args.to_date, "tomorrow midnight");
        assert!(args.dry_run);
        Ok(())
    }
}
