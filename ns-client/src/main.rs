//! Command-line client for the NS web service.
//!
//! Prints each resource as JSON on stdout. With `--fixtures <DIR>` the
//! commands are answered from XML files instead of the live service.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ns_client::api::{NsApi, TripQuery};
use ns_client::ns::{DEFAULT_BASE_URL, FixtureGateway, Gateway, NsConfig};

#[derive(Parser)]
#[command(name = "ns-client")]
#[command(about = "Query the NS (Dutch railways) web service", long_about = None)]
struct Cli {
    /// NS API username
    #[arg(long, env = "NS_USERNAME")]
    username: Option<String>,

    /// NS API password
    #[arg(long, env = "NS_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Base URL of the web service
    #[arg(long, env = "NS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Serve responses from XML files in this directory instead
    #[arg(long, value_name = "DIR")]
    fixtures: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Departure board for a station
    Departures {
        /// Station code or name
        station: String,
    },
    /// List stations
    Stations {
        /// Only stations known by this code, name or synonym
        #[arg(long)]
        name: Option<String>,
    },
    /// Planned and unplanned disruptions
    Disruptions {
        /// Only current disruptions
        #[arg(long)]
        actual: bool,

        /// Restrict to one station
        #[arg(long)]
        station: Option<String>,

        /// Only unplanned (true) or planned (false) disruptions
        #[arg(long)]
        unplanned: Option<bool>,
    },
    /// Fares between two stations
    Fares {
        from: String,
        to: String,

        #[arg(long)]
        via: Option<String>,

        /// Travel date as DDMMYYYY
        #[arg(long)]
        date: Option<String>,
    },
    /// Journey planner recommendations
    Trips {
        from: String,
        to: String,

        #[arg(long)]
        via: Option<String>,

        /// Number of earlier options
        #[arg(long)]
        previous: Option<u32>,

        /// Number of later options
        #[arg(long)]
        next: Option<u32>,

        /// Departure time, e.g. 2021-03-05T09:05
        #[arg(long, value_parser = parse_date_time)]
        depart: Option<NaiveDateTime>,

        /// Arrival time
        #[arg(long, value_parser = parse_date_time, conflicts_with = "depart")]
        arrive: Option<NaiveDateTime>,

        /// Allow high-speed services
        #[arg(long)]
        hsl: Option<bool>,

        /// Traveller holds a year card
        #[arg(long)]
        year_card: Option<bool>,
    },
}

fn parse_date_time(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM: {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if let Some(dir) = &cli.fixtures {
        info!(dir = %dir.display(), "using fixture responses");
        let gateway = FixtureGateway::from_dir(dir)?;
        let api = NsApi::connect(gateway).await?;
        return run(&api, cli.command).await;
    }

    let (Some(username), Some(password)) = (cli.username, cli.password) else {
        bail!("NS_USERNAME and NS_PASSWORD (or --username/--password) are required");
    };
    let config = NsConfig::new(username, password)
        .with_base_url(cli.base_url)
        .with_timeout(cli.timeout);
    let api = NsApi::login(config)
        .await
        .context("could not log in to the NS web service")?;
    run(&api, cli.command).await
}

async fn run<G: Gateway>(api: &NsApi<G>, command: Commands) -> Result<()> {
    match command {
        Commands::Departures { station } => print_json(&api.departures(&station).await?),
        Commands::Stations { name } => {
            let mut stations = api.stations().await?;
            if let Some(name) = name {
                stations.retain(|_, station| station.is_known_as(&name));
            }
            print_json(&stations)
        }
        Commands::Disruptions {
            actual,
            station,
            unplanned,
        } => print_json(
            &api
                .disruptions(actual, station.as_deref(), unplanned)
                .await?,
        ),
        Commands::Fares {
            from,
            to,
            via,
            date,
        } => print_json(
            &api
                .fares(&from, &to, via.as_deref(), date.as_deref())
                .await?,
        ),
        Commands::Trips {
            from,
            to,
            via,
            previous,
            next,
            depart,
            arrive,
            hsl,
            year_card,
        } => {
            let mut query = TripQuery::new(from, to);
            if let Some(via) = via {
                query = query.via(via);
            }
            if let Some(n) = previous {
                query = query.previous_advices(n);
            }
            if let Some(n) = next {
                query = query.next_advices(n);
            }
            if let Some(time) = depart {
                query = query.depart_at(time);
            }
            if let Some(time) = arrive {
                query = query.arrive_by(time);
            }
            if let Some(allowed) = hsl {
                query = query.highspeed_allowed(allowed);
            }
            if let Some(has_card) = year_card {
                query = query.year_card(has_card);
            }
            print_json(&api.trip_recommendations(&query).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_trip_times() {
        let cli = Cli::try_parse_from([
            "ns-client",
            "--fixtures",
            "data/fixtures",
            "trips",
            "ut",
            "gvc",
            "--depart",
            "2021-03-05T09:05",
            "--hsl",
            "false",
        ])
        .unwrap();
        match cli.command {
            Commands::Trips { depart, hsl, .. } => {
                assert_eq!(depart.unwrap().to_string(), "2021-03-05 09:05:00");
                assert_eq!(hsl, Some(false));
            }
            _ => panic!("expected trips command"),
        }
    }

    #[test]
    fn rejects_bad_trip_time() {
        let result = Cli::try_parse_from(["ns-client", "trips", "ut", "gvc", "--depart", "09:05"]);
        assert!(result.is_err());
    }
}
