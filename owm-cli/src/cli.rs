use std::{io::Write, sync::Arc, time::Duration};

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use owm_core::{
    AirPollutionRequest, CallContext, CancelToken, Client, Config, DirectGeocodingRequest,
    Exclude, FindRequest, Lang, OneCallRequest, ReverseGeocodingRequest, TracingObserver, Units,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "owm", version, about = "OpenWeatherMap command-line client")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// API key; overrides the one stored by `owm configure`.
    #[arg(short = 'a', long, env = "OWM_API_KEY", hide_env_values = true, global = true)]
    pub app_id: Option<String>,

    /// Log the masked request URL and the raw response body to stderr.
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Print the decoded answer as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Per-call deadline in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default units/language in the config file.
    Configure,

    /// Current conditions and forecast for a coordinate (One Call).
    Weather {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Blocks to leave out: current, minutely, hourly, daily, alerts.
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// standard, metric or imperial.
        #[arg(long)]
        units: Option<String>,

        /// Two-letter language code for descriptions.
        #[arg(long)]
        lang: Option<String>,
    },

    /// Air quality samples, current or over a period.
    AirPollution {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Period start as a UNIX timestamp.
        #[arg(long, requires = "end")]
        start: Option<i64>,

        /// Period end as a UNIX timestamp.
        #[arg(long, requires = "start")]
        end: Option<i64>,
    },

    /// Look up coordinates by place name, or place names by coordinate.
    Geocode {
        #[arg(long, required_unless_present = "reverse", conflicts_with = "reverse")]
        city: Option<String>,

        #[arg(long, requires = "city")]
        state: Option<String>,

        /// ISO 3166 country code.
        #[arg(long, requires = "city")]
        country: Option<String>,

        #[arg(long, requires_all = ["lat", "lon"])]
        reverse: bool,

        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Maximum number of results; 0 uses the service default.
        #[arg(long, default_value_t = 0)]
        limit: u32,
    },

    /// Search cities by name.
    Find {
        #[arg(long)]
        query: String,

        #[arg(long)]
        units: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let Cli { global, command } = self;

        match command {
            Command::Configure => configure(),

            Command::Weather {
                lat,
                lon,
                exclude,
                units,
                lang,
            } => {
                let Session { config, client, ctx } = Session::open(&global)?;
                let units = resolve_units(units.as_deref(), &config)?;
                let lang = lang.map(Lang::new).or_else(|| config.lang());

                let exclude = exclude
                    .iter()
                    .filter(|s| !s.trim().is_empty())
                    .map(|s| Exclude::try_from(s.as_str()))
                    .collect::<Result<Vec<_>>>()?;

                let mut request = OneCallRequest::new(lat, lon).exclude(exclude);
                if let Some(units) = units {
                    request = request.units(units);
                }
                if let Some(lang) = lang {
                    if !lang.is_known() {
                        warn!(lang = %lang, "language code is not in the documented list");
                    }
                    request = request.lang(lang);
                }

                let report = client.one_call(&request, &ctx).await?;
                emit(global.json, &report, |out| render::weather(out, &report, units))
            }

            Command::AirPollution {
                lat,
                lon,
                start,
                end,
            } => {
                let Session { client, ctx, .. } = Session::open(&global)?;
                let mut request = AirPollutionRequest::new(lat, lon);
                if let (Some(start), Some(end)) = (start, end) {
                    let (start, end) = (timestamp(start)?, timestamp(end)?);
                    if end < start {
                        bail!("--end ({end}) is before --start ({start})");
                    }
                    request = request.between(start, end);
                }

                let report = client.air_pollution(&request, &ctx).await?;
                emit(global.json, &report, |out| render::air_pollution(out, &report))
            }

            Command::Geocode {
                city,
                state,
                country,
                reverse,
                lat,
                lon,
                limit,
            } => {
                let Session { client, ctx, .. } = Session::open(&global)?;
                let places = if reverse {
                    let (Some(lat), Some(lon)) = (lat, lon) else {
                        bail!("--reverse needs both --lat and --lon");
                    };
                    let request = ReverseGeocodingRequest::new(lat, lon).limit(limit);
                    client.reverse_geocoding(&request, &ctx).await?
                } else {
                    let city = city.ok_or_else(|| anyhow!("--city is required"))?;
                    let mut request = DirectGeocodingRequest::new(city).limit(limit);
                    if let Some(state) = state {
                        request = request.state(state);
                    }
                    if let Some(country) = country {
                        request = request.country_code(country);
                    }
                    client.direct_geocoding(&request, &ctx).await?
                };

                emit(global.json, &places, |out| render::places(out, &places))
            }

            Command::Find { query, units } => {
                let Session { config, client, ctx } = Session::open(&global)?;
                let units = resolve_units(units.as_deref(), &config)?;
                let mut request = FindRequest::new(query);
                if let Some(units) = units {
                    request = request.units(units);
                }

                let report = client.find(&request, &ctx).await?;
                emit(global.json, &report, |out| render::find(out, &report, units))
            }
        }
    }
}

/// Everything a query command needs: stored defaults, a client and the call context.
struct Session {
    config: Config,
    client: Client,
    ctx: CallContext,
}

impl Session {
    fn open(global: &GlobalArgs) -> Result<Self> {
        let config = Config::load()?;
        let client = config.client(global.app_id.as_deref())?;
        let ctx = call_context(global, &config);
        Ok(Self {
            config,
            client,
            ctx,
        })
    }
}

fn call_context(global: &GlobalArgs, config: &Config) -> CallContext {
    let mut ctx = CallContext::new().with_cancel(cancel_on_ctrl_c());

    let timeout = global
        .timeout
        .filter(|s| *s > 0)
        .map(Duration::from_secs)
        .or_else(|| config.timeout());
    if let Some(timeout) = timeout {
        ctx = ctx.with_timeout(timeout);
    }

    if global.debug {
        ctx = ctx.with_observer(Arc::new(TracingObserver));
    }

    ctx
}

fn cancel_on_ctrl_c() -> CancelToken {
    let token = CancelToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, cancelling");
            trigger.cancel();
        }
    });
    token
}

fn resolve_units(flag: Option<&str>, config: &Config) -> Result<Option<Units>> {
    match flag {
        Some(raw) => Ok(Some(Units::try_from(raw)?)),
        None => config.units(),
    }
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| anyhow!("timestamp out of range: {secs}"))
}

/// Write the answer to stdout, either as pretty JSON or through `text`.
fn emit<T, F>(json: bool, value: &T, text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
{
    let mut buf = Vec::new();
    if json {
        serde_json::to_writer_pretty(&mut buf, value).context("Failed to encode output as JSON")?;
        buf.push(b'\n');
    } else {
        text(&mut buf).context("Failed to render output")?;
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&buf).context("Failed to write to stdout")?;
    stdout.flush().context("Failed to write to stdout")?;
    Ok(())
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }
    config.set_api_key(api_key);

    let units = Select::new("Default units:", Units::all().to_vec())
        .prompt()
        .context("Failed to read default units")?;
    config.set_units(units);

    let current_lang = config.lang().unwrap_or_default();
    let lang = Text::new("Default language:")
        .with_default(current_lang.as_str())
        .prompt()
        .context("Failed to read default language")?;
    let lang = Lang::new(lang);
    if !lang.is_known() {
        warn!(lang = %lang, "language code is not in the documented list");
    }
    config.default_lang = Some(lang.as_str().to_string());

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}
