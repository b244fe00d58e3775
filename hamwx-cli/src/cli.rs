use std::{
    io::stdout,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use hamwx_core::{
    ConfigStore, Dashboard, GeoNamesStates, Settings, UnitSystem,
    config::default_postal_data_path,
    provider::{hamqsl::HamQslClient, openweather::OpenWeatherClient, provider_from_settings},
    refresh,
};
use inquire::{Select, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "hamwx", version, about = "Local weather, alerts and HF band conditions")]
pub struct Cli {
    /// Settings file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// GeoNames `US.txt` postal dump used to show state names.
    #[arg(long, global = true)]
    pub postal_data: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set zip code, units and API key interactively.
    Configure,

    /// Fetch everything once and print it. Default when no command is given.
    Show {
        #[arg(long, value_enum, default_value_t = Section::All)]
        section: Section,
    },

    /// Refresh on an interval until interrupted.
    Watch {
        /// Seconds between refreshes.
        #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,

        #[arg(long, value_enum, default_value_t = Section::All)]
        section: Section,
    },

    /// Download a condition icon (e.g. `10d`) as PNG.
    Icon {
        icon_id: String,

        #[arg(long, short)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    All,
    Current,
    Forecast,
    Alerts,
    Solar,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Cli { config, postal_data, plain, command } = self;

        let store = match config {
            Some(path) => ConfigStore::new(path),
            None => ConfigStore::at_default_location()?,
        };

        match command.unwrap_or(Command::Show { section: Section::All }) {
            Command::Configure => {
                let current = store.load()?.unwrap_or_default();
                let settings = prompt_settings(&current)?;
                store
                    .save(&settings)
                    .with_context(|| format!("Failed to save {}", store.path().display()))?;
                println!("Settings have been updated!");
            }
            Command::Show { section } => {
                let settings = load_or_configure(&store)?;
                let states = load_states(postal_data.as_deref())?;
                let weather = provider_from_settings(&settings);
                let solar = HamQslClient::new();

                let mut board = Dashboard::default();
                let warnings = board.apply(refresh(&settings, weather.as_ref(), &solar, &states).await);

                render::dashboard(&board, settings.units, section, render::painter(plain).as_ref());
                render::warnings(&warnings);
            }
            Command::Watch { interval, section } => {
                let settings = load_or_configure(&store)?;
                let states = load_states(postal_data.as_deref())?;
                let weather = provider_from_settings(&settings);
                let solar = HamQslClient::new();
                let painter = render::painter(plain);

                let mut board = Dashboard::default();
                let shutdown = async {
                    if let Err(err) = tokio::signal::ctrl_c().await {
                        tracing::error!(error = %err, "cannot listen for Ctrl-C");
                        std::future::pending::<()>().await;
                    }
                };

                watch(
                    Duration::from_secs(interval),
                    shutdown,
                    || refresh(&settings, weather.as_ref(), &solar, &states),
                    |update| {
                        let warnings = board.apply(update);
                        execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
                        render::dashboard(&board, settings.units, section, painter.as_ref());
                        println!();
                        println!("Last updated {}", chrono::Local::now().format("%H:%M:%S"));
                        render::warnings(&warnings);
                        Ok(())
                    },
                )
                .await?;
                tracing::debug!("interrupted, leaving watch mode");
            }
            Command::Icon { icon_id, output } => {
                let api_key = store.load()?.map(|s| s.api_key).unwrap_or_default();
                let client = OpenWeatherClient::new(api_key);

                let bytes = client
                    .fetch_icon(&icon_id)
                    .await
                    .with_context(|| format!("Failed to get weather icon {icon_id}"))?;
                std::fs::write(&output, bytes)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                println!("Saved {icon_id} to {}", output.display());
            }
        }

        Ok(())
    }
}

/// Run `fetch` every `every` and hand each result to `show` until `shutdown`
/// resolves. A fetch still in flight when `shutdown` fires is dropped.
async fn watch<T, F, Fut, S>(
    every: Duration,
    shutdown: S,
    mut fetch: F,
    mut show: impl FnMut(T) -> anyhow::Result<()>,
) -> anyhow::Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = T>,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(every);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => return Ok(()),
            _ = ticker.tick() => {}
        }
        tokio::select! {
            biased;
            _ = &mut shutdown => return Ok(()),
            update = fetch() => show(update)?,
        }
    }
}

fn load_states(postal_data: Option<&Path>) -> anyhow::Result<GeoNamesStates> {
    let path = match postal_data {
        Some(p) => p.to_path_buf(),
        None => default_postal_data_path()?,
    };
    Ok(GeoNamesStates::from_file_or_empty(&path))
}

/// First run: there is no settings file yet, so ask before fetching anything.
fn load_or_configure(store: &ConfigStore) -> anyhow::Result<Settings> {
    if let Some(settings) = store
        .load()
        .with_context(|| format!("Failed to read {}", store.path().display()))?
    {
        return Ok(settings);
    }

    println!("No settings found at {}.", store.path().display());
    let settings = prompt_settings(&Settings::default())?;
    store
        .save(&settings)
        .with_context(|| format!("Failed to save {}", store.path().display()))?;
    println!("Settings have been updated!");
    Ok(settings)
}

fn prompt_settings(current: &Settings) -> anyhow::Result<Settings> {
    let zip_code = Text::new("Zip code:").with_initial_value(&current.zip_code).prompt()?;

    let options = vec!["Celsius", "Fahrenheit"];
    let cursor = match current.units {
        UnitSystem::Metric => 0,
        UnitSystem::Imperial => 1,
    };
    let choice = Select::new("Units:", options).with_starting_cursor(cursor).prompt()?;
    let units = UnitSystem::try_from(choice)?;

    let api_key = Text::new("OpenWeather API key:")
        .with_initial_value(&current.api_key)
        .prompt()?;

    Ok(Settings { zip_code: zip_code.trim().to_string(), units, api_key: api_key.trim().to_string() })
}
