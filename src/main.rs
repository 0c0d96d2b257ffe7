mod cli;

use std::io::{BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use skycast_core::{Config, ViewState};
use skycast_ui::render::{
    query_date_now, render_dashboard, render_locations, render_raw, render_report,
};
use skycast_ui::{AppServices, DashboardModel};

use cli::{Cli, Commands, ConfigCommands};

/// Used when the request timeout is disabled.
const UNBOUNDED_WAIT: Duration = Duration::from_secs(24 * 60 * 60);

fn main() -> Result<ExitCode> {
    skycast_core::init()?;

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Config { command } => run_config(command, config_path),
        Commands::Parse {
            file,
            fallback,
            json,
        } => {
            let config = load_config(config_path, cli.api_url)?;
            run_parse(&config, file.as_deref(), &fallback, json)
        }
        Commands::Locations => {
            let config = load_config(config_path, cli.api_url)?;
            run_locations(config)
        }
        Commands::Show {
            location,
            json,
            no_raw,
        } => {
            let mut config = load_config(config_path, cli.api_url)?;
            if no_raw {
                config.ui.show_raw = false;
            }
            run_show(config, location, json)
        }
        Commands::Interactive => {
            let config = load_config(config_path, cli.api_url)?;
            run_interactive(config)
        }
    }
}

fn load_config(path: Option<&Path>, api_url: Option<String>) -> Result<Config> {
    let (mut config, _) = Config::load_validated(path)?;
    if let Some(url) = api_url {
        config.api.base_url = url;
    }
    Ok(config)
}

fn settle_budget(config: &Config) -> Duration {
    config
        .api
        .request_timeout()
        .map(|t| t.saturating_add(Duration::from_secs(5)))
        .unwrap_or(UNBOUNDED_WAIT)
}

fn dashboard(config: Config) -> Result<(DashboardModel, Duration)> {
    let budget = settle_budget(&config);
    let services = AppServices::new(config).context("Failed to start services")?;
    Ok((DashboardModel::new(Arc::new(services)), budget))
}

fn run_locations(config: Config) -> Result<ExitCode> {
    let (mut model, budget) = dashboard(config)?;
    model.load();
    if !model.wait_until_settled(budget) {
        anyhow::bail!("Timed out waiting for the location list");
    }

    print!("{}", render_locations(model.locations()));
    model.shutdown();
    Ok(ExitCode::SUCCESS)
}

fn run_show(config: Config, location: String, json: bool) -> Result<ExitCode> {
    let (mut model, budget) = dashboard(config)?;
    model.set_input(location);
    if model.search().is_some() && !model.wait_until_settled(budget) {
        anyhow::bail!("Timed out waiting for weather data");
    }

    let code = match (model.state(), model.report()) {
        (ViewState::Displaying, Some(report)) if json => {
            println!("{}", serde_json::to_string_pretty(report)?);
            ExitCode::SUCCESS
        }
        (ViewState::Displaying, _) => {
            print!("{}", render_dashboard(&model));
            ExitCode::SUCCESS
        }
        _ => {
            eprint!("{}", render_dashboard(&model));
            ExitCode::FAILURE
        }
    };

    model.shutdown();
    Ok(code)
}

fn run_parse(
    config: &Config,
    file: Option<&Path>,
    fallback: &str,
    json: bool,
) -> Result<ExitCode> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read report from stdin")?;
            buf
        }
    };

    let report = skycast_weather::parse_report(&raw, fallback);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    print!("{}", render_report(&report, &query_date_now(&config.ui.date_format)));
    if config.ui.show_raw {
        println!();
        print!("{}", render_raw(&raw));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_interactive(config: Config) -> Result<ExitCode> {
    let default_location = config
        .ui
        .default_location
        .clone()
        .filter(|l| !l.trim().is_empty());
    let (mut model, budget) = dashboard(config)?;

    model.load();
    if let Some(location) = default_location {
        model.set_input(location);
        model.search();
    }
    model.wait_until_settled(budget);

    print!("{}", render_locations(model.locations()));
    println!();
    print!("{}", render_dashboard(&model));

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("\nLocation (number or name, q to quit): ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("Failed to read input")?;
        let input = line.trim();

        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        let index = match input.parse::<usize>() {
            Ok(n) if (1..=model.locations().len()).contains(&n) => Some(n - 1),
            _ => None,
        };
        if let Some(index) = index {
            model.select_location(index);
        } else {
            model.set_input(input);
            model.search();
        }

        if model.is_busy() {
            println!("{}", render_dashboard(&model).trim_end());
        }
        if !model.wait_until_settled(budget) {
            tracing::warn!("Request still running after {:?}", budget);
        }
        println!();
        print!("{}", render_dashboard(&model));
    }

    tracing::info!("Shutting down");
    model.shutdown();
    Ok(ExitCode::SUCCESS)
}

fn run_config(command: ConfigCommands, path: Option<&Path>) -> Result<ExitCode> {
    let path: PathBuf = match path {
        Some(p) => p.to_path_buf(),
        None => Config::config_path()?,
    };

    match command {
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file {} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save_to(&path)?;
            println!("Wrote {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        ConfigCommands::Show => {
            let config = read_config(&path)?;
            println!("# {}", path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(ExitCode::SUCCESS)
        }
        ConfigCommands::Validate => {
            let config = read_config(&path)?;
            let validation = config.validate();
            for warning in &validation.warnings {
                println!("warning: {}", warning);
            }
            for error in &validation.errors {
                println!("error: {}", error);
            }
            if validation.is_valid() {
                println!("{} is valid", path.display());
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::load_from(path)
    } else {
        tracing::info!("No config at {}, showing defaults", path.display());
        Ok(Config::default())
    }
}
