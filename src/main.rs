use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;
use topic_bar::config::AppConfig;
use topic_bar::sources::{ReplaySourceConfig, SourceConfig, TestMode, TestSourceConfig};
use topic_bar::{displayers, sources};
use topic_bar_core::{BarOrientation, BarSettings, BarWidget, SettingsUpdate};

/// topic-bar - show one telemetry value as a live bar
#[derive(Parser, Debug, Clone)]
#[command(name = "topic-bar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Selector in channel or channel.field.path form (e.g. /imu.temperature)
    #[arg(short = 't', long = "topic-field", value_name = "SELECTOR")]
    topic_field: Option<String>,

    /// Value shown as an empty bar
    #[arg(long = "min", value_name = "VALUE", allow_hyphen_values = true)]
    min: Option<f64>,

    /// Value shown as a full bar
    #[arg(long = "max", value_name = "VALUE", allow_hyphen_values = true)]
    max: Option<f64>,

    /// Bar color as hex (e.g. #00ff00)
    #[arg(long = "color", value_name = "HEX")]
    color: Option<String>,

    /// Draw a vertical bar
    #[arg(long = "vertical")]
    vertical: bool,

    /// Replay message events from a JSON-lines file
    #[arg(short = 'r', long = "replay", value_name = "FILE", conflicts_with = "test")]
    replay: Option<PathBuf>,

    /// Events per frame when replaying
    #[arg(short = 'b', long = "batch", value_name = "N", requires = "replay")]
    batch: Option<usize>,

    /// Use the synthetic test source with the given waveform
    #[arg(long = "test", value_name = "MODE", value_parser = parse_test_mode)]
    test: Option<TestMode>,

    /// Stop after this many frames
    #[arg(short = 'n', long = "frames", value_name = "N")]
    frames: Option<u64>,

    /// Do not wait between frames
    #[arg(long = "fast")]
    fast: bool,

    /// Disable ANSI colors
    #[arg(long = "no-color")]
    no_color: bool,

    /// List known topics, selector suggestions and built-ins, then exit
    #[arg(short = 'l', long = "list")]
    list_topics: bool,

    /// Save the effective configuration before exiting
    #[arg(short = 's', long = "save")]
    save: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

fn parse_test_mode(s: &str) -> Result<TestMode, String> {
    serde_json::from_value(serde_json::Value::String(s.replace('-', "_"))).map_err(|_| {
        format!(
            "Unknown test mode: {} (expected manual, sine-wave, sawtooth, triangle or square)",
            s
        )
    })
}

/// Settings changes requested on the command line, applied after load
fn cli_updates(cli: &Cli) -> Vec<SettingsUpdate> {
    let mut updates = Vec::new();
    if let Some(topic_field) = &cli.topic_field {
        updates.push(SettingsUpdate::TopicField(topic_field.clone()));
    }
    if let Some(min) = cli.min {
        updates.push(SettingsUpdate::MinValue(min));
    }
    if let Some(max) = cli.max {
        updates.push(SettingsUpdate::MaxValue(max));
    }
    if let Some(color) = &cli.color {
        updates.push(SettingsUpdate::BarColor(color.clone()));
    }
    if cli.vertical {
        updates.push(SettingsUpdate::Orientation(BarOrientation::Vertical));
    }
    updates
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {:#}", e);
            AppConfig::default()
        }),
    };

    for update in cli_updates(cli) {
        update.apply(&mut config.panel);
    }

    if let Some(path) = &cli.replay {
        let previous = match &config.source {
            SourceConfig::Replay(cfg) => cfg.clone(),
            _ => ReplaySourceConfig::default(),
        };
        config.source = SourceConfig::Replay(ReplaySourceConfig {
            path: Some(path.clone()),
            batch_size: cli.batch.unwrap_or(previous.batch_size),
            ..previous
        });
    } else if let Some(mode) = cli.test {
        let mut test = match &config.source {
            SourceConfig::Test(cfg) => cfg.clone(),
            _ => TestSourceConfig::default(),
        };
        test.mode = mode;
        // Point an unset selector at the generated channel
        if config.panel.topic_field.is_empty() {
            config.panel.topic_field = test.channel.clone();
        }
        config.source = SourceConfig::Test(test);
    }

    if cli.no_color {
        config.display.color = false;
    }
    Ok(config)
}

fn save_config(cli: &Cli, config: &AppConfig) -> Result<()> {
    match &cli.config {
        Some(path) => config.save_to_path(path)?,
        None => config.save()?,
    }
    info!("Configuration saved");
    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace (per-message extraction)
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting topic-bar v{}", env!("CARGO_PKG_VERSION"));

    // Register all built-in sources and displayers
    sources::register_all();
    displayers::register_all();

    let mut config = load_config(&cli)?;
    let mut source = sources::create_source(&config.source)?;
    let mut displayer = displayers::create_displayer(&config.display.displayer)
        .with_context(|| format!("Cannot display with {:?}", config.display.displayer))?;
    displayer.apply_config(&serde_json::to_value(&config.display)?)?;

    if cli.list_topics {
        let topics = source.topics();
        println!("Known topics ({}):", topics.len());
        for topic in &topics {
            println!("  {}", topic.name);
        }
        println!();
        println!("Selector suggestions:");
        for suggestion in topic_bar_core::selector_suggestions(&topics) {
            println!("  {}", suggestion);
        }
        if let Ok(registry) = topic_bar_core::global_registry().read() {
            println!();
            println!("Sources: {}", registry.list_sources().join(", "));
            println!("Displayers: {}", registry.list_displayers().join(", "));
        }
        return Ok(());
    }

    let settings: BarSettings = config.panel.clone();
    let mut widget = BarWidget::new(settings, source.as_mut());
    if widget.selector().is_unset() {
        warn!("No topic field configured; the bar will stay empty (use --topic-field)");
    }

    let interval = if cli.fast {
        Duration::ZERO
    } else {
        Duration::from_millis(config.source.update_interval_ms())
    };

    let mut frames = 0u64;
    while let Some(frame) = source.next_frame()? {
        let done = widget.render(&frame);

        displayer.update_view(&widget.view());
        if displayer.needs_redraw() {
            println!("{}", displayer.draw(config.display.width, config.display.height)?);
        }

        frames = done.acknowledge();
        if cli.frames.is_some_and(|limit| frames >= limit) {
            break;
        }
        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }
    info!("Rendered {} frames", frames);

    if cli.save {
        config.panel = widget.settings().clone();
        save_config(&cli, &config)?;
    }
    Ok(())
}
