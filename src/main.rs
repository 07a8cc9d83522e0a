use anyhow::{Context, Result};
use clap::Parser;
use mcqdesk::app::App;
use mcqdesk::cli::{print_error, Cli};
use mcqdesk::config::Config;
use mcqdesk::styles::{init_theme, ThemeType};
use mcqdesk::utils::{get_config_path, get_log_dir};
use tracing::info;

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal state before handling panic
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    setup_panic_hook();

    let cli = Cli::parse();

    // Set up logging directory
    let log_dir = get_log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", log_dir))?;
    let log_file = log_dir.join("mcqdesk.log");

    // Initialize tracing with file logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(&log_dir, "mcqdesk.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false) // Disable ANSI colors in file
        .init();

    let config_path = get_config_path();
    let mut config =
        Config::load_or_create(&config_path).context("Failed to load configuration")?;
    if let Some(url) = cli.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
        config.api_base_url = url.trim().to_string();
    }

    if cli.command.is_some() {
        let result = cli.execute(config);
        drop(guard);
        if let Err(e) = result {
            print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
        return Ok(());
    }

    let no_color = cli.no_colors || std::env::var_os("NO_COLOR").is_some();
    let theme_type = if no_color {
        ThemeType::NoColor
    } else {
        config.theme.parse().unwrap_or_default()
    };
    init_theme(theme_type);

    // Print log location before TUI starts (this will be visible briefly)
    eprintln!("Logs are being written to: {:?}", log_file);
    eprintln!("View logs in real-time: tail -f {:?}", log_file);
    info!("Starting mcqdesk {}", env!("CARGO_PKG_VERSION"));

    let mut app = App::new(config, cli.view.unwrap_or_default())?;
    let result = app.run();

    // Restore terminal state on normal exit
    // (panic hook handles panics)
    drop(app);
    drop(guard);

    result
}
