mod bootstrap;

use anyhow::Result;
use bikeshare_core::settings::Settings;
use bikeshare_data::analysis::{analyze_dashboard, AnalysisOptions};
use bikeshare_data::reader::DataSources;
use bikeshare_ui::app::App;
use bikeshare_ui::report::render_report;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    let app_dir = bootstrap::ensure_directories()?;
    let log_file = settings
        .log_file
        .clone()
        .unwrap_or_else(|| bootstrap::default_log_path(&app_dir));
    bootstrap::setup_logging(&settings.log_level, &log_file)?;

    tracing::info!("Bike-sharing dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Tab: {}, Theme: {}, Bins: {}",
        settings.view,
        settings.tab,
        settings.theme,
        settings.bins
    );

    let sources = DataSources::new(settings.day_data.clone(), settings.hour_data.clone());
    let options = AnalysisOptions {
        bins: usize::from(settings.bins),
        head_rows: usize::from(settings.head_rows),
    };

    // A load failure ends the run before any UI is shown.
    let data = analyze_dashboard(&sources, options).inspect_err(|e| {
        tracing::error!("Failed to load datasets: {}", e);
    })?;

    if settings.is_report() {
        print!("{}", render_report(&data));
        return Ok(());
    }

    let app = App::new(&settings.theme, &settings.tab, data, options);

    // The loop exits on 'q' / Ctrl+C inside the TUI.  The OS-level signal is
    // also watched; dropping the app restores the terminal.
    tokio::select! {
        result = app.run() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down");
        }
    }

    tracing::info!("Dashboard closed");
    Ok(())
}
