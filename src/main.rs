use clap::Parser;
use eframe::egui;
use sun_dash::app::SunDashApp;
use sun_dash::config::{Cli, DashConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = DashConfig::resolve(&cli)?;
    log::info!("Reading sunspot data from {}", config.data_dir.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SunDash – Solar Activity",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can decode the solar JPEG.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(SunDashApp::new(cc, config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard: {e}"))
}
