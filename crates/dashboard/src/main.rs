//! # Cluster
//!
//! Painel de instrumentos automotivo com GUI acelerada por GPU via
//! eframe/egui.
//!
//! Os valores vêm do simulador interno; com o override UDP habilitado, a
//! última mensagem JSON válida sobrescreve os campos que ela contém.
//!
//! ## Atalhos
//! - `F` / `F11`: Fullscreen
//! - `Q` / `Esc`: Sair

mod cli;
mod dashboard;
mod egui_canvas;

use clap::Parser;
use cli::Args;
use cluster_core::FrameAssembler;
use cluster_core::cluster::Cluster;
use cluster_core::config::AppConfig;
use cluster_core::override_source::NetworkOverrideSource;
use cluster_core::simulation::SimulationSource;
use dashboard::ClusterDashboard;
use tracing::{error, warn};

fn main() -> eframe::Result<()> {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    // ── Config ──
    let config_path = args.config_path();
    let mut config = AppConfig::load(&config_path);

    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("{e}");
        }
    }

    args.apply(&mut config);
    for problem in config.validate() {
        warn!("Configuração: {problem}");
    }

    // ── Motor ──
    let theme = config.theme();
    let profile = config.simulation_profile();
    let sim = match config.simulation.seed {
        Some(seed) => SimulationSource::with_seed(profile, seed),
        None => SimulationSource::new(profile),
    };

    let footer = if config.network.enabled {
        format!("UDP JSON em :{} • ESC para sair", config.network.port)
    } else {
        "Simulação • ESC para sair".to_string()
    };
    let cluster = Cluster::new(
        theme,
        config.display.width as f32,
        config.display.height as f32,
        &footer,
    );
    let mut frame = FrameAssembler::new(sim, cluster);

    if config.network.enabled {
        let source = NetworkOverrideSource::bind(&config.listen_addr())
            .and_then(|s| s.with_sender_filter(&config.network.sender_ip));
        match source {
            Ok(source) => frame = frame.with_override(Box::new(source)),
            Err(e) => {
                error!("{e}");
                std::process::exit(1);
            }
        }
    }

    // ── Janela eframe ──
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Painel de Instrumentos")
            .with_inner_size([config.display.width as f32, config.display.height as f32])
            .with_min_inner_size([320.0, 240.0])
            .with_fullscreen(config.display.fullscreen),
        ..Default::default()
    };

    eframe::run_native(
        "Painel de Instrumentos",
        options,
        Box::new(move |cc| Ok(Box::new(ClusterDashboard::new(cc, &config, frame)))),
    )
}
