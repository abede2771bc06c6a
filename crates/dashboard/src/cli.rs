//! Argumentos de linha de comando, aplicados por cima do `config.toml`.

use clap::{ArgAction, Parser, ValueHint};
use cluster_core::config::AppConfig;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "cluster", about = "Painel de instrumentos automotivo")]
pub struct Args {
    /// Caminho do config.toml (padrão: ao lado do executável)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub width: Option<u32>,
    #[arg(long)]
    pub height: Option<u32>,
    #[arg(long, action = ArgAction::SetTrue)]
    pub fullscreen: bool,
    #[arg(long)]
    pub fps: Option<u32>,
    /// Habilita o override UDP nesta porta
    #[arg(long)]
    pub udp_port: Option<u16>,
    /// Tema: classic ou retro
    #[arg(long)]
    pub theme: Option<String>,
    /// Semente do simulador
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(AppConfig::default_path)
    }

    /// Sobrescreve os campos informados na linha de comando.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(w) = self.width {
            config.display.width = w;
        }
        if let Some(h) = self.height {
            config.display.height = h;
        }
        if self.fullscreen {
            config.display.fullscreen = true;
        }
        if let Some(fps) = self.fps {
            config.display.fps = fps;
        }
        if let Some(port) = self.udp_port {
            config.network.enabled = true;
            config.network.port = port;
        }
        if let Some(theme) = &self.theme {
            config.display.theme = theme.clone();
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file_values() {
        let args = Args::try_parse_from([
            "cluster",
            "--width",
            "800",
            "--udp-port",
            "5010",
            "--theme",
            "retro",
        ])
        .unwrap();
        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config.display.width, 800);
        assert_eq!(config.display.height, 720);
        assert!(config.network.enabled);
        assert_eq!(config.network.port, 5010);
        assert_eq!(config.display.theme, "retro");
        assert!(!config.display.fullscreen);
    }

    #[test]
    fn no_flags_keep_config() {
        let args = Args::try_parse_from(["cluster"]).unwrap();
        let mut config = AppConfig::default();
        config.network.enabled = true;
        args.apply(&mut config);
        assert_eq!(config, {
            let mut expected = AppConfig::default();
            expected.network.enabled = true;
            expected
        });
    }
}
