//! Configuração unificada via TOML.
//!
//! Um único `config.toml` ao lado do executável, lido uma vez na
//! inicialização. Todas as seções têm valores padrão.

use crate::simulation::SimulationProfile;
use crate::theme::{Theme, get_theme};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Erro de I/O em {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Erro ao parsear {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Erro ao serializar configuração: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Janela e aparência.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    /// Frames por segundo alvo
    pub fps: u32,
    /// Tema: "classic" ou "retro"
    pub theme: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            fps: 60,
            theme: "classic".into(),
        }
    }
}

/// Override de sensores via UDP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub enabled: bool,
    pub bind_ip: String,
    pub port: u16,
    /// Aceitar só este remetente (vazio = qualquer um)
    pub sender_ip: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bind_ip: "0.0.0.0".into(),
            port: 5005,
            sender_ip: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Perfil do simulador (vazio = acompanha o tema)
    pub profile: String,
    /// Semente fixa para execuções reproduzíveis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Gerador de dados de demonstração (`feed_sender`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Modo de envio: "broadcast" ou "unicast"
    pub mode: String,
    pub dest_ip: String,
    pub port: u16,
    /// Mensagens por segundo
    pub rate_hz: f64,
    /// IP local para bind (vazio = auto)
    pub bind_ip: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            mode: "unicast".into(),
            dest_ip: "127.0.0.1".into(),
            port: 5005,
            rate_hz: 30.0,
            bind_ip: String::new(),
        }
    }
}

/// Configuração raiz.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub network: NetworkConfig,
    pub simulation: SimulationConfig,
    pub feed: FeedConfig,
}

impl AppConfig {
    /// Lê e parseia `path`.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Carrega configuração; em qualquer falha usa os padrões.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match Self::read(path) {
                Ok(config) => {
                    info!("Configuração carregada de {}", path.display());
                    return config;
                }
                Err(e) => warn!("{e}"),
            }
        }

        info!("Usando configuração padrão");
        AppConfig::default()
    }

    /// Salva configuração em arquivo TOML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// Retorna o caminho padrão do config.toml.
    pub fn default_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        exe_dir.join("config.toml")
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let d = &self.display;
        if d.width < 320 || d.height < 240 {
            errors.push(format!(
                "Resolução muito pequena: {}x{} (mínimo 320x240)",
                d.width, d.height
            ));
        }
        if d.fps == 0 || d.fps > 240 {
            errors.push(format!("FPS inválido: {} (1–240)", d.fps));
        }
        if !crate::theme::theme_names().contains(&d.theme.to_lowercase().as_str())
            && !d.theme.eq_ignore_ascii_case("s2000")
        {
            errors.push(format!("Tema desconhecido: '{}'", d.theme));
        }

        if self.network.enabled && self.network.port == 0 {
            errors.push("Porta de override não pode ser 0".into());
        }
        if !self.network.sender_ip.is_empty()
            && self.network.sender_ip.parse::<std::net::IpAddr>().is_err()
        {
            errors.push(format!("IP do remetente inválido: '{}'", self.network.sender_ip));
        }

        if self.feed.port == 0 {
            errors.push("Porta do feed não pode ser 0".into());
        }
        if !(0.5..=1000.0).contains(&self.feed.rate_hz) {
            errors.push(format!(
                "Taxa do feed inválida: {} Hz (0.5–1000)",
                self.feed.rate_hz
            ));
        }
        if !matches!(self.feed.mode.as_str(), "broadcast" | "unicast") {
            errors.push(format!("Modo do feed desconhecido: '{}'", self.feed.mode));
        }

        errors
    }

    /// Endereço de escuta do override, `bind_ip:port`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.network.bind_ip, self.network.port)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.display.fps.max(1) as f64)
    }

    pub fn theme(&self) -> Theme {
        get_theme(&self.display.theme)
    }

    /// Perfil do simulador; sem perfil explícito, segue o tema.
    pub fn simulation_profile(&self) -> SimulationProfile {
        if self.simulation.profile.is_empty() {
            SimulationProfile::by_name(&self.display.theme)
        } else {
            SimulationProfile::by_name(&self.simulation.profile)
        }
    }
}
