//! # Cluster Core
//!
//! Crate compartilhada do painel de instrumentos: modelo de sensores,
//! simulador, protocolo UDP/JSON com latch de override, configuração TOML,
//! temas e o motor de gauges que traduz valores em primitivas de desenho.
//!
//! ## Módulos
//! - [`types`] – Snapshot de sensores, campos e merge com whitelist
//! - [`simulation`] – Gerador de dados por formas de onda + jitter
//! - [`protocol`] – Decode/encode JSON dos datagramas
//! - [`override_source`] – Receptor UDP não-bloqueante com latch
//! - [`mapper`] – Normalização e mapeamento valor → ângulo/altura
//! - [`draw`] – Contrato do backend de desenho ([`draw::Canvas`])
//! - [`gauges`] – Renderizadores (radial, barra, arco segmentado, 7 segmentos…)
//! - [`cluster`] – Montagem dos layouts `classic` e `retro`
//! - [`frame`] – Orquestração de um frame
//! - [`config`] – Configuração unificada via TOML
//! - [`theme`] – Temas (cores, fontes, geometria)

pub mod types;
pub mod simulation;
pub mod protocol;
pub mod override_source;
pub mod mapper;
pub mod draw;
pub mod gauges;
pub mod cluster;
pub mod frame;
pub mod config;
pub mod theme;

// Re-exports convenientes
pub use types::{Lamp, RawFields, SensorField, SensorSnapshot};
pub use protocol::{decode_fields, encode_snapshot, MAX_DATAGRAM};
pub use config::AppConfig;
pub use frame::FrameAssembler;
