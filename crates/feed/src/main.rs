//! # Feed de demonstração
//!
//! Envia snapshots JSON via UDP para o override do painel.
//!
//! ## Uso
//! ```bash
//! feed_sender                              # usa a seção [feed] do config.toml
//! feed_sender --dest 192.168.0.20 --port 5005
//! feed_sender --broadcast --legacy-keys    # nomes antigos (speed_kmh, batt_v…)
//! ```

mod demo;

use clap::{ArgAction, Parser, ValueHint};
use cluster_core::config::AppConfig;
use cluster_core::encode_snapshot;
use demo::{DemoFeed, legacy_payload};
use std::net::UdpSocket;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "feed_sender", about = "Feed UDP de demonstração para o painel")]
struct Args {
    /// Caminho do config.toml (padrão: ao lado do executável)
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
    /// IP de destino
    #[arg(long)]
    dest: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    /// Mensagens por segundo
    #[arg(long)]
    rate: Option<f64>,
    #[arg(long, action = ArgAction::SetTrue)]
    broadcast: bool,
    /// Envia com os nomes de chave antigos
    #[arg(long, action = ArgAction::SetTrue)]
    legacy_keys: bool,
    /// Para depois de N mensagens
    #[arg(long)]
    count: Option<u64>,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(dest) = &self.dest {
            config.feed.dest_ip = dest.clone();
        }
        if let Some(port) = self.port {
            config.feed.port = port;
        }
        if let Some(rate) = self.rate {
            config.feed.rate_hz = rate;
        }
        if self.broadcast {
            config.feed.mode = "broadcast".into();
        }
    }
}

fn main() {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    // ── Carregar config ──
    let config_path = args.config.clone().unwrap_or_else(AppConfig::default_path);
    let mut config = AppConfig::load(&config_path);

    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }

    args.apply(&mut config);
    for problem in config.validate() {
        warn!("Configuração: {problem}");
    }

    let feed_cfg = &config.feed;
    let dest_ip = &feed_cfg.dest_ip;
    let rate_hz = feed_cfg.rate_hz.clamp(0.5, 1000.0);
    let interval = Duration::from_secs_f64(1.0 / rate_hz);

    // ── Socket UDP ──
    let bind_addr = if feed_cfg.bind_ip.is_empty() {
        "0.0.0.0:0".to_string()
    } else {
        format!("{}:0", feed_cfg.bind_ip)
    };
    let sock = match UdpSocket::bind(&bind_addr) {
        Ok(sock) => sock,
        Err(e) => {
            error!("Falha ao criar socket UDP em {bind_addr}: {e}");
            std::process::exit(1);
        }
    };

    if feed_cfg.mode == "broadcast" || dest_ip == "255.255.255.255" {
        if let Err(e) = sock.set_broadcast(true) {
            error!("Falha ao habilitar broadcast: {e}");
            std::process::exit(1);
        }
        info!("Modo BROADCAST ativado");
    } else {
        info!("Modo UNICAST → {dest_ip}");
    }

    let dest_addr = format!("{dest_ip}:{}", feed_cfg.port);
    let feed = DemoFeed::default();

    // ── Banner ──
    println!();
    println!("══════════════════════════════════════════════");
    println!("   ⚡ FEED DO PAINEL – ATIVO");
    println!("══════════════════════════════════════════════");
    println!("  Destino:   {dest_addr}");
    println!("  Taxa:      {rate_hz:.1} msg/s");
    println!(
        "  Chaves:    {}",
        if args.legacy_keys { "legadas" } else { "atuais" }
    );
    println!("══════════════════════════════════════════════");
    println!();

    // ── Loop principal ──
    let started = Instant::now();
    let log_every = rate_hz.round().max(1.0) as u64;
    let mut sent_count: u64 = 0;

    loop {
        let cycle_start = Instant::now();
        let t = started.elapsed().as_secs_f64();
        let snapshot = feed.snapshot(t);

        let frame = if args.legacy_keys {
            serde_json::to_vec(&legacy_payload(&snapshot)).map_err(|e| e.to_string())
        } else {
            encode_snapshot(&snapshot).map_err(|e| e.to_string())
        };

        match frame {
            Ok(frame) => match sock.send_to(&frame, &dest_addr) {
                Ok(sent) => {
                    sent_count += 1;
                    debug!("→ {sent} bytes para {dest_addr}");
                    if sent_count % log_every == 0 {
                        info!(
                            "→ {} bytes para {} | {:.0} km/h {:.0} rpm | comb {:.0}% | λ {:.2}",
                            sent,
                            dest_addr,
                            snapshot.speed,
                            snapshot.rpm,
                            snapshot.fuel_level * 100.0,
                            snapshot.lambda
                        );
                    }
                }
                Err(e) => error!("Erro ao enviar UDP: {e}"),
            },
            Err(e) => error!("Erro ao serializar snapshot: {e}"),
        }

        if args.count.is_some_and(|n| sent_count >= n) {
            info!("{sent_count} mensagens enviadas, encerrando");
            break;
        }

        // Dormir pelo tempo restante do intervalo
        let elapsed = cycle_start.elapsed();
        if elapsed < interval {
            std::thread::sleep(interval - elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_feed_section() {
        let args = Args::try_parse_from([
            "feed_sender",
            "--dest",
            "10.0.0.7",
            "--rate",
            "10",
            "--broadcast",
        ])
        .unwrap();
        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config.feed.dest_ip, "10.0.0.7");
        assert_eq!(config.feed.port, 5005);
        assert_eq!(config.feed.rate_hz, 10.0);
        assert_eq!(config.feed.mode, "broadcast");
        assert!(!args.legacy_keys);
    }
}
