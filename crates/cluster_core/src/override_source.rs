//! Receptor UDP não-bloqueante com semântica de latch.
//!
//! A cada tick é feita no máximo uma leitura do socket. A última mensagem
//! válida fica guardada e continua sobrescrevendo o simulador em todos os
//! ticks seguintes, até chegar outra válida. Não há expiração.

use crate::protocol::{ProtocolError, MAX_DATAGRAM, decode_fields};
use crate::types::RawFields;
use std::io;
use std::net::{IpAddr, SocketAddr, UdpSocket};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Erros fatais do receptor (só no bind).
#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    #[error("Endereço de escuta inválido: {0}")]
    InvalidAddress(String),

    #[error("Falha ao bind em {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("Falha ao configurar socket não-bloqueante: {0}")]
    NonBlocking(#[source] io::Error),
}

/// Resultado de uma tentativa de leitura.
#[derive(Debug)]
pub enum RecvOutcome {
    /// Nada disponível neste tick (não é erro).
    Empty,
    Received {
        fields: RawFields,
        source: SocketAddr,
        size: usize,
    },
    /// Datagrama de um IP diferente do filtro configurado.
    Filtered(SocketAddr),
    /// Payload malformado, descartado.
    Rejected {
        source: SocketAddr,
        error: ProtocolError,
    },
    /// Erro de transporte após o bind; não fatal.
    Transport(io::Error),
}

// ──────────────────────────────────────────────
// Latch
// ──────────────────────────────────────────────

/// Guarda a última mensagem válida e as estatísticas do feed.
#[derive(Debug, Default)]
pub struct OverrideLatch {
    last: Option<RawFields>,
    accepted: u64,
    rejected: u64,
    last_source: Option<SocketAddr>,
    last_size: usize,
    last_at: Option<Instant>,
}

impl OverrideLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodifica `data`; se válido, substitui o valor travado.
    /// Em erro, o valor anterior é mantido.
    pub fn offer(&mut self, data: &[u8]) -> Result<RawFields, ProtocolError> {
        match decode_fields(data) {
            Ok(fields) => {
                self.store(fields, None, data.len());
                Ok(fields)
            }
            Err(e) => {
                self.rejected += 1;
                Err(e)
            }
        }
    }

    fn store(&mut self, fields: RawFields, source: Option<SocketAddr>, size: usize) {
        self.last = Some(fields);
        self.accepted += 1;
        self.last_source = source.or(self.last_source);
        self.last_size = size;
        self.last_at = Some(Instant::now());
    }

    /// Override vigente, se algum já foi recebido.
    pub fn current(&self) -> Option<RawFields> {
        self.last
    }

    pub fn status(&self) -> FeedStatus {
        FeedStatus {
            latched: self.last.is_some(),
            accepted: self.accepted,
            rejected: self.rejected,
            last_source: self.last_source,
            last_size: self.last_size,
            since_last: self.last_at.map(|t| t.elapsed()),
        }
    }
}

/// Estado do feed para a linha de status.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedStatus {
    pub latched: bool,
    pub accepted: u64,
    pub rejected: u64,
    pub last_source: Option<SocketAddr>,
    pub last_size: usize,
    /// Idade da mensagem travada (apenas informativa, nunca expira)
    pub since_last: Option<Duration>,
}

// ──────────────────────────────────────────────
// Fonte de rede
// ──────────────────────────────────────────────

/// Socket UDP não-bloqueante + [`OverrideLatch`].
pub struct NetworkOverrideSource {
    socket: UdpSocket,
    local_addr: SocketAddr,
    sender_filter: Option<IpAddr>,
    latch: OverrideLatch,
    buf: Vec<u8>,
}

impl NetworkOverrideSource {
    /// Faz bind em `addr` (ex.: `"0.0.0.0:5005"`). Única falha fatal do core.
    pub fn bind(addr: &str) -> Result<Self, OverrideError> {
        let socket = UdpSocket::bind(addr).map_err(|source| OverrideError::Bind {
            addr: addr.to_owned(),
            source,
        })?;
        socket
            .set_nonblocking(true)
            .map_err(OverrideError::NonBlocking)?;
        let local_addr = socket
            .local_addr()
            .map_err(|source| OverrideError::Bind {
                addr: addr.to_owned(),
                source,
            })?;

        info!("Override UDP escutando em {local_addr}");

        Ok(Self {
            socket,
            local_addr,
            sender_filter: None,
            latch: OverrideLatch::new(),
            // +1 para detectar datagramas acima do limite
            buf: vec![0u8; MAX_DATAGRAM + 1],
        })
    }

    /// Aceita apenas datagramas vindos de `ip`. String vazia desativa o filtro.
    pub fn with_sender_filter(mut self, ip: &str) -> Result<Self, OverrideError> {
        if ip.is_empty() {
            self.sender_filter = None;
        } else {
            let parsed = ip
                .parse::<IpAddr>()
                .map_err(|_| OverrideError::InvalidAddress(ip.to_owned()))?;
            info!("Override UDP aceitando apenas {parsed}");
            self.sender_filter = Some(parsed);
        }
        Ok(self)
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Uma leitura não-bloqueante; atualiza o latch quando válida.
    pub fn try_receive(&mut self) -> RecvOutcome {
        let (size, source) = match self.socket.recv_from(&mut self.buf) {
            Ok(r) => r,
            Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => return RecvOutcome::Empty,
            Err(e) => return RecvOutcome::Transport(e),
        };

        if let Some(expected) = self.sender_filter {
            if source.ip() != expected {
                return RecvOutcome::Filtered(source);
            }
        }

        match decode_fields(&self.buf[..size]) {
            Ok(fields) => {
                self.latch.store(fields, Some(source), size);
                RecvOutcome::Received {
                    fields,
                    source,
                    size,
                }
            }
            Err(error) => {
                self.latch.rejected += 1;
                RecvOutcome::Rejected { source, error }
            }
        }
    }

    /// Override vigente após a leitura deste tick. Nunca falha.
    pub fn poll(&mut self) -> Option<RawFields> {
        match self.try_receive() {
            RecvOutcome::Empty => {}
            RecvOutcome::Received { fields, source, size } => {
                debug!("Override de {source}: {} campos, {size} bytes", fields.len());
            }
            RecvOutcome::Filtered(source) => {
                debug!("Ignorando pacote de {source}");
            }
            RecvOutcome::Rejected { source, error } => {
                debug!("Pacote inválido de {source}: {error}");
            }
            RecvOutcome::Transport(e) => {
                warn!("Erro ao receber UDP: {e}");
            }
        }
        self.latch.current()
    }

    pub fn status(&self) -> FeedStatus {
        self.latch.status()
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{SimulationProfile, SimulationSource};
    use crate::types::SensorSnapshot;

    fn loopback() -> NetworkOverrideSource {
        NetworkOverrideSource::bind("127.0.0.1:0").unwrap()
    }

    /// Envia e espera o datagrama chegar (loopback é rápido, mas não síncrono).
    fn send_and_wait(src: &mut NetworkOverrideSource, from: &UdpSocket, payload: &[u8]) -> RecvOutcome {
        from.send_to(payload, src.local_addr()).unwrap();
        for _ in 0..200 {
            match src.try_receive() {
                RecvOutcome::Empty => std::thread::sleep(Duration::from_millis(5)),
                other => return other,
            }
        }
        panic!("datagrama não chegou");
    }

    #[test]
    fn latch_holds_last_valid_message() {
        let mut latch = OverrideLatch::new();
        assert_eq!(latch.current(), None);

        latch.offer(br#"{"speed": 123}"#).unwrap();
        for _ in 0..100 {
            assert_eq!(latch.current().and_then(|f| f.speed), Some(123.0));
        }
    }

    #[test]
    fn malformed_message_keeps_previous() {
        let mut latch = OverrideLatch::new();
        latch.offer(br#"{"rpm": 4500}"#).unwrap();
        assert!(latch.offer(b"not json").is_err());
        assert!(latch.offer(br#"{"rpm": "high"}"#).is_err());
        assert_eq!(latch.current().and_then(|f| f.rpm), Some(4500.0));

        let status = latch.status();
        assert_eq!(status.accepted, 1);
        assert_eq!(status.rejected, 2);
        assert!(status.latched);
    }

    #[test]
    fn newer_message_replaces_wholesale() {
        let mut latch = OverrideLatch::new();
        latch.offer(br#"{"speed": 50, "rpm": 2000}"#).unwrap();
        latch.offer(br#"{"rpm": 3000}"#).unwrap();
        let current = latch.current().unwrap();
        assert_eq!(current.rpm, Some(3000.0));
        assert_eq!(current.speed, None);
    }

    #[test]
    fn empty_socket_returns_nothing() {
        let mut src = loopback();
        assert!(matches!(src.try_receive(), RecvOutcome::Empty));
        assert_eq!(src.poll(), None);
        assert!(!src.status().latched);
    }

    #[test]
    fn single_message_latches_across_polls() {
        let mut src = loopback();
        let tx = UdpSocket::bind("127.0.0.1:0").unwrap();
        let outcome = send_and_wait(&mut src, &tx, br#"{"speed": 123}"#);
        assert!(matches!(outcome, RecvOutcome::Received { .. }));

        let mut sim = SimulationSource::with_seed(SimulationProfile::classic(), 42);
        let mut baseline_speeds = Vec::new();
        for i in 0..100 {
            let simulated = sim.update(i as f64 * 0.5);
            baseline_speeds.push(simulated.speed);
            let snapshot = match src.poll() {
                Some(raw) => raw.merge(&simulated),
                None => simulated,
            };
            assert_eq!(snapshot.speed, 123.0);
            assert_eq!(snapshot.rpm, simulated.rpm);
        }
        baseline_speeds.dedup();
        assert!(baseline_speeds.len() > 1, "baseline deveria variar");

        let status = src.status();
        assert_eq!(status.accepted, 1);
        assert_eq!(status.last_source, Some(tx.local_addr().unwrap()));
        assert_eq!(status.last_size, br#"{"speed": 123}"#.len());
    }

    #[test]
    fn malformed_datagram_is_discarded() {
        let mut src = loopback();
        let tx = UdpSocket::bind("127.0.0.1:0").unwrap();
        send_and_wait(&mut src, &tx, br#"{"lambda": 0.9}"#);
        let outcome = send_and_wait(&mut src, &tx, b"{broken");
        assert!(matches!(outcome, RecvOutcome::Rejected { .. }));
        assert_eq!(src.poll().and_then(|f| f.lambda), Some(0.9));
        assert_eq!(src.status().rejected, 1);
    }

    #[test]
    fn sender_filter_drops_other_hosts() {
        let mut src = loopback().with_sender_filter("10.255.255.1").unwrap();
        let tx = UdpSocket::bind("127.0.0.1:0").unwrap();
        let outcome = send_and_wait(&mut src, &tx, br#"{"speed": 1}"#);
        assert!(matches!(outcome, RecvOutcome::Filtered(_)));
        assert_eq!(src.poll(), None);
    }

    #[test]
    fn invalid_filter_is_reported() {
        assert!(matches!(
            loopback().with_sender_filter("not-an-ip"),
            Err(OverrideError::InvalidAddress(_))
        ));
    }

    #[test]
    fn bind_failure_is_fatal_error() {
        let first = loopback();
        let taken = first.local_addr().to_string();
        assert!(matches!(
            NetworkOverrideSource::bind(&taken),
            Err(OverrideError::Bind { .. })
        ));
        assert!(NetworkOverrideSource::bind("nonsense").is_err());
    }

    #[test]
    fn full_snapshot_over_the_wire() {
        let mut src = loopback();
        let tx = UdpSocket::bind("127.0.0.1:0").unwrap();
        let sent = SensorSnapshot {
            speed: 77.0,
            handbrake: true,
            ..Default::default()
        };
        let bytes = crate::protocol::encode_snapshot(&sent).unwrap();
        send_and_wait(&mut src, &tx, &bytes);
        let raw = src.poll().unwrap();
        assert_eq!(raw.merge(&SensorSnapshot::default()), sent);
    }
}
