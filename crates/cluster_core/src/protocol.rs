//! Protocolo de override via UDP.
//!
//! Cada datagrama carrega um único objeto JSON `campo → valor`:
//!
//! ```text
//! {"speed": 123.4, "rpm": 4200, "left_blinker": true}
//! ```
//!
//! - Chaves reconhecidas: os nomes de [`SensorSnapshot`] (mais aliases legados)
//! - Chaves desconhecidas são ignoradas
//! - Sem validação de faixa: o valor é usado como veio
//! - Sem ordem nem confirmação; a última mensagem válida vence

use crate::types::{RawFields, SensorSnapshot};
use serde_json::{Map, Value};

/// Tamanho máximo aceito para um datagrama (bytes).
pub const MAX_DATAGRAM: usize = 8192;

/// Erros do protocolo.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Datagrama vazio")]
    Empty,

    #[error("Datagrama muito grande ({0} bytes, máximo {MAX_DATAGRAM})")]
    TooLarge(usize),

    #[error("Mensagem não é um objeto JSON: {0}")]
    NotAnObject(String),

    #[error("Campo com tipo inválido: {0}")]
    FieldType(String),

    #[error("Erro de serialização: {0}")]
    Serialize(String),
}

/// Decodifica um datagrama em [`RawFields`].
///
/// O corpo precisa ser um objeto JSON. Um campo conhecido com tipo errado
/// (`"speed": "rápido"`) invalida a mensagem inteira.
pub fn decode_fields(data: &[u8]) -> Result<RawFields, ProtocolError> {
    if data.is_empty() {
        return Err(ProtocolError::Empty);
    }
    if data.len() > MAX_DATAGRAM {
        return Err(ProtocolError::TooLarge(data.len()));
    }

    let object: Map<String, Value> =
        serde_json::from_slice(data).map_err(|e| ProtocolError::NotAnObject(e.to_string()))?;

    serde_json::from_value(Value::Object(object))
        .map_err(|e| ProtocolError::FieldType(e.to_string()))
}

/// Codifica um snapshot completo para envio.
pub fn encode_snapshot(snapshot: &SensorSnapshot) -> Result<Vec<u8>, ProtocolError> {
    serde_json::to_vec(snapshot).map_err(|e| ProtocolError::Serialize(e.to_string()))
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
