//! Modelo de dados dos sensores.
//!
//! [`SensorSnapshot`] é um valor imutável por tick: produzido pelo simulador,
//! eventualmente sobrescrito por [`RawFields`] vindos da rede e então lido
//! pelos renderizadores. Nunca é alterado no lugar.

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Snapshot
// ──────────────────────────────────────────────

/// Leitura completa dos sensores em um instante.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SensorSnapshot {
    /// Velocidade (km/h, 0–260)
    pub speed: f32,
    /// Rotação do motor (rpm, 0–8000)
    pub rpm: f32,
    /// Nível de combustível (fração 0–1)
    pub fuel_level: f32,
    /// Temperatura da água (°C, 10–120)
    pub coolant_temp: f32,
    /// Temperatura do óleo (°C, 60–130)
    pub oil_temp: f32,
    /// Pressão do óleo (bar, 0–7)
    pub oil_pressure: f32,
    /// Pressão do turbo (bar, -1–3)
    pub turbo_pressure: f32,
    /// Tensão da bateria (V, 9–16)
    pub battery_voltage: f32,
    /// Sonda lambda (0.6–3.0)
    pub lambda: f32,
    pub left_blinker: bool,
    pub right_blinker: bool,
    pub handbrake: bool,
    pub lights_parking: bool,
    pub lights_low: bool,
    pub lights_high: bool,
}

impl Default for SensorSnapshot {
    /// Motor em marcha lenta, carro parado.
    fn default() -> Self {
        Self {
            speed: 0.0,
            rpm: 800.0,
            fuel_level: 0.65,
            coolant_temp: 80.0,
            oil_temp: 95.0,
            oil_pressure: 3.0,
            turbo_pressure: 0.2,
            battery_voltage: 13.8,
            lambda: 1.0,
            left_blinker: false,
            right_blinker: false,
            handbrake: false,
            lights_parking: false,
            lights_low: false,
            lights_high: false,
        }
    }
}

// ──────────────────────────────────────────────
// Campos numéricos
// ──────────────────────────────────────────────

/// Seletor de um campo numérico do snapshot.
///
/// Os gauges são configurados com um `SensorField` em vez de um nome
/// dinâmico, então todo acesso é resolvido em tempo de compilação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorField {
    Speed,
    Rpm,
    FuelLevel,
    CoolantTemp,
    OilTemp,
    OilPressure,
    TurboPressure,
    BatteryVoltage,
    Lambda,
}

impl SensorField {
    pub const ALL: [SensorField; 9] = [
        SensorField::Speed,
        SensorField::Rpm,
        SensorField::FuelLevel,
        SensorField::CoolantTemp,
        SensorField::OilTemp,
        SensorField::OilPressure,
        SensorField::TurboPressure,
        SensorField::BatteryVoltage,
        SensorField::Lambda,
    ];

    /// Chave do campo no JSON do protocolo.
    pub fn key(self) -> &'static str {
        match self {
            SensorField::Speed => "speed",
            SensorField::Rpm => "rpm",
            SensorField::FuelLevel => "fuel_level",
            SensorField::CoolantTemp => "coolant_temp",
            SensorField::OilTemp => "oil_temp",
            SensorField::OilPressure => "oil_pressure",
            SensorField::TurboPressure => "turbo_pressure",
            SensorField::BatteryVoltage => "battery_voltage",
            SensorField::Lambda => "lambda",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            SensorField::Speed => "km/h",
            SensorField::Rpm => "rpm",
            SensorField::FuelLevel => "",
            SensorField::CoolantTemp | SensorField::OilTemp => "°C",
            SensorField::OilPressure | SensorField::TurboPressure => "bar",
            SensorField::BatteryVoltage => "V",
            SensorField::Lambda => "λ",
        }
    }

    /// Faixa física `(min, max)` que todo produtor deve respeitar.
    pub fn domain(self) -> (f32, f32) {
        match self {
            SensorField::Speed => (0.0, 260.0),
            SensorField::Rpm => (0.0, 8000.0),
            SensorField::FuelLevel => (0.0, 1.0),
            SensorField::CoolantTemp => (10.0, 120.0),
            SensorField::OilTemp => (60.0, 130.0),
            SensorField::OilPressure => (0.0, 7.0),
            SensorField::TurboPressure => (-1.0, 3.0),
            SensorField::BatteryVoltage => (9.0, 16.0),
            SensorField::Lambda => (0.6, 3.0),
        }
    }

    pub fn read(self, s: &SensorSnapshot) -> f32 {
        match self {
            SensorField::Speed => s.speed,
            SensorField::Rpm => s.rpm,
            SensorField::FuelLevel => s.fuel_level,
            SensorField::CoolantTemp => s.coolant_temp,
            SensorField::OilTemp => s.oil_temp,
            SensorField::OilPressure => s.oil_pressure,
            SensorField::TurboPressure => s.turbo_pressure,
            SensorField::BatteryVoltage => s.battery_voltage,
            SensorField::Lambda => s.lambda,
        }
    }
}

// ──────────────────────────────────────────────
// Luzes / indicadores
// ──────────────────────────────────────────────

/// Seletor de um campo booleano (luz-espia) do snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lamp {
    LeftBlinker,
    RightBlinker,
    Handbrake,
    Parking,
    LowBeam,
    HighBeam,
}

impl Lamp {
    pub fn key(self) -> &'static str {
        match self {
            Lamp::LeftBlinker => "left_blinker",
            Lamp::RightBlinker => "right_blinker",
            Lamp::Handbrake => "handbrake",
            Lamp::Parking => "lights_parking",
            Lamp::LowBeam => "lights_low",
            Lamp::HighBeam => "lights_high",
        }
    }

    pub fn read(self, s: &SensorSnapshot) -> bool {
        match self {
            Lamp::LeftBlinker => s.left_blinker,
            Lamp::RightBlinker => s.right_blinker,
            Lamp::Handbrake => s.handbrake,
            Lamp::Parking => s.lights_parking,
            Lamp::LowBeam => s.lights_low,
            Lamp::HighBeam => s.lights_high,
        }
    }
}

// ──────────────────────────────────────────────
// Override vindo da rede
// ──────────────────────────────────────────────

/// Campos recebidos de uma mensagem de override.
///
/// Só os nomes conhecidos são lidos; chaves desconhecidas no JSON são
/// ignoradas pelo serde. Os aliases aceitam os nomes usados pelos
/// emissores antigos (`speed_kmh`, `batt_v`…).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RawFields {
    #[serde(alias = "speed_kmh")]
    pub speed: Option<f32>,
    pub rpm: Option<f32>,
    pub fuel_level: Option<f32>,
    #[serde(alias = "coolant_temp_c")]
    pub coolant_temp: Option<f32>,
    #[serde(alias = "oil_temp_c")]
    pub oil_temp: Option<f32>,
    #[serde(alias = "oil_pressure_bar")]
    pub oil_pressure: Option<f32>,
    #[serde(alias = "turbo_bar")]
    pub turbo_pressure: Option<f32>,
    #[serde(alias = "batt_v")]
    pub battery_voltage: Option<f32>,
    #[serde(alias = "lambda_value")]
    pub lambda: Option<f32>,
    pub left_blinker: Option<bool>,
    pub right_blinker: Option<bool>,
    pub handbrake: Option<bool>,
    pub lights_parking: Option<bool>,
    pub lights_low: Option<bool>,
    pub lights_high: Option<bool>,
}

impl RawFields {
    /// Aplica os campos presentes sobre `fallback`, campo a campo.
    ///
    /// Valores são usados como vieram (sem clamp). Função pura e
    /// idempotente: `raw.merge(&raw.merge(&s)) == raw.merge(&s)`.
    pub fn merge(&self, fallback: &SensorSnapshot) -> SensorSnapshot {
        SensorSnapshot {
            speed: self.speed.unwrap_or(fallback.speed),
            rpm: self.rpm.unwrap_or(fallback.rpm),
            fuel_level: self.fuel_level.unwrap_or(fallback.fuel_level),
            coolant_temp: self.coolant_temp.unwrap_or(fallback.coolant_temp),
            oil_temp: self.oil_temp.unwrap_or(fallback.oil_temp),
            oil_pressure: self.oil_pressure.unwrap_or(fallback.oil_pressure),
            turbo_pressure: self.turbo_pressure.unwrap_or(fallback.turbo_pressure),
            battery_voltage: self.battery_voltage.unwrap_or(fallback.battery_voltage),
            lambda: self.lambda.unwrap_or(fallback.lambda),
            left_blinker: self.left_blinker.unwrap_or(fallback.left_blinker),
            right_blinker: self.right_blinker.unwrap_or(fallback.right_blinker),
            handbrake: self.handbrake.unwrap_or(fallback.handbrake),
            lights_parking: self.lights_parking.unwrap_or(fallback.lights_parking),
            lights_low: self.lights_low.unwrap_or(fallback.lights_low),
            lights_high: self.lights_high.unwrap_or(fallback.lights_high),
        }
    }

    /// Quantos campos a mensagem sobrescreve.
    pub fn len(&self) -> usize {
        let numeric = [
            self.speed,
            self.rpm,
            self.fuel_level,
            self.coolant_temp,
            self.oil_temp,
            self.oil_pressure,
            self.turbo_pressure,
            self.battery_voltage,
            self.lambda,
        ];
        let lamps = [
            self.left_blinker,
            self.right_blinker,
            self.handbrake,
            self.lights_parking,
            self.lights_low,
            self.lights_high,
        ];
        numeric.iter().filter(|v| v.is_some()).count()
            + lamps.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<SensorSnapshot> for RawFields {
    /// Override completo: todos os campos presentes.
    fn from(s: SensorSnapshot) -> Self {
        Self {
            speed: Some(s.speed),
            rpm: Some(s.rpm),
            fuel_level: Some(s.fuel_level),
            coolant_temp: Some(s.coolant_temp),
            oil_temp: Some(s.oil_temp),
            oil_pressure: Some(s.oil_pressure),
            turbo_pressure: Some(s.turbo_pressure),
            battery_voltage: Some(s.battery_voltage),
            lambda: Some(s.lambda),
            left_blinker: Some(s.left_blinker),
            right_blinker: Some(s.right_blinker),
            handbrake: Some(s.handbrake),
            lights_parking: Some(s.lights_parking),
            lights_low: Some(s.lights_low),
            lights_high: Some(s.lights_high),
        }
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn baseline() -> SensorSnapshot {
        SensorSnapshot {
            speed: 88.0,
            rpm: 3100.0,
            left_blinker: true,
            ..Default::default()
        }
    }

    #[test]
    fn default_snapshot_within_domains() {
        let s = SensorSnapshot::default();
        for field in SensorField::ALL {
            let (lo, hi) = field.domain();
            let v = field.read(&s);
            assert!(v >= lo && v <= hi, "{} = {v} fora de [{lo}, {hi}]", field.key());
        }
    }

    #[test]
    fn empty_override_keeps_fallback() {
        let raw = RawFields::default();
        assert!(raw.is_empty());
        assert_eq!(raw.merge(&baseline()), baseline());
    }

    #[test]
    fn merge_replaces_only_present_fields() {
        let raw = RawFields {
            speed: Some(123.0),
            handbrake: Some(true),
            ..Default::default()
        };
        let merged = raw.merge(&baseline());
        assert_eq!(merged.speed, 123.0);
        assert!(merged.handbrake);
        assert_eq!(merged.rpm, 3100.0);
        assert!(merged.left_blinker);
        assert_eq!(raw.len(), 2);
    }

    #[test]
    fn merge_is_idempotent() {
        let raw = RawFields {
            rpm: Some(7000.0),
            lambda: Some(0.82),
            right_blinker: Some(true),
            ..Default::default()
        };
        let once = raw.merge(&baseline());
        let twice = raw.merge(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_does_not_clamp_values() {
        let raw = RawFields {
            oil_temp: Some(400.0),
            turbo_pressure: Some(-5.0),
            ..Default::default()
        };
        let merged = raw.merge(&baseline());
        assert_eq!(merged.oil_temp, 400.0);
        assert_eq!(merged.turbo_pressure, -5.0);
    }

    #[test]
    fn full_override_replaces_everything() {
        let other = SensorSnapshot {
            speed: 10.0,
            rpm: 900.0,
            fuel_level: 0.1,
            lights_high: true,
            ..Default::default()
        };
        let raw = RawFields::from(other);
        assert_eq!(raw.len(), 15);
        assert_eq!(raw.merge(&baseline()), other);
    }

    #[test]
    fn lamp_and_field_keys_match_wire_names() {
        let json = serde_json::to_value(SensorSnapshot::default()).unwrap();
        let obj = json.as_object().unwrap();
        for field in SensorField::ALL {
            assert!(obj.contains_key(field.key()), "{}", field.key());
        }
        for lamp in [
            Lamp::LeftBlinker,
            Lamp::RightBlinker,
            Lamp::Handbrake,
            Lamp::Parking,
            Lamp::LowBeam,
            Lamp::HighBeam,
        ] {
            assert!(obj.contains_key(lamp.key()), "{}", lamp.key());
        }
        assert_eq!(obj.len(), 15);
    }
}
