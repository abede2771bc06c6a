//! Sinais de demonstração enviados pelo feed.
//!
//! Formas de onda independentes do simulador do painel, para que o override
//! seja visivelmente diferente dos valores simulados.

use cluster_core::SensorSnapshot;
use cluster_core::simulation::{LampWave, Waveform};
use serde_json::{Value, json};

/// Frequência angular das setas (rad/s).
const BLINK_OMEGA: f64 = 5.0;

pub struct DemoFeed {
    speed: Waveform,
    rpm: Waveform,
    fuel: Waveform,
    coolant_temp: Waveform,
    oil_temp: Waveform,
    oil_pressure: Waveform,
    turbo_pressure: Waveform,
    battery_voltage: Waveform,
    lambda: Waveform,
    handbrake: LampWave,
    lights_parking: LampWave,
    lights_low: LampWave,
    lights_high: LampWave,
}

impl Default for DemoFeed {
    fn default() -> Self {
        Self {
            speed: Waveform::new(100.0, 60.0, 0.6, 0.0, 260.0),
            rpm: Waveform::new(1200.0, 5000.0, 1.1, 0.0, 8000.0),
            fuel: Waveform::new(0.1, 0.8, 0.2, 0.0, 1.0),
            coolant_temp: Waveform::new(70.0, 20.0, 0.3, 10.0, 120.0),
            oil_temp: Waveform::new(83.0, 24.0, 0.27, 60.0, 130.0),
            oil_pressure: Waveform::new(2.0, 2.5, 0.9, 0.0, 7.0),
            turbo_pressure: Waveform::new(-0.1, 2.2, 0.8, -1.0, 3.0),
            battery_voltage: Waveform::new(13.5, 0.6, 0.25, 9.0, 16.0),
            lambda: Waveform::new(0.9, 0.2, 1.5, 0.6, 3.0),
            handbrake: LampWave::pulse(0.7, 0.0, 0.92),
            lights_parking: LampWave::Steady(true),
            lights_low: LampWave::Steady(true),
            lights_high: LampWave::pulse(0.3, 0.0, 0.85),
        }
    }
}

impl DemoFeed {
    pub fn snapshot(&self, t: f64) -> SensorSnapshot {
        let blink = (t * BLINK_OMEGA).sin() > 0.0;
        SensorSnapshot {
            speed: self.speed.sample(t, 0.0) as f32,
            rpm: self.rpm.sample(t, 0.0) as f32,
            fuel_level: self.fuel.sample(t, 0.0) as f32,
            coolant_temp: self.coolant_temp.sample(t, 0.0) as f32,
            oil_temp: self.oil_temp.sample(t, 0.0) as f32,
            oil_pressure: self.oil_pressure.sample(t, 0.0) as f32,
            turbo_pressure: self.turbo_pressure.sample(t, 0.0) as f32,
            battery_voltage: self.battery_voltage.sample(t, 0.0) as f32,
            lambda: self.lambda.sample(t, 0.0) as f32,
            left_blinker: blink,
            right_blinker: !blink,
            handbrake: self.handbrake.is_on(t),
            lights_parking: self.lights_parking.is_on(t),
            lights_low: self.lights_low.is_on(t),
            lights_high: self.lights_high.is_on(t),
        }
    }
}

/// Mesmo snapshot com os nomes de chave antigos (`speed_kmh`, `batt_v`…).
pub fn legacy_payload(s: &SensorSnapshot) -> Value {
    json!({
        "speed_kmh": s.speed,
        "rpm": s.rpm,
        "fuel_level": s.fuel_level,
        "coolant_temp_c": s.coolant_temp,
        "oil_temp_c": s.oil_temp,
        "oil_pressure_bar": s.oil_pressure,
        "turbo_bar": s.turbo_pressure,
        "batt_v": s.battery_voltage,
        "lambda_value": s.lambda,
        "left_blinker": s.left_blinker,
        "right_blinker": s.right_blinker,
        "handbrake": s.handbrake,
        "lights_parking": s.lights_parking,
        "lights_low": s.lights_low,
        "lights_high": s.lights_high,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cluster_core::{SensorField, decode_fields};
    use pretty_assertions::assert_eq;

    #[test]
    fn values_stay_in_domain() {
        let feed = DemoFeed::default();
        for i in 0..3000 {
            let s = feed.snapshot(i as f64 * 0.033);
            for field in SensorField::ALL {
                let (lo, hi) = field.domain();
                let v = field.read(&s);
                assert!(v >= lo && v <= hi, "{} = {v}", field.key());
            }
            assert_ne!(s.left_blinker, s.right_blinker);
            assert!(s.lights_low);
        }
    }

    #[test]
    fn legacy_keys_decode_to_same_snapshot() {
        let feed = DemoFeed::default();
        let sent = feed.snapshot(12.3);
        let bytes = serde_json::to_vec(&legacy_payload(&sent)).unwrap();
        let raw = decode_fields(&bytes).unwrap();
        assert_eq!(raw.len(), 15);
        assert_eq!(raw.merge(&SensorSnapshot::default()), sent);
    }
}
