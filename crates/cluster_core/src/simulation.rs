//! Simulador de sensores.
//!
//! Cada campo numérico segue uma senoide deslocada para `[base, base+amplitude]`,
//! opcionalmente acoplada à carga do motor (rpm normalizado), mais um jitter
//! uniforme pequeno, e é limitado a uma faixa dentro do domínio físico.
//! Luzes são senoides comparadas com um limiar; as setas alternam entre si.

use crate::types::SensorSnapshot;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// Rotação máxima usada para calcular a carga do motor.
const LOAD_RPM: f64 = 8000.0;

// ──────────────────────────────────────────────
// Formas de onda
// ──────────────────────────────────────────────

/// `clamp(base + amplitude·(0.5+0.5·sin(ω·t+φ)) + load_gain·carga + jitter, lo, hi)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waveform {
    pub base: f64,
    pub amplitude: f64,
    /// Frequência angular (rad/s)
    pub omega: f64,
    pub phase: f64,
    /// Ganho sobre a carga (rpm / 8000)
    pub load_gain: f64,
    /// Amplitude máxima do ruído uniforme (±)
    pub jitter: f64,
    pub lo: f64,
    pub hi: f64,
}

impl Waveform {
    pub const fn new(base: f64, amplitude: f64, omega: f64, lo: f64, hi: f64) -> Self {
        Self {
            base,
            amplitude,
            omega,
            phase: 0.0,
            load_gain: 0.0,
            jitter: 0.0,
            lo,
            hi,
        }
    }

    pub const fn phase(self, phase: f64) -> Self {
        Self { phase, ..self }
    }

    pub const fn load(self, load_gain: f64) -> Self {
        Self { load_gain, ..self }
    }

    pub const fn jitter(self, jitter: f64) -> Self {
        Self { jitter, ..self }
    }

    /// Valor sem ruído no instante `t` com carga `load` (0–1).
    pub fn sample(&self, t: f64, load: f64) -> f64 {
        let wave = 0.5 + 0.5 * (self.omega * t + self.phase).sin();
        (self.base + self.amplitude * wave + self.load_gain * load)
            .max(self.lo)
            .min(self.hi)
    }

    fn sample_noisy<R: Rng>(&self, t: f64, load: f64, rng: &mut R) -> f64 {
        let wave = 0.5 + 0.5 * (self.omega * t + self.phase).sin();
        let noise = if self.jitter > 0.0 {
            rng.gen_range(-self.jitter..=self.jitter)
        } else {
            0.0
        };
        (self.base + self.amplitude * wave + self.load_gain * load + noise)
            .max(self.lo)
            .min(self.hi)
    }
}

/// Estado de uma luz ao longo do tempo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LampWave {
    Steady(bool),
    /// Acesa quando `sin(ω·t + φ) > threshold`
    Pulse { omega: f64, phase: f64, threshold: f64 },
}

impl LampWave {
    pub const fn pulse(omega: f64, phase: f64, threshold: f64) -> Self {
        LampWave::Pulse {
            omega,
            phase,
            threshold,
        }
    }

    pub fn is_on(&self, t: f64) -> bool {
        match *self {
            LampWave::Steady(on) => on,
            LampWave::Pulse {
                omega,
                phase,
                threshold,
            } => (omega * t + phase).sin() > threshold,
        }
    }
}

/// Consumo linear de combustível com "reabastecimento" ao passar de zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelDrain {
    pub start: f64,
    /// Fração consumida por segundo
    pub rate: f64,
    pub lo: f64,
    pub hi: f64,
}

impl FuelDrain {
    /// Abaixo de zero o nível dá a volta módulo 1 (tanque cheio de novo);
    /// caso contrário fica em `[lo, hi]`.
    pub fn level(&self, t: f64) -> f64 {
        let fuel = self.start - t * self.rate;
        if fuel < 0.0 {
            fuel.rem_euclid(1.0)
        } else {
            fuel.max(self.lo).min(self.hi)
        }
    }
}

// ──────────────────────────────────────────────
// Perfis
// ──────────────────────────────────────────────

/// Conjunto de formas de onda para todos os campos.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationProfile {
    pub name: &'static str,
    pub speed: Waveform,
    pub rpm: Waveform,
    pub fuel: FuelDrain,
    pub coolant_temp: Waveform,
    pub oil_temp: Waveform,
    pub oil_pressure: Waveform,
    pub turbo_pressure: Waveform,
    pub battery_voltage: Waveform,
    pub lambda: Waveform,
    /// Frequência do pisca (Hz)
    pub blink_hz: f64,
    pub handbrake: LampWave,
    pub lights_parking: LampWave,
    pub lights_low: LampWave,
    pub lights_high: LampWave,
}

impl SimulationProfile {
    /// Trânsito urbano/estrada moderado.
    pub fn classic() -> Self {
        Self {
            name: "classic",
            speed: Waveform::new(0.0, 120.0, 0.35, 0.0, 240.0).jitter(1.2),
            rpm: Waveform::new(1000.0, 3500.0, 0.9, 650.0, 7800.0).jitter(50.0),
            fuel: FuelDrain {
                start: 0.7,
                rate: 0.0005,
                lo: 0.02,
                hi: 0.98,
            },
            coolant_temp: Waveform::new(70.0, 20.0, 0.2, 10.0, 120.0),
            oil_temp: Waveform::new(85.0, 25.0, 0.17, 60.0, 130.0).phase(1.2),
            oil_pressure: Waveform::new(0.9, 0.2, 1.7, 0.4, 6.8).load(5.5),
            turbo_pressure: Waveform::new(-0.3, 0.2, 0.7, -0.9, 2.8).load(2.5),
            battery_voltage: Waveform::new(13.0, 0.8, 0.3, 9.0, 16.0),
            lambda: Waveform::new(0.8, 0.3, 1.3, 0.6, 3.0),
            blink_hz: 0.8,
            handbrake: LampWave::pulse(0.07, 0.0, 0.95),
            lights_parking: LampWave::pulse(0.15, 0.0, 0.6),
            lights_low: LampWave::pulse(0.09, 1.1, 0.2),
            lights_high: LampWave::pulse(0.12, -0.5, 0.8),
        }
    }

    /// Condução esportiva: giro alto, farol baixo sempre aceso.
    pub fn retro() -> Self {
        Self {
            name: "retro",
            speed: Waveform::new(0.0, 140.0, 0.40, 0.0, 260.0).jitter(1.0),
            rpm: Waveform::new(1200.0, 6000.0, 1.05, 650.0, 8000.0).jitter(40.0),
            fuel: FuelDrain {
                start: 0.8,
                rate: 0.00045,
                lo: 0.02,
                hi: 0.98,
            },
            coolant_temp: Waveform::new(75.0, 25.0, 0.18, 10.0, 120.0),
            oil_temp: Waveform::new(85.0, 25.0, 0.16, 60.0, 130.0).phase(0.8),
            oil_pressure: Waveform::new(0.8, 0.2, 1.4, 0.3, 6.9).load(5.6),
            turbo_pressure: Waveform::new(-0.3, 0.2, 0.8, -0.9, 2.9).load(2.4),
            battery_voltage: Waveform::new(13.15, 0.7, 0.25, 9.0, 16.0),
            lambda: Waveform::new(0.9, 0.2, 1.6, 0.6, 3.0),
            blink_hz: 0.75,
            handbrake: LampWave::pulse(0.07, 0.0, 0.94),
            lights_parking: LampWave::pulse(0.15, 0.0, 0.6),
            lights_low: LampWave::Steady(true),
            lights_high: LampWave::pulse(0.12, 0.0, 0.85),
        }
    }

    /// Retorna perfil pelo nome.
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "retro" | "s2000" => Self::retro(),
            _ => Self::classic(),
        }
    }
}

impl Default for SimulationProfile {
    fn default() -> Self {
        Self::classic()
    }
}

// ──────────────────────────────────────────────
// Fonte simulada
// ──────────────────────────────────────────────

/// Produz um [`SensorSnapshot`] a partir do tempo decorrido.
pub struct SimulationSource {
    profile: SimulationProfile,
    rng: StdRng,
}

impl SimulationSource {
    pub fn new(profile: SimulationProfile) -> Self {
        Self {
            profile,
            rng: StdRng::from_entropy(),
        }
    }

    /// Jitter reproduzível (útil para testes e demonstrações).
    pub fn with_seed(profile: SimulationProfile, seed: u64) -> Self {
        Self {
            profile,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn profile(&self) -> &SimulationProfile {
        &self.profile
    }

    /// Snapshot no instante `t` (segundos desde o início).
    pub fn update(&mut self, t: f64) -> SensorSnapshot {
        let p = &self.profile;
        let rng = &mut self.rng;

        let speed = p.speed.sample_noisy(t, 0.0, rng);
        let rpm = p.rpm.sample_noisy(t, 0.0, rng);
        let load = rpm / LOAD_RPM;

        let blink = (t * TAU * p.blink_hz).sin() > 0.0;

        SensorSnapshot {
            speed: speed as f32,
            rpm: rpm as f32,
            fuel_level: p.fuel.level(t) as f32,
            coolant_temp: p.coolant_temp.sample_noisy(t, load, rng) as f32,
            oil_temp: p.oil_temp.sample_noisy(t, load, rng) as f32,
            oil_pressure: p.oil_pressure.sample_noisy(t, load, rng) as f32,
            turbo_pressure: p.turbo_pressure.sample_noisy(t, load, rng) as f32,
            battery_voltage: p.battery_voltage.sample_noisy(t, load, rng) as f32,
            lambda: p.lambda.sample_noisy(t, load, rng) as f32,
            left_blinker: blink,
            right_blinker: !blink,
            handbrake: p.handbrake.is_on(t),
            lights_parking: p.lights_parking.is_on(t),
            lights_low: p.lights_low.is_on(t),
            lights_high: p.lights_high.is_on(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SensorField;

    fn ticks() -> impl Iterator<Item = f64> {
        // ~40 minutos em passos irregulares, cobre vários períodos de cada onda
        (0..6000).map(|i| i as f64 * 0.41)
    }

    #[test]
    fn every_field_stays_in_domain() {
        for profile in [SimulationProfile::classic(), SimulationProfile::retro()] {
            let mut sim = SimulationSource::with_seed(profile, 7);
            for t in ticks() {
                let s = sim.update(t);
                for field in SensorField::ALL {
                    let (lo, hi) = field.domain();
                    let v = field.read(&s);
                    assert!(
                        v >= lo && v <= hi,
                        "{} = {v} fora de [{lo}, {hi}] em t={t}",
                        field.key()
                    );
                }
            }
        }
    }

    #[test]
    fn exactly_one_blinker_is_on() {
        let mut sim = SimulationSource::new(SimulationProfile::classic());
        for t in ticks() {
            let s = sim.update(t);
            assert!(s.left_blinker ^ s.right_blinker, "t={t}");
        }
    }

    #[test]
    fn values_actually_move() {
        let mut sim = SimulationSource::with_seed(SimulationProfile::classic(), 1);
        let a = sim.update(0.0);
        let b = sim.update(4.0);
        assert_ne!(a.speed, b.speed);
        assert_ne!(a.rpm, b.rpm);
        assert_ne!(a.coolant_temp, b.coolant_temp);
    }

    #[test]
    fn jitter_is_bounded() {
        let wave = Waveform::new(1000.0, 3500.0, 0.9, 0.0, 10_000.0).jitter(50.0);
        let mut rng = StdRng::seed_from_u64(3);
        for t in ticks() {
            let clean = wave.sample(t, 0.0);
            let noisy = wave.sample_noisy(t, 0.0, &mut rng);
            assert!((noisy - clean).abs() <= 50.0 + 1e-9);
        }
    }

    #[test]
    fn fuel_drains_then_wraps() {
        let fuel = SimulationProfile::classic().fuel;
        assert!((fuel.level(0.0) - 0.7).abs() < 1e-12);
        assert!(fuel.level(100.0) < fuel.level(0.0));
        // 0.7 / 0.0005 = 1400 s até zerar
        let after = fuel.level(1500.0);
        assert!((0.0..1.0).contains(&after));
        assert!((after - 0.95).abs() < 1e-9, "{after}");
        // Perto do zero, mas ainda positivo: segura no mínimo
        assert_eq!(fuel.level(1399.0), 0.02);
    }

    #[test]
    fn pressure_follows_engine_load() {
        let wave = SimulationProfile::classic().oil_pressure;
        assert!(wave.sample(0.0, 0.9) > wave.sample(0.0, 0.1));
    }

    #[test]
    fn steady_lamp_ignores_time() {
        let lamp = LampWave::Steady(true);
        assert!(lamp.is_on(0.0) && lamp.is_on(1234.5));
        let mut sim = SimulationSource::new(SimulationProfile::retro());
        for t in ticks().take(200) {
            assert!(sim.update(t).lights_low);
        }
    }

    #[test]
    fn profile_lookup() {
        assert_eq!(SimulationProfile::by_name("retro").name, "retro");
        assert_eq!(SimulationProfile::by_name("S2000").name, "retro");
        assert_eq!(SimulationProfile::by_name("whatever").name, "classic");
    }
}
