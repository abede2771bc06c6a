//! Orquestração de um frame.
//!
//! Ordem fixa por tick: simulador → (override: poll + merge) → todos os
//! widgets desenham o mesmo snapshot → o backend apresenta.

use crate::cluster::Cluster;
use crate::draw::Canvas;
use crate::override_source::{FeedStatus, NetworkOverrideSource, OverrideLatch};
use crate::simulation::SimulationSource;
use crate::types::{RawFields, SensorSnapshot};

/// Origem opcional de valores que sobrescrevem a simulação.
pub trait OverrideSource {
    /// Override vigente após, no máximo, uma leitura não-bloqueante.
    fn poll(&mut self) -> Option<RawFields>;

    fn status(&self) -> Option<FeedStatus> {
        None
    }
}

impl OverrideSource for NetworkOverrideSource {
    fn poll(&mut self) -> Option<RawFields> {
        NetworkOverrideSource::poll(self)
    }

    fn status(&self) -> Option<FeedStatus> {
        Some(NetworkOverrideSource::status(self))
    }
}

impl OverrideSource for OverrideLatch {
    fn poll(&mut self) -> Option<RawFields> {
        self.current()
    }

    fn status(&self) -> Option<FeedStatus> {
        Some(OverrideLatch::status(self))
    }
}

pub struct FrameAssembler {
    sim: SimulationSource,
    overrides: Option<Box<dyn OverrideSource>>,
    cluster: Cluster,
    frames: u64,
}

impl FrameAssembler {
    pub fn new(sim: SimulationSource, cluster: Cluster) -> Self {
        Self {
            sim,
            overrides: None,
            cluster,
            frames: 0,
        }
    }

    pub fn with_override(mut self, source: Box<dyn OverrideSource>) -> Self {
        self.overrides = Some(source);
        self
    }

    /// Snapshot do instante `t` (segundos desde o início).
    pub fn snapshot(&mut self, t: f64) -> SensorSnapshot {
        let simulated = self.sim.update(t);
        match self.overrides.as_mut().and_then(|o| o.poll()) {
            Some(raw) => raw.merge(&simulated),
            None => simulated,
        }
    }

    /// Um frame completo. Retorna o snapshot desenhado.
    pub fn tick(&mut self, t: f64, canvas: &mut dyn Canvas) -> SensorSnapshot {
        let snapshot = self.snapshot(t);
        self.cluster.render(canvas, &snapshot);
        self.frames += 1;
        snapshot
    }

    pub fn feed_status(&self) -> Option<FeedStatus> {
        self.overrides.as_ref().and_then(|o| o.status())
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn cluster(&self) -> &Cluster {
        &self.cluster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::CommandList;
    use crate::gauges::Widget;
    use crate::simulation::SimulationProfile;
    use crate::theme::{Theme, classic_theme};
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counting {
        calls: Rc<Cell<u32>>,
        seen_speed: Rc<Cell<f32>>,
    }

    impl Widget for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn draw(&self, _canvas: &mut dyn Canvas, snapshot: &SensorSnapshot, _theme: &Theme) {
            self.calls.set(self.calls.get() + 1);
            self.seen_speed.set(snapshot.speed);
        }
    }

    fn sim() -> SimulationSource {
        SimulationSource::with_seed(SimulationProfile::classic(), 7)
    }

    #[test]
    fn every_widget_draws_once_per_tick() {
        let a = Rc::new(Cell::new(0));
        let b = Rc::new(Cell::new(0));
        let speed = Rc::new(Cell::new(0.0));
        let widgets: Vec<Box<dyn Widget>> = vec![
            Box::new(Counting {
                calls: a.clone(),
                seen_speed: speed.clone(),
            }),
            Box::new(Counting {
                calls: b.clone(),
                seen_speed: speed.clone(),
            }),
        ];
        let mut frame = FrameAssembler::new(sim(), Cluster::from_widgets(classic_theme(), widgets));
        let mut canvas = CommandList::new();
        for i in 0..10 {
            let drawn = frame.tick(i as f64 / 60.0, &mut canvas);
            assert_eq!(speed.get(), drawn.speed);
        }
        assert_eq!(a.get(), 10);
        assert_eq!(b.get(), 10);
        assert_eq!(frame.frames(), 10);
        assert_eq!(frame.feed_status(), None);
    }

    #[test]
    fn latched_override_wins_every_tick() {
        let mut latch = OverrideLatch::new();
        latch.offer(br#"{"speed": 123, "handbrake": true}"#).unwrap();

        let cluster = Cluster::new(classic_theme(), 1280.0, 720.0, "");
        let mut frame = FrameAssembler::new(sim(), cluster).with_override(Box::new(latch));
        let mut reference = sim();
        let mut canvas = CommandList::new();

        for i in 0..100 {
            let t = i as f64 * 0.25;
            let expected = reference.update(t);
            let drawn = frame.tick(t, &mut canvas);
            assert_eq!(drawn.speed, 123.0);
            assert!(drawn.handbrake);
            assert_eq!(drawn.rpm, expected.rpm);
            assert_eq!(drawn.left_blinker, expected.left_blinker);
        }
        let status = frame.feed_status().unwrap();
        assert!(status.latched);
        assert_eq!(status.accepted, 1);
    }

    #[test]
    fn without_override_snapshot_is_simulated() {
        let cluster = Cluster::new(classic_theme(), 800.0, 480.0, "");
        let mut frame = FrameAssembler::new(sim(), cluster);
        let mut reference = sim();
        for i in 0..20 {
            let t = i as f64 * 0.1;
            assert_eq!(frame.snapshot(t), reference.update(t));
        }
    }
}
