//! Gauge radial com ponteiro, marcas de escala e zonas coloridas.

use super::{Widget, Zone, zones_contiguous};
use crate::draw::{Anchor, Canvas, Paint, Point, Rect};
use crate::mapper::{map_range, polar};
use crate::theme::{FontRole, Theme, ZoneTone};
use crate::types::{SensorField, SensorSnapshot};
use tracing::warn;

/// Recuo do arco de zonas em relação ao raio externo.
const ZONE_INSET: f32 = 16.0;
/// O ponteiro termina antes das marcas.
const POINTER_INSET: f32 = 18.0;

pub struct RadialGauge {
    field: SensorField,
    center: Point,
    radius: f32,
    vmin: f32,
    vmax: f32,
    start_deg: f32,
    end_deg: f32,
    label: String,
    /// Sufixo da leitura (ex.: " bar"); vazio = inteiro sem unidade
    unit: String,
    zones: Vec<Zone>,
}

impl RadialGauge {
    /// Gauge no domínio físico do campo, varrendo de -210° a 30°.
    pub fn new(field: SensorField, center: Point, radius: f32) -> Self {
        let (vmin, vmax) = field.domain();
        Self {
            field,
            center,
            radius,
            vmin,
            vmax,
            start_deg: -210.0,
            end_deg: 30.0,
            label: String::new(),
            unit: String::new(),
            zones: Vec::new(),
        }
    }

    pub fn domain(mut self, vmin: f32, vmax: f32) -> Self {
        self.vmin = vmin;
        self.vmax = vmax;
        self
    }

    /// Varredura angular; pode decrescer e passar de 180°.
    pub fn sweep(mut self, start_deg: f32, end_deg: f32) -> Self {
        self.start_deg = start_deg;
        self.end_deg = end_deg;
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_owned();
        self
    }

    pub fn zones(mut self, zones: Vec<Zone>) -> Self {
        if !zones_contiguous(&zones) {
            warn!("Gauge '{}': zonas fora de ordem ou com lacunas", self.label);
        }
        self.zones = zones;
        self
    }

    /// Ângulo do ponteiro para `value` (limitado à varredura).
    pub fn angle_for(&self, value: f32) -> f32 {
        map_range(value, self.vmin, self.vmax, self.start_deg, self.end_deg)
    }

    /// Arcos `(a0, a1, tom)` de cada zona.
    pub fn zone_spans(&self) -> Vec<(f32, f32, ZoneTone)> {
        self.zones
            .iter()
            .map(|z| (self.angle_for(z.from), self.angle_for(z.to), z.tone))
            .collect()
    }

    /// Ângulos das marcas `(ângulo, maior?)`, do início ao fim da varredura.
    pub fn tick_angles(&self, step_deg: f32, major_every: u32) -> Vec<(f32, bool)> {
        let span = self.end_deg - self.start_deg;
        let step = step_deg.abs();
        if step == 0.0 {
            return Vec::new();
        }
        let count = (span.abs() / step + 1e-3).floor() as u32 + 1;
        let dir = if span < 0.0 { -1.0 } else { 1.0 };
        let major_every = major_every.max(1);
        (0..count)
            .map(|i| (self.start_deg + dir * step * i as f32, i % major_every == 0))
            .collect()
    }

    /// Texto da leitura. Usa o valor bruto, sem limitar ao domínio.
    pub fn readout(&self, value: f32) -> String {
        if self.unit.is_empty() {
            format!("{}", value.trunc() as i64)
        } else {
            format!("{value:.1}{}", self.unit)
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Widget for RadialGauge {
    fn name(&self) -> &str {
        self.field.key()
    }

    fn draw(&self, canvas: &mut dyn Canvas, snapshot: &SensorSnapshot, theme: &Theme) {
        let geo = &theme.geometry;
        let colors = &theme.colors;
        let value = self.field.read(snapshot);

        // Marcas de escala
        for (angle, major) in self.tick_angles(geo.tick_step_deg, geo.major_every) {
            let (len, width) = if major {
                (geo.major_tick_len, (geo.tick_width + 1.0).max(3.0))
            } else {
                (geo.tick_len, geo.tick_width)
            };
            let inner = polar(self.center, self.radius - len, angle);
            let outer = polar(self.center, self.radius, angle);
            canvas.line(inner, outer, width, colors.tick);
        }

        // Zonas
        let bounds = Rect::around(self.center, self.radius).inflate(-ZONE_INSET, -ZONE_INSET);
        for (a0, a1, tone) in self.zone_spans() {
            canvas.arc(bounds, a0, a1, geo.zone_width, colors.zone(tone));
        }

        // Ponteiro
        let tip = polar(self.center, self.radius - POINTER_INSET, self.angle_for(value));
        canvas.line(self.center, tip, geo.pointer_width, colors.pointer);
        canvas.circle(self.center, geo.pointer_width + 1.0, Paint::Fill(colors.pointer));

        // Rótulo e leitura
        let small = theme.fonts.get(FontRole::Small);
        canvas.text(
            &self.label,
            self.center.offset(0.0, self.radius * 0.55),
            Anchor::Center,
            small,
            colors.muted,
        );
        canvas.text(
            &self.readout(value),
            self.center.offset(0.0, self.radius * 0.78),
            Anchor::Center,
            small,
            colors.text,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::CommandList;
    use crate::theme::classic_theme;

    fn tach() -> RadialGauge {
        RadialGauge::new(SensorField::Rpm, Point::new(200.0, 200.0), 100.0)
            .label("RPM")
            .zones(vec![
                Zone::new(0.0, 3500.0, ZoneTone::Normal),
                Zone::new(3500.0, 6500.0, ZoneTone::Caution),
                Zone::new(6500.0, 8000.0, ZoneTone::Danger),
            ])
    }

    fn battery() -> RadialGauge {
        RadialGauge::new(SensorField::BatteryVoltage, Point::new(100.0, 100.0), 80.0)
            .label("Bateria")
            .unit(" V")
            .zones(vec![
                Zone::new(9.0, 11.5, ZoneTone::Danger),
                Zone::new(11.5, 12.3, ZoneTone::Warning),
                Zone::new(12.3, 14.6, ZoneTone::Normal),
                Zone::new(14.6, 16.0, ZoneTone::Warning),
            ])
    }

    #[test]
    fn half_scale_points_up() {
        assert_eq!(tach().angle_for(4000.0), -90.0);
        assert_eq!(tach().angle_for(0.0), -210.0);
        assert_eq!(tach().angle_for(8000.0), 30.0);
    }

    #[test]
    fn zones_cover_full_sweep_without_gaps() {
        for gauge in [tach(), battery(), battery().sweep(30.0, -210.0)] {
            let spans = gauge.zone_spans();
            assert_eq!(spans.first().unwrap().0, gauge.start_deg);
            assert_eq!(spans.last().unwrap().1, gauge.end_deg);
            for pair in spans.windows(2) {
                assert_eq!(pair[0].1, pair[1].0);
            }
            let covered: f32 = spans.iter().map(|(a0, a1, _)| (a1 - a0).abs()).sum();
            assert!((covered - 240.0).abs() < 1e-3, "{covered}");
        }
    }

    #[test]
    fn pointer_pins_but_readout_shows_raw_value() {
        let gauge = battery();
        let snapshot = SensorSnapshot {
            battery_voltage: 18.25,
            ..Default::default()
        };
        let mut canvas = CommandList::new();
        gauge.draw(&mut canvas, &snapshot, &classic_theme());

        assert!(canvas.texts().contains(&"18.2 V") || canvas.texts().contains(&"18.3 V"));
        let pointer = canvas
            .lines()
            .into_iter()
            .find(|(from, _, _, _)| *from == gauge.center())
            .unwrap();
        let expected = polar(gauge.center(), gauge.radius() - POINTER_INSET, 30.0);
        assert!((pointer.1.x - expected.x).abs() < 1e-3);
        assert!((pointer.1.y - expected.y).abs() < 1e-3);
    }

    #[test]
    fn readout_formats() {
        assert_eq!(battery().readout(13.84), "13.8 V");
        assert_eq!(tach().readout(4321.9), "4321");
        assert_eq!(tach().readout(-12.7), "-12");
    }

    #[test]
    fn ticks_follow_sweep_direction() {
        let ticks = tach().tick_angles(12.0, 3);
        assert_eq!(ticks.len(), 21);
        assert_eq!(ticks[0], (-210.0, true));
        assert_eq!(ticks[1], (-198.0, false));
        assert_eq!(ticks[3].1, true);
        assert!((ticks[20].0 - 30.0).abs() < 1e-3);

        let reversed = tach().sweep(30.0, -210.0).tick_angles(12.0, 3);
        assert_eq!(reversed.len(), 21);
        assert_eq!(reversed[1].0, 18.0);
    }

    #[test]
    fn draws_one_arc_per_zone() {
        let mut canvas = CommandList::new();
        let theme = classic_theme();
        battery().draw(&mut canvas, &SensorSnapshot::default(), &theme);
        let arcs = canvas.arcs();
        assert_eq!(arcs.len(), 4);
        assert_eq!(arcs[0].2, theme.colors.zone_danger);
        assert_eq!(arcs[2].2, theme.colors.zone_normal);
    }
}
