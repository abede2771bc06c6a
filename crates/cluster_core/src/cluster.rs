//! Montagem dos layouts do painel.
//!
//! Um único motor de widgets; o tema escolhe o layout (clássico ou retro) e
//! as posições são calculadas a partir do tamanho da tela.

use crate::draw::{Canvas, Point, Rect};
use crate::gauges::{
    Backdrop, Caption, FuelBar, FuelStyle, IndicatorIcon, IndicatorRow, InfoLine, LambdaReadout,
    LinearBar, RadialGauge, SegmentedArc, SevenSegmentDisplay, SpeedReadout, SpeedStyle, Widget,
    Zone,
};
use crate::theme::{FontRole, LayoutKind, Theme, ZoneTone};
use crate::types::{SensorField, SensorSnapshot};
use tracing::debug;

/// Ordem dos ícones nas duas fileiras.
const ICON_ORDER: [IndicatorIcon; 6] = [
    IndicatorIcon::ArrowLeft,
    IndicatorIcon::Parking,
    IndicatorIcon::LowBeam,
    IndicatorIcon::HighBeam,
    IndicatorIcon::ArrowRight,
    IndicatorIcon::Handbrake,
];

/// Painel completo: tema imutável + widgets em ordem fixa de desenho.
pub struct Cluster {
    theme: Theme,
    widgets: Vec<Box<dyn Widget>>,
}

impl Cluster {
    /// Monta o layout do tema para uma tela `width` × `height`.
    pub fn new(theme: Theme, width: f32, height: f32, footer: &str) -> Self {
        let widgets = match theme.layout {
            LayoutKind::Classic => classic_layout(width, height, footer),
            LayoutKind::Retro => retro_layout(&theme, width, height, footer),
        };
        debug!(
            "Layout '{}' com {} widgets ({}x{})",
            theme.name,
            widgets.len(),
            width,
            height
        );
        Self { theme, widgets }
    }

    /// Painel com widgets arbitrários.
    pub fn from_widgets(theme: Theme, widgets: Vec<Box<dyn Widget>>) -> Self {
        Self { theme, widgets }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn widget_names(&self) -> Vec<&str> {
        self.widgets.iter().map(|w| w.name()).collect()
    }

    /// Desenha todos os widgets, cada um uma vez, a partir do mesmo snapshot.
    pub fn render(&self, canvas: &mut dyn Canvas, snapshot: &SensorSnapshot) {
        for widget in &self.widgets {
            widget.draw(canvas, snapshot, &self.theme);
        }
    }
}

// ──────────────────────────────────────────────
// Clássico
// ──────────────────────────────────────────────

fn classic_layout(w: f32, h: f32, footer: &str) -> Vec<Box<dyn Widget>> {
    let margin = w * 0.02;
    let pr = w.min(h) * 0.16;

    let bar_w = w * 0.06;
    let bar_h = h * 0.7;
    let rpm_rect = Rect::new(w - margin - bar_w, (h - bar_h) / 2.0, bar_w, bar_h);
    let fuel_h = h * 0.5;
    let fuel_rect = Rect::new(margin, (h - fuel_h) / 2.0, w * 0.05, fuel_h);

    let center_area = Rect::from_center(Point::new(w / 2.0, h * 0.34), w * 0.35, h * 0.34);
    let lambda_w = center_area.w * 0.55;
    let lambda_box = Rect::new(
        center_area.center().x - lambda_w / 2.0,
        center_area.bottom() + 8.0,
        lambda_w,
        64.0,
    );

    let cx1 = margin + pr + 60.0;
    let cy1 = margin + pr + 10.0;
    let cx2 = w - margin - pr - 60.0;
    let cyb = h - margin - pr + 30.0;
    let small_r = pr * 0.85;

    let spacing = w * 0.09;
    let icons_at = Point::new(w / 2.0 - 2.0 * spacing, center_area.bottom() + 110.0);

    let mut widgets: Vec<Box<dyn Widget>> = Vec::new();
    widgets.push(Box::new(
        Backdrop::new(w, h).border(6.0, 18.0).panel(center_area, 24.0),
    ));
    widgets.push(Box::new(
        LinearBar::new(SensorField::Rpm, rpm_rect)
            .label("RPM")
            .zones(vec![
                Zone::new(0.0, 3500.0, ZoneTone::Normal),
                Zone::new(3500.0, 6500.0, ZoneTone::Caution),
                Zone::new(6500.0, 8000.0, ZoneTone::Danger),
            ]),
    ));
    widgets.push(Box::new(FuelBar::new(fuel_rect, FuelStyle::Continuous)));
    widgets.push(Box::new(SpeedReadout::new(center_area, SpeedStyle::Text)));
    widgets.push(Box::new(LambdaReadout::boxed(lambda_box)));

    widgets.push(Box::new(
        RadialGauge::new(SensorField::CoolantTemp, Point::new(cx1, cy1), pr)
            .label("Água °C")
            .zones(vec![
                Zone::new(10.0, 60.0, ZoneTone::Cold),
                Zone::new(60.0, 100.0, ZoneTone::Normal),
                Zone::new(100.0, 120.0, ZoneTone::Warning),
            ]),
    ));
    widgets.push(Box::new(
        RadialGauge::new(SensorField::OilTemp, Point::new(cx2, cy1), pr)
            .label("Óleo °C")
            .zones(vec![
                Zone::new(60.0, 80.0, ZoneTone::Cold),
                Zone::new(80.0, 115.0, ZoneTone::Normal),
                Zone::new(115.0, 130.0, ZoneTone::Warning),
            ]),
    ));
    widgets.push(Box::new(
        RadialGauge::new(SensorField::OilPressure, Point::new(cx1, cyb), small_r)
            .label("Press. Óleo")
            .unit(" bar")
            .zones(vec![
                Zone::new(0.0, 1.0, ZoneTone::Danger),
                Zone::new(1.0, 2.0, ZoneTone::Warning),
                Zone::new(2.0, 6.0, ZoneTone::Normal),
                Zone::new(6.0, 7.0, ZoneTone::Warning),
            ]),
    ));
    widgets.push(Box::new(
        RadialGauge::new(SensorField::TurboPressure, Point::new(w * 0.5, cyb), small_r)
            .label("Turbo")
            .unit(" bar")
            .zones(vec![
                Zone::new(-1.0, 0.0, ZoneTone::Cold),
                Zone::new(0.0, 2.2, ZoneTone::Normal),
                Zone::new(2.2, 3.0, ZoneTone::Danger),
            ]),
    ));
    widgets.push(Box::new(
        RadialGauge::new(SensorField::BatteryVoltage, Point::new(cx2, cyb), small_r)
            .label("Bateria")
            .unit(" V")
            .zones(vec![
                Zone::new(9.0, 11.5, ZoneTone::Danger),
                Zone::new(11.5, 12.3, ZoneTone::Warning),
                Zone::new(12.3, 14.6, ZoneTone::Normal),
                Zone::new(14.6, 16.0, ZoneTone::Warning),
            ]),
    ));

    widgets.push(Box::new(IndicatorRow::evenly(&ICON_ORDER, icons_at, spacing)));
    widgets.push(Box::new(Caption::new(
        footer,
        Point::new(w / 2.0, h - 18.0),
        FontRole::Tiny,
    )));
    widgets
}

// ──────────────────────────────────────────────
// Retro
// ──────────────────────────────────────────────

fn retro_layout(theme: &Theme, w: f32, h: f32, footer: &str) -> Vec<Box<dyn Widget>> {
    let gap = theme.geometry.segment_gap_deg;
    let rim = Rect::new(w * 0.02, h * 0.04, w * 0.96, h * 0.92);

    // Conta-giros: arco largo cujo topo fica logo abaixo da borda
    let tach_r = w * 0.40;
    let tach_c = Point::new(w / 2.0, h * 0.16 + tach_r);

    let speed_area = Rect::from_center(Point::new(w / 2.0, h * 0.45), w * 0.26, h * 0.18);
    let digits = SevenSegmentDisplay::scaled(h / 720.0);

    let fuel_rect = Rect::new(w * 0.05, h * 0.22, w * 0.035, h * 0.45);

    let mini_r = w * 0.09;
    let coolant_c = Point::new(w * 0.26, h * 0.92);
    let press_c = Point::new(w * 0.74, h * 0.92);

    let spacing = w * 0.08;
    let icons_at = Point::new(w / 2.0 - 2.5 * spacing, h * 0.66);

    let mut widgets: Vec<Box<dyn Widget>> = Vec::new();
    widgets.push(Box::new(Backdrop::new(w, h).panel(rim, 30.0)));
    widgets.push(Box::new(
        SegmentedArc::new(SensorField::Rpm, tach_c, tach_r, -172.0, -8.0, 57)
            .domain(0.0, 9000.0)
            .warning_from(8.0 / 9.0)
            .stroke(28.0, 20.0)
            .scale(9, 1000.0)
            .caption("x1000 r/min", Point::new(w / 2.0, h * 0.31)),
    ));
    widgets.push(Box::new(SpeedReadout::new(
        speed_area,
        SpeedStyle::SevenSegment(digits),
    )));
    widgets.push(Box::new(LambdaReadout::plain(Point::new(
        w / 2.0,
        speed_area.bottom() + 26.0,
    ))));
    widgets.push(Box::new(InfoLine::new(Point::new(
        w / 2.0,
        speed_area.bottom() + 54.0,
    ))));
    widgets.push(Box::new(FuelBar::new(fuel_rect, FuelStyle::Cells(14))));

    widgets.push(Box::new(
        SegmentedArc::new(SensorField::CoolantTemp, coolant_c, mini_r, 200.0, 340.0, 16)
            .gap(gap)
            .end_labels("L", "H")
            .caption("Temp. Água", coolant_c.offset(0.0, 4.0)),
    ));
    widgets.push(Box::new(
        SegmentedArc::new(SensorField::OilPressure, press_c, mini_r, 200.0, 340.0, 16)
            .gap(gap)
            .end_labels("0", "7")
            .caption("Press. Óleo", press_c.offset(0.0, 4.0)),
    ));

    widgets.push(Box::new(IndicatorRow::evenly(&ICON_ORDER, icons_at, spacing)));
    widgets.push(Box::new(Caption::new(
        footer,
        Point::new(w / 2.0, h * 0.985),
        FontRole::Tiny,
    )));
    widgets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{CommandList, DrawCommand};
    use crate::theme::{classic_theme, retro_theme};
    use pretty_assertions::assert_eq;

    #[test]
    fn classic_draw_order() {
        let cluster = Cluster::new(classic_theme(), 1280.0, 720.0, "rodapé");
        assert_eq!(
            cluster.widget_names(),
            vec![
                "backdrop",
                "rpm",
                "fuel_level",
                "speed",
                "lambda",
                "coolant_temp",
                "oil_temp",
                "oil_pressure",
                "turbo_pressure",
                "battery_voltage",
                "indicators",
                "caption",
            ]
        );
    }

    #[test]
    fn retro_draw_order() {
        let cluster = Cluster::new(retro_theme(), 1280.0, 720.0, "rodapé");
        assert_eq!(
            cluster.widget_names(),
            vec![
                "backdrop",
                "rpm",
                "speed",
                "lambda",
                "info",
                "fuel_level",
                "coolant_temp",
                "oil_pressure",
                "indicators",
                "caption",
            ]
        );
    }

    #[test]
    fn render_starts_with_clear_and_ends_with_footer() {
        for theme in [classic_theme(), retro_theme()] {
            let bg = theme.colors.bg;
            let cluster = Cluster::new(theme, 1280.0, 720.0, "ESC para sair");
            let mut canvas = CommandList::new();
            cluster.render(&mut canvas, &SensorSnapshot::default());
            assert_eq!(canvas.commands[0], DrawCommand::Clear(bg));
            assert_eq!(canvas.texts().last(), Some(&"ESC para sair"));
        }
    }

    #[test]
    fn classic_shows_speed_and_lambda() {
        let cluster = Cluster::new(classic_theme(), 1280.0, 720.0, "");
        let snapshot = SensorSnapshot {
            speed: 123.0,
            lambda: 0.92,
            ..Default::default()
        };
        let mut canvas = CommandList::new();
        cluster.render(&mut canvas, &snapshot);
        let texts = canvas.texts();
        assert!(texts.contains(&"123"));
        assert!(texts.contains(&"λ 0.92"));
        assert!(texts.contains(&"Turbo"));
    }

    #[test]
    fn custom_widget_list() {
        let theme = classic_theme();
        let widgets: Vec<Box<dyn Widget>> = vec![Box::new(Caption::new(
            "só texto",
            Point::new(10.0, 10.0),
            FontRole::Small,
        ))];
        let cluster = Cluster::from_widgets(theme, widgets);
        let mut canvas = CommandList::new();
        cluster.render(&mut canvas, &SensorSnapshot::default());
        assert_eq!(canvas.texts(), vec!["só texto"]);
    }
}
