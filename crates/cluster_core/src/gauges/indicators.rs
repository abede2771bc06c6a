//! Luzes-espia: setas, lanternas, farol baixo/alto e freio de mão.

use super::Widget;
use crate::draw::{Anchor, Canvas, Paint, Point, Rect, Rgba};
use crate::theme::{FontRole, Theme};
use crate::types::{Lamp, SensorSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorIcon {
    ArrowLeft,
    ArrowRight,
    Parking,
    LowBeam,
    HighBeam,
    Handbrake,
}

impl IndicatorIcon {
    /// Sinal que acende o ícone.
    pub fn lamp(self) -> Lamp {
        match self {
            IndicatorIcon::ArrowLeft => Lamp::LeftBlinker,
            IndicatorIcon::ArrowRight => Lamp::RightBlinker,
            IndicatorIcon::Parking => Lamp::Parking,
            IndicatorIcon::LowBeam => Lamp::LowBeam,
            IndicatorIcon::HighBeam => Lamp::HighBeam,
            IndicatorIcon::Handbrake => Lamp::Handbrake,
        }
    }

    pub fn color(self, on: bool, theme: &Theme) -> Rgba {
        let c = &theme.colors;
        match (self, on) {
            (IndicatorIcon::Handbrake, true) => c.lamp_handbrake,
            (IndicatorIcon::Handbrake, false) => c.lamp_handbrake_off,
            (_, false) => c.lamp_off,
            (IndicatorIcon::ArrowLeft | IndicatorIcon::ArrowRight, true) => c.lamp_blinker,
            (IndicatorIcon::Parking, true) => c.lamp_parking,
            (IndicatorIcon::LowBeam, true) => c.lamp_low,
            (IndicatorIcon::HighBeam, true) => c.lamp_high,
        }
    }

    /// Desenha o ícone centrado em `at`.
    pub fn draw(self, canvas: &mut dyn Canvas, at: Point, on: bool, theme: &Theme) {
        let col = self.color(on, theme);
        let Point { x, y } = at;
        match self {
            IndicatorIcon::ArrowLeft | IndicatorIcon::ArrowRight => {
                let s = if self == IndicatorIcon::ArrowLeft { 1.0 } else { -1.0 };
                let tip = Point::new(x - 12.0 * s, y);
                canvas.line(tip, Point::new(x + 28.0 * s, y - 12.0), 4.0, col);
                canvas.line(tip, Point::new(x + 28.0 * s, y + 12.0), 4.0, col);
                canvas.line(tip, Point::new(x + 20.0 * s, y), 4.0, col);
            }
            IndicatorIcon::Parking => {
                canvas.circle(Point::new(x - 8.0, y), 7.0, Paint::Stroke { color: col, width: 2.0 });
                for i in -1..=1 {
                    let bounds = Rect::new(x - 2.0, y - 13.0 + i as f32 * 2.0, 26.0, 26.0);
                    canvas.arc(bounds, -35.0, 35.0, 2.0, col);
                }
            }
            IndicatorIcon::LowBeam => {
                canvas.circle(Point::new(x - 8.0, y), 7.0, Paint::Stroke { color: col, width: 2.0 });
                for i in -1..=1 {
                    let dy = i as f32 * 8.0;
                    canvas.line(
                        Point::new(x + 2.0, y - 8.0 + dy),
                        Point::new(x + 24.0, y - 4.0 + dy),
                        2.0,
                        col,
                    );
                }
            }
            IndicatorIcon::HighBeam => {
                canvas.circle(Point::new(x - 8.0, y), 7.0, Paint::Stroke { color: col, width: 2.0 });
                for i in -2..=2 {
                    let ly = y + i as f32 * 5.0;
                    canvas.line(Point::new(x + 2.0, ly), Point::new(x + 26.0, ly), 2.0, col);
                }
            }
            IndicatorIcon::Handbrake => {
                canvas.circle(at, 14.0, Paint::Stroke { color: col, width: 3.0 });
                canvas.text("P", at, Anchor::Center, theme.fonts.get(FontRole::Small), col);
            }
        }
    }
}

/// Fileira de ícones; cada um acende conforme seu sinal no snapshot.
pub struct IndicatorRow {
    items: Vec<(IndicatorIcon, Point)>,
}

impl IndicatorRow {
    pub fn new(items: Vec<(IndicatorIcon, Point)>) -> Self {
        Self { items }
    }

    /// Ícones igualmente espaçados na horizontal a partir de `first`.
    pub fn evenly(icons: &[IndicatorIcon], first: Point, spacing: f32) -> Self {
        let items = icons
            .iter()
            .enumerate()
            .map(|(i, icon)| (*icon, first.offset(spacing * i as f32, 0.0)))
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[(IndicatorIcon, Point)] {
        &self.items
    }
}

impl Widget for IndicatorRow {
    fn name(&self) -> &str {
        "indicators"
    }

    fn draw(&self, canvas: &mut dyn Canvas, snapshot: &SensorSnapshot, theme: &Theme) {
        for (icon, at) in &self.items {
            icon.draw(canvas, *at, icon.lamp().read(snapshot), theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{CommandList, DrawCommand};
    use crate::theme::classic_theme;

    fn colors_of(canvas: &CommandList) -> Vec<Rgba> {
        canvas
            .commands
            .iter()
            .map(|c| match c {
                DrawCommand::Line { color, .. }
                | DrawCommand::Arc { color, .. }
                | DrawCommand::Text { color, .. } => *color,
                DrawCommand::Circle { paint, .. } | DrawCommand::RoundedRect { paint, .. } => {
                    paint.color()
                }
                DrawCommand::Clear(c) => *c,
            })
            .collect()
    }

    #[test]
    fn blinkers_follow_snapshot() {
        let theme = classic_theme();
        let row = IndicatorRow::evenly(
            &[IndicatorIcon::ArrowLeft, IndicatorIcon::ArrowRight],
            Point::new(100.0, 50.0),
            80.0,
        );
        assert_eq!(row.items()[1].1, Point::new(180.0, 50.0));

        let snapshot = SensorSnapshot {
            left_blinker: true,
            right_blinker: false,
            ..Default::default()
        };
        let mut canvas = CommandList::new();
        row.draw(&mut canvas, &snapshot, &theme);
        let colors = colors_of(&canvas);
        assert_eq!(colors.len(), 6);
        assert!(colors[..3].iter().all(|c| *c == theme.colors.lamp_blinker));
        assert!(colors[3..].iter().all(|c| *c == theme.colors.lamp_off));
    }

    #[test]
    fn handbrake_has_own_off_color() {
        let theme = classic_theme();
        assert_eq!(
            IndicatorIcon::Handbrake.color(false, &theme),
            theme.colors.lamp_handbrake_off
        );
        assert_eq!(IndicatorIcon::HighBeam.color(false, &theme), theme.colors.lamp_off);
        assert_eq!(IndicatorIcon::HighBeam.color(true, &theme), theme.colors.lamp_high);

        let mut canvas = CommandList::new();
        IndicatorIcon::Handbrake.draw(&mut canvas, Point::new(0.0, 0.0), true, &theme);
        assert_eq!(canvas.texts(), vec!["P"]);
        assert!(colors_of(&canvas).iter().all(|c| *c == theme.colors.lamp_handbrake));
    }

    #[test]
    fn every_lamp_has_an_icon() {
        let icons = [
            IndicatorIcon::ArrowLeft,
            IndicatorIcon::ArrowRight,
            IndicatorIcon::Parking,
            IndicatorIcon::LowBeam,
            IndicatorIcon::HighBeam,
            IndicatorIcon::Handbrake,
        ];
        let keys: Vec<&str> = icons.iter().map(|i| i.lamp().key()).collect();
        assert_eq!(
            keys,
            vec![
                "left_blinker",
                "right_blinker",
                "lights_parking",
                "lights_low",
                "lights_high",
                "handbrake"
            ]
        );
    }
}
