//! Leituras textuais e elementos de fundo do painel.

use super::Widget;
use super::seven_segment::{SevenSegmentDisplay, format_digits};
use crate::draw::{Anchor, Canvas, Paint, Point, Rect};
use crate::theme::{FontRole, Theme};
use crate::types::SensorSnapshot;

// ──────────────────────────────────────────────
// Fundo
// ──────────────────────────────────────────────

/// Limpa a tela e desenha moldura e painéis fixos.
pub struct Backdrop {
    screen: Rect,
    border: Option<(f32, f32)>,
    panels: Vec<(Rect, f32)>,
}

impl Backdrop {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            screen: Rect::new(0.0, 0.0, width, height),
            border: None,
            panels: Vec::new(),
        }
    }

    /// Moldura ao redor da tela inteira.
    pub fn border(mut self, width: f32, radius: f32) -> Self {
        self.border = Some((width, radius));
        self
    }

    /// Painel preenchido com contorno.
    pub fn panel(mut self, rect: Rect, radius: f32) -> Self {
        self.panels.push((rect, radius));
        self
    }
}

impl Widget for Backdrop {
    fn name(&self) -> &str {
        "backdrop"
    }

    fn draw(&self, canvas: &mut dyn Canvas, _snapshot: &SensorSnapshot, theme: &Theme) {
        let colors = &theme.colors;
        canvas.clear(colors.bg);
        if let Some((width, radius)) = self.border {
            canvas.rounded_rect(self.screen, radius, Paint::Stroke { color: colors.frame, width });
        }
        for (rect, radius) in &self.panels {
            canvas.rounded_rect(*rect, *radius, Paint::Fill(colors.panel));
            canvas.rounded_rect(*rect, *radius, Paint::Stroke { color: colors.edge, width: 3.0 });
        }
    }
}

// ──────────────────────────────────────────────
// Velocidade
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedStyle {
    /// Número grande em fonte proporcional
    Text,
    /// Três dígitos de 7 segmentos sobre painel próprio
    SevenSegment(SevenSegmentDisplay),
}

/// Velocidade (km/h) centrada em `area`.
pub struct SpeedReadout {
    area: Rect,
    style: SpeedStyle,
}

impl SpeedReadout {
    pub fn new(area: Rect, style: SpeedStyle) -> Self {
        Self { area, style }
    }

    pub fn area(&self) -> Rect {
        self.area
    }
}

impl Widget for SpeedReadout {
    fn name(&self) -> &str {
        "speed"
    }

    fn draw(&self, canvas: &mut dyn Canvas, snapshot: &SensorSnapshot, theme: &Theme) {
        let colors = &theme.colors;
        let small = theme.fonts.get(FontRole::Small);
        let c = self.area.center();

        match self.style {
            SpeedStyle::Text => {
                let speed = format!("{}", snapshot.speed.trunc() as i64);
                canvas.text(
                    &speed,
                    c.offset(0.0, -10.0),
                    Anchor::Center,
                    theme.fonts.get(FontRole::Huge),
                    colors.text,
                );
                canvas.text(
                    "km/h",
                    c.offset(0.0, self.area.h * 0.18),
                    Anchor::Center,
                    small,
                    colors.muted,
                );
            }
            SpeedStyle::SevenSegment(display) => {
                canvas.rounded_rect(self.area, 18.0, Paint::Fill(colors.digit_panel));
                canvas.rounded_rect(
                    self.area,
                    18.0,
                    Paint::Stroke {
                        color: colors.digit_edge,
                        width: 3.0,
                    },
                );
                let digits = format_digits(snapshot.speed, 3);
                let x0 = c.x - display.text_width(3) / 2.0;
                display.draw_str(canvas, Point::new(x0, self.area.top() + 8.0), &digits, theme);
                canvas.text(
                    "km/h",
                    Point::new(self.area.right() - 12.0, c.y + 18.0),
                    Anchor::MidRight,
                    small,
                    colors.muted,
                );
            }
        }
    }
}

// ──────────────────────────────────────────────
// Lambda, linha de informações e legendas
// ──────────────────────────────────────────────

/// Sonda lambda, `λ 0.00`; opcionalmente dentro de uma caixa.
pub struct LambdaReadout {
    at: Point,
    boxed: Option<Rect>,
}

impl LambdaReadout {
    pub fn plain(at: Point) -> Self {
        Self { at, boxed: None }
    }

    pub fn boxed(rect: Rect) -> Self {
        Self {
            at: rect.center(),
            boxed: Some(rect),
        }
    }

    pub fn text(snapshot: &SensorSnapshot) -> String {
        format!("λ {:.2}", snapshot.lambda)
    }
}

impl Widget for LambdaReadout {
    fn name(&self) -> &str {
        "lambda"
    }

    fn draw(&self, canvas: &mut dyn Canvas, snapshot: &SensorSnapshot, theme: &Theme) {
        let colors = &theme.colors;
        let role = match self.boxed {
            Some(rect) => {
                canvas.rounded_rect(rect, 16.0, Paint::Fill(colors.panel));
                canvas.rounded_rect(rect, 16.0, Paint::Stroke { color: colors.edge, width: 2.0 });
                FontRole::Big
            }
            None => FontRole::Medium,
        };
        canvas.text(&Self::text(snapshot), self.at, Anchor::Center, theme.fonts.get(role), colors.accent);
    }
}

/// Turbo, bateria e temperatura do óleo numa linha só.
pub struct InfoLine {
    at: Point,
}

impl InfoLine {
    pub fn new(at: Point) -> Self {
        Self { at }
    }

    pub fn text(s: &SensorSnapshot) -> String {
        format!(
            "TUR {:+.1} bar   BAT {:.1} V   ÓLEO {:.0}°C",
            s.turbo_pressure, s.battery_voltage, s.oil_temp
        )
    }
}

impl Widget for InfoLine {
    fn name(&self) -> &str {
        "info"
    }

    fn draw(&self, canvas: &mut dyn Canvas, snapshot: &SensorSnapshot, theme: &Theme) {
        canvas.text(
            &Self::text(snapshot),
            self.at,
            Anchor::Center,
            theme.fonts.get(FontRole::Small),
            theme.colors.muted,
        );
    }
}

/// Texto fixo (rodapé, rótulos soltos).
pub struct Caption {
    text: String,
    at: Point,
    role: FontRole,
}

impl Caption {
    pub fn new(text: &str, at: Point, role: FontRole) -> Self {
        Self {
            text: text.to_owned(),
            at,
            role,
        }
    }
}

impl Widget for Caption {
    fn name(&self) -> &str {
        "caption"
    }

    fn draw(&self, canvas: &mut dyn Canvas, _snapshot: &SensorSnapshot, theme: &Theme) {
        canvas.text(&self.text, self.at, Anchor::Center, theme.fonts.get(self.role), theme.colors.muted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{CommandList, DrawCommand};
    use crate::theme::{classic_theme, retro_theme};
    use pretty_assertions::assert_eq;

    fn moving(speed: f32) -> SensorSnapshot {
        SensorSnapshot {
            speed,
            ..Default::default()
        }
    }

    #[test]
    fn text_speed_truncates() {
        let widget = SpeedReadout::new(Rect::new(0.0, 0.0, 400.0, 240.0), SpeedStyle::Text);
        let mut canvas = CommandList::new();
        widget.draw(&mut canvas, &moving(87.9), &classic_theme());
        assert_eq!(canvas.texts(), vec!["87", "km/h"]);
    }

    #[test]
    fn seven_segment_speed_draws_three_digits() {
        let display = SevenSegmentDisplay {
            glow: false,
            ..Default::default()
        };
        let widget = SpeedReadout::new(
            Rect::new(0.0, 0.0, 330.0, 130.0),
            SpeedStyle::SevenSegment(display),
        );
        let theme = retro_theme();
        let mut canvas = CommandList::new();
        widget.draw(&mut canvas, &moving(42.0), &theme);
        // painel + contorno + 3 dígitos × 7 segmentos
        assert_eq!(canvas.rects().len(), 2 + 21);
        assert_eq!(canvas.texts(), vec!["km/h"]);
        // Coluna das centenas fica apagada
        let rects = canvas.rects();
        let first_digit = &rects[2..9];
        assert!(
            first_digit
                .iter()
                .all(|(_, p)| *p == Paint::Fill(theme.colors.digit_off))
        );
    }

    #[test]
    fn lambda_and_info_formatting() {
        let s = SensorSnapshot {
            lambda: 0.987,
            turbo_pressure: 0.48,
            battery_voltage: 13.8,
            oil_temp: 96.4,
            ..Default::default()
        };
        assert_eq!(LambdaReadout::text(&s), "λ 0.99");
        assert_eq!(InfoLine::text(&s), "TUR +0.5 bar   BAT 13.8 V   ÓLEO 96°C");

        let negative = SensorSnapshot {
            turbo_pressure: -0.62,
            ..s
        };
        assert!(InfoLine::text(&negative).starts_with("TUR -0.6 bar"));
    }

    #[test]
    fn boxed_lambda_uses_big_font() {
        let theme = classic_theme();
        let mut canvas = CommandList::new();
        LambdaReadout::boxed(Rect::new(0.0, 0.0, 200.0, 64.0)).draw(
            &mut canvas,
            &SensorSnapshot::default(),
            &theme,
        );
        assert_eq!(canvas.rects().len(), 2);
        let Some(DrawCommand::Text { size, at, .. }) = canvas.commands.last() else {
            panic!("texto ausente");
        };
        assert_eq!(*size, theme.fonts.big);
        assert_eq!(*at, Point::new(100.0, 32.0));
    }

    #[test]
    fn backdrop_clears_first() {
        let theme = classic_theme();
        let backdrop = Backdrop::new(1280.0, 720.0)
            .border(6.0, 18.0)
            .panel(Rect::new(100.0, 100.0, 200.0, 100.0), 24.0);
        let mut canvas = CommandList::new();
        backdrop.draw(&mut canvas, &SensorSnapshot::default(), &theme);
        assert_eq!(canvas.commands[0], DrawCommand::Clear(theme.colors.bg));
        assert_eq!(canvas.rects().len(), 3);
    }
}
