//! Arco segmentado (conta-giros retro e mini gauges).

use super::Widget;
use crate::draw::{Anchor, Canvas, Point, Rect};
use crate::mapper::{map_range, normalize, polar};
use crate::theme::{FontRole, Theme};
use crate::types::{SensorField, SensorSnapshot};

/// Um segmento pré-calculado do arco.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub start_deg: f32,
    pub end_deg: f32,
    /// Fração do domínio em que o segmento termina, `(i+1)/N`
    pub end_fraction: f32,
    /// Aceso, usa a cor de alerta
    pub warning: bool,
}

/// Marcas numeradas ao longo do arco.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScaleMarks {
    divisions: u32,
    divisor: f32,
}

pub struct SegmentedArc {
    field: SensorField,
    center: Point,
    radius: f32,
    start_deg: f32,
    end_deg: f32,
    count: u32,
    vmin: f32,
    vmax: f32,
    width: f32,
    inset: f32,
    gap_deg: f32,
    warning_from: f32,
    segments: Vec<ArcSegment>,
    scale: Option<ScaleMarks>,
    caption: Option<(String, Point)>,
    end_labels: Option<(String, String)>,
}

impl SegmentedArc {
    /// `count` segmentos de `start_deg` a `end_deg`, no domínio do campo.
    pub fn new(
        field: SensorField,
        center: Point,
        radius: f32,
        start_deg: f32,
        end_deg: f32,
        count: u32,
    ) -> Self {
        let (vmin, vmax) = field.domain();
        let mut arc = Self {
            field,
            center,
            radius,
            start_deg,
            end_deg,
            count,
            vmin,
            vmax,
            width: 18.0,
            inset: 16.0,
            gap_deg: 0.0,
            warning_from: 0.8,
            segments: Vec::new(),
            scale: None,
            caption: None,
            end_labels: None,
        };
        arc.rebuild();
        arc
    }

    pub fn domain(mut self, vmin: f32, vmax: f32) -> Self {
        self.vmin = vmin;
        self.vmax = vmax;
        self
    }

    /// Espessura do arco e recuo do retângulo em relação ao raio.
    pub fn stroke(mut self, width: f32, inset: f32) -> Self {
        self.width = width;
        self.inset = inset;
        self
    }

    /// Espaço angular entre segmentos.
    pub fn gap(mut self, gap_deg: f32) -> Self {
        self.gap_deg = gap_deg.abs();
        self.rebuild();
        self
    }

    /// Segmentos cuja fração inicial é `>= fraction` acendem em alerta.
    pub fn warning_from(mut self, fraction: f32) -> Self {
        self.warning_from = fraction;
        self.rebuild();
        self
    }

    /// Marcas numeradas: `divisions + 1` marcas, rótulo = valor / `divisor`.
    pub fn scale(mut self, divisions: u32, divisor: f32) -> Self {
        self.scale = (divisions > 0).then_some(ScaleMarks { divisions, divisor });
        self
    }

    pub fn caption(mut self, text: &str, at: Point) -> Self {
        self.caption = Some((text.to_owned(), at));
        self
    }

    pub fn end_labels(mut self, low: &str, high: &str) -> Self {
        self.end_labels = Some((low.to_owned(), high.to_owned()));
        self
    }

    fn rebuild(&mut self) {
        let n = self.count as f32;
        let dir = if self.end_deg < self.start_deg { -1.0 } else { 1.0 };
        self.segments = (0..self.count)
            .map(|i| {
                let i = i as f32;
                let a = map_range(i, 0.0, n, self.start_deg, self.end_deg);
                let b = map_range(i + 1.0, 0.0, n, self.start_deg, self.end_deg) - dir * self.gap_deg;
                ArcSegment {
                    start_deg: a,
                    end_deg: b,
                    end_fraction: (i + 1.0) / n,
                    warning: i / n >= self.warning_from,
                }
            })
            .collect();
    }

    pub fn segments(&self) -> &[ArcSegment] {
        &self.segments
    }

    /// Quantos segmentos, a partir do início, acendem para `value`.
    pub fn lit_count(&self, value: f32) -> usize {
        let level = normalize(value, self.vmin, self.vmax);
        self.segments
            .iter()
            .take_while(|s| s.end_fraction <= level)
            .count()
    }

    fn direction(&self) -> f32 {
        if self.end_deg < self.start_deg { -1.0 } else { 1.0 }
    }

    fn draw_scale(&self, canvas: &mut dyn Canvas, marks: ScaleMarks, theme: &Theme) {
        let colors = &theme.colors;
        let font = theme.fonts.get(FontRole::Small);
        let d = marks.divisions as f32;
        for k in 0..=marks.divisions {
            let k = k as f32;
            let angle = map_range(k, 0.0, d, self.start_deg, self.end_deg);
            let outer = polar(self.center, self.radius - 6.0, angle);
            let inner = polar(self.center, self.radius - 6.0 - self.width, angle);
            canvas.line(outer, inner, 2.0, colors.text);

            let value = self.vmin + (self.vmax - self.vmin) * k / d;
            let text = format!("{}", (value / marks.divisor).round() as i64);
            let at = polar(self.center, self.radius - self.width - 24.0, angle);
            canvas.text(&text, at, Anchor::Center, font, colors.text);
        }
    }
}

impl Widget for SegmentedArc {
    fn name(&self) -> &str {
        self.field.key()
    }

    fn draw(&self, canvas: &mut dyn Canvas, snapshot: &SensorSnapshot, theme: &Theme) {
        let colors = &theme.colors;
        let bounds = Rect::around(self.center, self.radius).inflate(-self.inset, -self.inset);
        let lit = self.lit_count(self.field.read(snapshot));

        for (i, seg) in self.segments.iter().enumerate() {
            let color = if i >= lit {
                colors.segment_off
            } else if seg.warning {
                colors.segment_warning
            } else {
                colors.segment_on
            };
            canvas.arc(bounds, seg.start_deg, seg.end_deg, self.width, color);
        }

        if let Some(marks) = self.scale {
            self.draw_scale(canvas, marks, theme);
        }

        if let Some((low, high)) = &self.end_labels {
            let dir = self.direction();
            let r = self.radius - self.width - 8.0;
            let font = theme.fonts.get(FontRole::Small);
            let p_low = polar(self.center, r, self.start_deg - dir * 4.0);
            let p_high = polar(self.center, r, self.end_deg + dir * 4.0);
            canvas.text(low, p_low, Anchor::Center, font, colors.text);
            canvas.text(high, p_high, Anchor::Center, font, colors.text);
        }

        if let Some((text, at)) = &self.caption {
            canvas.text(text, *at, Anchor::Center, theme.fonts.get(FontRole::Small), colors.muted);
        }
    }
}
