//! Implementação de [`Canvas`] sobre `egui::Painter`.
//!
//! O layout é calculado para um tamanho lógico fixo; aqui ele é escalado
//! uniformemente e centralizado na área disponível.

use cluster_core::draw::{Anchor, Canvas, Paint, Point, Rect, Rgba};
use cluster_core::mapper::polar;
use egui::{Align2, Color32, FontId, Pos2, Shape, Stroke, StrokeKind, Vec2};

/// Passo máximo (graus) da poligonal que aproxima um arco.
const ARC_STEP_DEG: f32 = 2.0;

pub fn color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

pub struct EguiCanvas<'a> {
    painter: &'a egui::Painter,
    area: egui::Rect,
    origin: Pos2,
    scale: f32,
}

impl<'a> EguiCanvas<'a> {
    /// Encaixa uma superfície lógica `width` × `height` em `area`.
    pub fn fit(painter: &'a egui::Painter, area: egui::Rect, width: f32, height: f32) -> Self {
        let scale = (area.width() / width).min(area.height() / height).max(0.01);
        let used = Vec2::new(width * scale, height * scale);
        let origin = area.min + (area.size() - used) / 2.0;
        Self {
            painter,
            area,
            origin,
            scale,
        }
    }

    fn pos(&self, p: Point) -> Pos2 {
        self.origin + Vec2::new(p.x, p.y) * self.scale
    }

    fn rect(&self, r: Rect) -> egui::Rect {
        egui::Rect::from_min_size(self.pos(Point::new(r.x, r.y)), Vec2::new(r.w, r.h) * self.scale)
    }
}

fn align(anchor: Anchor) -> Align2 {
    match anchor {
        Anchor::Center => Align2::CENTER_CENTER,
        Anchor::TopLeft => Align2::LEFT_TOP,
        Anchor::TopRight => Align2::RIGHT_TOP,
        Anchor::MidLeft => Align2::LEFT_CENTER,
        Anchor::MidRight => Align2::RIGHT_CENTER,
    }
}

impl Canvas for EguiCanvas<'_> {
    fn clear(&mut self, color: Rgba) {
        self.painter.rect_filled(self.area, 0.0, color32(color));
    }

    fn rounded_rect(&mut self, rect: Rect, radius: f32, paint: Paint) {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return;
        }
        let r = self.rect(rect);
        let radius = (radius * self.scale).min(r.width().min(r.height()) / 2.0);
        match paint {
            Paint::Fill(c) => {
                self.painter.rect_filled(r, radius, color32(c));
            }
            Paint::Stroke { color, width } => {
                let stroke = Stroke::new(width * self.scale, color32(color));
                self.painter.rect_stroke(r, radius, stroke, StrokeKind::Inside);
            }
        }
    }

    fn arc(&mut self, bounds: Rect, start_deg: f32, end_deg: f32, width: f32, color: Rgba) {
        let center = bounds.center();
        // A espessura cresce para dentro do círculo inscrito
        let radius = bounds.radius() - width / 2.0;
        if radius <= 0.0 {
            return;
        }
        let span = end_deg - start_deg;
        let steps = (span.abs() / ARC_STEP_DEG).ceil().max(1.0) as usize;
        let points: Vec<Pos2> = (0..=steps)
            .map(|i| {
                let a = start_deg + span * i as f32 / steps as f32;
                self.pos(polar(center, radius, a))
            })
            .collect();
        self.painter
            .add(Shape::line(points, Stroke::new(width * self.scale, color32(color))));
    }

    fn line(&mut self, from: Point, to: Point, width: f32, color: Rgba) {
        self.painter.line_segment(
            [self.pos(from), self.pos(to)],
            Stroke::new(width * self.scale, color32(color)),
        );
    }

    fn circle(&mut self, center: Point, radius: f32, paint: Paint) {
        let c = self.pos(center);
        let r = radius * self.scale;
        match paint {
            Paint::Fill(color) => {
                self.painter.circle_filled(c, r, color32(color));
            }
            Paint::Stroke { color, width } => {
                let stroke = Stroke::new(width * self.scale, color32(color));
                self.painter.circle_stroke(c, r, stroke);
            }
        }
    }

    fn text(&mut self, text: &str, at: Point, anchor: Anchor, size: f32, color: Rgba) {
        if text.is_empty() {
            return;
        }
        self.painter.text(
            self.pos(at),
            align(anchor),
            text,
            FontId::proportional(size * self.scale),
            color32(color),
        );
    }
}
