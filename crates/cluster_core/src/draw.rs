//! Contrato do backend de desenho.
//!
//! O motor de gauges só emite primitivas através de [`Canvas`]: retângulo
//! arredondado, arco, linha, círculo e texto ancorado. O binário implementa
//! o trait sobre `egui::Painter`; os testes usam [`CommandList`].

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Tipos geométricos
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Retângulo em coordenadas de tela (origem no canto superior esquerdo).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(center: Point, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    /// Quadrado que circunscreve o círculo `(center, radius)`.
    pub fn around(center: Point, radius: f32) -> Self {
        Self::from_center(center, radius * 2.0, radius * 2.0)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Cresce (ou encolhe, com valores negativos) mantendo o centro.
    pub fn inflate(&self, dw: f32, dh: f32) -> Self {
        Self::new(self.x - dw / 2.0, self.y - dh / 2.0, self.w + dw, self.h + dh)
    }

    /// Raio do círculo inscrito.
    pub fn radius(&self) -> f32 {
        self.w.min(self.h) / 2.0
    }
}

// ──────────────────────────────────────────────
// Cor e estilo
// ──────────────────────────────────────────────

/// Cor RGBA; serializada como "#RRGGBB[AA]" (ver [`crate::theme::hex_to_rgba`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Preenchimento sólido ou contorno com espessura.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Fill(Rgba),
    Stroke { color: Rgba, width: f32 },
}

impl Paint {
    pub fn color(&self) -> Rgba {
        match *self {
            Paint::Fill(c) => c,
            Paint::Stroke { color, .. } => color,
        }
    }
}

/// Ponto de ancoragem do texto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Center,
    TopLeft,
    TopRight,
    MidLeft,
    MidRight,
}

// ──────────────────────────────────────────────
// Contrato
// ──────────────────────────────────────────────

/// Capacidades exigidas do backend de desenho.
///
/// Ângulos em graus, convenção de tela (ver [`crate::mapper::polar`]). O arco
/// vai de `start_deg` até `end_deg` no sentido que o sinal da diferença indica.
pub trait Canvas {
    /// Limpa a superfície inteira.
    fn clear(&mut self, color: Rgba);

    fn rounded_rect(&mut self, rect: Rect, radius: f32, paint: Paint);

    /// Arco do círculo inscrito em `bounds`, com espessura `width` para dentro.
    fn arc(&mut self, bounds: Rect, start_deg: f32, end_deg: f32, width: f32, color: Rgba);

    fn line(&mut self, from: Point, to: Point, width: f32, color: Rgba);

    fn circle(&mut self, center: Point, radius: f32, paint: Paint);

    fn text(&mut self, text: &str, at: Point, anchor: Anchor, size: f32, color: Rgba);
}

/// Primitiva gravada por [`CommandList`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    RoundedRect {
        rect: Rect,
        radius: f32,
        paint: Paint,
    },
    Arc {
        bounds: Rect,
        start_deg: f32,
        end_deg: f32,
        width: f32,
        color: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        width: f32,
        color: Rgba,
    },
    Circle {
        center: Point,
        radius: f32,
        paint: Paint,
    },
    Text {
        text: String,
        at: Point,
        anchor: Anchor,
        size: f32,
        color: Rgba,
    },
}

/// Canvas que apenas grava os comandos, em ordem.
#[derive(Debug, Default)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Arcos gravados como `(start, end, color)`.
    pub fn arcs(&self) -> Vec<(f32, f32, Rgba)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc {
                    start_deg,
                    end_deg,
                    color,
                    ..
                } => Some((*start_deg, *end_deg, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<(Point, Point, f32, Rgba)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line {
                    from,
                    to,
                    width,
                    color,
                } => Some((*from, *to, *width, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn rects(&self) -> Vec<(Rect, Paint)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::RoundedRect { rect, paint, .. } => Some((*rect, *paint)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for CommandList {
    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn rounded_rect(&mut self, rect: Rect, radius: f32, paint: Paint) {
        self.commands.push(DrawCommand::RoundedRect {
            rect,
            radius,
            paint,
        });
    }

    fn arc(&mut self, bounds: Rect, start_deg: f32, end_deg: f32, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Arc {
            bounds,
            start_deg,
            end_deg,
            width,
            color,
        });
    }

    fn line(&mut self, from: Point, to: Point, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn circle(&mut self, center: Point, radius: f32, paint: Paint) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            paint,
        });
    }

    fn text(&mut self, text: &str, at: Point, anchor: Anchor, size: f32, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            at,
            anchor,
            size,
            color,
        });
    }
}
