//! Display de 7 segmentos.
//!
//! Segmentos: a = topo, b = superior direito, c = inferior direito,
//! d = base, e = inferior esquerdo, f = superior esquerdo, g = meio.

use crate::draw::{Canvas, Paint, Point, Rect};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Segment {
    pub const ALL: [Segment; 7] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }

    /// `true` se o segmento acende para `ch`.
    pub fn is_lit(self, ch: char) -> bool {
        pattern(ch) & self.bit() != 0
    }
}

/// Máscara de segmentos acesos (bit 0 = a … bit 6 = g).
/// Caracteres sem desenho ficam em branco.
pub const fn pattern(ch: char) -> u8 {
    match ch {
        '0' => 0b011_1111,
        '1' => 0b000_0110,
        '2' => 0b101_1011,
        '3' => 0b100_1111,
        '4' => 0b110_0110,
        '5' => 0b110_1101,
        '6' => 0b111_1101,
        '7' => 0b000_0111,
        '8' => 0b111_1111,
        '9' => 0b110_1111,
        '-' => 0b100_0000,
        _ => 0,
    }
}

/// Parte inteira de `value` alinhada à direita em `width` colunas.
/// Se não couber, ficam os últimos `width` caracteres.
pub fn format_digits(value: f32, width: usize) -> String {
    let text = format!("{:>width$}", value.trunc() as i64);
    let skip = text.chars().count().saturating_sub(width);
    text.chars().skip(skip).collect()
}

/// Geometria do display; cores vêm do tema (`digit_on` / `digit_off`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SevenSegmentDisplay {
    /// Espessura de cada segmento
    pub thickness: f32,
    pub digit_w: f32,
    pub digit_h: f32,
    pub spacing: f32,
    pub glow: bool,
}

impl Default for SevenSegmentDisplay {
    fn default() -> Self {
        Self::scaled(1.0)
    }
}

impl SevenSegmentDisplay {
    pub fn scaled(scale: f32) -> Self {
        Self {
            thickness: 16.0 * scale,
            digit_w: 64.0 * scale,
            digit_h: 110.0 * scale,
            spacing: 14.0 * scale,
            glow: true,
        }
    }

    /// Largura total de `len` dígitos com espaçamento.
    pub fn text_width(&self, len: usize) -> f32 {
        if len == 0 {
            return 0.0;
        }
        len as f32 * self.digit_w + (len - 1) as f32 * self.spacing
    }

    /// Retângulo do segmento para um dígito com canto superior esquerdo em `origin`.
    pub fn segment_rect(&self, origin: Point, seg: Segment) -> Rect {
        let (x, y) = (origin.x, origin.y);
        let (w, h, t) = (self.digit_w, self.digit_h, self.thickness);
        let vertical = (h - 3.0 * t) / 2.0;
        match seg {
            Segment::A => Rect::new(x + t, y, w - 2.0 * t, t),
            Segment::B => Rect::new(x + w - t, y + t, t, vertical),
            Segment::C => Rect::new(x + w - t, y + (h + t) / 2.0, t, vertical),
            Segment::D => Rect::new(x + t, y + h - t, w - 2.0 * t, t),
            Segment::E => Rect::new(x, y + (h + t) / 2.0, t, vertical),
            Segment::F => Rect::new(x, y + t, t, vertical),
            Segment::G => Rect::new(x + t, y + (h - t) / 2.0, w - 2.0 * t, t),
        }
    }

    /// Desenha um dígito. Todos os 7 segmentos são emitidos.
    pub fn draw_digit(&self, canvas: &mut dyn Canvas, origin: Point, ch: char, theme: &Theme) {
        let colors = &theme.colors;
        for seg in Segment::ALL {
            let r = self.segment_rect(origin, seg);
            if seg.is_lit(ch) {
                if self.glow {
                    let halo = colors.digit_on.with_alpha(40);
                    canvas.rounded_rect(r.inflate(12.0, 12.0), 10.0, Paint::Fill(halo));
                }
                canvas.rounded_rect(r, 6.0, Paint::Fill(colors.digit_on));
            } else {
                canvas.rounded_rect(r, 6.0, Paint::Fill(colors.digit_off));
            }
        }
    }

    /// Desenha `text` da esquerda para a direita a partir de `origin`.
    pub fn draw_str(&self, canvas: &mut dyn Canvas, origin: Point, text: &str, theme: &Theme) {
        let mut x = origin.x;
        for ch in text.chars() {
            self.draw_digit(canvas, Point::new(x, origin.y), ch, theme);
            x += self.digit_w + self.spacing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::CommandList;
    use crate::theme::retro_theme;
    use pretty_assertions::assert_eq;

    fn lit(ch: char) -> String {
        Segment::ALL
            .iter()
            .zip("abcdefg".chars())
            .filter(|(s, _)| s.is_lit(ch))
            .map(|(_, name)| name)
            .collect()
    }

    #[test]
    fn digit_table() {
        assert_eq!(lit('0'), "abcdef");
        assert_eq!(lit('1'), "bc");
        assert_eq!(lit('2'), "abdeg");
        assert_eq!(lit('3'), "abcdg");
        assert_eq!(lit('4'), "bcfg");
        assert_eq!(lit('5'), "acdfg");
        assert_eq!(lit('6'), "acdefg");
        assert_eq!(lit('7'), "abc");
        assert_eq!(lit('8'), "abcdefg");
        assert_eq!(lit('9'), "abcdfg");
        assert_eq!(lit('-'), "g");
        assert_eq!(lit(' '), "");
        assert_eq!(lit('x'), "");
    }

    #[test]
    fn speed_formatting() {
        assert_eq!(format_digits(0.0, 3), "  0");
        assert_eq!(format_digits(87.9, 3), " 87");
        assert_eq!(format_digits(245.0, 3), "245");
        assert_eq!(format_digits(1234.0, 3), "234");
        assert_eq!(format_digits(-5.0, 3), " -5");
    }

    #[test]
    fn every_segment_is_drawn() {
        let theme = retro_theme();
        let display = SevenSegmentDisplay {
            glow: false,
            ..Default::default()
        };
        let mut canvas = CommandList::new();
        display.draw_digit(&mut canvas, Point::default(), '7', &theme);
        let rects = canvas.rects();
        assert_eq!(rects.len(), 7);
        let on = rects
            .iter()
            .filter(|(_, p)| *p == Paint::Fill(theme.colors.digit_on))
            .count();
        assert_eq!(on, 3);

        let mut canvas = CommandList::new();
        display.draw_digit(&mut canvas, Point::default(), '?', &theme);
        assert!(
            canvas
                .rects()
                .iter()
                .all(|(_, p)| *p == Paint::Fill(theme.colors.digit_off))
        );
    }

    #[test]
    fn glow_precedes_lit_segment() {
        let theme = retro_theme();
        let mut canvas = CommandList::new();
        SevenSegmentDisplay::default().draw_digit(&mut canvas, Point::default(), '8', &theme);
        // 7 halos + 7 segmentos
        assert_eq!(canvas.rects().len(), 14);
        let (halo, _) = canvas.rects()[0];
        let (seg, _) = canvas.rects()[1];
        assert_eq!(halo, seg.inflate(12.0, 12.0));
    }

    #[test]
    fn segment_geometry() {
        let d = SevenSegmentDisplay::default();
        let o = Point::new(10.0, 20.0);
        assert_eq!(d.segment_rect(o, Segment::A), Rect::new(26.0, 20.0, 32.0, 16.0));
        assert_eq!(d.segment_rect(o, Segment::D).bottom(), 130.0);
        assert_eq!(d.segment_rect(o, Segment::B).right(), 74.0);
        assert_eq!(d.text_width(3), 3.0 * 64.0 + 2.0 * 14.0);
    }
}
