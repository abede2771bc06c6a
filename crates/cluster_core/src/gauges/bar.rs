//! Barras verticais: rpm com zonas e nível de combustível.

use super::{Widget, Zone, zones_contiguous};
use crate::draw::{Anchor, Canvas, Paint, Point, Rect};
use crate::mapper::{map_range, normalize};
use crate::theme::{FontRole, Theme};
use crate::types::{SensorField, SensorSnapshot};
use tracing::warn;

/// Fração do tanque marcada como reserva.
pub const FUEL_RESERVE: f32 = 0.12;

// ──────────────────────────────────────────────
// LinearBar
// ──────────────────────────────────────────────

/// Barra vertical com zonas empilhadas a partir da base e preenchimento
/// translúcido até o valor atual.
pub struct LinearBar {
    field: SensorField,
    rect: Rect,
    vmin: f32,
    vmax: f32,
    zones: Vec<Zone>,
    label: String,
}

impl LinearBar {
    pub fn new(field: SensorField, rect: Rect) -> Self {
        let (vmin, vmax) = field.domain();
        Self {
            field,
            rect,
            vmin,
            vmax,
            zones: Vec::new(),
            label: String::new(),
        }
    }

    pub fn domain(mut self, vmin: f32, vmax: f32) -> Self {
        self.vmin = vmin;
        self.vmax = vmax;
        self
    }

    pub fn zones(mut self, zones: Vec<Zone>) -> Self {
        if !zones_contiguous(&zones) {
            warn!("Barra '{}': zonas fora de ordem ou com lacunas", self.field.key());
        }
        self.zones = zones;
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Altura preenchida para `value`, em `[0, h]`.
    pub fn fill_height(&self, value: f32) -> f32 {
        map_range(value, self.vmin, self.vmax, 0.0, self.rect.h)
    }

    /// Retângulo de cada zona, da base para o topo.
    fn zone_rects(&self) -> impl Iterator<Item = (Rect, &Zone)> + '_ {
        let r = self.rect;
        self.zones.iter().filter_map(move |z| {
            let top = r.bottom() - self.fill_height(z.to);
            let zone_h = self.fill_height(z.to) - self.fill_height(z.from);
            (zone_h > 0.0).then(|| (Rect::new(r.x + 3.0, top + 3.0, r.w - 6.0, zone_h - 6.0), z))
        })
    }
}

impl Widget for LinearBar {
    fn name(&self) -> &str {
        self.field.key()
    }

    fn draw(&self, canvas: &mut dyn Canvas, snapshot: &SensorSnapshot, theme: &Theme) {
        let colors = &theme.colors;
        let corner = theme.geometry.corner_radius;
        let r = self.rect;

        canvas.rounded_rect(r, corner, Paint::Fill(colors.panel));
        for (zr, zone) in self.zone_rects() {
            canvas.rounded_rect(zr, 8.0, Paint::Fill(colors.zone(zone.tone)));
        }

        let level_h = self.fill_height(self.field.read(snapshot));
        if level_h - 12.0 > 0.0 {
            let level = Rect::new(r.x + 6.0, r.bottom() - level_h + 6.0, r.w - 12.0, level_h - 12.0);
            canvas.rounded_rect(level, 8.0, Paint::Fill(colors.bar_level));
        }

        canvas.rounded_rect(
            r,
            corner,
            Paint::Stroke {
                color: colors.edge,
                width: 3.0,
            },
        );

        if !self.label.is_empty() {
            canvas.text(
                &self.label,
                Point::new(r.center().x, r.bottom() + 20.0),
                Anchor::Center,
                theme.fonts.get(FontRole::Small),
                colors.muted,
            );
        }
    }
}

// ──────────────────────────────────────────────
// FuelBar
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelStyle {
    /// Coluna contínua com linha de reserva
    Continuous,
    /// N células empilhadas
    Cells(u32),
}

/// Nível de combustível (`fuel_level`, fração 0..1).
pub struct FuelBar {
    rect: Rect,
    reserve: f32,
    style: FuelStyle,
}

impl FuelBar {
    pub fn new(rect: Rect, style: FuelStyle) -> Self {
        let style = match style {
            FuelStyle::Cells(n) => FuelStyle::Cells(n.max(2)),
            s => s,
        };
        Self {
            rect,
            reserve: FUEL_RESERVE,
            style,
        }
    }

    pub fn reserve(mut self, fraction: f32) -> Self {
        self.reserve = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Quantas células acendem para `level`; zero no estilo contínuo.
    pub fn lit_cells(&self, level: f32) -> u32 {
        let FuelStyle::Cells(n) = self.style else {
            return 0;
        };
        let level = normalize(level, 0.0, 1.0);
        (0..n).filter(|&i| i as f32 / (n - 1) as f32 <= level).count() as u32
    }

    /// Células de índice até este valor (inclusive) usam a cor de alerta.
    pub fn reserve_cells(&self) -> u32 {
        match self.style {
            FuelStyle::Cells(n) => (n as f32 * self.reserve).floor() as u32,
            FuelStyle::Continuous => 0,
        }
    }

    fn draw_continuous(&self, canvas: &mut dyn Canvas, level: f32, theme: &Theme) {
        let colors = &theme.colors;
        let inner = self.rect.inflate(-10.0, -10.0);
        let level_h = inner.h * level;
        let reserve_h = inner.h * self.reserve;

        let low_h = level_h.min(reserve_h);
        if low_h > 0.0 {
            let low = Rect::new(inner.x, inner.bottom() - low_h, inner.w, low_h);
            canvas.rounded_rect(low, 6.0, Paint::Fill(colors.fuel_reserve));
        }
        if level_h > reserve_h {
            let high = Rect::new(inner.x, inner.bottom() - level_h, inner.w, level_h - reserve_h);
            canvas.rounded_rect(high, 6.0, Paint::Fill(colors.fuel_fill));
        }

        let line = Rect::new(inner.x, inner.bottom() - reserve_h - 3.0, inner.w, 6.0);
        canvas.rounded_rect(line, 2.0, Paint::Fill(colors.fuel_reserve));
    }

    fn draw_cells(&self, canvas: &mut dyn Canvas, n: u32, level: f32, theme: &Theme) {
        let colors = &theme.colors;
        let inner = self.rect.inflate(-8.0, -8.0);
        let cell_h = inner.h / n as f32;
        let lit = self.lit_cells(level);
        let reserve_cut = self.reserve_cells();

        for i in 0..n {
            let y0 = inner.bottom() - (i + 1) as f32 * cell_h;
            let cell = Rect::new(inner.x, y0 + 2.0, inner.w, cell_h - 4.0);
            let color = if i >= lit {
                colors.fuel_off
            } else if i <= reserve_cut {
                colors.fuel_reserve
            } else {
                colors.fuel_fill
            };
            canvas.rounded_rect(cell, 6.0, Paint::Fill(color));
        }
    }
}

impl Widget for FuelBar {
    fn name(&self) -> &str {
        SensorField::FuelLevel.key()
    }

    fn draw(&self, canvas: &mut dyn Canvas, snapshot: &SensorSnapshot, theme: &Theme) {
        let colors = &theme.colors;
        let corner = theme.geometry.corner_radius;
        let level = normalize(snapshot.fuel_level, 0.0, 1.0);

        canvas.rounded_rect(self.rect, corner, Paint::Fill(colors.panel));
        match self.style {
            FuelStyle::Continuous => self.draw_continuous(canvas, level, theme),
            FuelStyle::Cells(n) => self.draw_cells(canvas, n, level, theme),
        }
        canvas.rounded_rect(
            self.rect,
            corner,
            Paint::Stroke {
                color: colors.edge,
                width: 3.0,
            },
        );

        let small = theme.fonts.get(FontRole::Small);
        let cx = self.rect.center().x;
        canvas.text("F", Point::new(cx, self.rect.top() - 16.0), Anchor::Center, small, colors.text);
        canvas.text("E", Point::new(cx, self.rect.bottom() + 16.0), Anchor::Center, small, colors.text);
        canvas.text(
            "Fuel",
            Point::new(cx, self.rect.bottom() + 36.0),
            Anchor::Center,
            small,
            colors.muted,
        );
    }
}
