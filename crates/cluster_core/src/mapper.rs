//! Normalização de valores e geometria polar.
//!
//! Todo visual (ângulo de ponteiro, arcos de zona, altura de barra,
//! segmentos acesos) passa por [`normalize`] / [`map_range`].

use crate::draw::Point;

/// Posição de `value` dentro de `[vmin, vmax]`, em `[0, 1]`.
///
/// O valor é limitado à faixa antes da divisão. Faixa degenerada
/// (`vmin == vmax`) e `NaN` resultam em `0`.
pub fn normalize(value: f32, vmin: f32, vmax: f32) -> f32 {
    if vmax == vmin {
        return 0.0;
    }
    // max/min em vez de clamp: NaN vira vmin e nunca há panic
    let clamped = value.max(vmin).min(vmax);
    ((clamped - vmin) / (vmax - vmin)).max(0.0).min(1.0)
}

/// Projeta `value` de `[vmin, vmax]` em `[out_min, out_max]`.
///
/// Exato nas extremidades: `vmin → out_min`, `vmax → out_max`.
/// O resultado nunca sai do intervalo de saída, qualquer que seja o sentido.
pub fn map_range(value: f32, vmin: f32, vmax: f32, out_min: f32, out_max: f32) -> f32 {
    let t = normalize(value, vmin, vmax);
    let out = out_min * (1.0 - t) + out_max * t;
    out.max(out_min.min(out_max)).min(out_min.max(out_max))
}

/// Ponto a `radius` do centro no ângulo `angle_deg`.
///
/// Convenção de tela: 0° aponta para +x e ângulos positivos giram no
/// sentido horário (y cresce para baixo).
pub fn polar(center: Point, radius: f32, angle_deg: f32) -> Point {
    let a = angle_deg.to_radians();
    Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
}
