//! Definição de temas visuais do painel.
//!
//! Um tema reúne cores, tamanhos de fonte, constantes de geometria e o
//! layout a montar. É carregado uma vez na inicialização e passado
//! explicitamente aos renderizadores; nenhum gauge conhece cores globais.

use crate::draw::Rgba;
use serde::{Deserialize, Serialize};

/// Layout montado pelo [`crate::cluster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// Gauges radiais, barra de rpm, velocidade em texto grande
    Classic,
    /// Tacômetro segmentado, velocidade em 7 segmentos (estética fim dos anos 90)
    Retro,
}

/// Tom semântico de uma zona; o tema decide a cor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneTone {
    Cold,
    Normal,
    Caution,
    Warning,
    Danger,
}

/// Paleta completa de um tema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    // Fundo e painéis
    pub bg: Rgba,
    pub frame: Rgba,
    pub panel: Rgba,
    pub edge: Rgba,
    // Texto
    pub text: Rgba,
    pub muted: Rgba,
    pub accent: Rgba,
    // Zonas
    pub zone_cold: Rgba,
    pub zone_normal: Rgba,
    pub zone_caution: Rgba,
    pub zone_warning: Rgba,
    pub zone_danger: Rgba,
    // Gauges radiais e barras
    pub tick: Rgba,
    pub pointer: Rgba,
    pub bar_level: Rgba,
    // Arcos segmentados
    pub segment_on: Rgba,
    pub segment_warning: Rgba,
    pub segment_off: Rgba,
    // Display de 7 segmentos
    pub digit_on: Rgba,
    pub digit_off: Rgba,
    pub digit_panel: Rgba,
    pub digit_edge: Rgba,
    // Combustível
    pub fuel_fill: Rgba,
    pub fuel_reserve: Rgba,
    pub fuel_off: Rgba,
    // Luzes-espia
    pub lamp_blinker: Rgba,
    pub lamp_parking: Rgba,
    pub lamp_low: Rgba,
    pub lamp_high: Rgba,
    pub lamp_handbrake: Rgba,
    pub lamp_off: Rgba,
    pub lamp_handbrake_off: Rgba,
}

impl ThemeColors {
    pub fn zone(&self, tone: ZoneTone) -> Rgba {
        match tone {
            ZoneTone::Cold => self.zone_cold,
            ZoneTone::Normal => self.zone_normal,
            ZoneTone::Caution => self.zone_caution,
            ZoneTone::Warning => self.zone_warning,
            ZoneTone::Danger => self.zone_danger,
        }
    }
}

/// Tamanhos de fonte (pontos).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSizes {
    pub huge: f32,
    pub big: f32,
    pub medium: f32,
    pub small: f32,
    pub tiny: f32,
}

/// Papel tipográfico de um texto; o tema decide o tamanho.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    Huge,
    Big,
    Medium,
    Small,
    Tiny,
}

impl FontSizes {
    pub fn get(&self, role: FontRole) -> f32 {
        match role {
            FontRole::Huge => self.huge,
            FontRole::Big => self.big,
            FontRole::Medium => self.medium,
            FontRole::Small => self.small,
            FontRole::Tiny => self.tiny,
        }
    }
}

/// Constantes de geometria compartilhadas pelos gauges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Passo angular das marcas de escala (graus)
    pub tick_step_deg: f32,
    /// A cada N marcas, uma é maior
    pub major_every: u32,
    pub tick_len: f32,
    pub major_tick_len: f32,
    pub tick_width: f32,
    pub zone_width: f32,
    pub pointer_width: f32,
    pub corner_radius: f32,
    /// Espaço entre segmentos de arco (graus)
    pub segment_gap_deg: f32,
}

/// Definição completa de um tema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub layout: LayoutKind,
    pub colors: ThemeColors,
    pub fonts: FontSizes,
    pub geometry: Geometry,
}

/// Converte "#RRGGBB" ou "#RRGGBBAA" em [`Rgba`].
pub fn hex_to_rgba(hex: &str) -> Option<Rgba> {
    let hex = hex.trim_start_matches('#');
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?).with_alpha(byte(6)?)),
        _ => None,
    }
}

impl TryFrom<String> for Rgba {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        hex_to_rgba(&value).ok_or_else(|| format!("cor hex inválida: {value}"))
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        if c.a == 255 {
            format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
        }
    }
}

/// Literais dos temas embutidos; hex malformado cai para branco.
fn c(hex: &str) -> Rgba {
    hex_to_rgba(hex).unwrap_or(Rgba::rgb(255, 255, 255))
}

/// Tema Clássico (padrão): painel escuro azulado, gauges radiais.
pub fn classic_theme() -> Theme {
    Theme {
        name: "classic".into(),
        layout: LayoutKind::Classic,
        colors: ThemeColors {
            bg: c("#0a0c10"),
            frame: c("#12141a"),
            panel: c("#1a1c22"),
            edge: c("#1e2026"),
            text: c("#dce6f0"),
            muted: c("#78828c"),
            accent: c("#00d2d2"),
            zone_cold: c("#50b4ff"),
            zone_normal: c("#1ec85a"),
            zone_caution: c("#ffc828"),
            zone_warning: c("#ff8c00"),
            zone_danger: c("#f0463c"),
            tick: c("#3c4650"),
            pointer: c("#dce6f0"),
            bar_level: c("#ffffff28"),
            segment_on: c("#ff8c00"),
            segment_warning: c("#f0463c"),
            segment_off: c("#1e2026"),
            digit_on: c("#dce6f0"),
            digit_off: c("#1e2026"),
            digit_panel: c("#1a1c22"),
            digit_edge: c("#1e2026"),
            fuel_fill: c("#00d2d2"),
            fuel_reserve: c("#ff8c00"),
            fuel_off: c("#1e2026"),
            lamp_blinker: c("#1ec85a"),
            lamp_parking: c("#1ec85a"),
            lamp_low: c("#00d2d2"),
            lamp_high: c("#50b4ff"),
            lamp_handbrake: c("#f0463c"),
            lamp_off: c("#323c46"),
            lamp_handbrake_off: c("#463232"),
        },
        fonts: FontSizes {
            huge: 112.0,
            big: 50.0,
            medium: 30.0,
            small: 20.0,
            tiny: 14.0,
        },
        geometry: Geometry {
            tick_step_deg: 12.0,
            major_every: 3,
            tick_len: 10.0,
            major_tick_len: 16.0,
            tick_width: 2.0,
            zone_width: 10.0,
            pointer_width: 5.0,
            corner_radius: 12.0,
            segment_gap_deg: 1.5,
        },
    }
}

/// Tema Retro: preto com laranja/âmbar e velocímetro vermelho em 7 segmentos.
pub fn retro_theme() -> Theme {
    Theme {
        name: "retro".into(),
        layout: LayoutKind::Retro,
        colors: ThemeColors {
            bg: c("#050508"),
            frame: c("#1c1c20"),
            panel: c("#0c0c10"),
            edge: c("#1c1c20"),
            text: c("#f0f0f5"),
            muted: c("#9696a0"),
            accent: c("#00dcdc"),
            zone_cold: c("#5ab4ff"),
            zone_normal: c("#50e678"),
            zone_caution: c("#ffb450"),
            zone_warning: c("#ff963c"),
            zone_danger: c("#ff463c"),
            tick: c("#f0f0f5"),
            pointer: c("#f0f0f5"),
            bar_level: c("#ffffff28"),
            segment_on: c("#ff963c"),
            segment_warning: c("#ff463c"),
            segment_off: c("#3c2312"),
            digit_on: c("#ff281e"),
            digit_off: c("#3c1414"),
            digit_panel: c("#140808"),
            digit_edge: c("#3c1212"),
            fuel_fill: c("#ffb450"),
            fuel_reserve: c("#ff463c"),
            fuel_off: c("#23201c"),
            lamp_blinker: c("#50e678"),
            lamp_parking: c("#50e678"),
            lamp_low: c("#00dcdc"),
            lamp_high: c("#5ab4ff"),
            lamp_handbrake: c("#ff463c"),
            lamp_off: c("#373c46"),
            lamp_handbrake_off: c("#462828"),
        },
        fonts: FontSizes {
            huge: 90.0,
            big: 40.0,
            medium: 20.0,
            small: 15.0,
            tiny: 12.0,
        },
        geometry: Geometry {
            tick_step_deg: 12.0,
            major_every: 3,
            tick_len: 10.0,
            major_tick_len: 16.0,
            tick_width: 2.0,
            zone_width: 18.0,
            pointer_width: 4.0,
            corner_radius: 14.0,
            segment_gap_deg: 1.5,
        },
    }
}

/// Retorna tema pelo nome.
pub fn get_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "retro" | "s2000" => retro_theme(),
        _ => classic_theme(),
    }
}

/// Nomes de temas disponíveis.
pub fn theme_names() -> Vec<&'static str> {
    vec!["classic", "retro"]
}
