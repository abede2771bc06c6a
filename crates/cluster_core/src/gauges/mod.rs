//! Renderizadores do painel.
//!
//! Cada widget lê um campo do [`SensorSnapshot`], passa pelo
//! [`crate::mapper`] e emite primitivas no [`Canvas`]. Nenhum widget guarda o
//! snapshot nem altera estado de sensores; cores, fontes e geometria vêm do
//! [`Theme`] recebido a cada chamada.

pub mod radial;
pub mod bar;
pub mod segmented;
pub mod seven_segment;
pub mod indicators;
pub mod readout;

pub use bar::{FuelBar, FuelStyle, LinearBar};
pub use indicators::{IndicatorIcon, IndicatorRow};
pub use radial::RadialGauge;
pub use readout::{Backdrop, Caption, InfoLine, LambdaReadout, SpeedReadout, SpeedStyle};
pub use segmented::{ArcSegment, SegmentedArc};
pub use seven_segment::{Segment, SevenSegmentDisplay};

use crate::draw::Canvas;
use crate::theme::{Theme, ZoneTone};
use crate::types::SensorSnapshot;

/// Um elemento desenhável do painel.
pub trait Widget {
    /// Nome para logs e testes.
    fn name(&self) -> &str;
    fn draw(&self, canvas: &mut dyn Canvas, snapshot: &SensorSnapshot, theme: &Theme);
}

/// Sub-faixa contígua do domínio com um tom de cor.
///
/// Zonas de um gauge devem ser fornecidas em ordem crescente, contíguas e
/// sem sobreposição; fora disso o resultado visual é indefinido.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub from: f32,
    pub to: f32,
    pub tone: ZoneTone,
}

impl Zone {
    pub const fn new(from: f32, to: f32, tone: ZoneTone) -> Self {
        Self { from, to, tone }
    }
}

/// `true` se as zonas são crescentes, contíguas e sem sobreposição.
pub fn zones_contiguous(zones: &[Zone]) -> bool {
    zones.iter().all(|z| z.from <= z.to) && zones.windows(2).all(|w| w[0].to == w[1].from)
}
