//! The raw `DefineShape` / `DefineMorphShape` tag model (§6).
//!
//! These types mirror the SWF record shapes the decoder consumes. There is
//! no byte-level parser here — a caller that has already read a `.swf` tag
//! stream is expected to assemble these from the wire format; this crate's
//! boundary starts *after* that step (§1 Non-goals).

use bitflags::bitflags;

use crate::twips::{Point, Twips};

pub type CharacterId = u16;
pub type BitmapId = u16;

bitflags! {
    /// Shape-level flags carried by a `DefineShape`/`DefineMorphShape` tag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ShapeFlags: u8 {
        const NON_ZERO_WINDING_RULE = 0b01;
        const HAS_SCALING_STROKES   = 0b10;
    }
}

/// A straight or curved edge, expressed as deltas from the current pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRecord {
    StraightEdge {
        delta_x: Twips,
        delta_y: Twips,
    },
    CurvedEdge {
        control_delta_x: Twips,
        control_delta_y: Twips,
        anchor_delta_x: Twips,
        anchor_delta_y: Twips,
    },
}

/// A style-change record. `None` fields mean "unspecified by this record",
/// *not* "set to zero" — see `fill_style_0`/`fill_style_1`/`line_style`,
/// where the style index `0` (meaning "no style") is itself a meaningful
/// value that must still be distinguished from "not present".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleChangeRecord {
    /// Absolute pen position (§9: the move field is absolute, not a delta).
    pub move_to: Option<Point>,
    pub fill_style_0: Option<u32>,
    pub fill_style_1: Option<u32>,
    pub line_style: Option<u32>,
    pub new_styles: Option<ShapeStyles>,
}

impl StyleChangeRecord {
    pub fn has_new_styles(&self) -> bool {
        self.new_styles.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeRecord {
    StyleChange(StyleChangeRecord),
    Edge(EdgeRecord),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeStyles {
    pub fill_styles: Vec<RawFillStyle>,
    pub line_styles: Vec<RawLineStyle>,
}

/// Straight affine 2x3 matrix, already in the units the record declares
/// (twips for translate, unscaled for a/b/c/d) — the twip-to-pixel and
/// gradient/bitmap pre-scale described in §4.1 is applied by the style
/// normalizer, not stored here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawMatrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: Twips,
    pub ty: Twips,
}

impl RawMatrix {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: Twips::ZERO,
        ty: Twips::ZERO,
    };
}

impl Default for RawMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl RawColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawGradientRecord {
    pub ratio: u8,
    pub color: RawColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientSpread {
    Pad,
    Reflect,
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientInterpolation {
    Rgb,
    LinearRgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawGradient {
    pub matrix: RawMatrix,
    pub spread: GradientSpread,
    pub interpolation: GradientInterpolation,
    pub records: Vec<RawGradientRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmapFillType {
    Repeating,
    Clipped,
    NonSmoothedRepeating,
    NonSmoothedClipped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawFillStyle {
    Solid(RawColor),
    LinearGradient(RawGradient),
    RadialGradient(RawGradient),
    FocalGradient {
        gradient: RawGradient,
        focal_point: f32,
    },
    Bitmap {
        bitmap_id: BitmapId,
        matrix: RawMatrix,
        fill_type: BitmapFillType,
    },
    /// A fill-style type byte the normalizer doesn't recognize (e.g. a
    /// reserved code from a newer SWF revision); triggers
    /// `DecodeError::UnsupportedFillKind` (§7).
    Unknown(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCapStyle {
    None,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineJoinStyle {
    Round,
    Bevel,
    Miter(f32),
    /// A join-style byte the normalizer doesn't recognize; triggers
    /// `DecodeError::UnsupportedLineKind` (§7).
    Unknown(u8),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawLineStyle {
    pub width: Twips,
    pub color: RawColor,
    pub start_cap: LineCapStyle,
    pub end_cap: LineCapStyle,
    pub join: LineJoinStyle,
    pub no_h_scale: bool,
    pub no_v_scale: bool,
    pub pixel_hinting: bool,
    /// Present when the line declares `HasFill`; see §9's open question.
    pub fill: Option<RawFillStyle>,
}

impl RawLineStyle {
    pub fn solid(width: Twips, color: RawColor) -> Self {
        Self {
            width,
            color,
            start_cap: LineCapStyle::Round,
            end_cap: LineCapStyle::Round,
            join: LineJoinStyle::Round,
            no_h_scale: false,
            no_v_scale: false,
            pixel_hinting: false,
            fill: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rectangle {
    pub x_min: Twips,
    pub x_max: Twips,
    pub y_min: Twips,
    pub y_max: Twips,
}

/// A `DefineShape`/`DefineShape{2,3,4}` tag.
#[derive(Debug, Clone, PartialEq)]
pub struct DefineShapeTag {
    pub id: CharacterId,
    pub bounds: Rectangle,
    pub flags: ShapeFlags,
    pub styles: ShapeStyles,
    pub records: Vec<ShapeRecord>,
}

/// A `DefineMorphShape`/`DefineMorphShape2` tag. `start` and `end` each
/// carry half of the paired style tables; `records`/`records_end` are the
/// two edge-record streams walked in lockstep by the segment emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct DefineMorphShapeTag {
    pub id: CharacterId,
    pub start_bounds: Rectangle,
    pub end_bounds: Rectangle,
    pub flags: ShapeFlags,
    pub start_styles: ShapeStyles,
    pub end_styles: ShapeStyles,
    pub records: Vec<ShapeRecord>,
    pub records_end: Vec<ShapeRecord>,
}
