//! Decoded output model (§3): render-ready styled paths.

use crate::twips::Point;

/// Straight sRGBA, components normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }
}

/// A 2x3 affine matrix, with the document-wide twip-to-pixel scale baked in
/// per §4.1 (bitmap: 0.05, gradient: 819.2; solid colors carry no matrix).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Matrix {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub ratio: f32,
    pub color: Color,
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
pub struct Gradient {
    pub matrix: Matrix,
    pub spread: GradientSpread,
    pub interpolation: GradientInterpolation,
    pub stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FillStyle {
    Solid(Color),
    LinearGradient(Gradient),
    RadialGradient(Gradient),
    FocalGradient { gradient: Gradient, focal_point: f32 },
    Bitmap {
        bitmap_index: u32,
        matrix: Matrix,
        repeat: bool,
        smooth: bool,
    },
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
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub width: i32,
    pub color: Color,
    pub start_cap: LineCapStyle,
    pub end_cap: LineCapStyle,
    pub join: LineJoinStyle,
    /// Stored as `max(1.5, miter_limit_factor) * 2` per §4.1.
    pub miter_limit: f32,
    pub no_h_scale: bool,
    pub no_v_scale: bool,
    pub pixel_hinting: bool,
    /// Captured verbatim, never consumed by this crate — see §9's open
    /// question on nested line fills.
    pub fill_override: Option<FillStyle>,
}

/// This crate's own hairline fallback for edges emitted with no active
/// style (§4.2): `width = 20`, fully transparent.
pub const DEFAULT_LINE_WIDTH: i32 = 20;

impl LineStyle {
    pub(crate) fn default_hairline() -> Self {
        Self {
            width: DEFAULT_LINE_WIDTH,
            color: Color::TRANSPARENT,
            start_cap: LineCapStyle::Round,
            end_cap: LineCapStyle::Round,
            join: LineJoinStyle::Round,
            miter_limit: 3.0,
            no_h_scale: false,
            no_v_scale: false,
            pixel_hinting: false,
            fill_override: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    MoveTo(Point),
    LineTo(Point),
    CurveTo { control: Point, anchor: Point },
}

impl Command {
    pub fn end_point(&self) -> Point {
        match *self {
            Command::MoveTo(p) | Command::LineTo(p) => p,
            Command::CurveTo { anchor, .. } => anchor,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathStyle {
    Fill(FillStyle),
    Line(LineStyle),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub commands: Vec<Command>,
    pub style: PathStyle,
}

impl Path {
    pub fn fill(&self) -> Option<&FillStyle> {
        match &self.style {
            PathStyle::Fill(fill) => Some(fill),
            PathStyle::Line(_) => None,
        }
    }

    pub fn line(&self) -> Option<&LineStyle> {
        match &self.style {
            PathStyle::Line(line) => Some(line),
            PathStyle::Fill(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub paths: Vec<Path>,
}

/// A command whose every point/color carries both a start-frame and an
/// end-frame value (§3); `0` subscript is the start frame, `1` the end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MorphCommand {
    MoveTo { p0: Point, p1: Point },
    LineTo { p0: Point, p1: Point },
    CurveTo {
        control0: Point,
        control1: Point,
        p0: Point,
        p1: Point,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MorphFillStyle {
    pub start: FillStyle,
    pub end: FillStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MorphLineStyle {
    pub start: LineStyle,
    pub end: LineStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MorphPathStyle {
    Fill(MorphFillStyle),
    Line(MorphLineStyle),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MorphPath {
    pub commands: Vec<MorphCommand>,
    pub style: MorphPathStyle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MorphShape {
    pub paths: Vec<MorphPath>,
}
