//! Converts SWF `DefineShape`/`DefineMorphShape` edge-record streams into
//! render-ready styled paths.
//!
//! The pipeline has four stages: a style normalizer turns raw fill/line
//! descriptors into [`model::FillStyle`]/[`model::LineStyle`]; a segment
//! emitter walks the edge-record stream and files oriented segments into
//! per-style buckets; a contour reconstructor joins each bucket's
//! unordered segments into closed or open paths; morph shapes run the
//! same pipeline over paired start/end record streams. The rasterizer,
//! bitmap decoding, and display-tree composition that consume this
//! crate's output are out of scope — see each module for its exact
//! boundary.

mod bitmap;
mod contour;
mod decode;
mod error;
pub mod interpolate;
mod model;
mod raw;
mod segment;
mod style;
mod twips;

pub use bitmap::{Bitmap, BitmapDependencies, BitmapError, BitmapProvider};
pub use decode::{decode_morph_shape, decode_shape};
pub use error::DecodeError;
pub use model::{
    Color, Command, FillStyle, Gradient, GradientInterpolation, GradientSpread, GradientStop,
    LineCapStyle, LineJoinStyle, LineStyle, Matrix, MorphCommand, MorphFillStyle, MorphLineStyle,
    MorphPath, MorphPathStyle, MorphShape, Path, PathStyle, Shape,
};
pub use raw::{
    BitmapFillType, BitmapId, CharacterId, DefineMorphShapeTag, DefineShapeTag, EdgeRecord,
    GradientInterpolation as RawGradientInterpolation, GradientSpread as RawGradientSpread,
    LineCapStyle as RawLineCapStyle, LineJoinStyle as RawLineJoinStyle, RawColor, RawFillStyle,
    RawGradient, RawGradientRecord, RawLineStyle, RawMatrix, Rectangle, ShapeFlags, ShapeRecord,
    ShapeStyles, StyleChangeRecord,
};
pub use twips::{Point, Twips};
