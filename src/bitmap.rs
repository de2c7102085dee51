//! Bitmap decoding boundary (§6): consumed, never implemented here.

use fnv::FnvBuildHasher;
use indexmap::IndexSet;
use thiserror::Error;

use crate::raw::BitmapId;

#[derive(Debug, Clone)]
pub struct Bitmap {
    pub width: u16,
    pub height: u16,
    pub pixels: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum BitmapError {
    #[error("bitmap {0} not found")]
    BitmapNotFound(BitmapId),
}

/// The renderer-owned resolver this crate only ever references by index.
/// Bitmap decoding itself (palette + run decompression) is out of scope.
pub trait BitmapProvider {
    fn add_bitmap(&mut self, bitmap_id: BitmapId, bitmap: Bitmap);
    fn get_by_id(&self, bitmap_id: BitmapId) -> Result<Bitmap, BitmapError>;
}

/// The ordered set of bitmap ids referenced by one shape (§4.1, §5):
/// scoped to a single decode call, passed in and handed back by the
/// caller. Looking up an id assigns it a stable shape-local index the
/// first time it's seen, mirroring `IndexSet::insert_full`'s
/// "insert or find existing" contract.
#[derive(Debug, Default, Clone)]
pub struct BitmapDependencies {
    ids: IndexSet<BitmapId, FnvBuildHasher>,
}

impl BitmapDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shape-local index for `bitmap_id`, assigning a new one
    /// if this is the first time this shape has referenced it.
    pub fn index_for(&mut self, bitmap_id: BitmapId) -> u32 {
        let (index, inserted) = self.ids.insert_full(bitmap_id);
        if inserted {
            log::debug!("bitmap {bitmap_id} assigned shape-local index {index}");
        }
        index as u32
    }

    pub fn ids(&self) -> impl Iterator<Item = BitmapId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
