//! Address decomposition.
//!
//! A 64-bit address is split into three contiguous, non-overlapping bit
//! fields derived from the cache geometry:
//! 1. **Offset:** bits `[0, offset_bits - 1]`, selects a byte within a line.
//! 2. **Index:** the next `index_bits = floor(log2(num_sets))` bits, selects the set.
//! 3. **Tag:** the remaining high bits up to bit 63, identifies the block.
//!
//! Fields may be zero bits wide (1-byte lines have no offset, a single set
//! has no index); such fields always extract to `0`. When the set count is
//! not a power of two the index field is rounded down, so only the first
//! `2^index_bits` sets are ever selected.

use serde::Serialize;

/// Width of the address space being decomposed.
pub const ADDR_BITS: u32 = 64;

/// A contiguous bit range `[lsb, lsb + width - 1]` within a 64-bit address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BitField {
    /// Least-significant bit position of the field.
    pub lsb: u32,
    /// Number of bits in the field (may be zero).
    pub width: u32,
}

impl BitField {
    /// Creates a field starting at `lsb` that is `width` bits wide.
    pub const fn new(lsb: u32, width: u32) -> Self {
        Self { lsb, width }
    }

    /// Most-significant bit position, or `None` for a zero-width field.
    pub const fn msb(&self) -> Option<u32> {
        if self.width == 0 {
            None
        } else {
            Some(self.lsb + self.width - 1)
        }
    }

    /// Right-aligned mask covering `width` bits.
    #[inline]
    pub const fn mask(&self) -> u64 {
        if self.width >= ADDR_BITS {
            u64::MAX
        } else {
            (1u64 << self.width) - 1
        }
    }

    /// Extracts the field from `addr`, right-aligned.
    #[inline]
    pub const fn extract(&self, addr: u64) -> u64 {
        if self.width == 0 {
            return 0;
        }
        match addr.checked_shr(self.lsb) {
            Some(shifted) => shifted & self.mask(),
            None => 0,
        }
    }

    /// Places `value` into this field's position; bits beyond `width` are dropped.
    #[inline]
    pub const fn insert(&self, value: u64) -> u64 {
        if self.width == 0 {
            return 0;
        }
        match (value & self.mask()).checked_shl(self.lsb) {
            Some(placed) => placed,
            None => 0,
        }
    }
}

/// Offset/index/tag layout for one cache geometry.
///
/// Built once from the line size and set count; every extraction is a pure
/// function of the layout and the input address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AddressLayout {
    /// Byte-within-line field.
    pub offset: BitField,
    /// Set-selection field.
    pub index: BitField,
    /// Block-identification field.
    pub tag: BitField,
}

impl AddressLayout {
    /// Derives the layout for `line_bytes`-byte lines spread over `num_sets` sets.
    ///
    /// `line_bytes` is expected to be a power of two (guaranteed by
    /// [`CacheConfig::validate`](crate::config::CacheConfig::validate)).
    /// `num_sets` may be any positive count; its index width is
    /// `floor(log2(num_sets))`.
    pub const fn new(line_bytes: usize, num_sets: usize) -> Self {
        let offset_bits = line_bytes.trailing_zeros();
        let index_bits = match num_sets.checked_ilog2() {
            Some(bits) => bits,
            None => 0,
        };
        let tag_lsb = offset_bits + index_bits;
        Self {
            offset: BitField::new(0, offset_bits),
            index: BitField::new(offset_bits, index_bits),
            tag: BitField::new(tag_lsb, ADDR_BITS - tag_lsb),
        }
    }

    /// Number of offset bits (`log2(line_bytes)`).
    pub const fn offset_bits(&self) -> u32 {
        self.offset.width
    }

    /// Number of index bits (`floor(log2(num_sets))`).
    pub const fn index_bits(&self) -> u32 {
        self.index.width
    }

    /// Number of distinct set indices the index field can produce.
    pub const fn addressable_sets(&self) -> usize {
        1 << self.index.width
    }

    /// Number of tag bits (`64 - offset_bits - index_bits`).
    pub const fn tag_bits(&self) -> u32 {
        self.tag.width
    }

    /// Tag portion of `addr`.
    #[inline]
    pub const fn tag(&self, addr: u64) -> u64 {
        self.tag.extract(addr)
    }

    /// Set index of `addr`.
    #[inline]
    pub const fn index(&self, addr: u64) -> u64 {
        self.index.extract(addr)
    }

    /// Byte offset of `addr` within its line.
    #[inline]
    pub const fn offset(&self, addr: u64) -> u64 {
        self.offset.extract(addr)
    }

    /// Reassembles an address from its three fields.
    ///
    /// `compose(tag(a), index(a), offset(a)) == a` for every address `a`.
    #[inline]
    pub const fn compose(&self, tag: u64, index: u64, offset: u64) -> u64 {
        self.tag.insert(tag) | self.index.insert(index) | self.offset.insert(offset)
    }
}
