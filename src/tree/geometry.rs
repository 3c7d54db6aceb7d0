//! Implicit tree geometry
//!
//! A sorted array of `n` nodes is read as a complete binary tree without
//! storing any links. Node identity = array index ("rank"); topology is pure
//! bit arithmetic:
//!
//!   level(r)          = number of trailing one-bits of r
//!   left/right(r, k)  = r ∓ 2^(k-1)
//!   parent(r, k)      = r ± 2^k   (sign from bit k+1 of r)
//!   leaf span(r, k)   = [r - (2^k - 1), r + (2^k - 1)]
//!
//! Ranks in `[n, full_size)` are imaginary: they shape the tree but hold no item.

use std::fmt;

/// Array index of a node, doubling as its identity in the implicit tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Rank(pub usize);

/// Height of a rank above the leaves (leaves are level 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Level(pub u32);

impl Level {
    /// Leaf level.
    pub const LEAF: Level = Level(0);

    /// `2^k` as a rank offset.
    #[inline]
    pub fn span(self) -> usize {
        1usize << self.0
    }

    /// One level up.
    #[inline]
    pub fn up(self) -> Level {
        Level(self.0 + 1)
    }

    /// One level down; `None` at the leaves.
    #[inline]
    pub fn down(self) -> Option<Level> {
        self.0.checked_sub(1).map(Level)
    }
}

impl Rank {
    /// Level implied by the bit pattern of this rank.
    #[inline]
    pub fn level(self) -> Level {
        Level((!self.0).trailing_zeros())
    }

    /// Whether this rank is a leaf (even ranks).
    #[inline]
    pub fn is_leaf(self) -> bool {
        self.0 & 1 == 0
    }

    /// Left child, `None` at level 0.
    #[inline]
    pub fn left(self, k: Level) -> Option<Rank> {
        debug_assert_eq!(k, self.level());
        k.down().map(|c| Rank(self.0 - c.span()))
    }

    /// Right child, `None` at level 0. May be imaginary.
    #[inline]
    pub fn right(self, k: Level) -> Option<Rank> {
        debug_assert_eq!(k, self.level());
        k.down().map(|c| Rank(self.0 + c.span()))
    }

    /// Leftmost leaf under this subtree.
    #[inline]
    pub fn leftmost_leaf(self, k: Level) -> Rank {
        debug_assert_eq!(k, self.level());
        Rank(self.0 - (k.span() - 1))
    }

    /// Rightmost leaf under this subtree. May be imaginary.
    #[inline]
    pub fn rightmost_leaf(self, k: Level) -> Rank {
        debug_assert_eq!(k, self.level());
        Rank(self.0 + (k.span() - 1))
    }

    /// Whether this rank is the right child of its parent.
    #[inline]
    pub fn is_right_child(self, k: Level) -> bool {
        debug_assert_eq!(k, self.level());
        (self.0 >> (k.0 + 1)) & 1 == 1
    }

    /// Ordinal position of this rank among all ranks on its level.
    ///
    /// Level-`k` ranks are `2^k (2j + 1) - 1` for `j = 0, 1, 2, ...`.
    #[inline]
    pub fn level_rank(self) -> usize {
        ((self.0 + 1) >> self.level().0) >> 1
    }

    /// Inverse of [`Rank::level_rank`]; `None` on overflow.
    #[inline]
    pub fn from_level_rank(k: Level, level_rank: usize) -> Option<Rank> {
        level_rank
            .checked_mul(2)
            .and_then(|v| v.checked_add(1))
            .and_then(|v| v.checked_mul(k.span()))
            .map(|v| Rank(v - 1))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Shape of the smallest complete tree covering `len` real ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TreeShape {
    len: usize,
    full_size: usize,
    root: usize,
    root_level: u32,
}

impl TreeShape {
    /// Geometry for an array of `len` nodes.
    ///
    /// `root_level` is the smallest `K` with `2^(K+1) - 1 >= len`.
    pub fn new(len: usize) -> Self {
        let mut root_level = 0u32;
        let mut full_size = 1usize;
        while full_size < len {
            root_level += 1;
            full_size = (1usize << (root_level + 1)) - 1;
        }
        Self {
            len,
            full_size,
            root: (1usize << root_level) - 1,
            root_level,
        }
    }

    /// Number of real ranks.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no real ranks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the complete tree, imaginary ranks included.
    #[inline]
    pub fn full_size(&self) -> usize {
        self.full_size
    }

    /// Root rank.
    #[inline]
    pub fn root(&self) -> Rank {
        Rank(self.root)
    }

    /// Level of the root, i.e. the tree height.
    #[inline]
    pub fn root_level(&self) -> Level {
        Level(self.root_level)
    }

    /// Whether `r` holds an item.
    #[inline]
    pub fn is_real(&self, r: Rank) -> bool {
        r.0 < self.len
    }

    /// Parent of `r`, `None` at the root.
    #[inline]
    pub fn parent(&self, r: Rank, k: Level) -> Option<Rank> {
        debug_assert!(r.0 < self.full_size, "rank {r} outside tree of {}", self.full_size);
        if r.0 == self.root {
            return None;
        }
        let ofs = k.span();
        if r.is_right_child(k) {
            Some(Rank(r.0 - ofs))
        } else {
            Some(Rank(r.0 + ofs))
        }
    }

    /// Highest-ranked real leaf, `None` for an empty tree.
    #[inline]
    pub fn rightmost_real_leaf(&self) -> Option<Rank> {
        (self.len > 0).then(|| Rank(self.len - (2 - self.len % 2)))
    }

    /// Path from the rightmost real leaf up to the root, one rank per level.
    ///
    /// It traces the border between real and imaginary ranks; entries above
    /// the leaf may themselves be imaginary.
    pub fn right_border(&self) -> Vec<Rank> {
        let Some(leaf) = self.rightmost_real_leaf() else {
            return Vec::new();
        };
        let mut path = Vec::with_capacity(self.root_level as usize + 1);
        let mut node = leaf;
        let mut k = Level::LEAF;
        path.push(node);
        while let Some(p) = self.parent(node, k) {
            node = p;
            k = k.up();
            path.push(node);
        }
        path
    }
}
