//! Index construction parameters

/// How to build an [`IntervalIndex`](crate::IntervalIndex).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexConfig {
    /// Train an interpolation index on top of the tree.
    pub interpolate: bool,

    /// Number of model domains (ignored for plain trees, clamped to >= 1).
    pub domains: usize,
}

impl IndexConfig {
    /// Plain implicit tree, top-down queries only.
    pub fn plain() -> Self {
        Self {
            interpolate: false,
            domains: 1,
        }
    }

    /// Interpolation-indexed tree with `domains` models.
    pub fn interpolated(domains: usize) -> Self {
        Self {
            interpolate: true,
            domains,
        }
    }

    /// `0` selects a plain tree, anything else an interpolated one.
    pub fn from_domains(domains: usize) -> Self {
        if domains == 0 {
            Self::plain()
        } else {
            Self::interpolated(domains)
        }
    }

    /// Domain count actually used at build time.
    pub fn effective_domains(&self) -> usize {
        self.domains.max(1)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::plain()
    }
}
