//! Local ranges and the striping rule that splits a global box across ranks.
//!
//! The array itself never checks that ranges of different ranks agree; callers
//! that assemble a decomposition can verify it with [`covers_exactly`].

use serde::{Deserialize, Serialize};

use crate::container_error::{ContainerError, Result};

/// Half-open box `[begins, ends)` of global indices owned by one rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalRange<const D: usize> {
    #[serde(with = "crate::containers::serde_array")]
    pub begins: [usize; D],
    #[serde(with = "crate::containers::serde_array")]
    pub ends: [usize; D],
}

impl<const D: usize> Default for LocalRange<D> {
    fn default() -> Self {
        Self {
            begins: [0; D],
            ends: [0; D],
        }
    }
}

impl<const D: usize> LocalRange<D> {
    pub fn new(begins: [usize; D], ends: [usize; D]) -> Self {
        Self { begins, ends }
    }

    /// The whole box `[0, global)`.
    pub fn whole(global: [usize; D]) -> Self {
        Self {
            begins: [0; D],
            ends: global,
        }
    }

    /// Number of indices per axis.
    pub fn extents(&self) -> [usize; D] {
        let mut out = [0; D];
        for d in 0..D {
            out[d] = self.ends[d].saturating_sub(self.begins[d]);
        }
        out
    }

    /// Number of indices in the box.
    pub fn volume(&self) -> usize {
        self.extents().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.volume() == 0
    }

    pub fn contains(&self, idx: &[isize; D]) -> bool {
        (0..D).all(|d| self.begins[d] as isize <= idx[d] && idx[d] < self.ends[d] as isize)
    }

    /// Check `begins <= ends <= global` on every axis.
    pub fn validate(&self, global: &[usize; D]) -> Result<()> {
        for d in 0..D {
            if self.begins[d] > self.ends[d] || self.ends[d] > global[d] {
                return Err(ContainerError::InvalidDistribution {
                    axis: d,
                    begin: self.begins[d],
                    end: self.ends[d],
                    size: global[d],
                });
            }
        }
        Ok(())
    }

    fn intersects(&self, other: &Self) -> bool {
        (0..D).all(|d| self.begins[d].max(other.begins[d]) < self.ends[d].min(other.ends[d]))
    }
}

/// Range owned by `rank` when the global box is cut into `nranks` stripes
/// along `axis`.
///
/// Stripe `r` spans `[r*n/nranks, (r+1)*n/nranks)` on `axis` (the last rank
/// ends at `n`) and the full extent on every other axis.
///
/// # Errors
/// [`ContainerError::InvalidPartition`] if `axis >= D`, `nranks == 0` or
/// `rank >= nranks`.
pub fn stripe_along_axis<const D: usize>(
    global: [usize; D],
    axis: usize,
    rank: usize,
    nranks: usize,
) -> Result<LocalRange<D>> {
    if axis >= D || nranks == 0 || rank >= nranks {
        return Err(ContainerError::InvalidPartition { axis, rank, nranks });
    }
    let n = global[axis];
    let mut range = LocalRange::whole(global);
    range.begins[axis] = rank * n / nranks;
    range.ends[axis] = if rank + 1 == nranks {
        n
    } else {
        (rank + 1) * n / nranks
    };
    Ok(range)
}

/// Whether `ranges` tile `[0, global)` exactly: pairwise disjoint, each inside
/// the box, with total volume equal to the box's.
pub fn covers_exactly<const D: usize>(global: [usize; D], ranges: &[LocalRange<D>]) -> bool {
    if ranges.iter().any(|r| r.validate(&global).is_err()) {
        return false;
    }
    let nonempty: Vec<_> = ranges.iter().filter(|r| !r.is_empty()).collect();
    for (i, a) in nonempty.iter().enumerate() {
        if nonempty[i + 1..].iter().any(|b| a.intersects(b)) {
            return false;
        }
    }
    let total: usize = nonempty.iter().map(|r| r.volume()).sum();
    total == LocalRange::whole(global).volume()
}
