//! Fixed-capacity axis storage indexed by small integers.

use crate::config::EngineConfig;
use crate::error::{AxisError, Result};

use super::state::Axis;

/// Owns one [`Axis`] per slot; never grows or shrinks.
#[derive(Debug)]
pub struct AxisRegistry<OUT, IN, const N: usize> {
    axes: [Axis<OUT, IN>; N],
}

impl<OUT, IN, const N: usize> AxisRegistry<OUT, IN, N> {
    /// Create `N` unwired slots, each with its configured settings.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            axes: core::array::from_fn(|index| Axis::new(config.settings_for(index))),
        }
    }

    /// Number of slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Fail with `InvalidAxisId` unless `id < N`.
    #[inline]
    pub fn check(&self, id: usize) -> Result<()> {
        if id < N {
            Ok(())
        } else {
            Err(AxisError::InvalidAxisId { id, capacity: N }.into())
        }
    }

    /// Get an axis by id.
    pub fn get(&self, id: usize) -> Result<&Axis<OUT, IN>> {
        self.check(id)?;
        Ok(&self.axes[id])
    }

    /// Get an axis by id for mutation.
    pub fn get_mut(&mut self, id: usize) -> Result<&mut Axis<OUT, IN>> {
        self.check(id)?;
        Ok(&mut self.axes[id])
    }

    /// Iterate slots in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Axis<OUT, IN>> {
        self.axes.iter()
    }

    /// Iterate slots in id order for mutation.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Axis<OUT, IN>> {
        self.axes.iter_mut()
    }
}
