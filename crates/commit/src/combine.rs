//! Parent-from-children combine strategies for the reduction tree.
//!
//! The tree never hashes directly; it asks a [`Combine`] implementation to
//! merge two sibling values. The default [`AdditiveCombine`] is modular
//! addition. It is **not** collision resistant and exists to keep the
//! commitment mechanics easy to follow by hand.

use crate::params::{check_modulus, ParamError};

/// Merge two sibling node values into their parent.
pub trait Combine {
    fn combine(&self, left: u64, right: u64) -> u64;

    /// Exclusive upper bound on canonical node values, if the strategy has
    /// one. The verifier rejects claimed values and proof entries at or
    /// above it.
    fn bound(&self) -> Option<u64> {
        None
    }
}

/// `combine(a, b) = (a + b) mod modulus`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdditiveCombine {
    modulus: u64,
}

impl AdditiveCombine {
    pub fn new(modulus: u64) -> Result<Self, ParamError> {
        check_modulus(modulus)?;
        Ok(Self { modulus })
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }
}

impl Combine for AdditiveCombine {
    #[inline]
    fn combine(&self, left: u64, right: u64) -> u64 {
        ((left as u128 + right as u128) % self.modulus as u128) as u64
    }

    fn bound(&self) -> Option<u64> {
        Some(self.modulus)
    }
}

impl<C: Combine + ?Sized> Combine for &C {
    #[inline]
    fn combine(&self, left: u64, right: u64) -> u64 {
        (**self).combine(left, right)
    }

    #[inline]
    fn bound(&self) -> Option<u64> {
        (**self).bound()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_additive_combine() {
        let c = AdditiveCombine::new(100).unwrap();
        assert_eq!(c.combine(30, 40), 70);
        assert_eq!(c.combine(60, 40), 0);
        assert_eq!(c.combine(99, 99), 98);
        assert_eq!(c.modulus(), 100);
        assert_eq!(c.bound(), Some(100));
    }

    #[test]
    fn test_additive_collisions_expected() {
        let c = AdditiveCombine::new(100).unwrap();
        assert_eq!(c.combine(1, 2), c.combine(2, 1));
        assert_eq!(c.combine(0, 3), c.combine(50, 53));
    }

    #[test]
    fn test_additive_small_modulus() {
        for modulus in [0, 1] {
            assert!(matches!(
                AdditiveCombine::new(modulus),
                Err(ParamError::InvalidModulus(_))
            ));
        }
        assert!(AdditiveCombine::new(2).is_ok());
    }

    #[test]
    fn test_custom_strategy() {
        struct Xor;
        impl Combine for Xor {
            fn combine(&self, left: u64, right: u64) -> u64 {
                left ^ right
            }
        }

        let strategy = Xor;
        let by_ref = &strategy;
        assert_eq!(by_ref.combine(0b1100, 0b1010), 0b0110);
        assert_eq!(by_ref.bound(), None);
    }
}
