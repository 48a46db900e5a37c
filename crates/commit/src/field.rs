//! Modular arithmetic over `Z_p` for small moduli.
//!
//! Field elements are plain `u64` values kept in canonical form
//! (`0 <= value < p`). Products are widened to `u128` before reduction, so any
//! modulus below `2^64` is safe. The modulus itself is carried by the
//! surrounding [`Polynomial`](crate::Polynomial) rather than fixed at compile
//! time.

use crate::polynomial::{check_modulus, PolyError};

/// Reduce a signed integer into `[0, modulus)`.
///
/// Negative inputs wrap the way mathematicians expect: `-1 ↦ modulus - 1`.
#[inline]
pub fn reduce_signed(value: i64, modulus: u64) -> u64 {
    (value as i128).rem_euclid(modulus as i128) as u64
}

/// `(a + b) mod p` for canonical inputs.
#[inline]
pub fn add_mod(a: u64, b: u64, modulus: u64) -> u64 {
    ((a as u128 + b as u128) % modulus as u128) as u64
}

/// `(a - b) mod p` for canonical inputs.
#[inline]
pub fn sub_mod(a: u64, b: u64, modulus: u64) -> u64 {
    if a >= b {
        a - b
    } else {
        modulus - (b - a)
    }
}

/// `(a * b) mod p`.
#[inline]
pub fn mul_mod(a: u64, b: u64, modulus: u64) -> u64 {
    ((a as u128 * b as u128) % modulus as u128) as u64
}

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` with `a*x + b*y = g = gcd(a, b)`.
pub fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_s, mut s) = (1i128, 0i128);
    let (mut old_t, mut t) = (0i128, 1i128);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
        (old_t, t) = (t, old_t - q * t);
    }

    (old_r, old_s, old_t)
}

/// Multiplicative inverse of `value` modulo `modulus`.
///
/// The modulus need not be prime; the inverse exists exactly when
/// `gcd(value, modulus) == 1`. Moduli below 2 are rejected.
pub fn mod_inv(value: u64, modulus: u64) -> Result<u64, PolyError> {
    check_modulus(modulus)?;
    let (g, x, _) = extended_gcd(value as i128 % modulus as i128, modulus as i128);
    if g != 1 {
        return Err(PolyError::NoInverse { value, modulus });
    }
    Ok(x.rem_euclid(modulus as i128) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_signed() {
        assert_eq!(reduce_signed(12, 7), 5);
        assert_eq!(reduce_signed(-1, 7), 6);
        assert_eq!(reduce_signed(-14, 7), 0);
        assert_eq!(reduce_signed(i64::MIN, 100), 92);
    }

    #[test]
    fn test_add_sub_mul() {
        assert_eq!(add_mod(6, 5, 7), 4);
        assert_eq!(sub_mod(2, 5, 7), 4);
        assert_eq!(sub_mod(5, 2, 7), 3);
        assert_eq!(mul_mod(6, 6, 7), 1);

        // No overflow near the top of the u64 range
        let p = u64::MAX - 58; // 2^64 - 59, prime
        assert_eq!(mul_mod(p - 1, p - 1, p), 1);
        assert_eq!(add_mod(p - 1, p - 1, p), p - 2);
    }

    #[test]
    fn test_extended_gcd() {
        let (g, x, y) = extended_gcd(240, 46);
        assert_eq!(g, 2);
        assert_eq!(240 * x + 46 * y, 2);
    }

    #[test]
    fn test_mod_inv() {
        assert_eq!(mod_inv(3, 7).unwrap(), 5);
        assert_eq!(mod_inv(1, 7).unwrap(), 1);
        assert_eq!(mod_inv(3, 100).unwrap(), 67);

        for a in 1..13u64 {
            let inv = mod_inv(a, 13).unwrap();
            assert_eq!(mul_mod(a, inv, 13), 1);
        }
    }

    #[test]
    fn test_mod_inv_not_coprime() {
        assert!(matches!(
            mod_inv(4, 100),
            Err(PolyError::NoInverse { value: 4, modulus: 100 })
        ));
        assert!(matches!(mod_inv(0, 7), Err(PolyError::NoInverse { .. })));
    }

    #[test]
    fn test_mod_inv_degenerate_modulus() {
        assert_eq!(mod_inv(3, 0), Err(PolyError::InvalidModulus(0)));
        assert_eq!(mod_inv(0, 1), Err(PolyError::InvalidModulus(1)));
    }
}
