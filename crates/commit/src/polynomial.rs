//! Dense polynomials over `Z_p`.
//!
//! Coefficients are stored lowest degree first: `coefficients[i]` is the
//! coefficient of `x^i`. Every operation returns a fresh [`Polynomial`];
//! operands are never mutated, so polynomials can be shared freely.
//!
//! ## Division convention
//!
//! [`Polynomial::divide`] treats `coefficients[0]` as the *leading*
//! coefficient and eliminates terms from index 0 upward. This is long
//! division on the reversed coefficient order. The remainder is the tail of
//! the reduced buffer and sits at offset `len(dividend) - len(divisor) + 1`:
//!
//! ```
//! use fri_commit::Polynomial;
//!
//! let dividend = Polynomial::new(&[1, 0, 5, 4], 7).unwrap();
//! let divisor = Polynomial::new(&[1, 2], 7).unwrap();
//! let (q, r) = dividend.divide(&divisor).unwrap();
//!
//! let offset = dividend.len() - divisor.len() + 1;
//! let rebuilt = q.multiply(&divisor).unwrap().add(&r.shift(offset)).unwrap();
//! assert_eq!(rebuilt, dividend);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::{add_mod, mod_inv, mul_mod, reduce_signed, sub_mod};

/// Polynomial arithmetic errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolyError {
    #[error("field mismatch: Z_{left} vs Z_{right}")]
    FieldMismatch { left: u64, right: u64 },

    #[error("no inverse exists for {value} in Z_{modulus}")]
    NoInverse { value: u64, modulus: u64 },

    #[error("invalid modulus {0}: must be at least 2")]
    InvalidModulus(u64),

    #[error("division by the empty polynomial")]
    EmptyDivisor,

    #[error("divisor has {divisor} coefficients but dividend only {dividend}")]
    DivisorTooLong { dividend: usize, divisor: usize },
}

/// Polynomial over the integers modulo `modulus`.
///
/// Invariant: every coefficient is in `[0, modulus)` and `modulus >= 2`.
/// The empty coefficient vector is the zero polynomial.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPolynomial")]
pub struct Polynomial {
    coefficients: Vec<u64>,
    modulus: u64,
}

#[derive(Deserialize)]
struct RawPolynomial {
    coefficients: Vec<u64>,
    modulus: u64,
}

impl TryFrom<RawPolynomial> for Polynomial {
    type Error = PolyError;

    fn try_from(raw: RawPolynomial) -> Result<Self, Self::Error> {
        Self::from_canonical(raw.coefficients, raw.modulus)
    }
}

impl Polynomial {
    /// Build a polynomial from raw (possibly negative) integers, reducing
    /// each one into `[0, modulus)`.
    pub fn new(coefficients: &[i64], modulus: u64) -> Result<Self, PolyError> {
        check_modulus(modulus)?;
        Ok(Self {
            coefficients: coefficients
                .iter()
                .map(|&c| reduce_signed(c, modulus))
                .collect(),
            modulus,
        })
    }

    /// Build a polynomial from unsigned coefficients, reducing each modulo
    /// `modulus`.
    pub fn from_canonical(mut coefficients: Vec<u64>, modulus: u64) -> Result<Self, PolyError> {
        check_modulus(modulus)?;
        for c in coefficients.iter_mut() {
            *c %= modulus;
        }
        Ok(Self {
            coefficients,
            modulus,
        })
    }

    /// The zero polynomial (no coefficients) over `Z_modulus`.
    pub fn zero(modulus: u64) -> Result<Self, PolyError> {
        Self::from_canonical(Vec::new(), modulus)
    }

    pub fn coefficients(&self) -> &[u64] {
        &self.coefficients
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Number of stored coefficients (including trailing zeros).
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Index of the highest non-zero coefficient, or `None` for the zero
    /// polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.iter().rposition(|&c| c != 0)
    }

    /// Evaluate at `x`, accumulating powers of `x` term by term.
    pub fn evaluate(&self, x: u64) -> u64 {
        let p = self.modulus;
        let x = x % p;
        let mut result = 0;
        let mut power = 1 % p;

        for &coeff in &self.coefficients {
            result = add_mod(result, mul_mod(coeff, power, p), p);
            power = mul_mod(power, x, p);
        }

        result
    }

    /// Coefficient-wise sum; the shorter operand is padded with zeros.
    pub fn add(&self, other: &Self) -> Result<Self, PolyError> {
        self.check_same_field(other)?;
        let p = self.modulus;
        let length = self.len().max(other.len());

        let coefficients = (0..length)
            .map(|i| {
                let a = self.coefficients.get(i).copied().unwrap_or(0);
                let b = other.coefficients.get(i).copied().unwrap_or(0);
                add_mod(a, b, p)
            })
            .collect();

        Ok(Self {
            coefficients,
            modulus: p,
        })
    }

    /// Full convolution product of length `len(self) + len(other) - 1`.
    ///
    /// The product with the zero polynomial is the zero polynomial.
    pub fn multiply(&self, other: &Self) -> Result<Self, PolyError> {
        self.check_same_field(other)?;
        let p = self.modulus;

        if self.is_empty() || other.is_empty() {
            return Self::zero(p);
        }

        let mut result = vec![0u64; self.len() + other.len() - 1];
        for (i, &a) in self.coefficients.iter().enumerate() {
            for (j, &b) in other.coefficients.iter().enumerate() {
                result[i + j] = add_mod(result[i + j], mul_mod(a, b, p), p);
            }
        }

        Ok(Self {
            coefficients: result,
            modulus: p,
        })
    }

    /// Long division using `other.coefficients[0]` as the leading term.
    ///
    /// Returns `(quotient, remainder)` where the quotient has
    /// `len(self) - len(other) + 1` coefficients and the remainder is the
    /// last `len(other) - 1` entries of the reduced dividend.
    pub fn divide(&self, other: &Self) -> Result<(Self, Self), PolyError> {
        self.check_same_field(other)?;
        let p = self.modulus;

        if other.is_empty() {
            return Err(PolyError::EmptyDivisor);
        }
        if other.len() > self.len() {
            return Err(PolyError::DivisorTooLong {
                dividend: self.len(),
                divisor: other.len(),
            });
        }

        let mut buffer = self.coefficients.clone();
        let divisor = &other.coefficients;
        let steps = buffer.len() - divisor.len() + 1;
        let inv_leading = mod_inv(divisor[0], p)?;
        let mut quotient = vec![0u64; steps];

        for i in 0..steps {
            let scale = mul_mod(buffer[i], inv_leading, p);
            quotient[i] = scale;

            for (j, &d) in divisor.iter().enumerate() {
                buffer[i + j] = sub_mod(buffer[i + j], mul_mod(scale, d, p), p);
            }
        }

        let remainder = buffer.split_off(steps);

        Ok((
            Self {
                coefficients: quotient,
                modulus: p,
            },
            Self {
                coefficients: remainder,
                modulus: p,
            },
        ))
    }

    /// Multiply by `x^k` (prepend `k` zero coefficients).
    pub fn shift(&self, k: usize) -> Self {
        let mut coefficients = vec![0u64; k];
        coefficients.extend_from_slice(&self.coefficients);
        Self {
            coefficients,
            modulus: self.modulus,
        }
    }

    /// Multiply every coefficient by `scalar`.
    pub fn scale(&self, scalar: u64) -> Self {
        let p = self.modulus;
        let scalar = scalar % p;
        Self {
            coefficients: self
                .coefficients
                .iter()
                .map(|&c| mul_mod(c, scalar, p))
                .collect(),
            modulus: p,
        }
    }

    /// Split into even- and odd-indexed parts `(E, O)` such that
    /// `P(x) = E(x^2) + x * O(x^2)`.
    pub fn split_even_odd(&self) -> (Self, Self) {
        let even = self.coefficients.iter().step_by(2).copied().collect();
        let odd = self.coefficients.iter().skip(1).step_by(2).copied().collect();
        (
            Self {
                coefficients: even,
                modulus: self.modulus,
            },
            Self {
                coefficients: odd,
                modulus: self.modulus,
            },
        )
    }

    /// One FRI folding step: `E + challenge * O`, halving the length.
    pub fn fold(&self, challenge: u64) -> Self {
        let (even, odd) = self.split_even_odd();
        let p = self.modulus;
        let odd = odd.scale(challenge);

        let coefficients = even
            .coefficients
            .iter()
            .enumerate()
            .map(|(i, &e)| add_mod(e, odd.coefficients.get(i).copied().unwrap_or(0), p))
            .collect();

        Self {
            coefficients,
            modulus: p,
        }
    }

    fn check_same_field(&self, other: &Self) -> Result<(), PolyError> {
        if self.modulus != other.modulus {
            return Err(PolyError::FieldMismatch {
                left: self.modulus,
                right: other.modulus,
            });
        }
        Ok(())
    }
}

pub(crate) fn check_modulus(modulus: u64) -> Result<(), PolyError> {
    if modulus < 2 {
        return Err(PolyError::InvalidModulus(modulus));
    }
    Ok(())
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        for (i, &c) in self.coefficients.iter().enumerate() {
            if c == 0 {
                continue;
            }
            if wrote {
                write!(f, " + ")?;
            }
            match (i, c) {
                (0, _) => write!(f, "{c}")?,
                (1, 1) => write!(f, "x")?,
                (1, _) => write!(f, "{c}x")?,
                (_, 1) => write!(f, "x^{i}")?,
                _ => write!(f, "{c}x^{i}")?,
            }
            wrote = true;
        }
        if !wrote {
            write!(f, "0")?;
        }
        write!(f, " (mod {})", self.modulus)
    }
}

// ========== Tests ==========
