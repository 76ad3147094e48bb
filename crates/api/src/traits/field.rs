//! Arithmetic contract shared by every level of the extension-field tower.
//!
//! Each level implements [`Field`] for its single-precision element and
//! [`DoubleElement`] for the unreduced accumulator produced by
//! [`Field::mul_double`]. The two types name each other through associated
//! types, so an element can only be reduced back into its own field.

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::RngCore;
use subtle::{ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

use crate::Result;

/// An unreduced double-precision accumulator.
///
/// Values may exceed the single-precision range; [`DoubleElement::reduce`]
/// brings them back to a canonical [`Field`] element.
pub trait DoubleElement:
    Copy + Clone + Debug + Default + PartialEq + Eq + Send + Sync + Zeroize
{
    /// The single-precision element this accumulator reduces to
    type Single: Field<Double = Self>;

    /// The additive identity
    fn zero() -> Self;

    /// Sum, keeping the accumulator within its bound
    fn add(&self, rhs: &Self) -> Self;

    /// Difference, keeping the accumulator within its bound
    fn sub(&self, rhs: &Self) -> Self;

    /// Sum without any correction step. The caller guarantees the bound.
    fn add_no_reduction(&self, rhs: &Self) -> Self;

    /// Reduce to a canonical single-precision element
    fn reduce(&self) -> Self::Single;

    /// In-place sum
    fn add_assign(&mut self, rhs: &Self) -> &mut Self {
        *self = DoubleElement::add(self, rhs);
        self
    }

    /// In-place difference
    fn sub_assign(&mut self, rhs: &Self) -> &mut Self {
        *self = DoubleElement::sub(self, rhs);
        self
    }
}

/// A finite-field element with canonical coefficients.
///
/// Binary operators give the pure forms of add/sub/mul/neg; the `*_assign`
/// methods mutate the receiver and return it.
pub trait Field:
    Sized
    + Copy
    + Clone
    + Debug
    + Default
    + PartialEq
    + Eq
    + Send
    + Sync
    + 'static
    + ConditionallySelectable
    + ConstantTimeEq
    + Zeroize
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    /// Matching double-precision accumulator
    type Double: DoubleElement<Single = Self>;

    /// Number of base-field coefficients
    const DEGREE: usize;

    /// Bytes per base-field coefficient in the serialized form
    const COEFFICIENT_SIZE: usize;

    /// Serialized size in bytes
    const ENCODED_SIZE: usize = Self::DEGREE * Self::COEFFICIENT_SIZE;

    /// The additive identity
    fn zero() -> Self;

    /// The multiplicative identity
    fn one() -> Self;

    /// Whether this is the additive identity
    fn is_zero(&self) -> bool;

    /// Whether this is the multiplicative identity
    fn is_one(&self) -> bool {
        bool::from(self.ct_eq(&Self::one()))
    }

    /// Uniformly random element
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self;

    /// `self * self`
    fn square(&self) -> Self;

    /// `self + self`
    fn double(&self) -> Self;

    /// Multiplicative inverse; fails on zero
    fn invert(&self) -> Result<Self>;

    /// A square root; fails when `self` is not a quadratic residue
    fn sqrt(&self) -> Result<Self>;

    /// `self / 2`
    fn div_by_two(&self) -> Self;

    /// `self / 4`
    fn div_by_four(&self) -> Self {
        self.div_by_two().div_by_two()
    }

    /// Product left unreduced
    fn mul_double(&self, rhs: &Self) -> Self::Double;

    /// Square left unreduced
    fn square_double(&self) -> Self::Double;

    /// The `power`-th iterate of the Frobenius endomorphism
    fn frobenius_map(&self, power: usize) -> Self;

    /// Coefficients in c0, c1, … order (base-field coefficients in the same
    /// nesting order), each a big-endian `COEFFICIENT_SIZE`-byte integer
    fn to_byte_array(&self) -> Vec<u8>;

    /// Inverse of [`Field::to_byte_array`]; rejects bad lengths and
    /// non-canonical coefficients
    fn from_byte_array(bytes: &[u8]) -> Result<Self>;

    /// Square-and-multiply by a little-endian exponent, most significant bit first
    fn pow(&self, exp: &[u64]) -> Self {
        let mut res = Self::one();
        let mut started = false;
        for limb in exp.iter().rev() {
            for i in (0..64).rev() {
                if started {
                    res = res.square();
                }
                if ((limb >> i) & 1) == 1 {
                    res *= *self;
                    started = true;
                }
            }
        }
        res
    }

    /// In-place [`Field::square`]
    fn square_assign(&mut self) -> &mut Self {
        *self = self.square();
        self
    }

    /// In-place [`Field::double`]
    fn double_assign(&mut self) -> &mut Self {
        *self = self.double();
        self
    }

    /// In-place negation
    fn neg_assign(&mut self) -> &mut Self {
        *self = -*self;
        self
    }

    /// In-place [`Field::invert`]; the receiver is untouched on error
    fn invert_assign(&mut self) -> Result<&mut Self> {
        *self = self.invert()?;
        Ok(self)
    }

    /// In-place [`Field::sqrt`]; the receiver is untouched on error
    fn sqrt_assign(&mut self) -> Result<&mut Self> {
        *self = self.sqrt()?;
        Ok(self)
    }

    /// In-place [`Field::pow`]
    fn pow_assign(&mut self, exp: &[u64]) -> &mut Self {
        *self = self.pow(exp);
        self
    }

    /// In-place [`Field::div_by_two`]
    fn div_by_two_assign(&mut self) -> &mut Self {
        *self = self.div_by_two();
        self
    }

    /// In-place [`Field::div_by_four`]
    fn div_by_four_assign(&mut self) -> &mut Self {
        *self = self.div_by_four();
        self
    }
}
