//! Point contract for the curve groups.

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use rand::RngCore;
use subtle::{ConditionallySelectable, ConstantTimeEq};

/// A prime-order elliptic-curve group in projective coordinates.
///
/// The point at infinity is an ordinary operand: every operation accepts it.
pub trait CurveGroup:
    Sized
    + Copy
    + Clone
    + Debug
    + PartialEq
    + Eq
    + Send
    + Sync
    + ConditionallySelectable
    + ConstantTimeEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
{
    /// Scalar field of the group
    type Scalar;

    /// Affine form of a point
    type Affine: Copy + Clone + Debug + PartialEq + Eq;

    /// The point at infinity
    fn identity() -> Self;

    /// The fixed generator
    fn generator() -> Self;

    /// A uniformly random point of the prime-order subgroup
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self;

    /// Whether this is the point at infinity
    fn is_infinite(&self) -> bool;

    /// Whether the point satisfies the curve equation
    fn is_valid(&self) -> bool;

    /// `2 * self`
    fn twice(&self) -> Self;

    /// `k * self`
    fn mul_scalar(&self, k: &Self::Scalar) -> Self;

    /// Normalize to affine coordinates
    fn to_affine(&self) -> Self::Affine;

    /// Lift an affine point
    fn from_affine(p: &Self::Affine) -> Self;

    /// In-place [`CurveGroup::twice`]
    fn twice_assign(&mut self) -> &mut Self {
        *self = self.twice();
        self
    }

    /// In-place [`CurveGroup::mul_scalar`]
    fn mul_scalar_assign(&mut self, k: &Self::Scalar) -> &mut Self {
        *self = self.mul_scalar(k);
        self
    }
}
