//! G₁ group of Fp254BNb: E(Fq): y² = x³ + 2, prime order r, cofactor 1.

use core::borrow::Borrow;
use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul, Neg, Sub};

use isopair_api::{CurveGroup, Error as CoreError, Result as CoreResult, Serialize};
use num_bigint::BigUint;
use rand::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::field::fp::{Fp, FP_BYTES};
use super::Scalar;
use crate::error::{validate, Error, Result};

/// Compressed encoding size: x with the flag bits
pub const G1_COMPRESSED_BYTES: usize = isopair_params::pairing::bn254::G1_COMPRESSED_SIZE;

/// Uncompressed encoding size: x ‖ y
pub const G1_UNCOMPRESSED_BYTES: usize = isopair_params::pairing::bn254::G1_UNCOMPRESSED_SIZE;

/// Marks the lexicographically largest y in compressed form
pub(crate) const SORT_FLAG: u8 = 1 << 7;
/// Marks the point at infinity
pub(crate) const INFINITY_FLAG: u8 = 1 << 6;
/// Coordinate bits of the leading byte
pub(crate) const COORDINATE_MASK: u8 = 0b0011_1111;

/// b = 2 in Montgomery form
const B: Fp = Fp::from_raw_unchecked([
    0x84ff_ffff_ffff_ff09,
    0x1152_ffff_ffff_ff00,
    0x8b58_107f_ffff_ff93,
    0x1d33_e562_bfff_ffe9,
]);

/// G₁ affine point representation.
#[derive(Copy, Clone, Debug)]
pub struct G1Affine {
    pub(crate) x: Fp,
    pub(crate) y: Fp,
    pub(crate) infinity: Choice,
}

impl Default for G1Affine {
    fn default() -> G1Affine {
        G1Affine::identity()
    }
}

impl zeroize::DefaultIsZeroes for G1Affine {}

impl fmt::Display for G1Affine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<'a> From<&'a G1Projective> for G1Affine {
    fn from(p: &'a G1Projective) -> G1Affine {
        let zinv = p.z.invert().unwrap_or(Fp::zero());
        let x = p.x * zinv;
        let y = p.y * zinv;

        let tmp = G1Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        };

        G1Affine::conditional_select(&tmp, &G1Affine::identity(), zinv.is_zero())
    }
}

impl From<G1Projective> for G1Affine {
    fn from(p: G1Projective) -> G1Affine {
        G1Affine::from(&p)
    }
}

impl ConstantTimeEq for G1Affine {
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.infinity & other.infinity)
            | ((!self.infinity)
                & (!other.infinity)
                & self.x.ct_eq(&other.x)
                & self.y.ct_eq(&other.y))
    }
}

impl ConditionallySelectable for G1Affine {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G1Affine {
            x: Fp::conditional_select(&a.x, &b.x, choice),
            y: Fp::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl Eq for G1Affine {}
impl PartialEq for G1Affine {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a> Neg for &'a G1Affine {
    type Output = G1Affine;

    #[inline]
    fn neg(self) -> G1Affine {
        G1Affine {
            x: self.x,
            y: Fp::conditional_select(&-self.y, &Fp::one(), self.infinity),
            infinity: self.infinity,
        }
    }
}

impl_neg_owned!(G1Affine);

impl<'a, 'b> Add<&'b G1Projective> for &'a G1Affine {
    type Output = G1Projective;

    #[inline]
    fn add(self, rhs: &'b G1Projective) -> G1Projective {
        rhs.add_mixed(self)
    }
}

impl<'a, 'b> Add<&'b G1Affine> for &'a G1Projective {
    type Output = G1Projective;

    #[inline]
    fn add(self, rhs: &'b G1Affine) -> G1Projective {
        self.add_mixed(rhs)
    }
}

impl<'a, 'b> Sub<&'b G1Projective> for &'a G1Affine {
    type Output = G1Projective;

    #[inline]
    fn sub(self, rhs: &'b G1Projective) -> G1Projective {
        self + &(-rhs)
    }
}

impl<'a, 'b> Sub<&'b G1Affine> for &'a G1Projective {
    type Output = G1Projective;

    #[inline]
    fn sub(self, rhs: &'b G1Affine) -> G1Projective {
        self + &(-rhs)
    }
}

impl<T> Sum<T> for G1Projective
where
    T: Borrow<G1Projective>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::identity(), |acc, item| acc + item.borrow())
    }
}

impl_binops_additive!(G1Projective, G1Affine);
impl_binops_additive_specify_output!(G1Affine, G1Projective, G1Projective);

#[inline(always)]
fn mul_by_3b(a: Fp) -> Fp {
    let a = a + a; // 2
    a + a + a // 6
}

impl G1Affine {
    /// Point at infinity.
    pub fn identity() -> G1Affine {
        G1Affine {
            x: Fp::zero(),
            y: Fp::one(),
            infinity: Choice::from(1u8),
        }
    }

    /// Fixed generator P1 = (-1, 1).
    pub fn generator() -> G1Affine {
        G1Affine {
            x: Fp::from_raw_unchecked([
                0x9100_0000_0000_0085,
                0xa7e7_0000_0000_0089,
                0x176e_1e80_0000_003a,
                0x03f7_bf8f_c000_000c,
            ]),
            y: Fp::one(),
            infinity: Choice::from(0u8),
        }
    }

    /// Build from coordinates, rejecting points off the curve.
    pub fn from_coordinates(x: Fp, y: Fp) -> Result<G1Affine> {
        let p = G1Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        };
        validate::parameter(bool::from(p.is_on_curve()), "point", "not on curve")?;
        Ok(p)
    }

    /// The x-coordinate (zero for the identity)
    pub fn x(&self) -> Fp {
        Fp::conditional_select(&self.x, &Fp::zero(), self.infinity)
    }

    /// The y-coordinate (zero for the identity)
    pub fn y(&self) -> Fp {
        Fp::conditional_select(&self.y, &Fp::zero(), self.infinity)
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Curve membership check.
    pub fn is_on_curve(&self) -> Choice {
        (self.y.square() - (self.x.square() * self.x)).ct_eq(&B) | self.infinity
    }

    /// Every curve point lies in G₁ since the cofactor is 1.
    pub fn is_torsion_free(&self) -> Choice {
        Choice::from(1u8)
    }

    /// Exact lift to projective coordinates.
    pub fn to_projective(&self) -> G1Projective {
        G1Projective::from(self)
    }

    /// Compress to 32 bytes.
    pub fn to_compressed(&self) -> [u8; G1_COMPRESSED_BYTES] {
        let mut res = self.x().to_bytes();
        res[0] |= u8::conditional_select(&0u8, &INFINITY_FLAG, self.infinity);
        res[0] |= u8::conditional_select(
            &0u8,
            &SORT_FLAG,
            (!self.infinity) & self.y.lexicographically_largest(),
        );
        res
    }

    /// Serialize to 64 bytes uncompressed.
    pub fn to_uncompressed(&self) -> [u8; G1_UNCOMPRESSED_BYTES] {
        let mut res = [0; G1_UNCOMPRESSED_BYTES];
        res[..FP_BYTES].copy_from_slice(&self.x().to_bytes());
        res[FP_BYTES..].copy_from_slice(&self.y().to_bytes());
        res[0] |= u8::conditional_select(&0u8, &INFINITY_FLAG, self.infinity);
        res
    }

    /// Deserialize from uncompressed bytes, checking the curve equation.
    pub fn from_uncompressed(bytes: &[u8; G1_UNCOMPRESSED_BYTES]) -> Result<Self> {
        let p: G1Affine = Option::from(Self::from_uncompressed_unchecked(bytes))
            .ok_or_else(|| Error::param("uncompressed_bytes", "invalid G1 point encoding"))?;
        validate::parameter(bool::from(p.is_on_curve()), "point", "not on curve")?;
        Ok(p)
    }

    /// Deserialize without validating the curve equation.
    pub fn from_uncompressed_unchecked(bytes: &[u8; G1_UNCOMPRESSED_BYTES]) -> CtOption<Self> {
        let infinity_flag_set = Choice::from((bytes[0] >> 6) & 1);
        let sort_flag_set = Choice::from((bytes[0] >> 7) & 1);
        let x = {
            let mut tmp = [0; FP_BYTES];
            tmp.copy_from_slice(&bytes[..FP_BYTES]);
            tmp[0] &= COORDINATE_MASK;
            Fp::from_bytes(&tmp)
        };
        let y = {
            let mut tmp = [0; FP_BYTES];
            tmp.copy_from_slice(&bytes[FP_BYTES..]);
            Fp::from_bytes(&tmp)
        };

        x.and_then(|x| {
            y.and_then(|y| {
                let p = G1Affine::conditional_select(
                    &G1Affine {
                        x,
                        y,
                        infinity: infinity_flag_set,
                    },
                    &G1Affine::identity(),
                    infinity_flag_set,
                );
                CtOption::new(
                    p,
                    ((!infinity_flag_set) | (infinity_flag_set & x.is_zero() & y.is_zero()))
                        & (!sort_flag_set),
                )
            })
        })
    }

    /// Deserialize from compressed bytes.
    pub fn from_compressed(bytes: &[u8; G1_COMPRESSED_BYTES]) -> Result<Self> {
        Option::from(Self::from_compressed_unchecked(bytes))
            .ok_or_else(|| Error::Parameter {
                name: "compressed_bytes".into(),
                reason: "invalid G1 point encoding".into(),
            })
    }

    /// Recover y from x; the result is on the curve by construction.
    pub(crate) fn from_compressed_unchecked(bytes: &[u8; G1_COMPRESSED_BYTES]) -> CtOption<Self> {
        let infinity_flag_set = Choice::from((bytes[0] >> 6) & 1);
        let sort_flag_set = Choice::from((bytes[0] >> 7) & 1);
        let x = {
            let mut tmp = *bytes;
            tmp[0] &= COORDINATE_MASK;
            Fp::from_bytes(&tmp)
        };

        x.and_then(|x| {
            CtOption::new(
                G1Affine::identity(),
                infinity_flag_set & (!sort_flag_set) & x.is_zero(),
            )
            .or_else(|| {
                ((x.square() * x) + B).sqrt().and_then(|y| {
                    let y = Fp::conditional_select(
                        &y,
                        &-y,
                        y.lexicographically_largest() ^ sort_flag_set,
                    );
                    CtOption::new(
                        G1Affine {
                            x,
                            y,
                            infinity: infinity_flag_set,
                        },
                        !infinity_flag_set,
                    )
                })
            })
        })
    }
}

/// G₁ projective point representation.
#[derive(Copy, Clone, Debug)]
pub struct G1Projective {
    pub(crate) x: Fp,
    pub(crate) y: Fp,
    pub(crate) z: Fp,
}

impl Default for G1Projective {
    fn default() -> G1Projective {
        G1Projective::identity()
    }
}

impl zeroize::DefaultIsZeroes for G1Projective {}

impl fmt::Display for G1Projective {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<'a> From<&'a G1Affine> for G1Projective {
    fn from(p: &'a G1Affine) -> G1Projective {
        G1Projective {
            x: p.x,
            y: p.y,
            z: Fp::conditional_select(&Fp::one(), &Fp::zero(), p.infinity),
        }
    }
}

impl From<G1Affine> for G1Projective {
    fn from(p: G1Affine) -> G1Projective {
        G1Projective::from(&p)
    }
}

impl ConstantTimeEq for G1Projective {
    fn ct_eq(&self, other: &Self) -> Choice {
        let x1 = self.x * other.z;
        let x2 = other.x * self.z;
        let y1 = self.y * other.z;
        let y2 = other.y * self.z;
        let self_is_zero = self.z.is_zero();
        let other_is_zero = other.z.is_zero();

        (self_is_zero & other_is_zero)
            | ((!self_is_zero) & (!other_is_zero) & x1.ct_eq(&x2) & y1.ct_eq(&y2))
    }
}

impl ConditionallySelectable for G1Projective {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G1Projective {
            x: Fp::conditional_select(&a.x, &b.x, choice),
            y: Fp::conditional_select(&a.y, &b.y, choice),
            z: Fp::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl Eq for G1Projective {}
impl PartialEq for G1Projective {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a> Neg for &'a G1Projective {
    type Output = G1Projective;

    #[inline]
    fn neg(self) -> G1Projective {
        G1Projective {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl_neg_owned!(G1Projective);

impl<'a, 'b> Add<&'b G1Projective> for &'a G1Projective {
    type Output = G1Projective;

    #[inline]
    fn add(self, rhs: &'b G1Projective) -> G1Projective {
        self.add(rhs)
    }
}

impl<'a, 'b> Sub<&'b G1Projective> for &'a G1Projective {
    type Output = G1Projective;

    #[inline]
    fn sub(self, rhs: &'b G1Projective) -> G1Projective {
        self + &(-rhs)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a G1Projective {
    type Output = G1Projective;

    fn mul(self, other: &'b Scalar) -> Self::Output {
        self.multiply(&other.to_bytes())
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a G1Affine {
    type Output = G1Projective;

    fn mul(self, other: &'b Scalar) -> Self::Output {
        G1Projective::from(self).multiply(&other.to_bytes())
    }
}

impl_binops_additive!(G1Projective, G1Projective);
impl_binops_multiplicative!(G1Projective, Scalar);
impl_binops_multiplicative_mixed!(G1Affine, Scalar, G1Projective);

impl G1Projective {
    /// Point at infinity.
    pub fn identity() -> G1Projective {
        G1Projective {
            x: Fp::zero(),
            y: Fp::one(),
            z: Fp::zero(),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G1Projective {
        G1Projective::from(G1Affine::generator())
    }

    /// Random point: sample x until x³ + 2 is a square.
    pub fn random(mut rng: impl RngCore) -> Self {
        loop {
            let x = Fp::random(&mut rng);
            let flip_sign = rng.next_u32() % 2 != 0;

            let p: Option<G1Affine> = ((x.square() * x) + B)
                .sqrt()
                .map(|y| G1Affine {
                    x,
                    y: if flip_sign { -y } else { y },
                    infinity: 0.into(),
                })
                .into();

            if let Some(p) = p {
                return G1Projective::from(p);
            }
        }
    }

    /// Point doubling.
    pub fn double(&self) -> G1Projective {
        // Algorithm 9 from https://eprint.iacr.org/2015/1060.pdf
        let t0 = self.y.square();
        let z3 = t0 + t0;
        let z3 = z3 + z3;
        let z3 = z3 + z3;
        let t1 = self.y * self.z;
        let t2 = self.z.square();
        let t2 = mul_by_3b(t2);
        let x3 = t2 * z3;
        let y3 = t0 + t2;
        let z3 = t1 * z3;
        let t1 = t2 + t2;
        let t2 = t1 + t2;
        let t0 = t0 - t2;
        let y3 = t0 * y3;
        let y3 = x3 + y3;
        let t1 = self.x * self.y;
        let x3 = t0 * t1;
        let x3 = x3 + x3;

        let tmp = G1Projective {
            x: x3,
            y: y3,
            z: z3,
        };
        G1Projective::conditional_select(&tmp, &G1Projective::identity(), self.is_identity())
    }

    /// Point addition.
    pub fn add(&self, rhs: &G1Projective) -> G1Projective {
        // Algorithm 7 from https://eprint.iacr.org/2015/1060.pdf
        let t0 = self.x * rhs.x;
        let t1 = self.y * rhs.y;
        let t2 = self.z * rhs.z;
        let t3 = self.x + self.y;
        let t4 = rhs.x + rhs.y;
        let t3 = t3 * t4;
        let t4 = t0 + t1;
        let t3 = t3 - t4;
        let t4 = self.y + self.z;
        let x3 = rhs.y + rhs.z;
        let t4 = t4 * x3;
        let x3 = t1 + t2;
        let t4 = t4 - x3;
        let x3 = self.x + self.z;
        let y3 = rhs.x + rhs.z;
        let x3 = x3 * y3;
        let y3 = t0 + t2;
        let y3 = x3 - y3;
        let x3 = t0 + t0;
        let t0 = x3 + t0;
        let t2 = mul_by_3b(t2);
        let z3 = t1 + t2;
        let t1 = t1 - t2;
        let y3 = mul_by_3b(y3);
        let x3 = t4 * y3;
        let t2 = t3 * t1;
        let x3 = t2 - x3;
        let y3 = y3 * t0;
        let t1 = t1 * z3;
        let y3 = t1 + y3;
        let t0 = t0 * t3;
        let z3 = z3 * t4;
        let z3 = z3 + t0;

        G1Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Mixed addition with affine point.
    pub fn add_mixed(&self, rhs: &G1Affine) -> G1Projective {
        // Algorithm 8 from https://eprint.iacr.org/2015/1060.pdf
        let t0 = self.x * rhs.x;
        let t1 = self.y * rhs.y;
        let t3 = rhs.x + rhs.y;
        let t4 = self.x + self.y;
        let t3 = t3 * t4;
        let t4 = t0 + t1;
        let t3 = t3 - t4;
        let t4 = rhs.y * self.z;
        let t4 = t4 + self.y;
        let y3 = rhs.x * self.z;
        let y3 = y3 + self.x;
        let x3 = t0 + t0;
        let t0 = x3 + t0;
        let t2 = mul_by_3b(self.z);
        let z3 = t1 + t2;
        let t1 = t1 - t2;
        let y3 = mul_by_3b(y3);
        let x3 = t4 * y3;
        let t2 = t3 * t1;
        let x3 = t2 - x3;
        let y3 = y3 * t0;
        let t1 = t1 * z3;
        let y3 = t1 + y3;
        let t0 = t0 * t3;
        let z3 = z3 * t4;
        let z3 = z3 + t0;

        let tmp = G1Projective {
            x: x3,
            y: y3,
            z: z3,
        };
        G1Projective::conditional_select(&tmp, self, rhs.is_identity())
    }

    /// Double-and-add over big-endian scalar bytes, constant time in the bits.
    fn multiply(&self, by: &[u8; 32]) -> G1Projective {
        let mut acc = G1Projective::identity();
        for &byte in by.iter() {
            for i in (0..8).rev() {
                acc = acc.double();
                let bit = Choice::from((byte >> i) & 1u8);
                acc = G1Projective::conditional_select(&acc, &(acc + self), bit);
            }
        }
        acc
    }

    /// Multiply by an arbitrary integer, reduced mod r first.
    pub fn mul_biguint(&self, k: &BigUint) -> G1Projective {
        self * Scalar::from_biguint(k)
    }

    /// Batch affine conversion with one inversion. `scratch` holds the
    /// running products and must be at least as long as `p`.
    pub fn batch_normalize(p: &[Self], q: &mut [G1Affine], scratch: &mut [Fp]) -> Result<()> {
        validate::length("G1Projective::batch_normalize", q.len(), p.len())?;
        validate::parameter(
            scratch.len() >= p.len(),
            "scratch",
            "scratch buffer shorter than the input",
        )?;

        let mut acc = Fp::one();
        for (p, s) in p.iter().zip(scratch.iter_mut()) {
            *s = acc;
            acc = Fp::conditional_select(&(acc * p.z), &acc, p.is_identity());
        }

        // acc is a product of non-zero z values, so it is invertible
        acc = acc.invert().unwrap_or(Fp::zero());

        for ((p, q), s) in p.iter().rev().zip(q.iter_mut().rev()).zip(scratch[..p.len()].iter().rev()) {
            let skip = p.is_identity();
            let tmp = *s * acc;
            acc = Fp::conditional_select(&(acc * p.z), &acc, skip);
            *q = G1Affine {
                x: p.x * tmp,
                y: p.y * tmp,
                infinity: Choice::from(0u8),
            };
            *q = G1Affine::conditional_select(q, &G1Affine::identity(), skip);
        }
        Ok(())
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Curve membership check, Y²Z = X³ + bZ³.
    pub fn is_on_curve(&self) -> Choice {
        (self.y.square() * self.z).ct_eq(&(self.x.square() * self.x + self.z.square() * self.z * B))
            | self.z.is_zero()
    }

    /// Serialize to compressed bytes.
    pub fn to_bytes(&self) -> [u8; G1_COMPRESSED_BYTES] {
        G1Affine::from(self).to_compressed()
    }
}

impl CurveGroup for G1Projective {
    type Scalar = Scalar;
    type Affine = G1Affine;

    fn identity() -> Self {
        G1Projective::identity()
    }

    fn generator() -> Self {
        G1Projective::generator()
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        G1Projective::random(rng)
    }

    fn is_infinite(&self) -> bool {
        bool::from(self.is_identity())
    }

    fn is_valid(&self) -> bool {
        bool::from(self.is_on_curve())
    }

    fn twice(&self) -> Self {
        self.double()
    }

    fn mul_scalar(&self, k: &Scalar) -> Self {
        self * k
    }

    fn to_affine(&self) -> G1Affine {
        G1Affine::from(self)
    }

    fn from_affine(p: &G1Affine) -> Self {
        G1Projective::from(p)
    }
}

impl Serialize for G1Affine {
    /// Compressed form
    fn to_bytes(&self) -> Vec<u8> {
        self.to_compressed().to_vec()
    }

    /// Either form, selected by length
    fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        match bytes.len() {
            G1_COMPRESSED_BYTES => {
                let mut array = [0u8; G1_COMPRESSED_BYTES];
                array.copy_from_slice(bytes);
                G1Affine::from_compressed(&array).map_err(CoreError::from)
            }
            G1_UNCOMPRESSED_BYTES => {
                let mut array = [0u8; G1_UNCOMPRESSED_BYTES];
                array.copy_from_slice(bytes);
                G1Affine::from_uncompressed(&array).map_err(CoreError::from)
            }
            actual => Err(CoreError::from(Error::Length {
                context: "G1Affine::from_bytes",
                expected: G1_UNCOMPRESSED_BYTES,
                actual,
            })),
        }
    }
}
