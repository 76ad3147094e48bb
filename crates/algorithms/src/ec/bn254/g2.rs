//! G₂ group of Fp254BNb, carried on the sextic D-type twist
//! E'(Fq2): y² = x³ + b' with b' = 2 / ξ = 1 - u.

use core::borrow::Borrow;
use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul, Neg, Sub};

use isopair_api::{CurveGroup, Error as CoreError, Result as CoreResult, Serialize};
use num_bigint::BigUint;
use rand::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::field::fp::Fp;
use super::field::fp2::{Fp2, FP2_BYTES};
use super::g1::{COORDINATE_MASK, INFINITY_FLAG, SORT_FLAG};
use super::{Scalar, BN_U};
use crate::error::{validate, Error, Result};

/// Compressed encoding size: x with the flag bits
pub const G2_COMPRESSED_BYTES: usize = isopair_params::pairing::bn254::G2_COMPRESSED_SIZE;

/// Uncompressed encoding size: x ‖ y
pub const G2_UNCOMPRESSED_BYTES: usize = isopair_params::pairing::bn254::G2_UNCOMPRESSED_SIZE;

/// b' = 1 - u
pub(crate) const TWIST_B: Fp2 = Fp2 {
    c0: Fp::one(),
    c1: Fp::from_raw_unchecked([
        0x9100_0000_0000_0085,
        0xa7e7_0000_0000_0089,
        0x176e_1e80_0000_003a,
        0x03f7_bf8f_c000_000c,
    ]),
};

/// 3b' = 3 - 3u
pub(crate) const TWIST_3B: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0xf3ff_ffff_ffff_fe84,
        0x696b_ffff_ffff_fe76,
        0x73e9_f1ff_ffff_ff58,
        0x193c_25d2_ffff_ffdd,
    ]),
    c1: Fp::from_raw_unchecked([
        0xb300_0000_0000_018f,
        0xf7b5_0000_0000_019c,
        0x464a_5b80_0000_00af,
        0x0be7_3eaf_4000_0024,
    ]),
};

/// ψ scales x by ξ^((q-1)/3)
pub(crate) const PSI_X: Fp2 = Fp2 {
    c0: Fp::zero(),
    c1: Fp::from_raw_unchecked([
        0x056e_fc68_e869_fd55,
        0x1c92_2091_38d7_ba61,
        0xc065_1cd3_594d_6466,
        0x22a8_7deb_bfff_ffef,
    ]),
};

/// ψ scales y by ξ^((q-1)/2)
pub(crate) const PSI_Y: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0xfd55_c5dc_7167_4777,
        0xc45a_8b4e_56d9_569c,
        0x5f01_1647_2cae_2274,
        0x1aa6_d99b_1d11_5e0a,
    ]),
    c1: Fp::from_raw_unchecked([
        0xfd55_c5dc_7167_4777,
        0xc45a_8b4e_56d9_569c,
        0x5f01_1647_2cae_2274,
        0x1aa6_d99b_1d11_5e0a,
    ]),
};

/// ψ² scales x by ξ^((q²-1)/3), which lies in Fq
pub(crate) const PSI2_X: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0x3291_0397_1796_0343,
        0xec75_df6e_c728_463c,
        0x113d_4f2c_a6b2_9bdc,
        0x0672_a626_4000_001e,
    ]),
    c1: Fp::zero(),
};

/// ψ² scales y by ξ^((q²-1)/2) = -1
pub(crate) const PSI2_Y: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0x9100_0000_0000_0085,
        0xa7e7_0000_0000_0089,
        0x176e_1e80_0000_003a,
        0x03f7_bf8f_c000_000c,
    ]),
    c1: Fp::zero(),
};

/// G₂ affine point representation.
#[derive(Copy, Clone, Debug)]
pub struct G2Affine {
    pub(crate) x: Fp2,
    pub(crate) y: Fp2,
    pub(crate) infinity: Choice,
}

impl Default for G2Affine {
    fn default() -> G2Affine {
        G2Affine::identity()
    }
}

impl zeroize::DefaultIsZeroes for G2Affine {}

impl fmt::Display for G2Affine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<'a> From<&'a G2Projective> for G2Affine {
    fn from(p: &'a G2Projective) -> G2Affine {
        let zinv = p.z.invert().unwrap_or(Fp2::zero());
        let x = p.x * zinv;
        let y = p.y * zinv;

        let tmp = G2Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        };

        G2Affine::conditional_select(&tmp, &G2Affine::identity(), zinv.is_zero())
    }
}

impl From<G2Projective> for G2Affine {
    fn from(p: G2Projective) -> G2Affine {
        G2Affine::from(&p)
    }
}

impl ConstantTimeEq for G2Affine {
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.infinity & other.infinity)
            | ((!self.infinity)
                & (!other.infinity)
                & self.x.ct_eq(&other.x)
                & self.y.ct_eq(&other.y))
    }
}

impl ConditionallySelectable for G2Affine {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G2Affine {
            x: Fp2::conditional_select(&a.x, &b.x, choice),
            y: Fp2::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl Eq for G2Affine {}
impl PartialEq for G2Affine {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a> Neg for &'a G2Affine {
    type Output = G2Affine;

    #[inline]
    fn neg(self) -> G2Affine {
        G2Affine {
            x: self.x,
            y: Fp2::conditional_select(&-self.y, &Fp2::one(), self.infinity),
            infinity: self.infinity,
        }
    }
}

impl_neg_owned!(G2Affine);

impl<'a, 'b> Add<&'b G2Projective> for &'a G2Affine {
    type Output = G2Projective;

    #[inline]
    fn add(self, rhs: &'b G2Projective) -> G2Projective {
        rhs.add_mixed(self)
    }
}

impl<'a, 'b> Add<&'b G2Affine> for &'a G2Projective {
    type Output = G2Projective;

    #[inline]
    fn add(self, rhs: &'b G2Affine) -> G2Projective {
        self.add_mixed(rhs)
    }
}

impl<'a, 'b> Sub<&'b G2Projective> for &'a G2Affine {
    type Output = G2Projective;

    #[inline]
    fn sub(self, rhs: &'b G2Projective) -> G2Projective {
        self + &(-rhs)
    }
}

impl<'a, 'b> Sub<&'b G2Affine> for &'a G2Projective {
    type Output = G2Projective;

    #[inline]
    fn sub(self, rhs: &'b G2Affine) -> G2Projective {
        self + &(-rhs)
    }
}

impl<T> Sum<T> for G2Projective
where
    T: Borrow<G2Projective>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::identity(), |acc, item| acc + item.borrow())
    }
}

impl_binops_additive!(G2Projective, G2Affine);
impl_binops_additive_specify_output!(G2Affine, G2Projective, G2Projective);

#[inline(always)]
fn mul_by_3b(x: Fp2) -> Fp2 {
    x * TWIST_3B
}

impl G2Affine {
    /// Point at infinity.
    pub fn identity() -> G2Affine {
        G2Affine {
            x: Fp2::zero(),
            y: Fp2::one(),
            infinity: Choice::from(1u8),
        }
    }

    /// Fixed generator of G₂.
    pub fn generator() -> G2Affine {
        G2Affine {
            x: Fp2 {
                c0: Fp::from_raw_unchecked([
                    0x3ddb_68d4_5eb4_dfe3,
                    0x83ef_d147_cf93_a07e,
                    0x559b_77f2_c010_3a97,
                    0x13c5_fd5b_210c_d135,
                ]),
                c1: Fp::from_raw_unchecked([
                    0xb77b_e805_e083_288e,
                    0xd954_d3a7_b3bb_0a16,
                    0xd71c_f55f_4b3a_cbd9,
                    0x0ff0_9728_b53a_8db6,
                ]),
            },
            y: Fp2 {
                c0: Fp::from_raw_unchecked([
                    0xe31c_da2c_d312_91f9,
                    0x9082_b998_aa82_a1a4,
                    0xd0b0_bfa7_e2e4_d3cb,
                    0x16fa_3e37_ae77_15ba,
                ]),
                c1: Fp::from_raw_unchecked([
                    0x2983_5c51_1d77_3e85,
                    0x0ac2_d363_c7af_34d3,
                    0x621f_7945_1e0a_0675,
                    0x165a_9839_2cec_5b3e,
                ]),
            },
            infinity: Choice::from(0u8),
        }
    }

    /// Build from coordinates, rejecting points off the twist or outside G₂.
    pub fn from_coordinates(x: Fp2, y: Fp2) -> Result<G2Affine> {
        let p = G2Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        };
        validate::parameter(bool::from(p.is_on_curve()), "point", "not on curve")?;
        validate::parameter(bool::from(p.is_torsion_free()), "point", "not in G2")?;
        Ok(p)
    }

    /// The x-coordinate (zero for the identity)
    pub fn x(&self) -> Fp2 {
        Fp2::conditional_select(&self.x, &Fp2::zero(), self.infinity)
    }

    /// The y-coordinate (zero for the identity)
    pub fn y(&self) -> Fp2 {
        Fp2::conditional_select(&self.y, &Fp2::zero(), self.infinity)
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Twist membership check.
    pub fn is_on_curve(&self) -> Choice {
        (self.y.square() - (self.x.square() * self.x)).ct_eq(&TWIST_B) | self.infinity
    }

    /// Subgroup membership: ψ(Q) = [6u²]Q holds exactly on G₂.
    pub fn is_torsion_free(&self) -> Choice {
        G2Projective::from(self).is_torsion_free()
    }

    /// Exact lift to projective coordinates.
    pub fn to_projective(&self) -> G2Projective {
        G2Projective::from(self)
    }

    /// Compress to 64 bytes.
    pub fn to_compressed(&self) -> [u8; G2_COMPRESSED_BYTES] {
        let mut res = self.x().to_bytes();
        res[0] |= u8::conditional_select(&0u8, &INFINITY_FLAG, self.infinity);
        res[0] |= u8::conditional_select(
            &0u8,
            &SORT_FLAG,
            (!self.infinity) & self.y.lexicographically_largest(),
        );
        res
    }

    /// Serialize to 128 bytes uncompressed.
    pub fn to_uncompressed(&self) -> [u8; G2_UNCOMPRESSED_BYTES] {
        let mut res = [0; G2_UNCOMPRESSED_BYTES];
        res[..FP2_BYTES].copy_from_slice(&self.x().to_bytes());
        res[FP2_BYTES..].copy_from_slice(&self.y().to_bytes());
        res[0] |= u8::conditional_select(&0u8, &INFINITY_FLAG, self.infinity);
        res
    }

    /// Deserialize from uncompressed bytes with curve and subgroup checks.
    pub fn from_uncompressed(bytes: &[u8; G2_UNCOMPRESSED_BYTES]) -> Result<Self> {
        let p: G2Affine = Option::from(Self::from_uncompressed_unchecked(bytes))
            .ok_or_else(|| Error::param("uncompressed_bytes", "invalid G2 point encoding"))?;
        validate::parameter(bool::from(p.is_on_curve()), "point", "not on curve")?;
        validate::parameter(bool::from(p.is_torsion_free()), "point", "not in G2")?;
        Ok(p)
    }

    /// Deserialize without validation.
    pub fn from_uncompressed_unchecked(bytes: &[u8; G2_UNCOMPRESSED_BYTES]) -> CtOption<Self> {
        let infinity_flag_set = Choice::from((bytes[0] >> 6) & 1);
        let sort_flag_set = Choice::from((bytes[0] >> 7) & 1);
        let x = {
            let mut tmp = [0; FP2_BYTES];
            tmp.copy_from_slice(&bytes[..FP2_BYTES]);
            tmp[0] &= COORDINATE_MASK;
            Fp2::from_bytes(&tmp)
        };
        let y = {
            let mut tmp = [0; FP2_BYTES];
            tmp.copy_from_slice(&bytes[FP2_BYTES..]);
            Fp2::from_bytes(&tmp)
        };

        x.and_then(|x| {
            y.and_then(|y| {
                let p = G2Affine::conditional_select(
                    &G2Affine {
                        x,
                        y,
                        infinity: infinity_flag_set,
                    },
                    &G2Affine::identity(),
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

    /// Deserialize from compressed bytes with the subgroup check.
    pub fn from_compressed(bytes: &[u8; G2_COMPRESSED_BYTES]) -> Result<Self> {
        let p: G2Affine = Option::from(Self::from_compressed_unchecked(bytes))
            .ok_or_else(|| Error::param("compressed_bytes", "invalid G2 point encoding"))?;
        validate::parameter(bool::from(p.is_torsion_free()), "point", "not in G2")?;
        Ok(p)
    }

    /// Recover y from x; skips the subgroup check.
    pub fn from_compressed_unchecked(bytes: &[u8; G2_COMPRESSED_BYTES]) -> CtOption<Self> {
        let infinity_flag_set = Choice::from((bytes[0] >> 6) & 1);
        let sort_flag_set = Choice::from((bytes[0] >> 7) & 1);
        let x = {
            let mut tmp = *bytes;
            tmp[0] &= COORDINATE_MASK;
            Fp2::from_bytes(&tmp)
        };

        x.and_then(|x| {
            CtOption::new(
                G2Affine::identity(),
                infinity_flag_set & (!sort_flag_set) & x.is_zero(),
            )
            .or_else(|| {
                ((x.square() * x) + TWIST_B).sqrt().and_then(|y| {
                    let y = Fp2::conditional_select(
                        &y,
                        &-y,
                        y.lexicographically_largest() ^ sort_flag_set,
                    );
                    CtOption::new(
                        G2Affine {
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

/// G₂ projective point representation.
#[derive(Copy, Clone, Debug)]
pub struct G2Projective {
    pub(crate) x: Fp2,
    pub(crate) y: Fp2,
    pub(crate) z: Fp2,
}

impl Default for G2Projective {
    fn default() -> G2Projective {
        G2Projective::identity()
    }
}

impl zeroize::DefaultIsZeroes for G2Projective {}

impl fmt::Display for G2Projective {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<'a> From<&'a G2Affine> for G2Projective {
    fn from(p: &'a G2Affine) -> G2Projective {
        G2Projective {
            x: p.x,
            y: p.y,
            z: Fp2::conditional_select(&Fp2::one(), &Fp2::zero(), p.infinity),
        }
    }
}

impl From<G2Affine> for G2Projective {
    fn from(p: G2Affine) -> G2Projective {
        G2Projective::from(&p)
    }
}

impl ConstantTimeEq for G2Projective {
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

impl ConditionallySelectable for G2Projective {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G2Projective {
            x: Fp2::conditional_select(&a.x, &b.x, choice),
            y: Fp2::conditional_select(&a.y, &b.y, choice),
            z: Fp2::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl Eq for G2Projective {}
impl PartialEq for G2Projective {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a> Neg for &'a G2Projective {
    type Output = G2Projective;

    #[inline]
    fn neg(self) -> G2Projective {
        G2Projective {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl_neg_owned!(G2Projective);

impl<'a, 'b> Add<&'b G2Projective> for &'a G2Projective {
    type Output = G2Projective;

    #[inline]
    fn add(self, rhs: &'b G2Projective) -> G2Projective {
        self.add(rhs)
    }
}

impl<'a, 'b> Sub<&'b G2Projective> for &'a G2Projective {
    type Output = G2Projective;

    #[inline]
    fn sub(self, rhs: &'b G2Projective) -> G2Projective {
        self + &(-rhs)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a G2Projective {
    type Output = G2Projective;

    fn mul(self, other: &'b Scalar) -> Self::Output {
        self.multiply(&other.to_bytes())
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a G2Affine {
    type Output = G2Projective;

    fn mul(self, other: &'b Scalar) -> Self::Output {
        G2Projective::from(self).multiply(&other.to_bytes())
    }
}

impl_binops_additive!(G2Projective, G2Projective);
impl_binops_multiplicative!(G2Projective, Scalar);
impl_binops_multiplicative_mixed!(G2Affine, Scalar, G2Projective);

impl G2Projective {
    /// Point at infinity.
    pub fn identity() -> G2Projective {
        G2Projective {
            x: Fp2::zero(),
            y: Fp2::one(),
            z: Fp2::zero(),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G2Projective {
        G2Projective::from(G2Affine::generator())
    }

    /// Random element of G₂: a random twist point with the cofactor cleared.
    pub fn random(mut rng: impl RngCore) -> Self {
        loop {
            let x = Fp2::random(&mut rng);
            let flip_sign = rng.next_u32() % 2 != 0;

            let p: Option<G2Affine> = ((x.square() * x) + TWIST_B)
                .sqrt()
                .map(|y| G2Affine {
                    x,
                    y: if flip_sign { -y } else { y },
                    infinity: 0.into(),
                })
                .into();

            if let Some(p) = p {
                let p = G2Projective::from(p).clear_cofactor();
                if !bool::from(p.is_identity()) {
                    return p;
                }
            }
        }
    }

    /// Point doubling.
    pub fn double(&self) -> G2Projective {
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

        let tmp = G2Projective {
            x: x3,
            y: y3,
            z: z3,
        };
        G2Projective::conditional_select(&tmp, &G2Projective::identity(), self.is_identity())
    }

    /// Point addition.
    pub fn add(&self, rhs: &G2Projective) -> G2Projective {
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

        G2Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Mixed addition with affine point.
    pub fn add_mixed(&self, rhs: &G2Affine) -> G2Projective {
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

        let tmp = G2Projective {
            x: x3,
            y: y3,
            z: z3,
        };
        G2Projective::conditional_select(&tmp, self, rhs.is_identity())
    }

    /// Double-and-add over big-endian scalar bytes.
    fn multiply(&self, by: &[u8]) -> G2Projective {
        let mut acc = G2Projective::identity();
        for &byte in by.iter() {
            for i in (0..8).rev() {
                acc = acc.double();
                let bit = Choice::from((byte >> i) & 1u8);
                acc = G2Projective::conditional_select(&acc, &(acc + self), bit);
            }
        }
        acc
    }

    /// Multiply by an arbitrary integer, reduced mod r first.
    pub fn mul_biguint(&self, k: &BigUint) -> G2Projective {
        self * Scalar::from_biguint(k)
    }

    /// [u]P for the negative curve parameter u
    fn mul_by_u(&self) -> G2Projective {
        self.multiply(&BN_U.to_be_bytes()).neg()
    }

    /// The untwist-Frobenius-twist endomorphism ψ
    pub fn psi(&self) -> G2Projective {
        G2Projective {
            x: self.x.frobenius_map() * PSI_X,
            y: self.y.frobenius_map() * PSI_Y,
            z: self.z.frobenius_map(),
        }
    }

    /// ψ², a scaling by constants of Fq
    pub fn psi2(&self) -> G2Projective {
        G2Projective {
            x: self.x * PSI2_X,
            y: self.y * PSI2_Y,
            z: self.z,
        }
    }

    /// Map a twist point into G₂ using
    /// [u]P + ψ([3u]P) + ψ²([u]P) + ψ³(P)
    pub fn clear_cofactor(&self) -> G2Projective {
        let up = self.mul_by_u();
        let three_up = up.double() + up;
        up + three_up.psi() + up.psi2() + self.psi2().psi()
    }

    /// Subgroup membership: ψ(P) = [6u²]P
    pub fn is_torsion_free(&self) -> Choice {
        let uup = self.mul_by_u().mul_by_u();
        let six_uup = (uup.double() + uup).double();
        self.psi().ct_eq(&six_uup)
    }

    /// Batch affine conversion with one inversion. `scratch` holds the
    /// running products and must be at least as long as `p`.
    pub fn batch_normalize(p: &[Self], q: &mut [G2Affine], scratch: &mut [Fp2]) -> Result<()> {
        validate::length("G2Projective::batch_normalize", q.len(), p.len())?;
        validate::parameter(
            scratch.len() >= p.len(),
            "scratch",
            "scratch buffer shorter than the input",
        )?;

        let mut acc = Fp2::one();
        for (p, s) in p.iter().zip(scratch.iter_mut()) {
            *s = acc;
            acc = Fp2::conditional_select(&(acc * p.z), &acc, p.is_identity());
        }

        // acc is a product of non-zero z values, so it is invertible
        acc = acc.invert().unwrap_or(Fp2::zero());

        for ((p, q), s) in p.iter().rev().zip(q.iter_mut().rev()).zip(scratch[..p.len()].iter().rev()) {
            let skip = p.is_identity();
            let tmp = *s * acc;
            acc = Fp2::conditional_select(&(acc * p.z), &acc, skip);
            *q = G2Affine {
                x: p.x * tmp,
                y: p.y * tmp,
                infinity: Choice::from(0u8),
            };
            *q = G2Affine::conditional_select(q, &G2Affine::identity(), skip);
        }
        Ok(())
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Twist membership check, Y²Z = X³ + b'Z³.
    pub fn is_on_curve(&self) -> Choice {
        (self.y.square() * self.z)
            .ct_eq(&(self.x.square() * self.x + self.z.square() * self.z * TWIST_B))
            | self.z.is_zero()
    }

    /// Serialize to compressed bytes.
    pub fn to_bytes(&self) -> [u8; G2_COMPRESSED_BYTES] {
        G2Affine::from(self).to_compressed()
    }
}

impl CurveGroup for G2Projective {
    type Scalar = Scalar;
    type Affine = G2Affine;

    fn identity() -> Self {
        G2Projective::identity()
    }

    fn generator() -> Self {
        G2Projective::generator()
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        G2Projective::random(rng)
    }

    fn is_infinite(&self) -> bool {
        bool::from(self.is_identity())
    }

    fn is_valid(&self) -> bool {
        bool::from(self.is_on_curve() & self.is_torsion_free())
    }

    fn twice(&self) -> Self {
        self.double()
    }

    fn mul_scalar(&self, k: &Scalar) -> Self {
        self * k
    }

    fn to_affine(&self) -> G2Affine {
        G2Affine::from(self)
    }

    fn from_affine(p: &G2Affine) -> Self {
        G2Projective::from(p)
    }
}

impl Serialize for G2Affine {
    /// Compressed form
    fn to_bytes(&self) -> Vec<u8> {
        self.to_compressed().to_vec()
    }

    /// Either form, selected by length
    fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        match bytes.len() {
            G2_COMPRESSED_BYTES => {
                let mut array = [0u8; G2_COMPRESSED_BYTES];
                array.copy_from_slice(bytes);
                G2Affine::from_compressed(&array).map_err(CoreError::from)
            }
            G2_UNCOMPRESSED_BYTES => {
                let mut array = [0u8; G2_UNCOMPRESSED_BYTES];
                array.copy_from_slice(bytes);
                G2Affine::from_uncompressed(&array).map_err(CoreError::from)
            }
            actual => Err(CoreError::from(Error::Length {
                context: "G2Affine::from_bytes",
                expected: G2_UNCOMPRESSED_BYTES,
                actual,
            })),
        }
    }
}
