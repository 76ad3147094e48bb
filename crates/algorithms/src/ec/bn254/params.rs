//! Domain parameters of Fp254BNb as integers.

use isopair_params::pairing::bn254 as consts;
use num_bigint::{BigInt, BigUint, Sign};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{G1Affine, G2Affine};
use crate::error::{validate, Error, Result};

/// Immutable description of the curve: q, r, t, b, b', u, cofactors and
/// generators, all as canonical integers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DomainParameters {
    /// Base-field modulus q
    pub modulus: BigUint,
    /// Prime group order r
    pub order: BigUint,
    /// Frobenius trace t
    pub trace: BigUint,
    /// Curve parameter u
    pub u: BigInt,
    /// E: y² = x³ + b
    pub b: BigUint,
    /// Twist constant b' as (c0, c1)
    pub twist_b: [BigUint; 2],
    /// Cofactor of E(Fq)
    pub g1_cofactor: BigUint,
    /// Cofactor of E'(Fq2)
    pub g2_cofactor: BigUint,
    /// P1 as (x, y)
    pub g1_generator: [BigUint; 2],
    /// P2 as (x.c0, x.c1, y.c0, y.c1)
    pub g2_generator: [BigUint; 4],
    /// Embedding degree k
    pub embedding_degree: u32,
}

fn parse_hex(name: &'static str, value: &str) -> Result<BigUint> {
    BigUint::parse_bytes(value.as_bytes(), 16)
        .ok_or_else(|| Error::param(name, "malformed hex constant"))
}

fn parse_hex_array<const N: usize>(name: &'static str, values: [&str; N]) -> Result<[BigUint; N]> {
    let mut out: [BigUint; N] = core::array::from_fn(|_| BigUint::default());
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = parse_hex(name, value)?;
    }
    Ok(out)
}

impl DomainParameters {
    /// Parse the Fp254BNb constants.
    pub fn fp254bnb() -> Result<DomainParameters> {
        let sign = if consts::BN_U_IS_NEGATIVE {
            Sign::Minus
        } else {
            Sign::Plus
        };

        Ok(DomainParameters {
            modulus: parse_hex("modulus", consts::MODULUS_HEX)?,
            order: parse_hex("order", consts::ORDER_HEX)?,
            trace: parse_hex("trace", consts::TRACE_HEX)?,
            u: BigInt::from_biguint(sign, BigUint::from(consts::BN_U)),
            b: BigUint::from(consts::CURVE_B),
            twist_b: parse_hex_array("twist_b", consts::TWIST_B_HEX)?,
            g1_cofactor: BigUint::from(1u8),
            g2_cofactor: parse_hex("g2_cofactor", consts::TWIST_COFACTOR_HEX)?,
            g1_generator: parse_hex_array("g1_generator", consts::G1_GENERATOR_HEX)?,
            g2_generator: parse_hex_array("g2_generator", consts::G2_GENERATOR_HEX)?,
            embedding_degree: 12,
        })
    }

    /// Check the BN relations between the integers and that the generators
    /// agree with the arithmetic layer.
    pub fn verify(&self) -> Result<()> {
        let u = &self.u;
        let u2 = u * u;
        let u3 = &u2 * u;
        let u4 = &u3 * u;
        let q = BigInt::from(36) * &u4 + BigInt::from(36) * &u3 + BigInt::from(24) * &u2
            + BigInt::from(6) * u
            + BigInt::from(1);
        let r = BigInt::from(36) * &u4 + BigInt::from(36) * &u3 + BigInt::from(18) * &u2
            + BigInt::from(6) * u
            + BigInt::from(1);
        let t = BigInt::from(6) * &u2 + BigInt::from(1);

        validate::parameter(q == BigInt::from(self.modulus.clone()), "modulus", "q(u) mismatch")?;
        validate::parameter(r == BigInt::from(self.order.clone()), "order", "r(u) mismatch")?;
        validate::parameter(t == BigInt::from(self.trace.clone()), "trace", "t(u) mismatch")?;
        validate::parameter(
            &self.modulus + BigUint::from(1u8) == &self.order + &self.trace,
            "order",
            "#E(Fq) != q + 1 - t",
        )?;
        validate::parameter(
            &self.modulus * BigUint::from(2u8) == &self.order + &self.g2_cofactor,
            "g2_cofactor",
            "cofactor != 2q - r",
        )?;

        let p1 = G1Affine::generator();
        validate::parameter(
            p1.x().to_biguint() == self.g1_generator[0] && p1.y().to_biguint() == self.g1_generator[1],
            "g1_generator",
            "generator mismatch",
        )?;

        let p2 = G2Affine::generator();
        let (x, y) = (p2.x(), p2.y());
        let coords = [x.c0, x.c1, y.c0, y.c1];
        validate::parameter(
            coords
                .iter()
                .zip(self.g2_generator.iter())
                .all(|(c, expected)| c.to_biguint() == *expected),
            "g2_generator",
            "generator mismatch",
        )?;
        Ok(())
    }
}
