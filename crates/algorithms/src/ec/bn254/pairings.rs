//! Optimal-ate pairing e: G₂ × G₁ → Gt on Fp254BNb.
//!
//! Lines are precomputed per G₂ point into [`G2Prepared`] and evaluated at
//! the G₁ point as sparse Fp12 elements. Precomputation runs in either
//! mixed (projective T) or affine coordinates; both yield the same Gt value.

use core::borrow::Borrow;
use core::fmt;
use core::iter::Product;
use core::ops::Mul;

use isopair_api::{Error as CoreError, Field, Result as CoreResult, Serialize};
use isopair_params::pairing::bn254::GT_SIZE;
use rand::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize as SerdeSerialize};
use tracing::{instrument, trace};

use super::field::fp12::Fp12;
use super::field::fp2::Fp2;
use super::g1::G1Affine;
use super::g2::{G2Affine, PSI2_X, PSI2_Y, PSI_X, PSI_Y, TWIST_3B};
use super::{Scalar, ATE_LOOP_COUNT, ATE_LOOP_IS_NEGATIVE, BN_U};
use crate::error::{validate, Error, Result};

/// Coordinate system used for T while precomputing Miller-loop lines
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeSerialize, Deserialize))]
pub enum MillerLoopCoordinates {
    /// Homogeneous projective T, inversion-free lines
    #[default]
    Mixed,
    /// Affine T, one inversion per step
    Affine,
}

impl fmt::Display for MillerLoopCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MillerLoopCoordinates::Mixed => write!(f, "mixed"),
            MillerLoopCoordinates::Affine => write!(f, "affine"),
        }
    }
}

/// Coefficients (a, b, c) of one line, evaluated at P as
/// `a·y_P + b·x_P·w + c·v·w`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LineCoeffs {
    pub(crate) a: Fp2,
    pub(crate) b: Fp2,
    pub(crate) c: Fp2,
}

impl zeroize::DefaultIsZeroes for LineCoeffs {}

impl LineCoeffs {
    /// Evaluate the line at P and multiply it into `f`.
    #[inline]
    fn ell(&self, f: &Fp12, p: &G1Affine) -> Fp12 {
        f.mul_by_034(&self.a.mul_by_fp(&p.y), &self.b.mul_by_fp(&p.x), &self.c)
    }
}

/// Homogeneous projective T used by the mixed precomputation
#[derive(Copy, Clone, Debug)]
struct Accumulator {
    x: Fp2,
    y: Fp2,
    z: Fp2,
}

/// Doubling step in homogeneous coordinates, Aranha et al. 2010, eq. (11)
fn doubling_step(r: &mut Accumulator) -> LineCoeffs {
    let a = (r.x * r.y).div_by_two();
    let b = r.y.square();
    let c = r.z.square();
    let e = c * TWIST_3B;
    let f = e.double() + e;
    let g = (b + f).div_by_two();
    let h = (r.y + r.z).square() - (b + c);
    let i = e - b;
    let j = r.x.square();
    let e_sq = e.square();

    r.x = a * (b - f);
    r.y = g.square() - (e_sq.double() + e_sq);
    r.z = b * h;

    LineCoeffs {
        a: -h,
        b: j.double() + j,
        c: i,
    }
}

/// Mixed addition step T + Q with Q affine, Aranha et al. 2010, eq. (12)
fn addition_step(r: &mut Accumulator, q: &G2Affine) -> LineCoeffs {
    let theta = r.y - q.y * r.z;
    let lambda = r.x - q.x * r.z;
    let c = theta.square();
    let d = lambda.square();
    let e = d * lambda;
    let f = r.z * c;
    let g = r.x * d;
    let h = e + f - g.double();

    let x3 = lambda * h;
    let y3 = theta * (g - h) - r.y * e;
    let z3 = r.z * e;
    r.x = x3;
    r.y = y3;
    r.z = z3;

    LineCoeffs {
        a: lambda,
        b: -theta,
        c: theta * q.x - lambda * q.y,
    }
}

/// Tangent at affine T, T ← 2T
fn affine_doubling_step(t: &mut G2Affine) -> LineCoeffs {
    debug_assert!(!bool::from(t.y.is_zero()));
    let x_sq = t.x.square();
    let lambda = (x_sq.double() + x_sq) * t.y.double().invert().unwrap_or(Fp2::zero());
    let x3 = lambda.square() - t.x.double();
    let y3 = lambda * (t.x - x3) - t.y;
    let line = affine_line(t, &lambda);
    t.x = x3;
    t.y = y3;
    line
}

/// Chord through affine T and Q, T ← T + Q
fn affine_addition_step(t: &mut G2Affine, q: &G2Affine) -> LineCoeffs {
    debug_assert!(t.x != q.x);
    let lambda = (q.y - t.y) * (q.x - t.x).invert().unwrap_or(Fp2::zero());
    let x3 = lambda.square() - t.x - q.x;
    let y3 = lambda * (t.x - x3) - t.y;
    let line = affine_line(t, &lambda);
    t.x = x3;
    t.y = y3;
    line
}

#[inline]
fn affine_line(t: &G2Affine, lambda: &Fp2) -> LineCoeffs {
    LineCoeffs {
        a: Fp2::one(),
        b: -lambda,
        c: lambda * t.x - t.y,
    }
}

/// ψ(Q) for an affine point
fn psi_affine(q: &G2Affine) -> G2Affine {
    G2Affine {
        x: q.x.conjugate() * PSI_X,
        y: q.y.conjugate() * PSI_Y,
        infinity: q.infinity,
    }
}

/// -ψ²(Q) for an affine point
fn neg_psi2_affine(q: &G2Affine) -> G2Affine {
    G2Affine {
        x: q.x * PSI2_X,
        y: -(q.y * PSI2_Y),
        infinity: q.infinity,
    }
}

/// Number of lines recorded for one G₂ point
pub const LINE_COUNT: usize = {
    let mut count = 2;
    let mut i = 0;
    while i < 64 {
        count += 1;
        if (ATE_LOOP_COUNT >> i) & 1 == 1 {
            count += 1;
        }
        i += 1;
    }
    count
};

trait MillerLoopDriver {
    type Output;

    fn doubling_step(&mut self, f: Self::Output) -> Self::Output;
    fn addition_step(&mut self, f: Self::Output) -> Self::Output;
    /// Fix the sign of the negative loop parameter
    fn negate(&mut self, f: Self::Output) -> Self::Output;
    /// The two lines through ψ(Q) and -ψ²(Q)
    fn frobenius_steps(&mut self, f: Self::Output) -> Self::Output;
    fn square_output(f: Self::Output) -> Self::Output;
    fn one() -> Self::Output;
}

/// Runs over the bits of |6u + 2| below the leading one.
fn miller_loop<D: MillerLoopDriver>(driver: &mut D) -> D::Output {
    let mut f = D::one();
    let mut first = true;

    for i in (0..64).rev() {
        if !first {
            f = D::square_output(f);
        }
        first = false;
        f = driver.doubling_step(f);

        if (ATE_LOOP_COUNT >> i) & 1 == 1 {
            f = driver.addition_step(f);
        }
    }

    if ATE_LOOP_IS_NEGATIVE {
        f = driver.negate(f);
    }

    driver.frobenius_steps(f)
}

/// A G₂ point with its Miller-loop lines precomputed.
#[derive(Clone, Debug)]
pub struct G2Prepared {
    infinity: Choice,
    coordinates: MillerLoopCoordinates,
    pub(crate) coeffs: Vec<LineCoeffs>,
}

impl From<G2Affine> for G2Prepared {
    fn from(q: G2Affine) -> G2Prepared {
        G2Prepared::new(&q, MillerLoopCoordinates::Mixed)
    }
}

impl G2Prepared {
    /// Precompute the lines of `q` into a fresh buffer.
    pub fn new(q: &G2Affine, coordinates: MillerLoopCoordinates) -> G2Prepared {
        G2Prepared::with_buffer(q, coordinates, Vec::with_capacity(LINE_COUNT))
    }

    /// Precompute the lines of `q` into `buf`, whose contents are discarded.
    pub fn with_buffer(
        q: &G2Affine,
        coordinates: MillerLoopCoordinates,
        mut buf: Vec<LineCoeffs>,
    ) -> G2Prepared {
        buf.clear();
        let is_identity = q.is_identity();
        let q = G2Affine::conditional_select(q, &G2Affine::generator(), is_identity);

        match coordinates {
            MillerLoopCoordinates::Mixed => {
                let mut adder = MixedAdder {
                    cur: Accumulator {
                        x: q.x,
                        y: q.y,
                        z: Fp2::one(),
                    },
                    base: q,
                    coeffs: buf,
                };
                miller_loop(&mut adder);
                buf = adder.coeffs;
            }
            MillerLoopCoordinates::Affine => {
                let mut adder = AffineAdder {
                    cur: q,
                    base: q,
                    coeffs: buf,
                };
                miller_loop(&mut adder);
                buf = adder.coeffs;
            }
        }
        debug_assert_eq!(buf.len(), LINE_COUNT);
        trace!(%coordinates, lines = buf.len(), "prepared G2 point");

        G2Prepared {
            infinity: is_identity,
            coordinates,
            coeffs: buf,
        }
    }

    /// Whether the prepared point is the identity
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Coordinate system the lines were computed in
    pub fn coordinates(&self) -> MillerLoopCoordinates {
        self.coordinates
    }

    /// Line coefficients in evaluation order
    pub fn coeffs(&self) -> &[LineCoeffs] {
        &self.coeffs
    }

    /// Release the coefficient buffer.
    pub fn into_coeffs(self) -> Vec<LineCoeffs> {
        self.coeffs
    }
}

struct MixedAdder {
    cur: Accumulator,
    base: G2Affine,
    coeffs: Vec<LineCoeffs>,
}

impl MillerLoopDriver for MixedAdder {
    type Output = ();

    fn doubling_step(&mut self, _: ()) {
        let coeffs = doubling_step(&mut self.cur);
        self.coeffs.push(coeffs);
    }
    fn addition_step(&mut self, _: ()) {
        let coeffs = addition_step(&mut self.cur, &self.base);
        self.coeffs.push(coeffs);
    }
    fn negate(&mut self, _: ()) {
        self.cur.y = -self.cur.y;
    }
    fn frobenius_steps(&mut self, _: ()) {
        let q1 = psi_affine(&self.base);
        let q2 = neg_psi2_affine(&self.base);
        let coeffs = addition_step(&mut self.cur, &q1);
        self.coeffs.push(coeffs);
        let coeffs = addition_step(&mut self.cur, &q2);
        self.coeffs.push(coeffs);
    }
    fn square_output(_: ()) {}
    fn one() {}
}

struct AffineAdder {
    cur: G2Affine,
    base: G2Affine,
    coeffs: Vec<LineCoeffs>,
}

impl MillerLoopDriver for AffineAdder {
    type Output = ();

    fn doubling_step(&mut self, _: ()) {
        let coeffs = affine_doubling_step(&mut self.cur);
        self.coeffs.push(coeffs);
    }
    fn addition_step(&mut self, _: ()) {
        let coeffs = affine_addition_step(&mut self.cur, &self.base);
        self.coeffs.push(coeffs);
    }
    fn negate(&mut self, _: ()) {
        self.cur.y = -self.cur.y;
    }
    fn frobenius_steps(&mut self, _: ()) {
        let q1 = psi_affine(&self.base);
        let q2 = neg_psi2_affine(&self.base);
        let coeffs = affine_addition_step(&mut self.cur, &q1);
        self.coeffs.push(coeffs);
        let coeffs = affine_addition_step(&mut self.cur, &q2);
        self.coeffs.push(coeffs);
    }
    fn square_output(_: ()) {}
    fn one() {}
}

struct Evaluator<'a, 'b, 'c> {
    terms: &'a [(&'b G1Affine, &'c G2Prepared)],
    index: usize,
}

impl<'a, 'b, 'c> Evaluator<'a, 'b, 'c> {
    fn next_lines(&mut self, mut f: Fp12) -> Fp12 {
        let index = self.index;
        for (p, q) in self.terms {
            let either_identity = p.is_identity() | q.is_identity();
            let new_f = q.coeffs[index].ell(&f, p);
            f = Fp12::conditional_select(&new_f, &f, either_identity);
        }
        self.index += 1;
        f
    }
}

impl<'a, 'b, 'c> MillerLoopDriver for Evaluator<'a, 'b, 'c> {
    type Output = Fp12;

    fn doubling_step(&mut self, f: Fp12) -> Fp12 {
        self.next_lines(f)
    }
    fn addition_step(&mut self, f: Fp12) -> Fp12 {
        self.next_lines(f)
    }
    fn negate(&mut self, f: Fp12) -> Fp12 {
        f.conjugate()
    }
    fn frobenius_steps(&mut self, f: Fp12) -> Fp12 {
        let f = self.next_lines(f);
        self.next_lines(f)
    }
    fn square_output(f: Fp12) -> Fp12 {
        f.square()
    }
    fn one() -> Fp12 {
        Fp12::one()
    }
}

/// Product of Miller-loop values over several (P, Q) pairs, sharing the
/// squarings. Finish with [`MillerLoopResult::final_exponentiation`].
#[instrument(level = "trace", skip_all, fields(terms = terms.len()))]
pub fn multi_miller_loop(terms: &[(&G1Affine, &G2Prepared)]) -> MillerLoopResult {
    debug_assert!(terms.iter().all(|(_, q)| q.coeffs.len() == LINE_COUNT));

    let mut evaluator = Evaluator { terms, index: 0 };
    MillerLoopResult(miller_loop(&mut evaluator))
}

/// e(Q, P) with lines precomputed in mixed coordinates
#[instrument(level = "trace", skip_all)]
pub fn pairing(q: &G2Affine, p: &G1Affine) -> Gt {
    pairing_with(q, p, MillerLoopCoordinates::Mixed)
}

/// e(Q, P) with lines precomputed in the given coordinates
pub fn pairing_with(q: &G2Affine, p: &G1Affine, coordinates: MillerLoopCoordinates) -> Gt {
    let prepared = G2Prepared::new(q, coordinates);
    multi_miller_loop(&[(p, &prepared)]).final_exponentiation()
}

/// Output of the Miller loop, before the final exponentiation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MillerLoopResult(pub(crate) Fp12);

impl ConditionallySelectable for MillerLoopResult {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        MillerLoopResult(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl<'a, 'b> Mul<&'b MillerLoopResult> for &'a MillerLoopResult {
    type Output = MillerLoopResult;

    #[inline]
    fn mul(self, rhs: &'b MillerLoopResult) -> MillerLoopResult {
        MillerLoopResult(self.0 * rhs.0)
    }
}

impl_binops_multiplicative!(MillerLoopResult, MillerLoopResult);

/// f^u for f in the cyclotomic subgroup and the negative curve parameter u
fn exp_by_u(f: &Fp12) -> Fp12 {
    let mut res = Fp12::one();
    for i in (0..64).rev() {
        res = res.cyclotomic_square();
        if (BN_U >> i) & 1 == 1 {
            res *= f;
        }
    }
    res.conjugate()
}

impl MillerLoopResult {
    /// The raw Fp12 value
    pub fn value(&self) -> Fp12 {
        self.0
    }

    /// Raise to (q¹² - 1) / r.
    pub fn final_exponentiation(&self) -> Gt {
        trace!("final exponentiation");
        let f = self.0;
        debug_assert!(!bool::from(f.is_zero()));

        // Easy part: f^((q⁶ - 1)(q² + 1))
        let f_inv = f.invert().unwrap_or(Fp12::zero());
        let f1 = f.conjugate() * f_inv;
        let f = f1.frobenius_map(2) * f1;

        // Hard part: Fuentes-Castañeda et al. chain
        let fx = exp_by_u(&f);
        let fx2 = exp_by_u(&fx);
        let fx3 = exp_by_u(&fx2);

        let y0 = f.frobenius_map(1) * f.frobenius_map(2) * f.frobenius_map(3);
        let y1 = f.conjugate();
        let y2 = fx2.frobenius_map(2);
        let y3 = fx.frobenius_map(1).conjugate();
        let y4 = (fx * fx2.frobenius_map(1)).conjugate();
        let y5 = fx2.conjugate();
        let y6 = (fx3 * fx3.frobenius_map(1)).conjugate();

        let mut t0 = y6.cyclotomic_square() * y4 * y5;
        let mut t1 = y3 * y5 * t0;
        t0 *= y2;
        t1 = t1.cyclotomic_square() * t0;
        t1 = t1.cyclotomic_square();
        t0 = t1 * y1;
        t1 *= y0;
        t0 = t0.cyclotomic_square();

        Gt(t1 * t0)
    }
}

/// Target group: the order-r subgroup of Fp12*, written multiplicatively.
#[derive(Copy, Clone, Debug, Default)]
pub struct Gt(pub(crate) Fp12);

impl fmt::Display for Gt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ConstantTimeEq for Gt {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl ConditionallySelectable for Gt {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Gt(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl Eq for Gt {}
impl PartialEq for Gt {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a, 'b> Mul<&'b Gt> for &'a Gt {
    type Output = Gt;

    #[inline]
    fn mul(self, rhs: &'b Gt) -> Gt {
        Gt(self.0 * rhs.0)
    }
}

impl_binops_multiplicative!(Gt, Gt);

impl<T> Product<T> for Gt
where
    T: Borrow<Gt>,
{
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::identity(), |acc, item| acc * item.borrow())
    }
}

impl Gt {
    /// The multiplicative identity
    pub fn identity() -> Gt {
        Gt(Fp12::one())
    }

    /// e(P2, P1) for the fixed generators. Evaluates a pairing.
    pub fn generator() -> Gt {
        pairing(&G2Affine::generator(), &G1Affine::generator())
    }

    /// A random element, the generator raised to a random scalar.
    pub fn random(mut rng: impl RngCore) -> Gt {
        Gt::generator().pow(&Scalar::random(&mut rng))
    }

    /// Check if identity
    pub fn is_identity(&self) -> Choice {
        self.0.is_one()
    }

    /// Square, using the cyclotomic formula.
    pub fn square(&self) -> Gt {
        Gt(self.0.cyclotomic_square())
    }

    /// Inverse; elements of Gt are unitary, so this is conjugation.
    pub fn invert(&self) -> Gt {
        Gt(self.0.conjugate())
    }

    /// Constant-time exponentiation by a scalar.
    pub fn pow(&self, k: &Scalar) -> Gt {
        let mut acc = Gt::identity();
        for &byte in k.to_bytes().iter() {
            for i in (0..8).rev() {
                acc = acc.square();
                let bit = Choice::from((byte >> i) & 1u8);
                acc = Gt::conditional_select(&acc, &(acc * self), bit);
            }
        }
        acc
    }

    /// Order-r subgroup membership, checked as self^r = 1.
    pub fn is_torsion_free(&self) -> Choice {
        let r = Scalar::modulus_biguint().to_u64_digits();
        Field::pow(&self.0, &r).is_one()
    }

    /// The underlying Fp12 value
    pub fn value(&self) -> Fp12 {
        self.0
    }

    /// Serialize as the 384-byte Fp12 encoding.
    pub fn to_bytes(&self) -> [u8; GT_SIZE] {
        self.0.to_bytes()
    }

    /// Decode and check subgroup membership.
    pub fn from_slice(bytes: &[u8]) -> Result<Gt> {
        validate::length("Gt::from_slice", bytes.len(), GT_SIZE)?;
        let value = Fp12::from_slice(bytes)?;
        let gt = Gt(value);
        validate::parameter(!bool::from(value.is_zero()), "gt", "zero is not in Gt")?;
        if !bool::from(gt.is_torsion_free()) {
            return Err(Error::param("gt", "not in the order-r subgroup"));
        }
        Ok(gt)
    }
}

impl Serialize for Gt {
    fn to_bytes(&self) -> Vec<u8> {
        Gt::to_bytes(self).to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        Gt::from_slice(bytes).map_err(CoreError::from)
    }
}
