//! Field tower of Fp254BNb: Fp, Fp2 = Fp[u]/(u^2 + 1), Fp6 = Fp2[v]/(v^3 - xi)
//! with xi = 1 + u, and Fp12 = Fp6[w]/(w^2 - v).

pub mod fp; // Base field
pub mod fp12; // Degree-12 extension (target field)
pub mod fp2; // Quadratic extension
pub mod fp6; // Degree-6 extension

use isopair_api::Field;
use num_bigint::BigUint;

use crate::error::{validate, Error, Result};
use fp::Fp;

// ============================================================================
// Arithmetic Helper Functions
// ============================================================================

/// Compute a + b + carry, returning (result, carry)
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Compute a - (b + borrow), returning (result, borrow)
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + ((borrow >> 63) as u128));
    (ret as u64, (ret >> 64) as u64)
}

/// Compute a + (b * c) + carry, returning (result, carry)
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

// ============================================================================
// Square roots in the upper tower
// ============================================================================

/// Tonelli-Shanks in the degree-`degree` extension, using `non_residue`.
///
/// The exponents come from q^degree - 1 = 2^s * t with t odd.
pub(crate) fn tonelli_shanks<F: Field>(a: &F, non_residue: &F, degree: u32) -> Option<F> {
    if a.is_zero() {
        return Some(F::zero());
    }

    let order = Fp::modulus_biguint().pow(degree) - 1u32;
    let s = order.trailing_zeros().unwrap_or(0);
    let t = &order >> s;
    let t_plus_one_half: BigUint = (&t + 1u32) >> 1;

    let t_limbs = t.to_u64_digits();
    let mut m = s;
    let mut c = non_residue.pow(&t_limbs);
    let mut tt = a.pow(&t_limbs);
    let mut x = a.pow(&t_plus_one_half.to_u64_digits());

    loop {
        if tt.is_one() {
            return (x.square() == *a).then_some(x);
        }

        // Least i with tt^(2^i) == 1
        let mut i = 1u64;
        let mut t2i = tt.square();
        while i < m && !t2i.is_one() {
            t2i = t2i.square();
            i += 1;
        }
        if i == m {
            return None;
        }

        let mut b = c;
        for _ in 0..(m - i - 1) {
            b = b.square();
        }
        x *= b;
        c = b.square();
        tt *= c;
        m = i;
    }
}

// ============================================================================
// Component and radix conversions
// ============================================================================

/// Build an element from base-field components given as integers, in
/// serialization order.
pub fn element_from_components_u64<F: Field>(components: &[u64]) -> Result<F> {
    validate::length("element components", components.len(), F::DEGREE)?;
    let mut bytes = Vec::with_capacity(F::ENCODED_SIZE);
    for &c in components {
        let mut coeff = vec![0u8; F::COEFFICIENT_SIZE];
        let width = F::COEFFICIENT_SIZE;
        coeff[width - 8..].copy_from_slice(&c.to_be_bytes());
        bytes.extend_from_slice(&coeff);
    }
    F::from_byte_array(&bytes).map_err(|_| Error::param("components", "component out of range"))
}

/// Build an element from base-field components written in `radix`, in
/// serialization order. Each component must lie in [0, q).
pub fn element_from_components_str<F: Field>(components: &[&str], radix: u32) -> Result<F> {
    validate::length("element components", components.len(), F::DEGREE)?;
    validate::parameter((2..=36).contains(&radix), "radix", "radix must be in 2..=36")?;

    let modulus = Fp::modulus_biguint();
    let mut bytes = Vec::with_capacity(F::ENCODED_SIZE);
    for c in components {
        let value = BigUint::parse_bytes(c.trim().as_bytes(), radix)
            .ok_or_else(|| Error::param("components", "not an integer in the given radix"))?;
        validate::parameter(value < modulus, "components", "component not below the modulus")?;
        bytes.extend_from_slice(&biguint_to_fixed_be(&value, F::COEFFICIENT_SIZE));
    }
    F::from_byte_array(&bytes).map_err(|_| Error::param("components", "component out of range"))
}

/// Render each base-field coefficient in `radix`. Fp prints a bare integer,
/// extensions print `[c0, c1, ...]` in serialization order.
pub fn to_string_radix<F: Field>(element: &F, radix: u32) -> Result<String> {
    validate::parameter((2..=36).contains(&radix), "radix", "radix must be in 2..=36")?;

    let bytes = element.to_byte_array();
    validate::multiple_of("to_string_radix", bytes.len(), F::COEFFICIENT_SIZE)?;
    let parts: Vec<String> = bytes
        .chunks(F::COEFFICIENT_SIZE)
        .map(|chunk| BigUint::from_bytes_be(chunk).to_str_radix(radix))
        .collect();

    if parts.len() == 1 {
        Ok(parts.concat())
    } else {
        Ok(format!("[{}]", parts.join(", ")))
    }
}

/// Left-pad the big-endian bytes of `value` to `width`
pub(crate) fn biguint_to_fixed_be(value: &BigUint, width: usize) -> Vec<u8> {
    let raw = value.to_bytes_be();
    debug_assert!(raw.len() <= width);
    let mut out = vec![0u8; width];
    out[width - raw.len()..].copy_from_slice(&raw);
    out
}
