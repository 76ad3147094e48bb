//! Bilinear map contract consumed by group-signature verification.

/// A bilinear pairing `G2 x G1 -> Gt`
pub trait Pairing {
    /// First source group
    type G1;
    /// Second source group
    type G2;
    /// Target group
    type Gt: PartialEq;

    /// Evaluate the pairing `e(q, p)`
    fn pairing(&mut self, q: &Self::G2, p: &Self::G1) -> Self::Gt;

    /// Whether the product of `e(q_i, p_i)` is the identity
    fn pairing_check(&mut self, terms: &[(Self::G1, Self::G2)]) -> bool;

    /// Whether `e(x, a) == e(y, b)`, the shape of every verification equation
    fn verify_equality(&mut self, a: &Self::G1, x: &Self::G2, b: &Self::G1, y: &Self::G2) -> bool {
        self.pairing(x, a) == self.pairing(y, b)
    }
}
