//! Algebraic number fields and towers of them.
//!
//! A [`NumberField`] is `K[a]/(m(a))` for a monic polynomial `m` over a base
//! [`CoefficientField`] `K`, which is either Q or another number field.
//! Elements are [`Scalar`]s, which are always stored in the smallest field of
//! their tower that contains them. A rational constant is therefore the same
//! value in every field, and equality is structural.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use crate::error::FieldError;
use crate::rational::Q;
use crate::traits::{Field, Ring};

/// A simple algebraic extension `base[a]/(m(a))`.
///
/// The defining polynomial is stored monic, as coefficients
/// `[m_0, m_1, ..., m_{n-1}, 1]`. Irreducibility is not checked.
#[derive(Debug)]
pub struct NumberField {
    name: String,
    base: CoefficientField,
    modulus: Vec<Scalar>,
}

impl NumberField {
    /// Returns the generator's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field this one extends.
    #[must_use]
    pub fn base(&self) -> &CoefficientField {
        &self.base
    }

    /// Returns the monic defining polynomial.
    #[must_use]
    pub fn modulus(&self) -> &[Scalar] {
        &self.modulus
    }

    /// Returns the degree over the base field.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.modulus.len() - 1
    }

    /// Reduces a coordinate vector modulo the defining polynomial.
    fn reduce(&self, coeffs: &mut Vec<Scalar>) {
        let d = self.degree();
        while coeffs.len() > d {
            let k = coeffs.len() - 1;
            let Some(top) = coeffs.pop() else { break };
            if top.is_zero() {
                continue;
            }

            // a^k = a^(k-d) * a^d = -a^(k-d) * (m_0 + ... + m_{d-1} a^(d-1))
            for (i, m) in self.modulus[..d].iter().enumerate() {
                let idx = k - d + i;
                coeffs[idx] = coeffs[idx].clone() - top.clone() * m.clone();
            }
        }
        trim(coeffs);
    }
}

/// A field that series coefficients live in.
///
/// Two fields are equal only if they are the same object: number fields
/// built separately from the same polynomial are distinct.
#[derive(Clone, Debug)]
pub enum CoefficientField {
    /// The rational numbers.
    Rationals,
    /// A finite algebraic extension.
    Algebraic(Arc<NumberField>),
}

impl CoefficientField {
    /// Adjoins a root of `modulus` (coefficients ascending) to this field.
    ///
    /// The polynomial is normalized to be monic.
    ///
    /// # Errors
    ///
    /// Fails if the polynomial has degree < 1, a zero leading coefficient,
    /// a coefficient outside this field, or if `name` is empty.
    pub fn extension(&self, modulus: Vec<Scalar>, name: &str) -> Result<Self, FieldError> {
        if name.is_empty() {
            return Err(FieldError::EmptyGeneratorName);
        }
        let Some(lead) = modulus.last() else {
            return Err(FieldError::ModulusDegree);
        };
        if lead.is_zero() {
            return Err(FieldError::ZeroLeadingCoefficient);
        }
        if modulus.len() < 2 {
            return Err(FieldError::ModulusDegree);
        }
        if let Some(c) = modulus.iter().find(|c| !self.contains(&c.field())) {
            return Err(FieldError::CoefficientOutsideBase(c.to_string()));
        }

        let lead_inv = lead.inv().ok_or(FieldError::ZeroLeadingCoefficient)?;
        let modulus = modulus.into_iter().map(|c| c * lead_inv.clone()).collect();

        Ok(Self::Algebraic(Arc::new(NumberField {
            name: name.to_string(),
            base: self.clone(),
            modulus,
        })))
    }

    /// Returns true if `other` is this field or one of its subfields in the tower.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        if self == other {
            return true;
        }
        match self {
            Self::Rationals => false,
            Self::Algebraic(nf) => nf.base.contains(other),
        }
    }

    /// Returns the number of extensions between Q and this field.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Rationals => 0,
            Self::Algebraic(nf) => 1 + nf.base.depth(),
        }
    }

    /// Returns true for Q.
    #[must_use]
    pub fn is_rationals(&self) -> bool {
        matches!(self, Self::Rationals)
    }

    /// Returns the adjoined generator, or `None` for Q.
    #[must_use]
    pub fn generator(&self) -> Option<Scalar> {
        match self {
            Self::Rationals => None,
            Self::Algebraic(nf) => Some(Scalar::generator(nf)),
        }
    }

    /// An identity key: 0 for Q, the field's address otherwise.
    #[must_use]
    pub fn id(&self) -> usize {
        match self {
            Self::Rationals => 0,
            Self::Algebraic(nf) => Arc::as_ptr(nf) as usize,
        }
    }
}

impl PartialEq for CoefficientField {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rationals, Self::Rationals) => true,
            (Self::Algebraic(a), Self::Algebraic(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for CoefficientField {}

impl fmt::Display for CoefficientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rationals => write!(f, "QQ"),
            Self::Algebraic(nf) => write!(f, "{}[{}]", nf.base, nf.name),
        }
    }
}

/// An element of a number field that does not lie in its base field.
///
/// Coordinates are taken with respect to the power basis `1, a, ..., a^(n-1)`,
/// with trailing zeros removed; at least two coordinates are always present.
#[derive(Clone)]
pub struct AlgebraicNumber {
    coords: Vec<Scalar>,
    field: Arc<NumberField>,
}

impl AlgebraicNumber {
    /// Returns the coordinates over the base field.
    #[must_use]
    pub fn coords(&self) -> &[Scalar] {
        &self.coords
    }

    /// Returns the field this element belongs to.
    #[must_use]
    pub fn field(&self) -> &Arc<NumberField> {
        &self.field
    }

    /// Inverts by the extended Euclidean algorithm modulo the defining polynomial.
    fn inverse(&self) -> Option<Scalar> {
        let mut r0 = self.field.modulus.clone();
        let mut r1 = self.coords.clone();
        let mut s0: Vec<Scalar> = Vec::new();
        let mut s1 = vec![Scalar::one()];

        while !r1.is_empty() {
            let (quot, rem) = poly_div_rem(&r0, &r1)?;
            let s2 = poly_sub(&s0, &poly_mul(&quot, &s1));
            r0 = std::mem::replace(&mut r1, rem);
            s0 = std::mem::replace(&mut s1, s2);
        }

        // A non-constant gcd means the modulus was reducible.
        if r0.len() != 1 {
            return None;
        }
        let c = r0[0].inv()?;
        let s0 = s0.into_iter().map(|s| s * c.clone()).collect();
        Some(Scalar::from_coordinates(s0, &self.field))
    }
}

impl PartialEq for AlgebraicNumber {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.field, &other.field) && self.coords == other.coords
    }
}

impl Eq for AlgebraicNumber {}

impl fmt::Debug for AlgebraicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgebraicNumber")
            .field("coords", &self.coords)
            .field("generator", &self.field.name)
            .finish()
    }
}

impl fmt::Display for AlgebraicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.field.name;
        let mut terms = Vec::new();

        for (i, c) in self.coords.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            let coeff = match c {
                Scalar::Rational(q) => q.to_string(),
                Scalar::Algebraic(_) => format!("({c})"),
            };
            let term = match i {
                0 => coeff,
                1 if c.is_one() => name.clone(),
                1 => format!("{coeff}*{name}"),
                _ if c.is_one() => format!("{name}^{i}"),
                _ => format!("{coeff}*{name}^{i}"),
            };
            terms.push(term);
        }

        write!(f, "{}", terms.join(" + "))
    }
}

/// An element of a coefficient field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scalar {
    /// A rational number.
    Rational(Q),
    /// An element of a number field outside that field's base.
    Algebraic(AlgebraicNumber),
}

impl Scalar {
    /// Builds `c_0 + c_1 a + c_2 a^2 + ...` in `field`, reducing modulo its
    /// defining polynomial.
    ///
    /// The coordinates must lie in the base field of `field`.
    #[must_use]
    pub fn from_coordinates(mut coords: Vec<Scalar>, field: &Arc<NumberField>) -> Self {
        field.reduce(&mut coords);
        match coords.len() {
            0 => Self::zero(),
            1 => coords.swap_remove(0),
            _ => Self::Algebraic(AlgebraicNumber {
                coords,
                field: Arc::clone(field),
            }),
        }
    }

    /// Returns the generator of `field`.
    #[must_use]
    pub fn generator(field: &Arc<NumberField>) -> Self {
        Self::from_coordinates(vec![Self::zero(), Self::one()], field)
    }

    /// Returns the smallest field containing this element.
    #[must_use]
    pub fn field(&self) -> CoefficientField {
        match self {
            Self::Rational(_) => CoefficientField::Rationals,
            Self::Algebraic(a) => CoefficientField::Algebraic(Arc::clone(&a.field)),
        }
    }

    /// Returns true if this element lies in `field`.
    #[must_use]
    pub fn lies_in(&self, field: &CoefficientField) -> bool {
        field.contains(&self.field())
    }

    /// Returns the rational value, if this element is rational.
    #[must_use]
    pub fn as_rational(&self) -> Option<&Q> {
        match self {
            Self::Rational(q) => Some(q),
            Self::Algebraic(_) => None,
        }
    }

    /// Returns true if this element is a rational integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.as_rational().is_some_and(Q::is_integer)
    }

    /// Coordinates of this element over the base of `field`, which must
    /// contain it.
    fn coords_in(&self, field: &Arc<NumberField>) -> Vec<Scalar> {
        match self {
            Self::Algebraic(a) if Arc::ptr_eq(&a.field, field) => a.coords.clone(),
            s if s.is_zero() => Vec::new(),
            s => vec![s.clone()],
        }
    }
}

/// The number field both operands live in, for a mixed operation.
///
/// # Panics
///
/// Panics if neither operand's field contains the other's.
fn common_extension(a: &Scalar, b: &Scalar) -> Arc<NumberField> {
    let (fa, fb) = (a.field(), b.field());
    let big = if fa.contains(&fb) {
        fa
    } else {
        assert!(fb.contains(&fa), "scalars belong to unrelated fields: {fa} and {fb}");
        fb
    };
    match big {
        CoefficientField::Algebraic(nf) => nf,
        CoefficientField::Rationals => unreachable!("rational operands take the fast path"),
    }
}

fn trim(coeffs: &mut Vec<Scalar>) {
    while coeffs.last().is_some_and(Scalar::is_zero) {
        coeffs.pop();
    }
}

fn poly_add(a: &[Scalar], b: &[Scalar]) -> Vec<Scalar> {
    let len = a.len().max(b.len());
    let mut result: Vec<Scalar> = (0..len)
        .map(|i| {
            let x = a.get(i).cloned().unwrap_or_else(Scalar::zero);
            let y = b.get(i).cloned().unwrap_or_else(Scalar::zero);
            x + y
        })
        .collect();
    trim(&mut result);
    result
}

fn poly_sub(a: &[Scalar], b: &[Scalar]) -> Vec<Scalar> {
    let neg: Vec<Scalar> = b.iter().map(|c| -c.clone()).collect();
    poly_add(a, &neg)
}

fn poly_mul(a: &[Scalar], b: &[Scalar]) -> Vec<Scalar> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut result = vec![Scalar::zero(); a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            result[i + j] = result[i + j].clone() + x.clone() * y.clone();
        }
    }
    trim(&mut result);
    result
}

/// Euclidean division of trimmed coefficient vectors.
fn poly_div_rem(a: &[Scalar], b: &[Scalar]) -> Option<(Vec<Scalar>, Vec<Scalar>)> {
    let lead_inv = b.last()?.inv()?;
    let mut rem = a.to_vec();
    if rem.len() < b.len() {
        return Some((Vec::new(), rem));
    }

    let mut quot = vec![Scalar::zero(); rem.len() - b.len() + 1];
    while rem.len() >= b.len() {
        let Some(top) = rem.last().cloned() else { break };
        let shift = rem.len() - b.len();
        let c = top * lead_inv.clone();
        for (i, bi) in b.iter().enumerate() {
            rem[shift + i] = rem[shift + i].clone() - c.clone() * bi.clone();
        }
        quot[shift] = c;
        rem.pop();
        trim(&mut rem);
    }
    trim(&mut quot);
    Some((quot, rem))
}

impl Ring for Scalar {
    fn zero() -> Self {
        Self::Rational(Q::zero())
    }

    fn one() -> Self {
        Self::Rational(Q::one())
    }

    fn is_zero(&self) -> bool {
        matches!(self, Self::Rational(q) if q.is_zero())
    }

    fn is_one(&self) -> bool {
        matches!(self, Self::Rational(q) if q.is_one())
    }

    fn from_i64(n: i64) -> Self {
        Self::Rational(Q::from_integer(n))
    }

    fn mul_by_scalar(&self, n: i64) -> Self {
        self.clone() * Self::from_i64(n)
    }
}

impl Field for Scalar {
    fn inv(&self) -> Option<Self> {
        match self {
            Self::Rational(q) => q.inv().map(Self::Rational),
            Self::Algebraic(a) => a.inverse(),
        }
    }
}

impl Add for Scalar {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Rational(a), Self::Rational(b)) => Self::Rational(a + b),
            (a, b) => {
                let field = common_extension(&a, &b);
                let sum = poly_add(&a.coords_in(&field), &b.coords_in(&field));
                Self::from_coordinates(sum, &field)
            }
        }
    }
}

impl Sub for Scalar {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl Mul for Scalar {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Rational(a), Self::Rational(b)) => Self::Rational(a * b),
            (a, b) => {
                let field = common_extension(&a, &b);
                let product = poly_mul(&a.coords_in(&field), &b.coords_in(&field));
                Self::from_coordinates(product, &field)
            }
        }
    }
}

impl Neg for Scalar {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Rational(q) => Self::Rational(-q),
            Self::Algebraic(a) => Self::Algebraic(AlgebraicNumber {
                coords: a.coords.into_iter().map(Neg::neg).collect(),
                field: a.field,
            }),
        }
    }
}

impl From<Q> for Scalar {
    fn from(value: Q) -> Self {
        Self::Rational(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rational(q) => write!(f, "{q}"),
            Self::Algebraic(a) => write!(f, "{a}"),
        }
    }
}
