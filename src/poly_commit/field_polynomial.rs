use ark_ff::PrimeField;

/// Field polynomial in coefficient (canonical) form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FpPolynomial<F> {
    /// Coefficients of the polynomial, low-order coefficient first.
    pub coefs: Vec<F>,
}

impl<F: PrimeField> FpPolynomial<F> {
    /// Return the polynomial coefs reference.
    pub fn get_coefs_ref(&self) -> &[F] {
        self.coefs.as_slice()
    }

    /// Return the constant zero polynomial.
    pub fn zero() -> Self {
        Self::from_coefs(vec![F::zero()])
    }

    /// Return the constant one polynomial.
    pub fn one() -> Self {
        Self::from_coefs(vec![F::one()])
    }

    /// Build a polynomial from the coefficient vector, low-order coefficient first.
    /// High-order zero coefficients are trimmed.
    /// # Example
    /// ```
    /// use plonk_backend::poly_commit::field_polynomial::FpPolynomial;
    /// use ark_bls12_381::Fr;
    /// use ark_ff::{One, Zero};
    /// let one = Fr::one();
    /// let coefs = vec![one, Fr::zero(), one];
    /// let poly = FpPolynomial::from_coefs(coefs);
    /// assert_eq!(poly.degree(), 2);
    /// let padded = vec![one, Fr::zero(), one, Fr::zero(), Fr::zero()];
    /// assert_eq!(poly, FpPolynomial::from_coefs(padded));
    /// ```
    pub fn from_coefs(coefs: Vec<F>) -> Self {
        let mut p = FpPolynomial { coefs };
        p.trim_coefs();
        p
    }

    /// Build a polynomial from its zeroes/roots.
    /// # Example
    /// ```
    /// use plonk_backend::poly_commit::field_polynomial::FpPolynomial;
    /// use ark_bls12_381::Fr;
    /// use ark_ff::{One, Zero};
    /// let one = Fr::one();
    /// let two = one + one;
    /// let poly = FpPolynomial::from_zeroes(&[one, two]);
    /// assert_eq!(poly.degree(), 2);
    /// assert_eq!(poly.eval(&one), Fr::zero());
    /// assert_eq!(poly.eval(&two), Fr::zero());
    /// ```
    pub fn from_zeroes(zeroes: &[F]) -> Self {
        let mut r = Self::one();
        for root in zeroes.iter() {
            let mut p = r.clone();
            r.coefs.insert(0, F::zero()); // multiply by X
            p.mul_scalar_assign(root);
            r.sub_assign(&p); // r = r * (X - root)
        }
        r.trim_coefs();
        r
    }

    /// Remove high degree zero-coefficients.
    fn trim_coefs(&mut self) {
        while self.coefs.len() > 1 && self.coefs.last().unwrap().is_zero() {
            // safe unwrap
            self.coefs.pop().unwrap(); // safe unwrap
        }
    }

    /// Return degree of the polynomial.
    pub fn degree(&self) -> usize {
        if self.coefs.is_empty() {
            0
        } else {
            self.coefs.len() - 1
        }
    }

    /// Test if polynomial is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.degree() == 0 && self.coefs[0].is_zero()
    }

    /// Evaluate the polynomial on a point.
    pub fn eval(&self, point: &F) -> F {
        let mut result = F::zero();
        let mut variable = F::one();
        for coef in self.coefs.iter() {
            result += variable * coef;
            variable *= point;
        }
        result
    }

    /// Add another polynomial to self.
    pub fn add_assign(&mut self, other: &Self) {
        for (self_coef, other_coef) in self.coefs.iter_mut().zip(other.coefs.iter()) {
            *self_coef += other_coef;
        }
        let n = self.coefs.len();
        if n < other.coefs.len() {
            self.coefs.extend_from_slice(&other.coefs[n..]);
        }
        self.trim_coefs();
    }

    /// Subtract another polynomial from self.
    pub fn sub_assign(&mut self, other: &Self) {
        let n = self.coefs.len();
        if n < other.coefs.len() {
            self.coefs.resize(other.coefs.len(), F::zero());
        }
        for (self_coef, other_coef) in self.coefs.iter_mut().zip(other.coefs.iter()) {
            *self_coef -= other_coef;
        }
        self.trim_coefs();
    }

    /// Subtract another polynomial, producing a new polynomial.
    pub fn sub(&self, other: &Self) -> Self {
        let mut new = self.clone();
        new.sub_assign(other);
        new
    }

    /// Multiply all the coefficients by a scalar.
    pub fn mul_scalar_assign(&mut self, scalar: &F) {
        for coef in self.coefs.iter_mut() {
            *coef *= scalar;
        }
    }

    /// Multiply all the coefficients by a scalar, producing a new polynomial.
    pub fn mul_scalar(&self, scalar: &F) -> Self {
        let mut new = self.clone();
        new.mul_scalar_assign(scalar);
        new
    }

    /// Divide polynomial to produce the quotient and remainder polynomials.
    /// # Example:
    /// ```
    /// use plonk_backend::poly_commit::field_polynomial::FpPolynomial;
    /// use ark_bls12_381::Fr;
    /// use ark_ff::{One, Zero};
    /// let one = Fr::one();
    /// let poly = FpPolynomial::from_coefs(vec![one, one, one]);
    /// let divisor = FpPolynomial::from_coefs(vec![one, one]);
    /// let (q, r) = poly.div_rem(&divisor);
    /// assert_eq!(q, FpPolynomial::from_coefs(vec![Fr::zero(), one]));
    /// assert_eq!(r, FpPolynomial::from_coefs(vec![one]));
    /// ```
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        let k = self.coefs.len();
        let l = divisor.coefs.len();
        if l > k {
            return (Self::zero(), self.clone());
        }
        let divisor_coefs = &divisor.coefs[..];
        let bl_inv = divisor_coefs.last().unwrap().inverse().unwrap(); // safe unwrap
        let mut rem = self.coefs.clone();
        let mut quo: Vec<F> = vec![F::zero(); k - l + 1];
        for i in (0..(k - l + 1)).rev() {
            let qi = bl_inv * rem[i + l - 1];
            for (j, divisor_coef) in divisor_coefs.iter().enumerate() {
                rem[i + j] -= qi * divisor_coef;
            }
            quo[i] = qi;
        }
        for _ in 0..k - l + 1 {
            rem.pop();
        }
        if rem.is_empty() {
            rem.push(F::zero());
        }
        (Self::from_coefs(quo), Self::from_coefs(rem))
    }
}
