#[cfg(not(any(target_pointer_width = "64")))]
compile_error!("this crate requires 64-bit limbs");

use crate::bwfp::{BWFp, BWFpWide};
use crate::bwparam::{uint, BWParam};
use crate::errors::BWError;
use crate::traits::{BWField, One};
use crypto_bigint::{Random, Uint, Word, Zero};
use crypto_bigint::rand_core::{RngCore, TryRngCore};
use crypto_bigint::subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use sha3::{Shake128, Shake256};
use sha3::digest::ExtendableOutput;
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use tracing::{instrument, trace};

/// The <b>F</b><sub><i>p&sup1;&sup3;</i></sub> = <b>F</b><sub><i>p</i></sub>&lbrack;<i>z</i>&rbrack;/&lt;<i>z&sup1;&sup3; + 2</i>&gt;
/// extension field.
/// NB: <i>z&sup1;&sup3;</i> = <i>-2</i>.
pub struct BWFp13<BW: BWParam, const LIMBS: usize> {
    pub(crate) v: [BWFp<BW, LIMBS>; 13],
}

pub type BW13P310Fp13 = BWFp13<crate::bwparam::BW13P310Param, 5>;


impl<BW: BWParam, const LIMBS: usize> BWFp13<BW, LIMBS> {
    /// Map an <b>F</b><sub><i>p</i></sub> element to its <b>F</b><sub><i>p&sup1;&sup3;</i></sub> counterpart.
    #[inline]
    pub fn from_base(v0: BWFp<BW, LIMBS>) -> Self {
        let mut v = [BWFp::zero(); 13];
        v[0] = v0;
        Self { v }
    }

    /// Assemble an <b>F</b><sub><i>p&sup1;&sup3;</i></sub> element from its coefficients
    /// <i>v&#x2080;</i> + <i>v&#x2081;z</i> + ... + <i>v&#x2081;&#x2082;z&sup1;&sup2;</i>.
    #[inline]
    pub fn from(v: [BWFp<BW, LIMBS>; 13]) -> Self {
        Self { v }
    }

    /// Read an <b>F</b><sub><i>p&sup1;&sup3;</i></sub> element from a table of 13&times;LIMBS words
    /// in plain representation, one coefficient per LIMBS words.
    #[inline]
    pub(crate) fn from_slice(w: &[Word]) -> Self {
        Self { v: core::array::from_fn(|i| BWFp::from_slice(&w[i*LIMBS..(i + 1)*LIMBS])) }
    }

    /// Hash input data into an <b>F</b><sub><i>p&sup1;&sup3;</i></sub> element with SHAKE-128,
    /// one double-width chunk of output per coefficient.
    #[inline]
    pub fn shake128(data: &[u8]) -> Self {
        let mut out = vec![0u8; 13*2*LIMBS*8];
        Shake128::digest_xof(data, &mut out);
        Self { v: core::array::from_fn(|i| BWFp::from_digest(&mut out[i*16*LIMBS..(i + 1)*16*LIMBS])) }
    }

    /// Hash input data into an <b>F</b><sub><i>p&sup1;&sup3;</i></sub> element with SHAKE-256.
    #[inline]
    pub fn shake256(data: &[u8]) -> Self {
        let mut out = vec![0u8; 13*2*LIMBS*8];
        Shake256::digest_xof(data, &mut out);
        Self { v: core::array::from_fn(|i| BWFp::from_digest(&mut out[i*16*LIMBS..(i + 1)*16*LIMBS])) }
    }

    /// The coefficients of this element.
    #[inline]
    pub fn coeffs(&self) -> &[BWFp<BW, LIMBS>; 13] {
        &self.v
    }

    /// Karatsuba product of degree-1 polynomials: 3 products, 3 coefficients.
    #[inline]
    fn kara2<L>(a: &[BWFp<BW, LIMBS>; 2], b: &[BWFp<BW, LIMBS>; 2], leaf: &L) -> [BWFpWide<BW, LIMBS>; 3]
        where L: Fn(&BWFp<BW, LIMBS>, &BWFp<BW, LIMBS>) -> BWFpWide<BW, LIMBS> {
        let d0 = leaf(&a[0], &b[0]);
        let d1 = leaf(&a[1], &b[1]);
        let e01 = leaf(&(a[0] + a[1]), &(b[0] + b[1]));
        [d0, e01 - d0 - d1, d1]
    }

    /// Karatsuba product of degree-2 polynomials: 6 products, 5 coefficients.
    #[inline]
    fn kara3<L>(a: &[BWFp<BW, LIMBS>; 3], b: &[BWFp<BW, LIMBS>; 3], leaf: &L) -> [BWFpWide<BW, LIMBS>; 5]
        where L: Fn(&BWFp<BW, LIMBS>, &BWFp<BW, LIMBS>) -> BWFpWide<BW, LIMBS> {
        let d0 = leaf(&a[0], &b[0]);
        let d1 = leaf(&a[1], &b[1]);
        let d2 = leaf(&a[2], &b[2]);
        let e01 = leaf(&(a[0] + a[1]), &(b[0] + b[1]));
        let e02 = leaf(&(a[0] + a[2]), &(b[0] + b[2]));
        let e12 = leaf(&(a[1] + a[2]), &(b[1] + b[2]));
        [
            d0,
            e01 - d0 - d1,
            e02 - d0 - d2 + d1,
            e12 - d1 - d2,
            d2,
        ]
    }

    /// Karatsuba product of degree-3 polynomials split as 2 + 2: 9 products, 7 coefficients.
    #[inline]
    fn kara4<L>(a: &[BWFp<BW, LIMBS>; 4], b: &[BWFp<BW, LIMBS>; 4], leaf: &L) -> [BWFpWide<BW, LIMBS>; 7]
        where L: Fn(&BWFp<BW, LIMBS>, &BWFp<BW, LIMBS>) -> BWFpWide<BW, LIMBS> {
        let lo = Self::kara2(&[a[0], a[1]], &[b[0], b[1]], leaf);
        let hi = Self::kara2(&[a[2], a[3]], &[b[2], b[3]], leaf);
        let mid = Self::kara2(&[a[0] + a[2], a[1] + a[3]], &[b[0] + b[2], b[1] + b[3]], leaf);
        let mut c = [BWFpWide::zero(); 7];
        for i in 0..3 {
            c[i] += lo[i];
            c[i + 2] += mid[i] - lo[i] - hi[i];
            c[i + 4] += hi[i];
        }
        c
    }

    /// Karatsuba product of degree-5 polynomials split as 3 + 3: 18 products, 11 coefficients.
    #[inline]
    fn kara6<L>(a: &[BWFp<BW, LIMBS>; 6], b: &[BWFp<BW, LIMBS>; 6], leaf: &L) -> [BWFpWide<BW, LIMBS>; 11]
        where L: Fn(&BWFp<BW, LIMBS>, &BWFp<BW, LIMBS>) -> BWFpWide<BW, LIMBS> {
        let lo = Self::kara3(&[a[0], a[1], a[2]], &[b[0], b[1], b[2]], leaf);
        let hi = Self::kara3(&[a[3], a[4], a[5]], &[b[3], b[4], b[5]], leaf);
        let mid = Self::kara3(
            &[a[0] + a[3], a[1] + a[4], a[2] + a[5]],
            &[b[0] + b[3], b[1] + b[4], b[2] + b[5]], leaf);
        let mut c = [BWFpWide::zero(); 11];
        for i in 0..5 {
            c[i] += lo[i];
            c[i + 3] += mid[i] - lo[i] - hi[i];
            c[i + 6] += hi[i];
        }
        c
    }

    /// Karatsuba product of degree-6 polynomials split as 3 + 4
    /// (the lower half padded with a zero coefficient): 24 products, 13 coefficients.
    #[inline]
    fn kara7<L>(a: &[BWFp<BW, LIMBS>; 7], b: &[BWFp<BW, LIMBS>; 7], leaf: &L) -> [BWFpWide<BW, LIMBS>; 13]
        where L: Fn(&BWFp<BW, LIMBS>, &BWFp<BW, LIMBS>) -> BWFpWide<BW, LIMBS> {
        let lo = Self::kara3(&[a[0], a[1], a[2]], &[b[0], b[1], b[2]], leaf);
        let hi = Self::kara4(&[a[3], a[4], a[5], a[6]], &[b[3], b[4], b[5], b[6]], leaf);
        let mid = Self::kara4(
            &[a[0] + a[3], a[1] + a[4], a[2] + a[5], a[6]],
            &[b[0] + b[3], b[1] + b[4], b[2] + b[5], b[6]], leaf);
        let mut c = [BWFpWide::zero(); 13];
        for i in 0..5 {
            c[i] += lo[i];
            c[i + 3] -= lo[i];
        }
        for i in 0..7 {
            c[i + 3] += mid[i] - hi[i];
            c[i + 6] += hi[i];
        }
        c
    }

    /// Karatsuba product in <b>F</b><sub><i>p&sup1;&sup3;</i></sub> split as 6 + 7,
    /// followed by reduction mod <i>z&sup1;&sup3; + 2</i>:
    /// 66 unreduced products and a single Montgomery reduction per output coefficient.
    #[inline]
    fn kara13<L>(a: &[BWFp<BW, LIMBS>; 13], b: &[BWFp<BW, LIMBS>; 13], leaf: &L) -> [BWFp<BW, LIMBS>; 13]
        where L: Fn(&BWFp<BW, LIMBS>, &BWFp<BW, LIMBS>) -> BWFpWide<BW, LIMBS> {
        let a0: [BWFp<BW, LIMBS>; 6] = core::array::from_fn(|i| a[i]);
        let b0: [BWFp<BW, LIMBS>; 6] = core::array::from_fn(|i| b[i]);
        let a1: [BWFp<BW, LIMBS>; 7] = core::array::from_fn(|i| a[i + 6]);
        let b1: [BWFp<BW, LIMBS>; 7] = core::array::from_fn(|i| b[i + 6]);
        let sa: [BWFp<BW, LIMBS>; 7] = core::array::from_fn(|i| if i < 6 { a[i] + a[i + 6] } else { a[12] });
        let sb: [BWFp<BW, LIMBS>; 7] = core::array::from_fn(|i| if i < 6 { b[i] + b[i + 6] } else { b[12] });

        let m = Self::kara6(&a0, &b0, leaf);  // A0*B0
        let mm = Self::kara7(&a1, &b1, leaf);  // A1*B1
        let mut mmm = Self::kara7(&sa, &sb, leaf);  // (A0 + A1)*(B0 + B1) - A0*B0 - A1*B1
        for i in 0..13 {
            mmm[i] -= mm[i];
        }
        for i in 0..11 {
            mmm[i] -= m[i];
        }

        // A*B = m + mmm*z^6 + mm*z^12, where z^13 = -2:
        let mut c = [BWFpWide::zero(); 13];
        for i in 0..6 {
            c[i] = m[i] - (mmm[i + 7] + mm[i + 1]).double();
        }
        for i in 6..11 {
            c[i] = m[i] + mmm[i - 6] - mm[i + 1].double();
        }
        c[11] = mmm[5] - mm[12].double();
        c[12] = mm[0] + mmm[6];
        core::array::from_fn(|i| c[i].reduce())
    }

    /// Compute <i>`self`</i><sup>(<i>p&#x1D4F;</i>)</sup>, the <i>k</i>-th conjugate
    /// of `self` over <b>F</b><sub><i>p</i></sub>, for any <i>k</i> (taken mod 13).
    ///
    /// Since <i>z<sup>p&#x1D4F;</sup></i> = <i>&omega;&#x1D4F;z</i>, the <i>i</i>-th coefficient
    /// is simply scaled by <i>&omega;<sup>ki</sup></i>.
    #[inline]
    pub fn frob(&self, k: usize) -> Self {
        let k = k % 13;
        let mut v = self.v;
        for i in 1..13 {
            let j = (k*i) % 13;
            v[i] = BWFp::from_slice(&BW::FROB[j*LIMBS..(j + 1)*LIMBS])*v[i];
        }
        Self { v }
    }

    /// Compute the product of all nontrivial conjugates of `self`, namely
    /// <i>`self`</i><sup><i>p + p&sup2; + ... + p&sup1;&sup2;</i></sup>,
    /// with 4 multiplications.
    #[inline]
    pub fn conj_prod(&self) -> Self {
        let e1 = self.frob(1);  // a^p
        let e2 = e1*e1.frob(1);  // a^(p + p^2)
        let e4 = e2*e2.frob(2);  // a^(p + ... + p^4)
        let e8 = e4*e4.frob(4);  // a^(p + ... + p^8)
        e8*e4.frob(8)  // a^(p + ... + p^12)
    }

    /// Constant coefficient of `self`&times;<i>c</i>, which is all there is to it
    /// when <i>c</i> is the product of the conjugates of `self`.
    #[inline]
    fn norm_with(&self, c: &Self) -> BWFp<BW, LIMBS> {
        let mut s = BWFpWide::zero();
        for i in 1..13 {
            s += self.v[i].mul_wide(&c.v[13 - i]);
        }
        (self.v[0].mul_wide(&c.v[0]) - s.double()).reduce()
    }

    /// Compute the norm of `self` over <b>F</b><sub><i>p</i></sub>, namely
    /// <i>`self`</i><sup>(<i>p&sup1;&sup3; - 1</i>)/(<i>p - 1</i>)</sup>.
    #[inline]
    pub fn norm(&self) -> BWFp<BW, LIMBS> {
        self.norm_with(&self.conj_prod())
    }

    /// Compute the inverse of `self`, or fail with a domain error if `self` is zero.
    #[inline]
    pub fn try_inv(&self) -> Result<Self, BWError> {
        if bool::from(self.is_zero()) {
            return Err(BWError::Domain("inversion of zero in F_{p^13}"));
        }
        Ok(self.inv())
    }

    /// Compute the inverse of a norm-1 element (e.g. any pairing value),
    /// which is simply the product of its nontrivial conjugates.
    #[inline]
    pub fn unitary_inv(&self) -> Self {
        self.conj_prod()
    }

    /// Determine if `self` is a square in <b>F</b><sub><i>p&sup1;&sup3;</i></sub>
    /// (zero is deemed a square).
    ///
    /// Since (<i>p&sup1;&sup3; - 1</i>)/(<i>p - 1</i>) is odd, <i>`self`</i> is a square
    /// if and only if its norm is a square in <b>F</b><sub><i>p</i></sub>.
    #[inline]
    pub fn is_square(&self) -> Choice {
        Choice::from((self.norm().legendre() >= 0) as u8)
    }

    /// Compute a square root of `self`, assuming `self` is a square
    /// (the result is meaningless otherwise).
    ///
    /// With <i>u</i> &#x2254; <i>`self`</i><sup>1 + p&sup2; + p&#x2074; + ... + p&sup1;&sup2;</sup>
    /// and <i>N</i> the norm of <i>`self`</i>, it holds that
    /// <i>u</i><sup><i>p</i> + 1</sup> = <i>N&times;`self`</i>, hence
    /// <i>u</i><sup>(<i>p</i> + 1)/2</sup>&times;<i>N</i><sup>-(<i>p</i> + 1)/4</sup>
    /// is a square root of <i>`self`</i> whenever <i>N</i> is a square.
    #[inline]
    pub fn sqrt(&self) -> Self {
        let p: Uint<LIMBS> = uint(BW::MODULUS);
        let c = self.conj_prod();
        let n = self.norm_with(&c);
        let a2 = *self*self.frob(2);  // a^(1 + p^2)
        let a6 = a2*a2.frob(4);  // a^(1 + p^2 + p^4 + p^6)
        let u = a6*a2.frob(8)*self.frob(12);  // a^(1 + p^2 + ... + p^12)
        let half = p.wrapping_add(&Uint::ONE) >> 1;  // (p + 1)/2
        n.inv().sqrt()*u.pow(&half)
    }

    /// Compute <i>`self`&#x1D4F;</i> in <b>F</b><sub><i>p&sup1;&sup3;</i></sub>.
    #[inline]
    pub fn pow(&self, k: &Uint<LIMBS>) -> Self {
        // prepare a table such that t[d] = v^d, where 0 <= d < 16:
        let mut t = [Self::one(); 16];
        t[1] = *self;
        for d in 1..8 {
            t[2*d] = t[d].sq();  // v^(2*d) = (v^d)^2
            t[2*d + 1] = t[2*d]*(*self);  // v^(2*d + 1) = (v^d)^2*v
        }

        // perform fixed-window raising to the exponent, one hex digit at a time:
        let mut v = Self::one();  // accumulator
        let x = k.as_words();  // exponent
        for j in (0..x.len() << 4).rev() {  // scan the exponent from most to least significant nybble
            v = v.sq().sq().sq().sq();  // raise the accumulator to the 16th
            let d = ((x[j >> 4] >> ((j & 0xF) << 2)) & 0xF) as usize;  // hex digit at index j
            // perform constant-time sequential search on t to extract t[d]:
            let mut w = Self::one();
            for e in 0..16 {  // t[] contains 16 serialized elements...
                w = Self::conditional_select(&w, &t[e], e.ct_eq(&d)); // ... (of which only the d-th is to be kept)
            }
            v *= w;  // accumulate t[d] into v
        }
        v
    }

    /// Compute <i>`self`</i><sup>|<i>x</i>|</sup> in <b>F</b><sub><i>p&sup1;&sup3;</i></sub>,
    /// where <i>x</i> is the BW13 curve seed.
    #[inline]
    pub(crate) fn pow_x(&self) -> Self {
        // the exponent (restricted to the curve seed) is fixed, public, and very sparse,
        // hence the square-and-multiply method suffices:
        let u = BW::U;  // presumed NOT to be in Montgomery form
        let bits = uint::<LIMBS>(u).bits() as usize;
        let mut r = *self;
        for j in (0..bits - 1).rev() {
            r = r.sq();
            if ((u[j >> 6] >> (j & 63)) & 1) == 1 {
                r *= *self;
            }
        }
        r
    }

    /// Compute <i>`self`</i><sup>(<i>p&sup1;&sup3; - 1</i>)/<i>r</i></sup>
    /// (up to a fixed power coprime to <i>r</i>), or fail if `self` is zero.
    #[inline]
    pub fn final_exp(&self) -> Result<Self, BWError> {
        // easy part: m^(p - 1)
        let m = self.frob(1)*self.try_inv()?;
        Ok(m.final_exp_hard())
    }

    /// Hard part of the final exponentiation, raising a norm-1 element to
    /// the power 3&times;&Phi;&#x2081;&#x2083;(<i>p</i>)/<i>r</i>
    /// with an addition chain in |<i>x</i>| and the Frobenius.
    ///
    /// Reference:
    ///
    /// * Diego F. Aranha et al.: RELIC is an Efficient LIbrary for Cryptography,
    /// https://github.com/relic-toolkit/relic (final exponentiation for BW curves of embedding degree 13).
    #[instrument(level = "trace", skip_all)]
    pub(crate) fn final_exp_hard(&self) -> Self {
        let a1 = *self;
        let mut t0_den = a1.pow_x();  // a^|x|
        let mut t11_num = t0_den.pow_x();  // a^(x^2)
        let mut t10_den = t11_num.pow_x();  // a^|x|^3
        let mut t11_den = t10_den.pow_x();  // a^(x^4)
        let mut t10_num = t11_den.pow_x();  // a^|x|^5
        let mut t12_num = t0_den*a1;
        let mut t12_den = t0_den*t10_den;
        t0_den = t12_num.sq();
        let mut t = t11_num.sq().sq();
        t12_num *= t;
        t = t11_den*t10_den;
        t11_den = t12_den*t;
        t10_den = t.sq();
        t = t10_num*t;
        for _ in 0..9 {
            t = t.pow_x();
        }
        let mut t0_num = t11_num*t;
        t = t.pow_x();
        t0_num *= t;
        t12_den = t.pow_x();
        t11_den *= t12_den;
        t = t12_den.pow_x();
        t10_num *= t;
        t = t.pow_x();
        t10_num *= t;

        // fold in the p-power terms:
        t11_den = t11_den.frob(1);
        t11_num = t11_num.frob(1);
        t12_den = t12_den.frob(2);
        t12_num = t12_num.frob(2);
        t10_den = t10_den*t11_den*t12_den;
        t10_num = t10_num*t11_num*t12_num;
        t = t10_den*t10_num.unitary_inv();

        t10_den = t.pow_x().pow_x().pow_x();
        t11_den = t10_den.pow_x().pow_x().pow_x();
        t12_den = t11_den.pow_x().pow_x().pow_x();
        t = t.frob(10);
        t10_den = t10_den.frob(7);
        t11_den = t11_den.frob(4);
        t12_num = a1.cb();
        t12_den = (t12_den*t12_num).frob(1);
        t = t*t10_den*t11_den*t12_den;
        t*t0_num.unitary_inv()*t0_den
    }

    /// Determine if `self` is a member of the order-<i>r</i> subgroup
    /// <i><b>G</b><sub>T</sub></i> of <b>F</b><sub><i>p&sup1;&sup3;</i></sub><sup>&times;</sup>,
    /// excluding the trivial element 1.
    ///
    /// The test checks that <i>`self`</i> has norm 1 over <b>F</b><sub><i>p</i></sub>, and that
    /// <i>`self`</i><sup><i>x&sup2;</i> - <i>xp</i> + <i>p&sup2;</i></sup> = <i>1</i>,
    /// which only holds for elements of order <i>r</i> in the cyclotomic subgroup.
    ///
    /// Reference:
    ///
    /// * Yu Dai, Fangguo Zhang, Chang-an Zhao:
    /// "Fast subgroup membership testings for G1, G2 and GT on pairing-friendly curves."
    /// <i>Designs, Codes and Cryptography</i>, vol. 91, pp. 3141--3166, Springer, 2023.
    /// https://doi.org/10.1007/s10623-023-01223-7
    pub fn is_valid_gt(&self) -> bool {
        if bool::from(self.is_zero() | self.is_one()) {
            trace!("GT candidate rejected: trivial element");
            return false;
        }
        if !bool::from(self.norm().is_one()) {
            trace!("GT candidate rejected: norm is not 1");
            return false;
        }
        let u0 = self.pow_x();  // a^|x|
        let u1 = u0.pow_x();  // a^(x^2)
        let ok = bool::from((u1*u0.frob(1)*self.frob(2)).is_one());
        if !ok {
            trace!("GT candidate rejected: not of order r");
        }
        ok
    }

    /// Convert `self` to byte array representation, coefficient by coefficient.
    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(13*LIMBS*8);
        for vi in &self.v {
            bytes.append(&mut vi.to_bytes());
        }
        bytes
    }
}

impl<BW: BWParam, const LIMBS: usize> Add for BWFp13<BW, LIMBS> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut val = self;
        val += rhs;
        val
    }
}

impl<BW: BWParam, const LIMBS: usize> AddAssign for BWFp13<BW, LIMBS> {
    fn add_assign(&mut self, rhs: Self) {
        for i in 0..13 {
            self.v[i] += rhs.v[i];
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> BWField for BWFp13<BW, LIMBS> {
    /// Convert `self` to byte array representation.
    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        BWFp13::to_bytes(self)
    }

    /// Compute the value of twice this element.
    #[inline]
    fn double(&self) -> Self {
        Self { v: core::array::from_fn(|i| self.v[i].double()) }
    }

    /// Compute the value of half this element.
    #[inline]
    fn half(&self) -> Self {
        Self { v: core::array::from_fn(|i| self.v[i].half()) }
    }

    /// Compute the square of this element, with the same Karatsuba decomposition
    /// as the product, but squarings at the leaves.
    #[inline]
    fn sq(&self) -> Self {
        Self { v: Self::kara13(&self.v, &self.v, &|x: &BWFp<BW, LIMBS>, _: &BWFp<BW, LIMBS>| x.sq_wide()) }
    }

    /// Compute the cube of this element.
    #[inline]
    fn cb(&self) -> Self {
        self.sq()*(*self)
    }

    /// Compute the inverse of this element (or 0, if this element is itself 0)
    /// via the norm map: <i>`self`&#8315;&sup1;</i> = <i>N&#8315;&sup1;</i>&times;<i>`self`</i><sup><i>p + ... + p&sup1;&sup2;</i></sup>.
    #[inline]
    fn inv(&self) -> Self {
        let c = self.conj_prod();
        self.norm_with(&c).inv()*c
    }
}

impl<BW: BWParam, const LIMBS: usize> Clone for BWFp13<BW, LIMBS> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<BW: BWParam, const LIMBS: usize> ConditionallySelectable for BWFp13<BW, LIMBS> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self { v: core::array::from_fn(|i| BWFp::conditional_select(&a.v[i], &b.v[i], choice)) }
    }
}

impl<BW: BWParam, const LIMBS: usize> ConstantTimeEq for BWFp13<BW, LIMBS> {
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut eq = Choice::from(1);
        for i in 0..13 {
            eq &= self.v[i].ct_eq(&other.v[i]);
        }
        eq
    }
}

impl<BW: BWParam, const LIMBS: usize> Copy for BWFp13<BW, LIMBS> {}

impl<BW: BWParam, const LIMBS: usize> Debug for BWFp13<BW, LIMBS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self, f)
    }
}

impl<BW: BWParam, const LIMBS: usize> Display for BWFp13<BW, LIMBS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut high = Choice::from(0);
        for i in 1..13 {
            high |= !self.v[i].is_zero();
        }
        if !bool::from(high) {
            // element in F_p:
            return write!(f, "{}", self.v[0]);
        }
        write!(f, "({})", self.v[0])?;
        write!(f, " + ({})*z", self.v[1])?;
        for i in 2..13 {
            write!(f, " + ({})*z^{}", self.v[i], i)?;
        }
        Ok(())
    }
}

impl<BW: BWParam, const LIMBS: usize> Mul for BWFp13<BW, LIMBS> {
    type Output = Self;

    /// Compute a product in <b>F</b><sub><i>p&sup1;&sup3;</i></sub>.
    fn mul(self, rhs: Self) -> Self::Output {
        let mut val = self;
        val *= rhs;
        val
    }
}

impl<BW: BWParam, const LIMBS: usize> Mul<BWFp13<BW, LIMBS>> for Word {
    type Output = BWFp13<BW, LIMBS>;

    /// Compute the product of a small integer left factor
    /// by a right factor from <b>F</b><sub><i>p&sup1;&sup3;</i></sub>.
    fn mul(self, rhs: BWFp13<BW, LIMBS>) -> Self::Output {
        Self::Output { v: core::array::from_fn(|i| self*rhs.v[i]) }
    }
}

impl<BW: BWParam, const LIMBS: usize> Mul<BWFp13<BW, LIMBS>> for BWFp<BW, LIMBS> {
    type Output = BWFp13<BW, LIMBS>;

    /// Compute the product of a left factor from <i><b>F</b><sub>p</sub></i>
    /// by a right factor from <b>F</b><sub><i>p&sup1;&sup3;</i></sub>.
    fn mul(self, rhs: BWFp13<BW, LIMBS>) -> Self::Output {
        Self::Output { v: core::array::from_fn(|i| self*rhs.v[i]) }
    }
}

impl<BW: BWParam, const LIMBS: usize> MulAssign for BWFp13<BW, LIMBS> {
    fn mul_assign(&mut self, rhs: Self) {
        self.v = Self::kara13(&self.v, &rhs.v, &|x: &BWFp<BW, LIMBS>, y: &BWFp<BW, LIMBS>| x.mul_wide(y));
    }
}

impl<BW: BWParam, const LIMBS: usize> Neg for BWFp13<BW, LIMBS> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::Output { v: core::array::from_fn(|i| -self.v[i]) }
    }
}

impl<BW: BWParam, const LIMBS: usize> One for BWFp13<BW, LIMBS> {
    #[inline]
    fn one() -> Self {
        Self::from_base(BWFp::one())
    }

    fn is_one(&self) -> Choice {
        let mut one = self.v[0].is_one();
        for i in 1..13 {
            one &= self.v[i].is_zero();
        }
        one
    }
}

impl<BW: BWParam, const LIMBS: usize> PartialEq for BWFp13<BW, LIMBS> {
    fn eq(&self, other: &Self) -> bool { self.ct_eq(&other).into() }
}

impl<BW: BWParam, const LIMBS: usize> Random for BWFp13<BW, LIMBS> {
    /// Pick a uniform element from <b>F</b><sub><i>p&sup1;&sup3;</i></sub> by rejection sampling.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut v = [BWFp::zero(); 13];
        for vi in &mut v {
            *vi = BWFp::random(rng);
        }
        Self { v }
    }

    /// Try to pick a uniform element from <b>F</b><sub><i>p&sup1;&sup3;</i></sub> by rejection sampling.
    fn try_random<R: TryRngCore + ?Sized>(rng: &mut R) -> Result<Self, <R as TryRngCore>::Error> where R: TryRngCore {
        let mut v = [BWFp::zero(); 13];
        for vi in &mut v {
            *vi = BWFp::try_random(rng)?;
        }
        Ok(Self { v })
    }
}

impl<BW: BWParam, const LIMBS: usize> Sub for BWFp13<BW, LIMBS> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut val = self;
        val -= rhs;
        val
    }
}

impl<BW: BWParam, const LIMBS: usize> SubAssign for BWFp13<BW, LIMBS> {
    fn sub_assign(&mut self, rhs: Self) {
        for i in 0..13 {
            self.v[i] -= rhs.v[i];
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> Zero for BWFp13<BW, LIMBS> {
    fn zero() -> Self {
        Self { v: [BWFp::zero(); 13] }
    }

    fn is_zero(&self) -> Choice {
        let mut zero = Choice::from(1);
        for i in 0..13 {
            zero &= self.v[i].is_zero();
        }
        zero
    }

    fn set_zero(&mut self) {
        for vi in &mut self.v {
            vi.set_zero();
        }
    }
}


#[cfg(test)]
mod tests {
    use crate::bwparam::BW13P310Param;
    use crypto_bigint::rand_core::RngCore;
    use std::time::SystemTime;
    use super::*;

    const TESTS: usize = 100;

    /// Reference product: schoolbook convolution reduced mod z^13 + 2.
    fn schoolbook<BW: BWParam, const LIMBS: usize>(a: &BWFp13<BW, LIMBS>, b: &BWFp13<BW, LIMBS>) -> BWFp13<BW, LIMBS> {
        let mut w = [BWFp::zero(); 25];
        for i in 0..13 {
            for j in 0..13 {
                w[i + j] += a.v[i]*b.v[j];
            }
        }
        let mut c = [BWFp::zero(); 13];
        c.copy_from_slice(&w[0..13]);
        for i in 13..25 {
            c[i - 13] -= w[i].double();
        }
        BWFp13::from(c)
    }

    /// General BWFp13 test template.
    #[allow(non_snake_case)]
    fn BWFp13_test<BW: BWParam, const LIMBS: usize>() {
        let mut rng = rand::rng();
        let p: Uint<LIMBS> = uint(BW::MODULUS);
        let r: Uint<LIMBS> = uint(BW::ORDER);

        println!();
        println!("Performing {} BW13-P{:03}Fp13 test(s)...", TESTS, p.bits());
        let now = SystemTime::now();

        // neutral elements:
        assert!(bool::from(BWFp13::<BW, LIMBS>::zero().is_zero()));
        assert!(bool::from(BWFp13::<BW, LIMBS>::one().is_one()));

        // inversion of zero:
        assert!(bool::from(BWFp13::<BW, LIMBS>::zero().inv().is_zero()));
        assert!(matches!(BWFp13::<BW, LIMBS>::zero().try_inv(), Err(BWError::Domain(_))));
        assert!(BWFp13::<BW, LIMBS>::zero().final_exp().is_err());

        // the Frobenius constant satisfies z^p = ω*z:
        let mut zv = [BWFp::zero(); 13];
        zv[1] = BWFp::one();
        let z = BWFp13::<BW, LIMBS>::from(zv);
        assert_eq!(z.frob(1), z.pow(&p));

        for _t in 0..TESTS {
            let e13: BWFp13<BW, LIMBS> = BWFp13::random(&mut rng);
            assert_eq!(e13 + BWFp13::zero(), e13);
            assert_eq!(e13*BWFp13::one(), e13);
            let e1: BWFp<BW, LIMBS> = BWFp::random(&mut rng);
            let mut v = [BWFp::zero(); 13];
            v[0] = e1;
            assert_eq!(BWFp13::from_base(e1), BWFp13::from(v));

            // addition vs subtraction:
            assert!(bool::from((e13 - e13).is_zero()));
            assert!(bool::from((e13 + (-e13)).is_zero()));

            // double and half:
            assert_eq!(e13.double().half(), e13);
            assert_eq!(e13.half().double(), e13);
            assert_eq!(e13.double()*e13.half(), e13.sq());

            // Karatsuba vs schoolbook:
            let f13: BWFp13<BW, LIMBS> = BWFp13::random(&mut rng);
            assert_eq!(e13*f13, schoolbook(&e13, &f13));
            assert_eq!(e13.sq(), schoolbook(&e13, &e13));

            // square and cube:
            assert_eq!(e13.sq(), e13*e13);
            assert_eq!(e13.cb(), e13*e13*e13);

            // field inversion:
            assert!(bool::from((e13*e13.inv()).is_one()));
            assert_eq!(e13.try_inv().unwrap(), e13.inv());

            // Frobenius order and composition:
            let mut fe = e13;
            for _ in 0..13 {
                fe = fe.frob(1);
            }
            assert_eq!(fe, e13);
            let j = (rng.next_u32() % 13) as usize;
            let k = (rng.next_u32() % 13) as usize;
            assert_eq!(e13.frob(j).frob(k), e13.frob(j + k));
            assert_eq!((e13*f13).frob(k), e13.frob(k)*f13.frob(k));

            // norm:
            let n13 = e13.norm();
            assert_eq!(e13*e13.conj_prod(), BWFp13::from_base(n13));
            assert_eq!((e13*f13).norm(), n13*f13.norm());

            // subring multiplication (Word*BWFp13, BWFp*BWFp13):
            let k13: Word = rng.next_u64() & 0xF;
            assert_eq!(k13*e13, BWFp::from_word(k13)*e13);
            assert_eq!(e1*e13, BWFp13::from_base(e1)*e13);

            // squares and square roots:
            let s13 = e13.sq();
            assert!(bool::from(s13.is_square()));
            assert_eq!(s13.sqrt().sq(), s13);
            if bool::from(e13.is_square()) {
                assert_eq!(e13.sqrt().sq(), e13);
            } else {
                assert!(!bool::from((e13*s13).is_square()));
            }

            // commutativity, associativity, distributivity:
            let g13: BWFp13<BW, LIMBS> = BWFp13::random(&mut rng);
            assert_eq!(e13 + f13, f13 + e13);
            assert_eq!(e13*f13, f13*e13);
            assert_eq!((e13 + f13) + g13, e13 + (f13 + g13));
            assert_eq!((e13*f13)*g13, e13*(f13*g13));
            assert_eq!(e13*(f13 + g13), e13*f13 + e13*g13);

            // exponentiation:
            let mut w = [0 as Word; LIMBS];
            w[0] = BW::U[0];
            assert_eq!(e13.pow_x(), e13.pow(&Uint::from_words(w)));
            let k1: Uint<LIMBS> = Uint::from_word(rng.next_u64());
            let k2: Uint<LIMBS> = Uint::from_word(rng.next_u64());
            assert_eq!(e13.pow(&k1)*e13.pow(&k2), e13.pow(&k1.wrapping_add(&k2)));
        }

        // hashing:
        assert_eq!(BWFp13::<BW, LIMBS>::shake128(b"abc"), BWFp13::shake128(b"abc"));
        assert_ne!(BWFp13::<BW, LIMBS>::shake128(b"abc"), BWFp13::shake256(b"abc"));
        assert_eq!(BWFp13::<BW, LIMBS>::shake256(b"abc").to_bytes().len(), 13*LIMBS*8);

        // the target group:
        for _t in 0..10 {
            let g = BWFp13::<BW, LIMBS>::random(&mut rng).final_exp().unwrap();
            assert!(bool::from(g.norm().is_one()));
            assert!(bool::from(g.pow(&r).is_one()));
            assert!(bool::from((g*g.unitary_inv()).is_one()));
            assert!(g.is_valid_gt());
            assert!(!(g*BWFp13::from_base(BWFp::from_word(2))).is_valid_gt());
            let h: BWFp13<BW, LIMBS> = BWFp13::random(&mut rng);
            assert!(!h.is_valid_gt());
            // cyclotomic but not of order r:
            let c = h.frob(1)*h.inv();
            assert!(bool::from(c.norm().is_one()));
            assert!(!c.is_valid_gt());
        }
        assert!(!BWFp13::<BW, LIMBS>::one().is_valid_gt());
        assert!(!BWFp13::<BW, LIMBS>::zero().is_valid_gt());

        match now.elapsed() {
            Ok(elapsed) => {
                println!("Elapsed time: {} ms.", (elapsed.as_micros() as f64)/1000.0);
            }
            Err(e) => {
                println!("Error: {e:?}");
            }
        }
    }

    #[test]
    #[allow(non_snake_case)]
    fn BW13P310Fp13_test() {
        const LIMBS: usize = BW13P310Param::LIMBS;
        BWFp13_test::<BW13P310Param, LIMBS>();
    }

}
