#[cfg(not(any(target_pointer_width = "64")))]
compile_error!("this crate requires 64-bit limbs");

use crate::bwfp::BWFp;
use crate::bwfp13::BWFp13;
use crate::bwparam::{uint, BWParam};
use crate::bwzn::BWZn;
use crate::errors::BWError;
use crate::traits::{BWField, One};
use crypto_bigint::{Random, Uint, Word, Zero};
use crypto_bigint::subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use crypto_bigint::rand_core::{RngCore, TryRngCore};
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use tracing::{instrument, trace};

/// A point on the BW13 curve over the extension field,
/// <i>E/<b>F</b><sub>p&sup1;&sup3;</sub>: Y&sup2;Z = X&sup3; + bZ&sup3;</i>,
/// in homogeneous projective coordinates.
///
/// The pairing group <i><b>G</b>&#x2082;</i> is the order-<i>r</i> subgroup of the trace-zero
/// subgroup of <i>E</i>(<b>F</b><sub><i>p&sup1;&sup3;</i></sub>), on which the endomorphism
/// <i>&psi;</i> acts as multiplication by -<i>x</i>.
pub struct BWPoint13<BW: BWParam, const LIMBS: usize> {
    pub(crate) x: BWFp13<BW, LIMBS>,
    pub(crate) y: BWFp13<BW, LIMBS>,
    pub(crate) z: BWFp13<BW, LIMBS>,
}

pub type BW13P310Point13 = BWPoint13<crate::bwparam::BW13P310Param, 5>;


impl<BW: BWParam, const LIMBS: usize> BWPoint13<BW, LIMBS> {

    /// Determine if given projective coordinates <i>X</i>, <i>Y</i>, and <i>Z</i>
    /// specify a point on <i>E/<b>F</b><sub>p&sup1;&sup3;</sub>: Y&sup2;Z = X&sup3; + bZ&sup3;</i>.
    #[inline]
    pub fn is_point(x: BWFp13<BW, LIMBS>, y: BWFp13<BW, LIMBS>, z: BWFp13<BW, LIMBS>) -> Choice {
        (y.sq()*z).ct_eq(&(x.cb() + BWFp::from_i64(BW::CURVE_B)*z.cb()))
    }

    /// Create a normalized point from given affine coordinates <i>x</i> and <i>y</i>.
    #[inline]
    pub fn from_affine(x: BWFp13<BW, LIMBS>, y: BWFp13<BW, LIMBS>) -> Result<Self, BWError> {
        if !bool::from(Self::is_point(x, y, BWFp13::one())) {
            return Err(BWError::Domain("affine coordinates do not satisfy the curve equation"));
        }
        Ok(Self { x, y, z: BWFp13::one() })
    }

    /// Create a point from given projective coordinates <i>X</i>, <i>Y</i>, and <i>Z</i>.
    #[inline]
    pub fn from_proj(x: BWFp13<BW, LIMBS>, y: BWFp13<BW, LIMBS>, z: BWFp13<BW, LIMBS>) -> Result<Self, BWError> {
        if !bool::from(Self::is_point(x, y, z)) || bool::from(x.is_zero() & y.is_zero()) {
            return Err(BWError::Domain("projective coordinates do not satisfy the curve equation"));
        }
        Ok(Self { x, y, z })
    }

    /// Embed a point of <i>E</i>(<b>F</b><sub><i>p</i></sub>) into <i>E</i>(<b>F</b><sub><i>p&sup1;&sup3;</i></sub>).
    #[inline]
    pub fn from_base(x: BWFp<BW, LIMBS>, y: BWFp<BW, LIMBS>, z: BWFp<BW, LIMBS>) -> Self {
        Self { x: BWFp13::from_base(x), y: BWFp13::from_base(y), z: BWFp13::from_base(z) }
    }

    /// Create an instance of the default generator of <i><b>G</b>&#x2082;</i>.
    #[inline]
    pub fn default_generator() -> Self {
        Self {
            x: BWFp13::from_slice(BW::GEN2_X),
            y: BWFp13::from_slice(BW::GEN2_Y),
            z: BWFp13::one(),
        }
    }

    /// Hash input data into a point on <i><b>G</b>&#x2082;</i> with SHAKE-128.
    #[instrument(level = "trace", skip_all, fields(len = data.len()))]
    pub fn shake128(data: &[u8]) -> Self {
        Self::point_factory(BWFp::shake128(data)).clear_cofactor()
    }

    /// Hash input data into a point on <i><b>G</b>&#x2082;</i> with SHAKE-256.
    #[instrument(level = "trace", skip_all, fields(len = data.len()))]
    pub fn shake256(data: &[u8]) -> Self {
        Self::point_factory(BWFp::shake256(data)).clear_cofactor()
    }

    /// Hash a message to <i><b>G</b>&#x2082;</i> with the default hash function, SHAKE-256.
    /// The result is always cofactor-cleared.
    #[inline]
    pub fn hash_to_g2(data: &[u8]) -> Self {
        Self::shake256(data)
    }

    /// Compute a normalized (i.e. affine) point equivalent to this.
    #[inline]
    pub(crate) fn normalize(&self) -> Self {
        let ch = self.z.is_zero();
        let inv = BWFp13::conditional_select(&self.z, &self.y, ch).inv();
        Self {
            x: self.x*inv,
            y: self.y*inv,
            z: BWFp13::conditional_select(&BWFp13::one(), &BWFp13::zero(), ch),
        }
    }

    /// Affine coordinates (<i>x</i>, <i>y</i>) of this point, or `None` for the point at infinity.
    #[inline]
    pub fn affine(&self) -> Option<(BWFp13<BW, LIMBS>, BWFp13<BW, LIMBS>)> {
        if bool::from(self.z.is_zero()) {
            return None;
        }
        let n = self.normalize();
        Some((n.x, n.y))
    }

    /// Compute <i>&lbrack;2&#x1D57;&rbrack;Q</i> (i.e. double <i>t</i> times)
    /// via complete elliptic point doubling.
    #[inline]
    pub fn double(&self, t: usize) -> Self {
        let mut d = *self;
        d.double_self(t);
        d
    }

    /// Compute <i>&lbrack;2&#x1D57;&rbrack;Q</i> in place via complete elliptic point doubling.
    ///
    /// Reference:
    ///
    /// *; Joost Renes, Craig Costello, Lejla Batina:
    /// <a href="https://link.springer.com/content/pdf/10.1007/978-3-662-49890-3_16">
    /// "Complete addition formulas for prime order elliptic curves"</a>
    /// (Algorithm 9), Eurocrypt 2016, LNCS 9665 (part I), pp. 403--428, Springer, 2016.
    #[inline]
    pub(crate) fn double_self(&mut self, t: usize) {
        let b3 = BWFp::<BW, LIMBS>::from_i64(3*BW::CURVE_B);
        let mut x = self.x;
        let mut y = self.y;
        let mut z = self.z;

        let mut t0: BWFp13<BW, LIMBS>;
        let mut t1: BWFp13<BW, LIMBS>;
        let mut t2: BWFp13<BW, LIMBS>;
        let mut x3: BWFp13<BW, LIMBS>;
        let mut y3: BWFp13<BW, LIMBS>;
        let mut z3: BWFp13<BW, LIMBS>;

        for _ in 0..t {
            t0 = y.sq();
            z3 = t0 + t0;
            z3 = z3 + z3;

            z3 = z3 + z3;
            t1 = y*z;
            t2 = z.sq();

            t2 = b3*t2;
            x3 = t2*z3;
            y3 = t0 + t2;

            z3 = t1*z3;
            t1 = t2 + t2;
            t2 = t1 + t2;

            t0 = t0 - t2;
            y3 = t0*y3;
            y3 = x3 + y3;

            t1 = x*y;
            x3 = t0*t1;
            x3 = x3 + x3;

            x = x3;
            y = y3;
            z = z3;
        }
        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Mixed addition of this projective point and an affine point (<i>x&#x2082;</i>, <i>y&#x2082;</i>),
    /// which must not be the point at infinity.
    ///
    /// Reference:
    ///
    /// *; Joost Renes, Craig Costello, Lejla Batina:
    /// <a href="https://link.springer.com/content/pdf/10.1007/978-3-662-49890-3_16">
    /// "Complete addition formulas for prime order elliptic curves"</a>
    /// (Algorithm 8), Eurocrypt 2016, LNCS 9665 (part I), pp. 403--428, Springer, 2016.
    pub fn add_affine(&self, x2: &BWFp13<BW, LIMBS>, y2: &BWFp13<BW, LIMBS>) -> Self {
        let b3 = BWFp::<BW, LIMBS>::from_i64(3*BW::CURVE_B);
        let (x1, y1, z1) = (self.x, self.y, self.z);

        let mut t0 = x1*(*x2);
        let mut t1 = y1*(*y2);
        let mut t3 = *x2 + *y2;

        let mut t4 = x1 + y1;
        t3 = t3*t4;
        t4 = t0 + t1;

        t3 = t3 - t4;
        t4 = (*y2)*z1;
        t4 = t4 + y1;

        let mut y3 = (*x2)*z1;
        y3 = y3 + x1;
        let mut x3 = t0 + t0;

        t0 = x3 + t0;
        let mut t2 = b3*z1;
        let mut z3 = t1 + t2;

        t1 = t1 - t2;
        y3 = b3*y3;
        x3 = t4*y3;

        t2 = t3*t1;
        x3 = t2 - x3;
        y3 = y3*t0;

        t1 = t1*z3;
        y3 = t1 + y3;
        t0 = t0*t3;

        z3 = z3*t4;
        z3 = z3 + t0;

        Self { x: x3, y: y3, z: z3 }
    }

    /// The Frobenius map <i>&pi;&#x1D4F;</i>(<i>X</i> : <i>Y</i> : <i>Z</i>) =
    /// (<i>X<sup>p&#x1D4F;</sup></i> : <i>Y<sup>p&#x1D4F;</sup></i> : <i>Z<sup>p&#x1D4F;</sup></i>).
    #[inline]
    pub fn frob(&self, k: usize) -> Self {
        Self { x: self.x.frob(k), y: self.y.frob(k), z: self.z.frob(k) }
    }

    /// The endomorphism <i>&psi;</i>(<i>x</i>, <i>y</i>) = (<i>&beta;&sup2;x<sup>p</sup></i>, <i>y<sup>p</sup></i>),
    /// which satisfies <i>&psi;</i>(<i>Q</i>) = &lbrack;-<i>x</i>&rbrack;<i>Q</i> on <i><b>G</b>&#x2082;</i>.
    #[inline]
    pub fn psi(&self) -> Self {
        let beta = BWFp::<BW, LIMBS>::from_slice(BW::SVDW);
        Self {
            x: beta.sq()*self.x.frob(1),
            y: self.y.frob(1),
            z: self.z.frob(1),
        }
    }

    /// Compute <i>&lbrack;x&rbrack;</i>`self` for the (negative) BW13 curve seed <i>x</i>.
    #[inline]
    pub(crate) fn mul_x(&self) -> Self {
        let u = BW::U;
        let bits = uint::<LIMBS>(u).bits() as usize;
        let mut v = *self;
        for j in (0..bits - 1).rev() {
            v.double_self(1);
            if ((u[j >> 6] >> (j & 63)) & 1) == 1 {
                v += *self;
            }
        }
        -v
    }

    /// Multiply this point by a non-negative integer of any length given as
    /// a little-endian word slice, via isochronous fixed-window multiplication.
    pub fn mul_words(&self, k: &[Word]) -> Self {
        // prepare a table such that t[d] = d*Q, where 0 <= d < 16:
        let mut t = [Self::zero(); 16];
        t[1] = *self;
        for d in 1..8 {
            t[2*d] = t[d].double(1);  // (2*d)*Q = 2*(d*Q)
            t[2*d + 1] = t[2*d] + *self;  // (2*d + 1)*Q = 2*(d*Q) + Q
        }

        // perform fixed-window multiplication, one hex digit at a time:
        let mut v = Self::zero();
        for j in (0..k.len() << 4).rev() {
            v.double_self(4);
            let d = ((k[j >> 4] >> ((j & 0xF) << 2)) & 0xF) as usize;  // hex digit at index j
            let mut w = Self::zero();
            for e in 0..16 {
                w = Self::conditional_select(&w, &t[e], e.ct_eq(&d));
            }
            v += w;
        }
        v
    }

    /// Multiply a point of <i><b>G</b>&#x2082;</i> by a scalar, writing the scalar in base |<i>x</i>|
    /// and replacing each power of |<i>x</i>| by the corresponding power of <i>&psi;</i>.
    ///
    /// NB: the result is only meaningful for points of <i><b>G</b>&#x2082;</i>; use `mul_words`
    /// or the `Mul` operators for arbitrary curve points.
    pub fn mul_glv(&self, k: &BWZn<BW, LIMBS>) -> Self {
        let u = BW::U[0];  // the seed fits a single word
        let r: Uint<LIMBS> = uint(BW::ORDER);
        // number of base-|x| digits of a scalar mod r:
        let mut rw = r.to_words();
        let mut n = 0;
        while rw.iter().any(|&w| w != 0) {
            div_word(&mut rw, u);
            n += 1;
        }
        let mut kw = k.to_uint().to_words();
        let digits: Vec<Word> = (0..n).map(|_| div_word(&mut kw, u)).collect();

        // psi^i(Q) = [|x|^i]Q:
        let mut pts = Vec::with_capacity(n);
        let mut q = *self;
        for _ in 0..n {
            pts.push(q);
            q = q.psi();
        }

        // joint double-and-add over the digit bits, with isochronous selection:
        let bits = (Word::BITS - u.leading_zeros()) as usize;
        let mut v = Self::zero();
        for j in (0..bits).rev() {
            v.double_self(1);
            for i in 0..n {
                let bit = Choice::from(((digits[i] >> j) & 1) as u8);
                v += Self::conditional_select(&Self::zero(), &pts[i], bit);
            }
        }
        v
    }

    /// Map this point of <i>E</i>(<b>F</b><sub><i>p&sup1;&sup3;</i></sub>) to <i><b>G</b>&#x2082;</i>,
    /// computing &lbrack;<i>h'</i>&rbrack;(<i>&pi;</i>(<i>Q</i>) - <i>Q</i>):
    /// the map <i>Q</i> &mapsto; <i>&pi;</i>(<i>Q</i>) - <i>Q</i> lands in the trace-zero subgroup,
    /// whose order is <i>h'r</i>.
    #[instrument(level = "trace", skip_all)]
    pub fn clear_cofactor(&self) -> Self {
        (self.frob(1) - *self).mul_words(BW::COFACTOR_G2)
    }

    /// Map a field element <i>t &in; <b>F</b><sub>p</sub></i> to a point of
    /// <i>E</i>(<b>F</b><sub><i>p&sup1;&sup3;</i></sub>) (not yet in <i><b>G</b>&#x2082;</i>)
    /// with the Shallue-van de Woestijne map as specialized by Fouque and Tibouchi,
    /// applied to <i>u</i> = <i>tz</i>.
    /// The exceptional input <i>t</i> = 0 maps to the point at infinity.
    ///
    /// Reference:
    ///
    /// *; Pierre-Alain Fouque, Mehdi Tibouchi:
    /// "Indifferentiable hashing to Barreto-Naehrig curves."
    /// In: Hevia, A., Neven, G. (eds.), <i>Progress in Cryptology -- LATINCRYPT 2012</i>,
    /// Lecture Notes in Computer Science, vol. 7533, pp. 1--17. Springer, 2012.
    /// https://doi.org/10.1007/978-3-642-33481-8_1
    pub fn point_factory(t: BWFp<BW, LIMBS>) -> Self {
        let one = BWFp13::one();
        let b = BWFp13::from_base(BWFp::from_i64(BW::CURVE_B));
        let mut uv = [BWFp::zero(); 13];
        uv[1] = t;
        let u = BWFp13::from(uv);  // u = t*z
        let num = BWFp::from_slice(BW::SQRT_NEG_3)*u;  // sqrt(-3)*u
        let den = one + b + u.sq();  // 1 + b + u^2
        // Montgomery's trick: a single inversion yields both w and 1/w
        let monty = (num*den).inv();
        let w = num.sq()*monty;  // sqrt(-3)*u/(1 + b + u^2)
        let inv_w = den.sq()*monty;

        // candidate x-coordinates:
        let x1 = BWFp13::from_base(BWFp::from_slice(BW::SVDW)) - u*w;
        let x2 = -(one + x1);
        let x3 = one + inv_w.sq();

        let g1 = x1.cb() + b;
        let g2 = x2.cb() + b;
        let g3 = x3.cb() + b;
        let (s1, s2, s3) = (g1.is_square(), g2.is_square(), g3.is_square());

        // constant-time search for the first candidate yielding a square:
        let mut xc = x3;
        let mut gc = g3;
        xc = BWFp13::conditional_select(&xc, &x2, s2);
        gc = BWFp13::conditional_select(&gc, &g2, s2);
        xc = BWFp13::conditional_select(&xc, &x1, s1);
        gc = BWFp13::conditional_select(&gc, &g1, s1);
        let found = s1 | s2 | s3;
        trace!(first = bool::from(s1), second = bool::from(s2), found = bool::from(found), "hash candidate selection");

        let mut y = gc.sqrt();
        y = BWFp13::conditional_select(&y, &(-y), t.legendre().ct_eq(&-1));
        let pt = Self { x: xc, y, z: one };
        Self::conditional_select(&Self::zero(), &pt, found)
    }

    /// Determine if this point belongs to <i><b>G</b>&#x2082;</i>, checking that
    /// <i>&psi;</i>(<i>Q</i>) = &lbrack;-<i>x</i>&rbrack;<i>Q</i> and that <i>Q</i>
    /// lies in the trace-zero subgroup, i.e. <i>Q</i> + <i>&pi;</i>(<i>Q</i>) + ... + <i>&pi;&sup1;&sup2;</i>(<i>Q</i>) = <i>O</i>.
    pub fn is_valid_g2(&self) -> bool {
        if bool::from(self.is_zero()) {
            trace!("G2 candidate rejected: point at infinity");
            return false;
        }
        if !bool::from(Self::is_point(self.x, self.y, self.z)) {
            trace!("G2 candidate rejected: not on the curve");
            return false;
        }
        if -self.mul_x() != self.psi() {
            trace!("G2 candidate rejected: psi eigenvalue mismatch");
            return false;
        }
        // trace: pi + pi^2 + ... + pi^12 = -1
        let v0 = self.frob(1) + self.frob(2);  // pi + pi^2
        let v1 = v0 + v0.frob(2);  // pi + ... + pi^4
        let v2 = v1.frob(4);  // pi^5 + ... + pi^8
        let v3 = v2.frob(4);  // pi^9 + ... + pi^12
        let ok = v1 + v2 + v3 == -*self;
        if !ok {
            trace!("G2 candidate rejected: nonzero trace");
        }
        ok
    }

    /// Convert `self` to byte array representation.
    /// This is the ANSI X9.62 Point-to-Octet-String Conversion primitive, uncompressed form
    /// (a single zero byte for the point at infinity).
    #[allow(non_snake_case)]
    pub fn to_bytes(&self) -> Vec<u8> {
        if bool::from(self.is_zero()) {
            return vec![0x0u8];
        }
        let N = self.normalize();
        let mut bytes = vec![0x4u8];
        bytes.append(&mut N.x.to_bytes());
        bytes.append(&mut N.y.to_bytes());
        bytes
    }
}

/// Divide a little-endian multiword integer in place by a single word, returning the remainder.
fn div_word(w: &mut [Word], d: Word) -> Word {
    let mut rem: u128 = 0;
    for wi in w.iter_mut().rev() {
        let cur = (rem << 64) | (*wi as u128);
        *wi = (cur / d as u128) as Word;
        rem = cur % d as u128;
    }
    rem as Word
}

impl<BW: BWParam, const LIMBS: usize> Add for BWPoint13<BW, LIMBS> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        let mut point = self;
        point += other;
        point
    }
}

impl<BW: BWParam, const LIMBS: usize> AddAssign for BWPoint13<BW, LIMBS> {

    /// Complete elliptic point addition over <b>F</b><sub><i>p&sup1;&sup3;</i></sub>.
    ///
    /// Reference: Joost Renes, Craig Costello, Lejla Batina:
    /// <a href="https://link.springer.com/content/pdf/10.1007/978-3-662-49890-3_16">
    /// "Complete addition formulas for prime order elliptic curves"</a>
    /// (Algorithm 7), Eurocrypt 2016, LNCS 9665 (part I), pp. 403--428, Springer, 2016.
    fn add_assign(&mut self, pair: Self) {
        let b3 = BWFp::<BW, LIMBS>::from_i64(3*BW::CURVE_B);
        let (x1, y1, z1) = (self.x, self.y, self.z);
        let (x2, y2, z2) = (pair.x, pair.y, pair.z);

        let mut t0 = x1*x2;
        let mut t1 = y1*y2;
        let mut t2 = z1*z2;

        let mut t3 = x1 + y1;
        let mut t4 = x2 + y2;
        t3 = t3*t4;

        t4 = t0 + t1;
        t3 = t3 - t4;
        t4 = y1 + z1;

        let mut x3 = y2 + z2;
        t4 = t4*x3;
        x3 = t1 + t2;

        t4 = t4 - x3;
        x3 = x1 + z1;
        let mut y3 = x2 + z2;

        x3 = x3*y3;
        y3 = t0 + t2;
        y3 = x3 - y3;

        x3 = t0 + t0;
        t0 = x3 + t0;
        t2 = b3*t2;

        let mut z3 = t1 + t2;
        t1 = t1 - t2;
        y3 = b3*y3;

        x3 = t4*y3;
        t2 = t3*t1;
        x3 = t2 - x3;

        y3 = y3*t0;
        t1 = t1*z3;
        y3 = t1 + y3;

        t0 = t0*t3;
        z3 = z3*t4;
        z3 = z3 + t0;

        self.x = x3;
        self.y = y3;
        self.z = z3;
    }
}

impl<BW: BWParam, const LIMBS: usize> Clone for BWPoint13<BW, LIMBS> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<BW: BWParam, const LIMBS: usize> Copy for BWPoint13<BW, LIMBS> {}

impl<BW: BWParam, const LIMBS: usize> ConditionallySelectable for BWPoint13<BW, LIMBS> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: BWFp13::conditional_select(&a.x, &b.x, choice),
            y: BWFp13::conditional_select(&a.y, &b.y, choice),
            z: BWFp13::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> ConstantTimeEq for BWPoint13<BW, LIMBS> {
    fn ct_eq(&self, pair: &Self) -> Choice {
        (self.x*pair.z).ct_eq(&(pair.x*self.z)) &
        (self.y*pair.z).ct_eq(&(pair.y*self.z))
    }
}

impl<BW: BWParam, const LIMBS: usize> Debug for BWPoint13<BW, LIMBS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self, f)
    }
}

impl<BW: BWParam, const LIMBS: usize> Display for BWPoint13<BW, LIMBS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let normal = self.normalize();
        write!(f, "[{} : {} : {}]", normal.x, normal.y, normal.z)
    }
}

impl<BW: BWParam, const LIMBS: usize> Mul<BWPoint13<BW, LIMBS>> for Uint<LIMBS> {
    type Output = BWPoint13<BW, LIMBS>;

    fn mul(self, point: BWPoint13<BW, LIMBS>) -> Self::Output {
        let mut v = point;
        v *= self;
        v
    }
}

impl<BW: BWParam, const LIMBS: usize> Mul<BWPoint13<BW, LIMBS>> for BWZn<BW, LIMBS> {
    type Output = BWPoint13<BW, LIMBS>;

    fn mul(self, point: BWPoint13<BW, LIMBS>) -> Self::Output {
        let mut v = point;
        v *= self.to_uint();
        v
    }
}

impl<BW: BWParam, const LIMBS: usize> MulAssign<Uint<LIMBS>> for BWPoint13<BW, LIMBS> {
    fn mul_assign(&mut self, scalar: Uint<LIMBS>) {
        *self = self.mul_words(scalar.as_words());
    }
}

impl<BW: BWParam, const LIMBS: usize> Neg for BWPoint13<BW, LIMBS> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::Output {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> PartialEq<Self> for BWPoint13<BW, LIMBS> {
    fn eq(&self, pair: &Self) -> bool {
        self.ct_eq(&pair).into()
    }
}

impl<BW: BWParam, const LIMBS: usize> Random for BWPoint13<BW, LIMBS> {
    /// Pick a uniform point from <i><b>G</b>&#x2082;</i>.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::default_generator().mul_glv(&BWZn::random(rng))
    }

    /// Try to pick a uniform point from <i><b>G</b>&#x2082;</i>.
    fn try_random<R: TryRngCore + ?Sized>(rng: &mut R) -> Result<Self, <R as TryRngCore>::Error> where R: TryRngCore {
        Ok(Self::default_generator().mul_glv(&BWZn::try_random(rng)?))
    }
}

impl<BW: BWParam, const LIMBS: usize> Sub for BWPoint13<BW, LIMBS> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        let mut point = self;
        point -= other;
        point
    }
}

impl<BW: BWParam, const LIMBS: usize> SubAssign for BWPoint13<BW, LIMBS> {
    fn sub_assign(&mut self, pair: Self) {
        self.add_assign(pair.neg())
    }
}

impl<BW: BWParam, const LIMBS: usize> Zero for BWPoint13<BW, LIMBS> {
    /// The point at infinity <i>&lbrack;0 : 1 : 0&rbrack;</i>.
    fn zero() -> Self {
        Self { x: BWFp13::zero(), y: BWFp13::one(), z: BWFp13::zero() }
    }

    fn is_zero(&self) -> Choice {
        self.z.is_zero()
    }

    fn set_zero(&mut self) {
        self.x.set_zero();
        self.y = BWFp13::one();
        self.z.set_zero()
    }
}


#[cfg(test)]
mod tests {
    use crate::bwparam::BW13P310Param;
    use crate::bwpoint::BWPoint;
    use std::time::SystemTime;
    use super::*;

    const TESTS: usize = 100;

    /// General BWPoint13 test template.
    #[allow(non_snake_case)]
    fn BWPoint13_test<BW: BWParam, const LIMBS: usize>() {
        let mut rng = rand::rng();
        let r: Uint<LIMBS> = uint(BW::ORDER);

        println!();
        println!("Performing {} BW13-P310Point13 test(s)...", TESTS);
        let now = SystemTime::now();

        // neutral element:
        let O2: BWPoint13<BW, LIMBS> = BWPoint13::zero();
        assert!(bool::from(O2.is_zero()));
        assert!(!O2.is_valid_g2());
        assert_eq!(O2.to_bytes(), vec![0u8]);

        // default generator:
        let G2: BWPoint13<BW, LIMBS> = BWPoint13::default_generator();
        assert!(bool::from(BWPoint13::is_point(G2.x, G2.y, G2.z)));
        assert!(bool::from((r*G2).is_zero()));
        assert!(G2.is_valid_g2());
        assert_eq!(G2.psi(), -G2.mul_x());

        // t = 0 maps to the point at infinity:
        assert!(bool::from(BWPoint13::<BW, LIMBS>::point_factory(BWFp::zero()).is_zero()));

        // points of E(F_p) lie on E(F_{p^13}) but outside G_2:
        let G1: BWPoint<BW, LIMBS> = BWPoint::default_generator();
        let E1 = BWPoint13::<BW, LIMBS>::from_base(G1.x, G1.y, G1.z);
        assert!(bool::from(BWPoint13::is_point(E1.x, E1.y, E1.z)));
        assert!(!E1.is_valid_g2());
        assert!(!(G2 + E1).is_valid_g2());
        assert!(BWPoint13::<BW, LIMBS>::from_affine(G2.x, G2.y + BWFp13::one()).is_err());

        for _t in 0..TESTS {
            let k1: BWZn<BW, LIMBS> = BWZn::random(&mut rng);
            let k2: BWZn<BW, LIMBS> = BWZn::random(&mut rng);
            let Q1 = G2.mul_glv(&k1);
            let Q2: BWPoint13<BW, LIMBS> = BWPoint13::random(&mut rng);

            // GLV multiplication agrees with plain fixed-window multiplication:
            assert_eq!(Q1, k1*G2);

            // construction and membership:
            let (x1, y1) = Q1.affine().unwrap();
            assert_eq!(Q1, BWPoint13::from_affine(x1, y1).unwrap());
            assert_eq!(Q1, BWPoint13::from_proj(Q1.x, Q1.y, Q1.z).unwrap());
            assert!(Q1.is_valid_g2());
            assert!(Q2.is_valid_g2());

            // group laws:
            assert!(bool::from((Q1 - Q1).is_zero()));
            assert_eq!(Q1.double(1), Q1 + Q1);
            assert_eq!(Q1 + Q2, Q2 + Q1);
            assert_eq!((Q1 + Q2) + G2, Q1 + (Q2 + G2));
            assert_eq!(Q1.mul_glv(&k2), G2.mul_glv(&(k1*k2)));

            // mixed addition:
            assert_eq!(Q2.add_affine(&x1, &y1), Q2 + Q1);
            assert_eq!(Q1.add_affine(&x1, &y1), Q1.double(1));

            // endomorphisms:
            assert_eq!(Q1.psi(), -Q1.mul_x());
            let mut F = Q1;
            for _ in 0..13 {
                F = F.frob(1);
            }
            assert_eq!(F, Q1);
            assert!(Q1.frob(3).is_valid_g2());
        }

        // hashing to G_2 (the 3451-bit cofactor makes this the slow part):
        for i in 0..3u8 {
            let H: BWPoint13<BW, LIMBS> = BWPoint13::point_factory(BWFp::shake128(&[i]));
            assert!(bool::from(BWPoint13::is_point(H.x, H.y, H.z)));
            assert!(!H.is_valid_g2());
            // pi(H) - H has zero trace but is not an eigenvector of psi:
            let T = H.frob(1) - H;
            let mut tr = T;
            for k in 1..13 {
                tr += T.frob(k);
            }
            assert!(bool::from(tr.is_zero()));
            assert!(!bool::from(T.is_zero()));
            assert_ne!(-T.mul_x(), T.psi());
            assert!(!T.is_valid_g2());
            let Q = H.clear_cofactor();
            assert!(Q.is_valid_g2());
            assert_eq!(Q, BWPoint13::shake128(&[i]));
        }
        let m = b"a message to be hashed to G_2";
        assert_eq!(BWPoint13::<BW, LIMBS>::hash_to_g2(m), BWPoint13::hash_to_g2(m));
        assert!(BWPoint13::<BW, LIMBS>::hash_to_g2(m).is_valid_g2());

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
    fn BW13P310Point13_test() {
        const LIMBS: usize = BW13P310Param::LIMBS;
        BWPoint13_test::<BW13P310Param, LIMBS>();
    }

}
