#[cfg(not(any(target_pointer_width = "64")))]
compile_error!("this crate requires 64-bit limbs");

use crate::bwfp::BWFp;
use crate::bwparam::{uint, BWParam};
use crate::bwzn::BWZn;
use crate::errors::BWError;
use crate::traits::{BWField, One};
use crypto_bigint::{Random, Uint, Word, Zero};
use crypto_bigint::subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use crypto_bigint::rand_core::{RngCore, TryRngCore};
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use tracing::trace;

/// A point on the BW13 curve <i>E/<b>F</b><sub>p</sub>: Y&sup2;Z = X&sup3; + bZ&sup3;</i>
/// in homogeneous projective coordinates.
pub struct BWPoint<BW: BWParam, const LIMBS: usize> {
    pub(crate) x: BWFp<BW, LIMBS>,
    pub(crate) y: BWFp<BW, LIMBS>,
    pub(crate) z: BWFp<BW, LIMBS>,
}

pub type BW13P310Point = BWPoint<crate::bwparam::BW13P310Param, 5>;


impl<BW: BWParam, const LIMBS: usize> BWPoint<BW, LIMBS> {

    /// Create a normalized point on the BW13 curve <i>E/<b>F</b><sub>p</sub>: Y&sup2;Z = X&sup3; + bZ&sup3;</i>
    /// from a given affine <i>x</i>-coordinate and the least significant bit (LSB) of the <i>y</i>-coordinate.
    ///
    /// The parity `y_lsb` selects between <i>y</i> and <i>p - y</i>; it is the low bit of the
    /// compressed prefix produced by `to_bytes`.
    #[inline]
    pub fn new(x: BWFp<BW, LIMBS>, y_lsb: Choice) -> Result<Self, BWError> {
        let y2 = x.cb() + BWFp::from_i64(BW::CURVE_B);
        let mut y = y2.sqrt();
        if y.sq() != y2 {
            return Err(BWError::Domain("no curve point with the given abscissa"));
        }
        y = BWFp::conditional_select(&y, &(-y), y.is_odd() ^ y_lsb);
        Ok(Self { x, y, z: BWFp::one() })
    }

    /// Check in constant time whether (<i>X</i> : <i>Y</i> : <i>Z</i>) lies on <i>E/<b>F</b><sub>p</sub>: Y&sup2;Z = X&sup3; + bZ&sup3;</i>.
    #[inline]
    pub fn is_point(x: BWFp<BW, LIMBS>, y: BWFp<BW, LIMBS>, z: BWFp<BW, LIMBS>) -> Choice {
        // projective curve equation: Y^2*Z = X^3 + b*Z^3
        (y.sq()*z).ct_eq(&(x.cb() + BWFp::from_i64(BW::CURVE_B)*z.cb()))
    }

    /// Create a normalized point on the BW13 curve from given affine coordinates <i>x</i> and <i>y</i>.
    #[inline]
    pub fn from_affine(x: BWFp<BW, LIMBS>, y: BWFp<BW, LIMBS>) -> Result<Self, BWError> {
        if !bool::from(Self::is_point(x, y, BWFp::one())) {
            return Err(BWError::Domain("affine coordinates do not satisfy the curve equation"));
        }
        Ok(Self { x, y, z: BWFp::one() })
    }

    /// Create a point on the BW13 curve from given projective coordinates <i>X</i>, <i>Y</i>, and <i>Z</i>.
    #[inline]
    pub fn from_proj(x: BWFp<BW, LIMBS>, y: BWFp<BW, LIMBS>, z: BWFp<BW, LIMBS>) -> Result<Self, BWError> {
        if !bool::from(Self::is_point(x, y, z)) || bool::from(x.is_zero() & y.is_zero()) {
            return Err(BWError::Domain("projective coordinates do not satisfy the curve equation"));
        }
        Ok(Self { x, y, z })
    }

    /// Create an instance of the default generator of the order-<i>r</i> group
    /// <i><b>G</b>&#x2081;</i> &#x2254; <i>E</i>&lbrack;<i>r</i>&rbrack;(<b>F</b><sub><i>p</i></sub>).
    #[inline]
    pub fn default_generator() -> Self {
        Self {
            x: BWFp::from_slice(BW::GEN1_X),
            y: BWFp::from_slice(BW::GEN1_Y),
            z: BWFp::one(),
        }
    }

    /// Hash input data into a point on <i><b>G</b>&#x2081;</i> with SHAKE-128.
    #[inline]
    pub fn shake128(data: &[u8]) -> Self {
        Self::point_factory(BWFp::shake128(data)).clear_cofactor()
    }

    /// Hash input data into a point on <i><b>G</b>&#x2081;</i> with SHAKE-256.
    #[inline]
    pub fn shake256(data: &[u8]) -> Self {
        Self::point_factory(BWFp::shake256(data)).clear_cofactor()
    }

    /// Compute a normalized (i.e. affine) point equivalent to this on the BW13 curve.
    #[inline]
    pub(crate) fn normalize(&self) -> Self {
        let ch = self.z.is_zero();
        let inv = BWFp::conditional_select(&self.z, &self.y, ch).inv();
        Self {
            x: self.x*inv,
            y: self.y*inv,
            z: BWFp::conditional_select(&BWFp::one(), &BWFp::zero(), ch),
        }
    }

    /// Affine coordinates (<i>x</i>, <i>y</i>) of this point, or `None` for the point at infinity.
    #[inline]
    pub fn affine(&self) -> Option<(BWFp<BW, LIMBS>, BWFp<BW, LIMBS>)> {
        if bool::from(self.z.is_zero()) {
            return None;
        }
        let n = self.normalize();
        Some((n.x, n.y))
    }

    /// Compute <i>&lbrack;2&#x1D57;&rbrack;P</i> for a BW13 curve point
    /// <i>P &in; E/<b>F</b><sub>p</sub></i> (i.e. double <i>t</i> times)
    /// via complete elliptic point doubling.
    #[inline]
    pub fn double(&self, t: usize) -> Self {
        let mut d = *self;
        d.double_self(t);
        d
    }

    /// Compute <i>&lbrack;2&#x1D57;&rbrack;P</i> in place via complete elliptic point doubling.
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

        let mut t0: BWFp<BW, LIMBS>;
        let mut t1: BWFp<BW, LIMBS>;
        let mut t2: BWFp<BW, LIMBS>;
        let mut x3: BWFp<BW, LIMBS>;
        let mut y3: BWFp<BW, LIMBS>;
        let mut z3: BWFp<BW, LIMBS>;

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

    /// Map a field element <i>t &in; <b>F</b><sub>p</sub></i> to a point on the BW13 curve
    /// (not necessarily in <i><b>G</b>&#x2081;</i>) using the isochronous Shallue-van de Woestijne method.
    /// The three exceptional inputs <i>t</i> with <i>t</i>(<i>t&sup2;</i> + <i>1</i> + <i>b</i>) = <i>0</i>
    /// map to the point at infinity.
    ///
    /// Reference:
    ///
    /// *; Andrew Shallue, Christiaan E. van de Woestijne:
    /// "Construction of rational points on elliptic curves over finite fields."
    /// In: Hess, F., Pauli, S., Pohst, M. E. (eds.), <i>Algorithmic Number Theory -- ANTS-VII</i>,
    /// Lecture Notes in Computer Science, vol. 4076, pp. 510--524, 2006.
    /// Springer, Berlin Heidelberg, 2006.
    /// https://doi.org/10.1007/11792086_36
    #[inline]
    pub fn point_factory(t: BWFp<BW, LIMBS>) -> Self {
        let one = BWFp::one();
        let b = BWFp::from_i64(BW::CURVE_B);
        let sqrt_m3 = BWFp::from_slice(BW::SQRT_NEG_3);
        let num = sqrt_m3*t;  // sqrt(-3)*t
        let den = one + b + t.sq();  // 1 + b + t^2
        // Montgomery's trick to use a single inversion, (num*den)^-1, to compute
        // the inverse of num = den*(num*den)^-1 and the inverse of den = num*(num*den)^-1:
        let monty = (num*den).inv();

        let w = num.sq()*monty;  // sqrt(-3)*t/(1 + b + t^2)
        let inv_w = den.sq()*monty;
        let svdw = BWFp::from_slice(BW::SVDW);  // (-1 + sqrt(-3))/2

        // candidate x-coordinates:
        let x0 = svdw - t*w;  // (-1 + sqrt(-3))/2 - t*w
        let x1 = -(one + x0);  // -1 - x_0
        let x2 = one + inv_w.sq();  // 1 + 1/w^2

        // quadratic characters of the corresponding curve equation RHS:
        let q0 = (x0.cb() + b).legendre();
        let q1 = (x1.cb() + b).legendre();
        let q2 = (x2.cb() + b).legendre();

        // constant-time sequential search for the first proper choice of x:
        let mut xc = x2;
        xc = BWFp::conditional_select(&xc, &x1, q1.ct_eq(&1));
        xc = BWFp::conditional_select(&xc, &x0, q0.ct_eq(&1));
        let found = q0.ct_eq(&1) | q1.ct_eq(&1) | q2.ct_eq(&1);
        let leg = t.legendre();

        // point construction:
        let mut y = (xc.cb() + b).sqrt();
        y = BWFp::conditional_select(&y, &(-y), y.is_odd() ^ leg.ct_eq(&-1));
        let pt = Self { x: xc, y, z: one };
        Self::conditional_select(&Self::zero(), &pt, found)
    }

    /// Map this point into <i><b>G</b>&#x2081;</i> by multiplying it by the cofactor <i>h&#x2081;</i>.
    #[inline]
    pub fn clear_cofactor(&self) -> Self {
        self.mul_words(BW::COFACTOR_G1)
    }

    /// The endomorphism <i>&phi;</i>(<i>x</i>, <i>y</i>) = (<i>&beta;x</i>, <i>y</i>)
    /// where <i>&beta;</i> is a primitive cube root of unity in <b>F</b><sub><i>p</i></sub>.
    #[inline]
    pub fn phi(&self) -> Self {
        Self {
            x: BWFp::from_slice(BW::SVDW)*self.x,
            y: self.y,
            z: self.z,
        }
    }

    /// Compute <i>&lbrack;x&rbrack;</i>`self` for the (negative) BW13 curve seed <i>x</i>.
    #[inline]
    pub(crate) fn mul_x(&self) -> Self {
        // the seed is public and sparse, hence a plain double-and-add suffices:
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

    /// Multiply this point by a non-negative integer given as a little-endian word slice,
    /// via isochronous fixed-window multiplication.
    ///
    /// Reference:
    ///
    /// *; Alfred J. Menezes, Paul C. van Oorschot, Scott A. Vanstone,
    /// <a href="https://cacr.uwaterloo.ca/hac/">"Handbook of Applied Cryptography"</a>,
    /// CRC Press (1997), section 14.6 (Exponentiation), algorithm 14.82.
    pub fn mul_words(&self, k: &[Word]) -> Self {
        // prepare a table such that t[d] = d*P, where 0 <= d < 16:
        let mut t = [Self::zero(); 16];
        t[1] = *self;
        for d in 1..8 {
            t[2*d] = t[d].double(1);  // (2*d)*P = 2*(d*P)
            t[2*d + 1] = t[2*d] + *self;  // (2*d + 1)*P = 2*(d*P) + P
        }

        // perform fixed-window multiplication, one hex digit at a time:
        let mut v = Self::zero();  // accumulator
        for j in (0..k.len() << 4).rev() {  // scan the scalar from most to least significant nybble
            v.double_self(4);  // multiply the accumulator by 16
            let d = ((k[j >> 4] >> ((j & 0xF) << 2)) & 0xF) as usize;  // hex digit at index j
            // perform constant-time sequential search on t to extract t[d]:
            let mut w = Self::zero();
            for e in 0..16 {
                w = Self::conditional_select(&w, &t[e], e.ct_eq(&d));
            }
            v += w;
        }
        v
    }

    /// Determine if this point belongs to <i><b>G</b>&#x2081;</i> without a full-order scalar
    /// multiplication, checking the relation
    /// <i>&phi;</i>(<i>P</i> - &lbrack;<i>x</i>&rbrack;<i>u</i>) = <i>u</i> with
    /// <i>u</i> = -(&lbrack;<i>x</i>&rbrack; + &lbrack;<i>x&#x2077;</i>&rbrack;)&lbrack;<i>x&#x2074;</i> + <i>x&sup3;</i> - <i>x</i> - 1&rbrack;<i>P</i>,
    /// which only holds on the eigenspace of <i>&phi;</i> of order <i>r</i>.
    ///
    /// Reference:
    ///
    /// * Yu Dai, Kaizhan Lin, Chang-An Zhao, Zijian Zhou:
    /// "Fast subgroup membership testings for G1, G2 and GT on pairing-friendly curves."
    /// <i>Designs, Codes and Cryptography</i>, vol. 91, pp. 3141--3166, Springer, 2023.
    pub fn is_valid_g1(&self) -> bool {
        if bool::from(self.is_zero()) {
            trace!("G1 candidate rejected: point at infinity");
            return false;
        }
        if !bool::from(Self::is_point(self.x, self.y, self.z)) {
            trace!("G1 candidate rejected: not on the curve");
            return false;
        }
        let mut u0 = self.mul_x();  // [x]P
        let mut u1 = u0.mul_x().mul_x();  // [x^3]P
        let u2 = u1.mul_x();  // [x^4]P
        u0 += *self;  // [x + 1]P
        u1 += u2;  // [x^4 + x^3]P
        u0 = u1 - u0;  // [x^4 + x^3 - x - 1]P
        u0 = u0.mul_x();
        u1 = u0;
        for _ in 0..6 {
            u1 = u1.mul_x();
        }
        u0 = -(u0 + u1);
        u1 = (*self - u0.mul_x()).phi();
        let ok = u0 == u1;
        if !ok {
            trace!("G1 candidate rejected: not of order r");
        }
        ok
    }

    /// Compressed encoding: a 0x02/0x03 prefix carrying the parity of <i>y</i>, followed by the
    /// little-endian bytes of the affine <i>x</i> (the identity normalizes to (0, 1) and encodes as 0x03 followed by zeros).
    #[allow(non_snake_case)]
    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        let N = self.normalize();
        // ANSI X9.62 'compressed' prefix: 0x02 | lsb(N.y)
        let mut cp = 0x2u8;  // lsb(N.y) == 0
        cp.conditional_assign(&0x3u8, N.y.is_odd());  // lsb(N.y) == 1
        let mut bytes = vec![cp];
        bytes.append(&mut N.x.to_bytes());
        bytes
    }

}

impl<BW: BWParam, const LIMBS: usize> Add for BWPoint<BW, LIMBS> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        let mut point = self;
        point += other;
        point
    }
}

impl<BW: BWParam, const LIMBS: usize> AddAssign for BWPoint<BW, LIMBS> {

    /// Complete elliptic point addition for the BW13 curve <i>E/<b>F</b><sub>p</sub></i>.
    ///
    /// Reference: Joost Renes, Craig Costello, Lejla Batina:
    /// <a href="https://link.springer.com/content/pdf/10.1007/978-3-662-49890-3_16">
    /// "Complete addition formulas for prime order elliptic curves"</a>
    /// (Algorithm 7), Eurocrypt 2016, LNCS 9665 (part I), pp. 403--428, Springer, 2016.
    fn add_assign(&mut self, pair: Self) {
        let b3 = BWFp::<BW, LIMBS>::from_i64(3*BW::CURVE_B);
        let x1 = self.x;
        let y1 = self.y;
        let z1 = self.z;
        let x2 = pair.x;
        let y2 = pair.y;
        let z2 = pair.z;

        let mut t0: BWFp<BW, LIMBS>;
        let mut t1: BWFp<BW, LIMBS>;
        let mut t2: BWFp<BW, LIMBS>;
        let mut t3: BWFp<BW, LIMBS>;
        let mut t4: BWFp<BW, LIMBS>;
        let mut x3: BWFp<BW, LIMBS>;
        let mut y3: BWFp<BW, LIMBS>;
        let mut z3: BWFp<BW, LIMBS>;

        t0 = x1*x2;
        t1 = y1*y2;
        t2 = z1*z2;

        t3 = x1 + y1;
        t4 = x2 + y2;
        t3 = t3*t4;

        t4 = t0 + t1;
        t3 = t3 - t4;
        t4 = y1 + z1;

        x3 = y2 + z2;
        t4 = t4*x3;
        x3 = t1 + t2;

        t4 = t4 - x3;
        x3 = x1 + z1;
        y3 = x2 + z2;

        x3 = x3*y3;
        y3 = t0 + t2;
        y3 = x3 - y3;

        x3 = t0 + t0;
        t0 = x3 + t0;
        t2 = b3*t2;

        z3 = t1 + t2;
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

impl<BW: BWParam, const LIMBS: usize> Clone for BWPoint<BW, LIMBS> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<BW: BWParam, const LIMBS: usize> Copy for BWPoint<BW, LIMBS> {}

impl<BW: BWParam, const LIMBS: usize> ConditionallySelectable for BWPoint<BW, LIMBS> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let x = BWFp::conditional_select(&a.x, &b.x, choice);
        let y = BWFp::conditional_select(&a.y, &b.y, choice);
        let z = BWFp::conditional_select(&a.z, &b.z, choice);
        Self { x, y, z }
    }
}

impl<BW: BWParam, const LIMBS: usize> ConstantTimeEq for BWPoint<BW, LIMBS> {
    fn ct_eq(&self, pair: &Self) -> Choice {
        // x/z = pair.x/pair.z <=> x*pair.z = pair.x*z
        // y/z = pair.y/pair.z <=> y*pair.z = pair.y*z
        (self.x*pair.z).ct_eq(&(pair.x*self.z)) &
        (self.y*pair.z).ct_eq(&(pair.y*self.z))
    }
}

impl<BW: BWParam, const LIMBS: usize> Debug for BWPoint<BW, LIMBS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self, f)
    }
}

impl<BW: BWParam, const LIMBS: usize> Display for BWPoint<BW, LIMBS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let normal = self.normalize();
        // signed format:
        let p: Uint<LIMBS> = uint(BW::MODULUS);
        let half_p = p >> 1;
        let signed = |v: BWFp<BW, LIMBS>| if v.to_uint() <= half_p {
            v.to_string()
        } else {
            "-".to_string() + (-v).to_string().as_str()
        };
        write!(f, "[{} : {} : {}]", signed(normal.x), signed(normal.y), signed(normal.z))
    }
}

impl<BW: BWParam, const LIMBS: usize> Mul<BWPoint<BW, LIMBS>> for Uint<LIMBS> {
    type Output = BWPoint<BW, LIMBS>;

    fn mul(self, point: BWPoint<BW, LIMBS>) -> Self::Output {
        let mut v = point;
        v *= self;
        v
    }
}

impl<BW: BWParam, const LIMBS: usize> Mul<BWPoint<BW, LIMBS>> for BWZn<BW, LIMBS> {
    type Output = BWPoint<BW, LIMBS>;

    fn mul(self, point: BWPoint<BW, LIMBS>) -> Self::Output {
        let mut v = point;
        v *= self.to_uint();
        v
    }
}

impl<BW: BWParam, const LIMBS: usize> MulAssign<Uint<LIMBS>> for BWPoint<BW, LIMBS> {
    /// Multiply a scalar and a point via fixed-window multiplication.
    fn mul_assign(&mut self, scalar: Uint<LIMBS>) {
        *self = self.mul_words(scalar.as_words());
    }
}

impl<BW: BWParam, const LIMBS: usize> Neg for BWPoint<BW, LIMBS> {
    type Output = Self;

    /// Compute the opposite of a point on the BW13 curve.
    fn neg(self) -> Self::Output {
        Self::Output {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> PartialEq<Self> for BWPoint<BW, LIMBS> {
    fn eq(&self, pair: &Self) -> bool {
        self.ct_eq(&pair).into()
    }
}

impl<BW: BWParam, const LIMBS: usize> Random for BWPoint<BW, LIMBS> {
    /// Pick a uniform point from <i><b>G</b>&#x2081;</i>.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::point_factory(BWFp::random(rng)).clear_cofactor()
    }

    /// Try to pick a uniform point from <i><b>G</b>&#x2081;</i>.
    fn try_random<R: TryRngCore + ?Sized>(rng: &mut R) -> Result<Self, <R as TryRngCore>::Error> where R: TryRngCore {
        Ok(Self::point_factory(BWFp::try_random(rng)?).clear_cofactor())
    }
}

impl<BW: BWParam, const LIMBS: usize> Sub for BWPoint<BW, LIMBS> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        let mut point = self;
        point -= other;
        point
    }
}

impl<BW: BWParam, const LIMBS: usize> SubAssign for BWPoint<BW, LIMBS> {
    fn sub_assign(&mut self, pair: Self) {
        self.add_assign(pair.neg())
    }
}

impl<BW: BWParam, const LIMBS: usize> Zero for BWPoint<BW, LIMBS> {
    /// The point at infinity <i>&lbrack;0 : 1 : 0&rbrack;</i>.
    fn zero() -> Self {
        Self { x: BWFp::zero(), y: BWFp::one(), z: BWFp::zero() }
    }

    /// Determine if this projective point is the neutral element on the BW13 curve.
    fn is_zero(&self) -> Choice {
        self.z.is_zero()
    }

    fn set_zero(&mut self) {
        self.x.set_zero();  // otherwise the curve equation Y^2*Z = X^3 + b*Z^3 is not satisfied
        self.z.set_zero()
    }
}


#[cfg(test)]
mod tests {
    use crate::bwparam::BW13P310Param;
    use std::time::SystemTime;
    use super::*;

    const TESTS: usize = 100;

    /// General BWPoint test template.
    #[allow(non_snake_case)]
    fn BWPoint_test<BW: BWParam, const LIMBS: usize>() {
        let mut rng = rand::rng();
        let r: Uint<LIMBS> = uint(BW::ORDER);

        println!();
        println!("Performing {} BW13-P310Point test(s)...", TESTS);
        let now = SystemTime::now();

        // neutral element:
        let O1: BWPoint<BW, LIMBS> = BWPoint::zero();
        assert!(bool::from(O1.is_zero()));
        assert!(!O1.is_valid_g1());
        assert_eq!(O1.affine(), None);
        let ob = O1.to_bytes();
        assert_eq!(ob.len(), 1 + 8*LIMBS);
        assert_eq!(ob[0], 0x03);
        assert!(ob[1..].iter().all(|&b| b == 0));

        // default generator:
        let G1: BWPoint<BW, LIMBS> = BWPoint::default_generator();
        assert!(bool::from(BWPoint::is_point(G1.x, G1.y, G1.z)));
        assert!(bool::from((r*G1).is_zero()));
        assert!(G1.is_valid_g1());

        // the exceptional hash inputs map to the point at infinity:
        assert!(bool::from(BWPoint::<BW, LIMBS>::point_factory(BWFp::zero()).is_zero()));
        assert!(bool::from(BWPoint::<BW, LIMBS>::point_factory(BWFp::from_word(4)).is_zero()));

        // off-curve coordinates are refused:
        assert!(BWPoint::<BW, LIMBS>::from_affine(G1.x, G1.y + BWFp::one()).is_err());

        for _t in 0..TESTS {
            // hashing to G_1:
            let P1: BWPoint<BW, LIMBS> = BWPoint::random(&mut rng);
            let P2: BWPoint<BW, LIMBS> = BWPoint::random(&mut rng);
            let P3: BWPoint<BW, LIMBS> = BWPoint::random(&mut rng);

            // point construction:
            assert_eq!(P1, BWPoint::from_proj(P1.x, P1.y, P1.z).unwrap());
            let (x1, y1) = P1.affine().unwrap();
            assert_eq!(P1, BWPoint::from_affine(x1, y1).unwrap());
            assert_eq!(P1, BWPoint::new(x1, y1.is_odd()).unwrap());
            let pb = P1.to_bytes();
            assert_eq!(pb[0], if bool::from(y1.is_odd()) { 0x03 } else { 0x02 });
            assert_eq!(pb[1..], x1.to_bytes()[..]);
            assert_eq!(P1, BWPoint::new(x1, Choice::from(pb[0] & 1)).unwrap());

            // point order and validity:
            assert!(bool::from((r*P1).is_zero()));
            assert!(bool::from((r*P2).is_zero()));
            assert!(P1.is_valid_g1());
            assert!(P2.is_valid_g1());

            // raw map outputs lie on the curve but (almost surely) outside G_1:
            let R1: BWPoint<BW, LIMBS> = BWPoint::point_factory(BWFp::random(&mut rng));
            assert!(bool::from(BWPoint::is_point(R1.x, R1.y, R1.z)));
            assert!(!R1.is_valid_g1());

            // opposite point:
            assert!(bool::from((P1 + (-P1)).is_zero()));
            assert!(bool::from((P1 - P1).is_zero()));

            // point doubling:
            assert_eq!(P1.double(1), P1 + P1);
            assert_eq!(P2.double(3), BWZn::from_word(8)*P2);

            // commutativity and associativity:
            assert_eq!(P1 + P2, P2 + P1);
            assert_eq!((P1 + P2) + P3, P1 + (P2 + P3));

            // the endomorphism phi satisfies phi^2 + phi + 1 = 0:
            assert!(bool::from((P1.phi().phi() + P1.phi() + P1).is_zero()));
            assert!(P1.phi().is_valid_g1());

            // scalar multiplication is linear:
            let k1: BWZn<BW, LIMBS> = BWZn::random(&mut rng);
            let k2: BWZn<BW, LIMBS> = BWZn::random(&mut rng);
            assert_eq!(k1*P1 + k2*P1, (k1 + k2)*P1);
            assert_eq!(k1*(k2*P1), (k1*k2)*P1);

            // multiplication by the seed:
            let mut w = [0 as Word; LIMBS];
            w[0] = BW::U[0];
            assert_eq!(P1.mul_x(), -(Uint::from_words(w)*P1));
        }

        // hashing is deterministic:
        assert_eq!(BWPoint::<BW, LIMBS>::shake128(b"abc"), BWPoint::shake128(b"abc"));
        assert!(BWPoint::<BW, LIMBS>::shake256(b"abc").is_valid_g1());

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
    fn BW13P310Point_test() {
        const LIMBS: usize = BW13P310Param::LIMBS;
        BWPoint_test::<BW13P310Param, LIMBS>();
    }

}
