#[cfg(not(any(target_pointer_width = "64")))]
compile_error!("this crate requires 64-bit limbs");

use crate::bwparam::{uint, BWParam};
use crate::traits::{BWField, One};
use crypto_bigint::{Integer, Limb, Random, Uint, Word, Zero};
use crypto_bigint::rand_core::{RngCore, TryRngCore};
use crypto_bigint::subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeLess};
use rand::Rng;
use sha3::{Shake128, Shake256};
use sha3::digest::ExtendableOutput;
use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// An element of the base field <b>F</b><sub><i>p</i></sub>, kept in Montgomery form.
pub struct BWFp<BW: BWParam, const LIMBS: usize>(
    #[doc(hidden)]
    pub Uint<LIMBS>,
    #[doc(hidden)]
    pub PhantomData<BW>,
);

/// An unreduced double-width value (<i>lo</i>, <i>hi</i>) congruent to a product
/// (or a signed sum of products) of base field elements.
///
/// Invariant: the value lies in range 0..&lt;<i>p&times;2&#x02B7;</i>, i.e. <i>hi &lt; p</i>,
/// where <i>w</i> &#x2254; <i>64&times;LIMBS</i>, so that a single Montgomery reduction
/// maps it back to <b>F</b><sub><i>p</i></sub>.
pub struct BWFpWide<BW: BWParam, const LIMBS: usize>(
    #[doc(hidden)]
    pub Uint<LIMBS>,
    #[doc(hidden)]
    pub Uint<LIMBS>,
    #[doc(hidden)]
    pub PhantomData<BW>,
);

pub type BW13P310Fp = BWFp<crate::bwparam::BW13P310Param, 5>;


impl<BW: BWParam, const LIMBS: usize> BWFp<BW, LIMBS> {
    /// Montgomery reduction of <i>t</i> = (<i>t_lo</i>, <i>t_hi</i>) in range 0..&lt;<i>p&times;2&#x02B7;</i>,
    /// where <i>p &lt; 2&#x02B7;</i> is the BW13 modulus and <i>w</i> &#x2254; <i>64&times;LIMBS</i>.
    ///
    /// Return <i>t&times;2&#8315;&#x02B7;</i> in range 0..&lt;<i>p</i>.
    #[inline]
    pub(crate) fn redc(t_lo: Uint<LIMBS>, t_hi: Uint<LIMBS>) -> Uint<LIMBS> {
        let p: Uint<LIMBS> = uint(BW::MODULUS);  // p < 2^w
        let q: Uint<LIMBS> = uint(BW::NEG_INV_MOD);  // q := -1/p mod 2^w
        // m ← ((t mod s)*q) mod s = (t_lo*q) mod s:
        let (m, _) = t_lo.widening_mul(&q);
        // t ← (t + m*p) / s:
        let (mp_lo, mp_hi) = m.widening_mul(&p);
        let (_, carry) = t_lo.carrying_add(&mp_lo, Limb::ZERO);
        let (t, _) = t_hi.carrying_add(&mp_hi, carry);
        // return if t < p { t } else { t - p }
        t - Uint::conditional_select(&p, &Uint::ZERO, t.ct_lt(&p))
    }

    /// Compute (<i>a</i> + <i>b</i>) mod <i>p</i> for <i>a</i>, <i>b</i> in range 0..&lt;<i>p</i>.
    #[inline]
    fn add_mod(a: &Uint<LIMBS>, b: &Uint<LIMBS>) -> Uint<LIMBS> {
        let p: Uint<LIMBS> = uint(BW::MODULUS);
        let (s, _) = a.carrying_add(b, Limb::ZERO);  // no carry out, since p < 2^(w-1)
        let (d, borrow) = s.borrowing_sub(&p, Limb::ZERO);
        Uint::conditional_select(&d, &s, Choice::from((borrow.0 & 1) as u8))
    }

    /// Compute (<i>a</i> - <i>b</i>) mod <i>p</i> for <i>a</i>, <i>b</i> in range 0..&lt;<i>p</i>.
    #[inline]
    fn sub_mod(a: &Uint<LIMBS>, b: &Uint<LIMBS>) -> Uint<LIMBS> {
        let p: Uint<LIMBS> = uint(BW::MODULUS);
        let (d, borrow) = a.borrowing_sub(b, Limb::ZERO);
        Uint::conditional_select(&d, &d.wrapping_add(&p), Choice::from((borrow.0 & 1) as u8))
    }

    /// Convert an unsigned integer (Uint) value <i>w</i> to Montgomery form,
    /// namely, the value <i>w&middot;s</i> mod <i>p</i> =
    /// redc((<i>w</i> mod <i>p</i>)&middot;(<i>s&sup2;</i> mod <i>p</i>)),
    /// where <i>s > p</i> is a power of 2.
    #[inline]
    pub fn from_uint(w: Uint<LIMBS>) -> Self {
        let s2: Uint<LIMBS> = uint(BW::MONTY_P);
        let (lo, hi) = w.widening_mul(&s2);
        Self {
            0: Self::redc(lo, hi),
            1: Default::default(),
        }
    }

    /// Convert a word-sized integer <i>w</i> to Montgomery form.
    #[inline]
    pub fn from_word(w: Word) -> Self {
        Self::from_uint(Uint::from_word(w))
    }

    /// Convert a single-precision, signed integer <i>w</i> to Montgomery form.
    #[inline]
    pub fn from_i64(w: i64) -> Self {
        let u = Self::from_word(w.unsigned_abs());
        Self::conditional_select(&u, &(-u), Choice::from((w < 0) as u8))
    }

    /// Convert an integer given as a little-endian slice of words (typically a parameter
    /// table entry in plain representation) to Montgomery form.
    #[inline]
    pub(crate) fn from_slice(v: &[Word]) -> Self {
        Self::from_uint(uint(v))
    }

    /// Reduce a hash output of 2&times;LIMBS words into a field element.
    ///
    /// The lift to &Zopf; is truncated below <i>p&times;2&#x02B7;</i> and converted
    /// via Montgomery reduction.  This ensures the deviation from uniform sampling over
    /// <b>F</b><sub><i>p</i></sub> is upper-bounded by about <i>2&#8315;&#x02B7;&#x2044;&sup2;</i>.
    #[inline]
    pub(crate) fn from_digest(out: &mut [u8]) -> Self {
        let p: Uint<LIMBS> = uint(BW::MODULUS);
        // keep only the bits below 2^(w + lg(p) - 1) < p*2^w:
        let keep = 64*LIMBS + (p.bits() as usize) - 1;
        for (i, byte) in out.iter_mut().enumerate() {
            if 8*i >= keep {
                *byte = 0;
            } else if 8*i + 8 > keep {
                *byte &= (1u8 << (keep - 8*i)) - 1;
            }
        }
        let lo = Uint::from_le_slice(&out[0..LIMBS*8]);
        let hi = Uint::from_le_slice(&out[LIMBS*8..2*LIMBS*8]);
        Self {
            0: Self::redc(lo, hi),
            1: Default::default(),
        }
    }

    /// Hash input data into a field element with SHAKE-128.
    #[inline]
    pub fn shake128(data: &[u8]) -> Self {
        let mut out = vec![0u8; 2*LIMBS*8];  // twice the space taken by a base field element
        Shake128::digest_xof(data, &mut out);
        Self::from_digest(&mut out)
    }

    /// Hash input data into a field element with SHAKE-256.
    #[inline]
    pub fn shake256(data: &[u8]) -> Self {
        let mut out = vec![0u8; 2*LIMBS*8];  // twice the space taken by a base field element
        Shake256::digest_xof(data, &mut out);
        Self::from_digest(&mut out)
    }

    /// Convert an integer in Montgomery form to plain representation.
    ///
    /// NB: the plain representation of <i>m</i> = <i>w&middot;r</i> mod <i>p</i> is
    /// <i>w</i> = redc(<i>m</i>), where <i>r > p</i> is a power of 2.
    #[inline]
    pub fn to_uint(&self) -> Uint<LIMBS> {
        Self::redc(self.0, Uint::ZERO)
    }

    /// Compute the unreduced product of two field elements.
    #[inline]
    pub fn mul_wide(&self, rhs: &Self) -> BWFpWide<BW, LIMBS> {
        let (lo, hi) = self.0.widening_mul(&rhs.0);  // < p^2 < p*2^w
        BWFpWide { 0: lo, 1: hi, 2: Default::default() }
    }

    /// Compute the unreduced square of a field element.
    #[inline]
    pub fn sq_wide(&self) -> BWFpWide<BW, LIMBS> {
        let (lo, hi) = self.0.square_wide();
        BWFpWide { 0: lo, 1: hi, 2: Default::default() }
    }

    /// Compute <i>v</i> = `self`<i>&#x02E3;</i> mod <i>p</i>.
    #[inline]
    pub(crate) fn pow(&self, x: Uint<LIMBS>) -> Self {
        // the exponent (restricted to square root, Legendre symbol, and inversion)
        // is fixed, public, and rather sparse, hence the square-and-multiply method suffices:
        let mut v = Self::one();
        let w = x.as_words();  // presumed NOT to be in Montgomery form
        for i in (0..LIMBS << 6).rev() {
            v = v.sq();
            if ((w[i >> 6] >> (i & 63)) & 1) == 1 {
                v *= *self;
            }
        }
        v
    }

    /// Determine if the plain representation of `self` is odd.
    #[inline]
    pub(crate) fn is_odd(&self) -> Choice {
        Self::redc(self.0, Uint::ZERO).is_odd()
    }

    /// Compute <i>r</i> = <i>&radic;`self`</i> = <i>`self`<sup>(p+1)/4</sup></i> mod <i>p</i>,
    /// which satisfies <i>r&sup2;</i> mod <i>p</i> = <i>`self`</i> if <i>`self`</i> is a quadratic residue mod <i>p</i>.
    #[inline]
    pub(crate) fn sqrt(&self) -> Self {
        let p: Uint<LIMBS> = uint(BW::MODULUS);
        self.pow((p + Uint::ONE).shr(2)) // sqrt exponent: (p + 1)/4
    }

    /// Compute the Legendre symbol (<i>`self`/p</i>) in isochronous fashion:<br>
    /// &nbsp;   +1      if <i>`self`</i> is a nonzero quadratic residue mod <i>p</i>,<br>
    /// &nbsp;   &nbsp;0 if <i>`self`</i> = <i>0</i><br>
    /// &nbsp;   -1      if <i>`self`</i> is a nonzero quadratic non-residue mod <i>p</i>.
    #[inline]
    pub(crate) fn legendre(&self) -> isize {
        let p: Uint<LIMBS> = uint(BW::MODULUS);
        // (v/p) = v^((p - 1)/2) mod p for prime p
        let m = self.pow((p - Uint::ONE) >> 1).to_uint();
        // take the two least significant bits of m:
        let r = (m.as_words()[0] & 3) as isize;  // (v/p) = p-1, 0, 1
        // NB: since p = 3 (mod 4), it follows that -1 = 2 (mod 4)
        -(r >> 1) + (r & 1)
    }

}

impl<BW: BWParam, const LIMBS: usize> Add for BWFp<BW, LIMBS> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::Output {
            0: Self::add_mod(&self.0, &rhs.0),
            1: Default::default(),
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> AddAssign for BWFp<BW, LIMBS> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = Self::add_mod(&self.0, &rhs.0);
    }
}

impl<BW: BWParam, const LIMBS: usize> BWField for BWFp<BW, LIMBS> {
    /// Convert `self` to byte array representation (little-endian, plain form).
    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        let binding = self.to_uint();
        let val = binding.as_words();
        let mut bytes = Vec::<u8>::with_capacity(LIMBS << 3);
        for u in val {
            bytes.extend_from_slice(&u.to_le_bytes());
        }
        bytes
    }

    /// Compute the value of twice this element.
    #[inline]
    fn double(&self) -> Self {
        Self {
            0: Self::add_mod(&self.0, &self.0),
            1: Default::default(),
        }
    }

    /// Compute <i>u/2 mod p</i>.
    ///
    /// Technique: if the lift of <i>u</i> (either in plain or in Montgomery form)
    /// to &Zopf; is even, a right-shift does the required division;
    /// if it is odd, then <i>u + p</i> is even, and <i>0 <= (u + p) >> 1 < p</i> is the desired value.
    #[inline]
    fn half(&self) -> Self {
        let p: Uint<LIMBS> = uint(BW::MODULUS);
        Self {
            0: Uint::conditional_select(&self.0, &self.0.wrapping_add(&p), self.0.is_odd()) >> 1,
            1: Default::default(),
        }
    }

    /// Compute the square of a field element.
    #[inline]
    fn sq(&self) -> Self {
        let (lo, hi) = self.0.square_wide();
        Self {
            0: Self::redc(lo, hi),
            1: Default::default(),
        }
    }

    /// Compute the cube of a field element.
    #[inline]
    fn cb(&self) -> Self {
        let (lo, hi) = self.0.square_wide();
        let (lo, hi) = self.0.widening_mul(&Self::redc(lo, hi));
        Self {
            0: Self::redc(lo, hi),
            1: Default::default(),
        }
    }

    /// Compute <i>r</i> = <i>u&#8315;&sup1;</i> = <i>u&#x1D56;&#8315;&sup2;</i> mod <i>p</i>
    /// for <i>u</i> &#x2254; `self`, which satisfies
    /// <i>r&times;u</i> mod <i>p</i> = <i>1</i> if <i>u &ne; 0</i>.
    #[inline]
    fn inv(&self) -> Self {
        let p: Uint<LIMBS> = uint(BW::MODULUS);
        self.pow(p - Uint::from_word(2)) // inv exponent: p - 2
    }
}

impl<BW: BWParam, const LIMBS: usize> Clone for BWFp<BW, LIMBS> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<BW: BWParam, const LIMBS: usize> ConditionallySelectable for BWFp<BW, LIMBS> {
    #[inline]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            0: Uint::conditional_select(&a.0, &b.0, choice),
            1: Default::default(),
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> ConstantTimeEq for BWFp<BW, LIMBS> {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }

    #[inline]
    fn ct_ne(&self, other: &Self) -> Choice {
        self.0.ct_ne(&other.0)
    }
}

impl<BW: BWParam, const LIMBS: usize> Copy for BWFp<BW, LIMBS> {}

impl<BW: BWParam, const LIMBS: usize> Debug for BWFp<BW, LIMBS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self, f)
    }
}

impl<BW: BWParam, const LIMBS: usize> Display for BWFp<BW, LIMBS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Self::redc(self.0, Uint::ZERO).to_string_radix_vartime(10))
    }
}

impl<BW: BWParam, const LIMBS: usize> Mul for BWFp<BW, LIMBS> {
    type Output = Self;

    /// Compute a product in <b>F</b><sub><i>p</i></sub>.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        let (lo, hi) = self.0.widening_mul(&rhs.0);
        Self::Output {
            0: Self::redc(lo, hi),
            1: Default::default(),
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> Mul<BWFp<BW, LIMBS>> for Word {
    type Output = BWFp<BW, LIMBS>;

    /// Compute the product of a small integer left factor
    /// by a right factor from <b>F</b><sub><i>p</i></sub>.
    #[inline]
    fn mul(self, rhs: BWFp<BW, LIMBS>) -> Self::Output {
        assert!(self < 1 << 4);  // only meant for very small factors
        let mut val = Self::Output::zero();
        let mut fac = self as u8;
        let mut add = rhs;
        for _ in 0..4 {
            val = BWFp::conditional_select(&val, &(val + add), Choice::from(fac & 1));
            fac >>= 1;
            add += add;
        }
        val
    }
}

impl<BW: BWParam, const LIMBS: usize> Mul<BWFp<BW, LIMBS>> for i64 {
    type Output = BWFp<BW, LIMBS>;

    /// Compute the product of a single-precision, signed integer left factor
    /// by a right factor from <b>F</b><sub><i>p</i></sub>.
    #[inline]
    fn mul(self, rhs: BWFp<BW, LIMBS>) -> Self::Output {
        BWFp::from_i64(self)*rhs
    }
}

impl<BW: BWParam, const LIMBS: usize> Mul<BWFp<BW, LIMBS>> for Uint<LIMBS> {
    type Output = BWFp<BW, LIMBS>;

    /// Compute the product of an integer left factor
    /// by a right factor from <b>F</b><sub><i>p</i></sub>.
    #[inline]
    fn mul(self, rhs: BWFp<BW, LIMBS>) -> Self::Output {
        BWFp::from_uint(self)*rhs
    }
}

impl<BW: BWParam, const LIMBS: usize> MulAssign for BWFp<BW, LIMBS> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        let (lo, hi) = self.0.widening_mul(&rhs.0);
        self.0 = Self::redc(lo, hi);
    }
}

impl<BW: BWParam, const LIMBS: usize> Neg for BWFp<BW, LIMBS> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::Output {
            0: Self::sub_mod(&Uint::ZERO, &self.0),
            1: Default::default(),
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> One for BWFp<BW, LIMBS> {
    #[inline]
    fn one() -> Self {
        let r2: Uint<LIMBS> = uint(BW::MONTY_P);
        Self {
            0: Self::redc(r2, Uint::ZERO),  // (1*r) mod p
            1: Default::default(),
        }
    }

    fn is_one(&self) -> Choice {
        Self::redc(self.0, Uint::ZERO).ct_eq(&Uint::ONE)
    }
}

impl<BW: BWParam, const LIMBS: usize> PartialEq for BWFp<BW, LIMBS> {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl<BW: BWParam, const LIMBS: usize> Random for BWFp<BW, LIMBS> {
    /// Pick a uniform element from <b>F</b><sub><i>p</i></sub> by rejection sampling mod <i>p</i>.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let p: Uint<LIMBS> = uint(BW::MODULUS);
        let top = LIMBS - 1;
        let mask: Word = Word::MAX >> (64*LIMBS - p.bits() as usize);  // bit capacity of the modulus
        let mut w: [Word; LIMBS] = [0; LIMBS];
        loop {
            // uniformly sample the bit capacity of the modulus:
            rng.fill(&mut w);
            w[top] &= mask;
            // rejection sampling for the most significant word:
            while w[top] > p.as_words()[top] {  // this means the whole value exceeds the modulus
                w[top] = rng.next_u64() & mask;
            }
            // rejection sampling for the whole value:
            let r = Uint::from_words(w);
            if r < p {
                return Self::from_uint(r);
            }
        }
    }

    /// Try to pick a uniform element from <b>F</b><sub><i>p</i></sub> by rejection sampling mod <i>p</i>.
    fn try_random<R: TryRngCore + ?Sized>(rng: &mut R) -> Result<Self, <R as TryRngCore>::Error> where R: TryRngCore {
        let p: Uint<LIMBS> = uint(BW::MODULUS);
        let top = LIMBS - 1;
        let mask: Word = Word::MAX >> (64*LIMBS - p.bits() as usize);  // bit capacity of the modulus
        let mut w: [Word; LIMBS] = [0; LIMBS];
        loop {
            // uniformly sample the bit capacity of the modulus:
            for wi in &mut w {
                *wi = rng.try_next_u64()?
            }
            w[top] &= mask;
            // rejection sampling for the most significant word:
            while w[top] > p.as_words()[top] {  // this means the whole value exceeds the modulus
                w[top] = rng.try_next_u64()? & mask;
            }
            // rejection sampling for the whole value:
            let r = Uint::from_words(w);
            if r < p {
                return Ok(Self::from_uint(r));
            }
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> Sub for BWFp<BW, LIMBS> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::Output {
            0: Self::sub_mod(&self.0, &rhs.0),
            1: Default::default(),
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> SubAssign for BWFp<BW, LIMBS> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = Self::sub_mod(&self.0, &rhs.0);
    }
}

impl<BW: BWParam, const LIMBS: usize> Zero for BWFp<BW, LIMBS> {
    #[inline]
    fn zero() -> Self {
        Self {
            0: Uint::ZERO,  // (0*r) mod p
            1: Default::default(),
        }
    }

    #[inline]
    fn is_zero(&self) -> Choice {
        self.0.is_zero()
    }

    fn set_zero(&mut self) {
        self.0.set_zero()
    }
}


impl<BW: BWParam, const LIMBS: usize> BWFpWide<BW, LIMBS> {
    /// The double-width zero.
    #[inline]
    pub fn zero() -> Self {
        Self { 0: Uint::ZERO, 1: Uint::ZERO, 2: Default::default() }
    }

    /// Reduce this accumulator to a canonical field element (one Montgomery reduction).
    #[inline]
    pub fn reduce(&self) -> BWFp<BW, LIMBS> {
        BWFp {
            0: BWFp::<BW, LIMBS>::redc(self.0, self.1),
            1: Default::default(),
        }
    }

    /// Compute twice this accumulator.
    #[inline]
    pub fn double(&self) -> Self {
        *self + *self
    }
}

impl<BW: BWParam, const LIMBS: usize> Add for BWFpWide<BW, LIMBS> {
    type Output = Self;

    /// Add two accumulators modulo <i>p&times;2&#x02B7;</i>.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let p: Uint<LIMBS> = uint(BW::MODULUS);
        let (lo, carry) = self.0.carrying_add(&rhs.0, Limb::ZERO);
        let (hi, _) = self.1.carrying_add(&rhs.1, carry);  // < 2p < 2^w
        // the sum is at least p*2^w iff its high half is at least p:
        let (hr, borrow) = hi.borrowing_sub(&p, Limb::ZERO);
        Self::Output {
            0: lo,
            1: Uint::conditional_select(&hr, &hi, Choice::from((borrow.0 & 1) as u8)),
            2: Default::default(),
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> AddAssign for BWFpWide<BW, LIMBS> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<BW: BWParam, const LIMBS: usize> Clone for BWFpWide<BW, LIMBS> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<BW: BWParam, const LIMBS: usize> Copy for BWFpWide<BW, LIMBS> {}

impl<BW: BWParam, const LIMBS: usize> Sub for BWFpWide<BW, LIMBS> {
    type Output = Self;

    /// Subtract two accumulators modulo <i>p&times;2&#x02B7;</i>.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        let p: Uint<LIMBS> = uint(BW::MODULUS);
        let (lo, borrow) = self.0.borrowing_sub(&rhs.0, Limb::ZERO);
        let (hi, borrow) = self.1.borrowing_sub(&rhs.1, borrow);
        // on underflow, add p*2^w back:
        Self::Output {
            0: lo,
            1: Uint::conditional_select(&hi, &hi.wrapping_add(&p), Choice::from((borrow.0 & 1) as u8)),
            2: Default::default(),
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> SubAssign for BWFpWide<BW, LIMBS> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}


#[cfg(test)]
mod tests {
    use crate::bwparam::BW13P310Param;
    use crypto_bigint::NonZero;
    use crypto_bigint::rand_core::RngCore;
    use rand::Rng;
    use std::time::SystemTime;
    use super::*;

    const TESTS: usize = 100;

    /// General BWFp test template.
    #[allow(non_snake_case)]
    fn BWFp_test<BW: BWParam, const LIMBS: usize>() {
        let mut rng = rand::rng();
        let p: Uint<LIMBS> = uint(BW::MODULUS);
        let nzp = NonZero::new(p).unwrap();

        println!();
        println!("Performing {} BW13-P{:03}Fp test(s)...", TESTS, p.bits());
        let now = SystemTime::now();

        // neutral elements:
        assert!(bool::from(BWFp::<BW, LIMBS>::zero().is_zero()));
        assert!(bool::from(BWFp::<BW, LIMBS>::one().is_one()));

        // signed conversion:
        assert_eq!(BWFp::<BW, LIMBS>::from_i64(-17) + BWFp::from_word(17), BWFp::zero());

        for _t in 0..TESTS {
            // Montgomery form:
            let v1: Word = rng.next_u64() & 0xF;
            let m1: BWFp<BW, LIMBS> = BWFp::from_word(v1);
            assert_eq!(Uint::from_word(v1), m1.to_uint());

            let e1: BWFp<BW, LIMBS> = BWFp::random(&mut rng);
            assert!(e1.to_uint() < p);
            assert_eq!(e1 + BWFp::zero(), e1);
            assert_eq!(e1*BWFp::one(), e1);

            // addition vs subtraction:
            assert!(bool::from((e1 - e1).is_zero()));
            assert!(bool::from((e1 + (-e1)).is_zero()));
            assert_eq!(-(-e1), e1);

            // double and half:
            assert_eq!(e1.double().half(), e1);
            assert_eq!(e1.half().double(), e1);
            assert_eq!(e1.double()*e1.half(), e1.sq());

            // square and cube:
            assert_eq!(e1.sq(), e1*e1);
            assert_eq!(e1.cb(), e1*e1*e1);

            // field inversion:
            assert!(bool::from((e1*e1.inv()).is_one() | e1.is_zero()));

            // Legendre symbol and square roots:
            let leg = e1.legendre();
            let sr1 = e1.sqrt();
            assert_eq!(leg, e1.inv().legendre());
            assert_eq!(e1.sq().legendre(), 1);
            if leg >= 0 {
                assert_eq!(sr1.sq(), e1);
            } else {
                assert_eq!(sr1.sq(), -e1);  // -1 is a non-residue since p = 3 (mod 4)
            }

            // hybrid multiplication (Word*BWFp, i64*BWFp and Uint*BWFp):
            let k1: Word = rng.next_u64() & 0xF;
            assert_eq!(k1*e1, BWFp::from_word(k1)*e1);
            let s1: i64 = rng.next_u64() as i64;
            assert_eq!(s1*e1, BWFp::from_i64(s1)*e1);
            let mut w1: [Word; LIMBS] = [0; LIMBS];
            rng.fill(&mut w1);
            let u1 = Uint::from_words(w1).rem(&nzp);
            assert_eq!(u1*e1, BWFp::from_uint(Uint::from_words(w1))*e1);
            assert_eq!(BWFp::<BW, LIMBS>::from_slice(&w1), BWFp::from_uint(Uint::from_words(w1)));

            let f1 = BWFp::random(&mut rng);
            let g1 = BWFp::random(&mut rng);

            // commutativity of addition and multiplication:
            assert_eq!(e1 + f1, f1 + e1);
            assert_eq!(e1*f1, f1*e1);

            // associativity:
            assert_eq!((e1 + f1) + g1, e1 + (f1 + g1));
            assert_eq!((e1*f1)*g1, e1*(f1*g1));

            // distributivity:
            assert_eq!(e1*(f1 + g1), e1*f1 + e1*g1);

            // lazy reduction:
            let h1 = BWFp::random(&mut rng);
            assert_eq!(e1.mul_wide(&f1).reduce(), e1*f1);
            assert_eq!(e1.sq_wide().reduce(), e1.sq());
            assert_eq!((e1.mul_wide(&f1) + g1.mul_wide(&h1)).reduce(), e1*f1 + g1*h1);
            assert_eq!((e1.mul_wide(&f1) - g1.mul_wide(&h1)).reduce(), e1*f1 - g1*h1);
            assert_eq!((g1.mul_wide(&h1) - e1.mul_wide(&f1)).reduce(), g1*h1 - e1*f1);
            assert_eq!(e1.mul_wide(&f1).double().reduce(), (e1*f1).double());
            let mut acc = BWFpWide::zero();
            let mut sum = BWFp::zero();
            for _ in 0..8 {
                acc += e1.mul_wide(&f1);
                acc -= g1.sq_wide();
                sum += e1*f1 - g1.sq();
            }
            assert_eq!(acc.reduce(), sum);

            // hashing:
            let data = e1.to_bytes();
            assert_eq!(BWFp::<BW, LIMBS>::shake128(&data), BWFp::shake128(&data));
            assert_eq!(BWFp::<BW, LIMBS>::shake256(&data), BWFp::shake256(&data));
            assert!(BWFp::<BW, LIMBS>::shake256(&data).to_uint() < p);
        }
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
    fn BW13P310Fp_test() {
        const LIMBS: usize = BW13P310Param::LIMBS;
        BWFp_test::<BW13P310Param, LIMBS>();
    }

}
