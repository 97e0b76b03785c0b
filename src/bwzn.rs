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

/// The <b>F</b><sub><i>r</i></sub> &simeq; <b>&Zopf;</b>/<i>r</i><b>&Zopf;</b> scalar field,
/// where <i>r</i> is the prime order of <b><i>G</i></b><sub>1</sub>, <b><i>G</i></b><sub>2</sub>,
/// and <b><i>G</i></b><sub><i>T</i></sub>.
pub struct BWZn<BW: BWParam, const LIMBS: usize>(
    #[doc(hidden)]
    pub Uint<LIMBS>,
    #[doc(hidden)]
    pub PhantomData<BW>,
);

pub type BW13P310Zn = BWZn<crate::bwparam::BW13P310Param, 5>;


impl<BW: BWParam, const LIMBS: usize> BWZn<BW, LIMBS> {

    /// Montgomery reduction of <i>t</i> = (<i>t_lo</i>, <i>t_hi</i>) in range 0..&lt;<i>r&times;2&#x02B7;</i>,
    /// where <i>r &lt; 2&#x02B7;</i> is the BW13 group order and <i>w</i> &#x2254; <i>64&times;LIMBS</i>.
    ///
    /// Return <i>t&times;2&#8315;&#x02B7;</i> in range 0..&lt;<i>r</i>.
    #[inline]
    fn redc(t_lo: Uint<LIMBS>, t_hi: Uint<LIMBS>) -> Uint<LIMBS> {
        let r: Uint<LIMBS> = uint(BW::ORDER);  // r < 2^w
        let q: Uint<LIMBS> = uint(BW::NEG_INV_ORD);  // q := -1/r mod 2^w
        // m ← ((t mod s)*q) mod s = (t_lo*q) mod s:
        let (m, _) = t_lo.widening_mul(&q);
        // t ← (t + m*r) / s:
        let (mr_lo, mr_hi) = m.widening_mul(&r);
        let (_, carry) = t_lo.carrying_add(&mr_lo, Limb::ZERO);
        let (t, _) = t_hi.carrying_add(&mr_hi, carry);
        // return if t < r { t } else { t - r }
        t - Uint::conditional_select(&r, &Uint::ZERO, t.ct_lt(&r))
    }

    #[inline]
    fn add_mod(a: &Uint<LIMBS>, b: &Uint<LIMBS>) -> Uint<LIMBS> {
        let r: Uint<LIMBS> = uint(BW::ORDER);
        let (s, _) = a.carrying_add(b, Limb::ZERO);
        let (d, borrow) = s.borrowing_sub(&r, Limb::ZERO);
        Uint::conditional_select(&d, &s, Choice::from((borrow.0 & 1) as u8))
    }

    #[inline]
    fn sub_mod(a: &Uint<LIMBS>, b: &Uint<LIMBS>) -> Uint<LIMBS> {
        let r: Uint<LIMBS> = uint(BW::ORDER);
        let (d, borrow) = a.borrowing_sub(b, Limb::ZERO);
        Uint::conditional_select(&d, &d.wrapping_add(&r), Choice::from((borrow.0 & 1) as u8))
    }

    /// Lift a 320-bit unsigned integer <i>w</i> to a Montgomery-form scalar,
    /// reducing it modulo the 267-bit group order: the result is <i>w&middot;s</i> mod <i>r</i> =
    /// redc((<i>w</i> mod <i>r</i>)&middot;(<i>s&sup2;</i> mod <i>r</i>)),
    /// where <i>s > r</i> is a power of 2.
    #[inline]
    pub fn from_uint(w: Uint<LIMBS>) -> Self {
        let s2: Uint<LIMBS> = uint(BW::MONTY_N);
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

    /// Convert an integer <i>w</i> represented by a sequence of words to Montgomery form.
    #[inline]
    pub fn from_words(v: [Word; LIMBS]) -> Self {
        Self::from_uint(Uint::from_words(v))
    }

    /// Reduce 2&times;LIMBS words of hash output into a scalar.
    ///
    /// The lift to &Zopf; is truncated below <i>r&times;2&#x02B7;</i> and converted via
    /// Montgomery reduction, so the deviation from uniform sampling over &Zopf;<i>&#x1D63;</i>
    /// stays negligible.
    #[inline]
    fn from_digest(out: &mut [u8]) -> Self {
        let r: Uint<LIMBS> = uint(BW::ORDER);
        let keep = 64*LIMBS + (r.bits() as usize) - 1;
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

    /// Hash input data into a scalar field &Zopf;<i>&#x1D63;</i> element with SHAKE-128.
    #[inline]
    pub fn shake128(data: &[u8]) -> Self {
        let mut out = vec![0u8; 2*LIMBS*8];
        Shake128::digest_xof(data, &mut out);
        Self::from_digest(&mut out)
    }

    /// Hash input data into a scalar field &Zopf;<i>&#x1D63;</i> element with SHAKE-256.
    #[inline]
    pub fn shake256(data: &[u8]) -> Self {
        let mut out = vec![0u8; 2*LIMBS*8];
        Shake256::digest_xof(data, &mut out);
        Self::from_digest(&mut out)
    }

    /// The canonical representative of this scalar in &lbrack;0, <i>r</i>).
    #[inline]
    pub fn to_uint(&self) -> Uint<LIMBS> {
        Self::redc(self.0, Uint::ZERO)
    }

    /// Parity of the canonical representative.
    #[inline]
    pub fn is_odd(&self) -> Choice {
        Self::redc(self.0, Uint::ZERO).is_odd()
    }

    /// Compute <i>v</i> = `self`<i>&#x02E3;</i> mod <i>r</i>.
    #[inline]
    fn pow(&self, x: Uint<LIMBS>) -> Self {
        // the exponent (restricted to inversion) is fixed and public:
        let mut v = Self::one();
        let w = x.as_words();
        for i in (0..LIMBS << 6).rev() {
            v = v.sq();
            if ((w[i >> 6] >> (i & 63)) & 1) == 1 {
                v *= *self;
            }
        }
        v
    }
}

impl<BW: BWParam, const LIMBS: usize> Add for BWZn<BW, LIMBS> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::Output {
            0: Self::add_mod(&self.0, &rhs.0),
            1: Default::default(),
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> AddAssign for BWZn<BW, LIMBS> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = Self::add_mod(&self.0, &rhs.0);
    }
}

impl<BW: BWParam, const LIMBS: usize> BWField for BWZn<BW, LIMBS> {
    /// Little-endian bytes of the canonical representative, padded to 8&times;LIMBS bytes.
    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        let binding = self.to_uint();
        let mut bytes = Vec::<u8>::with_capacity(LIMBS << 3);
        for u in binding.as_words() {
            bytes.extend_from_slice(&u.to_le_bytes());
        }
        bytes
    }

    #[inline]
    fn double(&self) -> Self {
        Self {
            0: Self::add_mod(&self.0, &self.0),
            1: Default::default(),
        }
    }

    /// Compute <i>`self`/2</i> mod <i>r</i>.
    #[inline]
    fn half(&self) -> Self {
        let r: Uint<LIMBS> = uint(BW::ORDER);
        Self {
            0: Uint::conditional_select(&self.0, &self.0.wrapping_add(&r), self.0.is_odd()) >> 1,
            1: Default::default(),
        }
    }

    #[inline]
    fn sq(&self) -> Self {
        let (lo, hi) = self.0.square_wide();
        Self {
            0: Self::redc(lo, hi),
            1: Default::default(),
        }
    }

    #[inline]
    fn cb(&self) -> Self {
        self.sq()*(*self)
    }

    /// Compute <i>`self`<sup>r-2</sup></i> mod <i>r</i>, the inverse of `self`
    /// (or 0 if `self` is 0).
    #[inline]
    fn inv(&self) -> Self {
        let r: Uint<LIMBS> = uint(BW::ORDER);
        self.pow(r.wrapping_sub(&Uint::from_word(2)))
    }
}

impl<BW: BWParam, const LIMBS: usize> Clone for BWZn<BW, LIMBS> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<BW: BWParam, const LIMBS: usize> ConditionallySelectable for BWZn<BW, LIMBS> {
    #[inline]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            0: Uint::conditional_select(&a.0, &b.0, choice),
            1: Default::default(),
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> ConstantTimeEq for BWZn<BW, LIMBS> {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl<BW: BWParam, const LIMBS: usize> Copy for BWZn<BW, LIMBS> {}

impl<BW: BWParam, const LIMBS: usize> Debug for BWZn<BW, LIMBS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self, f)
    }
}

impl<BW: BWParam, const LIMBS: usize> Display for BWZn<BW, LIMBS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_uint().to_string_radix_vartime(10))
    }
}

impl<BW: BWParam, const LIMBS: usize> Mul for BWZn<BW, LIMBS> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        let (lo, hi) = self.0.widening_mul(&rhs.0);
        Self::Output {
            0: Self::redc(lo, hi),
            1: Default::default(),
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> Mul<BWZn<BW, LIMBS>> for Word {
    type Output = BWZn<BW, LIMBS>;

    /// Multiply a scalar by a 4-bit word via a short double-and-add chain.
    #[inline]
    fn mul(self, rhs: BWZn<BW, LIMBS>) -> Self::Output {
        assert!(self < 1 << 4);  // only meant for very small factors
        let mut val = Self::Output::zero();
        let mut fac = self as u8;
        let mut add = rhs;
        for _ in 0..4 {
            val = BWZn::conditional_select(&val, &(val + add), Choice::from(fac & 1));
            fac >>= 1;
            add += add;
        }
        val
    }
}

impl<BW: BWParam, const LIMBS: usize> Mul<BWZn<BW, LIMBS>> for Uint<LIMBS> {
    type Output = BWZn<BW, LIMBS>;

    #[inline]
    fn mul(self, rhs: BWZn<BW, LIMBS>) -> Self::Output {
        BWZn::from_uint(self)*rhs
    }
}

impl<BW: BWParam, const LIMBS: usize> MulAssign for BWZn<BW, LIMBS> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        let (lo, hi) = self.0.widening_mul(&rhs.0);
        self.0 = Self::redc(lo, hi);
    }
}

impl<BW: BWParam, const LIMBS: usize> Neg for BWZn<BW, LIMBS> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::Output {
            0: Self::sub_mod(&Uint::ZERO, &self.0),
            1: Default::default(),
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> One for BWZn<BW, LIMBS> {
    #[inline]
    fn one() -> Self {
        let s2: Uint<LIMBS> = uint(BW::MONTY_N);
        Self {
            0: Self::redc(s2, Uint::ZERO),  // (1*s) mod r
            1: Default::default(),
        }
    }

    fn is_one(&self) -> Choice {
        Self::redc(self.0, Uint::ZERO).ct_eq(&Uint::ONE)
    }
}

impl<BW: BWParam, const LIMBS: usize> PartialEq for BWZn<BW, LIMBS> {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl<BW: BWParam, const LIMBS: usize> Random for BWZn<BW, LIMBS> {
    /// Pick a uniform element from &Zopf;<i>&#x1D63;</i> by rejection sampling mod <i>r</i>.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let r: Uint<LIMBS> = uint(BW::ORDER);
        let top = (r.bits() as usize - 1) >> 6;  // index of the most significant word of r
        let mask: Word = Word::MAX >> ((64*(top + 1)) - r.bits() as usize);
        let mut w: [Word; LIMBS] = [0; LIMBS];
        loop {
            // uniformly sample the bit capacity of the order:
            rng.fill(&mut w[..=top]);
            w[top] &= mask;
            // rejection sampling for the most significant word:
            while w[top] > r.as_words()[top] {
                w[top] = rng.next_u64() & mask;
            }
            // rejection sampling for the whole value:
            let v = Uint::from_words(w);
            if v < r {
                return Self::from_uint(v);
            }
        }
    }

    /// Try to pick a uniform element from &Zopf;<i>&#x1D63;</i> by rejection sampling mod <i>r</i>.
    fn try_random<R: TryRngCore + ?Sized>(rng: &mut R) -> Result<Self, <R as TryRngCore>::Error> where R: TryRngCore {
        let r: Uint<LIMBS> = uint(BW::ORDER);
        let top = (r.bits() as usize - 1) >> 6;
        let mask: Word = Word::MAX >> ((64*(top + 1)) - r.bits() as usize);
        let mut w: [Word; LIMBS] = [0; LIMBS];
        loop {
            for wi in &mut w[..=top] {
                *wi = rng.try_next_u64()?
            }
            w[top] &= mask;
            while w[top] > r.as_words()[top] {
                w[top] = rng.try_next_u64()? & mask;
            }
            let v = Uint::from_words(w);
            if v < r {
                return Ok(Self::from_uint(v));
            }
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> Sub for BWZn<BW, LIMBS> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::Output {
            0: Self::sub_mod(&self.0, &rhs.0),
            1: Default::default(),
        }
    }
}

impl<BW: BWParam, const LIMBS: usize> SubAssign for BWZn<BW, LIMBS> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = Self::sub_mod(&self.0, &rhs.0);
    }
}

impl<BW: BWParam, const LIMBS: usize> Zero for BWZn<BW, LIMBS> {
    #[inline]
    fn zero() -> Self {
        Self {
            0: Uint::ZERO,
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


#[cfg(test)]
mod tests {
    use crate::bwparam::BW13P310Param;
    use crypto_bigint::NonZero;
    use crypto_bigint::rand_core::RngCore;
    use rand::Rng;
    use std::time::SystemTime;
    use super::*;

    const TESTS: usize = 100;

    /// General BWZn test template.
    #[allow(non_snake_case)]
    fn BWZn_test<BW: BWParam, const LIMBS: usize>() {
        let mut rng = rand::rng();
        let r: Uint<LIMBS> = uint(BW::ORDER);
        let nzr = NonZero::new(r).unwrap();

        println!();
        println!("Performing {} BW13-P310Zn test(s)...", TESTS);
        let now = SystemTime::now();

        // neutral elements:
        assert!(bool::from(BWZn::<BW, LIMBS>::zero().is_zero()));
        assert!(bool::from(BWZn::<BW, LIMBS>::one().is_one()));
        assert!(bool::from(BWZn::<BW, LIMBS>::zero().inv().is_zero()));

        // r - 1 = -1:
        assert_eq!(BWZn::<BW, LIMBS>::from_uint(r.wrapping_sub(&Uint::ONE)), -BWZn::one());

        for _t in 0..TESTS {
            // Montgomery form:
            let v1: Word = rng.next_u64();
            let m1: BWZn<BW, LIMBS> = BWZn::from_word(v1);
            assert_eq!(Uint::from_word(v1), m1.to_uint());

            let e1: BWZn<BW, LIMBS> = BWZn::random(&mut rng);
            assert!(e1.to_uint() < r);
            assert_eq!(e1 + BWZn::zero(), e1);
            assert_eq!(e1*BWZn::one(), e1);

            // addition vs subtraction:
            assert!(bool::from((e1 - e1).is_zero()));
            assert!(bool::from((e1 + (-e1)).is_zero()));

            // double and half:
            assert_eq!(e1.double().half(), e1);
            assert_eq!(e1.half().double(), e1);
            assert_eq!(e1.double()*e1.half(), e1.sq());

            // square and cube:
            assert_eq!(e1.sq(), e1*e1);
            assert_eq!(e1.cb(), e1*e1*e1);

            // field inversion:
            assert!(bool::from((e1*e1.inv()).is_one() | e1.is_zero()));

            // hybrid multiplication (Word*BWZn and Uint*BWZn):
            let k1: Word = rng.next_u64() & 0xF;
            assert_eq!(k1*e1, BWZn::from_word(k1)*e1);
            let mut w1: [Word; LIMBS] = [0; LIMBS];
            rng.fill(&mut w1);
            let u1 = Uint::from_words(w1).rem(&nzr);
            assert_eq!(u1*e1, BWZn::from_words(w1)*e1);
            let z1 = BWZn::<BW, LIMBS>::from_uint(u1);
            assert_eq!(z1.to_uint(), u1);
            let zb = z1.to_bytes();
            assert_eq!(zb.len(), 8*LIMBS);
            assert_eq!(zb[..8], u1.as_words()[0].to_le_bytes());

            let f1 = BWZn::random(&mut rng);
            let g1 = BWZn::random(&mut rng);

            // commutativity, associativity, distributivity:
            assert_eq!(e1 + f1, f1 + e1);
            assert_eq!(e1*f1, f1*e1);
            assert_eq!((e1 + f1) + g1, e1 + (f1 + g1));
            assert_eq!((e1*f1)*g1, e1*(f1*g1));
            assert_eq!(e1*(f1 + g1), e1*f1 + e1*g1);
        }

        // hashing is deterministic and domain-separated:
        assert_eq!(BWZn::<BW, LIMBS>::shake128(b"abc"), BWZn::shake128(b"abc"));
        assert_ne!(BWZn::<BW, LIMBS>::shake128(b"abc"), BWZn::shake256(b"abc"));
        assert!(BWZn::<BW, LIMBS>::shake256(b"abc").to_uint() < r);

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
    fn BW13P310Zn_test() {
        const LIMBS: usize = BW13P310Param::LIMBS;
        BWZn_test::<BW13P310Param, LIMBS>();
    }

}
