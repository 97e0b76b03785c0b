#[cfg(not(any(target_pointer_width = "64")))]
compile_error!("this crate requires 64-bit limbs");

use crate::bwfp::BWFp;
use crate::bwfp13::BWFp13;
use crate::bwparam::{uint, BWParam};
use crate::bwpoint::BWPoint;
use crate::bwpoint13::BWPoint13;
use crate::errors::BWError;
use crate::traits::{BWField, One};
use std::marker::PhantomData;
use tracing::{instrument, trace};

pub struct BWPairing<BW: BWParam, const LIMBS: usize>(
    #[doc(hidden)]
    pub PhantomData<BW>,
);

pub type BW13P310Pairing = BWPairing<crate::bwparam::BW13P310Param, 5>;

/// Evaluation point of the line functions: <i>P</i> = (<i>x</i>, <i>y</i>) and the abscissa
/// <i>&beta;x</i> of <i>&phi;</i>(<i>P</i>), which shares the ordinate <i>y</i>.
struct Twin<BW: BWParam, const LIMBS: usize> {
    x: BWFp<BW, LIMBS>,
    y: BWFp<BW, LIMBS>,
    x2: BWFp<BW, LIMBS>,
}

/// A Jacobian point <i>(X : Y : Z)</i> &#x21A6; <i>(X/Z&sup2;, Y/Z&sup3;)</i> over <b>F</b><sub><i>p&sup1;&sup3;</i></sub>.
struct Jacobian<BW: BWParam, const LIMBS: usize> {
    x: BWFp13<BW, LIMBS>,
    y: BWFp13<BW, LIMBS>,
    z: BWFp13<BW, LIMBS>,
}

/// Values of a tangent or chord line and of the matching vertical line,
/// at <i>P</i> and at <i>&phi;</i>(<i>P</i>).
struct Lines<BW: BWParam, const LIMBS: usize> {
    l: BWFp13<BW, LIMBS>,
    v: BWFp13<BW, LIMBS>,
    l2: BWFp13<BW, LIMBS>,
    v2: BWFp13<BW, LIMBS>,
}

/// Running Miller values: <i>l&#x2081;/l&#x2082;</i> at <i>P</i> and <i>s&#x2081;/s&#x2082;</i> at <i>&phi;</i>(<i>P</i>).
struct Miller<BW: BWParam, const LIMBS: usize> {
    l1: BWFp13<BW, LIMBS>,
    l2: BWFp13<BW, LIMBS>,
    s1: BWFp13<BW, LIMBS>,
    s2: BWFp13<BW, LIMBS>,
}

impl<BW: BWParam, const LIMBS: usize> Miller<BW, LIMBS> {
    /// Square the accumulators and multiply in one set of line values.
    #[inline]
    fn sq_mul(&mut self, a: &Lines<BW, LIMBS>) {
        self.l1 = self.l1.sq()*a.l;
        self.l2 = self.l2.sq()*a.v;
        self.s1 = self.s1.sq()*a.l2;
        self.s2 = self.s2.sq()*a.v2;
    }

    /// Multiply in one set of line values.
    #[inline]
    fn mul(&mut self, a: &Lines<BW, LIMBS>) {
        self.l1 *= a.l;
        self.l2 *= a.v;
        self.s1 *= a.l2;
        self.s2 *= a.v2;
    }
}


impl<BW: BWParam, const LIMBS: usize> BWPairing<BW, LIMBS> {

    /// Double <i>T</i> in place and evaluate the tangent line at <i>T</i> and the vertical
    /// line at <i>&lbrack;2&rbrack;T</i> on both points of `at`.
    #[allow(non_snake_case)]
    #[inline]
    fn dbl_line(T: &mut Jacobian<BW, LIMBS>, at: &Twin<BW, LIMBS>) -> Lines<BW, LIMBS> {
        let (X, Y, Z) = (T.x, T.y, T.z);
        let A = X.sq();
        let B = Y.sq();
        let C = B.sq();
        let D = ((X + B).sq() - A - C).double();
        let E = 3u64*A;
        let F = E.sq();
        let X3 = F - D.double();
        let Y3 = E*(D - X3) - 8u64*C;
        let Z3 = (Y*Z).double();

        // tangent line: ay*y + ax*x + c
        let ZZ = Z.sq();
        let ay = Z3*ZZ;
        let ax = -(E*ZZ);
        let c = E*X - B.double();
        let yc = at.y*ay + c;

        // vertical line at [2]T: Z3^2*x - X3
        let Z3s = Z3.sq();
        T.x = X3;
        T.y = Y3;
        T.z = Z3;
        Lines {
            l: at.x*ax + yc,
            v: at.x*Z3s - X3,
            l2: at.x2*ax + yc,
            v2: at.x2*Z3s - X3,
        }
    }

    /// Add the affine point <i>Q</i> = (<i>x&#x2082;</i>, <i>y&#x2082;</i>) to <i>T</i> in place and
    /// evaluate the chord through <i>T</i> and <i>Q</i> and the vertical line at <i>T</i> + <i>Q</i>
    /// on both points of `at`.
    #[allow(non_snake_case)]
    #[inline]
    fn add_line(T: &mut Jacobian<BW, LIMBS>, x2: &BWFp13<BW, LIMBS>, y2: &BWFp13<BW, LIMBS>, at: &Twin<BW, LIMBS>) -> Lines<BW, LIMBS> {
        let (X, Y, Z) = (T.x, T.y, T.z);
        let ZZ = Z.sq();
        let U2 = (*x2)*ZZ;
        let S2 = (*y2)*Z*ZZ;
        let H = U2 - X;
        let HH = H.sq();
        let I = 4u64*HH;
        let J = H*I;
        let rp = S2 - Y;
        let rr = rp.double();
        let V = X*I;
        let X3 = rr.sq() - J - V.double();
        let Y3 = rr*(V - X3) - (Y*J).double();
        let Z3 = (Z + H).sq() - ZZ - HH;

        // chord: ay*y + ax*x + c
        let ay = H*Z*ZZ;
        let ax = -(rp*ZZ);
        let c = rp*X - H*Y;
        let yc = at.y*ay + c;

        // vertical line at T + Q, scaled by Z to match the chord denominator
        let Z3s = Z3.sq();
        T.x = X3;
        T.y = Y3;
        T.z = Z3;
        Lines {
            l: at.x*ax + yc,
            v: (at.x*Z3s - X3)*Z,
            l2: at.x2*ax + yc,
            v2: (at.x2*Z3s - X3)*Z,
        }
    }

    /// Miller loop over the bits of |<i>x</i>|, starting at <i>T</i> = <i>Q</i> and evaluating every
    /// line both at <i>P</i> and at <i>&phi;</i>(<i>P</i>).
    ///
    /// Two consecutive zero bits are processed as a double-double step,
    /// folding in the addition of a set bit that immediately follows.
    #[allow(non_snake_case)]
    fn miller_loop(xQ: &BWFp13<BW, LIMBS>, yQ: &BWFp13<BW, LIMBS>, at: &Twin<BW, LIMBS>) -> Miller<BW, LIMBS> {
        let u = BW::U;
        let bit = |j: isize| ((u[(j as usize) >> 6] >> ((j as usize) & 63)) & 1) == 1;
        let mut T = Jacobian { x: *xQ, y: *yQ, z: BWFp13::one() };
        let mut f = Miller { l1: BWFp13::one(), l2: BWFp13::one(), s1: BWFp13::one(), s2: BWFp13::one() };

        let mut i = uint::<LIMBS>(u).bits() as isize - 2;
        while i >= 0 {
            if bit(i) {
                let D = Self::dbl_line(&mut T, at);
                let A = Self::add_line(&mut T, xQ, yQ, at);
                f.sq_mul(&D);
                f.mul(&A);
                i -= 1;
            } else if i >= 1 {
                let D = Self::dbl_line(&mut T, at);
                let M = Self::dbl_line(&mut T, at);
                // f <- (f^2*D)^2*M = f^4*D^2*M
                f.sq_mul(&D);
                f.sq_mul(&M);
                i -= 1;
                if bit(i) {
                    let A = Self::add_line(&mut T, xQ, yQ, at);
                    f.mul(&A);
                }
                i -= 1;
            } else {
                let D = Self::dbl_line(&mut T, at);
                f.sq_mul(&D);
                i -= 1;
            }
        }
        // fold in the denominator of the final Jacobian abscissa:
        f.l1 *= T.z;
        f.s1 *= T.z;
        f
    }

    /// The optimal pairing for the BW13 curve,
    /// <i>e</i>(<i>P</i>, <i>Q</i>) &#x2254; <i>f</i><sup>3(<i>p&sup1;&sup3;</i> - 1)/<i>r</i></sup>,
    /// where <i>f</i> combines the Miller function <i>f</i><sub>|<i>x</i>|,<i>Q</i></sub>
    /// at <i>P</i> and at <i>&phi;</i>(<i>P</i>) with Frobenius twists and the vertical line
    /// through <i>&pi;&sup2;</i>(<i>Q</i>).
    ///
    /// If either argument is the point at infinity, the result is 1.
    /// Otherwise the arguments are assumed to be valid elements of <i><b>G</b>&#x2081;</i>
    /// and <i><b>G</b>&#x2082;</i>; a zero denominator surfaces as a domain error.
    ///
    /// References:
    ///
    /// * Frederik Vercauteren: "Optimal pairings."
    /// IEEE Transactions on Information Theory, vol. 56, no. 1, pp. 455--461.
    /// IEEE, 2010. https://doi.org/10.1109/TIT.2009.2034881
    ///
    /// * R&eacute;mi Clarisse, Sylvain Duquesne, Olivier Sanders:
    /// "Curves with fast computations in the first pairing group."
    /// In: <i>Cryptology and Network Security -- CANS 2020</i>,
    /// Lecture Notes in Computer Science, vol. 12579, pp. 280--298. Springer, 2020.
    #[allow(non_snake_case)]
    #[instrument(level = "trace", skip_all)]
    pub fn pair(P: &BWPoint<BW, LIMBS>, Q: &BWPoint13<BW, LIMBS>) -> Result<BWFp13<BW, LIMBS>, BWError> {
        let (Some((xP, yP)), Some((xQ, yQ))) = (P.affine(), Q.affine()) else {
            trace!("pairing argument at infinity");
            return Ok(BWFp13::one());
        };
        let at = Twin { x: xP, y: yP, x2: BWFp::from_slice(BW::SVDW)*xP };
        let f = Self::miller_loop(&xQ, &yQ, &at);

        // combine the two Miller values:
        let F = f.l1*f.l2.try_inv()?;
        let num = F.pow_x()*F.frob(1)*f.s1.frob(1)*(BWFp13::from_base(yP) - yQ.frob(2));
        let den = f.s2.frob(1);

        // easy part of the final exponentiation, (num/den)^(p - 1):
        let m = (num.frob(1)*den)*(den.frob(1)*num).try_inv()?;
        Ok(m.final_exp_hard())
    }
}


#[cfg(test)]
mod tests {
    use crate::bwparam::BW13P310Param;
    use crate::bwzn::BWZn;
    use crypto_bigint::{Random, Uint, Zero};
    use std::time::SystemTime;
    use super::*;

    const TESTS: usize = 100;

    /// General BWPairing test template.
    #[allow(non_snake_case)]
    fn BWPairing_test<BW: BWParam, const LIMBS: usize>() {
        let mut rng = rand::rng();
        let r: Uint<LIMBS> = uint(BW::ORDER);

        println!();
        println!("Performing {} BW13-P310Pairing test(s)...", TESTS);
        let now = SystemTime::now();

        // default generators and infinity:
        let O1: BWPoint<BW, LIMBS> = BWPoint::zero();
        let G1: BWPoint<BW, LIMBS> = BWPoint::default_generator();
        let O2: BWPoint13<BW, LIMBS> = BWPoint13::zero();
        let G2: BWPoint13<BW, LIMBS> = BWPoint13::default_generator();
        assert!(bool::from(BWPairing::pair(&O1, &G2).unwrap().is_one()));
        assert!(bool::from(BWPairing::pair(&G1, &O2).unwrap().is_one()));
        assert!(bool::from(BWPairing::pair(&O1, &O2).unwrap().is_one()));

        // non-degeneracy:
        let g0 = BWPairing::pair(&G1, &G2).unwrap();
        assert!(!bool::from(g0.is_one()));
        assert!(bool::from(g0.pow(&r).is_one()));
        assert!(g0.is_valid_gt());

        // bilinearity in each argument:
        let P1: BWPoint<BW, LIMBS> = BWPoint::random(&mut rng);
        let P2: BWPoint<BW, LIMBS> = BWPoint::random(&mut rng);
        let Q1: BWPoint13<BW, LIMBS> = BWPoint13::random(&mut rng);
        let Q2: BWPoint13<BW, LIMBS> = BWPoint13::random(&mut rng);
        let g = BWPairing::pair(&P1, &Q1).unwrap();
        assert_eq!(BWPairing::pair(&(P1 + P2), &Q1).unwrap(), g*BWPairing::pair(&P2, &Q1).unwrap());
        assert_eq!(BWPairing::pair(&P1, &(Q1 + Q2)).unwrap(), g*BWPairing::pair(&P1, &Q2).unwrap());
        assert_eq!(BWPairing::pair(&(-P1), &Q1).unwrap(), g.unitary_inv());

        // the endomorphisms carry over to the target group:
        let mut w = [0 as crypto_bigint::Word; LIMBS];
        w[0] = BW::U[0];
        let u: Uint<LIMBS> = Uint::from_words(w);
        assert_eq!(BWPairing::pair(&P1, &Q1.psi()).unwrap(), g.pow(&u));

        // pairing-based Diffie-Hellman check:
        for _t in 0..TESTS {
            let k: BWZn<BW, LIMBS> = BWZn::random(&mut rng);
            let P: BWPoint<BW, LIMBS> = BWPoint::random(&mut rng);
            let G: BWPoint13<BW, LIMBS> = BWPoint13::random(&mut rng);
            let a = BWPairing::pair(&P, &G.mul_glv(&k)).unwrap();
            let b = BWPairing::pair(&(k*P), &G).unwrap();
            assert_eq!(a, b);
            assert!(a.is_valid_gt() || bool::from(k.is_zero()));
        }

        // bilinearity with scalars on both sides:
        for _t in 0..10 {
            let a: BWZn<BW, LIMBS> = BWZn::random(&mut rng);
            let b: BWZn<BW, LIMBS> = BWZn::random(&mut rng);
            let e = BWPairing::pair(&(a*G1), &G2.mul_glv(&b)).unwrap();
            assert_eq!(e, g0.pow(&(a*b).to_uint()));
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
    fn BW13P310Pairing_test() {
        const LIMBS: usize = BW13P310Param::LIMBS;
        BWPairing_test::<BW13P310Param, LIMBS>();
    }

}
