//! Parameters of the Brezing-Weng curve of embedding degree 13 known as BW13-P310.
//!
//! A BW13 curve is specified by an integer seed <i>x</i> &#8712; &Zopf; such that the values
//! <i>r</i> &#x2254; <i>&Phi;&#x2087;&#x2088;</i>(<i>x</i>) and
//! <i>p</i> &#x2254; <i>(x + 1)&sup2;(x&sup2;&#x2076; - x&sup1;&sup3; + 1)/3 - x&sup2;&#x2077;</i>
//! are both prime, defining the finite field <b>F</b><sub><i>p</i></sub>
//! and the order of the pairing groups.
//! The BW13-P310 curve takes <i>x</i> = <i>-2224</i>, whereby <i>p</i> has 310 bits,
//! <i>r</i> has 267 bits, and <i>p &equiv; 3 (mod 4)</i>.
//!
//! The curve equation is <i>E</i>/<b>F</b><sub><i>p</i></sub> : <i>Y&sup2;Z</i> = <i>X&sup3; + bZ&sup3;</i>
//! with <i>b</i> = <i>-17</i>, whose number of points over <b>F</b><sub><i>p</i></sub> is
//! <i>#E</i>(<b>F</b><sub><i>p</i></sub>) = <i>p + 1 - t</i> = <i>h&#x2081;r</i>,
//! where <i>t</i> &#x2254; <i>-x&sup1;&#x2074; + x + 1</i> is the trace of the Frobenius endomorphism
//! and <i>h&#x2081;</i> = <i>8162224152267</i> is the cofactor of <i><b>G</b>&#x2081;</i>.
//!
//! The degree-13 extension field is
//! <b>F</b><sub><i>p&sup1;&sup3;</i></sub> = <b>F</b><sub><i>p</i></sub>&lbrack;<i>z</i>&rbrack;/&lt;<i>z&sup1;&sup3; + 2</i>&gt;,
//! on which the Frobenius endomorphism acts as <i>z&#x1D56;</i> = <i>&omega;z</i>
//! with <i>&omega;</i> &#x2254; <i>(-2)<sup>(p-1)/13</sup></i>.
//! Since 13 is prime, the curve admits no twist of degree greater than 1 over this field,
//! and <i><b>G</b>&#x2082;</i> is the <i>r</i>-torsion of the trace-zero subgroup of
//! <i>E</i>(<b>F</b><sub><i>p&sup1;&sup3;</i></sub>), whose cofactor <i>h'</i> has 3451 bits.
//!
//! The curve has <i>j</i>-invariant 0, hence the endomorphism
//! <i>&phi;</i>(<i>x</i>, <i>y</i>) = (<i>&beta;x</i>, <i>y</i>) where
//! <i>&beta;</i> &#x2254; <i>(-1 + &radic;-3)/2</i> is a primitive cube root of unity mod <i>p</i>
//! (the same constant used by the Shallue-van de Woestijne map).
//! On <i><b>G</b>&#x2082;</i>, the map
//! <i>&psi;</i>(<i>x</i>, <i>y</i>) = (<i>&beta;&sup2;x&#x1D56;</i>, <i>y&#x1D56;</i>)
//! acts as multiplication by <i>-x</i> = <i>2224</i>.
//!
//! References:
//!
//! * Friederike Brezing, Annegret Weng:
//! "Elliptic curves suitable for pairing based cryptography."
//! <i>Designs, Codes and Cryptography</i>, vol. 37, pp. 133--141, Springer, 2005.
//! https://doi.org/10.1007/s10623-004-3808-4
//!
//! * R&eacute;mi Clarisse, Sylvain Duquesne, Olivier Sanders:
//! "Curves with fast computations in the first pairing group."
//! In: Krenn, S., Shulman, H., Vaudenay, S. (eds). <i>Cryptology and Network Security -- CANS 2020</i>.
//! Lecture Notes in Computer Science, vol. 12579, pp. 280--298.
//! Springer, Cham. 2020. https://doi.org/10.1007/978-3-030-65411-5_14

use crate::bwfp::BWFp;
use crate::bwfp13::BWFp13;
use crate::errors::BWError;
use crate::traits::{BWField, One};
use crypto_bigint::{Uint, Word};

pub trait BWParam {
    const U: &'static [Word];                 // the BW13 curve seed, in absolute value (the seed is negative)
    const LIMBS: usize;                       // number of limbs required to represent a base field element
    const MODULUS: &'static [Word];           // base finite field modulus p = (x + 1)^2*(x^26 - x^13 + 1)/3 - x^27
    const NEG_INV_MOD: &'static [Word];       // -1/p mod 2^(64*LIMBS)
    const MONTY_P: &'static [Word];           // (2^(64*LIMBS))^2 mod p
    const ORDER: &'static [Word];             // cryptographic group order r = Phi_78(x)
    const NEG_INV_ORD: &'static [Word];       // -1/r mod 2^(64*LIMBS)
    const MONTY_N: &'static [Word];           // (2^(64*LIMBS))^2 mod r
    const SQRT_NEG_3: &'static [Word];        // sqrt(-3) mod p
    const SVDW: &'static [Word];              // β = (-1 + sqrt(-3))/2 mod p, cube root of unity and Shallue & van de Woestijne constant
    const FROB: &'static [Word];              // ω^j mod p for 0 <= j < 13, where z^p = ω*z, one element per LIMBS words
    const COFACTOR_G1: &'static [Word];       // h1 = #E(F_p)/r
    const COFACTOR_G2: &'static [Word];       // h' = #T/r, with T the trace-zero subgroup of E(F_{p^13})
    const GEN1_X: &'static [Word];            // affine coordinates of the default generator of G_1
    const GEN1_Y: &'static [Word];
    const GEN2_X: &'static [Word];            // affine coordinates of the default generator of G_2, one coefficient per LIMBS words
    const GEN2_Y: &'static [Word];
    const CURVE_B: i64 = -17;                 // curve equation coefficient
}


pub struct BW13P310Param;

impl BWParam for BW13P310Param {
    const U: &'static [Word] = &[  // the BW13 curve seed in absolute value
        0x00000000000008B0,
        // x = -2224
    ];
    const LIMBS: usize = 5;
    const MODULUS: &'static [Word] = &[  // base finite field modulus
        0xD89000000019228B, 0x76C31BF505591835, 0xDC71CEFCABD54C60, 0x30C2D95B3183A1C1, 0x0035AB7292654E9F,
        // p = 1749234309176102157657582860550885176950582224007184238236721873530271444092780387026731606667: 310 bits
    ];
    const NEG_INV_MOD: &'static [Word] = &[  // -1/p mod 2^(64*LIMBS)
        0x6B6F2C4202134ADD, 0xC5FEB4ADC467F9A0, 0x820339B35F79A73B, 0x0272DC0FE226C825, 0xE361BDE644C3B21D,
    ];
    const MONTY_P: &'static [Word] = &[  // (2^(64*LIMBS))^2 mod p
        0x779A42C3FDD68954, 0x3989FE31118A0F64, 0xCC319F8AC91C3ADB, 0xC25549302B7DF1D7, 0x00169F4029C1F2C5,
    ];
    const ORDER: &'static [Word] = &[  // cryptographic group order
        0x476162F7697A2751, 0xE253E37867EED259, 0xA63DDDA057ED01B7, 0xCDFCE88E6B386419, 0x000000000000073A,
        // r = 214308536073499611791347244564448891485414130299542820997821295614787605549950801: 267 bits
    ];
    const NEG_INV_ORD: &'static [Word] = &[  // -1/r mod 2^(64*LIMBS)
        0x24AFFFFFFFB47E4F, 0xB2DEA5DB79329B38, 0x0A1E8A41128B861B, 0x8D1964B8E03909AA, 0xE9C8DDCE5AC17795,
    ];
    const MONTY_N: &'static [Word] = &[  // (2^(64*LIMBS))^2 mod r
        0xFF29F0C487596613, 0xAF2DC6EF2CB1A9DE, 0x0E58EBBCD3D42114, 0x7CA43F9CADA08B3B, 0x000000000000034A,
    ];
    const SQRT_NEG_3: &'static [Word] = &[  // sqrt(-3) mod p
        0x9766ECC91E5BA32C, 0x70CEC0194D7B4B33, 0x7C4E8E8ADA95CD04, 0xABB4ED8DD2212388, 0x0035AB6E4E1F9062,
    ];
    const SVDW: &'static [Word] = &[  // (-1 + sqrt(-3))/2 mod p
        0xB7FB76648F3A62DB, 0x73C8EE07296A31B4, 0x2C602EC3C3358CB2, 0xEE3BE37481D262A5, 0x0035AB7070426F80,
    ];
    const FROB: &'static [Word] = &[  // ω^j mod p for j = 0..12
        0x0000000000000001, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000, 0x0000000000000000,
        0x5CE8F8A167F7D846, 0x7FE529A2FBFEF6F0, 0x0E03880CA1C6CAB0, 0xB2A9053F84CFA1AC, 0x00157D04DFA056A8,
        0xD1330E675B311180, 0x7C18C6373F70666D, 0xC3833760FD7A60D6, 0x60A5BABA93F5DD28, 0x001A8E1E26D553C5,
        0x54717AFF8F116168, 0x330B4C72152B4AF9, 0x362E5B23EC2BBD82, 0x6CD4A198C45CAF37, 0x00312A12F76C074C,
        0x1F67D1F8CD8F7D6A, 0xA522A1B3EC513E1F, 0xB232F19C4700AF26, 0xF434539C29EE61D1, 0x0034B3CDA41746F6,
        0x5BC8A5F06B04F754, 0x2428C4EB3B3C6216, 0x27FEFF534ABD19A7, 0x8F074A5FE8BE347F, 0x0004CB736AA33D69,
        0x22288FAEF832E855, 0x37F107354BB3F793, 0xE77CE8E53ECB07DB, 0xF6B78BE42ED05AA9, 0x001C2F568D10671F,
        0x8DF535DCA0EEF5D7, 0xF5C405CFEB6F2040, 0xE3219860502C0476, 0x8502D8C0395DDBD4, 0x001DD082ECFC0B0D,
        0xDA25A1E736AE6996, 0x52245196AC1F9959, 0xFA2B6F91CF067BE5, 0x494407128642051D, 0x0008F2EB7CA89ED4,
        0xA6A4D6C98E92732A, 0x3EBA22C5AC9E59C5, 0x3FFAA48202091231, 0xA6EEAA1D4B4A9B43, 0x002B14448958C119,
        0x1491C98C0A96D86B, 0xC22F2B714E73CF53, 0x654D369834403A78, 0x1A8B83684DC79ADE, 0x003222C860197A8D,
        0xA1AB16AFE9E9EC82, 0x73DF8ABD8F9531EE, 0x57C048B3FDF99072, 0x44A2E28C58DA1196, 0x0008C7ECF4B10C4E,
        0x070CE79622FDB207, 0x525EE9373F5D54B7, 0x636388C20369FF78, 0x86D976268A6E249B, 0x003409EC1F509748,
    ];
    const COFACTOR_G1: &'static [Word] = &[  // h1 = (p + 1 - t)/r
        0x0000076C6A789ECB,
        // h1 = 8162224152267
    ];
    const COFACTOR_G2: &'static [Word] = &[  // h' = #T/r: 3451 bits
        0x24CB632295A22749, 0xB8CBC0DE6CE263E4, 0x85B8EB1068BCD40D, 0x6C782E26B684E369,
        0xE3FFF4E8ABA10D80, 0x9B9A6D9D5FBDE14F, 0xA5C212C1D2B4E35A, 0x5CEA6FD03778824C,
        0xBB05EB40588B8B83, 0x02C5D8B33DD20D16, 0x3E88D31EEFD45734, 0xD83A82AEB092D644,
        0x1E4ECAD0B7C03DA1, 0x8F9BE6EA287D3ABB, 0x65B0A1C1FD991B8B, 0x73F89AB5A04B5D44,
        0x60F78A2ECD08BE12, 0x0185ADF052F90F9D, 0x148BA30B84456FDD, 0xA685FC40BF71E2E2,
        0x6635411F2A17D26F, 0x370D31A5C9DE7DAB, 0x27248721835F4FA3, 0xE47C352D9FDA836F,
        0x3DAF0E6AD7D9CEF7, 0xA166C023AA9B8F20, 0xC87198A35511F690, 0x29A7C2736ECD7A4B,
        0x8AE2E80D4266AD18, 0x7E091C3D5028A80E, 0x1501F779E07C0DD4, 0x1F50A88EBDD9DF67,
        0x7FDA7A43A899DAA0, 0x47A5ADC57CA03992, 0xF0F0CE8F0AEED030, 0x8EE180A543FD03E0,
        0xA03EF7FE89F435B4, 0x995EFE09A66FBEF5, 0x8FE5CCCE2FF844C1, 0x92BC9EA25461A907,
        0xBF88A683DA7E23B9, 0x7662F4E88A19779F, 0x5ACDA96244947EC9, 0xB9C2BCD3D7A2E091,
        0x7EF7E7E95B32C296, 0x8EF7EF1AA3203BC3, 0x0F252F9629EBF125, 0x103D7365A6952BFA,
        0xC2F411B3D57B0E77, 0x02090288428CD5E5, 0x3F146794C78B47F7, 0x11165C3B06725FAE,
        0xF00DF8B11C21B198, 0x04485AEFD07F8492,
    ];
    const GEN1_X: &'static [Word] = &[  // G1 = [h1](3, y)
        0xD704086773CDACEA, 0x49AFA9CF393B12E6, 0x7F826074D2704461, 0x67A23D49EB505CC2, 0x00345E39E81BDEA2,
    ];
    const GEN1_Y: &'static [Word] = &[
        0xDCA559483B81782B, 0x4B2DA071380CB214, 0xC48F7EA2D242078B, 0x3297363AE5EE1772, 0x0027347777C9F9B8,
    ];
    const GEN2_X: &'static [Word] = &[  // G2 = [h'](π(Q0) - Q0) with Q0 = (z, sqrt(z^3 - 17))
        0xD35A4CB7400439A4, 0x6297D71DA1F2793B, 0x2CD2D697EC2D9FC5, 0xB7657A66C678CA69, 0x0013B5DFFB132C19,
        0x2738E29A80028115, 0x2479ED900F1C313D, 0xB0E0C5D720A4092D, 0xD84B2BD274B3EF95, 0x0019008557FFD12A,
        0x163CED46D713446A, 0xD152F08D50D06DCD, 0xFF8563CE05E84C29, 0x696C41A758D51BA6, 0x002BB288EC752CB2,
        0x9E463DBA06A337D1, 0x61F4263A3CF5F180, 0x9A7B7D9E0376022F, 0x68A0ACD559A0796D, 0x000D8A1449949013,
        0x4D5D4B3A99F54827, 0xC162A2D0EB2D67E8, 0x2656C6A5317334D6, 0x8ACB7C91B413EF25, 0x001CDE13CE9EAB3E,
        0x7F8BD9D951262B78, 0xB36EDEEFE50EF072, 0x6B823A691B3A0A8D, 0x28B5A54C2F3EA118, 0x0022CE116927C65A,
        0x4D375A2968B08C64, 0x4B1090628A65C1EB, 0x2537FBF0B2E4B21E, 0x11704D5DD9A46D4E, 0x0016B2F2D6B284E9,
        0xB433B8F02E1A0E7C, 0xE1A9CB5FD8EF5B1B, 0x5EA67770527BB88F, 0xB30E8097CE40382A, 0x00256A3570F7BA81,
        0xA9CD9C849F5FBB29, 0xD5786734DCD53CC3, 0xA2264B65B673CA40, 0x171E61F6306F3319, 0x0000C5D2DABA0599,
        0x49E62343EC5D47C4, 0x854FD4A4A74B98C9, 0xB3E892B801448BDA, 0xC3B39D722FEB0CBE, 0x00020FFEFD7946A3,
        0xB2B6CF51FD36739C, 0x514CF04CE2D749BB, 0xB93FDD43C695B805, 0x535F6E8D58350001, 0x0032991D5EDCC956,
        0xBB60016B431B3D96, 0x6170F73E41CD5CCA, 0x79628DC4A0CB1313, 0xEF03079BC6E32818, 0x000695DC50E4213A,
        0xD2C91687A0755153, 0x6D22BCF42581449B, 0x6490F1BD7C148181, 0x79F7772EB601C760, 0x00098D5AD8866929,
    ];
    const GEN2_Y: &'static [Word] = &[
        0x9D2A290543D2EA6F, 0x11B88B9827F703B7, 0x32A2E053726C57E5, 0xE8836DD887A2EC16, 0x001E273DA1596388,
        0x5CCA975C3E0700F5, 0xB11137EDDCA3B46E, 0x1FAA7E76894B665D, 0x048E018139BD3FAF, 0x0020A4AF8D9DC459,
        0x85DB3873AE7A6660, 0x2CFCA5998814B394, 0xA1FE6653543BD1A3, 0x69820AA3DAB29560, 0x0005C76937E3FDC3,
        0x779D689EC314FE5B, 0x7CC54FE479C6A045, 0x0942F6388B9C9C88, 0xB08FB0D17D0DA639, 0x0005727D2DEA6D84,
        0x2223CCE87EAE064A, 0x1BF6452F73EAF146, 0xAC1EF88A85D3D9E7, 0x7A0550A684278731, 0x000714AC29B91794,
        0x5917FF908FFAF30A, 0xD37B86A7C8424449, 0x8084ECD172A47B43, 0x9B7AB8BDBF5982D5, 0x002A4F4B4D8CF05D,
        0x3739A9B4BF12C31C, 0x41AD32AE91CFC244, 0xA585FA73DEA43D5B, 0xEA02996BA315A66A, 0x000558205E3F0E02,
        0x2FD1AEA892BD514D, 0xCE77FDD02AC793B6, 0x1C338E0187365508, 0x3CFDBD3EEE02A0AE, 0x002E6653CCBA66B3,
        0xF56857BDD01EB1CB, 0x653BAA4CC9AC4634, 0x593BADE1FAC6FE04, 0xD506C9052DC15252, 0x003025EC4047BFFA,
        0x37093E9F7A131F01, 0xCFA44CD09ED5D82C, 0x92E43B4BD0C4C418, 0xC34259FBE7FBF52E, 0x001E8A0BADF94C55,
        0x9644FD8FBD3DD327, 0x40E5B032748B19D0, 0x0D32162BE5A71FF2, 0xE7D7574EE82E3D26, 0x001E27031238C1D3,
        0x94CFEB887C442E17, 0x99456A621A3BC105, 0xCC34AEDFF6BC74F1, 0x69075594DB11FFD1, 0x0012495FA1985B73,
        0x53578AFCDC009CC1, 0xB7D049E7D668BDFA, 0xDFE9DE3BAFE947DB, 0x57CD39D83730713E, 0x001EC1DA489DD3A8,
    ];
}

/// Convert a little-endian word slice into a <i>LIMBS</i>-limb unsigned integer,
/// truncating or zero-padding as needed.
#[inline]
pub(crate) fn uint<const LIMBS: usize>(w: &[Word]) -> Uint<LIMBS> {
    Uint::from_words(core::array::from_fn(|i| if i < w.len() { w[i] } else { 0 }))
}

/// Check the consistency of a parameter table before any arithmetic relies on it.
pub fn validate<BW: BWParam, const LIMBS: usize>() -> Result<(), BWError> {
    if BW::LIMBS != LIMBS {
        return Err(BWError::InvalidCurveParameters(
            format!("parameter table expects {} limbs, instantiated with {}", BW::LIMBS, LIMBS)));
    }
    let single = [
        ("MODULUS", BW::MODULUS), ("NEG_INV_MOD", BW::NEG_INV_MOD), ("MONTY_P", BW::MONTY_P),
        ("ORDER", BW::ORDER), ("NEG_INV_ORD", BW::NEG_INV_ORD), ("MONTY_N", BW::MONTY_N),
        ("SQRT_NEG_3", BW::SQRT_NEG_3), ("SVDW", BW::SVDW),
        ("GEN1_X", BW::GEN1_X), ("GEN1_Y", BW::GEN1_Y),
    ];
    for (name, table) in single {
        if table.len() != LIMBS {
            return Err(BWError::InvalidCurveParameters(
                format!("{} has {} words, expected {}", name, table.len(), LIMBS)));
        }
    }
    let wide = [("FROB", BW::FROB), ("GEN2_X", BW::GEN2_X), ("GEN2_Y", BW::GEN2_Y)];
    for (name, table) in wide {
        if table.len() != 13*LIMBS {
            return Err(BWError::InvalidCurveParameters(
                format!("{} has {} words, expected {}", name, table.len(), 13*LIMBS)));
        }
    }
    if BW::U.len() != 1 || BW::U[0] < 2 {
        return Err(BWError::InvalidCurveParameters("the seed must fit a single word".to_string()));
    }
    if BW::COFACTOR_G1.is_empty() || BW::COFACTOR_G2.is_empty() {
        return Err(BWError::InvalidCurveParameters("missing cofactor".to_string()));
    }

    let p: Uint<LIMBS> = uint(BW::MODULUS);
    if p.as_words()[0] & 3 != 3 {
        return Err(BWError::InvalidCurveParameters("modulus is not 3 mod 4".to_string()));
    }
    // Montgomery constants: q*p = -1 (mod 2^w) and likewise for the group order
    if uint::<LIMBS>(BW::NEG_INV_MOD).wrapping_mul(&p) != Uint::MAX {
        return Err(BWError::InvalidCurveParameters("inconsistent NEG_INV_MOD".to_string()));
    }
    let r: Uint<LIMBS> = uint(BW::ORDER);
    if uint::<LIMBS>(BW::NEG_INV_ORD).wrapping_mul(&r) != Uint::MAX {
        return Err(BWError::InvalidCurveParameters("inconsistent NEG_INV_ORD".to_string()));
    }
    if uint::<LIMBS>(BW::MONTY_P) >= p || uint::<LIMBS>(BW::MONTY_N) >= r {
        return Err(BWError::InvalidCurveParameters("unreduced Montgomery constant".to_string()));
    }
    // the Frobenius table starts at ω^0 = 1
    if uint::<LIMBS>(&BW::FROB[0..LIMBS]) != Uint::ONE {
        return Err(BWError::InvalidCurveParameters("Frobenius table must start at 1".to_string()));
    }
    // ω^j for successive j, wrapping around to ω^13 = 1
    let omega: BWFp<BW, LIMBS> = BWFp::from_slice(&BW::FROB[LIMBS..2*LIMBS]);
    let mut w = omega;
    for j in 1..13 {
        if w != BWFp::from_slice(&BW::FROB[j*LIMBS..(j + 1)*LIMBS]) {
            return Err(BWError::InvalidCurveParameters(format!("FROB[{}] is not a power of ω", j)));
        }
        w *= omega;
    }
    if !bool::from(w.is_one()) || bool::from(omega.is_one()) {
        return Err(BWError::InvalidCurveParameters("ω is not a primitive 13th root of unity".to_string()));
    }
    let b: BWFp<BW, LIMBS> = BWFp::from_i64(BW::CURVE_B);
    let (x1, y1): (BWFp<BW, LIMBS>, BWFp<BW, LIMBS>) = (BWFp::from_slice(BW::GEN1_X), BWFp::from_slice(BW::GEN1_Y));
    if y1.sq() != x1.cb() + b {
        return Err(BWError::InvalidCurveParameters("G1 generator is not on the curve".to_string()));
    }
    let (x2, y2): (BWFp13<BW, LIMBS>, BWFp13<BW, LIMBS>) = (BWFp13::from_slice(BW::GEN2_X), BWFp13::from_slice(BW::GEN2_Y));
    if y2.sq() != x2.cb() + BWFp13::from_base(b) {
        return Err(BWError::InvalidCurveParameters("G2 generator is not on the curve".to_string()));
    }
    Ok(())
}
