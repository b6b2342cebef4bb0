//! Precomputed constants for the table-driven engines.
//!
//! Every entry is the exact value rounded to the nearest multiple of `2^-64`.
//! The tables can be regenerated with `q64 tables`.

use crate::fixed::FixedPoint64;

/// Number of fractional bits resolved by table lookup. The remaining bits are
/// handled by a short Taylor expansion.
pub const TABLE_BITS: usize = 20;

/// Entry `i` is `2^(2^-(i+1))`.
#[rustfmt::skip]
pub const LOG2_TABLE: [FixedPoint64; TABLE_BITS] = [
    FixedPoint64::from_limbs([7640891576956012809, 1, 0, 0]),
    FixedPoint64::from_limbs([3490255227380126431, 1, 0, 0]),
    FixedPoint64::from_limbs([1669572981167730126, 1, 0, 0]),
    FixedPoint64::from_limbs([816707133613602346, 1, 0, 0]),
    FixedPoint64::from_limbs([403931097166463918, 1, 0, 0]),
    FixedPoint64::from_limbs([200871872941133543, 1, 0, 0]),
    FixedPoint64::from_limbs([100163996173424344, 1, 0, 0]),
    FixedPoint64::from_limbs([50014196964519265, 1, 0, 0]),
    FixedPoint64::from_limbs([24990171141283490, 1, 0, 0]),
    FixedPoint64::from_limbs([12490856599448656, 1, 0, 0]),
    FixedPoint64::from_limbs([6244371414720417, 1, 0, 0]),
    FixedPoint64::from_limbs([3121921530820282, 1, 0, 0]),
    FixedPoint64::from_limbs([1560894726863213, 1, 0, 0]),
    FixedPoint64::from_limbs([780430854493330, 1, 0, 0]),
    FixedPoint64::from_limbs([390211300099399, 1, 0, 0]),
    FixedPoint64::from_limbs([195104618273796, 1, 0, 0]),
    FixedPoint64::from_limbs([97552051194286, 1, 0, 0]),
    FixedPoint64::from_limbs([48775961111661, 1, 0, 0]),
    FixedPoint64::from_limbs([24387964434481, 1, 0, 0]),
    FixedPoint64::from_limbs([12193978186906, 1, 0, 0]),
];

/// Entry `i` is `2^-(2^-(i+1))`.
#[rustfmt::skip]
pub const INV_LOG2_TABLE: [FixedPoint64; TABLE_BITS] = [
    FixedPoint64::from_limbs([13043817825332782212, 0, 0, 0]),
    FixedPoint64::from_limbs([15511800964685064948, 0, 0, 0]),
    FixedPoint64::from_limbs([16915738899553466671, 0, 0, 0]),
    FixedPoint64::from_limbs([17664662643191237676, 0, 0, 0]),
    FixedPoint64::from_limbs([18051468387014017850, 0, 0, 0]),
    FixedPoint64::from_limbs([18248035989933441397, 0, 0, 0]),
    FixedPoint64::from_limbs([18347121020861646924, 0, 0, 0]),
    FixedPoint64::from_limbs([18396865112328554661, 0, 0, 0]),
    FixedPoint64::from_limbs([18421787711448657618, 0, 0, 0]),
    FixedPoint64::from_limbs([18434261669329232140, 0, 0, 0]),
    FixedPoint64::from_limbs([18440501815349552982, 0, 0, 0]),
    FixedPoint64::from_limbs([18443622680442407998, 0, 0, 0]),
    FixedPoint64::from_limbs([18445183311048607332, 0, 0, 0]),
    FixedPoint64::from_limbs([18445963675871538004, 0, 0, 0]),
    FixedPoint64::from_limbs([18446353870663572145, 0, 0, 0]),
    FixedPoint64::from_limbs([18446548971154807802, 0, 0, 0]),
    FixedPoint64::from_limbs([18446646522174239825, 0, 0, 0]),
    FixedPoint64::from_limbs([18446695297877410579, 0, 0, 0]),
    FixedPoint64::from_limbs([18446719685777359791, 0, 0, 0]),
    FixedPoint64::from_limbs([18446731879739425374, 0, 0, 0]),
];

/// Entry `i` is `e^(2^-(i+1))`.
#[rustfmt::skip]
pub const EXP_NEG_TABLE: [FixedPoint64; TABLE_BITS] = [
    FixedPoint64::from_limbs([11966795255776918679, 1, 0, 0]),
    FixedPoint64::from_limbs([5239344172067481206, 1, 0, 0]),
    FixedPoint64::from_limbs([2456155437534072733, 1, 0, 0]),
    FixedPoint64::from_limbs([1189712777830127574, 1, 0, 0]),
    FixedPoint64::from_limbs([585562514163419534, 1, 0, 0]),
    FixedPoint64::from_limbs([290493950045950331, 1, 0, 0]),
    FixedPoint64::from_limbs([144679606912572172, 1, 0, 0]),
    FixedPoint64::from_limbs([72198514957318099, 1, 0, 0]),
    FixedPoint64::from_limbs([36064004308734226, 1, 0, 0]),
    FixedPoint64::from_limbs([18023197466514910, 1, 0, 0]),
    FixedPoint64::from_limbs([9009398635954180, 1, 0, 0]),
    FixedPoint64::from_limbs([4504149427926357, 1, 0, 0]),
    FixedPoint64::from_limbs([2251937258231296, 1, 0, 0]),
    FixedPoint64::from_limbs([1125934267280053, 1, 0, 0]),
    FixedPoint64::from_limbs([562958543443286, 1, 0, 0]),
    FixedPoint64::from_limbs([281477124205227, 1, 0, 0]),
    FixedPoint64::from_limbs([140738025227605, 1, 0, 0]),
    FixedPoint64::from_limbs([70368878395563, 1, 0, 0]),
    FixedPoint64::from_limbs([35184405643285, 1, 0, 0]),
    FixedPoint64::from_limbs([17592194433027, 1, 0, 0]),
];

/// Entry `i` is `e^(2^i)`.
#[rustfmt::skip]
pub const EXP_POS_TABLE: [FixedPoint64; 8] = [
    FixedPoint64::from_limbs([13249961062380153451, 2, 0, 0]),
    FixedPoint64::from_limbs([7176818287289529101, 7, 0, 0]),
    FixedPoint64::from_limbs([11033920579092664091, 54, 0, 0]),
    FixedPoint64::from_limbs([17671741784691597056, 2980, 0, 0]),
    FixedPoint64::from_limbs([9601675514881374392, 8886110, 0, 0]),
    FixedPoint64::from_limbs([12823456651613180038, 78962960182680, 0, 0]),
    FixedPoint64::from_limbs([
        17127243763087097132,
        17696838799656736180,
        338008108,
        0,
    ]),
    FixedPoint64::from_limbs([
        13460297379963274417,
        4294423684612430841,
        17671928477841822154,
        114249481722274167,
    ]),
];

/// Entry `i` is `e^-(2^-(i+1))`.
#[rustfmt::skip]
pub const INV_EXP_NEG_TABLE: [FixedPoint64; TABLE_BITS] = [
    FixedPoint64::from_limbs([11188515852577165300, 0, 0, 0]),
    FixedPoint64::from_limbs([14366338729722795843, 0, 0, 0]),
    FixedPoint64::from_limbs([16279194507819420732, 0, 0, 0]),
    FixedPoint64::from_limbs([17329112349219823219, 0, 0, 0]),
    FixedPoint64::from_limbs([17879197424118840458, 0, 0, 0]),
    FixedPoint64::from_limbs([18160753814917686420, 0, 0, 0]),
    FixedPoint64::from_limbs([18303190372430456780, 0, 0, 0]),
    FixedPoint64::from_limbs([18374827034086858297, 0, 0, 0]),
    FixedPoint64::from_limbs([18410750438167364678, 0, 0, 0]),
    FixedPoint64::from_limbs([18428738468430479223, 0, 0, 0]),
    FixedPoint64::from_limbs([18437739073120195921, 0, 0, 0]),
    FixedPoint64::from_limbs([18442241023793258496, 0, 0, 0]),
    FixedPoint64::from_limbs([18444492411329227605, 0, 0, 0]),
    FixedPoint64::from_limbs([18445618208161748320, 0, 0, 0]),
    FixedPoint64::from_limbs([18446181132345977515, 0, 0, 0]),
    FixedPoint64::from_limbs([18446462600880313685, 0, 0, 0]),
    FixedPoint64::from_limbs([18446603336758065835, 0, 0, 0]),
    FixedPoint64::from_limbs([18446673705099591509, 0, 0, 0]),
    FixedPoint64::from_limbs([18446708889371017195, 0, 0, 0]),
    FixedPoint64::from_limbs([18446726481531895805, 0, 0, 0]),
];

/// Entry `i` is `e^-(2^i)`.
#[rustfmt::skip]
pub const INV_EXP_POS_TABLE: [FixedPoint64; 8] = [
    FixedPoint64::from_limbs([6786177901268885275, 0, 0, 0]),
    FixedPoint64::from_limbs([2496495334008788800, 0, 0, 0]),
    FixedPoint64::from_limbs([337863903126961438, 0, 0, 0]),
    FixedPoint64::from_limbs([6188193243211693, 0, 0, 0]),
    FixedPoint64::from_limbs([2075907567336, 0, 0, 0]),
    FixedPoint64::from_limbs([233613, 0, 0, 0]),
    FixedPoint64::from_limbs([0, 0, 0, 0]),
    FixedPoint64::from_limbs([0, 0, 0, 0]),
];

/// The largest `x` with `e^x` representable, `floor(ln(MAX) · 2^64)`.
pub const EXP_MAX_INPUT: FixedPoint64 =
    FixedPoint64::from_limbs([1554298075539521751, 133, 0, 0]);
