//! Derivation of the constant tables.

use std::fmt::Write;

use super::real::Real;
use crate::fixed::FixedPoint64;
use crate::tables::TABLE_BITS;

/// Number of `e^(2^i)` entries requested. The last one does not fit.
const EXP_POS_ENTRIES: u64 = 9;

const INV_EXP_POS_ENTRIES: u64 = 8;

/// A freshly computed set of tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tables {
    pub log2: Vec<FixedPoint64>,
    pub inv_log2: Vec<FixedPoint64>,
    pub exp_pos: Vec<FixedPoint64>,
    pub exp_neg: Vec<FixedPoint64>,
    pub inv_exp_pos: Vec<FixedPoint64>,
    pub inv_exp_neg: Vec<FixedPoint64>,
    pub exp_max_input: FixedPoint64,
}

impl Tables {
    pub fn generate() -> Tables {
        let fractions =
            || (1..=TABLE_BITS as u64).map(|i| Real::one().scaled_down(i));
        let powers = |n| (0..n).map(|i| Real::one().scaled_up(i));

        let ln2 = Real::ln2();
        let exp2 = |x: Real| (&x * &ln2).exp();

        Tables {
            log2: round_all("LOG2_TABLE", fractions().map(exp2)),
            inv_log2: round_all(
                "INV_LOG2_TABLE",
                fractions().map(|x| exp2(x).recip()),
            ),
            exp_pos: round_all(
                "EXP_POS_TABLE",
                powers(EXP_POS_ENTRIES).map(|x| x.exp()),
            ),
            exp_neg: round_all("EXP_NEG_TABLE", fractions().map(|x| x.exp())),
            inv_exp_pos: round_all(
                "INV_EXP_POS_TABLE",
                powers(INV_EXP_POS_ENTRIES).map(|x| x.exp().recip()),
            ),
            inv_exp_neg: round_all(
                "INV_EXP_NEG_TABLE",
                fractions().map(|x| x.exp().recip()),
            ),
            exp_max_input: max_exp_input(),
        }
    }

    /// Renders the tables as a Rust module.
    pub fn render(&self) -> String {
        let mut module = String::from(
            "//! Precomputed constants for the table-driven engines.\n\
             //!\n\
             //! Every entry is the exact value rounded to the nearest \
             multiple of `2^-64`.\n\
             //! The tables can be regenerated with `q64 tables`.\n\
             \n\
             use crate::fixed::FixedPoint64;\n\
             \n\
             /// Number of fractional bits resolved by table lookup. The \
             remaining bits are\n\
             /// handled by a short Taylor expansion.\n",
        );

        writeln!(module, "pub const TABLE_BITS: usize = {TABLE_BITS};")
            .unwrap();

        let tables = [
            ("LOG2_TABLE", "`2^(2^-(i+1))`", &self.log2),
            ("INV_LOG2_TABLE", "`2^-(2^-(i+1))`", &self.inv_log2),
            ("EXP_NEG_TABLE", "`e^(2^-(i+1))`", &self.exp_neg),
            ("EXP_POS_TABLE", "`e^(2^i)`", &self.exp_pos),
            ("INV_EXP_NEG_TABLE", "`e^-(2^-(i+1))`", &self.inv_exp_neg),
            ("INV_EXP_POS_TABLE", "`e^-(2^i)`", &self.inv_exp_pos),
        ];

        for (name, entry, values) in tables {
            let size = if values.len() == TABLE_BITS {
                String::from("TABLE_BITS")
            } else {
                values.len().to_string()
            };

            writeln!(module).unwrap();
            writeln!(module, "/// Entry `i` is {entry}.").unwrap();
            writeln!(module, "#[rustfmt::skip]").unwrap();
            writeln!(module, "pub const {name}: [FixedPoint64; {size}] = [")
                .unwrap();

            for value in values {
                writeln!(module, "    {},", format_value(*value)).unwrap();
            }

            writeln!(module, "];").unwrap();
        }

        writeln!(module).unwrap();
        writeln!(
            module,
            "/// The largest `x` with `e^x` representable, \
             `floor(ln(MAX) · 2^64)`."
        )
        .unwrap();
        writeln!(
            module,
            "pub const EXP_MAX_INPUT: FixedPoint64 =\n    {};",
            format_value(self.exp_max_input)
        )
        .unwrap();

        module
    }
}

/// Rounds each value, stopping at the first one that does not fit.
fn round_all<I>(name: &str, values: I) -> Vec<FixedPoint64>
where
    I: IntoIterator<Item = Real>,
{
    let mut rounded = Vec::new();

    for value in values {
        match value.round_fixed() {
            Some(value) => rounded.push(value),
            None => {
                log::warn!(
                    "`{name}` truncated to {} entries: next entry overflows",
                    rounded.len()
                );
                break;
            }
        }
    }

    rounded
}

fn max_exp_input() -> FixedPoint64 {
    Real::from_fixed(FixedPoint64::MAX)
        .ln()
        .and_then(|x| x.floor_fixed())
        .unwrap_or(FixedPoint64::ZERO)
}

fn format_value(value: FixedPoint64) -> String {
    let [l0, l1, l2, l3] = value.limbs();
    let compact = format!("FixedPoint64::from_limbs([{l0}, {l1}, {l2}, {l3}])");

    if compact.len() <= 75 {
        return compact;
    }

    format!(
        "FixedPoint64::from_limbs([\n        {l0},\n        {l1},\n        \
         {l2},\n        {l3},\n    ])"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::*;

    #[test]
    fn matches_baked_tables() {
        let tables = Tables::generate();

        assert_eq!(tables.log2, LOG2_TABLE);
        assert_eq!(tables.inv_log2, INV_LOG2_TABLE);
        assert_eq!(tables.exp_pos, EXP_POS_TABLE);
        assert_eq!(tables.exp_neg, EXP_NEG_TABLE);
        assert_eq!(tables.inv_exp_pos, INV_EXP_POS_TABLE);
        assert_eq!(tables.inv_exp_neg, INV_EXP_NEG_TABLE);
        assert_eq!(tables.exp_max_input, EXP_MAX_INPUT);
    }

    #[test]
    fn renders_baked_module() {
        let module = Tables::generate().render();

        assert!(
            module.contains("pub const EXP_POS_TABLE: [FixedPoint64; 8] = [\n")
        );
        assert_eq!(module, include_str!("../tables.rs"));
    }
}
