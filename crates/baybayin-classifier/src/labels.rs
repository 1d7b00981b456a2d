//! Class label table.

/// Number of classifier outputs.
pub const NUM_CLASSES: usize = 59;

/// Labels in classifier output order. Syllables sharing a glyph are joined
/// with `_` (`e_i`, `da_ra`, ...); a bare consonant is the glyph with the
/// vowel-cancelling mark.
pub const BAYBAYIN_LABELS: [&str; NUM_CLASSES] = [
    "a", "b", "ba", "be_bi", "bo_bu", "d", "da_ra", "de_di", "do_du", "e_i", //
    "g", "ga", "ge_gi", "go_gu", "h", "ha", "he_hi", "ho_hu", "k", "ka", //
    "ke_ki", "ko_ku", "l", "la", "le_li", "lo_lu", "m", "ma", "me_mi", "mo_mu", //
    "n", "na", "ne_ni", "ng", "nga", "nge_ngi", "ngo_ngu", "no_nu", "o_u", //
    "p", "pa", "pe_pi", "po_pu", "s", "sa", "se_si", "so_su", "t", "ta", //
    "te_ti", "to_tu", "w", "wa", "we_wi", "wo_wu", "y", "ya", "ye_yi", "yo_yu",
];

/// Read-only view over the label table.
#[derive(Clone, Copy, Debug)]
pub struct LabelTable {
    labels: &'static [&'static str],
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::baybayin()
    }
}

impl LabelTable {
    pub const fn baybayin() -> Self {
        Self {
            labels: &BAYBAYIN_LABELS,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static str> {
        self.labels.get(index).copied()
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|&l| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &'static str)> + '_ {
        self.labels.iter().copied().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_matches_classifier_width() {
        let table = LabelTable::baybayin();
        assert_eq!(table.len(), NUM_CLASSES);
        assert_eq!(table.get(0), Some("a"));
        assert_eq!(table.get(58), Some("yo_yu"));
        assert_eq!(table.get(59), None);
    }

    #[test]
    fn labels_are_unique() {
        let set: HashSet<_> = BAYBAYIN_LABELS.iter().collect();
        assert_eq!(set.len(), NUM_CLASSES);
    }

    #[test]
    fn index_lookup_round_trips() {
        let table = LabelTable::default();
        for (i, label) in table.iter() {
            assert_eq!(table.index_of(label), Some(i));
        }
        assert_eq!(table.index_of("nga"), Some(34));
        assert_eq!(table.index_of("x"), None);
    }
}
