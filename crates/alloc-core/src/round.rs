//! Round labels and their canonical ordering.
//!
//! A round label has the fixed shape `第` + a Chinese numeral + `轮`
//! (e.g. `第一轮`, `第二轮`). The canonical order the solver must process
//! rounds in is the numeral's position in `NUMERALS`, not lexicographic or
//! insertion order — several constraints (C5, C7) are position-sensitive.

use crate::error::CigError;
use serde::{Deserialize, Serialize};
use std::fmt;

const NUMERALS: [&str; 6] = ["一", "二", "三", "四", "五", "六"];
const PREFIX: &str = "第";
const SUFFIX: &str = "轮";

/// One release round, identified by its label and canonical rank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Round {
    label: String,
    rank: usize,
}

impl Round {
    /// Parse a round label of the form `第<numeral>轮`.
    pub fn parse(label: &str) -> Result<Self, CigError> {
        let trimmed = label.trim();
        let numeral = trimmed
            .strip_prefix(PREFIX)
            .and_then(|s| s.strip_suffix(SUFFIX))
            .ok_or_else(|| {
                CigError::Config(format!(
                    "malformed round label '{label}': expected 第<numeral>轮"
                ))
            })?;
        let rank = NUMERALS
            .iter()
            .position(|n| *n == numeral)
            .ok_or_else(|| {
                CigError::Config(format!(
                    "malformed round label '{label}': unrecognized numeral '{numeral}'"
                ))
            })?;
        Ok(Round {
            label: trimmed.to_string(),
            rank,
        })
    }

    /// The original label, e.g. `"第一轮"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Canonical rank: 0 for the first round, 1 for the second, etc.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// True if this round is the first in canonical order.
    pub fn is_first(&self) -> bool {
        self.rank == 0
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Parse and sort a set of round labels into canonical order.
///
/// Order is determined entirely by rank, independent of the order the
/// labels were supplied in — a table whose round columns happen to be out
/// of order still produces the correct sequence.
pub fn canonical_rounds(labels: impl IntoIterator<Item = impl AsRef<str>>) -> Result<Vec<Round>, CigError> {
    let mut rounds: Vec<Round> = labels
        .into_iter()
        .map(|l| Round::parse(l.as_ref()))
        .collect::<Result<_, _>>()?;
    rounds.sort_by_key(|r| r.rank);
    Ok(rounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_recognized_numerals() {
        let expected = ["第一轮", "第二轮", "第三轮", "第四轮", "第五轮", "第六轮"];
        for (i, label) in expected.iter().enumerate() {
            let round = Round::parse(label).unwrap();
            assert_eq!(round.rank(), i);
            assert_eq!(round.label(), *label);
        }
    }

    #[test]
    fn rejects_unrecognized_numeral() {
        assert!(Round::parse("第七轮").is_err());
    }

    #[test]
    fn rejects_missing_prefix_or_suffix() {
        assert!(Round::parse("一轮").is_err());
        assert!(Round::parse("第一").is_err());
    }

    #[test]
    fn canonical_rounds_sorts_out_of_order_input() {
        let rounds = canonical_rounds(["第三轮", "第一轮", "第二轮"]).unwrap();
        let labels: Vec<_> = rounds.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["第一轮", "第二轮", "第三轮"]);
    }

    #[test]
    fn first_round_flag() {
        let rounds = canonical_rounds(["第二轮", "第一轮"]).unwrap();
        assert!(rounds[0].is_first());
        assert!(!rounds[1].is_first());
    }
}
