// src/contest.rs
use std::fmt;

use crate::{atcoder, codeforces, leetcode, nowcoder};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    LeetCode,
    Codeforces,
    AtCoder,
    Nowcoder,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::LeetCode,
        Platform::Codeforces,
        Platform::AtCoder,
        Platform::Nowcoder,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Platform::LeetCode   => "LeetCode",
            Platform::Codeforces => "Codeforces",
            Platform::AtCoder    => "AtCoder",
            Platform::Nowcoder   => "Nowcoder",
        }
    }

    /// Contest index page, used as the link target when a record has none.
    pub fn home_url(self) -> &'static str {
        match self {
            Platform::LeetCode   => "https://leetcode.com/contest/",
            Platform::Codeforces => "https://codeforces.com/contests",
            Platform::AtCoder    => "https://atcoder.jp/contests/",
            Platform::Nowcoder   => "https://ac.nowcoder.com/acm/contest/vip-index",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One cycle's worth of upcoming contests, one list per platform.
#[derive(Clone, Debug, Default)]
pub struct Board {
    pub leetcode: Vec<leetcode::Contest>,
    pub codeforces: Vec<codeforces::Contest>,
    pub atcoder: Vec<atcoder::Contest>,
    pub nowcoder: Vec<nowcoder::Contest>,
}

impl Board {
    pub fn count(&self, platform: Platform) -> usize {
        match platform {
            Platform::LeetCode   => self.leetcode.len(),
            Platform::Codeforces => self.codeforces.len(),
            Platform::AtCoder    => self.atcoder.len(),
            Platform::Nowcoder   => self.nowcoder.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Platform::ALL.iter().all(|p| self.count(*p) == 0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for p in Platform::ALL {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", p, self.count(p))?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_reports_empty() {
        let board = Board::default();
        assert!(board.is_empty());
        assert_eq!(
            board.to_string(),
            "LeetCode=0, Codeforces=0, AtCoder=0, Nowcoder=0"
        );
    }

    #[test]
    fn single_list_makes_board_non_empty() {
        let board = Board {
            atcoder: vec![atcoder::Contest {
                start_time: "2026-10-24(土) 21:00".into(),
                name: "AtCoder Beginner Contest 427".into(),
                link: None,
            }],
            ..Default::default()
        };
        assert!(!board.is_empty());
        assert_eq!(board.count(Platform::AtCoder), 1);
        assert_eq!(board.count(Platform::Nowcoder), 0);
    }
}
