use super::counts::TileCounts;
use super::tile::{Color, Tile, RUNS};
use crate::game::constants::{FIVE_LOW_VALUE, FULL_FLUSH_VALUE, MIXED_VALUE, WINNING_HAND_SIZE};

/// 胡牌判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum WinResult {
    /// 未胡
    NotWinning,
    /// 胡牌
    Winning(Win),
}

impl WinResult {
    /// 是否胡牌
    pub fn is_win(&self) -> bool {
        matches!(self, WinResult::Winning(_))
    }

    /// 胡牌价值，未胡为 0
    pub fn value(&self) -> u32 {
        match self {
            WinResult::Winning(win) => win.value,
            WinResult::NotWinning => 0,
        }
    }

    pub fn win(&self) -> Option<&Win> {
        match self {
            WinResult::Winning(win) => Some(win),
            WinResult::NotWinning => None,
        }
    }
}

/// 一手胡牌
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Win {
    pub category: WinCategory,
    pub value: u32,
    /// 找到的拆分（五兵/五卒没有拆分）
    pub decomposition: Option<Decomposition>,
}

/// 胡牌类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum WinCategory {
    /// 五张相同的兵或卒
    FiveLow,
    /// 一对 + 一组（刻子或固定顺子）
    Standard(Flush),
}

/// 标准胡牌的颜色构成
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Flush {
    /// 五张同色
    Full,
    /// 红黑混合
    Mixed,
}

/// 对子 + 三张组合
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Decomposition {
    pub pair: Tile,
    pub triple: Triple,
}

/// 三张组合
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Triple {
    /// 三张相同
    Identical(Tile),
    /// 固定顺子，`high` 为最高等级（7 或 4）
    Run { color: Color, high: u8 },
}

/// 判定 5 张牌是否胡牌
///
/// # 算法
///
/// 1. 五张相同的等级 1 牌（五兵/五卒）：50
/// 2. 依目录顺序尝试每个对子，剩余 3 张须为刻子或固定顺子
/// 3. 标准胡牌按颜色计价：同色 20，混色 10
///
/// 牌数不是 5 张时一律不胡。
pub fn check_win(tiles: &[Tile]) -> WinResult {
    if tiles.len() != WINNING_HAND_SIZE {
        return WinResult::NotWinning;
    }
    check_counts(&TileCounts::from_tiles(tiles))
}

/// 是否胡牌（简化版本，只返回 bool）
#[inline]
pub fn is_win(tiles: &[Tile]) -> bool {
    check_win(tiles).is_win()
}

/// 基于计数表判定（总数必须为 5）
pub fn check_counts(counts: &TileCounts) -> WinResult {
    if counts.total_count() != WINNING_HAND_SIZE {
        return WinResult::NotWinning;
    }

    if let Some(tile) = five_low(counts) {
        log::trace!("五{}胡", tile);
        return WinResult::Winning(Win {
            category: WinCategory::FiveLow,
            value: FIVE_LOW_VALUE,
            decomposition: None,
        });
    }

    let Some(decomposition) = find_decomposition(counts) else {
        return WinResult::NotWinning;
    };

    // 价值只取决于 5 张牌的颜色构成，与拆分方式无关
    let flush = if counts.iter().all(|(t, _)| t.color() == Color::Red)
        || counts.iter().all(|(t, _)| t.color() == Color::Black)
    {
        Flush::Full
    } else {
        Flush::Mixed
    };
    let value = match flush {
        Flush::Full => FULL_FLUSH_VALUE,
        Flush::Mixed => MIXED_VALUE,
    };

    WinResult::Winning(Win {
        category: WinCategory::Standard(flush),
        value,
        decomposition: Some(decomposition),
    })
}

fn five_low(counts: &TileCounts) -> Option<Tile> {
    [Tile::Red(1), Tile::Black(1)]
        .into_iter()
        .find(|&tile| counts.tile_count(tile) as usize == WINNING_HAND_SIZE)
}

fn find_decomposition(counts: &TileCounts) -> Option<Decomposition> {
    for (pair, count) in counts.iter() {
        if count < 2 {
            continue;
        }
        let mut rest = *counts;
        rest.remove_tile(pair);
        rest.remove_tile(pair);
        if let Some(triple) = match_triple(&rest) {
            return Some(Decomposition { pair, triple });
        }
    }
    None
}

/// 判断 3 张牌是否构成刻子或固定顺子
pub fn match_triple(counts: &TileCounts) -> Option<Triple> {
    if counts.total_count() != 3 {
        return None;
    }

    let distinct = counts.distinct_tiles();
    match distinct.as_slice() {
        [tile] => Some(Triple::Identical(*tile)),
        [_, _, _] => RUNS.iter().find_map(|&(color, ranks)| {
            let is_run = ranks.iter().all(|&rank| {
                Tile::new(color, rank).is_some_and(|tile| counts.tile_count(tile) == 1)
            });
            is_run.then_some(Triple::Run {
                color,
                high: ranks[0],
            })
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(codes: &[&str]) -> Vec<Tile> {
        codes.iter().map(|c| c.parse().unwrap()).collect()
    }

    #[test]
    fn test_five_low() {
        let result = check_win(&tiles(&["R1", "R1", "R1", "R1", "R1"]));
        let win = result.win().unwrap();
        assert_eq!(win.category, WinCategory::FiveLow);
        assert_eq!(win.value, 50);

        let result = check_win(&tiles(&["B1", "B1", "B1", "B1", "B1"]));
        assert_eq!(result.value(), 50);
    }

    #[test]
    fn test_pair_plus_run_full_flush() {
        let result = check_win(&tiles(&["R7", "R6", "R5", "R7", "R7"]));
        let win = result.win().unwrap();
        assert_eq!(win.category, WinCategory::Standard(Flush::Full));
        assert_eq!(win.value, 20);
    }

    #[test]
    fn test_decomposition_reports_first_pair() {
        // R5 对子 + R7 R6 R6 不成组；R6 对子 + R7 R5 R5 不成组
        assert!(!is_win(&tiles(&["R5", "R5", "R6", "R7", "R6"])));

        let result = check_win(&tiles(&["B4", "B3", "B2", "R2", "R2"]));
        let win = result.win().unwrap();
        assert_eq!(win.value, 10);
        assert_eq!(
            win.decomposition,
            Some(Decomposition {
                pair: Tile::Red(2),
                triple: Triple::Run { color: Color::Black, high: 4 },
            })
        );
    }

    #[test]
    fn test_match_triple() {
        let run = TileCounts::from_tiles(&tiles(&["B2", "B4", "B3"]));
        assert_eq!(match_triple(&run), Some(Triple::Run { color: Color::Black, high: 4 }));

        let identical = TileCounts::from_tiles(&tiles(&["R3", "R3", "R3"]));
        assert_eq!(match_triple(&identical), Some(Triple::Identical(Tile::Red(3))));

        // 非固定顺子
        let broken = TileCounts::from_tiles(&tiles(&["R5", "R4", "R3"]));
        assert_eq!(match_triple(&broken), None);

        // 跨颜色
        let mixed = TileCounts::from_tiles(&tiles(&["R7", "B6", "R5"]));
        assert_eq!(match_triple(&mixed), None);
    }

    #[test]
    fn test_wrong_length_is_not_winning() {
        assert_eq!(check_win(&[]), WinResult::NotWinning);
        assert_eq!(check_win(&tiles(&["R7", "R6", "R5", "R7"])), WinResult::NotWinning);
        assert_eq!(
            check_win(&tiles(&["R1", "R1", "R1", "R1", "R1", "R1"])),
            WinResult::NotWinning
        );
    }
}
