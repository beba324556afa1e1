use std::cmp::Ordering;

use crate::game::constants::WINNING_HAND_SIZE;
use crate::game::ready::{ReadyChecker, WaitingTile};
use crate::game::state::GameState;
use crate::tile::{check_win, Color, Tile, TileCounts, Win, RUNS};

/// 打牌候选
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DiscardCandidate {
    /// 打出的牌
    pub tile: Tile,
    /// 打出后剩余 4 张的待牌
    pub waits: Vec<WaitingTile>,
    /// 待牌期望值之和
    pub total_ev: f64,
    /// 待牌未见张数之和
    pub total_wait_count: u32,
    /// 潜力分（不听牌时的排序依据）
    pub potential: u32,
}

/// 推荐结果
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum Recommendation {
    /// 当前 5 张已经胡牌
    Win(Win),
    /// 按推荐顺序排列的打牌候选
    Discards(Vec<DiscardCandidate>),
}

/// 打牌推荐器
pub struct DiscardRanker;

impl DiscardRanker {
    /// 对 5 张手牌给出打牌推荐
    ///
    /// # 排序
    ///
    /// 1. 期望值之和（降序）
    /// 2. 潜力分（降序），全部不听牌时即以此排序
    /// 3. 待牌张数（降序）
    /// 4. 目录顺序（帥在前），保证结果确定
    ///
    /// 手牌不是 5 张或含有无效的牌时返回空候选列表。
    pub fn recommend(state: &GameState, hand: &[Tile]) -> Recommendation {
        if hand.len() != WINNING_HAND_SIZE || !hand.iter().all(Tile::is_valid) {
            return Recommendation::Discards(Vec::new());
        }
        if let Some(win) = check_win(hand).win() {
            log::debug!("当前手牌已胡：{:?}", win.category);
            return Recommendation::Win(*win);
        }

        let counts = TileCounts::from_tiles(hand);
        let mut candidates: Vec<DiscardCandidate> = counts
            .distinct_tiles()
            .into_iter()
            .map(|tile| Self::evaluate_discard(state, &counts, tile))
            .collect();

        candidates.sort_by(compare_candidates);
        Recommendation::Discards(candidates)
    }

    fn evaluate_discard(state: &GameState, counts: &TileCounts, tile: Tile) -> DiscardCandidate {
        let mut rest = *counts;
        rest.remove_tile(tile);
        let remainder = rest.to_sorted_vec();

        let waits = ReadyChecker::waiting_tiles(state, &remainder);
        let total_ev = waits.iter().map(|w| w.ev).sum();
        let total_wait_count = waits.iter().map(|w| u32::from(w.remaining)).sum();

        DiscardCandidate {
            tile,
            waits,
            total_ev,
            total_wait_count,
            potential: potential_score(&rest),
        }
    }
}

fn compare_candidates(a: &DiscardCandidate, b: &DiscardCandidate) -> Ordering {
    b.total_ev
        .total_cmp(&a.total_ev)
        .then_with(|| b.potential.cmp(&a.potential))
        .then_with(|| b.total_wait_count.cmp(&a.total_wait_count))
        .then_with(|| a.tile.to_index().cmp(&b.tile.to_index()))
}

/// 潜力分
///
/// - 同色集中度：2 × 较多颜色的张数
/// - 对子 +3，刻子再 +3
/// - 固定顺子恰好有 2 张：+2
/// - 每张兵/卒 +1（囤五兵/五卒）
pub fn potential_score(counts: &TileCounts) -> u32 {
    let color_count = |color: Color| -> u32 {
        counts
            .iter()
            .filter(|(t, _)| t.color() == color)
            .map(|(_, n)| u32::from(n))
            .sum()
    };
    let mut score = 2 * color_count(Color::Red).max(color_count(Color::Black));

    for (tile, count) in counts.iter() {
        if count >= 2 {
            score += 3;
        }
        if count >= 3 {
            score += 3;
        }
        if tile.rank() == 1 {
            score += u32::from(count);
        }
    }

    for (color, ranks) in RUNS {
        let present = ranks
            .iter()
            .filter_map(|&rank| Tile::new(color, rank))
            .filter(|&tile| counts.tile_count(tile) > 0)
            .count();
        if present == 2 {
            score += 2;
        }
    }

    score
}
