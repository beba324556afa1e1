use crate::game::state::GameState;
use crate::tile::{check_win, Tile};

/// 听牌中的一张待牌
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct WaitingTile {
    pub tile: Tile,
    /// 未见张数
    pub remaining: u8,
    /// 胡这张牌的价值
    pub win_value: u32,
    /// 期望值：remaining / max(1, 牌墙剩余) × win_value
    pub ev: f64,
}

/// 听牌判定器
pub struct ReadyChecker;

impl ReadyChecker {
    /// 检查 4 张手牌听哪些牌
    ///
    /// 对每种仍有未见张数的牌，假设摸到后判定是否胡牌。
    /// 不听牌（包括手牌不是 4 张或含有无效的牌）时返回空向量。
    ///
    /// # 参数
    ///
    /// - `state`: 当前状态，用于未见张数与牌墙剩余
    /// - `hand`: 4 张手牌（不必是状态中的手牌，可以是打出某张后的剩余）
    pub fn waiting_tiles(state: &GameState, hand: &[Tile]) -> Vec<WaitingTile> {
        if !hand.iter().all(Tile::is_valid) {
            return Vec::new();
        }
        let visible = state.visible_counts();
        let wall = f64::from(state.wall_remaining.max(1));
        let mut test_hand = Vec::with_capacity(hand.len() + 1);

        let waits: Vec<WaitingTile> = Tile::all()
            .into_iter()
            .filter_map(|tile| {
                let remaining = tile.copies().saturating_sub(visible.tile_count(tile));
                if remaining == 0 {
                    return None;
                }
                test_hand.clear();
                test_hand.extend_from_slice(hand);
                test_hand.push(tile);
                let win_value = check_win(&test_hand).win()?.value;
                Some(WaitingTile {
                    tile,
                    remaining,
                    win_value,
                    ev: f64::from(remaining) / wall * f64::from(win_value),
                })
            })
            .collect();

        log::trace!("{} 张手牌听 {} 种牌", hand.len(), waits.len());
        waits
    }

    /// 是否听牌
    pub fn is_ready(state: &GameState, hand: &[Tile]) -> bool {
        !Self::waiting_tiles(state, hand).is_empty()
    }
}
