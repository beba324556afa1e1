use crate::game::state::GameState;
use crate::tile::{Tile, TileCounts};

/// 现物（安全牌）分析
///
/// 本游戏没有过水规则，打过的牌就是绝对安全的牌。
/// `eaten_tiles_safe` 决定被吃走的牌是否仍算现物。
pub fn safe_tiles(state: &GameState, eaten_tiles_safe: bool) -> Vec<Tile> {
    let mut seen = TileCounts::new();
    for river in &state.rivers {
        for &tile in river.iter() {
            seen.add_tile(tile);
        }
    }
    if eaten_tiles_safe {
        for melds in &state.melds {
            for meld in melds.iter() {
                seen.add_tile(meld.claimed);
            }
        }
    }
    seen.distinct_tiles().into_vec()
}
