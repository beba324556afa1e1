/// 牌相关模块
///
/// 包含牌（Tile）、计数表（TileCounts）和胡牌判定的实现

pub mod tile;
pub mod counts;
pub mod win_check;

// 重新导出常用类型
pub use tile::{Tile, Color, ParseTileError, RUNS};
pub use counts::TileCounts;
pub use win_check::{WinResult, Win, WinCategory, Flush, Decomposition, Triple, check_win, is_win};
