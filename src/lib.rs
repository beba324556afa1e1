/// 象棋麻将记牌助手引擎
///
/// 记录四家的摸打与吃牌，追踪未见牌，计算听牌期望值并推荐打牌

pub mod tile;
pub mod game;

// 重新导出常用类型
pub use tile::{Tile, Color, TileCounts, WinResult, Win, WinCategory, Flush, check_win, is_win};
pub use game::config::{EngineConfig, ConfigError};
pub use game::meld::{Meld, PendingMeld};
pub use game::state::{GameState, RecordingMode};
pub use game::ready::{ReadyChecker, WaitingTile};
pub use game::recommend::{DiscardRanker, DiscardCandidate, Recommendation};
pub use game::game_engine::{Engine, EngineError, DiscardSlot};
