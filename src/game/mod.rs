/// 游戏逻辑模块
///
/// 包含游戏状态、历史记录、记牌引擎、听牌期望值、打牌推荐与现物分析

pub mod constants;
pub mod config;
pub mod meld;
pub mod state;
pub mod history;
pub mod ready;
pub mod recommend;
pub mod defense;
pub mod game_engine;
