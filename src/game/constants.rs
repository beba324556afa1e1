/// 游戏常量定义
///
/// 集中管理所有魔法数字

/// 座位数量（0 = 自己，1 = 下家，2 = 对家，3 = 上家）
pub const NUM_SEATS: usize = 4;

/// 自己的座位
pub const SELF_SEAT: usize = 0;

/// 牌墙初始张数（整副 32 张）
pub const WALL_SIZE: u8 = 32;

/// 暗手牌上限（不含摸到的牌）
pub const HAND_SIZE: usize = 4;

/// 胡牌所需张数
pub const WINNING_HAND_SIZE: usize = 5;

/// 吃牌时最多亮出的补充牌数
pub const MAX_MELD_SUPPLEMENTS: usize = 2;

/// 五兵/五卒的价值
pub const FIVE_LOW_VALUE: u32 = 50;

/// 同色胡牌的价值
pub const FULL_FLUSH_VALUE: u32 = 20;

/// 混色胡牌的价值
pub const MIXED_VALUE: u32 = 10;
