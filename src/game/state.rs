use std::sync::Arc;

use smallvec::SmallVec;

use crate::game::constants::{HAND_SIZE, NUM_SEATS, WALL_SIZE};
use crate::game::meld::Meld;
use crate::tile::{Tile, TileCounts};

/// 输入路由模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum RecordingMode {
    /// 自己摸牌/建立手牌
    #[default]
    Hand,
    /// 记录对手打牌
    Record,
}

/// 暗手牌
pub type HandTiles = SmallVec<[Tile; HAND_SIZE]>;

/// 游戏状态
///
/// 河与吃牌列表以 `Arc` 共享，快照只复制引用计数；
/// 修改时通过 `Arc::make_mut` 写时复制
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameState {
    /// 牌墙剩余张数（0-32）
    pub wall_remaining: u8,
    /// 自己的暗手牌（最多 4 张，已排序）
    pub hand: HandTiles,
    /// 摸到的牌（等待打出）
    pub drawn: Option<Tile>,
    /// 四家河（0 = 自己）
    pub rivers: [Arc<Vec<Tile>>; NUM_SEATS],
    /// 四家吃牌
    pub melds: [Arc<Vec<Meld>>; NUM_SEATS],
    /// 当前记录的座位（记录模式下使用）
    pub selected_seat: usize,
    /// 输入路由模式
    pub mode: RecordingMode,
}

/// 历史快照
///
/// 只包含记牌相关字段，路由字段不随撤销恢复
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    wall_remaining: u8,
    hand: HandTiles,
    drawn: Option<Tile>,
    rivers: [Arc<Vec<Tile>>; NUM_SEATS],
    melds: [Arc<Vec<Meld>>; NUM_SEATS],
}

impl GameState {
    /// 创建新的游戏状态（牌墙 32 张，全部为空）
    pub fn new() -> Self {
        Self {
            wall_remaining: WALL_SIZE,
            hand: SmallVec::new(),
            drawn: None,
            rivers: Default::default(),
            melds: Default::default(),
            selected_seat: 3,
            mode: RecordingMode::Hand,
        }
    }

    /// 拍摄快照
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            wall_remaining: self.wall_remaining,
            hand: self.hand.clone(),
            drawn: self.drawn,
            rivers: self.rivers.clone(),
            melds: self.melds.clone(),
        }
    }

    /// 整体恢复快照
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.wall_remaining = snapshot.wall_remaining;
        self.hand = snapshot.hand;
        self.drawn = snapshot.drawn;
        self.rivers = snapshot.rivers;
        self.melds = snapshot.melds;
    }

    /// 某家的河
    pub fn river(&self, seat: usize) -> &[Tile] {
        &self.rivers[seat]
    }

    /// 某家的河（可变引用，写时复制）
    pub fn river_mut(&mut self, seat: usize) -> &mut Vec<Tile> {
        Arc::make_mut(&mut self.rivers[seat])
    }

    /// 某家的吃牌
    pub fn melds_of(&self, seat: usize) -> &[Meld] {
        &self.melds[seat]
    }

    /// 某家的吃牌（可变引用，写时复制）
    pub fn melds_mut(&mut self, seat: usize) -> &mut Vec<Meld> {
        Arc::make_mut(&mut self.melds[seat])
    }

    /// 加入手牌并重新排序
    pub fn push_hand(&mut self, tile: Tile) {
        self.hand.push(tile);
        self.sort_hand();
    }

    /// 手牌排序：红色在前，等级从高到低
    pub fn sort_hand(&mut self) {
        self.hand.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
    }

    /// 牌墙减少（不低于 0）
    pub fn take_from_wall(&mut self, count: usize) {
        let count = u8::try_from(count).unwrap_or(u8::MAX);
        self.wall_remaining = self.wall_remaining.saturating_sub(count);
    }

    /// 牌墙归还一张（不超过 32）
    pub fn return_to_wall(&mut self) {
        self.wall_remaining = (self.wall_remaining + 1).min(WALL_SIZE);
    }

    /// 所有已见牌的计数（手牌、摸牌、四家河、吃牌）
    pub fn visible_counts(&self) -> TileCounts {
        let mut counts = TileCounts::from_tiles(&self.hand);
        if let Some(tile) = self.drawn {
            counts.add_tile(tile);
        }
        for river in &self.rivers {
            for &tile in river.iter() {
                counts.add_tile(tile);
            }
        }
        for melds in &self.melds {
            for meld in melds.iter() {
                for tile in meld.counted_tiles() {
                    counts.add_tile(tile);
                }
            }
        }
        counts
    }

    /// 未见张数（牌墙 + 对手暗手牌），不低于 0
    pub fn remaining_count(&self, tile: Tile) -> u8 {
        tile.copies()
            .saturating_sub(self.visible_counts().tile_count(tile))
    }

    /// 手牌加摸牌（有摸牌时为 5 张）
    pub fn concealed_tiles(&self) -> Vec<Tile> {
        self.hand.iter().copied().chain(self.drawn).collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
