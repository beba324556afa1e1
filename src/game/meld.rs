use smallvec::SmallVec;

use crate::game::constants::{MAX_MELD_SUPPLEMENTS, NUM_SEATS};
use crate::tile::Tile;

/// 吃牌（明牌组）
///
/// 吃进某家刚打出的牌，并亮出 0-2 张补充牌
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Meld {
    /// 被吃的牌
    pub claimed: Tile,
    /// 亮出的补充牌
    pub added: SmallVec<[Tile; MAX_MELD_SUPPLEMENTS]>,
    /// 被吃牌的来源座位
    pub source_seat: usize,
    /// 被吃的牌是否进入了自己的暗手牌
    ///
    /// 为 `true` 时该牌由手牌计数，记牌时不再重复计入
    pub claimed_held: bool,
}

impl Meld {
    /// 吃牌的座位（来源座位的下家）
    pub fn eater_seat(&self) -> usize {
        eater_of(self.source_seat)
    }

    /// 整组牌（被吃的牌在前）
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        std::iter::once(self.claimed).chain(self.added.iter().copied())
    }

    /// 计入记牌的牌
    pub fn counted_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        let claimed = (!self.claimed_held).then_some(self.claimed);
        claimed.into_iter().chain(self.added.iter().copied())
    }
}

/// 来源座位的下家
#[inline]
pub fn eater_of(source_seat: usize) -> usize {
    (source_seat + 1) % NUM_SEATS
}

/// 正在输入中的吃牌
///
/// 操作者点击河里的牌后进入此状态，随后的输入被收集为补充牌，
/// 确认后提交为 [`Meld`]，取消则丢弃
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PendingMeld {
    pub source_seat: usize,
    pub source_index: usize,
    pub claimed: Tile,
    pub eater_seat: usize,
    /// 已收集的牌，第一张为被吃的牌
    pub collected: SmallVec<[Tile; MAX_MELD_SUPPLEMENTS + 1]>,
}

impl PendingMeld {
    pub fn new(source_seat: usize, source_index: usize, claimed: Tile) -> Self {
        let mut collected = SmallVec::new();
        collected.push(claimed);
        Self {
            source_seat,
            source_index,
            claimed,
            eater_seat: eater_of(source_seat),
            collected,
        }
    }

    /// 已收集的补充牌
    pub fn supplements(&self) -> &[Tile] {
        &self.collected[1..]
    }

    pub fn is_full(&self) -> bool {
        self.collected.len() > MAX_MELD_SUPPLEMENTS
    }
}
