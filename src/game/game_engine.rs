use smallvec::SmallVec;

use crate::game::config::EngineConfig;
use crate::game::constants::{HAND_SIZE, MAX_MELD_SUPPLEMENTS, NUM_SEATS, SELF_SEAT};
use crate::game::defense;
use crate::game::history::History;
use crate::game::meld::{eater_of, Meld, PendingMeld};
use crate::game::ready::{ReadyChecker, WaitingTile};
use crate::game::recommend::{DiscardRanker, Recommendation};
use crate::game::state::{GameState, RecordingMode};
use crate::tile::{Tile, TileCounts};

/// 引擎错误
///
/// 所有错误都可以就地恢复：被拒绝的操作不改变状态与历史
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// 已有摸牌等待打出时再记入自己的牌
    #[error("手牌已满，请先打出一张牌")]
    HandOverflow,
    /// 补充牌不足
    #[error("吃牌需要 {required} 张补充牌，只有 {given} 张")]
    IncompleteMeld { required: usize, given: usize },
    /// 无法识别的牌
    #[error("无法识别的牌：{0:?}")]
    InvalidTile(String),
    /// 该牌已没有未见的张数
    #[error("{0} 已全部出现")]
    TileExhausted(Tile),
    #[error("无效的座位：{0}")]
    InvalidSeat(usize),
    /// `seat` 为 `None` 时指自己的手牌
    #[error("无效的位置：座位 {seat:?} 第 {index} 张")]
    InvalidIndex { seat: Option<usize>, index: usize },
    #[error("没有摸到的牌")]
    NoDrawnTile,
    /// 河里该位置不是被吃的牌
    #[error("河里该位置不是 {0}")]
    RiverMismatch(Tile),
    #[error("正在输入吃牌，请先确认或取消")]
    MeldPending,
    #[error("没有正在输入的吃牌")]
    NoPendingMeld,
    #[error("吃牌最多三张")]
    MeldFull,
}

/// 打出的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardSlot {
    /// 手牌中的第几张
    Hand(usize),
    /// 摸到的牌
    Drawn,
}

/// 记牌引擎
///
/// 唯一的状态修改入口。每个修改操作先校验，再压入快照，最后修改；
/// 校验失败时状态与历史都保持不变
#[derive(Debug, Clone, Default)]
pub struct Engine {
    state: GameState,
    history: History,
    pending: Option<PendingMeld>,
    config: EngineConfig,
}

impl Engine {
    /// 创建新的引擎（默认配置）
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 当前状态
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// 正在输入的吃牌
    pub fn pending_meld(&self) -> Option<&PendingMeld> {
        self.pending.as_ref()
    }

    /// 可撤销的步数
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// 选择记录某家（1-3）；0 表示切回自己
    pub fn select_seat(&mut self, seat: usize) -> Result<&GameState, EngineError> {
        if seat >= NUM_SEATS {
            return Err(EngineError::InvalidSeat(seat));
        }
        if seat == SELF_SEAT {
            return self.self_mode();
        }
        self.state.selected_seat = seat;
        self.state.mode = RecordingMode::Record;
        Ok(&self.state)
    }

    /// 切回自己摸牌
    pub fn self_mode(&mut self) -> Result<&GameState, EngineError> {
        self.state.mode = RecordingMode::Hand;
        Ok(&self.state)
    }

    /// 按牌面字或代码记入一张牌
    pub fn record_input(&mut self, input: &str) -> Result<&GameState, EngineError> {
        let tile: Tile = input.parse().map_err(|_| {
            log::warn!("忽略无法识别的输入：{:?}", input);
            EngineError::InvalidTile(input.to_string())
        })?;
        self.record_tile(tile)
    }

    /// 记入一张新出现的牌
    ///
    /// - 自己模式：手牌不足 4 张时加入手牌，否则成为摸牌
    /// - 记录模式：加入所选座位的河
    /// - 正在输入吃牌时，转为收集补充牌
    pub fn record_tile(&mut self, tile: Tile) -> Result<&GameState, EngineError> {
        ensure_valid(tile)?;
        if self.pending.is_some() {
            self.add_meld_tile(tile)?;
            return Ok(&self.state);
        }
        self.ensure_available(tile, 1)?;
        if self.state.mode == RecordingMode::Hand && self.state.drawn.is_some() {
            log::warn!("记入 {} 被拒绝：已有摸牌", tile);
            return Err(EngineError::HandOverflow);
        }

        self.push_history();
        self.state.take_from_wall(1);
        match self.state.mode {
            RecordingMode::Hand => {
                if self.state.hand.len() < HAND_SIZE {
                    self.state.push_hand(tile);
                } else {
                    self.state.drawn = Some(tile);
                }
                log::debug!("自己记入 {}，牌墙剩余 {}", tile, self.state.wall_remaining);
            }
            RecordingMode::Record => {
                let seat = self.state.selected_seat;
                self.state.river_mut(seat).push(tile);
                log::debug!("座位 {} 打出 {}，牌墙剩余 {}", seat, tile, self.state.wall_remaining);
            }
        }
        Ok(&self.state)
    }

    /// 自己打出一张牌
    ///
    /// 打出手牌时，若有摸牌则并入手牌并重新排序
    pub fn discard_from_hand(&mut self, slot: DiscardSlot) -> Result<&GameState, EngineError> {
        self.ensure_no_pending()?;
        match slot {
            DiscardSlot::Drawn if self.state.drawn.is_none() => {
                return Err(EngineError::NoDrawnTile);
            }
            DiscardSlot::Hand(index) if index >= self.state.hand.len() => {
                return Err(EngineError::InvalidIndex { seat: None, index });
            }
            _ => {}
        }

        self.push_history();
        let tile = match slot {
            DiscardSlot::Drawn => self.state.drawn.take(),
            DiscardSlot::Hand(index) => {
                let tile = self.state.hand.remove(index);
                if let Some(drawn) = self.state.drawn.take() {
                    self.state.push_hand(drawn);
                }
                Some(tile)
            }
        };
        if let Some(tile) = tile {
            self.state.river_mut(SELF_SEAT).push(tile);
            log::debug!("自己打出 {}", tile);
        }
        Ok(&self.state)
    }

    /// 删除记错的河牌，牌墙归还一张
    pub fn delete_river_entry(&mut self, seat: usize, index: usize) -> Result<&GameState, EngineError> {
        self.ensure_no_pending()?;
        self.remove_river_entry(seat, index)?;
        Ok(&self.state)
    }

    fn remove_river_entry(&mut self, seat: usize, index: usize) -> Result<(), EngineError> {
        self.river_tile(seat, index)?;
        self.push_history();
        let tile = self.state.river_mut(seat).remove(index);
        self.state.return_to_wall();
        log::debug!("删除座位 {} 的河牌 {}，牌墙剩余 {}", seat, tile, self.state.wall_remaining);
        Ok(())
    }

    /// 一次提交吃牌
    ///
    /// 被吃的牌从来源座位的河中移除，交给下家；补充牌从未知变为已知，
    /// 牌墙按补充牌张数减少。自己吃牌时被吃的牌进入暗手牌（手牌已满则成为摸牌）。
    pub fn form_meld(
        &mut self,
        source_seat: usize,
        source_index: usize,
        claimed: Tile,
        added: &[Tile],
    ) -> Result<&GameState, EngineError> {
        self.ensure_no_pending()?;
        self.commit_meld_inner(source_seat, source_index, claimed, added)?;
        Ok(&self.state)
    }

    /// 点击河里的牌，开始输入吃牌
    pub fn begin_meld(&mut self, seat: usize, index: usize) -> Result<&PendingMeld, EngineError> {
        self.ensure_no_pending()?;
        let claimed = self.river_tile(seat, index)?;
        let pending = PendingMeld::new(seat, index, claimed);
        log::debug!("座位 {} 开始吃座位 {} 的 {}", pending.eater_seat, seat, claimed);
        Ok(self.pending.insert(pending))
    }

    /// 收集一张补充牌
    pub fn add_meld_tile(&mut self, tile: Tile) -> Result<&PendingMeld, EngineError> {
        let Some(pending) = self.pending.as_ref() else {
            return Err(EngineError::NoPendingMeld);
        };
        ensure_valid(tile)?;
        if pending.is_full() {
            return Err(EngineError::MeldFull);
        }
        let already = pending.supplements().iter().filter(|&&t| t == tile).count();
        self.ensure_available(tile, already + 1)?;

        let pending = self.pending.as_mut().ok_or(EngineError::NoPendingMeld)?;
        pending.collected.push(tile);
        Ok(pending)
    }

    /// 确认吃牌
    ///
    /// 失败时保留输入中的吃牌，可以补牌后重试
    pub fn commit_meld(&mut self) -> Result<&GameState, EngineError> {
        let pending = self.pending.clone().ok_or(EngineError::NoPendingMeld)?;
        self.commit_meld_inner(
            pending.source_seat,
            pending.source_index,
            pending.claimed,
            pending.supplements(),
        )?;
        self.pending = None;
        Ok(&self.state)
    }

    /// 取消吃牌；`retract` 为真时同时删除那张河牌
    pub fn cancel_meld(&mut self, retract: bool) -> Result<&GameState, EngineError> {
        let pending = self.pending.take().ok_or(EngineError::NoPendingMeld)?;
        if retract {
            if let Err(err) = self.remove_river_entry(pending.source_seat, pending.source_index) {
                self.pending = Some(pending);
                return Err(err);
            }
        }
        Ok(&self.state)
    }

    /// 撤销一步；没有历史时什么也不做
    pub fn undo(&mut self) -> &GameState {
        self.pending = None;
        if let Some(snapshot) = self.history.pop() {
            self.state.restore(snapshot);
            log::debug!("撤销，剩余 {} 步", self.history.len());
        }
        &self.state
    }

    /// 重新开始
    pub fn reset(&mut self) -> &GameState {
        self.state = GameState::new();
        self.history.clear();
        self.pending = None;
        log::debug!("重置");
        &self.state
    }

    /// 某种牌的未见张数
    pub fn remaining_count(&self, tile: Tile) -> u8 {
        self.state.remaining_count(tile)
    }

    /// 4 张手牌的待牌与期望值
    pub fn waiting_tiles(&self, hand: &[Tile]) -> Vec<WaitingTile> {
        ReadyChecker::waiting_tiles(&self.state, hand)
    }

    /// 5 张手牌的打牌推荐
    pub fn recommend_discards(&self, hand: &[Tile]) -> Recommendation {
        DiscardRanker::recommend(&self.state, hand)
    }

    /// 对当前手牌加摸牌给出推荐；不足 5 张时返回 `None`
    pub fn recommend_current(&self) -> Option<Recommendation> {
        let concealed = self.state.concealed_tiles();
        (concealed.len() == HAND_SIZE + 1).then(|| self.recommend_discards(&concealed))
    }

    /// 现物列表
    pub fn safe_tiles(&self) -> Vec<Tile> {
        defense::safe_tiles(&self.state, self.config.eaten_tiles_safe)
    }

    fn commit_meld_inner(
        &mut self,
        source_seat: usize,
        source_index: usize,
        claimed: Tile,
        added: &[Tile],
    ) -> Result<(), EngineError> {
        ensure_valid(claimed)?;
        for &tile in added {
            ensure_valid(tile)?;
        }
        let required = usize::from(self.config.meld_supplements);
        if added.len() < required {
            return Err(EngineError::IncompleteMeld {
                required,
                given: added.len(),
            });
        }
        if added.len() > MAX_MELD_SUPPLEMENTS {
            return Err(EngineError::MeldFull);
        }
        if self.river_tile(source_seat, source_index)? != claimed {
            return Err(EngineError::RiverMismatch(claimed));
        }
        let needed = TileCounts::from_tiles(added);
        for (tile, count) in needed.iter() {
            self.ensure_available(tile, usize::from(count))?;
        }
        let eater_seat = eater_of(source_seat);
        let claimed_held = eater_seat == SELF_SEAT;
        if claimed_held && self.state.hand.len() >= HAND_SIZE && self.state.drawn.is_some() {
            return Err(EngineError::HandOverflow);
        }

        self.push_history();
        self.state.river_mut(source_seat).remove(source_index);
        self.state.melds_mut(eater_seat).push(Meld {
            claimed,
            added: SmallVec::from_slice(added),
            source_seat,
            claimed_held,
        });
        self.state.take_from_wall(added.len());
        if claimed_held {
            if self.state.hand.len() < HAND_SIZE {
                self.state.push_hand(claimed);
            } else {
                self.state.drawn = Some(claimed);
            }
        }
        log::debug!(
            "座位 {} 吃座位 {} 的 {}，补充 {} 张，牌墙剩余 {}",
            eater_seat,
            source_seat,
            claimed,
            added.len(),
            self.state.wall_remaining
        );
        Ok(())
    }

    fn push_history(&mut self) {
        self.history.push(self.state.snapshot());
    }

    fn ensure_no_pending(&self) -> Result<(), EngineError> {
        if self.pending.is_some() {
            return Err(EngineError::MeldPending);
        }
        Ok(())
    }

    /// 确认还有 `needed` 张未见
    fn ensure_available(&self, tile: Tile, needed: usize) -> Result<(), EngineError> {
        if usize::from(self.state.remaining_count(tile)) < needed {
            log::warn!("{} 已没有未见张数", tile);
            return Err(EngineError::TileExhausted(tile));
        }
        Ok(())
    }

    fn river_tile(&self, seat: usize, index: usize) -> Result<Tile, EngineError> {
        if seat >= NUM_SEATS {
            return Err(EngineError::InvalidSeat(seat));
        }
        self.state
            .river(seat)
            .get(index)
            .copied()
            .ok_or(EngineError::InvalidIndex { seat: Some(seat), index })
    }
}

/// 拒绝等级不在 1-7 的牌
fn ensure_valid(tile: Tile) -> Result<(), EngineError> {
    if tile.is_valid() {
        return Ok(());
    }
    log::warn!("拒绝无效的牌：{:?}", tile);
    Err(EngineError::InvalidTile(tile.code()))
}
