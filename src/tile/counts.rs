use super::tile::Tile;
use smallvec::SmallVec;

/// 牌的计数表
///
/// 以 14 种牌的索引存储数量，用作胡牌判定与记牌的多重集合
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TileCounts {
    counts: [u8; Tile::KIND_COUNT],
    total_count: usize,
}

impl TileCounts {
    /// 创建空计数表
    pub fn new() -> Self {
        Self::default()
    }

    /// 从牌序列统计
    pub fn from_tiles<'a, I>(tiles: I) -> Self
    where
        I: IntoIterator<Item = &'a Tile>,
    {
        let mut counts = Self::new();
        for tile in tiles {
            counts.add_tile(*tile);
        }
        counts
    }

    /// 添加一张牌；等级无效的牌不计入，返回 `false`
    pub fn add_tile(&mut self, tile: Tile) -> bool {
        let Some(index) = tile.to_index() else {
            return false;
        };
        self.counts[index] += 1;
        self.total_count += 1;
        true
    }

    /// 移除一张牌
    ///
    /// # Returns
    ///
    /// - `true`：成功移除
    /// - `false`：没有该牌
    pub fn remove_tile(&mut self, tile: Tile) -> bool {
        let Some(index) = tile.to_index() else {
            return false;
        };
        let count = &mut self.counts[index];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        self.total_count -= 1;
        true
    }

    /// 查询某张牌的数量
    #[inline]
    pub fn tile_count(&self, tile: Tile) -> u8 {
        tile.to_index().map_or(0, |index| self.counts[index])
    }

    /// 获取总牌数
    #[inline]
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// 所有不同的牌（目录顺序）
    pub fn distinct_tiles(&self) -> SmallVec<[Tile; 5]> {
        self.iter().map(|(tile, _)| tile).collect()
    }

    /// 遍历数量大于 0 的牌及其数量（目录顺序）
    pub fn iter(&self) -> impl Iterator<Item = (Tile, u8)> + '_ {
        Tile::all()
            .into_iter()
            .map(move |tile| (tile, self.tile_count(tile)))
            .filter(|&(_, count)| count > 0)
    }

    /// 展开为排序后的牌序列（手牌顺序）
    pub fn to_sorted_vec(&self) -> Vec<Tile> {
        let mut result = Vec::with_capacity(self.total_count);
        for (tile, count) in self.iter() {
            for _ in 0..count {
                result.push(tile);
            }
        }
        result
    }
}
