use std::fmt;
use std::str::FromStr;

/// 象棋麻将牌
///
/// 共 32 张：红、黑两色，各 7 个等级（帥/將 = 7，兵/卒 = 1）
/// 每种牌的张数：等级 1 各 5 张，等级 2-6 各 2 张，等级 7 各 1 张
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawTile")]
pub enum Tile {
    /// 红色（帥 仕 相 俥 傌 炮 兵）
    Red(u8),
    /// 黑色（將 士 象 車 馬 包 卒）
    Black(u8),
}

impl Tile {
    /// 总牌数：32 张
    pub const TOTAL_COUNT: usize = 32;

    /// 牌的种类数：14 种
    pub const KIND_COUNT: usize = 14;

    /// 等级范围：1-7
    pub const MIN_RANK: u8 = 1;
    pub const MAX_RANK: u8 = 7;

    /// 创建一张牌，验证输入有效性
    pub fn new(color: Color, rank: u8) -> Option<Self> {
        if !(Self::MIN_RANK..=Self::MAX_RANK).contains(&rank) {
            return None;
        }
        Some(match color {
            Color::Red => Tile::Red(rank),
            Color::Black => Tile::Black(rank),
        })
    }

    /// 等级是否在 1-7 之内
    #[inline]
    pub fn is_valid(&self) -> bool {
        (Self::MIN_RANK..=Self::MAX_RANK).contains(&self.rank())
    }

    /// 获取颜色
    pub fn color(&self) -> Color {
        match self {
            Tile::Red(_) => Color::Red,
            Tile::Black(_) => Color::Black,
        }
    }

    /// 获取等级（1-7）
    pub fn rank(&self) -> u8 {
        match self {
            Tile::Red(r) | Tile::Black(r) => *r,
        }
    }

    /// 整副牌中该种牌的张数
    pub fn copies(&self) -> u8 {
        match self.rank() {
            1 => 5,
            7 => 1,
            _ => 2,
        }
    }

    /// 转换为种类索引（0-13），等级无效时返回 `None`
    ///
    /// 按目录顺序：帥(R7)=0 ... 兵(R1)=6，將(B7)=7 ... 卒(B1)=13
    pub fn to_index(&self) -> Option<usize> {
        if !self.is_valid() {
            return None;
        }
        let color_index = self.color() as usize;
        Some(color_index * 7 + usize::from(Self::MAX_RANK - self.rank()))
    }

    /// 从种类索引创建牌
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    /// 全部 14 种牌（目录顺序，即手牌排序顺序）
    pub fn all() -> [Tile; Tile::KIND_COUNT] {
        std::array::from_fn(|index| {
            let rank = Self::MAX_RANK - (index % 7) as u8;
            if index < 7 {
                Tile::Red(rank)
            } else {
                Tile::Black(rank)
            }
        })
    }

    /// 手牌排序键：红色为 10 + 等级，黑色为等级，降序排列
    pub fn sort_key(&self) -> u8 {
        match self {
            Tile::Red(r) => 10 + r,
            Tile::Black(r) => *r,
        }
    }

    /// 牌面字
    pub fn glyph(&self) -> char {
        match self {
            Tile::Red(7) => '帥',
            Tile::Red(6) => '仕',
            Tile::Red(5) => '相',
            Tile::Red(4) => '俥',
            Tile::Red(3) => '傌',
            Tile::Red(2) => '炮',
            Tile::Red(_) => '兵',
            Tile::Black(7) => '將',
            Tile::Black(6) => '士',
            Tile::Black(5) => '象',
            Tile::Black(4) => '車',
            Tile::Black(3) => '馬',
            Tile::Black(2) => '包',
            Tile::Black(_) => '卒',
        }
    }

    /// 从牌面字解析
    pub fn from_glyph(glyph: char) -> Option<Self> {
        let tile = match glyph {
            '帥' => Tile::Red(7),
            '仕' => Tile::Red(6),
            '相' => Tile::Red(5),
            '俥' => Tile::Red(4),
            '傌' => Tile::Red(3),
            '炮' => Tile::Red(2),
            '兵' => Tile::Red(1),
            '將' => Tile::Black(7),
            '士' => Tile::Black(6),
            '象' => Tile::Black(5),
            '車' => Tile::Black(4),
            '馬' => Tile::Black(3),
            '包' => Tile::Black(2),
            '卒' => Tile::Black(1),
            _ => return None,
        };
        Some(tile)
    }

    /// 简短代码（R7、B1 等）
    pub fn code(&self) -> String {
        let prefix = match self.color() {
            Color::Red => 'R',
            Color::Black => 'B',
        };
        format!("{}{}", prefix, self.rank())
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// 牌面解析错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("无法识别的牌：{0:?}")]
pub struct ParseTileError(pub String);

impl FromStr for Tile {
    type Err = ParseTileError;

    /// 接受牌面字（`帥`）或代码（`R7`，不区分大小写）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let mut chars = input.chars();
        let (first, second, rest) = (chars.next(), chars.next(), chars.next());
        let parsed = match (first, second, rest) {
            (Some(glyph), None, None) => Tile::from_glyph(glyph),
            (Some(prefix), Some(digit), None) => {
                let color = match prefix.to_ascii_uppercase() {
                    'R' => Some(Color::Red),
                    'B' => Some(Color::Black),
                    _ => None,
                };
                let rank = digit.to_digit(10).map(|d| d as u8);
                color.zip(rank).and_then(|(c, r)| Tile::new(c, r))
            }
            _ => None,
        };
        parsed.ok_or_else(|| ParseTileError(input.to_string()))
    }
}

/// 反序列化时的原始形式，经 `TryFrom` 校验等级
#[derive(serde::Deserialize)]
enum RawTile {
    Red(u8),
    Black(u8),
}

impl TryFrom<RawTile> for Tile {
    type Error = ParseTileError;

    fn try_from(raw: RawTile) -> Result<Self, Self::Error> {
        let (color, rank) = match raw {
            RawTile::Red(rank) => (Color::Red, rank),
            RawTile::Black(rank) => (Color::Black, rank),
        };
        Tile::new(color, rank).ok_or_else(|| {
            let prefix = if color == Color::Red { 'R' } else { 'B' };
            ParseTileError(format!("{}{}", prefix, rank))
        })
    }
}

/// 颜色枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Color {
    Red = 0,
    Black = 1,
}

impl Color {
    /// 所有颜色
    pub fn all() -> [Color; 2] {
        [Color::Red, Color::Black]
    }
}

/// 固定的顺子组合：红、黑各有 {7,6,5} 与 {4,3,2}
pub const RUNS: [(Color, [u8; 3]); 4] = [
    (Color::Red, [7, 6, 5]),
    (Color::Red, [4, 3, 2]),
    (Color::Black, [7, 6, 5]),
    (Color::Black, [4, 3, 2]),
];
