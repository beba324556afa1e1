//! 命令行记牌控制台
//!
//! 每行一个命令，执行后输出状态与分析

use std::fmt;

use xqmj_engine::{
    DiscardSlot, Engine, EngineError, GameState, Recommendation, RecordingMode, Tile,
};

/// 控制台命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 记入一张或多张牌（牌面字或代码）
    Record(Vec<String>),
    /// 选择记录某家
    Seat(usize),
    /// 切回自己
    SelfMode,
    /// 打出手牌
    Discard(DiscardSlot),
    /// 删除河牌
    Delete { seat: usize, index: usize },
    /// 开始吃牌
    Eat { seat: usize, index: usize },
    /// 确认吃牌
    Confirm,
    /// 取消吃牌，`retract` 时同时删除河牌
    Cancel { retract: bool },
    Undo,
    Reset,
    Show,
    Json,
    Help,
    Quit,
}

/// 命令解析错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("{0} 需要参数")]
    MissingArgument(&'static str),
    #[error("无效的数字：{0:?}")]
    InvalidNumber(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let command = match head {
            "seat" => Command::Seat(number(words.next(), "seat")?),
            "me" => Command::SelfMode,
            "d" => match words.next() {
                Some("x") => Command::Discard(DiscardSlot::Drawn),
                other => Command::Discard(DiscardSlot::Hand(number(other, "d")?)),
            },
            "del" => Command::Delete {
                seat: number(words.next(), "del")?,
                index: number(words.next(), "del")?,
            },
            "eat" => Command::Eat {
                seat: number(words.next(), "eat")?,
                index: number(words.next(), "eat")?,
            },
            "ok" => Command::Confirm,
            "cancel" => Command::Cancel { retract: false },
            "retract" => Command::Cancel { retract: true },
            "undo" => Command::Undo,
            "reset" => Command::Reset,
            "show" => Command::Show,
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Record(line.split_whitespace().map(str::to_string).collect()),
        };
        Ok(Some(command))
    }
}

fn number(word: Option<&str>, command: &'static str) -> Result<usize, CommandError> {
    let word = word.ok_or(CommandError::MissingArgument(command))?;
    word.parse()
        .map_err(|_| CommandError::InvalidNumber(word.to_string()))
}

/// 执行命令
pub fn execute(engine: &mut Engine, command: &Command) -> Result<(), EngineError> {
    match command {
        Command::Record(inputs) => {
            for input in inputs {
                engine.record_input(input)?;
            }
        }
        Command::Seat(seat) => {
            engine.select_seat(*seat)?;
        }
        Command::SelfMode => {
            engine.self_mode()?;
        }
        Command::Discard(slot) => {
            engine.discard_from_hand(*slot)?;
        }
        Command::Delete { seat, index } => {
            engine.delete_river_entry(*seat, *index)?;
        }
        Command::Eat { seat, index } => {
            engine.begin_meld(*seat, *index)?;
        }
        Command::Confirm => {
            engine.commit_meld()?;
        }
        Command::Cancel { retract } => {
            engine.cancel_meld(*retract)?;
        }
        Command::Undo => {
            engine.undo();
        }
        Command::Reset => {
            engine.reset();
        }
        Command::Show | Command::Json | Command::Help | Command::Quit => {}
    }
    Ok(())
}

pub const HELP: &str = "\
牌面字或代码（帥 / R7）  记入一张或多张牌
seat N                  记录第 N 家（1 下家 2 对家 3 上家）
me                      切回自己摸牌
d N / d x               打出第 N 张手牌 / 打出摸牌
del S I                 删除第 S 家河里第 I 张
eat S I                 吃第 S 家河里第 I 张，随后输入补充牌
ok / cancel / retract   确认吃牌 / 取消 / 取消并删除河牌
undo / reset / show / json / quit";

fn tiles_to_string(tiles: &[Tile]) -> String {
    tiles.iter().map(|t| t.glyph()).collect()
}

/// 渲染状态与分析
pub fn render(engine: &Engine) -> String {
    StateView(engine).to_string()
}

struct StateView<'a>(&'a Engine);

impl fmt::Display for StateView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let engine = self.0;
        let state: &GameState = engine.state();
        let seat_names = ["自己", "下家", "对家", "上家"];

        writeln!(f, "牌墙剩余：{}", state.wall_remaining)?;
        for (seat, name) in seat_names.iter().enumerate() {
            let marker = match state.mode {
                RecordingMode::Record if state.selected_seat == seat => "*",
                _ => " ",
            };
            let melds: Vec<String> = state
                .melds_of(seat)
                .iter()
                .map(|m| m.tiles().map(|t| t.glyph()).collect())
                .collect();
            writeln!(
                f,
                "{}{} 河：{}  吃：{}",
                marker,
                name,
                tiles_to_string(state.river(seat)),
                melds.join(" ")
            )?;
        }
        let drawn = state.drawn.map(|t| format!(" + {}", t)).unwrap_or_default();
        writeln!(f, "手牌：{}{}", tiles_to_string(&state.hand), drawn)?;

        if let Some(pending) = engine.pending_meld() {
            writeln!(
                f,
                "吃牌输入中：{}（需要 {} 张补充牌）",
                tiles_to_string(&pending.collected),
                engine.config().meld_supplements
            )?;
        }

        writeln!(f, "现物：{}", tiles_to_string(&engine.safe_tiles()))?;

        let remaining: Vec<String> = Tile::all()
            .iter()
            .map(|&t| format!("{}{}", t, engine.remaining_count(t)))
            .collect();
        writeln!(f, "未见：{}", remaining.join(" "))?;

        match engine.recommend_current() {
            Some(Recommendation::Win(win)) => {
                writeln!(f, "胡牌！{:?} = {}", win.category, win.value)?;
            }
            Some(Recommendation::Discards(candidates)) => {
                for candidate in candidates {
                    let waits: Vec<String> = candidate
                        .waits
                        .iter()
                        .map(|w| format!("{}[{}]", w.tile, w.remaining))
                        .collect();
                    writeln!(
                        f,
                        "打 {}  EV {:.3}  待牌 {} 张 {}  潜力 {}",
                        candidate.tile,
                        candidate.total_ev,
                        candidate.total_wait_count,
                        waits.join(" "),
                        candidate.potential
                    )?;
                }
            }
            None if state.hand.len() == 4 => {
                let waits = engine.waiting_tiles(&state.hand);
                if !waits.is_empty() {
                    let list: Vec<String> = waits
                        .iter()
                        .map(|w| format!("{}[{}] {:.3}", w.tile, w.remaining, w.ev))
                        .collect();
                    writeln!(f, "听牌：{}", list.join(" "))?;
                }
            }
            None => {}
        }
        Ok(())
    }
}
