//! 可执行文件入口：命令行记牌控制台

mod console;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use xqmj_engine::{Engine, EngineConfig};

use console::Command;

#[derive(Parser, Debug)]
#[command(version, about = "象棋麻将记牌助手")]
struct Args {
    /// JSON 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// 吃牌必须亮出的补充牌数（0-2），覆盖配置文件
    #[arg(long)]
    meld_supplements: Option<u8>,
    /// 被吃走的牌仍算现物
    #[arg(long)]
    eaten_safe: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("加载配置 {} 失败", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(supplements) = args.meld_supplements {
        config.meld_supplements = supplements;
    }
    if args.eaten_safe {
        config.eaten_tiles_safe = true;
    }
    config.validate()?;
    log::info!("配置：{:?}", config);

    let mut engine = Engine::with_config(config);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    println!("{}", console::HELP);
    print!("{}", console::render(&engine));

    for line in stdin.lock().lines() {
        let line = line.context("读取输入失败")?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => println!("{}", console::HELP),
            Command::Json => {
                println!("{}", serde_json::to_string_pretty(engine.state())?);
            }
            command => {
                if let Err(err) = console::execute(&mut engine, &command) {
                    println!("{}", err);
                }
                print!("{}", console::render(&engine));
            }
        }
        stdout.flush()?;
    }
    Ok(())
}
