//! # 贴图合并工具：命令行入口
//!
//! 本文件仅负责日志初始化与退出码，业务逻辑见 `lib.rs` 架构文档。

use texture_combine::cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = cli::run() {
        log::error!("贴图合并失败 [{}]: {err}", err.code());
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
