//! # 贴图合并工具：库入口
//!
//! 把粗糙度 / 光滑度贴图与金属度贴图打包为一张 PBR 遮罩：
//! R = 金属度，G = B = 1，A = 光滑度（粗糙度输入先做 `1 - v` 反相）。
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  main.rs ── env_logger 初始化 + 退出码                   │
//! │     ↓                                                    │
//! │  cli ──── clap 参数 + settings(JSON) + storage 默认目录  │
//! │     ↓  PackRequest / PackConfig                          │
//! │  packer ──── ChannelPacker                               │
//! │   ├─ loader    文件加载 + 体积校验 + 格式确定            │
//! │   ├─ pipeline  尺寸探测 + 面积校验 + 完整解码            │
//! │   ├─ channel   反相 + 通道合并                           │
//! │   └─ encoder   PNG 编码 + 写盘                           │
//! │     ↓                                                    │
//! │  {save_dir}/{save_name}.png                              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 应用级错误类型 `AppError` |
//! | [`packer`] | 通道打包核心：加载、解码、合并、编码、写盘 |
//! | [`cli`] | 命令行参数解析与请求组装 |
//! | [`settings`] | JSON 设置文件 |
//! | [`storage`] | 输出目录解析 |

pub mod cli;
pub mod error;
pub mod packer;
pub mod settings;
pub mod storage;
