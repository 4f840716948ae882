//! # 贴图通道打包模块（packer）
//!
//! ## 设计思路
//!
//! 该模块把“来源加载 → 解码为可读副本 → 通道合并 → PNG 编码 → 写盘”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `handler`：编排整条处理流水线（`ChannelPacker`）
//! - `loader`：负责文件加载、体积限制与格式确定
//! - `pipeline`：负责尺寸探测、像素限制与完整解码
//! - `channel`：负责粗糙度反相与通道合并（核心算法）
//! - `encoder`：负责 PNG 编码与目标文件写入
//! - `naming`：负责根据源文件名推断粗糙度标记与默认输出名
//! - `config/error/source`：配置、错误、数据模型
//!
//! ## 实现思路
//!
//! 对外仅暴露必要类型与入口函数，内部细节保持 `mod` 私有。
//!
//! ## 调用链
//!
//! ```text
//! PackRequest
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（文件加载 + 体积校验 + 格式确定）
//!    ├─ pipeline.rs（尺寸探测 + 面积校验 + 完整解码）
//!    ├─ channel.rs（反相 + 合并）
//!    └─ encoder.rs（PNG 编码 + 写盘）
//!    ↓
//! Option<PackOutput> / PackError
//! ```
//!
//! 输出通道语义：R = 金属度红通道，G = B = 1，A = 光滑度（粗糙度反相）红通道。

mod channel;
mod config;
mod encoder;
mod error;
mod handler;
mod loader;
mod naming;
mod pipeline;
mod source;

pub use channel::{invert_rgb, pack_images};
pub use config::PackConfig;
pub use encoder::{encode_png, write_output};
pub use error::PackError;
pub use handler::ChannelPacker;
pub use naming::{DEFAULT_NAME_SUFFIX, default_save_name, infer_is_roughness};
pub use source::{Channel, Image, ImageSource, PackOutput, PackRequest};
