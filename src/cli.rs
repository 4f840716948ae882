//! # 命令行适配层
//!
//! ## 设计思路
//!
//! 命令行只负责把参数与设置文件合并成一个 `PackRequest` 和 `PackConfig`，
//! 不承载任何像素逻辑；实际处理交给 `ChannelPacker`。
//!
//! ## 合并顺序
//!
//! 命令行参数 > 设置文件 > 内置默认值（按文件名推断粗糙度、`{前缀}PbrMask`、`CombineTextures`）。

use std::path::PathBuf;

use clap::{Parser, ValueEnum, error::ErrorKind};
use serde::Serialize;

use crate::error::AppError;
use crate::packer::{
    ChannelPacker, ImageSource, PackConfig, PackOutput, PackRequest, default_save_name,
    infer_is_roughness,
};
use crate::settings::{PackSettings, load_settings_from_path};
use crate::storage::resolve_save_dir;

/// 粗糙度 / 光滑度判定方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoughnessMode {
    /// 文件名包含 `_R` 时视为粗糙度贴图
    Auto,
    /// 输入是粗糙度，写入前反相为光滑度
    Roughness,
    /// 输入已经是光滑度，原样写入
    Smoothness,
}

#[derive(Debug, Parser)]
#[command(
    name = "texture-combine",
    version,
    about = "Pack roughness/smoothness and metallic maps into one PBR mask PNG",
    long_about = "texture-combine writes R = metallic, G = B = 1, A = smoothness into {out-dir}/{name}.png. Roughness inputs are inverted to smoothness first."
)]
pub struct Cli {
    /// Roughness or smoothness map (written to alpha)
    #[arg(short = 'r', long, value_name = "PATH")]
    pub roughness: Option<PathBuf>,

    /// Metallic map (written to red)
    #[arg(short = 'm', long, value_name = "PATH")]
    pub metallic: Option<PathBuf>,

    /// How to treat the roughness/smoothness input
    #[arg(long, value_enum, default_value_t = RoughnessMode::Auto)]
    pub mode: RoughnessMode,

    /// Output directory (default: CombineTextures)
    #[arg(short = 'o', long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Output file name without extension (default: <prefix>PbrMask)
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// JSON settings file; command line flags take precedence
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Require identical width and height instead of identical pixel count
    #[arg(long)]
    pub strict_dimensions: bool,

    /// Print a JSON report to stdout
    #[arg(long)]
    pub json: bool,
}

/// 一次命令行调用解析后的完整输入。
#[derive(Debug)]
pub struct Invocation {
    pub request: PackRequest,
    pub config: PackConfig,
    pub json: bool,
}

impl Cli {
    /// 合并命令行参数与设置文件。
    pub fn into_invocation(self) -> Result<Invocation, AppError> {
        let settings = match &self.config {
            Some(path) => load_settings_from_path(path)?,
            None => PackSettings::default(),
        };

        let mut config = PackConfig::default();
        settings.apply_to_config(&mut config);
        if self.strict_dimensions {
            config.require_exact_dimensions = true;
        }

        let roughness = self.roughness.or(settings.roughness).map(ImageSource::FilePath);
        let metallic = self.metallic.or(settings.metallic).map(ImageSource::FilePath);

        let roughness_stem = roughness.as_ref().and_then(ImageSource::file_stem);
        let metallic_stem = metallic.as_ref().and_then(ImageSource::file_stem);

        let is_roughness = match self.mode {
            RoughnessMode::Roughness => true,
            RoughnessMode::Smoothness => false,
            RoughnessMode::Auto => settings.is_roughness.unwrap_or_else(|| {
                let detected = roughness_stem.as_deref().is_some_and(infer_is_roughness);
                log::debug!("按文件名推断粗糙度标记: {:?} -> {}", roughness_stem, detected);
                detected
            }),
        };

        let save_name = match self.name.or(settings.save_name) {
            Some(name) => name,
            None => default_save_name(roughness_stem.as_deref(), metallic_stem.as_deref()),
        };
        let save_dir = resolve_save_dir(self.out_dir.or(settings.save_dir));

        Ok(Invocation {
            request: PackRequest {
                roughness,
                metallic,
                is_roughness,
                save_dir,
                save_name,
            },
            config,
            json: self.json,
        })
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a PackOutput>,
}

fn print_outcome(outcome: Option<&PackOutput>, json: bool) -> Result<(), AppError> {
    if json {
        let status = match outcome {
            Some(_) => "written",
            None => "skipped",
        };
        let report = Report {
            status,
            output: outcome,
        };
        let text = serde_json::to_string_pretty(&report)?;
        println!("{}", text);
        return Ok(());
    }

    match outcome {
        Some(output) => println!(
            "Saved PBR mask → {} ({}x{})",
            output.path.display(),
            output.width,
            output.height
        ),
        None => println!("Nothing to pack: no roughness/smoothness or metallic map given"),
    }
    Ok(())
}

/// 解析命令行并执行一次打包。
///
/// - Help/Version → 打印后返回 `Ok(())`
/// - 其它解析错误 → 打印后以 clap 的退出码结束进程
pub fn run() -> Result<(), AppError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                return Ok(());
            }
            _ => {
                let _ = e.print();
                std::process::exit(e.exit_code());
            }
        },
    };

    let invocation = cli.into_invocation()?;
    let packer = ChannelPacker::new(invocation.config)?;
    let outcome = packer.pack(invocation.request)?;
    print_outcome(outcome.as_ref(), invocation.json)
}
