//! 根据源贴图文件名推断粗糙度标记与默认输出名。
//!
//! 命名约定：文件名含 `_R` 视为粗糙度贴图；输出名取第一个 `_` 之前的部分加 `PbrMask`。

/// 默认输出名后缀。
pub const DEFAULT_NAME_SUFFIX: &str = "PbrMask";

const ROUGHNESS_MARKER: &str = "_R";

/// 文件名主干包含 `_R` 时视为粗糙度贴图（区分大小写）。
pub fn infer_is_roughness(stem: &str) -> bool {
    stem.contains(ROUGHNESS_MARKER)
}

/// 生成默认输出名。
///
/// 优先使用粗糙度 / 光滑度贴图的文件名，其次是金属度贴图，都没有时返回 `PbrMask`。
///
/// # 示例
/// ```rust
/// use texture_combine::packer::default_save_name;
///
/// assert_eq!(default_save_name(Some("Rock_R"), None), "RockPbrMask");
/// assert_eq!(default_save_name(None, Some("Rock_M")), "RockPbrMask");
/// assert_eq!(default_save_name(None, None), "PbrMask");
/// ```
pub fn default_save_name(roughness_stem: Option<&str>, metallic_stem: Option<&str>) -> String {
    let stem = roughness_stem.or(metallic_stem).unwrap_or_default();
    let prefix = stem.split('_').next().unwrap_or_default();
    format!("{}{}", prefix, DEFAULT_NAME_SUFFIX)
}
