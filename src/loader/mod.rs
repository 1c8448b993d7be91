//! ローカルファイルからシートを読み込むモジュール
//!
//! CSV / XLSX（calamine対応形式）/ JSON を `Grid` に揃える。

pub mod xlsx;

use crate::cli::InputFormat;
use crate::error::{Result, SkillSheetError};
use skill_sheet_common::{parse_csv, parse_grid_json, Grid};
use std::path::Path;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// 判定済みの入力形式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Workbook,
    Json,
}

/// 指定形式を確定する（`Auto` は拡張子から判定）
pub fn resolve_format(path: &Path, format: InputFormat) -> Result<SheetFormat> {
    match format {
        InputFormat::Auto => detect_format(path),
        InputFormat::Csv => Ok(SheetFormat::Csv),
        InputFormat::Xlsx => Ok(SheetFormat::Workbook),
        InputFormat::Json => Ok(SheetFormat::Json),
    }
}

/// 拡張子から入力形式を判定
pub fn detect_format(path: &Path) -> Result<SheetFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => Ok(SheetFormat::Csv),
        "json" => Ok(SheetFormat::Json),
        e if WORKBOOK_EXTENSIONS.contains(&e) => Ok(SheetFormat::Workbook),
        _ => Err(SkillSheetError::UnsupportedFormat(path.display().to_string())),
    }
}

/// ファイルを読み込んでGridを返す
///
/// `sheet` はワークブックのみ有効。
pub fn load_grid(path: &Path, format: InputFormat, sheet: Option<&str>) -> Result<Grid> {
    if !path.exists() {
        return Err(SkillSheetError::FileNotFound(path.display().to_string()));
    }

    let format = resolve_format(path, format)?;
    tracing::debug!("読み込み: {} ({:?})", path.display(), format);

    let grid = match format {
        SheetFormat::Csv => parse_csv(&std::fs::read_to_string(path)?)?,
        SheetFormat::Json => parse_grid_json(&std::fs::read_to_string(path)?)?,
        SheetFormat::Workbook => xlsx::read_workbook(path, sheet)?,
    };

    if grid.is_empty() {
        return Err(SkillSheetError::EmptySpreadsheet);
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("a/経歴書.CSV")).unwrap(), SheetFormat::Csv);
        assert_eq!(detect_format(Path::new("sheet.xlsm")).unwrap(), SheetFormat::Workbook);
        assert_eq!(detect_format(Path::new("values.json")).unwrap(), SheetFormat::Json);
    }

    #[test]
    fn test_resolve_format_explicit_ignores_extension() {
        let path = Path::new("export.txt");
        assert_eq!(resolve_format(path, InputFormat::Csv).unwrap(), SheetFormat::Csv);
        assert_eq!(resolve_format(path, InputFormat::Xlsx).unwrap(), SheetFormat::Workbook);
        assert!(matches!(
            resolve_format(path, InputFormat::Auto),
            Err(SkillSheetError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_detect_format_unsupported() {
        assert!(matches!(
            detect_format(Path::new("notes.txt")),
            Err(SkillSheetError::UnsupportedFormat(_))
        ));
        assert!(detect_format(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_load_grid_missing_file() {
        let result = load_grid(Path::new("/nonexistent/skills.csv"), InputFormat::Auto, None);
        assert!(matches!(result, Err(SkillSheetError::FileNotFound(_))));
    }
}
