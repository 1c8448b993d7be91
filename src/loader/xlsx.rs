use crate::config::DEFAULT_SHEET_NAME;
use crate::error::{Result, SkillSheetError};
use calamine::{open_workbook_auto, Data, Range, Reader};
use skill_sheet_common::Grid;
use std::path::Path;

/// 読み込むシート名を決める
///
/// 指定があればそのシート（なければエラー）、指定がなければ「経歴書」→先頭シート。
pub fn choose_sheet(names: &[String], preferred: Option<&str>) -> Result<String> {
    if let Some(name) = preferred {
        return names
            .iter()
            .find(|n| n.as_str() == name)
            .cloned()
            .ok_or_else(|| SkillSheetError::SheetNotFound(name.to_string()));
    }

    names
        .iter()
        .find(|n| n.as_str() == DEFAULT_SHEET_NAME)
        .or_else(|| names.first())
        .cloned()
        .ok_or_else(|| SkillSheetError::Spreadsheet("シートがありません".into()))
}

/// ワークブックの1シートをGridとして読み込む
pub fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<Grid> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| SkillSheetError::Spreadsheet(format!("{}: {}", path.display(), e)))?;

    let name = choose_sheet(&workbook.sheet_names(), sheet)?;
    tracing::info!("シート「{}」を読み込みます", name);

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| SkillSheetError::Spreadsheet(format!("{}: {}", name, e)))?;

    Ok(range_to_grid(&range))
}

/// セル範囲をGridに変換
///
/// 使用範囲がA1から始まらない場合も列番号が絶対位置になるよう、先頭を空セルで埋める。
pub fn range_to_grid(range: &Range<Data>) -> Grid {
    let (row_offset, col_offset) = match range.start() {
        Some((r, c)) => (r as usize, c as usize),
        None => return Vec::new(),
    };

    let mut grid: Grid = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![String::new(); col_offset];
        cells.extend(row.iter().map(data_to_string));
        grid.push(cells);
    }
    grid
}

fn data_to_string(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // 整数値の数値セル（案件番号など）は "1.0" ではなく "1"
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
