//! シートデータのパーサー
//!
//! 取得元ごとの形式をすべて `Grid`（行優先の文字列配列）に揃える:
//! - CSV（スプレッドシートのCSVエクスポート）
//! - Sheets API の ValueRange JSON（`{"values": [[...]]}`）
//! - 素の2次元JSON配列

use crate::error::{Error, Result};
use crate::types::Grid;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sheets API `spreadsheets.values.get` のレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueRange {
    pub range: String,
    pub major_dimension: String,
    pub values: Vec<Vec<Value>>,
}

impl ValueRange {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// セルを文字列化してGridに変換
    pub fn into_grid(self) -> Grid {
        rows_to_grid(self.values)
    }
}

fn value_to_cell(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn rows_to_grid(rows: Vec<Vec<Value>>) -> Grid {
    rows.into_iter()
        .map(|row| row.into_iter().map(value_to_cell).collect())
        .collect()
}

/// JSONからGridを読み込む
///
/// `{"values": [[...]]}` 形式と `[[...]]` 形式の両方を受け付ける。
pub fn parse_grid_json(json: &str) -> Result<Grid> {
    let value: Value = serde_json::from_str(json.trim())?;

    match value {
        Value::Object(_) => {
            let range: ValueRange = serde_json::from_value(value)
                .map_err(|e| Error::Parse(format!("ValueRange JSONパースエラー: {}", e)))?;
            Ok(range.into_grid())
        }
        Value::Array(_) => {
            let rows: Vec<Vec<Value>> = serde_json::from_value(value)
                .map_err(|e| Error::Parse(format!("2次元配列ではありません: {}", e)))?;
            Ok(rows_to_grid(rows))
        }
        _ => Err(Error::Parse("JSONはオブジェクトか配列である必要があります".into())),
    }
}

/// CSVテキストをパース
///
/// - `"` で囲まれたフィールド内のカンマ・改行はそのまま保持（スキル欄は複数行）
/// - 行ごとの列数は揃っていなくてよい
/// - 空行は読み飛ばす
///
/// # Examples
/// ```
/// use skill_sheet_common::parse_csv;
///
/// let grid = parse_csv("1,\"PHP\nLaravel\"\n").unwrap();
/// assert_eq!(grid, vec![vec!["1".to_string(), "PHP\nLaravel".to_string()]]);
/// ```
pub fn parse_csv(text: &str) -> Result<Grid> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(str::to_string).collect::<Vec<String>>())
                .map_err(|e| Error::Parse(format!("CSVパースエラー: {}", e)))
        })
        .collect()
}
