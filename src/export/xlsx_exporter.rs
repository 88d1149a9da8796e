// ==========================================
// 工单汇总工具 - 汇总工作簿写出
// ==========================================
// 版式:
// - 第 1 行: 8 个标准列标题（加粗、居中、细边框）
// - 每个导出块: 信息行（日期/描述/单号）+ 明细行
// - 块内细边框，块外框中粗边框，块间空一行
// ==========================================

use crate::domain::{format_quantity, StandardRecord};
use crate::export::error::{ExportError, ExportResult};
use crate::export::plan::{ExportBlock, ExportRow};
use chrono::NaiveDateTime;
use rust_xlsxwriter::{ColNum, Format, FormatAlign, FormatBorder, RowNum, Workbook};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 汇总工作表名称
pub const SHEET_NAME: &str = "汇总工单";

/// 导出列标题（顺序即列顺序）
pub const EXPORT_COLUMNS: [&str; 8] = [
    "序号",
    "品名",
    "规格/图号",
    "单位",
    "数量",
    "单价",
    "金额",
    "备注/本体单重",
];

const COLUMN_WIDTHS: [f64; 8] = [8.0, 24.0, 24.0, 8.0, 10.0, 12.0, 12.0, 20.0];

const LAST_COL: usize = EXPORT_COLUMNS.len() - 1;

/// 输出文件名: `<前缀>YYYYMMDD_HHMMSS.xlsx`
pub fn output_file_name(prefix: &str, now: NaiveDateTime) -> String {
    format!("{}{}.xlsx", prefix, now.format("%Y%m%d_%H%M%S"))
}

/// 单元格对齐方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellAlign {
    Center,     // 居中 + 垂直居中 + 自动换行
    LeftWrap,   // 靠左 + 垂直居中 + 自动换行
    Left,       // 靠左 + 垂直居中
}

/// 块内单元格位置（决定外框）
#[derive(Debug, Clone, Copy)]
struct Edges {
    top: bool,
    bottom: bool,
    left: bool,
    right: bool,
}

fn border(outer: bool) -> FormatBorder {
    if outer {
        FormatBorder::Medium
    } else {
        FormatBorder::Thin
    }
}

fn cell_format(align: CellAlign, edges: Edges, money: bool) -> Format {
    let mut format = Format::new()
        .set_align(FormatAlign::VerticalCenter)
        .set_border_top(border(edges.top))
        .set_border_bottom(border(edges.bottom))
        .set_border_left(border(edges.left))
        .set_border_right(border(edges.right));

    format = match align {
        CellAlign::Center => format.set_align(FormatAlign::Center).set_text_wrap(),
        CellAlign::LeftWrap => format.set_align(FormatAlign::Left).set_text_wrap(),
        CellAlign::Left => format.set_align(FormatAlign::Left),
    };

    if money {
        format = format.set_num_format("0.00");
    }
    format
}

fn row_num(row: usize) -> ExportResult<RowNum> {
    RowNum::try_from(row).map_err(|_| ExportError::RowOverflow(row))
}

fn col_num(col: usize) -> ColNum {
    // 列数固定为 8
    col as ColNum
}

pub struct XlsxExporter {
    workbook: Workbook,
    next_row: usize,
    blocks_written: usize,
}

impl XlsxExporter {
    /// 创建工作簿并写入标题行
    pub fn new() -> ExportResult<Self> {
        let mut workbook = Workbook::new();
        let header_format = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin);

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;
        for (col, title) in EXPORT_COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col_num(col), *title, &header_format)?;
            worksheet.set_column_width(col_num(col), COLUMN_WIDTHS[col])?;
        }

        Ok(Self {
            workbook,
            next_row: 1,
            blocks_written: 0,
        })
    }

    /// 是否写入过任何导出块
    pub fn is_empty(&self) -> bool {
        self.blocks_written == 0
    }

    pub fn blocks_written(&self) -> usize {
        self.blocks_written
    }

    /// 写入一个导出块（信息行 + 明细行），块后空一行
    pub fn write_block(&mut self, block: &ExportBlock) -> ExportResult<()> {
        if block.rows.is_empty() {
            return Ok(());
        }

        let start = self.next_row;
        let end = start + block.rows.len();

        self.write_info_row(block, start, end)?;
        for (offset, row) in block.rows.iter().enumerate() {
            self.write_record_row(row, start + 1 + offset, start, end)?;
        }

        debug!(
            order_no = %block.order_no,
            start_row = start,
            rows = block.rows.len(),
            "导出块写入完成"
        );

        self.next_row = end + 2;
        self.blocks_written += 1;
        Ok(())
    }

    fn edges(row: usize, col: usize, start: usize, end: usize) -> Edges {
        Edges {
            top: row == start,
            bottom: row == end,
            left: col == 0,
            right: col == LAST_COL,
        }
    }

    fn write_text(
        &mut self,
        row: usize,
        col: usize,
        text: &str,
        format: &Format,
    ) -> ExportResult<()> {
        let worksheet = self.workbook.worksheet_from_index(0)?;
        if text.is_empty() {
            worksheet.write_blank(row_num(row)?, col_num(col), format)?;
        } else {
            worksheet.write_string_with_format(row_num(row)?, col_num(col), text, format)?;
        }
        Ok(())
    }

    fn write_number(
        &mut self,
        row: usize,
        col: usize,
        value: f64,
        format: &Format,
    ) -> ExportResult<()> {
        let worksheet = self.workbook.worksheet_from_index(0)?;
        worksheet.write_number_with_format(row_num(row)?, col_num(col), value, format)?;
        Ok(())
    }

    fn write_info_row(&mut self, block: &ExportBlock, start: usize, end: usize) -> ExportResult<()> {
        for col in 0..EXPORT_COLUMNS.len() {
            let edges = Self::edges(start, col, start, end);
            match col {
                0 => {
                    let format = cell_format(CellAlign::Center, edges, false);
                    self.write_text(start, col, &block.date, &format)?;
                }
                1 => {
                    let format = cell_format(CellAlign::LeftWrap, edges, false);
                    self.write_text(start, col, &block.info, &format)?;
                }
                2 => {
                    let format = cell_format(CellAlign::Center, edges, false);
                    self.write_text(start, col, &block.order_no, &format)?;
                }
                _ => {
                    let format = cell_format(CellAlign::Left, edges, false);
                    self.write_text(start, col, "", &format)?;
                }
            }
        }
        Ok(())
    }

    fn write_record_row(
        &mut self,
        row: &ExportRow,
        sheet_row: usize,
        start: usize,
        end: usize,
    ) -> ExportResult<()> {
        let record: &StandardRecord = &row.record;
        for col in 0..EXPORT_COLUMNS.len() {
            let edges = Self::edges(sheet_row, col, start, end);
            match col {
                0 => {
                    let format = cell_format(CellAlign::Center, edges, false);
                    self.write_number(sheet_row, col, row.seq as f64, &format)?;
                }
                1 => {
                    let format = cell_format(CellAlign::Left, edges, false);
                    self.write_text(sheet_row, col, &record.item_name, &format)?;
                }
                2 => {
                    let format = cell_format(CellAlign::Left, edges, false);
                    self.write_text(sheet_row, col, &record.spec, &format)?;
                }
                3 => {
                    let format = cell_format(CellAlign::Center, edges, false);
                    self.write_text(sheet_row, col, &record.unit, &format)?;
                }
                4 => {
                    let format = cell_format(CellAlign::Center, edges, false);
                    self.write_number(sheet_row, col, record.quantity, &format)?;
                }
                5 => {
                    let format = cell_format(CellAlign::Left, edges, true);
                    self.write_number(sheet_row, col, record.unit_price, &format)?;
                }
                6 => {
                    let format = cell_format(CellAlign::Left, edges, true);
                    self.write_number(sheet_row, col, record.amount, &format)?;
                }
                _ => {
                    let format = cell_format(CellAlign::Left, edges, false);
                    self.write_text(sheet_row, col, &record.remarks, &format)?;
                }
            }
        }
        debug!(seq = row.seq, quantity = %format_quantity(record.quantity), "明细行写入");
        Ok(())
    }

    /// 保存到指定路径
    pub fn save(&mut self, path: &Path) -> ExportResult<()> {
        self.workbook.save(path)?;
        info!(path = %path.display(), blocks = self.blocks_written, "汇总工作簿已保存");
        Ok(())
    }

    /// 保存到输出目录，文件名带时间戳
    pub fn save_to_dir(
        &mut self,
        output_dir: &Path,
        prefix: &str,
        now: NaiveDateTime,
    ) -> ExportResult<PathBuf> {
        std::fs::create_dir_all(output_dir).map_err(|e| ExportError::OutputDirError {
            path: output_dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = output_dir.join(output_file_name(prefix, now));
        self.save(&path)?;
        Ok(path)
    }
}
