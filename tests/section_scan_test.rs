// ==========================================
// 文件解析 → 工单分段 集成测试
// ==========================================
// 测试目标: CSV/Excel 文件经 OrderImporter 得到正确分段
// ==========================================


use order_merge::importer::{OrderImporter, ScanOptions, DEFAULT_CSV_ENCODINGS};
use order_merge::{logging, FallbackOrderPolicy};
use test_helpers::{write_csv, write_gbk_csv, write_xlsx, write_xlsx_sheets, write_xlsx_with_date};

fn importer(policy: FallbackOrderPolicy) -> OrderImporter {
    OrderImporter::with_options(
        DEFAULT_CSV_ENCODINGS.iter().map(|e| e.to_string()).collect(),
        ScanOptions {
            fallback_policy: policy,
            ..ScanOptions::default()
        },
    )
}

const HEADER: &[&str] = &["品名", "规格", "单位", "数量", "单价", "金额", "备注"];

#[test]
fn test_csv_two_orders_share_header() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "orders.csv",
        &[
            &["", "XIDP-A1234567890 2024-03-15"],
            HEADER,
            &["螺栓", "M6x20", "个", "10", "2.50", "", "无"],
            &["螺母", "M6", "臺/台", "3", "1.2", "", ""],
            &["", "XIDP-B1234567890 2024/3/16"],
            &["垫片", "6mm", "箱", "5", "0.5", "", ""],
        ],
    )
    .unwrap();

    let sections = importer(FallbackOrderPolicy::MostRecent).parse_file_to_sections(&path);

    assert_eq!(sections.len(), 2);
    let first = &sections[0];
    assert_eq!(first.order_no(), "XIDP-A1234567890");
    assert_eq!(first.date, "2024-03-15");
    assert_eq!(first.info, "工单详情");
    assert_eq!(first.records.len(), 2);
    assert_eq!(first.records[0].quantity, 10.0);
    assert_eq!(first.records[0].unit_price, 2.5);
    assert_eq!(first.records[0].amount, 25.0);
    assert_eq!(first.records[0].remarks, "无");
    assert_eq!(first.records[1].unit, "台");
    assert_eq!(first.records[1].amount, 3.6);

    let second = &sections[1];
    assert_eq!(second.order_no(), "XIDP-B1234567890");
    assert_eq!(second.date, "2024/3/16");
    assert_eq!(second.records.len(), 1);
    assert_eq!(second.records[0].unit, "箱");
}

#[test]
fn test_csv_gbk_encoded() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_gbk_csv(
        dir.path(),
        "gbk.csv",
        &[
            &["", "XIDP-1234567890"],
            &["品名", "数量", "单价", "询价人", "代购厂商"],
            &["轴承", "4", "12.5", "张三", "某某贸易"],
        ],
    )
    .unwrap();

    let sections = importer(FallbackOrderPolicy::MostRecent).parse_file_to_sections(&path);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].records[0].item_name, "轴承");
    assert_eq!(sections[0].records[0].amount, 50.0);
    assert_eq!(sections[0].info, "某某贸易，张三");
}

#[test]
fn test_xlsx_numeric_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_xlsx(
        dir.path(),
        "orders.xlsx",
        &[
            &["", "XIDP-1234567890 2024-03-15"],
            HEADER,
            &["螺栓", "M6x20", "个", "10", "2.5", "", "无"],
            &["法兰", "DN50", "公斤", "1.5", "20", "", ""],
        ],
    )
    .unwrap();

    let sections = importer(FallbackOrderPolicy::MostRecent).parse_file_to_sections(&path);

    assert_eq!(sections.len(), 1);
    let records = &sections[0].records;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].quantity_text(), "10");
    assert_eq!(records[0].amount, 25.0);
    assert_eq!(records[1].unit, "kg");
    assert_eq!(records[1].quantity_text(), "1.5");
    assert_eq!(records[1].amount, 30.0);
}

#[test]
fn test_xlsx_date_cell_feeds_section_date() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_xlsx_with_date(
        dir.path(),
        "dated.xlsx",
        &[
            &["", "XIDP-1234567890"],
            HEADER,
            &["螺栓", "M6x20", "个", "10", "2.5", "", ""],
        ],
        (0, 2),
        (2024, 3, 15),
    )
    .unwrap();

    let sections = importer(FallbackOrderPolicy::MostRecent).parse_file_to_sections(&path);

    assert_eq!(sections.len(), 1);
    // 日期单元格按 YYYY-MM-DD HH:MM:SS 读取，再从行文本中识别日期
    assert_eq!(sections[0].date, "2024-03-15");
    assert_eq!(sections[0].records.len(), 1);
}

#[test]
fn test_xlsx_only_first_sheet_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let cover: &[&[&str]] = &[&["封面"]];
    let data: &[&[&str]] = &[
        &["", "XIDP-1234567890"],
        HEADER,
        &["螺栓", "M6x20", "个", "10", "2.5", "", ""],
    ];
    let path = write_xlsx_sheets(dir.path(), "two_sheets.xlsx", &[cover, data]).unwrap();

    let sections = importer(FallbackOrderPolicy::MostRecent).parse_file_to_sections(&path);

    assert!(sections.is_empty());

    // 数据在第一个工作表时可正常识别
    let path = write_xlsx_sheets(dir.path(), "data_first.xlsx", &[data, cover]).unwrap();
    assert_eq!(
        importer(FallbackOrderPolicy::MostRecent)
            .parse_file_to_sections(&path)
            .len(),
        1
    );
}

#[test]
fn test_rows_before_any_order_use_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let rows: &[&[&str]] = &[
        HEADER,
        &["螺栓", "M6", "个", "1", "1", "", ""],
        &["", "XIDP-4444444444"],
        &["螺母", "M6", "个", "2", "1", "", ""],
    ];
    let path = write_csv(dir.path(), "implicit.csv", rows).unwrap();

    let recent = importer(FallbackOrderPolicy::MostRecent).parse_file_to_sections(&path);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].order_no(), "未知单号");
    assert_eq!(recent[1].order_no(), "XIDP-4444444444");

    let first = importer(FallbackOrderPolicy::FirstInFile).parse_file_to_sections(&path);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].order_no(), "XIDP-4444444444");
    assert_eq!(first[0].records.len(), 2);
}

#[test]
fn test_unreadable_inputs_yield_no_sections() {
    let dir = tempfile::tempdir().unwrap();
    let importer = importer(FallbackOrderPolicy::MostRecent);

    assert!(importer
        .parse_file_to_sections(dir.path().join("missing.csv"))
        .is_empty());

    let txt = dir.path().join("notes.txt");
    std::fs::write(&txt, "XIDP-1234567890").unwrap();
    assert!(importer.parse_file_to_sections(&txt).is_empty());

    let broken = dir.path().join("broken.xlsx");
    std::fs::write(&broken, b"not a zip").unwrap();
    assert!(importer.parse_file_to_sections(&broken).is_empty());
}

#[test]
fn test_section_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "a.csv",
        &[&["", "XIDP-1234567890"], &["品名", "数量"], &["螺栓", "2"]],
    )
    .unwrap();

    let sections = importer(FallbackOrderPolicy::MostRecent).parse_file_to_sections(&path);
    let json = serde_json::to_value(&sections).unwrap();

    assert_eq!(json[0]["order_no"], "XIDP-1234567890");
    assert_eq!(json[0]["records"][0]["item_name"], "螺栓");
    assert!(json[0].get("header_map").is_none());
}
