//! End-to-end parsing of the supported input formats.

use std::io::{Cursor, Write};

use dataframer::{
    ColumnData, CompressionKind, ContentShape, ITEM_COLUMN, ParseError, ParseOptions, RowKey,
    Table, parse, parse_bytes, sniff,
};

/// `,b,c\n1,2,3` compressed with `gzip`.
const GZIP_FIXTURE: &[u8] = b"\x1f\x8b\x08\x08\xe5\xf2\x82Z\x00\x03fake.csv\x00\xd3I\xd2I\xe62\xd41\xd21\x06\x00\xfb\x9a\xc9\xa6\x0a\x00\x00\x00";

/// `,b,c\n1,2,3` stored as `fake.csv` in a zip archive.
const ZIP_FIXTURE: &[u8] = b"PK\x03\x04\x0a\x00\x00\x00\x00\x00\x8dZML\xfb\x9a\xc9\xa6\x0a\x00\x00\x00\x0a\x00\x00\x00\x08\x00\x1c\x00fake.csvUT\x09\x00\x03J\x10\x83Zk\x11\x83Zux\x0b\x00\x01\x04\xf6\x01\x00\x00\x04\x14\x00\x00\x00,b,c\x0a1,2,3PK\x01\x02\x1e\x03\x0a\x00\x00\x00\x00\x00\x8dZML\xfb\x9a\xc9\xa6\x0a\x00\x00\x00\x0a\x00\x00\x00\x08\x00\x18\x00\x00\x00\x00\x00\x01\x00\x00\x00\xa4\x81\x00\x00\x00\x00fake.csvUT\x05\x00\x03J\x10\x83Zux\x0b\x00\x01\x04\xf6\x01\x00\x00\x04\x14\x00\x00\x00PK\x05\x06\x00\x00\x00\x00\x01\x00\x01\x00N\x00\x00\x00L\x00\x00\x00\x00\x00";

fn parse_default(input: &[u8]) -> Table {
    parse_bytes(input, ParseOptions::default())
        .expect("parse")
        .table
}

/// Asserts the `b`, `c` / key `1` / `[2, 3]` table most fixtures produce.
fn assert_target(table: &Table, message: &str) {
    assert_eq!(table.column_names(), vec!["b", "c"], "{message}");
    assert_eq!(table.row_keys(), &[RowKey::value("1")], "{message}");
    assert_eq!(
        table.numeric_row(0),
        Some(vec![Some(2.0), Some(3.0)]),
        "{message}"
    );
}

#[test]
fn reads_crazy_delimiters() {
    for d in "~!@#$%^&*|:;,".chars() {
        let input = format!("{d}b{d}c\n1{d}2{d}3");
        let table = parse_default(input.as_bytes());
        assert_target(&table, &format!("failed with {d} as delimiter"));
    }
}

#[test]
fn reads_csv() {
    assert_target(&parse_default(b",b,c\n1,2,3"), "csv");
}

#[test]
fn reads_csv_crlf() {
    assert_target(&parse_default(b",b,c\r\n1,2,3"), "crlf");
}

#[test]
fn reads_csv_quoted() {
    assert_target(&parse_default(b",\"b\",\"c\"\n\"1\",\"2\",\"3\""), "quoted");
}

#[test]
fn quotes_inside_text_cell_are_data() {
    let options = ParseOptions::default().with_keep_strings(true);
    let table = parse_bytes(b"id,comment\n1,the \"best\" one\n2,ok\n", options)
        .expect("parse")
        .table;
    assert_eq!(table.index_name(), Some("id"));
    assert_eq!(table.row_keys(), &[RowKey::value("1"), RowKey::value("2")]);
    assert_eq!(
        table.column("comment").expect("comment").data,
        ColumnData::Text(vec![
            Some("the \"best\" one".to_string()),
            Some("ok".to_string())
        ])
    );
}

#[test]
fn reads_tsv() {
    assert_target(&parse_default(b"\tb\tc\n1\t2\t3"), "tsv");
}

#[test]
fn reads_gzip() {
    assert_target(&parse_default(GZIP_FIXTURE), "gzip");
}

#[test]
fn reads_zip() {
    assert_target(&parse_default(ZIP_FIXTURE), "zip");
}

#[test]
fn compressed_and_plain_inputs_agree() {
    let plain = parse_default(b",b,c\n1,2,3");
    assert_eq!(parse_default(GZIP_FIXTURE), plain);
    assert_eq!(parse_default(ZIP_FIXTURE), plain);
}

#[test]
fn sniffs_compression_fixtures() {
    let mut gzip = Cursor::new(GZIP_FIXTURE);
    let sniffed = sniff(&mut gzip).expect("sniff gzip");
    assert_eq!(sniffed.compression, CompressionKind::Gzip);
    assert_eq!(sniffed.shape, ContentShape::DelimitedTable);
    assert_eq!(gzip.position(), 0);

    let mut zip = Cursor::new(ZIP_FIXTURE);
    let sniffed = sniff(&mut zip).expect("sniff zip");
    assert_eq!(sniffed.compression, CompressionKind::Zip);
    assert_eq!(zip.position(), 0);
}

#[test]
fn removes_strings_by_default() {
    assert_target(&parse_default(b",b,c,xxx\n1,2,3,X!"), "strings removed");
}

#[test]
fn keeps_strings_on_request() {
    let options = ParseOptions::default().with_keep_strings(true);
    let result = parse_bytes(b",b,c,xxx\n1,2,3,X!", options).expect("parse");
    let table = result.table;
    assert_eq!(table.column_names(), vec!["b", "c", "xxx"]);
    assert_eq!(
        table.column("xxx").expect("xxx").data,
        ColumnData::Text(vec![Some("X!".to_string())])
    );
    assert_eq!(table.numeric_row(0), Some(vec![Some(2.0), Some(3.0)]));
}

#[test]
fn relabels_from_first_text_column() {
    let options = ParseOptions::default().with_relabel(true);
    let result = parse_bytes(b",b,c,xxx,yyy\n1,2,3,X!,Y!", options).expect("parse");
    assert_target(&result.table, "relabel");

    let labels = result.label_map.expect("label map");
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[&RowKey::value("1")], "X! / 1");
}

#[test]
fn relabel_without_text_uses_key() {
    let options = ParseOptions::default().with_relabel(true);
    let result = parse_bytes(b",b,c\nr1,2,3\nr2,4,5", options).expect("parse");
    let labels = result.label_map.expect("label map");
    assert_eq!(labels[&RowKey::value("r1")], "r1");
    assert_eq!(labels[&RowKey::value("r2")], "r2");
}

#[test]
fn no_label_map_unless_requested() {
    let result = parse_bytes(b",b,c,xxx\n1,2,3,X!", ParseOptions::default()).expect("parse");
    assert!(result.label_map.is_none());
}

#[test]
fn first_row_only_truncates() {
    let options = ParseOptions::default().with_first_row_only(true);
    let result = parse_bytes(b",b,c\n1,2,3\n4,5,6", options).expect("parse");
    assert_target(&result.table, "first row only");
    assert_eq!(result.table.height(), 1);
}

#[test]
fn first_row_only_limits_labels() {
    let options = ParseOptions::default()
        .with_first_row_only(true)
        .with_relabel(true);
    let result = parse_bytes(b",b,xxx\n1,2,X\n4,5,Y", options).expect("parse");
    let labels = result.label_map.expect("label map");
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[&RowKey::value("1")], "X / 1");
}

#[test]
fn positional_keys_without_index_column() {
    let options = ParseOptions::default().with_col_zero_index(false);
    let table = parse_bytes(b"a,b,c\n1,2,3", options).expect("parse").table;
    assert_eq!(table.column_names(), vec!["a", "b", "c"]);
    assert_eq!(table.row_keys(), &[RowKey::Position(0)]);
    assert_eq!(table.numeric_row(0), Some(vec![Some(1.0), Some(2.0), Some(3.0)]));
}

#[test]
fn reads_gct() {
    let input = b"#1.2\n1\t1\nNames\tDescription\tb\tc\n1\tfoo\t2\t3";
    assert_target(&parse_default(input), "gct");

    let options = ParseOptions::default().with_keep_strings(true);
    let table = parse_bytes(input, options).expect("parse").table;
    assert_eq!(table.column_names(), vec!["b", "c"]);
    assert!(table.column("Description").is_none());
}

#[test]
fn reads_gzipped_gct() {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder
        .write_all(b"#1.2\n2\t1\nName\tDescription\tS1\nTP53\ttumor protein\t1.5\nEGFR\treceptor\t-0.25\n")
        .expect("write");
    let bytes = encoder.finish().expect("finish");

    let options = ParseOptions::default().with_relabel(true);
    let result = parse_bytes(&bytes, options).expect("parse");
    assert_eq!(result.table.column_names(), vec!["S1"]);
    assert_eq!(
        result.table.row_keys(),
        &[RowKey::value("TP53"), RowKey::value("EGFR")]
    );
    assert_eq!(
        result.table.column("S1").expect("S1").data,
        ColumnData::Numeric(vec![Some(1.5), Some(-0.25)])
    );
    // The description column is gone before labels are built.
    let labels = result.label_map.expect("label map");
    assert_eq!(labels[&RowKey::value("TP53")], "TP53");
}

#[test]
fn reads_item_list() {
    let options = ParseOptions::default().with_keep_strings(true);
    let table = parse_bytes(b"TP53\nEGFR\nBRCA1\n", options).expect("parse").table;
    assert_eq!(table.column_names(), vec![ITEM_COLUMN]);
    assert_eq!(table.height(), 3);
    assert_eq!(table.row_keys()[2], RowKey::Position(2));
}

#[test]
fn item_list_text_is_filtered_by_default() {
    let table = parse_default(b"TP53\nEGFR\n");
    assert_eq!(table.height(), 2);
    assert_eq!(table.width(), 0);
}

#[test]
fn single_column_header_is_an_item_list() {
    // Documented heuristic: a header of one bare word reads as a list item.
    let table = parse_default(b"a\n1\n2");
    assert_eq!(table.column_names(), Vec::<&str>::new());
    let options = ParseOptions::default().with_keep_strings(true);
    let table = parse_bytes(b"a\n1\n2", options).expect("parse").table;
    assert_eq!(
        table.column(ITEM_COLUMN).expect("item").data,
        ColumnData::Text(vec![
            Some("a".to_string()),
            Some("1".to_string()),
            Some("2".to_string())
        ])
    );
}

#[test]
fn numeric_first_line_is_an_item_list() {
    let table = parse_default(b"42\n17\n");
    assert_eq!(
        table.column(ITEM_COLUMN).expect("item").data,
        ColumnData::Numeric(vec![Some(42.0), Some(17.0)])
    );
}

#[test]
fn empty_input_is_an_empty_item_list() {
    let table = parse_default(b"");
    assert!(table.is_empty());
}

#[test]
fn malformed_row_fails() {
    let err = parse_bytes(b",b,c\n1,2,3\n4,5\n", ParseOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ParseError::MalformedRow {
            line: 3,
            expected: 3,
            found: 2
        }
    ));
}

#[test]
fn undetectable_dialect_fails() {
    let err = parse_bytes(b"a b,c\n1;2;3;4\nx|y\n", ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::Dialect { .. }), "{err:?}");
}

#[test]
fn zip_with_two_entries_fails() {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for name in ["a.csv", "b.csv"] {
        writer
            .start_file(name, zip::write::SimpleFileOptions::default())
            .expect("start file");
        writer.write_all(b",b,c\n1,2,3").expect("write");
    }
    let bytes = writer.finish().expect("finish").into_inner();

    let err = parse_bytes(&bytes, ParseOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnsupportedCompression {
            kind: CompressionKind::Zip,
            ..
        }
    ));
}

#[test]
fn deflated_zip_entry() {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    writer.start_file("matrix.tsv", options).expect("start file");
    writer.write_all(b"\tb\tc\n1\t2\t3\n").expect("write");
    let bytes = writer.finish().expect("finish").into_inner();

    assert_target(&parse_default(&bytes), "deflated zip");
}

#[test]
fn parses_borrowed_source_repeatedly() {
    let mut source = Cursor::new(b",b,c\n1,2,3".to_vec());
    let first = parse(&mut source, ParseOptions::default()).expect("first");
    let second = parse(&mut source, ParseOptions::default()).expect("second");
    assert_eq!(first, second);
    assert_eq!(source.position(), 0);
}

#[test]
fn mixed_column_types() {
    let options = ParseOptions::default().with_keep_strings(true);
    let input = b"gene\tlength\tsymbol\tscore\nENSG1\t100\tTP53\t\nENSG2\t250\t\t0.5\n";
    let table = parse_bytes(input, options).expect("parse").table;
    assert_eq!(table.index_name(), Some("gene"));
    assert_eq!(
        table.column("length").expect("length").data,
        ColumnData::Numeric(vec![Some(100.0), Some(250.0)])
    );
    assert_eq!(
        table.column("symbol").expect("symbol").data,
        ColumnData::Text(vec![Some("TP53".to_string()), None])
    );
    assert_eq!(
        table.column("score").expect("score").data,
        ColumnData::Numeric(vec![None, Some(0.5)])
    );
}
