//! Tolerant CSV dialect parser for the exercise catalog.
//!
//! The catalog is plain comma-separated text with one twist: the third
//! column packs a nested list of `Group,Subregion` pairs separated by
//! semicolons.
//!
//! ```text
//! Name,MuscleGroup,SubregionPairs
//! Bench Press,Chest,"Chest,Mid Chest; Triceps,Lateral Head"
//! Squat,Legs,
//! ```
//!
//! Quoting does not span lines. Inside a field, `"` toggles quoted mode and
//! `""` within quotes is a literal quote. Every split result is trimmed.
//!
//! Raw bytes are decoded to text with encoding auto-detection before any of
//! this runs; see [`decode_auto`].

use std::path::Path;

use crate::error::{FormatError, FormatResult, HeaderProblem, LoadError, LoadResult};
use crate::models::{Record, Target};

/// Expected header columns: exact (case-insensitive) names for the first
/// two, a prefix for the third.
const NAME_COLUMN: &str = "name";
const GROUP_COLUMN: &str = "musclegroup";
const SUBREGION_COLUMN_PREFIX: &str = "subregion";

/// Rows with fewer fields are skipped.
const MIN_COLUMNS: usize = 3;

/// Records decoded from a catalog, with parse statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCatalog {
    /// Header columns as written in the input.
    pub header: Vec<String>,
    /// One record per accepted data row, in input order.
    pub records: Vec<Record>,
    /// Non-blank data lines dropped for having fewer than 3 fields.
    pub skipped_rows: usize,
}

/// Catalog text decoded from raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    /// Detected or used encoding.
    pub encoding: String,
}

// =============================================================================
// Splitters
// =============================================================================

/// Split text into lines on `\n`, `\r\n` or lone `\r`.
///
/// A `\r\n` pair yields an extra empty line; callers skip blank lines anyway.
pub fn split_lines<'a>(text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    text.split(['\n', '\r'])
}

/// Split a line into comma-delimited, trimmed fields.
pub fn split_fields(line: &str) -> Vec<String> {
    split_delimited(line, ',')
}

/// Split a subregion payload into semicolon-delimited, trimmed items.
pub fn split_sub_items(payload: &str) -> Vec<String> {
    split_delimited(payload, ';')
}

/// Split a sub-item at its first unquoted comma.
///
/// Returns at most two trimmed parts. Everything after the comma is kept
/// verbatim as the second part, further commas included. Without an
/// unquoted comma the result is the whole (trimmed) item alone.
pub fn split_pair(item: &str) -> Vec<String> {
    let mut head = String::new();
    let mut in_quotes = false;
    let mut chars = item.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' if in_quotes && matches!(chars.peek(), Some((_, '"'))) => {
                chars.next();
                head.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                let tail = &item[i + c.len_utf8()..];
                return vec![head.trim().to_string(), tail.trim().to_string()];
            }
            c => head.push(c),
        }
    }

    vec![item.trim().to_string()]
}

/// Quote-aware split on `delimiter`. Always yields at least one field.
fn split_delimited(text: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            c => current.push(c),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

// =============================================================================
// Catalog Parsing
// =============================================================================

/// Parse catalog text into records.
///
/// Fails only when the first non-empty line is not a valid header.
///
/// # Example
/// ```
/// use liftdex::parse;
///
/// let text = "Name,MuscleGroup,SubregionPairs\nSquat,Legs,";
/// let records = parse(text).unwrap();
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].targets()[0].group, "Legs");
/// ```
pub fn parse(text: &str) -> FormatResult<Vec<Record>> {
    parse_with_stats(text).map(|parsed| parsed.records)
}

/// Parse catalog text and report how many rows were skipped.
pub fn parse_with_stats(text: &str) -> FormatResult<ParsedCatalog> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = split_lines(text).filter(|line| !line.trim().is_empty());

    let header_line = lines
        .next()
        .ok_or_else(|| FormatError::new("", HeaderProblem::MissingHeader))?;
    let header = check_header(header_line)?;

    let mut records = Vec::new();
    let mut skipped_rows = 0;

    for line in lines {
        match parse_row(line) {
            Some(record) => records.push(record),
            None => skipped_rows += 1,
        }
    }

    Ok(ParsedCatalog {
        header,
        records,
        skipped_rows,
    })
}

/// Validate the header line and return its columns.
fn check_header(line: &str) -> FormatResult<Vec<String>> {
    let columns = split_fields(line);
    let reject = |problem| FormatError::new(line.trim(), problem);

    if columns.len() < MIN_COLUMNS {
        return Err(reject(HeaderProblem::TooFewColumns(columns.len())));
    }

    let unexpected = |index: usize, expected: &'static str| HeaderProblem::UnexpectedColumn {
        index,
        expected,
        found: columns[index].clone(),
    };

    if columns[0].to_lowercase() != NAME_COLUMN {
        return Err(reject(unexpected(0, NAME_COLUMN)));
    }
    if columns[1].to_lowercase() != GROUP_COLUMN {
        return Err(reject(unexpected(1, GROUP_COLUMN)));
    }
    if !columns[2].to_lowercase().starts_with(SUBREGION_COLUMN_PREFIX) {
        return Err(reject(unexpected(2, SUBREGION_COLUMN_PREFIX)));
    }

    Ok(columns)
}

/// Decode one data row. `None` when the row has fewer than 3 fields.
///
/// Targets come from the subregion pairs; the primary group column is only
/// used when no pair yields a target.
pub fn parse_row(line: &str) -> Option<Record> {
    let fields = split_fields(line);
    if fields.len() < MIN_COLUMNS {
        return None;
    }

    let name = &fields[0];
    let primary_group = &fields[1];
    let pairs = &fields[2];

    let mut targets: Vec<Target> = split_sub_items(pairs)
        .iter()
        .filter(|item| !item.is_empty())
        .filter_map(|item| match split_pair(item).as_slice() {
            [group, subregion] => Some(Target::new(group.as_str(), subregion.as_str())),
            _ => None,
        })
        .collect();

    if targets.is_empty() && !primary_group.is_empty() {
        targets.push(Target::new(primary_group.as_str(), ""));
    }

    Some(Record::new(name.as_str(), targets))
}

// =============================================================================
// Raw Input Decoding
// =============================================================================

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(&bytes.to_vec());
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the given encoding label.
///
/// Bytes that are already valid UTF-8 are used as-is whatever the label
/// says. Otherwise Latin-1 labels decode as Windows-1252 (its superset) and
/// anything else falls back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Decode raw catalog bytes with encoding auto-detection.
///
/// Valid UTF-8 is never sent to the detector. Non-UTF-8 input whose guessed
/// charset is not a Latin-1 family label is decoded as Windows-1252, and
/// the returned `encoding` names the label actually used.
pub fn decode_auto(bytes: &[u8]) -> LoadResult<DecodedText> {
    if bytes.is_empty() {
        return Err(LoadError::EmptyInput);
    }

    let encoding = if std::str::from_utf8(bytes).is_ok() {
        "utf-8".to_string()
    } else {
        match detect_encoding(bytes).as_str() {
            "iso-8859-1" => "iso-8859-1".to_string(),
            _ => "windows-1252".to_string(),
        }
    };
    let text = decode_content(bytes, &encoding);

    Ok(DecodedText { text, encoding })
}

/// Read and decode a catalog file with encoding auto-detection.
pub fn read_file_auto<P: AsRef<Path>>(path: P) -> LoadResult<DecodedText> {
    let bytes = std::fs::read(path.as_ref())?;
    decode_auto(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Name,MuscleGroup,SubregionPairs";

    fn catalog(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_split_fields_plain() {
        assert_eq!(split_fields("a, b ,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_fields_quoted_delimiter() {
        assert_eq!(
            split_fields(r#"Press,"Chest,Upper",x"#),
            vec!["Press", "Chest,Upper", "x"]
        );
    }

    #[test]
    fn test_doubled_quote_is_literal() {
        let fields = split_fields(r#"a,"He said ""hi""",c"#);
        assert_eq!(fields[1], r#"He said "hi""#);
    }

    #[test]
    fn test_trailing_delimiter_yields_empty_field() {
        assert_eq!(split_fields("Squat,Legs,"), vec!["Squat", "Legs", ""]);
    }

    #[test]
    fn test_split_sub_items_semicolons() {
        assert_eq!(
            split_sub_items("Chest,Mid; Shoulder,Front ;"),
            vec!["Chest,Mid", "Shoulder,Front", ""]
        );
    }

    #[test]
    fn test_split_pair_first_comma_only() {
        assert_eq!(
            split_pair("Back, Lats, Teres Major"),
            vec!["Back", "Lats, Teres Major"]
        );
    }

    #[test]
    fn test_split_pair_without_comma() {
        assert_eq!(split_pair(" Chest "), vec!["Chest"]);
    }

    #[test]
    fn test_split_pair_quoted_head() {
        assert_eq!(
            split_pair(r#""Core, deep",Transverse"#),
            vec!["Core, deep", "Transverse"]
        );
    }

    #[test]
    fn test_split_lines_mixed_endings() {
        let lines: Vec<&str> = split_lines("a\r\nb\rc\nd")
            .filter(|l| !l.is_empty())
            .collect();
        assert_eq!(lines, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_header_accepted() {
        assert!(parse(HEADER).unwrap().is_empty());
    }

    #[test]
    fn test_header_case_insensitive_and_prefix() {
        let text = "NAME, musclegroup ,Subregions (pairs),Notes\nCurl,Biceps,";
        let parsed = parse_with_stats(text).unwrap();
        assert_eq!(parsed.header.len(), 4);
        assert_eq!(parsed.records.len(), 1);
    }

    #[test]
    fn test_header_rejected() {
        let err = parse("Foo,Bar,Baz\nSquat,Legs,").unwrap_err();
        assert_eq!(err.header, "Foo,Bar,Baz");
        assert!(matches!(
            err.problem,
            HeaderProblem::UnexpectedColumn { index: 0, .. }
        ));
    }

    #[test]
    fn test_header_too_few_columns() {
        let err = parse("Name,MuscleGroup").unwrap_err();
        assert_eq!(err.problem, HeaderProblem::TooFewColumns(2));
    }

    #[test]
    fn test_header_wrong_third_column() {
        let err = parse("Name,MuscleGroup,Region").unwrap_err();
        assert!(matches!(
            err.problem,
            HeaderProblem::UnexpectedColumn { index: 2, .. }
        ));
    }

    #[test]
    fn test_empty_input_is_missing_header() {
        let err = parse("\n  \n").unwrap_err();
        assert_eq!(err.problem, HeaderProblem::MissingHeader);
    }

    #[test]
    fn test_leading_blank_lines_and_bom() {
        let text = format!("\u{feff}\n\n{}\nSquat,Legs,", HEADER);
        assert_eq!(parse(&text).unwrap().len(), 1);
    }

    #[test]
    fn test_multi_target_row() {
        let text = catalog(&[
            r#"Bench Press,Chest,"Chest,Mid Chest (Sternal Pectoralis Major); Shoulder,Front Delts (Anterior Deltoid); Triceps,Lateral Head (Caput Laterale)""#,
        ]);
        let records = parse(&text).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name(), "Bench Press");
        assert_eq!(
            record.targets(),
            &[
                Target::new("Chest", "Mid Chest (Sternal Pectoralis Major)"),
                Target::new("Shoulder", "Front Delts (Anterior Deltoid)"),
                Target::new("Triceps", "Lateral Head (Caput Laterale)"),
            ]
        );
    }

    #[test]
    fn test_fallback_to_primary_group() {
        let records = parse(&catalog(&["Squat,Legs,"])).unwrap();
        assert_eq!(records[0].targets(), &[Target::new("Legs", "")]);
    }

    #[test]
    fn test_fallback_when_no_pair_is_valid() {
        let records = parse(&catalog(&[r#"Plank,Core,"Abs; Obliques""#])).unwrap();
        assert_eq!(records[0].targets(), &[Target::new("Core", "")]);
    }

    #[test]
    fn test_malformed_pair_skipped_without_fallback() {
        let records = parse(&catalog(&[r#"Row,Back,"Lats; Back,Rhomboids""#])).unwrap();
        assert_eq!(records[0].targets(), &[Target::new("Back", "Rhomboids")]);
    }

    #[test]
    fn test_nested_quotes_reinterpreted_by_sub_splitter() {
        let records = parse(&catalog(&[r#"Q,Misc,"Misc,He said ""hi""; Misc,Plain""#])).unwrap();
        assert_eq!(
            records[0].targets(),
            &[Target::new("Misc", "He said hi"), Target::new("Misc", "Plain")]
        );
    }

    #[test]
    fn test_repeated_group_kept() {
        let records =
            parse(&catalog(&[r#"Fly,Chest,"Chest,Upper; Chest,Lower""#])).unwrap();
        assert_eq!(records[0].targets().len(), 2);
    }

    #[test]
    fn test_no_targets_at_all() {
        let records = parse(&catalog(&["Mystery,,"])).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].targets().is_empty());
    }

    #[test]
    fn test_short_rows_skipped() {
        let parsed = parse_with_stats(&catalog(&["OnlyOneField", "Two,Fields", "Squat,Legs,"]))
            .unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped_rows, 2);
    }

    #[test]
    fn test_blank_rows_not_counted() {
        let parsed = parse_with_stats(&catalog(&["", "   ", "Squat,Legs,"])).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped_rows, 0);
    }

    #[test]
    fn test_input_order_preserved() {
        let records = parse(&catalog(&["Zeus Press,Shoulder,", "Alpha Curl,Biceps,"])).unwrap();
        let names: Vec<&str> = records.iter().map(Record::name).collect();
        assert_eq!(names, vec!["Zeus Press", "Alpha Curl"]);
    }

    #[test]
    fn test_detect_encoding_ascii() {
        assert_eq!(detect_encoding(b"Name,MuscleGroup,SubregionPairs"), "utf-8");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Développé" in ISO-8859-1
        let bytes: &[u8] = &[0x44, 0xE9, 0x76, 0x65, 0x6C, 0x6F, 0x70, 0x70, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Développé");
    }

    #[test]
    fn test_valid_utf8_ignores_wrong_label() {
        let text = "Name,MuscleGroup,SubregionPairs\nЖим лёжа,Грудь,";
        for label in ["shift_jis", "euc-kr", "windows-1251", "iso-8859-1", "nonsense-label"] {
            assert_eq!(decode_content(text.as_bytes(), label), text, "label {}", label);
        }
    }

    #[test]
    fn test_unknown_label_decodes_lossily() {
        let decoded = decode_content(&[0x53, 0x71, 0xFF, 0x74], "shift_jis");
        assert_eq!(decoded, "Sq\u{FFFD}t");
    }

    #[test]
    fn test_decode_auto_utf8_non_ascii() {
        let text = "Name,MuscleGroup,SubregionPairs\nDéveloppé couché,Pectoraux,\"Pectoraux,Faisceau moyen\"\nЖим лёжа,Грудь,";
        let decoded = decode_auto(text.as_bytes()).unwrap();
        assert_eq!(decoded.encoding, "utf-8");
        assert_eq!(decoded.text, text);
    }

    #[test]
    fn test_decode_auto_latin1() {
        let text = "Name,MuscleGroup,SubregionPairs\n\
            Développé couché,Pectoraux,\"Pectoraux,Faisceau moyen; Épaules,Deltoïde antérieur\"\n\
            Élévations latérales,Épaules,\"Épaules,Deltoïde latéral\"\n\
            Fentes arrière,Jambes,\"Jambes,Quadriceps; Fessiers,Grand fessier\"\n";
        let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(text);

        let decoded = decode_auto(&bytes).unwrap();
        assert!(
            ["iso-8859-1", "windows-1252"].contains(&decoded.encoding.as_str()),
            "detected {}",
            decoded.encoding
        );
        assert_eq!(decoded.text, text);
    }

    #[test]
    fn test_decode_auto_windows_1252() {
        let text = "Name,MuscleGroup,SubregionPairs\n\
            Curl d’haltère,Biceps,\"Biceps,Chef long – brachial\"\n\
            Tirage œil-de-bœuf,Dos,\"Dos,Grand dorsal; Biceps,Chef court\"\n\
            Développé à l’élastique,Pectoraux,\"Pectoraux,Faisceau supérieur\"\n";
        let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(text);
        assert!(std::str::from_utf8(&bytes).is_err());

        let decoded = decode_auto(&bytes).unwrap();
        assert!(
            ["iso-8859-1", "windows-1252"].contains(&decoded.encoding.as_str()),
            "detected {}",
            decoded.encoding
        );
        assert_eq!(decoded.text, text);
    }

    #[test]
    fn test_decode_auto_empty() {
        assert!(matches!(decode_auto(b""), Err(LoadError::EmptyInput)));
    }
}
