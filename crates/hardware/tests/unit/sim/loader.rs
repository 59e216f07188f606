//! Program Image Loader Tests.

use std::io::Write;

use rstest::rstest;
use vnsim_core::common::{SimError, Word};
use vnsim_core::sim::loader::{parse_image, read_image};

#[test]
fn parses_pairs_and_skips_comments() {
    let image = parse_image(
        "# replicate M[5] into M[20]\n\
         000010 030005\n\
         \n\
         000011 020024   # STR R0,0,20\n\
         12 0\n",
    )
    .unwrap();
    assert_eq!(
        image,
        vec![
            (0o10, Word::new(0o030005)),
            (0o11, Word::new(0o020024)),
            (0o12, Word::ZERO),
        ]
    );
}

#[rstest]
#[case::one_field("000010\n", 1)]
#[case::three_fields("# header\n10 1 2\n", 2)]
#[case::not_octal("10 1\n11 19\n", 2)]
#[case::word_too_wide("10 1000000\n", 1)]
fn malformed_lines_name_their_line(#[case] text: &str, #[case] expected: usize) {
    match parse_image(text) {
        Err(SimError::Parse { line, .. }) => assert_eq!(line, expected),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn reads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "000010 006407").unwrap();
    writeln!(file, "000011 000000").unwrap();
    let image = read_image(file.path()).unwrap();
    assert_eq!(image.len(), 2);
    assert_eq!(image[0], (8, Word::new(0o006407)));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_image(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}
