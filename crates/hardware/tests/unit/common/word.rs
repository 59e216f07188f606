//! Word Tests.

use rstest::rstest;
use vnsim_core::common::Word;

#[test]
fn new_masks_to_eighteen_bits() {
    assert_eq!(Word::new(0o1_000_000).value(), 0);
    assert_eq!(Word::new(0o1_777_777).value(), 0o777_777);
}

#[rstest]
#[case(0o014407, 0, 5, 1)]
#[case(0o014407, 6, 7, 2)]
#[case(0o014407, 8, 9, 1)]
#[case(0o014407, 10, 10, 0)]
#[case(0o014407, 11, 17, 7)]
#[case(0o400000, 0, 0, 1)]
#[case(0o000001, 17, 17, 1)]
fn field_extraction_is_msb_first(
    #[case] raw: u32,
    #[case] start: u32,
    #[case] end: u32,
    #[case] expected: u32,
) {
    assert_eq!(Word::new(raw).field(start, end), expected);
}

#[test]
fn sign_follows_bit_zero() {
    assert!(Word::new(0o400000).is_negative());
    assert!(!Word::new(0o377777).is_negative());
    assert_eq!(Word::new(0o777777).signed(), -1);
    assert_eq!(Word::new(0o400000).signed(), -(1 << 17));
    assert_eq!(Word::new(5).signed(), 5);
}

#[test]
fn displays_as_six_octal_digits() {
    assert_eq!(Word::new(0o14407).to_string(), "014407");
    assert_eq!(Word::ZERO.to_string(), "000000");
}
