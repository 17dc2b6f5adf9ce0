use certmint::tbs_certificate::{normalize_serial, random_serial};

#[test]
fn normalize_prepends_zero_when_high_bit_set() {
    assert_eq!(normalize_serial(&[0x80]), vec![0x00, 0x80]);
    assert_eq!(normalize_serial(&[0xff, 0x01]), vec![0x00, 0xff, 0x01]);
}

#[test]
fn normalize_strips_redundant_leading_zeros() {
    assert_eq!(normalize_serial(&[0x00, 0x00, 0x05]), vec![0x05]);
    // A stripped value with the high bit set still gets exactly one pad byte.
    assert_eq!(normalize_serial(&[0x00, 0x90, 0x01]), vec![0x00, 0x90, 0x01]);
    assert_eq!(normalize_serial(&[0x00, 0x00]), vec![0x00]);
    assert_eq!(normalize_serial(&[]), vec![0x00]);
    assert_eq!(normalize_serial(&[0x7f]), vec![0x7f]);
}

#[test]
fn random_serials_are_minimal_non_negative_integers() {
    for _ in 0..256 {
        let serial = random_serial();

        // 128 random bits: at most 17 bytes once padded, never empty.
        assert!(!serial.is_empty());
        assert!(serial.len() <= 17);

        if serial.len() == 1 {
            continue;
        }

        // Non-negative: a leading 0x00 only appears as sign padding.
        if serial[0] == 0x00 {
            assert!(serial[1] & 0x80 != 0, "non-minimal encoding: {serial:02x?}");
        } else {
            assert!(serial[0] & 0x80 == 0, "negative encoding: {serial:02x?}");
        }
    }
}

#[test]
fn random_serials_do_not_repeat() {
    let serials: Vec<Vec<u8>> = (0..64).map(|_| random_serial()).collect();
    for (i, a) in serials.iter().enumerate() {
        for b in serials.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}
