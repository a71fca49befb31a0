//! Bit-level helpers over the 16-bit machine word.

/// Sign-extend the lowest `bits` bits of `val` to a full word.
///
/// Bits above the field are ignored, so a raw instruction can be passed
/// directly.
#[inline]
pub fn sign_extend(val: u16, bits: u32) -> u16 {
    debug_assert!(bits > 0 && bits < 16);
    // Sign bit
    let sign = val & (1u16 << (bits - 1));
    // Bits lower than sign bit
    let magnitude = val & ((1u16 << bits) - 1);
    // Positive input: all bits unset; 0x0000
    // Negative input: sign bit and above will be set, lower bits will be reset
    //      Eg. bits=14 -> 0xE000
    let sign_extension = (!sign).wrapping_add(1); // sign * -1
    magnitude | sign_extension
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sign_extend_table() {
        #[rustfmt::skip]
        let cases: &[(_, &[_])] = &[
            // (input, [bits...])
            //           15      14      13      12      11      10      9       8       7       6       5       4       3       2       1
            (0x0000, &[0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000]),
            (0x0001, &[0x0001, 0x0001, 0x0001, 0x0001, 0x0001, 0x0001, 0x0001, 0x0001, 0x0001, 0x0001, 0x0001, 0x0001, 0x0001, 0x0001, 0xffff]),
            (0x00ff, &[0x00ff, 0x00ff, 0x00ff, 0x00ff, 0x00ff, 0x00ff, 0x00ff, 0xffff, 0xffff]),
            (0x0100, &[0x0100, 0x0100, 0x0100, 0x0100, 0x0100, 0x0100, 0xff00, 0x0000, 0x0000]),
            (0x0400, &[0x0400, 0x0400, 0x0400, 0x0400, 0xfc00, 0x0000, 0x0000, 0x0000, 0x0000]),
            (0x1000, &[0x1000, 0x1000, 0xf000, 0x0000, 0x0000]),
            (0x7fff, &[0xffff, 0xffff, 0xffff, 0xffff, 0xffff]),
            (0xfffe, &[0xfffe, 0xfffe, 0xfffe, 0xfffe, 0xfffe, 0xfffe, 0xfffe, 0xfffe, 0xfffe, 0xfffe, 0xfffe, 0xfffe, 0xfffe, 0xfffe, 0x0000]),
        ];

        for (input, expecteds) in cases {
            for (i, expected) in expecteds.iter().enumerate() {
                let bits = 15 - i as u32;
                let actual = sign_extend(*input, bits);
                assert_eq!(
                    actual, *expected,
                    "sign_extend(0x{input:04x}, {bits}) == 0x{actual:04x}"
                );
            }
        }
    }

    proptest! {
        #[test]
        fn sign_bit_fills_upper_word(val in any::<u16>(), width in prop::sample::select(vec![5u32, 6, 9, 11])) {
            let field = val & ((1 << width) - 1);
            let sign_index = width - 1;
            let expected = if field & (1 << sign_index) == 0 {
                field
            } else {
                field | (0xFFFFu16 << sign_index)
            };
            prop_assert_eq!(sign_extend(field, width), expected);
        }

        #[test]
        fn high_bits_are_ignored(val in any::<u16>(), width in 1u32..16) {
            let field = val & ((1 << width) - 1);
            prop_assert_eq!(sign_extend(val, width), sign_extend(field, width));
        }
    }
}
