//! Character-quantised ticker offsets (bounce & loop).
//!
//! Both routines work in "units" — characters for the quantised ticker,
//! pixels for callers that pre-convert widths before calling in. Neither
//! touches string data directly; [`super`] turns the offsets these produce
//! into actual substrings.

/// One bounce-ticker step: the field-relative offset into the source plus
/// the (constant) field width, for a source wider than its field.
///
/// `width` is the source width, `field_width` the display width, both in
/// the same unit. Caller must ensure `width > field_width`.
pub fn bounce_offset(idx: u64, width: u32, field_width: u32) -> (u32, u32) {
    let scroll = width - field_width;
    let period = 2 * scroll as i64 + 4;
    let phase = (idx % period as u64) as i64;

    let phase_left_stop = 2i64;
    let phase_left_moving = phase_left_stop + scroll as i64;
    let phase_right_stop = phase_left_moving + 2;

    let left_offset = phase - phase_left_stop;
    let right_offset = scroll as i64 - (phase - phase_right_stop);

    let offset = if phase < phase_left_stop {
        0
    } else if phase < phase_left_moving {
        left_offset
    } else if phase < phase_right_stop {
        scroll as i64
    } else {
        right_offset
    };

    (offset as u32, field_width)
}

/// One slice of a loop-ticker's three-part decomposition: `(offset, width)`
/// into the string each piece is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopSlice {
    pub offset: u32,
    pub width: u32,
}

/// Three-slice decomposition of a cylindrical loop ticker:
/// `[tail of source][spacer][head of source]`.
///
/// `str_width`/`spacer_width`/`field_width` are all in the same unit
/// (characters for the quantised ticker). Caller must ensure
/// `str_width > 0`.
pub fn loop_slices(idx: u64, str_width: u32, spacer_width: u32, field_width: u32) -> [LoopSlice; 3] {
    let period = str_width as u64 + spacer_width as u64;
    let phase = (idx % period) as i64;

    let str_width = str_width as i64;
    let spacer_width = spacer_width as i64;
    let field_width = field_width as i64;

    let offset1 = if phase < str_width { phase } else { 0 };
    let width1 = (str_width - phase).max(0).min(field_width);

    let offset2 = (phase - str_width).max(0);
    let width2 = (field_width - width1).min(spacer_width) - offset2;

    let width3 = (field_width - (width1 + width2)).max(0);

    [
        LoopSlice {
            offset: offset1 as u32,
            width: width1 as u32,
        },
        LoopSlice {
            offset: offset2 as u32,
            width: width2 as u32,
        },
        LoopSlice {
            offset: 0,
            width: width3 as u32,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounce_period_matches_scenario() {
        let expected = [0, 0, 0, 1, 2, 3, 4, 4, 4, 4, 3, 2, 1, 0];
        for (idx, &exp) in expected.iter().enumerate() {
            let (offset, width) = bounce_offset(idx as u64, 10, 6);
            assert_eq!(offset, exp, "idx={idx}");
            assert_eq!(width, 6);
        }
    }

    #[test]
    fn bounce_offset_stays_in_bounds() {
        for idx in 0..100u64 {
            let (offset, _) = bounce_offset(idx, 20, 7);
            assert!(offset <= 13);
        }
    }

    #[test]
    fn loop_three_slice_idx_zero() {
        let slices = loop_slices(0, 5, 3, 6);
        assert_eq!(slices[0], LoopSlice { offset: 0, width: 5 });
        assert_eq!(slices[1], LoopSlice { offset: 0, width: 1 });
        assert_eq!(slices[2], LoopSlice { offset: 0, width: 0 });
    }

    #[test]
    fn loop_three_slice_idx_five() {
        let slices = loop_slices(5, 5, 3, 6);
        assert_eq!(slices[0], LoopSlice { offset: 0, width: 0 });
        assert_eq!(slices[1], LoopSlice { offset: 0, width: 3 });
        assert_eq!(slices[2], LoopSlice { offset: 0, width: 3 });
    }

    #[test]
    fn loop_slices_always_fill_field_width() {
        for idx in 0..50u64 {
            let slices = loop_slices(idx, 11, 4, 8);
            let total: u32 = slices.iter().map(|s| s.width).sum();
            assert_eq!(total, 8);
            assert!(slices[0].offset as u64 + slices[0].width as u64 <= 11);
            assert!(slices[1].offset < 4);
            assert_eq!(slices[2].offset, 0);
        }
    }
}
