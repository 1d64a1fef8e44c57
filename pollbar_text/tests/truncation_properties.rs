// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the ellipsis truncation floor.

use pollbar_text::{ELLIPSIS, MIN_MEANINGFUL_CHARS, char_count, truncate};
use proptest::prelude::*;

fn label_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z éà/-]{0,80}"
}

proptest! {
    #[test]
    fn prefix_never_drops_below_meaningful_floor(
        text in label_strategy(),
        available in -50.0f64..600.0,
        char_width in 1.0f64..12.0,
    ) {
        let len = char_count(&text);
        let floor = len.div_ceil(2).max(MIN_MEANINGFUL_CHARS);
        let t = truncate(&text, available, char_width);

        if t.truncated {
            prop_assert!(t.text.ends_with(ELLIPSIS));
            let prefix = char_count(&t.text) - ELLIPSIS.len();
            prop_assert!(prefix >= floor, "prefix {} below floor {}", prefix, floor);
            prop_assert!(!t.too_short_to_truncate);
        } else {
            prop_assert_eq!(&t.text, &text);
        }
    }

    #[test]
    fn truncated_text_fits_the_available_width(
        text in label_strategy(),
        available in 0.0f64..600.0,
        char_width in 1.0f64..12.0,
    ) {
        let t = truncate(&text, available, char_width);
        if t.truncated {
            let width = char_count(&t.text) as f64 * char_width;
            prop_assert!(width <= available + 1e-9, "{} > {}", width, available);
        }
    }

    #[test]
    fn truncation_is_deterministic(
        text in label_strategy(),
        available in -50.0f64..600.0,
        char_width in 0.5f64..12.0,
    ) {
        prop_assert_eq!(
            truncate(&text, available, char_width),
            truncate(&text, available, char_width)
        );
    }
}
