//! Property-based tests for the page-packed frame buffer.
//! Verifies clipping and compositing invariants for all inputs, not just
//! fixed examples.

use dotmatrix_core::{BufferError, Color, DrawPixelExt, FrameBuffer, Geometry};
use proptest::prelude::*;

fn color() -> impl Strategy<Value = Color> {
    prop_oneof![Just(Color::Black), Just(Color::White), Just(Color::Inverse)]
}

fn patterned(seed: u8) -> FrameBuffer {
    let mut fb = FrameBuffer::new(Geometry::W128_H64).unwrap();
    for (i, b) in fb.as_mut_bytes().iter_mut().enumerate() {
        *b = (i as u8).wrapping_mul(31).wrapping_add(seed);
    }
    fb
}

proptest! {
    /// Off-screen pixels never change the buffer.
    #[test]
    fn off_screen_pixel_is_noop(
        seed in any::<u8>(),
        x in prop_oneof![i16::MIN..0i16, 128i16..=i16::MAX],
        y in any::<i16>(),
        c in color(),
    ) {
        let mut fb = patterned(seed);
        let before = fb.clone();
        fb.set_pixel(x, y, c);
        prop_assert_eq!(fb, before);
    }

    /// An on-screen write touches exactly one bit of one byte.
    #[test]
    fn on_screen_pixel_touches_one_bit(
        seed in any::<u8>(),
        x in 0i16..128,
        y in 0i16..64,
        c in color(),
    ) {
        let mut fb = patterned(seed);
        let before = fb.clone();
        fb.set_pixel(x, y, c);

        let target = (y as usize / 8) * 128 + x as usize;
        for (i, (a, b)) in before.as_bytes().iter().zip(fb.as_bytes()).enumerate() {
            if i == target {
                prop_assert_eq!((a ^ b) & !(1u8 << (y % 8)), 0);
            } else {
                prop_assert_eq!(a, b);
            }
        }
        match c {
            Color::White => prop_assert_eq!(fb.pixel(x, y), Some(true)),
            Color::Black => prop_assert_eq!(fb.pixel(x, y), Some(false)),
            Color::Inverse => prop_assert_ne!(fb.pixel(x, y), before.pixel(x, y)),
        }
    }

    /// fill_page changes exactly one page, or nothing when out of range.
    #[test]
    fn fill_page_is_isolated(seed in any::<u8>(), page in 0u16..12, value in any::<u8>()) {
        let mut fb = patterned(seed);
        let before = fb.clone();
        let result = fb.fill_page(page, value);

        if page >= 8 {
            prop_assert_eq!(result, Err(BufferError::PageOutOfRange { page, pages: 8 }));
            prop_assert_eq!(fb, before);
        } else {
            prop_assert!(result.is_ok());
            let range = page as usize * 128..(page as usize + 1) * 128;
            for (i, (a, b)) in before.as_bytes().iter().zip(fb.as_bytes()).enumerate() {
                if range.contains(&i) {
                    prop_assert_eq!(*b, value);
                } else {
                    prop_assert_eq!(a, b);
                }
            }
        }
    }

    /// draw_bitmap never clears a pixel that was already set.
    #[test]
    fn draw_bitmap_is_additive(
        seed in any::<u8>(),
        x in -16i16..140,
        y in -16i16..72,
        image in proptest::collection::vec(any::<u8>(), 32),
        invert in any::<bool>(),
    ) {
        let mut fb = patterned(seed);
        let before = fb.clone();
        fb.draw_bitmap(x, y, 16, 16, &image, invert).unwrap();

        for (a, b) in before.as_bytes().iter().zip(fb.as_bytes()) {
            prop_assert_eq!(a & b, *a);
        }
    }

    /// A horizontal run of any length never lands left of its start.
    #[test]
    fn hline_stays_right_of_origin(
        x in 0i16..128,
        y in 0i16..64,
        length in any::<u16>(),
    ) {
        let mut fb = FrameBuffer::new(Geometry::W128_H64).unwrap();
        fb.draw_hline(x, y, length, Color::White);

        for col in 0..x {
            prop_assert_eq!(fb.pixel(col, y), Some(false));
        }
        let lit = (0..128).filter(|&col| fb.pixel(col, y) == Some(true)).count();
        prop_assert_eq!(lit, (length as usize).min((128 - x) as usize));
    }
}
