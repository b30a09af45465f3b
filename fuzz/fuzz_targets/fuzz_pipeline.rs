//! Fuzz target for the annotation pipeline.
//!
//! Arbitrary text and spans must never panic, and every accepted input must
//! produce runs that rebuild the text.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spanweave::{Annotator, Emphasis, EmphasisStyle, Highlight, Rgba, TextAttributes};

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    highlights: Vec<(u8, u8, Option<u32>)>,
    emphases: Vec<(u8, u8, u8)>,
    press: (u8, u8),
}

fuzz_target!(|input: Input| {
    let highlights: Vec<Highlight> = input
        .highlights
        .iter()
        .enumerate()
        .map(|(i, &(start, end, color))| {
            let h = Highlight::new(format!("h{i}"), usize::from(start), usize::from(end));
            match color {
                Some(bits) => {
                    let [r, g, b, a] = bits.to_be_bytes();
                    h.with_color(Rgba::from_rgba_u8(r, g, b, a))
                }
                None => h,
            }
        })
        .collect();
    let emphases: Vec<Emphasis> = input
        .emphases
        .iter()
        .map(|&(start, end, bits)| {
            let style = EmphasisStyle::with_attributes(TextAttributes::from_bits_truncate(bits));
            Emphasis::new(usize::from(start), usize::from(end), style)
        })
        .collect();

    let annotator = Annotator::new();
    if let Ok(runs) = annotator.annotate(&input.text, &highlights, &emphases) {
        let rebuilt: String = runs.iter().map(|r| r.text).collect();
        assert_eq!(rebuilt, input.text);
        for pair in runs.windows(2) {
            assert_eq!(pair[0].range.end, pair[1].range.start);
        }
    }

    let (start, end) = input.press;
    let _ = annotator.resolve_press(&highlights, usize::from(start), usize::from(end));
});
