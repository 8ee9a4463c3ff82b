//! Emoji classification by code-point range.
//!
//! The classifier is an explicit range-membership test over Unicode scalar
//! values. Matching is strictly per code point: ZWJ sequences, skin-tone
//! modifiers and variation selectors are not recomposed, so a family emoji
//! counts once per pictograph it is built from.

/// Inclusive code-point ranges treated as emoji.
///
/// The final range is deliberately wide; it sweeps up enclosed
/// alphanumerics, Mahjong/domino tiles and the miscellaneous symbol blocks
/// between them.
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F), // emoticons
    (0x1F300, 0x1F5FF), // misc symbols and pictographs
    (0x1F680, 0x1F6FF), // transport and map symbols
    (0x1F700, 0x1F77F), // alchemical symbols
    (0x1F780, 0x1F7FF), // geometric shapes extended
    (0x1F800, 0x1F8FF), // supplemental arrows-C
    (0x1F900, 0x1F9FF), // supplemental symbols and pictographs
    (0x1FA00, 0x1FA6F), // chess symbols
    (0x1FA70, 0x1FAFF), // symbols and pictographs extended-A
    (0x2702, 0x27B0),   // dingbats
    (0x24C2, 0x1F251),  // enclosed characters and everything in between
];

/// True when `c` lies inside one of the emoji ranges.
pub fn is_emoji(c: char) -> bool {
    let cp = c as u32;
    EMOJI_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

/// True when the token's *first* code point is an emoji.
///
/// The test is anchored at the start: "🙂great" qualifies, "great🙂" does
/// not. Word-before-emoji attribution depends on this asymmetry.
pub fn starts_with_emoji(token: &str) -> bool {
    token.chars().next().map_or(false, is_emoji)
}

/// Iterate the emoji code points contained in `text`, in order.
pub fn emojis_in(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|&c| is_emoji(c))
}
