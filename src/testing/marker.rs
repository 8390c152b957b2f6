use crate::*;

pub(crate) const CURSOR_MARKER: &str = "<|>";

/// Strip the `<|>` marker from `text`, returning the clean text and the
/// position the marker stood at.
pub(crate) fn marked(text: &str) -> (String, Position) {
    let Some(offset) = text.find(CURSOR_MARKER) else {
        panic!("no cursor marker in {text:?}");
    };
    let before = &text[..offset];
    let line = before.matches('\n').count() as u32;
    let character = before
        .rsplit('\n')
        .next()
        .map_or(0, |l| l.chars().count() as u32);
    let clean = format!("{before}{}", &text[offset + CURSOR_MARKER.len()..]);
    (clean, Position::new(line, character))
}
