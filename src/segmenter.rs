//! Stage 1: split a document into sentence pieces and tag each piece with
//! the taxonomy properties it mentions.
//!
//! Pure function: no I/O, no state.

use tracing::{debug, trace};

use crate::model::{Label, Segment, SegmentId, Stage1Output};
use crate::taxonomy::Taxonomy;

/// Split `text` into non-blank pieces.
///
/// A boundary is a whitespace run directly after `.`, `!` or `?`. The
/// terminator stays on the left piece; the whitespace run is dropped.
/// Pieces are otherwise kept verbatim (no trimming).
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            let mut resume = pos + ch.len_utf8();
            while let Some(&(next_pos, next)) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                resume = next_pos + next.len_utf8();
                chars.next();
            }
            pieces.push(&text[start..pos]);
            start = resume;
            prev = None;
            continue;
        }
        prev = Some(ch);
    }
    pieces.push(&text[start..]);

    pieces.retain(|p| !p.trim().is_empty());
    pieces
}

/// Labels for one piece, in taxonomy scan order.
pub fn tag(piece: &str, taxonomy: &Taxonomy) -> Vec<Label> {
    let lowered = piece.to_lowercase();
    taxonomy
        .pairs()
        .filter(|(_, prop)| prop.occurs_in(&lowered))
        .map(|(category, prop)| Label {
            category: category.to_owned(),
            property: prop.name().to_owned(),
            value: prop.capture_value(piece),
        })
        .collect()
}

/// Segment and tag a whole document.
pub fn segment(text: &str, taxonomy: &Taxonomy) -> Stage1Output {
    let segments: Vec<Segment> = split_sentences(text)
        .into_iter()
        .enumerate()
        .map(|(index, piece)| {
            let labels = tag(piece, taxonomy);
            trace!(segment = index, labels = labels.len(), "tagged piece");
            Segment::new(SegmentId(index), piece).with_labels(labels)
        })
        .collect();

    debug!(
        segments = segments.len(),
        labels = segments.iter().map(|s| s.labels.len()).sum::<usize>(),
        "stage 1: segmented document"
    );
    Stage1Output { segments }
}
