/*!
 * Markup segmentation for translation.
 *
 * Two best-effort splitters live here, neither of which is an HTML parser:
 * - `split_tags` cuts a string into alternating tag and text segments
 *   using `<` and `>` as literal delimiters.
 * - `split_paragraphs` cuts a document into paragraph-sized units that are
 *   sent to the translation service one at a time.
 *
 * Angle brackets are never interpreted in context. A `>` inside a quoted
 * attribute value, or a bare `<` in running text, is taken as a tag boundary
 * and shifts the pairing of every later bracket.
 */

/// Literal closing-paragraph tag used as the unit delimiter
pub const PARAGRAPH_CLOSE: &str = "</p>";

/// One piece of a markup string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A single `<...>` run, brackets included
    Tag(&'a str),
    /// The text between two tags
    Text(&'a str),
}

impl<'a> Segment<'a> {
    /// The underlying slice of the original input
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Tag(s) | Segment::Text(s) => s,
        }
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, Segment::Tag(_))
    }
}

/// A paragraph-sized piece of a document, translated as one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUnit {
    /// Position of the unit in the original document
    pub ordinal: usize,
    /// Markup of the unit
    pub content: String,
}

/// Split markup into alternating tag and text segments.
///
/// The positions of every `<` and `>` are paired in encounter order
/// (0th with 1st, 2nd with 3rd, ...). Each pair is a tag; the text between
/// one pair's closing mark and the next even-position mark is a text
/// segment when it is non-empty. An unpaired trailing mark still ends the
/// text before it but is not emitted itself. Text before the first mark or
/// after the last mark is dropped.
pub fn split_tags(input: &str) -> Vec<Segment<'_>> {
    // Both delimiters are ASCII, so byte offsets are always char boundaries
    let (even, odd): (Vec<(usize, usize)>, Vec<(usize, usize)>) = input
        .bytes()
        .enumerate()
        .filter(|(_, b)| *b == b'<' || *b == b'>')
        .map(|(i, _)| i)
        .enumerate()
        .partition(|(position, _)| position % 2 == 0);
    let even: Vec<usize> = even.into_iter().map(|(_, offset)| offset).collect();
    let odd: Vec<usize> = odd.into_iter().map(|(_, offset)| offset).collect();

    let mut segments = Vec::with_capacity(odd.len() * 2);
    for (index, &end) in odd.iter().enumerate() {
        segments.push(Segment::Tag(&input[even[index]..=end]));

        if let Some(&next_start) = even.get(index + 1) {
            if next_start - end >= 2 {
                segments.push(Segment::Text(&input[end + 1..next_start]));
            }
        }
    }

    segments
}

/// Split a document into paragraph units on the literal `</p>` sequence.
///
/// Empty fragments are dropped. Every fragment that was cut off by the
/// delimiter gets it back, so the units concatenate to the original. A final
/// unterminated fragment that opens a paragraph is closed as well, which
/// keeps each unit independently valid.
///
/// Unlike a literal "close only fragments starting with `<p`" rule, cut
/// fragments such as `<h1>Title</h1><p>Body` are closed too.
pub fn split_paragraphs(document: &str) -> Vec<DocumentUnit> {
    let fragments: Vec<&str> = document.split(PARAGRAPH_CLOSE).collect();
    let last = fragments.len().saturating_sub(1);

    fragments
        .into_iter()
        .enumerate()
        .filter(|(_, fragment)| !fragment.is_empty())
        .map(|(index, fragment)| {
            let mut content = fragment.to_string();
            if index < last || opens_paragraph(fragment) {
                content.push_str(PARAGRAPH_CLOSE);
            }
            content
        })
        .enumerate()
        .map(|(ordinal, content)| DocumentUnit { ordinal, content })
        .collect()
}

/// Concatenate units in ordinal order
pub fn join_units(units: &[DocumentUnit]) -> String {
    let mut sorted: Vec<&DocumentUnit> = units.iter().collect();
    sorted.sort_by_key(|unit| unit.ordinal);
    sorted.iter().map(|unit| unit.content.as_str()).collect()
}

fn opens_paragraph(fragment: &str) -> bool {
    fragment.starts_with("<p>") || fragment.starts_with("<p ")
}
