/*!
 * Tests for tag/text and paragraph splitting
 */

use comprehend::html::{split_paragraphs, split_tags, Segment, PARAGRAPH_CLOSE};

/// Well-formed markup is covered exactly by its segments
#[test]
fn test_splitTags_withTagDelimitedInput_shouldConcatenateToInput() {
    let inputs = [
        "<p>Hello <b>World</b></p>",
        "<h1>Title</h1><p>First</p><p>Second <i>line</i></p>",
        "<div><br/></div>",
    ];

    for input in inputs {
        let segments = split_tags(input);
        let joined: String = segments.iter().map(|s| s.as_str()).collect();
        assert_eq!(joined, input);
    }
}

#[test]
fn test_splitTags_shouldNeverEmitEmptyText() {
    let segments = split_tags("<p><b></b>x</p><br>");
    for segment in &segments {
        match segment {
            Segment::Tag(tag) => {
                assert!(tag.starts_with('<'));
                assert!(tag.ends_with('>'));
            }
            Segment::Text(text) => assert!(!text.is_empty()),
        }
    }
    assert_eq!(segments.iter().filter(|s| !s.is_tag()).count(), 1);
}

#[test]
fn test_splitTags_withOuterText_shouldKeepOnlyTagsAndInnerText() {
    let segments = split_tags("intro <b>bold</b> outro");
    assert_eq!(
        segments,
        vec![Segment::Tag("<b>"), Segment::Text("bold"), Segment::Tag("</b>")]
    );
}

#[test]
fn test_splitTags_withoutBrackets_shouldBeEmpty() {
    assert!(split_tags("plain text").is_empty());
    assert!(split_tags("").is_empty());
}

#[test]
fn test_splitParagraphs_shouldCloseEveryCutUnit() {
    let units = split_paragraphs("<p>One</p><p>Two</p><p>Three</p>");

    assert_eq!(units.len(), 3);
    for (index, unit) in units.iter().enumerate() {
        assert_eq!(unit.ordinal, index);
        assert!(unit.content.ends_with(PARAGRAPH_CLOSE));
    }
    assert_eq!(units[1].content, "<p>Two</p>");
}

#[test]
fn test_splitParagraphs_withTrailingText_shouldBeLossless() {
    let input = "<h2>Lore</h2><p>Old roads</p>A note at the end";
    let units = split_paragraphs(input);

    let joined: String = units.iter().map(|unit| unit.content.as_str()).collect();
    assert_eq!(joined, input);
    assert_eq!(units.last().map(|unit| unit.content.as_str()), Some("A note at the end"));
}

#[test]
fn test_splitParagraphs_withoutParagraphs_shouldYieldOneUnit() {
    let units = split_paragraphs("Just a name");
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].content, "Just a name");
}

#[test]
fn test_splitParagraphs_withEmptyInput_shouldYieldNothing() {
    assert!(split_paragraphs("").is_empty());
}

/// An unpaired final `<` still closes the text in front of it
#[test]
fn test_splitTags_withTextBeforeDanglingBracket_shouldEmitText() {
    let segments = split_tags("<p>a</p>text<br");
    assert_eq!(
        segments,
        vec![
            Segment::Tag("<p>"),
            Segment::Text("a"),
            Segment::Tag("</p>"),
            Segment::Text("text"),
        ]
    );
}
