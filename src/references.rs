/*!
 * Rewriting of legacy entity references.
 *
 * Older documents link to other entities with a per-type token such as
 * `@Actor[abc123]{Goblin}`. The translation service does not know this
 * syntax and tends to mangle it, so every legacy token is rewritten to the
 * unified `@UUID[Actor.abc123]{Goblin}` form before text leaves the process.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Entity types that have a legacy `@<Type>[` reference prefix
pub const LEGACY_ENTITY_TYPES: [&str; 9] = [
    "Scene",
    "Actor",
    "Item",
    "JournalEntry",
    "RollTable",
    "Cards",
    "Folder",
    "Playlist",
    "Compendium",
];

/// Matches any legacy prefix and captures the entity type.
static LEGACY_REFERENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    let alternatives = LEGACY_ENTITY_TYPES.join("|");
    Regex::new(&format!(r"@({})\[", alternatives)).expect("legacy reference pattern is valid")
});

/// Rewrite every legacy reference prefix to the unified `@UUID[<Type>.` form.
///
/// Returns the input borrowed when nothing had to change.
pub fn rewrite_references(markup: &str) -> Cow<'_, str> {
    LEGACY_REFERENCE_REGEX.replace_all(markup, "@UUID[$1.")
}
