//! Query keyword extraction.
//!
//! A query is lowercased, stripped of ASCII punctuation, and split on whitespace. Tokens longer
//! than [`MIN_KEYWORD_CHARS`] survive unless they are stop words; shorter tokens survive only
//! when they are domain terms such as `bzr` or `lzo`. No stemming and no diacritic folding is
//! applied, so `zaštita` and `zastita` are different keywords.

use std::collections::HashSet;

/// Tokens must be strictly longer than this many characters unless they are domain terms.
pub const MIN_KEYWORD_CHARS: usize = 3;

/// Serbian (Latin script) function words and question words, plus a few English ones that show
/// up in mixed queries.
pub const STOP_WORDS: &[&str] = &[
	"a", "ako", "ali", "bez", "biti", "bilo", "bio", "bila", "da", "do", "gde", "i", "ili", "iz",
	"između", "ja", "je", "jer", "jeste", "još", "kad", "kada", "kako", "kao", "koja", "koje", "koji",
	"kojih", "kojim", "kojoj", "koliko", "kod", "li", "mi", "mogu", "može", "mora", "moraju",
	"moram", "na", "nad", "nakon", "ne", "neki", "neke", "nešto", "nije", "niti", "o", "od",
	"odnosno", "ona", "oni", "ono", "ova", "ovaj", "ovde", "ovo", "pod", "po", "posle", "potrebno",
	"pre", "preko", "prema", "pri", "sa", "sam", "samo", "se", "sve", "svi", "svih", "svaki",
	"šta", "što", "su", "tako", "takođe", "te", "ti", "to", "treba", "u", "ukoliko", "uz", "vi",
	"već", "za", "zašto", "zbog", "about", "from", "have", "that", "this", "what",
	"which", "with",
];

/// Short abbreviations that carry meaning in the occupational safety domain.
pub const DOMAIN_TERMS: &[&str] = &["bzr", "lzo", "zop", "ppz", "akt", "rad", "iso"];

/// Whether `token` (already lowercased) is in [`STOP_WORDS`].
pub fn is_stop_word(token: &str) -> bool {
	STOP_WORDS.contains(&token)
}

/// Whether `token` (already lowercased) is in [`DOMAIN_TERMS`].
pub fn is_domain_term(token: &str) -> bool {
	DOMAIN_TERMS.contains(&token)
}

/// Lowercases `query`, replaces ASCII punctuation with spaces, and collapses whitespace.
pub fn normalize_query(query: &str) -> String {
	let mut replaced = String::with_capacity(query.len());

	for ch in query.chars() {
		if ch.is_ascii_punctuation() {
			replaced.push(' ');
		} else {
			replaced.extend(ch.to_lowercase());
		}
	}

	replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Deduplicated keywords of `query`, lowercased, in no particular order.
pub fn extract_keywords(query: &str) -> HashSet<String> {
	let normalized = normalize_query(query);
	let mut out = HashSet::new();

	for token in normalized.split_whitespace() {
		if keep_token(token) {
			out.insert(token.to_string());
		}
	}

	out
}

fn keep_token(token: &str) -> bool {
	if is_domain_term(token) {
		return true;
	}

	token.chars().count() > MIN_KEYWORD_CHARS && !is_stop_word(token)
}
