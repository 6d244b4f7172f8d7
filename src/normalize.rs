//! Small facts derived from raw strings.
//!
//! All functions here are total: unrecognized input yields an empty string
//! or zero, never an error.

use regex::Regex;
use std::sync::LazyLock;

/// `content=<type>/<subtype>` inside a compound MIME string. ASCII word
/// characters only.
static ZIP_CONTENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"content=[A-Za-z0-9_]+/([A-Za-z0-9_]+)").expect("valid zip content regex")
});

/// Testament a canonical book belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Testament {
    Old,
    New,
}

impl Testament {
    fn category(&self) -> &'static str {
        match self {
            Testament::Old => "bible-ot",
            Testament::New => "bible-nt",
        }
    }
}

/// Canonical books: code, testament, and position.
///
/// Positions follow USFM book numbering, so the New Testament starts at 41.
const BOOKS: &[(&str, Testament, u32)] = &[
    ("gen", Testament::Old, 1),
    ("exo", Testament::Old, 2),
    ("lev", Testament::Old, 3),
    ("num", Testament::Old, 4),
    ("deu", Testament::Old, 5),
    ("jos", Testament::Old, 6),
    ("jdg", Testament::Old, 7),
    ("rut", Testament::Old, 8),
    ("1sa", Testament::Old, 9),
    ("2sa", Testament::Old, 10),
    ("1ki", Testament::Old, 11),
    ("2ki", Testament::Old, 12),
    ("1ch", Testament::Old, 13),
    ("2ch", Testament::Old, 14),
    ("ezr", Testament::Old, 15),
    ("neh", Testament::Old, 16),
    ("est", Testament::Old, 17),
    ("job", Testament::Old, 18),
    ("psa", Testament::Old, 19),
    ("pro", Testament::Old, 20),
    ("ecc", Testament::Old, 21),
    ("sng", Testament::Old, 22),
    ("isa", Testament::Old, 23),
    ("jer", Testament::Old, 24),
    ("lam", Testament::Old, 25),
    ("ezk", Testament::Old, 26),
    ("dan", Testament::Old, 27),
    ("hos", Testament::Old, 28),
    ("jol", Testament::Old, 29),
    ("amo", Testament::Old, 30),
    ("oba", Testament::Old, 31),
    ("jon", Testament::Old, 32),
    ("mic", Testament::Old, 33),
    ("nam", Testament::Old, 34),
    ("hab", Testament::Old, 35),
    ("zep", Testament::Old, 36),
    ("hag", Testament::Old, 37),
    ("zec", Testament::Old, 38),
    ("mal", Testament::Old, 39),
    ("mat", Testament::New, 41),
    ("mrk", Testament::New, 42),
    ("luk", Testament::New, 43),
    ("jhn", Testament::New, 44),
    ("act", Testament::New, 45),
    ("rom", Testament::New, 46),
    ("1co", Testament::New, 47),
    ("2co", Testament::New, 48),
    ("gal", Testament::New, 49),
    ("eph", Testament::New, 50),
    ("php", Testament::New, 51),
    ("col", Testament::New, 52),
    ("1th", Testament::New, 53),
    ("2th", Testament::New, 54),
    ("1ti", Testament::New, 55),
    ("2ti", Testament::New, 56),
    ("tit", Testament::New, 57),
    ("phm", Testament::New, 58),
    ("heb", Testament::New, 59),
    ("jas", Testament::New, 60),
    ("1pe", Testament::New, 61),
    ("2pe", Testament::New, 62),
    ("1jn", Testament::New, 63),
    ("2jn", Testament::New, 64),
    ("3jn", Testament::New, 65),
    ("jud", Testament::New, 66),
    ("rev", Testament::New, 67),
];

fn lookup_book(code: &str) -> Option<(Testament, u32)> {
    let code = code.to_lowercase();
    BOOKS
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|&(_, testament, order)| (testament, order))
}

/// Substring after the last `.` in `url`.
///
/// Not a real content-type check: a URL without a dot comes back whole.
pub fn file_format(url: &str) -> &str {
    url.rsplit_once('.').map(|(_, ext)| ext).unwrap_or(url)
}

/// MIME subtype of the payload inside a zip archive.
///
/// - `"application/zip; content=text/usfm"` → `"usfm"`
/// - `"application/json"` → `""`
/// - a zip format string without a `content=` clause → `""`
pub fn zip_inner_type(format: &str) -> &str {
    if !format.contains("application/zip") {
        return "";
    }
    ZIP_CONTENT_RE
        .captures(format)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or("")
}

/// `bible-ot` / `bible-nt` for canonical book codes, `""` for anything else.
pub fn category(book_code: &str) -> &'static str {
    lookup_book(book_code)
        .map(|(testament, _)| testament.category())
        .unwrap_or("")
}

/// Canonical position of a book, `0` when the code isn't a book.
pub fn canonical_sort_order(book_code: &str) -> u32 {
    lookup_book(book_code).map(|(_, order)| order).unwrap_or(0)
}

/// Last `/`-separated segment, e.g. `audio/mp3` → `mp3`.
pub fn last_segment(s: &str) -> &str {
    s.rsplit('/').next().unwrap_or(s)
}
