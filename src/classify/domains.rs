//! Static typo dictionaries for the major mail providers.
//!
//! The tables are immutable process-wide data: declaration-ordered `const`
//! slices, with a `LazyLock` map built once for exact-domain lookup. Entries
//! that map a domain to itself mark legitimate provider domains (typically
//! country-code variants) that sit close enough to a popular domain to be
//! mangled by the similarity fallback; the classifier treats such a hit as
//! proof the domain is fine.

use std::sync::LazyLock;

use ahash::AHashMap;

/// Known full-domain misspellings and the canonical domain each corrects to.
/// Identity pairs are legitimate lookalikes that must never be rewritten.
pub const DOMAIN_TYPO_PAIRS: &[(&str, &str)] = &[
    // gmail
    ("gmail.con", "gmail.com"),
    ("gmail.co", "gmail.com"),
    ("gmail.cm", "gmail.com"),
    ("gmail.om", "gmail.com"),
    ("gmail.comm", "gmail.com"),
    ("gmai.com", "gmail.com"),
    ("gmal.com", "gmail.com"),
    ("gmial.com", "gmail.com"),
    ("gamil.com", "gmail.com"),
    ("gnail.com", "gmail.com"),
    ("gmaill.com", "gmail.com"),
    // yahoo
    ("yahoo.con", "yahoo.com"),
    ("yahoo.co", "yahoo.com"),
    ("yahoo.cm", "yahoo.com"),
    ("yaho.com", "yahoo.com"),
    ("yahooo.com", "yahoo.com"),
    ("yhoo.com", "yahoo.com"),
    ("yaoo.com", "yahoo.com"),
    // hotmail
    ("hotmail.con", "hotmail.com"),
    ("hotmail.co", "hotmail.com"),
    ("hotmail.cm", "hotmail.com"),
    ("hotmal.com", "hotmail.com"),
    ("hotmial.com", "hotmail.com"),
    ("hotmai.com", "hotmail.com"),
    ("hotamil.com", "hotmail.com"),
    ("hormail.com", "hotmail.com"),
    // outlook
    ("outlook.con", "outlook.com"),
    ("outlook.co", "outlook.com"),
    ("outlok.com", "outlook.com"),
    ("outloo.com", "outlook.com"),
    ("oulook.com", "outlook.com"),
    ("outook.com", "outlook.com"),
    // aol
    ("aol.con", "aol.com"),
    ("aol.co", "aol.com"),
    ("aoll.com", "aol.com"),
    ("ao.com", "aol.com"),
    // live
    ("live.con", "live.com"),
    ("live.co", "live.com"),
    ("livee.com", "live.com"),
    // msn
    ("msn.con", "msn.com"),
    ("msn.co", "msn.com"),
    ("mns.com", "msn.com"),
    // icloud
    ("icloud.con", "icloud.com"),
    ("icloud.co", "icloud.com"),
    ("iclod.com", "icloud.com"),
    ("icoud.com", "icloud.com"),
    ("icluod.com", "icloud.com"),
    // me
    ("me.con", "me.com"),
    ("me.cm", "me.com"),
    // legitimate country-code lookalikes, kept as-is
    ("yahoo.ca", "yahoo.ca"),
    ("yahoo.co.uk", "yahoo.co.uk"),
    ("yahoo.co.in", "yahoo.co.in"),
    ("yahoo.com.br", "yahoo.com.br"),
    ("yahoo.fr", "yahoo.fr"),
    ("hotmail.co.uk", "hotmail.co.uk"),
    ("hotmail.fr", "hotmail.fr"),
    ("hotmail.es", "hotmail.es"),
    ("hotmail.it", "hotmail.it"),
    ("outlook.es", "outlook.es"),
    ("outlook.fr", "outlook.fr"),
    ("live.ca", "live.ca"),
    ("live.co.uk", "live.co.uk"),
    ("aol.co.uk", "aol.co.uk"),
];

/// Exact-domain lookup table built from [`DOMAIN_TYPO_PAIRS`].
pub static DOMAIN_TYPOS: LazyLock<AHashMap<&'static str, &'static str>> =
    LazyLock::new(|| DOMAIN_TYPO_PAIRS.iter().copied().collect());

/// Trailing TLD typo suffixes and their corrections, applied only when no
/// exact domain entry matched. Checked in declaration order; the first
/// matching suffix wins, so longer suffixes come before shorter ones they
/// overlap with.
pub const TLD_TYPOS: &[(&str, &str)] = &[
    (".comm", ".com"),
    (".con", ".com"),
    (".cmo", ".com"),
    (".ocm", ".com"),
    (".cpm", ".com"),
    (".cim", ".com"),
    (".vom", ".com"),
    (".xom", ".com"),
    (".om", ".com"),
    (".cm", ".com"),
    (".nte", ".net"),
    (".met", ".net"),
    (".ner", ".net"),
    (".ogr", ".org"),
    (".orh", ".org"),
    (".orf", ".org"),
];

/// Popular provider domains backing the similarity fallback. Iteration order
/// is the tie-break order: the first domain at the minimum distance wins.
pub const POPULAR_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "aol.com",
    "icloud.com",
];

/// Provider names recognized when reconstructing an address that lost its
/// `@` sign.
pub const PROVIDER_NAMES: &[&str] = &["gmail", "yahoo", "hotmail", "outlook", "aol", "icloud"];
