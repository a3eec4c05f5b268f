//! Static language distributions used across harnesses.
//!
//! Sizes are byte counts as GitHub reports them. `EXPECTED_*` tables pair a
//! distribution with the hundredths the normalizer must produce.

/// A realistic single-account distribution, already in descending size order.
pub const TYPICAL_ACCOUNT: &[(&str, u64)] = &[
    ("Rust", 1_482_113),
    ("TypeScript", 512_908),
    ("Python", 120_440),
    ("Shell", 18_204),
    ("Dockerfile", 2_310),
    ("Makefile", 411),
];

/// One dominant language and a long tail of tiny ones.
pub const LONG_TAIL: &[(&str, u64)] = &[
    ("C", 98_000_000),
    ("Assembly", 40),
    ("Makefile", 12),
    ("Awk", 3),
    ("Roff", 1),
];

/// Input order differs from size order; ties keep input order.
pub const WITH_TIES: &[(&str, u64)] = &[
    ("Go", 300),
    ("Lua", 700),
    ("Nix", 300),
    ("Zig", 700),
];

/// Hand-checked normalizations as `(input, expected [(language, hundredths)])`.
pub const EXPECTED: &[(&[(&str, u64)], &[(&str, u32)])] = &[
    (&[("X", 100)], &[("X", 10_000)]),
    (&[("A", 50), ("B", 50)], &[("A", 5_000), ("B", 5_000)]),
    (&[("A", 999_999), ("B", 1)], &[("A", 9_999), ("B", 1)]),
    (&[("A", 1), ("B", 1), ("C", 1)], &[("A", 3_333), ("B", 3_333), ("C", 3_334)]),
    (&[("Small", 1), ("Big", 2)], &[("Big", 6_666), ("Small", 3_334)]),
];

/// A language document in the flat file format.
pub const FLAT_DOCUMENT: &str = r#"{ "Rust": 3000, "Go": 1000 }"#;

/// A language document carrying repository counts.
pub const DETAILED_DOCUMENT: &str = r#"{
    "repositories": 5,
    "languages": [
        { "language": "Rust", "size": 1000, "repos": 4 },
        { "language": "Go", "size": 1000, "repos": 1 }
    ]
}"#;

/// A README with an empty languages section.
pub const README_TEMPLATE: &str = "# Hi there\n\n<!--START_SECTION:languages-->\n<!--END_SECTION:languages-->\n\nThanks for visiting.\n";
