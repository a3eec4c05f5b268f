//! Swatch colours for the SVG card.
//!
//! Well-known languages use their customary colours from a compile-time map.
//! Anything else is hashed to a stable index into a fallback palette, so the
//! same language always gets the same colour across runs.

use phf::phf_map;

static LANGUAGE_COLORS: phf::Map<&'static str, &'static str> = phf_map! {
    "C" => "#555555",
    "C#" => "#178600",
    "C++" => "#f34b7d",
    "CSS" => "#563d7c",
    "Clojure" => "#db5855",
    "Dart" => "#00B4AB",
    "Dockerfile" => "#384d54",
    "Elixir" => "#6e4a7e",
    "Erlang" => "#B83998",
    "Go" => "#00ADD8",
    "HTML" => "#e34c26",
    "Haskell" => "#5e5086",
    "Java" => "#b07219",
    "JavaScript" => "#f1e05a",
    "Julia" => "#a270ba",
    "Jupyter Notebook" => "#DA5B0B",
    "Kotlin" => "#A97BFF",
    "Lua" => "#000080",
    "Makefile" => "#427819",
    "Nix" => "#7e7eff",
    "OCaml" => "#ef7a08",
    "Objective-C" => "#438eff",
    "PHP" => "#4F5D95",
    "Perl" => "#0298c3",
    "PowerShell" => "#012456",
    "Python" => "#3572A5",
    "R" => "#198CE7",
    "Ruby" => "#701516",
    "Rust" => "#dea584",
    "SCSS" => "#c6538c",
    "Scala" => "#c22d40",
    "Shell" => "#89e051",
    "Svelte" => "#ff3e00",
    "Swift" => "#F05138",
    "TeX" => "#3D6117",
    "TypeScript" => "#3178c6",
    "Vim Script" => "#199f4b",
    "Vue" => "#41b883",
    "Zig" => "#ec915c",
};

const FALLBACK_PALETTE: &[&str] = &[
    "#8b8b8b", "#6a9fb5", "#b5a16a", "#a06ab5", "#6ab58a", "#b56a6a", "#6a73b5", "#b58a6a",
];

/// Colour for a language name (exact, case-sensitive match first).
pub fn language_color(language: &str) -> &'static str {
    LANGUAGE_COLORS
        .get(language)
        .copied()
        .unwrap_or_else(|| FALLBACK_PALETTE[stable_hash(language) % FALLBACK_PALETTE.len()])
}

/// djb2-style hash, stable across Rust versions and process restarts.
fn stable_hash(s: &str) -> usize {
    s.bytes().fold(5381usize, |acc, b| {
        acc.wrapping_mul(33).wrapping_add(b as usize)
    })
}
