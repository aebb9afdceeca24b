//! Shared test vectors for CarvPath.
//!
//! These vectors pin down flattening, bounds checks, sizes and error
//! classes so that every implementation sharing a long-path store agrees
//! on the same tokens.

use crate::fixtures::long_token;
use serde::{Deserialize, Serialize};

/// A path and the single-level token it flattens to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Input path.
    pub path: String,
    /// Expected flattened token.
    pub expected: String,
}

/// A path and whether it fits inside an image of `top_size` bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Size of the whole image.
    pub top_size: u64,
    /// Input path.
    pub path: String,
    /// Whether the path lies inside the image.
    pub expected: bool,
}

/// A path and the number of bytes it addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Input path.
    pub path: String,
    /// Expected total size.
    pub expected_size: u64,
}

/// Error class a malformed or invalid path must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed token.
    Parse,
    /// Digest reference missing from the store.
    UnknownDigest,
    /// Range reaching past the parent's end.
    OutOfRange,
}

/// A path that must fail to parse, and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Input path.
    pub path: String,
    /// Expected error class.
    pub expected: ErrorKind,
}

fn flatten(id: &str, description: &str, path: impl Into<String>, expected: &str) -> FlattenVector {
    FlattenVector {
        id: id.into(),
        description: description.into(),
        path: path.into(),
        expected: expected.into(),
    }
}

/// Flatten vectors for a context with the default configuration.
///
/// The digest vectors assume SHA-256 references and a fresh store.
pub fn flatten_vectors() -> Vec<FlattenVector> {
    vec![
        flatten(
            "two_levels",
            "Range straddling two runs",
            "0+20000_40000+20000/10000+20000",
            "10000+10000_40000+10000",
        ),
        flatten(
            "three_levels",
            "Halving the straddling range",
            "0+20000_40000+20000/10000+20000/5000+10000",
            "15000+5000_40000+5000",
        ),
        flatten(
            "four_levels",
            "Halving twice",
            "0+20000_40000+20000/10000+20000/5000+10000/2500+5000",
            "17500+2500_40000+2500",
        ),
        flatten(
            "five_levels",
            "Halving three times",
            "0+20000_40000+20000/10000+20000/5000+10000/2500+5000/1250+2500",
            "18750+1250_40000+1250",
        ),
        flatten(
            "six_levels",
            "Halving four times",
            "0+20000_40000+20000/10000+20000/5000+10000/2500+5000/1250+2500/625+1250",
            "19375+625_40000+625",
        ),
        flatten(
            "merge_through_level",
            "Adjacent runs merge after projection",
            "0+20000_20000+20000/0+40000",
            "0+40000",
        ),
        flatten(
            "merge_concrete",
            "Adjacent concrete runs merge",
            "0+20000_20000+20000",
            "0+40000",
        ),
        flatten("merge_sparse", "Sparse runs merge", "S100_S200", "S300"),
        flatten("merge_sparse_small", "Tiny sparse runs merge", "S1_S1", "S2"),
        flatten("single", "Single concrete run", "0+5", "0+5"),
        flatten("zero_concrete", "Zero-size run is empty", "0+0", "S0"),
        flatten("zero_offset", "Zero-size run at an offset", "20000+0", "S0"),
        flatten("zero_token", "Canonical empty token", "S0", "S0"),
        flatten(
            "zero_runs",
            "Several zero-size runs",
            "20000+0_89765+0",
            "S0",
        ),
        flatten(
            "zero_child",
            "Zero-size child of zero-size parent",
            "1000+0_2000+0/0+0",
            "S0",
        ),
        flatten("zero_both", "Empty in empty", "0+0/0+0", "S0"),
        flatten(
            "end_past_u64",
            "Run whose end lies past the 64-bit range",
            "18446744073709551615+1",
            "18446744073709551615+1",
        ),
        flatten(
            "sparse_child",
            "Range of a sparse run stays sparse",
            "S200000/1000+9000",
            "S9000",
        ),
        flatten(
            "sparse_passthrough",
            "Sparse child fragments pass through",
            "0+100/S10_0+5",
            "S10_0+5",
        ),
        flatten(
            "long_literal_kept",
            "Token under the length limit stays literal",
            long_token(20),
            &long_token(20),
        ),
        flatten(
            "long_compressed",
            "Long token replaced by its SHA-256 reference",
            long_token(25),
            "Def43dfc4474860f5831c38abcc08b2581bb94928823432a756e3ab850da1124b",
        ),
        flatten(
            "long_28_compressed",
            "Twenty-eight fragments past the default limit",
            long_token(28),
            "D70f420f1e4c23a621f8e122a2f5fc2e7d54ae05fdc2b23b2e2acdcda78655cf3",
        ),
        flatten(
            "long_range_compressed",
            "Long range result replaced by its SHA-256 reference",
            format!("{}/1+2488", long_token(25)),
            "D80832305ffb36b2ce2ed4d02a98b9a0c62c78b92abef6699ddfbd18185974832",
        ),
    ]
}

/// Flatten vectors for the legacy BLAKE2b-256 digest.
///
/// The vectors are ordered: later paths reference digests recorded by
/// earlier ones, so they must run in sequence against one store.
pub fn legacy_digest_vectors() -> Vec<FlattenVector> {
    let reference = "D901141262aa24eaaddbce2f470615b6a47639f7a62b3bc7c65335251fe3fa480";
    vec![
        flatten(
            "legacy_long",
            "Long token replaced by its BLAKE2b reference",
            long_token(25),
            reference,
        ),
        flatten(
            "legacy_long_range",
            "Long range result replaced by its BLAKE2b reference",
            format!("{}/1+2488", long_token(25)),
            "D0e2ded6b35aa15baabd679f7d8b0a7f0ad393948988b6b2f28db7c283240e3b6",
        ),
        flatten(
            "legacy_reference_range",
            "Range read through a digest reference",
            format!("{reference}/1+2488"),
            "D0e2ded6b35aa15baabd679f7d8b0a7f0ad393948988b6b2f28db7c283240e3b6",
        ),
        flatten(
            "legacy_reference_short",
            "Short range read through a digest reference",
            format!("{reference}/350+100"),
            "353+50_404+50",
        ),
    ]
}

/// Bounds-check vectors.
pub fn range_vectors() -> Vec<RangeVector> {
    let range = |id: &str, top_size: u64, path: &str, expected: bool| RangeVector {
        id: id.into(),
        top_size,
        path: path.into(),
        expected,
    };
    vec![
        range("large_single", 200_000_000_000, "0+123456789000", true),
        range("large_nested", 200_000_000_000, "0+100000000000/0+50000000", true),
        range("small_nested", 20000, "0+100000000000/0+50000000", false),
        range("exact_end", 20000, "0+20000", true),
        range("past_end", 20000, "1+20000", false),
        range("sparse_ignored", 10, "S1000000_0+10", true),
        range("empty", 0, "S0", true),
    ]
}

/// Size vectors for a context with the default configuration.
pub fn size_vectors() -> Vec<SizeVector> {
    let size = |id: &str, path: String, expected_size: u64| SizeVector {
        id: id.into(),
        path,
        expected_size,
    };
    vec![
        size("zero_runs", "20000+0_89765+0".into(), 0),
        size(
            "nested",
            "0+20000_40000+20000/10000+20000/5000+10000".into(),
            10000,
        ),
        size("sparse", "S100_0+5".into(), 105),
        size("long", long_token(25), 2500),
        size("long_range", format!("{}/350+100", long_token(25)), 100),
    ]
}

/// Paths that must fail, with the error class each must produce.
pub fn error_vectors() -> Vec<ErrorVector> {
    let error = |id: &str, path: &str, expected: ErrorKind| ErrorVector {
        id: id.into(),
        path: path.into(),
        expected,
    };
    vec![
        error("not_a_number", "abc", ErrorKind::Parse),
        error("missing_size", "100+", ErrorKind::Parse),
        error("missing_offset", "+100", ErrorKind::Parse),
        error("bad_sparse", "Sx", ErrorKind::Parse),
        error("trailing_separator", "0+5_", ErrorKind::Parse),
        error("signed_size", "0+-5", ErrorKind::Parse),
        error("size_overflow", "S18446744073709551615_S1", ErrorKind::Parse),
        error("field_overflow", "18446744073709551616+1", ErrorKind::Parse),
        error("bad_level", "0+100/abc", ErrorKind::Parse),
        error("unknown_digest", "Dfeedface", ErrorKind::UnknownDigest),
        error(
            "unknown_digest_level",
            "0+100/D0000000000000000000000000000000000000000000000000000000000000000",
            ErrorKind::UnknownDigest,
        ),
        error("past_end", "0+100/50+100", ErrorKind::OutOfRange),
        error("child_of_empty", "0+0/5+5", ErrorKind::OutOfRange),
        error("empty_level", "0+100//0+5", ErrorKind::OutOfRange),
    ]
}

/// Generate all test vectors as JSON.
pub fn all_vectors_json() -> String {
    let vectors = AllTestVectors {
        flatten: flatten_vectors(),
        legacy_digest: legacy_digest_vectors(),
        range: range_vectors(),
        size: size_vectors(),
        error: error_vectors(),
    };

    serde_json::to_string_pretty(&vectors).expect("Failed to serialize vectors")
}

#[derive(Debug, Serialize, Deserialize)]
struct AllTestVectors {
    flatten: Vec<FlattenVector>,
    legacy_digest: Vec<FlattenVector>,
    range: Vec<RangeVector>,
    size: Vec<SizeVector>,
    error: Vec<ErrorVector>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_vector_ids_unique() {
        let mut ids = HashSet::new();
        for id in flatten_vectors()
            .iter()
            .chain(legacy_digest_vectors().iter())
            .map(|v| v.id.clone())
            .chain(range_vectors().into_iter().map(|v| v.id))
            .chain(size_vectors().into_iter().map(|v| v.id))
            .chain(error_vectors().into_iter().map(|v| v.id))
        {
            assert!(ids.insert(id.clone()), "duplicate vector id {id}");
        }
    }

    #[test]
    fn test_limit_vector_is_at_limit() {
        let vector = flatten_vectors()
            .into_iter()
            .find(|v| v.id == "long_literal_kept")
            .unwrap();
        assert!(vector.path.len() <= carvpath_core::DEFAULT_MAX_TOKEN_LEN);
        assert!(long_token(21).len() > carvpath_core::DEFAULT_MAX_TOKEN_LEN);
    }

    #[test]
    fn test_all_vectors_json() {
        let json = all_vectors_json();
        assert!(json.contains("legacy_digest"));
        assert!(json.contains("\"out_of_range\""));

        let parsed: AllTestVectors = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.flatten, flatten_vectors());
        assert_eq!(parsed.error, error_vectors());
    }
}
