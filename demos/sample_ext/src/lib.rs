//! Sample extension module for the nativetest harness.
//!
//! Build with `--features leak` to add a test that retains one allocation per call.

use std::collections::BTreeMap;

use nativetest_abi::{assert_eq, assert_true, export_tests, native_test};

#[cfg(feature = "refcount")]
nativetest_abi::export_live_count!();

#[native_test]
fn test_alpha() {
    let squares: Vec<u64> = (1..=4).map(|n| n * n).collect();
    assert_eq(squares.iter().sum::<u64>(), 30);
}

#[native_test]
fn test_beta() -> Result<(), String> {
    let mut counts = BTreeMap::new();
    for word in "a b a c b a".split_whitespace() {
        *counts.entry(word.to_string()).or_insert(0u32) += 1;
    }
    if counts.get("a") != Some(&3) {
        return Err(format!("unexpected counts: {counts:?}"));
    }
    assert_true(counts.len() == 3);
    Ok(())
}

#[cfg(feature = "leak")]
#[native_test]
fn test_leaky() {
    std::mem::forget(Box::new(0xdead_beef_u64));
}

#[cfg(not(feature = "leak"))]
export_tests!(test_alpha, test_beta);

#[cfg(feature = "leak")]
export_tests!(test_alpha, test_beta, test_leaky);
