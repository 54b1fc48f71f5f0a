//! Golden test vector validation
//!
//! The vectors in testdata/golden-vectors.json were produced by an
//! independent PBKDF2-HMAC-SHA256 + AES-256-GCM implementation.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
use cryptic::armor;
use cryptic::kdf::KdfParams;
use cryptic::sealedbox;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GoldenVector {
    plaintext: String,
    password: String,
    iterations: u32,
    salt: String,
    nonce: String,
    sealed: String,
    comment: String,
}

fn load_golden_vectors() -> Vec<GoldenVector> {
    let json_data = include_str!("../testdata/golden-vectors.json");
    serde_json::from_str(json_data).expect("failed to parse golden vectors")
}

/// Run golden vector tests on vectors accepted by `filter`.
fn run_golden_vector_tests(filter: impl Fn(&GoldenVector) -> bool) {
    let vectors = load_golden_vectors();

    let mut passed = 0;
    let mut failed = 0;

    for (i, vector) in vectors.iter().enumerate().filter(|(_, v)| filter(v)) {
        let expected_plaintext = BASE64_STANDARD
            .decode(&vector.plaintext)
            .expect("failed to decode plaintext");
        let salt: [u8; 16] = BASE64_STANDARD
            .decode(&vector.salt)
            .expect("failed to decode salt")
            .try_into()
            .expect("salt must be 16 bytes");
        let nonce: [u8; 12] = BASE64_STANDARD
            .decode(&vector.nonce)
            .expect("failed to decode nonce")
            .try_into()
            .expect("nonce must be 12 bytes");
        let params = KdfParams::new(vector.iterations).expect("invalid iteration count");

        let sealed = match sealedbox::seal_deterministic(
            &params,
            &expected_plaintext,
            &vector.password,
            &salt,
            &nonce,
        ) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Vector {}: FAILED to seal - {}", i, e);
                eprintln!("  Comment: {}", vector.comment);
                failed += 1;
                continue;
            }
        };

        let armored = armor::encode(&sealed);
        if armored != vector.sealed {
            eprintln!("Vector {}: FAILED - sealed output mismatch", i);
            eprintln!("  Comment: {}", vector.comment);
            eprintln!("  Expected: {}", vector.sealed);
            eprintln!("  Actual:   {}", armored);
            failed += 1;
            continue;
        }

        let unarmored = armor::decode(&vector.sealed).expect("failed to unarmor");
        let opened = match sealedbox::open_with(&params, &unarmored, &vector.password) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Vector {}: FAILED to open - {}", i, e);
                eprintln!("  Comment: {}", vector.comment);
                failed += 1;
                continue;
            }
        };

        if opened != expected_plaintext {
            eprintln!("Vector {}: FAILED - plaintext mismatch", i);
            eprintln!("  Comment: {}", vector.comment);
            failed += 1;
            continue;
        }

        passed += 1;
    }

    println!("Results: {} passed, {} failed", passed, failed);

    assert_eq!(failed, 0, "Some golden vectors failed validation");
    assert!(passed > 0, "No golden vectors were tested");
}

#[test]
fn test_golden_vectors_low_iterations() {
    run_golden_vector_tests(|v| v.iterations < 10_000);
}

#[test]
fn test_golden_vectors_default_iterations() {
    run_golden_vector_tests(|v| v.iterations == cryptic::kdf::DEFAULT_ITERATIONS);
}

#[test]
fn test_default_vectors_open_with_default_entry_point() {
    for vector in load_golden_vectors()
        .iter()
        .filter(|v| v.iterations == cryptic::kdf::DEFAULT_ITERATIONS)
    {
        let sealed = armor::decode(&vector.sealed).unwrap();
        let expected = BASE64_STANDARD.decode(&vector.plaintext).unwrap();
        assert_eq!(cryptic::open(&sealed, &vector.password).unwrap(), expected);
    }
}
