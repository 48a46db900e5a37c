//! Fuzz target for malformed point-value proofs
//!
//! This fuzzer feeds the verifier:
//! - Arbitrary triplet sequences (including empty and oversized paths)
//! - Honest proofs with a single mutated entry
//! - Honest proofs truncated or extended with garbage triplets
//!
//! The verifier must never panic, must reject every single-entry mutation,
//! and must only accept arbitrary proofs that are genuinely consistent and
//! fully reduced.
//!
//! Usage:
//!   cargo fuzz run fuzz_malformed_proofs

#![no_main]

use fri_commit::{EvaluationCommitment, PointValueProof, Polynomial, Triplet, Verifier};
use libfuzzer_sys::fuzz_target;

const MODULUS: u64 = 100;

fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    let n = bytes.len().min(8);
    buf[..n].copy_from_slice(&bytes[..n]);
    u64::from_le_bytes(buf)
}

/// Independent re-check of what a strict verifier is supposed to enforce.
fn consistent(point: u64, value: u64, proof: &PointValueProof) -> bool {
    let Some(first) = proof.triplets.first() else {
        return false;
    };
    if proof.len() < 64 && point >> proof.len() != 0 {
        return false;
    }
    let mut entries = proof.iter().flat_map(|t| [t.parent, t.left, t.right]);
    if value >= MODULUS || entries.any(|v| v >= MODULUS) {
        return false;
    }
    if first.child((point & 1) as usize) != value {
        return false;
    }
    if proof
        .iter()
        .any(|t| (t.left as u128 + t.right as u128) % MODULUS as u128 != t.parent as u128)
    {
        return false;
    }
    proof.triplets.windows(2).enumerate().all(|(i, pair)| {
        let side = point.checked_shr(i as u32 + 1).unwrap_or(0) & 1;
        pair[0].parent == pair[1].child(side as usize)
    })
}

fuzz_target!(|data: &[u8]| {
    let verifier = Verifier::additive(MODULUS).expect("valid modulus");

    // Strategy 1: completely arbitrary proofs
    if data.len() >= 16 {
        let point = read_u64(&data[0..8]);
        let value = read_u64(&data[8..16]);
        let triplets = data[16..]
            .chunks(24)
            .map(|c| {
                Triplet::new(
                    read_u64(c),
                    read_u64(c.get(8..).unwrap_or(&[])),
                    read_u64(c.get(16..).unwrap_or(&[])),
                )
            })
            .collect();
        let proof = PointValueProof::new(triplets);

        let accepted = verifier.verify(point, value, &proof);
        assert_eq!(accepted, consistent(point, value, &proof));
        let _ = verifier.check_against_root(value, point, value, &proof);
    }

    // Strategy 2: honest proof, single mutated entry
    if data.len() >= 4 {
        let coefficients: Vec<i64> = data.iter().take(6).map(|&b| b as i64).collect();
        let poly = match Polynomial::new(&coefficients, MODULUS) {
            Ok(poly) => poly,
            Err(_) => return,
        };
        let num_points = 1usize << (data[0] % 7 + 1);
        let commitment = match EvaluationCommitment::new(&poly, num_points, MODULUS) {
            Ok(c) => c,
            Err(_) => return,
        };
        let point = data[1] as u64 % num_points as u64;
        let value = poly.evaluate(point);
        let proof = match commitment.prove_point_value(point) {
            Ok(proof) => proof,
            Err(_) => return,
        };
        assert!(verifier.verify(point, value, &proof));

        for (i, &mask) in data[2..].iter().enumerate().take(proof.len() * 3) {
            let mut mutated = proof.clone();
            let t = &mut mutated.triplets[i / 3];
            let entry = match i % 3 {
                0 => &mut t.parent,
                1 => &mut t.left,
                _ => &mut t.right,
            };
            let before = *entry;
            *entry = (*entry ^ mask as u64) % MODULUS;
            if *entry != before {
                assert!(!verifier.verify(point, value, &mutated));
            }
        }

        // Strategy 3: truncation and extension
        for keep in 0..proof.len() {
            let truncated = PointValueProof::new(proof.triplets[..keep].to_vec());
            let _ = verifier.verify(point, value, &truncated);
        }
        let mut extended = proof.clone();
        extended.triplets.extend(data.chunks(3).take(4).map(|c| {
            let byte = |i: usize| c.get(i).copied().unwrap_or(0) as u64;
            Triplet::new(byte(0), byte(1), byte(2))
        }));
        let _ = verifier.verify(point, value, &extended);
    }
});
