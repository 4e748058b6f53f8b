//! Deterministic artwork derivation.
//!
//! Every block owns an [`ArtPattern`] computed from its hash and its
//! transactions, nothing else. The hash picks the palette and the positions,
//! each transaction contributes three shapes, and the same block always
//! derives the same pattern down to the last bit.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use artchain_primitives::{ArtPattern, Shape, Transaction};
use rand::Rng;
use thiserror::Error;

/// Canvas edge length; base positions land in `0.0..=CANVAS_SIZE`.
pub const CANVAS_SIZE: f64 = 400.0;

/// Expected hash length in characters.
const HASH_LEN: usize = 64;

/// Artwork derivation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtError {
    /// The hash does not have the canonical length.
    #[error("malformed hash: expected {expected} characters, got {actual}")]
    MalformedHash { expected: usize, actual: usize },

    /// The hash contains a character outside `[0-9a-f]`.
    #[error("non-hex character in hash at offset {offset}")]
    NonHexHash { offset: usize },
}

/// Derive a block's artwork from its hash and transactions.
///
/// The background is `#` plus the first six hash characters. Each
/// transaction then contributes a circle, a rectangle, and a line, in that
/// order, positioned by the hash bytes (cycled past the end) and sized by
/// the transaction amount. An empty transaction list yields a background
/// with no shapes, which is what the genesis block carries.
pub fn derive_pattern(transactions: &[Transaction], hash: &str) -> Result<ArtPattern, ArtError> {
    if hash.len() != HASH_LEN {
        return Err(ArtError::MalformedHash { expected: HASH_LEN, actual: hash.len() });
    }
    let bytes = hex::decode(hash).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { index, .. } => ArtError::NonHexHash { offset: index },
        // the length check above rules out the length variants
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            ArtError::MalformedHash { expected: HASH_LEN, actual: hash.len() }
        }
    })?;

    let background = format!("#{}", &hash[..6]);
    let mut shapes = Vec::with_capacity(transactions.len() * 3);

    for (i, tx) in transactions.iter().enumerate() {
        let base_x = f64::from(bytes[i % bytes.len()]) / 255.0 * CANVAS_SIZE;
        let base_y = f64::from(bytes[(i + 1) % bytes.len()]) / 255.0 * CANVAS_SIZE;

        shapes.push(Shape::Circle {
            x: base_x,
            y: base_y,
            size: (tx.amount * 10.0) % 100.0 + 20.0,
            color: tx.color.clone(),
        });
        shapes.push(Shape::Rectangle {
            x: base_x + 50.0,
            y: base_y - 50.0,
            size: (tx.amount * 5.0) % 60.0 + 10.0,
            color: tx.color.clone(),
            rotation: (tx.timestamp % 360) as f64,
        });
        shapes.push(Shape::Line {
            x: base_x - 25.0,
            y: base_y + 25.0,
            size: (tx.amount * 15.0) % 150.0 + 30.0,
            color: tx.color.clone(),
            rotation: (tx.timestamp % 180) as f64,
        });
    }

    Ok(ArtPattern { background, shapes })
}

/// Random display color in the band the artwork uses, `hsl(H, 70%, 60%)`
/// with hue in `0..360`.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let hue: u32 = rng.gen_range(0..360);
    format!("hsl({hue}, 70%, 60%)")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn tx(amount: f64, timestamp: u64, color: &str) -> Transaction {
        Transaction {
            id: "abc123def".to_owned(),
            from: "alice".to_owned(),
            to: "bob".to_owned(),
            amount,
            timestamp,
            color: color.to_owned(),
        }
    }

    const ZERO_HASH: &str =
        "0000000000000000000000000000000000000000000000000000000000000000";

    #[test]
    fn worked_example_sizes() {
        let pattern =
            derive_pattern(&[tx(10.0, 400, "hsl(10, 70%, 60%)")], ZERO_HASH).unwrap();

        // amount 10: circle (10*10) % 100 + 20, rectangle (10*5) % 60 + 10,
        // line (10*15) % 150 + 30
        assert_matches!(pattern.shapes[0], Shape::Circle { x: 0.0, y: 0.0, size: 20.0, .. });
        assert_matches!(
            pattern.shapes[1],
            Shape::Rectangle { x: 50.0, y: -50.0, size: 60.0, rotation: 40.0, .. }
        );
        assert_matches!(
            pattern.shapes[2],
            Shape::Line { x: -25.0, y: 25.0, size: 30.0, rotation: 40.0, .. }
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let txs = vec![
            tx(10.0, 1000, "hsl(10, 70%, 60%)"),
            tx(3.5, 2000, "hsl(200, 70%, 60%)"),
        ];
        let hash = "00ab".repeat(16);
        let first = derive_pattern(&txs, &hash).unwrap();
        let second = derive_pattern(&txs, &hash).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn background_takes_the_hash_prefix() {
        let hash = format!("a1b2c3{}", "0".repeat(58));
        let pattern = derive_pattern(&[], &hash).unwrap();
        assert_eq!(pattern.background, "#a1b2c3");
        assert!(pattern.shapes.is_empty());
    }

    #[test]
    fn three_shapes_per_transaction_in_order() {
        let txs = vec![
            tx(1.0, 0, "hsl(1, 70%, 60%)"),
            tx(2.0, 0, "hsl(2, 70%, 60%)"),
        ];
        let pattern = derive_pattern(&txs, ZERO_HASH).unwrap();

        assert_eq!(pattern.shapes.len(), 6);
        assert_matches!(pattern.shapes[0], Shape::Circle { .. });
        assert_matches!(pattern.shapes[1], Shape::Rectangle { .. });
        assert_matches!(pattern.shapes[2], Shape::Line { .. });
        assert_eq!(pattern.shapes[3].color(), "hsl(2, 70%, 60%)");
    }

    #[test]
    fn byte_stream_cycles_past_the_end() {
        // transaction 31 reads bytes 31 and 0, transaction 32 reads 0 and 1
        let hash: String = (0..32).map(|i| format!("{i:02x}")).collect();
        let txs: Vec<_> = (0..33).map(|i| tx(i as f64, 0, "hsl(0, 70%, 60%)")).collect();
        let pattern = derive_pattern(&txs, &hash).unwrap();

        let expected_x = 31.0 / 255.0 * CANVAS_SIZE;
        let expected_y = 0.0;
        assert_matches!(
            &pattern.shapes[31 * 3],
            Shape::Circle { x, y, .. } if *x == expected_x && *y == expected_y
        );
        assert_matches!(
            &pattern.shapes[32 * 3],
            Shape::Circle { x, y, .. } if *x == 0.0 && *y == 1.0 / 255.0 * CANVAS_SIZE
        );
    }

    #[test]
    fn rejects_short_and_non_hex_hashes() {
        assert_matches!(
            derive_pattern(&[], "abc"),
            Err(ArtError::MalformedHash { expected: 64, actual: 3 })
        );

        let mut bad = ZERO_HASH.to_owned();
        bad.replace_range(10..11, "g");
        assert_matches!(derive_pattern(&[], &bad), Err(ArtError::NonHexHash { offset: 10 }));
    }

    #[test]
    fn random_color_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let color = random_color(&mut rng);
            let hue: u32 = color
                .strip_prefix("hsl(")
                .and_then(|rest| rest.strip_suffix(", 70%, 60%)"))
                .and_then(|hue| hue.parse().ok())
                .unwrap();
            assert!(hue < 360);
        }
    }

    proptest! {
        #[test]
        fn shape_count_and_positions(
            hash in "[0-9a-f]{64}",
            amounts in proptest::collection::vec(0.0f64..1_000_000.0, 0..8),
        ) {
            let txs: Vec<_> = amounts
                .iter()
                .map(|&amount| tx(amount, 123_456, "hsl(50, 70%, 60%)"))
                .collect();
            let pattern = derive_pattern(&txs, &hash).unwrap();

            prop_assert_eq!(pattern.shapes.len(), txs.len() * 3);
            for chunk in pattern.shapes.chunks(3) {
                prop_assert!(
                    matches!(chunk[0], Shape::Circle { x, y, .. }
                        if (0.0..=CANVAS_SIZE).contains(&x) && (0.0..=CANVAS_SIZE).contains(&y)),
                    "chunk[0] is not a circle within the canvas"
                );
                prop_assert!(
                    matches!(chunk[1], Shape::Rectangle { .. }),
                    "chunk[1] is not a rectangle"
                );
                prop_assert!(matches!(chunk[2], Shape::Line { .. }), "chunk[2] is not a line");
            }
        }
    }
}
