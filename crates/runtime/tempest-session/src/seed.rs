//! Building the first field of a game.

use std::f64::consts::TAU;

use tempest_config::SeedConfig;
use tempest_core::{Field, Ring, Sector};
use tempest_pack::{pretty_label, ContentPack};

/// Deterministic pseudo-random value in [0, 1] for sector `i`.
fn rng(i: usize) -> f64 {
    ((i as f64 * 1337.7).sin() + 1.0) * 0.5
}

/// Seed a field from a content pack.
///
/// Sectors sit at even spacing plus a small deterministic jitter and take
/// their labels from the pack's tokens, cycling when the pack is short.
pub fn seed_field(pack: &ContentPack, cfg: &SeedConfig) -> Field {
    let n = cfg.field_size;
    let clusters = pack.clusters();

    let sectors = (0..n)
        .map(|i| {
            let base = i as f64 / n as f64 * TAU;
            let angle = base + (rng(i) - 0.5) * cfg.jitter;
            let mut sector = Sector::new(angle, Ring::alternating(i));

            if !pack.tokens.is_empty() {
                let token = &pack.tokens[i % pack.tokens.len()];
                sector = sector.with_label(pretty_label(&token.id));

                let color = token
                    .cluster
                    .as_deref()
                    .and_then(|c| pack.color_for(c))
                    .or_else(|| {
                        (!clusters.is_empty())
                            .then(|| clusters[i % clusters.len()])
                            .and_then(|c| pack.color_for(c))
                    });
                if let Some(color) = color {
                    sector = sector.with_color(color);
                }
            }
            sector
        })
        .collect();

    let mut field = Field::new(sectors);
    field.reanchor(|i| cfg.anchors.contains(&i));
    field
}

/// Unlabelled field of `n` evenly spaced sectors with the given anchors.
/// Out-of-range anchor indices are ignored.
pub fn even_field(n: usize, anchors: &[usize]) -> Field {
    let mut field = Field::new(
        (0..n)
            .map(|i| Sector::new(i as f64 / n as f64 * TAU, Ring::alternating(i)))
            .collect(),
    );
    field.reanchor(|i| anchors.contains(&i));
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempest_core::diff;
    use tempest_pack::{dev_pack, Token, UiHints};

    #[test]
    fn test_seed_from_dev_pack() {
        let pack = dev_pack();
        let field = seed_field(&pack, &SeedConfig::default());
        assert_eq!(field.len(), 36);
        assert_eq!(field.anchor_indices(), vec![3, 11, 18, 27]);
        assert_eq!(field.get(0).unwrap().ring, Ring::Outer);
        assert_eq!(field.get(1).unwrap().ring, Ring::Inner);

        for (i, s) in field.iter().enumerate() {
            let base = i as f64 / 36.0 * TAU;
            assert!(diff(s.angle(), base).abs() <= 0.04 + 1e-12);
            assert!(s.label().is_some());
            assert!(s.color.is_some());
        }
    }

    #[test]
    fn test_seed_is_deterministic() {
        let pack = dev_pack();
        let cfg = SeedConfig::default();
        assert_eq!(seed_field(&pack, &cfg), seed_field(&pack, &cfg));
    }

    #[test]
    fn test_labels_cycle_and_colours_fall_back() {
        let mut hints = UiHints::default();
        hints.cluster_colors.insert("a".into(), "#111".into());
        hints.cluster_colors.insert("b".into(), "#222".into());
        let pack = ContentPack {
            theme: "t".into(),
            tokens: vec![
                Token::new("suspect.alice", "b"),
                Token {
                    id: "room.attic".into(),
                    cluster: None,
                    role_hints: Vec::new(),
                },
            ],
            relations: Vec::new(),
            ui_hints: hints,
            prompt_scaffold: Vec::new(),
            boss: None,
        };
        let cfg = SeedConfig {
            field_size: 4,
            anchors: vec![1, 99],
            jitter: 0.0,
        };
        let field = seed_field(&pack, &cfg);
        assert_eq!(field.anchor_indices(), vec![1]);
        assert_eq!(field.get(0).unwrap().label(), field.get(2).unwrap().label());
        assert_eq!(field.get(0).unwrap().color.as_deref(), Some("#222"));
        // no cluster: round-robin over sorted names
        assert_eq!(field.get(1).unwrap().color.as_deref(), Some("#222"));
        assert_eq!(field.get(3).unwrap().color.as_deref(), Some("#222"));
    }

    #[test]
    fn test_even_field() {
        let field = even_field(4, &[0, 2, 7]);
        assert_eq!(field.anchor_indices(), vec![0, 2]);
        assert!((field.get(1).unwrap().angle() - TAU / 4.0).abs() < 1e-12);
    }
}
