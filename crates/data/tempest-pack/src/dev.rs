//! Built-in development pack.

use crate::bag::{Boss, ContentPack, LayerPrompt, Token, UiHints};

/// The "Mansion Murder" whodunit used for local play and tests.
pub fn dev_pack() -> ContentPack {
    let tokens = vec![
        Token::new("suspect.heiress", "People").with_hint("S"),
        Token::new("suspect.butler", "People").with_hint("S"),
        Token::new("suspect.gardener", "People").with_hint("S"),
        Token::new("victim.curator", "People").with_hint("V"),
        Token::new("victim.magnate", "People").with_hint("V"),
        Token::new("weapon.rope", "Weapons").with_hint("W"),
        Token::new("weapon.poison", "Weapons").with_hint("W"),
        Token::new("weapon.candlestick", "Weapons").with_hint("W"),
        Token::new("room.archives", "Places").with_hint("L"),
        Token::new("room.library", "Places").with_hint("L"),
        Token::new("room.cellar", "Places").with_hint("L"),
        Token::new("evidence.ledger", "Evidence").with_hint("E"),
        Token::new("evidence.footprints", "Evidence").with_hint("E"),
        Token::new("evidence.glove", "Evidence").with_hint("E"),
        Token::new("motive.inheritance", "Evidence").with_hint("E"),
        Token::new("motive.jealousy", "Evidence").with_hint("E"),
        Token::new("verb.strangle", "Actions").with_hint("A"),
        Token::new("verb.poison", "Actions").with_hint("A"),
        Token::new("connective.because", "Connective"),
        Token::new("connective.after", "Connective"),
        Token::new("noise.thunderstorm", "Noise"),
        Token::new("noise.cat", "Noise"),
        Token::new("noise.rumor", "Noise"),
        Token::new("noise.carnival_flyer", "Noise"),
    ];

    let prompts = [
        "Who did what to whom?",
        "Where did it occur?",
        "What was the weapon?",
        "What evidence supports your theory?",
        "Whose alibi fails?",
        "Resolve contradictions.",
        "Order key events.",
        "What was the motive?",
        "State the full theory.",
        "Who killed whom, where, with what, and why?",
    ];

    let mut ui_hints = UiHints::default();
    for (cluster, color) in [
        ("People", "#22d3ee"),
        ("Weapons", "#f472b6"),
        ("Places", "#a78bfa"),
        ("Evidence", "#10b981"),
        ("Noise", "#64748b"),
    ] {
        ui_hints
            .cluster_colors
            .insert(cluster.to_string(), color.to_string());
    }

    ContentPack {
        theme: "Mansion Murder".to_string(),
        tokens,
        relations: Vec::new(),
        ui_hints,
        prompt_scaffold: prompts
            .iter()
            .enumerate()
            .map(|(i, text)| LayerPrompt {
                layer: i + 1,
                text: text.to_string(),
            })
            .collect(),
        boss: Some(Boss {
            prompt: "Based on the clusters and relationships you've built, who committed the \
                     crime, where did it happen, and what weapon or method was used? Justify \
                     your answer using the strongest cosine similarities and cluster patterns."
                .to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_pack_shape() {
        let pack = dev_pack();
        assert_eq!(pack.tokens.len(), 24);
        assert_eq!(pack.prompt_scaffold.len(), 10);
        assert_eq!(pack.prompt_for_layer(3), Some("What was the weapon?"));
        assert_eq!(pack.clusters().len(), 5);
        assert!(pack.boss.is_some());
    }

    #[test]
    fn test_dev_pack_json_roundtrip() {
        let pack = dev_pack();
        let json = pack.to_json().unwrap();
        let back = ContentPack::from_json(&json).unwrap();
        assert_eq!(back, pack);
    }
}
