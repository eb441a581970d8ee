// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text folding across the inputs people actually type into a report form.

use claimcheck::text::{is_normalized, normalize};

#[test]
fn test_folding_table() {
    let cases = [
        ("café", "cafe"),
        ("São Paulo", "sao paulo"),
        ("iPhone", "iphone"),
        ("olá, mundo!", "ola mundo"),
        ("Câmera Canon EOS-80D", "camera canon eos80d"),
        ("Guarda-chuva   preto\t(grande)", "guardachuva preto grande"),
        ("Carteira c/ documentos", "carteira c documentos"),
        ("R$ 100,00", "r 10000"),
        ("naïve résumé", "naive resume"),
        ("ÇÃÕ", "cao"),
    ];
    for (input, expected) in cases {
        assert_eq!(normalize(input), expected, "normalize({input:?})");
    }
}

#[test]
fn test_output_is_always_normalized() {
    for input in ["", " ", "Ünïcödé  wörds!", "tab\tsep", "東京 タワー", "🎒 mochila"] {
        let once = normalize(input);
        assert!(is_normalized(&once), "{input:?} -> {once:?}");
        assert!(!once.starts_with(' ') && !once.ends_with(' '));
        assert!(!once.contains("  "));
    }
}

#[test]
fn test_precomposed_and_decomposed_agree() {
    // U+00E9 vs 'e' + U+0301
    assert_eq!(normalize("caf\u{e9}"), normalize("cafe\u{301}"));
}

#[test]
fn test_symbols_between_words_join_them() {
    assert_eq!(normalize("usb-c"), "usbc");
    assert_eq!(normalize("usb - c"), "usb c");
}

#[test]
fn test_other_whitespace_collapses() {
    assert_eq!(normalize("a\u{a0}b\u{2003}c\n\nd"), "a b c d");
}
