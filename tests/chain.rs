use comm_drill::pairs::{self, validate_chain_pair};
use comm_drill::scheme::Scheme;
use comm_drill::{chain, presets};

/// Block-spacing checks shared by every scenario: consecutive letters never
/// share a block, the loop closes, and nothing at or before the buffer block
/// ever appears.
fn check_chain(scheme_text: &str, buffer: char, letters: &[char]) {
    let scheme = Scheme::parse(scheme_text).unwrap();
    let buffer_index = scheme.buffer_block_index(buffer).unwrap();
    let block_of = |letter: char| scheme.letter_ref(letter).unwrap().block;

    for window in letters.windows(2) {
        assert_ne!(block_of(window[0]), block_of(window[1]));
    }
    if letters.len() > 1 {
        assert_ne!(block_of(letters[0]), block_of(letters[letters.len() - 1]));
    }
    for &letter in letters {
        assert_ne!(letter, buffer);
        assert!(block_of(letter) > buffer_index);
    }
}

#[test_log::test]
fn flat_wing_chains_space_their_singleton_blocks() {
    let preset = presets::WINGS;
    for seed in [1, 8, 99] {
        let mut rng = fastrand::Rng::with_seed(seed);
        let letters =
            chain::generate_piece_letters(6, preset.scheme, preset.buffer, 2000, &mut rng).unwrap();
        assert_eq!(letters.len(), 6);
        check_chain(preset.scheme, preset.buffer, &letters);
    }
}

#[test_log::test]
fn edge_chains_span_multiple_passes() {
    // 11 usable blocks of 2 letters each, so 24 letters forces a second full
    // pass and exercises the seam rotation.
    let preset = presets::EDGES;
    for seed in [2, 17, 321] {
        let mut rng = fastrand::Rng::with_seed(seed);
        let letters =
            chain::generate_piece_letters(24, preset.scheme, preset.buffer, 2000, &mut rng)
                .unwrap();
        assert_eq!(letters.len(), 24);
        check_chain(preset.scheme, preset.buffer, &letters);
    }
}

#[test_log::test]
fn mixed_block_lengths_are_fine_for_chains() {
    let scheme_text = "AB CDE FG HI";
    for seed in [3, 27] {
        let mut rng = fastrand::Rng::with_seed(seed);
        let letters = chain::generate_piece_letters(7, scheme_text, 'A', 5000, &mut rng).unwrap();
        assert_eq!(letters.len(), 7);
        check_chain(scheme_text, 'A', &letters);
    }
}

#[test_log::test]
fn required_pairs_are_injected_after_generation() {
    let preset = presets::EDGES;
    let scheme = Scheme::parse(preset.scheme).unwrap();
    let pair = ('O', 'E');
    validate_chain_pair(&scheme, preset.buffer, pair).unwrap();

    for seed in [4, 55, 678] {
        let mut rng = fastrand::Rng::with_seed(seed);
        let letters =
            chain::generate_piece_letters(8, preset.scheme, preset.buffer, 2000, &mut rng).unwrap();
        let adjusted = pairs::ensure_pair(letters.clone(), pair);

        assert_eq!(adjusted.len(), letters.len());
        assert_eq!(adjusted[0], 'O');
        assert_eq!(adjusted[1], 'E');
        // Injection never invents letters.
        for &letter in &adjusted {
            assert!(scheme.letter_ref(letter).is_some());
            assert_ne!(letter, preset.buffer);
        }
    }
}
