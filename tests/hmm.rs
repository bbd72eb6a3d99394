//!
//! test of linear hmm
//!
#[macro_use]
extern crate approx;

use seqlearn::prelude::*;
use test_case::test_case;

fn dna_features(order: usize) -> WordFeatures {
    let seqs = [
        "ACGTACGTAA",
        "ACGTACGTCC",
        "ACGAACGTAA",
        "TCGTACGAAA",
        "ACGTTCGTAG",
        "GCGTACGTAT",
    ];
    WordFeatures::from_sequences(&seqs, &Alphabet::dna(), order).unwrap()
}

#[test_case(1 ; "order 1")]
#[test_case(2 ; "order 2")]
#[test_case(3 ; "order 3")]
fn linear_hmm_spans_are_distributions(order: usize) {
    let f = dna_features(order);
    let mut hmm = LinearHMM::from_features(&f);
    hmm.train(0.1).unwrap();
    assert_eq!(hmm.sequence_length(), 10 - order + 1);
    assert_eq!(hmm.num_params(), hmm.sequence_length() * hmm.num_symbols());
    for pos in 0..hmm.sequence_length() {
        let row = hmm.positional_probs(pos).unwrap();
        for start in (0..hmm.num_symbols()).step_by(4) {
            let s: f64 = row[start..start + 4].iter().sum();
            assert_abs_diff_eq!(s, 1.0, epsilon = 1e-12);
        }
    }
    for (p, lp) in hmm.hist().unwrap().iter().zip(hmm.log_hist().unwrap()) {
        assert!(*p > 0.0);
        assert_eq!(*lp, p.ln());
    }
}

#[test]
fn linear_hmm_training_sequences_are_likely() {
    let f = dna_features(1);
    let mut hmm = LinearHMM::from_features(&f);
    hmm.train(0.01).unwrap();
    let lls = hmm.log_likelihoods().unwrap();
    let unseen = Alphabet::dna().encode_seq(b"TTTTTTTTTT").unwrap();
    let ll_unseen = hmm.log_likelihood(&unseen).unwrap();
    for ll in lls.iter() {
        assert!(*ll > ll_unseen);
    }
    // the consensus has the highest likelihood
    let consensus = Alphabet::dna().encode_seq(b"ACGTACGTAA").unwrap();
    let ll_consensus = hmm.log_likelihood(&consensus).unwrap();
    assert!(lls.iter().all(|&ll| ll <= ll_consensus));
    assert_abs_diff_eq!(
        hmm.likelihood(&consensus).unwrap().ln(),
        ll_consensus,
        epsilon = 1e-10
    );
}

#[test]
fn linear_hmm_subset_matches_subset_features() {
    // training on a subset of indices equals training on the subset itself
    let f = dna_features(2);
    let mut hmm = LinearHMM::from_features(&f);
    hmm.train_on(&[0, 2, 4], 0.5).unwrap();

    let sub = WordFeatures::from_sequences(
        &["ACGTACGTAA", "ACGAACGTAA", "ACGTTCGTAG"],
        &Alphabet::dna(),
        2,
    )
    .unwrap();
    let mut hmm_sub = LinearHMM::from_features(&sub);
    hmm_sub.train_with(&LinearHMMParams::new(0.5), None).unwrap();
    assert_eq!(hmm.hist(), hmm_sub.hist());

    assert!(matches!(
        hmm.train_with(&LinearHMMParams::default(), Some(&[6][..])),
        Err(Error::IndexOutOfRange { index: 6, len: 6 })
    ));
    assert_eq!(hmm.hist(), hmm_sub.hist());
}

#[test]
fn linear_hmm_model_file_round_trip() {
    let f = dna_features(3);
    let mut hmm = LinearHMM::from_features(&f);
    hmm.train(0.2).unwrap();
    let mut model = hmm.to_model().unwrap();
    model.order = 3;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    model.to_file(&path).unwrap();

    let loaded = LinearHMMModel::from_file(&path).unwrap();
    assert_eq!(loaded.order, 3);
    let mut hmm2 = LinearHMM::from_model(&loaded).unwrap();
    hmm2.set_features(&f).unwrap();
    for i in 0..f.get_num_vectors() {
        assert_abs_diff_eq!(
            hmm.log_likelihood_example(i).unwrap(),
            hmm2.log_likelihood_example(i).unwrap(),
            epsilon = 1e-10
        );
    }
}
