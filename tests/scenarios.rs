//! End-to-end scenarios over the public API of markov-rs.

use test_log::test;

use markov_rs::bound::{Comparison, ProbabilityBound};
use markov_rs::ctmc::Ctmc;
use markov_rs::dtmc::Dtmc;
use markov_rs::error::{Error, ErrorKind};
use markov_rs::formula::StateFormula;
use markov_rs::incidence::IncidenceVector;
use markov_rs::kripke::{KripkeStructure, LabelingMatrix};
use markov_rs::matrix::SquareMatrix;
use markov_rs::poisson;
use markov_rs::set::{FiniteOrderedSet, StateRef};

fn iv<const N: usize>(bits: [u8; N]) -> IncidenceVector {
    IncidenceVector::from_bits(bits)
}

fn assert_close(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < tolerance, "{:?} != {:?}", actual, expected);
    }
}

// ─── Finite Ordered Set ─────────────────────────────────────────────────────

#[test]
fn set_is_sorted_and_deduplicated() {
    let mut set = FiniteOrderedSet::new(["b", "a", "b", "c"]);
    assert_eq!(set.labels(), &["a", "b", "c"]);

    assert!(set.insert("aa"));
    assert!(!set.insert("a"));
    assert_eq!(set.labels(), &["a", "aa", "b", "c"]);

    assert!(set.remove("b"));
    assert!(!set.remove("b"));
    assert_eq!(set.to_string(), "{a, aa, c}");
}

#[test]
fn set_label_vector_conversion() {
    let set = FiniteOrderedSet::new(["x", "y", "z"]);
    let v = set.incidence_vector_of(["z", "x"]).unwrap();
    assert_eq!(v, iv([1, 0, 1]));
    assert_eq!(set.subset(&v).unwrap().labels(), &["x", "z"]);

    assert_eq!(set.index_of("w"), Err(Error::LabelNotFound("w".to_string())));
    assert_eq!(set.get(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
    assert_eq!(set.index_of("w").unwrap_err().kind(), ErrorKind::Lookup);
}

#[test]
fn set_resolves_state_refs() {
    let set = FiniteOrderedSet::from_range("s", 4, 0);
    assert_eq!(set.resolve(&StateRef::Index(2)).unwrap(), iv([0, 0, 1, 0]));
    assert_eq!(set.resolve(&StateRef::from("s1")).unwrap(), iv([0, 1, 0, 0]));
    assert_eq!(set.resolve(&StateRef::from(iv([1, 0, 0, 1]))).unwrap(), iv([1, 0, 0, 1]));
    assert_eq!(
        set.resolve(&StateRef::from(iv([1, 0]))),
        Err(Error::IncompatibleDimension { expected: 4, found: 2 })
    );
}

// ─── DTMC: Bounded Until ────────────────────────────────────────────────────

fn absorbing_pair() -> Dtmc {
    let states = FiniteOrderedSet::new(["s1", "s2", "s3", "s4"]);
    let p = SquareMatrix::from_rows(vec![
        vec![0.0, 2.0 / 3.0, 1.0 / 3.0, 0.0],
        vec![0.5, 0.0, 0.25, 0.25],
        vec![0.0, 0.0, 1.0, 0.0],
        vec![0.0, 0.0, 0.0, 1.0],
    ])
    .unwrap();
    Dtmc::new(states, p).unwrap()
}

#[test]
fn bounded_until_three_steps() {
    let dtmc = absorbing_pair();
    let phi = iv([1, 1, 0, 0]);
    let psi = iv([0, 0, 1, 1]);

    let probabilities = dtmc.bounded_until_probabilities(&phi, &psi, 3).unwrap();
    assert_close(&probabilities, &[7.0 / 9.0, 5.0 / 6.0, 1.0, 1.0], 1e-9);

    let bound = ProbabilityBound::new(Comparison::GreaterOrEqual, 0.4).unwrap();
    assert_eq!(dtmc.bounded_until(&phi, &psi, 3, bound).unwrap(), iv([1, 1, 1, 1]));
}

#[test]
fn bounded_until_is_monotone_in_steps() {
    let dtmc = absorbing_pair();
    let phi = iv([1, 1, 0, 0]);
    let psi = iv([0, 0, 1, 1]);

    let mut previous = dtmc.bounded_until_probabilities(&phi, &psi, 0).unwrap();
    for k in 1..8 {
        let current = dtmc.bounded_until_probabilities(&phi, &psi, k).unwrap();
        for (before, after) in previous.iter().zip(&current) {
            assert!(after + 1e-12 >= *before, "k = {}: {:?} -> {:?}", k, previous, current);
        }
        previous = current;
    }
}

#[test]
fn bounded_until_operator_from_str() {
    let dtmc = absorbing_pair();
    let phi = iv([1, 1, 0, 0]);
    let psi = iv([0, 0, 1, 1]);

    let cmp: Comparison = "<".parse().unwrap();
    let bound = ProbabilityBound::new(cmp, 0.8).unwrap();
    assert_eq!(dtmc.bounded_until(&phi, &psi, 3, bound).unwrap(), iv([1, 0, 0, 0]));

    let err = "=<".parse::<Comparison>().unwrap_err();
    assert_eq!(err, Error::UnknownComparison("=<".to_string()));
}

// ─── DTMC: Unbounded Until ──────────────────────────────────────────────────

#[test]
fn unbounded_until_textbook() {
    let states = FiniteOrderedSet::from_range("s", 6, 0);
    let p = SquareMatrix::from_rows(vec![
        vec![0.0, 0.1, 0.9, 0.0, 0.0, 0.0],
        vec![0.4, 0.0, 0.6, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.1, 0.1, 0.5, 0.3],
        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.7, 0.3],
    ])
    .unwrap();
    let dtmc = Dtmc::new(states, p).unwrap();
    let phi = dtmc.states().incidence_vector_of(["s0", "s2", "s4", "s5"]).unwrap();
    let psi = dtmc.states().incidence_vector_of(["s4", "s5"]).unwrap();

    let bound = ProbabilityBound::new(Comparison::GreaterOrEqual, 0.85).unwrap();
    let sat = dtmc.unbounded_until(&phi, &psi, bound).unwrap();
    assert_eq!(dtmc.states().subset(&sat).unwrap().labels(), &["s2", "s4", "s5"]);
}

#[test]
fn unbounded_until_with_cycle() {
    let states = FiniteOrderedSet::new(["s0", "s1", "s2", "s3"]);
    let p = SquareMatrix::from_rows(vec![
        vec![0.5, 0.0, 0.5, 0.0],
        vec![0.8, 0.1, 0.0, 0.1],
        vec![0.0, 0.25, 0.75, 0.0],
        vec![0.0, 1.0, 0.0, 0.0],
    ])
    .unwrap();
    let dtmc = Dtmc::new(states, p).unwrap();
    let phi = iv([0, 1, 0, 0]);
    let psi = iv([1, 0, 0, 0]);

    let (s_no, s_yes) = dtmc.until_precomputation(&phi, &psi).unwrap();
    assert_eq!(s_no, iv([0, 0, 1, 1]));
    assert_eq!(s_yes, iv([1, 0, 0, 0]));

    let bound = ProbabilityBound::new(Comparison::Less, 0.9).unwrap();
    assert_eq!(dtmc.unbounded_until(&phi, &psi, bound).unwrap(), iv([0, 1, 1, 1]));
}

#[test]
fn absorbing_pair_has_no_unique_steady_state() {
    let err = absorbing_pair().steady_state().unwrap_err();
    assert_eq!(err, Error::NoUniqueSteadyState);
    assert!(err.is_algorithmic());
}

// ─── CTMC: Uniformization ───────────────────────────────────────────────────

fn two_state() -> Ctmc {
    let states = FiniteOrderedSet::new(["S0", "S1"]);
    let r = SquareMatrix::from_rows(vec![vec![0.0, 3.0], vec![2.0, 0.0]]).unwrap();
    Ctmc::new(states, r).unwrap()
}

#[test]
fn uniformization_two_state() {
    let ctmc = two_state();
    assert_eq!(ctmc.uniformization_rate().unwrap(), 3.0);

    let k = poisson::truncation_point(3.0, 1.0, 1e-4, 1000).unwrap();
    assert_eq!(k, 11);
    let tail = |n: usize| 1.0 - poisson::weights(3.0, 1.0, n).unwrap().iter().sum::<f64>();
    assert!(tail(k) <= 1e-4);
    assert!(tail(k - 1) > 1e-4);

    let pi = ctmc.transient_distribution(&[1.0, 0.0], 1.0, 1e-4).unwrap();
    assert_close(&pi, &[0.404014, 0.595915], 1e-6);
}

#[test]
fn transient_distribution_converges_to_steady_state() {
    let ctmc = two_state();
    let steady = ctmc.steady_state().unwrap();
    assert_close(&steady, &[0.4, 0.6], 1e-9);

    let pi = ctmc.transient_distribution(&[0.0, 1.0], 10.0, 1e-9).unwrap();
    assert_close(&pi, &steady, 1e-6);
}

#[test]
fn unattainable_precision_is_algorithmic() {
    let ctmc = two_state();
    let config = markov_rs::config::AnalysisConfig::default().with_max_iterations(3);
    let err = ctmc
        .transient_distribution_with_config(&[1.0, 0.0], 1.0, 1e-4, &config)
        .unwrap_err();
    assert_eq!(err, Error::PrecisionUnattainable { epsilon: 1e-4, iterations: 3 });
    assert!(err.is_algorithmic());
}

// ─── CTMC: Embedded DTMC ────────────────────────────────────────────────────

#[test]
fn embedded_dtmc() {
    let states = FiniteOrderedSet::new(["0", "1", "2", "3"]);
    let r = SquareMatrix::from_rows(vec![
        vec![0.0, 2.0, 2.0, 0.0],
        vec![2.0, 0.0, 0.0, 0.0],
        vec![2.0, 2.0, 0.0, 2.0],
        vec![0.0, 2.0, 0.0, 0.0],
    ])
    .unwrap();
    let ctmc = Ctmc::new(states, r).unwrap();
    let dtmc = ctmc.embedded_dtmc().unwrap();

    let expected = [
        [0.0, 0.5, 0.5, 0.0],
        [1.0, 0.0, 0.0, 0.0],
        [1.0 / 3.0, 1.0 / 3.0, 0.0, 1.0 / 3.0],
        [0.0, 1.0, 0.0, 0.0],
    ];
    for (i, row) in expected.iter().enumerate() {
        assert_close(dtmc.transition_matrix().row(i), row, 1e-9);
    }
    assert!(dtmc.validate().is_valid());
    assert_eq!(dtmc.states(), ctmc.states());
}

#[test]
fn embedded_dtmc_reports_absorbing_states() {
    let states = FiniteOrderedSet::new(["a", "b", "c"]);
    let r = SquareMatrix::from_rows(vec![vec![0.0, 1.0, 1.0], vec![0.0; 3], vec![0.0; 3]]).unwrap();
    let ctmc = Ctmc::new(states, r).unwrap();
    assert_eq!(
        ctmc.embedded_dtmc().unwrap_err(),
        Error::UndefinedEmbedding {
            states: vec!["b".to_string(), "c".to_string()]
        }
    );
}

// ─── Kripke Structures ──────────────────────────────────────────────────────

fn kripke() -> KripkeStructure {
    let states = FiniteOrderedSet::from_range("s", 5, 0);
    let t = SquareMatrix::from_rows(vec![
        vec![false, true, false, false, false],
        vec![false, false, true, true, false],
        vec![false, false, false, false, true],
        vec![false, true, true, true, false],
        vec![false, false, false, false, true],
    ])
    .unwrap();
    let atoms = FiniteOrderedSet::from_range("a", 4, 0);
    let l = LabelingMatrix::from_bits(
        5,
        [
            [1, 1, 1, 1, 0],
            [1, 1, 1, 0, 1],
            [0, 1, 1, 1, 0],
            [0, 0, 0, 0, 0],
        ],
    )
    .unwrap();
    KripkeStructure::new(states, iv([1, 0, 0, 0, 0]), t, atoms, l).unwrap()
}

#[test]
fn kripke_satisfaction_sets() {
    let m = kripke();
    let a = StateFormula::atom;

    assert_eq!(m.sat(&a("a0"), None).unwrap(), iv([1, 1, 1, 1, 0]));
    assert_eq!(m.sat(&a("a3"), None).unwrap(), iv([0, 0, 0, 0, 0]));
    assert_eq!(m.sat(&a("a1").and(a("a2")), None).unwrap(), iv([0, 1, 1, 0, 0]));
    assert_eq!(m.sat(&a("a0").not(), None).unwrap(), iv([0, 0, 0, 0, 1]));
    assert_eq!(m.sat(&a("a2").or(a("a3")), None).unwrap(), iv([0, 1, 1, 1, 0]));
}

#[test]
fn kripke_scope_is_over_full_state_set() {
    let m = kripke();
    let scope = StateRef::from(iv([0, 0, 1, 1, 1]));

    assert_eq!(m.sat(&StateFormula::tt(), None).unwrap(), IncidenceVector::ones(5));
    assert_eq!(m.sat(&StateFormula::tt(), Some(&scope)).unwrap(), iv([0, 0, 1, 1, 1]));
    let sat = m.sat(&StateFormula::atom("a0").not(), Some(&scope)).unwrap();
    assert_eq!(sat, iv([0, 0, 0, 0, 1]));
    assert_eq!(sat.len(), 5);
}

#[test]
fn kripke_paths_and_queries() {
    let m = kripke();

    assert_eq!(m.successors(&StateRef::from("s3")).unwrap(), iv([0, 1, 1, 1, 0]));
    assert_eq!(m.path_set(&StateRef::from("s0")).unwrap(), IncidenceVector::ones(5));
    assert_eq!(m.path_set(&StateRef::from("s2")).unwrap(), iv([0, 0, 1, 0, 1]));
    assert_eq!(m.path_set(&StateRef::Index(4)).unwrap(), iv([0, 0, 0, 0, 1]));

    assert!(m.holds(&StateFormula::atom("a0"), &StateRef::from(iv([1, 1, 0, 0, 0]))).unwrap());
    assert!(!m.holds(&StateFormula::atom("a2"), &StateRef::from(iv([1, 1, 0, 0, 0]))).unwrap());
    assert!(m.holds_initially(&StateFormula::atom("a1")).unwrap());
    assert!(!m.holds_initially(&StateFormula::atom("a2")).unwrap());
}

#[test]
fn labeled_transition_system() {
    let states = FiniteOrderedSet::new(["Apple", "Banana", "Fox"]);
    let atoms = FiniteOrderedSet::new(["Animal", "Vegetal"]);
    let t = SquareMatrix::from_rows(vec![
        vec![false, true, false],
        vec![false, true, false],
        vec![true, false, false],
    ])
    .unwrap();
    let l = LabelingMatrix::from_bits(3, [[0, 0, 1], [1, 1, 0]]).unwrap();
    let lts = KripkeStructure::new(states, iv([0, 0, 1]), t, atoms, l).unwrap();

    assert_eq!(lts.labels_of(&StateRef::from("Fox")).unwrap(), iv([1, 0]));
    assert_eq!(lts.labels_of(&StateRef::from("Banana")).unwrap(), iv([0, 1]));
    assert_eq!(lts.states_with_label("Vegetal").unwrap(), iv([1, 1, 0]));

    let vegetal = StateFormula::atom("Vegetal");
    let animal = StateFormula::atom("Animal");
    assert_eq!(lts.sat(&animal.clone().not(), None).unwrap(), iv([1, 1, 0]));
    assert_eq!(lts.sat(&animal.clone().implies(vegetal.clone()), None).unwrap(), iv([1, 1, 0]));
    assert!(lts.holds_initially(&animal).unwrap());
    assert!(!lts.holds_initially(&vegetal).unwrap());
    assert_eq!(lts.path_set(&StateRef::from("Fox")).unwrap(), iv([1, 1, 1]));
    assert_eq!(lts.states_with_label("Mineral"), Err(Error::LabelNotFound("Mineral".to_string())));
}
