//! Property tests for the set algebra and the numeric engines.

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

use markov_rs::ctmc::Ctmc;
use markov_rs::dtmc::Dtmc;
use markov_rs::incidence::IncidenceVector;
use markov_rs::matrix::SquareMatrix;
use markov_rs::set::FiniteOrderedSet;
use markov_rs::stochastic::{derive_generator, validate_stochastic};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    }
}

fn bools(len: usize) -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), len)
}

/// Two boolean vectors of equal length.
fn bool_pair() -> impl Strategy<Value = (Vec<bool>, Vec<bool>)> {
    (0usize..200).prop_flat_map(|n| (bools(n), bools(n)))
}

/// Square matrix with entries in `range`.
fn square(range: std::ops::Range<f64>) -> impl Strategy<Value = SquareMatrix<f64>> {
    (1usize..7).prop_flat_map(move |n| {
        prop::collection::vec(prop::collection::vec(range.clone(), n), n)
            .prop_map(|rows| SquareMatrix::from_rows(rows).unwrap())
    })
}

/// Row-stochastic matrix with strictly positive entries.
fn positive_stochastic() -> impl Strategy<Value = SquareMatrix<f64>> {
    square(0.05..1.0).prop_map(|m| {
        let sums = m.row_sums();
        SquareMatrix::from_fn(m.size(), |i, j| m[(i, j)] / sums[i])
    })
}

/// Rate matrix with a zero diagonal and positive off-diagonal rates.
fn rate_matrix() -> impl Strategy<Value = SquareMatrix<f64>> {
    square(0.1..10.0)
        .prop_filter("at least two states", |m| m.size() >= 2)
        .prop_map(|m| SquareMatrix::from_fn(m.size(), |i, j| if i == j { 0.0 } else { m[(i, j)] }))
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn double_negation((a, _) in bool_pair()) {
        let v = IncidenceVector::from_bools(a);
        prop_assert_eq!(v.not().not(), v);
    }

    #[test]
    fn de_morgan((a, b) in bool_pair()) {
        let a = IncidenceVector::from_bools(a);
        let b = IncidenceVector::from_bools(b);
        prop_assert_eq!(a.and(&b).unwrap().not(), a.not().or(&b.not()).unwrap());
        prop_assert_eq!(a.or(&b).unwrap().not(), a.not().and(&b.not()).unwrap());
    }

    #[test]
    fn conjunction_is_masked((a, b) in bool_pair()) {
        let a = IncidenceVector::from_bools(a);
        let b = IncidenceVector::from_bools(b);
        let both = a.and(&b).unwrap();
        prop_assert!(a.masks(&both).unwrap());
        prop_assert!(b.masks(&both).unwrap());
        prop_assert_eq!(a.count_ones() + b.count_ones(), both.count_ones() + a.or(&b).unwrap().count_ones());
    }

    #[test]
    fn labels_round_trip(bits in (1usize..40).prop_flat_map(bools)) {
        let set = FiniteOrderedSet::from_range("s", bits.len(), 0);
        let v = IncidenceVector::from_bools(bits);
        let labels = set.subset(&v).unwrap();
        prop_assert_eq!(labels.len(), v.count_ones());
        prop_assert_eq!(set.incidence_vector_of(labels.iter()).unwrap(), v);
    }

    #[test]
    fn normalized_rows_are_stochastic(p in positive_stochastic()) {
        prop_assert!(validate_stochastic(&p, 1e-9).is_valid());
        for sum in p.row_sums() {
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn generator_rows_sum_to_zero(r in square(0.0..10.0)) {
        let q = derive_generator(&r);
        for sum in q.row_sums() {
            prop_assert!(sum.abs() < 1e-9, "row sum {}", sum);
        }
        for i in 0..q.size() {
            prop_assert!(q[(i, i)] <= 0.0);
        }
    }

    #[test]
    fn steady_state_is_fixed_point(p in positive_stochastic()) {
        let states = FiniteOrderedSet::from_range("s", p.size(), 0);
        let dtmc = Dtmc::new(states, p).unwrap();
        let pi = dtmc.steady_state().unwrap();

        prop_assert!((pi.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        prop_assert!(pi.iter().all(|&x| x > -1e-12));
        let next = dtmc.transition_matrix().vec_mul(&pi).unwrap();
        for (a, b) in pi.iter().zip(&next) {
            prop_assert!((a - b).abs() < 1e-9, "{:?} != {:?}", pi, next);
        }
    }

    #[test]
    fn transient_distribution_is_distribution(r in rate_matrix(), t in 0.0f64..2.0) {
        let n = r.size();
        let ctmc = Ctmc::new(FiniteOrderedSet::from_range("s", n, 0), r).unwrap();
        let mut initial = vec![0.0; n];
        initial[0] = 1.0;

        let epsilon = 1e-6;
        let pi = ctmc.transient_distribution(&initial, t, epsilon).unwrap();
        let total: f64 = pi.iter().sum();
        prop_assert!(total <= 1.0 + 1e-9 && total >= 1.0 - epsilon - 1e-9, "total = {}", total);
        prop_assert!(pi.iter().all(|&x| x >= 0.0));
    }
}
