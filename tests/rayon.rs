#![cfg(feature = "rayon")]

#[macro_use]
extern crate lazy_static;

use chunkdeque::Deque;
use rayon_::iter::{
    IndexedParallelIterator, IntoParallelIterator, IntoParallelRefIterator,
    IntoParallelRefMutIterator, ParallelExtend, ParallelIterator,
};

macro_rules! assert_eq3 {
    ($e1:expr, $e2:expr, $e3:expr) => {{
        assert_eq!($e1, $e2);
        assert_eq!($e1, $e3);
        assert_eq!($e2, $e3);
    }};
}

lazy_static! {
    static ref DQ_EMPTY: Deque<u32> = Deque::new();
    static ref DQ: Deque<u32> = {
        let mut dq = Deque::new();
        dq.push_back(20);
        dq.push_back(10);
        dq.push_back(30);
        dq.push_back(50);
        dq.push_back(60);
        dq.push_back(40);
        dq
    };
    // spans many nodes, with a partly filled node at each end
    static ref DQ_LARGE: Deque<u32> = {
        let mut dq: Deque<u32> = (1000..5000).collect();
        for i in (0..1000).rev() {
            dq.push_front(i);
        }
        dq
    };
}

#[test]
fn deque_seq_par_equivalence_iter_empty() {
    let vec_seq = DQ_EMPTY.iter().collect::<Vec<_>>();
    let vec_par = DQ_EMPTY.par_iter().collect::<Vec<_>>();

    assert_eq3!(vec_seq, vec_par, &[] as &[&u32]);
}

#[test]
fn deque_seq_par_equivalence_iter() {
    let mut vec_seq = DQ.iter().collect::<Vec<_>>();
    let mut vec_par = DQ.par_iter().collect::<Vec<_>>();

    assert_eq!(vec_seq, vec_par);

    let expected_sorted = [&10, &20, &30, &40, &50, &60];

    vec_seq.sort_unstable();
    vec_par.sort_unstable();

    assert_eq3!(vec_seq, vec_par, expected_sorted);
}

#[test]
fn deque_seq_par_equivalence_iter_large() {
    let vec_seq = DQ_LARGE.iter().collect::<Vec<_>>();
    let vec_par = DQ_LARGE.par_iter().collect::<Vec<_>>();

    assert_eq!(vec_seq, vec_par);
    assert_eq!(DQ_LARGE.par_iter().len(), 5000);
    assert_eq!(DQ_LARGE.par_iter().sum::<u32>(), (0..5000).sum());
    assert_eq!(DQ_LARGE.par_iter().skip(1234).take(3).collect::<Vec<_>>(), [&1234, &1235, &1236]);
}

#[test]
fn deque_seq_par_equivalence_iter_mut_empty() {
    let mut dq1 = DQ_EMPTY.clone();
    let mut dq2 = DQ_EMPTY.clone();

    let vec_seq = dq1.iter_mut().collect::<Vec<_>>();
    let vec_par = dq2.par_iter_mut().collect::<Vec<_>>();

    assert_eq3!(vec_seq, vec_par, &[] as &[&u32]);
}

#[test]
fn deque_seq_par_equivalence_iter_mut() {
    let mut dq1 = DQ.clone();
    let mut dq2 = DQ.clone();

    let mut vec_seq = dq1.iter_mut().collect::<Vec<_>>();
    let mut vec_par = dq2.par_iter_mut().collect::<Vec<_>>();

    assert_eq!(vec_seq, vec_par);

    let expected_sorted = [&mut 10, &mut 20, &mut 30, &mut 40, &mut 50, &mut 60];

    vec_seq.sort_unstable();
    vec_par.sort_unstable();

    assert_eq3!(vec_seq, vec_par, expected_sorted);
}

#[test]
fn deque_par_iter_mut_large() {
    let mut dq = DQ_LARGE.clone();
    dq.par_iter_mut().for_each(|v| *v *= 2);
    assert!(dq.iter().copied().eq((0..5000).map(|v| v * 2)));
}

#[test]
fn deque_seq_par_equivalence_into_iter_empty() {
    let vec_seq = DQ_EMPTY.clone().into_iter().collect::<Vec<_>>();
    let vec_par = DQ_EMPTY.clone().into_par_iter().collect::<Vec<_>>();

    assert_eq3!(vec_seq, vec_par, []);
}

#[test]
fn deque_seq_par_equivalence_into_iter() {
    let mut vec_seq = DQ.clone().into_iter().collect::<Vec<_>>();
    let mut vec_par = DQ.clone().into_par_iter().collect::<Vec<_>>();

    assert_eq!(vec_seq, vec_par);

    let expected_sorted = [10, 20, 30, 40, 50, 60];

    vec_seq.sort_unstable();
    vec_par.sort_unstable();

    assert_eq3!(vec_seq, vec_par, expected_sorted);
}

lazy_static! {
    static ref DQ_VEC_EMPTY: Vec<u32> = vec![];
    static ref DQ_VEC: Vec<u32> = vec![20, 10, 30, 50, 60, 40,];
}

#[test]
fn deque_seq_par_equivalence_collect_empty() {
    let dq_expected = DQ_EMPTY.clone();
    let dq_seq = DQ_VEC_EMPTY.clone().into_iter().collect::<Deque<_>>();
    let dq_par = DQ_VEC_EMPTY.clone().into_par_iter().collect::<Deque<_>>();

    assert_eq!(dq_seq, dq_par);
    assert_eq!(dq_seq, dq_expected);
    assert_eq!(dq_par, dq_expected);
}

#[test]
fn deque_seq_par_equivalence_collect() {
    let dq_expected = DQ.clone();
    let dq_seq = DQ_VEC.clone().into_iter().collect::<Deque<_>>();
    let dq_par = DQ_VEC.clone().into_par_iter().collect::<Deque<_>>();

    assert_eq!(dq_seq, dq_par);
    assert_eq!(dq_seq, dq_expected);
    assert_eq!(dq_par, dq_expected);
}

lazy_static! {
    static ref DQ_EXISTING_EMPTY: Deque<u32> = Deque::new();
    static ref DQ_EXISTING: Deque<u32> = {
        let mut dq = Deque::new();
        dq.push_back(20);
        dq.push_back(10);
        dq
    };
    static ref DQ_EXTENSION_EMPTY: Vec<u32> = vec![];
    static ref DQ_EXTENSION: Vec<u32> = vec![30, 50, 60, 40];
}

#[test]
fn deque_seq_par_equivalence_existing_empty_extend_empty() {
    let expected = Deque::new();
    let mut dq_seq = DQ_EXISTING_EMPTY.clone();
    let mut dq_par = DQ_EXISTING_EMPTY.clone();

    dq_seq.extend(DQ_EXTENSION_EMPTY.iter().cloned());
    dq_par.par_extend(DQ_EXTENSION_EMPTY.par_iter().cloned());

    assert_eq3!(dq_seq, dq_par, expected);
}

#[test]
fn deque_seq_par_equivalence_existing_empty_extend() {
    let expected = DQ_EXTENSION.iter().cloned().collect::<Deque<_>>();
    let mut dq_seq = DQ_EXISTING_EMPTY.clone();
    let mut dq_par = DQ_EXISTING_EMPTY.clone();

    dq_seq.extend(DQ_EXTENSION.iter().cloned());
    dq_par.par_extend(DQ_EXTENSION.par_iter().cloned());

    assert_eq3!(dq_seq, dq_par, expected);
}

#[test]
fn deque_seq_par_equivalence_existing_extend_empty() {
    let expected = DQ_EXISTING.clone();
    let mut dq_seq = DQ_EXISTING.clone();
    let mut dq_par = DQ_EXISTING.clone();

    dq_seq.extend(DQ_EXTENSION_EMPTY.iter().cloned());
    dq_par.par_extend(DQ_EXTENSION_EMPTY.par_iter().cloned());

    assert_eq3!(dq_seq, dq_par, expected);
}

#[test]
fn deque_seq_par_equivalence_existing_extend() {
    let expected = DQ.clone();
    let mut dq_seq = DQ_EXISTING.clone();
    let mut dq_par = DQ_EXISTING.clone();

    dq_seq.extend(DQ_EXTENSION.iter().cloned());
    dq_par.par_extend(DQ_EXTENSION.par_iter().cloned());

    assert_eq3!(dq_seq, dq_par, expected);
}

#[test]
fn deque_par_extend_ref() {
    let mut dq = DQ_EXISTING.clone();
    dq.par_extend(DQ_EXTENSION.par_iter());
    assert_eq!(dq, *DQ);
}
