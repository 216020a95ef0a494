use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use twinmap::TwinMap;

// Model-based stress: every operation is mirrored against a pair of
// BTreeMaps, and the full invariant set is re-checked periodically.
#[test]
fn randomized_model_stress_matrix() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0xb1_ab_5e_ed);
    let mut map: TwinMap<i32, i32> = TwinMap::new();
    let mut fwd: BTreeMap<i32, i32> = BTreeMap::new();
    let mut rev: BTreeMap<i32, i32> = BTreeMap::new();

    for step in 0..2000 {
        let op = rng.gen_range(0..10);
        if op < 6 {
            let l = rng.gen_range(0..500);
            let r = rng.gen_range(0..500);
            let accepted = !map.insert(l, r).is_end();
            assert_eq!(accepted, !fwd.contains_key(&l) && !rev.contains_key(&r));
            if accepted {
                fwd.insert(l, r);
                rev.insert(r, l);
            }
        } else if op < 8 {
            let l = rng.gen_range(0..500);
            let erased = map.erase_left(&l);
            assert_eq!(erased, fwd.contains_key(&l));
            if erased {
                let r = fwd.remove(&l).unwrap();
                rev.remove(&r);
            }
        } else {
            let r = rng.gen_range(0..500);
            let erased = map.erase_right(&r);
            assert_eq!(erased, rev.contains_key(&r));
            if erased {
                let l = rev.remove(&r).unwrap();
                fwd.remove(&l);
            }
        }

        assert_eq!(map.size(), fwd.len());

        if step % 64 == 0 {
            map.assert_valid().unwrap();

            let got: Vec<(i32, i32)> = map.iter_left().map(|(l, r)| (*l, *r)).collect();
            let want: Vec<(i32, i32)> = fwd.iter().map(|(l, r)| (*l, *r)).collect();
            assert_eq!(got, want);

            let got: Vec<(i32, i32)> = map.iter_right().map(|(r, l)| (*r, *l)).collect();
            let want: Vec<(i32, i32)> = rev.iter().map(|(r, l)| (*r, *l)).collect();
            assert_eq!(got, want);
        }
    }

    map.assert_valid().unwrap();
}

#[test]
fn lookup_agrees_with_model_matrix() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let mut map: TwinMap<i32, i32> = TwinMap::new();
    let mut fwd: BTreeMap<i32, i32> = BTreeMap::new();

    for _ in 0..500 {
        let l = rng.gen_range(0..200);
        let r = 1000 + l;
        if !map.insert(l, r).is_end() {
            fwd.insert(l, r);
        }
    }
    for probe in 0..200 {
        assert_eq!(map.at_left(&probe).ok().copied(), fwd.get(&probe).copied());

        let lb = map.left_at(map.lower_bound_left(&probe)).copied();
        let want = fwd.range(probe..).next().map(|(l, _)| *l);
        assert_eq!(lb, want);

        let ub = map.left_at(map.upper_bound_left(&probe)).copied();
        let want = fwd.range(probe + 1..).next().map(|(l, _)| *l);
        assert_eq!(ub, want);
    }
}

#[test]
fn grow_shrink_cycles_matrix() {
    let mut map: TwinMap<i32, i32> = TwinMap::new();
    for _ in 0..4 {
        for i in 0..200 {
            map.insert(i, i + 10_000);
        }
        assert_eq!(map.size(), 200);
        map.assert_valid().unwrap();

        for i in (0..200).step_by(2) {
            assert!(map.erase_left(&i));
        }
        assert_eq!(map.size(), 100);
        map.assert_valid().unwrap();

        for i in (1..200).step_by(2) {
            assert!(map.erase_right(&(i + 10_000)));
        }
        assert!(map.is_empty());
        map.assert_valid().unwrap();
    }
}
