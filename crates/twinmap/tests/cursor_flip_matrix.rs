use twinmap::TwinMap;

#[test]
fn flip_is_an_involution() {
    let map: TwinMap<i32, i32> = [(1, 10), (2, 20), (3, 30)].into_iter().collect();

    let mut cur = map.begin_left();
    while !cur.is_end() {
        assert_eq!(cur.flip().flip(), cur);
        cur = map.next_left(cur);
    }

    let mut cur = map.begin_right();
    while !cur.is_end() {
        assert_eq!(cur.flip().flip(), cur);
        cur = map.next_right(cur);
    }
}

#[test]
fn end_cursors_flip_to_each_other() {
    let map: TwinMap<i32, i32> = TwinMap::new();
    assert_eq!(map.end_left().flip(), map.end_right());
    assert_eq!(map.end_right().flip(), map.end_left());

    // Bound-query misses land on the same end markers.
    assert_eq!(map.find_left(&1), map.end_left());
    assert_eq!(map.find_left(&1).flip(), map.end_right());
}

#[test]
fn flip_reaches_the_same_pair() {
    let map: TwinMap<i32, String> = [(1, "uno"), (2, "dos"), (3, "tres")]
        .into_iter()
        .map(|(l, r)| (l, r.to_string()))
        .collect();

    let mut cur = map.begin_left();
    while !cur.is_end() {
        let (l, r) = map.pair_at_left(cur).unwrap();
        let flipped = cur.flip();
        let (fr, fl) = map.pair_at_right(flipped).unwrap();
        assert_eq!(l, fl);
        assert_eq!(r, fr);
        cur = map.next_left(cur);
    }
}

#[test]
fn flipped_walks_agree() {
    let map: TwinMap<i32, i32> = (0..50).map(|i| (i, (i * 37) % 1000)).collect();

    // Walking the left view and flipping at each step must visit exactly
    // the pairs the right view owns, and vice versa.
    let mut via_flip: Vec<i32> = Vec::new();
    let mut cur = map.begin_left();
    while !cur.is_end() {
        via_flip.push(*map.right_at(cur.flip()).unwrap());
        cur = map.next_left(cur);
    }
    let mut direct: Vec<i32> = map.iter_right().map(|(r, _)| *r).collect();
    via_flip.sort_unstable();
    direct.sort_unstable();
    assert_eq!(via_flip, direct);
}

#[test]
fn cursors_survive_unrelated_mutation() {
    let mut map: TwinMap<i32, i32> = [(10, -10), (20, -20), (30, -30)].into_iter().collect();

    let cur = map.find_left(&20);
    map.insert(15, -15);
    map.insert(25, -25);
    map.erase_left(&10);
    map.erase_right(&-30);

    assert_eq!(map.pair_at_left(cur), Some((&20, &-20)));
    assert_eq!(map.right_at(cur.flip()), Some(&-20));

    // Stepping still follows the current ordering.
    assert_eq!(map.left_at(map.next_left(cur)), Some(&25));
    assert_eq!(map.left_at(map.prev_left(cur)), Some(&15));
}
