use bbox::{prelude::*, XYWH_, XYWH};

fn faces(raw: &[[i32; 4]]) -> Vec<XYWH<i32>> {
    raw.iter()
        .map(|&[x, y, w, h]| XYWH::try_from(XYWH_ { x, y, w, h }).unwrap())
        .collect()
}

#[test]
fn duplicated_faces_test() {
    let candidates = faces(&[[0, 0, 100, 100], [10, 10, 100, 100], [500, 500, 50, 50]]);
    let suppressor = OverlapSuppressor::new(0.3).unwrap();

    let accepted = suppressor.suppress(candidates.clone());
    assert_eq!(accepted, vec![candidates[0], candidates[2]]);
    assert_eq!(suppressor.suppress(accepted.clone()), accepted);
}

#[test]
fn nested_face_test() {
    // a small box inside a large one is fully redundant
    let candidates = faces(&[[100, 100, 40, 40], [80, 80, 200, 200]]);

    let accepted = suppress_overlapping(candidates.clone(), 0.3);
    assert_eq!(accepted, vec![candidates[0]]);
}

#[test]
fn malformed_face_test() {
    assert!(XYWH::try_from(XYWH_ {
        x: 0,
        y: 0,
        w: -3,
        h: 4
    })
    .is_err());
}
