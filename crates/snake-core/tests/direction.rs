use snake_core::{toward_center, Cell, Direction};

#[test]
fn opposite_is_componentwise_negation() {
    for d in Direction::ALL {
        let (dx, dy) = d.delta();
        assert_eq!(d.opposite().delta(), (-dx, -dy));
        assert_eq!(d.opposite().opposite(), d);
    }
}

#[test]
fn from_delta_inverts_delta() {
    for d in Direction::ALL {
        let (dx, dy) = d.delta();
        assert_eq!(Direction::from_delta(dx, dy), Some(d));
    }
    assert_eq!(Direction::from_delta(1, 1), None);
    assert_eq!(Direction::from_delta(0, 0), None);
}

#[test]
fn toward_center_points_inwards_from_each_edge() {
    let (w, h) = (20, 10);
    assert_eq!(toward_center(Cell::new(10, 0), w, h), Direction::Down);
    assert_eq!(toward_center(Cell::new(10, 9), w, h), Direction::Up);
    assert_eq!(toward_center(Cell::new(0, 5), w, h), Direction::Right);
    assert_eq!(toward_center(Cell::new(19, 5), w, h), Direction::Left);
}

#[test]
fn offset_does_not_wrap() {
    assert_eq!(Cell::new(0, 0).offset(Direction::Left), Cell::new(-1, 0));
    assert_eq!(Cell::new(3, 4).offset(Direction::Down), Cell::new(3, 5));
}
