use cgmath::{InnerSpace, Vector3};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use strum::IntoEnumIterator;

use crate::*;

fn generated(size: u32) -> Cube {
    let mut cube = Cube::new();
    cube.generate(size, "Cubie");
    cube
}

fn turn(cube: &mut Cube, mv: Move) {
    let mut pivot = Pivot::group(cube, mv);
    pivot.set_rotation(cube, mv.axis().vector() * QUARTER_TURN_DEGREES);
    pivot.ungroup(cube);
}

fn assert_near(expected: Vector3<f32>, actual: Vector3<f32>) {
    assert!(
        (expected - actual).magnitude() < EPSILON,
        "expected {expected:?}, got {actual:?}",
    );
}

#[test]
fn test_shell_count_and_bounds() {
    for size in 2..=7 {
        let cube = generated(size);
        assert_eq!(Cube::shell_count(size), cube.cubie_count());
        assert_eq!(size, cube.generated_size());

        let half_extent = 0.5 - 0.5 / size as f32;
        for (_, cubie) in cube.cubies() {
            assert_eq!(1.0 / size as f32, cubie.scale);
            assert_eq!("Cubie", cubie.template);
            for i in 0..3 {
                assert!(cubie.position[i].abs() <= half_extent + EPSILON);
            }
            // On the shell: at least one coordinate touches a face.
            assert!((0..3).any(|i| (cubie.position[i].abs() - half_extent).abs() < EPSILON));
        }
        assert!(cube.is_solved(EPSILON));
    }

    assert_eq!(8, Cube::shell_count(2));
    assert_eq!(26, Cube::shell_count(3));
    assert_eq!(56, Cube::shell_count(4));
}

#[test]
fn test_generate_clamps_size() {
    for size in [0, 1, 2] {
        let cube = generated(size);
        assert_eq!(MIN_SIZE, cube.generated_size());
        assert_eq!(8, cube.cubie_count());
    }
}

#[test]
fn test_generate_replaces_cubies_and_log() {
    let mut cube = generated(4);
    turn(&mut cube, Move::new(Axis::PosY, 2));
    cube.log_mut().push(Move::new(Axis::PosY, 2));

    cube.generate(3, "Other");
    assert_eq!(26, cube.cubie_count());
    assert!(cube.log().is_empty());
    assert!(cube.is_solved(EPSILON));
    assert!(cube.cubies().all(|(_, c)| c.template == "Other"));
}

#[test]
fn test_clear_is_idempotent() {
    let mut cube = generated(3);
    cube.log_mut().push(Move::new(Axis::NegZ, 0));
    cube.clear();
    assert_eq!(0, cube.cubie_count());
    cube.clear();
    assert_eq!(0, cube.cubie_count());
    assert_eq!(3, cube.generated_size());
    assert_eq!(1, cube.log().len());
}

#[test]
fn test_layer_grouping() {
    let mut cube = generated(3);

    // The middle slab has no cubie at the very center.
    let pivot = Pivot::group(&mut cube, Move::new(Axis::PosX, 1));
    assert_eq!(8, pivot.len());
    assert_near(Vector3::new(0.0, 0.0, 0.0), pivot.offset());
    assert_eq!(8, cube.grouped_cubies().count());
    for id in pivot.members() {
        assert!(cube.cubie(id).unwrap().position.x.abs() < EPSILON);
    }
    pivot.ungroup(&mut cube);
    assert_eq!(0, cube.grouped_cubies().count());

    let pivot = Pivot::group(&mut cube, Move::new(Axis::NegZ, 2));
    assert_eq!(9, pivot.len());
    assert_near(Vector3::new(0.0, 0.0, 1.0 / 3.0), pivot.offset());
    pivot.ungroup(&mut cube);

    let mut cube = generated(4);
    let pivot = Pivot::group(&mut cube, Move::new(Axis::PosY, 1));
    assert_eq!(12, pivot.len());
    assert_near(Vector3::new(0.0, -0.125, 0.0), pivot.offset());
}

#[test]
fn test_quarter_turn_direction() {
    let mut cube = generated(3);
    let third = 1.0 / 3.0;
    let corner = cube
        .cubies()
        .find(|(_, c)| (c.position - Vector3::new(-third, -third, -third)).magnitude() < EPSILON)
        .map(|(id, _)| id)
        .unwrap();

    // Counterclockwise around +X: Y goes to Z.
    turn(&mut cube, Move::new(Axis::PosX, 0));
    assert_near(
        Vector3::new(-third, third, -third),
        cube.cubie(corner).unwrap().position,
    );
    assert!(!cube.is_solved(EPSILON));

    turn(&mut cube, Move::new(Axis::NegX, 0));
    assert!(cube.is_solved(EPSILON));
}

#[test]
fn test_four_quarter_turns_are_identity() {
    let mut cube = generated(3);
    let mv = Move::new(Axis::PosZ, 2);
    for _ in 0..3 {
        turn(&mut cube, mv);
        assert!(!cube.is_solved(EPSILON));
    }
    turn(&mut cube, mv);
    assert!(cube.is_solved(EPSILON));
}

#[test]
fn test_rotation_after_clear_is_harmless() {
    let mut cube = generated(3);
    let mut pivot = Pivot::group(&mut cube, Move::new(Axis::PosY, 0));
    cube.clear();
    pivot.add_rotation(&mut cube, Vector3::new(0.0, 45.0, 0.0));
    assert_eq!(Vector3::new(0.0, 45.0, 0.0), pivot.rotation());
    pivot.ungroup(&mut cube);
    assert_eq!(0, cube.cubie_count());
}

#[test]
fn test_revert_restores_layer() {
    let mut cube = generated(4);
    let mut pivot = Pivot::group(&mut cube, Move::new(Axis::NegZ, 3));
    pivot.add_rotation(&mut cube, Vector3::new(0.0, 0.0, -30.0));
    assert!(!cube.is_solved(EPSILON));

    pivot.revert(&mut cube);
    assert!(cube.is_solved(EPSILON));
    assert_eq!(0, cube.grouped_cubies().count());
}

fn arbitrary_size_and_move() -> impl Strategy<Value = (u32, Move)> {
    (2..=6_u32, 0..Axis::iter().len()).prop_flat_map(|(size, axis)| {
        let axis = Axis::iter().nth(axis).unwrap();
        (0..size).prop_map(move |layer| (size, Move::new(axis, layer)))
    })
}

proptest! {
    #[test]
    fn proptest_move_then_reverse_restores_cube(
        (size, mv) in arbitrary_size_and_move(),
        history in prop::collection::vec(arbitrary_size_and_move(), 0..8),
    ) {
        let mut cube = generated(size);
        for (_, m) in history {
            turn(&mut cube, Move::new(m.axis(), m.layer() % size));
        }
        let before = cube.clone();

        turn(&mut cube, mv);
        turn(&mut cube, mv.rev());

        for ((_, a), (_, b)) in before.cubies().zip(cube.cubies()) {
            prop_assert!((a.position - b.position).magnitude() < EPSILON);
            prop_assert!(a.orientation.dot(b.orientation).abs() > 1.0 - EPSILON);
            prop_assert!(!b.is_grouped());
        }
    }

    #[test]
    fn proptest_every_layer_is_a_full_slab((size, mv) in arbitrary_size_and_move()) {
        let mut cube = generated(size);
        let pivot = Pivot::group(&mut cube, mv);
        let expected = if mv.layer() == 0 || mv.layer() == size - 1 {
            (size * size) as usize
        } else {
            (4 * (size - 1)) as usize
        };
        prop_assert_eq!(expected, pivot.len());
    }
}
