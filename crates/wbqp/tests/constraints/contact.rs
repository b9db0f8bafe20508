use crate::robot::{prismatic, revolute, MockRobot};
use wbqp::math::{DVector, Isometry, Matrix, Point};
use wbqp::{
    BodyId, BoundConstraint, Constraint, ConstraintError, Contact, ContactAccConstraint,
    ContactId, EqualityConstraint, FrictionCone, PositiveLambda, VariableLayout,
};

/// Two feet on a floating base, each moved by one extra joint.
fn biped() -> MockRobot {
    let mut robot = MockRobot::new(6);
    let left = robot.add_joint(1, 1);
    let right = robot.add_joint(2, 1);
    robot.add_body(
        1,
        Isometry::translation(0.0, 0.1, 0.0),
        vec![0, 1, 2, left],
        &[
            prismatic([1.0, 0.0, 0.0]),
            prismatic([0.0, 1.0, 0.0]),
            prismatic([0.0, 0.0, 1.0]),
            revolute([0.0, 1.0, 0.0]),
        ],
    );
    robot.add_body(
        2,
        Isometry::translation(0.0, -0.1, 0.0),
        vec![0, 1, 2, right],
        &[
            prismatic([1.0, 0.0, 0.0]),
            prismatic([0.0, 1.0, 0.0]),
            prismatic([0.0, 0.0, 1.0]),
            revolute([0.0, 1.0, 0.0]),
        ],
    );
    robot
}

fn foot(id: u32, body: i32) -> Contact {
    Contact::new(
        ContactId(id),
        BodyId(body),
        vec![Point::origin()],
        vec![FrictionCone::new(&Matrix::identity(), 4, 0.7)],
    )
}

#[test]
fn contact_forces_are_non_negative() {
    let robot = biped();
    let contacts = [foot(1, 1), foot(2, 2)];
    let layout = VariableLayout::new(8, 8, 2);

    let mut positive = PositiveLambda::new();
    positive.update_layout(&robot, &layout, &contacts).unwrap();
    positive.update(&robot);

    assert_eq!(positive.begin_var(), 8);
    assert_eq!(positive.lower(), &DVector::zeros(8));
    assert!(positive.upper().iter().all(|u| *u == f64::INFINITY));
    assert_eq!(positive.describe_bound(&robot, 5), "contact#2: force variable 1 of 4");
    assert_eq!(positive.contacts().range(ContactId(1)), Some(8..12));
}

#[test]
fn no_contact_means_no_bound() {
    let robot = biped();
    let mut positive = PositiveLambda::default();
    positive
        .update_layout(&robot, &VariableLayout::new(8, 0, 2), &[])
        .unwrap();
    assert!(positive.lower().is_empty());
    assert!(positive.upper().is_empty());
}

#[test]
fn force_count_is_checked() {
    let robot = biped();
    let mut positive = PositiveLambda::new();
    assert_eq!(
        positive.update_layout(&robot, &VariableLayout::new(8, 5, 2), &[foot(1, 1)]),
        Err(ConstraintError::ForceCountMismatch {
            expected: 5,
            found: 4
        })
    );
}

#[test]
fn contact_acceleration_rows() {
    let mut robot = biped();
    robot.alpha = DVector::from_vec(vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    let contacts = [foot(1, 1), foot(2, 2)];
    let layout = VariableLayout::new(8, 8, 2);

    let mut acc = ContactAccConstraint::new();
    acc.update_layout(&robot, &layout, &contacts).unwrap();
    acc.update(&robot);

    assert_eq!(acc.nr_eq_lines(), 12);
    assert_eq!(acc.a_eq().shape(), (12, 18));

    // Left foot pitch row: only the left joint contributes.
    assert_eq!(acc.a_eq()[(1, 6)], 1.0);
    assert_eq!(acc.a_eq()[(1, 7)], 0.0);
    // Right foot pitch row.
    assert_eq!(acc.a_eq()[(7, 7)], 1.0);
    assert_eq!(acc.a_eq()[(7, 6)], 0.0);
    // Linear rows of the left foot follow the base translation.
    assert_eq!(acc.a_eq()[(3, 0)], 1.0);
    assert_eq!(acc.a_eq()[(5, 2)], 1.0);
    // Force and torque columns are untouched.
    assert!(acc.a_eq().columns(8, 10).iter().all(|e| *e == 0.0));

    // Constant Jacobians: no velocity-product term.
    assert!(acc.b_eq().iter().all(|e| *e == 0.0));
    assert_eq!(acc.describe_eq(&robot, 7), "contact#2: angular y");
}

#[test]
fn contact_acceleration_rhs() {
    let mut robot = biped();
    robot.alpha = DVector::from_vec(vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0]);
    // The left pitch joint drags the foot forward as it turns.
    robot.body_mut(1).jac_dot[(3, 3)] = 0.5;

    let mut acc = ContactAccConstraint::default();
    acc.update_layout(&robot, &VariableLayout::new(8, 4, 2), &[foot(1, 1)])
        .unwrap();
    acc.update(&robot);

    // -J̇·α
    assert_relative_eq!(acc.b_eq()[3], -1.0);
    assert_eq!(acc.b_eq().len(), 6);
}

#[test]
fn repeated_updates_give_identical_blocks() {
    let mut robot = biped();
    robot.alpha = DVector::from_vec(vec![0.1, -0.2, 0.3, 0.0, 0.5, 0.0, 2.0, -1.0]);
    robot.body_mut(1).jac_dot[(3, 3)] = 0.5;
    robot.body_mut(2).jac_dot[(5, 3)] = -0.25;
    let contacts = [foot(1, 1), foot(2, 2)];

    let mut acc = ContactAccConstraint::new();
    acc.update_layout(&robot, &VariableLayout::new(8, 8, 2), &contacts)
        .unwrap();
    acc.update(&robot);
    let (a, b) = (acc.a_eq().clone(), acc.b_eq().clone());
    assert!(b.iter().any(|e| *e != 0.0));

    acc.update(&robot);
    assert_eq!(acc.a_eq(), &a);
    assert_eq!(acc.b_eq(), &b);
}

#[test]
fn contact_bodies_must_exist() {
    let robot = biped();
    let mut acc = ContactAccConstraint::new();
    assert_eq!(
        acc.update_layout(&robot, &VariableLayout::new(8, 4, 2), &[foot(1, 9)]),
        Err(ConstraintError::UnknownBody(BodyId(9)))
    );
}
