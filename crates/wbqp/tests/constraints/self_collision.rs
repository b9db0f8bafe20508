use crate::robot::{prismatic, MockRobot};
use wbqp::math::{Isometry, Real, Vector};
use wbqp::parry::shape::SharedShape;
use wbqp::{
    BodyId, CollisionParams, Constraint, ConstraintError, InequalityConstraint,
    SelfCollisionConstraint, ShapeProxy, VariableLayout,
};

const STEP: Real = 0.005;

/// Two bodies sliding along `x`, the first at the origin and the second at `x2`.
fn sliders(x2: Real) -> MockRobot {
    let mut robot = MockRobot::new(0);
    let _ = robot.add_joint(1, 1);
    let _ = robot.add_joint(2, 1);
    robot.add_body(1, Isometry::identity(), vec![0], &[prismatic([1.0, 0.0, 0.0])]);
    robot.add_body(
        2,
        Isometry::translation(x2, 0.0, 0.0),
        vec![1],
        &[prismatic([1.0, 0.0, 0.0])],
    );
    robot
}

fn ball() -> ShapeProxy {
    ShapeProxy::at_body_origin(SharedShape::ball(0.5))
}

fn constraint(robot: &MockRobot, params: CollisionParams) -> SelfCollisionConstraint {
    let mut coll = SelfCollisionConstraint::new(STEP).unwrap();
    coll.update_layout(robot, &VariableLayout::new(2, 0, 2), &[])
        .unwrap();
    coll.add_collision(robot, BodyId(1), ball(), BodyId(2), ball(), params)
        .unwrap();
    coll
}

#[test]
fn far_pairs_are_inactive() {
    let mut robot = sliders(2.0);
    robot.alpha[0] = 3.0;
    let mut coll = constraint(&robot, CollisionParams::new(0.5, 0.1, 0.5).unwrap());
    coll.update(&robot);

    assert_eq!(coll.nr_ineq_lines(), 1);
    assert!(coll.a_ineq().iter().all(|e| *e == 0.0));
    assert_eq!(coll.b_ineq()[0], 0.0);

    // The normal is stored even when the pair is inactive.
    assert_relative_eq!(*coll.pairs()[0].normal_prev(), -Vector::x(), epsilon = 1.0e-12);
    assert_relative_eq!(coll.pairs()[0].distance(), 1.0, epsilon = 1.0e-12);
    assert!(!coll.pairs()[0].is_active());
}

#[test]
fn at_the_stopping_distance_the_damper_vanishes() {
    let robot = sliders(1.1);
    let params = CollisionParams::new(0.3, 0.1, 0.5).unwrap();
    let mut coll = constraint(&robot, params);
    coll.update(&robot);

    let row = coll.a_ineq().row(0);
    assert!(row.iter().all(|e| e.is_finite()));
    assert_relative_eq!(row[0], STEP, epsilon = 1.0e-12);
    assert_relative_eq!(row[1], -STEP, epsilon = 1.0e-12);
    assert!(row.columns(2, 2).iter().all(|e| *e == 0.0));
    assert!(coll.b_ineq()[0].is_finite());
    assert_relative_eq!(coll.b_ineq()[0], 0.0, epsilon = 1.0e-9);
}

#[test]
fn approach_velocity_tightens_the_bound() {
    let mut robot = sliders(1.2);
    robot.alpha[0] = 1.0;
    let mut coll = constraint(&robot, CollisionParams::new(0.3, 0.1, 0.5).unwrap());

    // damper(0.2) + n·(v1 - v2) = 0.25 - 1, already on the first update.
    coll.update(&robot);
    assert_relative_eq!(coll.b_ineq()[0], -0.75, epsilon = 1.0e-9);
    assert!(coll.pairs()[0].is_active());

    coll.update(&robot);
    assert_relative_eq!(coll.b_ineq()[0], -0.75, epsilon = 1.0e-9);
}

#[test]
fn turning_normal_adds_its_rate() {
    let mut robot = sliders(1.2);
    robot.alpha[0] = 1.0;
    let params = CollisionParams::new(0.3, 0.1, 0.5).unwrap();
    let mut coll = constraint(&robot, params);
    coll.update(&robot);

    robot.bodies[1].pose = Isometry::translation(1.2, 0.2, 0.0);
    coll.update(&robot);
    let mut fresh = constraint(&robot, params);
    fresh.update(&robot);

    // step·(v1 - v2)·(n - n_prev)/step, with n_prev = -x.
    let nx = -1.2 / (1.48 as Real).sqrt();
    assert_relative_eq!(
        coll.b_ineq()[0] - fresh.b_ineq()[0],
        nx + 1.0,
        epsilon = 1.0e-9
    );
    assert_eq!(coll.a_ineq(), fresh.a_ineq());
}

#[test]
fn penetration_keeps_the_normal_orientation() {
    let robot = sliders(0.8);
    let mut coll = constraint(&robot, CollisionParams::new(0.3, 0.1, 0.5).unwrap());
    coll.update(&robot);

    assert_relative_eq!(coll.pairs()[0].distance(), -0.2, epsilon = 1.0e-12);
    assert_relative_eq!(*coll.pairs()[0].normal_prev(), -Vector::x(), epsilon = 1.0e-12);
    assert_relative_eq!(coll.a_ineq()[(0, 0)], STEP, epsilon = 1.0e-12);
    // The damper pushes the bodies apart.
    assert!(coll.b_ineq()[0] < 0.0);
}

#[test]
fn touching_proxies_reuse_the_previous_normal() {
    let mut robot = sliders(1.0);
    let mut coll = constraint(&robot, CollisionParams::new(0.3, 0.1, 0.5).unwrap());

    // No normal is known yet: the row stays disabled.
    coll.update(&robot);
    assert!(coll.a_ineq().iter().all(|e| *e == 0.0));
    assert_eq!(coll.b_ineq()[0], 0.0);

    robot.bodies[1].pose = Isometry::translation(1.2, 0.0, 0.0);
    coll.update(&robot);
    robot.bodies[1].pose = Isometry::translation(1.0, 0.0, 0.0);
    coll.update(&robot);

    assert!(coll.a_ineq().iter().all(|e| e.is_finite()));
    assert!(coll.b_ineq()[0].is_finite());
    assert_relative_eq!(coll.a_ineq()[(0, 0)], STEP, epsilon = 1.0e-12);
}

#[test]
fn add_then_remove_restores_the_blocks() {
    let robot = sliders(2.0);
    let mut reference = SelfCollisionConstraint::new(STEP).unwrap();
    reference
        .update_layout(&robot, &VariableLayout::new(2, 0, 2), &[])
        .unwrap();

    let mut coll = constraint(&robot, CollisionParams::new(0.5, 0.1, 0.5).unwrap());
    assert_eq!(coll.pair_count(), 1);
    assert_eq!(coll.a_ineq().shape(), (1, 4));

    assert!(!coll.remove_collision(BodyId(2), BodyId(1)));
    assert_eq!(coll.pair_count(), 1);
    assert!(coll.remove_collision(BodyId(1), BodyId(2)));

    assert_eq!(coll.pair_count(), reference.pair_count());
    assert_eq!(coll.a_ineq().shape(), reference.a_ineq().shape());
    assert_eq!(coll.b_ineq().len(), reference.b_ineq().len());

    coll.update(&robot);
    assert_eq!(coll.nr_ineq_lines(), 0);
}

#[test]
fn reset_clears_every_pair() {
    let robot = sliders(2.0);
    let params = CollisionParams::new(0.5, 0.1, 0.5).unwrap();
    let mut coll = constraint(&robot, params);
    coll.add_collision(&robot, BodyId(2), ball(), BodyId(1), ball(), params)
        .unwrap();
    assert_eq!(coll.a_ineq().shape(), (2, 4));

    coll.reset();
    assert_eq!(coll.pair_count(), 0);
    assert_eq!(coll.a_ineq().shape(), (0, 4));
}

#[test]
fn invalid_configurations_are_rejected() {
    assert_eq!(
        SelfCollisionConstraint::new(0.0).err(),
        Some(ConstraintError::InvalidControlStep(0.0))
    );
    assert!(CollisionParams::new(0.1, 0.2, 0.5).is_err());

    let robot = sliders(2.0);
    let mut coll = SelfCollisionConstraint::new(STEP).unwrap();
    let params = CollisionParams::new(0.5, 0.1, 0.5).unwrap();
    assert_eq!(
        coll.add_collision(&robot, BodyId(1), ball(), BodyId(5), ball(), params),
        Err(ConstraintError::UnknownBody(BodyId(5)))
    );
    assert_eq!(coll.pair_count(), 0);
}

#[test]
fn updates_are_deterministic() {
    let mut rng = oorandom::Rand64::new(42);
    let params = CollisionParams::new(0.4, 0.05, 0.8).unwrap();

    for _ in 0..20 {
        let x2 = 0.9 + rng.rand_float() * 0.6;
        let mut robot = sliders(x2);
        robot.alpha[0] = rng.rand_float() * 2.0 - 1.0;
        robot.alpha[1] = rng.rand_float() * 2.0 - 1.0;

        let mut coll1 = constraint(&robot, params);
        let mut coll2 = constraint(&robot, params);
        for _ in 0..3 {
            coll1.update(&robot);
            coll2.update(&robot);
        }

        assert_eq!(coll1.a_ineq(), coll2.a_ineq());
        assert_eq!(coll1.b_ineq(), coll2.b_ineq());

        // A static state always gives the same blocks.
        let (a, b) = (coll1.a_ineq().clone(), coll1.b_ineq().clone());
        coll1.update(&robot);
        assert_eq!(coll1.a_ineq(), &a);
        assert_eq!(coll1.b_ineq(), &b);
    }
}
