use elliptic_curve_toolkit::{
    BinaryCurve, CurveGroup, FieldElement, FiniteField, Point, PrimeCurve, RationalCurve,
};
use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use proptest::prelude::*;

fn curve_97() -> (PrimeCurve, Point<FieldElement>) {
    let field = FiniteField::prime(BigUint::from(97u32)).unwrap();
    let curve = PrimeCurve::new(field, 2, 3).unwrap();
    // the group has 100 points and is not cyclic; (0, 10) has order 50
    let g = curve.point(0, 10).unwrap();
    (curve, g)
}

fn curve_gf16() -> (BinaryCurve, Point<FieldElement>) {
    let field = FiniteField::binary_from_exponents(&[4, 1, 0]).unwrap();
    let curve = BinaryCurve::new(field, 0b1000, 0b1001).unwrap();
    let g = curve.point(0b0010, 0b1111).unwrap();
    (curve, g)
}

// (6, 6) has infinite order, so its multiples are all distinct
fn curve_q() -> (RationalCurve, Point<BigRational>) {
    let curve = RationalCurve::from_integers(-18, -72).unwrap();
    let g = curve.integer_point(6, 6).unwrap();
    (curve, g)
}

// (2, 3) has order 6
fn curve_q_torsion() -> (RationalCurve, Point<BigRational>) {
    let curve = RationalCurve::from_integers(0, 1).unwrap();
    let g = curve.integer_point(2, 3).unwrap();
    (curve, g)
}

fn multiple<C: CurveGroup>(curve: &C, k: i64, p: &Point<C::Coordinate>) -> Point<C::Coordinate> {
    curve.scalar_multiply(&BigInt::from(k), p).unwrap()
}

fn check_group_laws<C: CurveGroup>(
    curve: &C,
    p: &Point<C::Coordinate>,
    q: &Point<C::Coordinate>,
    r: &Point<C::Coordinate>,
) {
    let o = curve.identity();

    assert!(curve.contains(p) && curve.contains(q) && curve.contains(r));
    assert_eq!(curve.add(p, &o).unwrap(), *p);
    assert!(curve.add(p, &curve.negate(p).unwrap()).unwrap().is_identity());
    assert_eq!(curve.add(p, q).unwrap(), curve.add(q, p).unwrap());
    assert_eq!(
        curve.add(&curve.add(p, q).unwrap(), r).unwrap(),
        curve.add(p, &curve.add(q, r).unwrap()).unwrap()
    );
    assert_eq!(curve.double(p).unwrap(), curve.add(p, p).unwrap());
    assert_eq!(curve.subtract(&curve.add(p, q).unwrap(), q).unwrap(), *p);
}

fn check_scalar_laws<C: CurveGroup>(curve: &C, p: &Point<C::Coordinate>, m: i64, n: i64) {
    assert!(multiple(curve, 0, p).is_identity());
    assert_eq!(multiple(curve, 1, p), *p);
    assert_eq!(
        multiple(curve, m + n, p),
        curve
            .add(&multiple(curve, m, p), &multiple(curve, n, p))
            .unwrap()
    );
    assert_eq!(multiple(curve, -m, p), curve.negate(&multiple(curve, m, p)).unwrap());
    assert_eq!(multiple(curve, m * n, p), multiple(curve, m, &multiple(curve, n, p)));
}

proptest! {
    #[test]
    fn prime_curve_group_laws(i in 0i64..50, j in 0i64..50, k in 0i64..50) {
        let (curve, g) = curve_97();
        check_group_laws(
            &curve,
            &multiple(&curve, i, &g),
            &multiple(&curve, j, &g),
            &multiple(&curve, k, &g),
        );
    }

    #[test]
    fn prime_curve_scalar_laws(i in 1i64..50, m in -300i64..300, n in -300i64..300) {
        let (curve, g) = curve_97();
        check_scalar_laws(&curve, &multiple(&curve, i, &g), m, n);
    }

    #[test]
    fn binary_curve_group_laws(i in 0i64..22, j in 0i64..22, k in 0i64..22) {
        let (curve, g) = curve_gf16();
        check_group_laws(
            &curve,
            &multiple(&curve, i, &g),
            &multiple(&curve, j, &g),
            &multiple(&curve, k, &g),
        );
    }

    #[test]
    fn binary_curve_scalar_laws(i in 1i64..22, m in -100i64..100, n in -100i64..100) {
        let (curve, g) = curve_gf16();
        check_scalar_laws(&curve, &multiple(&curve, i, &g), m, n);
    }

    #[test]
    fn rational_torsion_group_laws(i in -6i64..6, j in -6i64..6, k in -6i64..6) {
        let (curve, g) = curve_q_torsion();
        check_group_laws(
            &curve,
            &multiple(&curve, i, &g),
            &multiple(&curve, j, &g),
            &multiple(&curve, k, &g),
        );
    }

    #[test]
    fn order_round_trip(i in 1i64..50) {
        let (curve, g) = curve_97();
        let p = multiple(&curve, i, &g);

        let order = curve.order_of(&p, 200).unwrap();
        prop_assert_eq!(
            curve.order_with_group_order(&p, &BigUint::from(100u32)).unwrap(),
            order.clone()
        );

        let n = i64::try_from(&order).unwrap();
        prop_assert!(multiple(&curve, n, &p).is_identity());
        for smaller in 1..n {
            prop_assert!(!multiple(&curve, smaller, &p).is_identity());
        }
    }
}

#[test]
fn prime_curve_has_no_point_of_order_100() {
    let (curve, g) = curve_97();
    assert_eq!(curve.order_of(&g, 200).unwrap(), BigUint::from(50u32));

    // three points of order 2
    for x in [30, 68, 96] {
        let t = curve.point(x, 0).unwrap();
        assert_eq!(curve.order_of(&t, 10).unwrap(), BigUint::from(2u32));
    }
}

#[test]
fn binary_curve_order_22() {
    let (curve, g) = curve_gf16();
    assert_eq!(curve.order_of(&g, 100).unwrap(), BigUint::from(22u32));
    assert_eq!(
        curve.order_with_group_order(&g, &BigUint::from(22u32)).unwrap(),
        BigUint::from(22u32)
    );
}

// Heights of multiples of a non-torsion point grow quickly, so the
// rational laws use small scalars and fewer cases.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn rational_curve_group_laws(i in -4i64..=4, j in -4i64..=4, k in -4i64..=4) {
        let (curve, g) = curve_q();
        check_group_laws(
            &curve,
            &multiple(&curve, i, &g),
            &multiple(&curve, j, &g),
            &multiple(&curve, k, &g),
        );
    }

    #[test]
    fn rational_curve_scalar_laws(i in 1i64..=2, m in -3i64..=3, n in -3i64..=3) {
        let (curve, g) = curve_q();
        check_scalar_laws(&curve, &multiple(&curve, i, &g), m, n);
    }
}

#[test]
fn rational_curve_worked_sums() {
    let (curve, g) = curve_q();
    let p = g.clone();
    let q = multiple(&curve, 2, &g);
    let r = multiple(&curve, -3, &g);

    check_group_laws(&curve, &p, &q, &r);
    assert_eq!(
        multiple(&curve, 5, &g),
        curve.add(&q, &multiple(&curve, 3, &g)).unwrap()
    );
    assert_eq!(curve.add(&q, &r).unwrap(), curve.negate(&g).unwrap());
}
