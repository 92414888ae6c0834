use elliptic_curve_toolkit::{
    CurveGroup, DomainParameters, EccError, Ecdh, Ecdsa, FiniteField, PrimeCurve, Sha256Hash,
    Signature,
};
use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn hex_int(digits: &str) -> BigInt {
    BigInt::parse_bytes(digits.as_bytes(), 16).unwrap()
}

fn secp256k1() -> DomainParameters<PrimeCurve> {
    let p = hex_int("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F");
    let field = FiniteField::prime(p.magnitude().clone()).unwrap();
    let curve = PrimeCurve::new(field, 0, 7).unwrap();
    let g = curve
        .point(
            hex_int("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"),
            hex_int("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8"),
        )
        .unwrap();
    let n = hex_int("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");

    DomainParameters::new(curve, g, n.magnitude().clone()).unwrap()
}

fn toy_3851() -> DomainParameters<PrimeCurve> {
    let field = FiniteField::prime(BigUint::from(3851u32)).unwrap();
    let curve = PrimeCurve::new(field, 324, 1287).unwrap();
    let g = curve.point(920, 303).unwrap();
    DomainParameters::new(curve, g, BigUint::from(8u32)).unwrap()
}

#[test]
fn secp256k1_parameters_are_consistent() {
    let params = secp256k1();
    assert!(params.curve().field().validate().is_ok());
    assert!(params.validate_order().is_ok());
}

#[test]
fn toy_parameters_use_a_multiple_of_the_order() {
    // G has order 1964 on this curve; 8 is only used as the scalar range
    let params = toy_3851();
    assert!(params.validate_order().is_err());
    assert_eq!(
        params.curve().order_of(params.generator(), 5000).unwrap(),
        BigUint::from(1964u32)
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn ecdh_agreement_toy_curve(seed in any::<u64>()) {
        let ecdh = Ecdh::new(toy_3851());
        let mut rng = StdRng::seed_from_u64(seed);

        let alice = ecdh.generate_keypair(&mut rng).unwrap();
        let bob = ecdh.generate_keypair(&mut rng).unwrap();

        prop_assert_eq!(
            ecdh.compute_shared_secret(alice.private_key(), bob.public_key()).unwrap(),
            ecdh.compute_shared_secret(bob.private_key(), alice.public_key()).unwrap()
        );
    }

    #[test]
    fn ecdh_agreement_secp256k1(seed in any::<u64>()) {
        let ecdh = Ecdh::new(secp256k1());
        let mut rng = StdRng::seed_from_u64(seed);

        let alice = ecdh.generate_keypair(&mut rng).unwrap();
        let bob = ecdh.generate_keypair(&mut rng).unwrap();

        prop_assert_eq!(
            ecdh.compute_shared_secret(alice.private_key(), bob.public_key()).unwrap(),
            ecdh.compute_shared_secret(bob.private_key(), alice.public_key()).unwrap()
        );
    }

    #[test]
    fn ecdsa_soundness(
        seed in any::<u64>(),
        message in prop::collection::vec(any::<u8>(), 0..64),
        flip in 0usize..512,
    ) {
        let ecdsa = Ecdsa::new(secp256k1(), Sha256Hash);
        let mut rng = StdRng::seed_from_u64(seed);
        let pair = ecdsa.generate_keypair(&mut rng).unwrap();

        let signature = ecdsa.sign(&message, pair.private_key(), &mut rng).unwrap();
        prop_assert!(ecdsa.verify(&message, &signature, pair.public_key()).is_ok());

        let encoded = Signature::from_hex(&signature.to_hex()).unwrap();
        prop_assert_eq!(&encoded, &signature);

        let mut extended_message = message.clone();
        extended_message.push(0);
        prop_assert_eq!(
            ecdsa.verify(&extended_message, &signature, pair.public_key()),
            Err(EccError::InvalidSignature)
        );

        if !message.is_empty() {
            let mut flipped_message = message.clone();
            flipped_message[flip % message.len()] ^= 1 << (flip % 8);
            prop_assert_eq!(
                ecdsa.verify(&flipped_message, &signature, pair.public_key()),
                Err(EccError::InvalidSignature)
            );
        }

        let bit = (flip % 256) as u64;
        let mut r = signature.r().clone();
        let mut s = signature.s().clone();
        if flip < 256 {
            r.set_bit(bit, !r.bit(bit));
        } else {
            s.set_bit(bit, !s.bit(bit));
        }
        let tampered = Signature::new(r, s);
        prop_assert!(!ecdsa.is_valid(&message, &tampered, pair.public_key()));
    }
}

#[test]
fn ecdsa_rejects_every_single_bit_flip_of_a_message() {
    let ecdsa = Ecdsa::new(secp256k1(), Sha256Hash);
    let mut rng = StdRng::seed_from_u64(5);
    let pair = ecdsa.generate_keypair(&mut rng).unwrap();
    let message = b"dawn".to_vec();
    let signature = ecdsa.sign(&message, pair.private_key(), &mut rng).unwrap();

    for byte in 0..message.len() {
        for bit in 0..8 {
            let mut flipped = message.clone();
            flipped[byte] ^= 1 << bit;
            assert_eq!(
                ecdsa.verify(&flipped, &signature, pair.public_key()),
                Err(EccError::InvalidSignature)
            );
        }
    }
}
