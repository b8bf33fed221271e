//! Both lifting strategies must produce the same density matrix

use nisq_core::noise::{AmplitudeDamping, GateErrorChannel, NoiseChannel, PhaseDamping};
use nisq_core::GateKind;
use nisq_state::{DensityMatrix, LiftingStrategy, SwapNetwork};

const TOL: f64 = 1e-10;

/// A non-trivial entangled, partially mixed 4-qubit state
fn prepared(strategy: LiftingStrategy) -> DensityMatrix {
    let mut dm = DensityMatrix::new(4).unwrap();
    dm.apply_unitary(&GateKind::H.matrix(), &[0], strategy).unwrap();
    dm.apply_unitary(&GateKind::H.matrix(), &[2], strategy).unwrap();
    dm.apply_unitary(&GateKind::T.matrix(), &[2], strategy).unwrap();
    dm.apply_unitary(&GateKind::Cx.matrix(), &[2, 1], strategy).unwrap();
    let damping = AmplitudeDamping::new(0.2).unwrap();
    dm.apply_kraus_channel(&damping.kraus_operators(), &[1], strategy)
        .unwrap();
    dm
}

#[test]
fn test_cx_zero_three_swap_network_matches_contraction() {
    let plan = SwapNetwork::plan(0, 3).unwrap();
    assert_eq!(plan.forward().len(), 2);

    let channel = GateErrorChannel::new(GateKind::Cx, 0.05).unwrap();
    let mut kron = prepared(LiftingStrategy::Kronecker);
    let mut contract = prepared(LiftingStrategy::Contraction);
    assert!(kron.max_difference(&contract).unwrap() < TOL);

    kron.apply_kraus_channel(&channel.kraus_operators(), &[0, 3], LiftingStrategy::Kronecker)
        .unwrap();
    contract
        .apply_kraus_channel(&channel.kraus_operators(), &[0, 3], LiftingStrategy::Contraction)
        .unwrap();

    assert!(kron.max_difference(&contract).unwrap() < TOL);
    assert!((kron.trace() - 1.0).abs() < 1e-9);
}

#[test]
fn test_every_pair_and_operand_order_agrees() {
    for kind in [GateKind::Cx, GateKind::Cz, GateKind::Swap] {
        for a in 0..4 {
            for b in 0..4 {
                if a == b {
                    continue;
                }
                let channel = GateErrorChannel::new(kind, 0.1).unwrap();
                let mut kron = prepared(LiftingStrategy::Kronecker);
                let mut contract = prepared(LiftingStrategy::Contraction);
                kron.apply_kraus_channel(&channel.kraus_operators(), &[a, b], LiftingStrategy::Kronecker)
                    .unwrap();
                contract
                    .apply_kraus_channel(
                        &channel.kraus_operators(),
                        &[a, b],
                        LiftingStrategy::Contraction,
                    )
                    .unwrap();
                assert!(
                    kron.max_difference(&contract).unwrap() < TOL,
                    "{}({}, {})",
                    kind,
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn test_single_qubit_channels_agree() {
    let dephasing = PhaseDamping::new(0.35).unwrap();
    for target in 0..4 {
        let mut kron = prepared(LiftingStrategy::Kronecker);
        let mut contract = prepared(LiftingStrategy::Contraction);
        kron.apply_kraus_channel(&dephasing.kraus_operators(), &[target], LiftingStrategy::Kronecker)
            .unwrap();
        contract
            .apply_kraus_channel(
                &dephasing.kraus_operators(),
                &[target],
                LiftingStrategy::Contraction,
            )
            .unwrap();
        assert!(kron.max_difference(&contract).unwrap() < TOL, "qubit {}", target);
    }
}

#[test]
fn test_identity_lifting_is_noop_for_both_strategies() {
    for strategy in [LiftingStrategy::Kronecker, LiftingStrategy::Contraction] {
        let mut dm = prepared(strategy);
        let before = dm.clone();
        for target in 0..4 {
            dm.apply_unitary(&GateKind::I.matrix(), &[target], strategy).unwrap();
        }
        assert!(dm.max_difference(&before).unwrap() < 1e-14);
    }
}
