//! Integration tests for device profiles, compiled circuits and noise channels

use nisq_core::noise::{GateErrorChannel, IdleDecoherence, NoiseChannel};
use nisq_core::{CompiledCircuit, DeviceProfile, GateKind, QuantumError, QubitLayout};

/// Five-qubit line with calibration in percent and nanoseconds
fn line_device() -> DeviceProfile {
    DeviceProfile::builder(5)
        .gate_percent("x", 0.2, 35.0)
        .gate_percent("h", 0.1, 35.0)
        .gate_percent("s", 0.1, 0.0)
        .gate_percent("t", 0.1, 0.0)
        .gate_percent("cx", 1.5, 400.0)
        .gate_percent("cz", 1.2, 350.0)
        .gate_percent("swap", 3.0, 1200.0)
        .gate_percent("measure", 2.0, 800.0)
        .edges((0..4).map(|q| (q, q + 1)))
        .uniform_coherence(120_000.0, 90_000.0)
        .coherence(4, 40_000.0, 100_000.0)
        .build()
        .unwrap()
}

#[test]
fn test_every_device_gate_has_complete_channel() {
    let device = line_device();
    for (kind, _) in device.gates() {
        let channel = GateErrorChannel::for_device(&device, kind).unwrap();
        assert!(channel.verify_completeness(1e-12), "{}", channel.description());
    }
}

#[test]
fn test_idle_channels_per_qubit() {
    let device = line_device();
    let cx = device.gate_spec(GateKind::Cx).unwrap();

    let q0 = IdleDecoherence::new(device.qubit(0).unwrap(), cx.duration).unwrap();
    assert!(q0.dephasing().is_some());
    assert!(q0.channels().all(|c| c.verify_completeness(1e-12)));

    // T2 = 100µs > 2·T1 = 80µs: dephasing clamped away
    let q4 = IdleDecoherence::new(device.qubit(4).unwrap(), cx.duration).unwrap();
    assert!(q4.dephasing().is_none());
    assert!(q4.amplitude().gamma() > q0.amplitude().gamma());
}

#[test]
fn test_zero_duration_gate_is_trivial_idle() {
    let device = line_device();
    let s = device.gate_spec(GateKind::S).unwrap();
    let idle = IdleDecoherence::new(device.qubit(2).unwrap(), s.duration).unwrap();
    assert!(idle.is_trivial());
}

#[test]
fn test_circuit_against_device_gate_set() {
    let device = line_device();
    let mut circuit = CompiledCircuit::new(3, QubitLayout::new(vec![1, 2, 0]).unwrap()).unwrap();
    circuit.push_named("h", &[1]).unwrap();
    circuit.push_named("cx", &[1, 2]).unwrap();
    circuit.push_named("y", &[0]).unwrap();

    let missing: Vec<GateKind> = circuit
        .gates()
        .iter()
        .map(|op| op.kind())
        .filter(|kind| !device.supports(*kind))
        .collect();
    assert_eq!(missing, vec![GateKind::Y]);
    assert_eq!(
        device.gate_spec(GateKind::Y).unwrap_err(),
        QuantumError::UnknownGate("y".to_string())
    );
}

#[test]
fn test_display_renders_percentages() {
    let text = line_device().to_string();
    assert!(text.contains("Gate measure - Error rate: 2% - Delay: 800"));
    assert!(text.contains("Q2 -> 1, 3"));
}
