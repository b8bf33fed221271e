use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nisq_core::{CompiledCircuit, DeviceProfile, GateKind, QubitLayout};
use nisq_sim::{LiftingStrategy, NoisySimulator, SimulatorConfig};

fn line_device(num_qubits: usize) -> DeviceProfile {
    DeviceProfile::builder(num_qubits)
        .gate_percent("h", 0.05, 35.0)
        .gate_percent("x", 0.05, 35.0)
        .gate_percent("cx", 1.0, 300.0)
        .gate_percent("measure", 1.5, 1000.0)
        .edges((0..num_qubits - 1).map(|q| (q, q + 1)))
        .uniform_coherence(80_000.0, 60_000.0)
        .build()
        .unwrap()
}

fn create_layered_circuit(num_qubits: usize, depth: usize) -> CompiledCircuit {
    let mut circuit = CompiledCircuit::new(num_qubits, QubitLayout::identity(num_qubits)).unwrap();

    for d in 0..depth {
        // Single qubit gates layer
        for q in 0..num_qubits {
            let kind = if (q + d) % 2 == 0 { GateKind::H } else { GateKind::X };
            circuit.push(kind, &[q]).unwrap();
        }

        // Entangling layer
        for q in 0..(num_qubits - 1) {
            if (q + d) % 2 == 0 {
                circuit.push(GateKind::Cx, &[q, q + 1]).unwrap();
            }
        }
    }

    circuit
}

fn create_ghz_circuit(num_qubits: usize) -> CompiledCircuit {
    let mut circuit = CompiledCircuit::new(num_qubits, QubitLayout::identity(num_qubits)).unwrap();
    circuit.push(GateKind::H, &[0]).unwrap();
    for q in 0..(num_qubits - 1) {
        circuit.push(GateKind::Cx, &[q, q + 1]).unwrap();
    }
    for q in 0..num_qubits {
        circuit.push(GateKind::Measure, &[q]).unwrap();
    }
    circuit
}

fn bench_full_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_simulation");
    group.sample_size(10);

    for num_qubits in [3, 5, 7] {
        let simulator = NoisySimulator::new(line_device(num_qubits), create_ghz_circuit(num_qubits))
            .unwrap()
            .with_config(SimulatorConfig::new().with_seed(42))
            .unwrap();

        group.bench_with_input(
            BenchmarkId::new("ghz", format!("{}q", num_qubits)),
            &simulator,
            |b, simulator| b.iter(|| simulator.simulate(black_box(1024)).unwrap()),
        );
    }

    group.finish();
}

fn bench_lifting_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifting");
    group.sample_size(10);

    for num_qubits in [4, 6] {
        let depth = 5;
        for (name, lifting) in [
            ("kronecker", LiftingStrategy::Kronecker),
            ("contraction", LiftingStrategy::Contraction),
        ] {
            let simulator = NoisySimulator::new(
                line_device(num_qubits),
                create_layered_circuit(num_qubits, depth),
            )
            .unwrap()
            .with_config(SimulatorConfig::new().with_lifting(lifting))
            .unwrap();

            group.bench_with_input(
                BenchmarkId::new(name, format!("{}q_d{}", num_qubits, depth)),
                &simulator,
                |b, simulator| b.iter(|| simulator.final_density_matrix().unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_parallel_threshold(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut group = c.benchmark_group("parallel_threshold");
    group.sample_size(10);

    let num_qubits = 8;
    for threshold in [usize::MAX, 8] {
        let simulator = NoisySimulator::new(
            line_device(num_qubits),
            create_layered_circuit(num_qubits, 2),
        )
        .unwrap()
        .with_config(SimulatorConfig::new().with_parallel_threshold(threshold))
        .unwrap();

        let label = if threshold == usize::MAX { "sequential" } else { "rayon" };
        group.bench_function(label, |b| {
            b.iter(|| simulator.final_density_matrix().unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_full_simulation,
    bench_lifting_strategies,
    bench_parallel_threshold
);
criterion_main!(benches);
