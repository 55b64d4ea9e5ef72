//! OpenQASM 3 emission.

use std::fmt::Write;

use crate::circuit::Circuit;
use crate::gate::{Gate, GateKind};

/// Emit a circuit as an OpenQASM 3.0 program measuring every qubit.
///
/// Gate names are the Braket built-ins, so the output can be submitted to a
/// Braket device unchanged.
pub fn emit(circuit: &Circuit) -> String {
    let n = circuit.num_qubits();
    let mut out = String::with_capacity(64 + circuit.len() * 16);

    out.push_str("OPENQASM 3.0;\n");
    let _ = writeln!(out, "qubit[{n}] q;");
    let _ = writeln!(out, "bit[{n}] b;");
    for gate in circuit.gates() {
        emit_gate(&mut out, gate);
    }
    out.push_str("b = measure q;\n");
    out
}

fn emit_gate(out: &mut String, gate: &Gate) {
    let name = gate_name(gate.kind);
    let _ = match gate.target {
        Some(target) => writeln!(out, "{name} q[{}], q[{}];", gate.qubit.0, target.0),
        None => writeln!(out, "{name} q[{}];", gate.qubit.0),
    };
}

fn gate_name(kind: GateKind) -> &'static str {
    match kind {
        GateKind::H => "h",
        GateKind::X => "x",
        GateKind::Y => "y",
        GateKind::Z => "z",
        GateKind::T => "t",
        GateKind::CNOT => "cnot",
        GateKind::CZ => "cz",
        GateKind::SWAP => "swap",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::QubitId;

    #[test]
    fn test_emit_bell() {
        let qasm = emit(&Circuit::bell());
        assert_eq!(
            qasm,
            "OPENQASM 3.0;\nqubit[2] q;\nbit[2] b;\nh q[0];\ncnot q[0], q[1];\nb = measure q;\n"
        );
    }

    #[test]
    fn test_emit_all_gates() {
        let mut circuit = Circuit::new();
        circuit
            .x(QubitId(0))
            .unwrap()
            .y(QubitId(1))
            .unwrap()
            .z(QubitId(2))
            .unwrap()
            .t(QubitId(0))
            .unwrap()
            .cz(QubitId(1), QubitId(2))
            .unwrap()
            .swap(QubitId(0), QubitId(2))
            .unwrap();
        let qasm = emit(&circuit);
        assert!(qasm.contains("qubit[3] q;"));
        assert!(qasm.contains("y q[1];"));
        assert!(qasm.contains("t q[0];"));
        assert!(qasm.contains("cz q[1], q[2];"));
        assert!(qasm.contains("swap q[0], q[2];"));
        assert!(qasm.ends_with("b = measure q;\n"));
    }
}
