//! Static explanations used when no model answers.

use std::fmt::Write as _;

use qviz_hal::Counts;
use qviz_ir::{Circuit, GateKind};

struct Topic {
    keywords: &'static [&'static str],
    definition: &'static str,
    analogy: &'static str,
    math: &'static str,
    importance: &'static str,
}

const TOPICS: &[Topic] = &[
    Topic {
        keywords: &["superposition"],
        definition: "A qubit in superposition is described by a combination of |0⟩ and |1⟩ at the same time, until it is measured.",
        analogy: "Think of a spinning coin: while it spins it is neither heads nor tails, and only landing fixes the outcome.",
        math: "|ψ⟩ = α|0⟩ + β|1⟩ with |α|² + |β|² = 1; measuring gives 0 with probability |α|².",
        importance: "Superposition lets n qubits carry amplitudes for all 2^n bit-strings, which quantum algorithms steer with interference.",
    },
    Topic {
        keywords: &["entangle", "bell"],
        definition: "Entangled qubits share one joint state that cannot be written as separate states for each qubit.",
        analogy: "Like a pair of gloves shipped in two boxes: opening one box tells you at once which glove is in the other.",
        math: "|Φ⁺⟩ = (|00⟩ + |11⟩)/√2; measuring either qubit fixes the other to the same value.",
        importance: "Entanglement powers teleportation, superdense coding and the speed-ups of most quantum algorithms.",
    },
    Topic {
        keywords: &["interference"],
        definition: "Quantum interference is the adding and cancelling of amplitudes that lead to the same outcome.",
        analogy: "Like ripples on a pond, crests that meet grow taller while a crest meeting a trough flattens out.",
        math: "H·H|0⟩ = |0⟩: the two paths to |1⟩ carry amplitudes +1/2 and −1/2 and cancel.",
        importance: "Algorithms such as Grover's search use interference to boost correct answers and suppress wrong ones.",
    },
    Topic {
        keywords: &["measure"],
        definition: "Measurement reads a qubit out as a classical 0 or 1 and collapses its superposition.",
        analogy: "Like opening a sealed envelope: before, the letter could say anything; after, it says one thing.",
        math: "P(0) = |α|², P(1) = |β|²; afterwards the state is |0⟩ or |1⟩.",
        importance: "Results are statistics over many shots, which is why simulations report counts rather than one answer.",
    },
    Topic {
        keywords: &["teleport"],
        definition: "Teleportation moves an unknown qubit state to a distant qubit using a shared Bell pair and two classical bits.",
        analogy: "Like faxing a document that is shredded on sending: the original is consumed and an exact copy appears at the far end.",
        math: "Alice's Bell measurement yields bits m₀m₁; Bob applies X^{m₁} then Z^{m₀} to recover |ψ⟩.",
        importance: "It is the basic primitive for moving quantum information across networks without violating no-cloning.",
    },
    Topic {
        keywords: &["grover", "search"],
        definition: "Grover's algorithm finds a marked item among N unsorted items in about √N steps.",
        analogy: "Like finding a name in an unsorted phone book by repeatedly making the right page glow a little brighter.",
        math: "Each iteration applies an oracle phase flip and a reflection about the mean; about (π/4)√(N/M) iterations are optimal.",
        importance: "It gives a quadratic speed-up for any problem that can be phrased as checking candidate answers.",
    },
    Topic {
        keywords: &["shor", "factor", "period"],
        definition: "Shor's algorithm factors integers by finding the period of a^x mod N with a quantum Fourier transform.",
        analogy: "Like identifying a song's rhythm from a noisy recording: the Fourier transform exposes the repeating beat.",
        math: "Find r with a^r ≡ 1 (mod N); then gcd(a^{r/2} ± 1, N) reveals factors when r is even.",
        importance: "Efficient factoring would break RSA, which drives the move to post-quantum cryptography.",
    },
    Topic {
        keywords: &["fourier", "qft"],
        definition: "The quantum Fourier transform maps a basis state to a superposition whose phases encode its value.",
        analogy: "Like a prism splitting light into colours, it re-expresses a state in terms of frequencies.",
        math: "|x⟩ → 2^{-n/2} Σ_y e^{2πi·xy/2^n} |y⟩, built from Hadamards, controlled phases and swaps.",
        importance: "It is the core of phase estimation and of Shor's algorithm.",
    },
    Topic {
        keywords: &["vqe", "variational", "eigensolver"],
        definition: "The variational quantum eigensolver estimates the lowest energy of a system with a tunable circuit and a classical optimizer.",
        analogy: "Like tuning a guitar by ear: play, listen, adjust the pegs, repeat until it sounds right.",
        math: "Minimize E(θ) = ⟨ψ(θ)|H|ψ(θ)⟩ ≥ E₀ over circuit parameters θ.",
        importance: "It is a leading candidate for chemistry and materials problems on near-term hardware.",
    },
];

const GENERIC: Topic = Topic {
    keywords: &[],
    definition: "This concept belongs to quantum computing, where information is stored in qubits that follow the rules of quantum mechanics.",
    analogy: "Where a classical bit is a light switch, a qubit is more like a dimmer with a direction as well as a brightness.",
    math: "A qubit state is |ψ⟩ = α|0⟩ + β|1⟩ and gates are unitary matrices acting on it.",
    importance: "Understanding the building blocks makes it possible to follow how quantum algorithms gain their advantage.",
};

fn topic_for(concept: &str) -> &'static Topic {
    let concept = concept.to_lowercase();
    TOPICS
        .iter()
        .find(|t| t.keywords.iter().any(|k| concept.contains(k)))
        .unwrap_or(&GENERIC)
}

/// Offline explanation of a concept.
pub fn concept_text(concept: &str, level: &str) -> String {
    let topic = topic_for(concept);
    let mut text = format!(
        "{concept}\n\n1. Definition: {}\n2. Analogy: {}\n",
        topic.definition, topic.analogy
    );
    if !level.eq_ignore_ascii_case("beginner") {
        let _ = writeln!(text, "3. Mathematics: {}", topic.math);
    }
    let _ = write!(text, "Why it matters: {}", topic.importance);
    text
}

/// Rule-based description of a circuit and its measured outcomes.
pub fn circuit_text(circuit: &Circuit, counts: Option<&Counts>) -> String {
    if circuit.is_empty() {
        return "The circuit has no gates yet. Add a gate such as H on qubit 0 to create a superposition.".into();
    }

    let histogram = circuit.gate_counts();
    let used = |k: GateKind| histogram.get(&k).copied().unwrap_or(0);
    let mut lines = vec![format!(
        "The circuit applies {} gate(s) to {} qubit(s).",
        circuit.len(),
        circuit.num_qubits()
    )];

    if used(GateKind::H) > 0 {
        lines.push(format!(
            "It uses {} Hadamard gate(s), which put qubits into superposition so several outcomes become possible.",
            used(GateKind::H)
        ));
    } else {
        lines.push(
            "There are no Hadamard gates, so starting from |0…0⟩ the result is deterministic.".into(),
        );
    }

    let entangling = used(GateKind::CNOT) + used(GateKind::CZ);
    if entangling > 0 && used(GateKind::H) > 0 {
        lines.push(format!(
            "{entangling} entangling gate(s) (CNOT/CZ) correlate qubits, so their measurement results are linked."
        ));
    } else if entangling > 0 {
        lines.push(format!(
            "{entangling} controlled gate(s) act like classical conditional flips here."
        ));
    }

    let phases = used(GateKind::Z) + used(GateKind::T);
    if phases > 0 {
        lines.push(format!(
            "{phases} phase gate(s) (Z/T) change relative phases, which only show up in measurements after later interference."
        ));
    }
    if used(GateKind::SWAP) > 0 {
        lines.push("SWAP gates exchange the states of two qubits.".into());
    }

    if let Some(counts) = counts.filter(|c| !c.is_empty()) {
        let total = counts.total().max(1) as f64;
        let mut outcomes: Vec<(&String, &u64)> = counts.iter().collect();
        outcomes.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        let top: Vec<String> = outcomes
            .iter()
            .take(4)
            .map(|(k, v)| format!("{k} ({:.1}%)", **v as f64 / total * 100.0))
            .collect();
        lines.push(format!(
            "Measured {} distinct outcome(s); most common: {}.",
            counts.len(),
            top.join(", ")
        ));
    }

    lines.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use qviz_ir::QubitId;

    #[test]
    fn test_concept_matching() {
        let text = concept_text("Quantum Entanglement", "beginner");
        assert!(text.contains("gloves"));
        assert!(!text.contains("Mathematics"));

        let advanced = concept_text("quantum superposition", "advanced");
        assert!(advanced.contains("|α|² + |β|² = 1"));
        assert!(advanced.contains("\n3. Mathematics: "));
        assert!(advanced.lines().last().unwrap().starts_with("Why it matters: "));

        let generic = concept_text("decoherence", "beginner");
        assert!(generic.starts_with("decoherence"));
        assert!(generic.contains("qubit"));
    }

    #[test]
    fn test_circuit_summary() {
        let counts: Counts = [("00".to_string(), 510), ("11".to_string(), 514)]
            .into_iter()
            .collect();
        let text = circuit_text(&Circuit::bell(), Some(&counts));
        assert!(text.contains("2 gate(s) to 2 qubit(s)"));
        assert!(text.contains("superposition"));
        assert!(text.contains("entangling"));
        assert!(text.contains("11 (50.2%)"));
    }

    #[test]
    fn test_deterministic_circuit() {
        let mut c = Circuit::new();
        c.x(QubitId(0)).unwrap().cnot(QubitId(0), QubitId(1)).unwrap();
        let text = circuit_text(&c, None);
        assert!(text.contains("deterministic"));
        assert!(text.contains("conditional"));
        assert!(circuit_text(&Circuit::new(), None).contains("no gates"));
    }
}
