//! Built-in education modules.

use serde::Serialize;

/// Entry in the module catalogue.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: &'static str,
    pub duration: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleContent {
    pub theory: &'static str,
    pub experiment: &'static str,
    pub mathematics: &'static str,
    pub visualization: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
    pub question: &'static str,
    pub options: &'static [&'static str],
    pub correct: &'static str,
}

/// Full module body.
#[derive(Debug, Clone, Serialize)]
pub struct Module {
    pub id: &'static str,
    pub title: &'static str,
    pub difficulty: &'static str,
    pub content: ModuleContent,
    /// Endpoint that demonstrates the topic.
    pub interactive_demo: &'static str,
    pub quiz: &'static [QuizQuestion],
}

impl Module {
    pub fn summary(&self, description: &'static str, duration: &'static str) -> ModuleSummary {
        ModuleSummary {
            id: self.id,
            title: self.title,
            description,
            difficulty: self.difficulty,
            duration,
        }
    }
}

const MODULES: &[(Module, &str, &str)] = &[
    (
        Module {
            id: "superposition",
            title: "Quantum Superposition",
            difficulty: "beginner",
            content: ModuleContent {
                theory: "Quantum superposition is the fundamental principle that quantum particles can exist in multiple states simultaneously until they are measured.",
                experiment: "The double-slit experiment demonstrates wave-particle duality: single particles build up an interference pattern.",
                mathematics: "|ψ⟩ = α|0⟩ + β|1⟩ where |α|² + |β|² = 1",
                visualization: "Bloch sphere representation of qubit states",
            },
            interactive_demo: "/api/visualize/bloch",
            quiz: &[
                QuizQuestion {
                    question: "A qubit is in the state (|0⟩ + |1⟩)/√2. What is the probability of measuring 1?",
                    options: &["0", "1/4", "1/2", "1"],
                    correct: "1/2",
                },
                QuizQuestion {
                    question: "Which gate takes |0⟩ to an equal superposition?",
                    options: &["X", "Z", "H", "CNOT"],
                    correct: "H",
                },
            ],
        },
        "Learn about quantum superposition and the double-slit experiment",
        "15 minutes",
    ),
    (
        Module {
            id: "entanglement",
            title: "Quantum Entanglement",
            difficulty: "intermediate",
            content: ModuleContent {
                theory: "Quantum entanglement is a phenomenon where particles become correlated and share a single quantum state, so measuring one determines the other.",
                experiment: "Bell test experiments show correlations no local hidden-variable theory can explain.",
                mathematics: "|Φ⁺⟩ = (|00⟩ + |11⟩)/√2",
                visualization: "Bell state visualization and measurement correlations",
            },
            interactive_demo: "/api/algorithms/teleportation",
            quiz: &[
                QuizQuestion {
                    question: "Measuring the Bell state (|00⟩ + |11⟩)/√2 can give which outcomes?",
                    options: &["00 and 11", "01 and 10", "all four", "only 00"],
                    correct: "00 and 11",
                },
                QuizQuestion {
                    question: "Which two gates prepare a Bell state from |00⟩?",
                    options: &["H then CNOT", "X then Z", "CNOT then SWAP", "T then H"],
                    correct: "H then CNOT",
                },
            ],
        },
        "Understand quantum entanglement and Bell states",
        "20 minutes",
    ),
    (
        Module {
            id: "algorithms",
            title: "Quantum Algorithms",
            difficulty: "advanced",
            content: ModuleContent {
                theory: "Quantum algorithms use interference to amplify correct answers. Grover's search finds a marked item in O(√N) queries; Shor's algorithm factors integers by finding the period of modular exponentiation.",
                experiment: "Run Grover's search over 8 items and watch the marked states dominate the histogram after two iterations.",
                mathematics: "Grover iterations ≈ (π/4)·√(N/M); Shor: a^r ≡ 1 (mod N) gives factors gcd(a^(r/2) ± 1, N)",
                visualization: "Measurement histograms before and after amplitude amplification",
            },
            interactive_demo: "/api/algorithms/grover",
            quiz: &[
                QuizQuestion {
                    question: "How many Grover iterations are optimal for one marked item among 16?",
                    options: &["1", "3", "8", "16"],
                    correct: "3",
                },
                QuizQuestion {
                    question: "Which subroutine turns period finding into a measurable phase in Shor's algorithm?",
                    options: &["Quantum Fourier transform", "Teleportation", "Swap test", "Amplitude damping"],
                    correct: "Quantum Fourier transform",
                },
            ],
        },
        "Explore Grover's search and Shor's factorization",
        "30 minutes",
    ),
    (
        Module {
            id: "teleportation",
            title: "Quantum Teleportation",
            difficulty: "intermediate",
            content: ModuleContent {
                theory: "Teleportation moves an unknown qubit state from Alice to Bob using a shared Bell pair and two classical bits. The original state is destroyed, so no cloning occurs.",
                experiment: "Teleport |+⟩ and measure Bob's qubit in the Hadamard basis: every shot reads 0.",
                mathematics: "|ψ⟩|Φ⁺⟩ = ½ Σ |m₁m₂⟩ ⊗ X^m₂ Z^m₁ |ψ⟩",
                visualization: "Three-qubit circuit with Bob's corrected measurement histogram",
            },
            interactive_demo: "/api/algorithms/teleportation",
            quiz: &[QuizQuestion {
                question: "How many classical bits does Alice send to Bob?",
                options: &["0", "1", "2", "3"],
                correct: "2",
            }],
        },
        "Learn about the quantum teleportation protocol",
        "25 minutes",
    ),
];

/// Catalogue of all modules.
pub fn modules() -> Vec<ModuleSummary> {
    MODULES
        .iter()
        .map(|(module, description, duration)| module.summary(description, duration))
        .collect()
}

/// Module by id.
pub fn module(id: &str) -> Option<&'static Module> {
    MODULES
        .iter()
        .map(|(module, _, _)| module)
        .find(|m| m.id == id)
}
