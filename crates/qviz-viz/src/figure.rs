//! Plotly figure builders.
//!
//! Each builder returns a figure as JSON (`{"data": [...], "layout": {...}}`)
//! ready for `Plotly.newPlot`.

use serde_json::{Value, json};
use std::f64::consts::{PI, TAU};

use qviz_hal::Counts;
use qviz_ir::Circuit;

use crate::state::BlochVector;

const SPHERE_RESOLUTION: usize = 30;

/// Bloch sphere with axes, basis labels and the state vector.
pub fn bloch_figure(vector: &BlochVector) -> Value {
    let mut xs = Vec::with_capacity(SPHERE_RESOLUTION);
    let mut ys = Vec::with_capacity(SPHERE_RESOLUTION);
    let mut zs = Vec::with_capacity(SPHERE_RESOLUTION);
    for i in 0..SPHERE_RESOLUTION {
        let polar = PI * i as f64 / (SPHERE_RESOLUTION - 1) as f64;
        let (mut rx, mut ry, mut rz) = (Vec::new(), Vec::new(), Vec::new());
        for j in 0..SPHERE_RESOLUTION {
            let azimuth = TAU * j as f64 / (SPHERE_RESOLUTION - 1) as f64;
            rx.push(polar.sin() * azimuth.cos());
            ry.push(polar.sin() * azimuth.sin());
            rz.push(polar.cos());
        }
        xs.push(rx);
        ys.push(ry);
        zs.push(rz);
    }

    let axis = |name: &str, end: [f64; 3]| {
        json!({
            "type": "scatter3d",
            "mode": "lines",
            "name": name,
            "x": [-end[0], end[0]],
            "y": [-end[1], end[1]],
            "z": [-end[2], end[2]],
            "line": {"color": "gray", "width": 2},
            "showlegend": false,
        })
    };

    let data = vec![
        json!({
            "type": "surface",
            "x": xs, "y": ys, "z": zs,
            "opacity": 0.2,
            "showscale": false,
            "colorscale": "Blues",
            "hoverinfo": "skip",
        }),
        axis("x", [1.2, 0.0, 0.0]),
        axis("y", [0.0, 1.2, 0.0]),
        axis("z", [0.0, 0.0, 1.2]),
        json!({
            "type": "scatter3d",
            "mode": "text",
            "x": [0.0, 0.0, 1.35, -1.35],
            "y": [0.0, 0.0, 0.0, 0.0],
            "z": [1.35, -1.35, 0.0, 0.0],
            "text": ["|0⟩", "|1⟩", "|+⟩", "|−⟩"],
            "showlegend": false,
        }),
        json!({
            "type": "scatter3d",
            "mode": "lines+markers",
            "name": "state",
            "x": [0.0, vector.x],
            "y": [0.0, vector.y],
            "z": [0.0, vector.z],
            "line": {"color": "red", "width": 6},
            "marker": {"size": [0, 6], "color": "red"},
        }),
    ];

    json!({
        "data": data,
        "layout": {
            "title": format!(
                "Bloch sphere (θ = {:.3}, φ = {:.3})",
                vector.theta, vector.phi
            ),
            "scene": {
                "xaxis": {"range": [-1.5, 1.5]},
                "yaxis": {"range": [-1.5, 1.5]},
                "zaxis": {"range": [-1.5, 1.5]},
                "aspectmode": "cube",
            },
        },
    })
}

/// Circuit diagram on the left, gate histogram on the right.
///
/// Gates are placed by layer, so gates on disjoint qubits share a column.
pub fn circuit_figure(circuit: &Circuit) -> Value {
    let num_qubits = circuit.num_qubits().max(1);
    let layers = circuit.layers();
    let width = layers.len().max(1) as f64 + 1.0;
    let mut data = Vec::new();

    for q in 0..num_qubits {
        data.push(json!({
            "type": "scatter",
            "mode": "lines",
            "x": [0.0, width],
            "y": [q, q],
            "line": {"color": "black", "width": 1},
            "hoverinfo": "skip",
            "showlegend": false,
        }));
    }

    let (mut gx, mut gy, mut labels) = (Vec::new(), Vec::new(), Vec::new());
    for (column, layer) in layers.iter().enumerate() {
        let x = column as f64 + 1.0;
        for &index in layer {
            let gate = &circuit.gates()[index];
            if let Some(target) = gate.target {
                data.push(json!({
                    "type": "scatter",
                    "mode": "lines",
                    "x": [x, x],
                    "y": [gate.qubit.0, target.0],
                    "line": {"color": "royalblue", "width": 2},
                    "hoverinfo": "skip",
                    "showlegend": false,
                }));
                gx.push(x);
                gy.push(target.0);
                labels.push(match gate.kind {
                    qviz_ir::GateKind::CNOT => "⊕".to_string(),
                    kind => kind.name().to_string(),
                });
            }
            gx.push(x);
            gy.push(gate.qubit.0);
            labels.push(gate.kind.name().to_string());
        }
    }
    data.push(json!({
        "type": "scatter",
        "mode": "markers+text",
        "name": "gates",
        "x": gx,
        "y": gy,
        "text": labels,
        "textposition": "middle center",
        "marker": {"size": 28, "symbol": "square", "color": "lightsteelblue"},
        "showlegend": false,
    }));

    let histogram = circuit.gate_counts();
    data.push(json!({
        "type": "bar",
        "name": "gate counts",
        "x": histogram.keys().map(|k| k.name()).collect::<Vec<_>>(),
        "y": histogram.values().collect::<Vec<_>>(),
        "xaxis": "x2",
        "yaxis": "y2",
        "showlegend": false,
    }));

    let wire_labels: Vec<String> = (0..num_qubits).map(|q| format!("q{q}")).collect();
    json!({
        "data": data,
        "layout": {
            "title": format!(
                "Circuit: {} gates, {} qubits, depth {}",
                circuit.len(),
                circuit.num_qubits(),
                circuit.depth()
            ),
            "xaxis": {"domain": [0.0, 0.65], "title": "layer", "zeroline": false},
            "yaxis": {
                "tickvals": (0..num_qubits).collect::<Vec<_>>(),
                "ticktext": wire_labels,
                "autorange": "reversed",
            },
            "xaxis2": {"domain": [0.75, 1.0], "anchor": "y2", "title": "gate"},
            "yaxis2": {"anchor": "x2", "title": "count"},
        },
    })
}

/// Measurement histogram with bars sorted by bit-string.
pub fn histogram_figure(counts: &Counts) -> Value {
    let total = counts.total().max(1) as f64;
    let keys: Vec<&String> = counts.iter().map(|(k, _)| k).collect();
    let values: Vec<u64> = counts.iter().map(|(_, v)| *v).collect();
    let labels: Vec<String> = values
        .iter()
        .map(|v| format!("{:.1}%", *v as f64 / total * 100.0))
        .collect();

    json!({
        "data": [{
            "type": "bar",
            "x": keys,
            "y": values,
            "text": labels,
            "textposition": "auto",
            "marker": {"color": "mediumpurple"},
        }],
        "layout": {
            "title": format!("Measurement results ({} shots)", counts.total()),
            "xaxis": {"title": "bit-string (qubit 0 first)", "type": "category"},
            "yaxis": {"title": "count"},
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::QubitState;

    #[test]
    fn test_bloch_figure_has_state_trace() {
        let fig = bloch_figure(&QubitState::zero().bloch());
        let data = fig["data"].as_array().unwrap();
        assert_eq!(data.len(), 6);
        assert_eq!(data[0]["type"], "surface");
        assert_eq!(data[5]["z"][1], 1.0);
    }

    #[test]
    fn test_circuit_figure_places_gates_by_layer() {
        let fig = circuit_figure(&Circuit::ghz(3));
        let data = fig["data"].as_array().unwrap();
        let gates = data.iter().find(|t| t["name"] == "gates").unwrap();
        // H, then CNOT(0,1), then CNOT(1,2): two markers per CNOT
        assert_eq!(gates["x"].as_array().unwrap().len(), 5);
        assert_eq!(gates["x"][0], 1.0);
        assert_eq!(gates["x"][4], 3.0);

        let bars = data.iter().find(|t| t["type"] == "bar").unwrap();
        assert_eq!(bars["x"], json!(["H", "CNOT"]));
        assert_eq!(bars["y"], json!([1, 2]));
    }

    #[test]
    fn test_histogram_sorted_by_bitstring() {
        let counts: Counts = [("11".to_string(), 3), ("00".to_string(), 1)]
            .into_iter()
            .collect();
        let fig = histogram_figure(&counts);
        assert_eq!(fig["data"][0]["x"], json!(["00", "11"]));
        assert_eq!(fig["data"][0]["text"], json!(["25.0%", "75.0%"]));
    }
}
