//! Presentation helpers for matrices and behavior models
//!
//! Rendering is a downstream concern kept out of the transformation
//! algorithms; these helpers back the CLI and are handy in tests.

use crate::matrix::MarkovMatrix;
use crate::model::Vertex;

/// Render a matrix as CSV: a header row of state names, then one row per
/// source state, each prefixed with its state name.
pub fn matrix_to_csv(matrix: &MarkovMatrix) -> String {
    let mut out = String::new();

    out.push(',');
    out.push_str(&matrix.states().join(","));
    out.push('\n');

    for (state, row) in matrix.states().iter().zip(matrix.cells()) {
        out.push_str(state);
        for cell in row {
            out.push(',');
            out.push_str(cell);
        }
        out.push('\n');
    }

    out
}

/// Render a matrix as an aligned table for human reading.
pub fn pretty_matrix(matrix: &MarkovMatrix) -> String {
    let mut widths: Vec<usize> = matrix.states().iter().map(String::len).collect();
    for row in matrix.cells() {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.len());
        }
    }
    let name_width = matrix
        .states()
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0);

    let mut out = String::new();

    out.push_str(&" ".repeat(name_width));
    for (state, &width) in matrix.states().iter().zip(&widths) {
        out.push_str("  ");
        out.push_str(&format!("{state:>width$}"));
    }
    out.push('\n');

    for (state, row) in matrix.states().iter().zip(matrix.cells()) {
        out.push_str(&format!("{state:<name_width$}"));
        for (cell, &width) in row.iter().zip(&widths) {
            out.push_str("  ");
            out.push_str(&format!("{cell:>width$}"));
        }
        out.push('\n');
    }

    out
}

/// Render a behavior model graph, one vertex per line followed by its
/// outgoing transitions:
///
/// ```text
/// "login" ("uc-1")
///   [0.75] "browse" ("uc-2")
///   [0.25] "$"
/// ```
pub fn pretty_model(vertices: &[Vertex]) -> String {
    let mut out = String::new();

    for vertex in vertices {
        out.push_str(&vertex_line(vertex));
        out.push('\n');

        for transition in &vertex.outgoing {
            out.push_str(&format!("  [{}] ", transition.value));
            match vertices.get(transition.target) {
                Some(target) => out.push_str(&vertex_line(target)),
                None => out.push_str(&format!("<invalid target {}>", transition.target)),
            }
            out.push('\n');
        }
    }

    out
}

fn vertex_line(vertex: &Vertex) -> String {
    match &vertex.use_case {
        Some(use_case) => format!("\"{}\" (\"{}\")", use_case.name, use_case.id),
        None => "\"$\"".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MarkovMatrixHandler;
    use crate::model::{Transition, UseCase};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_matrix_to_csv() {
        let handler = MarkovMatrixHandler::default();
        let mut matrix =
            handler.create_empty_matrix_for_states(&["A".to_string(), "B".to_string()]);
        handler
            .set_value_at_cell("0.75; n(20 10)", "A", "B", &mut matrix)
            .unwrap();

        let csv = matrix_to_csv(&matrix);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], ",A,B,$");
        assert_eq!(lines[1], "A,0.0; n(0 0),0.75; n(20 10),0.0; n(0 0)");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_pretty_matrix_contains_all_states() {
        let handler = MarkovMatrixHandler::default();
        let matrix = handler.create_empty_matrix_for_states(&["A".to_string()]);

        let rendered = pretty_matrix(&matrix);
        assert!(rendered.contains('A'));
        assert!(rendered.contains('$'));
        // Header plus one line per state.
        assert_eq!(rendered.lines().count(), 3);
    }

    #[test]
    fn test_pretty_model() {
        let mut login = Vertex::with_use_case(UseCase::with_id("uc-1", "login"));
        login.outgoing.push(Transition::new(1, 0.75));
        login.outgoing.push(Transition::new(2, 0.25));

        let vertices = vec![
            login,
            Vertex::with_use_case(UseCase::with_id("uc-2", "browse")),
            Vertex::final_vertex(),
        ];

        let rendered = pretty_model(&vertices);
        assert!(rendered.contains("\"login\" (\"uc-1\")"));
        assert!(rendered.contains("  [0.75] \"browse\" (\"uc-2\")"));
        assert!(rendered.contains("  [0.25] \"$\""));
    }
}
