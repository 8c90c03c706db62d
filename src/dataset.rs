//! Training examples and the built-in truth-table datasets.
//!
//! Datasets are looked up by name through [`REGISTRY`], a plain table of
//! constructor functions.

use ndarray::Array1;

use crate::error::{NetworkError, Result, check_len};

/// An input vector paired with its target output. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    input: Array1<f64>,
    target: Array1<f64>,
}

impl TrainingExample {
    pub fn new(input: Array1<f64>, target: Array1<f64>) -> Self {
        Self { input, target }
    }

    pub fn input(&self) -> &Array1<f64> {
        &self.input
    }

    pub fn target(&self) -> &Array1<f64> {
        &self.target
    }

    /// Checks this example against a model's input and output sizes.
    pub fn check_shape(&self, input_size: usize, output_size: usize) -> Result<()> {
        check_len("example input", input_size, self.input.len())?;
        check_len("example target", output_size, self.target.len())
    }
}

/// A named, non-empty list of examples that all share one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    input_size: usize,
    output_size: usize,
    examples: Vec<TrainingExample>,
}

impl Dataset {
    pub fn new(
        name: impl Into<String>,
        input_size: usize,
        output_size: usize,
        pairs: Vec<(Vec<f64>, Vec<f64>)>,
    ) -> Result<Self> {
        if pairs.is_empty() {
            return Err(NetworkError::EmptyDataset);
        }
        let examples = pairs
            .into_iter()
            .map(|(x, y)| {
                let example = TrainingExample::new(Array1::from(x), Array1::from(y));
                example.check_shape(input_size, output_size)?;
                Ok(example)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: name.into(),
            input_size,
            output_size,
            examples,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

const TRUTH_TABLE_INPUTS: [[f64; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];

fn truth_table(name: &str, outputs: [f64; 4]) -> Dataset {
    let examples = TRUTH_TABLE_INPUTS
        .iter()
        .zip(outputs)
        .map(|(x, y)| TrainingExample::new(Array1::from(x.to_vec()), Array1::from(vec![y])))
        .collect();
    Dataset {
        name: name.to_string(),
        input_size: 2,
        output_size: 1,
        examples,
    }
}

fn and() -> Dataset {
    truth_table("and", [0.0, 0.0, 0.0, 1.0])
}

fn or() -> Dataset {
    truth_table("or", [0.0, 1.0, 1.0, 1.0])
}

fn xor() -> Dataset {
    truth_table("xor", [0.0, 1.0, 1.0, 0.0])
}

fn x1() -> Dataset {
    truth_table("x1", [0.0, 0.0, 1.0, 1.0])
}

fn x2() -> Dataset {
    truth_table("x2", [0.0, 1.0, 0.0, 1.0])
}

pub const REGISTRY: &[(&str, fn() -> Dataset)] = &[
    ("and", and),
    ("or", or),
    ("xor", xor),
    ("x1", x1),
    ("x2", x2),
];

/// Looks up a built-in dataset, ignoring case.
pub fn builtin(name: &str) -> Result<Dataset> {
    REGISTRY
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, make)| make())
        .ok_or_else(|| NetworkError::UnknownDataset(name.to_string()))
}

pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}
