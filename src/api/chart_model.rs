use crate::core::LabelOptions;

/// One labeled pair of values, owned by its chart.
///
/// `value1 <= value2` and both lie in the range active when they were written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column {
    pub(super) label: String,
    pub(super) value1: f64,
    pub(super) value2: f64,
}

impl Column {
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn value1(&self) -> f64 {
        self.value1
    }

    #[must_use]
    pub fn value2(&self) -> f64 {
        self.value2
    }

    #[must_use]
    pub fn values(&self) -> (f64, f64) {
        (self.value1, self.value2)
    }
}

/// A titled group of columns; the column count is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub(super) title: String,
    pub(super) columns: Box<[Column]>,
    pub(super) label_options: LabelOptions,
}

impl Chart {
    pub(super) fn new(title: String, column_count: usize) -> Self {
        Self {
            title,
            columns: vec![Column::default(); column_count].into_boxed_slice(),
            label_options: LabelOptions::default(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn label_options(&self) -> LabelOptions {
        self.label_options
    }
}
