//! A small labelled table: one series per category over a shared period index.
//!
//! Sources list categories as rows and periods as columns; building a
//! [`Frame`] transposes them so each category becomes a column keyed by its
//! label, and each period an index entry. Lookups go by label and index key,
//! never by position, so two frames built from different files line up even
//! when their categories appear in a different order.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{FormatError, FormatResult};

/// Category series over a shared index `K`.
#[derive(Debug, Clone)]
pub struct Frame<K> {
    index: Vec<K>,
    columns: Vec<String>,
    /// `data[column][row]`
    data: Vec<Vec<Option<f64>>>,
    column_pos: HashMap<String, usize>,
    index_pos: HashMap<K, usize>,
}

impl<K: Clone + Eq + Hash + std::fmt::Display> Frame<K> {
    /// Transpose category rows into columns.
    ///
    /// `labels[i]` names `rows[i]`, and every row must have one value per
    /// `index` entry. Labels and index keys must be unique.
    pub fn from_category_rows(
        id: &str,
        index: Vec<K>,
        labels: Vec<String>,
        rows: Vec<Vec<Option<f64>>>,
    ) -> FormatResult<Self> {
        if labels.len() != rows.len() {
            return Err(FormatError::Shape {
                id: id.to_string(),
                what: "labelled rows",
                expected: labels.len(),
                actual: rows.len(),
            });
        }

        let mut index_pos = HashMap::with_capacity(index.len());
        for (i, key) in index.iter().enumerate() {
            if index_pos.insert(key.clone(), i).is_some() {
                return Err(FormatError::DuplicateLabel {
                    id: id.to_string(),
                    label: key.to_string(),
                });
            }
        }

        let mut column_pos = HashMap::with_capacity(labels.len());
        for (i, (label, row)) in labels.iter().zip(&rows).enumerate() {
            if row.len() != index.len() {
                return Err(FormatError::Shape {
                    id: format!("{id}/{label}"),
                    what: "period values",
                    expected: index.len(),
                    actual: row.len(),
                });
            }
            if column_pos.insert(label.clone(), i).is_some() {
                return Err(FormatError::DuplicateLabel {
                    id: id.to_string(),
                    label: label.clone(),
                });
            }
        }

        Ok(Self {
            index,
            columns: labels,
            data: rows,
            column_pos,
            index_pos,
        })
    }

    pub fn index(&self) -> &[K] {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of index entries (periods).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn has_column(&self, label: &str) -> bool {
        self.column_pos.contains_key(label)
    }

    /// `(key, value)` pairs of one column in index order.
    pub fn series(&self, label: &str) -> Option<impl Iterator<Item = (&K, Option<f64>)> + '_> {
        let col = *self.column_pos.get(label)?;
        Some(self.index.iter().zip(self.data[col].iter().copied()))
    }

    /// Value at (`label`, `key`); `None` when either is absent or the cell is empty.
    pub fn get(&self, label: &str, key: &K) -> Option<f64> {
        let col = *self.column_pos.get(label)?;
        let row = *self.index_pos.get(key)?;
        self.data[col][row]
    }
}
