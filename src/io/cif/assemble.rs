// src/io/cif/assemble.rs

//! Turns the first data block of a CIF into a [`Crystal`].
//!
//! Unlike the tokenizer and record builder, everything here is strict: a
//! missing or unusable required field aborts the whole load.

use super::block::{DataBlock, DataBlockSet, Value};
use crate::error::CifError;
use crate::model::crystal::{AtomSite, AtomSiteSet, Crystal, UnitCell};
use crate::model::elements;
use crate::model::space_group;
use crate::model::symmetry::{ExpressionError, SymmetryOperation};

const NAME_KEYS: [&str; 4] = [
    "_chemical_name_mineral",
    "_chemical_name_common",
    "_chemical_name_systematic",
    "_pd_phase_name",
];
const CELL_KEYS: [&str; 6] = [
    "_cell_length_a",
    "_cell_length_b",
    "_cell_length_c",
    "_cell_angle_alpha",
    "_cell_angle_beta",
    "_cell_angle_gamma",
];
const LABEL_KEY: &str = "_atom_site_label";
const TYPE_SYMBOL_KEY: &str = "_atom_site_type_symbol";
const FRACT_KEYS: [&str; 3] = ["_atom_site_fract_x", "_atom_site_fract_y", "_atom_site_fract_z"];
const OCCUPANCY_KEY: &str = "_atom_site_occupancy";
const SPACE_GROUP_KEYS: [&str; 2] = ["_symmetry_Int_Tables_number", "_space_group_IT_number"];
const SYMOP_KEYS: [&str; 2] = [
    "_symmetry_equiv_pos_as_xyz",
    "_space_group_symop_operation_xyz",
];

/// Assembles the first block of a parsed CIF.
pub fn assemble(set: &DataBlockSet) -> Result<Crystal, CifError> {
    let block = set.first().ok_or(CifError::NoDataBlock)?;
    Crystal::try_from(block)
}

impl TryFrom<&DataBlock> for Crystal {
    type Error = CifError;

    fn try_from(block: &DataBlock) -> Result<Self, Self::Error> {
        Assembler { block }.run()
    }
}

struct Assembler<'a> {
    block: &'a DataBlock,
}

impl Assembler<'_> {
    fn run(&self) -> Result<Crystal, CifError> {
        // Presence checks first, in a fixed order, so the reported field is predictable.
        let (_, name) = self.require_any(&NAME_KEYS)?;
        for key in CELL_KEYS {
            self.require_any(&[key])?;
        }
        let labels = self.require_column(LABEL_KEY)?;
        let fract = [
            self.require_column(FRACT_KEYS[0])?,
            self.require_column(FRACT_KEYS[1])?,
            self.require_column(FRACT_KEYS[2])?,
        ];
        let (sg_key, sg_value) = self.require_any(&SPACE_GROUP_KEYS)?;

        let name = name.as_str().unwrap_or_default().trim().to_string();
        let unit_cell = self.unit_cell()?;
        let (symop_key, ops) = self.symmetry_operations()?;

        let rows = labels.len();
        let occupancies = self.block.column(OCCUPANCY_KEY);
        let type_symbols = self.block.column(TYPE_SYMBOL_KEY);
        let mut parallel: Vec<(&str, &[Value])> = FRACT_KEYS.iter().copied().zip(fract).collect();
        if let Some(column) = occupancies {
            parallel.push((OCCUPANCY_KEY, column));
        }
        if let Some(column) = type_symbols {
            parallel.push((TYPE_SYMBOL_KEY, column));
        }
        for (key, column) in parallel {
            if column.len() != rows {
                return Err(CifError::ColumnLengthMismatch {
                    block: self.block_name(),
                    field: key.to_string(),
                    expected: rows,
                    actual: column.len(),
                });
            }
        }

        let mut sites = AtomSiteSet::new();
        for row in 0..rows {
            let label = labels[row].to_string();
            let element_source = type_symbols
                .map(|col| &col[row])
                .filter(|v| !v.is_null())
                .unwrap_or(&labels[row]);
            let atomic_number = element_source
                .as_str()
                .and_then(elements::element_from_label)
                .ok_or_else(|| CifError::UnknownElement {
                    block: self.block_name(),
                    label: element_source.to_string(),
                })?;

            let position = [
                self.number(FRACT_KEYS[0], &fract[0][row])?,
                self.number(FRACT_KEYS[1], &fract[1][row])?,
                self.number(FRACT_KEYS[2], &fract[2][row])?,
            ];
            let occupancy = match occupancies.map(|col| &col[row]) {
                Some(v) if !v.is_null() => {
                    let occ = self.number(OCCUPANCY_KEY, v)?;
                    if !(0.0..=1.0).contains(&occ) {
                        return Err(self.invalid(OCCUPANCY_KEY, v));
                    }
                    occ
                }
                _ => 1.0,
            };

            for op in &ops {
                let expanded = op
                    .apply(position)
                    .map_err(|source| self.expression(symop_key, source))?;
                match AtomSite::new(atomic_number, expanded, occupancy) {
                    Ok(site) => {
                        if !sites.insert(site) {
                            log::debug!("{}: {:?} repeats an existing site", label, expanded);
                        }
                    }
                    Err(reason) => log::debug!("{}: dropping candidate ({:?})", label, reason),
                }
            }
        }

        let index = sg_value
            .as_i64()
            .ok_or_else(|| self.invalid(sg_key, sg_value))?;
        let space_group = space_group::lookup(index).ok_or_else(|| CifError::UnknownSpaceGroup {
            block: self.block_name(),
            index,
        })?;

        log::info!(
            "{}: {} sites from {} atoms and {} symmetry operations, space group {} ({})",
            self.block.name(),
            sites.len(),
            rows,
            ops.len(),
            space_group.index,
            space_group.symbol
        );

        Ok(Crystal::new(name, unit_cell, space_group, sites))
    }

    fn block_name(&self) -> String {
        self.block.name().to_string()
    }

    /// First value present under any of `keys`, with the key that matched.
    /// The error names `keys[0]`.
    fn require_any<'k>(&self, keys: &[&'k str]) -> Result<(&'k str, &Value), CifError> {
        keys.iter()
            .find_map(|&k| self.block.get(k).map(|field| (k, field)))
            .and_then(|(k, field)| field.values().first().map(|v| (k, v)))
            .ok_or_else(|| CifError::MissingField {
                block: self.block_name(),
                field: keys[0].to_string(),
            })
    }

    fn require_column(&self, key: &str) -> Result<&[Value], CifError> {
        self.block
            .column(key)
            .ok_or_else(|| CifError::MissingField {
                block: self.block_name(),
                field: key.to_string(),
            })
    }

    fn number(&self, field: &str, value: &Value) -> Result<f64, CifError> {
        value
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.invalid(field, value))
    }

    fn invalid(&self, field: &str, value: &Value) -> CifError {
        CifError::InvalidValue {
            block: self.block_name(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    fn unit_cell(&self) -> Result<UnitCell, CifError> {
        let mut p = [0.0; 6];
        for (slot, key) in p.iter_mut().zip(CELL_KEYS) {
            let (_, value) = self.require_any(&[key])?;
            *slot = self.number(key, value)?;
        }
        UnitCell::from_degrees(p[0], p[1], p[2], p[3], p[4], p[5]).map_err(|reason| {
            CifError::InvalidUnitCell {
                block: self.block_name(),
                reason,
            }
        })
    }

    fn expression(&self, field: &str, source: ExpressionError) -> CifError {
        CifError::Expression {
            block: self.block_name(),
            field: field.to_string(),
            source,
        }
    }

    /// Parsed and validated operators, with the key they were read from.
    fn symmetry_operations(&self) -> Result<(&'static str, Vec<SymmetryOperation>), CifError> {
        let Some((key, entries)) = SYMOP_KEYS
            .iter()
            .find_map(|&k| self.block.column(k).map(|column| (k, column)))
        else {
            return Ok((SYMOP_KEYS[0], vec![SymmetryOperation::identity()]));
        };

        let mut ops = Vec::with_capacity(entries.len());
        for entry in entries {
            let text = entry.to_string();
            let op = SymmetryOperation::parse(&text).map_err(|parts| {
                CifError::MalformedSymmetryExpression {
                    block: self.block_name(),
                    entry: text.clone(),
                    parts,
                }
            })?;
            op.validate().map_err(|source| self.expression(key, source))?;
            ops.push(op);
        }

        if ops.is_empty() {
            ops.push(SymmetryOperation::identity());
        }
        Ok((key, ops))
    }
}
