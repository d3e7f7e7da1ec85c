pub mod solve;
pub mod util;
pub mod validate;

use serde::{Deserialize, Serialize};

/// On-disk shape for an allocation matrix, as written by `solve` and read
/// back by `validate`. `alloc_core::AllocationMatrix` itself carries no
/// serde impls — it is an internal, BTreeMap-backed type — so the CLI
/// owns this thin wire format at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationDocument {
    pub cells: Vec<AllocationCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationCell {
    pub product_code: String,
    pub round_label: String,
    pub value: f64,
}

impl From<&alloc_core::AllocationMatrix> for AllocationDocument {
    fn from(matrix: &alloc_core::AllocationMatrix) -> Self {
        let cells = matrix
            .iter()
            .map(|((product_code, round_label), value)| AllocationCell {
                product_code: product_code.clone(),
                round_label: round_label.clone(),
                value: *value,
            })
            .collect();
        AllocationDocument { cells }
    }
}

impl AllocationDocument {
    pub fn into_matrix(self) -> anyhow::Result<alloc_core::AllocationMatrix> {
        let mut matrix = alloc_core::AllocationMatrix::new();
        for cell in self.cells {
            let round = alloc_core::Round::parse(&cell.round_label)
                .map_err(|e| anyhow::anyhow!("allocation file has an unparseable round '{}': {e}", cell.round_label))?;
            matrix.set(&cell.product_code, &round, cell.value);
        }
        Ok(matrix)
    }
}
