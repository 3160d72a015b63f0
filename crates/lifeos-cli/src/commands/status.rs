//! Status command implementation.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use lifeos_domain::{RecordStore, Table};

/// Count the records in every table.
pub async fn table_counts<S: RecordStore>(store: &S) -> Result<Vec<(Table, usize)>> {
    let mut counts = Vec::with_capacity(Table::ALL.len());
    for table in Table::ALL {
        let count = store
            .count(table)
            .await
            .map_err(|e| CliError::Store(e.to_string()))?;
        counts.push((table, count));
    }
    Ok(counts)
}

/// Execute the status command.
pub async fn execute_status<S: RecordStore>(store: S, formatter: &Formatter) -> Result<()> {
    let counts = table_counts(&store).await?;

    println!("{}", formatter.format_counts(&counts)?);

    Ok(())
}
