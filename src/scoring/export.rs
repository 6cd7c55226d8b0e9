use super::domain::LeadResultView;
use super::parser::LeadCsvError;

/// Serialize scored results as a CSV document, one flattened row per lead
/// in upload order.
pub fn write_results_csv(rows: &[LeadResultView]) -> Result<String, LeadCsvError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| LeadCsvError::Malformed(err.into_error().into()))?;

    // The writer only ever receives UTF-8 input.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
