//! Report export naming. The download is named after the candidate.

const FALLBACK_NAME: &str = "Candidate";

/// Extension of the report served by the export route.
pub const EXPORT_EXTENSION: &str = "json";

/// `Jane O'Neil` + `pdf` → `Jane_O_Neil_ATS_Report.pdf`.
pub fn export_file_name(candidate_name: &str, extension: &str) -> String {
    let mut stem = String::with_capacity(candidate_name.len());
    for c in candidate_name.trim().chars() {
        if c.is_alphanumeric() {
            stem.push(c);
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem = stem.trim_matches('_');
    let stem = if stem.is_empty() { FALLBACK_NAME } else { stem };
    format!("{stem}_ATS_Report.{}", extension.trim_start_matches('.'))
}

/// `Content-Disposition` value for a download. Header values must be ASCII,
/// so non-ASCII characters in the name are replaced.
pub fn content_disposition(file_name: &str) -> String {
    let ascii: String = file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    format!("attachment; filename=\"{ascii}\"")
}
