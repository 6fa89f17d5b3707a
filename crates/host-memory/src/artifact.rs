//! Minimal PDF artifact writing.
//!
//! Panels are written as structurally valid single-page PDF files: catalog,
//! page tree, one page whose MediaBox matches the cropped canvas, a content
//! stream filling the page, and a correct xref table. The PDF version comes
//! from the format profile's compatibility level.

use std::io;
use std::path::Path;

use panelsplit_host_core::FormatProfile;

/// Write a single-page PDF of `width` x `height` canvas units to `path`.
pub fn write_pdf(path: &Path, width: f64, height: f64, profile: &FormatProfile) -> io::Result<()> {
    let mut buf: Vec<u8> = Vec::with_capacity(1024);
    let mut offsets = [0usize; 6];

    let (major, minor) = profile.compatibility;
    buf.extend_from_slice(format!("%PDF-{major}.{minor}\n").as_bytes());

    offsets[1] = buf.len();
    buf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    offsets[2] = buf.len();
    buf.extend_from_slice(b"2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n");

    offsets[3] = buf.len();
    buf.extend_from_slice(
        format!(
            "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {width:.2} {height:.2}] \
             /Resources << >> /Contents 4 0 R >>\nendobj\n"
        )
        .as_bytes(),
    );

    // Fill the page with a neutral rectangle so the panel has visible extent.
    let content = format!("0.8 g\n0 0 {width:.2} {height:.2} re\nf\n");
    offsets[4] = buf.len();
    buf.extend_from_slice(
        format!(
            "4 0 obj\n<< /Length {} >>\nstream\n{content}endstream\nendobj\n",
            content.len()
        )
        .as_bytes(),
    );

    offsets[5] = buf.len();
    buf.extend_from_slice(b"5 0 obj\n<< /Producer (PanelSplit) >>\nendobj\n");

    let xref_pos = buf.len();
    buf.extend_from_slice(b"xref\n0 6\n0000000000 65535 f \n");
    for offset in &offsets[1..] {
        buf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    buf.extend_from_slice(
        format!("trailer\n<< /Size 6 /Root 1 0 R /Info 5 0 R >>\nstartxref\n{xref_pos}\n%%EOF\n")
            .as_bytes(),
    );

    std::fs::write(path, buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_artifact_is_a_well_formed_single_page_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.pdf");
        write_pdf(&path, 500.0, 400.0, &FormatProfile::pdf_panel()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("%PDF-1.4\n"));
        assert!(text.contains("/MediaBox [0 0 500.00 400.00]"));
        assert!(text.contains("/Count 1"));
        assert!(text.ends_with("%%EOF\n"));
    }

    #[test]
    fn xref_offsets_point_at_object_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.pdf");
        write_pdf(&path, 100.0, 100.0, &FormatProfile::pdf_panel()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let xref_start = text.find("xref\n").unwrap();
        let entries: Vec<&str> = text[xref_start..]
            .lines()
            .skip(3) // "xref", "0 6", free-list entry
            .take(5)
            .collect();
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{} 0 obj", i + 1);
            assert!(text[offset..].starts_with(&expected));
        }
    }
}
