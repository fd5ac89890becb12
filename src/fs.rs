use std::io;
use std::path::Path;

/// Read a file and decode it as ISO-8859-1.
///
/// The retail export is historically encoded as Latin-1, not UTF-8. Every
/// byte maps to the Unicode code point of the same value, so the decoding
/// itself is total; only the read can fail.
pub(crate) fn read_latin1(path: impl AsRef<Path>) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(bytes.iter().map(|&b| char::from(b)).collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_latin1_high_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        // "crème brûlée" in ISO-8859-1
        file.write_all(b"cr\xe8me br\xfbl\xe9e").unwrap();
        let text = read_latin1(file.path()).unwrap();
        assert_eq!(text, "crème brûlée");
    }

    #[test]
    fn test_read_latin1_ascii_passthrough() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"InvoiceNo,Country\n").unwrap();
        assert_eq!(read_latin1(file.path()).unwrap(), "InvoiceNo,Country\n");
    }

    #[test]
    fn test_read_latin1_missing_file() {
        assert!(read_latin1("/definitely/not/here.csv").is_err());
    }
}
