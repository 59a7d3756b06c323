use log::info;
use std::io;
use std::path::{ Path, PathBuf };

/// Final path component of an uploaded file name.
pub fn staging_name(raw_name: Option<&str>) -> String {
    raw_name
        .and_then(|name| Path::new(name).file_name())
        .and_then(|name| name.to_str())
        .unwrap_or("file")
        .to_string()
}

pub fn is_source_file(file_name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
}

pub fn normalize_indentation(code: &str) -> String {
    code.replace('\t', "    ")
}

pub fn corrected_file_name(file_name: &str) -> String {
    format!("corrected_{}", file_name)
}

/// Reads `source` as UTF-8, expands tabs and writes the result to
/// `output_dir/corrected_<file_name>`. An existing file is overwritten.
pub async fn write_corrected_copy(
    source: &Path,
    output_dir: &Path,
    file_name: &str
) -> io::Result<PathBuf> {
    let code = tokio::fs::read_to_string(source).await?;
    let corrected_path = output_dir.join(corrected_file_name(file_name));
    tokio::fs::write(&corrected_path, normalize_indentation(&code)).await?;
    info!("Wrote corrected file {}", corrected_path.display());
    Ok(corrected_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SOURCE_EXTENSIONS;

    fn extensions() -> Vec<String> {
        SOURCE_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn allow_list_matches_by_suffix() {
        let exts = extensions();
        assert!(is_source_file("x.py", &exts));
        assert!(is_source_file("main.cpp", &exts));
        assert!(is_source_file("Main.java", &exts));
        assert!(!is_source_file("x.pdf", &exts));
        assert!(!is_source_file("notes.txt", &exts));
    }

    #[test]
    fn staging_name_strips_directories() {
        assert_eq!(staging_name(Some("../../etc/passwd")), "passwd");
        assert_eq!(staging_name(Some("x.py")), "x.py");
        assert_eq!(staging_name(None), "file");
    }

    #[test]
    fn tabs_become_four_spaces() {
        assert_eq!(normalize_indentation("def f():\n\treturn 1\n"), "def f():\n    return 1\n");
        assert_eq!(normalize_indentation("\t\tx"), "        x");
    }

    #[tokio::test]
    async fn corrected_copy_is_written_next_to_output_dir() {
        let downloads = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let source = downloads.path().join("x.py");
        tokio::fs::write(&source, "if x:\n\tprint(x)\n").await.unwrap();

        let corrected = write_corrected_copy(&source, output.path(), "x.py").await.unwrap();

        assert_eq!(corrected, output.path().join("corrected_x.py"));
        let content = tokio::fs::read_to_string(&corrected).await.unwrap();
        assert_eq!(content, "if x:\n    print(x)\n");
        assert!(!content.contains('\t'));
    }

    #[tokio::test]
    async fn non_utf8_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("bin.c");
        tokio::fs::write(&source, [0xff, 0xfe, 0x00]).await.unwrap();

        assert!(write_corrected_copy(&source, dir.path(), "bin.c").await.is_err());
    }
}
