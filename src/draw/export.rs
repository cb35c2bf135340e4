use super::model::DrawResult;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

pub const EXPORT_HEADER: [&str; 4] = ["name", "reference code", "prize name", "prize category"];

/// Write results as CSV, one row per round in round order.
pub fn write_results<W: Write>(results: &[DrawResult], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(EXPORT_HEADER)?;
    for r in results {
        wtr.write_record([
            r.participant_name.as_str(),
            r.ref_code.as_str(),
            r.prize_name.as_str(),
            r.prize_category.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export to a file. Failures are logged and reported as `false`; a file left
/// half-written by a failed write is removed.
pub fn export_to_path(results: &[DrawResult], destination: &Path) -> bool {
    export_with(results, destination, |path| File::create(path))
}

fn export_with<W, F>(results: &[DrawResult], destination: &Path, open: F) -> bool
where
    W: Write,
    F: FnOnce(&Path) -> io::Result<W>,
{
    let file = match open(destination) {
        Ok(file) => file,
        Err(e) => {
            log::error!(
                "Failed to export draw results to {}: {e}",
                destination.display()
            );
            return false;
        }
    };

    match write_results(results, file) {
        Ok(()) => {
            log::info!(
                "Exported {} draw results to {}",
                results.len(),
                destination.display()
            );
            true
        }
        Err(e) => {
            log::error!(
                "Failed to export draw results to {}: {e}",
                destination.display()
            );
            if let Err(e) = fs::remove_file(destination) {
                log::warn!(
                    "Failed to remove partial export {}: {e}",
                    destination.display()
                );
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, code: &str, prize: &str, level: &str) -> DrawResult {
        DrawResult {
            participant_id: 1,
            participant_name: name.to_string(),
            ref_code: code.to_string(),
            prize_id: 1,
            prize_name: prize.to_string(),
            prize_category: level.to_string(),
        }
    }

    #[test]
    fn test_write_results_keeps_round_order() {
        let results = vec![
            result("张三", "EMP001", "iPhone 15", "一等奖"),
            result("李四", "", "AirPods Pro", "二等奖"),
            result("张三", "EMP001", "AirPods Pro", "二等奖"),
        ];
        let mut buf = Vec::new();
        write_results(&results, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "name,reference code,prize name,prize category",
                "张三,EMP001,iPhone 15,一等奖",
                "李四,,AirPods Pro,二等奖",
                "张三,EMP001,AirPods Pro,二等奖",
            ]
        );
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let results = vec![result("Doe, John", "E1", "Mug", "三等奖")];
        let mut buf = Vec::new();
        write_results(&results, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"Doe, John\",E1,Mug,三等奖"));
    }

    #[test]
    fn test_export_to_path_success_and_failure() {
        let dir = std::env::temp_dir().join(format!("draw-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("results.csv");
        let results = vec![result("张三", "EMP001", "iPhone 15", "一等奖")];

        assert!(export_to_path(&results, &path));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("name,reference code"));

        let bad = dir.join("missing-dir").join("results.csv");
        assert!(!export_to_path(&results, &bad));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    /// Accepts part of the first write, then fails like a full disk.
    struct FailingFile {
        file: File,
        wrote: bool,
    }

    impl Write for FailingFile {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.wrote {
                return Err(io::Error::other("no space left on device"));
            }
            self.wrote = true;
            let half = (buf.len() / 2).max(1);
            self.file.write(&buf[..half])
        }

        fn flush(&mut self) -> io::Result<()> {
            self.file.flush()
        }
    }

    #[test]
    fn test_failed_write_removes_partial_file() {
        let dir = std::env::temp_dir().join(format!("draw-export-partial-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("results.csv");
        let results = vec![result("张三", "EMP001", "iPhone 15", "一等奖")];

        let exported = export_with(&results, &path, |p| {
            Ok(FailingFile {
                file: File::create(p)?,
                wrote: false,
            })
        });
        assert!(!exported);
        assert!(!path.exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
