//! Minimal file helpers for a cipher run: the key-file session and the audit
//! artifacts written next to the output.

use std::ffi::OsString;
use std::fs::{self, create_dir_all, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cipher::{decrypt, encrypt, CipherRun, Direction};
use crate::error::Result;
use crate::key::KeyRecord;

/// Strips the extension of `output` and appends `_suffix.txt`.
fn artifact_path(output: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(output.with_extension("").as_os_str());
    name.push(format!("_{suffix}.txt"));
    PathBuf::from(name)
}

fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents)?;
    writer.flush()
}

/// Writes the six audit files of `run` next to `output`.
///
/// For `out/cipher.txt` the files are `out/cipher_plaintext.txt`,
/// `out/cipher_plaintext_bits.txt`, `out/cipher_gamma_blocks_hex.txt`,
/// `out/cipher_gamma_bits.txt`, `out/cipher_ciphertext.txt` and
/// `out/cipher_ciphertext_bits.txt`.  Returns the written paths in that order.
pub fn write_artifacts(output: impl AsRef<Path>, run: &CipherRun) -> io::Result<Vec<PathBuf>> {
    let output = output.as_ref();
    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_dir_all(dir)?;
    }
    let audit = &run.audit;
    let entries: [(&str, Vec<u8>); 6] = [
        ("plaintext", run.plaintext().to_vec()),
        ("plaintext_bits", audit.plaintext_bits.to_string().into_bytes()),
        ("gamma_blocks_hex", audit.gamma_blocks_hex.join("\n").into_bytes()),
        ("gamma_bits", audit.gamma_bits.to_string().into_bytes()),
        ("ciphertext", run.ciphertext().to_vec()),
        ("ciphertext_bits", audit.ciphertext_bits.to_string().into_bytes()),
    ];
    let mut written = Vec::with_capacity(entries.len());
    for (suffix, contents) in entries {
        let path = artifact_path(output, suffix);
        write_file(&path, &contents)?;
        written.push(path);
    }
    Ok(written)
}

/// Runs one file-backed session against the key at `key_path`.
///
/// The key is loaded, `input_path` is read and transformed in `direction`.
/// The advanced key is saved before anything else is written: once the
/// keystream has been reserved in the key file, the output bytes go to
/// `output_path` and the six audit files next to it.  A rejected input or a
/// failed key save leaves no output behind, and the key file is only ever
/// replaced atomically.
pub fn run_files(
    direction: Direction,
    key_path: &Path,
    input_path: &Path,
    output_path: &Path,
) -> Result<CipherRun> {
    let key = KeyRecord::load(key_path)?;
    let input = fs::read(input_path)?;
    let run = match direction {
        Direction::Encrypt => encrypt(&key, &input)?,
        Direction::Decrypt => decrypt(&key, &input)?,
    };
    run.key.save(key_path)?;
    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_dir_all(dir)?;
    }
    write_file(output_path, &run.output)?;
    write_artifacts(output_path, &run)?;
    debug!(
        output = %output_path.display(),
        seed = run.key.lcg.seed,
        "session written"
    );
    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::{artifact_path, run_files, write_artifacts};
    use crate::cipher::{encrypt, Direction};
    use crate::error::GammaError;
    use crate::key::{BbsParams, KeyRecord, LcgParams};
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(tag: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("gamma_stream_{tag}_{unique}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_key(seed: u64) -> KeyRecord {
        KeyRecord {
            lcg: LcgParams {
                a: 1_664_525,
                b: 1_013_904_223,
                m: 1 << 20,
                seed,
            },
            bbs: BbsParams {
                p: 4_294_967_291,
                q: 4_294_967_279,
            },
        }
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn artifact_names_drop_extension() {
        assert_eq!(
            artifact_path(Path::new("out/cipher.txt"), "gamma_bits"),
            PathBuf::from("out/cipher_gamma_bits.txt")
        );
        assert_eq!(
            artifact_path(Path::new("plain"), "plaintext"),
            PathBuf::from("plain_plaintext.txt")
        );
    }

    #[test]
    fn test_write_artifacts() {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let tmp_dir = std::env::temp_dir().join(format!("gamma_stream_io_{unique}"));
        let key = sample_key(3);
        let run = encrypt(&key, b"hi").unwrap();
        let paths = write_artifacts(tmp_dir.join("cipher.txt"), &run).unwrap();
        assert_eq!(paths.len(), 6);
        assert!(paths[0].ends_with("cipher_plaintext.txt"));
        assert_eq!(fs::read(&paths[0]).unwrap(), b"hi");
        assert_eq!(
            fs::read_to_string(&paths[1]).unwrap(),
            run.audit.plaintext_bits.to_string()
        );
        let hex = fs::read_to_string(&paths[2]).unwrap();
        assert_eq!(hex.lines().count(), 5);
        assert!(hex.lines().all(|l| l.len() == 16));
        assert_eq!(fs::read(&paths[4]).unwrap(), run.output);
        fs::remove_dir_all(&tmp_dir).unwrap();
    }

    #[test]
    fn run_files_rejects_out_of_range_input_before_writing() {
        let dir = scratch_dir("run_reject");
        let key_path = dir.join("key.json");
        sample_key(5).save(&key_path).unwrap();
        let before = fs::read(&key_path).unwrap();
        let input = dir.join("plain.bin");
        fs::write(&input, b"price: 200\xc8").unwrap();

        let err = run_files(Direction::Encrypt, &key_path, &input, &dir.join("cipher.txt"))
            .unwrap_err();
        assert!(matches!(
            err,
            GammaError::OutOfRangeSymbol {
                value: 200,
                position: 10
            }
        ));
        assert_eq!(fs::read(&key_path).unwrap(), before);
        assert_eq!(entries(&dir), vec!["key.json", "plain.bin"]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn run_files_writes_nothing_when_key_save_fails() {
        let dir = scratch_dir("run_save_fail");
        let key_path = dir.join("key.json");
        sample_key(8).save(&key_path).unwrap();
        let before = fs::read(&key_path).unwrap();
        let input = dir.join("plain.txt");
        fs::write(&input, b"attack at dawn").unwrap();
        // A directory where the temporary key file goes makes the save fail.
        fs::create_dir(dir.join("key.json.tmp")).unwrap();

        let err = run_files(Direction::Encrypt, &key_path, &input, &dir.join("cipher.txt"))
            .unwrap_err();
        assert!(matches!(err, GammaError::Io(_)));
        assert_eq!(fs::read(&key_path).unwrap(), before);
        assert_eq!(entries(&dir), vec!["key.json", "key.json.tmp", "plain.txt"]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn run_files_advances_key_between_sessions() {
        let dir = scratch_dir("run_twice");
        let key_path = dir.join("key.json");
        let key0 = sample_key(12_345);
        key0.save(&key_path).unwrap();
        let input = dir.join("plain.txt");
        fs::write(&input, b"same words twice").unwrap();

        let first = run_files(Direction::Encrypt, &key_path, &input, &dir.join("one.txt")).unwrap();
        assert_eq!(KeyRecord::load(&key_path).unwrap(), first.key);
        assert_ne!(first.key.lcg.seed, key0.lcg.seed);
        let second = run_files(Direction::Encrypt, &key_path, &input, &dir.join("two.txt")).unwrap();
        assert_eq!(KeyRecord::load(&key_path).unwrap(), second.key);

        assert_ne!(first.audit.gamma_bits, second.audit.gamma_bits);
        assert_eq!(fs::read(dir.join("one.txt")).unwrap(), first.output);
        assert_eq!(fs::read(dir.join("two.txt")).unwrap(), second.output);
        assert_eq!(
            fs::read_to_string(dir.join("two_gamma_bits.txt")).unwrap(),
            second.audit.gamma_bits.to_string()
        );

        // Decrypting the first output from the original snapshot recovers it.
        let snapshot = dir.join("snapshot.json");
        key0.save(&snapshot).unwrap();
        let opened = run_files(
            Direction::Decrypt,
            &snapshot,
            &dir.join("one.txt"),
            &dir.join("back.txt"),
        )
        .unwrap();
        assert_eq!(opened.output, b"same words twice");
        assert_eq!(fs::read(dir.join("back.txt")).unwrap(), b"same words twice");
        fs::remove_dir_all(&dir).unwrap();
    }
}
