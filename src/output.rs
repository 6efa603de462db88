use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;

/// Output path that selects stdout instead of a file.
pub const STDOUT: &str = "-";

/// Writes a finished document to `out` (or stdout for [`STDOUT`]).
///
/// Existing files are only replaced with `force`. The document is staged in a
/// temp file next to the destination and then persisted, so readers never see
/// a partial file.
pub fn write_document(label: &str, out: &str, contents: &str, force: bool) -> anyhow::Result<()> {
    if out == STDOUT {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(contents.as_bytes())
            .with_context(|| format!("write {label} to stdout"))?;
        stdout.flush().context("flush stdout")?;
        return Ok(());
    }

    let out_path = Path::new(out);
    if out_path.exists() && !force {
        anyhow::bail!("{label} output already exists: {}", out_path.display());
    }

    let parent = match out_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .with_context(|| format!("create {label} output dir: {}", parent.display()))?;

    let mut staged = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("create {label} temp file in {}", parent.display()))?;
    staged
        .write_all(contents.as_bytes())
        .with_context(|| format!("write {label}: {}", out_path.display()))?;
    staged
        .flush()
        .with_context(|| format!("flush {label}: {}", out_path.display()))?;

    let persisted = if force {
        staged.persist(out_path)
    } else {
        staged.persist_noclobber(out_path)
    };
    persisted
        .map_err(|err| err.error)
        .with_context(|| format!("persist {label}: {}", out_path.display()))?;

    tracing::info!(out = %out_path.display(), bytes = contents.len(), "wrote {label}");
    Ok(())
}
