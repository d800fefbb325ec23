//! Filesystem helpers for geoargs built on `cap-std` and `camino`.
//!
//! The core engine never touches the filesystem; this crate supplies the
//! real-path [`PathResolver`] used by file normalization and loads engine
//! configuration files.
#![forbid(unsafe_code)]

use std::io::{self, BufReader};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use geoargs_core::{ConfigError, Engine, EngineConfig, FileNormalizer, PathResolver};

/// Open a UTF-8 file path using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// The current working directory as a UTF-8 path.
pub fn current_dir() -> io::Result<Utf8PathBuf> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::from_path_buf(cwd).map_err(|_| io::Error::other("non-UTF-8 working directory"))
}

/// Resolve `path` to a canonical absolute path, like `realpath(3)` in its
/// non-strict form.
///
/// Relative paths are anchored at the current directory and an empty path
/// stands for the current directory itself. Components are resolved one at a
/// time, so a `..` following a symlink climbs out of the link target rather
/// than out of the directory holding the link. Components that do not exist
/// yet are appended unchanged, and a `..` after one of them removes it.
///
/// # Errors
/// Returns an I/O error when the working directory is unavailable or an
/// existing prefix cannot be canonicalised.
pub fn real_path(path: &Utf8Path) -> io::Result<Utf8PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        current_dir()?.join(path)
    };

    let mut resolved = Utf8PathBuf::new();
    let mut missing_depth = 0_usize;
    for component in absolute.components() {
        match component {
            Utf8Component::Prefix(_) | Utf8Component::RootDir => resolved.push(component.as_str()),
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir if missing_depth > 0 => {
                resolved.pop();
                missing_depth -= 1;
            }
            Utf8Component::ParentDir | Utf8Component::Normal(_) => {
                let candidate = resolved.join(component.as_str());
                match candidate.canonicalize_utf8() {
                    Ok(canonical) => resolved = canonical,
                    Err(err) if err.kind() == io::ErrorKind::NotFound => {
                        log::trace!("{candidate} does not exist; keeping it unresolved");
                        resolved = candidate;
                        missing_depth += 1;
                    }
                    Err(err) => return Err(err),
                }
            }
        }
    }
    Ok(resolved)
}

/// Resolves directories against the real filesystem with [`real_path`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RealPathResolver;

impl PathResolver for RealPathResolver {
    fn resolve_dir(&self, dir: &Utf8Path) -> io::Result<Utf8PathBuf> {
        if dir.as_str().is_empty() {
            return real_path(Utf8Path::new("."));
        }
        real_path(dir)
    }
}

/// A file normalizer from `engine` that resolves directories on disk.
///
/// # Examples
///
/// ```
/// use geoargs_core::{CallArgs, Engine, Normalizer, ResolvedPath};
///
/// let args = CallArgs::new().kwarg("file", "countries.geojson");
/// let path = geoargs_fs::file_normalizer(&Engine::default()).normalize(args)?.value;
/// assert_eq!(path, ResolvedPath::Single("countries.geojson".into()));
/// # Ok::<(), geoargs_core::NormalizeError>(())
/// ```
#[must_use]
pub const fn file_normalizer(engine: &Engine) -> FileNormalizer<RealPathResolver> {
    engine.file(RealPathResolver)
}

/// Load and validate an engine configuration from a JSON file.
///
/// # Errors
/// Returns [`ConfigError::Read`] when the file cannot be opened, and the
/// parse or validation errors of [`EngineConfig::from_reader`].
pub fn load_engine_config(path: &Utf8Path) -> Result<EngineConfig, ConfigError> {
    log::debug!("loading engine configuration from {path}");
    let file = open_utf8_file(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    EngineConfig::from_reader(BufReader::new(file))
}
