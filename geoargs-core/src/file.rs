//! File-path normalization: `(dir, base)` joins or literal filenames.
//!
//! Directory resolution is delegated to a [`PathResolver`] so this crate
//! stays free of filesystem access; `geoargs-fs` provides the real one.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

use crate::shape::{ShapeMatcher, into_single_sequence, into_two, is_string, resolve_shape};
use crate::{CallArgs, NormalizeError, Normalized, Normalizer};

/// Keyword holding the directory joined with [`KW_BASE`].
pub const KW_DIR: &str = "dir";
/// Keyword holding the base name joined onto [`KW_DIR`].
pub const KW_BASE: &str = "base";
/// Keyword holding a filename or a list of filenames.
pub const KW_FILE: &str = "file";

const FILE_KEYS: [&str; 3] = [KW_DIR, KW_BASE, KW_FILE];

/// Resolves a directory to its canonical absolute form.
pub trait PathResolver {
    /// Resolve `dir`; an empty path stands for the current directory.
    ///
    /// # Errors
    /// Returns an I/O error when the directory cannot be resolved.
    fn resolve_dir(&self, dir: &Utf8Path) -> io::Result<Utf8PathBuf>;
}

impl<R: PathResolver + ?Sized> PathResolver for &R {
    fn resolve_dir(&self, dir: &Utf8Path) -> io::Result<Utf8PathBuf> {
        (**self).resolve_dir(dir)
    }
}

/// A resolved file argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPath {
    /// A resolved `(dir, base)` join, or a `file` string passed through.
    Single(Utf8PathBuf),
    /// Literal filenames, unresolved.
    Files(Vec<String>),
}

enum RawFile {
    Join { dir: String, base: String },
    Files(Vec<String>),
    Single(String),
}

const FILE_SHAPES: [ShapeMatcher<RawFile>; 3] = [
    ShapeMatcher::new("positional (dir, base) pair", string_pair, join_from_sequence),
    ShapeMatcher::new("positional filenames", string_sequence, files_from_sequence),
    ShapeMatcher::new("positional dir and base", two_strings, join_from_args),
];

fn string_pair(args: &[Value]) -> bool {
    matches!(args, [Value::Array(items)] if items.len() == 2 && items.iter().all(is_string))
}

fn string_sequence(args: &[Value]) -> bool {
    matches!(args, [Value::Array(items)] if items.iter().all(is_string))
}

fn two_strings(args: &[Value]) -> bool {
    matches!(args, [Value::String(_), Value::String(_)])
}

fn text(value: Value, what: &str) -> Result<String, NormalizeError> {
    match value {
        Value::String(string) => Ok(string),
        other => Err(NormalizeError::malformed(format!(
            "{what} must be a string, got {other}"
        ))),
    }
}

fn join_from_args(args: Vec<Value>) -> Result<RawFile, NormalizeError> {
    let (dir, base) =
        into_two(args).ok_or_else(|| NormalizeError::malformed("expected a directory and a base name"))?;
    Ok(RawFile::Join {
        dir: text(dir, KW_DIR)?,
        base: text(base, KW_BASE)?,
    })
}

fn join_from_sequence(args: Vec<Value>) -> Result<RawFile, NormalizeError> {
    join_from_args(into_single_sequence(args)?)
}

fn files_from_sequence(args: Vec<Value>) -> Result<RawFile, NormalizeError> {
    into_single_sequence(args)?
        .into_iter()
        .map(|name| text(name, KW_FILE))
        .collect::<Result<_, _>>()
        .map(RawFile::Files)
}

/// Canonicalises `(dir, base)` or `file` inputs into a [`ResolvedPath`].
///
/// Positional shapes, in priority order: one 2-element sequence of strings
/// read as `(dir, base)`, one sequence of strings read as filenames, then two
/// strings read as `(dir, base)`. A `base` is joined onto the resolved `dir`,
/// which defaults to the current directory.
///
/// # Examples
///
/// ```
/// use std::io;
/// use camino::{Utf8Path, Utf8PathBuf};
/// use geoargs_core::{CallArgs, FileNormalizer, Normalizer, PathResolver, ResolvedPath};
///
/// struct Verbatim;
///
/// impl PathResolver for Verbatim {
///     fn resolve_dir(&self, dir: &Utf8Path) -> io::Result<Utf8PathBuf> {
///         Ok(dir.to_path_buf())
///     }
/// }
///
/// let args = CallArgs::new().kwarg("dir", "/data").kwarg("base", "x.shp");
/// let path = FileNormalizer::new(Verbatim).normalize(args)?.value;
/// assert_eq!(path, ResolvedPath::Single(Utf8PathBuf::from("/data/x.shp")));
/// # Ok::<(), geoargs_core::NormalizeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileNormalizer<R> {
    resolver: R,
}

impl<R: PathResolver> FileNormalizer<R> {
    /// Build a normalizer resolving directories with `resolver`.
    #[must_use]
    pub const fn new(resolver: R) -> Self {
        Self { resolver }
    }

    fn join(&self, dir: &str, base: &str) -> Result<ResolvedPath, NormalizeError> {
        let resolved = self.resolver.resolve_dir(Utf8Path::new(dir)).map_err(|err| {
            NormalizeError::malformed(format!("cannot resolve directory '{dir}': {err}"))
        })?;
        Ok(ResolvedPath::Single(resolved.join(base)))
    }

    fn from_keywords(args: &mut CallArgs) -> Result<RawFile, NormalizeError> {
        let dir = args.take_present(KW_DIR);
        let base = args.take_present(KW_BASE);
        let file = args.take_present(KW_FILE);
        match (dir, base, file) {
            (_, Some(_), Some(_)) => Err(NormalizeError::ambiguous(
                "file cannot be combined with base; supply only one",
            )),
            (Some(_), None, Some(_)) => Err(NormalizeError::ambiguous(
                "dir only applies to base, not to file",
            )),
            (directory, Some(base_name), None) => Ok(RawFile::Join {
                dir: directory
                    .map(|value| text(value, KW_DIR))
                    .transpose()?
                    .unwrap_or_default(),
                base: text(base_name, KW_BASE)?,
            }),
            (None, None, Some(Value::String(name))) => Ok(RawFile::Single(name)),
            (None, None, Some(Value::Array(names))) => names
                .into_iter()
                .map(|name| text(name, KW_FILE))
                .collect::<Result<_, _>>()
                .map(RawFile::Files),
            (None, None, Some(other)) => Err(NormalizeError::malformed(format!(
                "file must be a string or a list of strings, got {other}"
            ))),
            (Some(_), None, None) => Err(NormalizeError::missing("dir was supplied without base")),
            (None, None, None) => Err(NormalizeError::missing("no input file arguments passed")),
        }
    }
}

impl<R: PathResolver> Normalizer for FileNormalizer<R> {
    type Output = ResolvedPath;

    fn normalize(&self, mut args: CallArgs) -> Result<Normalized<ResolvedPath>, NormalizeError> {
        let raw = if args.has_positional() {
            if args.contains_any(&FILE_KEYS) {
                return Err(NormalizeError::ambiguous(
                    "positional file arguments cannot be combined with file keywords",
                ));
            }
            let (_, raw) = resolve_shape(&FILE_SHAPES, args.take_positional(), "file")?;
            raw
        } else {
            Self::from_keywords(&mut args)?
        };
        let path = match raw {
            RawFile::Single(name) => ResolvedPath::Single(Utf8PathBuf::from(name)),
            RawFile::Files(names) if names.is_empty() => {
                return Err(NormalizeError::missing("file list is empty"));
            }
            RawFile::Files(names) => ResolvedPath::Files(names),
            RawFile::Join { dir, base } => self.join(&dir, &base)?,
        };
        Ok(Normalized::new(path, args))
    }

    fn recognized_keys(&self) -> Vec<&'static str> {
        FILE_KEYS.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use rstest::{fixture, rstest};
    use serde_json::json;

    /// Resolves every directory under a fixed root, like a chroot.
    struct Rooted(&'static str);

    impl PathResolver for Rooted {
        fn resolve_dir(&self, dir: &Utf8Path) -> io::Result<Utf8PathBuf> {
            if dir.as_str() == "missing" {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"));
            }
            if dir.as_str().is_empty() {
                return Ok(Utf8PathBuf::from(self.0));
            }
            Ok(Utf8PathBuf::from(self.0).join(dir.as_str().trim_start_matches('/')))
        }
    }

    #[fixture]
    fn normalizer() -> FileNormalizer<Rooted> {
        FileNormalizer::new(Rooted("/srv"))
    }

    fn single(path: &str) -> ResolvedPath {
        ResolvedPath::Single(Utf8PathBuf::from(path))
    }

    #[rstest]
    #[case(CallArgs::new().kwarg("dir", "data").kwarg("base", "x.shp"), single("/srv/data/x.shp"))]
    #[case(CallArgs::new().kwarg("base", "x.shp"), single("/srv/x.shp"))]
    #[case(CallArgs::new().arg(json!(["data", "x.shp"])), single("/srv/data/x.shp"))]
    #[case(CallArgs::new().arg("data").arg("x.shp"), single("/srv/data/x.shp"))]
    #[case(CallArgs::new().kwarg("file", "raw/x.shp"), single("raw/x.shp"))]
    #[case(
        CallArgs::new().arg(json!(["a.shp", "b.shp", "c.shp"])),
        ResolvedPath::Files(vec!["a.shp".to_owned(), "b.shp".to_owned(), "c.shp".to_owned()])
    )]
    #[case(
        CallArgs::new().kwarg("file", json!(["a.shp"])),
        ResolvedPath::Files(vec!["a.shp".to_owned()])
    )]
    fn accepted_shapes(
        normalizer: FileNormalizer<Rooted>,
        #[case] args: CallArgs,
        #[case] expected: ResolvedPath,
    ) {
        let normalized = normalizer.normalize(args).expect("path resolved");
        assert_eq!(normalized.value, expected);
    }

    #[rstest]
    fn two_string_sequence_prefers_dir_and_base(normalizer: FileNormalizer<Rooted>) {
        let normalized = normalizer
            .normalize(CallArgs::new().arg(json!(["a.shp", "b.shp"])))
            .expect("pair shape wins");
        assert_eq!(normalized.value, single("/srv/a.shp/b.shp"));
    }

    #[rstest]
    #[case(CallArgs::new(), ErrorKind::MissingArgument)]
    #[case(CallArgs::new().kwarg("dir", "data"), ErrorKind::MissingArgument)]
    #[case(
        CallArgs::new().kwarg("base", "x.shp").kwarg("file", "y.shp"),
        ErrorKind::AmbiguousArgument
    )]
    #[case(
        CallArgs::new().kwarg("dir", "data").kwarg("file", "y.shp"),
        ErrorKind::AmbiguousArgument
    )]
    #[case(
        CallArgs::new().arg("x.shp").kwarg("dir", "data"),
        ErrorKind::AmbiguousArgument
    )]
    #[case(CallArgs::new().arg("x.shp"), ErrorKind::MalformedArgument)]
    #[case(CallArgs::new().arg(json!([])), ErrorKind::MissingArgument)]
    #[case(CallArgs::new().kwarg("file", 3), ErrorKind::MalformedArgument)]
    #[case(
        CallArgs::new().kwarg("dir", "missing").kwarg("base", "x.shp"),
        ErrorKind::MalformedArgument
    )]
    fn rejected_shapes(
        normalizer: FileNormalizer<Rooted>,
        #[case] args: CallArgs,
        #[case] kind: ErrorKind,
    ) {
        let err = normalizer.normalize(args).expect_err("rejected");
        assert_eq!(err.kind(), kind);
    }

    #[rstest]
    fn unrelated_keywords_pass_through(normalizer: FileNormalizer<Rooted>) {
        let args = CallArgs::new().kwarg("base", "x.shp").kwarg("driver", "ESRI Shapefile");
        let normalized = normalizer.normalize(args).expect("path resolved");
        assert_eq!(
            normalized.remaining,
            CallArgs::new().kwarg("driver", "ESRI Shapefile")
        );
    }
}
