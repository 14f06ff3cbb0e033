//! Startup source resolution
//!
//! `Prompt` sources ask the operator for a filename on stdin before the
//! listener binds; `Local` sources are checked for existence. Both happen
//! once at startup, so request handling never sees an unresolved source.

use super::{FileSource, RoutesConfig};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Resolve every route source in place.
///
/// `Prompt` entries are replaced by `Local` entries pointing at an
/// operator-chosen file that exists on disk. Explicitly configured `Local`
/// paths that do not exist are a startup error.
pub fn resolve_sources(routes: &mut RoutesConfig) -> io::Result<()> {
    for (route, source) in &mut routes.table {
        match source {
            FileSource::Remote { .. } => {}
            FileSource::Local { path } => {
                if path.is_empty() {
                    // Left empty on purpose is still a configuration bug,
                    // but one the handler reports per request as 500.
                    continue;
                }
                let resolved = absolutize(path.as_str());
                if !resolved.is_file() {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("File '{}' for route {route} not found", resolved.display()),
                    ));
                }
                *path = resolved.to_string_lossy().into_owned();
            }
            FileSource::Prompt => {
                let stdin = io::stdin();
                let chosen = prompt_for_file(&mut stdin.lock(), route)?;
                *source = FileSource::Local {
                    path: chosen.to_string_lossy().into_owned(),
                };
            }
        }
    }
    Ok(())
}

/// Loop until the reader supplies the name of a file that exists on disk.
///
/// Empty lines are rejected and re-prompted. Relative paths are resolved
/// against the working directory. EOF ends the loop with an error.
fn prompt_for_file(reader: &mut impl BufRead, route: &str) -> io::Result<PathBuf> {
    loop {
        print!("Enter the filename to serve for {route}: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed before a filename was supplied",
            ));
        }

        let filename = line.trim();
        if filename.is_empty() {
            println!("Error: Filename cannot be empty. Please enter a valid filename.");
            continue;
        }

        let filepath = absolutize(filename);
        if filepath.is_file() {
            return Ok(filepath);
        }
        println!(
            "Error: File '{}' not found. Please try again.",
            filepath.display()
        );
    }
}

/// Resolve a possibly-relative path against the working directory
fn absolutize(filename: impl AsRef<Path>) -> PathBuf {
    let path = filename.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Cursor;

    fn temp_file(name: &str, content: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("prompt-test-{name}-{}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_prompt_skips_empty_and_missing() {
        let existing = temp_file("answer", b"content");
        let input = format!("\n/no/such/file\n{}\n", existing.display());
        let mut reader = Cursor::new(input);

        let chosen = prompt_for_file(&mut reader, "/answer").unwrap();
        assert_eq!(chosen, existing);
        std::fs::remove_file(existing).unwrap();
    }

    #[test]
    fn test_prompt_eof_is_error() {
        let mut reader = Cursor::new("");
        let err = prompt_for_file(&mut reader, "/answer").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_resolve_rejects_missing_local() {
        let mut routes = RoutesConfig {
            default: "/answer".to_string(),
            table: HashMap::from([(
                "/answer".to_string(),
                FileSource::Local {
                    path: "/no/such/answer.toml".to_string(),
                },
            )]),
        };
        let err = resolve_sources(&mut routes).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_resolve_accepts_existing_local() {
        let existing = temp_file("local", b"x");
        let mut routes = RoutesConfig {
            default: "/answer".to_string(),
            table: HashMap::from([(
                "/answer".to_string(),
                FileSource::Local {
                    path: existing.to_string_lossy().into_owned(),
                },
            )]),
        };
        resolve_sources(&mut routes).unwrap();
        assert_eq!(
            routes.table.get("/answer"),
            Some(&FileSource::Local {
                path: existing.to_string_lossy().into_owned(),
            })
        );
        std::fs::remove_file(existing).unwrap();
    }

    #[test]
    fn test_resolve_absolutizes_relative_local() {
        let name = format!("prompt-test-relative-{}.toml", std::process::id());
        std::fs::write(&name, b"x").unwrap();

        let mut routes = RoutesConfig {
            default: "/answer".to_string(),
            table: HashMap::from([(
                "/answer".to_string(),
                FileSource::Local { path: name.clone() },
            )]),
        };
        resolve_sources(&mut routes).unwrap();

        let expected = std::env::current_dir().unwrap().join(&name);
        assert_eq!(
            routes.table.get("/answer"),
            Some(&FileSource::Local {
                path: expected.to_string_lossy().into_owned(),
            })
        );
        std::fs::remove_file(name).unwrap();
    }

    #[test]
    fn test_resolve_leaves_remote_untouched() {
        let mut routes = RoutesConfig::default();
        let before = routes.table.clone();
        resolve_sources(&mut routes).unwrap();
        assert_eq!(routes.table, before);
    }
}
