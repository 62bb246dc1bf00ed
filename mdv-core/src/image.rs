//! Relative image path rewriting for a sandboxed rendering surface
//!
//! The rendering surface has no direct filesystem access; locally-referenced
//! images are served through a fixed virtual host mapped to the document's
//! directory. This module rewrites eligible `<img src="...">` values in
//! already-rendered HTML to that virtual-host form. Everything else in the
//! HTML passes through byte-identical.

use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Virtual host authority the rendering surface maps to the document directory.
pub const VIRTUAL_HOST: &str = "https://appassets.example/";

/// Match src="..." or src='...' anywhere inside an <img> tag, keeping the
/// attributes before and after it intact.
fn img_src_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)(<img[^>]*?)src\s*=\s*["']([^"']*)["']([^>]*?>)"#).unwrap())
}

/// Rewrite relative `img src` values in rendered HTML against `base_dir`.
///
/// A src is rewritten only when it is neither a well-formed absolute URI
/// (any `scheme:` prefix, so remote URLs and `data:` URIs pass through) nor
/// an absolute filesystem path. Relative paths are joined to the base
/// directory, lexically normalized, re-relativized, and prefixed with
/// [`VIRTUAL_HOST`] using forward slashes.
///
/// With no base directory the input is returned unchanged. Any single src
/// that fails to resolve, or that climbs above the base directory via `..`,
/// is left untouched rather than failing the whole document.
pub fn rewrite_image_paths(html: &str, base_dir: Option<&Path>) -> String {
    let Some(base_dir) = base_dir else {
        return html.to_string();
    };

    img_src_re()
        .replace_all(html, |caps: &Captures| match resolve_src(&caps[2], base_dir) {
            Some(resolved) => format!("{}src=\"{}\"{}", &caps[1], resolved, &caps[3]),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Resolve one src value, or None to leave the occurrence unchanged.
fn resolve_src(src: &str, base_dir: &Path) -> Option<String> {
    if src.is_empty() || has_uri_scheme(src) || Path::new(src).is_absolute() {
        return None;
    }

    let target = normalize(&base_dir.join(src))?;
    let base = normalize(base_dir)?;

    let relative = match target.strip_prefix(&base) {
        Ok(relative) => relative,
        Err(_) => {
            log::warn!("image src '{}' escapes the document directory, leaving it unresolved", src);
            return None;
        }
    };

    let mut parts = Vec::new();
    for component in relative.components() {
        parts.push(component.as_os_str().to_str()?);
    }

    Some(format!("{}{}", VIRTUAL_HOST, parts.join("/")))
}

/// True if the value starts with a URI scheme (`https:`, `data:`, even a
/// Windows drive prefix, which is absolute either way).
fn has_uri_scheme(src: &str) -> bool {
    let Some((scheme, _)) = src.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Lexically resolve `.` and `..` components without touching the filesystem.
/// Returns None when `..` climbs past the root of the path.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            other => out.push(other),
        }
    }
    Some(out)
}
