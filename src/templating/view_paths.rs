//! Template search path and candidate file names.
//!
//! Templates live under one or more root directories. Each root contains one
//! subdirectory per variant path, holding files named
//! `<name>[.<locale>][.<format>].<handler>`:
//!
//! ```text
//! app/components/
//! ├── mid/
//! │   ├── show.tera
//! │   └── card.html.tera
//! └── users/
//!     └── details.en.html.tera
//! ```
//!
//! [`LookupDetails`] expands a template name into the candidate file names to probe,
//! and [`ViewPaths`] probes them across every root in order.

use std::collections::BTreeSet;
use std::path::{Component as PathComponent, Path, PathBuf};
use walkdir::WalkDir;

use crate::core::{ComponentError, Result};

/// Qualifiers used to expand a template name into file names.
///
/// Locales and formats are optional infixes; an empty list means "no infix". Every
/// candidate ends with one of the handler extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupDetails {
    /// Locale infixes, most preferred first
    pub locales: Vec<String>,
    /// Format infixes, most preferred first
    pub formats: Vec<String>,
    /// Handler extensions, most preferred first
    pub handlers: Vec<String>,
}

impl LookupDetails {
    /// Details with explicit locales, formats and handlers.
    pub fn new(locales: Vec<String>, formats: Vec<String>, handlers: Vec<String>) -> Self {
        Self {
            locales,
            formats,
            handlers,
        }
    }

    /// Details with empty locale and format qualifiers, as used by the existence check
    /// of the ancestor walk.
    pub fn handlers_only(handlers: Vec<String>) -> Self {
        Self {
            locales: Vec::new(),
            formats: Vec::new(),
            handlers,
        }
    }

    /// Candidate file names for `name`, most specific first.
    ///
    /// ```
    /// use component_views::templating::LookupDetails;
    ///
    /// let details = LookupDetails::new(vec![], vec!["html".into()], vec!["tera".into()]);
    /// assert_eq!(details.candidates("mid/show"), ["mid/show.html.tera", "mid/show.tera"]);
    /// ```
    pub fn candidates(&self, name: &str) -> Vec<String> {
        let locales: Vec<Option<&str>> =
            self.locales.iter().map(|l| Some(l.as_str())).chain(std::iter::once(None)).collect();
        let formats: Vec<Option<&str>> =
            self.formats.iter().map(|f| Some(f.as_str())).chain(std::iter::once(None)).collect();

        let mut candidates = Vec::with_capacity(locales.len() * formats.len() * self.handlers.len());
        for locale in &locales {
            for format in &formats {
                for handler in &self.handlers {
                    let mut file = String::from(name);
                    if let Some(locale) = locale {
                        file.push('.');
                        file.push_str(locale);
                    }
                    if let Some(format) = format {
                        file.push('.');
                        file.push_str(format);
                    }
                    file.push('.');
                    file.push_str(handler);
                    candidates.push(file);
                }
            }
        }
        candidates
    }
}

/// Ordered list of template root directories, shared by every variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewPaths {
    roots: Vec<PathBuf>,
}

impl ViewPaths {
    /// Create a search path from root directories, searched in order.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
        }
    }

    /// The root directories.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Find the file backing a qualified template name, probing every candidate in
    /// every root. Roots take precedence over candidate specificity.
    pub fn find(&self, qualified_name: &str, details: &LookupDetails) -> Option<PathBuf> {
        let candidates = details.candidates(qualified_name);
        for root in &self.roots {
            for candidate in &candidates {
                let path = root.join(candidate);
                tracing::trace!("Probing template candidate {}", path.display());
                if path.is_file() {
                    return Some(path);
                }
            }
        }
        None
    }

    /// Whether `<prefix>/<name>` exists in any root.
    pub fn exists(&self, name: &str, prefix: &str, details: &LookupDetails) -> bool {
        self.find(&format!("{prefix}/{name}"), details).is_some()
    }

    /// Qualified names of the templates directly under `prefix` in any root.
    ///
    /// Only files whose last extension is one of the handlers count. The result is
    /// sorted and free of duplicates.
    pub fn template_names(&self, prefix: &str, details: &LookupDetails) -> Vec<String> {
        let mut names = BTreeSet::new();
        for root in &self.roots {
            let dir = root.join(prefix);
            if !dir.is_dir() {
                continue;
            }
            for entry in WalkDir::new(&dir)
                .min_depth(1)
                .max_depth(1)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                if let Some(name) = template_name_of(entry.path(), details) {
                    names.insert(format!("{prefix}/{name}"));
                }
            }
        }
        names.into_iter().collect()
    }

    /// Qualified names of every template under any root, at any depth.
    ///
    /// Same filtering as [`template_names`](Self::template_names); used to make
    /// partials and layouts available to `include`, `extends` and `import`.
    pub fn all_template_names(&self, details: &LookupDetails) -> Vec<String> {
        let mut names = BTreeSet::new();
        for root in self.roots.iter().filter(|r| r.is_dir()) {
            for entry in WalkDir::new(root)
                .min_depth(1)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                let Some(name) = template_name_of(entry.path(), details) else {
                    continue;
                };
                let Some(dir) = entry.path().parent().and_then(|p| p.strip_prefix(root).ok()) else {
                    continue;
                };
                let segments: Option<Vec<&str>> =
                    dir.components().map(|c| c.as_os_str().to_str()).collect();
                if let Some(mut segments) = segments {
                    segments.push(&name);
                    names.insert(segments.join("/"));
                }
            }
        }
        names.into_iter().collect()
    }
}

/// Template name of a file (its name up to the first dot) if it has a known handler.
fn template_name_of(path: &Path, details: &LookupDetails) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let extension = path.extension()?.to_str()?;
    if !details.handlers.iter().any(|h| h == extension) {
        return None;
    }
    let name = file_name.split('.').next()?;
    (!name.is_empty()).then(|| name.to_string())
}

/// Reject template identifiers that could escape the template roots.
///
/// # Errors
///
/// Returns [`ComponentError::InvalidTemplateName`] for empty names, absolute paths,
/// backslashes and `..` segments.
pub fn validate_template_name(name: &str) -> Result<()> {
    let reject = |reason: &str| {
        Err(ComponentError::InvalidTemplateName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.trim().is_empty() {
        return reject("name is empty");
    }
    if name.contains('\\') {
        return reject("use '/' as the directory separator");
    }
    if name.starts_with('/') || Path::new(name).is_absolute() {
        return reject("absolute paths are not allowed");
    }
    if Path::new(name).components().any(|c| matches!(c, PathComponent::ParentDir)) {
        return reject("'..' segments are not allowed");
    }
    if name.ends_with('/') {
        return reject("name must end with a template, not a directory");
    }
    Ok(())
}
