use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use anyhow::Context;

use crate::{
    foundation::error::{CardError, CardResult},
    text::builtin,
};

/// File names tried, in order, when a spec has no usable explicit path.
pub const FALLBACK_FONT_NAMES: &[&str] = &[
    "Pretendard-Bold.otf",
    "Pretendard-SemiBold.otf",
    "Pretendard-Regular.otf",
    "Pretendard.ttf",
    "Pretendard.otf",
    "Arial.ttf",
    "arial.ttf",
];

/// Requested font: optional file path plus pixel size.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    pub path: Option<PathBuf>,
    pub size: u32,
}

impl FontSpec {
    pub fn new(path: Option<PathBuf>, size: u32) -> CardResult<Self> {
        if size == 0 {
            return Err(CardError::validation("font size must be > 0"));
        }
        Ok(Self { path, size })
    }

    /// Spec without an explicit path; resolution goes straight to the fallback list.
    pub fn sized(size: u32) -> CardResult<Self> {
        Self::new(None, size)
    }

    pub fn with_path(path: impl Into<PathBuf>, size: u32) -> CardResult<Self> {
        Self::new(Some(path.into()), size)
    }
}

/// Outline font loaded from disk; shaped by parley and drawn from the shaped run's face.
#[derive(Clone)]
pub struct OutlineFont {
    /// File the bytes were read from.
    pub source: PathBuf,
    /// Requested pixel size.
    pub size_px: f32,
    /// Raw font file bytes.
    pub bytes: Arc<Vec<u8>>,
}

impl std::fmt::Debug for OutlineFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFont")
            .field("source", &self.source)
            .field("size_px", &self.size_px)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// A usable font: an outline face or the built-in bitmap font.
#[derive(Clone, Debug)]
pub enum FontResource {
    Outline(OutlineFont),
    Builtin,
}

impl FontResource {
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }

    /// Effective pixel size; the built-in font ignores the requested size.
    pub fn size_px(&self) -> f32 {
        match self {
            Self::Outline(f) => f.size_px,
            Self::Builtin => builtin::CELL_HEIGHT as f32,
        }
    }
}

/// A resolution depends on the search configuration as well as the spec.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct FontKey {
    path: Option<PathBuf>,
    size: u32,
    search_dirs: Arc<[PathBuf]>,
    fallback_names: Arc<[String]>,
}

/// Read-through cache of resolved fonts keyed by `(path, size)` and the resolving chain.
///
/// Resolvers with different search directories or fallback names may share one cache without
/// seeing each other's entries. Entries are immutable and never evicted. Two racing writers may both resolve the same key;
/// the first insert wins and the second caller receives the stored entry.
#[derive(Debug, Default)]
pub struct FontCache {
    entries: RwLock<HashMap<FontKey, Arc<FontResource>>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, key: &FontKey) -> Option<Arc<FontResource>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn insert(&self, key: FontKey, font: Arc<FontResource>) -> Arc<FontResource> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.entry(key).or_insert(font).clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

enum Candidate<'a> {
    Explicit(&'a Path),
    Named(&'a str),
    Builtin,
}

/// Resolves [`FontSpec`]s through an ordered candidate chain ending in the built-in font.
#[derive(Clone, Debug)]
pub struct FontResolver {
    cache: Arc<FontCache>,
    search_dirs: Arc<[PathBuf]>,
    fallback_names: Arc<[String]>,
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new(Arc::new(FontCache::new()))
    }
}

impl FontResolver {
    /// Resolver that looks for fallback names in the working directory.
    pub fn new(cache: Arc<FontCache>) -> Self {
        Self {
            cache,
            search_dirs: Arc::from([PathBuf::from(".")]),
            fallback_names: FALLBACK_FONT_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the directories searched for fallback font names.
    pub fn with_search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_dirs = dirs.into();
        self
    }

    pub fn with_fallback_names(mut self, names: Vec<String>) -> Self {
        self.fallback_names = names.into();
        self
    }

    pub fn cache(&self) -> &Arc<FontCache> {
        &self.cache
    }

    /// Resolve `spec`, never failing.
    pub fn resolve(&self, spec: &FontSpec) -> Arc<FontResource> {
        let key = FontKey {
            path: spec.path.clone(),
            size: spec.size,
            search_dirs: Arc::clone(&self.search_dirs),
            fallback_names: Arc::clone(&self.fallback_names),
        };
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }
        let resolved = Arc::new(self.resolve_uncached(spec));
        self.cache.insert(key, resolved)
    }

    fn resolve_uncached(&self, spec: &FontSpec) -> FontResource {
        let mut chain = Vec::with_capacity(self.fallback_names.len() + 2);
        if let Some(p) = spec.path.as_deref() {
            chain.push(Candidate::Explicit(p));
        }
        chain.extend(self.fallback_names.iter().map(|n| Candidate::Named(n.as_str())));
        chain.push(Candidate::Builtin);

        for candidate in chain {
            match candidate {
                Candidate::Explicit(path) => match load_outline(path, spec.size) {
                    Ok(font) => return FontResource::Outline(font),
                    Err(err) => {
                        tracing::debug!(path = %path.display(), %err, "explicit font unusable");
                    }
                },
                Candidate::Named(name) => {
                    for dir in self.search_dirs.iter() {
                        let path = dir.join(name);
                        if !path.is_file() {
                            continue;
                        }
                        match load_outline(&path, spec.size) {
                            Ok(font) => return FontResource::Outline(font),
                            Err(err) => {
                                tracing::debug!(path = %path.display(), %err, "fallback font unusable");
                            }
                        }
                    }
                }
                Candidate::Builtin => {
                    tracing::debug!(size = spec.size, "using built-in bitmap font");
                    return FontResource::Builtin;
                }
            }
        }
        FontResource::Builtin
    }
}

fn load_outline(path: &Path, size: u32) -> CardResult<OutlineFont> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read font '{}'", path.display()))
        .map_err(CardError::from)?;
    if !looks_like_font(&bytes) {
        return Err(CardError::validation(format!(
            "'{}' is not a TrueType/OpenType font",
            path.display()
        )));
    }
    Ok(OutlineFont {
        source: path.to_path_buf(),
        size_px: size as f32,
        bytes: Arc::new(bytes),
    })
}

fn looks_like_font(bytes: &[u8]) -> bool {
    let Some(magic) = bytes.get(..4) else {
        return false;
    };
    magic == [0x00, 0x01, 0x00, 0x00] || magic == b"OTTO" || magic == b"true" || magic == b"ttcf"
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
