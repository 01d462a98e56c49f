//! Classification and record assembly.
//!
//! [`Introspector::introspect`] hashes a file, classifies it by extension,
//! reads the module's self-declared metadata and returns one
//! [`PluginRecord`]. Only a hashing failure is fatal for a file; load, walk
//! and decode problems are attached to the record as diagnostics.

use std::path::Path;

use tracing::debug;

use crate::encoding::{EncodingError, decode_legacy, decode_wide};
use crate::error::IntrospectError;
use crate::hasher::content_hash;
use crate::module::{Module, ModuleLoader, NativeLoader, with_module};
use crate::plugin::{Diagnostic, MetadataEntry, PluginCategory, PluginRecord, Stage};
use crate::table::{
    Accessor, ColorTable, FilterTable, InputTable, MAX_TEXT_LEN, OutputTable, RawEntry, WalkError,
    walk,
};

/// String-table resource holding a language plugin's display name.
pub const LANGUAGE_NAME_ID: u32 = 0;
/// String-table resource holding a language plugin's description.
pub const LANGUAGE_INFO_ID: u32 = 1;

/// Inspects plugin files one at a time. Holds no state between files.
#[derive(Debug, Default)]
pub struct Introspector<L = NativeLoader> {
    loader: L,
}

impl Introspector<NativeLoader> {
    /// Introspector backed by the OS loader.
    pub fn native() -> Self {
        Self { loader: NativeLoader }
    }
}

impl<L: ModuleLoader> Introspector<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Build the record for one file.
    pub fn introspect(&self, path: &Path) -> Result<PluginRecord, IntrospectError> {
        let content_hash = content_hash(path)
            .map_err(|source| IntrospectError::Hash { path: path.to_path_buf(), source })?;

        let category = PluginCategory::from_path(path);
        debug!(path = %path.display(), %category, "introspecting");

        let mut diagnostics = Vec::new();
        let entries = match category {
            PluginCategory::Unknown => Vec::new(),
            PluginCategory::Language => self.language_entries(path, &mut diagnostics),
            _ => self.table_entries(path, category, &mut diagnostics),
        };

        Ok(PluginRecord {
            path: path.to_path_buf(),
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            content_hash,
            category,
            entries,
            diagnostics,
        })
    }

    /// Introspect every path in order. A failing file never stops the batch.
    pub fn introspect_all<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Vec<Result<PluginRecord, IntrospectError>> {
        paths.iter().map(|p| self.introspect(p.as_ref())).collect()
    }

    fn table_entries(
        &self,
        path: &Path,
        category: PluginCategory,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<MetadataEntry> {
        let raw = match with_module(&self.loader, path, |module| walk_tables(module, category)) {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                debug!(path = %path.display(), error = %e, "table walk failed");
                diagnostics.push(Diagnostic::new(Stage::Walk, e.to_string()));
                return Vec::new();
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "module load failed");
                diagnostics.push(Diagnostic::new(Stage::Load, e.reason));
                return Vec::new();
            }
        };

        raw.into_iter()
            .enumerate()
            .map(|(index, RawEntry { name, information, truncated })| {
                if truncated {
                    diagnostics.push(Diagnostic::new(
                        Stage::Walk,
                        format!("entry {index} text truncated to {MAX_TEXT_LEN} bytes"),
                    ));
                }
                MetadataEntry {
                    name: decoded(decode_legacy(&name), index, "name", diagnostics),
                    info: decoded(decode_legacy(&information), index, "info", diagnostics),
                }
            })
            .collect()
    }

    fn language_entries(
        &self,
        path: &Path,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<MetadataEntry> {
        let strings = with_module(&self.loader, path, |module| {
            let name = module.load_string(LANGUAGE_NAME_ID)?;
            let info = module.load_string(LANGUAGE_INFO_ID).unwrap_or_default();
            Some((name, info))
        });

        match strings {
            Ok(Some((name, info))) => vec![MetadataEntry {
                name: decoded(decode_wide(&name), 0, "name", diagnostics),
                info: decoded(decode_wide(&info), 0, "info", diagnostics),
            }],
            Ok(None) => {
                debug!(path = %path.display(), "no language name resource");
                Vec::new()
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "module load failed");
                diagnostics.push(Diagnostic::new(Stage::Load, e.reason));
                Vec::new()
            }
        }
    }
}

fn walk_tables<M: Module>(
    module: &M,
    category: PluginCategory,
) -> Result<Vec<RawEntry>, WalkError> {
    let Some(names) = category.export_names() else {
        return Ok(Vec::new());
    };
    let Some(accessor) = Accessor::resolve(module, &names) else {
        debug!(%category, "module exports no table accessor");
        return Ok(Vec::new());
    };

    // SAFETY: `module` stays loaded for this call, and the loader contract
    // ties each category's accessor names to that category's record layout.
    unsafe {
        match category {
            PluginCategory::Filter => walk::<FilterTable>(accessor),
            PluginCategory::Input => walk::<InputTable>(accessor),
            PluginCategory::Output => walk::<OutputTable>(accessor),
            PluginCategory::Color => walk::<ColorTable>(accessor),
            PluginCategory::Language | PluginCategory::Unknown => Ok(Vec::new()),
        }
    }
}

/// Unwrap a decoded field, or record why it is empty.
fn decoded(
    result: Result<String, EncodingError>,
    index: usize,
    field: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    result.unwrap_or_else(|e| {
        diagnostics.push(Diagnostic::new(Stage::Decode, format!("entry {index} {field}: {e}")));
        String::new()
    })
}
