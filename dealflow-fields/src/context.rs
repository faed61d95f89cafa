//! FieldsContext — main API surface for the fields registry.
//!
//! Manages field definitions and entity templates as YAML files under a
//! schema directory. Provides in-memory indexes for fast lookup by both
//! name and ULID.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;
use ulid::Ulid;

use crate::error::{FieldsError, Result};
use crate::types::{EntityDef, FieldDef};
use dealflow_layout::{pack, LayoutField};

/// A collection of default field definitions and entity templates.
///
/// Consumers build this to pass to `FieldsContextBuilder::with_defaults()`.
/// On open, defaults that don't already exist on disk are written.
#[derive(Default)]
pub struct FieldDefaults {
    fields: Vec<FieldDef>,
    entities: Vec<EntityDef>,
}

impl FieldDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a default field definition.
    pub fn field(mut self, def: FieldDef) -> Self {
        self.fields.push(def);
        self
    }

    /// Add a default entity template.
    pub fn entity(mut self, def: EntityDef) -> Self {
        self.entities.push(def);
        self
    }

    /// Access the field definitions.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Access the entity templates.
    pub fn entities(&self) -> &[EntityDef] {
        &self.entities
    }
}

/// Builder for `FieldsContext`. Created by `FieldsContext::open()`.
pub struct FieldsContextBuilder {
    root: PathBuf,
    defaults: Option<FieldDefaults>,
}

impl FieldsContextBuilder {
    /// Provide default field definitions and entity templates.
    /// Defaults are seeded on first open; existing definitions are preserved.
    pub fn with_defaults(mut self, defaults: FieldDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Build the context: create directories, seed defaults, load from disk.
    pub async fn build(self) -> Result<FieldsContext> {
        let root = self.root;

        let defs_dir = root.join("definitions");
        let entities_dir = root.join("entities");
        fs::create_dir_all(&defs_dir).await?;
        fs::create_dir_all(&entities_dir).await?;

        // Seed defaults before loading
        if let Some(defaults) = self.defaults {
            seed_defaults(&root, &defaults).await?;
        }

        let mut ctx = FieldsContext {
            root,
            fields: Vec::new(),
            entities: Vec::new(),
            name_index: HashMap::new(),
            id_index: HashMap::new(),
            entity_index: HashMap::new(),
        };

        ctx.load_definitions().await?;
        ctx.load_entities().await?;

        debug!(
            fields = ctx.fields.len(),
            entities = ctx.entities.len(),
            "fields context opened"
        );

        Ok(ctx)
    }
}

/// Seed default definitions that don't already exist on disk.
///
/// Fields are matched by ULID — if a file with that ULID exists (even if
/// renamed), the default is skipped. Entity templates are matched by name.
async fn seed_defaults(root: &Path, defaults: &FieldDefaults) -> Result<()> {
    let defs_dir = root.join("definitions");
    let entities_dir = root.join("entities");

    let existing_ids = collect_existing_field_ids(&defs_dir).await?;

    for def in defaults.fields() {
        if !existing_ids.contains(&def.id) {
            let yaml = serde_yaml_ng::to_string(def)?;
            let path = defs_dir.join(format!("{}.yaml", def.name));
            atomic_write(&path, yaml.as_bytes()).await?;
            debug!(name = %def.name, id = %def.id, "seeded default field");
        }
    }

    for def in defaults.entities() {
        let path = entities_dir.join(format!("{}.yaml", def.name));
        if !path.exists() {
            let yaml = serde_yaml_ng::to_string(def)?;
            atomic_write(&path, yaml.as_bytes()).await?;
            debug!(name = %def.name, "seeded default entity template");
        }
    }

    Ok(())
}

/// Read all .yaml files in definitions/ and extract their ULIDs.
async fn collect_existing_field_ids(defs_dir: &Path) -> Result<Vec<Ulid>> {
    let mut ids = Vec::new();
    if !defs_dir.exists() {
        return Ok(ids);
    }
    let mut entries = fs::read_dir(defs_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path).await {
            if let Ok(def) = serde_yaml_ng::from_str::<FieldDef>(&content) {
                ids.push(def.id);
            }
        }
    }
    Ok(ids)
}

/// Context for field definitions and entity templates.
///
/// Owns a directory on disk with the structure:
/// ```text
/// schema/
///   definitions/    ← one .yaml per field
///   entities/       ← one .yaml per entity type
/// ```
pub struct FieldsContext {
    root: PathBuf,
    fields: Vec<FieldDef>,
    entities: Vec<EntityDef>,
    name_index: HashMap<String, usize>,
    id_index: HashMap<Ulid, usize>,
    entity_index: HashMap<String, usize>,
}

impl FieldsContext {
    /// Open or create a schema directory. Returns a builder for optional
    /// configuration.
    ///
    /// ```rust,ignore
    /// // Simple open:
    /// let ctx = FieldsContext::open(path).build().await?;
    ///
    /// // With defaults:
    /// let ctx = FieldsContext::open(path)
    ///     .with_defaults(deal_defaults())
    ///     .build()
    ///     .await?;
    /// ```
    pub fn open(root: impl Into<PathBuf>) -> FieldsContextBuilder {
        FieldsContextBuilder {
            root: root.into(),
            defaults: None,
        }
    }

    // --- Field definitions ---

    /// Get a field definition by name.
    pub fn get_field_by_name(&self, name: &str) -> Option<&FieldDef> {
        self.name_index.get(name).map(|&i| &self.fields[i])
    }

    /// Get a field definition by ULID.
    pub fn get_field_by_id(&self, id: &Ulid) -> Option<&FieldDef> {
        self.id_index.get(id).map(|&i| &self.fields[i])
    }

    /// All field definitions.
    pub fn all_fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Write (create or update) a field definition. Persists to YAML
    /// immediately. A new field may not reuse an existing field's name.
    pub async fn write_field(&mut self, def: &FieldDef) -> Result<()> {
        if let Some(&idx) = self.name_index.get(&def.name) {
            if self.fields[idx].id != def.id {
                return Err(FieldsError::DuplicateFieldName {
                    name: def.name.clone(),
                });
            }
        }

        let yaml = serde_yaml_ng::to_string(def)?;
        let path = self.definition_path(&def.name);
        atomic_write(&path, yaml.as_bytes()).await?;

        if let Some(&idx) = self.id_index.get(&def.id) {
            // Existing field — might be renamed
            let old_name = self.fields[idx].name.clone();
            if old_name != def.name {
                self.name_index.remove(&old_name);
                let old_path = self.definition_path(&old_name);
                let _ = fs::remove_file(&old_path).await;
            }
            self.fields[idx] = def.clone();
            self.name_index.insert(def.name.clone(), idx);
        } else {
            let idx = self.fields.len();
            self.fields.push(def.clone());
            self.name_index.insert(def.name.clone(), idx);
            self.id_index.insert(def.id, idx);
        }

        Ok(())
    }

    /// Delete a field definition by ULID.
    pub async fn delete_field(&mut self, id: &Ulid) -> Result<()> {
        let idx = self
            .id_index
            .get(id)
            .copied()
            .ok_or_else(|| FieldsError::FieldNotFoundById { id: id.to_string() })?;

        let def = &self.fields[idx];
        let path = self.definition_path(&def.name);
        let _ = fs::remove_file(&path).await;

        let name = def.name.clone();
        self.name_index.remove(&name);
        self.id_index.remove(id);

        // Swap-remove and fix indexes
        self.fields.swap_remove(idx);
        if idx < self.fields.len() {
            let moved = &self.fields[idx];
            self.name_index.insert(moved.name.clone(), idx);
            self.id_index.insert(moved.id, idx);
        }

        Ok(())
    }

    // --- Entity templates ---

    /// Get an entity template by name.
    pub fn get_entity(&self, name: &str) -> Option<&EntityDef> {
        self.entity_index.get(name).map(|&i| &self.entities[i])
    }

    /// All entity templates.
    pub fn all_entities(&self) -> &[EntityDef] {
        &self.entities
    }

    /// Write (create or update) an entity template. Persists to YAML
    /// immediately.
    pub async fn write_entity(&mut self, def: &EntityDef) -> Result<()> {
        let yaml = serde_yaml_ng::to_string(def)?;
        let path = self.entity_path(&def.name);
        atomic_write(&path, yaml.as_bytes()).await?;

        if let Some(&idx) = self.entity_index.get(&def.name) {
            self.entities[idx] = def.clone();
        } else {
            let idx = self.entities.len();
            self.entities.push(def.clone());
            self.entity_index.insert(def.name.clone(), idx);
        }

        Ok(())
    }

    // --- Lookup helpers ---

    /// Resolve field definitions for an entity template, in template order.
    /// Names without a matching definition are skipped.
    pub fn fields_for_entity(&self, entity_name: &str) -> Vec<&FieldDef> {
        let Some(entity) = self.get_entity(entity_name) else {
            return Vec::new();
        };
        entity
            .fields
            .iter()
            .filter_map(|name| self.get_field_by_name(name))
            .collect()
    }

    /// The packed form layout for an entity template: one layout entry per
    /// resolvable field, in template order, with row indices assigned.
    pub fn form_layout_for_entity(&self, entity_name: &str) -> Result<Vec<LayoutField>> {
        if self.get_entity(entity_name).is_none() {
            return Err(FieldsError::EntityNotFound {
                name: entity_name.to_string(),
            });
        }
        let entries: Vec<LayoutField> = self
            .fields_for_entity(entity_name)
            .iter()
            .map(|def| def.layout_field())
            .collect();
        Ok(pack(&entries))
    }

    /// The root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // --- Internal ---

    fn definition_path(&self, name: &str) -> PathBuf {
        self.root.join("definitions").join(format!("{name}.yaml"))
    }

    fn entity_path(&self, name: &str) -> PathBuf {
        self.root.join("entities").join(format!("{name}.yaml"))
    }

    async fn load_definitions(&mut self) -> Result<()> {
        let defs_dir = self.root.join("definitions");
        let mut entries = fs::read_dir(&defs_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let content = fs::read_to_string(&path).await?;
            match serde_yaml_ng::from_str::<FieldDef>(&content) {
                Ok(def) => {
                    let idx = self.fields.len();
                    self.name_index.insert(def.name.clone(), idx);
                    self.id_index.insert(def.id, idx);
                    self.fields.push(def);
                }
                Err(e) => {
                    tracing::warn!(?path, %e, "skipping invalid field definition");
                }
            }
        }
        Ok(())
    }

    async fn load_entities(&mut self) -> Result<()> {
        let entities_dir = self.root.join("entities");
        let mut entries = fs::read_dir(&entities_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let content = fs::read_to_string(&path).await?;
            match serde_yaml_ng::from_str::<EntityDef>(&content) {
                Ok(def) => {
                    let idx = self.entities.len();
                    self.entity_index.insert(def.name.clone(), idx);
                    self.entities.push(def);
                }
                Err(e) => {
                    tracing::warn!(?path, %e, "skipping invalid entity definition");
                }
            }
        }
        Ok(())
    }
}

/// Write to a temp file then rename for atomic persistence.
async fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no parent dir"))?;
    let tmp = dir.join(format!(".tmp_{}", Ulid::new()));
    fs::write(&tmp, data).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}
